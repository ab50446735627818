use anyhow::{Context, Result};
use clap::Parser;
use oidc_provider_id::extract_provider_id;

/// Print the provider id of an IAM OIDC provider ARN.
#[derive(Debug, Parser)]
pub(crate) struct OidcId {
    /// The provider ARN, e.g. arn:aws:iam::123456789012:oidc-provider/oidc.eks.<region>.amazonaws.com/id/<id>
    arn: String,
}

impl OidcId {
    pub(crate) fn run(self) -> Result<()> {
        let provider_id = extract_provider_id(&self.arn).context("Unable to resolve provider id")?;
        println!("{}", provider_id);
        Ok(())
    }
}
