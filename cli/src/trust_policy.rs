use anyhow::{Context, Result};
use clap::Parser;
use oidc_provider_id::trust::{assume_role_policy, EBS_CSI_NAMESPACE, EBS_CSI_SERVICE_ACCOUNT};

/// Print the assume role policy for a service account of the cluster behind an OIDC provider.
/// Defaults to the EBS CSI controller.
#[derive(Debug, Parser)]
pub(crate) struct TrustPolicy {
    /// The provider ARN.
    arn: String,

    /// The namespace of the service account.
    #[clap(long = "namespace", default_value = EBS_CSI_NAMESPACE)]
    namespace: String,

    /// The name of the service account.
    #[clap(long = "service-account", default_value = EBS_CSI_SERVICE_ACCOUNT)]
    service_account: String,
}

impl TrustPolicy {
    pub(crate) fn run(self) -> Result<()> {
        let policy = assume_role_policy(&self.arn, &self.namespace, &self.service_account)
            .context("Unable to build trust policy")?;
        println!("{}", agent_utils::json_display(&policy));
        Ok(())
    }
}
