use crate::error::{self, Result};
use regex::Regex;
use snafu::OptionExt;

/// `arn:aws:iam::<12 digit account id>:oidc-provider/<provider id>`. The account id is matched
/// with `[0-9]` because `\d` also accepts non-ASCII digits.
const OIDC_PROVIDER_ARN_PATTERN_REGEX: &str = r"^arn:aws:iam::[0-9]{12}:oidc-provider/(.+)$";

lazy_static::lazy_static! {
    static ref REGEX: Regex = {
        #[allow(clippy::unwrap_used)]
        Regex::new(OIDC_PROVIDER_ARN_PATTERN_REGEX).unwrap()
    };
}

/// Extract the provider id (the issuer host and path, e.g.
/// `oidc.eks.eu-west-1.amazonaws.com/id/ABCDEF123`) from an IAM OIDC provider ARN. The id is
/// returned exactly as it appears in the ARN.
///
/// An ARN with nothing after `oidc-provider/` is `MalformedArn` rather than an empty id. IAM never
/// issues such an ARN, and an empty id would produce condition keys like `:sub`.
pub fn extract_provider_id(arn: &str) -> Result<String> {
    let captures = REGEX
        .captures(arn)
        .context(error::MalformedArnSnafu { arn })?;
    let provider_id = captures
        .get(1)
        .context(error::MalformedArnSnafu { arn })?;
    Ok(provider_id.as_str().to_string())
}
