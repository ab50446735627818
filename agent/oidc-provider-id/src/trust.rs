/*!

IAM trust policies for Kubernetes service accounts that assume an IAM role through the cluster's
OIDC provider (IRSA). The provider id resolved from the ARN is the prefix of the condition keys.

!*/

use crate::arn::extract_provider_id;
use crate::error::Result;
use serde_json::{json, Value};

/// The audience the EKS pod identity webhook requests tokens for.
pub const STS_AUDIENCE: &str = "sts.amazonaws.com";
pub const EBS_CSI_NAMESPACE: &str = "kube-system";
pub const EBS_CSI_SERVICE_ACCOUNT: &str = "ebs-csi-controller-sa";

/// The `StringEquals` conditions that restrict a role to one service account's tokens.
pub fn trust_conditions(provider_id: &str, namespace: &str, service_account: &str) -> Value {
    json!({
        format!("{}:aud", provider_id): STS_AUDIENCE,
        format!("{}:sub", provider_id): format!("system:serviceaccount:{}:{}", namespace, service_account),
    })
}

/// The assume role policy document for a role that `namespace/service_account` can assume with a
/// web identity token issued by the provider behind `provider_arn`.
pub fn assume_role_policy(
    provider_arn: &str,
    namespace: &str,
    service_account: &str,
) -> Result<Value> {
    let provider_id = extract_provider_id(provider_arn)?;
    Ok(json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Effect": "Allow",
            "Principal": {
                "Federated": provider_arn
            },
            "Action": "sts:AssumeRoleWithWebIdentity",
            "Condition": {
                "StringEquals": trust_conditions(&provider_id, namespace, service_account)
            }
        }]
    }))
}
