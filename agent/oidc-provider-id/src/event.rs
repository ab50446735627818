use agent_utils::impl_display_as_json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_plain::{derive_display_from_serialize, derive_fromstr_from_deserialize};

/// The resource property that carries the OIDC provider ARN.
pub const OIDC_PROVIDER_ARN_PROPERTY: &str = "oidcProviderArn";

/// The lifecycle phase a custom resource event is delivered for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

derive_display_from_serialize!(RequestType);
derive_fromstr_from_deserialize!(RequestType);

/// A custom resource lifecycle event as delivered by the deployment engine, e.g.
///
/// ```json
/// {
///   "RequestType": "Create",
///   "ResourceProperties": {
///     "oidcProviderArn": "arn:aws:iam::123456789012:oidc-provider/oidc.eks.eu-west-1.amazonaws.com/id/ABCDEF123"
///   }
/// }
/// ```
///
/// `RequestType` is kept as a string so that an unknown value can be reported back as it was
/// received. The remaining envelope fields are informational.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceEvent {
    pub request_type: String,
    pub resource_properties: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_resource_properties: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_token: Option<String>,
    #[serde(rename = "ResponseURL", skip_serializing_if = "Option::is_none")]
    pub response_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

impl CustomResourceEvent {
    pub fn new<S: Into<String>>(request_type: S) -> Self {
        Self {
            request_type: request_type.into(),
            ..Self::default()
        }
    }

    /// Set the `oidcProviderArn` resource property.
    pub fn with_oidc_provider_arn<S: Into<String>>(mut self, arn: S) -> Self {
        self.resource_properties
            .get_or_insert_with(Map::new)
            .insert(
                OIDC_PROVIDER_ARN_PROPERTY.to_string(),
                Value::String(arn.into()),
            );
        self
    }
}

/// The data returned to the deployment engine. Attributes in `Data` become readable on the custom
/// resource, here as `Id`. A `Delete` produces no data and serializes as `{}`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CustomResourceResponse {
    #[serde(rename = "Data", default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ProviderIdData>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProviderIdData {
    #[serde(rename = "Id")]
    pub id: String,
}

impl CustomResourceResponse {
    pub fn provider_id<S: Into<String>>(id: S) -> Self {
        Self {
            data: Some(ProviderIdData { id: id.into() }),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl_display_as_json!(CustomResourceResponse);
