use crate::arn::extract_provider_id;
use crate::error::{self, Result};
use crate::event::{
    CustomResourceEvent, CustomResourceResponse, RequestType, OIDC_PROVIDER_ARN_PROPERTY,
};
use log::{debug, info};
use serde_json::{Map, Value};
use snafu::{OptionExt, ResultExt};

/// A custom resource event reduced to what resolution needs. `Create` and `Update` keep the
/// resource properties the ARN is read from; `Delete` needs nothing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResolutionRequest {
    Create { properties: Map<String, Value> },
    Update { properties: Map<String, Value> },
    Delete,
}

impl ResolutionRequest {
    pub fn from_event(event: &CustomResourceEvent) -> Result<Self> {
        let request_type = event
            .request_type
            .parse::<RequestType>()
            .ok()
            .context(error::InvalidRequestTypeSnafu {
                request_type: &event.request_type,
            })?;
        let properties = event.resource_properties.clone().unwrap_or_default();
        Ok(match request_type {
            RequestType::Create => Self::Create { properties },
            RequestType::Update => Self::Update { properties },
            RequestType::Delete => Self::Delete,
        })
    }
}

/// Resolve a request to the provider id, or to `None` for `Delete`, which has nothing to tear
/// down.
pub fn resolve_request(request: &ResolutionRequest) -> Result<Option<String>> {
    match request {
        ResolutionRequest::Create { properties } | ResolutionRequest::Update { properties } => {
            debug!("Extracting OIDC provider id from properties {:?}", properties);
            let arn = properties
                .get(OIDC_PROVIDER_ARN_PROPERTY)
                .and_then(Value::as_str)
                .filter(|arn| !arn.is_empty())
                .with_context(|| error::MissingPropertySnafu {
                    property: OIDC_PROVIDER_ARN_PROPERTY,
                    properties: Value::Object(properties.clone()).to_string(),
                })?;
            extract_provider_id(arn).map(Some)
        }
        ResolutionRequest::Delete => Ok(None),
    }
}

/// Handle one custom resource lifecycle event.
///
/// - `Create` and `Update` return `{"Data": {"Id": <provider id>}}`.
/// - `Delete` returns `{}` whether or not the ARN is present.
/// - Any other request type fails with `InvalidRequestType`.
pub fn resolve(event: &CustomResourceEvent) -> Result<CustomResourceResponse> {
    info!("Received custom resource event: {}", agent_utils::json_display(event));
    let request = ResolutionRequest::from_event(event)?;
    Ok(match resolve_request(&request)? {
        Some(id) => {
            info!("Resolved OIDC provider id '{}'", id);
            CustomResourceResponse::provider_id(id)
        }
        None => CustomResourceResponse::empty(),
    })
}

/// Parse a custom resource event from JSON and [`resolve`] it.
pub fn resolve_json(input: &str) -> Result<CustomResourceResponse> {
    let event: CustomResourceEvent =
        serde_json::from_str(input).context(error::EventParseSnafu)?;
    resolve(&event)
}

#[cfg(test)]
mod test {
    use super::{resolve, resolve_request, ResolutionRequest};
    use crate::error::ResolutionError;
    use crate::event::{CustomResourceEvent, CustomResourceResponse};

    const ARN: &str =
        "arn:aws:iam::123456789012:oidc-provider/oidc.eks.eu-west-1.amazonaws.com/id/ABCDEF123";
    const ID: &str = "oidc.eks.eu-west-1.amazonaws.com/id/ABCDEF123";

    #[test]
    fn create_and_update() {
        for request_type in ["Create", "Update"] {
            let event = CustomResourceEvent::new(request_type).with_oidc_provider_arn(ARN);
            assert_eq!(
                resolve(&event).unwrap(),
                CustomResourceResponse::provider_id(ID)
            );
        }
    }

    #[test]
    fn delete_ignores_properties() {
        let bare = CustomResourceEvent::new("Delete");
        assert_eq!(resolve(&bare).unwrap(), CustomResourceResponse::empty());
        let bad_arn = CustomResourceEvent::new("Delete").with_oidc_provider_arn("nonsense");
        assert_eq!(resolve(&bad_arn).unwrap(), CustomResourceResponse::empty());
    }

    #[test]
    fn invalid_request_type() {
        for request_type in ["Destroy", "create", ""] {
            let event = CustomResourceEvent::new(request_type).with_oidc_provider_arn(ARN);
            let err = resolve(&event).unwrap_err();
            assert!(
                matches!(&err, ResolutionError::InvalidRequestType { request_type: r } if r == request_type),
                "{}",
                err
            );
        }
    }

    #[test]
    fn missing_property() {
        let no_properties = CustomResourceEvent::new("Create");
        assert!(matches!(
            resolve(&no_properties).unwrap_err(),
            ResolutionError::MissingProperty { .. }
        ));

        let empty = CustomResourceEvent::new("Update").with_oidc_provider_arn("");
        let err = resolve(&empty).unwrap_err();
        assert!(
            matches!(&err, ResolutionError::MissingProperty { property, properties }
                if property == "oidcProviderArn" && properties.contains("oidcProviderArn")),
            "{}",
            err
        );

        let mut properties = serde_json::Map::new();
        properties.insert("oidcProviderArn".to_string(), serde_json::json!(42));
        let not_a_string = ResolutionRequest::Create { properties };
        assert!(matches!(
            resolve_request(&not_a_string).unwrap_err(),
            ResolutionError::MissingProperty { .. }
        ));
    }

    #[test]
    fn malformed_arn() {
        let arn = "arn:aws:iam::123:oidc-provider/x";
        let event = CustomResourceEvent::new("Create").with_oidc_provider_arn(arn);
        let err = resolve(&event).unwrap_err();
        assert!(
            matches!(&err, ResolutionError::MalformedArn { arn: a } if a == arn),
            "{}",
            err
        );
        assert!(err.to_string().contains(arn));
    }
}
