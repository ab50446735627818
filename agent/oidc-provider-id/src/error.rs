use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ResolutionError {
    #[snafu(display("Could not find '{}' in resource properties '{}'", property, properties))]
    MissingProperty { property: String, properties: String },

    #[snafu(display("Failed to parse OIDC provider ARN '{}'", arn))]
    MalformedArn { arn: String },

    #[snafu(display("Invalid request type: {}", request_type))]
    InvalidRequestType { request_type: String },

    #[snafu(display("Unable to parse custom resource event: {}", source))]
    EventParse { source: serde_json::Error },

    #[snafu(display("Unable to read custom resource event from {}: {}", from, source))]
    ReadEvent {
        from: String,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ResolutionError>;
