/*!

`oidc-provider-id` is the handler behind the admin cluster's OIDC provider id custom resource.
The deployment engine sends a lifecycle event carrying the cluster's IAM OIDC provider ARN, and
the handler answers with the provider id, the `<issuer host>/<path>` part of the ARN that IAM uses
as the prefix of web identity condition keys.

The handler is a pure function of the event; the `oidc-provider-id` binary wraps it for a process
that receives the event as JSON.

!*/

#![deny(
    clippy::expect_used,
    clippy::get_unwrap,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::panicking_unwrap,
    clippy::unwrap_in_result,
    clippy::unwrap_used
)]

pub use arn::extract_provider_id;
pub use error::{ResolutionError, Result};
pub use event::{
    CustomResourceEvent, CustomResourceResponse, ProviderIdData, RequestType,
    OIDC_PROVIDER_ARN_PROPERTY,
};
pub use handler::{resolve, resolve_json, resolve_request, ResolutionRequest};

mod arn;
mod error;
mod event;
mod handler;
pub mod trust;
