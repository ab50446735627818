/*!

This library describes the tenants of a Kamaji admin cluster. It loads the per-tenant YAML files
that drive the deployment, and renders the Kubernetes objects each tenant needs in the admin
cluster.

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

pub use error::{Error, Result, TenantConfigError, TenantConfigResult};
pub use loader::{
    load_tenant_config, load_tenant_configs, FailureReport, LoadFailure, LoadReport, TenantLoad,
};
pub use manifest::{render_tenant, TenantControlPlane, TenantControlPlaneSpec, TenantManifests};
pub use tenant::{TenantDescriptor, OPTIONAL_FIELDS, REQUIRED_FIELDS};
pub use version::K8sVersion;

pub mod constants;
mod error;
mod loader;
pub mod manifest;
mod tenant;
mod version;
