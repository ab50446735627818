use snafu::Snafu;
use std::path::PathBuf;

/// Errors that stop the loader or the renderer as a whole.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Unable to list tenants directory '{}': {}", directory.display(), source))]
    ListDirectory {
        directory: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Unable to serialize manifests for tenant '{}': {}", name, source))]
    ManifestSerialization {
        name: String,
        source: serde_yaml::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// The reasons a single tenant file can be rejected. The loader collects these per file rather
/// than returning them, see [`crate::TenantLoad`].
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TenantConfigError {
    #[snafu(display("Unable to read file '{}': {}", path.display(), source))]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Unable to parse YAML: {}", source))]
    YamlParse { source: serde_yaml::Error },

    #[snafu(display("Expected a YAML mapping at the top level of the document"))]
    NotAMapping,

    #[snafu(display("Unknown field '{}'", field))]
    UnknownField { field: String },

    #[snafu(display("Missing required field '{}'", field))]
    MissingField { field: String },

    #[snafu(display("Unable to deserialize tenant config: {}", source))]
    Deserialize { source: serde_yaml::Error },

    #[snafu(display("Invalid value for field '{}': {}", field, reason))]
    InvalidField { field: String, reason: String },

    #[snafu(display(
        "Tenant '{}' is already defined in '{}'",
        name,
        first.display()
    ))]
    DuplicateTenant { name: String, first: PathBuf },
}

pub type TenantConfigResult<T> = std::result::Result<T, TenantConfigError>;
