use crate::error::{self, Result, TenantConfigError};
use crate::TenantDescriptor;
use log::{debug, info, warn};
use serde::Serialize;
use snafu::ResultExt;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

/// The outcome of loading a tenants directory. A file that cannot be turned into a
/// [`TenantDescriptor`] does not stop the others from loading; it is recorded in `failures` and
/// the caller decides whether that is acceptable.
#[derive(Debug, Default)]
pub struct TenantLoad {
    pub tenants: Vec<TenantDescriptor>,
    pub failures: Vec<LoadFailure>,
}

/// A tenant file that was rejected, and why.
#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: TenantConfigError,
}

impl Display for LoadFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unable to load tenant config from '{}': {}",
            self.path.display(),
            self.error
        )
    }
}

impl TenantLoad {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// A serializable summary, for printing the result of a load.
    pub fn report(&self) -> LoadReport<'_> {
        LoadReport {
            tenants: &self.tenants,
            failures: self
                .failures
                .iter()
                .map(|failure| FailureReport {
                    path: failure.path.display().to_string(),
                    error: failure.error.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoadReport<'a> {
    pub tenants: &'a [TenantDescriptor],
    pub failures: Vec<FailureReport>,
}

#[derive(Debug, Serialize)]
pub struct FailureReport {
    pub path: String,
    pub error: String,
}

/// Load one tenant from the file at `path`.
pub fn load_tenant_config<P: AsRef<Path>>(
    path: P,
) -> std::result::Result<TenantDescriptor, TenantConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).context(error::ReadFileSnafu { path })?;
    TenantDescriptor::from_yaml_str(&contents)
}

/// Load every tenant file found directly in `directory`. Subdirectories are skipped. Files are
/// visited in file name order so that repeated runs produce the same tenant order. A file whose
/// tenant name was already loaded from an earlier file is rejected with `DuplicateTenant`.
///
/// Only a failure to list `directory` itself is returned as an error. Each file that fails to
/// load is logged and recorded in [`TenantLoad::failures`].
pub fn load_tenant_configs<P: AsRef<Path>>(directory: P) -> Result<TenantLoad> {
    let directory = directory.as_ref();
    let mut paths = Vec::new();
    let read_dir = fs::read_dir(directory).context(error::ListDirectorySnafu { directory })?;
    for entry in read_dir {
        let entry = entry.context(error::ListDirectorySnafu { directory })?;
        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        } else {
            debug!("Skipping '{}', it is not a file", path.display());
        }
    }
    paths.sort();

    // Tenant names become stack names, so the first file to claim a name keeps it.
    let mut loaded_from: HashMap<String, PathBuf> = HashMap::new();
    let mut load = TenantLoad::default();
    for path in paths {
        let loaded = load_tenant_config(&path).and_then(|tenant| {
            match loaded_from.get(tenant.name()) {
                Some(first) => error::DuplicateTenantSnafu {
                    name: tenant.name(),
                    first,
                }
                .fail(),
                None => Ok(tenant),
            }
        });
        match loaded {
            Ok(tenant) => {
                debug!("Loaded tenant '{}' from '{}'", tenant.name(), path.display());
                loaded_from.insert(tenant.name().to_string(), path);
                load.tenants.push(tenant);
            }
            Err(error) => {
                let failure = LoadFailure { path, error };
                warn!("{}", failure);
                load.failures.push(failure);
            }
        }
    }
    info!(
        "Loaded {} tenant(s) from '{}', rejected {} file(s)",
        load.tenants.len(),
        directory.display(),
        load.failures.len()
    );
    Ok(load)
}
