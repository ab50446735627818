use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use tenantsys_model::{load_tenant_configs, render_tenant};

/// Render the objects each tenant stack applies to the admin cluster.
#[derive(Debug, Parser)]
pub(crate) struct Render {
    /// Fail without rendering anything if any tenant file was rejected.
    #[clap(long = "strict")]
    strict: bool,

    /// Write one `<tenant name>.yaml` file per tenant into this directory instead of printing a
    /// single YAML stream.
    #[clap(long = "output", short = 'o')]
    output: Option<PathBuf>,
}

impl Render {
    pub(crate) fn run(self, tenants_dir: &Path) -> Result<()> {
        let load = load_tenant_configs(tenants_dir).context("Unable to load tenants")?;
        if self.strict && !load.is_complete() {
            let rejected: Vec<String> = load.failures.iter().map(|f| f.to_string()).collect();
            bail!(
                "{} tenant file(s) were rejected:\n{}",
                rejected.len(),
                rejected.join("\n")
            );
        }

        if let Some(dir) = &self.output {
            fs::create_dir_all(dir)
                .context(format!("Unable to create directory '{}'", dir.display()))?;
        }
        for tenant in &load.tenants {
            let yaml = render_tenant(tenant)
                .to_yaml()
                .context(format!("Unable to render tenant '{}'", tenant.name()))?;
            match &self.output {
                Some(dir) => {
                    let path = dir.join(format!("{}.yaml", tenant.name()));
                    fs::write(&path, yaml)
                        .context(format!("Unable to write '{}'", path.display()))?;
                    info!("Wrote manifests for '{}' to '{}'", tenant.name(), path.display());
                }
                None => print!("{}", yaml),
            }
        }
        Ok(())
    }
}
