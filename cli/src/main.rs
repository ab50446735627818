/*!

This is the command line interface for the tenants of a Kamaji admin cluster: it loads the tenant
files, renders the objects each tenant stack applies, and resolves the admin cluster's OIDC
provider details.

!*/

mod list;
mod oidc_id;
mod render;
mod trust_policy;

use agent_utils::init_agent_logger;
use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use tenantsys_model::constants::DEFAULT_TENANTS_DIR;

/// The command line interface for the tenants of a Kamaji admin cluster.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    /// Set logging verbosity [trace|debug|info|warn|error]. If the environment variable `RUST_LOG`
    /// is present, it overrides the default logging behavior. See https://docs.rs/env_logger/latest
    #[clap(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
    /// The directory holding one YAML file per tenant.
    #[clap(long = "tenants-dir", default_value = DEFAULT_TENANTS_DIR)]
    tenants_dir: PathBuf,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Parser)]
enum Command {
    /// List the tenants and the tenant files that were rejected.
    List(list::List),
    /// Render the namespace and TenantControlPlane manifests of every tenant.
    Render(render::Render),
    /// Print the provider id of an IAM OIDC provider ARN.
    OidcId(oidc_id::OidcId),
    /// Print the assume role policy that lets a service account use an IAM role.
    TrustPolicy(trust_policy::TrustPolicy),
}

fn main() {
    let args = Args::parse();
    init_agent_logger(env!("CARGO_CRATE_NAME"), Some(args.log_level));
    if let Err(e) = run(args) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::List(list) => list.run(&args.tenants_dir),
        Command::Render(render) => render.run(&args.tenants_dir),
        Command::OidcId(oidc_id) => oidc_id.run(),
        Command::TrustPolicy(trust_policy) => trust_policy.run(),
    }
}
