use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::Path;
use tabled::object::Segment;
use tabled::{Alignment, Modify, Style, Table, Tabled};
use tenantsys_model::constants::{
    SSM_ADMIN_CLUSTER_KUBECTL_ROLE_ARN, SSM_ADMIN_CLUSTER_NAME, SSM_ADMIN_CLUSTER_VPC_ID,
};
use tenantsys_model::{load_tenant_configs, LoadReport, TenantDescriptor};

/// List the tenants found in the tenants directory.
#[derive(Debug, Parser)]
pub(crate) struct List {
    /// Output the tenants and rejected files in JSON format.
    #[clap(long = "json")]
    json: bool,
}

/// The SSM parameters the admin cluster stack publishes for the tenant stacks to read.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdminClusterParameters {
    cluster_name: &'static str,
    kubectl_role_arn: &'static str,
    vpc_id: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListOutput<'a> {
    admin_cluster_parameters: AdminClusterParameters,
    #[serde(flatten)]
    report: LoadReport<'a>,
}

#[derive(Tabled)]
struct TenantRow {
    #[tabled(rename = "STACK")]
    stack: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "NAMESPACE")]
    namespace: String,
    #[tabled(rename = "VERSION")]
    version: String,
    #[tabled(rename = "API PORT")]
    api_port: u16,
    #[tabled(rename = "PROXY PORT")]
    proxy_port: u16,
}

impl From<&TenantDescriptor> for TenantRow {
    fn from(tenant: &TenantDescriptor) -> Self {
        Self {
            stack: tenant.stack_name(),
            name: tenant.name().to_string(),
            namespace: tenant.namespace().to_string(),
            version: tenant.kubernetes_version().to_string(),
            api_port: tenant.api_port(),
            proxy_port: tenant.proxy_port(),
        }
    }
}

impl List {
    pub(crate) fn run(self, tenants_dir: &Path) -> Result<()> {
        let load = load_tenant_configs(tenants_dir).context("Unable to load tenants")?;

        if self.json {
            let output = ListOutput {
                admin_cluster_parameters: AdminClusterParameters {
                    cluster_name: SSM_ADMIN_CLUSTER_NAME,
                    kubectl_role_arn: SSM_ADMIN_CLUSTER_KUBECTL_ROLE_ARN,
                    vpc_id: SSM_ADMIN_CLUSTER_VPC_ID,
                },
                report: load.report(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&output)
                    .context("Could not create string from tenant list.")?
            );
            return Ok(());
        }

        let rows: Vec<TenantRow> = load.tenants.iter().map(TenantRow::from).collect();
        let mut table = Table::new(rows);
        table
            .with(Style::blank())
            .with(Modify::new(Segment::all()).with(Alignment::left()));
        println!("{}", table);
        if !load.is_complete() {
            println!();
            println!("Rejected tenant files:");
            for failure in &load.failures {
                println!("  {}: {}", failure.path.display(), failure.error);
            }
        }
        Ok(())
    }
}
