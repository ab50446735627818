/*!

The Kubernetes objects that make up a tenant in the admin cluster: the tenant's namespace and the
Kamaji `TenantControlPlane` that runs inside it.

!*/

use crate::constants::{
    DEFAULT_ADMISSION_CONTROLLERS, DEFAULT_CONTROL_PLANE_REPLICAS, DEFAULT_DATA_STORE,
    DEFAULT_KUBELET_CGROUPFS, DEFAULT_SERVICE_TYPE, LABEL_TENANT,
};
use crate::error::{self, Result};
use crate::TenantDescriptor;
use k8s_openapi::api::core::v1::{Namespace, ResourceRequirements};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::CustomResource;
use maplit::btreemap;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use std::collections::BTreeMap;

/// The subset of the Kamaji `TenantControlPlane` spec that tenant stacks set. The CRD itself is
/// owned and installed by the Kamaji operator, so no schema is generated here.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug)]
#[kube(
    group = "kamaji.clastix.io",
    version = "v1alpha1",
    kind = "TenantControlPlane",
    namespaced,
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct TenantControlPlaneSpec {
    pub data_store: String,
    pub control_plane: ControlPlane,
    pub kubernetes: KubernetesSpec,
    pub network_profile: NetworkProfile,
    pub addons: Addons,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlane {
    pub deployment: ControlPlaneDeployment,
    pub service: ControlPlaneService,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlaneDeployment {
    pub replicas: i32,
    pub additional_metadata: AdditionalMetadata,
    pub extra_args: ComponentArgs,
    pub resources: ComponentResources,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlaneService {
    pub additional_metadata: AdditionalMetadata,
    pub service_type: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AdditionalMetadata {
    pub labels: BTreeMap<String, String>,
}

/// Extra command line arguments for each control plane component.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ComponentArgs {
    pub api_server: Vec<String>,
    pub controller_manager: Vec<String>,
    pub scheduler: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ComponentResources {
    pub api_server: ResourceRequirements,
    pub controller_manager: ResourceRequirements,
    pub scheduler: ResourceRequirements,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesSpec {
    pub version: String,
    pub kubelet: Kubelet,
    pub admission_controllers: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Kubelet {
    pub cgroupfs: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
    pub port: u16,
    #[serde(rename = "certSANs")]
    pub cert_sans: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_cidr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_cidr: Option<String>,
    #[serde(rename = "dnsServiceIPs", skip_serializing_if = "Option::is_none")]
    pub dns_service_ips: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Addons {
    #[serde(rename = "coreDNS")]
    pub core_dns: AddonSpec,
    pub kube_proxy: AddonSpec,
    pub konnectivity: Konnectivity,
}

/// An addon that is enabled with Kamaji's defaults. Serializes as `{}`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AddonSpec {}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Konnectivity {
    pub server: KonnectivityServer,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct KonnectivityServer {
    pub port: u16,
    pub resources: ResourceRequirements,
}

/// The objects a tenant stack applies to the admin cluster. The namespace must exist before the
/// control plane is created in it, so documents are always emitted namespace first.
#[derive(Clone, Debug)]
pub struct TenantManifests {
    pub namespace: Namespace,
    pub control_plane: TenantControlPlane,
}

impl TenantManifests {
    /// Serialize both objects as one multi-document YAML stream.
    pub fn to_yaml(&self) -> Result<String> {
        let name = self.control_plane.metadata.name.clone().unwrap_or_default();
        let mut out = String::new();
        for document in [
            serde_yaml::to_string(&self.namespace),
            serde_yaml::to_string(&self.control_plane),
        ] {
            let document = document.context(error::ManifestSerializationSnafu { name: &name })?;
            if !document.starts_with("---") {
                out.push_str("---\n");
            }
            out.push_str(&document);
            if !document.ends_with('\n') {
                out.push('\n');
            }
        }
        Ok(out)
    }
}

/// Build the namespace and `TenantControlPlane` for `tenant`.
pub fn render_tenant(tenant: &TenantDescriptor) -> TenantManifests {
    let namespace = Namespace {
        metadata: ObjectMeta {
            name: Some(tenant.namespace().to_string()),
            ..ObjectMeta::default()
        },
        ..Namespace::default()
    };

    let mut control_plane = TenantControlPlane::new(tenant.name(), control_plane_spec(tenant));
    control_plane.metadata.namespace = Some(tenant.namespace().to_string());

    TenantManifests {
        namespace,
        control_plane,
    }
}

fn control_plane_spec(tenant: &TenantDescriptor) -> TenantControlPlaneSpec {
    let tenant_labels = AdditionalMetadata {
        labels: btreemap! { LABEL_TENANT.to_string() => tenant.name().to_string() },
    };
    TenantControlPlaneSpec {
        data_store: DEFAULT_DATA_STORE.to_string(),
        control_plane: ControlPlane {
            deployment: ControlPlaneDeployment {
                replicas: DEFAULT_CONTROL_PLANE_REPLICAS,
                additional_metadata: tenant_labels.clone(),
                extra_args: ComponentArgs::default(),
                resources: ComponentResources {
                    api_server: requests("250m", "512Mi"),
                    controller_manager: requests("125m", "256Mi"),
                    scheduler: requests("125m", "256Mi"),
                },
            },
            service: ControlPlaneService {
                additional_metadata: tenant_labels,
                service_type: DEFAULT_SERVICE_TYPE.to_string(),
            },
        },
        kubernetes: KubernetesSpec {
            version: tenant.kubernetes_version().full_version_with_v(),
            kubelet: Kubelet {
                cgroupfs: DEFAULT_KUBELET_CGROUPFS.to_string(),
            },
            admission_controllers: DEFAULT_ADMISSION_CONTROLLERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        },
        network_profile: NetworkProfile {
            port: tenant.api_port(),
            cert_sans: vec![tenant.cert_san()],
            pod_cidr: tenant.pod_cidr().map(str::to_string),
            service_cidr: tenant.service_cidr().map(str::to_string),
            dns_service_ips: tenant.dns_service_ip().map(|ip| vec![ip.to_string()]),
        },
        addons: Addons {
            core_dns: AddonSpec::default(),
            kube_proxy: AddonSpec::default(),
            konnectivity: Konnectivity {
                server: KonnectivityServer {
                    port: tenant.proxy_port(),
                    resources: requests("100m", "128Mi"),
                },
            },
        },
    }
}

/// Resource requests with an explicitly empty set of limits.
fn requests(cpu: &str, memory: &str) -> ResourceRequirements {
    ResourceRequirements {
        requests: Some(btreemap! {
            "cpu".to_string() => Quantity(cpu.to_string()),
            "memory".to_string() => Quantity(memory.to_string()),
        }),
        limits: Some(BTreeMap::new()),
        ..ResourceRequirements::default()
    }
}
