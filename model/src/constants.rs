/// Helper macro to avoid retyping the Kamaji API group when creating further string constants
/// from it. When given no parameters, this returns the group. When given a string literal
/// parameter it adds `/parameter` to the end.
macro_rules! kamaji {
    () => {
        "kamaji.clastix.io"
    };
    ($s:literal) => {
        concat!(kamaji!(), "/", $s)
    };
}

// Kamaji identifiers
pub const KAMAJI_GROUP: &str = kamaji!();
pub const KAMAJI_VERSION: &str = "v1alpha1";
pub const KAMAJI_API_VERSION: &str = kamaji!("v1alpha1");
pub const TENANT_CONTROL_PLANE_KIND: &str = "TenantControlPlane";

// Label keys
pub const LABEL_TENANT: &str = "tenant.clastix.io";

// Admin cluster parameters published to SSM by the admin cluster stack
pub const SSM_ADMIN_CLUSTER_NAME: &str = "/eks/admin-cluster/name";
pub const SSM_ADMIN_CLUSTER_KUBECTL_ROLE_ARN: &str = "/eks/admin-cluster/kubectl/role/arn";
pub const SSM_ADMIN_CLUSTER_VPC_ID: &str = "/eks/admin-cluster/vpc/id";

// Tenant control plane defaults
pub const DEFAULT_DATA_STORE: &str = "default";
pub const DEFAULT_CONTROL_PLANE_REPLICAS: i32 = 3;
pub const DEFAULT_SERVICE_TYPE: &str = "ClusterIP";
pub const DEFAULT_KUBELET_CGROUPFS: &str = "systemd";
pub const DEFAULT_ADMISSION_CONTROLLERS: [&str; 2] = ["ResourceQuota", "LimitRanger"];

/// The directory the deploy tooling reads tenant files from when none is given.
pub const DEFAULT_TENANTS_DIR: &str = "tenants";
