use crate::error::{self, TenantConfigResult};
use crate::K8sVersion;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use snafu::{ensure, OptionExt, ResultExt};
use std::net::IpAddr;

/// Keys every tenant file must carry.
pub const REQUIRED_FIELDS: [&str; 6] = ["name", "namespace", "domain", "version", "port", "proxy_port"];
/// Keys that are only present in the newer tenant file layout.
pub const OPTIONAL_FIELDS: [&str; 3] = ["pod_cidr", "svc_cidr", "dns_service"];

const DNS_LABEL_MAX_LEN: usize = 63;
const DNS_LABEL_PATTERN_REGEX: &str = r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$";

lazy_static::lazy_static! {
    static ref DNS_LABEL: Regex = {
        #[allow(clippy::unwrap_used)]
        Regex::new(DNS_LABEL_PATTERN_REGEX).unwrap()
    };
}

/// One tenant of the admin cluster, as described by a single YAML file:
///
/// ```yaml
/// name: acme
/// namespace: tenant-acme
/// domain: clusters.example.com
/// version: v1.25.2
/// port: 6443
/// proxy_port: 8132
/// # optional
/// pod_cidr: 10.36.0.0/16
/// svc_cidr: 10.96.0.0/16
/// dns_service: 10.96.0.10
/// ```
///
/// [`TenantDescriptor::from_yaml_str`] rejects unknown and missing keys and checks the field
/// invariants. A descriptor deserialized directly through serde has only been type checked; call
/// [`TenantDescriptor::validate`] on it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TenantDescriptor {
    name: String,
    namespace: String,
    domain: String,
    #[serde(rename = "version")]
    kubernetes_version: K8sVersion,
    #[serde(rename = "port")]
    api_port: u16,
    proxy_port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pod_cidr: Option<String>,
    #[serde(rename = "svc_cidr", default, skip_serializing_if = "Option::is_none")]
    service_cidr: Option<String>,
    #[serde(rename = "dns_service", default, skip_serializing_if = "Option::is_none")]
    dns_service_ip: Option<String>,
}

impl TenantDescriptor {
    /// Parse and validate a tenant from the contents of a YAML file.
    pub fn from_yaml_str(s: &str) -> TenantConfigResult<Self> {
        let value: Value = serde_yaml::from_str(s).context(error::YamlParseSnafu)?;
        check_fields(&value)?;
        let descriptor: Self = serde_yaml::from_value(value).context(error::DeserializeSnafu)?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Check the invariants that serde cannot express.
    pub fn validate(&self) -> TenantConfigResult<()> {
        check_dns_label("name", &self.name)?;
        check_dns_label("namespace", &self.namespace)?;
        check_domain(&self.domain)?;
        ensure!(
            self.api_port != 0,
            error::InvalidFieldSnafu {
                field: "port",
                reason: "port 0 is not a valid TCP port",
            }
        );
        ensure!(
            self.proxy_port != 0,
            error::InvalidFieldSnafu {
                field: "proxy_port",
                reason: "port 0 is not a valid TCP port",
            }
        );
        if let Some(pod_cidr) = &self.pod_cidr {
            check_cidr("pod_cidr", pod_cidr)?;
        }
        if let Some(service_cidr) = &self.service_cidr {
            check_cidr("svc_cidr", service_cidr)?;
        }
        if let Some(dns_service_ip) = &self.dns_service_ip {
            dns_service_ip
                .parse::<IpAddr>()
                .map_err(|e| invalid("dns_service", e.to_string()))?;
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn kubernetes_version(&self) -> K8sVersion {
        self.kubernetes_version
    }

    pub fn api_port(&self) -> u16 {
        self.api_port
    }

    pub fn proxy_port(&self) -> u16 {
        self.proxy_port
    }

    pub fn pod_cidr(&self) -> Option<&str> {
        self.pod_cidr.as_deref()
    }

    pub fn service_cidr(&self) -> Option<&str> {
        self.service_cidr.as_deref()
    }

    pub fn dns_service_ip(&self) -> Option<&str> {
        self.dns_service_ip.as_deref()
    }

    /// The name of the deployment stack that carries this tenant, e.g. `tenant-acme-stack`.
    pub fn stack_name(&self) -> String {
        format!("tenant-{}-stack", self.name)
    }

    /// The subject alternative name the tenant API server certificate is issued for.
    pub fn cert_san(&self) -> String {
        format!("{}.{}", self.name, self.domain)
    }
}

/// Reject documents that are not a mapping, carry keys we do not know, or lack required keys.
fn check_fields(value: &Value) -> TenantConfigResult<()> {
    let mapping = value.as_mapping().context(error::NotAMappingSnafu)?;
    for (key, _) in mapping.iter() {
        let field = match key.as_str() {
            Some(field) => field,
            None => {
                return error::UnknownFieldSnafu {
                    field: format!("{:?}", key),
                }
                .fail()
            }
        };
        ensure!(
            REQUIRED_FIELDS.contains(&field) || OPTIONAL_FIELDS.contains(&field),
            error::UnknownFieldSnafu { field }
        );
    }
    for field in REQUIRED_FIELDS {
        ensure!(
            mapping.contains_key(&Value::String(field.to_string())),
            error::MissingFieldSnafu { field }
        );
    }
    Ok(())
}

fn check_dns_label(field: &str, value: &str) -> TenantConfigResult<()> {
    ensure!(
        value.len() <= DNS_LABEL_MAX_LEN && DNS_LABEL.is_match(value),
        error::InvalidFieldSnafu {
            field,
            reason: format!(
                "'{}' is not a DNS label (at most {} lowercase alphanumeric characters or '-', \
                starting and ending with an alphanumeric character)",
                value, DNS_LABEL_MAX_LEN
            ),
        }
    );
    Ok(())
}

fn check_domain(domain: &str) -> TenantConfigResult<()> {
    ensure!(
        !domain.is_empty()
            && domain.split('.').all(|label| {
                label.len() <= DNS_LABEL_MAX_LEN && DNS_LABEL.is_match(&label.to_lowercase())
            }),
        error::InvalidFieldSnafu {
            field: "domain",
            reason: format!("'{}' is not a DNS domain", domain),
        }
    );
    Ok(())
}

fn check_cidr(field: &str, cidr: &str) -> TenantConfigResult<()> {
    let (address, prefix) = cidr
        .split_once('/')
        .ok_or_else(|| invalid(field, format!("'{}' is missing a '/<prefix>' suffix", cidr)))?;
    let address = address
        .parse::<IpAddr>()
        .map_err(|e| invalid(field, format!("'{}': {}", cidr, e)))?;
    let prefix = prefix
        .parse::<u8>()
        .map_err(|e| invalid(field, format!("'{}': invalid prefix length: {}", cidr, e)))?;
    let max_prefix = if address.is_ipv4() { 32 } else { 128 };
    ensure!(
        prefix <= max_prefix,
        error::InvalidFieldSnafu {
            field,
            reason: format!(
                "'{}': prefix length {} exceeds {}",
                cidr, prefix, max_prefix
            ),
        }
    );
    Ok(())
}

fn invalid<S: Into<String>>(field: &str, reason: S) -> error::TenantConfigError {
    error::TenantConfigError::InvalidField {
        field: field.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod test {
    use super::TenantDescriptor;
    use crate::error::TenantConfigError;
    use crate::K8sVersion;

    const ACME: &str = r#"
name: acme
namespace: tenant-acme
domain: clusters.example.com
version: v1.25.2
port: 6443
proxy_port: 8132
"#;

    fn with_line(line: &str) -> String {
        format!("{}{}\n", ACME, line)
    }

    #[test]
    fn parse_minimal() {
        let tenant = TenantDescriptor::from_yaml_str(ACME).unwrap();
        assert_eq!(tenant.name(), "acme");
        assert_eq!(tenant.namespace(), "tenant-acme");
        assert_eq!(tenant.domain(), "clusters.example.com");
        assert_eq!(tenant.kubernetes_version(), K8sVersion::new(1, 25, Some(2)));
        assert_eq!(tenant.api_port(), 6443);
        assert_eq!(tenant.proxy_port(), 8132);
        assert!(tenant.pod_cidr().is_none());
        assert!(tenant.service_cidr().is_none());
        assert!(tenant.dns_service_ip().is_none());
        assert_eq!(tenant.stack_name(), "tenant-acme-stack");
        assert_eq!(tenant.cert_san(), "acme.clusters.example.com");
    }

    #[test]
    fn parse_network_fields() {
        let s = format!(
            "{}pod_cidr: 10.36.0.0/16\nsvc_cidr: 10.96.0.0/16\ndns_service: 10.96.0.10\n",
            ACME
        );
        let tenant = TenantDescriptor::from_yaml_str(&s).unwrap();
        assert_eq!(tenant.pod_cidr(), Some("10.36.0.0/16"));
        assert_eq!(tenant.service_cidr(), Some("10.96.0.0/16"));
        assert_eq!(tenant.dns_service_ip(), Some("10.96.0.10"));
    }

    #[test]
    fn unknown_field() {
        let err = TenantDescriptor::from_yaml_str(&with_line("replicas: 3")).unwrap_err();
        assert!(
            matches!(&err, TenantConfigError::UnknownField { field } if field == "replicas"),
            "{}",
            err
        );
    }

    #[test]
    fn missing_field() {
        let s = ACME.replace("proxy_port: 8132\n", "");
        let err = TenantDescriptor::from_yaml_str(&s).unwrap_err();
        assert!(
            matches!(&err, TenantConfigError::MissingField { field } if field == "proxy_port"),
            "{}",
            err
        );
    }

    #[test]
    fn wrong_type() {
        let s = ACME.replace("port: 6443", "port: https");
        let err = TenantDescriptor::from_yaml_str(&s).unwrap_err();
        assert!(matches!(err, TenantConfigError::Deserialize { .. }), "{}", err);

        // An unquoted major.minor version is a YAML float.
        let s = ACME.replace("version: v1.25.2", "version: 1.25");
        let err = TenantDescriptor::from_yaml_str(&s).unwrap_err();
        assert!(matches!(err, TenantConfigError::Deserialize { .. }), "{}", err);
    }

    #[test]
    fn port_out_of_range() {
        let s = ACME.replace("port: 6443", "port: 70000");
        assert!(matches!(
            TenantDescriptor::from_yaml_str(&s).unwrap_err(),
            TenantConfigError::Deserialize { .. }
        ));
        let s = ACME.replace("proxy_port: 8132", "proxy_port: 0");
        assert!(matches!(
            TenantDescriptor::from_yaml_str(&s).unwrap_err(),
            TenantConfigError::InvalidField { field, .. } if field == "proxy_port"
        ));
    }

    #[test]
    fn invalid_names() {
        let too_long = "a".repeat(64);
        for bad in ["Acme", "-acme", "acme-", "ac_me", too_long.as_str()] {
            let s = ACME.replace("name: acme", &format!("name: \"{}\"", bad));
            let err = TenantDescriptor::from_yaml_str(&s).unwrap_err();
            assert!(
                matches!(&err, TenantConfigError::InvalidField { field, .. } if field == "name"),
                "'{}' should be rejected, got {}",
                bad,
                err
            );
        }
        let s = ACME.replace("namespace: tenant-acme", "namespace: \"\"");
        assert!(matches!(
            TenantDescriptor::from_yaml_str(&s).unwrap_err(),
            TenantConfigError::InvalidField { field, .. } if field == "namespace"
        ));
    }

    #[test]
    fn invalid_network_fields() {
        for (line, field) in [
            ("pod_cidr: 10.36.0.0", "pod_cidr"),
            ("pod_cidr: 10.36.0.0/33", "pod_cidr"),
            ("svc_cidr: not-a-cidr/16", "svc_cidr"),
            ("dns_service: 10.96.0.300", "dns_service"),
        ] {
            let err = TenantDescriptor::from_yaml_str(&with_line(line)).unwrap_err();
            assert!(
                matches!(&err, TenantConfigError::InvalidField { field: f, .. } if f == field),
                "'{}' should be rejected, got {}",
                line,
                err
            );
        }
        let tenant = TenantDescriptor::from_yaml_str(&with_line("pod_cidr: fd00:10::/56")).unwrap();
        assert_eq!(tenant.pod_cidr(), Some("fd00:10::/56"));
    }

    #[test]
    fn malformed_yaml() {
        let err = TenantDescriptor::from_yaml_str("name: [acme\n").unwrap_err();
        assert!(matches!(err, TenantConfigError::YamlParse { .. }), "{}", err);
        let err = TenantDescriptor::from_yaml_str("- acme\n- beta\n").unwrap_err();
        assert!(matches!(err, TenantConfigError::NotAMapping), "{}", err);
    }

    #[test]
    fn yaml_round_trip() {
        let s = format!("{}pod_cidr: 10.36.0.0/16\n", ACME);
        let tenant = TenantDescriptor::from_yaml_str(&s).unwrap();
        let serialized = serde_yaml::to_string(&tenant).unwrap();
        let reloaded = TenantDescriptor::from_yaml_str(&serialized).unwrap();
        assert_eq!(tenant, reloaded);
    }
}
