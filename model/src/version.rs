use serde_plain::{derive_deserialize_from_fromstr, derive_serialize_from_display};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Represents the Kubernetes version a tenant control plane runs. Examples of valid values when
/// parsing:
/// - `v1.25`
/// - `1.25`
/// - `v1.25.2`
/// - `1.25.2`
///
/// In YAML the value must be quoted when it has no patch component, otherwise `1.25` is read as
/// a float and rejected.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct K8sVersion {
    major: u8,
    minor: u8,
    patch: Option<u8>,
}

impl K8sVersion {
    pub const fn new(major: u8, minor: u8, patch: Option<u8>) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Returns the version with a v prefix and only the major and minor versions, even if a patch
    /// value is present. Example: `v1.25`.
    pub fn major_minor_with_v(&self) -> String {
        format!("v{}.{}", self.major, self.minor)
    }

    /// Returns the version with a v prefix. Includes the patch value if it exists. Examples:
    /// `v1.25.2` when a patch value exists, or `v1.25` if the patch value is `None`.
    pub fn full_version_with_v(&self) -> String {
        match self.patch {
            Some(patch) => format!("v{}.{}.{}", self.major, self.minor, patch),
            None => self.major_minor_with_v(),
        }
    }

    pub fn parse<S: AsRef<str>>(s: S) -> std::result::Result<Self, String> {
        let original = s.as_ref();
        let no_v = original.strip_prefix('v').unwrap_or(original);
        let mut iter = no_v.split('.');
        let major = parse_component(iter.next(), "major", original)?;
        let minor = parse_component(iter.next(), "minor", original)?;
        let patch = match iter.next() {
            Some(s) => Some(parse_component(Some(s), "patch", original)?),
            None => None,
        };
        if iter.next().is_some() {
            return Err(format!(
                "Too many components when parsing '{}' as a k8s version",
                original
            ));
        }
        Ok(Self {
            major,
            minor,
            patch,
        })
    }
}

fn parse_component(
    component: Option<&str>,
    what: &str,
    original: &str,
) -> std::result::Result<u8, String> {
    component
        .ok_or_else(|| {
            format!(
                "Unable to find the {} version number when parsing '{}' as a k8s version",
                what, original
            )
        })?
        .parse::<u8>()
        .map_err(|e| {
            format!(
                "Error when parsing the {} version number of '{}': {}",
                what, original, e
            )
        })
}

impl Display for K8sVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.full_version_with_v(), f)
    }
}

impl FromStr for K8sVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        K8sVersion::parse(s)
    }
}

derive_serialize_from_display!(K8sVersion);
derive_deserialize_from_fromstr!(K8sVersion, "k8s version such as v1.25 or 1.25.2");

#[test]
fn k8s_version_invalid() {
    assert!(K8sVersion::parse("1.foo").is_err());
    assert!(K8sVersion::parse("1").is_err());
    assert!(K8sVersion::parse("v1.25.x").is_err());
    assert!(K8sVersion::parse("1.25.2.1").is_err());
    assert!(K8sVersion::parse("").is_err());
}

#[test]
fn k8s_version_valid() {
    let k8s_version = K8sVersion::from_str("v1.25.2").unwrap();
    assert_eq!("v1.25", k8s_version.major_minor_with_v());
    assert_eq!("v1.25.2", k8s_version.full_version_with_v());
    assert_eq!(K8sVersion::new(1, 25, None), K8sVersion::parse("1.25").unwrap());
    assert_eq!("v1.25", K8sVersion::parse("1.25").unwrap().to_string());
}
