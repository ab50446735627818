/*!

`agent-utils` is a collection of functions shared by the tenantsys binaries: logger setup and
JSON display helpers.

!*/

use constants::DEFAULT_AGENT_LEVEL_FILTER;
use env_logger::Builder;
use log::LevelFilter;
use serde::Serialize;

pub mod constants;

/// The library crates of this workspace. Their records are shown at the binary's level.
const WORKSPACE_CRATES: [&str; 3] = ["agent_utils", "oidc_provider_id", "tenantsys_model"];

/// Set up `env_logger` for the binary crate `bin_crate`.
///
/// A `RUST_LOG` filter is used as given. Without one, `bin_crate` and the workspace libraries log
/// at `log_level` (or [`DEFAULT_AGENT_LEVEL_FILTER`]) and third party crates only log errors.
pub fn init_agent_logger(bin_crate: &str, log_level: Option<LevelFilter>) {
    if std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some() {
        Builder::from_default_env().init();
        return;
    }
    let level = log_level.unwrap_or(DEFAULT_AGENT_LEVEL_FILTER);
    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Error)
        .filter_module(bin_crate, level);
    for module in WORKSPACE_CRATES {
        builder.filter_module(module, level);
    }
    builder.init();
}

/// Pretty JSON for logging and printing. A value that fails to serialize is rendered as the
/// serialization error instead.
pub fn json_display<T: Serialize>(value: T) -> String {
    serde_json::to_string_pretty(&value)
        .unwrap_or_else(|e| format!("<unable to serialize as JSON: {}>", e))
}

/// Implement `Display` for a `Serialize` type as its [`json_display`] form.
#[macro_export]
macro_rules! impl_display_as_json {
    ($i:ident) => {
        impl std::fmt::Display for $i {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::json_display(self))
            }
        }
    };
}

#[cfg(test)]
mod test {
    use super::json_display;
    use serde::Serialize;

    #[derive(Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct Response {
        id: &'static str,
    }

    impl_display_as_json!(Response);

    #[test]
    fn display_as_json() {
        let response = Response { id: "abc" };
        let expected = "{\n  \"Id\": \"abc\"\n}";
        assert_eq!(json_display(&response), expected);
        assert_eq!(response.to_string(), expected);
    }
}
