//! Configuration schema and defaults for the ichnome front-end.
//!
//! Defines the TOML-serializable configuration with the `[general]`, `[api]`
//! and `[server]` sections. Every field has a built-in default; users only
//! set what they want to override.

use serde::{Deserialize, Serialize};

pub use crate::vocabulary::Vocabulary;

/// Default backend endpoint (the ichnome web API's default bind address).
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:3024";

/// Default address the front-end listens on.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:3000";

pub const DEFAULT_APPLICATION_NAME: &str = "ichnome";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level front-end configuration.
///
/// Maps to `~/.ichnome-front/config.toml` and `.ichnome-front.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontConfig {
    pub general: GeneralConfig,
    pub api: ApiConfig,
    pub server: ServerConfig,
}

// ---------------------------------------------------------------------------
// [general]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Shown in every page title.
    pub application_name: String,
    /// `group` or `namespace`.
    pub vocabulary: Vocabulary,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            application_name: DEFAULT_APPLICATION_NAME.to_string(),
            vocabulary: Vocabulary::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// [api]
// ---------------------------------------------------------------------------

/// Backend REST API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every request path is resolved against.
    pub endpoint_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// `host:port` to bind.
    pub address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
        }
    }
}

impl FrontConfig {
    /// Annotated default config written by `config init`.
    pub fn default_toml() -> String {
        format!(
            r#"# ichnome-front configuration

[general]
# Shown in every page title.
application_name = "{DEFAULT_APPLICATION_NAME}"
# "group" (groups / footprints) or "namespace" (namespaces / objects).
vocabulary = "group"

[api]
# Base URL of the ichnome REST API.
endpoint_url = "{DEFAULT_ENDPOINT_URL}"

[server]
# Address the front-end listens on.
address = "{DEFAULT_ADDRESS}"
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_toml_parses_to_defaults() {
        let parsed: FrontConfig = toml::from_str(&FrontConfig::default_toml()).unwrap();
        assert_eq!(parsed, FrontConfig::default());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed: FrontConfig = toml::from_str("[api]\nendpoint_url = \"http://x:1\"\n").unwrap();
        assert_eq!(parsed.api.endpoint_url, "http://x:1");
        assert_eq!(parsed.server.address, DEFAULT_ADDRESS);
        assert_eq!(parsed.general.vocabulary, Vocabulary::Group);
    }

    #[test]
    fn vocabulary_deserializes_kebab_case() {
        let parsed: FrontConfig = toml::from_str("[general]\nvocabulary = \"namespace\"\n").unwrap();
        assert_eq!(parsed.general.vocabulary, Vocabulary::Namespace);
    }
}
