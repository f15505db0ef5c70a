//! Codegen options: the set of endpoints plus global settings.
//!
//! Options are usually loaded from a `gqlforge.yaml` file. Global settings
//! missing from the file fall back to environment variables, then to
//! built-in defaults:
//!
//! | Setting | Environment variable | Default |
//! |---------|----------------------|---------|
//! | `baseOutputDir` | `GQLFORGE_OUTPUT_DIR` | `src/graphql` |
//! | `reactQueryVersion` | `GQLFORGE_REACT_QUERY_VERSION` | `5` |
//! | `appName` | `GQLFORGE_APP_NAME` | `app` |

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::endpoint::EndpointConfig;
use crate::error::ConfigError;

/// Environment variable overriding the default output directory.
pub const ENV_OUTPUT_DIR: &str = "GQLFORGE_OUTPUT_DIR";
/// Environment variable overriding the default react-query major version.
pub const ENV_REACT_QUERY_VERSION: &str = "GQLFORGE_REACT_QUERY_VERSION";
/// Environment variable overriding the default application name.
pub const ENV_APP_NAME: &str = "GQLFORGE_APP_NAME";

const DEFAULT_OUTPUT_DIR: &str = "src/graphql";
const DEFAULT_REACT_QUERY_VERSION: u8 = 5;
const DEFAULT_APP_NAME: &str = "app";

/// Endpoint map plus global generation settings.
///
/// Endpoint names are map keys, so two endpoints can never share output
/// paths. A `BTreeMap` keeps iteration (and therefore the compiled plan)
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodegenOptions {
    /// Named endpoints.
    #[serde(default)]
    pub endpoints: BTreeMap<String, EndpointConfig>,
    /// Root directory for every generated file.
    #[serde(default = "default_output_dir")]
    pub base_output_dir: String,
    /// Major version of react-query the hooks target.
    #[serde(default = "default_react_query_version")]
    pub react_query_version: u8,
    /// Application name used in generated docs.
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            endpoints: BTreeMap::new(),
            base_output_dir: default_output_dir(),
            react_query_version: default_react_query_version(),
            app_name: default_app_name(),
        }
    }
}

impl CodegenOptions {
    /// Creates options with default settings and no endpoints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a named endpoint.
    pub fn with_endpoint(mut self, name: impl Into<String>, config: EndpointConfig) -> Self {
        self.endpoints.insert(name.into(), config);
        self
    }

    /// Sets the output root.
    pub fn with_base_output_dir(mut self, dir: impl Into<String>) -> Self {
        self.base_output_dir = dir.into();
        self
    }

    /// Sets the application name.
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    /// Sets the react-query major version.
    pub fn with_react_query_version(mut self, version: u8) -> Self {
        self.react_query_version = version;
        self
    }

    /// Loads options from a YAML (`.yaml`/`.yml`) or JSON (`.json`) file.
    ///
    /// ## Errors
    ///
    /// Returns an error if the file cannot be read, has an unknown extension,
    /// or fails to decode.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();

        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml(&content),
            "json" => Self::from_json(&content),
            _ => Err(ConfigError::UnsupportedFormat { extension }),
        }
    }

    /// Decodes options from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Decodes options from JSON text.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Validates the environment overrides without applying them.
    ///
    /// Serde defaults silently ignore a malformed `GQLFORGE_REACT_QUERY_VERSION`;
    /// callers that want a hard failure (the CLI does) call this first.
    pub fn check_env() -> Result<(), ConfigError> {
        if let Ok(value) = std::env::var(ENV_REACT_QUERY_VERSION) {
            value
                .trim()
                .parse::<u8>()
                .map_err(|e| ConfigError::InvalidEnv {
                    var: ENV_REACT_QUERY_VERSION,
                    value,
                    reason: e.to_string(),
                })?;
        }
        Ok(())
    }
}

fn default_output_dir() -> String {
    std::env::var(ENV_OUTPUT_DIR).unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string())
}

fn default_react_query_version() -> u8 {
    std::env::var(ENV_REACT_QUERY_VERSION)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_REACT_QUERY_VERSION)
}

fn default_app_name() -> String {
    std::env::var(ENV_APP_NAME).unwrap_or_else(|_| DEFAULT_APP_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    const YAML: &str = r#"
appName: bookings
baseOutputDir: web/gql
reactQueryVersion: 4
endpoints:
  main:
    schema: https://api.example.com/graphql
    documentsPath: graphql/main/**/*.graphql
    gatewayEndpoint: https://api.example.com/graphql
    headers:
      x-api-key: abc
  admin:
    schema: admin.graphql
    documentsPath: graphql/admin/**/*.graphql
    gatewayEndpoint: https://admin.example.com/graphql
"#;

    #[test]
    fn from_yaml_reads_all_fields() {
        let opts = CodegenOptions::from_yaml(YAML).unwrap();
        assert_eq!(opts.app_name, "bookings");
        assert_eq!(opts.base_output_dir, "web/gql");
        assert_eq!(opts.react_query_version, 4);
        assert_eq!(opts.endpoints.len(), 2);
        assert_eq!(
            opts.endpoints["main"].headers.get("x-api-key").map(String::as_str),
            Some("abc")
        );
        assert!(opts.endpoints["admin"].headers.is_empty());
    }

    #[test]
    fn endpoint_iteration_is_sorted() {
        let opts = CodegenOptions::from_yaml(YAML).unwrap();
        let names: Vec<_> = opts.endpoints.keys().cloned().collect();
        assert_eq!(names, vec!["admin", "main"]);
    }

    #[test]
    fn from_json_accepts_minimal_document() {
        let opts = CodegenOptions::from_json(r#"{"endpoints":{}, "appName":"x"}"#).unwrap();
        assert!(opts.endpoints.is_empty());
        assert_eq!(opts.app_name, "x");
    }

    #[test]
    fn from_path_dispatches_on_extension() {
        let mut file = Builder::new().suffix(".yml").tempfile().unwrap();
        file.write_all(YAML.as_bytes()).unwrap();
        let opts = CodegenOptions::from_path(file.path()).unwrap();
        assert_eq!(opts.endpoints.len(), 2);
    }

    #[test]
    fn from_path_rejects_unknown_extension() {
        let file = Builder::new().suffix(".toml").tempfile().unwrap();
        let err = CodegenOptions::from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }

    #[test]
    fn from_path_reports_missing_file() {
        let err = CodegenOptions::from_path(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn builder_sets_fields() {
        let opts = CodegenOptions::new()
            .with_app_name("demo")
            .with_base_output_dir("out")
            .with_react_query_version(5)
            .with_endpoint("main", EndpointConfig::new("https://x.test/graphql", "*.graphql"));
        assert_eq!(opts.app_name, "demo");
        assert_eq!(opts.base_output_dir, "out");
        assert!(opts.endpoints.contains_key("main"));
    }
}
