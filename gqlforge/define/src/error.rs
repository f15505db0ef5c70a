//! Errors raised while loading codegen configuration.

use thiserror::Error;

/// Errors in loading or decoding a [`CodegenOptions`](crate::CodegenOptions) file.
///
/// The compiler itself never validates endpoint fields; malformed values are
/// reported by the external generator once it consumes the plan. These
/// errors only cover getting the options into memory.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        /// Path that was being read.
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file extension does not map to a supported format.
    #[error("Unsupported config format '{extension}' (expected yaml, yml or json)")]
    UnsupportedFormat {
        /// The offending extension (empty when the path has none).
        extension: String,
    },

    /// YAML decoding failed.
    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON decoding failed.
    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// An environment override held a value of the wrong shape.
    #[error("Invalid value '{value}' for {var}: {reason}")]
    InvalidEnv {
        /// The environment variable name.
        var: &'static str,
        /// The raw value found.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}
