//! Error types for the gqlforge generator.

use gqlforge_define::ConfigError;
use thiserror::Error;

/// Errors that can occur while compiling, rendering, or writing output.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Failed to load codegen options
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Failed to serialize the generation plan
    #[error("Failed to serialize plan: {0}")]
    Serialize(String),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Output directory does not exist
    #[error("Output directory does not exist: {0}")]
    OutputDirNotFound(String),

    /// A scaffolded file is already present and `--force` was not given.
    #[error("Refusing to overwrite existing file '{0}' (use --force)")]
    AlreadyExists(String),

    /// A command-line value cannot be used.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// The argument name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl From<serde_json::Error> for GeneratorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}
