//! Project scaffolding for `gqlforge setup`.
//!
//! Copies two templates into a target directory, substituting
//! `{{PLACEHOLDER}}` tokens:
//!
//! ```text
//! <target>/
//! ├── gqlforge.yaml                 # codegen options with one endpoint
//! └── graphql/<app>/example.graphql # starter operation
//! ```
//!
//! The endpoint is named after the application, and its documents glob
//! points at the scaffolded `graphql/<app>/` directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::errors::GeneratorError;
use crate::output::write_atomic;
use crate::template::substitute;

const CONFIG_TEMPLATE: &str = include_str!("../templates/gqlforge.yaml");
const EXAMPLE_TEMPLATE: &str = include_str!("../templates/example.graphql");

/// File name of the scaffolded options file.
pub const CONFIG_FILE: &str = "gqlforge.yaml";

/// Header the API key is sent under.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Inputs to [`setup`].
#[derive(Debug, Clone)]
pub struct SetupOptions {
    /// Gateway URL, also used as the introspection source.
    pub endpoint: String,
    /// Optional API key, sent as [`API_KEY_HEADER`].
    pub api_key: Option<String>,
    /// Application (and endpoint) name.
    pub app_name: String,
    /// Directory to scaffold into. Must exist.
    pub target: PathBuf,
    /// Replace existing files.
    pub force: bool,
    /// Render without writing.
    pub dry_run: bool,
}

impl SetupOptions {
    /// Options for `endpoint` with app name `app` in the current directory.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            app_name: "app".to_string(),
            target: PathBuf::from("."),
            force: false,
            dry_run: false,
        }
    }
}

/// A rendered scaffold file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldFile {
    /// Destination path.
    pub path: PathBuf,
    /// Rendered content.
    pub content: String,
}

/// Renders the scaffold files without touching the filesystem.
///
/// ## Errors
///
/// Returns [`GeneratorError::InvalidArgument`] for an empty endpoint or an
/// app name that is not a plain identifier (`[A-Za-z0-9_-]+`).
pub fn render(options: &SetupOptions) -> Result<Vec<ScaffoldFile>, GeneratorError> {
    validate(options)?;

    let app = options.app_name.as_str();
    let documents_path = format!("graphql/{app}/**/*.graphql");

    let mut headers = Map::new();
    if let Some(key) = options.api_key.as_deref().filter(|k| !k.is_empty()) {
        headers.insert(API_KEY_HEADER.to_string(), Value::String(key.to_string()));
    }

    let mut values = BTreeMap::new();
    values.insert("APP_NAME", yaml_string(app));
    values.insert("ENDPOINT", yaml_string(&options.endpoint));
    values.insert("DOCUMENTS_PATH", yaml_string(&documents_path));
    values.insert("HEADERS", Value::Object(headers).to_string());

    let mut example_values = BTreeMap::new();
    example_values.insert("APP_NAME", app.to_string());

    Ok(vec![
        ScaffoldFile {
            path: options.target.join(CONFIG_FILE),
            content: substitute(CONFIG_TEMPLATE, &values),
        },
        ScaffoldFile {
            path: options.target.join("graphql").join(app).join("example.graphql"),
            content: substitute(EXAMPLE_TEMPLATE, &example_values),
        },
    ])
}

/// Renders and writes the scaffold.
///
/// ## Errors
///
/// - [`GeneratorError::OutputDirNotFound`] if the target does not exist
/// - [`GeneratorError::AlreadyExists`] if a file exists and `force` is off
/// - [`GeneratorError::WriteError`] on I/O failure
#[instrument(skip(options), fields(app = %options.app_name, target = %options.target.display()))]
pub fn setup(options: &SetupOptions) -> Result<Vec<ScaffoldFile>, GeneratorError> {
    let files = render(options)?;

    if options.dry_run {
        return Ok(files);
    }

    if !options.target.is_dir() {
        return Err(GeneratorError::OutputDirNotFound(
            options.target.display().to_string(),
        ));
    }

    if !options.force
        && let Some(existing) = files.iter().find(|f| f.path.exists())
    {
        return Err(GeneratorError::AlreadyExists(
            existing.path.display().to_string(),
        ));
    }

    for file in &files {
        write_atomic(&file.path, &file.content)?;
        info!(path = %file.path.display(), "scaffolded file");
    }

    Ok(files)
}

fn validate(options: &SetupOptions) -> Result<(), GeneratorError> {
    if options.endpoint.trim().is_empty() {
        return Err(GeneratorError::InvalidArgument {
            name: "endpoint".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let app = &options.app_name;
    if app.is_empty()
        || !app
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(GeneratorError::InvalidArgument {
            name: "app-name".to_string(),
            reason: "use letters, digits, '_' or '-'".to_string(),
        });
    }

    Ok(())
}

/// A double-quoted YAML scalar. JSON string syntax is valid YAML.
fn yaml_string(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// True when `path` holds a scaffolded options file.
pub fn is_scaffolded(target: &Path) -> bool {
    target.join(CONFIG_FILE).is_file()
}
