//! Generation plan types.
//!
//! A [`GenerationPlan`] is the declarative document handed to the external
//! code generator: a map from output path to [`GenerationTarget`]. The shape
//! follows the graphql-codegen `codegen.yml` contract, so every optional
//! field is omitted from the serialized form when unset.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Headers attached to a remote schema source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemoteSchemaOptions {
    /// Headers sent with the introspection request.
    pub headers: BTreeMap<String, String>,
}

/// Where the generator reads a schema from.
///
/// Serializes as a bare string when there are no headers, or as
/// `{ <location>: { headers: {...} } }` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaSource {
    /// A URL or path without extra options.
    Location(String),
    /// A location with introspection headers.
    Remote(BTreeMap<String, RemoteSchemaOptions>),
}

impl SchemaSource {
    /// Builds a schema source, attaching headers only when there are any.
    ///
    /// ## Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use gqlforge_define::SchemaSource;
    ///
    /// let bare = SchemaSource::new("schema.graphql", &BTreeMap::new());
    /// assert_eq!(bare, SchemaSource::Location("schema.graphql".to_string()));
    /// ```
    pub fn new(location: &str, headers: &BTreeMap<String, String>) -> Self {
        if headers.is_empty() {
            return Self::Location(location.to_string());
        }

        let mut map = BTreeMap::new();
        map.insert(
            location.to_string(),
            RemoteSchemaOptions {
                headers: headers.clone(),
            },
        );
        Self::Remote(map)
    }

    /// Returns the URL or path of this source.
    pub fn location(&self) -> &str {
        match self {
            Self::Location(loc) => loc,
            Self::Remote(map) => map.keys().next().map(String::as_str).unwrap_or_default(),
        }
    }
}

/// A plugin reference inside a target.
///
/// Either a bare plugin name (`typescript`) or a single-entry map carrying
/// plugin-local configuration (`add: { content: ... }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginSpec {
    /// Plugin referenced by name with no local config.
    Name(String),
    /// Plugin with its own configuration block.
    Configured(BTreeMap<String, Value>),
}

impl PluginSpec {
    /// Creates a bare plugin reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Creates a plugin reference with local configuration.
    pub fn configured(name: impl Into<String>, config: Value) -> Self {
        let mut map = BTreeMap::new();
        map.insert(name.into(), config);
        Self::Configured(map)
    }

    /// Returns the plugin's name.
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Configured(map) => map.keys().next().map(String::as_str).unwrap_or_default(),
        }
    }

    /// Returns the plugin-local configuration, if any.
    pub fn config(&self) -> Option<&Value> {
        match self {
            Self::Name(_) => None,
            Self::Configured(map) => map.values().next(),
        }
    }
}

/// One unit of work for the external generator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationTarget {
    /// Schema sources for this target.
    pub schema: Vec<SchemaSource>,
    /// Document globs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<String>>,
    /// Plugins to run, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<PluginSpec>>,
    /// Preset name (e.g. `client`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    /// Preset-specific configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_config: Option<Value>,
    /// Plugin configuration shared across this target's plugins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

impl GenerationTarget {
    /// Returns the names of this target's plugins in order.
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins
            .iter()
            .flatten()
            .map(PluginSpec::name)
            .collect()
    }

    /// Finds a plugin by name.
    pub fn plugin(&self, name: &str) -> Option<&PluginSpec> {
        self.plugins.iter().flatten().find(|p| p.name() == name)
    }
}

/// The full plan: output path to target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationPlan {
    /// Whether the generator may overwrite existing output.
    pub overwrite: bool,
    /// Targets keyed by output path.
    pub generates: BTreeMap<String, GenerationTarget>,
}

impl Default for GenerationPlan {
    fn default() -> Self {
        Self {
            overwrite: true,
            generates: BTreeMap::new(),
        }
    }
}

impl GenerationPlan {
    /// Number of targets.
    pub fn len(&self) -> usize {
        self.generates.len()
    }

    /// True when the plan has no targets.
    pub fn is_empty(&self) -> bool {
        self.generates.is_empty()
    }

    /// Looks up a target by output path.
    pub fn get(&self, path: &str) -> Option<&GenerationTarget> {
        self.generates.get(path)
    }

    /// Iterates the output paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.generates.keys().map(String::as_str)
    }

    /// Serializes the plan as `codegen.yml` content.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Serializes the plan as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn schema_source_with_headers_nests_under_location() {
        let mut headers = BTreeMap::new();
        headers.insert("x-api-key".to_string(), "k".to_string());
        let src = SchemaSource::new("https://a.test/graphql", &headers);

        let value = serde_json::to_value(&src).unwrap();
        assert_eq!(
            value,
            json!({"https://a.test/graphql": {"headers": {"x-api-key": "k"}}})
        );
        assert_eq!(src.location(), "https://a.test/graphql");
    }

    #[test]
    fn bare_schema_source_serializes_as_string() {
        let src = SchemaSource::new("schema.graphql", &BTreeMap::new());
        assert_eq!(serde_json::to_value(&src).unwrap(), json!("schema.graphql"));
    }

    #[test]
    fn plugin_spec_accessors() {
        let add = PluginSpec::configured("add", json!({"content": "x"}));
        assert_eq!(add.name(), "add");
        assert_eq!(add.config(), Some(&json!({"content": "x"})));

        let ts = PluginSpec::named("typescript");
        assert_eq!(ts.name(), "typescript");
        assert!(ts.config().is_none());
        assert_eq!(serde_json::to_value(&ts).unwrap(), json!("typescript"));
    }

    #[test]
    fn target_omits_unset_fields() {
        let target = GenerationTarget {
            schema: vec![SchemaSource::Location("s".to_string())],
            ..Default::default()
        };
        let value = serde_json::to_value(&target).unwrap();
        assert_eq!(value, json!({"schema": ["s"]}));
    }

    #[test]
    fn plan_yaml_has_generates_section() {
        let mut plan = GenerationPlan::default();
        plan.generates.insert(
            "out/a.ts".to_string(),
            GenerationTarget {
                schema: vec![SchemaSource::Location("s".to_string())],
                plugins: Some(vec![PluginSpec::named("typescript")]),
                ..Default::default()
            },
        );

        let yaml = plan.to_yaml().unwrap();
        assert!(yaml.contains("overwrite: true"));
        assert!(yaml.contains("generates:"));
        assert!(yaml.contains("out/a.ts:"));

        let back: GenerationPlan = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, plan);
    }
}
