//! GraphQL endpoint definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One GraphQL endpoint's identity.
///
/// Field names serialize in camelCase (`documentsPath`, `gatewayEndpoint`) so
/// the same file can be shared with JavaScript tooling.
///
/// ## Examples
///
/// ```
/// use gqlforge_define::EndpointConfig;
///
/// let cfg = EndpointConfig::new(
///     "https://api.example.com/graphql",
///     "src/graphql/main/**/*.graphql",
/// )
/// .with_header("x-api-key", "secret");
///
/// assert_eq!(cfg.gateway_endpoint, "https://api.example.com/graphql");
/// assert_eq!(cfg.headers.get("x-api-key").map(String::as_str), Some("secret"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointConfig {
    /// Introspection source (URL or local SDL/JSON path).
    pub schema: String,
    /// Glob over the document files for this endpoint.
    pub documents_path: String,
    /// Runtime URL the generated fetcher posts to.
    ///
    /// Only needs to be reachable when the generated code runs, not when the
    /// plan is compiled.
    pub gateway_endpoint: String,
    /// Static headers sent on introspection and baked into the fetcher.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl EndpointConfig {
    /// Creates an endpoint whose schema is introspected from its own gateway.
    pub fn new(gateway_endpoint: impl Into<String>, documents_path: impl Into<String>) -> Self {
        let gateway_endpoint = gateway_endpoint.into();
        Self {
            schema: gateway_endpoint.clone(),
            documents_path: documents_path.into(),
            gateway_endpoint,
            headers: BTreeMap::new(),
        }
    }

    /// Overrides the introspection source.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Adds a static header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_gateway_as_schema() {
        let cfg = EndpointConfig::new("https://a.test/graphql", "docs/**/*.graphql");
        assert_eq!(cfg.schema, "https://a.test/graphql");
        assert!(cfg.headers.is_empty());
    }

    #[test]
    fn with_schema_overrides_source() {
        let cfg = EndpointConfig::new("https://a.test/graphql", "docs/*.graphql")
            .with_schema("schema.graphql");
        assert_eq!(cfg.schema, "schema.graphql");
        assert_eq!(cfg.gateway_endpoint, "https://a.test/graphql");
    }

    #[test]
    fn serializes_camel_case() {
        let cfg = EndpointConfig::new("https://a.test/graphql", "docs/*.graphql");
        let json = serde_json::to_value(&cfg).unwrap();
        assert!(json.get("documentsPath").is_some());
        assert!(json.get("gatewayEndpoint").is_some());
    }

    #[test]
    fn headers_default_when_missing() {
        let cfg: EndpointConfig = serde_json::from_str(
            r#"{"schema":"s","documentsPath":"d","gatewayEndpoint":"g"}"#,
        )
        .unwrap();
        assert!(cfg.headers.is_empty());
    }
}
