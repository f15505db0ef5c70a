//! TypeScript fetcher rendering.
//!
//! Each endpoint's react-query target embeds a `fetchData` function through
//! the `add` plugin. The function is rendered from `templates/fetcher.ts`
//! with the endpoint's gateway and static headers baked in as JSON literals,
//! which are also valid TypeScript expressions.

use std::collections::BTreeMap;

use gqlforge_define::EndpointConfig;
use serde_json::{Map, Value};

use crate::template::substitute;

/// The exported function name generated hooks call.
pub const FETCHER_NAME: &str = "fetchData";

const FETCHER_TEMPLATE: &str = include_str!("../templates/fetcher.ts");

/// Renders the fetcher source for one endpoint.
///
/// The generated `fetchData(query, variables?, options?)` treats `options`
/// as a `{customHeaders, endpoint}` wrapper when either key is present and
/// as a flat header map otherwise. Headers are layered as
/// `Content-Type: application/json`, then the endpoint's static headers, then
/// the caller's. A non-empty `errors` array throws the first message as a
/// bare string; otherwise the promise resolves with `data`.
///
/// ## Examples
///
/// ```
/// use gqlforge_define::EndpointConfig;
/// use gqlforge_gen::fetcher::render_fetcher;
///
/// let cfg = EndpointConfig::new("https://api.example.com/graphql", "src/**/*.graphql");
/// let source = render_fetcher(&cfg);
/// assert!(source.contains(r#"const GATEWAY_ENDPOINT: string = "https://api.example.com/graphql";"#));
/// ```
pub fn render_fetcher(cfg: &EndpointConfig) -> String {
    let gateway = Value::String(cfg.gateway_endpoint.clone());
    let headers: Map<String, Value> = cfg
        .headers
        .iter()
        .map(|(name, value)| (name.clone(), Value::String(value.clone())))
        .collect();

    let values = BTreeMap::from([
        ("GATEWAY_ENDPOINT", gateway.to_string()),
        ("STATIC_HEADERS", Value::Object(headers).to_string()),
    ]);
    substitute(FETCHER_TEMPLATE, &values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bakes_in_gateway_and_headers() {
        let cfg = EndpointConfig::new("https://a.test/graphql", "*.graphql")
            .with_header("x-api-key", "secret");
        let source = render_fetcher(&cfg);

        assert!(source.contains(r#"const GATEWAY_ENDPOINT: string = "https://a.test/graphql";"#));
        assert!(source.contains(r#"const STATIC_HEADERS: HeaderMap = {"x-api-key":"secret"};"#));
        assert!(!source.contains("{{"));
    }

    #[test]
    fn gateway_containing_placeholder_is_not_resubstituted() {
        let cfg = EndpointConfig::new("https://a.test/{{STATIC_HEADERS}}", "*.graphql")
            .with_header("x-api-key", "secret");
        let source = render_fetcher(&cfg);

        assert!(source.contains(r#"const GATEWAY_ENDPOINT: string = "https://a.test/{{STATIC_HEADERS}}";"#));
        assert!(source.contains(r#"const STATIC_HEADERS: HeaderMap = {"x-api-key":"secret"};"#));
    }

    #[test]
    fn empty_headers_render_as_empty_object() {
        let cfg = EndpointConfig::new("https://a.test/graphql", "*.graphql");
        assert!(render_fetcher(&cfg).contains("const STATIC_HEADERS: HeaderMap = {};"));
    }

    #[test]
    fn quotes_are_escaped() {
        let cfg = EndpointConfig::new("https://a.test/graphql", "*.graphql")
            .with_header("x-note", r#"say "hi""#);
        assert!(render_fetcher(&cfg).contains(r#"{"x-note":"say \"hi\""}"#));
    }

    #[test]
    fn follows_fetch_contract() {
        let source = render_fetcher(&EndpointConfig::new("https://a.test/graphql", "*.graphql"));

        assert!(source.contains(&format!("export const {FETCHER_NAME} =")));
        assert!(source.contains(r#""customHeaders" in options || "endpoint" in options"#));
        assert!(source.contains(r#"method: "POST""#));
        assert!(source.contains("body: JSON.stringify({ query, variables })"));
        assert!(source.contains("throw json.errors[0].message;"));
        assert!(source.contains("return json.data as TData;"));

        // Static headers spread after the content type, custom headers last.
        let content_type = source.find(r#""Content-Type": "application/json""#).unwrap();
        let statics = source.find("...STATIC_HEADERS").unwrap();
        let custom = source.find("...customHeaders").unwrap();
        assert!(content_type < statics && statics < custom);
    }
}
