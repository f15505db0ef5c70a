//! Request execution with tracing instrumentation.
//!
//! This module provides the [`GraphQLFetcher`] struct for posting GraphQL
//! documents to an endpoint's gateway.

use std::collections::BTreeMap;

use gqlforge_define::EndpointConfig;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{Span, debug, instrument};
use url::Url;

use super::options::FetchOptions;
use crate::error::FetchError;

/// Response envelope. `errors` stays loosely typed: only a non-empty array
/// fails the request, anything else is ignored in favour of `data`.
#[derive(Debug, Deserialize)]
struct GraphQLResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Value>,
}

impl GraphQLResponse {
    /// Message of the first error, if `errors` is a non-empty array.
    ///
    /// A string message is returned as-is. Any other value is returned as its
    /// JSON text, and a missing message as `undefined`.
    fn first_error_message(&self) -> Option<String> {
        let Some(Value::Array(errors)) = &self.errors else {
            return None;
        };
        let first = errors.first()?;
        Some(match first.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => "undefined".to_string(),
        })
    }
}

/// Posts GraphQL documents to a gateway.
///
/// Every request is a `POST` with JSON body `{query, variables}`. Headers are
/// applied in order, later ones replacing earlier ones of the same name:
///
/// 1. `Content-Type: application/json`
/// 2. the endpoint's static headers
/// 3. per-request headers from [`FetchOptions`]
///
/// ## Examples
///
/// ```rust,ignore
/// use gqlforge::fetcher::GraphQLFetcher;
/// use serde_json::json;
///
/// let fetcher = GraphQLFetcher::new("https://api.example.com/graphql")?
///     .with_header("x-api-key", "secret");
///
/// let data: serde_json::Value = fetcher
///     .fetch_data("query GetUser($id: ID!) { user(id: $id) { name } }", Some(json!({"id": 1})), None)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct GraphQLFetcher {
    client: reqwest::Client,
    gateway: Url,
    headers: BTreeMap<String, String>,
}

impl GraphQLFetcher {
    /// Creates a fetcher for `gateway_endpoint` with no static headers.
    ///
    /// ## Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be
    /// constructed.
    pub fn new(gateway_endpoint: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            client,
            gateway: parse_url(gateway_endpoint)?,
            headers: BTreeMap::new(),
        })
    }

    /// Creates a fetcher from an endpoint definition, carrying its headers.
    pub fn from_endpoint(endpoint: &EndpointConfig) -> Result<Self, FetchError> {
        let mut fetcher = Self::new(&endpoint.gateway_endpoint)?;
        fetcher.headers = endpoint.headers.clone();
        Ok(fetcher)
    }

    /// Adds a static header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// The configured gateway.
    pub fn gateway(&self) -> &Url {
        &self.gateway
    }

    /// Executes a GraphQL document and returns its `data`.
    ///
    /// ## Errors
    ///
    /// - [`FetchError::GraphQL`] with the first message when the response has
    ///   a non-empty `errors` array
    /// - [`FetchError::Request`] on network failure
    /// - [`FetchError::Decode`] when the body is not JSON or `data` does not
    ///   decode into `T`
    /// - [`FetchError::InvalidUrl`] / [`FetchError::InvalidHeader`] for bad
    ///   overrides
    #[instrument(
        name = "graphql_fetch",
        skip(self, query, variables, options),
        fields(
            http.method = "POST",
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn fetch_data<T>(
        &self,
        query: &str,
        variables: Option<Value>,
        options: Option<FetchOptions>,
    ) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        let options = options.unwrap_or_default();

        let url = match options.endpoint() {
            Some(endpoint) => parse_url(endpoint)?,
            None => self.gateway.clone(),
        };
        Span::current().record("http.url", url.as_str());

        let headers = self.build_headers(options.headers())?;
        let mut body = json!({ "query": query });
        if let Some(variables) = variables {
            body["variables"] = variables;
        }

        let response = self
            .client
            .post(url)
            .headers(headers)
            .body(body.to_string())
            .send()
            .await?;

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        let bytes = response.bytes().await?;
        let payload: GraphQLResponse = serde_json::from_slice(&bytes)?;

        if let Some(message) = payload.first_error_message() {
            Span::current().record("otel.status_code", "ERROR");
            debug!(%message, "GraphQL response carried errors");
            return Err(FetchError::GraphQL(message));
        }

        Ok(serde_json::from_value(payload.data.unwrap_or(Value::Null))?)
    }

    fn build_headers(&self, custom: &BTreeMap<String, String>) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in self.headers.iter().chain(custom.iter()) {
            let header_name =
                HeaderName::try_from(name.as_str()).map_err(|e| FetchError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value =
                HeaderValue::try_from(value.as_str()).map_err(|e| FetchError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

fn parse_url(url: &str) -> Result<Url, FetchError> {
    Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}
