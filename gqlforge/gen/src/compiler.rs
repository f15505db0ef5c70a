//! Endpoint configuration compiler.
//!
//! Turns [`CodegenOptions`] into a [`GenerationPlan`]: four targets per
//! endpoint, namespaced under `{base}/{name}/`, plus one documentation target
//! shared by all endpoints.
//!
//! ## Output Structure
//!
//! For an endpoint named `main` with the default base directory:
//!
//! ```text
//! src/graphql/main/                            # client preset
//! src/graphql/main/plugins/graphql-request.ts  # typed SDK
//! src/graphql/main/plugins/react-query.ts      # hooks + embedded fetcher
//! src/graphql/main/cache-utils.ts              # cache utilities module
//! docs/graphql/README.md                       # shared, one per plan
//! ```
//!
//! Compilation performs no validation and no I/O. URLs are not contacted and
//! globs are not expanded; the output depends only on the options.
//!
//! ## External Plugins
//!
//! The first three targets use stock graphql-codegen plugins. The last two
//! name plugins this workspace does not ship; they must be installed as npm
//! packages next to graphql-codegen for the plan to run:
//!
//! - [`CACHE_UTILS_PLUGIN`] receives `{endpoint, appName}` as its config and
//!   the endpoint's operation documents. It must emit what
//!   `gqlforge utils --endpoint <endpoint> <operations...>` prints, i.e.
//!   [`render_cache_utils_module`](crate::utils_module::render_cache_utils_module)
//!   over the document's operation names.
//! - [`DOCS_PLUGIN`] receives `{appName, endpoints}` and every endpoint's
//!   documents. It must emit what `gqlforge docs` prints, i.e.
//!   [`render_readme`](crate::docs::render_readme).
//!
//! Without those packages, run the `utils` and `docs` subcommands and drop
//! the two targets from the written plan.

use gqlforge_define::{
    CodegenOptions, EndpointConfig, GenerationPlan, GenerationTarget, PluginSpec, SchemaSource,
};
use serde_json::json;
use tracing::{debug, instrument};

use crate::fetcher::{FETCHER_NAME, render_fetcher};

/// Fixed output path of the shared documentation target.
pub const DOCS_OUTPUT_PATH: &str = "docs/graphql/README.md";

/// External plugin package that renders `cache-utils.ts` for one endpoint.
pub const CACHE_UTILS_PLUGIN: &str = "gqlforge-cache-utils";

/// External plugin package that renders the shared README.
pub const DOCS_PLUGIN: &str = "gqlforge-docs";

/// Compiles options into a generation plan.
///
/// Empty `endpoints` yields an empty plan with no documentation target.
///
/// ## Examples
///
/// ```
/// use gqlforge_define::{CodegenOptions, EndpointConfig};
/// use gqlforge_gen::compiler::compile;
///
/// let options = CodegenOptions::new()
///     .with_base_output_dir("src/graphql")
///     .with_endpoint("main", EndpointConfig::new("https://api.example.com/graphql", "graphql/main/**/*.graphql"));
///
/// let plan = compile(&options);
/// assert_eq!(plan.len(), 5);
/// assert!(plan.get("src/graphql/main/plugins/react-query.ts").is_some());
/// ```
#[instrument(skip(options), fields(endpoints = options.endpoints.len()))]
pub fn compile(options: &CodegenOptions) -> GenerationPlan {
    let mut plan = GenerationPlan::default();
    let prefix = output_prefix(&options.base_output_dir);

    for (name, cfg) in &options.endpoints {
        let root = format!("{prefix}{name}");
        let schema = vec![schema_source(cfg)];
        let documents = vec![cfg.documents_path.clone()];

        plan.generates.insert(
            format!("{root}/"),
            GenerationTarget {
                schema: schema.clone(),
                documents: Some(documents.clone()),
                preset: Some("client".to_string()),
                preset_config: Some(json!({ "fragmentMasking": false })),
                ..Default::default()
            },
        );

        plan.generates.insert(
            format!("{root}/plugins/graphql-request.ts"),
            GenerationTarget {
                schema: schema.clone(),
                documents: Some(documents.clone()),
                plugins: Some(vec![
                    PluginSpec::named("typescript"),
                    PluginSpec::named("typescript-operations"),
                    PluginSpec::named("typescript-graphql-request"),
                ]),
                config: Some(json!({ "rawRequest": false })),
                ..Default::default()
            },
        );

        plan.generates.insert(
            format!("{root}/plugins/react-query.ts"),
            GenerationTarget {
                schema: schema.clone(),
                documents: Some(documents.clone()),
                plugins: Some(vec![
                    PluginSpec::configured("add", json!({ "content": render_fetcher(cfg) })),
                    PluginSpec::named("typescript"),
                    PluginSpec::named("typescript-operations"),
                    PluginSpec::named("typescript-react-query"),
                ]),
                config: Some(json!({
                    "fetcher": FETCHER_NAME,
                    "reactQueryVersion": options.react_query_version,
                    "exposeQueryKeys": true,
                    "exposeFetcher": true,
                })),
                ..Default::default()
            },
        );

        plan.generates.insert(
            format!("{root}/cache-utils.ts"),
            GenerationTarget {
                schema,
                documents: Some(documents),
                plugins: Some(vec![PluginSpec::configured(
                    CACHE_UTILS_PLUGIN,
                    json!({ "endpoint": name, "appName": options.app_name }),
                )]),
                ..Default::default()
            },
        );

        debug!(endpoint = %name, root = %root, "compiled endpoint targets");
    }

    if !options.endpoints.is_empty() {
        plan.generates
            .insert(DOCS_OUTPUT_PATH.to_string(), docs_target(options));
    }

    plan
}

/// The base directory with trailing slashes removed and one appended.
///
/// An empty (or all-slash) base yields no prefix, so keys stay relative.
fn output_prefix(base: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        String::new()
    } else {
        format!("{base}/")
    }
}

fn schema_source(cfg: &EndpointConfig) -> SchemaSource {
    SchemaSource::new(&cfg.schema, &cfg.headers)
}

fn docs_target(options: &CodegenOptions) -> GenerationTarget {
    let names: Vec<&str> = options.endpoints.keys().map(String::as_str).collect();

    GenerationTarget {
        schema: options.endpoints.values().map(schema_source).collect(),
        documents: Some(
            options
                .endpoints
                .values()
                .map(|cfg| cfg.documents_path.clone())
                .collect(),
        ),
        plugins: Some(vec![PluginSpec::configured(
            DOCS_PLUGIN,
            json!({ "appName": options.app_name, "endpoints": names }),
        )]),
        ..Default::default()
    }
}
