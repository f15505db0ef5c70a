//! End-to-end tests for plan compilation.
//!
//! These tests verify the target layout, uniqueness of output paths, the
//! shared documentation target, and that a scaffolded project compiles.

use std::collections::BTreeSet;

use gqlforge_define::{CodegenOptions, EndpointConfig, PluginSpec, SchemaSource, ServiceGroups};
use gqlforge_gen::compiler::{CACHE_UTILS_PLUGIN, DOCS_OUTPUT_PATH, DOCS_PLUGIN, compile};
use gqlforge_gen::docs::render_readme;
use gqlforge_gen::output::{PlanFormat, render_plan};
use gqlforge_gen::scaffold::{SetupOptions, setup};
use gqlforge_gen::utils_module::{RUNTIME_MODULE, render_cache_utils_module};
use serde_json::json;
use tempfile::TempDir;

fn endpoint(name: &str) -> EndpointConfig {
    EndpointConfig::new(
        format!("https://{name}.example.com/graphql"),
        format!("graphql/{name}/**/*.graphql"),
    )
}

fn options_with(names: &[&str]) -> CodegenOptions {
    names
        .iter()
        .fold(CodegenOptions::new().with_base_output_dir("src/graphql"), |opts, name| {
            opts.with_endpoint(*name, endpoint(name))
        })
}

// === target counts and keys ===

#[test]
fn four_targets_per_endpoint_plus_docs() {
    for names in [&["main"][..], &["main", "payments"], &["a", "b", "c", "d"]] {
        let plan = compile(&options_with(names));
        assert_eq!(plan.len(), 4 * names.len() + 1, "endpoints: {names:?}");
    }
}

#[test]
fn empty_endpoints_yield_empty_plan() {
    let plan = compile(&CodegenOptions::new());
    assert!(plan.is_empty());
    assert!(plan.get(DOCS_OUTPUT_PATH).is_none());
    assert!(plan.overwrite);
}

#[test]
fn output_paths_never_collide_across_endpoints() {
    let names = ["main", "mainline", "main2", "payments"];
    let plan = compile(&options_with(&names));

    let paths: BTreeSet<&str> = plan.paths().collect();
    assert_eq!(paths.len(), plan.len());

    for name in names {
        let own: Vec<&str> = paths
            .iter()
            .copied()
            .filter(|p| p.starts_with(&format!("src/graphql/{name}/")))
            .collect();
        assert_eq!(own.len(), 4, "{name}: {own:?}");
    }
}

#[test]
fn keys_follow_endpoint_layout() {
    let plan = compile(&options_with(&["main"]));
    let paths: Vec<&str> = plan.paths().collect();

    assert_eq!(
        paths,
        vec![
            "docs/graphql/README.md",
            "src/graphql/main/",
            "src/graphql/main/cache-utils.ts",
            "src/graphql/main/plugins/graphql-request.ts",
            "src/graphql/main/plugins/react-query.ts",
        ]
    );
}

#[test]
fn trailing_slash_base_has_no_double_slash() {
    let options = options_with(&["main"]).with_base_output_dir("out/");
    let plan = compile(&options);

    assert!(plan.get("out/main/").is_some());
    assert!(plan.paths().all(|p| !p.contains("//")));
}

// === target contents ===

#[test]
fn client_preset_target() {
    let plan = compile(&options_with(&["main"]));
    let target = plan.get("src/graphql/main/").unwrap();

    assert_eq!(target.preset.as_deref(), Some("client"));
    assert_eq!(target.preset_config, Some(json!({"fragmentMasking": false})));
    assert_eq!(
        target.documents,
        Some(vec!["graphql/main/**/*.graphql".to_string()])
    );
    assert_eq!(
        target.schema,
        vec![SchemaSource::Location("https://main.example.com/graphql".to_string())]
    );
    assert!(target.plugins.is_none());
}

#[test]
fn graphql_request_target() {
    let plan = compile(&options_with(&["main"]));
    let target = plan.get("src/graphql/main/plugins/graphql-request.ts").unwrap();

    assert_eq!(
        target.plugin_names(),
        vec!["typescript", "typescript-operations", "typescript-graphql-request"]
    );
    assert_eq!(target.config, Some(json!({"rawRequest": false})));
}

#[test]
fn react_query_target_embeds_fetcher() {
    let options = options_with(&["main"]).with_react_query_version(4);
    let plan = compile(&options);
    let target = plan.get("src/graphql/main/plugins/react-query.ts").unwrap();

    assert_eq!(
        target.plugin_names(),
        vec!["add", "typescript", "typescript-operations", "typescript-react-query"]
    );
    assert_eq!(
        target.config,
        Some(json!({
            "fetcher": "fetchData",
            "reactQueryVersion": 4,
            "exposeQueryKeys": true,
            "exposeFetcher": true,
        }))
    );

    let content = target
        .plugin("add")
        .and_then(PluginSpec::config)
        .and_then(|c| c["content"].as_str())
        .unwrap();
    assert!(content.contains(r#"const GATEWAY_ENDPOINT: string = "https://main.example.com/graphql";"#));
}

#[test]
fn cache_utils_target_names_endpoint_and_app() {
    let options = options_with(&["main"]).with_app_name("shop");
    let plan = compile(&options);
    let target = plan.get("src/graphql/main/cache-utils.ts").unwrap();

    assert_eq!(
        target.plugin(CACHE_UTILS_PLUGIN).and_then(PluginSpec::config),
        Some(&json!({"endpoint": "main", "appName": "shop"}))
    );
}

#[test]
fn headers_reach_schema_and_fetcher() {
    let options = CodegenOptions::new().with_endpoint(
        "main",
        endpoint("main").with_header("x-api-key", "secret"),
    );
    let plan = compile(&options);

    let preset = plan.get("src/graphql/main/").unwrap();
    let yaml = serde_yaml::to_string(&preset.schema).unwrap();
    assert!(yaml.contains("x-api-key: secret"), "{yaml}");

    let react_query = plan.get("src/graphql/main/plugins/react-query.ts").unwrap();
    let content = react_query.plugin("add").and_then(PluginSpec::config).unwrap();
    assert!(content["content"]
        .as_str()
        .unwrap()
        .contains(r#"{"x-api-key":"secret"}"#));
}

#[test]
fn docs_target_aggregates_all_endpoints() {
    let plan = compile(&options_with(&["payments", "main"]).with_app_name("shop"));
    let docs = plan.get(DOCS_OUTPUT_PATH).unwrap();

    assert_eq!(docs.schema.len(), 2);
    assert_eq!(docs.documents.as_ref().map(Vec::len), Some(2));
    assert_eq!(
        docs.plugin(DOCS_PLUGIN).and_then(PluginSpec::config),
        Some(&json!({"appName": "shop", "endpoints": ["main", "payments"]}))
    );
}

// === external plugin contract ===

#[test]
fn cache_utils_plugin_config_reproduces_utils_output() {
    let options = options_with(&["main", "payments"]).with_app_name("shop");
    let plan = compile(&options);

    for name in ["main", "payments"] {
        let target = plan.get(&format!("src/graphql/{name}/cache-utils.ts")).unwrap();
        let config = target.plugin(CACHE_UTILS_PLUGIN).and_then(PluginSpec::config).unwrap();

        let endpoint = config["endpoint"].as_str().unwrap();
        assert!(options.endpoints.contains_key(endpoint));
        assert_eq!(config["appName"], "shop");

        let source = render_cache_utils_module(endpoint, &["GetUser"]);
        assert!(source.contains(&format!("for the \"{name}\" endpoint")));
        assert!(source.contains(&format!("from \"{RUNTIME_MODULE}\";")));
    }
}

#[test]
fn docs_plugin_config_reproduces_docs_output() {
    let options = options_with(&["payments", "main"]).with_app_name("shop");
    let plan = compile(&options);
    let config = plan
        .get(DOCS_OUTPUT_PATH)
        .and_then(|t| t.plugin(DOCS_PLUGIN))
        .and_then(PluginSpec::config)
        .unwrap();

    let endpoints: Vec<&str> = config["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e.as_str().unwrap())
        .collect();
    assert!(endpoints.iter().all(|e| options.endpoints.contains_key(*e)));

    let readme = render_readme(
        config["appName"].as_str().unwrap(),
        &options.endpoints,
        &ServiceGroups::infer(["GetUser"]),
    );
    assert!(readme.starts_with("# shop GraphQL API\n"));
}

// === determinism ===

#[test]
fn compilation_is_deterministic() {
    let options = options_with(&["main", "payments"]);
    let first = render_plan(&compile(&options), PlanFormat::Yaml).unwrap();
    let second = render_plan(&compile(&options), PlanFormat::Yaml).unwrap();
    assert_eq!(first, second);
}

#[test]
fn yaml_plan_round_trips_through_codegen_shape() {
    let plan = compile(&options_with(&["main"]));
    let yaml = render_plan(&plan, PlanFormat::Yaml).unwrap();
    let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

    assert_eq!(value["overwrite"], serde_yaml::Value::Bool(true));
    assert_eq!(
        value["generates"]["src/graphql/main/"]["preset"],
        serde_yaml::Value::String("client".to_string())
    );
}

// === scaffold to plan ===

#[test]
fn scaffolded_project_compiles() {
    let dir = TempDir::new().unwrap();
    let options = SetupOptions {
        app_name: "shop".to_string(),
        api_key: Some("secret".to_string()),
        target: dir.path().to_path_buf(),
        ..SetupOptions::new("https://api.example.com/graphql")
    };
    setup(&options).unwrap();

    let loaded = CodegenOptions::from_path(&dir.path().join("gqlforge.yaml")).unwrap();
    assert_eq!(loaded.app_name, "shop");
    assert_eq!(loaded.react_query_version, 5);

    let cfg = &loaded.endpoints["shop"];
    assert_eq!(cfg.gateway_endpoint, "https://api.example.com/graphql");
    assert_eq!(cfg.documents_path, "graphql/shop/**/*.graphql");
    assert_eq!(cfg.headers.get("x-api-key").map(String::as_str), Some("secret"));

    let plan = compile(&loaded);
    assert_eq!(plan.len(), 5);
    assert!(plan.get("src/graphql/shop/cache-utils.ts").is_some());
}
