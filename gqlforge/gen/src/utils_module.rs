//! Cache-utils module rendering.
//!
//! Produces the `cache-utils.ts` source for one endpoint: the operation list
//! fed to `createQueryKeys`, the inferred service grouping, and the factory
//! and hook built from them.
//!
//! The generated file imports its helpers from the [`RUNTIME_MODULE`] npm
//! package, the TypeScript counterpart of the `gqlforge` crate's `cache`
//! module. That package is not part of this workspace. It must export
//! `createQueryKeys(operations)`, `createUtilsFactory({queryKeys, groups})`
//! and `createUtilsHook(factory)` with the same semantics as the crate's
//! `create_query_keys`, `create_utils_factory` and `UtilsHook`.

use std::fmt::Write;

use gqlforge_define::ServiceGroups;
use serde_json::Value;
use tracing::debug;

/// npm package the generated file imports the cache helpers from.
pub const RUNTIME_MODULE: &str = "gqlforge/cache";

/// Renders a cache-utils module with groups inferred from `operations`.
///
/// ## Examples
///
/// ```
/// use gqlforge_gen::utils_module::render_cache_utils_module;
///
/// let source = render_cache_utils_module("main", &["GetUser", "UpdateUser"]);
/// assert!(source.contains(r#"  users: ["GetUser", "UpdateUser"],"#));
/// ```
pub fn render_cache_utils_module<S: AsRef<str>>(endpoint: &str, operations: &[S]) -> String {
    let groups = ServiceGroups::infer(operations);
    render_with_groups(endpoint, &groups)
}

/// Renders a cache-utils module with an explicit grouping.
///
/// The operation list is the grouping's operations in group order, so each
/// grouped operation has a query key.
pub fn render_with_groups(endpoint: &str, groups: &ServiceGroups) -> String {
    let mut out = String::new();

    // `write!` into a String cannot fail.
    let _ = writeln!(
        out,
        "// Cache utilities for the {} endpoint. Generated by gqlforge; do not edit.",
        quote(endpoint)
    );
    let _ = writeln!(
        out,
        "import {{ createQueryKeys, createUtilsFactory, createUtilsHook }} from {};",
        quote(RUNTIME_MODULE)
    );
    out.push('\n');

    out.push_str("export const queryKeys = createQueryKeys([\n");
    for (_, operations) in groups.iter() {
        for operation in operations {
            let _ = writeln!(out, "  {},", quote(operation));
        }
    }
    out.push_str("] as const);\n\n");

    out.push_str("export const groups = {\n");
    for (service, operations) in groups.iter() {
        let list = operations
            .iter()
            .map(|op| quote(op))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "  {}: [{list}],", property_name(service));
    }
    out.push_str("} as const;\n\n");

    out.push_str("export const createUtils = createUtilsFactory({ queryKeys, groups });\n\n");
    out.push_str("export const useUtils = createUtilsHook(createUtils);\n");

    debug!(
        endpoint,
        services = groups.services().count(),
        operations = groups.operation_count(),
        "rendered cache utils module"
    );
    out
}

/// A TypeScript string literal.
fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// An object key, bare when it is a plain identifier.
fn property_name(name: &str) -> String {
    let mut chars = name.chars();
    let is_identifier = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if is_identifier {
        name.to_string()
    } else {
        quote(name)
    }
}
