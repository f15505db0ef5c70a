//! README rendering for generated GraphQL clients.

use std::collections::BTreeMap;
use std::fmt::Write;

use gqlforge_define::naming::{infer_short_name, to_camel_case};
use gqlforge_define::{EndpointConfig, ServiceGroups};

/// Renders the shared README.
///
/// Lists each endpoint with its gateway and documents glob, then each service
/// with its operations. Every operation row shows the facade path
/// (`utils.<service>.<operation>`) and the short name used in prose.
///
/// ## Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use gqlforge_define::ServiceGroups;
/// use gqlforge_gen::docs::render_readme;
///
/// let readme = render_readme("shop", &BTreeMap::new(), &ServiceGroups::infer(["GetUserProfile"]));
/// assert!(readme.starts_with("# shop GraphQL API\n"));
/// assert!(readme.contains("| `GetUserProfile` | `utils.users.getUserProfile` | `getProfile` |"));
/// ```
pub fn render_readme(
    app_name: &str,
    endpoints: &BTreeMap<String, EndpointConfig>,
    groups: &ServiceGroups,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# {app_name} GraphQL API\n");
    out.push_str("Generated by gqlforge. Regenerate instead of editing by hand.\n");

    if !endpoints.is_empty() {
        out.push_str("\n## Endpoints\n\n");
        out.push_str("| Name | Gateway | Documents |\n");
        out.push_str("|------|---------|-----------|\n");
        for (name, cfg) in endpoints {
            let _ = writeln!(
                out,
                "| `{name}` | {} | `{}` |",
                cfg.gateway_endpoint, cfg.documents_path
            );
        }
    }

    if groups.is_empty() {
        return out;
    }

    out.push_str("\n## Services\n");
    for (service, operations) in groups.iter() {
        let _ = writeln!(out, "\n### {service}\n");
        out.push_str("| Operation | Cache utils | Short name |\n");
        out.push_str("|-----------|-------------|------------|\n");
        for operation in operations {
            let _ = writeln!(
                out,
                "| `{operation}` | `utils.{service}.{}` | `{}` |",
                to_camel_case(operation),
                infer_short_name(operation)
            );
        }
    }

    out
}
