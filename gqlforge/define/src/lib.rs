//! gqlforge definition library
//!
//! Types shared by the gqlforge generator and runtime crates.
//!
//! ## Core Types
//!
//! - [`EndpointConfig`] - One GraphQL endpoint (schema, documents, gateway, headers)
//! - [`CodegenOptions`] - Named endpoints plus global settings, loadable from YAML/JSON
//! - [`GenerationPlan`] - Output path to [`GenerationTarget`], the generator's input
//! - [`SchemaSource`] / [`PluginSpec`] - Pieces of a target
//! - [`ServiceGroups`] - Operation names grouped by inferred service
//!
//! The [`naming`] module holds the inference rules behind [`ServiceGroups::infer`].
//!
//! ## Examples
//!
//! ```
//! use gqlforge_define::{CodegenOptions, EndpointConfig};
//!
//! let options = CodegenOptions::new()
//!     .with_app_name("bookings")
//!     .with_endpoint(
//!         "main",
//!         EndpointConfig::new("https://api.example.com/graphql", "graphql/main/**/*.graphql"),
//!     );
//!
//! assert_eq!(options.endpoints.len(), 1);
//! ```

pub mod endpoint;
pub mod error;
pub mod groups;
pub mod naming;
pub mod options;
pub mod plan;
pub mod prelude;

pub use endpoint::EndpointConfig;
pub use error::ConfigError;
pub use groups::ServiceGroups;
pub use options::CodegenOptions;
pub use plan::{GenerationPlan, GenerationTarget, PluginSpec, RemoteSchemaOptions, SchemaSource};
