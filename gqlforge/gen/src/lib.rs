//! gqlforge generator library.
//!
//! Compiles named GraphQL endpoints (see `gqlforge-define`) into a
//! graphql-codegen `generates:` plan, and renders the TypeScript that goes
//! with it:
//!
//! - a client preset, a typed graphql-request SDK, and react-query hooks per
//!   endpoint, each under `{baseOutputDir}/{endpoint}/`
//! - an embedded `fetchData` fetcher bound to the endpoint's gateway
//! - a `cache-utils.ts` module grouping operations by inferred service
//! - one shared README for all endpoints
//!
//! ## Modules
//!
//! - [`compiler`] - options to plan
//! - [`fetcher`] - TypeScript fetcher source
//! - [`utils_module`] - cache-utils module source
//! - [`docs`] - README source
//! - [`output`] - plan serialization and atomic writes
//! - [`scaffold`] - `gqlforge setup`
//! - [`template`] - `{{NAME}}` placeholder filling
//! - [`errors`] - error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use gqlforge_define::CodegenOptions;
//! use gqlforge_gen::compiler::compile;
//! use gqlforge_gen::output::{PlanFormat, write_plan};
//!
//! let options = CodegenOptions::from_path(Path::new("gqlforge.yaml")).unwrap();
//! let plan = compile(&options);
//! write_plan(&plan, Path::new("codegen.yml"), PlanFormat::Yaml, false).unwrap();
//! ```

pub mod compiler;
pub mod docs;
pub mod errors;
pub mod fetcher;
pub mod output;
pub mod scaffold;
pub mod template;
pub mod utils_module;

pub use compiler::compile;
pub use errors::GeneratorError;
