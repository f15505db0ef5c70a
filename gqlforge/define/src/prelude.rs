//! Convenient re-exports for working with gqlforge definitions.
//!
//! ```
//! use gqlforge_define::prelude::*;
//!
//! let groups = ServiceGroups::infer(["GetUser"]);
//! assert_eq!(infer_service_name("GetUser"), "users");
//! assert_eq!(groups.service_of("GetUser"), Some("users"));
//! ```

pub use crate::endpoint::EndpointConfig;
pub use crate::error::ConfigError;
pub use crate::groups::ServiceGroups;
pub use crate::naming::{GENERAL_SERVICE, infer_service_name, infer_short_name, to_camel_case};
pub use crate::options::CodegenOptions;
pub use crate::plan::{GenerationPlan, GenerationTarget, PluginSpec, SchemaSource};
