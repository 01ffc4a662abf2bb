//! The unified controller configuration.
//!
//! [`build_controller_config`] merges the decoded records, the CA payloads, and
//! the image table into one [`ControllerConfigSpec`], which is the only data the
//! manifest templates see.

mod build;
mod bytes;
mod types;

pub use build::{
  CloudConfigError, SpecError, SpecInputs, build_controller_config, cloud_config_from_map, load_cloud_provider_config,
};
pub use types::{ControllerConfigSpec, ObjectReference};
