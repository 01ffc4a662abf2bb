//! mcb-lib: Core types and logic for the machine-config bootstrap renderer
//!
//! This crate turns the install-time configuration artifacts of a cluster into
//! the static manifest tree a bootstrap agent applies before any control plane
//! exists:
//! - `artifact`: reads the mandatory and optional input files
//! - `resource`: typed configuration records and the scheme-based decoder
//! - `spec`: merges decoded records into one `ControllerConfigSpec`
//! - `platform`: picks the platform extension groups from the infrastructure status
//! - `manifest`: plans which manifests are emitted and where
//! - `render` / `execute`: renders templates and writes the output tree
//! - `bootstrap`: runs the whole pipeline as a single call

pub mod artifact;
pub mod bootstrap;
pub mod consts;
pub mod discover;
pub mod execute;
pub mod images;
pub mod manifest;
pub mod observe;
pub mod platform;
pub mod render;
pub mod resource;
pub mod spec;
pub mod util;
