//! Manifest planning.
//!
//! A plan is the ordered list of files a bootstrap run writes: a fixed baseline
//! followed by one group per resolved platform. Planning is pure; nothing is
//! rendered or written here.

mod plan;
mod types;

pub use plan::{baseline_manifests, plan_manifests, platform_manifests};
pub use types::*;
