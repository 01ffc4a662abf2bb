//! Platform resolution.
//!
//! Decides which platform extension groups apply to a run by looking at the
//! infrastructure status. Each populated status block is turned into a
//! [`PlatformVariant`] once, and the resolver matches on those variants.

mod variant;

use std::fmt;

use serde::Serialize;

use crate::resource::Infrastructure;

pub use variant::{PlatformVariant, platform_variants};

/// Platforms that ship their own extension group (on-prem DNS and VIP management).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
  BareMetal,
  OpenStack,
  Ovirt,
  Kubevirt,
  VSphere,
}

impl PlatformKind {
  /// Every kind, in the order the resolver evaluates them.
  pub const ALL: [PlatformKind; 5] = [
    PlatformKind::BareMetal,
    PlatformKind::OpenStack,
    PlatformKind::Ovirt,
    PlatformKind::Kubevirt,
    PlatformKind::VSphere,
  ];

  /// Returns the lowercase identifier, which is also the output directory prefix
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::BareMetal => "baremetal",
      Self::OpenStack => "openstack",
      Self::Ovirt => "ovirt",
      Self::Kubevirt => "kubevirt",
      Self::VSphere => "vsphere",
    }
  }
}

impl fmt::Display for PlatformKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// The extension group a single populated status block asks for, if any.
///
/// vSphere only qualifies when it has an internal API server address.
pub fn extension_for(variant: &PlatformVariant<'_>) -> Option<PlatformKind> {
  match variant {
    PlatformVariant::BareMetal(_) => Some(PlatformKind::BareMetal),
    PlatformVariant::OpenStack(_) => Some(PlatformKind::OpenStack),
    PlatformVariant::Ovirt(_) => Some(PlatformKind::Ovirt),
    PlatformVariant::Kubevirt(_) => Some(PlatformKind::Kubevirt),
    PlatformVariant::VSphere(status) if !status.api_server_internal_ip.is_empty() => Some(PlatformKind::VSphere),
    PlatformVariant::VSphere(_) | PlatformVariant::Aws(_) | PlatformVariant::Azure(_) | PlatformVariant::Gcp(_) => None,
  }
}

/// The extension groups that apply to `infra`, in evaluation order.
///
/// Zero matches is a valid outcome. Several matches are not expected in a real
/// deployment but are returned as-is rather than rejected.
pub fn resolve_platforms(infra: &Infrastructure) -> Vec<PlatformKind> {
  let Some(status) = infra.status.platform_status.as_ref() else {
    return Vec::new();
  };
  platform_variants(status).iter().filter_map(extension_for).collect()
}
