//! Side channel for progress reporting.
//!
//! The pipeline reports what it does through an [`Observer`] instead of logging
//! directly. The pipeline's output never depends on which observer is installed.

use std::fmt;
use std::path::Path;

use tracing::{debug, info};

use crate::platform::PlatformKind;

/// Something noteworthy that happened during a bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'a> {
  /// An input file was read into memory.
  ArtifactLoaded { path: &'a Path, bytes: usize },
  /// An optional input file does not exist; the feature it drives is off.
  ArtifactAbsent { path: &'a Path },
  /// The additional trust bundle was taken from its config map.
  TrustBundleApplied { bytes: usize },
  /// The cloud provider config map had no `cloud.conf` entry.
  CloudConfigFallback { key: &'a str },
  /// A platform extension group applies to this run.
  PlatformMatched { platform: PlatformKind },
  /// A template is about to be rendered.
  ManifestRendered { template: &'a str },
  /// A planned entry carried nothing to write.
  ManifestSkipped { path: &'a Path },
  /// A manifest was written to the output tree.
  ManifestWritten { path: &'a Path, bytes: usize },
}

impl fmt::Display for Event<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Event::ArtifactLoaded { path, bytes } => write!(f, "loaded {} ({} bytes)", path.display(), bytes),
      Event::ArtifactAbsent { path } => write!(f, "optional artifact absent: {}", path.display()),
      Event::TrustBundleApplied { bytes } => write!(f, "additional trust bundle applied ({} bytes)", bytes),
      Event::CloudConfigFallback { key } => write!(
        f,
        "falling back to reading cloud provider config from user specified key {}",
        key
      ),
      Event::PlatformMatched { platform } => write!(f, "platform matched: {}", platform),
      Event::ManifestRendered { template } => write!(f, "rendering {}", template),
      Event::ManifestSkipped { path } => write!(f, "skipped {}", path.display()),
      Event::ManifestWritten { path, bytes } => write!(f, "wrote {} ({} bytes)", path.display(), bytes),
    }
  }
}

/// Receives [`Event`]s from the pipeline.
pub trait Observer {
  fn observe(&self, event: &Event<'_>);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {
  fn observe(&self, _event: &Event<'_>) {}
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
  fn observe(&self, event: &Event<'_>) {
    match event {
      Event::ArtifactLoaded { path, bytes } => debug!(path = %path.display(), bytes, "artifact loaded"),
      Event::ArtifactAbsent { path } => info!(path = %path.display(), "optional artifact absent"),
      Event::TrustBundleApplied { bytes } => debug!(bytes, "additional trust bundle applied"),
      Event::CloudConfigFallback { key } => {
        info!(key, "falling back to reading cloud provider config from user specified key")
      }
      Event::PlatformMatched { platform } => info!(%platform, "platform extension matched"),
      Event::ManifestRendered { template } => info!(template, "rendering manifest"),
      Event::ManifestSkipped { path } => debug!(path = %path.display(), "manifest skipped"),
      Event::ManifestWritten { path, bytes } => debug!(path = %path.display(), bytes, "manifest written"),
    }
  }
}
