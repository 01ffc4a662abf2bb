//! Manifest entry types.

use std::path::{Path, PathBuf};

/// Where the bytes of a manifest come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
  /// A template name, rendered against the render config.
  Template(String),
  /// Pre-computed bytes written verbatim.
  Literal(Vec<u8>),
  /// Nothing to write; the entry is kept in the plan but produces no file.
  Skip,
}

/// One planned output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
  pub source: ManifestSource,
  /// Destination relative to the output root.
  pub path: PathBuf,
}

impl ManifestEntry {
  pub fn template(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
    Self {
      source: ManifestSource::Template(name.into()),
      path: path.into(),
    }
  }

  /// A literal entry. Empty data turns into an explicit skip.
  pub fn literal(data: impl Into<Vec<u8>>, path: impl Into<PathBuf>) -> Self {
    let data = data.into();
    let source = if data.is_empty() {
      ManifestSource::Skip
    } else {
      ManifestSource::Literal(data)
    };
    Self {
      source,
      path: path.into(),
    }
  }

  pub fn skip(path: impl Into<PathBuf>) -> Self {
    Self {
      source: ManifestSource::Skip,
      path: path.into(),
    }
  }

  pub fn is_skip(&self) -> bool {
    matches!(self.source, ManifestSource::Skip)
  }

  pub fn template_name(&self) -> Option<&str> {
    match &self.source {
      ManifestSource::Template(name) => Some(name),
      _ => None,
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Human-readable description of the entry's source.
  pub fn description(&self) -> String {
    match &self.source {
      ManifestSource::Template(name) => format!("template {}", name),
      ManifestSource::Literal(data) => format!("literal ({} bytes)", data.len()),
      ManifestSource::Skip => "skip".to_string(),
    }
  }
}
