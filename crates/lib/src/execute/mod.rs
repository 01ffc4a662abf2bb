//! Manifest writing.
//!
//! Walks a plan in order, turns each entry into bytes (rendering templates,
//! passing literals through) and writes it under the destination root. The
//! first failure stops the run; files already written stay on disk, so a
//! failed run is retried from scratch rather than resumed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::manifest::{ManifestEntry, ManifestSource};
use crate::observe::{Event, Observer};
use crate::render::{RenderConfig, RenderError, Renderer};
use crate::util::hash::TreeDigest;

/// Filesystem failures while writing the output tree.
#[derive(Debug, Error)]
pub enum WriteError {
  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: io::Error },

  #[error("failed to write {}: {source}", path.display())]
  WriteFile { path: PathBuf, source: io::Error },
}

/// Errors that can occur while emitting a plan.
#[derive(Debug, Error)]
pub enum ExecuteError {
  #[error("failed to render {template}: {source}")]
  Render {
    template: String,
    #[source]
    source: RenderError,
  },

  #[error(transparent)]
  Write(#[from] WriteError),
}

/// What a completed run put on disk.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteReport {
  /// Absolute destinations, in plan order.
  pub written: Vec<PathBuf>,
  /// Relative destinations of skipped entries.
  pub skipped: Vec<PathBuf>,
  /// Digest of the written files only.
  pub digest: TreeDigest,
}

/// Render and write every entry of `entries` under `destination`.
pub fn write_manifests(
  entries: &[ManifestEntry],
  renderer: &dyn Renderer,
  config: &RenderConfig,
  destination: &Path,
  observer: &dyn Observer,
) -> Result<WriteReport, ExecuteError> {
  let mut report = WriteReport::default();

  for entry in entries {
    let data = match &entry.source {
      ManifestSource::Skip => {
        observer.observe(&Event::ManifestSkipped { path: &entry.path });
        report.skipped.push(entry.path.clone());
        continue;
      }
      ManifestSource::Literal(data) => data.clone(),
      ManifestSource::Template(template) => {
        observer.observe(&Event::ManifestRendered { template });
        renderer.render(template, config).map_err(|source| ExecuteError::Render {
          template: template.clone(),
          source,
        })?
      }
    };

    let path = destination.join(&entry.path);
    write_file(&path, &data)?;
    observer.observe(&Event::ManifestWritten {
      path: &path,
      bytes: data.len(),
    });
    report.digest.add(&entry.path, &data);
    report.written.push(path);
  }

  Ok(report)
}

/// Write `data` to `path`, creating missing parent directories first.
pub fn write_file(path: &Path, data: &[u8]) -> Result<(), WriteError> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
      path: parent.to_path_buf(),
      source,
    })?;
  }
  fs::write(path, data).map_err(|source| WriteError::WriteFile {
    path: path.to_path_buf(),
    source,
  })
}
