//! Artifact loading.
//!
//! Reads the bootstrap input files into memory before anything is decoded.
//! Mandatory files must be readable; optional files may be missing, but only a
//! "not found" error is tolerated for them.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::observe::{Event, Observer};

/// Errors that can occur while loading artifacts.
#[derive(Debug, Error)]
pub enum LoadError {
  #[error("failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("artifact was not loaded: {}", path.display())]
  NotLoaded { path: PathBuf },
}

/// The raw payloads of every artifact that was actually present.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
  files: BTreeMap<PathBuf, Vec<u8>>,
}

impl ArtifactSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, path: impl Into<PathBuf>, data: Vec<u8>) {
    self.files.insert(path.into(), data);
  }

  /// Payload of `path`, or `None` when it was optional and absent.
  pub fn get(&self, path: &Path) -> Option<&[u8]> {
    self.files.get(path).map(Vec::as_slice)
  }

  /// Payload of `path`, which the caller expects to be present.
  pub fn require(&self, path: &Path) -> Result<&[u8], LoadError> {
    self.get(path).ok_or_else(|| LoadError::NotLoaded {
      path: path.to_path_buf(),
    })
  }

  pub fn contains(&self, path: &Path) -> bool {
    self.files.contains_key(path)
  }

  pub fn len(&self) -> usize {
    self.files.len()
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }

  pub fn paths(&self) -> impl Iterator<Item = &Path> {
    self.files.keys().map(PathBuf::as_path)
  }
}

/// Read a file that must exist.
pub fn read_artifact(path: &Path) -> Result<Vec<u8>, LoadError> {
  fs::read(path).map_err(|source| LoadError::Read {
    path: path.to_path_buf(),
    source,
  })
}

/// Read a file that may be missing.
///
/// Returns `Ok(None)` when the file does not exist. Any other I/O failure
/// (permissions, reading a directory, ...) is an error.
pub fn read_optional_artifact(path: &Path) -> Result<Option<Vec<u8>>, LoadError> {
  match fs::read(path) {
    Ok(data) => Ok(Some(data)),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
    Err(source) => Err(LoadError::Read {
      path: path.to_path_buf(),
      source,
    }),
  }
}

/// Load every mandatory and optional artifact.
///
/// Mandatory files are read first, in the order given; the first failure
/// aborts. The result only contains entries for files that were present.
pub fn load_artifacts(
  mandatory: &[&Path],
  optional: &[&Path],
  observer: &dyn Observer,
) -> Result<ArtifactSet, LoadError> {
  let mut set = ArtifactSet::new();

  for path in mandatory {
    let data = read_artifact(path)?;
    observer.observe(&Event::ArtifactLoaded {
      path,
      bytes: data.len(),
    });
    set.insert(*path, data);
  }

  for path in optional {
    match read_optional_artifact(path)? {
      Some(data) => {
        observer.observe(&Event::ArtifactLoaded {
          path,
          bytes: data.len(),
        });
        set.insert(*path, data);
      }
      None => observer.observe(&Event::ArtifactAbsent { path }),
    }
  }

  Ok(set)
}
