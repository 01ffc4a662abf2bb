//! Hashing utilities for fingerprinting specs and output trees.
//!
//! - `ObjectHash`: a short SHA-256 of a serialized value, for display
//! - `ContentHash`: a full 64-character SHA-256
//! - `TreeDigest`: deterministic digest of the files a run wrote
//! - `hash_bytes()`: single payload digest

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::consts::DIGEST_DISPLAY_LEN;

pub type HashError = serde_json::Error;

/// A truncated SHA-256 of a JSON-serialized value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectHash(pub String);

impl fmt::Display for ObjectHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

pub trait Hashable: Serialize {
  fn compute_hash(&self) -> Result<ObjectHash, HashError> {
    let serialized = serde_json::to_vec(self)?;
    Ok(ObjectHash(hash_bytes(&serialized).short().to_string()))
  }
}

/// A full 64-character SHA-256, lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContentHash(pub String);

impl ContentHash {
  /// The display prefix of the hash.
  pub fn short(&self) -> &str {
    &self.0[..DIGEST_DISPLAY_LEN.min(self.0.len())]
  }
}

impl fmt::Display for ContentHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Digest of the files one run wrote.
///
/// Each file contributes its relative path (always `/`-separated) and the hash
/// of its contents. Files are ordered by path before hashing, so the digest
/// does not depend on write order or on anything else under the root.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TreeDigest {
  files: BTreeMap<String, ContentHash>,
}

impl TreeDigest {
  pub fn add(&mut self, path: &Path, data: &[u8]) {
    let rel_path = path
      .components()
      .map(|c| c.as_os_str().to_string_lossy())
      .collect::<Vec<_>>()
      .join("/");
    self.files.insert(rel_path, hash_bytes(data));
  }

  pub fn len(&self) -> usize {
    self.files.len()
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }

  pub fn finish(&self) -> ContentHash {
    let mut hasher = Sha256::new();
    for (path, hash) in &self.files {
      hasher.update(format!("F:{}:{}\n", path, hash).as_bytes());
    }
    ContentHash(format!("{:x}", hasher.finalize()))
  }
}

pub fn hash_bytes(data: &[u8]) -> ContentHash {
  let mut hasher = Sha256::new();
  hasher.update(data);
  ContentHash(format!("{:x}", hasher.finalize()))
}
