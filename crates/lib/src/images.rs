//! Container image references for the bootstrap manifests.
//!
//! The table is read from the `images.json` document that ships with a release
//! payload. Its keys are camelCase and every image is required.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Image map key for the operator image.
pub const MACHINE_CONFIG_OPERATOR_KEY: &str = "machineConfigOperator";
/// Image map key for the API server watcher (runs from the operator image).
pub const API_SERVER_WATCHER_KEY: &str = "apiServerWatcherKey";
pub const INFRA_IMAGE_KEY: &str = "infraImageKey";
pub const KEEPALIVED_KEY: &str = "keepalivedImage";
pub const COREDNS_KEY: &str = "corednsImage";
pub const MDNS_PUBLISHER_KEY: &str = "mdnsPublisherImage";
pub const HAPROXY_KEY: &str = "haproxyImage";
pub const BAREMETAL_RUNTIME_CFG_KEY: &str = "baremetalRuntimeCfgImage";

#[derive(Debug, Error)]
pub enum ImagesError {
  #[error("failed to read images file {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse images: {0}")]
  Parse(#[from] serde_yaml::Error),
}

/// Image references handed in by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Images {
  #[serde(rename = "machineConfigOperator")]
  pub machine_config_operator: String,
  #[serde(rename = "machineOSContent")]
  pub machine_os_content: String,
  #[serde(rename = "infraImageKey")]
  pub infra_image: String,
  #[serde(rename = "keepalivedImage")]
  pub keepalived: String,
  #[serde(rename = "corednsImage")]
  pub coredns: String,
  #[serde(rename = "mdnsPublisherImage")]
  pub mdns_publisher: String,
  #[serde(rename = "haproxyImage")]
  pub haproxy: String,
  #[serde(rename = "baremetalRuntimeCfgImage")]
  pub baremetal_runtime_cfg: String,
}

/// The subset of images templates reference directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderConfigImages {
  pub machine_config_operator: String,
  pub machine_os_content: String,
  pub keepalived_bootstrap: String,
  pub coredns_bootstrap: String,
  pub baremetal_runtime_cfg_bootstrap: String,
}

impl Images {
  /// Parse a YAML or JSON images document.
  pub fn from_slice(data: &[u8]) -> Result<Self, ImagesError> {
    Ok(serde_yaml::from_slice(data)?)
  }

  pub fn from_file(path: &Path) -> Result<Self, ImagesError> {
    let data = fs::read(path).map_err(|source| ImagesError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_slice(&data)
  }

  /// The image map stored in the controller config.
  pub fn controller_config_images(&self) -> BTreeMap<String, String> {
    [
      (MACHINE_CONFIG_OPERATOR_KEY, &self.machine_config_operator),
      (API_SERVER_WATCHER_KEY, &self.machine_config_operator),
      (INFRA_IMAGE_KEY, &self.infra_image),
      (KEEPALIVED_KEY, &self.keepalived),
      (COREDNS_KEY, &self.coredns),
      (MDNS_PUBLISHER_KEY, &self.mdns_publisher),
      (HAPROXY_KEY, &self.haproxy),
      (BAREMETAL_RUNTIME_CFG_KEY, &self.baremetal_runtime_cfg),
    ]
    .into_iter()
    .map(|(key, image)| (key.to_string(), image.clone()))
    .collect()
  }

  pub fn render_images(&self) -> RenderConfigImages {
    RenderConfigImages {
      machine_config_operator: self.machine_config_operator.clone(),
      machine_os_content: self.machine_os_content.clone(),
      keepalived_bootstrap: self.keepalived.clone(),
      coredns_bootstrap: self.coredns.clone(),
      baremetal_runtime_cfg_bootstrap: self.baremetal_runtime_cfg.clone(),
    }
  }
}
