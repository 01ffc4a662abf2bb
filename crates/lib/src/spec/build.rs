use std::path::Path;

use thiserror::Error;

use crate::artifact::{LoadError, read_artifact};
use crate::consts::{CLOUD_CONFIG_KEY, TRUST_BUNDLE_KEY};
use crate::discover::{DiscoverError, discover_controller_config};
use crate::images::Images;
use crate::observe::{Event, Observer};
use crate::resource::{ConfigMap, DecodeError, Dns, Infrastructure, Network, Proxy, decode};

use super::types::ControllerConfigSpec;

/// Errors that can occur while loading the cloud provider config map.
#[derive(Debug, Error)]
pub enum CloudConfigError {
  #[error("no cloud provider config file was given for config map {name}")]
  MissingPath { name: String },

  #[error(transparent)]
  Load(#[from] LoadError),

  #[error(transparent)]
  Decode(#[from] DecodeError),
}

/// Errors that can occur while building the controller config.
#[derive(Debug, Error)]
pub enum SpecError {
  #[error(transparent)]
  Discover(#[from] DiscoverError),

  #[error("failed to load the cloud provider config: {0}")]
  CloudProviderConfig(#[source] CloudConfigError),
}

/// Everything the spec builder merges.
#[derive(Debug, Clone, Copy)]
pub struct SpecInputs<'a> {
  pub infra: &'a Infrastructure,
  pub network: &'a Network,
  pub proxy: &'a Proxy,
  pub dns: &'a Dns,
  /// Decoded additional trust bundle config map, if the file was present.
  pub trust_bundle: Option<&'a ConfigMap>,
  /// Read only when the infrastructure names a cloud config source.
  pub cloud_config_file: Option<&'a Path>,
  pub root_ca: &'a [u8],
  pub kube_api_server_serving_ca: Option<&'a [u8]>,
  pub cloud_provider_ca: Option<&'a [u8]>,
  pub images: &'a Images,
  pub release_image: &'a str,
}

/// Merge the inputs into one controller config.
///
/// Nothing is returned on error; a failure in discovery or in loading a named
/// cloud provider config aborts the whole build.
pub fn build_controller_config(
  inputs: &SpecInputs<'_>,
  observer: &dyn Observer,
) -> Result<ControllerConfigSpec, SpecError> {
  let mut spec = discover_controller_config(inputs.infra, inputs.network, inputs.proxy, inputs.dns)?;

  if let Some(bundle) = inputs.trust_bundle {
    spec.additional_trust_bundle = bundle.get(TRUST_BUNDLE_KEY).unwrap_or_default().as_bytes().to_vec();
    observer.observe(&Event::TrustBundleApplied {
      bytes: spec.additional_trust_bundle.len(),
    });
  }

  if inputs.infra.spec.cloud_config.is_set() {
    spec.cloud_provider_config = load_cloud_provider_config(inputs.infra, inputs.cloud_config_file, observer)
      .map_err(SpecError::CloudProviderConfig)?;
  }

  let mut root_ca = inputs.root_ca.to_vec();
  if let Some(serving_ca) = inputs.kube_api_server_serving_ca {
    root_ca.extend_from_slice(serving_ca);
    spec.kube_api_server_serving_ca_data = Some(serving_ca.to_vec());
  }
  if let Some(cloud_ca) = inputs.cloud_provider_ca {
    spec.cloud_provider_ca_data = Some(cloud_ca.to_vec());
  }

  spec.root_ca_data = root_ca;
  spec.pull_secret = None;
  spec.os_image_url = inputs.images.machine_os_content.clone();
  spec.release_image = inputs.release_image.to_string();
  spec.images = inputs.images.controller_config_images();

  Ok(spec)
}

/// Read and decode the cloud provider config map the infrastructure points at.
pub fn load_cloud_provider_config(
  infra: &Infrastructure,
  path: Option<&Path>,
  observer: &dyn Observer,
) -> Result<String, CloudConfigError> {
  let reference = &infra.spec.cloud_config;
  let path = path.ok_or_else(|| CloudConfigError::MissingPath {
    name: reference.name.clone(),
  })?;
  let data = read_artifact(path)?;
  let config_map: ConfigMap = decode(&data)?;
  Ok(cloud_config_from_map(&config_map, &reference.key, observer))
}

/// Pick the cloud config out of its config map.
///
/// `cloud.conf` wins; otherwise the key named by the infrastructure is used,
/// and a missing value there yields an empty config.
pub fn cloud_config_from_map(config_map: &ConfigMap, fallback_key: &str, observer: &dyn Observer) -> String {
  if let Some(conf) = config_map.get(CLOUD_CONFIG_KEY) {
    return conf.to_string();
  }
  observer.observe(&Event::CloudConfigFallback { key: fallback_key });
  config_map.get(fallback_key).unwrap_or_default().to_string()
}
