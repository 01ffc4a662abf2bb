//! The single bootstrap call.
//!
//! [`render_bootstrap`] runs the whole pipeline: load the input files, decode
//! them, build the controller config, resolve platform extensions, plan the
//! manifests, and write them under the destination directory. Every failure
//! aborts the run and is reported as one [`BootstrapError`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::artifact::{ArtifactSet, LoadError, load_artifacts};
use crate::discover::DiscoverError;
use crate::execute::{ExecuteError, WriteError, write_manifests};
use crate::images::Images;
use crate::manifest::{ManifestEntry, plan_manifests};
use crate::observe::{Event, Observer};
use crate::platform::{PlatformKind, resolve_platforms};
use crate::render::{RenderConfig, RenderError, Renderer};
use crate::resource::{ConfigMap, DecodeError, Dns, Infrastructure, Network, Proxy, Resource, decode};
use crate::spec::{CloudConfigError, SpecError, SpecInputs, build_controller_config};
use crate::util::hash::ContentHash;

/// Input files and settings of one bootstrap run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapOptions {
  /// Config map with the additional trust bundle. The file may be missing.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub additional_trust_bundle_file: Option<PathBuf>,
  pub proxy_file: PathBuf,
  /// Read to make sure it exists; its contents are not used.
  pub cluster_config_config_map_file: PathBuf,
  pub infra_file: PathBuf,
  pub network_file: PathBuf,
  pub dns_file: PathBuf,
  /// Config map with the cloud provider config, read only when the
  /// infrastructure names a cloud config source.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cloud_config_file: Option<PathBuf>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cloud_provider_ca_file: Option<PathBuf>,
  pub root_ca_file: PathBuf,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub kube_api_server_serving_ca_file: Option<PathBuf>,
  pub pull_secret_file: PathBuf,
  pub destination_dir: PathBuf,
  pub release_image: String,
}

impl BootstrapOptions {
  /// Files that must be readable. The serving CA and cloud provider CA are
  /// only listed when a path was given for them.
  pub fn mandatory_files(&self) -> Vec<&Path> {
    let mut files = vec![
      self.cluster_config_config_map_file.as_path(),
      self.infra_file.as_path(),
      self.network_file.as_path(),
      self.proxy_file.as_path(),
      self.dns_file.as_path(),
      self.root_ca_file.as_path(),
      self.pull_secret_file.as_path(),
    ];
    files.extend(self.kube_api_server_serving_ca_file.as_deref());
    files.extend(self.cloud_provider_ca_file.as_deref());
    files
  }

  /// Files whose absence turns a feature off.
  pub fn optional_files(&self) -> Vec<&Path> {
    self.additional_trust_bundle_file.iter().map(PathBuf::as_path).collect()
  }
}

/// Errors that can occur during a bootstrap run, tagged with the failing stage.
#[derive(Debug, Error)]
pub enum BootstrapError {
  #[error(transparent)]
  Load(#[from] LoadError),

  #[error("failed to decode {}: {source}", path.display())]
  Decode {
    path: PathBuf,
    #[source]
    source: DecodeError,
  },

  #[error(transparent)]
  Discover(#[from] DiscoverError),

  #[error("failed to load the cloud provider config: {0}")]
  CloudProviderConfig(#[source] CloudConfigError),

  #[error("failed to render {template}: {source}")]
  Render {
    template: String,
    #[source]
    source: RenderError,
  },

  #[error(transparent)]
  Write(#[from] WriteError),
}

impl From<SpecError> for BootstrapError {
  fn from(err: SpecError) -> Self {
    match err {
      SpecError::Discover(err) => BootstrapError::Discover(err),
      SpecError::CloudProviderConfig(err) => BootstrapError::CloudProviderConfig(err),
    }
  }
}

impl From<ExecuteError> for BootstrapError {
  fn from(err: ExecuteError) -> Self {
    match err {
      ExecuteError::Render { template, source } => BootstrapError::Render { template, source },
      ExecuteError::Write(err) => BootstrapError::Write(err),
    }
  }
}

/// Everything decided before the first file is written.
#[derive(Debug, Clone)]
pub struct PreparedBootstrap {
  pub config: RenderConfig,
  pub platforms: Vec<PlatformKind>,
  pub entries: Vec<ManifestEntry>,
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapSummary {
  pub platforms: Vec<PlatformKind>,
  pub written: Vec<PathBuf>,
  pub skipped: Vec<PathBuf>,
  /// SHA-256 over the files this run wrote, keyed by relative path.
  pub digest: ContentHash,
}

/// Load, decode, merge, and plan without touching the destination.
pub fn prepare(
  options: &BootstrapOptions,
  images: &Images,
  observer: &dyn Observer,
) -> Result<PreparedBootstrap, BootstrapError> {
  let artifacts = load_artifacts(&options.mandatory_files(), &options.optional_files(), observer)?;

  let infra: Infrastructure = decode_artifact(&artifacts, &options.infra_file)?;
  let network: Network = decode_artifact(&artifacts, &options.network_file)?;
  let proxy: Proxy = decode_artifact(&artifacts, &options.proxy_file)?;
  let dns: Dns = decode_artifact(&artifacts, &options.dns_file)?;
  let trust_bundle: Option<ConfigMap> = match options.additional_trust_bundle_file.as_deref() {
    Some(path) if artifacts.contains(path) => Some(decode_artifact(&artifacts, path)?),
    _ => None,
  };

  let serving_ca = optional_payload(&artifacts, options.kube_api_server_serving_ca_file.as_deref())?;
  let cloud_provider_ca = optional_payload(&artifacts, options.cloud_provider_ca_file.as_deref())?;

  let inputs = SpecInputs {
    infra: &infra,
    network: &network,
    proxy: &proxy,
    dns: &dns,
    trust_bundle: trust_bundle.as_ref(),
    cloud_config_file: options.cloud_config_file.as_deref(),
    root_ca: artifacts.require(&options.root_ca_file)?,
    kube_api_server_serving_ca: serving_ca,
    cloud_provider_ca,
    images,
    release_image: &options.release_image,
  };
  let spec = build_controller_config(&inputs, observer)?;

  let platforms = resolve_platforms(&infra);
  for platform in &platforms {
    observer.observe(&Event::PlatformMatched { platform: *platform });
  }
  let entries = plan_manifests(artifacts.require(&options.pull_secret_file)?, &platforms);

  let serving_ca_text = serving_ca
    .map(|ca| String::from_utf8_lossy(ca).into_owned())
    .unwrap_or_default();
  let config = RenderConfig::bootstrap(spec, &serving_ca_text, images, &infra.status.api_server_internal_uri);

  Ok(PreparedBootstrap {
    config,
    platforms,
    entries,
  })
}

/// Run the whole pipeline and write the manifests under
/// `options.destination_dir`.
///
/// Not atomic: a render or write failure leaves the files written so far in
/// place. Retry by running again from scratch.
pub fn render_bootstrap(
  options: &BootstrapOptions,
  images: &Images,
  renderer: &dyn Renderer,
  observer: &dyn Observer,
) -> Result<BootstrapSummary, BootstrapError> {
  let prepared = prepare(options, images, observer)?;
  let report = write_manifests(
    &prepared.entries,
    renderer,
    &prepared.config,
    &options.destination_dir,
    observer,
  )?;
  Ok(BootstrapSummary {
    platforms: prepared.platforms,
    written: report.written,
    skipped: report.skipped,
    digest: report.digest.finish(),
  })
}

fn decode_artifact<T: Resource>(artifacts: &ArtifactSet, path: &Path) -> Result<T, BootstrapError> {
  decode(artifacts.require(path)?).map_err(|source| BootstrapError::Decode {
    path: path.to_path_buf(),
    source,
  })
}

fn optional_payload<'a>(artifacts: &'a ArtifactSet, path: Option<&Path>) -> Result<Option<&'a [u8]>, LoadError> {
  path.map(|path| artifacts.require(path)).transpose()
}
