//! Input resolution for the `render` and `plan` commands.
//!
//! Inputs come from an optional `--config` file (YAML or JSON, camelCase keys)
//! and from individual flags; a flag always wins over the file. Relative paths
//! in the file are resolved against the file's directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;
use tracing::debug;

use mcb_lib::bootstrap::BootstrapOptions;

#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
  /// Options file; flags override its values
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Image references (images.json)
  #[arg(long, value_name = "FILE")]
  pub images: Option<PathBuf>,

  /// Directory of templates overriding the embedded ones
  #[arg(long, value_name = "DIR")]
  pub templates_dir: Option<PathBuf>,

  /// Cluster config config map
  #[arg(long, value_name = "FILE")]
  pub cluster_config_file: Option<PathBuf>,

  /// Infrastructure record
  #[arg(long, value_name = "FILE")]
  pub infra_config_file: Option<PathBuf>,

  /// Network record
  #[arg(long, value_name = "FILE")]
  pub network_config_file: Option<PathBuf>,

  /// Proxy record
  #[arg(long, value_name = "FILE")]
  pub proxy_config_file: Option<PathBuf>,

  /// DNS record
  #[arg(long, value_name = "FILE")]
  pub dns_config_file: Option<PathBuf>,

  /// Additional trust bundle config map (may not exist)
  #[arg(long, value_name = "FILE")]
  pub additional_trust_bundle_config_file: Option<PathBuf>,

  /// Cloud provider config map
  #[arg(long, value_name = "FILE")]
  pub cloud_config_file: Option<PathBuf>,

  /// Cloud provider CA bundle
  #[arg(long, value_name = "FILE")]
  pub cloud_provider_ca_file: Option<PathBuf>,

  /// Root CA bundle
  #[arg(long, value_name = "FILE")]
  pub root_ca: Option<PathBuf>,

  /// Kube API server serving CA bundle
  #[arg(long, value_name = "FILE")]
  pub kube_ca: Option<PathBuf>,

  /// Pull secret
  #[arg(long, value_name = "FILE")]
  pub pull_secret: Option<PathBuf>,

  /// Destination directory of the rendered manifests
  #[arg(long, value_name = "DIR")]
  pub dest_dir: Option<PathBuf>,

  /// Release image reference
  #[arg(long, value_name = "IMAGE")]
  pub release_image: Option<String>,
}

/// The `--config` file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigFile {
  images_file: Option<PathBuf>,
  templates_dir: Option<PathBuf>,
  additional_trust_bundle_file: Option<PathBuf>,
  proxy_file: Option<PathBuf>,
  cluster_config_config_map_file: Option<PathBuf>,
  infra_file: Option<PathBuf>,
  network_file: Option<PathBuf>,
  dns_file: Option<PathBuf>,
  cloud_config_file: Option<PathBuf>,
  cloud_provider_ca_file: Option<PathBuf>,
  root_ca_file: Option<PathBuf>,
  kube_api_server_serving_ca_file: Option<PathBuf>,
  pull_secret_file: Option<PathBuf>,
  destination_dir: Option<PathBuf>,
  release_image: Option<String>,
}

impl ConfigFile {
  fn load(path: &Path) -> Result<Self> {
    let content = fs::read(path).with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let mut file: ConfigFile = serde_yaml::from_slice(&content)
      .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    if let Some(base) = path.parent() {
      file.rebase(base);
    }
    Ok(file)
  }

  fn rebase(&mut self, base: &Path) {
    for path in [
      &mut self.images_file,
      &mut self.templates_dir,
      &mut self.additional_trust_bundle_file,
      &mut self.proxy_file,
      &mut self.cluster_config_config_map_file,
      &mut self.infra_file,
      &mut self.network_file,
      &mut self.dns_file,
      &mut self.cloud_config_file,
      &mut self.cloud_provider_ca_file,
      &mut self.root_ca_file,
      &mut self.kube_api_server_serving_ca_file,
      &mut self.pull_secret_file,
      &mut self.destination_dir,
    ]
    .into_iter()
    .flatten()
    {
      if path.is_relative() {
        *path = base.join(&*path);
      }
    }
  }
}

/// Fully resolved inputs of one command.
#[derive(Debug, Clone)]
pub struct ResolvedInputs {
  pub options: BootstrapOptions,
  pub images_file: PathBuf,
  pub templates_dir: Option<PathBuf>,
}

/// Merge flags over the config file.
///
/// `plan` never writes, so it does not need a destination directory.
pub fn resolve(args: &InputArgs, require_destination: bool) -> Result<ResolvedInputs> {
  let file = match &args.config {
    Some(path) => ConfigFile::load(path)?,
    None => ConfigFile::default(),
  };
  debug!(config = ?args.config, "resolving inputs");

  let destination_dir = match args.dest_dir.clone().or(file.destination_dir) {
    Some(dir) => dir,
    None if require_destination => anyhow::bail!("Missing required input: --dest-dir"),
    None => PathBuf::new(),
  };

  let options = BootstrapOptions {
    additional_trust_bundle_file: args
      .additional_trust_bundle_config_file
      .clone()
      .or(file.additional_trust_bundle_file),
    proxy_file: required(&args.proxy_config_file, file.proxy_file, "proxy-config-file")?,
    cluster_config_config_map_file: required(
      &args.cluster_config_file,
      file.cluster_config_config_map_file,
      "cluster-config-file",
    )?,
    infra_file: required(&args.infra_config_file, file.infra_file, "infra-config-file")?,
    network_file: required(&args.network_config_file, file.network_file, "network-config-file")?,
    dns_file: required(&args.dns_config_file, file.dns_file, "dns-config-file")?,
    cloud_config_file: args.cloud_config_file.clone().or(file.cloud_config_file),
    cloud_provider_ca_file: args.cloud_provider_ca_file.clone().or(file.cloud_provider_ca_file),
    root_ca_file: required(&args.root_ca, file.root_ca_file, "root-ca")?,
    kube_api_server_serving_ca_file: args.kube_ca.clone().or(file.kube_api_server_serving_ca_file),
    pull_secret_file: required(&args.pull_secret, file.pull_secret_file, "pull-secret")?,
    destination_dir,
    release_image: required(&args.release_image, file.release_image, "release-image")?,
  };

  Ok(ResolvedInputs {
    options,
    images_file: required(&args.images, file.images_file, "images")?,
    templates_dir: args.templates_dir.clone().or(file.templates_dir),
  })
}

fn required<T: Clone>(flag: &Option<T>, file: Option<T>, name: &str) -> Result<T> {
  flag
    .clone()
    .or(file)
    .with_context(|| format!("Missing required input: --{}", name))
}
