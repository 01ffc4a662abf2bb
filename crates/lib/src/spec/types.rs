use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::resource::{Dns, Infrastructure, ProxyStatus};
use crate::util::hash::Hashable;

use super::bytes;

/// The single configuration object consumed by manifest rendering.
///
/// Byte fields serialize as base64. Root CA data is the base CA followed by the
/// API server serving CA, in that order and without deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerConfigSpec {
  #[serde(rename = "clusterDNSIP")]
  pub cluster_dns_ip: String,
  #[serde(default)]
  pub cloud_provider_config: String,
  pub platform: String,
  #[serde(default)]
  pub etcd_discovery_domain: String,
  #[serde(
    rename = "kubeAPIServerServingCAData",
    with = "bytes::option",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub kube_api_server_serving_ca_data: Option<Vec<u8>>,
  #[serde(rename = "rootCAData", with = "bytes", default)]
  pub root_ca_data: Vec<u8>,
  #[serde(
    rename = "cloudProviderCAData",
    with = "bytes::option",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub cloud_provider_ca_data: Option<Vec<u8>>,
  #[serde(with = "bytes", default, skip_serializing_if = "Vec::is_empty")]
  pub additional_trust_bundle: Vec<u8>,
  /// Never populated at bootstrap; the pull secret ships as its own file.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pull_secret: Option<ObjectReference>,
  #[serde(default)]
  pub images: BTreeMap<String, String>,
  #[serde(rename = "osImageURL", default)]
  pub os_image_url: String,
  #[serde(default)]
  pub release_image: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub proxy: Option<ProxyStatus>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub infra: Option<Infrastructure>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub dns: Option<Dns>,
}

impl Hashable for ControllerConfigSpec {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectReference {
  #[serde(default)]
  pub namespace: String,
  #[serde(default)]
  pub name: String,
}
