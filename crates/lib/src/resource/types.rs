//! Configuration record types.
//!
//! These mirror the cluster configuration objects the installer writes to disk.
//! Only the fields the bootstrap renderer reads or re-emits are modelled;
//! unknown fields are ignored on decode.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The `apiVersion`/`kind` pair every object starts with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub api_version: String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub name: String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub namespace: String,
}

// =============================================================================
// Infrastructure
// =============================================================================

/// Describes the platform the cluster runs on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Infrastructure {
  #[serde(flatten)]
  pub type_meta: TypeMeta,
  #[serde(default)]
  pub metadata: ObjectMeta,
  #[serde(default)]
  pub spec: InfrastructureSpec,
  #[serde(default)]
  pub status: InfrastructureStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureSpec {
  /// Where the cloud provider configuration lives, if anywhere.
  #[serde(default)]
  pub cloud_config: ConfigMapFileReference,
}

/// Names a key inside a config map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMapFileReference {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub key: String,
}

impl ConfigMapFileReference {
  pub fn is_set(&self) -> bool {
    !self.name.is_empty()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureStatus {
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub infrastructure_name: String,
  /// Deprecated platform name; `platform_status.type` wins when set.
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub platform: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub platform_status: Option<PlatformStatus>,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub etcd_discovery_domain: String,
  #[serde(rename = "apiServerURL", default, skip_serializing_if = "String::is_empty")]
  pub api_server_url: String,
  #[serde(rename = "apiServerInternalURI", default, skip_serializing_if = "String::is_empty")]
  pub api_server_internal_uri: String,
}

/// Platform specific status. At most one block is expected to be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformStatus {
  #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
  pub platform_type: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub aws: Option<AwsPlatformStatus>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub azure: Option<AzurePlatformStatus>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub gcp: Option<GcpPlatformStatus>,
  #[serde(rename = "baremetal", default, skip_serializing_if = "Option::is_none")]
  pub bare_metal: Option<OnPremPlatformStatus>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub openstack: Option<OpenStackPlatformStatus>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ovirt: Option<OnPremPlatformStatus>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub kubevirt: Option<OnPremPlatformStatus>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub vsphere: Option<OnPremPlatformStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsPlatformStatus {
  #[serde(default)]
  pub region: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzurePlatformStatus {
  #[serde(default)]
  pub resource_group_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcpPlatformStatus {
  #[serde(rename = "projectID", default)]
  pub project_id: String,
  #[serde(default)]
  pub region: String,
}

/// Status shared by the platforms that run their own load balancing and DNS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnPremPlatformStatus {
  #[serde(rename = "apiServerInternalIP", default)]
  pub api_server_internal_ip: String,
  #[serde(rename = "ingressIP", default)]
  pub ingress_ip: String,
  #[serde(rename = "nodeDNSIP", default, skip_serializing_if = "String::is_empty")]
  pub node_dns_ip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenStackPlatformStatus {
  #[serde(rename = "apiServerInternalIP", default)]
  pub api_server_internal_ip: String,
  #[serde(rename = "ingressIP", default)]
  pub ingress_ip: String,
  #[serde(rename = "nodeDNSIP", default, skip_serializing_if = "String::is_empty")]
  pub node_dns_ip: String,
  #[serde(rename = "cloudName", default, skip_serializing_if = "String::is_empty")]
  pub cloud_name: String,
}

// =============================================================================
// Proxy
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proxy {
  #[serde(flatten)]
  pub type_meta: TypeMeta,
  #[serde(default)]
  pub metadata: ObjectMeta,
  #[serde(default)]
  pub spec: ProxySpec,
  #[serde(default)]
  pub status: ProxyStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxySpec {
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub http_proxy: String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub https_proxy: String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub no_proxy: String,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub readiness_endpoints: Vec<String>,
  #[serde(rename = "trustedCA", default)]
  pub trusted_ca: ConfigMapNameReference,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMapNameReference {
  #[serde(default)]
  pub name: String,
}

/// The effective proxy settings, as observed by the cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyStatus {
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub http_proxy: String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub https_proxy: String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub no_proxy: String,
}

// =============================================================================
// Network
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
  #[serde(flatten)]
  pub type_meta: TypeMeta,
  #[serde(default)]
  pub metadata: ObjectMeta,
  #[serde(default)]
  pub spec: NetworkSpec,
  #[serde(default)]
  pub status: NetworkStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSpec {
  #[serde(default)]
  pub cluster_network: Vec<ClusterNetworkEntry>,
  /// Service CIDRs; the first one hosts the cluster DNS address.
  #[serde(default)]
  pub service_network: Vec<String>,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub network_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterNetworkEntry {
  pub cidr: String,
  #[serde(default)]
  pub host_prefix: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatus {
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub cluster_network: Vec<ClusterNetworkEntry>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub service_network: Vec<String>,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub network_type: String,
  #[serde(rename = "clusterNetworkMTU", default, skip_serializing_if = "Option::is_none")]
  pub cluster_network_mtu: Option<u32>,
}

// =============================================================================
// DNS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dns {
  #[serde(flatten)]
  pub type_meta: TypeMeta,
  #[serde(default)]
  pub metadata: ObjectMeta,
  #[serde(default)]
  pub spec: DnsSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsSpec {
  #[serde(default)]
  pub base_domain: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub public_zone: Option<DnsZone>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub private_zone: Option<DnsZone>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsZone {
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub id: String,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub tags: BTreeMap<String, String>,
}

// =============================================================================
// ConfigMap
// =============================================================================

/// A plain key/value config map (trust bundles, cloud provider config).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMap {
  #[serde(flatten)]
  pub type_meta: TypeMeta,
  #[serde(default)]
  pub metadata: ObjectMeta,
  #[serde(default)]
  pub data: BTreeMap<String, String>,
}

impl ConfigMap {
  pub fn get(&self, key: &str) -> Option<&str> {
    self.data.get(key).map(String::as_str)
  }
}
