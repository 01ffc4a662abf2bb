//! Fixture records shared by unit tests.
//!
//! The records describe a small cluster on a cloud platform: no on-prem status
//! block is populated and no cloud config source is named, so tests opt into
//! those features explicitly.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::images::Images;
use crate::resource::{
  CONFIG_V1, CORE_V1, ClusterNetworkEntry, ConfigMap, Dns, DnsSpec, DnsZone, Infrastructure, InfrastructureStatus,
  Network, NetworkSpec, ObjectMeta, Proxy, ProxySpec, ProxyStatus, TypeMeta,
};

fn meta(api_version: &str, kind: &str, name: &str) -> (TypeMeta, ObjectMeta) {
  (
    TypeMeta {
      api_version: api_version.to_string(),
      kind: kind.to_string(),
    },
    ObjectMeta {
      name: name.to_string(),
      ..Default::default()
    },
  )
}

pub fn infrastructure() -> Infrastructure {
  let (type_meta, metadata) = meta(CONFIG_V1, "Infrastructure", "cluster");
  Infrastructure {
    type_meta,
    metadata,
    spec: Default::default(),
    status: InfrastructureStatus {
      infrastructure_name: "test-cluster-x7k2p".to_string(),
      platform: "AWS".to_string(),
      platform_status: None,
      etcd_discovery_domain: "test-cluster.example.com".to_string(),
      api_server_url: "https://api.test-cluster.example.com:6443".to_string(),
      api_server_internal_uri: "https://api-int.test-cluster.example.com:6443".to_string(),
    },
  }
}

pub fn network() -> Network {
  let (type_meta, metadata) = meta(CONFIG_V1, "Network", "cluster");
  Network {
    type_meta,
    metadata,
    spec: NetworkSpec {
      cluster_network: vec![ClusterNetworkEntry {
        cidr: "10.128.0.0/14".to_string(),
        host_prefix: 23,
      }],
      service_network: vec!["172.30.0.0/16".to_string()],
      network_type: "OVNKubernetes".to_string(),
    },
    status: Default::default(),
  }
}

pub fn proxy() -> Proxy {
  let (type_meta, metadata) = meta(CONFIG_V1, "Proxy", "cluster");
  Proxy {
    type_meta,
    metadata,
    spec: ProxySpec {
      http_proxy: "http://proxy.example.com:3128".to_string(),
      ..Default::default()
    },
    status: ProxyStatus {
      http_proxy: "http://proxy.example.com:3128".to_string(),
      https_proxy: String::new(),
      no_proxy: ".cluster.local,.svc,172.30.0.0/16".to_string(),
    },
  }
}

pub fn dns() -> Dns {
  let (type_meta, metadata) = meta(CONFIG_V1, "DNS", "cluster");
  Dns {
    type_meta,
    metadata,
    spec: DnsSpec {
      base_domain: "test-cluster.example.com".to_string(),
      public_zone: None,
      private_zone: Some(DnsZone {
        id: "Z0123456789".to_string(),
        tags: BTreeMap::new(),
      }),
    },
  }
}

pub fn config_map(name: &str, entries: &[(&str, &str)]) -> ConfigMap {
  let (type_meta, metadata) = meta(CORE_V1, "ConfigMap", name);
  ConfigMap {
    type_meta,
    metadata,
    data: entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
  }
}

/// Eight distinct image references.
pub fn images() -> Images {
  Images {
    machine_config_operator: "quay.io/openshift/mco@sha256:01".to_string(),
    machine_os_content: "quay.io/openshift/os-content@sha256:02".to_string(),
    infra_image: "quay.io/openshift/pod@sha256:03".to_string(),
    keepalived: "quay.io/openshift/keepalived@sha256:04".to_string(),
    coredns: "quay.io/openshift/coredns@sha256:05".to_string(),
    mdns_publisher: "quay.io/openshift/mdns@sha256:06".to_string(),
    haproxy: "quay.io/openshift/haproxy@sha256:07".to_string(),
    baremetal_runtime_cfg: "quay.io/openshift/runtimecfg@sha256:08".to_string(),
  }
}

/// Serialize `value` as YAML to `path`.
pub fn write_yaml<T: Serialize>(path: &Path, value: &T) {
  let yaml = serde_yaml::to_string(value).expect("serialize fixture");
  fs::write(path, yaml).expect("write fixture");
}
