//! Shared fixtures for library integration tests.
//!
//! `Fixture` lays out a complete set of bootstrap inputs in a temporary
//! directory; tests overwrite individual files to exercise one behavior.

use std::fs;
use std::path::{Path, PathBuf};

use mcb_lib::bootstrap::{BootstrapError, BootstrapOptions, BootstrapSummary, render_bootstrap};
use mcb_lib::images::Images;
use mcb_lib::observe::NoopObserver;
use mcb_lib::render::TemplateRenderer;
use tempfile::TempDir;

pub const INFRA_AWS: &str = r#"apiVersion: config.openshift.io/v1
kind: Infrastructure
metadata:
  name: cluster
spec:
  cloudConfig:
    name: ""
status:
  infrastructureName: test-cluster-x7k2p
  platform: AWS
  platformStatus:
    type: AWS
    aws:
      region: us-east-1
  etcdDiscoveryDomain: test-cluster.example.com
  apiServerURL: https://api.test-cluster.example.com:6443
  apiServerInternalURI: https://api-int.test-cluster.example.com:6443
"#;

pub const INFRA_BAREMETAL: &str = r#"apiVersion: config.openshift.io/v1
kind: Infrastructure
metadata:
  name: cluster
status:
  infrastructureName: test-cluster-x7k2p
  platform: BareMetal
  platformStatus:
    type: BareMetal
    baremetal:
      apiServerInternalIP: 192.168.111.5
      ingressIP: 192.168.111.4
      nodeDNSIP: 192.168.111.3
  etcdDiscoveryDomain: test-cluster.example.com
  apiServerInternalURI: https://api-int.test-cluster.example.com:6443
"#;

pub const INFRA_VSPHERE_NO_VIP: &str = r#"apiVersion: config.openshift.io/v1
kind: Infrastructure
metadata:
  name: cluster
status:
  platform: VSphere
  platformStatus:
    type: VSphere
    vsphere:
      ingressIP: 10.0.0.6
  apiServerInternalURI: https://api-int.test-cluster.example.com:6443
"#;

pub const INFRA_VSPHERE: &str = r#"apiVersion: config.openshift.io/v1
kind: Infrastructure
metadata:
  name: cluster
status:
  platform: VSphere
  platformStatus:
    type: VSphere
    vsphere:
      apiServerInternalIP: 10.0.0.5
      ingressIP: 10.0.0.6
  apiServerInternalURI: https://api-int.test-cluster.example.com:6443
"#;

pub const NETWORK: &str = r#"apiVersion: config.openshift.io/v1
kind: Network
metadata:
  name: cluster
spec:
  clusterNetwork:
  - cidr: 10.128.0.0/14
    hostPrefix: 23
  serviceNetwork:
  - 172.30.0.0/16
  networkType: OVNKubernetes
"#;

pub const PROXY: &str = r#"apiVersion: config.openshift.io/v1
kind: Proxy
metadata:
  name: cluster
spec:
  httpProxy: http://proxy.example.com:3128
status:
  httpProxy: http://proxy.example.com:3128
  noProxy: .cluster.local,.svc,172.30.0.0/16
"#;

pub const DNS: &str = r#"apiVersion: config.openshift.io/v1
kind: DNS
metadata:
  name: cluster
spec:
  baseDomain: test-cluster.example.com
"#;

pub const CLUSTER_CONFIG: &str = r#"apiVersion: v1
kind: ConfigMap
metadata:
  name: cluster-config-v1
  namespace: kube-system
data:
  install-config: |
    apiVersion: v1
    baseDomain: example.com
"#;

pub const IMAGES_JSON: &str = r#"{
  "machineConfigOperator": "quay.io/openshift/mco@sha256:01",
  "machineOSContent": "quay.io/openshift/os-content@sha256:02",
  "infraImageKey": "quay.io/openshift/pod@sha256:03",
  "keepalivedImage": "quay.io/openshift/keepalived@sha256:04",
  "corednsImage": "quay.io/openshift/coredns@sha256:05",
  "mdnsPublisherImage": "quay.io/openshift/mdns@sha256:06",
  "haproxyImage": "quay.io/openshift/haproxy@sha256:07",
  "baremetalRuntimeCfgImage": "quay.io/openshift/runtimecfg@sha256:08"
}"#;

pub const PULL_SECRET: &str = r#"{"auths":{"quay.io":{"auth":"dXNlcjpwYXNz"}}}"#;

/// A temporary directory holding one complete set of inputs.
pub struct Fixture {
  pub temp: TempDir,
  pub options: BootstrapOptions,
}

impl Fixture {
  pub fn new() -> Self {
    Self::with_infra(INFRA_AWS)
  }

  pub fn with_infra(infra: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    let options = BootstrapOptions {
      additional_trust_bundle_file: Some(dir.join("user-ca-bundle-config.yaml")),
      proxy_file: dir.join("cluster-proxy-01-config.yaml"),
      cluster_config_config_map_file: dir.join("cluster-config.yaml"),
      infra_file: dir.join("cluster-infrastructure-02-config.yaml"),
      network_file: dir.join("cluster-network-02-config.yaml"),
      dns_file: dir.join("cluster-dns-02-config.yaml"),
      cloud_config_file: Some(dir.join("cloud-provider-config.yaml")),
      cloud_provider_ca_file: None,
      root_ca_file: dir.join("root-ca.crt"),
      kube_api_server_serving_ca_file: Some(dir.join("kube-apiserver-serving-ca.crt")),
      pull_secret_file: dir.join("pull-secret.json"),
      destination_dir: dir.join("out"),
      release_image: "quay.io/openshift/release:4.6".to_string(),
    };

    let fixture = Self { temp, options };
    fixture.write(&fixture.options.infra_file, infra);
    fixture.write(&fixture.options.network_file, NETWORK);
    fixture.write(&fixture.options.proxy_file, PROXY);
    fixture.write(&fixture.options.dns_file, DNS);
    fixture.write(&fixture.options.cluster_config_config_map_file, CLUSTER_CONFIG);
    fixture.write(&fixture.options.root_ca_file, "-----BEGIN CERTIFICATE-----\nROOT\n-----END CERTIFICATE-----\n");
    fixture.write(
      fixture.options.kube_api_server_serving_ca_file.as_ref().unwrap(),
      "-----BEGIN CERTIFICATE-----\nSERVING\n-----END CERTIFICATE-----\n",
    );
    fixture.write(&fixture.options.pull_secret_file, PULL_SECRET);
    fixture
  }

  pub fn write(&self, path: &Path, content: &str) {
    fs::write(path, content).unwrap();
  }

  pub fn path(&self, name: &str) -> PathBuf {
    self.temp.path().join(name)
  }

  pub fn out(&self, relative: &str) -> PathBuf {
    self.options.destination_dir.join(relative)
  }

  pub fn run(&self) -> Result<BootstrapSummary, BootstrapError> {
    let renderer = TemplateRenderer::from_embedded().unwrap();
    render_bootstrap(&self.options, &images(), &renderer, &NoopObserver)
  }
}

pub fn images() -> Images {
  Images::from_slice(IMAGES_JSON.as_bytes()).unwrap()
}

/// Relative paths of every file under `root`, sorted.
pub fn tree(root: &Path) -> Vec<String> {
  let mut files: Vec<String> = walkdir::WalkDir::new(root)
    .into_iter()
    .filter_map(Result::ok)
    .filter(|e| e.file_type().is_file())
    .map(|e| {
      e.path()
        .strip_prefix(root)
        .unwrap()
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
    })
    .collect();
  files.sort();
  files
}
