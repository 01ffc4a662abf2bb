//! Platform extension groups in the written tree.

use std::fs;

use mcb_lib::platform::PlatformKind;

use super::common::{Fixture, INFRA_BAREMETAL, INFRA_VSPHERE, INFRA_VSPHERE_NO_VIP, tree};

const ON_PREM: [&str; 4] = [
  "manifests/coredns.yaml",
  "manifests/keepalived.yaml",
  "static-pod-resources/coredns/Corefile.tmpl",
  "static-pod-resources/keepalived/keepalived.conf.tmpl",
];

fn platform_files(files: &[String], prefix: &str) -> Vec<String> {
  files
    .iter()
    .filter_map(|f| f.strip_prefix(&format!("{prefix}/")).map(str::to_string))
    .collect()
}

#[test]
fn baremetal_adds_exactly_its_on_prem_group() {
  let fixture = Fixture::with_infra(INFRA_BAREMETAL);

  let summary = fixture.run().unwrap();

  assert_eq!(summary.platforms, vec![PlatformKind::BareMetal]);
  let files = tree(&fixture.options.destination_dir);
  assert_eq!(files.len(), 11);
  assert_eq!(platform_files(&files, "baremetal"), ON_PREM);
  for other in ["openstack", "ovirt", "kubevirt", "vsphere"] {
    assert!(platform_files(&files, other).is_empty(), "{other}");
  }
}

#[test]
fn baremetal_pods_point_at_the_vips() {
  let fixture = Fixture::with_infra(INFRA_BAREMETAL);
  fixture.run().unwrap();

  let coredns = fs::read_to_string(fixture.out("baremetal/manifests/coredns.yaml")).unwrap();
  let doc: serde_yaml::Value = serde_yaml::from_str(&coredns).unwrap();

  assert_eq!(doc["metadata"]["namespace"].as_str(), Some("openshift-baremetal-infra"));
  let args = doc["spec"]["initContainers"][0]["command"].as_sequence().unwrap();
  assert!(args.iter().any(|a| a.as_str() == Some("192.168.111.5")));
  assert!(args.iter().any(|a| a.as_str() == Some("192.168.111.4")));
}

#[test]
fn runtime_templates_are_copied_verbatim() {
  let fixture = Fixture::with_infra(INFRA_BAREMETAL);
  fixture.run().unwrap();

  let keepalived =
    fs::read_to_string(fixture.out("baremetal/static-pod-resources/keepalived/keepalived.conf.tmpl")).unwrap();
  assert!(keepalived.contains("{{ .Cluster.APIVIP }}"));
  assert!(!keepalived.contains("{% raw %}"));
}

#[test]
fn vsphere_without_internal_ip_adds_nothing() {
  let fixture = Fixture::with_infra(INFRA_VSPHERE_NO_VIP);

  let summary = fixture.run().unwrap();

  assert!(summary.platforms.is_empty());
  assert_eq!(tree(&fixture.options.destination_dir).len(), 7);
}

#[test]
fn vsphere_with_internal_ip_adds_its_group() {
  let fixture = Fixture::with_infra(INFRA_VSPHERE);

  let summary = fixture.run().unwrap();

  assert_eq!(summary.platforms, vec![PlatformKind::VSphere]);
  let files = tree(&fixture.options.destination_dir);
  assert_eq!(platform_files(&files, "vsphere"), ON_PREM);
}
