use std::path::PathBuf;

use crate::platform::PlatformKind;

use super::types::ManifestEntry;

const CONTROLLER_CONFIG_TEMPLATE: &str = "manifests/machineconfigcontroller/controllerconfig.yaml";
const MASTER_POOL_TEMPLATE: &str = "manifests/master.machineconfigpool.yaml";
const WORKER_POOL_TEMPLATE: &str = "manifests/worker.machineconfigpool.yaml";
const BOOTSTRAP_POD_TEMPLATE: &str = "manifests/bootstrap-pod-v2.yaml";
const CSR_ROLE_BINDING_TEMPLATE: &str = "manifests/machineconfigserver/csr-bootstrap-role-binding.yaml";
const SERVING_CA_CONFIGMAP_TEMPLATE: &str = "manifests/machineconfigserver/kube-apiserver-serving-ca-configmap.yaml";

/// Destination of the literal pull secret.
const PULL_SECRET_PATH: &str = "bootstrap/manifests/machineconfigcontroller-pull-secret";

/// The on-prem templates every platform group renders, with their destination
/// relative to the platform prefix.
const ON_PREM_TEMPLATES: [(&str, &str); 4] = [
  ("manifests/on-prem/coredns.yaml", "manifests/coredns.yaml"),
  (
    "manifests/on-prem/coredns-corefile.tmpl",
    "static-pod-resources/coredns/Corefile.tmpl",
  ),
  ("manifests/on-prem/keepalived.yaml", "manifests/keepalived.yaml"),
  (
    "manifests/on-prem/keepalived.conf.tmpl",
    "static-pod-resources/keepalived/keepalived.conf.tmpl",
  ),
];

/// The fixed manifests every run emits.
///
/// The pull secret is the only literal entry; an empty payload makes it a skip.
pub fn baseline_manifests(pull_secret: &[u8]) -> Vec<ManifestEntry> {
  vec![
    ManifestEntry::template(
      CONTROLLER_CONFIG_TEMPLATE,
      "bootstrap/manifests/machineconfigcontroller-controllerconfig.yaml",
    ),
    ManifestEntry::template(MASTER_POOL_TEMPLATE, "bootstrap/manifests/master.machineconfigpool.yaml"),
    ManifestEntry::template(WORKER_POOL_TEMPLATE, "bootstrap/manifests/worker.machineconfigpool.yaml"),
    ManifestEntry::template(BOOTSTRAP_POD_TEMPLATE, "bootstrap/machineconfigoperator-bootstrap-pod.yaml"),
    ManifestEntry::literal(pull_secret, PULL_SECRET_PATH),
    ManifestEntry::template(CSR_ROLE_BINDING_TEMPLATE, "manifests/csr-bootstrap-role-binding.yaml"),
    ManifestEntry::template(
      SERVING_CA_CONFIGMAP_TEMPLATE,
      "manifests/kube-apiserver-serving-ca-configmap.yaml",
    ),
  ]
}

/// The extension group of one platform: the on-prem templates under its prefix.
pub fn platform_manifests(platform: PlatformKind) -> Vec<ManifestEntry> {
  ON_PREM_TEMPLATES
    .iter()
    .map(|(template, path)| ManifestEntry::template(*template, PathBuf::from(platform.as_str()).join(path)))
    .collect()
}

/// The full plan: baseline first, then each platform group in the given order.
pub fn plan_manifests(pull_secret: &[u8], platforms: &[PlatformKind]) -> Vec<ManifestEntry> {
  let mut entries = baseline_manifests(pull_secret);
  for platform in platforms {
    entries.extend(platform_manifests(*platform));
  }
  entries
}
