//! Manifest templates compiled into the binary.
//!
//! Names are the paths under `templates/`; a templates directory passed to
//! [`TemplateRenderer::with_dir`](super::TemplateRenderer::with_dir) uses the
//! same names to override them.

pub static CONTROLLER_CONFIG: &str =
  include_str!("../../templates/manifests/machineconfigcontroller/controllerconfig.yaml");
pub static MASTER_POOL: &str = include_str!("../../templates/manifests/master.machineconfigpool.yaml");
pub static WORKER_POOL: &str = include_str!("../../templates/manifests/worker.machineconfigpool.yaml");
pub static BOOTSTRAP_POD: &str = include_str!("../../templates/manifests/bootstrap-pod-v2.yaml");
pub static CSR_ROLE_BINDING: &str =
  include_str!("../../templates/manifests/machineconfigserver/csr-bootstrap-role-binding.yaml");
pub static SERVING_CA_CONFIGMAP: &str =
  include_str!("../../templates/manifests/machineconfigserver/kube-apiserver-serving-ca-configmap.yaml");

/// On-prem static pods and their runtime config templates
pub static ON_PREM_COREDNS: &str = include_str!("../../templates/manifests/on-prem/coredns.yaml");
pub static ON_PREM_COREFILE: &str = include_str!("../../templates/manifests/on-prem/coredns-corefile.tmpl");
pub static ON_PREM_KEEPALIVED: &str = include_str!("../../templates/manifests/on-prem/keepalived.yaml");
pub static ON_PREM_KEEPALIVED_CONF: &str = include_str!("../../templates/manifests/on-prem/keepalived.conf.tmpl");

/// All embedded templates as (name, content) pairs.
pub const EMBEDDED_TEMPLATES: &[(&str, &str)] = &[
  ("manifests/machineconfigcontroller/controllerconfig.yaml", CONTROLLER_CONFIG),
  ("manifests/master.machineconfigpool.yaml", MASTER_POOL),
  ("manifests/worker.machineconfigpool.yaml", WORKER_POOL),
  ("manifests/bootstrap-pod-v2.yaml", BOOTSTRAP_POD),
  ("manifests/machineconfigserver/csr-bootstrap-role-binding.yaml", CSR_ROLE_BINDING),
  (
    "manifests/machineconfigserver/kube-apiserver-serving-ca-configmap.yaml",
    SERVING_CA_CONFIGMAP,
  ),
  ("manifests/on-prem/coredns.yaml", ON_PREM_COREDNS),
  ("manifests/on-prem/coredns-corefile.tmpl", ON_PREM_COREFILE),
  ("manifests/on-prem/keepalived.yaml", ON_PREM_KEEPALIVED),
  ("manifests/on-prem/keepalived.conf.tmpl", ON_PREM_KEEPALIVED_CONF),
];
