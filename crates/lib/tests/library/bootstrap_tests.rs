//! End-to-end runs of the bootstrap pipeline.

use std::fs;

use mcb_lib::bootstrap::{BootstrapError, prepare};
use mcb_lib::execute::WriteError;
use mcb_lib::observe::NoopObserver;
use mcb_lib::resource::DecodeError;

use super::common::{Fixture, images, tree};

const BASELINE: [&str; 7] = [
  "bootstrap/machineconfigoperator-bootstrap-pod.yaml",
  "bootstrap/manifests/machineconfigcontroller-controllerconfig.yaml",
  "bootstrap/manifests/machineconfigcontroller-pull-secret",
  "bootstrap/manifests/master.machineconfigpool.yaml",
  "bootstrap/manifests/worker.machineconfigpool.yaml",
  "manifests/csr-bootstrap-role-binding.yaml",
  "manifests/kube-apiserver-serving-ca-configmap.yaml",
];

#[test]
fn cloud_platform_writes_exactly_the_baseline() {
  let fixture = Fixture::new();

  let summary = fixture.run().unwrap();

  assert_eq!(tree(&fixture.options.destination_dir), BASELINE);
  assert_eq!(summary.written.len(), 7);
  assert!(summary.platforms.is_empty());
}

#[test]
fn identical_inputs_produce_identical_trees() {
  let first = Fixture::new();
  let second = Fixture::new();

  let a = first.run().unwrap();
  let b = second.run().unwrap();

  assert_eq!(a.digest, b.digest);
  for path in BASELINE {
    assert_eq!(fs::read(first.out(path)).unwrap(), fs::read(second.out(path)).unwrap(), "{path}");
  }
}

#[test]
fn rerun_into_same_destination_is_stable() {
  let fixture = Fixture::new();

  let first = fixture.run().unwrap();
  let second = fixture.run().unwrap();

  assert_eq!(first.digest, second.digest);
}

#[test]
fn digest_ignores_files_already_in_destination() {
  let clean = Fixture::new();
  let cluttered = Fixture::new();
  let stray = cluttered.options.destination_dir.join("leftover/notes.txt");
  fs::create_dir_all(stray.parent().unwrap()).unwrap();
  fs::write(&stray, "from an earlier run").unwrap();

  let a = clean.run().unwrap();
  let b = cluttered.run().unwrap();

  assert_eq!(a.digest, b.digest);
  assert!(stray.is_file());
}

#[test]
fn controller_config_carries_merged_spec() {
  let fixture = Fixture::new();
  fixture.run().unwrap();

  let rendered = fs::read_to_string(fixture.out(BASELINE[1])).unwrap();
  let doc: serde_yaml::Value = serde_yaml::from_str(&rendered).unwrap();
  let spec = &doc["spec"];

  assert_eq!(spec["clusterDNSIP"].as_str(), Some("172.30.0.10"));
  assert_eq!(spec["platform"].as_str(), Some("aws"));
  assert_eq!(spec["releaseImage"].as_str(), Some("quay.io/openshift/release:4.6"));
  assert_eq!(spec["osImageURL"].as_str(), Some("quay.io/openshift/os-content@sha256:02"));
  assert_eq!(
    spec["images"]["apiServerWatcherKey"].as_str(),
    Some("quay.io/openshift/mco@sha256:01")
  );
  assert!(spec["pullSecret"].is_null());
}

#[test]
fn root_ca_is_base_then_serving_ca() {
  let fixture = Fixture::new();

  let prepared = prepare(&fixture.options, &images(), &NoopObserver).unwrap();

  assert_eq!(
    prepared.config.controller_config.root_ca_data,
    b"-----BEGIN CERTIFICATE-----\nROOT\n-----END CERTIFICATE-----\n-----BEGIN CERTIFICATE-----\nSERVING\n-----END CERTIFICATE-----\n"
  );
}

#[test]
fn serving_ca_configmap_holds_serving_ca_text() {
  let fixture = Fixture::new();
  fixture.run().unwrap();

  let rendered = fs::read_to_string(fixture.out(BASELINE[6])).unwrap();
  let doc: serde_yaml::Value = serde_yaml::from_str(&rendered).unwrap();

  assert_eq!(
    doc["data"]["ca-bundle.crt"].as_str(),
    Some("-----BEGIN CERTIFICATE-----\nSERVING\n-----END CERTIFICATE-----\n")
  );
}

#[test]
fn trust_bundle_flows_into_spec() {
  let fixture = Fixture::new();
  fixture.write(
    fixture.options.additional_trust_bundle_file.as_ref().unwrap(),
    "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: user-ca-bundle\ndata:\n  ca-bundle.crt: TRUSTED\n",
  );

  let prepared = prepare(&fixture.options, &images(), &NoopObserver).unwrap();

  assert_eq!(prepared.config.controller_config.additional_trust_bundle, b"TRUSTED");
}

#[test]
fn unreadable_trust_bundle_is_fatal() {
  let fixture = Fixture::new();
  // A directory in place of the file is not a "not found" error.
  fs::create_dir(fixture.options.additional_trust_bundle_file.as_ref().unwrap()).unwrap();

  assert!(matches!(fixture.run().unwrap_err(), BootstrapError::Load(_)));
}

#[test]
fn cloud_config_falls_back_to_infrastructure_key() {
  let fixture = Fixture::new();
  let infra = super::common::INFRA_AWS.replace("    name: \"\"", "    name: cloud-provider-config\n    key: config");
  fixture.write(&fixture.options.infra_file, &infra);
  fixture.write(
    fixture.options.cloud_config_file.as_ref().unwrap(),
    "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: cloud-provider-config\ndata:\n  config: \"[Global]\\nzone = a\\n\"\n",
  );

  let prepared = prepare(&fixture.options, &images(), &NoopObserver).unwrap();

  assert_eq!(prepared.config.controller_config.cloud_provider_config, "[Global]\nzone = a\n");
}

#[test]
fn pull_secret_is_written_but_never_in_spec() {
  let fixture = Fixture::new();
  fixture.run().unwrap();

  assert_eq!(
    fs::read_to_string(fixture.out(BASELINE[2])).unwrap(),
    super::common::PULL_SECRET
  );
  let controller_config = fs::read_to_string(fixture.out(BASELINE[1])).unwrap();
  assert!(!controller_config.contains("dXNlcjpwYXNz"));
}

#[test]
fn malformed_infrastructure_writes_nothing() {
  let fixture = Fixture::new();
  fixture.write(&fixture.options.infra_file, "apiVersion: config.openshift.io/v1\nkind: Infrastructure\nstatus: [");

  let err = fixture.run().unwrap_err();

  assert!(matches!(
    err,
    BootstrapError::Decode {
      source: DecodeError::Malformed(_),
      ..
    }
  ));
  assert!(!fixture.options.destination_dir.exists());
}

#[test]
fn infrastructure_file_holding_another_kind_is_a_type_mismatch() {
  let fixture = Fixture::new();
  fixture.write(&fixture.options.infra_file, super::common::DNS);

  let err = fixture.run().unwrap_err();

  assert!(err.to_string().contains("expected Infrastructure found DNS"));
}

#[test]
fn empty_service_network_fails_discovery() {
  let fixture = Fixture::new();
  fixture.write(
    &fixture.options.network_file,
    "apiVersion: config.openshift.io/v1\nkind: Network\nmetadata:\n  name: cluster\nspec:\n  serviceNetwork: []\n",
  );

  assert!(matches!(fixture.run().unwrap_err(), BootstrapError::Discover(_)));
}

#[test]
fn blocked_destination_is_a_write_error() {
  let fixture = Fixture::new();
  fs::create_dir_all(&fixture.options.destination_dir).unwrap();
  fixture.write(&fixture.out("bootstrap"), "in the way");

  let err = fixture.run().unwrap_err();

  assert!(matches!(err, BootstrapError::Write(WriteError::CreateDir { .. })));
}
