//! Plan command integration tests.

use predicates::prelude::*;

use super::common::{TestEnv, fixture_path};

#[test]
fn plan_lists_baseline_entries() {
  let env = TestEnv::new();

  env
    .mcb_cmd("plan")
    .arg("--infra-config-file")
    .arg(fixture_path("infrastructure.yaml"))
    .assert()
    .success()
    .stdout(predicate::str::contains("Platform: aws"))
    .stdout(predicate::str::contains("Cluster DNS IP: 172.30.0.10"))
    .stdout(predicate::str::contains("bootstrap/manifests/machineconfigcontroller-pull-secret"))
    .stdout(predicate::str::contains("Would write 7 manifest(s)"));
}

#[test]
fn plan_writes_nothing() {
  let env = TestEnv::new();
  let dest = env.dest_path();

  env
    .mcb_cmd("plan")
    .arg("--infra-config-file")
    .arg(fixture_path("infrastructure.yaml"))
    .arg("--dest-dir")
    .arg(&dest)
    .assert()
    .success();

  assert_eq!(std::fs::read_dir(&dest).unwrap().count(), 0);
}

#[test]
fn plan_json_lists_platform_entries() {
  let env = TestEnv::new();

  let output = env
    .mcb_cmd("plan")
    .arg("--infra-config-file")
    .arg(fixture_path("infrastructure-baremetal.yaml"))
    .arg("--format")
    .arg("json")
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["extensions"], serde_json::json!(["baremetal"]));
  let entries = json["entries"].as_array().unwrap();
  assert_eq!(entries.len(), 11);
  assert_eq!(
    entries[7]["path"].as_str(),
    Some("baremetal/manifests/coredns.yaml")
  );
}

#[test]
fn plan_missing_pull_secret_file_fails() {
  let env = TestEnv::new();
  let infra = fixture_path("infrastructure.yaml");
  let missing = env.temp.path().join("missing.json");

  env
    .mcb_cmd_with(
      "plan",
      &[("--infra-config-file", infra.as_path()), ("--pull-secret", missing.as_path())],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to read"))
    .stderr(predicate::str::contains("missing.json"));
}
