//! Clear command integration tests.

use predicates::prelude::*;

use super::common::{MIXED_MANIFEST, TestEnv};

#[test]
fn clear_removes_applied_shims() {
  let env = TestEnv::with_manifest(MIXED_MANIFEST);
  env.cmd().args(["apply", "--ts-declaration"]).assert().success();

  env
    .cmd()
    .arg("clear")
    .assert()
    .success()
    .stdout(predicate::str::contains("Removed"));

  for entry in ["foo.js", "foo.d.ts", "really", "baz"] {
    assert!(!env.exists(entry), "{entry} should be gone");
  }
  assert!(env.exists("package.json"));
}

#[test]
fn clear_keeps_unrelated_files() {
  let env = TestEnv::with_manifest(MIXED_MANIFEST);
  env.cmd().arg("apply").assert().success();
  env.write_file("really/notes.txt", "keep");

  env.cmd().arg("clear").assert().success();

  assert!(!env.exists("really/deep"));
  assert_eq!(env.read_file("really/notes.txt"), "keep");
}

#[test]
fn clear_on_clean_package() {
  let env = TestEnv::with_manifest(MIXED_MANIFEST);

  env
    .cmd()
    .arg("clear")
    .assert()
    .success()
    .stdout(predicate::str::contains("No export shims found"));
}

#[test]
fn clear_json_output() {
  let env = TestEnv::with_manifest(r#"{"exports": {"./foo": "./lib/foo.js"}}"#);
  env.cmd().arg("apply").assert().success();

  env
    .cmd()
    .args(["clear", "--format", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains(r#""removed""#))
    .stdout(predicate::str::contains("./foo.js"));
}
