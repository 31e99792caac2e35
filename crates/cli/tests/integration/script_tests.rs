//! Script command integration tests.

use predicates::prelude::*;

use super::common::{MIXED_MANIFEST, TestEnv};

#[test]
fn script_writes_default_file() {
  let env = TestEnv::with_manifest(MIXED_MANIFEST);

  env
    .cmd()
    .arg("script")
    .assert()
    .success()
    .stdout(predicate::str::contains("polyfill-exports.js"));

  let script = env.read_file("polyfill-exports.js");
  assert!(script.starts_with("#!/usr/bin/env node\n"));
  assert!(script.contains("node_modules"));
  assert!(script.contains(r#"redirect("./foo.js", "module.exports = require('./lib/foo.js');\n");"#));
  assert!(script.contains(r#"link("./lib/baz", "./baz");"#));
}

#[cfg(unix)]
#[test]
fn script_is_executable() {
  use std::os::unix::fs::PermissionsExt;

  let env = TestEnv::with_manifest(MIXED_MANIFEST);
  env.cmd().arg("script").assert().success();

  let mode = std::fs::metadata(env.path("polyfill-exports.js")).unwrap().permissions().mode();
  assert_eq!(mode & 0o777, 0o775);
}

#[test]
fn script_custom_file() {
  let env = TestEnv::with_manifest(MIXED_MANIFEST);

  env
    .cmd()
    .args(["script", "--file", "scripts/shim.js"])
    .assert()
    .success();

  assert!(env.exists("scripts/shim.js"));
  assert!(!env.exists("polyfill-exports.js"));
}

#[test]
fn script_without_module_guard() {
  let env = TestEnv::with_manifest(MIXED_MANIFEST);

  env.cmd().args(["script", "--no-module-only"]).assert().success();

  assert!(!env.read_file("polyfill-exports.js").contains("process.exit"));
}

#[test]
fn script_skipped_without_actions() {
  let env = TestEnv::with_manifest(r#"{"exports": {".": "./lib/index.js"}}"#);

  env
    .cmd()
    .arg("script")
    .assert()
    .success()
    .stdout(predicate::str::contains("script not written"));

  assert!(!env.exists("polyfill-exports.js"));
}

#[test]
fn script_delete() {
  let env = TestEnv::with_manifest(MIXED_MANIFEST);
  env.cmd().arg("script").assert().success();

  env
    .cmd()
    .args(["script", "--delete"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Deleted"));

  assert!(!env.exists("polyfill-exports.js"));
}

#[test]
fn script_delete_missing_file() {
  let env = TestEnv::with_manifest(MIXED_MANIFEST);

  env
    .cmd()
    .args(["script", "--delete"])
    .assert()
    .success()
    .stdout(predicate::str::contains("does not exist"));
}

#[test]
fn script_json_output() {
  let env = TestEnv::with_manifest(MIXED_MANIFEST);

  env
    .cmd()
    .args(["--format", "json", "script"])
    .assert()
    .success()
    .stdout(predicate::str::contains(r#""status": "written""#));
}
