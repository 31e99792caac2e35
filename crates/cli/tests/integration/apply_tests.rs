//! Apply command integration tests.

use predicates::prelude::*;

use super::common::{MIXED_MANIFEST, TestEnv};

#[test]
fn apply_writes_redirect_files() {
  let env = TestEnv::with_manifest(MIXED_MANIFEST);

  env
    .cmd()
    .arg("apply")
    .assert()
    .success()
    .stdout(predicate::str::contains("Created 3 export shim(s)"))
    .stdout(predicate::str::contains("./foo.js"))
    .stdout(predicate::str::contains("version control"));

  assert_eq!(env.read_file("foo.js"), "module.exports = require('./lib/foo.js');\n");
  assert_eq!(
    env.read_file("really/deep/bar.js"),
    "module.exports = require('../../lib/really/deep/bar.js');\n"
  );
  assert!(!env.exists("index.js"));
}

#[cfg(unix)]
#[test]
fn apply_links_directory_exports() {
  let env = TestEnv::with_manifest(MIXED_MANIFEST);

  env.cmd().arg("apply").assert().success();

  let link = env.path("baz");
  assert!(super::common::is_symlink(&link));
  assert_eq!(std::fs::read_link(&link).unwrap(), std::path::PathBuf::from("./lib/baz"));
}

#[test]
fn apply_accepts_explicit_path() {
  let env = TestEnv::with_manifest(r#"{"exports": {"./foo": "./lib/foo.js"}}"#);

  env
    .cmd()
    .current_dir(std::env::temp_dir())
    .arg("apply")
    .arg(env.root())
    .assert()
    .success();

  assert!(env.exists("foo.js"));
}

#[test]
fn apply_is_idempotent() {
  let env = TestEnv::with_manifest(MIXED_MANIFEST);

  env.cmd().arg("apply").assert().success();
  env
    .cmd()
    .arg("apply")
    .assert()
    .success()
    .stdout(predicate::str::contains("Created 3 export shim(s)"));
}

#[test]
fn apply_writes_declarations() {
  let env = TestEnv::with_manifest(r#"{"exports": {"./foo": "./lib/foo.js"}}"#);

  env.cmd().args(["apply", "--ts-declaration"]).assert().success();

  assert_eq!(
    env.read_file("foo.d.ts"),
    "export * from './lib/foo';\nexport { default } from './lib/foo';\n"
  );
}

#[test]
fn apply_module_only_outside_node_modules_does_nothing() {
  let env = TestEnv::with_manifest(MIXED_MANIFEST);

  env
    .cmd()
    .args(["apply", "--module-only"])
    .assert()
    .success()
    .stdout(predicate::str::contains("No export shims to create"));

  assert!(!env.exists("foo.js"));
}

#[test]
fn apply_module_only_inside_node_modules() {
  let env = TestEnv::empty();
  env.write_file(
    "node_modules/pkg/package.json",
    r#"{"exports": {"./foo": "./lib/foo.js"}}"#,
  );

  env
    .cmd()
    .args(["apply", "--module-only", "node_modules/pkg"])
    .assert()
    .success();

  assert!(env.exists("node_modules/pkg/foo.js"));
}

#[test]
fn apply_json_output() {
  let env = TestEnv::with_manifest(r#"{"exports": {"./foo": "./lib/foo.js"}}"#);

  env
    .cmd()
    .args(["--format", "json", "apply"])
    .assert()
    .success()
    .stdout(predicate::str::contains(r#""entry": "./foo.js""#))
    .stdout(predicate::str::contains(r#""target": "./lib/foo.js""#));
}

#[test]
fn apply_without_exports_is_a_noop() {
  let env = TestEnv::with_manifest(r#"{"name": "plain"}"#);

  env
    .cmd()
    .arg("apply")
    .assert()
    .success()
    .stdout(predicate::str::contains("No export shims to create"));
}

#[test]
fn apply_fails_on_conflicting_directory() {
  let env = TestEnv::with_manifest(r#"{"exports": {"./baz/": "./lib/baz/"}}"#);
  env.write_file("baz/keep.txt", "mine");

  env
    .cmd()
    .arg("apply")
    .assert()
    .failure()
    .stderr(predicate::str::contains("already exists and is not a symbolic link"));

  assert_eq!(env.read_file("baz/keep.txt"), "mine");
}

#[test]
fn apply_fails_without_manifest() {
  let env = TestEnv::empty();

  env
    .cmd()
    .arg("apply")
    .assert()
    .failure()
    .stderr(predicate::str::contains("package.json"));
}

#[test]
fn apply_fails_on_malformed_manifest() {
  let env = TestEnv::with_manifest("{ not json");

  env.cmd().arg("apply").assert().failure();
}

#[test]
fn apply_fails_on_missing_directory() {
  let env = TestEnv::empty();

  env
    .cmd()
    .args(["apply", "does-not-exist"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Package directory not found"));
}
