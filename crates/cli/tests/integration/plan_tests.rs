//! Plan command integration tests.

use predicates::prelude::*;

use super::common::{MIXED_MANIFEST, TestEnv};

#[test]
fn plan_lists_directories_and_shims() {
  let env = TestEnv::with_manifest(MIXED_MANIFEST);

  env
    .cmd()
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("./really/deep"))
    .stdout(predicate::str::contains("[link] ./baz"))
    .stdout(predicate::str::contains("../../lib/really/deep/bar.js"));
}

#[test]
fn plan_does_not_touch_the_package() {
  let env = TestEnv::with_manifest(MIXED_MANIFEST);

  env.cmd().arg("plan").assert().success();

  assert!(!env.exists("foo.js"));
  assert!(!env.exists("really"));
}

#[test]
fn plan_json_output() {
  let env = TestEnv::with_manifest(r#"{"exports": {"./a": "./lib/a/index.js", "./a/b": "./lib/a/b/index.js"}}"#);

  env
    .cmd()
    .args(["--format", "json", "plan"])
    .assert()
    .success()
    .stdout(predicate::str::contains(r#""prerequisite_dirs""#))
    .stdout(predicate::str::contains(r#""entry": "./a/index.js""#))
    .stdout(predicate::str::contains(r#""kind": "redirect_file""#));
}

#[test]
fn plan_with_only_root_export() {
  let env = TestEnv::with_manifest(r#"{"exports": "./lib/index.js"}"#);

  env
    .cmd()
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("No export shims needed"));
}

#[test]
fn plan_lists_skipped_exports() {
  let env = TestEnv::with_manifest(
    r#"{"exports": {"./x/": "./lib/x/", "./x/y": "./lib/x/y.js", "./esm": {"import": "./lib/esm.mjs"}}}"#,
  );

  env
    .cmd()
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("Skipped:"))
    .stdout(predicate::str::contains("./x/ (directory export collides with deeper exports)"))
    .stdout(predicate::str::contains("./esm (no usable target)"));
}

#[test]
fn plan_lists_skipped_exports_when_nothing_is_shimmed() {
  let env = TestEnv::with_manifest(r#"{"exports": {"./up": "../outside.js"}}"#);

  env
    .cmd()
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("No export shims needed"))
    .stdout(predicate::str::contains("./up (target outside the package root)"));
}
