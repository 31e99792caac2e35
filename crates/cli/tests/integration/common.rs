//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Manifest mixing every supported export shape.
pub const MIXED_MANIFEST: &str = r#"{
  "name": "fixture",
  "exports": {
    ".": "./lib/index.js",
    "./foo": "./lib/foo.js",
    "./really/deep/bar": "./lib/really/deep/bar.js",
    "./baz/": "./lib/baz/"
  }
}"#;

/// Isolated package directory.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create an empty test environment.
  pub fn empty() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Create a package with the given `package.json` content.
  pub fn with_manifest(content: &str) -> Self {
    let env = Self::empty();
    env.write_file("package.json", content);
    env
  }

  /// Canonical package root.
  pub fn root(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap()
  }

  /// Path of a package-relative entry.
  pub fn path(&self, relative_path: &str) -> PathBuf {
    self.root().join(relative_path)
  }

  /// Write a file relative to the package root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn read_file(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.path(relative_path)).unwrap()
  }

  pub fn exists(&self, relative_path: &str) -> bool {
    let path = self.path(relative_path);
    path.symlink_metadata().is_ok()
  }

  /// Get a Command for the binary, run from the package root.
  pub fn cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("exports-shim");
    cmd.current_dir(self.temp.path());
    cmd.env_remove("RUST_LOG");
    cmd
  }
}

/// Whether `path` is a symlink.
pub fn is_symlink(path: &Path) -> bool {
  path.symlink_metadata().map(|m| m.file_type().is_symlink()).unwrap_or(false)
}
