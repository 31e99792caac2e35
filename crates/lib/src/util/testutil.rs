//! Test utilities for exports-shim-lib.
//!
//! Helpers for laying out throwaway packages and comparing directory trees.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::consts::MANIFEST_FILE;

/// Write `package.json` into a package root.
pub fn write_manifest(root: &Path, content: &str) {
  fs::write(root.join(MANIFEST_FILE), content).unwrap();
}

/// List every entry under `root` with a kind marker, sorted.
///
/// Links are listed but not followed, so the snapshot only covers what lives
/// in the package tree itself.
pub fn snapshot_tree(root: &Path) -> Vec<String> {
  let mut entries: Vec<String> = WalkDir::new(root)
    .min_depth(1)
    .follow_links(false)
    .into_iter()
    .map(|entry| {
      let entry = entry.unwrap();
      let rel = entry.path().strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/");
      let kind = if entry.path_is_symlink() {
        "link"
      } else if entry.file_type().is_dir() {
        "dir"
      } else {
        "file"
      };
      format!("{kind} {rel}")
    })
    .collect();
  entries.sort();
  entries
}
