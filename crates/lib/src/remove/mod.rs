//! Removal of previously materialized shims.
//!
//! Removal is speculative: it checks every place a shim for a subpath could
//! live, deletes what it finds and quietly skips the rest, so running it twice
//! or on a package that was never materialized is harmless.

use std::fs;
use std::path::Path;

use tracing::{debug, info, trace};

use crate::consts::ENTRY_EXT;
use crate::manifest::{ExportMap, ManifestError, ROOT_SUBPATH, load_export_map};
use crate::materialize::{declaration_entry, link};
use crate::resolve::{Pattern, classify, select_target};
use crate::util::path;

/// Remove a shim file if it is a regular file or a symlink.
fn remove_file_entry(root: &Path, rel: &str, removed: &mut Vec<String>) -> bool {
  let abs = path::under(root, rel);
  let Ok(meta) = abs.symlink_metadata() else {
    return false;
  };
  if !(meta.is_file() || meta.file_type().is_symlink()) {
    return false;
  }
  match fs::remove_file(&abs) {
    Ok(()) => {
      removed.push(rel.to_string());
      true
    }
    Err(e) => {
      debug!(path = %abs.display(), error = %e, "failed to remove shim file");
      false
    }
  }
}

/// Remove a redirect file and its declaration file.
fn remove_redirect(root: &Path, entry: &str, removed: &mut Vec<String>) -> bool {
  let found = remove_file_entry(root, entry, removed);
  remove_file_entry(root, &declaration_entry(entry), removed);
  found
}

/// Remove `dir` and its ancestors while they are empty, stopping at the root.
fn prune_empty_dirs(root: &Path, dir: &str) {
  let mut dir = dir.to_string();
  while dir != ROOT_SUBPATH && !dir.is_empty() {
    let abs = path::under(root, &dir);
    if fs::remove_dir(&abs).is_err() {
      trace!(dir = %dir, "directory not removed");
      return;
    }
    debug!(dir = %dir, "removed empty directory");
    dir = path::dirname(&dir);
  }
}

/// Delete every shim materialized for `exports` under `root`.
///
/// Returns the package-relative paths that were removed.
pub fn remove(root: &Path, exports: &ExportMap) -> Vec<String> {
  let mut removed = Vec::new();

  for (subpath, spec) in exports.iter_descending() {
    if subpath == ROOT_SUBPATH {
      continue;
    }

    // Entries the resolver never shims have nothing to remove
    let Some(target) = select_target(spec) else {
      continue;
    };
    let Ok(pattern) = classify(subpath, target) else {
      continue;
    };

    match pattern {
      Pattern::Directory { entry, .. } => {
        let abs = path::under(root, &entry);
        if link::is_link(&abs) {
          match link::remove_link(&abs) {
            Ok(()) => removed.push(entry.clone()),
            Err(e) => debug!(error = %e, "failed to remove link"),
          }
        }
        prune_empty_dirs(root, &path::dirname(&entry));
      }
      Pattern::File { base } => {
        let base_abs = path::under(root, &base);
        let is_real_dir = base_abs
          .symlink_metadata()
          .map(|m| m.is_dir())
          .unwrap_or(false);
        if is_real_dir && remove_redirect(root, &path::join(&base, &format!("index{ENTRY_EXT}")), &mut removed) {
          prune_empty_dirs(root, &base);
        }
        remove_redirect(root, &format!("{base}{ENTRY_EXT}"), &mut removed);
        prune_empty_dirs(root, &path::dirname(&base));
      }
    }
  }

  info!(root = %root.display(), removed = removed.len(), "removed export shims");
  removed
}

/// Load the manifest at `root` and remove its shims.
pub fn clear_package(root: &Path) -> Result<Vec<String>, ManifestError> {
  let exports = load_export_map(root)?;
  Ok(remove(root, &exports))
}
