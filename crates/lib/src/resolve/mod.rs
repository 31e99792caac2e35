//! Export map resolution.
//!
//! Turns an [`ExportMap`] into the list of filesystem shims that make every
//! declared subpath reachable through plain path lookup. Resolution is pure:
//! it never touches the filesystem, so the same [`Resolution`] can drive the
//! eager materializer or be encoded into a deferred install script.
//!
//! # Ordering
//!
//! Subpaths are processed in descending lexicographic order. Every subpath
//! nested under `./a/` sorts after `./a`, so by the time `./a` is reached all
//! deeper exports have been resolved and the resolver knows whether `./a` has
//! to become a directory. In that case `./a` is redirected through
//! `./a/index.js` instead of `./a.js`.

mod conditions;
mod subpath;

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::consts::ENTRY_EXT;
use crate::manifest::{ExportMap, ROOT_SUBPATH};
use crate::util::path;

pub use conditions::select_target;
pub use subpath::{Pattern, Unsupported, classify};

/// Kind of filesystem entry an action creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShimKind {
  /// A small module forwarding to the target file.
  RedirectFile,
  /// A symlink (or junction on Windows) to the target directory.
  SymlinkOrJunction,
}

/// One shim to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAction {
  /// Subpath key as declared in the export map.
  pub subpath: String,
  /// Package-relative path of the created entry (`./foo.js`, `./a/index.js`, `./baz`).
  pub entry: String,
  pub kind: ShimKind,
  /// Target selected from the export map, as declared.
  pub target: String,
  /// Target relative to the entry's directory, as written into the shim.
  pub link_target: String,
}

/// Why an export produced no shim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
  /// No condition applies, or the subpath is excluded with `null`.
  NoTarget,
  /// The subpath or target shape cannot be shimmed.
  Unsupported(String),
  /// A directory export whose link path must be a real directory for deeper exports.
  CollidesWithDeeperExports,
  /// Another export already produced the same entry.
  DuplicateEntry(String),
}

impl fmt::Display for SkipReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::NoTarget => f.write_str("no usable target"),
      Self::Unsupported(reason) => f.write_str(reason),
      Self::CollidesWithDeeperExports => f.write_str("directory export collides with deeper exports"),
      Self::DuplicateEntry(entry) => write!(f, "entry {entry} already produced by another export"),
    }
  }
}

/// An export that was left out of the resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedExport {
  pub subpath: String,
  pub reason: SkipReason,
}

/// Result of resolving an export map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
  /// Directories to create before any entry, in ascending order.
  pub prerequisite_dirs: BTreeSet<String>,
  /// Shims in processing order.
  pub actions: Vec<ResolvedAction>,
  /// Exports that produced no shim, in processing order.
  pub skipped: Vec<SkippedExport>,
}

impl Resolution {
  pub fn is_empty(&self) -> bool {
    self.actions.is_empty()
  }

  pub fn len(&self) -> usize {
    self.actions.len()
  }

  fn skip(&mut self, subpath: &str, reason: SkipReason) {
    self.skipped.push(SkippedExport {
      subpath: subpath.to_string(),
      reason,
    });
  }
}

/// Record `dir` and its ancestors up to, but excluding, the package root.
fn record_ancestors(dirs: &mut BTreeSet<String>, dir: &str) {
  let mut dir = dir.to_string();
  while dir != ROOT_SUBPATH && dirs.insert(dir.clone()) {
    dir = path::dirname(&dir);
  }
}

/// Resolve an export map into prerequisite directories and shim actions.
pub fn resolve(exports: &ExportMap) -> Resolution {
  let mut resolution = Resolution::default();
  let mut entries: HashSet<String> = HashSet::new();

  for (subpath, spec) in exports.iter_descending() {
    if subpath == ROOT_SUBPATH {
      trace!("skipping root entry");
      continue;
    }

    let Some(target) = select_target(spec) else {
      debug!(subpath, "no usable target, skipping");
      resolution.skip(subpath, SkipReason::NoTarget);
      continue;
    };

    let pattern = match classify(subpath, target) {
      Ok(pattern) => pattern,
      Err(reason) => {
        warn!(subpath, target, %reason, "unsupported export, skipping");
        resolution.skip(subpath, SkipReason::Unsupported(reason.to_string()));
        continue;
      }
    };

    let action = match pattern {
      Pattern::Directory { entry, target_dir } => {
        if resolution.prerequisite_dirs.contains(&entry) {
          warn!(subpath, entry = %entry, "directory export collides with deeper exports, skipping");
          resolution.skip(subpath, SkipReason::CollidesWithDeeperExports);
          continue;
        }
        let parent = path::dirname(&entry);
        let link_target = path::dot_prefixed(&path::relative(&parent, &target_dir));
        ResolvedAction {
          subpath: subpath.to_string(),
          entry,
          kind: ShimKind::SymlinkOrJunction,
          target: target.to_string(),
          link_target,
        }
      }
      Pattern::File { base } => {
        let link_target = path::dot_prefixed(&path::relative(&path::dirname(&base), target));
        let (entry, link_target) = if resolution.prerequisite_dirs.contains(&base) {
          (path::join(&base, &format!("index{ENTRY_EXT}")), path::one_level_up(&link_target))
        } else {
          (format!("{base}{ENTRY_EXT}"), link_target)
        };
        ResolvedAction {
          subpath: subpath.to_string(),
          entry,
          kind: ShimKind::RedirectFile,
          target: target.to_string(),
          link_target,
        }
      }
    };

    if !entries.insert(action.entry.clone()) {
      warn!(subpath, entry = %action.entry, "entry already produced by another export, skipping");
      resolution.skip(subpath, SkipReason::DuplicateEntry(action.entry));
      continue;
    }

    record_ancestors(&mut resolution.prerequisite_dirs, &path::dirname(&action.entry));

    trace!(
      subpath,
      entry = %action.entry,
      link_target = %action.link_target,
      kind = ?action.kind,
      "resolved export"
    );
    resolution.actions.push(action);
  }

  debug!(
    actions = resolution.actions.len(),
    dirs = resolution.prerequisite_dirs.len(),
    "resolved export map"
  );

  resolution
}
