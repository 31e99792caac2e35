//! Shim materialization.
//!
//! Two backends consume the same [`Resolution`]:
//! - [`materialize`] creates directories, redirect files and links right away
//! - [`script::build_script`] encodes the same steps into a Node script that
//!   runs later, typically from a package `postinstall` hook
//!
//! # Concurrency
//!
//! No locking is performed. Concurrent runs against the same package root may
//! race: the last writer wins for redirect files, and the symlink collision
//! check can observe a half-finished run.

pub mod link;
pub mod script;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::consts::{DECLARATION_EXT, ENTRY_EXT};
use crate::platform::is_installed_dependency;
use crate::resolve::{ResolvedAction, Resolution, ShimKind};
use crate::util::path;

/// Errors that can occur while materializing shims.
#[derive(Debug, Error)]
pub enum MaterializeError {
  /// A real file or directory occupies a path that must become a link.
  #[error("file {} already exists and is not a symbolic link", path.display())]
  Conflict { path: PathBuf },

  /// Failed to create a prerequisite directory.
  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Failed to write a redirect or declaration file.
  #[error("failed to write file {}: {source}", path.display())]
  WriteFile {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Failed to create a symlink or junction.
  #[error("failed to create link {} -> {}: {source}", link.display(), target.display())]
  CreateLink {
    target: PathBuf,
    link: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Failed to remove a stale link.
  #[error("failed to remove link {}: {source}", path.display())]
  RemoveLink {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Options shared by both materializer backends.
#[derive(Debug, Clone, Default)]
pub struct MaterializeOptions {
  /// Also write a `.d.ts` redirect next to every redirect file.
  pub ts_declaration: bool,
  /// Only act when the package is installed inside `node_modules`.
  pub module_only: bool,
}

/// A shim that was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterializedEntry {
  /// Package-relative path of the created entry.
  pub entry: String,
  /// Target as declared in the export map.
  pub target: String,
}

impl From<&ResolvedAction> for MaterializedEntry {
  fn from(action: &ResolvedAction) -> Self {
    Self {
      entry: action.entry.clone(),
      target: action.target.clone(),
    }
  }
}

/// Quote a string for a single-quoted JavaScript literal.
fn single_quoted(s: &str) -> String {
  let escaped = s.replace('\\', "\\\\").replace('\'', "\\'");
  format!("'{escaped}'")
}

/// Source of a CommonJS module forwarding to `link_target`.
pub fn redirect_source(link_target: &str) -> String {
  format!("module.exports = require({});\n", single_quoted(link_target))
}

/// Source of a type declaration forwarding to the types of `link_target`.
pub fn declaration_source(link_target: &str) -> String {
  let module = single_quoted(path::strip_extension(link_target));
  format!("export * from {module};\nexport {{ default }} from {module};\n")
}

/// Declaration file path paired with a redirect entry (`./foo.js` -> `./foo.d.ts`).
pub fn declaration_entry(entry: &str) -> String {
  let stem = entry.strip_suffix(ENTRY_EXT).unwrap_or(entry);
  format!("{stem}{DECLARATION_EXT}")
}

/// Create a prerequisite directory, replacing a link left by an earlier run.
///
/// A link at `dir` is removed first; any other non-directory is a
/// [`MaterializeError::Conflict`].
fn create_prerequisite_dir(dir: &Path) -> Result<(), MaterializeError> {
  if link::is_link(dir) {
    debug!(dir = %dir.display(), "replacing link with prerequisite directory");
    link::remove_link(dir)?;
  }

  match fs::create_dir(dir) {
    Ok(()) => Ok(()),
    Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
      let is_real_dir = dir.symlink_metadata().map(|m| m.is_dir()).unwrap_or(false);
      if is_real_dir {
        Ok(())
      } else {
        Err(MaterializeError::Conflict {
          path: dir.to_path_buf(),
        })
      }
    }
    Err(e) => Err(MaterializeError::CreateDir {
      path: dir.to_path_buf(),
      source: e,
    }),
  }
}

/// Write a file, replacing a symlink at that path instead of writing through it.
fn write_shim_file(path: &Path, content: &str) -> Result<(), MaterializeError> {
  if link::is_link(path) {
    link::remove_link(path)?;
  }
  fs::write(path, content).map_err(|e| MaterializeError::WriteFile {
    path: path.to_path_buf(),
    source: e,
  })
}

fn replace_link(link_target: &str, link_path: &Path) -> Result<(), MaterializeError> {
  if link_path.symlink_metadata().is_ok() {
    if !link::is_link(link_path) {
      return Err(MaterializeError::Conflict {
        path: link_path.to_path_buf(),
      });
    }
    debug!(
      link = %link_path.display(),
      old_target = ?link::read_dir_link(link_path),
      "replacing existing link"
    );
    link::remove_link(link_path)?;
  }
  link::create_dir_link(Path::new(link_target), link_path)
}

fn apply_action(root: &Path, action: &ResolvedAction, options: &MaterializeOptions) -> Result<(), MaterializeError> {
  let entry_path = path::under(root, &action.entry);

  match action.kind {
    ShimKind::RedirectFile => {
      write_shim_file(&entry_path, &redirect_source(&action.link_target))?;
      if options.ts_declaration {
        let declaration_path = path::under(root, &declaration_entry(&action.entry));
        write_shim_file(&declaration_path, &declaration_source(&action.link_target))?;
      }
    }
    ShimKind::SymlinkOrJunction => replace_link(&action.link_target, &entry_path)?,
  }

  debug!(
    entry = %action.entry,
    link_target = %action.link_target,
    kind = ?action.kind,
    "materialized shim"
  );
  Ok(())
}

/// Create every shim of `resolution` under the package `root`.
///
/// Prerequisite directories are created first, in sorted order; existing ones
/// are reused. Redirect files overwrite whatever file is there. Links replace
/// existing links, but a real file or directory in the way aborts the run with
/// [`MaterializeError::Conflict`]; entries created before the conflict stay.
///
/// Returns the created `(entry, target)` pairs in action order, or nothing when
/// `module_only` is set and the package is not installed as a dependency.
pub fn materialize(
  root: &Path,
  resolution: &Resolution,
  options: &MaterializeOptions,
) -> Result<Vec<MaterializedEntry>, MaterializeError> {
  if options.module_only && !is_installed_dependency(root) {
    info!(root = %root.display(), "package is not installed as a dependency, skipping");
    return Ok(Vec::new());
  }

  for dir in &resolution.prerequisite_dirs {
    create_prerequisite_dir(&path::under(root, dir))?;
  }

  let mut created = Vec::with_capacity(resolution.actions.len());
  for action in &resolution.actions {
    apply_action(root, action, options)?;
    created.push(MaterializedEntry::from(action));
  }

  info!(root = %root.display(), shims = created.len(), "materialized export shims");
  Ok(created)
}
