//! Directory link primitives.
//!
//! # Cross-Platform
//!
//! - **Unix**: Standard symlinks via `std::os::unix::fs::symlink`, keeping the
//!   relative target so the package tree stays relocatable
//! - **Windows**: Directory symlinks when permitted, otherwise junctions (via
//!   the `junction` crate), which need an absolute target

use std::fs;
use std::path::{Path, PathBuf};

use super::MaterializeError;

/// Whether `path` is a symlink or a junction (without following it).
pub fn is_link(path: &Path) -> bool {
  let is_symlink = path
    .symlink_metadata()
    .map(|m| m.file_type().is_symlink())
    .unwrap_or(false);

  #[cfg(windows)]
  {
    is_symlink || junction::exists(path).unwrap_or(false)
  }

  #[cfg(not(windows))]
  {
    is_symlink
  }
}

/// Create a directory link at `link` pointing to the relative `target`.
#[cfg(unix)]
pub fn create_dir_link(target: &Path, link: &Path) -> Result<(), MaterializeError> {
  std::os::unix::fs::symlink(target, link).map_err(|e| MaterializeError::CreateLink {
    target: target.to_path_buf(),
    link: link.to_path_buf(),
    source: e,
  })
}

/// Create a directory link (Windows).
///
/// Tries a directory symlink first (requires developer mode or admin), then a
/// junction.
#[cfg(windows)]
pub fn create_dir_link(target: &Path, link: &Path) -> Result<(), MaterializeError> {
  if std::os::windows::fs::symlink_dir(target, link).is_ok() {
    return Ok(());
  }

  let map_err = |e: std::io::Error| MaterializeError::CreateLink {
    target: target.to_path_buf(),
    link: link.to_path_buf(),
    source: e,
  };

  // Junctions need an absolute target with ".." resolved
  let joined = match link.parent() {
    Some(parent) if target.is_relative() => parent.join(target),
    _ => target.to_path_buf(),
  };
  let absolute_target = joined.canonicalize().map_err(map_err)?;

  junction::create(&absolute_target, link).map_err(map_err)?;

  tracing::debug!(
    target = %absolute_target.display(),
    link = %link.display(),
    "created junction (directory symlinks not available)"
  );

  Ok(())
}

/// Read the target of a symlink or junction.
///
/// Returns `None` if the path is not a link.
pub fn read_dir_link(link: &Path) -> Option<PathBuf> {
  if let Ok(target) = fs::read_link(link) {
    return Some(target);
  }

  #[cfg(windows)]
  if let Ok(target) = junction::get_target(link) {
    return Some(target);
  }

  None
}

/// Remove a symlink or junction without touching what it points to.
pub fn remove_link(path: &Path) -> Result<(), MaterializeError> {
  let removed = fs::remove_file(path);

  // Directory symlinks and junctions are directories to the Windows API
  #[cfg(windows)]
  let removed = removed.or_else(|_| fs::remove_dir(path));

  removed.map_err(|e| MaterializeError::RemoveLink {
    path: path.to_path_buf(),
    source: e,
  })
}
