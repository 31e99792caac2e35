//! Host platform queries.

use std::path::{Component, Path};

use crate::consts::INSTALL_MARKER;

/// Whether the package at `root` sits inside an installed dependency tree.
///
/// True when any component of the canonical path is `node_modules`. A root
/// that cannot be canonicalized is checked as given.
pub fn is_installed_dependency(root: &Path) -> bool {
  let resolved = dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
  resolved
    .components()
    .any(|c| matches!(c, Component::Normal(name) if name == INSTALL_MARKER))
}
