//! Package manifest loading.
//!
//! Only the parts of `package.json` that drive shim generation are modelled:
//! the package name (for reporting) and the `exports` field, parsed into an
//! ordered [`ExportMap`].

mod types;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::consts::MANIFEST_FILE;

pub use types::*;

/// Errors that can occur while reading a package manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
  /// The manifest is missing or unreadable.
  #[error("failed to read manifest {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The manifest is not valid JSON or has an unexpected shape.
  #[error("failed to parse manifest {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

/// The subset of `package.json` this crate cares about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
  /// Package name, if declared.
  #[serde(default)]
  pub name: Option<String>,
  /// Raw `exports` field, kept as JSON so key order survives.
  #[serde(default)]
  pub exports: Option<serde_json::Value>,
}

impl PackageManifest {
  /// Load `package.json` from the given package root.
  pub fn load(root: &Path) -> Result<Self, ManifestError> {
    let path = manifest_path(root);

    let content = fs::read_to_string(&path).map_err(|e| ManifestError::Read {
      path: path.clone(),
      source: e,
    })?;

    let manifest = Self::parse(&content).map_err(|e| ManifestError::Parse { path: path.clone(), source: e })?;

    debug!(
      path = %path.display(),
      name = manifest.name.as_deref().unwrap_or("<unnamed>"),
      has_exports = manifest.exports.is_some(),
      "loaded manifest"
    );

    Ok(manifest)
  }

  /// Parse manifest JSON text.
  pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(content)
  }

  /// The subpath export map; empty when `exports` is absent or root-only.
  pub fn export_map(&self) -> ExportMap {
    self.exports.as_ref().map(ExportMap::from_value).unwrap_or_default()
  }
}

/// Path of the manifest file inside a package root.
pub fn manifest_path(root: &Path) -> PathBuf {
  root.join(MANIFEST_FILE)
}

/// Load the export map of the package at `root`.
pub fn load_export_map(root: &Path) -> Result<ExportMap, ManifestError> {
  Ok(PackageManifest::load(root)?.export_map())
}
