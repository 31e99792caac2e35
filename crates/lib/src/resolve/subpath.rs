//! Subpath pattern classification.

use std::fmt;

use crate::manifest::ROOT_SUBPATH;
use crate::util::path;

/// How a subpath gets materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
  /// Plain subpath backed by one file; `base` is the normalized subpath.
  File { base: String },
  /// Whole directory (trailing `/` or `<dir>/*`) backed by one link.
  Directory { entry: String, target_dir: String },
}

/// Why a subpath produces no action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unsupported {
  Root,
  /// Key does not start with `./` or climbs out of the package.
  OutsidePackage,
  /// Target is absolute, climbs out of the package or names its root.
  TargetOutsidePackage,
  /// Wildcard shape other than `<dir>/*` -> `<dir>/*[.<ext>]`.
  Wildcard,
  /// Directory key with a file target or the other way around.
  ShapeMismatch,
}

impl fmt::Display for Unsupported {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let msg = match self {
      Self::Root => "root entry",
      Self::OutsidePackage => "subpath outside the package root",
      Self::TargetOutsidePackage => "target outside the package root",
      Self::Wildcard => "only whole-directory wildcards are supported",
      Self::ShapeMismatch => "subpath and target disagree on file vs directory",
    };
    f.write_str(msg)
  }
}

/// Directory part of a whole-directory wildcard target (`<dir>/*` or `<dir>/*.<ext>`).
fn wildcard_target_dir(target: &str) -> Option<&str> {
  let (dir, rest) = target.rsplit_once("/*")?;
  if dir.contains('*') {
    return None;
  }
  match rest {
    "" => Some(dir),
    ext if ext.starts_with('.') && ext.len() > 1 && !ext.contains(['/', '*']) => Some(dir),
    _ => None,
  }
}

/// Classify a subpath key against its selected target.
pub fn classify(subpath: &str, target: &str) -> Result<Pattern, Unsupported> {
  if subpath == ROOT_SUBPATH {
    return Err(Unsupported::Root);
  }
  if !subpath.starts_with("./") {
    return Err(Unsupported::OutsidePackage);
  }

  let normalized = |p: &str| match path::normalize(p) {
    Some(n) if n != "." => Ok(n),
    _ => Err(Unsupported::OutsidePackage),
  };
  let inside_package = |t: &str| match path::normalize(t) {
    Some(n) if n != "." => Ok(()),
    _ => Err(Unsupported::TargetOutsidePackage),
  };

  if subpath.contains('*') {
    let key_dir = subpath.strip_suffix("/*").ok_or(Unsupported::Wildcard)?;
    if key_dir.contains('*') {
      return Err(Unsupported::Wildcard);
    }
    let target_dir = wildcard_target_dir(target).ok_or(Unsupported::Wildcard)?;
    inside_package(target_dir)?;
    return Ok(Pattern::Directory {
      entry: normalized(key_dir)?,
      target_dir: target_dir.to_string(),
    });
  }

  if target.contains('*') {
    return Err(Unsupported::Wildcard);
  }

  if subpath.ends_with('/') {
    if !target.ends_with('/') {
      return Err(Unsupported::ShapeMismatch);
    }
    inside_package(target)?;
    return Ok(Pattern::Directory {
      entry: normalized(subpath)?,
      target_dir: target.trim_end_matches('/').to_string(),
    });
  }

  if target.ends_with('/') {
    return Err(Unsupported::ShapeMismatch);
  }
  inside_package(target)?;

  Ok(Pattern::File {
    base: normalized(subpath)?,
  })
}
