//! Lexical POSIX path helpers for package-relative paths.
//!
//! Export maps always use `/` separators regardless of the host OS, so these
//! helpers work on strings and never touch the filesystem. Paths handed out
//! are package-relative and `./`-prefixed (`"./a/b"`), with `"."` standing for
//! the package root.

use std::path::{Path, PathBuf};

/// Split a path into normalized segments, dropping `.` and folding `..`.
///
/// Returns `None` if the path climbs above its starting point or is absolute.
fn segments(path: &str) -> Option<Vec<&str>> {
  if path.starts_with('/') {
    return None;
  }

  let mut out: Vec<&str> = Vec::new();
  for seg in path.split('/') {
    match seg {
      "" | "." => {}
      ".." => {
        out.pop()?;
      }
      s => out.push(s),
    }
  }
  Some(out)
}

fn from_segments(segs: &[&str]) -> String {
  if segs.is_empty() {
    ".".to_string()
  } else {
    format!("./{}", segs.join("/"))
  }
}

/// Normalize a package-relative path to `./a/b` form.
///
/// Returns `None` for absolute paths and paths escaping the package root.
pub fn normalize(path: &str) -> Option<String> {
  segments(path).map(|s| from_segments(&s))
}

/// Parent directory of a normalized path; `"."` for top-level entries.
pub fn dirname(path: &str) -> String {
  let trimmed = path.trim_end_matches('/');
  match trimmed.rfind('/') {
    Some(0) => "/".to_string(),
    Some(idx) => trimmed[..idx].to_string(),
    None => ".".to_string(),
  }
}

/// Join a normalized directory and a relative child.
pub fn join(dir: &str, child: &str) -> String {
  if dir == "." {
    format!("./{}", child)
  } else {
    format!("{}/{}", dir.trim_end_matches('/'), child)
  }
}

/// Shortest relative path from directory `from` to `to`.
///
/// Both paths are package-relative. Mirrors POSIX `relative` semantics: an
/// empty result means both are the same location.
pub fn relative(from: &str, to: &str) -> String {
  let from_segs = segments(from).unwrap_or_default();
  let to_segs = segments(to).unwrap_or_default();

  let common = from_segs.iter().zip(&to_segs).take_while(|(a, b)| a == b).count();

  let mut parts: Vec<&str> = vec![".."; from_segs.len() - common];
  parts.extend_from_slice(&to_segs[common..]);
  parts.join("/")
}

/// Mark a relative path explicitly so it is never read as a bare name.
pub fn dot_prefixed(rel: &str) -> String {
  if rel.is_empty() {
    ".".to_string()
  } else if rel == "." || rel == ".." || rel.starts_with("./") || rel.starts_with("../") {
    rel.to_string()
  } else {
    format!("./{}", rel)
  }
}

/// Add one `..` in front of a relative path, for a file moved one directory deeper.
pub fn one_level_up(rel: &str) -> String {
  format!("../{}", rel.strip_prefix("./").unwrap_or(rel))
}

/// Strip the extension from the last segment (`./lib/foo.js` -> `./lib/foo`).
pub fn strip_extension(path: &str) -> &str {
  let name_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
  match path[name_start..].rfind('.') {
    Some(0) | None => path,
    Some(dot) => &path[..name_start + dot],
  }
}

/// Native path of a package-relative path under `root`.
pub fn under(root: &Path, rel: &str) -> PathBuf {
  let mut out = root.to_path_buf();
  for seg in rel.split('/').filter(|s| !s.is_empty() && *s != ".") {
    out.push(seg);
  }
  out
}
