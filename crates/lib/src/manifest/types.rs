//! Export map types.
//!
//! An export map is the `exports` field of a package manifest: an ordered
//! mapping from public subpaths (`"./foo"`, `"./baz/"`, `"./bar/*"`) to target
//! specifications. Targets are either literal paths or condition objects keyed
//! by environment (`require`, `node`, `default`, ...), possibly nested, or
//! fallback arrays.

use serde_json::Value;

/// Key of the package main entry, never shimmed.
pub const ROOT_SUBPATH: &str = ".";

/// What a subpath points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
  /// A literal package-relative path.
  Path(String),
  /// Condition name to nested target, in declaration order.
  Conditions(Vec<(String, TargetSpec)>),
  /// Alternatives tried in order.
  Fallbacks(Vec<TargetSpec>),
  /// `null` or any value that cannot name a target.
  Excluded,
}

impl TargetSpec {
  /// Convert a raw JSON value from the manifest.
  pub fn from_value(value: &Value) -> Self {
    match value {
      Value::String(path) => Self::Path(path.clone()),
      Value::Object(map) => Self::Conditions(map.iter().map(|(k, v)| (k.clone(), Self::from_value(v))).collect()),
      Value::Array(items) => Self::Fallbacks(items.iter().map(Self::from_value).collect()),
      _ => Self::Excluded,
    }
  }

  /// Look up a condition branch by name.
  pub fn condition(&self, name: &str) -> Option<&TargetSpec> {
    match self {
      Self::Conditions(branches) => branches.iter().find(|(k, _)| k == name).map(|(_, v)| v),
      _ => None,
    }
  }
}

impl From<&str> for TargetSpec {
  fn from(path: &str) -> Self {
    Self::Path(path.to_string())
  }
}

/// Ordered subpath export map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportMap {
  entries: Vec<(String, TargetSpec)>,
}

impl ExportMap {
  /// Create an empty export map.
  pub fn new() -> Self {
    Self::default()
  }

  /// Build an export map from the raw `exports` field.
  ///
  /// A string, an array, or an object whose keys are conditions rather than
  /// subpaths only describes the `"."` entry, so it yields an empty map.
  pub fn from_value(value: &Value) -> Self {
    let Value::Object(map) = value else {
      return Self::new();
    };

    if !map.keys().any(|k| k.starts_with('.')) {
      return Self::new();
    }

    map
      .iter()
      .filter(|(k, _)| k.starts_with('.'))
      .map(|(k, v)| (k.clone(), TargetSpec::from_value(v)))
      .collect()
  }

  /// Append an entry, replacing an existing one with the same subpath.
  pub fn insert(&mut self, subpath: impl Into<String>, target: impl Into<TargetSpec>) {
    let subpath = subpath.into();
    let target = target.into();
    match self.entries.iter_mut().find(|(k, _)| *k == subpath) {
      Some(entry) => entry.1 = target,
      None => self.entries.push((subpath, target)),
    }
  }

  /// Entries in declaration order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &TargetSpec)> {
    self.entries.iter().map(|(k, v)| (k.as_str(), v))
  }

  /// Entries in descending subpath order, so deeper paths precede their parents.
  pub fn iter_descending(&self) -> impl Iterator<Item = (&str, &TargetSpec)> {
    let mut sorted: Vec<_> = self.iter().collect();
    sorted.sort_by(|(a, _), (b, _)| b.cmp(a));
    sorted.into_iter()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl<K: Into<String>> FromIterator<(K, TargetSpec)> for ExportMap {
  fn from_iter<I: IntoIterator<Item = (K, TargetSpec)>>(iter: I) -> Self {
    let mut map = Self::new();
    for (k, v) in iter {
      map.insert(k, v);
    }
    map
  }
}
