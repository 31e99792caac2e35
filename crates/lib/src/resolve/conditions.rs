//! Condition selection for conditional export targets.

use tracing::trace;

use crate::consts::CONDITION_PRIORITY;
use crate::manifest::TargetSpec;

/// Outcome of walking a target specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection<'a> {
  Found(&'a str),
  /// Explicitly excluded with `null`; stops the search.
  Excluded,
  /// Nothing applicable here; an enclosing object or array may keep looking.
  NoMatch,
}

fn select(spec: &TargetSpec) -> Selection<'_> {
  match spec {
    TargetSpec::Path(path) => Selection::Found(path),
    TargetSpec::Excluded => Selection::Excluded,
    TargetSpec::Conditions(_) => {
      for condition in CONDITION_PRIORITY {
        let Some(branch) = spec.condition(condition) else {
          continue;
        };
        match select(branch) {
          Selection::NoMatch => continue,
          found => {
            trace!(condition, "selected condition");
            return found;
          }
        }
      }
      Selection::NoMatch
    }
    TargetSpec::Fallbacks(items) => items
      .iter()
      .map(select)
      .find(|s| matches!(s, Selection::Found(_)))
      .unwrap_or(Selection::NoMatch),
  }
}

/// Pick the single target path a CommonJS consumer would load.
///
/// Strings are used verbatim. Condition objects are searched in the fixed
/// priority `require`, `node`, `default`, recursing into nested objects;
/// `import` is never chosen. Fallback arrays yield their first usable element.
/// Returns `None` when nothing applies or the subpath is excluded.
pub fn select_target(spec: &TargetSpec) -> Option<&str> {
  match select(spec) {
    Selection::Found(path) => Some(path),
    Selection::Excluded | Selection::NoMatch => None,
  }
}
