mod apply;
mod clear;
mod plan;
mod script;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

pub use apply::cmd_apply;
pub use clear::cmd_clear;
pub use plan::cmd_plan;
pub use script::{ScriptArgs, cmd_script};

/// Canonicalize the package root so errors name absolute paths.
fn package_root(path: &Path) -> Result<PathBuf> {
  let root =
    dunce::canonicalize(path).with_context(|| format!("Package directory not found: {}", path.display()))?;
  debug!(root = %root.display(), "package root");
  Ok(root)
}
