//! Implementation of the `exports-shim script` command.
//!
//! Writes a Node script that creates the export shims when the package is
//! installed, or deletes a previously written one.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use exports_shim_lib::materialize::script::{ScriptConfig, build_package_script};

use crate::output::{OutputFormat, print_info, print_json, print_success};

pub struct ScriptArgs {
  pub path: PathBuf,
  pub file: PathBuf,
  pub ts_declaration: bool,
  pub module_only: bool,
  pub delete: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum ScriptStatus {
  Written,
  Skipped,
  Deleted,
  Absent,
}

#[derive(Serialize)]
struct ScriptOutput {
  file: String,
  status: ScriptStatus,
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
  use std::os::unix::fs::PermissionsExt;
  fs::set_permissions(path, fs::Permissions::from_mode(0o775))
    .with_context(|| format!("Failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
  Ok(())
}

fn delete_script(file: &Path) -> Result<ScriptStatus> {
  match fs::remove_file(file) {
    Ok(()) => Ok(ScriptStatus::Deleted),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ScriptStatus::Absent),
    Err(e) => Err(e).with_context(|| format!("Failed to delete script: {}", file.display())),
  }
}

fn write_script(root: &Path, file: &Path, config: &ScriptConfig) -> Result<ScriptStatus> {
  let Some(content) = build_package_script(root, config)? else {
    return Ok(ScriptStatus::Skipped);
  };

  if let Some(parent) = file.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create directory: {}", parent.display()))?;
  }
  fs::write(file, content).with_context(|| format!("Failed to write script: {}", file.display()))?;
  make_executable(file)?;

  Ok(ScriptStatus::Written)
}

pub fn cmd_script(args: &ScriptArgs, format: OutputFormat) -> Result<()> {
  let root = super::package_root(&args.path)?;
  let file = root.join(&args.file);

  let status = if args.delete {
    delete_script(&file)?
  } else {
    let config = ScriptConfig {
      module_only: args.module_only,
      ts_declaration: args.ts_declaration,
    };
    write_script(&root, &file, &config)?
  };

  if format.is_json() {
    return print_json(&ScriptOutput {
      file: file.display().to_string(),
      status,
    });
  }

  match status {
    ScriptStatus::Written => {
      print_success(&format!("Wrote {}", file.display()));
      print_info("Run it from the package's \"postinstall\" script and publish it with the package");
    }
    ScriptStatus::Skipped => print_info("No export shims needed, script not written"),
    ScriptStatus::Deleted => print_success(&format!("Deleted {}", file.display())),
    ScriptStatus::Absent => print_info(&format!("{} does not exist", file.display())),
  }

  Ok(())
}
