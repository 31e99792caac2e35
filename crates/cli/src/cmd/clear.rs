//! Implementation of the `exports-shim clear` command.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use exports_shim_lib::remove::clear_package;

use crate::output::{OutputFormat, print_info, print_json, print_line, print_success, symbols};

#[derive(Serialize)]
struct ClearOutput<'a> {
  root: String,
  removed: &'a [String],
}

pub fn cmd_clear(path: &Path, format: OutputFormat) -> Result<()> {
  let root = super::package_root(path)?;
  let removed = clear_package(&root)?;

  if format.is_json() {
    return print_json(&ClearOutput {
      root: root.display().to_string(),
      removed: &removed,
    });
  }

  if removed.is_empty() {
    print_info("No export shims found");
    return Ok(());
  }

  print_success(&format!("Removed {} export shim(s):", removed.len()));
  for entry in &removed {
    print_line(symbols::REMOVE, entry);
  }

  Ok(())
}
