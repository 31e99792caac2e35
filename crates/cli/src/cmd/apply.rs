//! Implementation of the `exports-shim apply` command.
//!
//! Resolves the package's export map and creates the shims on disk right away.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use exports_shim_lib::manifest::load_export_map;
use exports_shim_lib::materialize::{MaterializeOptions, MaterializedEntry, materialize};
use exports_shim_lib::resolve::resolve;

use crate::output::{OutputFormat, format_pairs, print_info, print_json, print_line, print_success, symbols};

#[derive(Serialize)]
struct ApplyOutput<'a> {
  root: String,
  created: &'a [MaterializedEntry],
}

pub fn cmd_apply(path: &Path, ts_declaration: bool, module_only: bool, format: OutputFormat) -> Result<()> {
  let root = super::package_root(path)?;

  let exports = load_export_map(&root)?;
  let resolution = resolve(&exports);

  let options = MaterializeOptions {
    ts_declaration,
    module_only,
  };
  let created = materialize(&root, &resolution, &options)
    .with_context(|| format!("Failed to create export shims in {}", root.display()))?;

  if format.is_json() {
    return print_json(&ApplyOutput {
      root: root.display().to_string(),
      created: &created,
    });
  }

  if created.is_empty() {
    print_info("No export shims to create");
    return Ok(());
  }

  print_success(&format!("Created {} export shim(s):", created.len()));
  for line in format_pairs(created.iter().map(|e| (e.entry.as_str(), e.target.as_str()))) {
    print_line(symbols::ADD, &line);
  }
  print_info("Add the created files to version control or to the package's \"files\" list");

  Ok(())
}
