//! Implementation of the `exports-shim plan` command.
//!
//! Prints the resolution of the export map without touching the package.

use std::path::Path;

use anyhow::Result;

use exports_shim_lib::manifest::load_export_map;
use exports_shim_lib::resolve::{Resolution, ShimKind, resolve};

use crate::output::{OutputFormat, format_pairs, print_info, print_json, print_line, symbols};

pub fn cmd_plan(path: &Path, format: OutputFormat) -> Result<()> {
  let root = super::package_root(path)?;
  let resolution = resolve(&load_export_map(&root)?);

  if format.is_json() {
    return print_json(&resolution);
  }

  if resolution.is_empty() {
    print_info("No export shims needed");
    print_skipped(&resolution);
    return Ok(());
  }

  if !resolution.prerequisite_dirs.is_empty() {
    println!("Directories:");
    for dir in &resolution.prerequisite_dirs {
      print_line(symbols::ADD, dir);
    }
  }

  println!("Shims:");
  let lines = format_pairs(resolution.actions.iter().map(|a| (a.entry.as_str(), a.link_target.as_str())));
  for (action, line) in resolution.actions.iter().zip(lines) {
    let kind = match action.kind {
      ShimKind::RedirectFile => "file",
      ShimKind::SymlinkOrJunction => "link",
    };
    print_line(symbols::ADD, &format!("[{kind}] {line}"));
  }

  print_skipped(&resolution);
  Ok(())
}

fn print_skipped(resolution: &Resolution) {
  if resolution.skipped.is_empty() {
    return;
  }

  println!("Skipped:");
  for skipped in &resolution.skipped {
    print_line(symbols::WARNING, &format!("{} ({})", skipped.subpath, skipped.reason));
  }
}
