//! Deferred materialization as a standalone Node script.
//!
//! The script performs the same steps as [`super::materialize`] when run from
//! the package root, which is where package managers run lifecycle scripts.

use std::fmt::Write;
use std::path::Path;

use serde_json::Value;

use super::{declaration_entry, declaration_source, redirect_source};
use crate::consts::INSTALL_MARKER;
use crate::manifest::{ManifestError, load_export_map};
use crate::resolve::{Resolution, ShimKind, resolve};

/// Options for the generated script.
#[derive(Debug, Clone)]
pub struct ScriptConfig {
  /// Exit early unless the working directory is inside `node_modules`.
  pub module_only: bool,
  /// Also write a `.d.ts` redirect next to every redirect file.
  pub ts_declaration: bool,
}

impl Default for ScriptConfig {
  fn default() -> Self {
    Self {
      module_only: true,
      ts_declaration: false,
    }
  }
}

const HEADER: &str = "#!/usr/bin/env node\n'use strict';\n\nvar fs = require('fs');\nvar path = require('path');\n";

const REDIRECT_HELPER: &str = r#"
function redirect(entry, source) {
  try {
    if (fs.lstatSync(entry).isSymbolicLink()) {
      fs.unlinkSync(entry);
    }
  } catch (err) {
    if (err.code !== 'ENOENT') throw err;
  }
  fs.writeFileSync(entry, source);
}
"#;

const LINK_HELPER: &str = r#"
function link(target, entry) {
  var stat;
  try {
    stat = fs.lstatSync(entry);
  } catch (err) {
    if (err.code !== 'ENOENT') throw err;
  }
  if (stat) {
    if (!stat.isSymbolicLink()) {
      throw new Error('file ' + path.resolve(entry) + ' already exists and is not a symbolic link');
    }
    fs.unlinkSync(entry);
  }
  fs.symlinkSync(target, entry, 'junction');
}
"#;

const DIR_HELPER: &str = r#"
function dir(entry) {
  try {
    if (fs.lstatSync(entry).isSymbolicLink()) {
      fs.unlinkSync(entry);
    }
  } catch (err) {
    if (err.code !== 'ENOENT') throw err;
  }
  try {
    fs.mkdirSync(entry);
  } catch (err) {
    if (err.code !== 'EEXIST' || !fs.lstatSync(entry).isDirectory()) {
      throw new Error('file ' + path.resolve(entry) + ' already exists and is not a directory');
    }
  }
}
"#;

/// JSON-quote a string, which is also a valid JavaScript string literal.
fn js_string(s: &str) -> String {
  Value::String(s.to_string()).to_string()
}

fn install_guard() -> String {
  format!(
    "\nif (process.cwd().split(path.sep).indexOf({}) === -1) {{\n  process.exit(0);\n}}\n",
    js_string(INSTALL_MARKER)
  )
}

/// Encode `resolution` as an executable Node script.
///
/// Returns `None` when there is nothing to materialize.
pub fn build_script(resolution: &Resolution, config: &ScriptConfig) -> Option<String> {
  if resolution.is_empty() {
    return None;
  }

  let has = |kind| resolution.actions.iter().any(|a| a.kind == kind);

  let mut script = String::from(HEADER);

  if config.module_only {
    script.push_str(&install_guard());
  }
  if !resolution.prerequisite_dirs.is_empty() {
    script.push_str(DIR_HELPER);
  }
  if has(ShimKind::RedirectFile) {
    script.push_str(REDIRECT_HELPER);
  }
  if has(ShimKind::SymlinkOrJunction) {
    script.push_str(LINK_HELPER);
  }

  if !resolution.prerequisite_dirs.is_empty() {
    script.push('\n');
    for dir in &resolution.prerequisite_dirs {
      let _ = writeln!(script, "dir({});", js_string(dir));
    }
  }

  script.push('\n');
  for action in &resolution.actions {
    match action.kind {
      ShimKind::RedirectFile => {
        let _ = writeln!(
          script,
          "redirect({}, {});",
          js_string(&action.entry),
          js_string(&redirect_source(&action.link_target))
        );
        if config.ts_declaration {
          let _ = writeln!(
            script,
            "redirect({}, {});",
            js_string(&declaration_entry(&action.entry)),
            js_string(&declaration_source(&action.link_target))
          );
        }
      }
      ShimKind::SymlinkOrJunction => {
        let _ = writeln!(
          script,
          "link({}, {});",
          js_string(&action.link_target),
          js_string(&action.entry)
        );
      }
    }
  }

  Some(script)
}

/// Load the manifest at `root` and build its install script.
pub fn build_package_script(root: &Path, config: &ScriptConfig) -> Result<Option<String>, ManifestError> {
  let exports = load_export_map(root)?;
  Ok(build_script(&resolve(&exports), config))
}
