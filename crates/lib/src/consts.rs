/// Name of the package manifest read from the package root.
pub const MANIFEST_FILE: &str = "package.json";

/// File name of the generated install script when none is given.
pub const DEFAULT_SCRIPT_NAME: &str = "polyfill-exports.js";

/// Path segment that marks a package installed as a dependency.
pub const INSTALL_MARKER: &str = "node_modules";

/// Extension appended to plain subpaths to form their redirect file.
pub const ENTRY_EXT: &str = ".js";

/// Extension of the type-declaration shims written next to redirect files.
pub const DECLARATION_EXT: &str = ".d.ts";

/// Condition keys consulted when a target is a condition object, highest priority first.
pub const CONDITION_PRIORITY: [&str; 3] = ["require", "node", "default"];
