//! Shared utilities.
//!
//! Lexical path handling for package-relative paths, plus test helpers.

pub mod path;

#[cfg(test)]
pub mod testutil;
