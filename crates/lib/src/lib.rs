//! exports-shim-lib: subpath export shims for legacy module resolution
//!
//! Older resolvers only look up files and directories by path and ignore the
//! `exports` field of `package.json`. This crate turns an export map into
//! plain filesystem entries those resolvers can follow:
//! - `manifest`: reading `package.json` into an ordered [`manifest::ExportMap`]
//! - `resolve`: the pure export map to shim action computation
//! - `materialize`: creating shims now, or emitting a script that creates them later
//! - `remove`: deleting previously created shims

pub mod consts;
pub mod manifest;
pub mod materialize;
pub mod platform;
pub mod remove;
pub mod resolve;
pub mod util;
