use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use exports_shim_lib::consts::DEFAULT_SCRIPT_NAME;

mod cmd;
mod output;

use output::OutputFormat;

/// exports-shim - Make package subpath exports reachable by path-based resolvers
#[derive(Parser)]
#[command(name = "exports-shim")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(long, value_enum, global = true, default_value_t)]
  format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Create export shims in the package right away
  Apply {
    /// Path to the package root (default: current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Also write .d.ts redirects for TypeScript
    #[arg(long)]
    ts_declaration: bool,

    /// Only act when the package is installed inside node_modules
    #[arg(long)]
    module_only: bool,
  },

  /// Write a script that creates the export shims at install time
  Script {
    /// Path to the package root (default: current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Script location, relative to the package root
    #[arg(short, long, default_value = DEFAULT_SCRIPT_NAME)]
    file: PathBuf,

    /// Also write .d.ts redirects for TypeScript
    #[arg(long)]
    ts_declaration: bool,

    /// Run the script even outside node_modules
    #[arg(long)]
    no_module_only: bool,

    /// Delete the script instead of writing it
    #[arg(long)]
    delete: bool,
  },

  /// Remove previously created export shims
  Clear {
    /// Path to the package root (default: current directory)
    #[arg(default_value = ".")]
    path: PathBuf,
  },

  /// Show the shims that would be created, without touching the package
  Plan {
    /// Path to the package root (default: current directory)
    #[arg(default_value = ".")]
    path: PathBuf,
  },
}

fn init_logging(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  match cli.command {
    Commands::Apply {
      path,
      ts_declaration,
      module_only,
    } => cmd::cmd_apply(&path, ts_declaration, module_only, cli.format),
    Commands::Script {
      path,
      file,
      ts_declaration,
      no_module_only,
      delete,
    } => {
      let args = cmd::ScriptArgs {
        path,
        file,
        ts_declaration,
        module_only: !no_module_only,
        delete,
      };
      cmd::cmd_script(&args, cli.format)
    }
    Commands::Clear { path } => cmd::cmd_clear(&path, cli.format),
    Commands::Plan { path } => cmd::cmd_plan(&path, cli.format),
  }
}
