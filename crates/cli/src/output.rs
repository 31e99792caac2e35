//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output including colored status
//! messages, aligned `entry -> target` listings, and Unicode symbols.

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "->";
  pub const ADD: &str = "+";
  pub const REMOVE: &str = "-";
}

/// Format `(entry, target)` pairs with the arrows lined up.
pub fn format_pairs<'a, I>(pairs: I) -> Vec<String>
where
  I: IntoIterator<Item = (&'a str, &'a str)>,
{
  let pairs: Vec<_> = pairs.into_iter().collect();
  let width = pairs.iter().map(|(entry, _)| entry.chars().count()).max().unwrap_or(0);

  pairs
    .into_iter()
    .map(|(entry, target)| format!("{entry:<width$}  {}  {target}", symbols::ARROW))
    .collect()
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_line(symbol: &str, message: &str) {
  println!(
    "  {} {}",
    symbol.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    message
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
