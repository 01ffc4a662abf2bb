//! Terminal output for `mcb`.
//!
//! Text mode prints marked status lines, `label: value` stats, and one line
//! per manifest. JSON mode prints a single pretty document on stdout.

use std::path::Path;

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

/// Leading mark of a status or manifest line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
  /// The command finished.
  Done,
  Failed,
  Note,
  /// A manifest the plan would write.
  Write,
  /// A planned entry with nothing to write.
  Skip,
  /// A manifest render put on disk.
  Written,
}

impl Mark {
  pub fn glyph(self) -> &'static str {
    match self {
      Mark::Done => "✓",
      Mark::Failed => "✗",
      Mark::Note => "•",
      Mark::Write => "+",
      Mark::Skip => "-",
      Mark::Written => "→",
    }
  }

  fn painted(self, stream: Stream) -> String {
    let glyph = self.glyph();
    match self {
      Mark::Done | Mark::Write => glyph.if_supports_color(stream, |s| s.green()).to_string(),
      Mark::Failed => glyph.if_supports_color(stream, |s| s.red()).to_string(),
      Mark::Note => glyph.if_supports_color(stream, |s| s.blue()).to_string(),
      Mark::Skip => glyph.if_supports_color(stream, |s| s.yellow()).to_string(),
      Mark::Written => glyph.if_supports_color(stream, |s| s.dimmed()).to_string(),
    }
  }
}

pub fn print_line(mark: Mark, message: &str) {
  println!("{} {}", mark.painted(Stream::Stdout), message);
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    Mark::Failed.painted(Stream::Stderr),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

/// `mark path (detail)`, indented under the preceding status line.
pub fn print_entry(mark: Mark, path: &Path, detail: Option<&str>) {
  println!("{}", entry_line(mark, path, detail, Stream::Stdout));
}

fn entry_line(mark: Mark, path: &Path, detail: Option<&str>, stream: Stream) -> String {
  let mut line = format!("  {} {}", mark.painted(stream), path.display());
  if let Some(detail) = detail {
    let detail = format!("({})", detail);
    line.push(' ');
    line.push_str(&detail.if_supports_color(stream, |s| s.dimmed()).to_string());
  }
  line
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
