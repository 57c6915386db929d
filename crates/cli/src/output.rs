//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output: colored status
//! messages, labelled stats, and JSON output.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{AnsiColors, OwoColorize, Stream};

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
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
  pub const STAR: &str = "★";
  pub const CONFETTI: &str = "🎉";
}

/// Capitalize the first letter of an item name for headings.
pub fn capitalize(name: &str) -> String {
  let mut chars = name.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

pub fn format_window(window: Duration) -> String {
  humantime::format_duration(window).to_string()
}

/// Kind of status line, deciding symbol, color and target stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
  Success,
  Error,
  Warning,
  Info,
}

impl Tone {
  fn symbol(self) -> &'static str {
    match self {
      Tone::Success => symbols::SUCCESS,
      Tone::Error => symbols::ERROR,
      Tone::Warning => symbols::WARNING,
      Tone::Info => symbols::INFO,
    }
  }

  fn color(self) -> AnsiColors {
    match self {
      Tone::Success => AnsiColors::Green,
      Tone::Error => AnsiColors::Red,
      Tone::Warning => AnsiColors::Yellow,
      Tone::Info => AnsiColors::Blue,
    }
  }

  /// Problems go to stderr and are tinted as a whole; the rest only color the symbol.
  fn is_problem(self) -> bool {
    matches!(self, Tone::Error | Tone::Warning)
  }

  fn stream(self) -> Stream {
    if self.is_problem() { Stream::Stderr } else { Stream::Stdout }
  }
}

fn status_line(tone: Tone, message: &str) -> String {
  let stream = tone.stream();
  let paint = |text: &str| text.if_supports_color(stream, |t| t.color(tone.color())).to_string();
  let body = if tone.is_problem() { paint(message) } else { message.to_string() };
  format!("{} {}", paint(tone.symbol()), body)
}

fn emit(tone: Tone, message: &str) {
  let line = status_line(tone, message);
  if tone.is_problem() {
    eprintln!("{}", line);
  } else {
    println!("{}", line);
  }
}

pub fn print_success(message: &str) {
  emit(Tone::Success, message);
}

pub fn print_error(message: &str) {
  emit(Tone::Error, message);
}

pub fn print_warning(message: &str) {
  emit(Tone::Warning, message);
}

pub fn print_info(message: &str) {
  emit(Tone::Info, message);
}

fn stat_line(label: &str, value: &str) -> String {
  let label = label.if_supports_color(Stream::Stdout, |l| l.dimmed()).to_string();
  format!("  {}: {}", label, value)
}

pub fn print_stat(label: &str, value: &str) {
  println!("{}", stat_line(label, value));
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
