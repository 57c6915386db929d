//! Implementation of the `pokecat generate` command.

use std::time::Instant;

use anyhow::{Context, Result};

use pokecat_lib::config::Config;

use crate::output::{OutputFormat, print_json, print_stat, print_success, print_warning};

/// Enumerate the known pages and render each one, reporting failures per page.
pub fn cmd_generate(config: &Config, output: OutputFormat) -> Result<()> {
  let start = Instant::now();
  let mut pages = super::page_cache(config)?;

  let rt = super::runtime()?;
  let report = rt.block_on(pages.generate(config.limit)).context("Generation failed")?;

  if output.is_json() {
    print_json(&report)?;
  } else {
    for (name, error) in &report.failed {
      print_warning(&format!("{}: {}", name, error));
    }
    if report.is_success() {
      print_success("Generation complete!");
    }
    print_stat("Pages rendered", &report.rendered.len().to_string());
    print_stat("Redirected", &report.redirected.len().to_string());
    print_stat("Failed", &report.failed.len().to_string());
    print_stat("Duration", &format!("{}ms", start.elapsed().as_millis()));
  }

  if !report.is_success() {
    anyhow::bail!("{} of {} page(s) failed to generate", report.failed.len(), report.total());
  }
  Ok(())
}
