//! Implementation of the `pokecat list` command.

use anyhow::{Context, Result};

use pokecat_lib::config::Config;

use crate::output::{OutputFormat, print_info, print_json};

pub fn cmd_list(config: &Config, output: OutputFormat) -> Result<()> {
  let client = super::catalog_client(config)?;

  let rt = super::runtime()?;
  let names = rt
    .block_on(client.list_known_identifiers(config.limit))
    .context("Failed to list catalog")?;

  if output.is_json() {
    return print_json(&names);
  }

  if names.is_empty() {
    print_info("The catalog is empty.");
    return Ok(());
  }

  for name in &names {
    println!("{}", name);
  }
  Ok(())
}
