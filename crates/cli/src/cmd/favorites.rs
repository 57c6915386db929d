//! Implementation of the `pokecat favorites` command.

use anyhow::{Context, Result};

use pokecat_lib::config::Config;

use crate::output::{OutputFormat, print_info, print_json, print_success, symbols};

pub fn cmd_favorites(config: &Config, clear: bool, output: OutputFormat) -> Result<()> {
  let mut favorites = super::open_favorites(config);

  if clear {
    favorites.clear().context("Failed to clear favorites")?;
    if output.is_json() {
      return print_json(&Vec::<u32>::new());
    }
    print_success("Favorites cleared");
    return Ok(());
  }

  let ids = favorites.favorites();
  if output.is_json() {
    return print_json(&ids);
  }

  if ids.is_empty() {
    print_info("No favorites yet.");
    return Ok(());
  }

  for id in ids {
    println!("{} #{}", symbols::STAR, id);
  }
  Ok(())
}
