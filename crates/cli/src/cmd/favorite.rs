//! Implementation of the `pokecat favorite` command.

use anyhow::{Context, Result};
use serde_json::json;

use pokecat_lib::config::Config;
use pokecat_lib::favorites::Toggle;

use crate::output::{OutputFormat, print_info, print_json, print_success, symbols};

pub fn cmd_favorite(config: &Config, id: u32, output: OutputFormat) -> Result<()> {
  let mut favorites = super::open_favorites(config);
  let toggle = favorites
    .toggle_favorite(id)
    .with_context(|| format!("Failed to save favorites in {}", config.data_dir.display()))?;

  if output.is_json() {
    return print_json(&json!({ "id": id, "favorite": toggle.is_favorite() }));
  }

  match toggle {
    Toggle::Added => print_success(&format!("Saved #{} to favorites {}", id, symbols::CONFETTI)),
    Toggle::Removed => print_info(&format!("Removed #{} from favorites", id)),
  }
  Ok(())
}
