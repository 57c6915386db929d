//! Implementation of the `pokecat show` command.
//!
//! Renders one detail page: the item's sprites and whether it is a favorite.
//! Unknown names produce the temporary redirect to the landing page.

use anyhow::{Context, Result};
use serde_json::json;

use pokecat_lib::config::Config;
use pokecat_lib::pages::PageOutcome;

use crate::output::{OutputFormat, capitalize, format_window, print_json, print_stat, symbols};

pub fn cmd_show(config: &Config, name: &str, output: OutputFormat) -> Result<()> {
  let mut pages = super::page_cache(config)?;

  let rt = super::runtime()?;
  let outcome = rt
    .block_on(pages.render(name))
    .with_context(|| format!("Failed to render page for '{}'", name))?;

  let page = match outcome {
    PageOutcome::Page(page) => page,
    PageOutcome::Redirect(redirect) => {
      if output.is_json() {
        return print_json(&PageOutcome::Redirect(redirect));
      }
      let kind = if redirect.permanent { "permanent" } else { "temporary" };
      println!("{} {} ({} redirect)", symbols::ARROW, redirect.destination, kind);
      return Ok(());
    }
  };

  let favorite = super::open_favorites(config).is_favorite(page.item.id);

  if output.is_json() {
    return print_json(&json!({
      "kind": "page",
      "item": page.item,
      "artwork": page.item.artwork(),
      "favorite": favorite,
      "revalidate_secs": page.revalidate.as_secs(),
    }));
  }

  let marker = if favorite { format!(" {}", symbols::STAR) } else { String::new() };
  println!("{}{}", capitalize(page.title()), marker);
  print_stat("Id", &page.item.id.to_string());
  print_stat("Artwork", page.item.artwork());
  print_stat("Favorite", if favorite { "yes" } else { "no" });
  print_stat("Revalidate", &format_window(page.revalidate));

  let gallery = page.item.sprites.gallery();
  if !gallery.is_empty() {
    println!();
    println!("Sprites:");
    for (label, url) in gallery {
      println!("  {} {}: {}", symbols::INFO, label, url);
    }
  }

  Ok(())
}
