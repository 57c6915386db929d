mod favorite;
mod favorites;
mod generate;
mod info;
mod list;
mod show;

pub use favorite::cmd_favorite;
pub use favorites::cmd_favorites;
pub use generate::cmd_generate;
pub use info::cmd_info;
pub use list::cmd_list;
pub use show::cmd_show;

use anyhow::{Context, Result};

use pokecat_lib::catalog::CatalogClient;
use pokecat_lib::config::Config;
use pokecat_lib::favorites::{Favorites, FileStorage};
use pokecat_lib::pages::PageCache;

fn runtime() -> Result<tokio::runtime::Runtime> {
  tokio::runtime::Runtime::new().context("Failed to create async runtime")
}

fn catalog_client(config: &Config) -> Result<CatalogClient> {
  CatalogClient::new(&config.base_url).context("Failed to create catalog client")
}

/// Pages are kept next to the favorites so `generate` warms the cache `show` reads.
fn page_cache(config: &Config) -> Result<PageCache<FileStorage>> {
  Ok(PageCache::open(
    catalog_client(config)?,
    config.revalidate,
    FileStorage::new(&config.data_dir),
  ))
}

fn open_favorites(config: &Config) -> Favorites<FileStorage> {
  Favorites::new(FileStorage::new(&config.data_dir))
}
