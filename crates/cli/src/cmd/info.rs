use anyhow::Result;

use pokecat_lib::config::Config;

use crate::output::{OutputFormat, format_window, print_json, print_stat};

pub fn cmd_info(config: &Config, output: OutputFormat) -> Result<()> {
  if output.is_json() {
    return print_json(config);
  }

  println!("pokecat v{}", env!("CARGO_PKG_VERSION"));
  print_stat("Upstream", &config.base_url);
  print_stat("Data dir", &config.data_dir.display().to_string());
  print_stat("Limit", &config.limit.to_string());
  print_stat("Revalidate", &format_window(config.revalidate));
  Ok(())
}
