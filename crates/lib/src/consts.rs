use std::time::Duration;

pub const APP_NAME: &str = "pokecat";

/// Public PokeAPI endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Upstream resource holding the catalog entries.
pub const RESOURCE: &str = "pokemon";

/// Number of identifiers enumerated at generation time.
pub const DEFAULT_LIMIT: u32 = 151;

/// How long a rendered page is served before it is resolved again.
pub const REVALIDATE: Duration = Duration::from_secs(86_400);

/// Storage key holding the favorites set.
pub const FAVORITES_KEY: &str = "favorites";

/// Storage key holding rendered pages between runs.
pub const PAGES_KEY: &str = "pages";

/// Destination of the redirect issued for unknown items.
pub const LANDING_PATH: &str = "/";

/// Artwork shown when an item has no alternate-art sprite.
pub const NO_IMAGE: &str = "/no-image.png";

pub const ENV_BASE_URL: &str = "POKECAT_BASE_URL";
pub const ENV_DATA_DIR: &str = "POKECAT_DATA_DIR";
