//! Page materialization.
//!
//! Pages for the identifiers listed at generation time are rendered up front.
//! Any other name is resolved on its first request and the page is cached from
//! then on. Cached pages are served until they are older than the revalidation
//! window, after which the next request resolves the item again.
//!
//! The cache is kept under [`PAGES_KEY`] in a [`Storage`] so pages rendered by
//! one run are served by the next:
//!
//! ```json
//! { "pikachu": { "item": { "id": 25, ... }, "rendered_at": 1760572800 } }
//! ```
//!
//! `rendered_at` is seconds since the Unix epoch.

use std::collections::BTreeMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::types::{GenerationReport, Page, PageOutcome, PagePath, Redirect};
use crate::catalog::{CatalogClient, CatalogError, ItemRecord, normalize_name};
use crate::consts::PAGES_KEY;
use crate::favorites::{Storage, StorageError};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedPage {
  item: ItemRecord,
  rendered_at: u64,
}

impl CachedPage {
  fn is_fresh(&self, now: u64, revalidate: Duration) -> bool {
    now.saturating_sub(self.rendered_at) < revalidate.as_secs()
  }
}

fn unix_now() -> u64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|elapsed| elapsed.as_secs())
    .unwrap_or(0)
}

/// Memoizing page renderer over a [`CatalogClient`], persisted through a [`Storage`].
#[derive(Debug)]
pub struct PageCache<S> {
  client: CatalogClient,
  revalidate: Duration,
  storage: S,
  pages: BTreeMap<String, CachedPage>,
  dirty: bool,
}

impl<S: Storage> PageCache<S> {
  /// Open the cache kept in `storage`. An unreadable cache starts out empty.
  pub fn open(client: CatalogClient, revalidate: Duration, storage: S) -> Self {
    let pages = match load_pages(&storage) {
      Ok(pages) => pages,
      Err(e) => {
        warn!(error = %e, "ignoring unreadable page cache");
        BTreeMap::new()
      }
    };
    debug!(cached = pages.len(), "opened page cache");

    Self {
      client,
      revalidate,
      storage,
      pages,
      dirty: false,
    }
  }

  /// Number of pages currently cached.
  pub fn cached_len(&self) -> usize {
    self.pages.len()
  }

  /// Enumerate the pages that exist at generation time.
  pub async fn static_paths(&self, limit: u32) -> Result<Vec<PagePath>, CatalogError> {
    let names = self.client.list_known_identifiers(limit).await?;
    Ok(names.iter().map(|name| PagePath::for_name(name)).collect())
  }

  /// Enumerate and render every page known at generation time.
  ///
  /// A failing page does not stop the others; it is recorded in the report.
  /// Failing to list identifiers fails the whole pass. The cache is written
  /// once, after the last page.
  pub async fn generate(&mut self, limit: u32) -> Result<GenerationReport, CatalogError> {
    let paths = self.static_paths(limit).await?;
    let mut report = GenerationReport::default();

    for path in paths {
      match self.materialize(&path.name).await {
        Ok(PageOutcome::Page(_)) => report.rendered.push(path.name),
        Ok(PageOutcome::Redirect(_)) => report.redirected.push(path.name),
        Err(e) => {
          warn!(name = %path.name, error = %e, "page generation failed");
          report.failed.push((path.name, e.to_string()));
        }
      }
    }
    self.persist();

    info!(
      rendered = report.rendered.len(),
      redirected = report.redirected.len(),
      failed = report.failed.len(),
      "generation complete"
    );
    Ok(report)
  }

  /// Render the page for `name`.
  ///
  /// Unknown items redirect to the landing page; the redirect is not cached.
  /// Upstream failures propagate and leave any expired page in place.
  pub async fn render(&mut self, name: &str) -> Result<PageOutcome, CatalogError> {
    let outcome = self.materialize(name).await;
    self.persist();
    outcome
  }

  async fn materialize(&mut self, name: &str) -> Result<PageOutcome, CatalogError> {
    let name = normalize_name(name);

    if let Some(cached) = self.pages.get(&name)
      && cached.is_fresh(unix_now(), self.revalidate)
    {
      debug!(%name, "serving cached page");
      return Ok(self.page_outcome(cached.item.clone()));
    }

    debug!(%name, "resolving page");
    match self.client.resolve_item(&name).await? {
      Some(item) => {
        self.pages.insert(
          name,
          CachedPage {
            item: item.clone(),
            rendered_at: unix_now(),
          },
        );
        self.dirty = true;
        Ok(self.page_outcome(item))
      }
      None => {
        if self.pages.remove(&name).is_some() {
          self.dirty = true;
        }
        info!(%name, "item not found, redirecting to landing page");
        Ok(PageOutcome::Redirect(Redirect::to_landing()))
      }
    }
  }

  /// Write the cache back if it changed. Failing to do so only costs a
  /// refetch on the next run, so it is logged and otherwise ignored.
  fn persist(&mut self) {
    if !self.dirty {
      return;
    }
    let result = serde_json::to_string(&self.pages)
      .map_err(|source| StorageError::Encode {
        key: PAGES_KEY.to_string(),
        source,
      })
      .and_then(|raw| self.storage.set(PAGES_KEY, &raw));

    match result {
      Ok(()) => self.dirty = false,
      Err(e) => warn!(error = %e, "failed to persist page cache"),
    }
  }

  fn page_outcome(&self, item: ItemRecord) -> PageOutcome {
    PageOutcome::Page(Page {
      item,
      revalidate: self.revalidate,
    })
  }
}

fn load_pages<S: Storage>(storage: &S) -> Result<BTreeMap<String, CachedPage>, StorageError> {
  match storage.get(PAGES_KEY)? {
    Some(raw) => serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
      key: PAGES_KEY.to_string(),
      source,
    }),
    None => Ok(BTreeMap::new()),
  }
}
