use std::time::Duration;

use serde::Serialize;

use crate::catalog::ItemRecord;
use crate::consts::LANDING_PATH;

/// How requests for paths outside the generated set are served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fallback {
  /// Resolve on first request, then serve from cache.
  Blocking,
}

/// A detail page known at generation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagePath {
  pub name: String,
  pub route: String,
  pub fallback: Fallback,
}

impl PagePath {
  pub fn for_name(name: &str) -> Self {
    Self {
      name: name.to_string(),
      route: format!("/name/{}", name),
      fallback: Fallback::Blocking,
    }
  }
}

/// Data a detail page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
  pub item: ItemRecord,
  #[serde(rename = "revalidate_secs", serialize_with = "serialize_secs")]
  pub revalidate: Duration,
}

impl Page {
  pub fn title(&self) -> &str {
    &self.item.name
  }
}

/// Where to send a request whose item does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
  pub destination: String,
  /// Always `false`: the name may become valid later.
  pub permanent: bool,
}

impl Redirect {
  pub fn to_landing() -> Self {
    Self {
      destination: LANDING_PATH.to_string(),
      permanent: false,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageOutcome {
  Page(Page),
  Redirect(Redirect),
}

impl PageOutcome {
  pub fn page(&self) -> Option<&Page> {
    match self {
      PageOutcome::Page(page) => Some(page),
      PageOutcome::Redirect(_) => None,
    }
  }

  pub fn is_redirect(&self) -> bool {
    matches!(self, PageOutcome::Redirect(_))
  }
}

/// Result of a static generation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
  pub rendered: Vec<String>,
  pub redirected: Vec<String>,
  /// Pages whose build failed, with the error message.
  pub failed: Vec<(String, String)>,
}

impl GenerationReport {
  pub fn is_success(&self) -> bool {
    self.failed.is_empty()
  }

  pub fn total(&self) -> usize {
    self.rendered.len() + self.redirected.len() + self.failed.len()
  }
}

fn serialize_secs<S: serde::Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_u64(value.as_secs())
}
