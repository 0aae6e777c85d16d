// src/specs/document.rs
//! Parsed pages for one creature, keyed by generation.
//!
//! The main page lives under [`DocKey::Default`]; historical learnset pages
//! are fetched on demand and cached under [`DocKey::Generation`]. Entries are
//! never replaced, so a failed or repeated `ensure` never refetches a page
//! that is already here.

use std::collections::HashMap;
use std::fmt;

use scraper::Html;

use crate::core::net::{Fetch, FetchError};
use crate::scrape::ScrapeError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocKey {
    Default,
    Generation(u8),
}

impl fmt::Display for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocKey::Default => write!(f, "default"),
            DocKey::Generation(g) => write!(f, "gen {g}"),
        }
    }
}

pub struct DocumentStore {
    creature: String,
    docs: HashMap<DocKey, Html>,
    active: Option<DocKey>,
}

impl DocumentStore {
    pub fn new(creature: impl Into<String>) -> Self {
        Self { creature: creature.into(), docs: HashMap::new(), active: None }
    }

    /// Seed a page without fetching. Existing entries win.
    pub fn insert(&mut self, key: DocKey, doc: Html) {
        self.docs.entry(key).or_insert(doc);
    }

    pub fn contains(&self, key: DocKey) -> bool {
        self.docs.contains_key(&key)
    }

    pub fn get(&self, key: DocKey) -> Option<&Html> {
        self.docs.get(&key)
    }

    pub fn get_default(&self) -> Result<&Html, ScrapeError> {
        self.docs
            .get(&DocKey::Default)
            .ok_or_else(|| ScrapeError::MissingPage { name: self.creature.clone() })
    }

    /// Cached page for `key`, or fetch `endpoint`, parse and cache it.
    /// Failures are logged and never cached.
    pub async fn ensure<F: Fetch>(
        &mut self,
        key: DocKey,
        endpoint: &str,
        fetcher: &F,
    ) -> Result<&Html, FetchError> {
        if !self.docs.contains_key(&key) {
            let body = match fetcher.fetch(&self.creature, endpoint).await {
                Ok(b) => b,
                Err(e) => {
                    loge!("HTTP: {} | {} | {} | {}", e, self.creature, key, endpoint);
                    return Err(e);
                }
            };
            logd!("Fetched {} ({}) for {}", endpoint, key, self.creature);
            self.docs.insert(key, Html::parse_document(&body));
        }
        Ok(&self.docs[&key])
    }

    /// Point subsequent reads at `key`. Unset means "use the default page".
    pub fn set_active(&mut self, key: DocKey) {
        self.active = Some(key);
    }

    pub fn active_key(&self) -> DocKey {
        match self.active {
            Some(k) if self.docs.contains_key(&k) => k,
            _ => DocKey::Default,
        }
    }

    pub fn active(&self) -> Result<&Html, ScrapeError> {
        match self.get(self.active_key()) {
            Some(doc) => Ok(doc),
            None => self.get_default(),
        }
    }
}
