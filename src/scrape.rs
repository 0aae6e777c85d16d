// src/scrape.rs
//! Per-creature extraction pipeline.
//!
//! `Crawler::load` fetches the main page (retrying once with the first word of
//! the name on a 404) and works out the creature's generation of origin. From
//! there `stats` and `moves` drive the `specs` modules over the cached pages.
//!
//! Moves run in three steps:
//! 1. find the learnset section, stepping back one generation at a time
//!    (via the historical learnset pages) until it shows up or the origin
//!    generation is reached;
//! 2. per forme, read that section's table;
//! 3. optionally follow the table's links to older generations and fill in
//!    whatever formes/generations are still missing.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use scraper::Html;
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use crate::config::consts::LATEST_GENERATION;
use crate::config::options::ContentKind;
use crate::config::tables::{generation_to_roman, roman_to_generation, StatLabels};
use crate::core::net::{Fetch, FetchError};
use crate::specs::document::{DocKey, DocumentStore};
use crate::specs::formes::{enumerate, FormeMap};
use crate::specs::moves::{extract_moves, MoveRecord};
use crate::specs::origin::origin_generation;
use crate::specs::section::Anchor;
use crate::specs::stats::{extract_stats, StatRecord};
use crate::specs::table::{locate_table, other_generation_links, NormalizedTable};

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("couldn't load page for {name}: {source}")]
    Load {
        name: String,
        #[source]
        source: FetchError,
    },

    #[error("no page loaded for {name}")]
    MissingPage { name: String },
}

/// Category ("Base stats", a forme name, …) → stats.
pub type StatsByCategory = IndexMap<String, StatRecord>;
/// Forme → generation → moves.
pub type MovesByForme = IndexMap<String, BTreeMap<u8, MoveRecord>>;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Extracted {
    Stats(StatsByCategory),
    Moves(MovesByForme),
}

/// One creature's data for one content kind. Serializes as `{ name: data }`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputRecord {
    pub creature: String,
    pub kind: ContentKind,
    pub data: Extracted,
}

impl Serialize for OutputRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.creature, &self.data)?;
        map.end()
    }
}

/// Explicit context for one extraction run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    pub name: String,
    pub kind: ContentKind,
    pub all_generations: bool,
    /// Generation whose pages are being read; walks down during fallback.
    pub current_generation: u8,
    pub origin_generation: u8,
}

pub struct Crawler {
    name: String,
    origin_generation: u8,
    store: DocumentStore,
    labels: StatLabels,
}

/// Full name first, then its first word if the name has several.
fn candidate_names(name: &str) -> Vec<String> {
    let full = name.replace('’', "'").trim().to_string();
    if full.is_empty() {
        return Vec::new();
    }
    let mut out = vec![full.clone()];
    let mut words = full.split_whitespace();
    if let (Some(first), Some(_)) = (words.next(), words.next()) {
        out.push(s!(first));
    }
    out
}

impl Crawler {
    /// Fetch the creature's main page. Only a 404 on a multi-word name earns
    /// a retry, with the first word alone.
    pub async fn load<F: Fetch>(name: &str, fetcher: &F) -> Result<Self, ScrapeError> {
        let mut candidates = candidate_names(name).into_iter().peekable();

        while let Some(candidate) = candidates.next() {
            match fetcher.fetch(&candidate, "").await {
                Ok(body) => return Ok(Self::from_document(&candidate, Html::parse_document(&body))),
                Err(e) => {
                    if e.is_not_found() {
                        if let Some(next) = candidates.peek() {
                            logf!("Load: {} not found; retrying as {}", candidate, next);
                            continue;
                        }
                    }
                    loge!("HTTP: {} | {}", e, candidate);
                    return Err(ScrapeError::Load { name: candidate, source: e });
                }
            }
        }
        Err(ScrapeError::MissingPage { name: s!(name) })
    }

    /// Build from an already-parsed main page.
    pub fn from_document(name: &str, doc: Html) -> Self {
        let origin = origin_generation(&doc).unwrap_or_else(|| {
            logd!("Origin: no generation found for {}; assuming {}", name, LATEST_GENERATION);
            LATEST_GENERATION
        });
        let mut store = DocumentStore::new(name);
        store.insert(DocKey::Default, doc);
        Self { name: s!(name), origin_generation: origin, store, labels: StatLabels::default() }
    }

    pub fn with_labels(mut self, labels: StatLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin_generation(&self) -> u8 {
        self.origin_generation
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn query(&self, kind: ContentKind, all_generations: bool) -> Query {
        Query {
            name: self.name.clone(),
            kind,
            all_generations,
            current_generation: LATEST_GENERATION,
            origin_generation: self.origin_generation,
        }
    }

    /// Dispatch on the content kind.
    pub async fn extract<F: Fetch>(
        &mut self,
        kind: ContentKind,
        all_generations: bool,
        fetcher: &F,
    ) -> Result<OutputRecord, ScrapeError> {
        match kind {
            ContentKind::Stats => self.stats(),
            _ => self.moves(self.query(kind, all_generations), fetcher).await,
        }
    }

    pub fn stats(&self) -> Result<OutputRecord, ScrapeError> {
        let doc = self.store.get_default()?;
        Ok(OutputRecord {
            creature: self.name.clone(),
            kind: ContentKind::Stats,
            data: Extracted::Stats(extract_stats(doc, &self.labels)),
        })
    }

    /// Make the page for `query.current_generation` active. The latest
    /// generation reads the main page; older ones their learnset page.
    /// `None` when that page can't be fetched.
    async fn activate<F: Fetch>(&mut self, query: &Query, fetcher: &F) -> Option<DocKey> {
        let key = if query.current_generation >= LATEST_GENERATION {
            DocKey::Default
        } else {
            let roman = generation_to_roman(query.current_generation)?;
            let key = DocKey::Generation(query.current_generation);
            let endpoint = format!("/Generation_{roman}_learnset");
            self.store.ensure(key, &endpoint, fetcher).await.ok()?;
            key
        };
        self.store.set_active(key);
        Some(key)
    }

    /// Formes on the active page, or `None` if the section isn't there.
    fn formes(&self, section: &Anchor) -> Option<FormeMap> {
        let doc = self.store.active().ok()?;
        enumerate(doc, section, &self.name)
    }

    pub async fn moves<F: Fetch>(
        &mut self,
        mut query: Query,
        fetcher: &F,
    ) -> Result<OutputRecord, ScrapeError> {
        self.store.get_default()?;
        let mut data = MovesByForme::new();
        if !query.kind.is_moves() {
            return Ok(self.moves_record(&query, data));
        }
        let section = Anchor::Section(query.kind);

        let mut base = self.activate(&query, fetcher).await;
        let mut formes = base.and_then(|_| self.formes(&section));

        while formes.is_none() && query.current_generation > query.origin_generation {
            query.current_generation -= 1;
            logd!(
                "Moves: no {} section for {}; trying generation {}",
                query.kind.name(), query.name, query.current_generation
            );
            base = self.activate(&query, fetcher).await;
            formes = base.and_then(|_| self.formes(&section));
        }

        let (Some(base), Some(formes)) = (base, formes) else {
            logd!("Moves: no {} data for {}", query.kind.name(), query.name);
            return Ok(self.moves_record(&query, data));
        };

        for (forme, anchor) in &formes {
            self.store.set_active(base);
            data.entry(forme.clone()).or_default();

            let links = {
                let doc = self.store.active()?;
                let Some(outer) = locate_table(doc, anchor) else {
                    logd!("Moves: no table for forme {} of {}", forme, query.name);
                    continue;
                };
                let table = NormalizedTable::new(outer);
                let generation = table.generation().unwrap_or_else(|| {
                    logd!(
                        "Moves: unknown generation label {:?}; using {}",
                        table.generation_label, query.current_generation
                    );
                    query.current_generation
                });
                data.entry(forme.clone())
                    .or_default()
                    .insert(generation, extract_moves(query.kind, &table));

                if !query.all_generations {
                    continue;
                }
                other_generation_links(table.outer, query.current_generation)
            };

            for (roman, endpoint) in links {
                self.fill_generation(&query, &section, &roman, &endpoint, &mut data, fetcher).await;
            }
        }

        self.store.set_active(base);
        Ok(self.moves_record(&query, data))
    }

    /// Read every forme's table from one historical page into the gaps in
    /// `data`. A failed fetch only costs this generation.
    async fn fill_generation<F: Fetch>(
        &mut self,
        query: &Query,
        section: &Anchor,
        roman: &str,
        endpoint: &str,
        data: &mut MovesByForme,
        fetcher: &F,
    ) {
        let Some(generation) = roman_to_generation(roman) else { return };
        let key = DocKey::Generation(generation);

        if self.store.ensure(key, endpoint, fetcher).await.is_err() {
            logd!("Moves: skipping generation {} for {}", roman, query.name);
            return;
        }
        self.store.set_active(key);

        let Some(formes) = self.formes(section) else { return };
        let Ok(doc) = self.store.active() else { return };

        for (forme, anchor) in &formes {
            let Some(outer) = locate_table(doc, anchor) else { continue };
            let per_gen = data.entry(forme.clone()).or_default();
            if per_gen.contains_key(&generation) {
                continue;
            }
            per_gen.insert(generation, extract_moves(query.kind, &NormalizedTable::new(outer)));
        }
    }

    fn moves_record(&self, query: &Query, data: MovesByForme) -> OutputRecord {
        OutputRecord { creature: self.name.clone(), kind: query.kind, data: Extracted::Moves(data) }
    }
}
