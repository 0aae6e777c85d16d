// src/specs/mod.rs
//! # Page extraction specs
//!
//! This module encodes **where the ground truth lives** in a creature's wiki
//! page and how to read it back out. Everything here is pure: it takes a parsed
//! [`scraper::Html`] and returns plain data. Fetching and batching live in
//! `scrape` and `runner`.
//!
//! ## Pieces, leaf-first
//! - `section`  – anchor candidates per content kind; anchor → header + level.
//! - `document` – the per-creature page cache (main page + historical learnsets).
//! - `formes`   – headers under a section → forme name → scoping anchor.
//! - `table`    – anchor → data table; merged-header expansion; generation banner
//!   and links to other generations.
//! - `stats`    – stat tables → `{ category: { stat: value } }`.
//! - `moves`    – learnset tables → move lists / level maps.
//! - `origin`   – the creature's generation of introduction.
//!
//! ## Conventions
//! - "Not found" is `None` or an empty record, never an error. Callers branch on
//!   it (try an earlier generation, skip a forme, fall back to a default column).
//! - Column positions always go through [`table::column_names`]; reading header
//!   cells any other way misaligns every row under a merged header.
//! - Fixtures for tests are inline HTML; keep them shaped like the live pages.
pub mod document;
pub mod formes;
pub mod moves;
pub mod origin;
pub mod section;
pub mod stats;
pub mod table;
