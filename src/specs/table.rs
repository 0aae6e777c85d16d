// src/specs/table.rs
//! Data-table lookup and normalization.
//!
//! Learnset tables come in a few shapes:
//! - a bare `table.roundy` right after the header;
//! - the same table wrapped in an `.expandable` / `.collapsible-block` div;
//! - an outer banner table whose real rows live in a nested `table.sortable`.
//!
//! Sortable tables put column labels in row 0. The historical ones carry an
//! extra banner row, so their labels sit in row 1 and a footer row closes them.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::config::consts::{TABLE_CLASSES, WRAPPER_CLASSES};
use crate::config::tables::roman_to_generation;
use crate::core::dom::{body_rows, has_any_class, has_class, heading_level, next_elements, trimmed_text};
use crate::core::sanitize::parse_leading_int;
use super::section::{locate, Anchor};

/// Browsers clamp `colspan` to this.
const MAX_COLSPAN: i64 = 1000;

static ROUNDY_TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table[class=roundy]").unwrap());
static NESTED_SORTABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tbody > tr table[class=sortable]").unwrap());
static TH: Lazy<Selector> = Lazy::new(|| Selector::parse("th").unwrap());
static GEN_BANNER: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("tbody > tr > td[class=roundytop] > table > tbody > tr > th").unwrap()
});
static LINK_ROWS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table[class=roundy] > tbody > tr").unwrap());
static TH_LINKS: Lazy<Selector> = Lazy::new(|| Selector::parse("th > a").unwrap());

/// First data table in the section scoped by `anchor`.
///
/// Scans the header's following siblings, stopping at the next heading of
/// the same or higher rank.
pub fn locate_table<'a>(doc: &'a Html, anchor: &Anchor) -> Option<ElementRef<'a>> {
    let header = locate(doc, anchor)?;

    for sib in next_elements(header.element) {
        if let (Some(origin), Some(level)) = (header.level, heading_level(sib)) {
            if level <= origin {
                break;
            }
        }
        if !has_any_class(sib, TABLE_CLASSES) {
            continue;
        }
        if has_any_class(sib, WRAPPER_CLASSES) {
            return sib.select(&ROUNDY_TABLE).next();
        }
        return Some(sib);
    }
    None
}

/// The table that actually holds the move rows: a nested sortable table
/// when present, else `table` itself.
pub fn data_table(table: ElementRef<'_>) -> ElementRef<'_> {
    table.select(&NESTED_SORTABLE).next().unwrap_or(table)
}

pub fn is_sortable(table: ElementRef<'_>) -> bool {
    has_class(table, "sortable")
}

/// Column labels with merged header cells expanded.
///
/// A `colspan=N` header contributes N-1 empty placeholders before its own
/// label, so indices line up with data rows whose cells are not merged.
pub fn column_names(table: ElementRef<'_>) -> Vec<String> {
    let row_index = if is_sortable(table) { 0 } else { 1 };
    let Some(row) = body_rows(table).get(row_index).copied() else {
        return Vec::new();
    };

    let mut cols = Vec::new();
    for th in row.select(&TH) {
        // unparseable colspan = no span
        if let Some(span) = th.value().attr("colspan").and_then(parse_leading_int) {
            for _ in 1..span.clamp(1, MAX_COLSPAN) {
                cols.push(s!());
            }
        }
        cols.push(trimmed_text(th));
    }
    cols
}

/// Roman numeral of the generation this table describes ("Generation IX" → "IX").
pub fn current_generation_label(table: ElementRef<'_>) -> String {
    let text = table.select(&GEN_BANNER).next().map(trimmed_text).unwrap_or_default();
    text.rsplit("Generation").next().unwrap_or("").trim().to_string()
}

/// Links from this table to other generations' learnset pages, as
/// roman numeral → endpoint (`/Generation_IV_learnset`). Generations newer
/// than `current_generation` or with unknown numerals are dropped.
pub fn other_generation_links(table: ElementRef<'_>, current_generation: u8) -> IndexMap<String, String> {
    let mut out = IndexMap::new();
    let Some(row) = table.select(&LINK_ROWS).nth(2) else {
        return out;
    };

    for href in row.select(&TH_LINKS).filter_map(|a| a.value().attr("href")) {
        let tail = href.rsplit("/Generation").next().unwrap_or(href);
        let endpoint = join!("/Generation", tail);
        let endpoint = endpoint.split('#').next().unwrap_or("").to_string();

        let Some(name) = endpoint.split('_').nth(1) else { continue };
        match roman_to_generation(name) {
            Some(g) if g <= current_generation => {
                out.insert(name.to_string(), endpoint.clone());
            }
            _ => continue,
        }
    }
    out
}

/// A located table with its row source and column layout resolved.
#[derive(Clone, Debug)]
pub struct NormalizedTable<'a> {
    /// The table found under the header (carries the generation banner).
    pub outer: ElementRef<'a>,
    /// The table holding the rows (may be `outer` itself).
    pub data: ElementRef<'a>,
    pub sortable: bool,
    pub columns: Vec<String>,
    pub generation_label: String,
}

impl<'a> NormalizedTable<'a> {
    pub fn new(outer: ElementRef<'a>) -> Self {
        let data = data_table(outer);
        Self {
            outer,
            data,
            sortable: is_sortable(data),
            columns: column_names(data),
            generation_label: current_generation_label(outer),
        }
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn rows(&self) -> Vec<ElementRef<'a>> {
        body_rows(self.data)
    }

    /// Generation number of the banner, if it names a known numeral.
    pub fn generation(&self) -> Option<u8> {
        roman_to_generation(&self.generation_label)
    }
}
