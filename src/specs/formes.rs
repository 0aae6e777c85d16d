// src/specs/formes.rs
//! Alternate-forme discovery.
//!
//! A learnset section with several formes looks like:
//!
//! ```text
//! <h4>By leveling up</h4>      ← section header, level L
//!   <h5>Lopunny</h5>  table     ← first forme, read through the section anchor
//!   <h5>Mega Lopunny</h5> table ← later formes, read through their own span id
//! <h4>By TM/HM</h4>            ← next section at level L ends the list
//! ```

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::core::dom::{heading_level, next_elements, trimmed_text};
use super::section::{locate, Anchor};

static SPAN: Lazy<Selector> = Lazy::new(|| Selector::parse("span").unwrap());

/// Forme display name → anchor scoping that forme's table, in page order.
pub type FormeMap = IndexMap<String, Anchor>;

/// Enumerate the formes below `section`. `None` when the section itself is
/// missing from `doc`; otherwise at least one entry (named `creature` when
/// the page has no forme headers).
pub fn enumerate(doc: &Html, section: &Anchor, creature: &str) -> Option<FormeMap> {
    let header = locate(doc, section)?;

    let headers = match header.level {
        Some(level) => {
            let collected: Vec<_> = next_elements(header.element)
                .filter(|e| matches!(heading_level(*e), Some(l) if l == level || l == level + 1))
                .collect();
            let boundary = collected.iter().position(|e| heading_level(*e) == Some(level));
            match boundary {
                Some(b) => collected[..b].to_vec(),
                None => collected,
            }
        }
        None => Vec::new(),
    };

    let mut formes = FormeMap::new();

    let first_name = headers
        .first()
        .map(|h| trimmed_text(*h))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| s!(creature));
    formes.insert(first_name, section.clone());

    for h in headers.iter().skip(1) {
        let anchor = h
            .select(&SPAN)
            .last()
            .and_then(|span| span.value().attr("id"))
            .map(|id| Anchor::Id(s!(id)))
            .unwrap_or_else(|| section.clone());
        let name = unique_name(&formes, trimmed_text(*h));
        formes.insert(name, anchor);
    }

    Some(formes)
}

/// Repeated header text gets a ` (2)`, ` (3)`, … suffix so no forme is lost.
fn unique_name(formes: &FormeMap, name: String) -> String {
    if !formes.contains_key(&name) {
        return name;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{name} ({n})");
        if !formes.contains_key(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
