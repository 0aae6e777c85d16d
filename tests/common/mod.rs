// tests/common/mod.rs
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use learnset_scrape::core::net::{Fetch, FetchError};

/// In-memory wiki. Unknown pages answer 404; `broken` pages answer 500.
#[derive(Default)]
pub struct FakeWiki {
    pages: HashMap<(String, String), String>,
    broken: HashSet<String>,
    pub calls: RefCell<Vec<(String, String)>>,
}

impl FakeWiki {
    pub fn page(mut self, creature: &str, endpoint: &str, html: impl Into<String>) -> Self {
        self.pages.insert((creature.to_string(), endpoint.to_string()), html.into());
        self
    }

    pub fn broken(mut self, creature: &str) -> Self {
        self.broken.insert(creature.to_string());
        self
    }

    pub fn fetched(&self, creature: &str, endpoint: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|(c, e)| c == creature && e == endpoint)
            .count()
    }
}

impl Fetch for FakeWiki {
    async fn fetch(&self, creature: &str, endpoint: &str) -> Result<String, FetchError> {
        self.calls.borrow_mut().push((creature.to_string(), endpoint.to_string()));
        let url = format!("fake://{creature}{endpoint}");
        if self.broken.contains(creature) {
            return Err(FetchError::Status { status: 500, url });
        }
        self.pages
            .get(&(creature.to_string(), endpoint.to_string()))
            .cloned()
            .ok_or(FetchError::Status { status: 404, url })
    }
}

/// Infobox plus the intro paragraph naming the generation of origin.
pub fn intro(name: &str, roman: &str) -> String {
    format!(
        r#"<table class="roundy infobox"><tr><td>{name}</td></tr></table>
           <p><b>{name}</b> is a Pokémon introduced in
              <a href="/wiki/Generation_{roman}" title="Generation {roman}">Generation {roman}</a>.</p>"#
    )
}

pub fn stat_table(rows: &[(&str, i64)]) -> String {
    let body: String = rows
        .iter()
        .map(|(l, v)| format!(r#"<tr><th><div><span>{l}</span>:</div><div>{v}</div></th></tr>"#))
        .collect();
    format!(r#"<table class="roundy"><tr><th>Stat</th></tr><tr><th>Range at level 50</th></tr>{body}</table>"#)
}

/// Current-generation learnset table: banner, optional links to older
/// generations, then a nested sortable table.
pub fn level_table(roman: &str, links: &[&str], rows: &[(&str, &str)]) -> String {
    let link_row = if links.is_empty() {
        String::new()
    } else {
        let ths: String = links
            .iter()
            .map(|r| format!(r#"<th><a href="/wiki/X_(Pok%C3%A9mon)/Generation_{r}_learnset#By_leveling_up">{r}</a></th>"#))
            .collect();
        format!(
            r#"<tr><td><table class="roundy"><tr><th>Other generations</th></tr><tr><th>-</th></tr><tr>{ths}</tr></table></td></tr>"#
        )
    };
    let body: String = rows
        .iter()
        .map(|(lv, mv)| {
            let key = if lv.chars().all(|c| c.is_ascii_digit()) {
                format!(r#"<span style="display:none">{lv}</span>"#)
            } else {
                String::new()
            };
            format!(r#"<tr><td>{key}<span>{lv}</span></td><td><a><span>{mv}</span></a></td><td>Normal</td></tr>"#)
        })
        .collect();
    format!(
        r#"<table class="roundy">
             <tr><td class="roundytop"><table><tr><th>Generation {roman}</th></tr></table></td></tr>
             {link_row}
             <tr><td><table class="sortable"><tr><th>Level</th><th>Move</th><th>Type</th></tr>{body}</table></td></tr>
           </table>"#
    )
}

/// Historical list table: banner row, label row, moves, footer.
pub fn list_table(moves: &[&str]) -> String {
    let body: String = moves
        .iter()
        .map(|m| format!(r#"<tr><td>-</td><td><a><span>{m}</span></a></td><td>Normal</td></tr>"#))
        .collect();
    format!(
        r#"<table class="roundy"><tr><th colspan="3">Moves</th></tr><tr><th>Parent</th><th>Move</th><th>Type</th></tr>{body}<tr><th colspan="3">Bold indicates STAB</th></tr></table>"#
    )
}

/// Historical level-up table without a nested sortable table.
pub fn old_level_table(rows: &[(&str, &str)]) -> String {
    let body: String = rows
        .iter()
        .map(|(lv, mv)| {
            format!(r#"<tr><td><span style="display:none">{lv}</span>{lv}</td><td><span>{mv}</span></td></tr>"#)
        })
        .collect();
    format!(
        r#"<table class="roundy"><tr><th colspan="2">Level up</th></tr><tr><th>Level</th><th>Move</th></tr>{body}<tr><th colspan="2">footer</th></tr></table>"#
    )
}

pub fn doc(body: &str) -> String {
    format!("<html><body><div id=content>{body}</div></body></html>")
}
