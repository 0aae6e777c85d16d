// src/specs/stats.rs
//! Base-stat tables.
//!
//! Under the `Stats` header every table up to the next header of the same
//! tag is a stat table, labeled by the heading just before it ("Base stats",
//! or a forme name on multi-forme pages). Rows 0-1 are headers; each data row
//! holds `<th><div>label:</div><div>value</div></th>`.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::config::consts::EXCLUDED_STAT_CATEGORY;
use crate::config::options::ContentKind;
use crate::config::tables::StatLabels;
use crate::core::dom::{body_rows, is_tag, next_elements, prev_element, select_text, text_of};
use crate::core::sanitize::parse_leading_int;
use super::section::{locate, Anchor};

static SPAN: Lazy<Selector> = Lazy::new(|| Selector::parse("span").unwrap());
static TH: Lazy<Selector> = Lazy::new(|| Selector::parse("th").unwrap());
static DIV: Lazy<Selector> = Lazy::new(|| Selector::parse("div").unwrap());

/// Stat key → value.
pub type StatRecord = IndexMap<String, i64>;

/// Tables under the Stats section, keyed by the label of the heading above each.
pub fn stat_tables(doc: &Html) -> IndexMap<String, ElementRef<'_>> {
    let mut out = IndexMap::new();
    let Some(header) = locate(doc, &Anchor::Section(ContentKind::Stats)) else {
        return out;
    };
    let tag = header.element.value().name();

    for sib in next_elements(header.element).take_while(|e| !is_tag(*e, tag)) {
        if !is_tag(sib, "table") {
            continue;
        }
        let label = prev_element(sib)
            .map(|p| select_text(p, &SPAN).trim().to_string())
            .unwrap_or_default();
        out.insert(label, sib);
    }
    out
}

/// One stat table → record. Unmapped labels are dropped.
pub fn stats_from_table(table: ElementRef<'_>, labels: &StatLabels) -> StatRecord {
    let mut record = StatRecord::new();

    for row in body_rows(table).into_iter().skip(2) {
        let Some(th) = row.select(&TH).next() else { continue };
        let divs: Vec<_> = th.select(&DIV).collect();
        let (Some(first), Some(last)) = (divs.first(), divs.last()) else { continue };

        let span_text = select_text(*first, &SPAN);
        let raw_label = if span_text.is_empty() { text_of(*first) } else { span_text };
        let label = raw_label.trim().trim_end_matches(':').trim();

        let Some(key) = labels.key_for(label) else { continue };

        let raw_value = text_of(*last);
        let Some(value) = parse_leading_int(&raw_value) else {
            logd!("Stats: unparseable value {:?} for {}", raw_value.trim(), label);
            continue;
        };

        if record.insert(s!(key), value).is_some() {
            loge!("Stats: duplicate stat {} in one table; keeping last value {}", key, value);
        }
    }
    record
}

/// Every stat category on the page except the excluded minigame one.
pub fn extract_stats(doc: &Html, labels: &StatLabels) -> IndexMap<String, StatRecord> {
    stat_tables(doc)
        .into_iter()
        .filter(|(category, _)| category != EXCLUDED_STAT_CATEGORY)
        .map(|(category, table)| (category, stats_from_table(table, labels)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat_row(label: &str, value: &str) -> String {
        format!(r#"<tr><th><div style="float:left">{label}</div><div style="float:right">{value}</div></th></tr>"#)
    }

    fn stat_table(rows: &[(&str, &str)]) -> String {
        let body: String = rows.iter().map(|(l, v)| stat_row(l, v)).collect();
        format!(r#"<table class="roundy"><tr><th>Stat</th></tr><tr><th>Range</th></tr>{body}</table>"#)
    }

    #[test]
    fn rows_map_through_labels() {
        let html = stat_table(&[("HP:", "45"), ("Attack:", "49"), ("Luck:", "7")]);
        let doc = Html::parse_document(&html);
        let table = doc.select(&Selector::parse("table").unwrap()).next().unwrap();

        let labels = StatLabels::new([("HP", "hp"), ("Attack", "atk")]);
        let rec = stats_from_table(table, &labels);
        assert_eq!(rec.len(), 2);
        assert_eq!(rec["hp"], 45);
        assert_eq!(rec["atk"], 49);
    }

    #[test]
    fn span_label_wins_and_last_duplicate_wins() {
        let html = stat_table(&[
            ("<span><a>Sp. Atk</a></span>:", "54"),
            ("Speed", "105"),
            ("Speed:", "106"),
            ("HP:", "—"),
        ]);
        let doc = Html::parse_document(&html);
        let table = doc.select(&Selector::parse("table").unwrap()).next().unwrap();

        let rec = stats_from_table(table, &StatLabels::default());
        assert_eq!(rec["spa"], 54);
        assert_eq!(rec["spe"], 106);
        assert!(!rec.contains_key("hp"));
    }

    #[test]
    fn categories_skip_pokeathlon() {
        let html = format!(
            r#"<h3><span id="Stats">Stats</span></h3>
               <h4><span id="Base_stats">Base stats</span></h4>{}
               <h4><span id="Pokeathlon_stats">Pokéathlon stats</span></h4>{}
               <h3><span id="Type_effectiveness">Type effectiveness</span></h3>{}"#,
            stat_table(&[("HP:", "65")]),
            stat_table(&[("Speed:", "5")]),
            stat_table(&[("HP:", "1")]),
        );
        let doc = Html::parse_document(&html);

        assert_eq!(stat_tables(&doc).len(), 2);
        let stats = extract_stats(&doc, &StatLabels::default());
        assert_eq!(stats.keys().collect::<Vec<_>>(), vec!["Base stats"]);
        assert_eq!(stats["Base stats"]["hp"], 65);
    }
}
