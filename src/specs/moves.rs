// src/specs/moves.rs
//! Move lists out of a normalized learnset table.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use serde::Serialize;

use crate::config::options::ContentKind;
use crate::core::dom::{child_elements, is_tag, select_text, trimmed_text};
use crate::core::sanitize::{method_key, parse_leading_int};
use super::table::NormalizedTable;

static SPAN: Lazy<Selector> = Lazy::new(|| Selector::parse("span").unwrap());
static SORT_KEY: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"span[style="display:none"]"#).unwrap());

/// How a move is acquired in a level-up table: at a level, or by a named
/// method ("evo", "start", "rem").
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum LevelKey {
    Level(i64),
    Method(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MoveRecord {
    List(Vec<String>),
    ByLevel(IndexMap<LevelKey, Vec<String>>),
}

impl MoveRecord {
    pub fn is_empty(&self) -> bool {
        match self {
            MoveRecord::List(v) => v.is_empty(),
            MoveRecord::ByLevel(m) => m.is_empty(),
        }
    }
}

pub fn extract_moves(kind: ContentKind, table: &NormalizedTable<'_>) -> MoveRecord {
    match kind {
        ContentKind::LevelMoves => MoveRecord::ByLevel(level_moves(table)),
        ContentKind::TutorMoves => MoveRecord::List(list_moves(table, 0)),
        ContentKind::TmMoves | ContentKind::EggMoves => {
            let col = table.column("Move").unwrap_or_else(|| {
                logd!("Moves: no Move column in {:?}; using column 0", table.columns);
                0
            });
            MoveRecord::List(list_moves(table, col))
        }
        ContentKind::Stats => MoveRecord::List(Vec::new()),
    }
}

fn cells<'a>(row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    child_elements(row).filter(|e| is_tag(*e, "td")).collect()
}

/// Span text if the cell has any, else the cell text.
fn move_name(cell: ElementRef<'_>) -> String {
    let spans = select_text(cell, &SPAN);
    let name = if spans.trim().is_empty() { trimmed_text(cell) } else { spans };
    name.trim().to_string()
}

/// Flat list from column `col`, in row order.
fn list_moves(table: &NormalizedTable<'_>, col: usize) -> Vec<String> {
    let rows = table.rows();
    // historical tables: banner + labels on top, footer at the bottom
    let (start, end) = if table.sortable {
        (1, rows.len())
    } else {
        (2, rows.len().saturating_sub(1))
    };

    rows[start.min(end)..end]
        .iter()
        .filter_map(|row| {
            let tds = cells(*row);
            let cell = tds.get(col)?;
            Some(move_name(*cell))
        })
        .filter(|name| !name.is_empty())
        .collect()
}

fn level_key(cell: ElementRef<'_>) -> Option<LevelKey> {
    if let Some(n) = parse_leading_int(&select_text(cell, &SORT_KEY)) {
        return Some(LevelKey::Level(n));
    }
    let explicit = cell.select(&SPAN).last().map(trimmed_text).unwrap_or_default();
    let label = if explicit.is_empty() { trimmed_text(cell) } else { explicit };
    let key = method_key(&label);
    (!key.is_empty()).then_some(LevelKey::Method(key))
}

/// Level/method → moves; rows sharing a key keep their page order.
fn level_moves(table: &NormalizedTable<'_>) -> IndexMap<LevelKey, Vec<String>> {
    let mut out: IndexMap<LevelKey, Vec<String>> = IndexMap::new();

    let move_col = table.column("Move");
    let level_col = table
        .columns
        .iter()
        .position(|c| c == "Level" || c == "Learn")
        .or_else(|| move_col?.checked_sub(1));

    let Some(level_col) = level_col else {
        logd!("Moves: no level column in {:?}", table.columns);
        return out;
    };
    let move_col = move_col.unwrap_or(0);

    for row in table.rows().into_iter().skip(1) {
        let tds = cells(row);
        let (Some(level_cell), Some(move_cell)) = (tds.get(level_col), tds.get(move_col)) else {
            continue;
        };
        let Some(key) = level_key(*level_cell) else { continue };
        let name = move_name(*move_cell);
        if name.is_empty() {
            continue;
        }
        out.entry(key).or_default().push(name);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn normalized(doc: &Html) -> NormalizedTable<'_> {
        let t = doc.select(&Selector::parse("table").unwrap()).next().unwrap();
        NormalizedTable::new(t)
    }

    fn level_row(level: &str, name: &str) -> String {
        format!(
            r#"<tr><td><span style="display:none">{level}</span>{level}</td><td><a><span>{name}</span></a></td><td>Normal</td></tr>"#
        )
    }

    #[test]
    fn same_level_rows_group_in_order() {
        let html = format!(
            r#"<table class="sortable"><tr><th>Level</th><th>Move</th><th>Type</th></tr>{}{}{}</table>"#,
            level_row("16", "Tackle"),
            level_row("16", "Growl"),
            level_row("20", "Bounce"),
        );
        let doc = Html::parse_document(&html);
        let rec = extract_moves(ContentKind::LevelMoves, &normalized(&doc));

        let MoveRecord::ByLevel(map) = rec else { panic!("expected level map") };
        assert_eq!(map[&LevelKey::Level(16)], vec!["Tackle", "Growl"]);
        assert_eq!(map[&LevelKey::Level(20)], vec!["Bounce"]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn textual_levels_become_method_keys() {
        let html = r#"<table class="sortable">
            <tr><th colspan="2">Level</th><th>Move</th></tr>
            <tr><td>1</td><td><span>Evo.</span></td><td><span>Dizzy Punch</span></td></tr>
            <tr><td>1</td><td>Rem.*</td><td><span>Return</span></td></tr>
            <tr><td>1</td><td><span style="display:none">9</span><span>9</span></td><td><span>Mirror Coat</span></td></tr>
        </table>"#;
        let doc = Html::parse_document(html);
        let t = normalized(&doc);
        assert_eq!(t.columns, vec!["", "Level", "Move"]);

        let MoveRecord::ByLevel(map) = extract_moves(ContentKind::LevelMoves, &t) else { panic!() };
        assert_eq!(map[&LevelKey::Method(s!("evo"))], vec!["Dizzy Punch"]);
        assert_eq!(map[&LevelKey::Method(s!("rem"))], vec!["Return"]);
        assert_eq!(map[&LevelKey::Level(9)], vec!["Mirror Coat"]);
    }

    #[test]
    fn level_column_falls_back_before_move() {
        let html = r#"<table class="sortable">
            <tr><th>Lv.</th><th>Move</th></tr>
            <tr><td>Start</td><td><span>Pound</span></td></tr>
        </table>"#;
        let doc = Html::parse_document(html);
        let MoveRecord::ByLevel(map) = extract_moves(ContentKind::LevelMoves, &normalized(&doc)) else { panic!() };
        assert_eq!(map[&LevelKey::Method(s!("start"))], vec!["Pound"]);
    }

    #[test]
    fn historical_list_skips_banner_and_footer() {
        let html = r#"<table class="roundy">
            <tr><th colspan="3">Generation VII</th></tr>
            <tr><th>TM</th><th>Move</th><th>Type</th></tr>
            <tr><td>TM01</td><td><a><span>Work Up</span></a></td><td>Normal</td></tr>
            <tr><td>TM06</td><td><a><span>Toxic</span></a></td><td>Poison</td></tr>
            <tr><td>TM06</td><td><a><span>Toxic</span></a></td><td>Poison</td></tr>
            <tr><th colspan="3">Bold indicates STAB</th></tr>
            <tr><td>footer</td><td>Not a move</td></tr>
        </table>"#;
        let doc = Html::parse_document(html);
        let rec = extract_moves(ContentKind::TmMoves, &normalized(&doc));
        assert_eq!(rec, MoveRecord::List(vec![s!("Work Up"), s!("Toxic"), s!("Toxic")]));
    }

    #[test]
    fn tutor_reads_first_column() {
        let html = r#"<table class="sortable">
            <tr><th>Move</th><th>Type</th></tr>
            <tr><td><span>Bounce</span></td><td>Flying</td></tr>
            <tr><td>Ice Punch</td><td>Ice</td></tr>
        </table>"#;
        let doc = Html::parse_document(html);
        let rec = extract_moves(ContentKind::TutorMoves, &normalized(&doc));
        assert_eq!(rec, MoveRecord::List(vec![s!("Bounce"), s!("Ice Punch")]));
    }

    #[test]
    fn level_keys_serialize_as_object_keys() {
        let mut map = IndexMap::new();
        map.insert(LevelKey::Level(16), vec![s!("Tackle")]);
        map.insert(LevelKey::Method(s!("evo")), vec![s!("Bounce")]);
        let json = serde_json::to_string(&MoveRecord::ByLevel(map)).unwrap();
        assert_eq!(json, r#"{"16":["Tackle"],"evo":["Bounce"]}"#);
    }
}
