// src/specs/section.rs
//! Section anchors and header lookup.
//!
//! Sections are marked by an anchor span inside a heading, e.g.
//! `<h4><span class="mw-headline" id="By_leveling_up">…</span></h4>`.
//! Older revisions of the pages spelled some anchors differently, so each
//! content kind carries an ordered list of candidates; the first one present
//! in the document wins.

use scraper::{ElementRef, Html};

use crate::config::options::ContentKind;
use crate::core::dom::{find_by_id, heading_level, parent_element};

const TM_ANCHORS: &[&str] = &["By_TM", "=By_TM", "By_[[TM]", "By_TM/HM", "By_TM/TR"];
const TUTOR_ANCHORS: &[&str] = &["By_tutoring"];
const LEVEL_ANCHORS: &[&str] = &["By_leveling_up"];
const EGG_ANCHORS: &[&str] = &["By_breeding"];
const STATS_ANCHORS: &[&str] = &["Stats"];

pub fn section_candidates(kind: ContentKind) -> &'static [&'static str] {
    match kind {
        ContentKind::Stats      => STATS_ANCHORS,
        ContentKind::TmMoves    => TM_ANCHORS,
        ContentKind::TutorMoves => TUTOR_ANCHORS,
        ContentKind::LevelMoves => LEVEL_ANCHORS,
        ContentKind::EggMoves   => EGG_ANCHORS,
    }
}

/// Where a block of data is scoped: a kind's section (any of its candidate
/// spellings) or one explicit in-page id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Anchor {
    Section(ContentKind),
    Id(String),
}

impl Anchor {
    pub fn candidates(&self) -> Vec<&str> {
        match self {
            Anchor::Section(kind) => section_candidates(*kind).to_vec(),
            Anchor::Id(id) => vec![id.as_str()],
        }
    }
}

/// A heading that scopes a block of content. Only used as a traversal origin.
#[derive(Clone, Copy, Debug)]
pub struct HeaderNode<'a> {
    pub element: ElementRef<'a>,
    /// 1..=6, or `None` when the anchor's container is not a heading.
    pub level: Option<u8>,
}

/// Resolve `anchor` in `doc` and climb to its containing heading.
/// `None` means "no such section here"; callers branch on it.
pub fn locate<'a>(doc: &'a Html, anchor: &Anchor) -> Option<HeaderNode<'a>> {
    anchor.candidates().into_iter().find_map(|id| {
        let marker = find_by_id(doc, id)?;
        if marker.children().next().is_none() {
            return None;
        }
        let element = parent_element(marker)?;
        Some(HeaderNode { element, level: heading_level(element) })
    })
}
