// src/specs/origin.rs
// Generation of introduction, from the intro paragraph after the infobox:
// "Lopunny is a Normal-type Pokémon introduced in <a title="Generation IV">Generation IV</a>."

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::config::tables::roman_to_generation;
use crate::core::dom::{is_tag, next_elements, trimmed_text};

static INFOBOX: Lazy<Selector> = Lazy::new(|| Selector::parse(".infobox").unwrap());
static GEN_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse(r#"a[title^="Generation"]"#).unwrap());

pub fn origin_generation(doc: &Html) -> Option<u8> {
    let intro = doc
        .select(&INFOBOX)
        .find_map(|infobox| next_elements(infobox).find(|e| is_tag(*e, "p")))?;
    let link = intro.select(&GEN_LINK).next()?;

    let text = trimmed_text(link).to_lowercase();
    let roman = text.replace("generation", "").trim().to_uppercase();
    roman_to_generation(&roman)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_intro_generation() {
        let doc = Html::parse_document(
            r#"<table class="roundy infobox"><tr><td>box</td></tr></table>
               <div>noise</div>
               <p><b>Lopunny</b> is a Normal-type Pokémon introduced in
                  <a href="/wiki/Generation_IV" title="Generation IV">Generation IV</a>.</p>
               <p>Second <a title="Generation V">Generation V</a></p>"#,
        );
        assert_eq!(origin_generation(&doc), Some(4));
    }

    #[test]
    fn later_infobox_supplies_the_intro() {
        let doc = Html::parse_document(
            r#"<div><table class="infobox"><tr><td>nested</td></tr></table></div>
               <table class="infobox"><tr><td>box</td></tr></table>
               <p>Introduced in <a title="Generation VI">Generation VI</a>.</p>"#,
        );
        assert_eq!(origin_generation(&doc), Some(6));
    }

    #[test]
    fn missing_or_unknown_is_none() {
        assert_eq!(origin_generation(&Html::parse_document("<p>no infobox</p>")), None);
        let doc = Html::parse_document(
            r#"<div class="infobox"></div><p><a title="Generation Z">Generation Z</a></p>"#,
        );
        assert_eq!(origin_generation(&doc), None);
    }
}
