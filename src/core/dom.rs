// src/core/dom.rs
// Thin query helpers over the `scraper` tree. These mirror the handful of
// traversal moves the page specs need: siblings, parent, first tbody rows.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::ident::id_selector;

static TBODY: Lazy<Selector> = Lazy::new(|| Selector::parse("tbody").unwrap());

/// `Selector::parse` with the error dropped; a bad selector just matches nothing.
pub fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Element carrying `id == anchor` (leading `#` optional), if any.
pub fn find_by_id<'a>(doc: &'a Html, anchor: &str) -> Option<ElementRef<'a>> {
    let sel = selector(&id_selector(anchor))?;
    doc.select(&sel).next()
}

/// `h1`..`h6` → 1..6
pub fn heading_level(el: ElementRef<'_>) -> Option<u8> {
    let name = el.value().name();
    let digit = name.strip_prefix('h').or_else(|| name.strip_prefix('H'))?;
    match digit.parse::<u8>() {
        Ok(n @ 1..=6) => Some(n),
        _ => None,
    }
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

pub fn has_any_class(el: ElementRef<'_>, classes: &[&str]) -> bool {
    el.value().classes().any(|c| classes.contains(&c))
}

pub fn is_tag(el: ElementRef<'_>, tag: &str) -> bool {
    el.value().name().eq_ignore_ascii_case(tag)
}

pub fn parent_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent().and_then(ElementRef::wrap)
}

/// Following element siblings, in document order (jQuery `nextAll()`).
pub fn next_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.next_siblings().filter_map(ElementRef::wrap)
}

/// Immediately preceding element sibling (jQuery `prev()`).
pub fn prev_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.prev_siblings().find_map(ElementRef::wrap)
}

pub fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

/// Concatenated text of every descendant text node.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

pub fn trimmed_text(el: ElementRef<'_>) -> String {
    text_of(el).trim().to_string()
}

/// Concatenated text of all matches (jQuery `$(el).find(sel).text()`).
pub fn select_text(el: ElementRef<'_>, sel: &Selector) -> String {
    el.select(sel).map(text_of).collect()
}

/// Direct `<tr>` children of the first `<tbody>` below `table`
/// (or of the table itself when the parser produced no tbody).
pub fn body_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let body = table.select(&TBODY).next().unwrap_or(table);
    child_elements(body).filter(|e| is_tag(*e, "tr")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn heading_levels() {
        let d = doc("<h2 id=a>x</h2><h6 id=b>y</h6><div id=c></div>");
        assert_eq!(heading_level(find_by_id(&d, "a").unwrap()), Some(2));
        assert_eq!(heading_level(find_by_id(&d, "#b").unwrap()), Some(6));
        assert_eq!(heading_level(find_by_id(&d, "c").unwrap()), None);
    }

    #[test]
    fn siblings_skip_text_nodes() {
        let d = doc("<div><p id=a>1</p> text <p>2</p><span>3</span></div>");
        let a = find_by_id(&d, "a").unwrap();
        let names: Vec<_> = next_elements(a).map(|e| e.value().name().to_string()).collect();
        assert_eq!(names, vec!["p", "span"]);
        let last = next_elements(a).last().unwrap();
        assert_eq!(trimmed_text(prev_element(last).unwrap()), "2");
    }

    #[test]
    fn body_rows_only_direct_children() {
        let d = doc(
            "<table id=t><tr><td>a</td></tr><tr><td><table><tr><td>in</td></tr></table></td></tr></table>",
        );
        let t = find_by_id(&d, "t").unwrap();
        assert_eq!(body_rows(t).len(), 2);
    }

    #[test]
    fn ids_with_punctuation_resolve() {
        let d = doc(r#"<h3><span id="By_TM/HM">By TM/HM</span></h3>"#);
        assert!(find_by_id(&d, "By_TM/HM").is_some());
        assert!(find_by_id(&d, "By_TM").is_none());
    }
}
