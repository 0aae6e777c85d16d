// src/core/ident.rs
// Anchor name → `#id` selector, escaped the way CSS.escape() does it.
// Anchors on these pages carry '/', '[', '=' and friends, none of which
// survive a bare `#By_TM/HM` selector.

use std::fmt::Write;

/// Build an exact-id selector from a raw anchor (a leading `#` is ignored).
pub fn id_selector(raw: &str) -> String {
    let id = raw.strip_prefix('#').unwrap_or(raw);
    join!("#", &css_escape(id))
}

/// CSSOM `escape()` for a single identifier.
pub fn css_escape(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 8);

    for (i, &ch) in chars.iter().enumerate() {
        let leading_digit = ch.is_ascii_digit()
            && (i == 0 || (i == 1 && chars[0] == '-'));

        match ch {
            '\0' => out.push('\u{FFFD}'),
            '\u{1}'..='\u{1F}' | '\u{7F}' => hex_escape(&mut out, ch),
            _ if leading_digit => hex_escape(&mut out, ch),
            '-' if i == 0 && chars.len() == 1 => out.push_str("\\-"),
            _ if ch as u32 >= 0x80 || ch == '-' || ch == '_' || ch.is_ascii_alphanumeric() => {
                out.push(ch)
            }
            _ => {
                out.push('\\');
                out.push(ch);
            }
        }
    }
    out
}

fn hex_escape(out: &mut String, ch: char) {
    let _ = write!(out, "\\{:x} ", ch as u32);
}
