// src/core/sanitize.rs

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// `parseInt`-style: optional sign and leading digits after whitespace;
/// trailing junk is ignored, no digits at all is `None`.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let t = s.trim_start();
    let (neg, rest) = match t.as_bytes().first() {
        Some(b'-') => (true, &t[1..]),
        Some(b'+') => (false, &t[1..]),
        _ => (false, t),
    };
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let n: i64 = rest[..end].parse().ok()?;
    Some(if neg { -n } else { n })
}

/// Textual learn-method key: "Evo." → "evo", "Start*" → "start".
pub fn method_key(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != '.' && *c != '*')
        .collect::<String>()
        .to_lowercase()
}

/// Wiki page titles use underscores for spaces.
pub fn page_title(name: &str) -> String {
    normalize_ws(name).replace(' ', "_")
}
