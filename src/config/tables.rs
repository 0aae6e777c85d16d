// src/config/tables.rs
//! Static lookup tables: generation numerals and stat labels.

use std::collections::HashMap;

const ROMAN: [&str; 9] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX"];

/// "IV" → 4. Case-sensitive, like the page headers.
pub fn roman_to_generation(roman: &str) -> Option<u8> {
    ROMAN
        .iter()
        .position(|r| *r == roman)
        .map(|i| i as u8 + 1)
}

/// 4 → "IV"
pub fn generation_to_roman(generation: u8) -> Option<&'static str> {
    ROMAN.get(usize::from(generation).checked_sub(1)?).copied()
}

/// Maps the row labels found in stat tables onto short stat keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatLabels {
    map: HashMap<String, String>,
}

impl StatLabels {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { map: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    pub fn key_for(&self, label: &str) -> Option<&str> {
        self.map.get(label).map(String::as_str)
    }
}

impl Default for StatLabels {
    fn default() -> Self {
        Self::new([
            ("HP", "hp"),
            ("Attack", "atk"),
            ("Defense", "def"),
            ("Sp. Atk", "spa"),
            ("Sp. Def", "spd"),
            ("Speed", "spe"),
        ])
    }
}
