// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;

/// What a single extraction run pulls out of a creature page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Stats,
    TmMoves,
    TutorMoves,
    LevelMoves,
    EggMoves,
}

impl ContentKind {
    pub const ALL: [ContentKind; 5] = [
        ContentKind::Stats,
        ContentKind::TmMoves,
        ContentKind::TutorMoves,
        ContentKind::LevelMoves,
        ContentKind::EggMoves,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ContentKind::Stats      => "stats",
            ContentKind::TmMoves    => "tm",
            ContentKind::TutorMoves => "tutor",
            ContentKind::LevelMoves => "level",
            ContentKind::EggMoves   => "egg",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name().eq_ignore_ascii_case(s.trim()))
    }

    pub fn is_moves(&self) -> bool {
        !matches!(self, ContentKind::Stats)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub names: Vec<String>,
    pub kinds: Vec<ContentKind>,
    /// Follow links to historical learnset pages as well.
    pub all_generations: bool,
    /// Pause between creatures (plus a little jitter); 0 disables it.
    pub pause_ms: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            kinds: vec![ContentKind::Stats],
            all_generations: false,
            pause_ms: REQUEST_PAUSE_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub out_path: PathBuf,
    pub pretty: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_path: PathBuf::from(DEFAULT_OUT_DIR).join(DEFAULT_FILE),
            pretty: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!(ContentKind::from_name("Level"), Some(ContentKind::LevelMoves));
        assert_eq!(ContentKind::from_name(" tm "), Some(ContentKind::TmMoves));
        assert_eq!(ContentKind::from_name("contest"), None);
    }

    #[test]
    fn only_stats_is_not_a_move_kind() {
        let moves: Vec<_> = ContentKind::ALL.iter().filter(|k| k.is_moves()).collect();
        assert_eq!(moves.len(), 4);
        assert!(!ContentKind::Stats.is_moves());
    }
}
