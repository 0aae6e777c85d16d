// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://bulbapedia.bulbagarden.net/wiki/";
pub const PAGE_SUFFIX: &str = "_(Pokémon)";
pub const USER_AGENT: &str = "learnset_scrape/0.3";
pub const HTTP_TIMEOUT_SECS: u64 = 20;

// Logs
pub const LOG_FILE: &str = ".store/debug.log";

// Generations
pub const LATEST_GENERATION: u8 = 9;

// Page layout
pub const TABLE_CLASSES: &[&str] = &["roundy", "expandable", "collapsible-block"];
pub const WRAPPER_CLASSES: &[&str] = &["expandable", "collapsible-block"];
pub const EXCLUDED_STAT_CATEGORY: &str = "Pokéathlon stats";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "data.json";

// Politeness between creatures
pub const REQUEST_PAUSE_MS: u64 = 250;
pub const JITTER_MS: u64 = 100; // extra 0..100 ms
