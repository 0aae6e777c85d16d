// src/runner.rs
use std::time::{Duration, Instant};

use crate::{
    config::consts::JITTER_MS,
    config::options::ScrapeOptions,
    core::net::Fetch,
    progress::Progress,
    scrape::{Crawler, OutputRecord},
};

/// Summary of what was produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub records: Vec<OutputRecord>,
    /// Creatures whose main page never loaded.
    pub failed: Vec<String>,
}

/// Batch runner: one creature at a time, every requested kind per creature.
/// A creature that fails to load is reported and skipped; the batch goes on.
pub async fn run<F: Fetch>(
    opts: &ScrapeOptions,
    fetcher: &F,
    mut progress: Option<&mut dyn Progress>,
) -> RunSummary {
    let mut summary = RunSummary::default();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(opts.names.len());
    }

    for (i, name) in opts.names.iter().enumerate() {
        if i > 0 && opts.pause_ms > 0 {
            let jitter = (i as u64 * 37) % JITTER_MS;
            tokio::time::sleep(Duration::from_millis(opts.pause_ms + jitter)).await; // be polite
        }
        if let Some(p) = progress.as_deref_mut() {
            p.item_start(name);
        }

        let t = Instant::now();
        let mut crawler = match Crawler::load(name, fetcher).await {
            Ok(c) => c,
            Err(e) => {
                loge!("Run: {}: {}", name, e);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(name, &e.to_string());
                }
                summary.failed.push(name.clone());
                continue;
            }
        };

        for &kind in &opts.kinds {
            match crawler.extract(kind, opts.all_generations, fetcher).await {
                Ok(record) => summary.records.push(record),
                Err(e) => {
                    loge!("Run: {} ({}): {}", name, kind.name(), e);
                    if let Some(p) = progress.as_deref_mut() {
                        p.log(&format!("{name} ({}): {e}", kind.name()));
                    }
                }
            }
        }

        logd!("Run: {} in {:?}", crawler.name(), t.elapsed());
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(name);
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    summary
}
