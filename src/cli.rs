// src/cli.rs
use std::{env, error::Error, path::PathBuf};

use crate::config::options::{AppOptions, ContentKind};
use crate::core::net::HttpFetcher;
use crate::progress::ConsoleProgress;
use crate::{file, runner};

pub const HELP: &str = include_str!("cli_help.txt");

pub async fn run() -> Result<(), Box<dyn Error>> {
    let Some(opts) = parse_cli(env::args().skip(1))? else {
        eprintln!("{HELP}");
        return Ok(());
    };

    let fetcher = HttpFetcher::new()?;
    let mut progress = ConsoleProgress::default();
    let summary = runner::run(&opts.scrape, &fetcher, Some(&mut progress)).await;

    let path = file::write_json(&opts.export.out_path, &summary.records, opts.export.pretty)?;
    println!("Wrote {}", path.display());
    if !summary.failed.is_empty() {
        eprintln!("Failed: {}", summary.failed.join(", "));
    }
    Ok(())
}

/// `Ok(None)` means help was requested.
pub fn parse_cli<I>(args: I) -> Result<Option<AppOptions>, Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
{
    let mut opts = AppOptions::default();
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        match a.as_str()
        {
            "-k" | "--kind" => {
                let v = args.next().ok_or("Missing value for --kind")?;
                opts.scrape.kinds = parse_kinds(&v)?;}
            "-n" | "--names" => {
                let v = args.next().ok_or("Missing value for --names")?;
                opts.scrape.names.extend(parse_names(&v));}
            "--all-gens" => opts.scrape.all_generations = true,
            "--pause" => {
                let v: u64 = args.next().ok_or("Missing value for --pause")?.parse()?;
                opts.scrape.pause_ms = v;}
            "-o" | "--out" => opts.export.out_path = PathBuf::from(args.next().ok_or("Missing output path")?),
            "--pretty" => opts.export.pretty = true,
            "-h" | "--help" => return Ok(None),
            flag if flag.starts_with('-') => return Err(format!("Unknown arg: {}", flag).into()),
            name => opts.scrape.names.push(name.to_string()),
        }
    }

    if opts.scrape.names.is_empty() {
        return Err("Specify at least one creature name".into());
    }
    Ok(Some(opts))
}

fn parse_kinds(s: &str) -> Result<Vec<ContentKind>, Box<dyn Error>> {
    if s.trim().eq_ignore_ascii_case("all") {
        return Ok(ContentKind::ALL.to_vec());
    }
    let mut out = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() { continue; }
        let kind = ContentKind::from_name(part).ok_or_else(|| format!("Unknown kind: {}", part))?;
        if !out.contains(&kind) { out.push(kind); }
    }
    if out.is_empty() {
        return Err("Empty --kind list".into());
    }
    Ok(out)
}

fn parse_names(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect()
}
