// src/file.rs

use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::scrape::OutputRecord;

/// Write all records as one JSON array. Returns the final path written to.
pub fn write_json(
    path: &Path,
    records: &[OutputRecord],
    pretty: bool,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let mut out = BufWriter::new(fs::File::create(path)?);
    if pretty {
        serde_json::to_writer_pretty(&mut out, records)?;
    } else {
        serde_json::to_writer(&mut out, records)?;
    }
    out.flush()?;
    Ok(path.to_path_buf())
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
