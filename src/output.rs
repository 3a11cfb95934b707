//! Output formatting and persistence for the merged document and the run
//! summary.
//!
//! Supports pretty/minified JSON documents and CSV append.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, info};

use crate::stats::RunStats;
use csv::WriterBuilder;
use std::fs::{self, OpenOptions};
use std::path::Path;

/// Logs the run summary using Rust's debug pretty-print format.
pub fn print_pretty(stats: &RunStats) {
    debug!("{:#?}", stats);
}

/// Logs the run summary as pretty-printed JSON.
pub fn print_json(stats: &RunStats) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(stats)?);
    Ok(())
}

/// Serializes `value` as JSON indented with four spaces.
pub fn to_pretty_json(value: &impl Serialize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Writes `bytes` next to `path` first and renames it into place, so a
/// reader never sees a half-written file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");

    fs::write(&tmp, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to move {} into place", path.display()))?;
    Ok(())
}

/// Writes `value` as a pretty document at `pretty` and a minified one at
/// `minified`. Both are serialized before either file is touched.
pub fn write_documents(value: &impl Serialize, pretty: &Path, minified: &Path) -> Result<()> {
    let pretty_bytes = to_pretty_json(value)?;
    let minified_bytes = serde_json::to_vec(value)?;

    write_atomic(pretty, &pretty_bytes)?;
    write_atomic(minified, &minified_bytes)?;

    info!(
        pretty = %pretty.display(),
        pretty_bytes = pretty_bytes.len(),
        minified = %minified.display(),
        minified_bytes = minified_bytes.len(),
        "Output written"
    );
    Ok(())
}

/// Appends a [`RunStats`] record as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &Path, stats: &RunStats) -> Result<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(stats)?;
    writer.flush()?;

    Ok(())
}
