use crate::models::{IsoDateTime, Verdict};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One line of the verdict log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: IsoDateTime,
    pub text: String,
    pub result: Verdict,
}

impl LogEntry {
    pub fn new(text: &str, result: Verdict) -> Self {
        Self {
            timestamp: IsoDateTime::now(),
            text: text.to_string(),
            result,
        }
    }
}

/// Read every entry back from an NDJSON log, skipping blank lines.
pub fn read_entries(path: impl AsRef<Path>) -> anyhow::Result<Vec<LogEntry>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut entries = Vec::new();
    for (n, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry: LogEntry = serde_json::from_str(&line)
            .with_context(|| format!("{}:{} is not a log entry", path.display(), n + 1))?;
        entries.push(entry);
    }
    Ok(entries)
}
