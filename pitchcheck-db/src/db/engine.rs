use crate::db::api::LogEntry;
use crate::models::Verdict;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Append-only newline-delimited JSON log of verdicts.
pub struct VerdictLog {
    path: PathBuf,
    out: BufWriter<std::fs::File>,
}

impl VerdictLog {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            out: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, text: &str, verdict: &Verdict) -> anyhow::Result<()> {
        let entry = LogEntry::new(text, verdict.clone());
        let line = serde_json::to_string(&entry)?;
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}
