use crate::models::{Citation, CitationRecord, IsoDateTime};
use std::path::{Path, PathBuf};

/// Citations gathered over a session; the file is rewritten as a whole on save.
pub struct CitationStore {
    path: PathBuf,
    records: Vec<CitationRecord>,
}

impl CitationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    pub fn record(&mut self, claim: &str, citations: &[Citation]) {
        self.records.push(CitationRecord {
            timestamp: IsoDateTime::now(),
            claim: claim.to_string(),
            citations: citations.to_vec(),
        });
    }

    pub fn records(&self) -> &[CitationRecord] {
        &self.records
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_rewrites_the_whole_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("citations.json");
        let mut store = CitationStore::new(&path);

        store.record("a", &[]);
        store.save().unwrap();
        store.record(
            "b",
            &[Citation {
                url: "https://b.test".into(),
                title: "B".into(),
                used_at: String::new(),
            }],
        );
        store.save().unwrap();

        let saved: Vec<CitationRecord> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[1].citations[0].url, "https://b.test");
    }
}
