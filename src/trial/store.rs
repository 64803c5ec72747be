use crate::error::{EntryLabError, EntryResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source of named trial records.
pub trait TrialStore {
    /// Ids of every record the store can serve, sorted.
    fn ids(&self) -> EntryResult<Vec<String>>;

    /// Full text of the record `id`, or `TrialNotFound`.
    fn read(&self, id: &str) -> EntryResult<String>;
}

/// A directory of `*.yaml` / `*.yml` trial files, addressed by file stem.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn is_record(path: &Path) -> bool {
        matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        )
    }

    fn path_for(&self, id: &str) -> Option<PathBuf> {
        ["yaml", "yml"]
            .iter()
            .map(|ext| self.root.join(format!("{}.{}", id, ext)))
            .find(|p| p.is_file())
    }
}

impl TrialStore for DirStore {
    fn ids(&self) -> EntryResult<Vec<String>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() || !Self::is_record(&path) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    fn read(&self, id: &str) -> EntryResult<String> {
        let path = self
            .path_for(id)
            .ok_or_else(|| EntryLabError::TrialNotFound(id.to_string()))?;
        debug!("Reading trial record {:?}", path);
        Ok(fs::read_to_string(path)?)
    }
}

/// Records held in memory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, id: K, text: V) {
        self.records.insert(id.into(), text.into());
    }

    pub fn with<K: Into<String>, V: Into<String>>(mut self, id: K, text: V) -> Self {
        self.insert(id, text);
        self
    }
}

impl TrialStore for MemoryStore {
    fn ids(&self) -> EntryResult<Vec<String>> {
        Ok(self.records.keys().cloned().collect())
    }

    fn read(&self, id: &str) -> EntryResult<String> {
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| EntryLabError::TrialNotFound(id.to_string()))
    }
}
