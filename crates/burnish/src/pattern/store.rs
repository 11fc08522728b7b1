//! Pattern persistence - durable canonical mappings per column identity.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::{BurnishError, Result};

/// Durable storage for learned canonical mappings.
///
/// Keys are unique per `(column identity, key)`; `upsert` is
/// insert-or-update with last-writer-wins semantics, so two jobs
/// learning the same column concurrently cannot corrupt the store,
/// only race on which canonical wins a key.
pub trait PatternStore {
    /// Load all `(key, canonical)` entries for a column identity, in
    /// the order they were first inserted.
    fn load(&self, column: &str) -> Result<IndexMap<String, String>>;

    /// Insert or update one entry.
    fn upsert(&mut self, column: &str, key: &str, canonical: &str) -> Result<()>;
}

/// In-memory pattern store.
///
/// Used for ephemeral jobs and tests; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryPatternStore {
    columns: IndexMap<String, IndexMap<String, String>>,
}

impl MemoryPatternStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries stored for a column.
    pub fn entry_count(&self, column: &str) -> usize {
        self.columns.get(column).map_or(0, |m| m.len())
    }
}

impl PatternStore for MemoryPatternStore {
    fn load(&self, column: &str) -> Result<IndexMap<String, String>> {
        Ok(self.columns.get(column).cloned().unwrap_or_default())
    }

    fn upsert(&mut self, column: &str, key: &str, canonical: &str) -> Result<()> {
        self.columns
            .entry(column.to_string())
            .or_default()
            .insert(key.to_string(), canonical.to_string());
        Ok(())
    }
}

/// JSON-file-backed pattern store.
///
/// The whole document is `{ column: { key: canonical } }`. Upserts
/// write through by rewriting the file, which keeps the uniqueness
/// constraint trivially intact.
#[derive(Debug)]
pub struct FilePatternStore {
    path: PathBuf,
    columns: IndexMap<String, IndexMap<String, String>>,
}

impl FilePatternStore {
    /// Open a store file, creating an empty store if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let columns = if path.exists() {
            let file = File::open(&path).map_err(|e| {
                BurnishError::Persistence(format!(
                    "Failed to open pattern store '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).map_err(|e| {
                BurnishError::Persistence(format!(
                    "Failed to parse pattern store '{}': {}",
                    path.display(),
                    e
                ))
            })?
        } else {
            IndexMap::new()
        };

        Ok(Self { path, columns })
    }

    /// Columns with at least one stored entry.
    pub fn column_identities(&self) -> Vec<&str> {
        self.columns.keys().map(|k| k.as_str()).collect()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    BurnishError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(&self.path).map_err(|e| {
            BurnishError::Persistence(format!(
                "Failed to create pattern store '{}': {}",
                self.path.display(),
                e
            ))
        })?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.columns).map_err(|e| {
            BurnishError::Persistence(format!("Failed to serialize pattern store: {}", e))
        })?;

        Ok(())
    }
}

impl PatternStore for FilePatternStore {
    fn load(&self, column: &str) -> Result<IndexMap<String, String>> {
        Ok(self.columns.get(column).cloned().unwrap_or_default())
    }

    fn upsert(&mut self, column: &str, key: &str, canonical: &str) -> Result<()> {
        self.columns
            .entry(column.to_string())
            .or_default()
            .insert(key.to_string(), canonical.to_string());
        self.save()
    }
}

/// Default pattern store path for a data file: a `.burnish`
/// subdirectory next to the data.
///
/// # Example
///
/// ```
/// use burnish::pattern::patterns_path;
///
/// let path = patterns_path("data/parts.csv");
/// assert_eq!(path.to_string_lossy(), "data/.burnish/patterns.json");
/// ```
pub fn patterns_path(data_path: impl AsRef<Path>) -> PathBuf {
    let parent = data_path.as_ref().parent().unwrap_or(Path::new("."));
    parent.join(".burnish").join("patterns.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_upsert_overwrites() {
        let mut store = MemoryPatternStore::new();
        store.upsert("part", "A_100", "A100").unwrap();
        store.upsert("part", "A_100", "a100").unwrap();

        let loaded = store.load("part").unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get("A_100").map(String::as_str), Some("a100"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.json");

        let mut store = FilePatternStore::open(&path).unwrap();
        store.upsert("part", "A_100", "A100").unwrap();
        store.upsert("part", "A100", "A100").unwrap();
        store.upsert("code", "X_1", "X1").unwrap();

        let reopened = FilePatternStore::open(&path).unwrap();
        let part = reopened.load("part").unwrap();
        assert_eq!(part.len(), 2);
        assert_eq!(part.get("A_100").map(String::as_str), Some("A100"));
        assert_eq!(reopened.load("code").unwrap().len(), 1);
        // Unknown identities load as empty, not as errors.
        assert!(reopened.load("missing").unwrap().is_empty());
    }

    #[test]
    fn test_load_preserves_insertion_order() {
        let mut store = MemoryPatternStore::new();
        store.upsert("part", "B_2", "B2").unwrap();
        store.upsert("part", "A_1", "A1").unwrap();

        let keys: Vec<_> = store.load("part").unwrap().into_keys().collect();
        assert_eq!(keys, vec!["B_2", "A_1"]);
    }

    #[test]
    fn test_patterns_path() {
        assert_eq!(
            patterns_path("data/parts.csv").to_string_lossy(),
            "data/.burnish/patterns.json"
        );
        assert_eq!(
            patterns_path("parts.csv").to_string_lossy(),
            ".burnish/patterns.json"
        );
    }
}
