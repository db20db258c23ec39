//! JSON-object file store, one file per catalog.
//!
//! Each catalog is a single JSON object mapping string IDs to records. Every
//! write is a complete load-then-modify-then-store cycle against the file —
//! there is no in-process cache, so each call observes the current on-disk
//! state. Rewrites go through a temp file in the same directory and an atomic
//! rename, so a failed write never leaves a half-written catalog behind.

use std::collections::BTreeMap;
use std::io::{BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::catalog::{CatalogError, CatalogResult};

/// A file-backed ID → record mapping.
pub struct CatalogStore<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T> CatalogStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with an empty mapping if it does not exist yet.
    /// Idempotent.
    pub fn init(&self) -> CatalogResult<()> {
        if !self.path.exists() {
            self.write_all(&BTreeMap::new())?;
        }
        Ok(())
    }

    /// Load the full mapping. A missing file reads as empty.
    pub fn load(&self) -> CatalogResult<BTreeMap<String, T>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "catalog file absent, reading as empty");
            return Ok(BTreeMap::new());
        }
        let file = std::fs::File::open(&self.path).map_err(|e| CatalogError::Io {
            path: self.path.display().to_string(),
            source: e,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| CatalogError::Malformed {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Look up a single record by ID.
    pub fn get(&self, id: &str) -> CatalogResult<Option<T>> {
        Ok(self.load()?.remove(id))
    }

    /// Insert or overwrite one record: load the full mapping, replace the
    /// key, write the full mapping back.
    pub fn put(&self, id: &str, record: T) -> CatalogResult<()> {
        let mut records = self.load()?;
        records.insert(id.to_string(), record);
        self.write_all(&records)?;
        debug!(path = %self.path.display(), id, "stored record");
        Ok(())
    }

    fn write_all(&self, records: &BTreeMap<String, T>) -> CatalogResult<()> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).map_err(|e| CatalogError::Io {
            path: parent.display().to_string(),
            source: e,
        })?;

        let temp = NamedTempFile::new_in(parent).map_err(|e| CatalogError::Io {
            path: parent.display().to_string(),
            source: e,
        })?;
        {
            let mut writer = BufWriter::new(&temp);
            serde_json::to_writer_pretty(&mut writer, records).map_err(|e| {
                CatalogError::Malformed {
                    path: self.path.display().to_string(),
                    message: e.to_string(),
                }
            })?;
            writer.flush().map_err(|e| CatalogError::Io {
                path: self.path.display().to_string(),
                source: e,
            })?;
        }
        temp.persist(&self.path).map_err(|e| CatalogError::Io {
            path: self.path.display().to_string(),
            source: e.error,
        })?;
        Ok(())
    }
}

/// Suggest the next free ID: one above the highest purely numeric ID already
/// in the mapping (the catalog convention for "real" entries).
pub fn next_numeric_id<T>(records: &BTreeMap<String, T>) -> String {
    records
        .keys()
        .filter_map(|id| id.parse::<u64>().ok())
        .max()
        .map_or_else(|| "1".to_string(), |max| (max + 1).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::{LetterRecord, now_timestamp};
    use crate::glyph::Component;

    fn letter(id: &str) -> LetterRecord {
        LetterRecord {
            id: id.to_string(),
            components: vec![Component::UpperLeftVertical],
            notes: String::new(),
            location_found: String::new(),
            date_added: now_timestamp(),
        }
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let store: CatalogStore<LetterRecord> = CatalogStore::new(dir.path().join("letters.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn init_creates_empty_object() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("letters.json");
        let store: CatalogStore<LetterRecord> = CatalogStore::new(&path);
        store.init().unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw.trim(), "{}");
    }

    #[test]
    fn put_is_read_modify_write() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("letters.json");

        // Two independent store handles over the same file: writes through
        // one are visible to the other because nothing is cached.
        let a: CatalogStore<LetterRecord> = CatalogStore::new(&path);
        let b: CatalogStore<LetterRecord> = CatalogStore::new(&path);

        a.put("1", letter("1")).unwrap();
        b.put("2", letter("2")).unwrap();

        let records = a.load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(a.get("2").unwrap().unwrap().id, "2");
        assert!(a.get("3").unwrap().is_none());
    }

    #[test]
    fn put_overwrites_by_id() {
        let dir = tempfile::TempDir::new().unwrap();
        let store: CatalogStore<LetterRecord> = CatalogStore::new(dir.path().join("l.json"));

        store.put("1", letter("1")).unwrap();
        let mut updated = letter("1");
        updated.notes = "revised".into();
        store.put("1", updated).unwrap();

        let records = store.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records["1"].notes, "revised");
    }

    #[test]
    fn next_id_skips_non_numeric() {
        let mut records: BTreeMap<String, ()> = BTreeMap::new();
        assert_eq!(next_numeric_id(&records), "1");
        records.insert("3".into(), ());
        records.insert("10".into(), ());
        records.insert("abc_test".into(), ());
        assert_eq!(next_numeric_id(&records), "11");
    }
}
