//! Durable catalog of records, keyed by normalized title.
//!
//! The on-disk form is a single JSON array; every mutation rewrites it via
//! write-to-temp + atomic rename, so a reader never observes a partially
//! written record. All mutations run under one write lock: the dedup check
//! and the disk write either both happen or neither does.

use parking_lot::RwLock;
use recx_core::{normalize_title, Error, Record, Result};
use std::path::{Path, PathBuf};

/// The persistent record store. Append-only from the engine's perspective:
/// records are added or have their enrichment fields overwritten in place,
/// never removed.
pub struct Catalog {
    records: RwLock<Vec<Record>>,
    path: PathBuf,
}

impl Catalog {
    /// Open a catalog backed by `path`. A missing file is an empty catalog,
    /// not an error; an unreadable or corrupt file is.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let records = if path.exists() {
            let data = std::fs::read(&path)?;
            serde_json::from_slice(&data).map_err(|e| Error::Serialization(e.to_string()))?
        } else {
            Vec::new()
        };

        Ok(Self {
            records: RwLock::new(records),
            path,
        })
    }

    fn persist(records: &[Record], path: &Path) -> Result<()> {
        let data = serde_json::to_vec_pretty(records)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        let temp_file = path.with_extension("tmp");
        std::fs::write(&temp_file, &data)?;
        std::fs::rename(&temp_file, path)?;
        Ok(())
    }

    /// Lookup by trimmed, case-insensitive title. Returns the first record
    /// with a matching normalized title.
    #[must_use]
    pub fn find(&self, title: &str) -> Option<Record> {
        let needle = normalize_title(title);
        self.records
            .read()
            .iter()
            .find(|r| r.normalized_title() == needle)
            .cloned()
    }

    /// Insert `record` only if no existing record normalizes to the same
    /// title; otherwise a no-op. Returns whether the record was inserted.
    /// This is the sole deduplication gate for new records.
    pub fn upsert_if_absent(&self, record: Record) -> Result<bool> {
        let needle = record.normalized_title();
        let mut records = self.records.write();

        if records.iter().any(|r| r.normalized_title() == needle) {
            return Ok(false);
        }

        let mut next = records.clone();
        next.push(record);
        Self::persist(&next, &self.path)?;
        *records = next;
        Ok(true)
    }

    /// Every record, in insertion order.
    #[must_use]
    pub fn all(&self) -> Vec<Record> {
        self.records.read().clone()
    }

    /// Overwrite the record at `index` in place, preserving the position and
    /// relative order of all other records. Used by the enrichment step to
    /// fill in `clean_description` and `categories` after the fact.
    pub fn replace(&self, index: usize, record: Record) -> Result<()> {
        let mut records = self.records.write();

        if index >= records.len() {
            return Err(Error::Storage(format!(
                "replace index {} out of range (catalog has {} records)",
                index,
                records.len()
            )));
        }

        let mut next = records.clone();
        next[index] = record;
        Self::persist(&next, &self.path)?;
        *records = next;
        Ok(())
    }

    /// Overwrite the most recently added record.
    pub fn replace_last(&self, record: Record) -> Result<()> {
        let len = self.len();
        if len == 0 {
            return Err(Error::Storage("cannot replace in an empty catalog".to_string()));
        }
        self.replace(len - 1, record)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
