//! File-backed encoding store.
//!
//! An [`EncodingStore`] is a handle naming a location; it caches nothing.
//! Every call re-reads the file, so the file is the single source of truth
//! shared by every caller that agrees on the path.
//!
//! # Concurrency
//!
//! No locking is performed. Two processes extending the same store with
//! disjoint labels race and the last writer wins, silently dropping the other
//! writer's additions. With [`StoreOptions::atomic_write`] enabled (the
//! default) each write goes through its own temp file and a rename, so
//! readers never observe a partially written file, even with several writers.

use crate::encoding::dictionary::EncodingDictionary;
use crate::error::{EncodingError, Result};
use crate::serialization::{to_pretty_bytes, SerializableParams};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Persistence settings for an [`EncodingStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Write to a uniquely named sibling temp file and rename it over the store.
    pub atomic_write: bool,
    /// Create missing parent directories before writing.
    pub create_dirs: bool,
    /// Indent the JSON object by four spaces.
    pub pretty: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            atomic_write: true,
            create_dirs: true,
            pretty: true,
        }
    }
}

impl StoreOptions {
    /// Set whether writes go through a temporary file and rename.
    pub fn with_atomic_write(mut self, atomic_write: bool) -> Self {
        self.atomic_write = atomic_write;
        self
    }

    /// Set whether missing parent directories are created.
    pub fn with_create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }

    /// Set whether the store is written indented.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Handle to a persisted label <-> index mapping.
///
/// # Example
/// ```no_run
/// use labelstore::EncodingStore;
///
/// let store = EncodingStore::new("dicts/cell_lines.json");
///
/// // First call creates the store: A -> 0, B -> 1
/// let dict = store.resolve_or_create(&["A", "B"])?;
///
/// // Later calls only append unseen labels: C -> 2
/// let dict = store.resolve_or_create(&["B", "C"])?;
/// assert_eq!(dict.index_of("A"), Some(0));
/// assert_eq!(dict.index_of("C"), Some(2));
/// # Ok::<(), labelstore::EncodingError>(())
/// ```
#[derive(Clone, Debug)]
pub struct EncodingStore {
    path: PathBuf,
    options: StoreOptions,
}

impl EncodingStore {
    /// Create a handle for the store at `path`. No I/O is performed.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            options: StoreOptions::default(),
        }
    }

    /// Replace the persistence settings.
    pub fn with_options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    /// Location of the store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persistence settings.
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Whether a store file exists at the location.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read and validate the persisted dictionary.
    ///
    /// # Errors
    /// - [`EncodingError::NotFound`] if no store exists
    /// - [`EncodingError::StoreCorrupt`] if the content is not a valid dictionary
    /// - [`EncodingError::Io`] on any other read failure
    pub fn load(&self) -> Result<EncodingDictionary> {
        let bytes = fs::read(&self.path).map_err(|e| EncodingError::read_failed(&self.path, e))?;

        let dict = EncodingDictionary::from_bytes(&bytes).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "encoding store failed validation");
            EncodingError::corrupt(&self.path, e.to_string())
        })?;

        debug!(path = %self.path.display(), labels = dict.len(), "loaded encoding store");
        Ok(dict)
    }

    /// Overwrite the store with `dict`.
    pub fn save(&self, dict: &EncodingDictionary) -> Result<()> {
        let bytes = if self.options.pretty {
            to_pretty_bytes(dict)
        } else {
            dict.to_bytes()
        }
        .map_err(|e| EncodingError::Internal(format!("failed to serialize dictionary: {}", e)))?;

        if self.options.create_dirs {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| EncodingError::write_failed(parent, e))?;
            }
        }

        if self.options.atomic_write {
            self.write_atomic(&bytes)?;
        } else {
            fs::write(&self.path, &bytes).map_err(|e| EncodingError::write_failed(&self.path, e))?;
        }

        debug!(path = %self.path.display(), labels = dict.len(), "saved encoding store");
        Ok(())
    }

    /// Distinct labels held by the store, in index order.
    ///
    /// # Errors
    /// Returns [`EncodingError::NotFound`] if no store exists; see [`load`](Self::load).
    pub fn list_labels(&self) -> Result<Vec<String>> {
        Ok(self.load()?.labels().to_vec())
    }

    /// Load the store, creating or extending it so that it covers `labels`.
    ///
    /// - No store: assign `0..N-1` to the distinct labels in first-seen order
    ///   and persist. An empty `labels` creates an empty store.
    /// - Store present and `labels` empty: pure read.
    /// - Store present: append unseen labels at indices continuing from the
    ///   current size and rewrite the file. If nothing is new, no write happens.
    ///
    /// # Errors
    /// - [`EncodingError::StoreCorrupt`] if the existing content is invalid
    /// - [`EncodingError::InvalidLabel`] for labels made only of ASCII digits
    /// - [`EncodingError::Io`] on read/write failures
    pub fn resolve_or_create<S: AsRef<str>>(&self, labels: &[S]) -> Result<EncodingDictionary> {
        let existing = match self.load() {
            Ok(dict) => dict,
            Err(e) if e.is_not_found() => {
                let dict = EncodingDictionary::from_labels(labels)?;
                self.save(&dict)?;
                info!(path = %self.path.display(), labels = dict.len(), "created encoding store");
                return Ok(dict);
            }
            Err(e) => return Err(e),
        };

        if labels.is_empty() {
            return Ok(existing);
        }

        let (extended, added) = existing.extended(labels)?;
        if added.is_empty() {
            return Ok(existing);
        }

        self.save(&extended)?;
        info!(
            path = %self.path.display(),
            added = added.len(),
            labels = extended.len(),
            "extended encoding store"
        );
        Ok(extended)
    }

    /// Write through a uniquely named sibling temp file, then rename it over
    /// the store. Concurrent writers never share a temp file.
    fn write_atomic(&self, bytes: &[u8]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp =
            NamedTempFile::new_in(dir).map_err(|e| EncodingError::write_failed(dir, e))?;
        tmp.write_all(bytes)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| EncodingError::write_failed(tmp.path(), e))?;

        // On failure the temp file is dropped with the error, which removes it.
        tmp.persist(&self.path)
            .map_err(|e| EncodingError::write_failed(&self.path, e.error))?;
        Ok(())
    }
}
