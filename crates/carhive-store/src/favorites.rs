//! Cross-session favorites persistence.
//!
//! A small identifier set living in one JSON file under a fixed storage key,
//! independent of the catalog lifecycle: catalog lists are always refetched,
//! favorites survive restarts. Writes go to a temp file in the same
//! directory and are renamed into place so a crash mid-write never corrupts
//! the stored set.

use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed storage key; the on-disk file is `<key>.json`.
pub const STORAGE_KEY: &str = "cars-storage";

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("failed to prepare state directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open temporary file in {path}: {source}")]
    OpenTmpFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write favorites: {0}")]
    Write(#[from] serde_json::Error),

    #[error("failed to rename temporary file: {0}")]
    RenameTmpFile(#[from] tempfile::PersistError),
}

/// On-disk form. Wrapping the list in an object leaves room for more
/// persisted keys without a format break.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredFavorites {
    favorites: Vec<String>,
}

/// The favorited vehicle identifiers, uniqueness enforced, insertion order
/// preserved.
#[derive(Debug)]
pub struct Favorites {
    path: PathBuf,
    ids: Vec<String>,
}

impl Favorites {
    /// Loads the set from `state_dir`, creating an empty one when the file
    /// is missing. A corrupt file is logged and treated as empty rather
    /// than failing the caller.
    #[must_use]
    pub fn load(state_dir: &Path) -> Self {
        let path = state_dir.join(format!("{STORAGE_KEY}.json"));
        let ids = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<StoredFavorites>(&text) {
                Ok(stored) => dedup(stored.favorites),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "corrupt favorites file, starting empty");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable favorites file, starting empty");
                Vec::new()
            }
        };
        Self { path, ids }
    }

    /// Adds `id` to the set. Returns `Ok(false)` without touching disk when
    /// it is already present.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError`] when persisting fails; the in-memory set
    /// is rolled back so memory and disk stay consistent.
    pub fn add(&mut self, id: &str) -> Result<bool, FavoritesError> {
        if self.contains(id) {
            return Ok(false);
        }
        self.ids.push(id.to_owned());
        if let Err(e) = self.persist() {
            self.ids.pop();
            return Err(e);
        }
        Ok(true)
    }

    /// Removes `id` from the set. Returns `Ok(false)` without touching disk
    /// when it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError`] when persisting fails; the in-memory set
    /// is rolled back.
    pub fn remove(&mut self, id: &str) -> Result<bool, FavoritesError> {
        let Some(index) = self.ids.iter().position(|known| known == id) else {
            return Ok(false);
        };
        let removed = self.ids.remove(index);
        if let Err(e) = self.persist() {
            self.ids.insert(index, removed);
            return Err(e);
        }
        Ok(true)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Serializes to a temp file next to the target and renames it into
    /// place, so readers never observe a partial write.
    fn persist(&self) -> Result<(), FavoritesError> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|e| FavoritesError::CreateDir {
            path: parent.to_path_buf(),
            source: e,
        })?;

        let temp_file =
            tempfile::NamedTempFile::new_in(parent).map_err(|e| FavoritesError::OpenTmpFile {
                path: parent.to_path_buf(),
                source: e,
            })?;

        let stored = StoredFavorites {
            favorites: self.ids.clone(),
        };
        let writer = BufWriter::new(&temp_file);
        serde_json::to_writer_pretty(writer, &stored)?;
        temp_file.persist(&self.path)?;
        Ok(())
    }
}

fn dedup(ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
