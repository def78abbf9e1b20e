//! JSON library persistence
//!
//! Handles saving and loading the library to/from the filesystem.
//! Writes go to a temp file which is then renamed over the target.
//!
//! Storage location: `./library.json` (configurable via `Config`)
//!
//! A missing file loads as an empty library. So does a file that cannot be
//! parsed, but in that case the file is first copied aside to
//! `<file>.corrupt` so the next save does not destroy it.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use super::error::{StorageError, StorageResult};
use crate::config::Config;
use crate::library::Library;

/// Result of reading the backing file
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The file was read and parsed
    Loaded(Library),
    /// No file exists yet
    Missing,
    /// The file exists but is not a valid library
    Corrupt {
        details: String,
        /// Where the unreadable file was copied, if the copy succeeded
        backup_path: Option<PathBuf>,
    },
}

impl LoadOutcome {
    /// The loaded library, or an empty one for missing and corrupt files
    pub fn into_library(self) -> Library {
        match self {
            LoadOutcome::Loaded(library) => library,
            LoadOutcome::Missing | LoadOutcome::Corrupt { .. } => Library::new(),
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, LoadOutcome::Corrupt { .. })
    }
}

/// Persistence layer for the library backing file
pub struct LibraryPersistence {
    path: PathBuf,
}

impl LibraryPersistence {
    /// Create a persistence handler for a specific file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a persistence handler for the configured backing file
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.library_path())
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the backing file exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Path a corrupt backing file is copied to
    pub fn backup_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".corrupt");
        PathBuf::from(name)
    }

    /// Read the backing file
    ///
    /// Missing and malformed files are reported through [`LoadOutcome`]
    /// rather than as errors. Other I/O failures are returned as errors.
    pub fn load(&self) -> StorageResult<LoadOutcome> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LoadOutcome::Missing),
            Err(e) => return Err(StorageError::from_read(e, self.path.clone())),
        };

        match serde_json::from_slice::<Library>(&bytes) {
            Ok(library) => {
                info!("Loaded {} book(s) from {:?}", library.len(), self.path);
                Ok(LoadOutcome::Loaded(library))
            }
            Err(e) => {
                let backup_path = self.backup_corrupt();
                warn!(
                    "Library file {:?} is not valid ({}); starting with an empty library",
                    self.path, e
                );
                Ok(LoadOutcome::Corrupt {
                    details: e.to_string(),
                    backup_path,
                })
            }
        }
    }

    /// Read the backing file, substituting an empty library when it is
    /// missing or malformed
    pub fn load_or_empty(&self) -> StorageResult<Library> {
        Ok(self.load()?.into_library())
    }

    /// Write the full library, replacing previous contents
    ///
    /// Output is a JSON array indented by four spaces.
    pub fn save(&self, library: &Library) -> StorageResult<()> {
        let bytes = to_pretty_json(library)?;
        atomic_write(&self.path, &bytes)?;
        info!("Saved {} book(s) to {:?}", library.len(), self.path);
        Ok(())
    }

    fn backup_corrupt(&self) -> Option<PathBuf> {
        let backup = self.backup_path();
        match fs::copy(&self.path, &backup) {
            Ok(_) => {
                warn!("Copied unreadable library file to {:?}", backup);
                Some(backup)
            }
            Err(e) => {
                warn!("Could not back up {:?}: {}", self.path, e);
                None
            }
        }
    }
}

fn to_pretty_json(library: &Library) -> StorageResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    library.serialize(&mut serializer)?;
    Ok(bytes)
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
pub(crate) fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let mut temp_name = OsString::from(path.as_os_str());
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
