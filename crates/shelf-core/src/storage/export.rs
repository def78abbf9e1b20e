//! Plain-text library export

use std::path::Path;

use tracing::info;

use super::error::StorageResult;
use super::persistence::atomic_write;
use crate::library::Library;

/// Render the library as export text, one newline-terminated line per book
pub fn render(library: &Library) -> String {
    library.iter().map(|book| format!("{}\n", book)).collect()
}

/// Write the export file, returning the number of lines written
pub fn write_export(library: &Library, path: &Path) -> StorageResult<usize> {
    atomic_write(path, render(library).as_bytes())?;
    info!("Exported {} book(s) to {:?}", library.len(), path);
    Ok(library.len())
}
