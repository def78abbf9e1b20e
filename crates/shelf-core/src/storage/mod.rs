//! Storage layer
//!
//! Handles the JSON backing file and the plain-text export.
//!
//! ## Files
//!
//! - **Backing file**: the full library as a JSON array, rewritten on every change
//! - **Export file**: one human-readable line per book, written on request

pub mod error;
pub mod export;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use export::write_export;
pub use persistence::{LibraryPersistence, LoadOutcome};
