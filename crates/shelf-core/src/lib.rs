//! SHELF Core Library
//!
//! This crate provides the core functionality for SHELF, a personal book
//! catalog kept in a local JSON file.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open_with_config(Config::load()?)?;
//!
//! // Add a book
//! store.add_book(Book::new("Dune", "Frank Herbert", 1965, "Science Fiction", false))?;
//!
//! // Query
//! let stats = store.stats();
//! ```
//!
//! # Modules
//!
//! - `store`: Library plus persistence (main entry point)
//! - `library`: In-memory ordered book collection
//! - `models`: Book record, edit and sort selectors, input parsing
//! - `storage`: JSON backing file and plain-text export
//! - `config`: Application configuration

pub mod config;
pub mod library;
pub mod models;
pub mod storage;
pub mod store;

pub use config::Config;
pub use library::{Library, LibraryStats};
pub use models::{
    parse_read_answer, parse_year, status_label, Book, BookEdit, BookField, SortKey,
    ValidationError,
};
pub use storage::{LibraryPersistence, LoadOutcome, StorageError};
pub use store::Store;
