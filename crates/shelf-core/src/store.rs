//! Unified storage interface
//!
//! The `Store` owns the in-memory library and writes it back to the backing
//! file after every change, so memory and disk never drift apart.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open_with_config(Config::load()?)?;  // Existing library or empty
//!
//! store.add_book(Book::new("Dune", "Frank Herbert", 1965, "SF", false))?;
//! store.sort(SortKey::Year)?;
//! let stats = store.stats();
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::config::Config;
use crate::library::{Library, LibraryStats};
use crate::models::{Book, BookEdit, SortKey};
use crate::storage::{self, LibraryPersistence};

/// Owner of the library and its backing file
pub struct Store {
    library: Library,
    persistence: LibraryPersistence,
    config: Config,
}

impl Store {
    /// Open the store with a specific configuration
    ///
    /// A missing or unreadable backing file yields an empty library.
    pub fn open_with_config(config: Config) -> Result<Self> {
        let persistence = LibraryPersistence::from_config(&config);
        let library = persistence
            .load_or_empty()
            .context("Failed to load library")?;

        Ok(Self {
            library,
            persistence,
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the in-memory library
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// All books in current order
    pub fn books(&self) -> &[Book] {
        self.library.books()
    }

    /// First book matching the title, ignoring case
    pub fn find(&self, title: &str) -> Option<&Book> {
        self.library.find(title)
    }

    // ==================== Mutations ====================

    /// Append a book and persist
    pub fn add_book(&mut self, book: Book) -> Result<()> {
        self.library.add(book);
        self.save()
    }

    /// Remove the first book matching the title
    ///
    /// Returns `None` without writing anything if no book matched.
    pub fn remove_book(&mut self, title: &str) -> Result<Option<Book>> {
        match self.library.remove(title) {
            Some(book) => {
                self.save()?;
                Ok(Some(book))
            }
            None => Ok(None),
        }
    }

    /// Edit one field of the first book matching the title
    ///
    /// Returns `false` without writing anything if no book matched.
    pub fn edit_book(&mut self, title: &str, edit: BookEdit) -> Result<bool> {
        if !self.library.edit(title, edit) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Flip the read flag of the first book matching the title
    ///
    /// Returns the new flag, or `None` if no book matched.
    pub fn toggle_read(&mut self, title: &str) -> Result<Option<bool>> {
        let toggled = self.library.toggle_read(title);
        if toggled.is_some() {
            self.save()?;
        }
        Ok(toggled)
    }

    /// Sort the whole library and persist
    pub fn sort(&mut self, key: SortKey) -> Result<()> {
        self.library.sort(key);
        self.save()
    }

    // ==================== Views ====================

    /// Reading statistics
    pub fn stats(&self) -> LibraryStats {
        self.library.stats()
    }

    /// Write the plain-text export file, returning its path
    ///
    /// The backing file is not touched, and an export path that resolves to
    /// it is refused.
    pub fn export(&self) -> Result<PathBuf> {
        let path = self.config.export_path();
        if path == self.persistence.path() {
            bail!("Refusing to export over the library file {:?}", path);
        }
        storage::write_export(&self.library, &path)
            .with_context(|| format!("Failed to export library to {:?}", path))?;
        Ok(path)
    }

    /// Write the full library to the backing file
    pub fn save(&self) -> Result<()> {
        self.persistence
            .save(&self.library)
            .context("Failed to save library")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        }
    }

    fn dune() -> Book {
        Book::new("Dune", "Frank Herbert", 1965, "Science Fiction", false)
    }

    /// Library as currently stored on disk
    fn on_disk(config: &Config) -> Library {
        LibraryPersistence::from_config(config)
            .load_or_empty()
            .unwrap()
    }

    #[test]
    fn test_open_creates_nothing_until_first_change() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let store = Store::open_with_config(config.clone()).unwrap();
        assert!(store.library().is_empty());
        assert!(!config.library_path().exists());
    }

    #[test]
    fn test_add_persists_immediately() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let mut store = Store::open_with_config(config.clone()).unwrap();

        store.add_book(dune()).unwrap();

        assert_eq!(on_disk(&config).books(), store.books());
    }

    #[test]
    fn test_data_persists_across_reopens() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        {
            let mut store = Store::open_with_config(config.clone()).unwrap();
            store.add_book(dune()).unwrap();
            store
                .add_book(Book::new("Emma", "Jane Austen", 1815, "Romance", true))
                .unwrap();
        }

        let store = Store::open_with_config(config).unwrap();
        let titles: Vec<&str> = store.books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Dune", "Emma"]);
        assert!(store.books()[1].read);
    }

    #[test]
    fn test_remove_any_case() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let mut store = Store::open_with_config(config.clone()).unwrap();
        store.add_book(dune()).unwrap();

        let removed = store.remove_book("dUNE").unwrap();
        assert_eq!(removed, Some(dune()));
        assert!(on_disk(&config).is_empty());
    }

    #[test]
    fn test_remove_missing_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let mut store = Store::open_with_config(config.clone()).unwrap();

        assert_eq!(store.remove_book("Nothing").unwrap(), None);
        assert!(!config.library_path().exists());
    }

    #[test]
    fn test_edit_book() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let mut store = Store::open_with_config(config.clone()).unwrap();
        store.add_book(dune()).unwrap();

        assert!(store.edit_book("dune", BookEdit::Year(1966)).unwrap());
        assert!(!store.edit_book("Emma", BookEdit::Year(1)).unwrap());

        assert_eq!(on_disk(&config).books()[0].year, 1966);
    }

    #[test]
    fn test_toggle_read_persists() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let mut store = Store::open_with_config(config.clone()).unwrap();
        store.add_book(dune()).unwrap();

        assert_eq!(store.toggle_read("DUNE").unwrap(), Some(true));
        assert!(on_disk(&config).books()[0].read);

        assert_eq!(store.toggle_read("dune").unwrap(), Some(false));
        assert!(!on_disk(&config).books()[0].read);

        assert_eq!(store.toggle_read("Emma").unwrap(), None);
    }

    #[test]
    fn test_sort_persists_order() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let mut store = Store::open_with_config(config.clone()).unwrap();
        for year in [9, 10, 2] {
            store
                .add_book(Book::new(format!("Book {}", year), "A", year, "G", false))
                .unwrap();
        }

        store.sort(SortKey::Year).unwrap();

        let years: Vec<i32> = on_disk(&config).iter().map(|b| b.year).collect();
        assert_eq!(years, vec![2, 9, 10]);
    }

    #[test]
    fn test_export_leaves_backing_file_alone() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let mut store = Store::open_with_config(config.clone()).unwrap();
        store.add_book(dune()).unwrap();
        let before = fs::read_to_string(config.library_path()).unwrap();

        let path = store.export().unwrap();

        assert_eq!(path, config.export_path());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Dune by Frank Herbert (1965) - Science Fiction - Unread\n"
        );
        assert_eq!(fs::read_to_string(config.library_path()).unwrap(), before);
    }

    #[test]
    fn test_export_refuses_to_overwrite_backing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            export_file: "library.json".to_string(),
            ..test_config(&temp_dir)
        };
        let mut store = Store::open_with_config(config.clone()).unwrap();
        store.add_book(dune()).unwrap();

        assert!(store.export().is_err());

        let reopened = Store::open_with_config(config).unwrap();
        assert_eq!(reopened.books(), &[dune()]);
    }

    #[test]
    fn test_open_with_corrupt_file_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        fs::write(config.library_path(), "not json").unwrap();

        let mut store = Store::open_with_config(config.clone()).unwrap();
        assert!(store.library().is_empty());

        // The unreadable original survives the next save
        store.add_book(dune()).unwrap();
        let backup = LibraryPersistence::from_config(&config).backup_path();
        assert_eq!(fs::read_to_string(backup).unwrap(), "not json");
    }

    #[test]
    fn test_stats() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(test_config(&temp_dir)).unwrap();
        assert_eq!(store.stats().read_percentage(), None);

        store.add_book(dune()).unwrap();
        store.toggle_read("Dune").unwrap();
        store
            .add_book(Book::new("Emma", "Jane Austen", 1815, "Romance", false))
            .unwrap();

        let stats = store.stats();
        assert_eq!((stats.total, stats.read), (2, 1));
        assert_eq!(stats.read_percentage(), Some(50.0));
    }
}
