//! In-memory book collection
//!
//! The library is an ordered sequence of books. Insertion order is display
//! order until the library is explicitly sorted. Lookups by title are linear
//! and act on the first case-insensitive match.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Book, BookEdit, SortKey};

/// Ordered collection of books
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Library {
    books: Vec<Book>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_books(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// All books in current order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Append a book to the end of the library
    pub fn add(&mut self, book: Book) {
        debug!(title = %book.title, "Adding book");
        self.books.push(book);
    }

    /// Index of the first book whose title matches, ignoring case
    pub fn position(&self, title: &str) -> Option<usize> {
        self.books.iter().position(|b| b.matches_title(title))
    }

    /// First book whose title matches, ignoring case
    pub fn find(&self, title: &str) -> Option<&Book> {
        self.position(title).map(|i| &self.books[i])
    }

    fn find_mut(&mut self, title: &str) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| b.matches_title(title))
    }

    /// Remove the first matching book
    ///
    /// Returns the removed book, or `None` if nothing matched.
    pub fn remove(&mut self, title: &str) -> Option<Book> {
        let index = self.position(title)?;
        debug!(title, index, "Removing book");
        Some(self.books.remove(index))
    }

    /// Apply an edit to the first matching book
    ///
    /// Returns `false` if nothing matched.
    pub fn edit(&mut self, title: &str, edit: BookEdit) -> bool {
        match self.find_mut(title) {
            Some(book) => {
                debug!(title, field = ?edit.field(), "Editing book");
                book.apply(edit);
                true
            }
            None => false,
        }
    }

    /// Flip the read flag of the first matching book
    ///
    /// Returns the new flag, or `None` if nothing matched.
    pub fn toggle_read(&mut self, title: &str) -> Option<bool> {
        self.find_mut(title).map(Book::toggle_read)
    }

    /// Sort in place by the given key
    ///
    /// Text keys compare case-insensitively. The sort is stable.
    pub fn sort(&mut self, key: SortKey) {
        debug!(?key, "Sorting library");
        match key {
            SortKey::Title => self.books.sort_by_key(|b| b.title.to_lowercase()),
            SortKey::Author => self.books.sort_by_key(|b| b.author.to_lowercase()),
            SortKey::Year => self.books.sort_by_key(|b| b.year),
        }
    }

    /// Counts for the statistics view
    pub fn stats(&self) -> LibraryStats {
        LibraryStats {
            total: self.books.len(),
            read: self.books.iter().filter(|b| b.read).count(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Book> {
        self.books.iter()
    }
}

impl<'a> IntoIterator for &'a Library {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.books.iter()
    }
}

/// Aggregate reading statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    pub total: usize,
    pub read: usize,
}

impl LibraryStats {
    /// Percentage of books read, or `None` for an empty library
    pub fn read_percentage(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.read as f64 / self.total as f64 * 100.0)
        }
    }
}
