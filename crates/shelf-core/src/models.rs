//! Data models for SHELF
//!
//! Defines the book record, the selectors used to edit and sort a library,
//! and the parsing rules for user-supplied values.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    /// Display title, also the lookup key (case-insensitive)
    pub title: String,
    pub author: String,
    /// Publication year
    pub year: i32,
    pub genre: String,
    /// Whether the book has been read
    pub read: bool,
}

impl Book {
    /// Create a new book, trimming surrounding whitespace from text fields
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        genre: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            title: trimmed(title.into()),
            author: trimmed(author.into()),
            year,
            genre: trimmed(genre.into()),
            read,
        }
    }

    /// Check whether this book's title matches `title`, ignoring case
    pub fn matches_title(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    /// "Read" or "Unread"
    pub fn status_label(&self) -> &'static str {
        status_label(self.read)
    }

    /// Flip the read flag, returning the new value
    pub fn toggle_read(&mut self) -> bool {
        self.read = !self.read;
        self.read
    }

    /// Apply a single-field edit
    pub fn apply(&mut self, edit: BookEdit) {
        match edit {
            BookEdit::Title(title) => self.title = trimmed(title),
            BookEdit::Author(author) => self.author = trimmed(author),
            BookEdit::Year(year) => self.year = year,
            BookEdit::Genre(genre) => self.genre = trimmed(genre),
            BookEdit::Read(read) => self.read = read,
        }
    }
}

/// Formats the book as a single export line:
/// `<title> by <author> (<year>) - <genre> - <Read|Unread>`
impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} ({}) - {} - {}",
            self.title,
            self.author,
            self.year,
            self.genre,
            self.status_label()
        )
    }
}

/// Label for a read flag
pub fn status_label(read: bool) -> &'static str {
    if read {
        "Read"
    } else {
        "Unread"
    }
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

/// Fields that can be edited on an existing book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Title,
    Author,
    Year,
    Genre,
    Read,
}

impl BookField {
    /// All fields in menu order
    pub const ALL: [BookField; 5] = [
        BookField::Title,
        BookField::Author,
        BookField::Year,
        BookField::Genre,
        BookField::Read,
    ];

    /// Parse a 1-based menu selector ("1".."5")
    pub fn from_selector(selector: &str) -> Result<Self, ValidationError> {
        parse_selector(selector, &Self::ALL)
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Year => "Year",
            BookField::Genre => "Genre",
            BookField::Read => "Read Status",
        }
    }
}

/// A new value for one field of a book
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookEdit {
    Title(String),
    Author(String),
    Year(i32),
    Genre(String),
    Read(bool),
}

impl BookEdit {
    pub fn field(&self) -> BookField {
        match self {
            BookEdit::Title(_) => BookField::Title,
            BookEdit::Author(_) => BookField::Author,
            BookEdit::Year(_) => BookField::Year,
            BookEdit::Genre(_) => BookField::Genre,
            BookEdit::Read(_) => BookField::Read,
        }
    }
}

/// Keys a library can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Author,
    Year,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Title, SortKey::Author, SortKey::Year];

    /// Parse a 1-based menu selector ("1".."3")
    pub fn from_selector(selector: &str) -> Result<Self, ValidationError> {
        parse_selector(selector, &Self::ALL)
    }

    /// Parse a key by name ("title", "author", "year"), ignoring case
    pub fn from_name(name: &str) -> Result<Self, ValidationError> {
        match name.trim().to_lowercase().as_str() {
            "title" => Ok(SortKey::Title),
            "author" => Ok(SortKey::Author),
            "year" => Ok(SortKey::Year),
            _ => Err(ValidationError::InvalidChoice {
                input: name.to_string(),
            }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Title => "Title",
            SortKey::Author => "Author",
            SortKey::Year => "Year",
        }
    }
}

/// Errors for user-supplied values that cannot be accepted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The year is not an integer
    #[error("'{input}' is not a valid year")]
    InvalidYear { input: String },

    /// A menu selector outside the offered range
    #[error("'{input}' is not a valid choice")]
    InvalidChoice { input: String },
}

/// Parse a publication year
///
/// Surrounding whitespace is ignored. Any integer is accepted, including
/// negative years.
pub fn parse_year(input: &str) -> Result<i32, ValidationError> {
    input
        .trim()
        .parse::<i32>()
        .map_err(|_| ValidationError::InvalidYear {
            input: input.trim().to_string(),
        })
}

/// Interpret a yes/no answer; only "yes" (any case) counts as true
pub fn parse_read_answer(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("yes")
}

fn parse_selector<T: Copy>(selector: &str, options: &[T]) -> Result<T, ValidationError> {
    let selector = selector.trim();
    selector
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=options.len()).contains(n))
        .map(|n| options[n - 1])
        .ok_or_else(|| ValidationError::InvalidChoice {
            input: selector.to_string(),
        })
}
