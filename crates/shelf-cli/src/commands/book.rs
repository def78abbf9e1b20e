//! Book command handlers
//!
//! Interactive handlers prompt through a [`Console`]; the `*_direct`
//! variants take their arguments from the command line and never prompt.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use shelf_core::{parse_year, status_label, Book, BookEdit, BookField, Store};

use super::{INVALID_CHOICE, NOT_FOUND};
use crate::console::Console;
use crate::output::Output;

/// Prompt for a new book and append it
pub fn add<R: BufRead, W: Write>(store: &mut Store, console: &mut Console<R, W>) -> Result<()> {
    console.header("ADD A NEW BOOK")?;

    let title = console.ask("Enter the book title: ")?;
    let author = console.ask("Enter the author: ")?;
    let year = console.ask_year("Enter the publication year: ")?;
    let genre = console.ask("Enter the genre: ")?;
    let read = console.ask_yes_no("Have you read this book? (yes/no): ")?;

    let book = Book::new(title, author, year, genre, read);
    let message = format!("✓ '{}' added successfully!", book.title);
    store.add_book(book).context("Failed to add book")?;

    console.announce(message)
}

/// Prompt for a title and remove the first match
pub fn remove<R: BufRead, W: Write>(
    store: &mut Store,
    console: &mut Console<R, W>,
) -> Result<()> {
    console.header("REMOVE A BOOK")?;

    let title = console.ask("Enter the title of the book to remove: ")?;
    match store.remove_book(&title).context("Failed to remove book")? {
        Some(_) => console.announce(format!("✓ '{}' removed successfully!", title)),
        None => console.say(NOT_FOUND),
    }
}

/// Prompt for a title, a field, and its new value
pub fn edit<R: BufRead, W: Write>(store: &mut Store, console: &mut Console<R, W>) -> Result<()> {
    console.header("EDIT A BOOK")?;

    let title = console.ask("Enter the title of the book to edit: ")?;
    if store.find(&title).is_none() {
        return console.say(NOT_FOUND);
    }

    console.say("")?;
    console.say("What do you want to update?")?;
    for (i, field) in BookField::ALL.iter().enumerate() {
        console.say(format!("  [{}] {}", i + 1, field.label()))?;
    }
    let choice = console.ask("Enter your choice (1-5): ")?;
    let field = match BookField::from_selector(&choice) {
        Ok(field) => field,
        Err(_) => return console.say(INVALID_CHOICE),
    };

    let edit = match field {
        BookField::Title => BookEdit::Title(console.ask("Enter new title: ")?),
        BookField::Author => BookEdit::Author(console.ask("Enter new author: ")?),
        BookField::Year => BookEdit::Year(console.ask_year("Enter new publication year: ")?),
        BookField::Genre => BookEdit::Genre(console.ask("Enter new genre: ")?),
        BookField::Read => {
            BookEdit::Read(console.ask_yes_no("Have you read this book? (yes/no): ")?)
        }
    };

    store
        .edit_book(&title, edit)
        .context("Failed to update book")?;
    console.announce("✓ Book details updated successfully!")
}

/// Prompt for a title and flip its read flag
pub fn toggle_read<R: BufRead, W: Write>(
    store: &mut Store,
    console: &mut Console<R, W>,
) -> Result<()> {
    console.header("MARK A BOOK AS READ/UNREAD")?;

    let title = console.ask("Enter the title of the book: ")?;
    match store.toggle_read(&title).context("Failed to update book")? {
        Some(read) => console.announce(format!(
            "✓ '{}' marked as {}!",
            title,
            status_label(read)
        )),
        None => console.say(NOT_FOUND),
    }
}

/// Add a book from command-line arguments
///
/// The year must already be valid; nothing is written otherwise.
pub fn add_direct(
    store: &mut Store,
    title: String,
    author: String,
    year: String,
    genre: String,
    read: bool,
    output: &Output,
) -> Result<()> {
    let year = parse_year(&year)?;
    let book = Book::new(title, author, year, genre, read);

    store
        .add_book(book.clone())
        .context("Failed to add book")?;

    output.success(&format!("Added '{}'", book.title));
    output.print_book(&book);
    Ok(())
}

/// Remove a book named on the command line
pub fn remove_direct(store: &mut Store, title: String, output: &Output) -> Result<()> {
    match store.remove_book(&title).context("Failed to remove book")? {
        Some(book) => output.success(&format!("Removed '{}'", book.title)),
        None => output.message(NOT_FOUND),
    }
    Ok(())
}

/// Toggle the read flag of a book named on the command line
pub fn toggle_direct(store: &mut Store, title: String, output: &Output) -> Result<()> {
    match store.toggle_read(&title).context("Failed to update book")? {
        Some(read) => output.success(&format!("'{}' marked as {}", title, status_label(read))),
        None => output.message(NOT_FOUND),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use shelf_core::{Config, ValidationError};
    use tempfile::TempDir;

    fn open_store(temp_dir: &TempDir) -> Store {
        Store::open_with_config(Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        })
        .unwrap()
    }

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    #[test]
    fn test_add_direct_rejects_bad_year() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        let err = add_direct(
            &mut store,
            "Dune".into(),
            "Frank Herbert".into(),
            "MCMLXV".into(),
            "SF".into(),
            false,
            &quiet(),
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::InvalidYear { .. })
        ));
        assert!(store.books().is_empty());
        assert!(!store.config().library_path().exists());
    }

    #[test]
    fn test_direct_add_toggle_remove() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        add_direct(
            &mut store,
            " Dune ".into(),
            "Frank Herbert".into(),
            " 1965 ".into(),
            "SF".into(),
            false,
            &quiet(),
        )
        .unwrap();
        assert_eq!(store.books()[0].title, "Dune");
        assert_eq!(store.books()[0].year, 1965);

        toggle_direct(&mut store, "dune".into(), &quiet()).unwrap();
        assert!(store.books()[0].read);

        // Missing titles are reported, not errors
        remove_direct(&mut store, "Emma".into(), &quiet()).unwrap();
        assert_eq!(store.books().len(), 1);

        remove_direct(&mut store, "DUNE".into(), &quiet()).unwrap();
        assert!(store.books().is_empty());
    }
}
