//! Whole-library command handlers: sort, export, listing and statistics

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use shelf_core::{SortKey, Store};

use super::INVALID_CHOICE;
use crate::console::Console;
use crate::output::{listing_line, stats_lines, Output, EMPTY_LIBRARY};

/// Prompt for a sort key and reorder the library
pub fn sort<R: BufRead, W: Write>(store: &mut Store, console: &mut Console<R, W>) -> Result<()> {
    console.header("SORT BOOKS")?;

    console.say("Sort by:")?;
    for (i, key) in SortKey::ALL.iter().enumerate() {
        console.say(format!("  [{}] {}", i + 1, key.label()))?;
    }
    let choice = console.ask("Enter your choice (1-3): ")?;
    let key = match SortKey::from_selector(&choice) {
        Ok(key) => key,
        Err(_) => return console.say(INVALID_CHOICE),
    };

    store.sort(key).context("Failed to sort library")?;
    console.announce("✓ Books sorted successfully!")
}

/// Write the export file
pub fn export<R: BufRead, W: Write>(store: &Store, console: &mut Console<R, W>) -> Result<()> {
    let path = store.export()?;
    console.announce(format!("✓ Library exported to '{}'!", path.display()))
}

/// Print every book, numbered from 1
pub fn display<R: BufRead, W: Write>(store: &Store, console: &mut Console<R, W>) -> Result<()> {
    console.header("YOUR LIBRARY COLLECTION")?;

    if store.library().is_empty() {
        return console.say(EMPTY_LIBRARY);
    }

    for (i, book) in store.books().iter().enumerate() {
        console.say(listing_line(i + 1, book))?;
    }
    console.say("")
}

/// Print total, read count and read percentage
pub fn statistics<R: BufRead, W: Write>(
    store: &Store,
    console: &mut Console<R, W>,
) -> Result<()> {
    console.header("LIBRARY STATISTICS")?;

    for line in stats_lines(&store.stats()) {
        console.say(line)?;
    }
    Ok(())
}

/// List books
pub fn list(store: &Store, output: &Output) -> Result<()> {
    output.print_books(store.books());
    Ok(())
}

/// Show statistics
pub fn stats(store: &Store, output: &Output) -> Result<()> {
    output.print_stats(&store.stats());
    Ok(())
}

/// Sort by a key named on the command line
pub fn sort_direct(store: &mut Store, key: String, output: &Output) -> Result<()> {
    let key = SortKey::from_name(&key)?;
    store.sort(key).context("Failed to sort library")?;
    output.success(&format!("Sorted by {}", key.label().to_lowercase()));
    Ok(())
}

/// Write the export file
pub fn export_direct(store: &Store, output: &Output) -> Result<()> {
    let path = store.export()?;
    output.success(&format!(
        "Exported {} book(s) to {}",
        store.library().len(),
        path.display()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use shelf_core::{Book, Config};
    use tempfile::TempDir;

    #[test]
    fn test_sort_direct_by_name() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        })
        .unwrap();
        store.add_book(Book::new("banana", "b", 2, "g", false)).unwrap();
        store.add_book(Book::new("Apple", "a", 1, "g", false)).unwrap();
        let output = Output::new(OutputFormat::Quiet);

        assert!(sort_direct(&mut store, "genre".into(), &output).is_err());
        assert_eq!(store.books()[0].title, "banana");

        sort_direct(&mut store, "TITLE".into(), &output).unwrap();
        let titles: Vec<&str> = store.books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple", "banana"]);
    }
}
