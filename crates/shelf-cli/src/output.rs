//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use shelf_core::{Book, LibraryStats};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print the library listing
    pub fn print_books(&self, books: &[Book]) {
        match self.format {
            OutputFormat::Human => {
                if books.is_empty() {
                    println!("{}", EMPTY_LIBRARY);
                    return;
                }
                for (i, book) in books.iter().enumerate() {
                    println!("{}", listing_line(i + 1, book));
                }
                println!("\n{} book(s)", books.len());
            }
            OutputFormat::Json => print_json(books),
            OutputFormat::Quiet => {
                for book in books {
                    println!("{}", book.title);
                }
            }
        }
    }

    /// Print a single book
    pub fn print_book(&self, book: &Book) {
        match self.format {
            OutputFormat::Human => println!("{}", book),
            OutputFormat::Json => print_json(book),
            OutputFormat::Quiet => println!("{}", book.title),
        }
    }

    /// Print reading statistics
    pub fn print_stats(&self, stats: &LibraryStats) {
        match self.format {
            OutputFormat::Human => {
                for line in stats_lines(stats) {
                    println!("{}", line);
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "total": stats.total,
                        "read": stats.read,
                        "read_percentage": stats.read_percentage()
                    })
                );
            }
            OutputFormat::Quiet => println!("{}/{}", stats.read, stats.total),
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

pub const EMPTY_LIBRARY: &str = "Your library is empty!";

pub const NO_BOOKS_FOR_STATS: &str = "No books in library to display statistics!";

/// One numbered row of the library listing
pub fn listing_line(index: usize, book: &Book) -> String {
    let marker = if book.read { "✓ Read" } else { "… Unread" };
    format!(
        "{}. {} by {} ({}) - {} - {}",
        index, book.title, book.author, book.year, book.genre, marker
    )
}

/// Human-readable statistics, or the empty-library message
pub fn stats_lines(stats: &LibraryStats) -> Vec<String> {
    match stats.read_percentage() {
        None => vec![NO_BOOKS_FOR_STATS.to_string()],
        Some(percentage) => vec![
            format!("Total books: {}", stats.total),
            format!("Books read: {} ({:.2}%)", stats.read, percentage),
        ],
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to format JSON: {}", e),
    }
}
