pub mod book;
pub mod config;
pub mod library;

pub const NOT_FOUND: &str = "✗ Book not found!";

pub const INVALID_CHOICE: &str = "✗ Invalid choice!";
