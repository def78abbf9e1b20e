//! SHELF CLI
//!
//! Command-line interface for SHELF - personal book catalog.
//! Runs the interactive menu by default; subcommands expose the same
//! operations for scripting.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use shelf_core::{Config, StorageError, Store};

mod commands;
mod console;
mod logging;
mod menu;
mod output;

use console::Console;
use menu::Menu;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "SHELF - Personal book catalog")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to config file (overrides SHELF_CONFIG)
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (default)
    Menu,
    /// List all books
    #[command(alias = "ls")]
    List,
    /// Show reading statistics
    Stats,
    /// Add a book
    Add {
        /// Book title
        title: String,
        /// Author
        #[arg(short, long, default_value = "")]
        author: String,
        /// Publication year
        #[arg(short, long, allow_hyphen_values = true)]
        year: String,
        /// Genre
        #[arg(short, long, default_value = "")]
        genre: String,
        /// Mark as already read
        #[arg(long)]
        read: bool,
    },
    /// Remove the first book with the given title
    #[command(alias = "rm")]
    Remove {
        /// Book title (case-insensitive)
        title: String,
    },
    /// Flip the read status of a book
    Toggle {
        /// Book title (case-insensitive)
        title: String,
    },
    /// Sort the library
    Sort {
        /// Sort key: title, author or year
        key: String,
    },
    /// Write the plain-text export file
    Export,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, library_file, export_file, animate, ...)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let result = run(Cli::parse());

    if let Err(ref e) = result {
        let hint = e
            .chain()
            .find_map(|cause| cause.downcast_ref::<StorageError>())
            .and_then(StorageError::recovery_suggestion);
        if let Some(hint) = hint {
            eprintln!("Hint: {}", hint);
        }
    }

    result
}

fn run(cli: Cli) -> Result<()> {
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config_file.as_ref();

    // Config commands don't need the store
    if let Some(Commands::Config { command }) = &cli.command {
        return match command.clone() {
            Some(ConfigCommands::Show) | None => commands::config::show(config_path, &output),
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(config_path, key, value, &output)
            }
        };
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    logging::init(&config);

    let mut store = Store::open_with_config(config)?;

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => run_menu(&mut store),
        Commands::List => commands::library::list(&store, &output),
        Commands::Stats => commands::library::stats(&store, &output),
        Commands::Add {
            title,
            author,
            year,
            genre,
            read,
        } => commands::book::add_direct(&mut store, title, author, year, genre, read, &output),
        Commands::Remove { title } => commands::book::remove_direct(&mut store, title, &output),
        Commands::Toggle { title } => commands::book::toggle_direct(&mut store, title, &output),
        Commands::Sort { key } => commands::library::sort_direct(&mut store, key, &output),
        Commands::Export => commands::library::export_direct(&store, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

/// Run the interactive menu on stdin/stdout
fn run_menu(store: &mut Store) -> Result<()> {
    let config = store.config();
    let animation = (config.animate && atty::is(atty::Stream::Stdout))
        .then(|| Duration::from_millis(config.animation_delay_ms));

    let console = Console::new(io::stdin().lock(), io::stdout(), animation);
    Menu::new(store, console).run()
}
