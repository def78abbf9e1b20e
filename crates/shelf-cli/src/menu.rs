//! Interactive main menu
//!
//! A two-state loop: while `Running`, render the menu, read a choice and
//! dispatch it. Choosing exit, or closing the input, saves the library and
//! moves to `Terminated`.

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::info;

use shelf_core::Store;

use crate::commands;
use crate::console::{is_input_closed, Console};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Running,
    Terminated,
}

/// Entries of the main menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Remove,
    Edit,
    ToggleRead,
    Sort,
    Export,
    Display,
    Statistics,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 9] = [
        MenuChoice::Add,
        MenuChoice::Remove,
        MenuChoice::Edit,
        MenuChoice::ToggleRead,
        MenuChoice::Sort,
        MenuChoice::Export,
        MenuChoice::Display,
        MenuChoice::Statistics,
        MenuChoice::Exit,
    ];

    /// Parse a choice token ("1".."9")
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::Remove),
            "3" => Some(MenuChoice::Edit),
            "4" => Some(MenuChoice::ToggleRead),
            "5" => Some(MenuChoice::Sort),
            "6" => Some(MenuChoice::Export),
            "7" => Some(MenuChoice::Display),
            "8" => Some(MenuChoice::Statistics),
            "9" => Some(MenuChoice::Exit),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Add => "Add a book",
            MenuChoice::Remove => "Remove a book",
            MenuChoice::Edit => "Edit a book",
            MenuChoice::ToggleRead => "Mark as Read/Unread",
            MenuChoice::Sort => "Sort Books",
            MenuChoice::Export => "Export Library",
            MenuChoice::Display => "Display Books",
            MenuChoice::Statistics => "Display Statistics",
            MenuChoice::Exit => "Exit",
        }
    }
}

pub struct Menu<'a, R, W> {
    store: &'a mut Store,
    console: Console<R, W>,
    state: MenuState,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(store: &'a mut Store, console: Console<R, W>) -> Self {
        Self {
            store,
            console,
            state: MenuState::Running,
        }
    }

    #[cfg(test)]
    fn state(&self) -> MenuState {
        self.state
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> Result<()> {
        self.console
            .announce("Welcome to your Personal Library Manager!")?;

        while self.state == MenuState::Running {
            match self.step() {
                Ok(()) => {}
                Err(e) if is_input_closed(&e) => {
                    info!("Input closed, leaving menu");
                    self.exit()?;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Render the menu, read one choice and act on it
    fn step(&mut self) -> Result<()> {
        self.render()?;
        let token = self.console.ask("Enter your choice (1-9): ")?;

        match MenuChoice::parse(&token) {
            Some(choice) => self.dispatch(choice),
            None => self
                .console
                .say("✗ Invalid choice! Please enter a valid option."),
        }
    }

    fn render(&mut self) -> Result<()> {
        self.console.say("")?;
        self.console.say("MAIN MENU")?;
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            self.console.say(format!("  [{}] {}", i + 1, choice.label()))?;
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::Add => commands::book::add(self.store, &mut self.console),
            MenuChoice::Remove => commands::book::remove(self.store, &mut self.console),
            MenuChoice::Edit => commands::book::edit(self.store, &mut self.console),
            MenuChoice::ToggleRead => commands::book::toggle_read(self.store, &mut self.console),
            MenuChoice::Sort => commands::library::sort(self.store, &mut self.console),
            MenuChoice::Export => commands::library::export(self.store, &mut self.console),
            MenuChoice::Display => commands::library::display(self.store, &mut self.console),
            MenuChoice::Statistics => commands::library::statistics(self.store, &mut self.console),
            MenuChoice::Exit => self.exit(),
        }
    }

    /// Save and terminate
    fn exit(&mut self) -> Result<()> {
        self.store.save()?;
        self.state = MenuState::Terminated;
        self.console.announce("Library saved! Goodbye!")
    }

    #[cfg(test)]
    fn into_console(self) -> Console<R, W> {
        self.console
    }
}
