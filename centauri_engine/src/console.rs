//! The presentation contract.
//!
//! The engine never touches the terminal directly. It hands semantic
//! [`ViewItem`]s and meter readings to a [`Console`] and asks it for input.

use std::time::Duration;

use anyhow::{Result, bail};

use crate::view::{Meters, ViewItem};

/// Outcome of reading a line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

/// Everything the engine needs from a front end.
pub trait Console {
    /// Display a block of items, paginating if it is taller than the screen.
    ///
    /// # Errors
    /// - on terminal I/O failure
    fn render(&mut self, items: &[ViewItem]) -> Result<()>;

    /// Refresh the status meters.
    ///
    /// # Errors
    /// - on terminal I/O failure
    fn show_meters(&mut self, meters: &Meters) -> Result<()>;

    /// Read one line of free text.
    ///
    /// # Errors
    /// - on terminal I/O failure
    fn read_line(&mut self, prompt: &str) -> Result<InputEvent>;

    /// Block until a single key is pressed.
    ///
    /// # Errors
    /// - on terminal I/O failure
    fn read_key(&mut self) -> Result<char>;

    /// Wait up to `wait` for a key press.
    ///
    /// # Errors
    /// - on terminal I/O failure
    fn poll_key(&mut self, wait: Duration) -> Result<Option<char>>;

    /// Prompt until the player enters one of `allowed` (trimmed, case-insensitive)
    /// and return the matching entry.
    ///
    /// # Errors
    /// - on terminal I/O failure or end of input
    fn prompt_choice(&mut self, allowed: &[&str]) -> Result<String> {
        loop {
            match self.read_line("> ")? {
                InputEvent::Line(line) => {
                    let wanted = line.trim().to_lowercase();
                    if let Some(choice) = allowed.iter().find(|option| option.to_lowercase() == wanted) {
                        return Ok((*choice).to_string());
                    }
                },
                InputEvent::Eof => bail!("input closed while waiting for one of {allowed:?}"),
                InputEvent::Interrupted => {},
            }
        }
    }
}
