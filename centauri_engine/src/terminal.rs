//! Terminal front end.
//!
//! [`TerminalConsole`] renders view items with `colored` and `textwrap`, pages
//! long output, keeps the status bar on its own line, and reads single keys in
//! crossterm raw mode. Without a line editor, keys are read as lines.

mod input;

use std::io::{self, IsTerminal, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use log::warn;
use textwrap::termwidth;

use crate::console::{Console, InputEvent};
use crate::style::GameStyle;
use crate::view::{Meters, ViewItem};

use input::{LineInput, key_of_line};

/// Rows kept free below each page for the continue prompt.
const PAGE_MARGIN: usize = 2;

/// Raw mode for as long as the guard lives.
struct RawMode;
impl RawMode {
    fn enable() -> Result<RawMode> {
        enable_raw_mode().context("enabling raw mode")?;
        Ok(RawMode)
    }
}
impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            warn!("failed to leave raw mode: {err}");
        }
    }
}

/// Map a key event to the character the engine understands.
fn key_char(key: KeyEvent) -> Result<Option<char>> {
    if key.kind != KeyEventKind::Press {
        return Ok(None);
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => bail!("interrupted"),
        KeyCode::Char(c) => Ok(Some(c)),
        KeyCode::Enter => Ok(Some('\n')),
        KeyCode::Esc => Ok(Some('q')),
        KeyCode::Left => Ok(Some('a')),
        KeyCode::Right => Ok(Some('d')),
        _ => Ok(None),
    }
}

pub struct TerminalConsole {
    input: LineInput,
    meters_in_place: bool,
    meter_line_open: bool,
}
impl TerminalConsole {
    pub fn new() -> TerminalConsole {
        TerminalConsole {
            input: LineInput::open(),
            meters_in_place: io::stdout().is_terminal(),
            meter_line_open: false,
        }
    }

    /// End the in-place status line so the next output starts on a fresh row.
    fn close_meter_line(&mut self) {
        if self.meter_line_open {
            println!();
            self.meter_line_open = false;
        }
    }

    fn page_height() -> usize {
        terminal::size()
            .map(|(_, rows)| usize::from(rows))
            .unwrap_or(24)
            .saturating_sub(PAGE_MARGIN)
            .max(4)
    }
}
impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn render(&mut self, items: &[ViewItem]) -> Result<()> {
        self.close_meter_line();
        let width = termwidth();
        let text = items
            .iter()
            .map(|item| item.styled(width))
            .collect::<Vec<_>>()
            .join("\n\n");
        let lines: Vec<&str> = text.lines().collect();
        let page = Self::page_height();
        let mut stdout = io::stdout();
        for (n, chunk) in lines.chunks(page).enumerate() {
            if n > 0 {
                writeln!(stdout, "{}", "<Press any key to continue>".hint_style())?;
                stdout.flush()?;
                self.read_key()?;
            }
            for line in chunk {
                writeln!(stdout, "{line}")?;
            }
        }
        writeln!(stdout)?;
        stdout.flush()?;
        Ok(())
    }

    fn show_meters(&mut self, meters: &Meters) -> Result<()> {
        let mut stdout = io::stdout();
        if self.meters_in_place {
            write!(stdout, "\r\x1b[2K{}", meters.styled())?;
            self.meter_line_open = true;
        } else {
            writeln!(stdout, "{}", meters.styled())?;
        }
        stdout.flush()?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<InputEvent> {
        self.close_meter_line();
        self.input.read_line(prompt).context("reading a line of input")
    }

    fn read_key(&mut self) -> Result<char> {
        if let Some(lines) = self.input.queued() {
            return match lines.next_line().context("reading a key")? {
                InputEvent::Line(line) => Ok(key_of_line(&line)),
                InputEvent::Eof | InputEvent::Interrupted => Ok('q'),
            };
        }
        let _raw = RawMode::enable()?;
        loop {
            if let Event::Key(key) = event::read().context("reading a key")? {
                if let Some(c) = key_char(key)? {
                    return Ok(c);
                }
            }
        }
    }

    fn poll_key(&mut self, wait: Duration) -> Result<Option<char>> {
        if let Some(lines) = self.input.queued() {
            return match lines.next_line_within(wait).context("polling for a key")? {
                Some(InputEvent::Line(line)) => Ok(Some(key_of_line(&line))),
                Some(InputEvent::Eof | InputEvent::Interrupted) => {
                    thread::sleep(wait);
                    Ok(None)
                },
                None => Ok(None),
            };
        }
        let _raw = RawMode::enable()?;
        if event::poll(wait).context("polling for a key")? {
            if let Event::Key(key) = event::read().context("reading a key")? {
                return key_char(key);
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn releases_are_ignored() {
        let mut key = KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE);
        assert_eq!(key_char(key).unwrap(), Some('1'));
        key.kind = KeyEventKind::Release;
        assert_eq!(key_char(key).unwrap(), None);
    }

    #[test]
    fn ctrl_c_is_an_error() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(key_char(key).is_err());
    }

    #[test]
    fn arrows_page_the_log() {
        assert_eq!(key_char(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE)).unwrap(), Some('a'));
        assert_eq!(key_char(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)).unwrap(), Some('q'));
    }
}
