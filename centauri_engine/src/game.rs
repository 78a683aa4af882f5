//! The running game: session state plus the collaborators every handler needs.

use std::path::PathBuf;

use anyhow::Result;

use crate::config::GameConfig;
use crate::console::Console;
use crate::dice::Dice;
use crate::session::Session;
use crate::view::{View, ViewItem};

/// Why a session was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossCause {
    /// Energy ran out during a hack.
    Overpowered,
    /// Oxygen ran out.
    Suffocated,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    Won,
    Lost(LossCause),
    Quit,
}

/// What the REPL should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    End(GameEnd),
}

pub struct Game<'a> {
    pub session: Session,
    pub config: GameConfig,
    pub view: View,
    pub console: &'a mut dyn Console,
    pub dice: &'a mut dyn Dice,
    /// Default destination for `save`.
    pub save_path: PathBuf,
}
impl<'a> Game<'a> {
    pub fn new(session: Session, config: GameConfig, console: &'a mut dyn Console, dice: &'a mut dyn Dice) -> Self {
        let save_path = config.save_path.clone();
        Game {
            session,
            config,
            view: View::new(),
            console,
            dice,
            save_path,
        }
    }

    #[must_use]
    pub fn with_save_path(mut self, path: PathBuf) -> Self {
        self.save_path = path;
        self
    }

    /// Render everything queued in the view.
    ///
    /// # Errors
    /// - on console failure
    pub fn flush(&mut self) -> Result<()> {
        self.view.flush(&mut *self.console)
    }

    /// Redraw the status bar from the session's vitals.
    ///
    /// # Errors
    /// - on console failure
    pub fn show_meters(&mut self) -> Result<()> {
        let meters = self.session.meters();
        self.console.show_meters(&meters)
    }

    /// Flush, then block until a key is pressed.
    ///
    /// # Errors
    /// - on console failure
    pub fn wait_for_key(&mut self) -> Result<()> {
        self.view.push(ViewItem::Hint("Press any key to continue...".into()));
        self.flush()?;
        self.console.read_key()?;
        Ok(())
    }

    /// Move the text shown since the last call into the log book.
    pub fn commit_log_entry(&mut self) {
        if let Some(entry) = self.view.take_entry() {
            self.session.log_book.record(&entry);
        }
    }
}
