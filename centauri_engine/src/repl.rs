//! REPL and command handling.
//!
//! The game runs in a read-eval-print loop. Each command's handler pushes its
//! output into the game's [`View`](crate::view::View); after dispatch the view is
//! flushed and everything shown becomes one entry in the player's log book.

pub mod examine;
pub mod inventory;
pub mod movement;
pub mod system;

pub use examine::*;
pub use inventory::*;
pub use movement::*;
pub use system::*;

use anyhow::Result;
use log::info;

use crate::command::{Command, parse_command};
use crate::console::InputEvent;
use crate::game::{Flow, Game, GameEnd};
use crate::view::ViewItem;

/// Run the main loop until the session ends.
///
/// End of input is treated as `quit`.
///
/// # Errors
/// - on console failure, or if the session refers to a room that doesn't exist
pub fn run_repl(game: &mut Game) -> Result<GameEnd> {
    #[allow(clippy::enum_glob_use)]
    use Command::*;

    game.show_meters()?;
    let mut turn: u64 = 0;
    loop {
        turn += 1;
        let input = match game.console.read_line("> ")? {
            InputEvent::Line(line) => line,
            InputEvent::Eof => "quit".to_string(),
            InputEvent::Interrupted => {
                game.view.push(ViewItem::Hint("Command canceled.".into()));
                game.flush()?;
                continue;
            },
        };
        if input.trim().is_empty() {
            continue;
        }
        info!("================> COMMAND {turn}: {} <================", input.trim());
        game.view.record_input(&input);

        let flow = match parse_command(&input) {
            Help => help_handler(game),
            Log => log_handler(game)?,
            Map => map_handler(game)?,
            Look => look_handler(game)?,
            Examine(target) => examine_handler(game, target.as_deref())?,
            UseItem(item) => use_handler(game, item.as_deref())?,
            Inventory => inv_handler(game),
            Go(direction) => move_handler(game, direction)?,
            Save(path) => save_handler(game, path.as_deref()),
            Quit => quit_handler(game),
            Unknown(raw) => {
                info!("unrecognized command {raw:?}");
                game.view.push(ViewItem::Error(format!(
                    "Didn't quite catch \"{raw}\". Type ? for a list of commands."
                )));
                Flow::Continue
            },
        };
        game.flush()?;
        game.commit_log_entry();
        if let Flow::End(end) = flow {
            info!("session ended after {turn} commands: {end:?}");
            return Ok(end);
        }
        game.show_meters()?;
    }
}
