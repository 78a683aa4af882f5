//! `repl::system` module
//!
//! Contains repl loop handlers for commands that are for system utilities.

use std::path::PathBuf;

use anyhow::Result;
use log::{info, warn};

use crate::content::COMMANDS;
use crate::game::{Flow, Game, GameEnd};
use crate::repl::describe_room;
use crate::save_file::write_save;
use crate::ship::SHIP;
use crate::view::{MapCell, ViewItem};

/// Show the list of commands.
pub fn help_handler(game: &mut Game) -> Flow {
    let entries = COMMANDS
        .iter()
        .map(|(cmd, desc)| ((*cmd).to_string(), (*desc).to_string()))
        .collect();
    game.view.push(ViewItem::Help(entries));
    Flow::Continue
}

/// Describe the current room again.
///
/// # Errors
/// - if the player's room doesn't exist
pub fn look_handler(game: &mut Game) -> Result<Flow> {
    describe_room(game)?;
    Ok(Flow::Continue)
}

/// Show the deck map with the player's room marked. Unvisited rooms are unlabeled.
///
/// # Errors
/// - on console failure
pub fn map_handler(game: &mut Game) -> Result<Flow> {
    let grid: Vec<Vec<Option<MapCell>>> = SHIP
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    let room = game.session.room((*cell)?)?;
                    Some(MapCell {
                        name: if room.flags.visited { room.name } else { "???" },
                        color: room.color,
                        here: room.id == game.session.room,
                    })
                })
                .collect::<Vec<_>>()
        })
        .collect();
    game.view.push(ViewItem::Map(grid));
    game.wait_for_key()?;
    Ok(Flow::Continue)
}

/// Page through the log book, newest entry first. `a`/`d` step and wrap; `q` closes.
///
/// # Errors
/// - on console failure
pub fn log_handler(game: &mut Game) -> Result<Flow> {
    let total = game.session.log_book.len();
    if total == 0 {
        game.view.push(ViewItem::Narration("The log book is empty.".into()));
        return Ok(Flow::Continue);
    }
    let mut index = total - 1;
    loop {
        let text = game.session.log_book.get(index).unwrap_or_default().to_string();
        game.view.push(ViewItem::LogPage { index, total, text });
        game.flush()?;
        match game.console.read_key()?.to_ascii_lowercase() {
            'a' => index = if index == 0 { total - 1 } else { index - 1 },
            'd' => index = (index + 1) % total,
            'q' => return Ok(Flow::Continue),
            _ => {},
        }
    }
}

/// Save to `path`, or to the session's default save path. Failure is reported and play goes on.
pub fn save_handler(game: &mut Game, path: Option<&str>) -> Flow {
    let path = path.map_or_else(|| game.save_path.clone(), PathBuf::from);
    match write_save(&path, &game.session) {
        Ok(()) => {
            game.view
                .push(ViewItem::ActionSuccess(format!("Game saved to {}.", path.display())));
        },
        Err(err) => {
            let err = anyhow::Error::from(err);
            warn!("save failed: {err:#}");
            game.view.push(ViewItem::Error(format!("Save failed: {err:#}")));
        },
    }
    Flow::Continue
}

/// End the session without saving.
pub fn quit_handler(game: &mut Game) -> Flow {
    info!(
        "{} quit in room {} after {} moves",
        game.session.player_name, game.session.room, game.session.moves
    );
    game.view.push(ViewItem::Narration("You settle back into the cryopod. Ending session.".into()));
    Flow::End(GameEnd::Quit)
}
