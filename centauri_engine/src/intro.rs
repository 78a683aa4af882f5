//! Opening scene for a new session: title, wake-up, and the player's name.

use anyhow::{Result, bail};
use log::info;

use crate::console::InputEvent;
use crate::content::{CPU_NAME, GAME_TITLE};
use crate::game::Game;
use crate::view::{ViewItem, Voice};

fn cpu(line: impl Into<String>) -> ViewItem {
    ViewItem::Speech {
        speaker: CPU_NAME.to_string(),
        line: line.into(),
        voice: Voice::Cpu,
    }
}

/// Play the intro and ask for the player's name until a non-empty one is given.
///
/// # Errors
/// - on console failure, or if input closes before a name is entered
pub fn run_intro(game: &mut Game) -> Result<()> {
    game.view.push(ViewItem::Title(GAME_TITLE.to_string()));
    game.view.push(ViewItem::Banner("! EMERGENCY WAKE PROTOCOL !".to_string()));
    game.view.push(ViewItem::Narration(
        "The cryopod lid hisses open. Alarms you don't recognize are chiming somewhere far off, \
         and the bridge lights are stuck on red."
            .to_string(),
    ));
    game.view.push(cpu(
        "Good, you're awake. I am the ship's computer. Several systems have stopped answering me, \
         and I can't fix them alone.",
    ));
    game.view.push(cpu("Before anything else: what should I call you?"));
    game.flush()?;

    loop {
        match game.console.read_line("Name: ")? {
            InputEvent::Line(name) => {
                if game.session.set_player_name(&name) {
                    break;
                }
                game.view.push(ViewItem::Hint("A name, please. Anything will do.".to_string()));
                game.flush()?;
            },
            InputEvent::Interrupted => {},
            InputEvent::Eof => bail!("input closed before a name was entered"),
        }
    }
    info!("player name set to {:?}", game.session.player_name);

    let name = game.session.player_name.clone();
    game.view.push(ViewItem::Speech {
        speaker: name.clone(),
        line: format!("Call me {name}. What's going on?"),
        voice: Voice::Player,
    });
    game.view.push(cpu(format!(
        "Welcome back, Captain {name}. Your suit is sealed and powered. Start with the console in front of you."
    )));
    game.view.push(ViewItem::Hint("Type ? for a list of commands.".to_string()));
    game.flush()?;
    game.commit_log_entry();
    Ok(())
}
