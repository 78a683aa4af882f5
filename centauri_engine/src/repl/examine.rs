//! `repl::examine` module
//!
//! Handlers for interacting with the objects in a room.

use anyhow::Result;
use log::info;

use crate::content::{CPU_NAME, MISSION_HISTORY, NOMINAL};
use crate::events::fix_event;
use crate::game::{Flow, Game, GameEnd};
use crate::item::Item;
use crate::room::{ObjectAction, RoomId};
use crate::view::{ViewItem, Voice};

const NOTHING: &str = "nothing";

/// Examine an object in the current room. With no target, lists the room's
/// objects and asks which one.
///
/// # Errors
/// - on console failure, or if the player's room doesn't exist
pub fn examine_handler(game: &mut Game, target: Option<&str>) -> Result<Flow> {
    let names = game.session.current_room()?.object_names();
    let target = if let Some(target) = target {
        target.to_string()
    } else {
        let mut options: Vec<&str> = names.clone();
        options.push(NOTHING);
        game.view.push(ViewItem::Menu {
            prompt: "Examine what?".into(),
            options: options.iter().map(|name| (*name).to_string()).collect(),
        });
        game.flush()?;
        let choice = game.console.prompt_choice(&options)?;
        if choice == NOTHING {
            return Ok(Flow::Continue);
        }
        choice
    };

    let room = game.session.current_room()?;
    let room_id = room.id;
    let Some(action) = room.object(&target) else {
        game.view.push(ViewItem::ActionFailure(format!("There is no {target} here.")));
        return Ok(Flow::Continue);
    };
    info!("examining '{target}' in room {room_id} ({action:?})");
    match action {
        ObjectAction::Console => console_menu(game),
        ObjectAction::StorageBox => {
            open_box(game, room_id)?;
            Ok(Flow::Continue)
        },
        ObjectAction::Door => {
            let text = if game.session.doors_locked() {
                "The door is sealed tight. Its lock is controlled from the bridge console."
            } else {
                "The door stands open onto the corridor below."
            };
            game.view.push(ViewItem::Narration(text.into()));
            Ok(Flow::Continue)
        },
        ObjectAction::Machinery => {
            if game.session.events.is_fix_target(room_id) && !game.session.is_fix_resolved(room_id) {
                fix_event(game, room_id)
            } else {
                game.view.push(ViewItem::Narration(NOMINAL.into()));
                Ok(Flow::Continue)
            }
        },
    }
}

fn open_box(game: &mut Game, room_id: RoomId) -> Result<()> {
    let room = game.session.room_mut(room_id)?;
    if room.flags.looted {
        game.view.push(ViewItem::ActionFailure("The storage box is empty.".into()));
        return Ok(());
    }
    room.flags.looted = true;
    game.session.inventory.add(Item::energy_pack());
    game.session.inventory.add(Item::oxygen_canister());
    game.view.push(ViewItem::ActionSuccess(
        "Inside the storage box you find an energy pack and an oxygen canister.".into(),
    ));
    Ok(())
}

/// The bridge console's menu. Stays open until the player closes it.
fn console_menu(game: &mut Game) -> Result<Flow> {
    loop {
        let homeward = game.session.mainframe_cleared();
        let mut options = vec![
            "a) Read mission history".to_string(),
            "b) Unlock doors".to_string(),
            "c) Close".to_string(),
        ];
        let mut keys = vec!["a", "b", "c"];
        if homeward {
            options.push("d) Set course home".to_string());
            keys.push("d");
        }
        game.view.push(ViewItem::Menu {
            prompt: "The console flickers awake.".into(),
            options,
        });
        game.flush()?;

        match game.console.prompt_choice(&keys)?.as_str() {
            "a" => game.view.push(ViewItem::Narration(MISSION_HISTORY.into())),
            "b" => {
                if game.session.unlock_doors() {
                    game.view.push(ViewItem::ActionSuccess("Somewhere behind you, a lock clunks open.".into()));
                    game.view.push(ViewItem::Speech {
                        speaker: CPU_NAME.to_string(),
                        line: "Doors unlocked. Be careful out there. Several systems are reporting faults.".into(),
                        voice: Voice::Cpu,
                    });
                } else {
                    game.view.push(ViewItem::ActionFailure("The doors are already unlocked.".into()));
                }
            },
            "d" if homeward => {
                info!("course set for home");
                game.view.push(ViewItem::Narration(
                    "You punch in the coordinates. The engines swell, the stars wheel, and the ship turns for home."
                        .into(),
                ));
                return Ok(Flow::End(GameEnd::Won));
            },
            _ => return Ok(Flow::Continue),
        }
    }
}
