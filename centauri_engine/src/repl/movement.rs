//! `repl::movement` module
//!
//! Contains repl loop handlers for commands that change player location.

use anyhow::Result;
use log::info;

use crate::events::{confront_mainframe, quick_event};
use crate::game::{Flow, Game, GameEnd, LossCause};
use crate::ship::{self, Direction, FINAL_ROOM};
use crate::view::ViewItem;

/// Oxygen at or below this level triggers a warning after ambient use.
const LOW_OXYGEN: u32 = 3;

/// Move the player one room in `direction`, if there's an open door that way.
///
/// A room's first visit runs its hull breach (if it has one) before it is described.
///
/// # Errors
/// - if the destination room doesn't exist, or on console failure
pub fn move_handler(game: &mut Game, direction: Direction) -> Result<Flow> {
    let from = game.session.room;
    let to = match ship::step(from, direction, game.session.doors_locked()) {
        Ok(to) => to,
        Err(blocked) => {
            info!("move {direction} from room {from} blocked: {blocked}");
            game.view.push(ViewItem::ActionFailure(blocked.to_string()));
            return Ok(Flow::Continue);
        },
    };

    let room = game.session.room_mut(to)?;
    let first_visit = room.mark_visited();
    let (name, color) = (room.name, room.color);
    game.session.room = to;
    game.session.moves += 1;
    info!(
        "{} moved {direction} from room {from} to {name} ({to}){}",
        game.session.player_name,
        if first_visit { ", first visit" } else { "" }
    );
    game.view.push(ViewItem::RoomEntered {
        name: name.to_string(),
        color,
    });

    if first_visit {
        game.flush()?;
        if let Flow::End(end) = quick_event(game, to)? {
            return Ok(Flow::End(end));
        }
        describe_room(game)?;
    }

    if let Flow::End(end) = breathe(game) {
        return Ok(Flow::End(end));
    }
    if to == FINAL_ROOM {
        game.flush()?;
        return confront_mainframe(game);
    }
    Ok(Flow::Continue)
}

/// Ambient oxygen use: one point every `moves_per_oxygen` legal moves.
fn breathe(game: &mut Game) -> Flow {
    let every = game.config.moves_per_oxygen;
    if every == 0 || game.session.moves % every != 0 {
        return Flow::Continue;
    }
    let oxygen = &mut game.session.vitals.oxygen;
    oxygen.drain(1);
    info!("ambient oxygen use after {} moves: {oxygen}", game.session.moves);
    if oxygen.is_empty() {
        game.view.push(ViewItem::Danger(
            "Your suit's last reserve runs dry. The corridor tilts, and the lights go out.".into(),
        ));
        return Flow::End(GameEnd::Lost(LossCause::Suffocated));
    }
    if oxygen.current() <= LOW_OXYGEN {
        game.view.push(ViewItem::Hint(
            "Oxygen is running low. An oxygen canister would help.".into(),
        ));
    }
    Flow::Continue
}

/// Push the current room's full description, including any visible malfunction.
///
/// # Errors
/// - if the player's room doesn't exist
pub fn describe_room(game: &mut Game) -> Result<()> {
    let room = game.session.current_room()?;
    let malfunctioning = game.session.events.is_fix_target(room.id) && !room.flags.fix_resolved;
    let mut items = vec![ViewItem::RoomDescription {
        name: room.name.to_string(),
        description: room.info.to_string(),
        color: room.color,
    }];
    if malfunctioning {
        items.push(ViewItem::Danger(room.danger.to_string()));
    }
    items.push(ViewItem::Hint(format!("You can examine: {}", room.object_names().join(", "))));
    for item in items {
        game.view.push(item);
    }
    Ok(())
}
