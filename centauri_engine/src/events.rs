//! Event registry and the flows that run events.
//!
//! At session start a few rooms are drawn from each eligible pool:
//! - **fix targets** hide a malfunction behind their machinery, cleared by a hack
//! - **quick targets** suffer a timed hull breach the first time they're entered
//!
//! Clearing every fix target unlocks the endgame: a final hack in the Mainframe
//! whose difficulty scales with the number of malfunctions already cleared.

use std::collections::BTreeSet;

use anyhow::Result;
use log::{info, warn};

use crate::battle::{self, Battle, BattleOutcome};
use crate::content::{CPU_NAME, ROOMS, malfunction_text};
use crate::dice::Dice;
use crate::game::{Flow, Game, GameEnd, LossCause};
use crate::hazard::TimedHazard;
use crate::room::RoomId;
use crate::ship::FINAL_ROOM;
use crate::view::{ViewItem, Voice};

/// Which rooms hold events this session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventRegistry {
    pub fix_targets: BTreeSet<RoomId>,
    pub quick_targets: BTreeSet<RoomId>,
    /// Quick targets whose hazard hasn't fired yet.
    pub pending_quick: BTreeSet<RoomId>,
}
impl EventRegistry {
    /// Draw `fix_count` fix targets and `quick_count` quick targets from their pools.
    /// Counts are clamped to at least one and at most the pool size.
    pub fn assign(fix_count: usize, quick_count: usize, dice: &mut dyn Dice) -> EventRegistry {
        let fix_pool = pool(|spec| spec.fix_eligible);
        let quick_pool = pool(|spec| spec.quick_eligible);
        let fix_targets: BTreeSet<RoomId> = draw(&fix_pool, fix_count, dice).into_iter().collect();
        let quick_targets: BTreeSet<RoomId> = draw(&quick_pool, quick_count, dice).into_iter().collect();
        EventRegistry {
            pending_quick: quick_targets.clone(),
            fix_targets,
            quick_targets,
        }
    }

    pub fn is_fix_target(&self, room: RoomId) -> bool {
        self.fix_targets.contains(&room)
    }

    pub fn is_quick_pending(&self, room: RoomId) -> bool {
        self.pending_quick.contains(&room)
    }

    /// Mark a quick target's hazard as spent. Returns `true` if it was pending.
    pub fn take_quick(&mut self, room: RoomId) -> bool {
        self.pending_quick.remove(&room)
    }
}

fn pool(eligible: impl Fn(&crate::content::RoomSpec) -> bool) -> Vec<RoomId> {
    ROOMS
        .iter()
        .enumerate()
        .filter(|(_, spec)| eligible(spec))
        .map(|(id, _)| id)
        .collect()
}

/// Pick `count` distinct entries of `pool` (partial Fisher-Yates).
fn draw(pool: &[RoomId], count: usize, dice: &mut dyn Dice) -> Vec<RoomId> {
    let mut pool = pool.to_vec();
    let count = count.max(1).min(pool.len());
    for i in 0..count {
        let remaining = u32::try_from(pool.len() - i).unwrap_or(u32::MAX);
        let last = pool.len() - 1;
        let j = i + dice.roll(remaining) as usize;
        pool.swap(i, j.min(last));
    }
    pool.truncate(count);
    pool
}

fn cpu_says(game: &mut Game, line: impl Into<String>) {
    game.view.push(ViewItem::Speech {
        speaker: CPU_NAME.to_string(),
        line: line.into(),
        voice: Voice::Cpu,
    });
}

/// Run a hack with `resolved` earlier victories setting the difficulty.
/// Energy lost during the hack stays lost.
fn hack(game: &mut Game, resolved: usize) -> Result<BattleOutcome> {
    let mut battle = Battle::new(resolved, game.session.vitals.energy);
    let oxygen = game.session.vitals.oxygen;
    let outcome = battle::resolve(&mut battle, oxygen, &mut game.view, &mut *game.console, &mut *game.dice)?;
    game.session.vitals.energy = battle.energy();
    Ok(outcome)
}

/// Examine the machinery of a fix target: hack it, reward a win, end the game on a loss.
///
/// # Errors
/// - on console failure
pub fn fix_event(game: &mut Game, room: RoomId) -> Result<Flow> {
    let name = game.session.current_room()?.name;
    if game.session.is_fix_resolved(room) {
        warn!("fix event requested for already cleared room {room}");
        return Ok(Flow::Continue);
    }
    cpu_says(game, malfunction_text(name));
    let resolved = game.session.resolved_fix_count();
    match hack(game, resolved)? {
        BattleOutcome::Victory => {
            game.session.room_mut(room)?.resolve_fix();
            let reward = game.config.energy_reward;
            game.session.vitals.energy.raise_max(reward);
            info!("fix target {room} cleared, max energy +{reward}");
            game.view.push(ViewItem::ActionSuccess(format!(
                "The {name} systems come back under your control. Your suit siphons the surplus: max energy +{reward}."
            )));
            if game.session.unlock_endgame() {
                cpu_says(
                    game,
                    "Every malfunction is cleared, yet the errors all trace back to one place: the Mainframe. \
                     Something in there has been fighting us.",
                );
            }
            game.show_meters()?;
            Ok(Flow::Continue)
        },
        BattleOutcome::Defeat => {
            info!("defeated in fix target {room}");
            game.view.push(ViewItem::ActionFailure(
                "Your suit's power gives out. The rogue process locks you out for good.".into(),
            ));
            Ok(Flow::End(GameEnd::Lost(LossCause::Overpowered)))
        },
    }
}

/// The final confrontation in the Mainframe. Runs only while the endgame is
/// unlocked and not yet won.
///
/// # Errors
/// - on console failure
pub fn confront_mainframe(game: &mut Game) -> Result<Flow> {
    if !game.session.endgame_unlocked || game.session.mainframe_cleared() {
        return Ok(Flow::Continue);
    }
    game.view.push(ViewItem::Danger(
        "Every rack in the room lights up at once. The rogue process has noticed you.".into(),
    ));
    cpu_says(game, "This is where it lives. Break it and the ship is ours again.");
    let resolved = game.session.resolved_fix_count();
    match hack(game, resolved)? {
        BattleOutcome::Victory => {
            game.session.room_mut(FINAL_ROOM)?.resolve_fix();
            info!("final confrontation won");
            cpu_says(
                game,
                "The rogue process is gone. Return to the bridge console and set a course home.",
            );
            game.show_meters()?;
            Ok(Flow::Continue)
        },
        BattleOutcome::Defeat => {
            info!("defeated in the final confrontation");
            game.view.push(ViewItem::ActionFailure(
                "The racks go dark one by one, and so does your suit.".into(),
            ));
            Ok(Flow::End(GameEnd::Lost(LossCause::Overpowered)))
        },
    }
}

/// Fire the pending hull breach in `room`, if any.
///
/// # Errors
/// - on console failure
pub fn quick_event(game: &mut Game, room: RoomId) -> Result<Flow> {
    if !game.session.events.is_quick_pending(room) {
        return Ok(Flow::Continue);
    }
    let hazard = TimedHazard::new(game.config.hazard_tick());
    hazard.run(
        &mut game.session,
        room,
        &mut game.view,
        &mut *game.console,
        &mut *game.dice,
    )?;
    game.show_meters()?;
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::LoadedDice;

    #[test]
    fn targets_come_from_their_pools() {
        let events = EventRegistry::assign(3, 2, &mut LoadedDice::new([3, 1, 0, 2, 1]));
        assert_eq!(events.fix_targets.len(), 3);
        assert_eq!(events.quick_targets.len(), 2);
        assert!(events.fix_targets.iter().all(|id| ROOMS[*id].fix_eligible));
        assert!(events.quick_targets.iter().all(|id| ROOMS[*id].quick_eligible));
        assert_eq!(events.pending_quick, events.quick_targets);
    }

    #[test]
    fn counts_are_clamped() {
        let events = EventRegistry::assign(99, 0, &mut LoadedDice::new([]));
        assert_eq!(events.fix_targets.len(), 4);
        assert_eq!(events.quick_targets.len(), 1);
    }

    #[test]
    fn zero_rolls_take_the_pool_in_order() {
        let events = EventRegistry::assign(3, 2, &mut LoadedDice::new([]));
        assert_eq!(events.fix_targets.iter().copied().collect::<Vec<_>>(), vec![1, 4, 7]);
        assert_eq!(events.quick_targets.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn quick_hazard_is_taken_once() {
        let mut events = EventRegistry::assign(1, 3, &mut LoadedDice::new([]));
        assert!(events.is_quick_pending(6));
        assert!(events.take_quick(6));
        assert!(!events.take_quick(6));
        assert!(events.quick_targets.contains(&6));
    }
}
