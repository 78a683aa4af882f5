//! Battle Module
//!
//! The "hack" mini-game used to clear malfunctions. The player whittles down an
//! encryption meter while the ship's rogue process strikes back at the player's
//! energy or re-encrypts what was broken.
//!
//! Each round is two half-turns, player first:
//! - **Attack** breaks 1 encryption, or 2 on a critical (2 faces out of 6).
//! - **Guard** deals nothing but negates the next strike.
//! - The opponent rolls 11 faces: 0-2 computing (no effect), 3-6 strike for 1
//!   energy, 7-10 re-encrypt 1 point (capped at the starting value).
//!
//! The battle ends in victory when encryption hits 0 and in defeat when energy does.

use anyhow::Result;
use log::{debug, info};

use crate::console::Console;
use crate::dice::Dice;
use crate::view::{Meters, View, ViewItem};
use crate::vitals::Gauge;

/// Faces on the player's attack die.
pub const ATTACK_DIE: u32 = 6;
/// Attack rolls at or above this value are critical.
pub const CRITICAL_FROM: u32 = 4;
/// Faces on the opponent's die.
pub const OPPONENT_DIE: u32 = 11;

/// Starting encryption for a battle after `resolved` earlier victories.
pub fn encryption_for(resolved: usize) -> u32 {
    let resolved = u32::try_from(resolved).unwrap_or(u32::MAX / 2);
    3u32.saturating_add(resolved.saturating_mul(2))
}

/// The player's options on their half-turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMove {
    Attack,
    Guard,
}
impl PlayerMove {
    /// Menu keys accepted at the battle prompt.
    pub const KEYS: [&'static str; 4] = ["a", "g", "attack", "guard"];

    pub fn from_key(key: &str) -> Option<PlayerMove> {
        match key.trim().to_lowercase().as_str() {
            "a" | "attack" => Some(PlayerMove::Attack),
            "g" | "guard" => Some(PlayerMove::Guard),
            _ => None,
        }
    }
}

/// What happened on the player's half-turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Broke { amount: u32, critical: bool },
    Guarded,
}

/// What the opponent did on its half-turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentAction {
    Computing,
    Strike { blocked: bool },
    Reencrypt { restored: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// State of one hack in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Battle {
    encryption: Gauge,
    energy: Gauge,
    protected: bool,
    rounds: u32,
}
impl Battle {
    /// Start a battle after `resolved` earlier victories, with the player's current energy.
    pub fn new(resolved: usize, energy: Gauge) -> Battle {
        Battle {
            encryption: Gauge::full(encryption_for(resolved)),
            energy,
            protected: false,
            rounds: 0,
        }
    }

    pub fn encryption(&self) -> Gauge {
        self.encryption
    }

    pub fn energy(&self) -> Gauge {
        self.energy
    }

    pub fn is_protected(&self) -> bool {
        self.protected
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// `Some` once the battle is over.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        if self.encryption.is_empty() {
            Some(BattleOutcome::Victory)
        } else if self.energy.is_empty() {
            Some(BattleOutcome::Defeat)
        } else {
            None
        }
    }

    /// Resolve the player's half-turn. Protection from a previous guard always lapses here.
    pub fn player_turn(&mut self, mv: PlayerMove, dice: &mut dyn Dice) -> PlayerAction {
        self.rounds += 1;
        self.protected = false;
        match mv {
            PlayerMove::Attack => {
                let critical = dice.roll(ATTACK_DIE) >= CRITICAL_FROM;
                let amount = if critical { 2 } else { 1 };
                self.encryption.drain(amount);
                debug!(
                    "round {}: attack for {amount}{} (encryption {})",
                    self.rounds,
                    if critical { " (critical)" } else { "" },
                    self.encryption
                );
                PlayerAction::Broke { amount, critical }
            },
            PlayerMove::Guard => {
                self.protected = true;
                debug!("round {}: guard", self.rounds);
                PlayerAction::Guarded
            },
        }
    }

    /// Resolve the opponent's half-turn.
    pub fn opponent_turn(&mut self, dice: &mut dyn Dice) -> OpponentAction {
        let action = match dice.roll(OPPONENT_DIE) {
            0..=2 => OpponentAction::Computing,
            3..=6 => {
                if !self.protected {
                    self.energy.drain(1);
                }
                OpponentAction::Strike {
                    blocked: self.protected,
                }
            },
            _ => OpponentAction::Reencrypt {
                restored: self.encryption.fill(1),
            },
        };
        debug!(
            "round {}: opponent {action:?} (energy {}, encryption {})",
            self.rounds, self.energy, self.encryption
        );
        action
    }

    fn meters(&self, oxygen: Gauge) -> Meters {
        Meters {
            oxygen,
            energy: self.energy,
            encryption: Some(self.encryption),
        }
    }
}

fn describe_player(action: PlayerAction) -> ViewItem {
    match action {
        PlayerAction::Broke { critical: true, amount } => ViewItem::ActionSuccess(format!(
            "Critical hit! You crack {amount} layers of encryption at once."
        )),
        PlayerAction::Broke { .. } => ViewItem::ActionSuccess("You break through a layer of encryption.".into()),
        PlayerAction::Guarded => ViewItem::Narration("You raise a firewall and brace for a counterattack.".into()),
    }
}

fn describe_opponent(action: OpponentAction) -> ViewItem {
    match action {
        OpponentAction::Computing => ViewItem::Narration("The rogue process is computing...".into()),
        OpponentAction::Strike { blocked: true } => {
            ViewItem::ActionSuccess("A power surge slams into your firewall and fizzles out.".into())
        },
        OpponentAction::Strike { blocked: false } => {
            ViewItem::Danger("A power surge arcs through your suit! Energy -1.".into())
        },
        OpponentAction::Reencrypt { restored: 0 } => {
            ViewItem::Narration("The rogue process tries to re-encrypt, but the lock is already whole.".into())
        },
        OpponentAction::Reencrypt { .. } => ViewItem::ActionFailure("The rogue process re-encrypts a layer.".into()),
    }
}

/// Run a battle to completion, prompting the player each round.
///
/// Meters are shown before every half-turn. `oxygen` is only displayed.
///
/// # Errors
/// - on console failure while rendering or reading the player's choice
pub fn resolve(
    battle: &mut Battle,
    oxygen: Gauge,
    view: &mut View,
    console: &mut dyn Console,
    dice: &mut dyn Dice,
) -> Result<BattleOutcome> {
    info!(
        "battle started: encryption {}, energy {}",
        battle.encryption, battle.energy
    );
    let outcome = loop {
        view.push(ViewItem::Menu {
            prompt: "Your move:".into(),
            options: vec!["a) Attack".into(), "g) Guard".into()],
        });
        view.flush(console)?;
        console.show_meters(&battle.meters(oxygen))?;
        let choice = console.prompt_choice(&PlayerMove::KEYS)?;
        let mv = PlayerMove::from_key(&choice).unwrap_or(PlayerMove::Guard);
        let action = battle.player_turn(mv, dice);
        view.push(describe_player(action));
        if let Some(outcome) = battle.outcome() {
            break outcome;
        }

        view.flush(console)?;
        console.show_meters(&battle.meters(oxygen))?;
        let action = battle.opponent_turn(dice);
        view.push(describe_opponent(action));
        if let Some(outcome) = battle.outcome() {
            break outcome;
        }
    };
    view.flush(console)?;
    console.show_meters(&battle.meters(oxygen))?;
    info!("battle over after {} rounds: {outcome:?}", battle.rounds);
    Ok(outcome)
}
