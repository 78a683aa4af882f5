//! Timed hazard.
//!
//! A hull breach is a race: a countdown thread drains oxygen once per tick while
//! the foreground polls for the player's choice. Whichever lands first settles
//! the outcome. The countdown is stopped by a channel message and joined before
//! anything else reads oxygen, so it can never tick after the race is decided.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use log::{debug, info};
use variantly::Variantly;

use crate::console::Console;
use crate::content::breach_text;
use crate::dice::Dice;
use crate::room::RoomId;
use crate::session::Session;
use crate::view::{Meters, View, ViewItem};
use crate::vitals::Gauge;

/// Longest wait for a key between checks of the countdown.
const MAX_POLL: Duration = Duration::from_millis(50);

/// The two options offered during a breach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardChoice {
    Sealant,
    Leave,
}
impl HazardChoice {
    pub fn from_key(key: char) -> Option<HazardChoice> {
        match key {
            '1' => Some(HazardChoice::Sealant),
            '2' => Some(HazardChoice::Leave),
            _ => None,
        }
    }
}

/// How the race ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Chose(HazardChoice),
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Variantly)]
pub enum HazardOutcome {
    Sealed,
    Failed,
}

/// Everything that happened during one breach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HazardReport {
    pub resolution: Resolution,
    pub outcome: HazardOutcome,
    pub oxygen_at_resolution: u32,
    pub oxygen_after: u32,
    pub lost_item: Option<String>,
    pub ticks: u32,
}

/// Shared slot written by both sides of the race.
#[derive(Debug)]
struct Race {
    oxygen: u32,
    resolution: Option<Resolution>,
    ticks: u32,
}

fn lock(race: &Mutex<Race>) -> Result<MutexGuard<'_, Race>> {
    race.lock().map_err(|_| anyhow!("hazard countdown state poisoned"))
}

/// Drain one oxygen per tick until cancelled, resolved, or empty.
fn countdown(race: &Mutex<Race>, cancel: Receiver<()>, tick: Duration) {
    loop {
        match cancel.recv_timeout(tick) {
            Err(RecvTimeoutError::Timeout) => {},
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
        }
        let Ok(mut race) = race.lock() else { return };
        if race.resolution.is_some() {
            return;
        }
        race.oxygen = race.oxygen.saturating_sub(1);
        race.ticks += 1;
        debug!("hazard tick {}: oxygen {}", race.ticks, race.oxygen);
        if race.oxygen == 0 {
            race.resolution = Some(Resolution::Expired);
            return;
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TimedHazard {
    tick: Duration,
    poll: Duration,
}
impl TimedHazard {
    pub fn new(tick: Duration) -> TimedHazard {
        TimedHazard {
            tick,
            poll: (tick / 4).clamp(Duration::from_millis(1), MAX_POLL),
        }
    }

    /// Race the countdown against the player's key press, starting from `meters.oxygen`.
    ///
    /// Returns the resolution, oxygen at the moment of resolution, and ticks elapsed.
    ///
    /// # Errors
    /// - on console failure; the countdown is still stopped and joined first
    pub fn race(&self, meters: Meters, console: &mut dyn Console) -> Result<(Resolution, u32, u32)> {
        if meters.oxygen.is_empty() {
            return Ok((Resolution::Expired, 0, 0));
        }
        let race = Mutex::new(Race {
            oxygen: meters.oxygen.current(),
            resolution: None,
            ticks: 0,
        });
        let (cancel, cancelled) = mpsc::channel::<()>();
        let tick = self.tick;

        let decided = thread::scope(|scope| {
            let shared = &race;
            let timer = scope.spawn(move || countdown(shared, cancelled, tick));
            let decided = self.await_choice(&race, meters, console);
            // the receiver may already be gone if the countdown expired
            let _ = cancel.send(());
            if timer.join().is_err() {
                bail!("hazard countdown thread panicked");
            }
            decided
        });
        decided?;

        let race = race
            .into_inner()
            .map_err(|_| anyhow!("hazard countdown state poisoned"))?;
        let Some(resolution) = race.resolution else {
            bail!("hazard race ended without a resolution");
        };
        Ok((resolution, race.oxygen, race.ticks))
    }

    /// Foreground half of the race: redraw oxygen as it changes and poll for '1' or '2'.
    fn await_choice(&self, race: &Mutex<Race>, meters: Meters, console: &mut dyn Console) -> Result<()> {
        let mut shown = None;
        loop {
            let oxygen = {
                let race = lock(race)?;
                if race.resolution.is_some() {
                    return Ok(());
                }
                race.oxygen
            };
            if shown != Some(oxygen) {
                let meters = Meters {
                    oxygen: Gauge::new(oxygen, meters.oxygen.max()),
                    ..meters
                };
                console.show_meters(&meters)?;
                shown = Some(oxygen);
            }
            let Some(key) = console.poll_key(self.poll)? else {
                continue;
            };
            if let Some(choice) = HazardChoice::from_key(key) {
                let mut race = lock(race)?;
                if race.resolution.is_none() {
                    race.resolution = Some(Resolution::Chose(choice));
                }
                return Ok(());
            }
        }
    }

    /// Run the breach in `room` and apply its consequences to the session.
    ///
    /// The room is struck from the pending set whatever happens, and oxygen ends
    /// at one above where the race left it (capped at max).
    ///
    /// # Errors
    /// - on console failure
    pub fn run(
        &self,
        session: &mut Session,
        room: RoomId,
        view: &mut View,
        console: &mut dyn Console,
        dice: &mut dyn Dice,
    ) -> Result<HazardReport> {
        session.events.take_quick(room);
        let name = session.room(room).map_or("compartment", |room| room.name);
        info!("hull breach in room {room} ({name}), oxygen {}", session.vitals.oxygen);
        view.push(ViewItem::Danger(breach_text(name)));
        view.push(ViewItem::Menu {
            prompt: "Quick! What do you do?".into(),
            options: vec!["1) Use sealant".into(), "2) Try to leave".into()],
        });
        view.flush(console)?;

        let (resolution, at_resolution, ticks) = self.race(session.meters(), console)?;
        let max = session.vitals.oxygen.max();
        session.vitals.oxygen = Gauge::new(at_resolution, max);
        session.vitals.oxygen.fill(1);

        let outcome = match resolution {
            Resolution::Chose(HazardChoice::Sealant) => HazardOutcome::Sealed,
            Resolution::Chose(HazardChoice::Leave) | Resolution::Expired => HazardOutcome::Failed,
        };
        let mut lost_item = None;
        match resolution {
            Resolution::Chose(HazardChoice::Sealant) => view.push(ViewItem::ActionSuccess(
                "The sealant foams over the hole and hardens. The hiss stops.".into(),
            )),
            Resolution::Chose(HazardChoice::Leave) => view.push(ViewItem::ActionFailure(
                "You lunge for the hatch, but the pressure drop slams it shut in your face.".into(),
            )),
            Resolution::Expired => view.push(ViewItem::ActionFailure(
                "Your vision greys at the edges as the last of the air rushes out.".into(),
            )),
        }
        if outcome.is_failed() {
            if session.inventory.is_empty() {
                view.push(ViewItem::Narration(
                    "You improvise a patch from a ration wrapper and suit tape. It holds, barely.".into(),
                ));
            } else {
                let sides = u32::try_from(session.inventory.len()).unwrap_or(u32::MAX);
                let index = dice.roll(sides) as usize;
                if let Some(item) = session.inventory.remove_at(index) {
                    view.push(ViewItem::ActionFailure(format!(
                        "In the scramble your {} is torn away and sucked out through the breach. \
                         The emergency seal finally catches.",
                        item.name
                    )));
                    lost_item = Some(item.name);
                }
            }
        }
        info!(
            "hull breach resolved: {resolution:?} after {ticks} ticks, oxygen {at_resolution} -> {}, lost {lost_item:?}",
            session.vitals.oxygen
        );
        Ok(HazardReport {
            resolution,
            outcome,
            oxygen_at_resolution: at_resolution,
            oxygen_after: session.vitals.oxygen.current(),
            lost_item,
            ticks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::InputEvent;
    use crate::vitals::Vitals;

    /// Presses `key` once the displayed oxygen drops to `at`; never presses if `key` is `None`.
    struct Presser {
        key: Option<char>,
        at: u32,
        shown: u32,
    }
    impl Console for Presser {
        fn render(&mut self, _items: &[ViewItem]) -> Result<()> {
            Ok(())
        }
        fn show_meters(&mut self, meters: &Meters) -> Result<()> {
            self.shown = meters.oxygen.current();
            Ok(())
        }
        fn read_line(&mut self, _prompt: &str) -> Result<InputEvent> {
            Ok(InputEvent::Eof)
        }
        fn read_key(&mut self) -> Result<char> {
            Ok(' ')
        }
        fn poll_key(&mut self, wait: Duration) -> Result<Option<char>> {
            match self.key {
                Some(key) if self.shown <= self.at => Ok(Some(key)),
                _ => {
                    thread::sleep(wait);
                    Ok(None)
                },
            }
        }
    }

    fn meters(oxygen: u32) -> Meters {
        Meters::from_vitals(&Vitals {
            oxygen: Gauge::new(oxygen, 10),
            energy: Gauge::full(10),
        })
    }

    #[test]
    fn immediate_choice_wins_before_any_tick() {
        let hazard = TimedHazard::new(Duration::from_secs(5));
        let mut console = Presser {
            key: Some('1'),
            at: 10,
            shown: 10,
        };
        let (resolution, oxygen, ticks) = hazard.race(meters(10), &mut console).unwrap();
        assert_eq!(resolution, Resolution::Chose(HazardChoice::Sealant));
        assert_eq!(oxygen, 10);
        assert_eq!(ticks, 0);
    }

    #[test]
    fn countdown_expires_without_a_choice() {
        let hazard = TimedHazard::new(Duration::from_millis(5));
        let mut console = Presser {
            key: None,
            at: 0,
            shown: 3,
        };
        let (resolution, oxygen, ticks) = hazard.race(meters(3), &mut console).unwrap();
        assert_eq!(resolution, Resolution::Expired);
        assert_eq!(oxygen, 0);
        assert_eq!(ticks, 3);
    }

    #[test]
    fn choice_stops_the_countdown() {
        let hazard = TimedHazard::new(Duration::from_millis(100));
        let mut console = Presser {
            key: Some('2'),
            at: 9,
            shown: 10,
        };
        let (resolution, oxygen, _) = hazard.race(meters(10), &mut console).unwrap();
        assert_eq!(resolution, Resolution::Chose(HazardChoice::Leave));
        assert_eq!(oxygen, 9);
    }

    #[test]
    fn empty_tank_expires_at_once() {
        let hazard = TimedHazard::new(Duration::from_secs(5));
        let mut console = Presser {
            key: Some('1'),
            at: 10,
            shown: 0,
        };
        let (resolution, oxygen, ticks) = hazard.race(meters(0), &mut console).unwrap();
        assert_eq!((resolution, oxygen, ticks), (Resolution::Expired, 0, 0));
    }

    #[test]
    fn keys_map_to_choices() {
        assert_eq!(HazardChoice::from_key('1'), Some(HazardChoice::Sealant));
        assert_eq!(HazardChoice::from_key('2'), Some(HazardChoice::Leave));
        assert_eq!(HazardChoice::from_key('3'), None);
    }
}
