//! Session state.
//!
//! One [`Session`] is everything that survives a save and load: the player's
//! vitals and position, the inventory, which rooms hold events, per-room flags,
//! and the log book.

use anyhow::{Context, Result};
use log::info;

use crate::config::GameConfig;
use crate::content::ROOMS;
use crate::dice::Dice;
use crate::events::EventRegistry;
use crate::item::Inventory;
use crate::log_book::LogBook;
use crate::room::{Room, RoomId};
use crate::ship::{FINAL_ROOM, START_ROOM};
use crate::view::Meters;
use crate::vitals::Vitals;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub player_name: String,
    pub vitals: Vitals,
    pub room: RoomId,
    pub endgame_unlocked: bool,
    /// Legal moves made so far; drives ambient oxygen use.
    pub moves: u32,
    pub inventory: Inventory,
    pub events: EventRegistry,
    pub rooms: Vec<Room>,
    pub log_book: LogBook,
}
impl Session {
    /// A session with full vitals and no events drawn. Save files load into this.
    pub fn blank(config: &GameConfig) -> Session {
        let mut rooms: Vec<Room> = ROOMS
            .iter()
            .enumerate()
            .map(|(id, spec)| Room::from_spec(id, spec))
            .collect();
        if let Some(start) = rooms.get_mut(START_ROOM) {
            start.flags.visited = true;
        }
        Session {
            player_name: String::new(),
            vitals: Vitals::new(config.starting_oxygen, config.starting_energy),
            room: START_ROOM,
            endgame_unlocked: false,
            moves: 0,
            inventory: Inventory::new(),
            events: EventRegistry::default(),
            rooms,
            log_book: LogBook::new(),
        }
    }

    /// A fresh session with event rooms drawn from `dice`.
    pub fn new(config: &GameConfig, dice: &mut dyn Dice) -> Session {
        let mut session = Session::blank(config);
        session.events = EventRegistry::assign(config.fix_targets, config.quick_targets, dice);
        info!(
            "new session: fix targets {:?}, quick targets {:?}",
            session.events.fix_targets, session.events.quick_targets
        );
        session
    }

    /// Set the player's name once, exactly as typed. Blank names and later calls are ignored.
    pub fn set_player_name(&mut self, name: &str) -> bool {
        if !self.player_name.is_empty() || name.trim().is_empty() {
            return false;
        }
        self.player_name = name.to_string();
        true
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// The room the player is standing in.
    ///
    /// # Errors
    /// - if the player's room id is not a room aboard the ship
    pub fn current_room(&self) -> Result<&Room> {
        self.rooms
            .get(self.room)
            .with_context(|| format!("player is in unknown room {}", self.room))
    }

    /// # Errors
    /// - if `id` is not a room aboard the ship
    pub fn room_mut(&mut self, id: RoomId) -> Result<&mut Room> {
        self.rooms
            .get_mut(id)
            .with_context(|| format!("unknown room {id}"))
    }

    pub fn doors_locked(&self) -> bool {
        self.room(START_ROOM).is_some_and(|room| room.flags.door_locked)
    }

    /// Unlock the bridge door. Returns `false` if it was already open.
    pub fn unlock_doors(&mut self) -> bool {
        match self.rooms.get_mut(START_ROOM) {
            Some(bridge) if bridge.flags.door_locked => {
                bridge.flags.door_locked = false;
                info!("bridge door unlocked");
                true
            },
            _ => false,
        }
    }

    pub fn is_fix_resolved(&self, id: RoomId) -> bool {
        self.room(id).is_some_and(|room| room.flags.fix_resolved)
    }

    /// Fix targets already cleared.
    pub fn resolved_fix_count(&self) -> usize {
        self.events
            .fix_targets
            .iter()
            .filter(|id| self.is_fix_resolved(**id))
            .count()
    }

    pub fn all_fixes_resolved(&self) -> bool {
        self.events.fix_targets.iter().all(|id| self.is_fix_resolved(*id))
    }

    /// Unlock the endgame once every fix target is cleared. Returns `true` only
    /// on the call that flips the flag.
    pub fn unlock_endgame(&mut self) -> bool {
        if self.endgame_unlocked || self.events.fix_targets.is_empty() || !self.all_fixes_resolved() {
            return false;
        }
        self.endgame_unlocked = true;
        info!("endgame unlocked");
        true
    }

    /// Whether the final confrontation has been won.
    pub fn mainframe_cleared(&self) -> bool {
        self.is_fix_resolved(FINAL_ROOM)
    }

    pub fn meters(&self) -> Meters {
        Meters::from_vitals(&self.vitals)
    }
}
