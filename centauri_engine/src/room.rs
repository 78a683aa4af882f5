//! Room definitions.
//!
//! Every room aboard the ship is a single [`Room`] record: its static text, the
//! named objects that can be examined, and a small set of flags that only ever
//! move in one direction during a session.

use crate::content::RoomSpec;

/// Index of a room in the ship's declaration order.
pub type RoomId = usize;

/// Handler attached to an examinable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectAction {
    /// The bridge console menu.
    Console,
    /// The bridge storage box; can be looted once.
    StorageBox,
    /// The locked bridge door.
    Door,
    /// A room's machinery, which is the malfunction gate if the room is a fix-target.
    Machinery,
}

/// Mutable per-room state. Every flag changes at most once per session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomFlags {
    pub visited: bool,
    pub fix_resolved: bool,
    pub looted: bool,
    pub door_locked: bool,
}
impl RoomFlags {
    /// Comma-joined tuple in the fixed order `visited,fix_resolved,looted,door_locked`.
    pub fn to_tuple(self) -> String {
        format!(
            "{},{},{},{}",
            self.visited, self.fix_resolved, self.looted, self.door_locked
        )
    }

    /// Parse a tuple written by [`RoomFlags::to_tuple`].
    pub fn parse_tuple(raw: &str) -> Option<RoomFlags> {
        let fields: Vec<bool> = raw
            .split(',')
            .map(|field| field.trim().parse::<bool>().ok())
            .collect::<Option<Vec<_>>>()?;
        match fields.as_slice() {
            [visited, fix_resolved, looted, door_locked] => Some(RoomFlags {
                visited: *visited,
                fix_resolved: *fix_resolved,
                looted: *looted,
                door_locked: *door_locked,
            }),
            _ => None,
        }
    }
}

/// Any compartment of the ship the player can stand in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: &'static str,
    pub info: &'static str,
    pub danger: &'static str,
    pub color: (u8, u8, u8),
    pub objects: &'static [(&'static str, ObjectAction)],
    pub flags: RoomFlags,
}
impl Room {
    /// Build the initial room record for a content table entry.
    pub fn from_spec(id: RoomId, spec: &RoomSpec) -> Room {
        Room {
            id,
            name: spec.name,
            info: spec.info,
            danger: spec.danger,
            color: spec.color,
            objects: spec.objects,
            flags: RoomFlags {
                door_locked: spec.starts_locked,
                ..RoomFlags::default()
            },
        }
    }

    /// Look up an examinable object by name (case-insensitive).
    pub fn object(&self, name: &str) -> Option<ObjectAction> {
        let wanted = name.trim().to_lowercase();
        self.objects
            .iter()
            .find(|(object, _)| *object == wanted)
            .map(|(_, action)| *action)
    }

    /// Names of the examinable objects, in declaration order.
    pub fn object_names(&self) -> Vec<&'static str> {
        self.objects.iter().map(|(name, _)| *name).collect()
    }

    /// Mark the room visited. Returns `true` only on the first visit.
    pub fn mark_visited(&mut self) -> bool {
        let first = !self.flags.visited;
        self.flags.visited = true;
        first
    }

    /// Clear the room's malfunction. Returns `true` if it was not already cleared.
    pub fn resolve_fix(&mut self) -> bool {
        let changed = !self.flags.fix_resolved;
        self.flags.fix_resolved = true;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ROOMS;

    #[test]
    fn flags_tuple_round_trips() {
        let flags = RoomFlags {
            visited: true,
            fix_resolved: false,
            looted: true,
            door_locked: false,
        };
        assert_eq!(flags.to_tuple(), "true,false,true,false");
        assert_eq!(RoomFlags::parse_tuple(&flags.to_tuple()), Some(flags));
    }

    #[test]
    fn flags_tuple_rejects_wrong_arity_and_garbage() {
        assert_eq!(RoomFlags::parse_tuple("true,false"), None);
        assert_eq!(RoomFlags::parse_tuple("true,false,true,false,true"), None);
        assert_eq!(RoomFlags::parse_tuple("yes,no,yes,no"), None);
    }

    #[test]
    fn only_the_bridge_starts_locked() {
        let rooms: Vec<Room> = ROOMS.iter().enumerate().map(|(id, spec)| Room::from_spec(id, spec)).collect();
        assert!(rooms[0].flags.door_locked);
        assert!(rooms[1..].iter().all(|room| !room.flags.door_locked));
    }

    #[test]
    fn object_lookup_ignores_case() {
        let bridge = Room::from_spec(0, &ROOMS[0]);
        assert_eq!(bridge.object("Console"), Some(ObjectAction::Console));
        assert_eq!(bridge.object(" box "), Some(ObjectAction::StorageBox));
        assert_eq!(bridge.object("cryopod"), None);
    }

    #[test]
    fn visited_and_resolved_only_flip_once() {
        let mut room = Room::from_spec(4, &ROOMS[4]);
        assert!(room.mark_visited());
        assert!(!room.mark_visited());
        assert!(room.flags.visited);

        assert!(room.resolve_fix());
        assert!(!room.resolve_fix());
        assert!(room.flags.fix_resolved);
    }
}
