//! Ship layout and navigation.
//!
//! Rooms sit on a fixed deck grid. Moving means stepping to the orthogonally
//! adjacent cell, which must hold a room. The one exception is the door out of
//! the bridge, which stays shut until it is unlocked from the bridge console.

use std::fmt;

use thiserror::Error;

use crate::room::RoomId;

/// The room the player wakes up in.
pub const START_ROOM: RoomId = 0;

/// The room where the final confrontation happens.
pub const FINAL_ROOM: RoomId = 5;

/// Deck grid addressed as `SHIP[row][col]`. `None` cells are empty space.
pub const SHIP: [[Option<RoomId>; 3]; 4] = [
    [None, Some(0), None],
    [Some(1), Some(2), Some(3)],
    [Some(4), Some(5), Some(6)],
    [Some(7), None, Some(8)],
];

/// One of the four cardinal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}
impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Parse a direction word.
    pub fn parse(word: &str) -> Option<Direction> {
        match word.trim().to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}
impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a move was refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Blocked {
    #[error("There is no door that way")]
    NoDoor,
    #[error("The door appears to be locked")]
    Locked,
}

/// Grid coordinates `(row, col)` of a room.
pub fn locate(room: RoomId) -> Option<(usize, usize)> {
    SHIP.iter().enumerate().find_map(|(row, cells)| {
        cells
            .iter()
            .position(|cell| *cell == Some(room))
            .map(|col| (row, col))
    })
}

/// The room adjacent to `room` in `dir`, ignoring locks.
pub fn neighbor(room: RoomId, dir: Direction) -> Option<RoomId> {
    let (row, col) = locate(room)?;
    let (row, col) = match dir {
        Direction::Up => (row.checked_sub(1)?, col),
        Direction::Down => (row + 1, col),
        Direction::Left => (row, col.checked_sub(1)?),
        Direction::Right => (row, col + 1),
    };
    SHIP.get(row)?.get(col).copied().flatten()
}

/// Attempt a move. The bridge's downward door is passable only when unlocked.
///
/// # Errors
/// - [`Blocked::Locked`] for the bridge door while `doors_locked` is set
/// - [`Blocked::NoDoor`] if there is no room in that direction
pub fn step(from: RoomId, dir: Direction, doors_locked: bool) -> Result<RoomId, Blocked> {
    let target = neighbor(from, dir).ok_or(Blocked::NoDoor)?;
    if from == START_ROOM && dir == Direction::Down && doors_locked {
        return Err(Blocked::Locked);
    }
    Ok(target)
}

/// Number of rooms on the grid.
pub fn room_count() -> usize {
    SHIP.iter().flatten().flatten().count()
}
