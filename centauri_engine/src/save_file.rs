//! Save files.
//!
//! A save is a flat text file of named sections in a fixed order. Each section
//! is a header line followed by its body:
//! - single-line sections (`NAME`, `OXYGEN`, ...) take exactly the next line
//! - `INVENTORY` runs until the next header
//! - `LOG` takes the rest of the file, entries separated by a `--` line
//!
//! Decoding is forgiving. A section that is missing or fails validation leaves
//! that part of the session at its default and is reported as a [`DecodeIssue`].

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use crate::config::GameConfig;
use crate::content::ROOMS;
use crate::item::{Inventory, Item};
use crate::log_book::LogBook;
use crate::room::{RoomFlags, RoomId};
use crate::session::Session;
use crate::ship::room_count;
use crate::vitals::Gauge;

/// Separator line between log book entries.
const ENTRY_BREAK: &str = "--";
/// Prefix that protects log lines which would otherwise read as a separator.
const ESCAPE: char = '\\';

/// Named sections of a save file, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Name,
    Oxygen,
    Energy,
    Room,
    Endgame,
    Moves,
    Inventory,
    Fix,
    Quick,
    Pending,
    Rooms,
    Log,
}

/// How far a section's body extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly the next line.
    Line,
    /// Every line up to the next header.
    Lines,
    /// Everything to the end of the file.
    Rest,
}

impl Section {
    pub const ALL: [Section; 12] = [
        Section::Name,
        Section::Oxygen,
        Section::Energy,
        Section::Room,
        Section::Endgame,
        Section::Moves,
        Section::Inventory,
        Section::Fix,
        Section::Quick,
        Section::Pending,
        Section::Rooms,
        Section::Log,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Section::Name => "NAME",
            Section::Oxygen => "OXYGEN",
            Section::Energy => "ENERGY",
            Section::Room => "ROOM",
            Section::Endgame => "ENDGAME",
            Section::Moves => "MOVES",
            Section::Inventory => "INVENTORY",
            Section::Fix => "FIX",
            Section::Quick => "QUICK",
            Section::Pending => "PENDING",
            Section::Rooms => "ROOMS",
            Section::Log => "LOG",
        }
    }

    pub fn from_token(line: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|section| section.token() == line)
    }

    pub fn arity(self) -> Arity {
        match self {
            Section::Inventory | Section::Rooms => Arity::Lines,
            Section::Log => Arity::Rest,
            _ => Arity::Line,
        }
    }
}
impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A section that could not be restored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeIssue {
    #[error("section {0} is missing")]
    Missing(Section),
    #[error("section {section} is malformed: {reason}")]
    Malformed { section: Section, reason: String },
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("could not read save file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not write save file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn join_ids(ids: &BTreeSet<RoomId>) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
}

fn escape_line(line: &str) -> String {
    if line == ENTRY_BREAK || line.starts_with(ESCAPE) {
        format!("{ESCAPE}{line}")
    } else {
        line.to_string()
    }
}

/// Serialize a session.
pub fn encode(session: &Session) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut section = |section: Section, body: Vec<String>| {
        out.push(section.token().to_string());
        out.extend(body);
    };
    section(Section::Name, vec![session.player_name.clone()]);
    for (which, gauge) in [
        (Section::Oxygen, session.vitals.oxygen),
        (Section::Energy, session.vitals.energy),
    ] {
        section(which, vec![format!("{},{}", gauge.current(), gauge.max())]);
    }
    section(Section::Room, vec![session.room.to_string()]);
    section(Section::Endgame, vec![session.endgame_unlocked.to_string()]);
    section(Section::Moves, vec![session.moves.to_string()]);
    section(
        Section::Inventory,
        session.inventory.names().into_iter().map(str::to_string).collect(),
    );
    section(Section::Fix, vec![join_ids(&session.events.fix_targets)]);
    section(Section::Quick, vec![join_ids(&session.events.quick_targets)]);
    section(Section::Pending, vec![join_ids(&session.events.pending_quick)]);
    section(
        Section::Rooms,
        session.rooms.iter().map(|room| room.flags.to_tuple()).collect(),
    );
    let mut log = Vec::new();
    for (i, entry) in session.log_book.entries().iter().enumerate() {
        if i > 0 {
            log.push(ENTRY_BREAK.to_string());
        }
        log.extend(entry.lines().map(escape_line));
    }
    section(Section::Log, log);

    let mut text = out.join("\n");
    text.push('\n');
    text
}

/// Split a save file into section bodies. The first occurrence of a header wins.
fn split_sections(text: &str) -> HashMap<Section, Vec<&str>> {
    let lines: Vec<&str> = text.lines().collect();
    let mut bodies = HashMap::new();
    let mut i = 0;
    while i < lines.len() {
        let Some(section) = Section::from_token(lines[i]) else {
            warn!("save file: skipping stray line {}: {:?}", i + 1, lines[i]);
            i += 1;
            continue;
        };
        i += 1;
        let start = i;
        match section.arity() {
            Arity::Line => i = (i + 1).min(lines.len()),
            Arity::Lines => {
                while i < lines.len() && Section::from_token(lines[i]).is_none() {
                    i += 1;
                }
            },
            Arity::Rest => i = lines.len(),
        }
        bodies.entry(section).or_insert_with(|| lines[start..i].to_vec());
    }
    bodies
}

fn single<'a>(body: &[&'a str]) -> Result<&'a str, String> {
    body.first().copied().ok_or_else(|| "no value".to_string())
}

fn parse_gauge(body: &[&str]) -> Result<Gauge, String> {
    let raw = single(body)?;
    let (current, max) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected \"current,max\", got {raw:?}"))?;
    let current: u32 = current.trim().parse().map_err(|e| format!("bad current value: {e}"))?;
    let max: u32 = max.trim().parse().map_err(|e| format!("bad max value: {e}"))?;
    if max == 0 {
        return Err("max must be positive".into());
    }
    Ok(Gauge::new(current, max))
}

fn parse_room(raw: &str) -> Result<RoomId, String> {
    let id: RoomId = raw.trim().parse().map_err(|e| format!("bad room id {raw:?}: {e}"))?;
    if id >= room_count() {
        return Err(format!("room id {id} out of range"));
    }
    Ok(id)
}

fn parse_ids(body: &[&str]) -> Result<BTreeSet<RoomId>, String> {
    let raw = single(body)?;
    if raw.trim().is_empty() {
        return Ok(BTreeSet::new());
    }
    raw.split(',').map(parse_room).collect()
}

fn parse_eligible(body: &[&str], eligible: impl Fn(RoomId) -> bool) -> Result<BTreeSet<RoomId>, String> {
    let ids = parse_ids(body)?;
    if let Some(id) = ids.iter().find(|id| !eligible(**id)) {
        return Err(format!("room {id} cannot hold this event"));
    }
    Ok(ids)
}

fn parse_room_flags(body: &[&str]) -> Result<Vec<RoomFlags>, String> {
    if body.len() != room_count() {
        return Err(format!("expected {} rooms, found {}", room_count(), body.len()));
    }
    body.iter()
        .enumerate()
        .map(|(id, raw)| RoomFlags::parse_tuple(raw).ok_or_else(|| format!("bad flags for room {id}: {raw:?}")))
        .collect()
}

fn parse_log(body: &[&str]) -> LogBook {
    let mut log_book = LogBook::new();
    let mut entry: Vec<&str> = Vec::new();
    for line in body {
        if *line == ENTRY_BREAK {
            log_book.record(&entry.join("\n"));
            entry.clear();
        } else {
            entry.push(line.strip_prefix(ESCAPE).unwrap_or(line));
        }
    }
    log_book.record(&entry.join("\n"));
    log_book
}

/// Apply one section body to the session.
fn apply(section: Section, body: &[&str], session: &mut Session) -> Result<(), String> {
    match section {
        Section::Name => session.player_name = single(body)?.to_string(),
        Section::Oxygen => session.vitals.oxygen = parse_gauge(body)?,
        Section::Energy => session.vitals.energy = parse_gauge(body)?,
        Section::Room => session.room = parse_room(single(body)?)?,
        Section::Endgame => {
            let raw = single(body)?;
            session.endgame_unlocked = raw.trim().parse().map_err(|_| format!("expected true or false, got {raw:?}"))?;
        },
        Section::Moves => {
            let raw = single(body)?;
            session.moves = raw.trim().parse().map_err(|e| format!("bad move count {raw:?}: {e}"))?;
        },
        Section::Inventory => {
            let mut inventory = Inventory::new();
            for name in body.iter().filter(|name| !name.trim().is_empty()) {
                match Item::from_catalog(name) {
                    Some(item) => inventory.add(item),
                    None => warn!("save file: skipping unknown item {name:?}"),
                }
            }
            session.inventory = inventory;
        },
        Section::Fix => session.events.fix_targets = parse_eligible(body, |id| ROOMS[id].fix_eligible)?,
        Section::Quick => session.events.quick_targets = parse_eligible(body, |id| ROOMS[id].quick_eligible)?,
        Section::Pending => {
            let pending = parse_ids(body)?;
            if let Some(id) = pending.difference(&session.events.quick_targets).next() {
                return Err(format!("room {id} is pending but not a quick target"));
            }
            session.events.pending_quick = pending;
        },
        Section::Rooms => {
            for (room, flags) in session.rooms.iter_mut().zip(parse_room_flags(body)?) {
                room.flags = flags;
            }
        },
        Section::Log => session.log_book = parse_log(body),
    }
    Ok(())
}

/// Restore `session` from save text, returning every section that could not be restored.
pub fn decode(text: &str, session: &mut Session) -> Vec<DecodeIssue> {
    let bodies = split_sections(text);
    let mut issues = Vec::new();
    for section in Section::ALL {
        let Some(body) = bodies.get(&section) else {
            warn!("save file: section {section} missing");
            issues.push(DecodeIssue::Missing(section));
            continue;
        };
        if let Err(reason) = apply(section, body, session) {
            warn!("save file: section {section} malformed: {reason}");
            issues.push(DecodeIssue::Malformed { section, reason });
        }
    }
    issues
}

/// Write the session to `path`, creating parent directories as needed.
///
/// # Errors
/// - [`SaveError::Write`] if the directory or file cannot be written
pub fn write_save(path: &Path, session: &Session) -> Result<(), SaveError> {
    let wrap = |source| SaveError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    fs::write(path, encode(session)).map_err(wrap)?;
    info!("saved game to {}", path.display());
    Ok(())
}

/// Load a session from `path`. Sections that fail to decode keep their defaults.
///
/// # Errors
/// - [`SaveError::Read`] if the file cannot be read
pub fn read_save(path: &Path, config: &GameConfig) -> Result<(Session, Vec<DecodeIssue>), SaveError> {
    let text = fs::read_to_string(path).map_err(|source| SaveError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut session = Session::blank(config);
    let issues = decode(&text, &mut session);
    info!(
        "loaded save {} ({} sections with issues)",
        path.display(),
        issues.len()
    );
    Ok((session, issues))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::LoadedDice;

    fn played_session() -> Session {
        let config = GameConfig::default();
        let mut session = Session::new(&config, &mut LoadedDice::new([1, 2, 0, 1]));
        session.set_player_name("Ada Lovelace");
        session.unlock_doors();
        session.room = 2;
        session.moves = 7;
        session.vitals.oxygen.drain(3);
        session.vitals.energy.raise_max(1);
        session.vitals.energy.drain(4);
        session.inventory.add(Item::oxygen_canister());
        session.inventory.add(Item::energy_pack());
        session.rooms[2].mark_visited();
        let first_quick = *session.events.quick_targets.iter().next().unwrap();
        session.events.take_quick(first_quick);
        session.log_book.record("> look\nBridge\nA chair and a console.");
        session.log_book.record("--\n\\n is not a newline\nplain");
        session.log_book.record("NAME\nLOG");
        session
    }

    #[test]
    fn encode_writes_sections_in_order() {
        let text = encode(&played_session());
        let headers: Vec<&str> = text
            .lines()
            .take_while(|line| *line != "LOG")
            .filter(|line| Section::from_token(line).is_some())
            .collect();
        let expected: Vec<&str> = Section::ALL[..11].iter().map(|s| s.token()).collect();
        assert_eq!(headers, expected);
        assert!(text.contains("OXYGEN\n7,10\n"));
        assert!(text.contains("ENERGY\n7,11\n"));
    }

    #[test]
    fn file_round_trip_restores_the_session() {
        let session = played_session();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slots").join("one.sav");
        write_save(&path, &session).unwrap();
        let (loaded, issues) = read_save(&path, &GameConfig::default()).unwrap();
        assert!(issues.is_empty(), "{issues:?}");
        assert_eq!(loaded, session);
    }

    #[test]
    fn log_separators_inside_entries_are_escaped() {
        let text = encode(&played_session());
        assert!(text.contains("\n\\--\n\\\\n is not a newline\n"));
        let mut restored = Session::blank(&GameConfig::default());
        decode(&text, &mut restored);
        assert_eq!(restored.log_book.len(), 3);
        assert_eq!(restored.log_book.get(1), Some("--\n\\n is not a newline\nplain"));
    }

    #[test]
    fn carriage_returns_in_log_entries_survive() {
        let mut session = played_session();
        session.log_book.record("a\r\nb");
        session.log_book.record("x\ry");
        let mut restored = Session::blank(&GameConfig::default());
        decode(&encode(&session), &mut restored);
        assert_eq!(restored.log_book, session.log_book);
        assert_eq!(restored.log_book.get(3), Some("a\nb"));
        assert_eq!(restored.log_book.get(4), Some("x\ry"));
    }

    #[test]
    fn missing_sections_keep_defaults() {
        let mut session = Session::blank(&GameConfig::default());
        let issues = decode("NAME\nZed\nROOM\n4\n", &mut session);
        assert_eq!(session.player_name, "Zed");
        assert_eq!(session.room, 4);
        assert_eq!(session.vitals.oxygen, Gauge::full(10));
        assert!(issues.contains(&DecodeIssue::Missing(Section::Oxygen)));
        assert!(issues.contains(&DecodeIssue::Missing(Section::Log)));
        assert_eq!(issues.len(), Section::ALL.len() - 2);
    }

    #[test]
    fn malformed_values_are_reported_and_ignored() {
        let mut text = encode(&played_session());
        text = text.replace("OXYGEN\n7,10", "OXYGEN\nlots");
        text = text.replace("ROOM\n2\n", "ROOM\n42\n");
        let mut session = Session::blank(&GameConfig::default());
        let issues = decode(&text, &mut session);
        assert_eq!(issues.len(), 2, "{issues:?}");
        assert!(matches!(issues[0], DecodeIssue::Malformed { section: Section::Oxygen, .. }));
        assert!(matches!(issues[1], DecodeIssue::Malformed { section: Section::Room, .. }));
        assert_eq!(session.vitals.oxygen, Gauge::full(10));
        assert_eq!(session.room, 0);
        assert_eq!(session.player_name, "Ada Lovelace");
    }

    #[test]
    fn vitals_are_clamped_to_max() {
        let mut session = Session::blank(&GameConfig::default());
        decode("ENERGY\n15,12\n", &mut session);
        assert_eq!(session.vitals.energy, Gauge::full(12));
    }

    #[test]
    fn unknown_items_are_skipped() {
        let mut session = Session::blank(&GameConfig::default());
        decode("INVENTORY\nenergy pack\nflux capacitor\nFIX\n1\n", &mut session);
        assert_eq!(session.inventory.names(), vec!["energy pack"]);
        assert_eq!(session.events.fix_targets, BTreeSet::from([1]));
    }

    #[test]
    fn ineligible_event_rooms_are_rejected() {
        let mut session = Session::blank(&GameConfig::default());
        let issues = decode("FIX\n0,1\nQUICK\n\n", &mut session);
        assert!(session.events.fix_targets.is_empty());
        assert!(issues.iter().any(|issue| matches!(issue, DecodeIssue::Malformed { section: Section::Fix, .. })));
        assert!(!issues.contains(&DecodeIssue::Missing(Section::Quick)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_save(&dir.path().join("nope.sav"), &GameConfig::default()).unwrap_err();
        assert!(matches!(err, SaveError::Read { .. }));
    }
}
