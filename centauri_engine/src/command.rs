//! Command module
//!
//! Describes possible commands used during gameplay.

use crate::ship::Direction;

/// Commands that can be entered at the main prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Examine(Option<String>),
    Go(Direction),
    Help,
    Inventory,
    Log,
    Look,
    Map,
    Quit,
    Save(Option<String>),
    Unknown(String),
    UseItem(Option<String>),
}

fn rest(words: &[&str]) -> Option<String> {
    if words.is_empty() { None } else { Some(words.join(" ")) }
}

/// Parses an input string and returns the matching `Command`. Matching is case-insensitive.
pub fn parse_command(input: &str) -> Command {
    let lowered = input.trim().to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    match words.as_slice() {
        ["help" | "?"] => Command::Help,
        ["log"] => Command::Log,
        ["map"] => Command::Map,
        ["look"] => Command::Look,
        ["inventory" | "inv"] => Command::Inventory,
        ["quit" | "exit"] => Command::Quit,
        ["examine" | "x", target @ ..] => Command::Examine(rest(target)),
        ["use", item @ ..] => Command::UseItem(rest(item)),
        ["save"] => Command::Save(None),
        ["save", _path @ ..] => {
            // keep the path's original case
            let path = input.trim().split_once(char::is_whitespace).map_or("", |(_, path)| path.trim());
            Command::Save(Some(path.to_string()))
        },
        [dir] | ["go" | "move", dir] => {
            Direction::parse(dir).map_or_else(|| Command::Unknown(input.trim().to_string()), Command::Go)
        },
        _ => Command::Unknown(input.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_parse_with_and_without_go() {
        assert_eq!(parse_command("up"), Command::Go(Direction::Up));
        assert_eq!(parse_command("  Go LEFT "), Command::Go(Direction::Left));
        assert_eq!(parse_command("d"), Command::Go(Direction::Down));
        assert_eq!(parse_command("go sideways"), Command::Unknown("go sideways".into()));
    }

    #[test]
    fn optional_arguments() {
        assert_eq!(parse_command("examine"), Command::Examine(None));
        assert_eq!(parse_command("examine Console"), Command::Examine(Some("console".into())));
        assert_eq!(parse_command("use energy pack"), Command::UseItem(Some("energy pack".into())));
        assert_eq!(parse_command("use"), Command::UseItem(None));
    }

    #[test]
    fn save_keeps_path_case() {
        assert_eq!(parse_command("save"), Command::Save(None));
        assert_eq!(
            parse_command("save Slots/My Game.sav"),
            Command::Save(Some("Slots/My Game.sav".into()))
        );
    }

    #[test]
    fn aliases_and_unknowns() {
        assert_eq!(parse_command("?"), Command::Help);
        assert_eq!(parse_command("inv"), Command::Inventory);
        assert_eq!(parse_command("dance wildly"), Command::Unknown("dance wildly".into()));
        assert_eq!(parse_command(""), Command::Unknown(String::new()));
    }
}
