mod common;

use centauri_engine as ce;
use ce::battle::encryption_for;
use ce::content::NOMINAL;
use ce::save_file::read_save;
use ce::{Game, GameEnd, Gauge, Item, LoadedDice, LossCause, ViewItem, run_repl};
use common::{ScriptedConsole, fresh_session, test_config};

#[test]
fn clearing_a_malfunction_with_plain_attacks() {
    let config = test_config();
    let mut session = fresh_session(&config);
    assert!(session.events.is_fix_target(1));
    assert!(!session.events.is_fix_target(0));
    session.unlock_doors();
    session.room = 2;
    session.rooms[2].flags.visited = true;
    session.events.take_quick(2);

    let mut console = ScriptedConsole::new(&["left", "examine regulator", "a", "a", "a", "examine regulator"]);
    let mut dice = LoadedDice::new([]);
    let mut game = Game::new(session, config, &mut console, &mut dice);
    let end = run_repl(&mut game).expect("repl");
    let session = game.session;

    assert_eq!(end, GameEnd::Quit);
    assert_eq!(session.room, 1);
    assert!(session.rooms[1].flags.fix_resolved);
    assert_eq!(session.vitals.energy, Gauge::full(11));
    assert!(console.meters.iter().any(|m| m.encryption == Some(Gauge::full(encryption_for(0)))));
    assert!(console.meters.iter().any(|m| m.encryption == Some(Gauge::new(0, 3))));
    let nominal_shown = console
        .rendered
        .iter()
        .rev()
        .any(|item| *item == ViewItem::Narration(NOMINAL.into()));
    assert!(nominal_shown);
    assert!(!session.endgame_unlocked);
}

#[test]
fn energy_pack_respects_a_full_meter() {
    let config = test_config();
    let mut session = fresh_session(&config);
    session.inventory.add(Item::energy_pack());

    let mut console = ScriptedConsole::new(&["use energy pack"]);
    let mut dice = LoadedDice::new([]);
    let mut game = Game::new(session, config.clone(), &mut console, &mut dice);
    run_repl(&mut game).expect("repl");
    let mut session = game.session;
    assert!(session.inventory.contains("energy pack"));
    assert_eq!(session.vitals.energy, Gauge::full(10));
    assert!(console.saw(|item| matches!(item, ViewItem::ActionFailure(text) if text.contains("already full"))));

    session.vitals.energy.drain(3);
    let mut console = ScriptedConsole::new(&["use", "energy pack"]);
    let mut game = Game::new(session, config, &mut console, &mut dice);
    run_repl(&mut game).expect("repl");
    let session = game.session;
    assert!(!session.inventory.contains("energy pack"));
    assert_eq!(session.vitals.energy, Gauge::new(8, 10));
}

#[test]
fn use_menu_lists_each_item_once() {
    let config = test_config();
    let mut session = fresh_session(&config);
    session.inventory.add(Item::energy_pack());
    session.inventory.add(Item::oxygen_canister());
    session.inventory.add(Item::energy_pack());

    let mut console = ScriptedConsole::new(&["use", "nothing"]);
    let mut dice = LoadedDice::new([]);
    let mut game = Game::new(session, config, &mut console, &mut dice);
    run_repl(&mut game).expect("repl");
    assert_eq!(game.session.inventory.len(), 3);
    drop(game);

    let expected = vec!["energy pack".to_string(), "oxygen canister".to_string(), "nothing".to_string()];
    assert!(console.saw(|item| matches!(item, ViewItem::Menu { options, .. } if *options == expected)));
}

#[test]
fn bridge_door_opens_from_the_console() {
    let config = test_config();
    let session = fresh_session(&config);
    let mut console = ScriptedConsole::new(&["down", "up", "examine console", "a", "b", "c", "down"]).with_hazard_key('1', 10);
    let mut dice = LoadedDice::new([]);
    let mut game = Game::new(session, config, &mut console, &mut dice);
    run_repl(&mut game).expect("repl");
    let session = game.session;

    assert!(console.saw(|item| *item == ViewItem::ActionFailure("The door appears to be locked".into())));
    assert!(console.saw(|item| *item == ViewItem::ActionFailure("There is no door that way".into())));
    assert!(!session.doors_locked());
    assert_eq!(session.room, 2);
    assert_eq!(session.moves, 1);
    assert!(session.rooms[2].flags.visited);
}

#[test]
fn storage_box_is_looted_once() {
    let config = test_config();
    let session = fresh_session(&config);
    let mut console = ScriptedConsole::new(&["examine box", "examine", "box", "inv"]);
    let mut dice = LoadedDice::new([]);
    let mut game = Game::new(session, config, &mut console, &mut dice);
    run_repl(&mut game).expect("repl");
    let session = game.session;

    assert_eq!(session.inventory.names(), vec!["energy pack", "oxygen canister"]);
    assert!(session.rooms[0].flags.looted);
    assert!(console.saw(|item| *item == ViewItem::ActionFailure("The storage box is empty.".into())));
    assert!(console.saw(|item| matches!(item, ViewItem::Inventory(lines) if lines.len() == 2)));
}

#[test]
fn final_confrontation_then_course_home_wins() {
    let config = test_config();
    let mut session = fresh_session(&config);
    for id in [1, 4, 7] {
        session.rooms[id].resolve_fix();
    }
    assert!(session.unlock_endgame());
    session.unlock_doors();
    session.room = 2;
    session.rooms[2].flags.visited = true;
    session.events.take_quick(2);

    let mut script = vec!["down"];
    script.extend(std::iter::repeat_n("attack", 9));
    script.extend(["up", "up", "examine console", "d"]);
    let mut console = ScriptedConsole::new(&script);
    let mut dice = LoadedDice::new([]);
    let mut game = Game::new(session, config, &mut console, &mut dice);
    let end = run_repl(&mut game).expect("repl");
    let session = game.session;

    assert_eq!(end, GameEnd::Won);
    assert!(session.mainframe_cleared());
    assert!(console.meters.iter().any(|m| m.encryption == Some(Gauge::full(9))));
    assert!(console.lines.is_empty());
}

#[test]
fn losing_a_hack_ends_the_session() {
    let config = test_config();
    let mut session = fresh_session(&config);
    session.vitals.energy = Gauge::new(1, 10);
    session.unlock_doors();
    session.room = 1;
    session.rooms[1].flags.visited = true;

    let mut console = ScriptedConsole::new(&["examine regulator", "g", "a", "look"]);
    // guard then blocked strike, attack then unblocked strike
    let mut dice = LoadedDice::new([4, 0, 4]);
    let mut game = Game::new(session, config, &mut console, &mut dice);
    let end = run_repl(&mut game).expect("repl");

    assert_eq!(end, GameEnd::Lost(LossCause::Overpowered));
    assert_eq!(game.session.vitals.energy.current(), 0);
    assert!(!game.session.rooms[1].flags.fix_resolved);
    drop(game);
    assert_eq!(console.lines, vec!["look".to_string()]);
}

#[test]
fn ambient_oxygen_can_run_out() {
    let config = ce::GameConfig {
        moves_per_oxygen: 1,
        ..test_config()
    };
    let mut session = fresh_session(&config);
    session.vitals.oxygen = Gauge::new(2, 10);
    session.unlock_doors();
    session.room = 1;
    session.rooms[1].flags.visited = true;
    session.rooms[4].flags.visited = true;

    let mut console = ScriptedConsole::new(&["down", "up", "down"]);
    let mut dice = LoadedDice::new([]);
    let mut game = Game::new(session, config, &mut console, &mut dice);
    let end = run_repl(&mut game).expect("repl");

    assert_eq!(end, GameEnd::Lost(LossCause::Suffocated));
    assert_eq!(game.session.moves, 2);
    assert!(game.session.vitals.oxygen.is_empty());
}

#[test]
fn unknown_commands_reprompt() {
    let config = test_config();
    let session = fresh_session(&config);
    let mut console = ScriptedConsole::new(&["dance", "quit", "look"]);
    let mut dice = LoadedDice::new([]);
    let mut game = Game::new(session, config, &mut console, &mut dice);
    let end = run_repl(&mut game).expect("repl");
    assert_eq!(end, GameEnd::Quit);
    drop(game);
    assert!(console.saw(|item| matches!(item, ViewItem::Error(text) if text.contains("dance"))));
    assert_eq!(console.lines.len(), 1);
}

#[test]
fn commands_become_log_entries() {
    let config = test_config();
    let session = fresh_session(&config);
    let mut console = ScriptedConsole::new(&["look", "examine door", "log"]);
    console.keys.extend(['a', 'd', 'd', 'q']);
    let mut dice = LoadedDice::new([]);
    let mut game = Game::new(session, config, &mut console, &mut dice);
    run_repl(&mut game).expect("repl");
    let log_book = game.session.log_book.clone();
    drop(game);

    assert!(log_book.get(0).is_some_and(|entry| entry.starts_with("> look\nBridge")));
    assert!(log_book.get(1).is_some_and(|entry| entry.contains("sealed")));
    // newest first, then back one, forward twice wraps around
    let pages: Vec<usize> = console
        .rendered
        .iter()
        .filter_map(|item| match item {
            ViewItem::LogPage { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(pages, vec![1, 0, 1, 0]);
}

#[test]
fn save_command_round_trips_through_disk() {
    let config = test_config();
    let mut session = fresh_session(&config);
    session.set_player_name("Vega");
    session.inventory.add(Item::oxygen_canister());
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("run.sav");
    let command = format!("save {}", path.display());

    let mut console = ScriptedConsole::new(&["look", command.as_str()]);
    let mut dice = LoadedDice::new([]);
    let mut game = Game::new(session, config.clone(), &mut console, &mut dice);
    run_repl(&mut game).expect("repl");
    let session = game.session;

    let (loaded, issues) = read_save(&path, &config).expect("read save");
    assert!(issues.is_empty(), "{issues:?}");
    assert_eq!(loaded.player_name, "Vega");
    assert_eq!(loaded.inventory, session.inventory);
    assert_eq!(loaded.events, session.events);
    assert_eq!(loaded.rooms, session.rooms);
    assert_eq!(loaded.vitals, session.vitals);
    assert_eq!(loaded.log_book.len(), 1);
}

#[test]
fn failed_save_is_reported_and_play_continues() {
    let config = test_config();
    let session = fresh_session(&config);
    let dir = tempfile::tempdir().expect("tempdir");
    // a directory can't be written as a file
    let command = format!("save {}", dir.path().display());

    let mut console = ScriptedConsole::new(&[command.as_str(), "look"]);
    let mut dice = LoadedDice::new([]);
    let mut game = Game::new(session, config, &mut console, &mut dice);
    let end = run_repl(&mut game).expect("repl");
    assert_eq!(end, GameEnd::Quit);
    drop(game);
    assert!(console.saw(|item| matches!(item, ViewItem::Error(text) if text.starts_with("Save failed"))));
    assert!(console.saw(|item| matches!(item, ViewItem::RoomDescription { name, .. } if name == "Bridge")));
}
