#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const CENTAURI_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod battle;
pub mod command;
pub mod config;
pub mod console;
pub mod content;
pub mod dice;
pub mod events;
pub mod game;
pub mod hazard;
pub mod intro;
pub mod item;
pub mod log_book;
pub mod repl;
pub mod room;
pub mod save_file;
pub mod session;
pub mod ship;
pub mod style;
pub mod terminal;
pub mod view;
pub mod vitals;

// Re-exports for convenience
pub use config::GameConfig;
pub use console::{Console, InputEvent};
pub use dice::{Dice, LoadedDice, RandomDice};
pub use game::{Flow, Game, GameEnd, LossCause};
pub use item::{Inventory, Item};
pub use repl::run_repl;
pub use room::{Room, RoomId};
pub use session::Session;
pub use view::{Meters, View, ViewItem};
pub use vitals::{Gauge, Vitals};
