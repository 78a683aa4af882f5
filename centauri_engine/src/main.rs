#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Centauri **
//! Wake up alone on a failing colony ship and bring it home.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use log::{info, warn};

use centauri_engine::config::{CONFIG_FILE, load_config};
use centauri_engine::intro::run_intro;
use centauri_engine::save_file::read_save;
use centauri_engine::terminal::TerminalConsole;
use centauri_engine::{CENTAURI_VERSION, Game, GameEnd, LossCause, RandomDice, Session, run_repl};

/// Directory for the engine's log file.
const LOG_DIR: &str = "logs";

#[derive(Parser)]
#[command(author, version, about = "A text-driven spacecraft exploration game.")]
struct Cli {
    /// Resume from this save file instead of starting a new session.
    save_file: Option<PathBuf>,
    /// Read settings from this file.
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,
}

/// Send log output to `logs/centauri.log`, or stderr if the file can't be opened.
fn init_logging() {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    let log_path = Path::new(LOG_DIR).join("centauri.log");
    let file = fs::create_dir_all(LOG_DIR).and_then(|()| File::create(&log_path));
    match file {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder.init();
        },
        Err(err) => {
            builder.init();
            warn!("could not open {}: {err}; logging to stderr", log_path.display());
        },
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();
    info!("Start: Centauri {CENTAURI_VERSION}");

    let config = load_config(&cli.config);
    let mut dice: RandomDice = match config.seed {
        Some(seed) => {
            info!("using fixed seed {seed}");
            RandomDice::seeded(seed)
        },
        None => RandomDice::from_os(),
    };
    let mut console = TerminalConsole::new();

    let resume = cli.save_file.clone();
    let session = match &resume {
        Some(path) => {
            let (session, issues) = read_save(path, &config).with_context(|| format!("resuming from {}", path.display()))?;
            for issue in &issues {
                warn!("{}: {issue}", path.display());
            }
            session
        },
        None => Session::new(&config, &mut dice),
    };

    // clear the screen
    print!("\x1B[2J\x1B[H");
    std::io::stdout().flush().context("clearing the screen")?;

    let mut game = Game::new(session, config, &mut console, &mut dice);
    if let Some(path) = resume {
        game = game.with_save_path(path);
        println!("{}\n", "Session restored.".italic());
    } else {
        run_intro(&mut game)?;
    }

    let end = run_repl(&mut game)?;
    let closing = match end {
        GameEnd::Won => "MISSION COMPLETE. The ship is on course for home.".bold().green(),
        GameEnd::Lost(LossCause::Overpowered) => "GAME OVER. The rogue process has taken the ship.".bold().red(),
        GameEnd::Lost(LossCause::Suffocated) => "GAME OVER. You ran out of air.".bold().red(),
        GameEnd::Quit => "Session ended.".italic(),
    };
    println!("\n{closing}");
    info!("Centauri exiting: {end:?}");
    Ok(())
}
