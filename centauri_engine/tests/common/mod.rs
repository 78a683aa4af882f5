#![allow(dead_code)]

use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use centauri_engine as ce;
use ce::{Console, InputEvent, Meters, ViewItem};

/// Console that replays scripted input and records everything shown.
#[derive(Default)]
pub struct ScriptedConsole {
    pub lines: VecDeque<String>,
    pub keys: VecDeque<char>,
    pub rendered: Vec<ViewItem>,
    pub meters: Vec<Meters>,
    /// Press this key during a hazard once the displayed oxygen is at or below the threshold.
    pub hazard_key: Option<(char, u32)>,
}
impl ScriptedConsole {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|line| (*line).to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_hazard_key(mut self, key: char, at_oxygen: u32) -> Self {
        self.hazard_key = Some((key, at_oxygen));
        self
    }

    pub fn saw(&self, wanted: impl Fn(&ViewItem) -> bool) -> bool {
        self.rendered.iter().any(wanted)
    }

    pub fn last_oxygen(&self) -> Option<u32> {
        self.meters.last().map(|meters| meters.oxygen.current())
    }
}
impl Console for ScriptedConsole {
    fn render(&mut self, items: &[ViewItem]) -> Result<()> {
        self.rendered.extend_from_slice(items);
        Ok(())
    }

    fn show_meters(&mut self, meters: &Meters) -> Result<()> {
        self.meters.push(*meters);
        Ok(())
    }

    fn read_line(&mut self, _prompt: &str) -> Result<InputEvent> {
        Ok(self.lines.pop_front().map_or(InputEvent::Eof, InputEvent::Line))
    }

    fn read_key(&mut self) -> Result<char> {
        Ok(self.keys.pop_front().unwrap_or('q'))
    }

    fn poll_key(&mut self, wait: Duration) -> Result<Option<char>> {
        if let (Some((key, at)), Some(shown)) = (self.hazard_key, self.last_oxygen()) {
            if shown <= at {
                self.hazard_key = None;
                return Ok(Some(key));
            }
        }
        thread::sleep(wait);
        Ok(None)
    }
}

/// Default config with a short hazard tick so tests don't wait on real seconds.
pub fn test_config() -> ce::GameConfig {
    ce::GameConfig {
        hazard_tick_ms: 100,
        ..ce::GameConfig::default()
    }
}

/// A fresh session with rolls all zero: fix targets are rooms 1, 4, 7 and
/// quick targets are rooms 2, 3.
pub fn fresh_session(config: &ce::GameConfig) -> ce::Session {
    ce::Session::new(config, &mut ce::LoadedDice::new([]))
}
