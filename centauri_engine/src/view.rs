//! View module.
//!
//! Handlers don't print. They push [`ViewItem`]s into the [`View`], which hands
//! them to the [`Console`] in one block and keeps a plain-text copy of what was
//! shown for the log book.
use std::fmt::Write;

use anyhow::Result;
use colored::Colorize;
use textwrap::fill;

use crate::console::Console;
use crate::style::GameStyle;
use crate::vitals::{Gauge, Vitals};

/// Readings shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Meters {
    pub oxygen: Gauge,
    pub energy: Gauge,
    pub encryption: Option<Gauge>,
}
impl Meters {
    pub fn from_vitals(vitals: &Vitals) -> Meters {
        Meters {
            oxygen: vitals.oxygen,
            energy: vitals.energy,
            encryption: None,
        }
    }

    #[must_use]
    pub fn with_encryption(mut self, encryption: Gauge) -> Meters {
        self.encryption = Some(encryption);
        self
    }

    /// Render the status bar as a single line.
    pub fn styled(&self) -> String {
        let bar = |gauge: Gauge| "=".repeat(gauge.current() as usize);
        let mut line = format!(
            "O2: [{}] {} | \u{26A1}: [{}] {}",
            bar(self.oxygen).oxygen_style(),
            self.oxygen,
            bar(self.energy).energy_style(),
            self.energy
        );
        if let Some(encryption) = self.encryption {
            let _ = write!(line, " | \u{1F512}: [{}] {}", bar(encryption).encryption_style(), encryption);
        }
        line.push_str(" | Help (?)");
        line
    }
}

/// Who is speaking a line of dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Voice {
    Cpu,
    Player,
}

/// One cell of the ship map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapCell {
    pub name: &'static str,
    pub color: (u8, u8, u8),
    pub here: bool,
}

/// A single semantic piece of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewItem {
    ActionFailure(String),
    ActionSuccess(String),
    Banner(String),
    Danger(String),
    Error(String),
    Help(Vec<(String, String)>),
    Hint(String),
    Inventory(Vec<(String, String)>),
    LogPage {
        index: usize,
        total: usize,
        text: String,
    },
    Map(Vec<Vec<Option<MapCell>>>),
    Menu {
        prompt: String,
        options: Vec<String>,
    },
    Narration(String),
    RoomDescription {
        name: String,
        description: String,
        color: (u8, u8, u8),
    },
    RoomEntered {
        name: String,
        color: (u8, u8, u8),
    },
    Speech {
        speaker: String,
        line: String,
        voice: Voice,
    },
    Title(String),
}
impl ViewItem {
    /// Plain text recorded in the log book, or `None` for items that are not logged
    /// (hints, help, map, and log pages themselves).
    pub fn log_text(&self) -> Option<String> {
        match self {
            ViewItem::ActionFailure(text)
            | ViewItem::ActionSuccess(text)
            | ViewItem::Banner(text)
            | ViewItem::Danger(text)
            | ViewItem::Error(text)
            | ViewItem::Narration(text)
            | ViewItem::Title(text) => Some(text.clone()),
            ViewItem::RoomDescription { name, description, .. } => Some(format!("{name}\n{description}")),
            ViewItem::RoomEntered { name, .. } => Some(format!("You enter the {name}.")),
            ViewItem::Speech { speaker, line, .. } => Some(format!("[{speaker}]\n{line}")),
            ViewItem::Menu { prompt, options } => {
                let mut text = prompt.clone();
                for option in options {
                    text.push('\n');
                    text.push_str(option);
                }
                Some(text)
            },
            ViewItem::Inventory(lines) => {
                if lines.is_empty() {
                    Some("Inventory: empty".to_string())
                } else {
                    let names: Vec<&str> = lines.iter().map(|(name, _)| name.as_str()).collect();
                    Some(format!("Inventory: {}", names.join(", ")))
                }
            },
            ViewItem::Help(_) | ViewItem::Hint(_) | ViewItem::LogPage { .. } | ViewItem::Map(_) => None,
        }
    }

    /// Styled, wrapped text for the terminal.
    pub fn styled(&self, width: usize) -> String {
        let wrap = |text: &str| fill(text, width.max(20));
        match self {
            ViewItem::ActionFailure(text) => wrap(text).failure_style().to_string(),
            ViewItem::ActionSuccess(text) => wrap(text).success_style().to_string(),
            ViewItem::Banner(text) => format!("{:^width$}", text.banner_style(), width = width),
            ViewItem::Danger(text) => wrap(text).danger_style().to_string(),
            ViewItem::Error(text) => format!("{} {}", "\u{26A0}".error_style(), wrap(text).error_style()),
            ViewItem::Help(commands) => {
                let mut out = format!("{}\n", "--List of commands--".subheading_style());
                for (command, about) in commands {
                    let _ = writeln!(out, "{command} {}", format!("- {about}").dimmed());
                }
                out
            },
            ViewItem::Hint(text) => format!("<{text}>").hint_style().to_string(),
            ViewItem::Inventory(lines) => {
                let mut out = format!("{}\n", "Inventory".subheading_style());
                if lines.is_empty() {
                    out.push_str(&"You aren't carrying anything.".dimmed().to_string());
                }
                for (name, description) in lines {
                    let _ = writeln!(out, "{} {}", name.item_style(), format!("- {description}").dimmed());
                }
                out
            },
            ViewItem::LogPage { index, total, text } => {
                let digits = total.to_string().len();
                format!(
                    "{}\n\n{text}",
                    format!(
                        "Entry [{:>digits$}/{total}] | Previous (a) | Next (d) | Quit (q)",
                        index + 1
                    )
                    .hint_style()
                )
            },
            ViewItem::Map(rows) => styled_map(rows),
            ViewItem::Menu { prompt, options } => {
                let mut out = wrap(prompt);
                for option in options {
                    out.push('\n');
                    out.push_str(option);
                }
                out
            },
            ViewItem::Narration(text) => wrap(text),
            ViewItem::RoomDescription {
                name,
                description,
                color,
            } => format!("{}\n{}", name.room_style(*color), wrap(description)),
            ViewItem::RoomEntered { name, color } => format!("You enter the {}.", name.room_style(*color)),
            ViewItem::Speech { speaker, line, voice } => match voice {
                Voice::Cpu => format!("[{}]\n{}", speaker.cpu_name_style(), wrap(line).cpu_style()),
                Voice::Player => format!("[{}]\n{}", speaker.player_name_style(), wrap(line).player_style()),
            },
            ViewItem::Title(text) => format!("{:^width$}", text.title_style(), width = width),
        }
    }
}

/// Draw the deck grid as 3x3 colored blocks with a legend.
fn styled_map(rows: &[Vec<Option<MapCell>>]) -> String {
    let mut out = format!("{}\n\n", "--Map--".subheading_style());
    let mut legend = Vec::new();
    for row in rows {
        let mut top = String::new();
        let mut middle = String::new();
        for cell in row {
            match cell {
                Some(cell) => {
                    top.push_str(&"---".room_block_style(cell.color).to_string());
                    let marker = if cell.here {
                        format!("|{}|", "*".blink().truecolor(255, 0, 0))
                    } else {
                        "| |".to_string()
                    };
                    middle.push_str(&marker.room_block_style(cell.color).to_string());
                    legend.push(cell.name.room_style(cell.color).to_string());
                },
                None => {
                    top.push_str("   ");
                    middle.push_str("   ");
                },
            }
        }
        let _ = writeln!(out, "{top}\n{middle}\n{top}");
    }
    out.push('\n');
    out.push_str(&legend.join("\n"));
    out
}

/// Buffer of output for the current command.
#[derive(Debug, Default)]
pub struct View {
    items: Vec<ViewItem>,
    entry: Vec<String>,
}
impl View {
    pub fn new() -> View {
        View::default()
    }

    pub fn push(&mut self, item: ViewItem) {
        self.items.push(item);
    }

    /// Items waiting to be shown.
    pub fn pending(&self) -> &[ViewItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Note what the player typed so it appears in the log book entry.
    pub fn record_input(&mut self, input: &str) {
        self.entry.push(format!("> {}", input.trim()));
    }

    /// Show everything pushed so far and keep its plain text for the log book.
    ///
    /// # Errors
    /// - if the console fails to render
    pub fn flush(&mut self, console: &mut dyn Console) -> Result<()> {
        if self.items.is_empty() {
            return Ok(());
        }
        console.render(&self.items)?;
        for item in self.items.drain(..) {
            if let Some(text) = item.log_text() {
                self.entry.push(text);
            }
        }
        Ok(())
    }

    /// Take the text accumulated since the last call, as one log book entry.
    pub fn take_entry(&mut self) -> Option<String> {
        if self.entry.is_empty() {
            return None;
        }
        let entry = self.entry.join("\n");
        self.entry.clear();
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_and_maps_are_not_logged() {
        assert_eq!(ViewItem::Hint("Press any key".into()).log_text(), None);
        assert_eq!(ViewItem::Map(Vec::new()).log_text(), None);
        assert_eq!(
            ViewItem::Narration("Doors unlocked".into()).log_text(),
            Some("Doors unlocked".into())
        );
    }

    #[test]
    fn take_entry_joins_and_clears() {
        let mut view = View::new();
        view.record_input("look ");
        assert_eq!(view.take_entry(), Some("> look".into()));
        assert_eq!(view.take_entry(), None);
    }

    #[test]
    fn meters_include_encryption_only_in_battle() {
        colored::control::set_override(false);
        let meters = Meters::from_vitals(&Vitals::new(10, 10));
        assert!(!meters.styled().contains('\u{1F512}'));
        let meters = meters.with_encryption(Gauge::full(3));
        assert!(meters.styled().contains("3/3"));
    }

    #[test]
    fn log_page_header_counts_from_one() {
        colored::control::set_override(false);
        let page = ViewItem::LogPage {
            index: 0,
            total: 12,
            text: "hello".into(),
        };
        assert!(page.styled(80).contains("Entry [ 1/12]"));
    }
}
