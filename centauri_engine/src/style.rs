//! Styling helpers for terminal output.
//!
//! The [`GameStyle`] trait provides a set of convenience methods for applying
//! ANSI styling via the `colored` crate. Implementations for `&str` and
//! `String` are provided so string literals can be styled directly.

use colored::{ColoredString, Colorize};

/// Convenience trait for applying color and style to text output.
pub trait GameStyle {
    fn title_style(&self) -> ColoredString;
    fn banner_style(&self) -> ColoredString;
    fn cpu_name_style(&self) -> ColoredString;
    fn cpu_style(&self) -> ColoredString;
    fn player_name_style(&self) -> ColoredString;
    fn player_style(&self) -> ColoredString;
    fn danger_style(&self) -> ColoredString;
    fn hint_style(&self) -> ColoredString;
    fn success_style(&self) -> ColoredString;
    fn failure_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
    fn item_style(&self) -> ColoredString;
    fn subheading_style(&self) -> ColoredString;
    fn oxygen_style(&self) -> ColoredString;
    fn energy_style(&self) -> ColoredString;
    fn encryption_style(&self) -> ColoredString;
    fn room_style(&self, color: (u8, u8, u8)) -> ColoredString;
    fn room_block_style(&self, color: (u8, u8, u8)) -> ColoredString;
}

impl GameStyle for &str {
    fn title_style(&self) -> ColoredString {
        self.bold().underline().truecolor(0, 255, 255)
    }
    fn banner_style(&self) -> ColoredString {
        self.bold().blink().truecolor(255, 0, 0)
    }
    fn cpu_name_style(&self) -> ColoredString {
        self.truecolor(0, 255, 0)
    }
    fn cpu_style(&self) -> ColoredString {
        self.truecolor(255, 255, 0)
    }
    fn player_name_style(&self) -> ColoredString {
        self.truecolor(92, 92, 255)
    }
    fn player_style(&self) -> ColoredString {
        self.truecolor(192, 192, 192)
    }
    fn danger_style(&self) -> ColoredString {
        self.bold().truecolor(255, 0, 0)
    }
    fn hint_style(&self) -> ColoredString {
        self.dimmed()
    }
    fn success_style(&self) -> ColoredString {
        self.italic().truecolor(110, 220, 110)
    }
    fn failure_style(&self) -> ColoredString {
        self.italic().truecolor(220, 180, 40)
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
    fn item_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40)
    }
    fn subheading_style(&self) -> ColoredString {
        self.underline()
    }
    fn oxygen_style(&self) -> ColoredString {
        self.truecolor(95, 135, 255)
    }
    fn energy_style(&self) -> ColoredString {
        self.truecolor(0, 255, 0)
    }
    fn encryption_style(&self) -> ColoredString {
        self.truecolor(255, 0, 215)
    }
    fn room_style(&self, color: (u8, u8, u8)) -> ColoredString {
        let (r, g, b) = color;
        self.bold().truecolor(r, g, b)
    }
    fn room_block_style(&self, color: (u8, u8, u8)) -> ColoredString {
        let (r, g, b) = color;
        self.on_truecolor(r, g, b)
    }
}

impl GameStyle for String {
    fn title_style(&self) -> ColoredString {
        self.as_str().title_style()
    }
    fn banner_style(&self) -> ColoredString {
        self.as_str().banner_style()
    }
    fn cpu_name_style(&self) -> ColoredString {
        self.as_str().cpu_name_style()
    }
    fn cpu_style(&self) -> ColoredString {
        self.as_str().cpu_style()
    }
    fn player_name_style(&self) -> ColoredString {
        self.as_str().player_name_style()
    }
    fn player_style(&self) -> ColoredString {
        self.as_str().player_style()
    }
    fn danger_style(&self) -> ColoredString {
        self.as_str().danger_style()
    }
    fn hint_style(&self) -> ColoredString {
        self.as_str().hint_style()
    }
    fn success_style(&self) -> ColoredString {
        self.as_str().success_style()
    }
    fn failure_style(&self) -> ColoredString {
        self.as_str().failure_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
    fn item_style(&self) -> ColoredString {
        self.as_str().item_style()
    }
    fn subheading_style(&self) -> ColoredString {
        self.as_str().subheading_style()
    }
    fn oxygen_style(&self) -> ColoredString {
        self.as_str().oxygen_style()
    }
    fn energy_style(&self) -> ColoredString {
        self.as_str().energy_style()
    }
    fn encryption_style(&self) -> ColoredString {
        self.as_str().encryption_style()
    }
    fn room_style(&self, color: (u8, u8, u8)) -> ColoredString {
        self.as_str().room_style(color)
    }
    fn room_block_style(&self, color: (u8, u8, u8)) -> ColoredString {
        self.as_str().room_block_style(color)
    }
}
