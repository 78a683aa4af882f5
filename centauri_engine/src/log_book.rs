//! The on-suit log book: an append-only record of every block of text shown to the player.

/// Ordered, append-only sequence of rendered text blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogBook {
    entries: Vec<String>,
}
impl LogBook {
    pub fn new() -> LogBook {
        LogBook::default()
    }

    /// Append an entry. Line endings are stored as `\n`, trailing newlines are
    /// dropped and blank entries are ignored.
    pub fn record(&mut self, entry: &str) {
        let entry = entry.replace("\r\n", "\n");
        let entry = entry.trim_end_matches(['\n', '\r']);
        if entry.trim().is_empty() {
            return;
        }
        self.entries.push(entry.to_string());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
