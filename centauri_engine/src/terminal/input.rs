//! Line input for the terminal front end.
//!
//! An interactive terminal gets a rustyline editor that completes command words.
//! Anything else is read line by line on a helper thread, so the console can wait
//! for a line with a timeout and leave it queued if none arrives in time.

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};

use crate::console::InputEvent;
use crate::content::COMMANDS;

type ReplEditor = rustyline::Editor<CentauriHelper, DefaultHistory>;

#[derive(Default)]
pub(crate) struct CentauriHelper;

impl Helper for CentauriHelper {}

impl Completer for CentauriHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let (start, prefix) = current_prefix(line, pos);
        if prefix.is_empty() {
            return Ok((start, Vec::new()));
        }
        let lower = prefix.to_lowercase();
        let pairs = COMMANDS
            .iter()
            .map(|(command, _)| *command)
            .filter(|command| command.starts_with(&lower))
            .map(|command| Pair {
                display: command.to_string(),
                replacement: command.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CentauriHelper {
    type Hint = String;
}

impl Highlighter for CentauriHelper {}

impl Validator for CentauriHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

/// Start offset and text of the word being typed. Only the first word completes.
fn current_prefix(line: &str, pos: usize) -> (usize, String) {
    let slice = &line[..pos];
    let trimmed = slice.trim_start_matches(char::is_whitespace);
    let start = pos - trimmed.len();
    if trimmed.contains(char::is_whitespace) {
        return (pos, String::new());
    }
    (start, trimmed.to_string())
}

/// Lines forwarded from a reader running on its own thread.
pub(crate) struct QueuedLines {
    lines: Receiver<io::Result<String>>,
}
impl QueuedLines {
    /// Forward stdin.
    pub(crate) fn stdin() -> QueuedLines {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || forward(io::stdin().lock(), &tx));
        QueuedLines { lines: rx }
    }

    #[cfg(test)]
    fn from_reader<R: BufRead + Send + 'static>(reader: R) -> QueuedLines {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || forward(reader, &tx));
        QueuedLines { lines: rx }
    }

    /// Block until the next line or end of input.
    pub(crate) fn next_line(&self) -> io::Result<InputEvent> {
        match self.lines.recv() {
            Ok(line) => line.map(InputEvent::Line),
            Err(_) => Ok(InputEvent::Eof),
        }
    }

    /// Wait at most `wait` for the next line. `Ok(None)` leaves the queue untouched.
    pub(crate) fn next_line_within(&self, wait: Duration) -> io::Result<Option<InputEvent>> {
        match self.lines.recv_timeout(wait) {
            Ok(line) => line.map(|line| Some(InputEvent::Line(line))),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Ok(Some(InputEvent::Eof)),
        }
    }

    fn read_line(&self, prompt: &str) -> io::Result<InputEvent> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;
        self.next_line()
    }
}

fn forward(reader: impl BufRead, tx: &Sender<io::Result<String>>) {
    for line in reader.lines() {
        let failed = line.is_err();
        if tx.send(line).is_err() || failed {
            break;
        }
    }
    debug!("line reader finished");
}

/// Where lines of input come from.
pub(crate) enum LineInput {
    Editor(Box<ReplEditor>),
    Queued(QueuedLines),
}
impl LineInput {
    /// Use the line editor when stdin is a terminal and the editor starts.
    pub(crate) fn open() -> LineInput {
        if !io::stdin().is_terminal() {
            info!("stdin is not a terminal; reading plain lines");
            return LineInput::Queued(QueuedLines::stdin());
        }
        match ReplEditor::new() {
            Ok(mut editor) => {
                editor.set_helper(Some(CentauriHelper));
                info!("using the rustyline line editor");
                LineInput::Editor(Box::new(editor))
            },
            Err(err) => {
                warn!("line editor unavailable ({err}); reading plain lines");
                LineInput::Queued(QueuedLines::stdin())
            },
        }
    }

    /// The queue, when keys must be taken from lines too.
    pub(crate) fn queued(&self) -> Option<&QueuedLines> {
        match self {
            LineInput::Queued(lines) => Some(lines),
            LineInput::Editor(_) => None,
        }
    }

    /// Read one line. A failing editor is dropped for plain lines and the read retried.
    pub(crate) fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        let failure = match self {
            LineInput::Queued(lines) => return lines.read_line(prompt),
            LineInput::Editor(editor) => match editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        if let Err(err) = editor.add_history_entry(line.as_str()) {
                            warn!("failed to append to history: {err}");
                        }
                    }
                    return Ok(InputEvent::Line(line));
                },
                Err(ReadlineError::Interrupted) => return Ok(InputEvent::Interrupted),
                Err(ReadlineError::Eof) => return Ok(InputEvent::Eof),
                Err(err) => err,
            },
        };
        warn!("line editor failed ({failure}); switching to plain lines");
        *self = LineInput::Queued(QueuedLines::stdin());
        self.read_line(prompt)
    }
}

/// The key a line stands for: its first non-blank character, or Enter for a blank line.
pub(crate) fn key_of_line(line: &str) -> char {
    line.trim().chars().next().unwrap_or('\n')
}
