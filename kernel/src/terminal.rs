use core::fmt::Write;

use heapless::{Deque, String as HString};

use crate::commands::{self, Reply, NOT_FOUND};
use crate::device::PowerRequest;

pub const PROMPT: &str = "> ";
pub const OUTPUT_COLS: usize = 48;

pub type OutputLine = HString<OUTPUT_COLS>;

/// Line editor with a bounded scroll-back.
///
/// `L` caps the input line in bytes; `H` caps the number of scroll-back
/// lines kept, oldest evicted first.
pub struct Terminal<const L: usize = 256, const H: usize = 10> {
    input: HString<L>,
    cursor: usize,
    scrollback: Deque<OutputLine, H>,
    chars_typed: u32,
}

impl<const L: usize, const H: usize> Terminal<L, H> {
    pub const fn new() -> Self {
        Self {
            input: HString::new(),
            cursor: 0,
            scrollback: Deque::new(),
            chars_typed: 0,
        }
    }

    pub fn input(&self) -> &str {
        self.input.as_str()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn chars_typed(&self) -> u32 {
        self.chars_typed
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.scrollback.iter().map(|line| line.as_str())
    }

    pub fn line_count(&self) -> usize {
        self.scrollback.len()
    }

    pub const fn history_capacity(&self) -> usize {
        H
    }

    /// Appends a character; returns `false` when the line is full.
    pub fn insert(&mut self, ch: char) -> bool {
        if self.input.push(ch).is_err() {
            return false;
        }
        self.cursor = self.input.len();
        true
    }

    pub fn erase(&mut self) -> bool {
        let removed = self.input.pop().is_some();
        self.cursor = self.input.len();
        removed
    }

    /// The tail of the input line that fits in `cols` columns.
    pub fn visible_input(&self, cols: usize) -> &str {
        let text = self.input.as_str();
        let len = text.chars().count();
        if len <= cols {
            return text;
        }
        let skip = len - cols;
        let start = text.char_indices().nth(skip).map(|(idx, _)| idx).unwrap_or(text.len());
        &text[start..]
    }

    pub fn push_line(&mut self, text: &str) {
        let mut line = OutputLine::new();
        for ch in text.chars() {
            if line.push(ch).is_err() {
                break;
            }
        }
        if self.scrollback.is_full() {
            self.scrollback.pop_front();
        }
        let _ = self.scrollback.push_back(line);
    }

    /// Empties the scroll-back and resets the typing counter.
    pub fn clear(&mut self) {
        self.scrollback.clear();
        self.chars_typed = 0;
    }

    /// Submits the current line: echo, dispatch, then credit its characters
    /// to the typing counter. An empty line does nothing at all.
    pub fn submit(&mut self) -> Option<PowerRequest> {
        let line = core::mem::take(&mut self.input);
        self.cursor = 0;
        if line.is_empty() {
            return None;
        }

        let mut echo = OutputLine::new();
        let _ = echo.push_str(PROMPT);
        for ch in line.chars() {
            if echo.push(ch).is_err() {
                break;
            }
        }
        self.push_line(&echo);

        let reply = commands::lookup(line.as_str());
        log::debug!("terminal: `{}` -> {:?}", line.as_str(), reply);
        let mut power = None;
        match reply {
            Reply::Lines(lines) => {
                for text in lines {
                    self.push_line(text);
                }
            }
            Reply::Clear => {
                self.clear();
                return None;
            }
            Reply::CharsTyped => {
                let mut report = OutputLine::new();
                let _ = write!(report, "chars typed: {}", self.chars_typed);
                self.push_line(&report);
            }
            Reply::Power(request, status) => {
                self.push_line(status);
                power = Some(request);
            }
            Reply::NotFound => self.push_line(NOT_FOUND),
        }

        let typed = line.chars().count() as u32;
        self.chars_typed = self.chars_typed.saturating_add(typed);
        power
    }
}

impl<const L: usize, const H: usize> Default for Terminal<L, H> {
    fn default() -> Self {
        Self::new()
    }
}
