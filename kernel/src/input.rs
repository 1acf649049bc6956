//! Modifier tracking, cursor movement and routing of decoded keys.
//!
//! Ctrl and Alt are independent held flags. Typing mode is exclusive: while
//! it is active every editing key goes to the terminal and the cursor stays
//! put.

use pc_keyboard::KeyCode;

use crate::config::Timing;
use crate::scancode::{Key, ScanEvent};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub x: i32,
    pub y: i32,
    max_x: i32,
    max_y: i32,
}

impl Cursor {
    /// A cursor with a `cw x ch` footprint, centred on a `width x height`
    /// screen.
    pub fn new(width: i32, height: i32, cw: i32, ch: i32) -> Self {
        let max_x = (width - cw).max(0);
        let max_y = (height - ch).max(0);
        Self { x: width / 2, y: height / 2, max_x, max_y }.clamped()
    }

    fn clamped(mut self) -> Self {
        self.x = self.x.clamp(0, self.max_x);
        self.y = self.y.clamp(0, self.max_y);
        self
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
        *self = self.clamped();
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub typing: bool,
}

/// What a decoded key asks the rest of the desktop to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Nothing,
    Moved,
    Click,
    EnterTyping,
    LeaveTyping,
    DismissMenu,
    Insert(char),
    Erase,
    Submit,
}

pub struct InputState {
    pub cursor: Cursor,
    pub modifiers: Modifiers,
    step: i32,
    fine_step: i32,
}

impl InputState {
    pub fn new(cursor: Cursor, timing: &Timing) -> Self {
        Self {
            cursor,
            modifiers: Modifiers::default(),
            step: timing.cursor_step,
            fine_step: timing.fine_step,
        }
    }

    fn step(&self) -> i32 {
        if self.modifiers.ctrl { self.fine_step } else { self.step }
    }

    /// Applies one decoded event. `terminal_open` gates entry into typing
    /// mode.
    pub fn apply(&mut self, evt: ScanEvent, terminal_open: bool) -> Intent {
        let pressed = evt.is_press();
        match evt.key {
            Key::Symbol(KeyCode::LControl) => {
                self.modifiers.ctrl = pressed;
                return Intent::Nothing;
            }
            Key::Symbol(KeyCode::LAlt) => {
                self.modifiers.alt = pressed;
                return Intent::Nothing;
            }
            _ => {}
        }
        if !pressed {
            return Intent::Nothing;
        }
        if self.modifiers.typing {
            self.apply_typing(evt.key)
        } else {
            self.apply_pointer(evt.key, terminal_open)
        }
    }

    fn apply_typing(&mut self, key: Key) -> Intent {
        match key {
            Key::Symbol(KeyCode::Escape) => {
                self.modifiers.typing = false;
                Intent::LeaveTyping
            }
            Key::Symbol(KeyCode::Backspace) => Intent::Erase,
            Key::Symbol(KeyCode::Return) => Intent::Submit,
            Key::Char(ch) => Intent::Insert(ch),
            Key::Symbol(_) => Intent::Nothing,
        }
    }

    fn apply_pointer(&mut self, key: Key, terminal_open: bool) -> Intent {
        let step = self.step();
        let (dx, dy) = match key {
            Key::Symbol(KeyCode::ArrowUp) => (0, -step),
            Key::Symbol(KeyCode::ArrowDown) => (0, step),
            Key::Symbol(KeyCode::ArrowLeft) => (-step, 0),
            Key::Symbol(KeyCode::ArrowRight) => (step, 0),
            Key::Symbol(KeyCode::Return) => return Intent::Click,
            Key::Char('c') if self.modifiers.alt => return Intent::Click,
            Key::Symbol(KeyCode::Tab) if terminal_open => {
                self.modifiers.typing = true;
                return Intent::EnterTyping;
            }
            Key::Symbol(KeyCode::Escape) => return Intent::DismissMenu,
            _ => return Intent::Nothing,
        };
        self.cursor.move_by(dx, dy);
        Intent::Moved
    }
}
