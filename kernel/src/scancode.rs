//! Scan code set 1 decoding.

use pc_keyboard::{KeyCode, KeyState};

const BREAK_BIT: u8 = 0x80;

const SC_ESCAPE: u8 = 0x01;
const SC_BACKSPACE: u8 = 0x0E;
const SC_TAB: u8 = 0x0F;
const SC_ENTER: u8 = 0x1C;
const SC_CTRL: u8 = 0x1D;
const SC_ALT: u8 = 0x38;
const SC_UP: u8 = 0x48;
const SC_LEFT: u8 = 0x4B;
const SC_RIGHT: u8 = 0x4D;
const SC_DOWN: u8 = 0x50;

/// Printable characters indexed by make code. NUL marks an unmapped slot.
static KEYMAP: [u8; 128] = {
    let mut map = [0u8; 128];
    let rows: [(usize, &[u8]); 4] = [
        (0x02, b"1234567890-="),
        (0x10, b"qwertyuiop[]"),
        (0x1E, b"asdfghjkl;'`"),
        (0x2C, b"zxcvbnm,./"),
    ];
    let mut r = 0;
    while r < rows.len() {
        let (start, keys) = rows[r];
        let mut i = 0;
        while i < keys.len() {
            map[start + i] = keys[i];
            i += 1;
        }
        r += 1;
    }
    map[0x2B] = b'\\';
    map[0x39] = b' ';
    map
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Symbol(KeyCode),
    Char(char),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScanEvent {
    pub key: Key,
    pub state: KeyState,
}

impl ScanEvent {
    pub fn is_press(&self) -> bool {
        matches!(self.state, KeyState::Down | KeyState::SingleShot)
    }
}

fn symbol(code: u8) -> Option<KeyCode> {
    let key = match code {
        SC_ESCAPE => KeyCode::Escape,
        SC_BACKSPACE => KeyCode::Backspace,
        SC_TAB => KeyCode::Tab,
        SC_ENTER => KeyCode::Return,
        SC_CTRL => KeyCode::LControl,
        SC_ALT => KeyCode::LAlt,
        SC_UP => KeyCode::ArrowUp,
        SC_DOWN => KeyCode::ArrowDown,
        SC_LEFT => KeyCode::ArrowLeft,
        SC_RIGHT => KeyCode::ArrowRight,
        _ => return None,
    };
    Some(key)
}

/// Decodes one raw byte. Break codes carry the make code with the high bit
/// set. Unknown codes, including the `0xE0` extension prefix, yield `None`.
pub fn decode(byte: u8) -> Option<ScanEvent> {
    let state = if byte & BREAK_BIT != 0 { KeyState::Up } else { KeyState::Down };
    let code = byte & !BREAK_BIT;
    if let Some(code) = symbol(code) {
        return Some(ScanEvent { key: Key::Symbol(code), state });
    }
    match KEYMAP[code as usize] {
        0 => None,
        ch => Some(ScanEvent { key: Key::Char(ch as char), state }),
    }
}
