use crate::device::InputDevice;
use crate::ps2::{self, OutputByte};

const KBD_SET_DEFAULTS: u8 = 0xF6;
const KBD_ENABLE_SCANNING: u8 = 0xF4;
const KBD_SET_SCANCODE: u8 = 0xF0;
const KBD_SET_SCANCODE_SET2: u8 = 0x02;
const KBD_ACK: u8 = 0xFA;
const KBD_RESEND: u8 = 0xFE;

/// Polled PS/2 keyboard. With controller translation on, set 2 arrives as
/// set 1 scan codes.
pub struct Ps2Keyboard {
    _private: (),
}

impl Ps2Keyboard {
    /// Resets the keyboard to defaults and enables scanning. Returns `None`
    /// when the device never acknowledged.
    pub fn init() -> Option<Self> {
        ps2::flush_output();
        let ok_defaults = ps2::send_keyboard_command(KBD_SET_DEFAULTS) == Some(KBD_ACK);
        let ok_set = ps2::send_keyboard_command(KBD_SET_SCANCODE) == Some(KBD_ACK)
            && ps2::send_keyboard_command(KBD_SET_SCANCODE_SET2) == Some(KBD_ACK);
        let ok_enable = ps2::send_keyboard_command(KBD_ENABLE_SCANNING) == Some(KBD_ACK);
        ps2::flush_output();
        if !(ok_defaults && ok_set && ok_enable) {
            log::warn!(
                "keyboard: init incomplete (defaults={} set={} enable={})",
                ok_defaults,
                ok_set,
                ok_enable
            );
        }
        ok_enable.then_some(Self { _private: () })
    }

    /// Keyboard without the reset handshake, for controllers that already
    /// have scanning enabled.
    pub fn assume_ready() -> Self {
        Self { _private: () }
    }
}

/// Filters controller noise out of the output stream.
fn accept(byte: OutputByte) -> Option<u8> {
    if byte.aux {
        return None;
    }
    match byte.value {
        KBD_ACK | KBD_RESEND => None,
        sc => Some(sc),
    }
}

impl InputDevice for Ps2Keyboard {
    fn poll(&mut self) -> Option<u8> {
        while let Some(byte) = ps2::read_output_byte() {
            if let Some(sc) = accept(byte) {
                return Some(sc);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kbd(value: u8) -> OutputByte {
        OutputByte { value, aux: false }
    }

    #[test]
    fn scan_codes_pass_through() {
        assert_eq!(accept(kbd(0x1E)), Some(0x1E));
        assert_eq!(accept(kbd(0x9E)), Some(0x9E));
        assert_eq!(accept(kbd(0xE0)), Some(0xE0));
    }

    #[test]
    fn acks_and_mouse_bytes_are_dropped() {
        assert_eq!(accept(kbd(KBD_ACK)), None);
        assert_eq!(accept(kbd(KBD_RESEND)), None);
        assert_eq!(accept(OutputByte { value: 0x08, aux: true }), None);
    }
}
