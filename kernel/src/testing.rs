//! In-memory stand-ins for the hardware traits.

use std::collections::VecDeque;
use std::vec::Vec;

use crate::device::{InputDevice, PowerControl, VideoDevice};

#[derive(Default)]
pub struct RecordingVideo {
    pub mode_set: bool,
    pub palette_writes: usize,
    pub palette: Vec<(u8, u8, u8, u8)>,
    pub frames: usize,
    pub last_frame: Vec<u8>,
}

impl VideoDevice for RecordingVideo {
    fn set_mode(&mut self) {
        self.mode_set = true;
    }

    fn set_palette(&mut self, index: u8, r: u8, g: u8, b: u8) {
        self.palette_writes += 1;
        self.palette.push((index, r, g, b));
    }

    fn present(&mut self, pixels: &[u8]) {
        self.frames += 1;
        self.last_frame.clear();
        self.last_frame.extend_from_slice(pixels);
    }
}

#[derive(Default)]
pub struct ScriptedInput {
    bytes: VecDeque<u8>,
}

impl ScriptedInput {
    pub fn new(bytes: &[u8]) -> Self {
        Self { bytes: bytes.iter().copied().collect() }
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.bytes.extend(bytes.iter().copied());
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }
}

impl InputDevice for ScriptedInput {
    fn poll(&mut self) -> Option<u8> {
        self.bytes.pop_front()
    }
}

/// Power control that unwinds instead of stopping the machine, so tests can
/// observe which call was made with `#[should_panic]`.
pub struct PanickingPower;

impl PowerControl for PanickingPower {
    fn halt(&mut self) -> ! {
        panic!("power: halt");
    }

    fn reboot(&mut self) -> ! {
        panic!("power: reboot");
    }
}
