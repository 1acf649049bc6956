//! A single-screen desktop shell for bare x86_64: wallpaper, dock, start
//! menu and one terminal window, driven entirely from the keyboard.
//!
//! Everything above the `device` traits is hardware-agnostic and runs under
//! the host test harness.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod commands;
pub mod config;
pub mod desktop;
pub mod device;
pub mod dirty;
pub mod font;
pub mod framebuffer;
pub mod input;
pub mod keyboard;
pub mod logger;
pub mod power;
pub mod ps2;
pub mod render;
pub mod scancode;
pub mod serial;
pub mod session;
pub mod shell;
pub mod surface;
pub mod terminal;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ShellConfig;
pub use desktop::Desktop;
pub use device::{InputDevice, PowerControl, PowerRequest, VideoDevice};
