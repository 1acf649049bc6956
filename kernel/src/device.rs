//! Capability traits for the hardware the desktop touches.
//!
//! The core never reads a port or writes display memory directly; it goes
//! through these traits so the whole frame loop can run against in-memory
//! fakes on the host.

/// A palette-indexed display.
pub trait VideoDevice {
    /// Switches the display into the 320x200 palette mode and blanks it.
    fn set_mode(&mut self);

    /// Programs one palette entry. Channels are 6-bit (0..=63).
    fn set_palette(&mut self, index: u8, r: u8, g: u8, b: u8);

    /// Copies a full frame of palette indices, row-major, to the display.
    fn present(&mut self, pixels: &[u8]);
}

/// A polled byte-at-a-time keyboard.
pub trait InputDevice {
    /// Returns the next pending scan code, or `None` immediately when the
    /// controller has nothing buffered.
    fn poll(&mut self) -> Option<u8>;
}

/// Machine power control. Neither call returns.
pub trait PowerControl {
    fn halt(&mut self) -> !;
    fn reboot(&mut self) -> !;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PowerRequest {
    Shutdown,
    Reboot,
}

impl PowerRequest {
    pub fn label(self) -> &'static str {
        match self {
            PowerRequest::Shutdown => "shutdown",
            PowerRequest::Reboot => "reboot",
        }
    }

    /// Hands the request to the power collaborator.
    pub fn execute<P: PowerControl + ?Sized>(self, power: &mut P) -> ! {
        match self {
            PowerRequest::Shutdown => power.halt(),
            PowerRequest::Reboot => power.reboot(),
        }
    }
}
