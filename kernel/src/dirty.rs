use crate::input::Modifiers;
use crate::shell::ShellState;

/// Everything visible that can change between ticks without a key event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameSnapshot {
    pub cursor: (i32, i32),
    pub modifiers: Modifiers,
    pub shell: ShellState,
    pub caret_visible: bool,
}

/// Decides whether the next tick needs a redraw.
pub struct DirtyTracker {
    last: Option<FrameSnapshot>,
    pending: bool,
}

impl DirtyTracker {
    pub const fn new() -> Self {
        Self { last: None, pending: true }
    }

    /// Marks the next frame dirty regardless of the snapshot.
    pub fn mark(&mut self) {
        self.pending = true;
    }

    /// Consumes the pending flag and compares against the last drawn frame.
    /// The first call always reports dirty.
    pub fn take(&mut self, now: FrameSnapshot) -> bool {
        let dirty = self.pending || self.last != Some(now);
        self.pending = false;
        self.last = Some(now);
        dirty
    }
}

impl Default for DirtyTracker {
    fn default() -> Self {
        Self::new()
    }
}
