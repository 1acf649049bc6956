use crate::config::ShellConfig;
use crate::device::PowerRequest;
use crate::dirty::FrameSnapshot;
use crate::input::{Cursor, InputState, Intent};
use crate::scancode::ScanEvent;
use crate::shell::{ClickEffect, Layout, ShellState};
use crate::terminal::Terminal;

/// All mutable desktop state. Owned by the desktop loop and lent out by
/// `&mut` for one tick at a time.
pub struct Session {
    pub input: InputState,
    pub shell: ShellState,
    pub terminal: Terminal,
    pub caret_visible: bool,
}

impl Session {
    pub fn new(config: &ShellConfig, width: i32, height: i32) -> Self {
        let g = &config.geometry;
        let cursor = Cursor::new(width, height, g.cursor_w, g.cursor_h);
        Self {
            input: InputState::new(cursor, &config.timing),
            shell: ShellState::new(),
            terminal: Terminal::new(),
            caret_visible: true,
        }
    }

    pub fn typing(&self) -> bool {
        self.input.modifiers.typing
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            cursor: (self.input.cursor.x, self.input.cursor.y),
            modifiers: self.input.modifiers,
            shell: self.shell,
            caret_visible: self.caret_visible,
        }
    }

    /// Routes one decoded key through input, shell and terminal. Returns a
    /// power request when one was made; the caller redraws before acting.
    pub fn handle(
        &mut self,
        evt: ScanEvent,
        config: &ShellConfig,
        layout: &Layout,
    ) -> Option<PowerRequest> {
        match self.input.apply(evt, self.shell.terminal_open) {
            Intent::Nothing | Intent::Moved => None,
            Intent::Click => {
                let (x, y) = (self.input.cursor.x, self.input.cursor.y);
                match self.shell.click(config, layout, x, y) {
                    ClickEffect::None => None,
                    ClickEffect::EnterTyping => {
                        self.set_typing(true);
                        None
                    }
                    ClickEffect::LeaveTyping => {
                        self.set_typing(false);
                        None
                    }
                    ClickEffect::Power(request) => Some(request),
                }
            }
            Intent::EnterTyping => {
                self.caret_visible = true;
                log::info!("session: typing mode on");
                None
            }
            Intent::LeaveTyping => {
                log::info!("session: typing mode off");
                None
            }
            Intent::DismissMenu => {
                self.shell.start_menu_open = false;
                None
            }
            Intent::Insert(ch) => {
                self.terminal.insert(ch);
                None
            }
            Intent::Erase => {
                self.terminal.erase();
                None
            }
            Intent::Submit => self.terminal.submit(),
        }
    }

    pub fn set_typing(&mut self, on: bool) {
        if self.input.modifiers.typing == on {
            return;
        }
        self.input.modifiers.typing = on;
        if on {
            self.caret_visible = true;
        }
        log::info!("session: typing mode {}", if on { "on" } else { "off" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DockIcon;
    use crate::scancode::decode;

    const CFG: &ShellConfig = &ShellConfig::DEFAULT;

    fn setup() -> (Session, Layout) {
        (Session::new(CFG, 320, 200), Layout::compute(CFG, 320, 200))
    }

    fn press(session: &mut Session, layout: &Layout, bytes: &[u8]) -> Option<PowerRequest> {
        let mut power = None;
        for &b in bytes {
            if let Some(evt) = decode(b) {
                power = session.handle(evt, CFG, layout).or(power);
            }
        }
        power
    }

    fn point_at(session: &mut Session, x: i32, y: i32) {
        session.input.cursor.x = x;
        session.input.cursor.y = y;
    }

    fn centre_of_icon(layout: &Layout, icon: DockIcon) -> (i32, i32) {
        let idx = CFG.dock_icons.iter().position(|s| s.icon == icon).expect("icon configured");
        let r = layout.icon_rect(idx).expect("icon rect");
        (r.x + r.w / 2, r.y + r.h / 2)
    }

    #[test]
    fn escape_leaves_typing_and_keeps_the_buffer() {
        let (mut s, l) = setup();
        s.shell.terminal_open = true;
        press(&mut s, &l, &[0x0F]);
        assert!(s.typing());
        // "hi"
        press(&mut s, &l, &[0x23, 0x17]);
        press(&mut s, &l, &[0x01]);
        assert!(!s.typing());
        assert_eq!(s.terminal.input(), "hi");
    }

    #[test]
    fn menu_terminal_click_starts_typing() {
        let (mut s, l) = setup();
        s.shell.start_menu_open = true;
        let item = l.menu_item_rect(0);
        point_at(&mut s, item.x + 4, item.y + 4);
        press(&mut s, &l, &[0x1C]);
        assert!(s.shell.terminal_open);
        assert!(s.typing());
        // typed keys now reach the editor instead of moving the cursor
        press(&mut s, &l, &[0x4D, 0x1E]);
        assert_eq!(s.terminal.input(), "a");
        assert_eq!(s.input.cursor.x, item.x + 4);
    }

    #[test]
    fn dock_terminal_toggles_the_window() {
        let (mut s, l) = setup();
        let (x, y) = centre_of_icon(&l, DockIcon::Terminal);
        point_at(&mut s, x, y);
        press(&mut s, &l, &[0x1C]);
        assert!(s.shell.terminal_open);
        assert!(!s.typing());
        press(&mut s, &l, &[0x1C]);
        assert!(!s.shell.terminal_open);
        assert_eq!(s.shell.last_clicked, Some(DockIcon::Terminal));
    }

    #[test]
    fn tab_is_ignored_while_the_terminal_is_closed() {
        let (mut s, l) = setup();
        press(&mut s, &l, &[0x0F]);
        assert!(!s.typing());
    }

    #[test]
    fn typed_shutdown_yields_a_power_request() {
        let (mut s, l) = setup();
        s.shell.terminal_open = true;
        press(&mut s, &l, &[0x0F]);
        // s h u t d o w n
        let keys = [0x1F, 0x23, 0x16, 0x14, 0x20, 0x18, 0x11, 0x31];
        assert_eq!(press(&mut s, &l, &keys), None);
        assert_eq!(press(&mut s, &l, &[0x1C]), Some(PowerRequest::Shutdown));
        assert_eq!(s.terminal.lines().last(), Some("Shutting down..."));
    }

    #[test]
    fn escape_dismisses_the_start_menu() {
        let (mut s, l) = setup();
        s.shell.start_menu_open = true;
        press(&mut s, &l, &[0x01]);
        assert!(!s.shell.start_menu_open);
    }
}
