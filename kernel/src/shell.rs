//! Desktop chrome: layout, hit-testing and click resolution.

use crate::config::{DockIcon, MenuAction, ShellConfig};
use crate::device::PowerRequest;
use crate::surface::Rect;

/// Region geometry derived from the configuration. Nothing here is stored
/// state; it is recomputed from the config and screen size.
#[derive(Copy, Clone, Debug)]
pub struct Layout {
    pub screen: Rect,
    pub dock_band: Rect,
    pub dock: Rect,
    pub start_menu: Rect,
    pub window: Rect,
    pub title_bar: Rect,
    pub close_button: Rect,
    pub minimize_button: Rect,
    icon_count: usize,
    icon_size: i32,
    icon_gap: i32,
    dock_padding: i32,
    menu_header: i32,
    menu_row: i32,
}

impl Layout {
    pub fn compute(config: &ShellConfig, width: i32, height: i32) -> Self {
        let g = &config.geometry;
        let icon_count = config.dock_icons.len();
        let n = icon_count as i32;

        let dock_band = Rect::new(0, height - g.dock_height, width, g.dock_height);
        let dock_w = g.dock_padding * 2 + n * g.icon_size + (n - 1).max(0) * g.icon_gap;
        let dock_h = g.icon_size + 4;
        let dock = Rect::new(
            (width - dock_w) / 2,
            dock_band.y + (g.dock_height - dock_h) / 2,
            dock_w,
            dock_h,
        );

        let menu_h = g.menu_header + config.menu_items.len() as i32 * g.menu_row + 4;
        let start_menu = Rect::new(dock.x, dock_band.y - g.menu_gap - menu_h, g.menu_width, menu_h);

        let window = g.window;
        let title_bar = Rect::new(window.x, window.y, window.w, g.title_height);
        let inset = (g.title_height - g.button_size) / 2;
        let close_button = Rect::new(
            window.right() - inset - g.button_size,
            window.y + inset,
            g.button_size,
            g.button_size,
        );
        let minimize_button = Rect::new(
            close_button.x - inset - g.button_size,
            close_button.y,
            g.button_size,
            g.button_size,
        );

        Self {
            screen: Rect::new(0, 0, width, height),
            dock_band,
            dock,
            start_menu,
            window,
            title_bar,
            close_button,
            minimize_button,
            icon_count,
            icon_size: g.icon_size,
            icon_gap: g.icon_gap,
            dock_padding: g.dock_padding,
            menu_header: g.menu_header,
            menu_row: g.menu_row,
        }
    }

    pub fn icon_rect(&self, idx: usize) -> Option<Rect> {
        if idx >= self.icon_count {
            return None;
        }
        let x = self.dock.x + self.dock_padding + idx as i32 * (self.icon_size + self.icon_gap);
        let y = self.dock.y + (self.dock.h - self.icon_size) / 2;
        Some(Rect::new(x, y, self.icon_size, self.icon_size))
    }

    pub fn menu_item_rect(&self, idx: usize) -> Rect {
        Rect::new(
            self.start_menu.x + 2,
            self.start_menu.y + self.menu_header + idx as i32 * self.menu_row,
            self.start_menu.w - 4,
            self.menu_row,
        )
    }

    /// Content area of the terminal window below the title bar.
    pub fn window_body(&self) -> Rect {
        Rect::new(
            self.window.x + 1,
            self.title_bar.bottom(),
            self.window.w - 2,
            self.window.h - self.title_bar.h - 1,
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HitTarget {
    WindowClose,
    WindowMinimize,
    MenuItem(MenuAction),
    Dock(DockIcon),
    Background,
}

/// Side effect of a click that reaches beyond the shell flags.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickEffect {
    None,
    EnterTyping,
    LeaveTyping,
    Power(PowerRequest),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ShellState {
    pub start_menu_open: bool,
    pub terminal_open: bool,
    pub last_clicked: Option<DockIcon>,
    pub highlight_frames: u8,
}

impl ShellState {
    pub const fn new() -> Self {
        Self {
            start_menu_open: false,
            terminal_open: false,
            last_clicked: None,
            highlight_frames: 0,
        }
    }

    /// Resolves the region under `(x, y)`: window buttons, then menu items,
    /// then dock icons.
    pub fn hit_test(&self, config: &ShellConfig, layout: &Layout, x: i32, y: i32) -> HitTarget {
        if self.terminal_open {
            if layout.close_button.contains(x, y) {
                return HitTarget::WindowClose;
            }
            if layout.minimize_button.contains(x, y) {
                return HitTarget::WindowMinimize;
            }
        }
        if self.start_menu_open {
            for (idx, item) in config.menu_items.iter().enumerate() {
                if layout.menu_item_rect(idx).contains(x, y) {
                    return HitTarget::MenuItem(item.action);
                }
            }
        }
        for (idx, spec) in config.dock_icons.iter().enumerate() {
            if layout.icon_rect(idx).map(|r| r.contains(x, y)).unwrap_or(false) {
                return HitTarget::Dock(spec.icon);
            }
        }
        HitTarget::Background
    }

    pub fn click(&mut self, config: &ShellConfig, layout: &Layout, x: i32, y: i32) -> ClickEffect {
        let target = self.hit_test(config, layout, x, y);
        let inside_menu = self.start_menu_open && layout.start_menu.contains(x, y);
        let effect = self.resolve(target);

        if self.start_menu_open && !inside_menu && target != HitTarget::Dock(DockIcon::Start) {
            self.start_menu_open = false;
        }
        if let Some(icon) = highlight_for(target) {
            self.last_clicked = Some(icon);
            self.highlight_frames = config.timing.highlight_frames;
        }
        log::debug!("shell: click {:?} at ({}, {}) -> {:?}", target, x, y, effect);
        effect
    }

    fn resolve(&mut self, target: HitTarget) -> ClickEffect {
        match target {
            HitTarget::Dock(DockIcon::Start) => {
                self.start_menu_open = !self.start_menu_open;
                ClickEffect::None
            }
            HitTarget::Dock(DockIcon::Terminal) => {
                self.terminal_open = !self.terminal_open;
                self.start_menu_open = false;
                if self.terminal_open { ClickEffect::None } else { ClickEffect::LeaveTyping }
            }
            // Reserved: Files and Settings are recognised but inert.
            HitTarget::Dock(DockIcon::Files | DockIcon::Settings) => ClickEffect::None,
            HitTarget::MenuItem(MenuAction::Files | MenuAction::Settings) => ClickEffect::None,
            HitTarget::WindowClose | HitTarget::WindowMinimize => {
                self.terminal_open = false;
                ClickEffect::LeaveTyping
            }
            HitTarget::MenuItem(MenuAction::OpenTerminal) => {
                self.terminal_open = true;
                self.start_menu_open = false;
                ClickEffect::EnterTyping
            }
            HitTarget::MenuItem(MenuAction::Shutdown) => ClickEffect::Power(PowerRequest::Shutdown),
            HitTarget::MenuItem(MenuAction::Reboot) => ClickEffect::Power(PowerRequest::Reboot),
            HitTarget::Background => ClickEffect::None,
        }
    }

    /// Advances the click highlight by one frame. Returns whether it changed.
    pub fn tick_highlight(&mut self) -> bool {
        if self.highlight_frames == 0 {
            return false;
        }
        self.highlight_frames -= 1;
        true
    }

    /// The dock icon to outline this frame, if any.
    pub fn highlighted(&self) -> Option<DockIcon> {
        if self.highlight_frames > 0 { self.last_clicked } else { None }
    }
}

fn highlight_for(target: HitTarget) -> Option<DockIcon> {
    match target {
        HitTarget::Dock(icon) => Some(icon),
        HitTarget::WindowClose | HitTarget::WindowMinimize => Some(DockIcon::Terminal),
        HitTarget::MenuItem(MenuAction::OpenTerminal) => Some(DockIcon::Terminal),
        HitTarget::MenuItem(MenuAction::Files) => Some(DockIcon::Files),
        HitTarget::MenuItem(MenuAction::Settings) => Some(DockIcon::Settings),
        HitTarget::MenuItem(MenuAction::Reboot | MenuAction::Shutdown) => Some(DockIcon::Start),
        HitTarget::Background => None,
    }
}
