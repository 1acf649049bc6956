//! Static desktop configuration: palette, theme, dock and menu tables,
//! geometry and timing.
//!
//! Every cosmetic knob lives here so the shell, renderer and orchestrator
//! share a single parameterised code path.

use crate::surface::Rect;

/// Display width in pixels.
pub const SCREEN_WIDTH: usize = 320;
/// Display height in pixels.
pub const SCREEN_HEIGHT: usize = 200;

/// Number of palette entries used by the wallpaper gradient (indices
/// `0..WALLPAPER_SHADES`).
pub const WALLPAPER_SHADES: u8 = 63;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    /// Channels scaled down to the 6-bit DAC range.
    pub const fn to_dac(self) -> (u8, u8, u8) {
        (self.r >> 2, self.g >> 2, self.b >> 2)
    }
}

const fn build_palette() -> [Rgb; 256] {
    let mut palette = [Rgb::new(0, 0, 0); 256];

    // Sky gradient, pale at the top to saturated blue at the dock.
    let mut i = 0usize;
    let last = WALLPAPER_SHADES as usize - 1;
    while i <= last {
        let r = 255 - (i * 255 / last);
        let g = 255 - (i * 111 / last);
        palette[i] = Rgb::new(r as u8, g as u8, 255);
        i += 1;
    }

    palette[63] = Rgb::hex(0x2C3E50);
    palette[64] = Rgb::hex(0x34495E);
    palette[65] = Rgb::hex(0x4A90E2);
    palette[66] = Rgb::hex(0x6BA8F5);
    palette[67] = Rgb::hex(0x357ABD);
    palette[68] = Rgb::hex(0xFCFCFC);
    palette[69] = Rgb::hex(0x101418);
    palette[70] = Rgb::hex(0xE0443A);
    palette[71] = Rgb::hex(0x4CD964);
    palette[72] = Rgb::hex(0x1B1E23);
    palette[73] = Rgb::hex(0x8A9299);
    palette[74] = Rgb::hex(0xF5B041);
    palette[75] = Rgb::hex(0xC0392B);

    // Remaining entries form a grey ramp.
    let mut j = 76usize;
    while j < 256 {
        palette[j] = Rgb::new(j as u8, j as u8, j as u8);
        j += 1;
    }
    palette
}

pub static PALETTE: [Rgb; 256] = build_palette();

/// Palette indices for each UI element.
#[derive(Copy, Clone, Debug)]
pub struct Theme {
    pub dock_band: u8,
    pub dock_edge: u8,
    pub dock_panel: u8,
    pub accent: u8,
    pub accent_light: u8,
    pub accent_dark: u8,
    pub text: u8,
    pub highlight: u8,
    pub prompt: u8,
    pub terminal_bg: u8,
    pub close_button: u8,
    pub badge: u8,
    pub cursor_fill: u8,
    pub cursor_outline: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DockIcon {
    Start,
    Terminal,
    Files,
    Settings,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    OpenTerminal,
    Files,
    Settings,
    Reboot,
    Shutdown,
}

pub struct DockIconSpec {
    pub icon: DockIcon,
    pub glyph: char,
    pub fill: u8,
    pub ink: u8,
}

pub struct MenuItemSpec {
    pub label: &'static str,
    pub action: MenuAction,
}

/// Pixel geometry of the desktop chrome.
#[derive(Copy, Clone, Debug)]
pub struct Geometry {
    pub dock_height: i32,
    pub dock_padding: i32,
    pub icon_size: i32,
    pub icon_gap: i32,
    pub menu_width: i32,
    pub menu_header: i32,
    pub menu_row: i32,
    pub menu_gap: i32,
    pub window: Rect,
    pub title_height: i32,
    pub button_size: i32,
    pub line_height: i32,
    pub input_columns: usize,
    pub cursor_w: i32,
    pub cursor_h: i32,
}

#[derive(Copy, Clone, Debug)]
pub struct Timing {
    /// Cursor step per arrow press.
    pub cursor_step: i32,
    /// Cursor step while ctrl is held.
    pub fine_step: i32,
    /// Frames a click outline stays visible.
    pub highlight_frames: u8,
    /// Ticks between caret blink toggles.
    pub blink_interval: u32,
    /// Busy-wait iterations between loop ticks.
    pub idle_spins: u32,
}

pub struct ShellConfig {
    pub title: &'static str,
    pub menu_title: &'static str,
    pub theme: Theme,
    pub dock_icons: &'static [DockIconSpec],
    pub menu_items: &'static [MenuItemSpec],
    pub geometry: Geometry,
    pub timing: Timing,
}

const DOCK_ICONS: [DockIconSpec; 4] = [
    DockIconSpec { icon: DockIcon::Start, glyph: 'S', fill: 65, ink: 68 },
    DockIconSpec { icon: DockIcon::Terminal, glyph: '>', fill: 69, ink: 71 },
    DockIconSpec { icon: DockIcon::Files, glyph: 'F', fill: 74, ink: 69 },
    DockIconSpec { icon: DockIcon::Settings, glyph: '*', fill: 73, ink: 68 },
];

const MENU_ITEMS: [MenuItemSpec; 5] = [
    MenuItemSpec { label: "Terminal", action: MenuAction::OpenTerminal },
    MenuItemSpec { label: "Files", action: MenuAction::Files },
    MenuItemSpec { label: "Settings", action: MenuAction::Settings },
    MenuItemSpec { label: "Reboot", action: MenuAction::Reboot },
    MenuItemSpec { label: "Shutdown", action: MenuAction::Shutdown },
];

impl ShellConfig {
    pub const DEFAULT: ShellConfig = ShellConfig {
        title: "Terminal",
        menu_title: "Lumen",
        theme: Theme {
            dock_band: 63,
            dock_edge: 64,
            dock_panel: 64,
            accent: 65,
            accent_light: 66,
            accent_dark: 67,
            text: 68,
            highlight: 70,
            prompt: 71,
            terminal_bg: 72,
            close_button: 75,
            badge: 63,
            cursor_fill: 68,
            cursor_outline: 69,
        },
        dock_icons: &DOCK_ICONS,
        menu_items: &MENU_ITEMS,
        geometry: Geometry {
            dock_height: 25,
            dock_padding: 6,
            icon_size: 16,
            icon_gap: 8,
            menu_width: 100,
            menu_header: 16,
            menu_row: 12,
            menu_gap: 2,
            window: Rect::new(20, 8, 240, 150),
            title_height: 12,
            button_size: 9,
            line_height: 10,
            input_columns: 20,
            cursor_w: 8,
            cursor_h: 12,
        },
        timing: Timing {
            cursor_step: 5,
            fine_step: 1,
            highlight_frames: 15,
            blink_interval: 40,
            idle_spins: 200_000,
        },
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallpaper_gradient_spans_pale_to_blue() {
        assert_eq!(PALETTE[0], Rgb::new(255, 255, 255));
        assert_eq!(PALETTE[62], Rgb::new(0, 144, 255));
        assert!(PALETTE[30].r > PALETTE[31].r);
    }

    #[test]
    fn dac_conversion_drops_two_bits() {
        assert_eq!(Rgb::hex(0x4A90E2).to_dac(), (0x4A >> 2, 0x90 >> 2, 0xE2 >> 2));
        assert_eq!(Rgb::new(255, 255, 255).to_dac(), (63, 63, 63));
    }

    #[test]
    fn theme_never_uses_the_top_of_the_grey_ramp() {
        let t = ShellConfig::DEFAULT.theme;
        let used = [
            t.dock_band,
            t.dock_edge,
            t.dock_panel,
            t.accent,
            t.accent_light,
            t.accent_dark,
            t.text,
            t.highlight,
            t.prompt,
            t.terminal_bg,
            t.close_button,
            t.badge,
            t.cursor_fill,
            t.cursor_outline,
        ];
        assert!(used.iter().all(|&c| c != 0xFF));
    }
}
