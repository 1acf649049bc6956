//! Full-frame composition. Paint order: wallpaper, dock, start menu,
//! terminal window, status badge, cursor.

use crate::config::{ShellConfig, Theme, WALLPAPER_SHADES};
use crate::session::Session;
use crate::shell::Layout;
use crate::surface::{PixelSurface, Rect, GLYPH_ADVANCE};
use crate::terminal::PROMPT;

const CURSOR_W: usize = 8;
const CURSOR_H: usize = 12;

// 1 = fill, 2 = outline.
const CURSOR_BITMAP: [[u8; CURSOR_W]; CURSOR_H] = [
    [2, 2, 0, 0, 0, 0, 0, 0],
    [2, 1, 2, 0, 0, 0, 0, 0],
    [2, 1, 1, 2, 0, 0, 0, 0],
    [2, 1, 1, 1, 2, 0, 0, 0],
    [2, 1, 1, 1, 1, 2, 0, 0],
    [2, 1, 1, 1, 1, 1, 2, 0],
    [2, 1, 1, 1, 1, 2, 2, 2],
    [2, 1, 1, 2, 2, 2, 0, 0],
    [2, 1, 2, 0, 0, 0, 0, 0],
    [2, 2, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const BADGE_HEIGHT: i32 = 10;
const TEXT_INDENT: i32 = 3;

pub fn draw_frame(
    surface: &mut PixelSurface,
    config: &ShellConfig,
    layout: &Layout,
    session: &Session,
) {
    let theme = &config.theme;
    draw_wallpaper(surface, layout);
    draw_dock(surface, config, layout, session);
    if session.shell.start_menu_open {
        draw_start_menu(surface, config, layout, session);
    }
    if session.shell.terminal_open {
        draw_terminal(surface, config, layout, session);
    }
    if let Some(label) = badge_label(session) {
        let rect = badge_rect(label, layout.screen.w);
        surface.fill(rect, theme.badge);
        surface.draw_text(rect.x + 2, rect.y + 1, label, theme.text);
    }
    let cursor = session.input.cursor;
    draw_cursor(surface, theme, cursor.x, cursor.y);
}

fn draw_wallpaper(surface: &mut PixelSurface, layout: &Layout) {
    let rows = layout.dock_band.y.max(1);
    let last = WALLPAPER_SHADES as i32 - 1;
    for y in 0..layout.dock_band.y {
        surface.hline(0, y, layout.screen.w, (y * last / rows) as u8);
    }
}

fn draw_dock(surface: &mut PixelSurface, config: &ShellConfig, layout: &Layout, session: &Session) {
    let theme = &config.theme;
    surface.fill(layout.dock_band, theme.dock_band);
    surface.hline(0, layout.dock_band.y, layout.screen.w, theme.dock_edge);
    surface.fill(layout.dock, theme.dock_panel);

    let highlighted = session.shell.highlighted();
    for (idx, spec) in config.dock_icons.iter().enumerate() {
        let Some(rect) = layout.icon_rect(idx) else {
            continue;
        };
        surface.fill(rect, spec.fill);
        let (gx, gy) = (rect.x + (rect.w - 8) / 2, rect.y + (rect.h - 8) / 2);
        surface.draw_glyph(gx, gy, spec.glyph, spec.ink);
        if highlighted == Some(spec.icon) {
            surface.outline_rect(rect.inset(-1), theme.highlight);
        }
    }
}

fn draw_start_menu(
    surface: &mut PixelSurface,
    config: &ShellConfig,
    layout: &Layout,
    session: &Session,
) {
    let theme = &config.theme;
    let menu = layout.start_menu;
    surface.fill(menu, theme.dock_band);
    surface.outline_rect(menu, theme.dock_edge);
    surface.draw_text(menu.x + 5, menu.y + 4, config.menu_title, theme.text);
    let separator_y = menu.y + config.geometry.menu_header - 3;
    surface.hline(menu.x + 2, separator_y, menu.w - 4, theme.dock_edge);

    let cursor = session.input.cursor;
    for (idx, item) in config.menu_items.iter().enumerate() {
        let row = layout.menu_item_rect(idx);
        if row.contains(cursor.x, cursor.y) {
            surface.fill(row, theme.accent);
        }
        surface.draw_text(row.x + 3, row.y + (row.h - 8) / 2, item.label, theme.text);
    }
}

fn draw_terminal(
    surface: &mut PixelSurface,
    config: &ShellConfig,
    layout: &Layout,
    session: &Session,
) {
    let theme = &config.theme;
    let g = &config.geometry;
    let window = layout.window;

    surface.fill(window, theme.terminal_bg);
    surface.fill(layout.title_bar, theme.accent);
    surface.hline(window.x, window.y, window.w, theme.accent_light);
    surface.hline(window.x, layout.title_bar.bottom() - 1, window.w, theme.accent_dark);
    surface.draw_text(window.x + 4, window.y + (g.title_height - 8) / 2, config.title, theme.text);

    let minimize = layout.minimize_button;
    surface.fill(minimize, theme.accent_dark);
    surface.hline(minimize.x + 2, minimize.bottom() - 3, g.button_size - 4, theme.text);
    surface.fill(layout.close_button, theme.close_button);
    draw_cross(surface, layout.close_button, theme.text);
    surface.outline_rect(window, theme.accent);

    let body = layout.window_body();
    let left = body.x + TEXT_INDENT;
    let cols = text_columns(body);
    let mut y = body.y + 2;
    for line in session.terminal.lines() {
        let color = if line.starts_with(PROMPT) { theme.prompt } else { theme.text };
        surface.draw_text(left, y, head_columns(line, cols), color);
        y += g.line_height;
    }

    // The input row sits below a full scroll-back so it does not jump around.
    let rows = session.terminal.history_capacity() as i32;
    let input_y = body.y + 2 + g.line_height * rows;
    surface.draw_text(left, input_y, PROMPT, theme.prompt);
    let text_x = left + GLYPH_ADVANCE * PROMPT.len() as i32;
    let visible = session.terminal.visible_input(g.input_columns);
    surface.draw_text(text_x, input_y, visible, theme.text);
    if session.typing() && session.caret_visible {
        let caret_x = text_x + GLYPH_ADVANCE * visible.chars().count() as i32;
        surface.draw_glyph(caret_x, input_y, '_', theme.text);
    }
}

/// Glyph columns that fit between the text indent and the right edge of
/// `body`.
fn text_columns(body: Rect) -> usize {
    ((body.w - TEXT_INDENT) / GLYPH_ADVANCE).max(0) as usize
}

/// The first `cols` characters of `text`.
fn head_columns(text: &str, cols: usize) -> &str {
    match text.char_indices().nth(cols) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn draw_cross(surface: &mut PixelSurface, rect: Rect, color: u8) {
    let n = rect.w.min(rect.h) - 4;
    for i in 0..n {
        surface.set_pixel(rect.x + 2 + i, rect.y + 2 + i, color);
        surface.set_pixel(rect.x + 2 + i, rect.y + 1 + n - i, color);
    }
}

fn badge_label(session: &Session) -> Option<&'static str> {
    let m = session.input.modifiers;
    if m.typing {
        Some("TYPE")
    } else if m.ctrl {
        Some("FINE")
    } else if session.shell.highlight_frames > 0 {
        Some("CLICK")
    } else {
        None
    }
}

pub fn badge_rect(label: &str, screen_width: i32) -> Rect {
    let w = GLYPH_ADVANCE * label.len() as i32 + 4;
    Rect::new(screen_width - w - 2, 2, w, BADGE_HEIGHT)
}

fn draw_cursor(surface: &mut PixelSurface, theme: &Theme, x: i32, y: i32) {
    for (dy, row) in CURSOR_BITMAP.iter().enumerate() {
        for (dx, &px) in row.iter().enumerate() {
            let color = match px {
                1 => theme.cursor_fill,
                2 => theme.cursor_outline,
                _ => continue,
            };
            surface.set_pixel(x + dx as i32, y + dy as i32, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DockIcon;
    use std::boxed::Box;

    const CFG: &ShellConfig = &ShellConfig::DEFAULT;
    const UNSET: u8 = 0xFF;

    fn setup() -> (Box<PixelSurface>, Layout, Session) {
        let mut surface = Box::new(PixelSurface::new());
        surface.clear(UNSET);
        (surface, Layout::compute(CFG, 320, 200), Session::new(CFG, 320, 200))
    }

    #[test]
    fn full_redraw_assigns_every_pixel() {
        let (mut surface, layout, session) = setup();
        draw_frame(&mut surface, CFG, &layout, &session);
        assert!(surface.pixels().iter().all(|&p| p != UNSET));
    }

    #[test]
    fn full_redraw_with_everything_open_assigns_every_pixel() {
        let (mut surface, layout, mut session) = setup();
        session.shell.start_menu_open = true;
        session.shell.terminal_open = true;
        session.shell.last_clicked = Some(DockIcon::Start);
        session.shell.highlight_frames = 4;
        session.input.modifiers.typing = true;
        for ch in "help".chars() {
            session.terminal.insert(ch);
        }
        session.terminal.submit();
        draw_frame(&mut surface, CFG, &layout, &session);
        assert!(surface.pixels().iter().all(|&p| p != UNSET));
    }

    #[test]
    fn wallpaper_runs_from_first_to_last_shade() {
        let (mut surface, layout, mut session) = setup();
        session.input.cursor.x = 0;
        session.input.cursor.y = 150;
        draw_frame(&mut surface, CFG, &layout, &session);
        assert_eq!(surface.pixel(100, 0), Some(0));
        let last = surface.pixel(100, layout.dock_band.y - 1).expect("in bounds");
        assert!(last < WALLPAPER_SHADES && last >= WALLPAPER_SHADES - 2);
        assert_eq!(surface.pixel(0, layout.dock_band.y + 1), Some(CFG.theme.dock_band));
    }

    #[test]
    fn cursor_is_drawn_last() {
        let (mut surface, layout, mut session) = setup();
        session.shell.terminal_open = true;
        let (x, y) = (layout.window.x + 30, layout.window.y + 30);
        session.input.cursor.x = x;
        session.input.cursor.y = y;
        draw_frame(&mut surface, CFG, &layout, &session);
        assert_eq!(surface.pixel(x, y), Some(CFG.theme.cursor_outline));
        assert_eq!(surface.pixel(x + 1, y + 2), Some(CFG.theme.cursor_fill));
        assert_eq!(surface.pixel(x + 7, y), Some(CFG.theme.terminal_bg));
    }

    #[test]
    fn clicked_icon_gets_an_outline() {
        let (mut surface, layout, mut session) = setup();
        session.shell.last_clicked = Some(DockIcon::Files);
        session.shell.highlight_frames = 5;
        draw_frame(&mut surface, CFG, &layout, &session);
        let ring = layout.icon_rect(2).expect("files icon").inset(-1);
        assert_eq!(surface.pixel(ring.x, ring.y), Some(CFG.theme.highlight));

        session.shell.highlight_frames = 0;
        draw_frame(&mut surface, CFG, &layout, &session);
        assert_eq!(surface.pixel(ring.x, ring.y), Some(CFG.theme.dock_panel));
    }

    #[test]
    fn hovered_menu_item_is_highlighted() {
        let (mut surface, layout, mut session) = setup();
        session.shell.start_menu_open = true;
        let row = layout.menu_item_rect(1);
        session.input.cursor.x = row.x + row.w / 2;
        session.input.cursor.y = row.y + 1;
        draw_frame(&mut surface, CFG, &layout, &session);
        assert_eq!(surface.pixel(row.x, row.bottom() - 1), Some(CFG.theme.accent));
        let other = layout.menu_item_rect(3);
        assert_eq!(surface.pixel(other.x, other.bottom() - 1), Some(CFG.theme.dock_band));
    }

    #[test]
    fn badge_reflects_the_input_mode() {
        let (mut surface, layout, mut session) = setup();
        let corner = |label| badge_rect(label, 320);

        draw_frame(&mut surface, CFG, &layout, &session);
        let idle = corner("CLICK");
        assert_ne!(surface.pixel(idle.x, idle.y), Some(CFG.theme.badge));

        session.input.modifiers.typing = true;
        draw_frame(&mut surface, CFG, &layout, &session);
        let typing = corner("TYPE");
        assert_eq!(surface.pixel(typing.x, typing.y), Some(CFG.theme.badge));
    }

    fn glyph_painted(surface: &PixelSurface, x: i32, y: i32, color: u8) -> bool {
        (0..8).any(|dy| (0..8).any(|dx| surface.pixel(x + dx, y + dy) == Some(color)))
    }

    #[test]
    fn caret_follows_the_typed_text() {
        let (mut surface, layout, mut session) = setup();
        session.shell.terminal_open = true;
        session.input.modifiers.typing = true;
        session.input.cursor.x = 0;
        session.input.cursor.y = 0;
        draw_frame(&mut surface, CFG, &layout, &session);
        let body = layout.window_body();
        let rows = session.terminal.history_capacity() as i32;
        let input_y = body.y + 2 + CFG.geometry.line_height * rows;
        let caret_x = body.x + TEXT_INDENT + 16;
        assert!(glyph_painted(&surface, caret_x, input_y, CFG.theme.text));

        session.caret_visible = false;
        draw_frame(&mut surface, CFG, &layout, &session);
        assert!(!glyph_painted(&surface, caret_x, input_y, CFG.theme.text));
    }

    #[test]
    fn long_scrollback_lines_stay_inside_the_window() {
        let (mut surface, layout, mut session) = setup();
        session.shell.terminal_open = true;
        session.input.cursor.x = 0;
        session.input.cursor.y = 0;
        for _ in 0..40 {
            session.terminal.insert('W');
        }
        session.terminal.submit();
        draw_frame(&mut surface, CFG, &layout, &session);

        let body = layout.window_body();
        let row_y = body.y + 2;
        let outside = (row_y..row_y + 8)
            .flat_map(|y| (layout.window.right()..320).map(move |x| (x, y)))
            .filter(|&(x, y)| surface.pixel(x, y) == Some(CFG.theme.prompt))
            .count();
        assert_eq!(outside, 0);

        let last_col = body.x + TEXT_INDENT + GLYPH_ADVANCE * (text_columns(body) as i32 - 1);
        assert!(glyph_painted(&surface, last_col, row_y, CFG.theme.prompt));
        assert!(last_col + GLYPH_ADVANCE <= layout.window.right());
    }

    #[test]
    fn head_columns_cuts_on_characters() {
        assert_eq!(head_columns("abcdef", 3), "abc");
        assert_eq!(head_columns("ab", 3), "ab");
        assert_eq!(head_columns("", 0), "");
    }
}
