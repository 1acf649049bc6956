use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::device::VideoDevice;
use crate::font;

pub const SURFACE_LEN: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// Horizontal advance of one glyph.
pub const GLYPH_ADVANCE: i32 = 8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x
            && px < self.x.saturating_add(self.w)
            && py >= self.y
            && py < self.y.saturating_add(self.h)
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    pub fn inset(&self, by: i32) -> Rect {
        Rect::new(self.x + by, self.y + by, self.w - by * 2, self.h - by * 2)
    }
}

/// Off-screen frame of palette indices. Every primitive draws here; only
/// [`PixelSurface::flip`] reaches the display.
pub struct PixelSurface {
    pixels: [u8; SURFACE_LEN],
}

impl PixelSurface {
    pub const fn new() -> Self {
        Self { pixels: [0; SURFACE_LEN] }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn clear(&mut self, color: u8) {
        self.pixels.fill(color);
    }

    fn offset(x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return None;
        }
        Some(y * SCREEN_WIDTH + x)
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u8) {
        if let Some(off) = Self::offset(x, y) {
            self.pixels[off] = color;
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u8> {
        Self::offset(x, y).map(|off| self.pixels[off])
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u8) {
        if w <= 0 || h <= 0 {
            return;
        }
        for dy in 0..h {
            for dx in 0..w {
                self.set_pixel(x.saturating_add(dx), y.saturating_add(dy), color);
            }
        }
    }

    pub fn fill(&mut self, rect: Rect, color: u8) {
        self.fill_rect(rect.x, rect.y, rect.w, rect.h, color);
    }

    pub fn hline(&mut self, x: i32, y: i32, w: i32, color: u8) {
        self.fill_rect(x, y, w, 1, color);
    }

    pub fn outline_rect(&mut self, rect: Rect, color: u8) {
        if rect.w <= 0 || rect.h <= 0 {
            return;
        }
        self.hline(rect.x, rect.y, rect.w, color);
        self.hline(rect.x, rect.bottom() - 1, rect.w, color);
        self.fill_rect(rect.x, rect.y, 1, rect.h, color);
        self.fill_rect(rect.right() - 1, rect.y, 1, rect.h, color);
    }

    pub fn draw_glyph(&mut self, x: i32, y: i32, ch: char, color: u8) {
        let bitmap = font::glyph(ch);
        for (row, bits) in bitmap.iter().enumerate() {
            for col in 0..8 {
                if bits & (1 << col) != 0 {
                    self.set_pixel(x + col, y + row as i32, color);
                }
            }
        }
    }

    /// Draws `text` left to right, one glyph every 8 px. No wrapping.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, color: u8) {
        let mut pen = x;
        for ch in text.chars() {
            self.draw_glyph(pen, y, ch, color);
            pen = pen.saturating_add(GLYPH_ADVANCE);
        }
    }

    pub fn flip<V: VideoDevice + ?Sized>(&self, video: &mut V) {
        video.present(&self.pixels);
    }
}

impl Default for PixelSurface {
    fn default() -> Self {
        Self::new()
    }
}
