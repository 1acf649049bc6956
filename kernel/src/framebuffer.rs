//! Palette-mode display emulated on the bootloader's linear framebuffer.
//!
//! Frames arrive as 320x200 palette indices. Each index is looked up in a
//! software palette and the frame is scaled by the largest whole factor that
//! fits, centred, with the border left black.

use bootloader_api::info::{FrameBuffer, PixelFormat};

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::device::VideoDevice;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VideoError {
    NoFramebuffer,
    UnsupportedFormat,
    TooSmall,
    BufferTooShort,
}

impl VideoError {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoError::NoFramebuffer => "no framebuffer from bootloader",
            VideoError::UnsupportedFormat => "unsupported pixel format",
            VideoError::TooSmall => "framebuffer smaller than 320x200",
            VideoError::BufferTooShort => "framebuffer memory shorter than its mode",
        }
    }
}

/// Geometry of the target framebuffer, in pixels unless noted.
#[derive(Copy, Clone, Debug)]
pub struct Mode {
    pub width: usize,
    pub height: usize,
    pub stride: usize,
    pub bytes_per_pixel: usize,
    pub format: PixelFormat,
}

pub struct LinearFramebuffer<'a> {
    buf: &'a mut [u8],
    mode: Mode,
    palette: [[u8; 3]; 256],
    scale: usize,
    origin_x: usize,
    origin_y: usize,
}

/// Widens a 6-bit DAC channel to 8 bits.
fn expand(v: u8) -> u8 {
    let v = v & 0x3F;
    (v << 2) | (v >> 4)
}

fn write_pixel_raw_format(
    buf: &mut [u8],
    off: usize,
    rgb: [u8; 3],
    pixel_format: PixelFormat,
    bpp: usize,
) {
    if off + bpp > buf.len() {
        return;
    }
    let [r, g, b] = rgb;
    match (pixel_format, bpp) {
        (PixelFormat::Rgb, 4) => buf[off..off + 4].copy_from_slice(&[r, g, b, 0xFF]),
        (PixelFormat::Rgb, 3) => buf[off..off + 3].copy_from_slice(&[r, g, b]),
        (PixelFormat::Bgr, 4) => buf[off..off + 4].copy_from_slice(&[b, g, r, 0xFF]),
        (PixelFormat::Bgr, 3) => buf[off..off + 3].copy_from_slice(&[b, g, r]),
        (PixelFormat::U8, 1) => {
            let luma = (r as u32 * 77 + g as u32 * 150 + b as u32 * 29) >> 8;
            buf[off] = luma as u8;
        }
        _ => {}
    }
}

fn supported(format: PixelFormat, bpp: usize) -> bool {
    matches!(
        (format, bpp),
        (PixelFormat::Rgb, 3 | 4) | (PixelFormat::Bgr, 3 | 4) | (PixelFormat::U8, 1)
    )
}

impl<'a> LinearFramebuffer<'a> {
    pub fn new(buf: &'a mut [u8], mode: Mode) -> Result<Self, VideoError> {
        if !supported(mode.format, mode.bytes_per_pixel) {
            return Err(VideoError::UnsupportedFormat);
        }
        if mode.width < SCREEN_WIDTH || mode.height < SCREEN_HEIGHT || mode.stride < mode.width {
            return Err(VideoError::TooSmall);
        }
        if buf.len() < mode.stride * mode.height * mode.bytes_per_pixel {
            return Err(VideoError::BufferTooShort);
        }
        let scale = (mode.width / SCREEN_WIDTH).min(mode.height / SCREEN_HEIGHT).max(1);
        Ok(Self {
            buf,
            mode,
            palette: [[0; 3]; 256],
            scale,
            origin_x: (mode.width - SCREEN_WIDTH * scale) / 2,
            origin_y: (mode.height - SCREEN_HEIGHT * scale) / 2,
        })
    }

    pub fn from_boot(fb: Option<&'a mut FrameBuffer>) -> Result<Self, VideoError> {
        let fb = fb.ok_or(VideoError::NoFramebuffer)?;
        let info = fb.info();
        let mode = Mode {
            width: info.width,
            height: info.height,
            stride: info.stride,
            bytes_per_pixel: info.bytes_per_pixel,
            format: info.pixel_format,
        };
        log::info!(
            "framebuffer: {}x{} stride {} bpp {} {:?}",
            mode.width,
            mode.height,
            mode.stride,
            mode.bytes_per_pixel,
            mode.format
        );
        Self::new(fb.buffer_mut(), mode)
    }

    pub fn scale(&self) -> usize {
        self.scale
    }

    pub fn origin(&self) -> (usize, usize) {
        (self.origin_x, self.origin_y)
    }

    fn row_offset(&self, y: usize) -> usize {
        (y * self.mode.stride + self.origin_x) * self.mode.bytes_per_pixel
    }
}

impl VideoDevice for LinearFramebuffer<'_> {
    fn set_mode(&mut self) {
        self.buf.fill(0);
    }

    fn set_palette(&mut self, index: u8, r: u8, g: u8, b: u8) {
        self.palette[index as usize] = [expand(r), expand(g), expand(b)];
    }

    fn present(&mut self, pixels: &[u8]) {
        let bpp = self.mode.bytes_per_pixel;
        let format = self.mode.format;
        let scale = self.scale;
        let row_bytes = SCREEN_WIDTH * scale * bpp;
        for (sy, row) in pixels.chunks_exact(SCREEN_WIDTH).take(SCREEN_HEIGHT).enumerate() {
            let first = self.origin_y + sy * scale;
            let start = self.row_offset(first);
            let mut off = start;
            for &idx in row {
                let rgb = self.palette[idx as usize];
                for _ in 0..scale {
                    write_pixel_raw_format(self.buf, off, rgb, format, bpp);
                    off += bpp;
                }
            }
            for dy in 1..scale {
                let dst = self.row_offset(first + dy);
                self.buf.copy_within(start..start + row_bytes, dst);
            }
        }
    }
}
