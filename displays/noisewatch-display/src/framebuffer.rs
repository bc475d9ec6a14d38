//! Page-organized monochrome framebuffer
//!
//! The buffer mirrors the controller's GDDRAM layout: the display is split
//! into 8-pixel-tall pages, and each byte holds one column of one page
//! with bit 0 at the top. Pixel `(x, y)` lives in byte
//! `(y / 8) * width + x`, bit `y % 8`.
//!
//! Coordinates are signed so that lines and text may start or run off
//! screen. Out-of-range pixels are skipped, never wrapped.

use heapless::Vec;
use noisewatch_core::config::{MAX_DISPLAY_BYTES, MAX_DISPLAY_HEIGHT, MAX_DISPLAY_WIDTH};
use noisewatch_core::traits::DisplayError;

use crate::font::{self, GLYPH_SIZE};

/// Horizontal advance per character in pixels
pub const CHAR_ADVANCE: i32 = GLYPH_SIZE as i32;

/// Rectangular window of columns and pages to transmit
///
/// Bounds are inclusive on both ends, matching the controller's column and
/// page address commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderArea {
    pub start_column: u8,
    pub end_column: u8,
    pub start_page: u8,
    pub end_page: u8,
}

impl RenderArea {
    pub const fn new(start_column: u8, end_column: u8, start_page: u8, end_page: u8) -> Self {
        Self {
            start_column,
            end_column,
            start_page,
            end_page,
        }
    }

    /// Number of bytes this area covers
    ///
    /// Zero when the end precedes the start.
    pub fn buffer_len(&self) -> usize {
        if self.end_column < self.start_column || self.end_page < self.start_page {
            return 0;
        }
        let columns = (self.end_column - self.start_column) as usize + 1;
        let pages = (self.end_page - self.start_page) as usize + 1;
        columns * pages
    }

    /// Check the area is well-formed and lies inside the framebuffer
    pub fn fits(&self, fb: &Framebuffer) -> bool {
        self.start_column <= self.end_column
            && self.start_page <= self.end_page
            && (self.end_column as u16) < fb.width()
            && (self.end_page as u16) < fb.pages()
    }
}

/// Fixed-size monochrome framebuffer
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u16,
    height: u16,
    buf: Vec<u8, MAX_DISPLAY_BYTES>,
}

impl Framebuffer {
    /// Create a cleared framebuffer
    ///
    /// Width must be 1 to 128 and height a multiple of 8 up to 64, the
    /// largest panel the controller addresses.
    pub fn new(width: u16, height: u16) -> Result<Self, DisplayError> {
        if width == 0 || width > MAX_DISPLAY_WIDTH {
            return Err(DisplayError::InvalidDimensions);
        }
        if height == 0 || height > MAX_DISPLAY_HEIGHT || height % 8 != 0 {
            return Err(DisplayError::InvalidDimensions);
        }
        let len = width as usize * (height / 8) as usize;
        let mut buf = Vec::new();
        buf.resize(len, 0)
            .map_err(|_| DisplayError::InvalidDimensions)?;
        Ok(Self { width, height, buf })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of 8-pixel pages
    pub fn pages(&self) -> u16 {
        self.height / 8
    }

    /// Area covering the whole framebuffer
    pub fn full_area(&self) -> RenderArea {
        // Both fit in a byte: width <= 128, pages <= 8
        RenderArea::new(0, (self.width - 1) as u8, 0, (self.pages() - 1) as u8)
    }

    /// Raw page-ordered bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Zero every pixel
    pub fn clear(&mut self) {
        self.buf.fill(0);
    }

    /// Replace the whole buffer with `bitmap`
    ///
    /// `bitmap` must be exactly as long as the framebuffer.
    pub fn copy_from(&mut self, bitmap: &[u8]) -> Result<(), DisplayError> {
        if bitmap.len() != self.buf.len() {
            return Err(DisplayError::BufferOverflow);
        }
        self.buf.copy_from_slice(bitmap);
        Ok(())
    }

    fn index(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let byte = (y as usize / 8) * self.width as usize + x as usize;
        Some((byte, (y % 8) as u8))
    }

    /// Set or clear one pixel
    ///
    /// Does nothing outside the display. Returns whether the pixel was in
    /// bounds.
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) -> bool {
        match self.index(x, y) {
            Some((byte, bit)) => {
                if on {
                    self.buf[byte] |= 1 << bit;
                } else {
                    self.buf[byte] &= !(1 << bit);
                }
                true
            }
            None => false,
        }
    }

    /// Read one pixel, `None` outside the display
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<bool> {
        self.index(x, y)
            .map(|(byte, bit)| self.buf[byte] & (1 << bit) != 0)
    }

    /// Draw a line with Bresenham's algorithm, both endpoints included
    ///
    /// Only the on-screen part of the line is walked: the run leading up to
    /// the framebuffer is skipped in one step and the walk stops once the
    /// line has left it, so the cost is bounded by the framebuffer size
    /// whatever the endpoints.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        let (x0, y0, x1, y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
        let (width, height) = (self.width as i64, self.height as i64);

        if x0.max(x1) < 0 || y0.max(y1) < 0 || x0.min(x1) >= width || y0.min(y1) >= height {
            return;
        }

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };

        let (mut x, mut y, mut err) = skip_to_screen(
            (x0, y0),
            (dx, -dy),
            (sx, sy),
            (width, height),
        );

        loop {
            // x and y never leave the span of the i32 endpoints
            self.set_pixel(x as i32, y as i32, on);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
            // Coordinates only move one way; past the far edge is final
            let gone_x = (sx > 0 && x >= width) || (sx < 0 && x < 0);
            let gone_y = (sy > 0 && y >= height) || (sy < 0 && y < 0);
            if gone_x || gone_y {
                break;
            }
        }
    }

    /// Whether a full glyph cell at `(x, y)` fits on screen
    fn char_fits(&self, x: i32, y: i32) -> bool {
        let cell = GLYPH_SIZE as i32;
        x >= 0 && y >= 0 && x <= self.width as i32 - cell && y <= self.height as i32 - cell
    }

    /// Draw one character with its top-left corner at `(x, y)`
    ///
    /// `y` is rounded down to a page boundary. The glyph overwrites the
    /// eight columns it covers. Nothing is drawn unless the whole cell
    /// fits on screen.
    pub fn draw_char(&mut self, x: i32, y: i32, ch: char) {
        if !self.char_fits(x, y) {
            return;
        }
        let start = (y as usize / 8) * self.width as usize + x as usize;
        self.buf[start..start + GLYPH_SIZE].copy_from_slice(font::glyph(ch));
    }

    /// Draw a string left to right starting at `(x, y)`
    ///
    /// Characters advance by 8 pixels with no wrapping; those that would
    /// cross the right edge are dropped.
    pub fn draw_string(&mut self, x: i32, y: i32, text: &str) {
        if !self.char_fits(x, y) {
            return;
        }
        let mut x = x;
        for ch in text.chars() {
            self.draw_char(x, y, ch);
            x = x.saturating_add(CHAR_ADVANCE);
        }
    }

    /// Iterate the bytes of `area` in transmission order (page by page)
    ///
    /// The caller must check `area.fits(self)` first.
    pub(crate) fn area_bytes<'a>(&'a self, area: &RenderArea) -> impl Iterator<Item = u8> + 'a {
        let width = self.width as usize;
        let columns = area.start_column as usize..=area.end_column as usize;
        (area.start_page as usize..=area.end_page as usize).flat_map(move |page| {
            let row = page * width;
            self.buf[row + *columns.start()..=row + *columns.end()]
                .iter()
                .copied()
        })
    }
}

/// Bresenham state after the steps that precede the framebuffer
///
/// Works on the major axis, which advances on every step. After `k` steps
/// along it the minor axis has advanced `(2 * minor * k + major) /
/// (2 * major)` times and the error term is `a * (j + 1) - b * (i + 1)`
/// for `i` x-steps and `j` y-steps, with `a = |dx|`, `b = |dy|`.
fn skip_to_screen(
    (x0, y0): (i64, i64),
    (a, b): (i64, i64),
    (sx, sy): (i64, i64),
    (width, height): (i64, i64),
) -> (i64, i64, i64) {
    let lead_in = |start: i64, step: i64, limit: i64, len: i64| -> i64 {
        let distance = if step > 0 { -start } else { start - (limit - 1) };
        distance.clamp(0, len)
    };
    let advance = |major: i64, minor: i64, k: i64| -> i64 {
        ((2 * minor as i128 * k as i128 + major as i128) / (2 * major as i128)) as i64
    };
    let error = |i: i64, j: i64| -> i64 {
        (a as i128 * (j as i128 + 1) - b as i128 * (i as i128 + 1)) as i64
    };

    if a >= b {
        let k = lead_in(x0, sx, width, a);
        if k == 0 {
            return (x0, y0, a - b);
        }
        let j = advance(a, b, k);
        (x0 + sx * k, y0 + sy * j, error(k, j))
    } else {
        let k = lead_in(y0, sy, height, b);
        if k == 0 {
            return (x0, y0, a - b);
        }
        let i = advance(b, a, k);
        (x0 + sx * i, y0 + sy * k, error(i, k))
    }
}
