//! Activation counter screen
//!
//! Two fixed text lines: a static label on page 2 and the activation count
//! on page 4. Every update redraws both lines from a blank frame.

use core::fmt::Write;

use heapless::String;
use noisewatch_core::config::MAX_LABEL_LEN;
use noisewatch_core::traits::{DisplayError, StatusDisplay};

use crate::backend::DisplayBackend;

/// Pixel row of the label line
pub const LABEL_Y: i32 = 16;

/// Pixel row of the counter line
pub const COUNT_Y: i32 = 32;

/// Longest counter line, in characters
pub const COUNT_LINE_LEN: usize = 19;

/// Status screen on a display backend
pub struct AlarmScreen<D> {
    display: D,
    label: String<MAX_LABEL_LEN>,
}

impl<D: DisplayBackend> AlarmScreen<D> {
    /// Create a screen with the given label
    pub fn new(display: D, label: &str) -> Self {
        let mut owned = String::new();
        for ch in label.chars() {
            if owned.push(ch).is_err() {
                break;
            }
        }
        Self {
            display,
            label: owned,
        }
    }

    /// Initialize the panel and show a blank frame
    pub fn start(&mut self) -> Result<(), DisplayError> {
        self.display.init()?;
        self.display.framebuffer_mut().clear();
        self.display.flush()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the underlying display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Get the underlying display mutably
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}

/// Format the counter line, truncated to [`COUNT_LINE_LEN`] characters
pub fn count_line(count: u32) -> String<COUNT_LINE_LEN> {
    let mut full: String<32> = String::new();
    // 13 characters of prefix plus at most 10 digits always fit
    let _ = write!(full, "Activations: {}", count);

    let mut line = String::new();
    for ch in full.chars().take(COUNT_LINE_LEN) {
        let _ = line.push(ch);
    }
    line
}

impl<D: DisplayBackend> StatusDisplay for AlarmScreen<D> {
    fn show_activations(&mut self, count: u32) -> Result<(), DisplayError> {
        let line = count_line(count);
        let fb = self.display.framebuffer_mut();
        fb.clear();
        fb.draw_string(0, LABEL_Y, &self.label);
        fb.draw_string(0, COUNT_Y, &line);
        self.display.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font;
    use crate::framebuffer::Framebuffer;

    /// In-memory backend counting flushes
    struct MockBackend {
        fb: Framebuffer,
        ready: bool,
        flushes: u32,
        fail: bool,
    }

    impl MockBackend {
        fn new() -> Self {
            Self {
                fb: Framebuffer::new(128, 64).unwrap(),
                ready: false,
                flushes: 0,
                fail: false,
            }
        }
    }

    impl DisplayBackend for MockBackend {
        fn init(&mut self) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Communication);
            }
            self.ready = true;
            Ok(())
        }

        fn framebuffer(&self) -> &Framebuffer {
            &self.fb
        }

        fn framebuffer_mut(&mut self) -> &mut Framebuffer {
            &mut self.fb
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Communication);
            }
            self.flushes += 1;
            Ok(())
        }

        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    fn cell(fb: &Framebuffer, column: usize, page: usize) -> &[u8] {
        let start = page * 128 + column * 8;
        &fb.as_bytes()[start..start + 8]
    }

    #[test]
    fn test_count_line() {
        assert_eq!(count_line(0).as_str(), "Activations: 0");
        assert_eq!(count_line(123456).as_str(), "Activations: 123456");
        // Truncated to 19 characters
        assert_eq!(count_line(u32::MAX).as_str(), "Activations: 429496");
    }

    #[test]
    fn test_start_inits_and_blanks() {
        let mut screen = AlarmScreen::new(MockBackend::new(), "Alert System");
        screen.display_mut().framebuffer_mut().set_pixel(0, 0, true);
        screen.start().unwrap();

        assert!(screen.display().is_ready());
        assert_eq!(screen.display().flushes, 1);
        assert!(screen.display().fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_layout() {
        let mut screen = AlarmScreen::new(MockBackend::new(), "Alert System");
        screen.show_activations(7).unwrap();

        let fb = &screen.display().fb;
        // "ALERT" on page 2
        assert_eq!(cell(fb, 0, 2), font::glyph('A'));
        assert_eq!(cell(fb, 4, 2), font::glyph('T'));
        // "Activations: 7" on page 4, digit in column 13
        assert_eq!(cell(fb, 0, 4), font::glyph('A'));
        assert_eq!(cell(fb, 13, 4), font::glyph('7'));
        // Other pages stay blank
        assert!(fb.as_bytes()[..256].iter().all(|&b| b == 0));
        assert_eq!(screen.display().flushes, 1);
    }

    #[test]
    fn test_redraw_clears_old_digits() {
        let mut screen = AlarmScreen::new(MockBackend::new(), "Alert System");
        screen.show_activations(10).unwrap();
        screen.show_activations(0).unwrap();

        let fb = &screen.display().fb;
        assert_eq!(cell(fb, 13, 4), font::glyph('0'));
        assert!(cell(fb, 14, 4).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_label_truncated_to_capacity() {
        let screen = AlarmScreen::new(MockBackend::new(), "A very long label indeed");
        assert_eq!(screen.label(), "A very long labe");
    }

    #[test]
    fn test_flush_error_propagates() {
        let mut backend = MockBackend::new();
        backend.fail = true;
        let mut screen = AlarmScreen::new(backend, "Alert System");
        assert_eq!(screen.show_activations(1), Err(DisplayError::Communication));
        assert_eq!(screen.start(), Err(DisplayError::Communication));
    }
}
