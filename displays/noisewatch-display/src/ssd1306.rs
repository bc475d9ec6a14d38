//! SSD1306 OLED display driver
//!
//! Driver for SSD1306-based monochrome OLEDs over I2C. Each driver owns its
//! framebuffer, its transmit buffer and its bus address, so several panels
//! can be driven side by side.
//!
//! All transfers are blocking and unbuffered: a bus failure is reported as
//! [`DisplayError::Communication`] and nothing is retried.

use heapless::Vec;
use noisewatch_core::config::{DisplayConfig, MAX_DISPLAY_BYTES};
use noisewatch_core::traits::DisplayError;
use noisewatch_hal::I2cBus;

use crate::backend::DisplayBackend;
use crate::command::{self, CONTROL_COMMAND, CONTROL_DATA};
use crate::framebuffer::{Framebuffer, RenderArea};

/// Largest single data transfer: a full frame plus its control byte
pub const TX_CAPACITY: usize = MAX_DISPLAY_BYTES + 1;

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    /// 7-bit bus address
    address: u8,
    framebuffer: Framebuffer,
    /// Scratch buffer for the framed data transfer
    tx: Vec<u8, TX_CAPACITY>,
    initialized: bool,
}

impl<I2C: I2cBus> Ssd1306<I2C> {
    /// Create a driver with a cleared framebuffer
    ///
    /// Fails with [`DisplayError::InvalidDimensions`] for panel sizes the
    /// controller cannot drive. Nothing is sent to the panel until
    /// [`Ssd1306::init`].
    pub fn new(i2c: I2C, config: &DisplayConfig) -> Result<Self, DisplayError> {
        command::mux_ratio(config.height)?;
        Ok(Self {
            i2c,
            address: config.address,
            framebuffer: Framebuffer::new(config.width, config.height)?,
            tx: Vec::new(),
            initialized: false,
        })
    }

    /// Send the power-up sequence and switch the panel on
    pub fn init(&mut self) -> Result<(), DisplayError> {
        let sequence =
            command::init_sequence(self.framebuffer.width(), self.framebuffer.height())?;
        self.commands(&sequence)?;
        self.initialized = true;
        Ok(())
    }

    /// Send one command byte
    fn command(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, byte])
            .map_err(|_| DisplayError::Communication)
    }

    /// Send command bytes, each in its own transfer
    fn commands(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        for &byte in bytes {
            self.command(byte)?;
        }
        Ok(())
    }

    /// Transmit one region of the framebuffer
    ///
    /// Sets the column and page windows, then streams the region in a
    /// single data transfer.
    pub fn render(&mut self, area: &RenderArea) -> Result<(), DisplayError> {
        if !area.fits(&self.framebuffer) {
            return Err(DisplayError::InvalidCoordinates);
        }

        self.commands(&[
            command::SET_COL_ADDR,
            area.start_column,
            area.end_column,
            command::SET_PAGE_ADDR,
            area.start_page,
            area.end_page,
        ])?;

        self.tx.clear();
        self.tx
            .push(CONTROL_DATA)
            .map_err(|_| DisplayError::BufferOverflow)?;
        for byte in self.framebuffer.area_bytes(area) {
            self.tx
                .push(byte)
                .map_err(|_| DisplayError::BufferOverflow)?;
        }

        self.i2c
            .write(self.address, &self.tx)
            .map_err(|_| DisplayError::Communication)
    }

    /// Transmit the whole framebuffer
    pub fn flush(&mut self) -> Result<(), DisplayError> {
        let area = self.framebuffer.full_area();
        self.render(&area)
    }

    /// Replace the framebuffer with a full-size bitmap and transmit it once
    pub fn draw_bitmap(&mut self, bitmap: &[u8]) -> Result<(), DisplayError> {
        self.framebuffer.copy_from(bitmap)?;
        self.flush()
    }

    /// Start or stop a continuous horizontal right scroll
    pub fn set_scroll(&mut self, enabled: bool) -> Result<(), DisplayError> {
        self.commands(&command::SCROLL_SETUP)?;
        self.command(command::SET_SCROLL | enabled as u8)
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.commands(&[command::SET_CONTRAST, contrast])
    }

    /// Turn display on/off
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        self.command(command::SET_DISP | on as u8)
    }

    /// Invert display colors
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError> {
        if inverted {
            self.command(command::SET_INV_DISP)
        } else {
            self.command(command::SET_NORM_DISP)
        }
    }

    /// Clear the framebuffer without transmitting
    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    /// Bus address this driver talks to
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2cBus> DisplayBackend for Ssd1306<I2C> {
    fn init(&mut self) -> Result<(), DisplayError> {
        Ssd1306::init(self)
    }

    fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        Ssd1306::flush(self)
    }

    fn is_ready(&self) -> bool {
        self.initialized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records command bytes and the last data transfer
    #[derive(Default)]
    struct RecordingBus {
        address: Option<u8>,
        commands: Vec<u8, 256>,
        data_frames: u32,
        last_data: Vec<u8, TX_CAPACITY>,
        fail: bool,
    }

    impl I2cBus for RecordingBus {
        type Error = ();

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.address = Some(address);
            match data.first() {
                Some(&CONTROL_COMMAND) => {
                    assert_eq!(data.len(), 2, "command frames carry one byte");
                    self.commands.push(data[1]).unwrap();
                }
                Some(&CONTROL_DATA) => {
                    self.data_frames += 1;
                    self.last_data.clear();
                    self.last_data.extend_from_slice(data).unwrap();
                }
                _ => panic!("write without control byte"),
            }
            Ok(())
        }
    }

    fn display() -> Ssd1306<RecordingBus> {
        Ssd1306::new(RecordingBus::default(), &DisplayConfig::default()).unwrap()
    }

    fn small_display() -> Ssd1306<RecordingBus> {
        let config = DisplayConfig {
            height: 32,
            ..Default::default()
        };
        Ssd1306::new(RecordingBus::default(), &config).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        let config = DisplayConfig {
            height: 20,
            ..Default::default()
        };
        assert_eq!(
            Ssd1306::new(RecordingBus::default(), &config).err(),
            Some(DisplayError::InvalidDimensions)
        );

        for (width, height) in [(8, 1024), (128, 8), (256, 64), (128, 72)] {
            let config = DisplayConfig {
                width,
                height,
                ..Default::default()
            };
            assert_eq!(
                Ssd1306::new(RecordingBus::default(), &config).err(),
                Some(DisplayError::InvalidDimensions),
                "{}x{}",
                width,
                height
            );
        }
    }

    #[test]
    fn test_init_sequence_on_the_wire() {
        let mut d = small_display();
        assert_eq!(d.dimensions(), (128, 32));
        assert!(!d.is_ready());
        d.init().unwrap();
        assert!(d.is_ready());

        let bus = d.release();
        assert_eq!(bus.address, Some(0x3C));
        assert_eq!(
            bus.commands.as_slice(),
            &[
                0xAE, 0x20, 0x00, 0x40, 0xA1, 0xA8, 0x1F, 0xC8, 0xD3, 0x00, 0xDA, 0x02, 0xD5,
                0x80, 0xD9, 0xF1, 0xDB, 0x30, 0x81, 0xFF, 0xA4, 0xA6, 0x8D, 0x14, 0x2E, 0xAF,
            ]
        );
        assert_eq!(bus.data_frames, 0);
    }

    #[test]
    fn test_flush_sends_windows_then_one_frame() {
        let mut d = display();
        d.framebuffer_mut().set_pixel(0, 0, true);
        d.flush().unwrap();

        let bus = d.release();
        assert_eq!(
            bus.commands.as_slice(),
            &[0x21, 0x00, 0x7F, 0x22, 0x00, 0x07]
        );
        assert_eq!(bus.data_frames, 1);
        assert_eq!(bus.last_data.len(), 1025);
        assert_eq!(bus.last_data[0], 0x40);
        assert_eq!(bus.last_data[1], 0x01);
    }

    #[test]
    fn test_render_partial_area() {
        let mut d = display();
        d.framebuffer_mut().draw_string(8, 16, "A");
        d.render(&RenderArea::new(8, 15, 2, 2)).unwrap();

        let bus = d.release();
        assert_eq!(
            bus.commands.as_slice(),
            &[0x21, 0x08, 0x0F, 0x22, 0x02, 0x02]
        );
        assert_eq!(bus.last_data.len(), 9);
        assert_eq!(&bus.last_data[1..], crate::font::glyph('A'));
    }

    #[test]
    fn test_render_rejects_bad_area() {
        let mut d = small_display();
        assert_eq!(
            d.render(&RenderArea::new(0, 127, 0, 4)),
            Err(DisplayError::InvalidCoordinates)
        );
        assert_eq!(
            d.render(&RenderArea::new(9, 3, 0, 0)),
            Err(DisplayError::InvalidCoordinates)
        );

        let bus = d.release();
        assert!(bus.commands.is_empty());
        assert_eq!(bus.data_frames, 0);
    }

    #[test]
    fn test_draw_bitmap_flushes_once() {
        let mut d = small_display();
        let mut bitmap = [0u8; 512];
        for (i, b) in bitmap.iter_mut().enumerate() {
            *b = i as u8;
        }
        d.draw_bitmap(&bitmap).unwrap();

        assert_eq!(d.framebuffer().as_bytes(), &bitmap[..]);
        let bus = d.release();
        assert_eq!(bus.data_frames, 1);
        assert_eq!(&bus.last_data[1..], &bitmap[..]);
    }

    #[test]
    fn test_draw_bitmap_wrong_size() {
        let mut d = small_display();
        assert_eq!(
            d.draw_bitmap(&[0xFF; 1024]),
            Err(DisplayError::BufferOverflow)
        );
        assert!(d.framebuffer().as_bytes().iter().all(|&b| b == 0));
        assert_eq!(d.release().data_frames, 0);
    }

    #[test]
    fn test_bus_failure_is_communication_error() {
        let bus = RecordingBus {
            fail: true,
            ..Default::default()
        };
        let mut d = Ssd1306::new(bus, &DisplayConfig::default()).unwrap();
        assert_eq!(d.init(), Err(DisplayError::Communication));
        assert!(!d.is_ready());
        assert_eq!(d.flush(), Err(DisplayError::Communication));
        assert_eq!(d.set_contrast(10), Err(DisplayError::Communication));
    }

    #[test]
    fn test_scroll_commands() {
        let mut d = display();
        d.set_scroll(true).unwrap();
        d.set_scroll(false).unwrap();

        let bus = d.release();
        assert_eq!(
            bus.commands.as_slice(),
            &[
                0x26, 0x00, 0x00, 0x00, 0x03, 0x00, 0xFF, 0x2F, 0x26, 0x00, 0x00, 0x00, 0x03,
                0x00, 0xFF, 0x2E,
            ]
        );
    }

    #[test]
    fn test_panel_settings() {
        let mut d = display();
        d.set_contrast(0x7F).unwrap();
        d.set_display_on(false).unwrap();
        d.set_display_on(true).unwrap();
        d.set_inverted(true).unwrap();
        d.set_inverted(false).unwrap();

        let bus = d.release();
        assert_eq!(
            bus.commands.as_slice(),
            &[0x81, 0x7F, 0xAE, 0xAF, 0xA7, 0xA6]
        );
    }

    #[test]
    fn test_clear_does_not_transmit() {
        let mut d = display();
        d.framebuffer_mut().draw_line(0, 0, 127, 63, true);
        d.clear();
        assert!(d.framebuffer().as_bytes().iter().all(|&b| b == 0));
        assert!(d.release().commands.is_empty());
    }

    #[test]
    fn test_independent_displays() {
        let mut left = display();
        let config = DisplayConfig {
            address: 0x3D,
            ..Default::default()
        };
        let mut right = Ssd1306::new(RecordingBus::default(), &config).unwrap();

        left.framebuffer_mut().set_pixel(1, 1, true);
        assert_eq!(right.framebuffer().get_pixel(1, 1), Some(false));

        left.flush().unwrap();
        right.flush().unwrap();
        assert_eq!(left.address(), 0x3C);
        assert_eq!(right.release().address, Some(0x3D));
    }
}
