//! SSD1306 command set
//!
//! Every transfer to the controller starts with a control byte: `0x80`
//! announces a single command byte, `0x40` announces a run of GDDRAM data.

use noisewatch_core::config::{MAX_DISPLAY_HEIGHT, MIN_DISPLAY_HEIGHT};
use noisewatch_core::traits::DisplayError;

/// Control byte: one command byte follows
pub const CONTROL_COMMAND: u8 = 0x80;
/// Control byte: display data follows until the end of the transfer
pub const CONTROL_DATA: u8 = 0x40;

pub const SET_MEM_MODE: u8 = 0x20;
pub const SET_COL_ADDR: u8 = 0x21;
pub const SET_PAGE_ADDR: u8 = 0x22;
pub const SET_HORIZ_SCROLL: u8 = 0x26;
pub const SET_SCROLL: u8 = 0x2E;
pub const SET_DISP_START_LINE: u8 = 0x40;
pub const SET_CONTRAST: u8 = 0x81;
pub const SET_CHARGE_PUMP: u8 = 0x8D;
pub const SET_SEG_REMAP: u8 = 0xA0;
pub const SET_ENTIRE_ON: u8 = 0xA4;
pub const SET_NORM_DISP: u8 = 0xA6;
pub const SET_INV_DISP: u8 = 0xA7;
pub const SET_MUX_RATIO: u8 = 0xA8;
pub const SET_DISP: u8 = 0xAE;
pub const SET_COM_OUT_DIR: u8 = 0xC0;
pub const SET_DISP_OFFSET: u8 = 0xD3;
pub const SET_DISP_CLK_DIV: u8 = 0xD5;
pub const SET_PRECHARGE: u8 = 0xD9;
pub const SET_COM_PIN_CFG: u8 = 0xDA;
pub const SET_VCOM_DESEL: u8 = 0xDB;

/// Length of the power-up sequence
pub const INIT_LEN: usize = 26;

/// COM pin hardware configuration for a panel size
pub fn com_pins(width: u16, height: u16) -> u8 {
    match (width, height) {
        (128, 64) => 0x12,
        _ => 0x02,
    }
}

/// Multiplex ratio byte for a panel height
///
/// The controller drives 16 to 64 rows; anything else has no encoding.
pub fn mux_ratio(height: u16) -> Result<u8, DisplayError> {
    if !(MIN_DISPLAY_HEIGHT..=MAX_DISPLAY_HEIGHT).contains(&height) {
        return Err(DisplayError::InvalidDimensions);
    }
    u8::try_from(height - 1).map_err(|_| DisplayError::InvalidDimensions)
}

/// Power-up configuration sequence, one command byte per entry
pub fn init_sequence(width: u16, height: u16) -> Result<[u8; INIT_LEN], DisplayError> {
    Ok([
        SET_DISP, // display off
        SET_MEM_MODE,
        0x00, // horizontal addressing
        SET_DISP_START_LINE, // start line 0
        SET_SEG_REMAP | 0x01, // column 127 is SEG0
        SET_MUX_RATIO,
        mux_ratio(height)?,
        SET_COM_OUT_DIR | 0x08, // scan from COM[N-1] to COM0
        SET_DISP_OFFSET,
        0x00,
        SET_COM_PIN_CFG,
        com_pins(width, height),
        SET_DISP_CLK_DIV,
        0x80,
        SET_PRECHARGE,
        0xF1,
        SET_VCOM_DESEL,
        0x30, // 0.83 x Vcc
        SET_CONTRAST,
        0xFF,
        SET_ENTIRE_ON, // follow RAM content
        SET_NORM_DISP,
        SET_CHARGE_PUMP,
        0x14,
        SET_SCROLL, // deactivate scroll
        SET_DISP | 0x01, // display on
    ])
}

/// Continuous horizontal right scroll across all pages
pub const SCROLL_SETUP: [u8; 7] = [SET_HORIZ_SCROLL, 0x00, 0x00, 0x00, 0x03, 0x00, 0xFF];
