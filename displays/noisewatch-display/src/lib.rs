//! SSD1306 display support for the noise alarm
//!
//! This crate provides:
//! - `Framebuffer` and `RenderArea`: the page-organized pixel buffer with
//!   pixel, line and text drawing
//! - The 8x8 font for `A`-`Z` and `0`-`9`
//! - `Ssd1306`: the I2C panel driver and its command protocol
//! - `DisplayBackend`: the seam between screens and panel drivers
//! - `AlarmScreen`: the two-line activation counter screen
//!
//! # Architecture
//!
//! ```text
//! AlarmScreen ──draws──▶ Framebuffer ◀──owns── Ssd1306 ──I2cBus──▶ panel
//!      │                                          ▲
//!      └──────────── DisplayBackend ──────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod command;
pub mod font;
pub mod framebuffer;
pub mod screen;
pub mod ssd1306;

// Re-export key types
pub use backend::DisplayBackend;
pub use framebuffer::{Framebuffer, RenderArea};
pub use screen::AlarmScreen;
pub use ssd1306::Ssd1306;
