//! Waveshare Pico-LCD-1.3 board constants
//!
//! GPIO numbers are RP2040 pin numbers as wired by the Pico-LCD-1.3 module.
//! Pass these into the HAL and into [`PinInput::new`](crate::PinInput::new);
//! nothing in the crate reads them implicitly.

use embedded_hal::spi::{MODE_0, Mode};

use crate::input::KeyMapping;

/// Panel width in pixels
pub const WIDTH: u16 = 240;
/// Panel height in pixels
pub const HEIGHT: u16 = 240;

/// SPI clock the panel is driven at
pub const SPI_FREQUENCY_HZ: u32 = 100_000_000;
/// SPI peripheral the panel is wired to
pub const SPI_BUS: u8 = 1;
/// Clock idles low, data sampled on the first edge
pub const SPI_MODE: Mode = MODE_0;

/// Data/command select
pub const LCD_DC: u8 = 8;
/// Chip select
pub const LCD_CS: u8 = 9;
/// SPI clock
pub const LCD_CLK: u8 = 10;
/// SPI data out
pub const LCD_MOSI: u8 = 11;
/// Controller reset
pub const LCD_RST: u8 = 12;
/// Backlight PWM
pub const LCD_BL: u8 = 13;

/// Joystick up
pub const JOY_UP: u8 = 2;
/// Joystick press
pub const JOY_CTRL: u8 = 3;
/// Key A
pub const KEY_A: u8 = 15;
/// Joystick left
pub const JOY_LEFT: u8 = 16;
/// Key B
pub const KEY_B: u8 = 17;
/// Joystick down
pub const JOY_DOWN: u8 = 18;
/// Key X
pub const KEY_X: u8 = 19;
/// Joystick right
pub const JOY_RIGHT: u8 = 20;
/// Key Y
pub const KEY_Y: u8 = 21;

/// Default button layout
///
/// The joystick navigates and selects, Y cancels, X unlocks, A opens
/// settings and B toggles wifi. The module has no dedicated sleep key.
pub const KEY_MAPPING: KeyMapping = KeyMapping {
    up: JOY_UP,
    down: JOY_DOWN,
    left: JOY_LEFT,
    right: JOY_RIGHT,
    select: JOY_CTRL,
    cancel: KEY_Y,
    unlock: KEY_X,
    settings: KEY_A,
    wifi: KEY_B,
    sleep: 0,
};
