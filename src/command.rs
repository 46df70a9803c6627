//! ST7789 command definitions
//!
//! This module defines the command bytes used to control the ST7789 display
//! controller. Commands are sent over SPI with the DC pin low for the opcode
//! and high for its parameters.
//!
//! ## Command Structure
//!
//! Every transfer phase is bracketed by its own chip-select pulse:
//! 1. CS high, DC low (command mode), CS low
//! 2. Send command byte, CS high
//! 3. If there are parameters: CS high, DC high (data mode), CS low
//! 4. Send data bytes, CS high
//!
//! The controller latches DC on CS transitions, so the command and data
//! phases must not share one CS assertion.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pico_lcd::{command, DisplayInterface, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::SpiBus;
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus for MockSpi {
//! #     fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer(&mut self, _r: &mut [u8], _w: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let mut interface = Interface::new(MockSpi, MockPin, MockPin, MockPin);
//! // Turn the panel on
//! let _ = interface.send_command(command::SLEEP_OUT);
//! let _ = interface.send_command(command::DISPLAY_ON);
//!
//! // 12-bit interface pixel format
//! let _ = interface.send_command(command::INTERFACE_PIXEL_FORMAT);
//! let _ = interface.send_data(&[0x03]);
//! ```

// System function commands

/// Sleep in command (0x10, SLPIN)
///
/// Enters minimum power consumption mode. The DC/DC converter, oscillator
/// and panel scanning stop. Wait 5ms before the next command.
pub const SLEEP_IN: u8 = 0x10;

/// Sleep out command (0x11, SLPOUT)
///
/// Leaves sleep mode. Wait 5ms before the next command and 120ms before
/// sending [`SLEEP_IN`] again.
pub const SLEEP_OUT: u8 = 0x11;

/// Display inversion off command (0x20, INVOFF)
pub const INVERSION_OFF: u8 = 0x20;

/// Display inversion on command (0x21, INVON)
///
/// IPS panels like the Pico-LCD-1.3 need inversion on to show true colors.
pub const INVERSION_ON: u8 = 0x21;

/// Display off command (0x28, DISPOFF)
///
/// Frame memory output is disabled; the memory content is kept.
pub const DISPLAY_OFF: u8 = 0x28;

/// Display on command (0x29, DISPON)
pub const DISPLAY_ON: u8 = 0x29;

// Frame memory commands

/// Column address set command (0x2A, CASET)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const COLUMN_ADDRESS_SET: u8 = 0x2A;

/// Row address set command (0x2B, RASET)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const ROW_ADDRESS_SET: u8 = 0x2B;

/// Memory write command (0x2C, RAMWR)
///
/// Transfers pixel data into the current address window.
pub const MEMORY_WRITE: u8 = 0x2C;

/// Memory data access control command (0x36, MADCTL)
///
/// Requires 1 byte: [MY, MX, MV, ML, RGB, MH, 0, 0]
pub const MEMORY_ACCESS_CONTROL: u8 = 0x36;

/// Interface pixel format command (0x3A, COLMOD)
///
/// Requires 1 byte: [0, D6, D5, D4, 0, D2, D1, D0]
pub const INTERFACE_PIXEL_FORMAT: u8 = 0x3A;

// Panel function commands

/// Porch setting command (0xB2, PORCTRL)
///
/// Requires 5 bytes: [BPA, FPA, PSEN, BPB << 4 | FPB, BPC << 4 | FPC]
pub const PORCH_CONTROL: u8 = 0xB2;

/// Gate control command (0xB7, GCTRL)
///
/// Requires 1 byte: [0, VGHS2..0, 0, VGLS2..0]
pub const GATE_CONTROL: u8 = 0xB7;

/// VCOM setting command (0xBB, VCOMS)
///
/// Requires 1 byte (6 bits).
pub const VCOM_SETTING: u8 = 0xBB;

/// LCM control command (0xC0, LCMCTRL)
///
/// Requires 1 byte: [0, XMY, XBGR, XINV, XMX, XMH, XMV, XGS]
pub const LCM_CONTROL: u8 = 0xC0;

/// VDV and VRH command enable (0xC2, VDVVRHEN)
///
/// Requires 2 bytes: [CMDEN, 0xFF]
pub const VDV_VRH_ENABLE: u8 = 0xC2;

/// VRH set command (0xC3, VRHS)
///
/// Requires 1 byte (6 bits).
pub const VRH_SET: u8 = 0xC3;

/// VDV set command (0xC4, VDVS)
///
/// Requires 1 byte (6 bits).
pub const VDV_SET: u8 = 0xC4;

/// Frame rate control in normal mode (0xC6, FRCTRL2)
///
/// Requires 1 byte: [NLA2..0, RTNA4..0]
pub const FRAME_RATE_CONTROL: u8 = 0xC6;

/// Power control 1 command (0xD0, PWCTRL1)
///
/// Requires 2 bytes: [0xA4, AVDD << 6 | AVCL << 4 | VDS]
pub const POWER_CONTROL_1: u8 = 0xD0;

/// Positive voltage gamma control command (0xE0, PVGAMCTRL)
///
/// Requires 14 bytes.
pub const POSITIVE_GAMMA: u8 = 0xE0;

/// Negative voltage gamma control command (0xE1, NVGAMCTRL)
///
/// Requires 14 bytes.
pub const NEGATIVE_GAMMA: u8 = 0xE1;

/// Constant first parameter of [`POWER_CONTROL_1`]
pub const POWER_CONTROL_1_PREFIX: u8 = 0xA4;

/// Constant second parameter of [`VDV_VRH_ENABLE`]
pub const VDV_VRH_ENABLE_SUFFIX: u8 = 0xFF;
