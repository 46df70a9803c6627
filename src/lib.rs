//! Waveshare Pico-LCD-1.3 Driver
//!
//! A driver for the 240x240 ST7789 panel and the ten-button input block of the
//! Waveshare Pico-LCD-1.3 module.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support (SPI bus, GPIO, PWM backlight)
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Typed, range-checked controller registers
//! - Sleep, wake and backlight dimming
//! - Polling button sampler with validated pin mapping
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::pwm::SetDutyCycle;
//! use embedded_hal::spi::SpiBus;
//! use pico_lcd::{Builder, Display, Interface, Rgb565};
//!
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
//! # struct MockPwm;
//! # impl embedded_hal::pwm::ErrorType for MockPwm { type Error = Infallible; }
//! # impl SetDutyCycle for MockPwm {
//! #     fn max_duty_cycle(&self) -> u16 { u16::MAX }
//! #     fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let (spi, cs, dc, rst, backlight) = (MockSpi, MockPin, MockPin, MockPin, MockPwm);
//! # let mut delay = MockDelay;
//! let interface = Interface::new(spi, cs, dc, rst);
//! let config = match Builder::new().initial_brightness(0x8000).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = match Display::start(interface, backlight, config, &mut delay) {
//!     Ok(display) => display,
//!     Err(_) => return,
//! };
//!
//! let mut frame = display.make_frame_buffer();
//! frame.fill(Rgb565::new(0, 0, 255).to_u16());
//! let _ = display.show(&frame);
//!
//! let _ = display.sleep();
//! let _ = display.wake();
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Application contract
pub mod app;
/// Pico-LCD-1.3 board constants
pub mod board;
/// Pixel buffers
pub mod buffer;
/// Color types and colorspace conversion
pub mod color;
/// ST7789 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Button input sampler
pub mod input;
/// Hardware interface abstraction
pub mod interface;
/// Typed controller registers
pub mod register;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use app::{Application, ApplicationReturn, LcdDriver, ReturnCode};
pub use buffer::PixelBuffer;
pub use color::{Color, ColorSpace, PixelValue, Rgb565};
pub use config::{Builder, Config, Dimensions};
pub use display::{AddressRange, Display, MAX_ADDRESS, PowerState};
pub use error::{ArgumentError, Error, ErrorKind, FieldError, InputError};
pub use input::{Button, Controller, KeyMapping, KeyStatus, LogicalPin, PinFactory, PinInput};
pub use interface::{DisplayInterface, Interface, InterfaceError};
