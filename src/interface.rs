//! ST7789 serial wire protocol
//!
//! [`DisplayInterface`] is the byte-level seam between [`Display`](crate::Display)
//! and the hardware; [`Interface`] implements it on top of embedded-hal.
//!
//! ## Wiring
//!
//! The Pico-LCD-1.3 is write-only 4-wire SPI:
//! - SCK and MOSI on a raw [`SpiBus`]
//! - **CS** selects the controller while low
//! - **DC** is low for an opcode, high for its parameters
//! - **RST** resets the controller while low
//!
//! CS is toggled here instead of through an [`SpiDevice`](embedded_hal::spi::SpiDevice):
//! the controller samples DC on the CS edge, so the opcode and the parameter
//! bytes go out under separate CS pulses.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::SpiBus;
//! use pico_lcd::{DisplayInterface, Interface};
//! # use core::convert::Infallible;
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
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! // spi, cs, dc, rst
//! let mut iface = Interface::new(MockSpi, MockPin, MockPin, MockPin);
//! let _ = iface.reset(&mut delay, 10, 120);
//!
//! // MADCTL: row/column exchange for the 240x240 module
//! let _ = iface.send_command(0x36);
//! let _ = iface.send_data(&[0x70]);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

type WireResult<E> = core::result::Result<(), E>;

/// Byte transport to an ST7789
///
/// [`Interface`] covers blocking SPI. Implement this directly to drive the
/// panel through DMA or a parallel 8080 bus.
pub trait DisplayInterface {
    /// Transport failure
    type Error: Debug;

    /// Transmit one opcode in command mode
    ///
    /// Sequence: CS high, DC low, CS low, opcode, CS high after the bus drains.
    fn send_command(&mut self, opcode: u8) -> WireResult<Self::Error>;

    /// Transmit parameter or pixel bytes in data mode
    ///
    /// Sequence: CS high, DC high, CS low, bytes, CS high after the bus drains.
    fn send_data(&mut self, bytes: &[u8]) -> WireResult<Self::Error>;

    /// Pulse the reset line
    ///
    /// Drives RST high, holds it low for `pulse_us` microseconds, releases
    /// it, then waits `settle_ms` milliseconds for the controller to finish
    /// its reset.
    ///
    /// # Errors
    ///
    /// Returns an error if the reset line cannot be driven.
    fn reset<D: DelayNs>(
        &mut self,
        delay: &mut D,
        pulse_us: u32,
        settle_ms: u32,
    ) -> WireResult<Self::Error>;
}

/// Transport failure raised by [`Interface`]
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// The SPI bus failed to write or flush
    Spi(SpiErr),
    /// CS, DC or RST could not be driven
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI bus failure: {e:?}"),
            Self::Pin(e) => write!(f, "Control line failure: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Blocking SPI transport with manually driven CS, DC and RST
///
/// The three control lines must share one GPIO error type.
pub struct Interface<SPI, CS, DC, RST> {
    spi: SPI,
    /// Low while the controller is selected
    cs: CS,
    /// Low for opcodes, high for parameters
    dc: DC,
    /// Low holds the controller in reset
    rst: RST,
}

impl<SPI, CS, DC, RST> Interface<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Take ownership of the bus and the three control lines
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST) -> Self {
        Self { spi, cs, dc, rst }
    }

    /// Give back the bus and the control lines
    pub fn release(self) -> (SPI, CS, DC, RST) {
        (self.spi, self.cs, self.dc, self.rst)
    }
}

impl<SPI, CS, DC, RST, PinErr> Interface<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
{
    /// One CS-bracketed transfer with DC at the given level
    fn transfer(
        &mut self,
        data_mode: bool,
        bytes: &[u8],
    ) -> WireResult<InterfaceError<SPI::Error, PinErr>> {
        self.cs.set_high().map_err(InterfaceError::Pin)?;
        if data_mode {
            self.dc.set_high().map_err(InterfaceError::Pin)?;
        } else {
            self.dc.set_low().map_err(InterfaceError::Pin)?;
        }
        self.cs.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(bytes).map_err(InterfaceError::Spi)?;
        self.spi.flush().map_err(InterfaceError::Spi)?;
        self.cs.set_high().map_err(InterfaceError::Pin)?;
        Ok(())
    }
}

impl<SPI, CS, DC, RST, PinErr> DisplayInterface for Interface<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    SPI::Error: Debug,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, opcode: u8) -> WireResult<Self::Error> {
        self.transfer(false, &[opcode])
    }

    fn send_data(&mut self, bytes: &[u8]) -> WireResult<Self::Error> {
        self.transfer(true, bytes)
    }

    fn reset<D: DelayNs>(
        &mut self,
        delay: &mut D,
        pulse_us: u32,
        settle_ms: u32,
    ) -> WireResult<Self::Error> {
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_us(pulse_us);
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(settle_ms);
        Ok(())
    }
}
