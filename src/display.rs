//! Core display operations
//!
//! [`Display`] owns the [`DisplayInterface`] and the backlight PWM channel and
//! drives the ST7789 through its power states:
//!
//! ```text
//! Uninitialized --init()--> Awake --sleep()--> Asleep --wake()--> Awake
//! ```
//!
//! Every value is validated before the first byte of the affected command is
//! transmitted; a rejected call leaves the bus untouched.

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;
use log::{debug, trace};

use crate::buffer::PixelBuffer;
use crate::color::ColorSpace;
use crate::command::{
    COLUMN_ADDRESS_SET, DISPLAY_OFF, DISPLAY_ON, INVERSION_OFF, INVERSION_ON, MEMORY_WRITE,
    ROW_ADDRESS_SET, SLEEP_IN, SLEEP_OUT,
};
use crate::config::{Config, Dimensions};
use crate::error::{ArgumentError, Error, FieldError};
use crate::interface::DisplayInterface;
use crate::register::Register;

type DisplayResult<I, BL, T = ()> = core::result::Result<T, Error<I, BL>>;

/// Exclusive upper bound of a column or row address
pub const MAX_ADDRESS: u16 = 0x013F;

/// Validated start/end pair for CASET and RASET
///
/// Both bounds are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressRange {
    start: u16,
    end: u16,
}

impl AddressRange {
    /// Create a range covering `start..=end`
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::AddressWindow` unless `start < end < 0x013F`.
    pub fn new(start: u16, end: u16) -> Result<Self, ArgumentError> {
        if start >= end || end >= MAX_ADDRESS {
            return Err(ArgumentError::AddressWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// First address
    pub fn start(&self) -> u16 {
        self.start
    }

    /// Last address
    pub fn end(&self) -> u16 {
        self.end
    }

    /// Number of addresses covered
    pub fn len(&self) -> u16 {
        self.end - self.start + 1
    }

    /// Always false, a range spans at least two addresses
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Parameter bytes: start MSB, start LSB, end MSB, end LSB
    pub fn to_bytes(self) -> [u8; 4] {
        let [sh, sl] = self.start.to_be_bytes();
        let [eh, el] = self.end.to_be_bytes();
        [sh, sl, eh, el]
    }
}

/// Power state of the controller as last commanded
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PowerState {
    /// Bring-up has not run
    #[default]
    Uninitialized,
    /// Panel on, backlight at the stored duty
    Awake,
    /// Panel off and in sleep mode, backlight at zero
    Asleep,
}

/// Core display driver for the ST7789
///
/// ## Type Parameters
///
/// * `I` - Interface type implementing [`DisplayInterface`]
/// * `BL` - Backlight PWM channel implementing [`SetDutyCycle`]
pub struct Display<I, BL>
where
    I: DisplayInterface,
    BL: SetDutyCycle,
{
    /// Hardware interface
    interface: I,
    /// Backlight PWM channel
    backlight: BL,
    /// Display configuration
    config: Config,
    /// Last commanded power state
    power_state: PowerState,
    /// Stored backlight duty, re-applied on wake
    brightness_duty: u16,
}

impl<I, BL> Display<I, BL>
where
    I: DisplayInterface,
    BL: SetDutyCycle,
{
    /// Create a new Display instance
    ///
    /// Nothing is transmitted; call [`init`](Self::init) before showing frames.
    pub fn new(interface: I, backlight: BL, config: Config) -> Self {
        let brightness_duty = config.initial_brightness;
        Self {
            interface,
            backlight,
            config,
            power_state: PowerState::Uninitialized,
            brightness_duty,
        }
    }

    /// Create a Display and run the bring-up sequence
    pub fn start<D: DelayNs>(
        interface: I,
        backlight: BL,
        config: Config,
        delay: &mut D,
    ) -> DisplayResult<I, BL, Self> {
        let mut display = Self::new(interface, backlight, config);
        display.init(delay)?;
        Ok(display)
    }

    /// Reset the controller and run the bring-up sequence
    ///
    /// Registers are written in datasheet order: MADCTL, COLMOD, PORCTRL,
    /// GCTRL, VCOMS, LCMCTRL, VDVVRHEN, VRHS, VDVS, FRCTRL2, PWCTRL1,
    /// PVGAMCTRL, NVGAMCTRL, INVON, SLPOUT, DISPON. The backlight is then set
    /// to the configured initial duty, replacing any duty stored by an
    /// earlier [`dim`](Self::dim).
    ///
    /// May be called again to recover a panel in an unknown state.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I, BL> {
        self.config.validate()?;
        let config = self.config.clone();

        self.interface
            .reset(delay, config.reset_pulse_us, config.reset_settle_ms)
            .map_err(Error::Interface)?;

        self.write_register(&config.memory_access)?;
        self.write_register(&config.color_space)?;
        self.write_register(&config.porch)?;
        self.write_register(&config.gate)?;
        self.write_register(&config.vcom)?;
        self.write_register(&config.lcm_control)?;
        self.write_register(&config.vdv_vrh_enable)?;
        self.write_register(&config.vrh)?;
        self.write_register(&config.vdv)?;
        self.write_register(&config.frame_rate)?;
        self.write_register(&config.power)?;
        self.write_register(&config.positive_gamma)?;
        self.write_register(&config.negative_gamma)?;

        if config.inversion {
            self.command(INVERSION_ON, &[])?;
        } else {
            self.command(INVERSION_OFF, &[])?;
        }

        self.command(SLEEP_OUT, &[])?;
        delay.delay_ms(config.reset_settle_ms);
        self.command(DISPLAY_ON, &[])?;

        self.brightness_duty = config.initial_brightness;
        self.apply_duty(self.brightness_duty)?;
        self.power_state = PowerState::Awake;
        debug!(
            "ST7789 ready: {}x{}, duty {}",
            config.dimensions.width, config.dimensions.height, self.brightness_duty
        );
        Ok(())
    }

    /// Send a command with optional parameter bytes
    ///
    /// An empty `data` slice sends the opcode alone.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::Field` without transmitting anything if
    /// `opcode` does not fit in one byte.
    pub fn send_command(&mut self, opcode: u16, data: &[u8]) -> DisplayResult<I, BL> {
        let opcode = u8::try_from(opcode).map_err(|_| FieldError {
            register: "command",
            field: "opcode",
            value: opcode as i32,
            min: 0,
            max: 0xFF,
        })?;
        self.command(opcode, data)
    }

    /// Validate and write one register
    pub fn write_register<R: Register>(&mut self, register: &R) -> DisplayResult<I, BL> {
        let payload = register.encode()?;
        trace!("{} <- {:02X?}", R::NAME, payload.as_ref());
        self.command(R::OPCODE, payload.as_ref())
    }

    /// Set the address window filled by the next memory write
    pub fn set_address_window(
        &mut self,
        columns: AddressRange,
        rows: AddressRange,
    ) -> DisplayResult<I, BL> {
        trace!(
            "window x {}..={} y {}..={}",
            columns.start(),
            columns.end(),
            rows.start(),
            rows.end()
        );
        self.command(COLUMN_ADDRESS_SET, &columns.to_bytes())?;
        self.command(ROW_ADDRESS_SET, &rows.to_bytes())
    }

    /// Write raw pixel bytes into the current address window
    pub fn write_memory(&mut self, pixels: &[u8]) -> DisplayResult<I, BL> {
        self.command(MEMORY_WRITE, pixels)
    }

    /// Allocate a zeroed frame buffer matching the panel
    #[cfg(feature = "alloc")]
    pub fn make_frame_buffer(&self) -> PixelBuffer<alloc::vec::Vec<u8>> {
        let Dimensions { width, height } = self.config.dimensions;
        PixelBuffer::zeroed(width, height, self.config.color_space)
    }

    /// Transfer a full frame to the panel
    ///
    /// Writes are not gated on the power state: while asleep the controller
    /// accepts and ignores them.
    ///
    /// # Errors
    ///
    /// - `Error::NotInitialized` before [`init`](Self::init)
    /// - `ArgumentError::BufferMismatch` if the buffer is not a tightly packed
    ///   frame of the panel's size and color space
    pub fn show<B: AsRef<[u8]>>(&mut self, buffer: &PixelBuffer<B>) -> DisplayResult<I, BL> {
        self.ensure_initialized()?;
        let Dimensions { width, height } = self.config.dimensions;
        if buffer.width() != width
            || buffer.height() != height
            || buffer.stride() != width
            || buffer.format() != self.config.color_space
        {
            return Err(ArgumentError::BufferMismatch {
                width: buffer.width(),
                height: buffer.height(),
                stride: buffer.stride(),
            }
            .into());
        }
        let last = |len: u16| {
            len.checked_sub(1)
                .ok_or(ArgumentError::InvalidDimensions { width, height })
        };
        let columns = AddressRange::new(0, last(width)?)?;
        let rows = AddressRange::new(0, last(height)?)?;
        self.set_address_window(columns, rows)?;
        self.write_memory(buffer.as_bytes())
    }

    /// Turn the backlight off and put the controller to sleep
    ///
    /// The backlight reaches zero before the panel is switched off so no
    /// flash is visible. The stored duty is kept for [`wake`](Self::wake).
    pub fn sleep(&mut self) -> DisplayResult<I, BL> {
        self.ensure_initialized()?;
        self.apply_duty(0)?;
        self.command(DISPLAY_OFF, &[])?;
        self.command(SLEEP_IN, &[])?;
        self.power_state = PowerState::Asleep;
        debug!("ST7789 asleep");
        Ok(())
    }

    /// Leave sleep mode and restore the stored backlight duty
    pub fn wake(&mut self) -> DisplayResult<I, BL> {
        self.ensure_initialized()?;
        self.command(SLEEP_OUT, &[])?;
        self.command(DISPLAY_ON, &[])?;
        self.dim(None)?;
        self.power_state = PowerState::Awake;
        debug!("ST7789 awake, duty {}", self.brightness_duty);
        Ok(())
    }

    /// Set the backlight brightness
    ///
    /// `Some(fraction)` stores `round(fraction * 65535)` as the new duty;
    /// `None` keeps the stored duty. Either way the stored duty is then
    /// written to the PWM channel.
    ///
    /// Not gated on the power state. A duty set before [`init`](Self::init)
    /// lasts only until bring-up, which restores `Config::initial_brightness`.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::Brightness` if the fraction is outside
    /// `0.0..=1.0` or NaN.
    pub fn dim(&mut self, brightness: Option<f32>) -> DisplayResult<I, BL> {
        if let Some(fraction) = brightness {
            if !(0.0..=1.0).contains(&fraction) {
                return Err(ArgumentError::Brightness(fraction).into());
            }
            self.brightness_duty = (fraction * f32::from(u16::MAX) + 0.5) as u16;
        }
        self.apply_duty(self.brightness_duty)
    }

    /// Panel dimensions
    pub fn dimensions(&self) -> Dimensions {
        self.config.dimensions
    }

    /// Active pixel encoding
    pub fn color_space(&self) -> ColorSpace {
        self.config.color_space
    }

    /// Last commanded power state
    pub fn power_state(&self) -> PowerState {
        self.power_state
    }

    /// Stored backlight duty, 0 to 65535
    pub fn brightness_duty(&self) -> u16 {
        self.brightness_duty
    }

    /// Display configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Release the interface and backlight channel
    pub fn release(self) -> (I, BL) {
        (self.interface, self.backlight)
    }

    fn ensure_initialized(&self) -> DisplayResult<I, BL> {
        if self.power_state == PowerState::Uninitialized {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }

    fn apply_duty(&mut self, duty: u16) -> DisplayResult<I, BL> {
        self.backlight
            .set_duty_cycle_fraction(duty, u16::MAX)
            .map_err(Error::Backlight)
    }

    fn command(&mut self, opcode: u8, data: &[u8]) -> DisplayResult<I, BL> {
        trace!("command 0x{:02X}, {} bytes", opcode, data.len());
        self.interface
            .send_command(opcode)
            .map_err(Error::Interface)?;
        if !data.is_empty() {
            self.interface.send_data(data).map_err(Error::Interface)?;
        }
        Ok(())
    }
}
