//! Display configuration types and builder
//!
//! [`Config`] carries every value the bring-up sequence writes to the
//! controller. The [`Builder`] defaults are the values for the Waveshare
//! Pico-LCD-1.3 (240x240 IPS panel); override individual registers for
//! other ST7789 panels.

use crate::color::ColorSpace;
use crate::display::MAX_ADDRESS;
use crate::error::ArgumentError;
use crate::register::{
    FrameRateControl, GammaCurve, GateControl, LcmControl, MemoryAccessControl, NegativeGamma,
    PorchControl, PositiveGamma, PowerControl, Register, VdvSet, VdvVrhEnable, Vcom, VrhSet,
};

/// Display dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels (columns)
    pub width: u16,
    /// Height in pixels (rows)
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::InvalidDimensions` unless both axes span at
    /// least two pixels and fit an address window (`end < 0x013F`).
    pub fn new(width: u16, height: u16) -> Result<Self, ArgumentError> {
        let fits = |len: u16| (2..=MAX_ADDRESS).contains(&len);
        if !fits(width) || !fits(height) {
            return Err(ArgumentError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Calculate required frame buffer size in bytes
    pub fn buffer_size(&self, color_space: ColorSpace) -> usize {
        self.pixel_count() * color_space.bytes_per_pixel()
    }
}

/// Display configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Panel dimensions
    pub dimensions: Dimensions,
    /// Pixel encoding (COLMOD)
    pub color_space: ColorSpace,
    /// Scanning direction (MADCTL)
    pub memory_access: MemoryAccessControl,
    /// Porch timing (PORCTRL)
    pub porch: PorchControl,
    /// Gate voltages (GCTRL)
    pub gate: GateControl,
    /// VCOM voltage (VCOMS)
    pub vcom: Vcom,
    /// LCM control (LCMCTRL)
    pub lcm_control: LcmControl,
    /// VDV/VRH source select (VDVVRHEN)
    pub vdv_vrh_enable: VdvVrhEnable,
    /// VRH value (VRHS)
    pub vrh: VrhSet,
    /// VDV value (VDVS)
    pub vdv: VdvSet,
    /// Frame rate (FRCTRL2)
    pub frame_rate: FrameRateControl,
    /// Power control (PWCTRL1)
    pub power: PowerControl,
    /// Positive gamma curve (PVGAMCTRL)
    pub positive_gamma: PositiveGamma,
    /// Negative gamma curve (NVGAMCTRL)
    pub negative_gamma: NegativeGamma,
    /// Send INVON (true) or INVOFF (false)
    pub inversion: bool,
    /// Backlight duty applied once the panel is on, 0 to 65535
    pub initial_brightness: u16,
    /// Time the reset line is held low, in microseconds
    pub reset_pulse_us: u32,
    /// Time to wait after reset and after sleep out, in milliseconds
    pub reset_settle_ms: u32,
}

impl Config {
    /// Validate the dimensions and every register field
    ///
    /// # Errors
    ///
    /// - `ArgumentError::InvalidDimensions` if either axis is out of range
    /// - `ArgumentError::Field` naming the first register field out of range
    pub fn validate(&self) -> Result<(), ArgumentError> {
        let Dimensions { width, height } = self.dimensions;
        Dimensions::new(width, height)?;
        self.memory_access.encode()?;
        self.porch.encode()?;
        self.gate.encode()?;
        self.vcom.encode()?;
        self.lcm_control.encode()?;
        self.vdv_vrh_enable.encode()?;
        self.vrh.encode()?;
        self.vdv.encode()?;
        self.frame_rate.encode()?;
        self.power.encode()?;
        self.positive_gamma.encode()?;
        self.negative_gamma.encode()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Builder::new().config
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use pico_lcd::{Builder, Dimensions};
/// use pico_lcd::register::Vcom;
///
/// let dims = match Dimensions::new(240, 240) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).vcom(Vcom(0x20)).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
pub struct Builder {
    config: Config,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            config: Config {
                dimensions: Dimensions {
                    width: 240,
                    height: 240,
                },
                color_space: ColorSpace::Rgb565,
                memory_access: MemoryAccessControl::default(),
                porch: PorchControl::default(),
                gate: GateControl::default(),
                vcom: Vcom::default(),
                lcm_control: LcmControl::default(),
                vdv_vrh_enable: VdvVrhEnable::default(),
                vrh: VrhSet::default(),
                vdv: VdvSet::default(),
                frame_rate: FrameRateControl::default(),
                power: PowerControl::default(),
                positive_gamma: PositiveGamma::default(),
                negative_gamma: NegativeGamma::default(),
                inversion: true,
                initial_brightness: u16::MAX,
                reset_pulse_us: 10,
                reset_settle_ms: 120,
            },
        }
    }
}

impl Builder {
    /// Create a new Builder with the Pico-LCD-1.3 defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set panel dimensions
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.config.dimensions = dims;
        self
    }

    /// Set pixel encoding
    pub fn color_space(mut self, color_space: ColorSpace) -> Self {
        self.config.color_space = color_space;
        self
    }

    /// Set memory access control (scanning direction)
    pub fn memory_access(mut self, value: MemoryAccessControl) -> Self {
        self.config.memory_access = value;
        self
    }

    /// Set porch timing
    pub fn porch(mut self, value: PorchControl) -> Self {
        self.config.porch = value;
        self
    }

    /// Set gate voltages
    pub fn gate(mut self, value: GateControl) -> Self {
        self.config.gate = value;
        self
    }

    /// Set VCOM voltage
    pub fn vcom(mut self, value: Vcom) -> Self {
        self.config.vcom = value;
        self
    }

    /// Set LCM control
    pub fn lcm_control(mut self, value: LcmControl) -> Self {
        self.config.lcm_control = value;
        self
    }

    /// Select whether VDV/VRH come from commands or NVM
    pub fn vdv_vrh_enable(mut self, value: VdvVrhEnable) -> Self {
        self.config.vdv_vrh_enable = value;
        self
    }

    /// Set VRH value
    pub fn vrh(mut self, value: VrhSet) -> Self {
        self.config.vrh = value;
        self
    }

    /// Set VDV value
    pub fn vdv(mut self, value: VdvSet) -> Self {
        self.config.vdv = value;
        self
    }

    /// Set frame rate control
    pub fn frame_rate(mut self, value: FrameRateControl) -> Self {
        self.config.frame_rate = value;
        self
    }

    /// Set power control
    pub fn power(mut self, value: PowerControl) -> Self {
        self.config.power = value;
        self
    }

    /// Set both gamma curves
    pub fn gamma(mut self, positive: GammaCurve, negative: GammaCurve) -> Self {
        self.config.positive_gamma = PositiveGamma(positive);
        self.config.negative_gamma = NegativeGamma(negative);
        self
    }

    /// Enable or disable display inversion
    pub fn inversion(mut self, value: bool) -> Self {
        self.config.inversion = value;
        self
    }

    /// Set the backlight duty applied after bring-up
    pub fn initial_brightness(mut self, duty: u16) -> Self {
        self.config.initial_brightness = duty;
        self
    }

    /// Set reset timing
    pub fn reset_timing(mut self, pulse_us: u32, settle_ms: u32) -> Self {
        self.config.reset_pulse_us = pulse_us;
        self.config.reset_settle_ms = settle_ms;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::InvalidDimensions` for unusable dimensions, or
    /// `ArgumentError::Field` if any register field is out of range.
    pub fn build(self) -> Result<Config, ArgumentError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
