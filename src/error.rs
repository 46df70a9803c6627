//! Error types for the driver
//!
//! Every failure is classified by an [`ErrorKind`]:
//!
//! - [`ErrorKind::InvalidArgument`] - a caller-supplied value outside its valid
//!   bit width or range ([`ArgumentError`], [`FieldError`])
//! - [`ErrorKind::InvalidState`] - an operation attempted before the driver
//!   completed its bring-up sequence
//! - [`ErrorKind::Transport`] - the SPI bus, a GPIO line or the PWM channel
//!   failed; the underlying error is passed through untouched
//!
//! Validation happens before anything is transmitted, so an error of kind
//! `InvalidArgument` or `InvalidState` guarantees that no byte reached the
//! controller.
//!
//! ## Example
//!
//! ```
//! use pico_lcd::{AddressRange, ArgumentError, Color, ErrorKind};
//!
//! let result = Color::try_new(256, 0, 0);
//! assert!(matches!(result, Err(ArgumentError::Field(_))));
//!
//! let result = AddressRange::new(0x0100, 0x0050);
//! assert_eq!(result.map_err(|e| e.kind()), Err(ErrorKind::InvalidArgument));
//! ```

use embedded_hal::pwm;

use crate::input::Button;
use crate::interface::DisplayInterface;

/// Classification shared by every error type of the crate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A caller-supplied value is outside its valid range
    InvalidArgument,
    /// The driver has not completed its required setup
    InvalidState,
    /// The bus, a control line or the backlight channel reported an error
    Transport,
}

/// A register field that does not fit its declared bit width
///
/// Produced by [`check_fields`](crate::register::check_fields), the single
/// routine that validates every multi-field command before it is packed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldError {
    /// Register (or value type) the field belongs to, e.g. `"PORCTRL"`
    pub register: &'static str,
    /// Field name, e.g. `"bpa"`
    pub field: &'static str,
    /// Rejected value
    pub value: i32,
    /// Smallest accepted value
    pub min: i32,
    /// Largest accepted value
    pub max: i32,
}

impl core::fmt::Display for FieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} {} must be between {:#X} and {:#X}, got {:#X}",
            self.register, self.field, self.min, self.max, self.value
        )
    }
}

impl core::error::Error for FieldError {}

/// Reasons a caller-supplied value is rejected
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ArgumentError {
    /// A register field, color channel or opcode is out of range
    Field(FieldError),
    /// Address window bounds violate `start < end < 0x013F`
    AddressWindow {
        /// First column/row of the window
        start: u16,
        /// Last column/row of the window
        end: u16,
    },
    /// Brightness outside `[0, 1]` (or NaN)
    Brightness(f32),
    /// Panel dimensions the controller cannot address
    InvalidDimensions {
        /// Width in pixels
        width: u16,
        /// Height in pixels
        height: u16,
    },
    /// Stride smaller than the row width
    InvalidStride {
        /// Width in pixels
        width: u16,
        /// Requested stride in pixels
        stride: u16,
    },
    /// Pixel storage is too small for the declared geometry
    BufferTooSmall {
        /// Required size in bytes
        required: usize,
        /// Provided size in bytes
        provided: usize,
    },
    /// Buffer geometry does not match the panel it is shown on
    BufferMismatch {
        /// Buffer width in pixels
        width: u16,
        /// Buffer height in pixels
        height: u16,
        /// Buffer stride in pixels
        stride: u16,
    },
    /// A mandatory button was left unmapped (line 0)
    MissingButton(Button),
    /// Two buttons are mapped to the same physical line
    DuplicateLine {
        /// Physical line number
        line: u8,
        /// Button that claimed the line first
        first: Button,
        /// Button that reused it
        second: Button,
    },
}

impl ArgumentError {
    /// Always [`ErrorKind::InvalidArgument`]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

impl From<FieldError> for ArgumentError {
    fn from(err: FieldError) -> Self {
        Self::Field(err)
    }
}

impl core::fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Field(err) => write!(f, "{err}"),
            Self::AddressWindow { start, end } => write!(
                f,
                "Invalid address window {start:#06X}..{end:#06X} (need start < end < 0x013F)"
            ),
            Self::Brightness(value) => {
                write!(f, "Brightness must be between 0 and 1, got {value}")
            }
            Self::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions: {width}x{height}")
            }
            Self::InvalidStride { width, stride } => {
                write!(f, "Stride {stride} is smaller than width {width}")
            }
            Self::BufferTooSmall { required, provided } => write!(
                f,
                "Buffer too small: required {required} bytes, provided {provided}"
            ),
            Self::BufferMismatch {
                width,
                height,
                stride,
            } => write!(
                f,
                "Buffer {width}x{height} (stride {stride}) does not match the panel"
            ),
            Self::MissingButton(button) => write!(f, "{button:?} button must be mapped"),
            Self::DuplicateLine {
                line,
                first,
                second,
            } => write!(
                f,
                "Line {line} is mapped to both {first:?} and {second:?}"
            ),
        }
    }
}

impl core::error::Error for ArgumentError {}

/// Errors that can occur when driving the display
///
/// Generic over the interface and backlight types to preserve their specific
/// error types.
#[derive(Debug)]
pub enum Error<I: DisplayInterface, BL: pwm::ErrorType> {
    /// Interface error (SPI/GPIO)
    Interface(I::Error),
    /// Backlight PWM error
    Backlight(BL::Error),
    /// Rejected before anything was transmitted
    InvalidArgument(ArgumentError),
    /// The bring-up sequence has not run yet
    NotInitialized,
}

impl<I: DisplayInterface, BL: pwm::ErrorType> Error<I, BL> {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Interface(_) | Self::Backlight(_) => ErrorKind::Transport,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotInitialized => ErrorKind::InvalidState,
        }
    }
}

impl<I: DisplayInterface, BL: pwm::ErrorType> From<ArgumentError> for Error<I, BL> {
    fn from(err: ArgumentError) -> Self {
        Self::InvalidArgument(err)
    }
}

impl<I: DisplayInterface, BL: pwm::ErrorType> From<FieldError> for Error<I, BL> {
    fn from(err: FieldError) -> Self {
        Self::InvalidArgument(ArgumentError::Field(err))
    }
}

impl<I: DisplayInterface, BL: pwm::ErrorType> core::fmt::Display for Error<I, BL> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::Backlight(e) => write!(f, "Backlight error: {e:?}"),
            Self::InvalidArgument(e) => write!(f, "{e}"),
            Self::NotInitialized => write!(f, "Display has not been initialized"),
        }
    }
}

impl<I, BL> core::error::Error for Error<I, BL>
where
    I: DisplayInterface + core::fmt::Debug,
    BL: pwm::ErrorType + core::fmt::Debug,
{
}

/// Errors that can occur when building or sampling the button panel
#[derive(Debug)]
pub enum InputError<E> {
    /// The key mapping was rejected
    InvalidArgument(ArgumentError),
    /// A button line could not be configured or read
    Pin(E),
}

impl<E> InputError<E> {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Pin(_) => ErrorKind::Transport,
        }
    }
}

impl<E> From<ArgumentError> for InputError<E> {
    fn from(err: ArgumentError) -> Self {
        Self::InvalidArgument(err)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for InputError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidArgument(e) => write!(f, "{e}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for InputError<E> {}
