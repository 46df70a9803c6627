//! Color types and colorspace conversion
//!
//! [`Color`] holds a 24-bit RGB value. [`Rgb565`] is the same value viewed
//! through the panel's 16-bit 5-6-5 encoding, which is what the ST7789 expects
//! on a memory write when it is configured for [`ColorSpace::Rgb565`].
//!
//! ## Encodings
//!
//! | Type | `to_int()` |
//! |------|------------|
//! | [`Color`] | `red \| green << 8 \| blue << 16` |
//! | [`Rgb565`] | `(red & 0xF8) << 8 \| (green & 0xFC) << 3 \| blue >> 3` |
//!
//! The 5-6-5 conversion truncates, it does not round.
//!
//! ## Example
//!
//! ```
//! use pico_lcd::{Color, PixelValue, Rgb565};
//!
//! assert_eq!(Color::new(0x12, 0x34, 0x56).to_int(), 0x56_34_12);
//! assert_eq!(Rgb565::new(255, 255, 255).to_int(), 0xFFFF);
//! assert_eq!(Rgb565::new(0, 0, 0).to_int(), 0);
//! ```

use crate::error::{ArgumentError, FieldError};

/// Conversion of a color to the integer written into a pixel buffer
pub trait PixelValue: Copy + From<Color> {
    /// Pixel value for this color
    fn to_int(self) -> u32;
}

/// Pixel encodings supported by the controller
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorSpace {
    /// 16 bits per pixel, 5-6-5
    #[default]
    Rgb565,
}

impl ColorSpace {
    /// Bytes used by one pixel in a frame buffer
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb565 => 2,
        }
    }

    /// COLMOD parameter selecting this encoding on the SPI interface
    pub fn colmod(self) -> u8 {
        match self {
            Self::Rgb565 => 0x05,
        }
    }
}

/// 24-bit RGB color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    /// Create a color from 8-bit channels
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Create a color from unchecked integer channels
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Field`] naming the first channel outside `0..=255`.
    pub fn try_new(red: i32, green: i32, blue: i32) -> Result<Self, ArgumentError> {
        Ok(Self::new(
            channel("red", red)?,
            channel("green", green)?,
            channel("blue", blue)?,
        ))
    }

    /// Red channel
    pub const fn red(self) -> u8 {
        self.red
    }

    /// Green channel
    pub const fn green(self) -> u8 {
        self.green
    }

    /// Blue channel
    pub const fn blue(self) -> u8 {
        self.blue
    }
}

impl PixelValue for Color {
    fn to_int(self) -> u32 {
        self.red as u32 | (self.green as u32) << 8 | (self.blue as u32) << 16
    }
}

impl TryFrom<(i32, i32, i32)> for Color {
    type Error = ArgumentError;

    fn try_from((red, green, blue): (i32, i32, i32)) -> Result<Self, Self::Error> {
        Self::try_new(red, green, blue)
    }
}

fn channel(name: &'static str, value: i32) -> Result<u8, FieldError> {
    u8::try_from(value).map_err(|_| FieldError {
        register: "Color",
        field: name,
        value,
        min: 0,
        max: 0xFF,
    })
}

/// A color encoded for the panel's 16-bit 5-6-5 pixel format
///
/// This is the color type drivers configured for [`ColorSpace::Rgb565`]
/// expect; construct application colors through it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb565(Color);

impl Rgb565 {
    /// Create a color from 8-bit channels
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Color::new(red, green, blue))
    }

    /// Create a color from unchecked integer channels
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Field`] naming the first channel outside `0..=255`.
    pub fn try_new(red: i32, green: i32, blue: i32) -> Result<Self, ArgumentError> {
        Color::try_new(red, green, blue).map(Self)
    }

    /// The 24-bit color this value was built from
    pub const fn color(self) -> Color {
        self.0
    }

    /// Packed 16-bit pixel value
    pub const fn to_u16(self) -> u16 {
        let Color { red, green, blue } = self.0;
        ((red as u16 & 0xF8) << 8) | ((green as u16 & 0xFC) << 3) | (blue as u16 >> 3)
    }
}

impl PixelValue for Rgb565 {
    fn to_int(self) -> u32 {
        self.to_u16() as u32
    }
}

impl From<Color> for Rgb565 {
    fn from(color: Color) -> Self {
        Self(color)
    }
}

impl TryFrom<(i32, i32, i32)> for Rgb565 {
    type Error = ArgumentError;

    fn try_from((red, green, blue): (i32, i32, i32)) -> Result<Self, Self::Error> {
        Self::try_new(red, green, blue)
    }
}

#[cfg(feature = "graphics")]
impl From<Rgb565> for embedded_graphics_core::pixelcolor::Rgb565 {
    fn from(color: Rgb565) -> Self {
        let Color { red, green, blue } = color.0;
        Self::new(red >> 3, green >> 2, blue >> 3)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_encoding_all_channels() {
        for value in [0u8, 1, 0x7F, 0x80, 0xFE, 0xFF] {
            let color = Color::new(value, 0, 0);
            assert_eq!(color.to_int(), value as u32);
            let color = Color::new(0, value, 0);
            assert_eq!(color.to_int(), (value as u32) << 8);
            let color = Color::new(0, 0, value);
            assert_eq!(color.to_int(), (value as u32) << 16);
        }
        assert_eq!(Color::new(0x12, 0x34, 0x56).to_int(), 0x0056_3412);
    }

    #[test]
    fn test_rgb565_matches_bit_formula() {
        for r in (0..=255u32).step_by(7) {
            for g in (0..=255u32).step_by(11) {
                for b in (0..=255u32).step_by(13) {
                    let expected = ((r & 0xF8) << 8) | ((g & 0xFC) << 3) | (b >> 3);
                    let color = Rgb565::new(r as u8, g as u8, b as u8);
                    assert_eq!(color.to_int(), expected, "({r}, {g}, {b})");
                }
            }
        }
    }

    #[test]
    fn test_rgb565_extremes() {
        assert_eq!(Rgb565::new(255, 255, 255).to_int(), 0xFFFF);
        assert_eq!(Rgb565::new(0, 0, 0).to_int(), 0);
        assert_eq!(Rgb565::new(255, 0, 0).to_int(), 0xF800);
        assert_eq!(Rgb565::new(0, 255, 0).to_int(), 0x07E0);
        assert_eq!(Rgb565::new(0, 0, 255).to_int(), 0x001F);
    }

    #[test]
    fn test_rgb565_truncates() {
        // 0x07 is below the 5-bit step, a rounding encoder would produce 1
        assert_eq!(Rgb565::new(0x07, 0x03, 0x07).to_int(), 0);
    }

    #[test]
    fn test_try_new_rejects_out_of_range_channels() {
        let err = Color::try_new(256, 0, 0).unwrap_err();
        assert!(matches!(
            err,
            ArgumentError::Field(FieldError {
                field: "red",
                value: 256,
                ..
            })
        ));
        assert!(Color::try_new(0, -1, 0).is_err());
        assert!(Rgb565::try_new(0, 0, 256).is_err());
        assert!(Rgb565::try_from((-1, 0, 0)).is_err());
    }

    #[test]
    fn test_try_new_accepts_bounds() {
        assert_eq!(Color::try_new(0, 0, 0).unwrap(), Color::new(0, 0, 0));
        assert_eq!(
            Rgb565::try_new(255, 255, 255).unwrap(),
            Rgb565::new(255, 255, 255)
        );
    }

    #[test]
    fn test_rgb565_keeps_source_channels() {
        let color = Rgb565::from(Color::new(1, 2, 3));
        assert_eq!(color.color().red(), 1);
        assert_eq!(color.color().green(), 2);
        assert_eq!(color.color().blue(), 3);
    }

    #[test]
    fn test_color_space_layout() {
        assert_eq!(ColorSpace::Rgb565.bytes_per_pixel(), 2);
        assert_eq!(ColorSpace::Rgb565.colmod(), 0x05);
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn test_graphics_conversion_matches_encoding() {
        use embedded_graphics_core::pixelcolor::IntoStorage;

        let color = Rgb565::new(0xAB, 0xCD, 0xEF);
        let converted: embedded_graphics_core::pixelcolor::Rgb565 = color.into();
        assert_eq!(converted.into_storage(), color.to_u16());
    }
}
