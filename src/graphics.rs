//! Graphics support via embedded-graphics
//!
//! [`PixelBuffer`] implements [`DrawTarget`] and [`OriginDimensions`] from the
//! embedded-graphics ecosystem, drawing straight into its byte storage so a
//! finished frame can be handed to [`Display::show`](crate::Display::show)
//! without copying.
//!
//! Drawing outside the buffer is clipped silently.
//!
//! ## Example
//!
//! ```rust
//! use embedded_graphics::{
//!     pixelcolor::Rgb565,
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//! };
//! use pico_lcd::{ColorSpace, PixelBuffer};
//!
//! let mut buffer = match PixelBuffer::new(vec![0u8; 240 * 240 * 2], 240, 240, ColorSpace::Rgb565, None) {
//!     Ok(buffer) => buffer,
//!     Err(_) => return,
//! };
//!
//! let _ = buffer.clear(Rgb565::BLACK);
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
//!     .draw(&mut buffer);
//!
//! assert_eq!(buffer.pixel(10, 10), Some(0xF800));
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::{IntoStorage, Rgb565},
    prelude::Pixel,
};

use crate::buffer::PixelBuffer;

impl<B> DrawTarget for PixelBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
                continue;
            };
            self.set_pixel(x, y, color.into_storage());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.into_storage());
        Ok(())
    }
}

impl<B: AsRef<[u8]>> OriginDimensions for PixelBuffer<B> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width()), u32::from(self.height()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::color::ColorSpace;
    use alloc::vec;
    use alloc::vec::Vec;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

    fn buffer(width: u16, height: u16) -> PixelBuffer<Vec<u8>> {
        let storage = vec![0u8; width as usize * height as usize * 2];
        PixelBuffer::new(storage, width, height, ColorSpace::Rgb565, None).unwrap()
    }

    #[test]
    fn test_size_matches_buffer() {
        assert_eq!(buffer(240, 135).size(), Size::new(240, 135));
    }

    #[test]
    fn test_rectangle_fill() {
        let mut target = buffer(8, 8);
        Rectangle::new(Point::new(2, 3), Size::new(3, 2))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::GREEN))
            .draw(&mut target)
            .unwrap();

        for y in 0..8 {
            for x in 0..8 {
                let inside = (2..5).contains(&x) && (3..5).contains(&y);
                let expected = if inside { 0x07E0 } else { 0 };
                assert_eq!(target.pixel(x, y), Some(expected), "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_out_of_bounds_pixels_are_clipped() {
        let mut target = buffer(4, 4);
        Line::new(Point::new(-4, -4), Point::new(8, 8))
            .into_styled(PrimitiveStyle::with_stroke(Rgb565::WHITE, 1))
            .draw(&mut target)
            .unwrap();

        for i in 0..4 {
            assert_eq!(target.pixel(i, i), Some(0xFFFF));
        }
        assert_eq!(target.pixel(1, 0), Some(0));
    }

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut target = buffer(3, 3);
        target.clear(Rgb565::BLUE).unwrap();
        assert!(
            target
                .as_bytes()
                .chunks_exact(2)
                .all(|pixel| pixel == [0x00, 0x1F])
        );
    }

    #[test]
    fn test_driver_color_matches_graphics_color() {
        let mut target = buffer(1, 1);
        let color = crate::color::Rgb565::new(0x80, 0x40, 0x20);
        target
            .draw_iter([Pixel(Point::zero(), color.into())])
            .unwrap();
        assert_eq!(target.pixel(0, 0), Some(color.to_u16()));
    }
}
