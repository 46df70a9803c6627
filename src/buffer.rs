//! Pixel buffer
//!
//! A [`PixelBuffer`] is a rectangle of pixels laid over caller-supplied byte
//! storage. The driver transfers [`PixelBuffer::as_bytes`] as-is on a memory
//! write, so pixels are kept in the order the controller consumes them:
//! row-major, big-endian 16-bit words.
//!
//! Rows may be padded: `stride` is the distance between two rows in pixels and
//! defaults to the width.
//!
//! ## Example
//!
//! ```
//! use pico_lcd::{ColorSpace, PixelBuffer, Rgb565};
//!
//! let mut storage = [0u8; 4 * 3 * 2];
//! let mut buffer = match PixelBuffer::new(&mut storage[..], 4, 3, ColorSpace::Rgb565, None) {
//!     Ok(buffer) => buffer,
//!     Err(_) => return,
//! };
//! buffer.set_pixel(1, 0, Rgb565::new(255, 0, 0).to_u16());
//! assert_eq!(&buffer.as_bytes()[2..4], &[0xF8, 0x00]);
//! ```

use crate::color::ColorSpace;
use crate::error::ArgumentError;

/// Pixel rectangle over owned or borrowed byte storage
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer<B> {
    storage: B,
    width: u16,
    height: u16,
    format: ColorSpace,
    stride: u16,
}

impl<B: AsRef<[u8]>> PixelBuffer<B> {
    /// Wrap `storage` as a `width` x `height` buffer
    ///
    /// `stride` defaults to `width`. Storage longer than required is
    /// accepted; the extra bytes are never transferred.
    ///
    /// # Errors
    ///
    /// - `ArgumentError::InvalidDimensions` if either axis is zero
    /// - `ArgumentError::InvalidStride` if `stride` is smaller than `width`
    /// - `ArgumentError::BufferTooSmall` if `storage` cannot hold
    ///   `stride * height` pixels
    pub fn new(
        storage: B,
        width: u16,
        height: u16,
        format: ColorSpace,
        stride: Option<u16>,
    ) -> Result<Self, ArgumentError> {
        if width == 0 || height == 0 {
            return Err(ArgumentError::InvalidDimensions { width, height });
        }
        let stride = stride.unwrap_or(width);
        if stride < width {
            return Err(ArgumentError::InvalidStride { width, stride });
        }
        let required = stride as usize * height as usize * format.bytes_per_pixel();
        let provided = storage.as_ref().len();
        if provided < required {
            return Err(ArgumentError::BufferTooSmall { required, provided });
        }
        Ok(Self {
            storage,
            width,
            height,
            format,
            stride,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Distance between the starts of two rows, in pixels
    pub fn stride(&self) -> u16 {
        self.stride
    }

    /// Pixel encoding
    pub fn format(&self) -> ColorSpace {
        self.format
    }

    /// Number of bytes covered by the pixel rectangle
    pub fn byte_len(&self) -> usize {
        self.stride as usize * self.height as usize * self.format.bytes_per_pixel()
    }

    /// Pixel bytes, exactly [`byte_len`](Self::byte_len) long
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage.as_ref()[..self.byte_len()]
    }

    /// Read the pixel at (x, y), `None` outside the rectangle
    pub fn pixel(&self, x: u16, y: u16) -> Option<u16> {
        let offset = self.offset(x, y)?;
        let bytes = self.storage.as_ref().get(offset..offset + 2)?;
        Some(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Release the storage
    pub fn into_inner(self) -> B {
        self.storage
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.stride as usize + x as usize) * self.format.bytes_per_pixel())
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> PixelBuffer<B> {
    /// Mutable pixel bytes, exactly [`byte_len`](Self::byte_len) long
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        let len = self.byte_len();
        &mut self.storage.as_mut()[..len]
    }

    /// Write one pixel
    ///
    /// Coordinates outside the rectangle are ignored.
    pub fn set_pixel(&mut self, x: u16, y: u16, value: u16) {
        if let Some(offset) = self.offset(x, y) {
            if let Some(bytes) = self.storage.as_mut().get_mut(offset..offset + 2) {
                bytes.copy_from_slice(&value.to_be_bytes());
            }
        }
    }

    /// Set every pixel of the rectangle, leaving row padding untouched
    pub fn fill(&mut self, value: u16) {
        let bpp = self.format.bytes_per_pixel();
        let row_bytes = self.stride as usize * bpp;
        let used = self.width as usize * bpp;
        let word = value.to_be_bytes();
        for row in self.as_bytes_mut().chunks_exact_mut(row_bytes) {
            for pixel in row[..used].chunks_exact_mut(2) {
                pixel.copy_from_slice(&word);
            }
        }
    }
}

#[cfg(feature = "alloc")]
impl PixelBuffer<alloc::vec::Vec<u8>> {
    /// Heap buffer of `width` x `height` black pixels without row padding
    pub(crate) fn zeroed(width: u16, height: u16, format: ColorSpace) -> Self {
        let len = width as usize * height as usize * format.bytes_per_pixel();
        Self {
            storage: alloc::vec![0; len],
            width,
            height,
            format,
            stride: width,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_new_validates_storage_length() {
        let storage = vec![0u8; 10 * 10 * 2 - 1];
        let result = PixelBuffer::new(storage, 10, 10, ColorSpace::Rgb565, None);
        assert_eq!(
            result.unwrap_err(),
            ArgumentError::BufferTooSmall {
                required: 200,
                provided: 199
            }
        );

        let storage = vec![0u8; 200];
        assert!(PixelBuffer::new(storage, 10, 10, ColorSpace::Rgb565, None).is_ok());
    }

    #[test]
    fn test_new_accounts_for_stride() {
        let storage = vec![0u8; 10 * 10 * 2];
        let result = PixelBuffer::new(storage, 10, 10, ColorSpace::Rgb565, Some(12));
        assert!(matches!(
            result,
            Err(ArgumentError::BufferTooSmall { required: 240, .. })
        ));

        let storage = vec![0u8; 12 * 10 * 2];
        let buffer = PixelBuffer::new(storage, 10, 10, ColorSpace::Rgb565, Some(12)).unwrap();
        assert_eq!(buffer.stride(), 12);
        assert_eq!(buffer.byte_len(), 240);
    }

    #[test]
    fn test_new_rejects_short_stride_and_empty_axes() {
        let storage = vec![0u8; 200];
        assert_eq!(
            PixelBuffer::new(storage.clone(), 10, 10, ColorSpace::Rgb565, Some(9)).unwrap_err(),
            ArgumentError::InvalidStride {
                width: 10,
                stride: 9
            }
        );
        assert!(matches!(
            PixelBuffer::new(storage, 0, 10, ColorSpace::Rgb565, None),
            Err(ArgumentError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_pixels_are_big_endian() {
        let mut buffer =
            PixelBuffer::new(vec![0u8; 3 * 2 * 2], 3, 2, ColorSpace::Rgb565, None).unwrap();
        buffer.set_pixel(2, 1, 0xF81F);
        assert_eq!(buffer.pixel(2, 1), Some(0xF81F));
        assert_eq!(&buffer.as_bytes()[10..12], &[0xF8, 0x1F]);
        assert_eq!(buffer.pixel(0, 0), Some(0));
    }

    #[test]
    fn test_out_of_bounds_access_is_ignored() {
        let mut buffer =
            PixelBuffer::new(vec![0u8; 2 * 2 * 2], 2, 2, ColorSpace::Rgb565, None).unwrap();
        buffer.set_pixel(2, 0, 0xFFFF);
        buffer.set_pixel(0, 2, 0xFFFF);
        assert!(buffer.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(buffer.pixel(2, 0), None);
    }

    #[test]
    fn test_fill_skips_row_padding() {
        let mut buffer =
            PixelBuffer::new(vec![0u8; 3 * 2 * 2], 2, 2, ColorSpace::Rgb565, Some(3)).unwrap();
        buffer.fill(0x1234);
        assert_eq!(
            buffer.as_bytes(),
            &[0x12, 0x34, 0x12, 0x34, 0, 0, 0x12, 0x34, 0x12, 0x34, 0, 0]
        );
    }

    #[test]
    fn test_extra_storage_is_not_exposed() {
        let buffer = PixelBuffer::new(vec![0u8; 64], 2, 2, ColorSpace::Rgb565, None).unwrap();
        assert_eq!(buffer.as_bytes().len(), 8);
        assert_eq!(buffer.into_inner().len(), 64);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_zeroed_matches_dimensions() {
        let buffer = PixelBuffer::zeroed(240, 240, ColorSpace::Rgb565);
        assert_eq!(buffer.as_bytes().len(), 240 * 240 * 2);
        assert_eq!(buffer.stride(), 240);
    }
}
