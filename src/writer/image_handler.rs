//! Raster images for embedding as image XObjects.
//!
//! Pixel buffers arrive as strided scanlines of 8, 24 or 32 bits per pixel.
//! Before encoding they are repacked into tight rows with 1 (gray) or 3
//! (RGB) bytes per pixel; stride padding and alpha bytes never reach the
//! encoder.
//!
//! # Color Spaces
//!
//! - DeviceGray (8 bpp)
//! - DeviceRGB (24 and 32 bpp, alpha discarded)

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::object::{Dictionary, Object, ObjectId};

/// Color space for image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Grayscale (1 component per pixel)
    DeviceGray,
    /// RGB color (3 components per pixel)
    DeviceRGB,
}

impl ColorSpace {
    /// Get the number of color components.
    pub fn components(&self) -> usize {
        match self {
            ColorSpace::DeviceGray => 1,
            ColorSpace::DeviceRGB => 3,
        }
    }

    /// Get the PDF name for this color space.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRGB => "DeviceRGB",
        }
    }
}

/// A strided pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    bits_per_pixel: u32,
    stride: usize,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Create an image from `height` scanlines of `stride` bytes each.
    ///
    /// # Errors
    ///
    /// - `UnsupportedBitsPerPixel` unless `bits_per_pixel` is 8, 24 or 32
    /// - `InvalidInput` for a zero width or height, or a buffer size that
    ///   does not fit in `usize`
    /// - `InvalidStride` when a scanline cannot hold `width` pixels
    /// - `PixelBufferSize` unless `pixels.len() == stride * height`
    pub fn new(
        width: u32,
        height: u32,
        bits_per_pixel: u32,
        stride: usize,
        pixels: Vec<u8>,
    ) -> Result<Self> {
        validate(width, height, bits_per_pixel, stride, pixels.len())?;
        Ok(Self {
            width,
            height,
            bits_per_pixel,
            stride,
            pixels,
        })
    }

    /// Copy an image out of a borrowed buffer.
    pub fn from_slice(
        width: u32,
        height: u32,
        bits_per_pixel: u32,
        stride: usize,
        pixels: &[u8],
    ) -> Result<Self> {
        validate(width, height, bits_per_pixel, stride, pixels.len())?;
        Ok(Self {
            width,
            height,
            bits_per_pixel,
            stride,
            pixels: pixels.to_vec(),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bits per source pixel.
    pub fn bits_per_pixel(&self) -> u32 {
        self.bits_per_pixel
    }

    /// Bytes per source scanline.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Color space of the repacked data.
    pub fn color_space(&self) -> ColorSpace {
        if self.bits_per_pixel == 8 {
            ColorSpace::DeviceGray
        } else {
            ColorSpace::DeviceRGB
        }
    }

    /// Tightly packed pixel data: `width * components` bytes per row, no
    /// padding, no alpha.
    pub fn repack(&self) -> Vec<u8> {
        let width = self.width as usize;
        let src_pixel = (self.bits_per_pixel / 8) as usize;
        let out_channels = self.color_space().components();
        let row_len = width * out_channels;

        let mut packed = Vec::with_capacity(row_len * self.height as usize);
        for row in self.pixels.chunks_exact(self.stride) {
            if src_pixel == out_channels {
                packed.extend_from_slice(&row[..row_len]);
            } else {
                for pixel in row[..width * src_pixel].chunks_exact(src_pixel) {
                    packed.extend_from_slice(&pixel[..out_channels]);
                }
            }
        }
        packed
    }

    /// Image XObject dictionary without `/Length`, which is added when the
    /// stream is written.
    pub(crate) fn build_xobject_dict(&self, index: usize, filter: &str) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.insert("Type".to_string(), Object::name("XObject"));
        dict.insert("Subtype".to_string(), Object::name("Image"));
        dict.insert("Name".to_string(), Object::name(resource_name(index)));
        dict.insert("Width".to_string(), Object::from(self.width));
        dict.insert("Height".to_string(), Object::from(self.height));
        dict.insert("BitsPerComponent".to_string(), Object::Integer(8));
        dict.insert("ColorSpace".to_string(), Object::name(self.color_space().pdf_name()));
        dict.insert("Filter".to_string(), Object::name(filter));
        dict
    }
}

fn validate(width: u32, height: u32, bits_per_pixel: u32, stride: usize, len: usize) -> Result<()> {
    if !matches!(bits_per_pixel, 8 | 24 | 32) {
        return Err(Error::UnsupportedBitsPerPixel(bits_per_pixel));
    }
    if width == 0 || height == 0 {
        return Err(Error::InvalidInput(format!(
            "image must not be empty ({}x{})",
            width, height
        )));
    }
    let minimum = (width as usize)
        .checked_mul((bits_per_pixel / 8) as usize)
        .ok_or_else(|| Error::InvalidInput(format!("image width {} is too large", width)))?;
    if stride < minimum {
        return Err(Error::InvalidStride { stride, minimum });
    }
    let expected = stride.checked_mul(height as usize).ok_or_else(|| {
        Error::InvalidInput(format!(
            "scanlines of {} bytes x {} rows exceed the addressable size",
            stride, height
        ))
    })?;
    if len != expected {
        return Err(Error::PixelBufferSize {
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// Resource name of the `index`-th image on a page.
pub(crate) fn resource_name(index: usize) -> String {
    format!("Im{}", index)
}

/// Image placement on a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    /// X position (left edge)
    pub x: f64,
    /// Y position (bottom edge)
    pub y: f64,
    /// Display width
    pub width: f64,
    /// Display height
    pub height: f64,
}

impl ImagePlacement {
    /// Create a new image placement.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Place an image with its lower-left corner at the origin.
    pub fn at_origin(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Place an image so it covers `rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.min.x, rect.min.y, rect.max.x - rect.min.x, rect.max.y - rect.min.y)
    }

    /// Generate the transformation matrix for this placement.
    ///
    /// Returns the six values for the `cm` operator: a, b, c, d, e, f
    /// where the matrix is:
    /// ```text
    /// [ a  b  0 ]
    /// [ c  d  0 ]
    /// [ e  f  1 ]
    /// ```
    pub fn transform_matrix(&self) -> (f64, f64, f64, f64, f64, f64) {
        (self.width, 0.0, 0.0, self.height, self.x, self.y)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// An image waiting for page end, with its id already reserved.
#[derive(Debug)]
pub(crate) struct PendingImage {
    pub id: ObjectId,
    pub index: usize,
    pub image: RasterImage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_space_components() {
        assert_eq!(ColorSpace::DeviceGray.components(), 1);
        assert_eq!(ColorSpace::DeviceRGB.components(), 3);
        assert_eq!(ColorSpace::DeviceGray.pdf_name(), "DeviceGray");
        assert_eq!(ColorSpace::DeviceRGB.pdf_name(), "DeviceRGB");
    }

    #[test]
    fn test_gray_without_padding_is_unchanged() {
        let pixels: Vec<u8> = (0..24).collect();
        let image = RasterImage::new(4, 6, 8, 4, pixels.clone()).unwrap();
        assert_eq!(image.color_space(), ColorSpace::DeviceGray);
        assert_eq!(image.repack(), pixels);
    }

    #[test]
    fn test_stride_padding_is_dropped() {
        // 2x2 RGB with two padding bytes per row.
        let pixels = vec![1, 2, 3, 4, 5, 6, 0xEE, 0xEE, 7, 8, 9, 10, 11, 12, 0xEE, 0xEE];
        let image = RasterImage::new(2, 2, 24, 8, pixels).unwrap();
        assert_eq!(image.repack(), vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_alpha_is_discarded() {
        let pixels = vec![10, 20, 30, 255, 40, 50, 60, 128, 70, 80, 90, 0];
        let image = RasterImage::new(3, 1, 32, 12, pixels).unwrap();
        assert_eq!(image.color_space(), ColorSpace::DeviceRGB);
        let packed = image.repack();
        assert_eq!(packed, vec![10, 20, 30, 40, 50, 60, 70, 80, 90]);
        assert_eq!(packed.len(), 3 * 1 * 3);
    }

    #[test]
    fn test_rejects_unsupported_depth() {
        let err = RasterImage::new(1, 1, 16, 2, vec![0; 2]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedBitsPerPixel(16)));
    }

    #[test]
    fn test_rejects_short_stride() {
        let err = RasterImage::new(4, 1, 24, 11, vec![0; 11]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidStride {
                stride: 11,
                minimum: 12
            }
        ));
    }

    #[test]
    fn test_rejects_buffer_size_mismatch() {
        let err = RasterImage::from_slice(2, 2, 8, 2, &[0; 5]).unwrap_err();
        assert!(matches!(
            err,
            Error::PixelBufferSize {
                expected: 4,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_rejects_stride_that_overflows_buffer_size() {
        let err = RasterImage::from_slice(1, 3, 8, usize::MAX / 2, &[0; 4]).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Input);
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = RasterImage::new(2, 2, 32, usize::MAX, vec![0; 16]).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Input);
    }

    #[test]
    fn test_rejects_empty_image() {
        assert!(RasterImage::new(0, 3, 8, 0, vec![]).is_err());
    }

    #[test]
    fn test_xobject_dict() {
        let image = RasterImage::new(2, 2, 24, 6, vec![0; 12]).unwrap();
        let dict = image.build_xobject_dict(1, "ASCII85Decode");
        let keys: Vec<_> = dict.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "Type",
                "Subtype",
                "Name",
                "Width",
                "Height",
                "BitsPerComponent",
                "ColorSpace",
                "Filter"
            ]
        );
        assert_eq!(dict.get("Name"), Some(&Object::name("Im1")));
        assert_eq!(dict.get("ColorSpace"), Some(&Object::name("DeviceRGB")));
    }

    #[test]
    fn test_image_placement_transform() {
        let placement = ImagePlacement::from_rect(Rect::from_coords(100.0, 200.0, 150.0, 275.0));
        assert_eq!(placement.transform_matrix(), (50.0, 0.0, 0.0, 75.0, 100.0, 200.0));
    }
}
