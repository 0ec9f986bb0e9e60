//! Pixel access for a single screenshot.

use std::path::Path;

use image::{imageops, GrayImage, Rgb, RgbImage};

use crate::error::{Error, Result};
use crate::location::{Coord, Location, Point};

/// An immutable RGB screenshot together with its grayscale intensities.
///
/// The grayscale grid is derived once on construction with [`imageops::grayscale`];
/// nothing downstream depends on the exact luma weighting.
pub struct Screenshot {
    rgb: RgbImage,
    gray: GrayImage,
}

impl From<RgbImage> for Screenshot {
    fn from(rgb: RgbImage) -> Self {
        let gray = imageops::grayscale(&rgb);
        Self { rgb, gray }
    }
}

impl Screenshot {
    /// Decode a screenshot from encoded bytes (PNG, JPEG or BMP).
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`] if `bytes` is empty, [`Error::Image`] if the data cannot be decoded.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::EmptyInput);
        }

        Ok(Self::from(image::load_from_memory(bytes)?.to_rgb8()))
    }

    /// Read and decode a screenshot from disk.
    ///
    /// A file still being written usually fails here with [`Error::Image`]; retrying is left to the caller.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from(image::open(path)?.to_rgb8()))
    }

    /// Crop to the centered square of side `height`.
    ///
    /// Screenshots are expected to be landscape with the puzzle in the middle, so this discards the sides before searching.
    /// Portrait or square images are returned unchanged.
    pub fn into_center_square(self) -> Self {
        let (width, height) = self.rgb.dimensions();
        if width <= height {
            return self;
        }

        Self::from(imageops::crop_imm(&self.rgb, (width - height) / 2, 0, height, height).to_image())
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.rgb.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.rgb.height()
    }

    pub(crate) fn dims(&self) -> (Coord, Coord) {
        (self.width() as Coord, self.height() as Coord)
    }

    /// Grayscale intensity of an in-bounds pixel.
    pub(crate) fn intensity(&self, location: Location) -> u8 {
        self.gray.get_pixel(location.0 as u32, location.1 as u32).0[0]
    }

    /// Grayscale intensity at `point`, clamped onto the image.
    pub(crate) fn intensity_at(&self, point: Point) -> u8 {
        let (x, y) = self.clamp(point);
        self.gray.get_pixel(x, y).0[0]
    }

    /// RGB sample at `point`, clamped onto the image.
    pub(crate) fn rgb_at(&self, point: Point) -> Rgb<u8> {
        let (x, y) = self.clamp(point);
        *self.rgb.get_pixel(x, y)
    }

    /// The underlying RGB pixels, for overlay rendering by the caller.
    pub fn rgb(&self) -> &RgbImage {
        &self.rgb
    }

    fn clamp(&self, point: Point) -> (u32, u32) {
        let x = point.x.clamp(0, self.width().saturating_sub(1) as i32);
        let y = point.y.clamp(0, self.height().saturating_sub(1) as i32);
        (x as u32, y as u32)
    }
}
