//! In-memory pixel grid.
//!
//! A [`PixelGrid`] wraps either an [`RgbImage`] or an [`RgbaImage`] from the
//! `image` crate and addresses cells by [`Coordinate`] (row, col) instead of
//! the `image` crate's (x, y). Writes go through [`PixelGrid::set`], which
//! only ever touches the three color channels: the alpha channel of an RGBA
//! grid is preserved exactly as loaded.

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

use crate::types::{Color, Coordinate, Dimensions, GridError};

/// A 2D grid of 8-bit RGB or RGBA pixels.
///
/// Equality compares channel layout, dimensions and raw pixel bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelGrid {
    /// Three channels per pixel.
    Rgb(RgbImage),
    /// Four channels per pixel; the fourth is never modified by drawing.
    Rgba(RgbaImage),
}

impl PixelGrid {
    /// An all-black RGB grid.
    #[must_use]
    pub fn new_rgb(dimensions: Dimensions) -> Self {
        Self::Rgb(RgbImage::new(dimensions.width, dimensions.height))
    }

    /// An all-black, fully transparent RGBA grid.
    #[must_use]
    pub fn new_rgba(dimensions: Dimensions) -> Self {
        Self::Rgba(RgbaImage::new(dimensions.width, dimensions.height))
    }

    /// Convert a decoded image into a grid.
    ///
    /// Images with an alpha channel become [`PixelGrid::Rgba`], everything
    /// else (including grayscale and 16-bit images) becomes
    /// [`PixelGrid::Rgb`].
    #[must_use]
    pub fn from_dynamic(img: DynamicImage) -> Self {
        match img {
            DynamicImage::ImageRgb8(rgb) => Self::Rgb(rgb),
            DynamicImage::ImageRgba8(rgba) => Self::Rgba(rgba),
            other if other.color().has_alpha() => Self::Rgba(other.to_rgba8()),
            other => Self::Rgb(other.to_rgb8()),
        }
    }

    /// Convert the grid back into a [`DynamicImage`] for encoding.
    #[must_use]
    pub fn into_dynamic(self) -> DynamicImage {
        match self {
            Self::Rgb(rgb) => DynamicImage::ImageRgb8(rgb),
            Self::Rgba(rgba) => DynamicImage::ImageRgba8(rgba),
        }
    }

    /// Grid dimensions as (height, width).
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        let (width, height) = match self {
            Self::Rgb(img) => img.dimensions(),
            Self::Rgba(img) => img.dimensions(),
        };
        Dimensions::new(height, width)
    }

    /// Number of channels per pixel (3 or 4).
    #[must_use]
    pub const fn channels(&self) -> u8 {
        match self {
            Self::Rgb(_) => 3,
            Self::Rgba(_) => 4,
        }
    }

    /// Raw interleaved pixel bytes in row-major order.
    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        match self {
            Self::Rgb(img) => img.as_raw(),
            Self::Rgba(img) => img.as_raw(),
        }
    }

    /// The color channels of the cell at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `coord` is outside the grid.
    pub fn color(&self, coord: Coordinate) -> Result<Color, GridError> {
        self.check(coord)?;
        let [r, g, b] = match self {
            Self::Rgb(img) => img.get_pixel(coord.col, coord.row).0,
            Self::Rgba(img) => {
                let [r, g, b, _] = img.get_pixel(coord.col, coord.row).0;
                [r, g, b]
            }
        };
        Ok(Color::new(r, g, b))
    }

    /// The alpha channel of the cell at `coord`, or `None` for RGB grids.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `coord` is outside the grid.
    pub fn alpha(&self, coord: Coordinate) -> Result<Option<u8>, GridError> {
        self.check(coord)?;
        Ok(match self {
            Self::Rgb(_) => None,
            Self::Rgba(img) => Some(img.get_pixel(coord.col, coord.row).0[3]),
        })
    }

    /// Overwrite the color channels of the cell at `coord`.
    ///
    /// The alpha channel, if any, is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `coord` is outside the grid.
    pub fn set(&mut self, coord: Coordinate, color: Color) -> Result<(), GridError> {
        self.check(coord)?;
        match self {
            Self::Rgb(img) => {
                img.put_pixel(coord.col, coord.row, Rgb(color.channels()));
            }
            Self::Rgba(img) => {
                let pixel: &mut Rgba<u8> = img.get_pixel_mut(coord.col, coord.row);
                pixel.0[..3].copy_from_slice(&color.channels());
            }
        }
        Ok(())
    }

    fn check(&self, coord: Coordinate) -> Result<(), GridError> {
        let dimensions = self.dimensions();
        if dimensions.contains(coord) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                coordinate: coord,
                dimensions,
            })
        }
    }
}

impl From<RgbImage> for PixelGrid {
    fn from(img: RgbImage) -> Self {
        Self::Rgb(img)
    }
}

impl From<RgbaImage> for PixelGrid {
    fn from(img: RgbaImage) -> Self {
        Self::Rgba(img)
    }
}
