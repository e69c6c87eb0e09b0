//! Shared types for the dotjoin pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::raster::LineAlgorithm;

/// A pixel position in grid coordinates.
///
/// `row` is the height index (pixels from the top edge) and `col` the
/// width index (pixels from the left edge). Ordering is row-major, which
/// matches the order in which [`scan_dots`](crate::scan_dots) visits cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Height index.
    pub row: u32,
    /// Width index.
    pub col: u32,
}

impl Coordinate {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Largest per-axis difference to another coordinate.
    ///
    /// Two coordinates with a Chebyshev distance of at most 1 are equal or
    /// adjacent (including diagonally).
    #[must_use]
    pub const fn chebyshev_distance(self, other: Self) -> u32 {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        if dr > dc { dr } else { dc }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Grid dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Number of rows.
    pub height: u32,
    /// Number of columns.
    pub width: u32,
}

impl Dimensions {
    /// Create new dimensions.
    #[must_use]
    pub const fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    /// Returns `true` if `coord` addresses a cell inside the grid.
    #[must_use]
    pub const fn contains(self, coord: Coordinate) -> bool {
        coord.row < self.height && coord.col < self.width
    }

    /// The bottom-right cell, or `None` for an empty grid.
    #[must_use]
    pub const fn max_coordinate(self) -> Option<Coordinate> {
        if self.height == 0 || self.width == 0 {
            None
        } else {
            Some(Coordinate::new(self.height - 1, self.width - 1))
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

/// An opaque RGB line color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Pure white, the default line color.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a new color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The color as an `[r, g, b]` array.
    #[must_use]
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns `true` if every channel is zero.
    #[must_use]
    pub const fn is_black(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// Failure to parse a [`Color`] from an `"r,g,b"` string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{input}': expected three comma-separated values in 0-255")]
pub struct ParseColorError {
    input: String,
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError {
            input: s.to_owned(),
        };
        let mut parts = s.split(',').map(|part| part.trim().parse::<u8>());
        let (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(err());
        };
        Ok(Self::new(r, g, b))
    }
}

/// Per-run configuration for connecting dots.
///
/// Immutable for the duration of a [`connect`](crate::connect) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectConfig {
    /// Which rasterization algorithm draws diagonal lines.
    pub algorithm: LineAlgorithm,

    /// Color written into every rasterized pixel.
    pub color: Color,

    /// Whether the two dot pixels of a diagonal line are recolored.
    ///
    /// Horizontal and vertical lines never recolor their endpoints,
    /// whatever this is set to.
    pub inpaint_endpoints: bool,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            algorithm: LineAlgorithm::default(),
            color: Color::default(),
            inpaint_endpoints: false,
        }
    }
}

/// Errors raised by grid access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A read or write addressed a cell outside the grid.
    #[error("coordinate {coordinate} is outside the {dimensions} grid")]
    OutOfBounds {
        /// The offending coordinate.
        coordinate: Coordinate,
        /// Dimensions of the grid that was accessed.
        dimensions: Dimensions,
    },
}

/// Errors raised while drawing lines or connecting dots.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectError {
    /// A line endpoint lies outside the grid.
    ///
    /// `bounds` is the bottom-right valid coordinate, or `None` when the
    /// grid has no cells at all.
    #[error("coordinate {coordinate} is out of image bounds [(0, 0), {}]", fmt_bounds(.bounds.as_ref()))]
    OutOfBoundsCoordinate {
        /// The offending endpoint.
        coordinate: Coordinate,
        /// The largest valid coordinate.
        bounds: Option<Coordinate>,
    },

    /// The algorithm selector named neither `naive` nor `bresenham`.
    #[error("unknown algorithm name '{0}'")]
    UnknownAlgorithm(String),

    /// A pixel write fell outside the grid.
    #[error(transparent)]
    Grid(#[from] GridError),
}

fn fmt_bounds(bounds: Option<&Coordinate>) -> String {
    bounds.map_or_else(|| "empty".to_owned(), ToString::to_string)
}
