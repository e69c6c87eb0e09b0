//! Line rasterization: select the pixels that approximate a straight line
//! between two grid coordinates.
//!
//! This module defines the [`LineRasterizer`] trait for pluggable line
//! algorithms and the [`LineAlgorithm`] enum for selecting which one to use
//! at runtime. [`draw_line`] wraps the algorithms with the checks and
//! axis-aligned shortcuts shared by both.
//!
//! # Endpoint handling
//!
//! Horizontal and vertical lines are drawn directly and never recolor
//! their two endpoints. Diagonal lines go through the selected algorithm,
//! which recolors the endpoints only when
//! [`ConnectConfig::inpaint_endpoints`] is set. The asymmetry is observable
//! in output images and is kept as-is.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::grid::PixelGrid;
use crate::types::{Color, ConnectConfig, ConnectError, Coordinate};

/// Selects which rasterization algorithm draws diagonal lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineAlgorithm {
    /// Slope-intercept evaluation, one pixel per column.
    ///
    /// Uses floating-point multiplication per pixel and produces a sparse,
    /// disconnected line when the slope is steeper than 1.
    Naive,

    /// Integer-only incremental error stepping.
    ///
    /// Produces an 8-connected line with no gaps at any slope.
    #[default]
    Bresenham,
}

impl LineAlgorithm {
    /// Every algorithm, in declaration order.
    pub const ALL: [Self; 2] = [Self::Naive, Self::Bresenham];

    /// The name used on the command line and in serialized configs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Naive => "naive",
            Self::Bresenham => "bresenham",
        }
    }
}

impl fmt::Display for LineAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LineAlgorithm {
    type Err = ConnectError;

    /// Parse `"naive"` or `"bresenham"`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::UnknownAlgorithm`] for any other name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| ConnectError::UnknownAlgorithm(s.to_owned()))
    }
}

/// Trait for line rasterization strategies.
///
/// Input: two grid coordinates and whether to include them in the output.
/// Output: the pixels to color, in drawing order. No bounds checking is
/// done here; every emitted pixel lies within the bounding box of the two
/// inputs.
pub trait LineRasterizer {
    /// Rasterize the line from `start` to `end`.
    fn rasterize(
        &self,
        start: Coordinate,
        end: Coordinate,
        inpaint_endpoints: bool,
    ) -> Vec<Coordinate>;
}

impl LineRasterizer for LineAlgorithm {
    fn rasterize(
        &self,
        start: Coordinate,
        end: Coordinate,
        inpaint_endpoints: bool,
    ) -> Vec<Coordinate> {
        match *self {
            Self::Naive => {
                let (left, right) = order_by_col(start, end);
                rasterize_naive(left, right, inpaint_endpoints)
            }
            Self::Bresenham => rasterize_bresenham(start, end, inpaint_endpoints),
        }
    }
}

/// Rows gained per column when walking from `left` to `right`.
///
/// Infinite (or NaN) when both coordinates share a column.
#[must_use]
pub fn slope(left: Coordinate, right: Coordinate) -> f64 {
    (f64::from(right.row) - f64::from(left.row)) / (f64::from(right.col) - f64::from(left.col))
}

/// Swap so that the first coordinate has the smaller column.
const fn order_by_col(a: Coordinate, b: Coordinate) -> (Coordinate, Coordinate) {
    if a.col > b.col { (b, a) } else { (a, b) }
}

/// One pixel per column, row taken from the line equation.
///
/// `left` must not be right of `right`. Rows are truncated toward zero,
/// which equals flooring since every evaluated row is non-negative. A
/// vertical pair has no defined slope and yields no pixels.
///
/// Steps one column at a time regardless of slope, so lines steeper than
/// 45 degrees come out as isolated pixels.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops
)]
fn rasterize_naive(left: Coordinate, right: Coordinate, inpaint_endpoints: bool) -> Vec<Coordinate> {
    debug_assert!(left.col <= right.col, "left {left} is right of {right}");
    if left.col == right.col {
        return Vec::new();
    }

    let m = slope(left, right);
    let cols = if inpaint_endpoints {
        left.col..=right.col
    } else {
        left.col + 1..=right.col - 1
    };

    let pixels: Vec<Coordinate> = cols
        .map(|col| {
            // Separate multiply and add: a fused multiply-add rounds
            // differently and would shift pixels on exact .0 boundaries.
            let row = m * f64::from(col - left.col) + f64::from(left.row);
            Coordinate::new(row.trunc() as u32, col)
        })
        .collect();

    log::debug!("Drew line with slope {m} from pixel {left} to {right}.");
    pixels
}

/// Classic all-octant Bresenham from `start` to `end`.
///
/// Step directions follow the given order, so swapping the arguments may
/// select different pixels on ties.
fn rasterize_bresenham(
    start: Coordinate,
    end: Coordinate,
    inpaint_endpoints: bool,
) -> Vec<Coordinate> {
    let dx = i64::from(start.col.abs_diff(end.col));
    let dy = -i64::from(start.row.abs_diff(end.row));
    let sx: i32 = if start.col < end.col { 1 } else { -1 };
    let sy: i32 = if start.row < end.row { 1 } else { -1 };
    let mut err = dx + dy;

    let mut pixels = Vec::with_capacity(usize::try_from(dx.max(-dy) + 1).unwrap_or_default());
    let mut current = start;
    loop {
        if inpaint_endpoints || (current != start && current != end) {
            pixels.push(current);
        }
        if current == end {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            current.col = current.col.saturating_add_signed(sx);
        }
        if e2 <= dx {
            err += dx;
            current.row = current.row.saturating_add_signed(sy);
        }
    }
    pixels
}

/// What [`draw_line`] did with a coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The coordinates were equal or adjacent; nothing was drawn.
    Skipped,
    /// Same row: the cells strictly between the endpoints were colored.
    Horizontal {
        /// Number of pixels written.
        pixels: usize,
    },
    /// Same column: the cells strictly between the endpoints were colored.
    Vertical {
        /// Number of pixels written.
        pixels: usize,
    },
    /// Any other direction, rasterized by the configured algorithm.
    Diagonal {
        /// Number of pixels written.
        pixels: usize,
    },
}

impl DrawOutcome {
    /// Number of pixels written (zero when skipped).
    #[must_use]
    pub const fn pixels(self) -> usize {
        match self {
            Self::Skipped => 0,
            Self::Horizontal { pixels } | Self::Vertical { pixels } | Self::Diagonal { pixels } => {
                pixels
            }
        }
    }
}

/// Draw a line between `a` and `b` into `grid`, in place.
///
/// `grid` is the caller's working copy; use [`connect`](crate::connect) to
/// leave an input grid untouched.
///
/// # Steps
///
/// 1. Equal or adjacent coordinates are a logged no-op.
/// 2. Both coordinates are bounds-checked before any pixel is written.
/// 3. Same-row and same-column pairs color only the cells between them.
/// 4. Everything else goes through `config.algorithm`.
///
/// # Errors
///
/// Returns [`ConnectError::OutOfBoundsCoordinate`] if either coordinate lies
/// outside the grid; the grid is not modified in that case.
pub fn draw_line(
    grid: &mut PixelGrid,
    a: Coordinate,
    b: Coordinate,
    config: &ConnectConfig,
) -> Result<DrawOutcome, ConnectError> {
    if a.chebyshev_distance(b) <= 1 {
        log::warn!(
            "Both coordinates {a} and {b} are equal or adjacent - cannot draw line! \
             Leaving image unchanged."
        );
        return Ok(DrawOutcome::Skipped);
    }

    let dimensions = grid.dimensions();
    for coordinate in [a, b] {
        if !dimensions.contains(coordinate) {
            return Err(ConnectError::OutOfBoundsCoordinate {
                coordinate,
                bounds: dimensions.max_coordinate(),
            });
        }
    }

    let (left, right) = order_by_col(a, b);

    let outcome = if left.row == right.row {
        log::debug!("Drawing horizontal line from {left} to {right}.");
        let pixels = (left.col + 1..right.col).map(|col| Coordinate::new(left.row, col));
        DrawOutcome::Horizontal {
            pixels: paint(grid, pixels, config.color)?,
        }
    } else if left.col == right.col {
        log::debug!("Drawing vertical line from {left} to {right}.");
        let top = left.row.min(right.row);
        let bottom = left.row.max(right.row);
        let pixels = (top + 1..bottom).map(|row| Coordinate::new(row, left.col));
        DrawOutcome::Vertical {
            pixels: paint(grid, pixels, config.color)?,
        }
    } else {
        log::debug!(
            "Drawing line from {left} to {right} with {} algorithm.",
            config.algorithm
        );
        let pixels = config
            .algorithm
            .rasterize(a, b, config.inpaint_endpoints);
        DrawOutcome::Diagonal {
            pixels: paint(grid, pixels, config.color)?,
        }
    };
    Ok(outcome)
}

/// Draw a line selecting the algorithm by name.
///
/// The name is parsed before anything else, so an unknown name draws
/// nothing even for pairs that would not need an algorithm.
///
/// # Errors
///
/// Returns [`ConnectError::UnknownAlgorithm`] if `algorithm` is neither
/// `naive` nor `bresenham`, and otherwise any error of [`draw_line`].
pub fn draw_line_named(
    grid: &mut PixelGrid,
    a: Coordinate,
    b: Coordinate,
    color: Color,
    algorithm: &str,
    inpaint_endpoints: bool,
) -> Result<DrawOutcome, ConnectError> {
    let config = ConnectConfig {
        algorithm: algorithm.parse()?,
        color,
        inpaint_endpoints,
    };
    draw_line(grid, a, b, &config)
}

fn paint(
    grid: &mut PixelGrid,
    pixels: impl IntoIterator<Item = Coordinate>,
    color: Color,
) -> Result<usize, ConnectError> {
    let mut written = 0;
    for pixel in pixels {
        grid.set(pixel, color)?;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Dimensions;

    const RED: Color = Color::new(255, 0, 0);

    fn config(algorithm: LineAlgorithm, inpaint_endpoints: bool) -> ConnectConfig {
        ConnectConfig {
            algorithm,
            color: RED,
            inpaint_endpoints,
        }
    }

    fn black_grid() -> PixelGrid {
        PixelGrid::new_rgb(Dimensions::new(100, 100))
    }

    /// Coordinates of every cell colored exactly `RED`, row-major.
    fn red_pixels(grid: &PixelGrid) -> Vec<Coordinate> {
        crate::scan_dots(grid)
            .into_iter()
            .filter(|&c| grid.color(c).unwrap() == RED)
            .collect()
    }

    fn assert_8_connected(pixels: &[Coordinate]) {
        for pair in pixels.windows(2) {
            assert!(
                pair[0].chebyshev_distance(pair[1]) == 1,
                "gap between {} and {}",
                pair[0],
                pair[1]
            );
        }
    }

    // --- algorithm selection ---

    #[test]
    fn default_is_bresenham() {
        assert_eq!(LineAlgorithm::default(), LineAlgorithm::Bresenham);
    }

    #[test]
    fn algorithm_parses_by_name() {
        assert_eq!("naive".parse::<LineAlgorithm>().unwrap(), LineAlgorithm::Naive);
        assert_eq!(
            "bresenham".parse::<LineAlgorithm>().unwrap(),
            LineAlgorithm::Bresenham
        );
        for algorithm in LineAlgorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<LineAlgorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let mut grid = black_grid();
        let err = draw_line_named(
            &mut grid,
            Coordinate::new(6, 66),
            Coordinate::new(66, 6),
            RED,
            "xxx",
            false,
        )
        .unwrap_err();
        assert_eq!(err, ConnectError::UnknownAlgorithm("xxx".to_owned()));
        assert_eq!(grid, black_grid());
    }

    #[test]
    fn named_draw_uses_selected_algorithm() {
        let (a, b) = (Coordinate::new(0, 0), Coordinate::new(10, 2));
        let mut by_name = black_grid();
        draw_line_named(&mut by_name, a, b, RED, "naive", true).unwrap();
        let mut by_enum = black_grid();
        draw_line(&mut by_enum, a, b, &config(LineAlgorithm::Naive, true)).unwrap();
        assert_eq!(by_name, by_enum);
    }

    // --- slope ---

    #[test]
    fn slope_of_descending_diagonal() {
        let s = slope(Coordinate::new(10, 0), Coordinate::new(0, 10));
        assert!((s - -1.0).abs() < f64::EPSILON, "slope was {s}");
    }

    // --- degenerate pairs ---

    #[test_log::test]
    fn equal_or_adjacent_coordinates_are_a_no_op() {
        let center = Coordinate::new(50, 10);
        for algorithm in LineAlgorithm::ALL {
            for dr in -1i32..=1 {
                for dc in -1i32..=1 {
                    let other = Coordinate::new(
                        center.row.saturating_add_signed(dr),
                        center.col.saturating_add_signed(dc),
                    );
                    let mut grid = black_grid();
                    let outcome =
                        draw_line(&mut grid, center, other, &config(algorithm, true)).unwrap();
                    assert_eq!(outcome, DrawOutcome::Skipped);
                    assert_eq!(grid, black_grid(), "{center} -> {other} modified the grid");
                }
            }
        }
    }

    #[test]
    fn adjacent_check_runs_before_bounds_check() {
        // Both are outside a 100x100 grid, but adjacency wins.
        let mut grid = black_grid();
        let outcome = draw_line(
            &mut grid,
            Coordinate::new(500, 10),
            Coordinate::new(501, 10),
            &ConnectConfig::default(),
        )
        .unwrap();
        assert_eq!(outcome, DrawOutcome::Skipped);
    }

    // --- bounds ---

    #[test]
    fn out_of_bounds_coordinates_fail_without_drawing() {
        let cases = [
            (Coordinate::new(500, 10), Coordinate::new(50, 10), Coordinate::new(500, 10)),
            (Coordinate::new(0, 99), Coordinate::new(50, 109), Coordinate::new(50, 109)),
            (Coordinate::new(100, 0), Coordinate::new(0, 0), Coordinate::new(100, 0)),
            (Coordinate::new(3, 3), Coordinate::new(0, 100), Coordinate::new(0, 100)),
        ];
        for algorithm in LineAlgorithm::ALL {
            for (a, b, offending) in cases {
                let mut grid = black_grid();
                let err = draw_line(&mut grid, a, b, &config(algorithm, true)).unwrap_err();
                assert_eq!(
                    err,
                    ConnectError::OutOfBoundsCoordinate {
                        coordinate: offending,
                        bounds: Some(Coordinate::new(99, 99)),
                    }
                );
                assert_eq!(grid, black_grid());
            }
        }
    }

    // --- axis-aligned lines ---

    #[test]
    fn horizontal_line_excludes_endpoints() {
        for algorithm in LineAlgorithm::ALL {
            for inpaint in [false, true] {
                let mut grid = black_grid();
                let outcome = draw_line(
                    &mut grid,
                    Coordinate::new(5, 10),
                    Coordinate::new(5, 20),
                    &config(algorithm, inpaint),
                )
                .unwrap();
                assert_eq!(outcome, DrawOutcome::Horizontal { pixels: 9 });
                let expected: Vec<_> = (11..=19).map(|col| Coordinate::new(5, col)).collect();
                assert_eq!(red_pixels(&grid), expected);
                assert!(grid.color(Coordinate::new(5, 10)).unwrap().is_black());
                assert!(grid.color(Coordinate::new(5, 20)).unwrap().is_black());
            }
        }
    }

    #[test]
    fn horizontal_line_right_to_left() {
        let mut grid = black_grid();
        draw_line(
            &mut grid,
            Coordinate::new(5, 90),
            Coordinate::new(5, 10),
            &config(LineAlgorithm::Naive, false),
        )
        .unwrap();
        let expected: Vec<_> = (11..90).map(|col| Coordinate::new(5, col)).collect();
        assert_eq!(red_pixels(&grid), expected);
    }

    #[test]
    fn vertical_line_excludes_endpoints() {
        for algorithm in LineAlgorithm::ALL {
            for inpaint in [false, true] {
                let mut grid = black_grid();
                let outcome = draw_line(
                    &mut grid,
                    Coordinate::new(50, 10),
                    Coordinate::new(5, 10),
                    &config(algorithm, inpaint),
                )
                .unwrap();
                assert_eq!(outcome, DrawOutcome::Vertical { pixels: 44 });
                let expected: Vec<_> = (6..=49).map(|row| Coordinate::new(row, 10)).collect();
                assert_eq!(red_pixels(&grid), expected);
            }
        }
    }

    #[test]
    fn two_apart_leaves_single_interior_pixel() {
        let mut grid = black_grid();
        draw_line(
            &mut grid,
            Coordinate::new(7, 7),
            Coordinate::new(7, 9),
            &ConnectConfig::default(),
        )
        .unwrap();
        assert_eq!(
            grid.color(Coordinate::new(7, 8)).unwrap(),
            ConnectConfig::default().color
        );
    }

    // --- naive ---

    #[test]
    fn naive_follows_45_degree_diagonal() {
        let pixels = LineAlgorithm::Naive.rasterize(
            Coordinate::new(4, 4),
            Coordinate::new(44, 44),
            false,
        );
        let expected: Vec<_> = (5..=43).map(|i| Coordinate::new(i, i)).collect();
        assert_eq!(pixels, expected);
    }

    #[test]
    fn naive_steep_line_is_sparse() {
        let (a, b) = (Coordinate::new(0, 0), Coordinate::new(10, 2));
        assert_eq!(
            LineAlgorithm::Naive.rasterize(a, b, true),
            vec![
                Coordinate::new(0, 0),
                Coordinate::new(5, 1),
                Coordinate::new(10, 2),
            ]
        );
        assert_eq!(
            LineAlgorithm::Naive.rasterize(a, b, false),
            vec![Coordinate::new(5, 1)]
        );
    }

    #[test]
    fn naive_truncates_fractional_rows() {
        // Slope 1/3: rows 0.33 and 0.67 both truncate to 0.
        let pixels = LineAlgorithm::Naive.rasterize(
            Coordinate::new(0, 0),
            Coordinate::new(1, 3),
            true,
        );
        assert_eq!(
            pixels,
            vec![
                Coordinate::new(0, 0),
                Coordinate::new(0, 1),
                Coordinate::new(0, 2),
                Coordinate::new(1, 3),
            ]
        );
    }

    #[test]
    fn naive_ignores_argument_order() {
        let (a, b) = (Coordinate::new(50, 10), Coordinate::new(5, 88));
        assert_eq!(
            LineAlgorithm::Naive.rasterize(a, b, true),
            LineAlgorithm::Naive.rasterize(b, a, true)
        );
    }

    #[test]
    fn naive_vertical_pair_yields_nothing() {
        let pixels =
            LineAlgorithm::Naive.rasterize(Coordinate::new(1, 4), Coordinate::new(9, 4), true);
        assert!(pixels.is_empty());
    }

    // --- bresenham ---

    #[test]
    fn bresenham_follows_45_degree_diagonal() {
        let pixels = LineAlgorithm::Bresenham.rasterize(
            Coordinate::new(4, 4),
            Coordinate::new(44, 44),
            true,
        );
        let expected: Vec<_> = (4..=44).map(|i| Coordinate::new(i, i)).collect();
        assert_eq!(pixels, expected);
    }

    #[test]
    fn bresenham_is_8_connected_and_hits_endpoints() {
        let points = [
            Coordinate::new(0, 0),
            Coordinate::new(50, 10),
            Coordinate::new(5, 88),
            Coordinate::new(99, 99),
            Coordinate::new(66, 6),
            Coordinate::new(6, 66),
            Coordinate::new(98, 0),
            Coordinate::new(33, 34),
        ];
        for &a in &points {
            for &b in &points {
                let pixels = LineAlgorithm::Bresenham.rasterize(a, b, true);
                assert_eq!(pixels.first(), Some(&a));
                assert_eq!(pixels.last(), Some(&b));
                assert_8_connected(&pixels);
                let span = a.row.abs_diff(b.row).max(a.col.abs_diff(b.col));
                assert_eq!(pixels.len(), span as usize + 1, "{a} -> {b}");
            }
        }
    }

    #[test]
    fn bresenham_without_inpaint_drops_only_endpoints() {
        let (a, b) = (Coordinate::new(50, 10), Coordinate::new(5, 88));
        let with = LineAlgorithm::Bresenham.rasterize(a, b, true);
        let without = LineAlgorithm::Bresenham.rasterize(a, b, false);
        assert_eq!(without.as_slice(), &with[1..with.len() - 1]);
    }

    #[test]
    fn bresenham_steep_line_has_no_gaps() {
        let pixels = LineAlgorithm::Bresenham.rasterize(
            Coordinate::new(0, 0),
            Coordinate::new(10, 2),
            false,
        );
        assert_eq!(pixels.len(), 9);
        let rows: Vec<u32> = pixels.iter().map(|c| c.row).collect();
        assert_eq!(rows, (1..=9).collect::<Vec<_>>());
    }

    // --- draw_line on diagonals ---

    #[test]
    fn diagonal_respects_inpaint_endpoints() {
        let (a, b) = (Coordinate::new(4, 4), Coordinate::new(44, 44));
        for algorithm in LineAlgorithm::ALL {
            let mut grid = black_grid();
            let outcome = draw_line(&mut grid, a, b, &config(algorithm, false)).unwrap();
            assert_eq!(outcome, DrawOutcome::Diagonal { pixels: 39 });
            assert!(grid.color(a).unwrap().is_black());
            assert!(grid.color(b).unwrap().is_black());

            let mut grid = black_grid();
            let outcome = draw_line(&mut grid, a, b, &config(algorithm, true)).unwrap();
            assert_eq!(outcome.pixels(), 41);
            assert_eq!(grid.color(a).unwrap(), RED);
            assert_eq!(grid.color(b).unwrap(), RED);
        }
    }

    #[test]
    fn diagonal_preserves_alpha() {
        let img = image::RgbaImage::from_pixel(20, 20, image::Rgba([0, 0, 0, 42]));
        let mut grid = PixelGrid::from(img);
        draw_line(
            &mut grid,
            Coordinate::new(2, 3),
            Coordinate::new(17, 11),
            &config(LineAlgorithm::Bresenham, true),
        )
        .unwrap();
        assert!(!red_pixels(&grid).is_empty());
        assert!(grid.as_raw().chunks_exact(4).all(|px| px[3] == 42));
    }
}
