//! Dot scanning: find every non-black pixel in a grid.

use crate::grid::PixelGrid;
use crate::types::Coordinate;

/// Return the coordinates of every dot in `grid`, in row-major order.
///
/// A cell is a dot if any of its three color channels is non-zero. The
/// alpha channel of RGBA grids is ignored, so a transparent black pixel
/// and an opaque black pixel are both background.
///
/// Visits every cell once (O(height * width)). The returned order is the
/// order in which [`connect`](crate::connect) enumerates pairs.
#[must_use = "returns the dot coordinates"]
pub fn scan_dots(grid: &PixelGrid) -> Vec<Coordinate> {
    let channels = usize::from(grid.channels());
    let width = grid.dimensions().width;

    let dots: Vec<Coordinate> = grid
        .as_raw()
        .chunks_exact(channels)
        .zip(0u32..)
        .filter(|(pixel, _)| pixel[..3].iter().any(|&c| c > 0))
        .map(|(_, index)| Coordinate::new(index / width, index % width))
        .collect();

    log::debug!("Found non-black pixels at locations: {dots:?}.");
    dots
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;
    use crate::types::{Color, Dimensions};

    #[test]
    fn black_grid_has_no_dots() {
        let grid = PixelGrid::new_rgb(Dimensions::new(8, 8));
        assert!(scan_dots(&grid).is_empty());
    }

    #[test]
    fn dots_come_back_in_row_major_order() {
        let mut grid = PixelGrid::new_rgb(Dimensions::new(100, 100));
        // Inserted out of order on purpose.
        let inserted = [
            Coordinate::new(22, 44),
            Coordinate::new(40, 55),
            Coordinate::new(66, 99),
            Coordinate::new(0, 0),
        ];
        for (i, coord) in (0u8..).zip(inserted) {
            grid.set(coord, Color::new(10 + i, 0, 200)).unwrap();
        }

        assert_eq!(
            scan_dots(&grid),
            vec![
                Coordinate::new(0, 0),
                Coordinate::new(22, 44),
                Coordinate::new(40, 55),
                Coordinate::new(66, 99),
            ]
        );
    }

    #[test]
    fn single_nonzero_channel_is_a_dot() {
        let mut grid = PixelGrid::new_rgb(Dimensions::new(3, 3));
        grid.set(Coordinate::new(1, 2), Color::new(0, 0, 1)).unwrap();
        assert_eq!(scan_dots(&grid), vec![Coordinate::new(1, 2)]);
    }

    #[test]
    fn alpha_alone_does_not_make_a_dot() {
        let mut img = RgbaImage::from_pixel(4, 3, Rgba([0, 0, 0, 255]));
        img.put_pixel(3, 2, Rgba([0, 7, 0, 0]));
        let grid = PixelGrid::from(img);
        assert_eq!(scan_dots(&grid), vec![Coordinate::new(2, 3)]);
    }

    #[test]
    fn non_square_grid_maps_indices_to_row_and_col() {
        let mut grid = PixelGrid::new_rgb(Dimensions::new(2, 5));
        grid.set(Coordinate::new(1, 4), Color::WHITE).unwrap();
        grid.set(Coordinate::new(0, 3), Color::WHITE).unwrap();
        assert_eq!(
            scan_dots(&grid),
            vec![Coordinate::new(0, 3), Coordinate::new(1, 4)]
        );
    }
}
