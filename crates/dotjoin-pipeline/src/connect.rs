//! Dot connection: draw a line between every unordered pair of dots.

use serde::{Deserialize, Serialize};

use crate::grid::PixelGrid;
use crate::raster::{DrawOutcome, draw_line};
use crate::scan::scan_dots;
use crate::types::{ConnectConfig, ConnectError, Coordinate};

/// Counters collected by [`connect_with_stats`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConnectStats {
    /// Dots found by the scan, in scan order.
    pub dots: Vec<Coordinate>,
    /// Number of unordered pairs visited.
    pub pairs: usize,
    /// Pairs that produced a line.
    pub drawn: usize,
    /// Pairs skipped because the dots were equal or adjacent.
    pub skipped: usize,
    /// Pixel writes across all lines, overlaps counted each time.
    pub pixels_written: usize,
}

/// Connect every pair of dots in `grid` with straight lines.
///
/// The input grid is never modified: the lines are drawn into a copy,
/// which is returned.
///
/// # Errors
///
/// Propagates the first error from [`draw_line`]. Lines already drawn into
/// the copy are discarded along with it.
pub fn connect(grid: &PixelGrid, config: &ConnectConfig) -> Result<PixelGrid, ConnectError> {
    connect_with_stats(grid, config).map(|(connected, _)| connected)
}

/// Like [`connect`], also returning what was drawn.
///
/// Pairs are the combinations `(dots[i], dots[j])` with `i < j` over the
/// row-major scan order, drawn one after another into the same working
/// grid. Where lines overlap, the later pair's pixels win.
///
/// # Errors
///
/// Propagates the first error from [`draw_line`].
pub fn connect_with_stats(
    grid: &PixelGrid,
    config: &ConnectConfig,
) -> Result<(PixelGrid, ConnectStats), ConnectError> {
    let mut working = grid.clone();

    log::info!("Scanning {} grid for dots ...", grid.dimensions());
    let dots = scan_dots(&working);

    log::info!(
        "Connecting {} dots with {} algorithm ...",
        dots.len(),
        config.algorithm
    );
    let mut stats = ConnectStats::default();
    for (i, &a) in dots.iter().enumerate() {
        for &b in &dots[i + 1..] {
            stats.pairs += 1;
            match draw_line(&mut working, a, b, config)? {
                DrawOutcome::Skipped => stats.skipped += 1,
                outcome => {
                    stats.drawn += 1;
                    stats.pixels_written += outcome.pixels();
                }
            }
        }
    }
    stats.dots = dots;

    log::info!(
        "Drew {} of {} lines ({} skipped, {} pixels).",
        stats.drawn,
        stats.pairs,
        stats.skipped,
        stats.pixels_written
    );
    Ok((working, stats))
}
