//! dotjoin-pipeline: Pure dot connection core (sans-IO).
//!
//! Finds isolated non-black "dot" pixels in a grid and connects every
//! unordered pair of them with a straight rasterized line:
//! scan -> enumerate pairs -> rasterize each pair -> write into a copy.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! pixel grids. Loading and saving image files lives in `dotjoin-io`.
//!
//! Logging goes through the `log` facade. Nothing here installs a logger;
//! the binary picks the sink.

pub mod connect;
pub mod grid;
pub mod raster;
pub mod scan;
pub mod types;

pub use connect::{ConnectStats, connect, connect_with_stats};
pub use grid::PixelGrid;
pub use raster::{DrawOutcome, LineAlgorithm, LineRasterizer, draw_line, draw_line_named, slope};
pub use scan::scan_dots;
pub use types::{
    Color, ConnectConfig, ConnectError, Coordinate, Dimensions, GridError, ParseColorError,
};
