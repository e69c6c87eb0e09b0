//! dotjoin-io: Filesystem collaborators for dotjoin.
//!
//! Decodes image files into [`PixelGrid`]s, encodes them back, and runs the
//! load -> connect -> save sequence for command-line drivers. All pixel
//! logic lives in `dotjoin-pipeline`.

pub mod error;
pub mod file;

use std::path::Path;

use dotjoin_pipeline::{ConnectConfig, PixelGrid};

pub use error::{IoError, ProcessError};
pub use file::{load_grid, output_path, save_grid};

/// Load the image at `load_path`, connect its dots, and save the result.
///
/// Returns the connected grid so callers can inspect it without decoding
/// the saved file again.
///
/// # Errors
///
/// Returns [`ProcessError::Io`] if loading or saving fails and
/// [`ProcessError::Connect`] if drawing fails. Nothing is written to
/// `save_path` unless connecting succeeds.
pub fn process(
    load_path: impl AsRef<Path>,
    save_path: impl AsRef<Path>,
    config: &ConnectConfig,
) -> Result<PixelGrid, ProcessError> {
    let grid = load_grid(load_path)?;
    log::info!("Connecting the dots ...");
    let connected = dotjoin_pipeline::connect(&grid, config)?;
    save_grid(&connected, save_path)?;
    log::info!("Processing done!");
    Ok(connected)
}
