//! Loading and saving pixel grids as image files.

use std::path::{Path, PathBuf};

use dotjoin_pipeline::{LineAlgorithm, PixelGrid};

use crate::error::IoError;

/// Decode the image at `path` into a grid.
///
/// The format is guessed from the file contents and extension, as
/// [`image::open`] does. Images with an alpha channel load as RGBA grids.
///
/// # Errors
///
/// Returns [`IoError::Load`] if the file is missing or cannot be decoded.
pub fn load_grid(path: impl AsRef<Path>) -> Result<PixelGrid, IoError> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| IoError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = PixelGrid::from_dynamic(img);
    log::info!(
        "Loaded {} image with {} channels from path '{}'.",
        grid.dimensions(),
        grid.channels(),
        path.display()
    );
    Ok(grid)
}

/// Encode `grid` to `path`, choosing the format from the extension.
///
/// # Errors
///
/// Returns [`IoError::Save`] if the extension is unknown, the format cannot
/// store the grid's channel layout (e.g. RGBA as JPEG), or the file cannot
/// be written.
pub fn save_grid(grid: &PixelGrid, path: impl AsRef<Path>) -> Result<(), IoError> {
    let path = path.as_ref();
    grid.clone()
        .into_dynamic()
        .save(path)
        .map_err(|source| IoError::Save {
            path: path.to_path_buf(),
            source,
        })?;
    log::info!("Saved image to path '{}'.", path.display());
    Ok(())
}

/// Where the connected image for `input` goes by default.
///
/// `data/dots.png` with [`LineAlgorithm::Naive`] becomes
/// `data/dots_connected_naive.png`, next to the input.
#[must_use]
pub fn output_path(input: &Path, algorithm: LineAlgorithm) -> PathBuf {
    let stem = input.file_stem().map_or_else(
        || "image".into(),
        |s| s.to_string_lossy().into_owned(),
    );
    let mut name = format!("{stem}_connected_{algorithm}");
    if let Some(ext) = input.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    input.with_file_name(name)
}
