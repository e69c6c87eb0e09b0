//! Error types for file I/O and the top-level driver.

use std::path::PathBuf;

use dotjoin_pipeline::ConnectError;

/// Failure to read or write an image file.
///
/// The underlying `image` error is kept as the source so the caller sees
/// the decoder's or encoder's own message.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// The file is missing, unreadable, or not a decodable image.
    #[error("failed to load image from '{}'", path.display())]
    Load {
        /// Path that was read.
        path: PathBuf,
        /// Decoder or filesystem error.
        #[source]
        source: image::ImageError,
    },

    /// The file could not be written or the format cannot hold the grid.
    #[error("failed to save image to '{}'", path.display())]
    Save {
        /// Path that was written.
        path: PathBuf,
        /// Encoder or filesystem error.
        #[source]
        source: image::ImageError,
    },
}

/// Any failure of [`process`](crate::process).
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// Loading or saving failed.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Connecting the dots failed.
    #[error(transparent)]
    Connect(#[from] ConnectError),
}
