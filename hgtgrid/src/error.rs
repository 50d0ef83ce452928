//! Error types for the hgtgrid library.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when decoding or querying an HGT tile.
#[derive(Error, Debug)]
pub enum HgtError {
    /// IO error when reading the payload, including truncated payloads.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The .hgt file does not exist.
    #[error("HGT file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The tile name doesn't match `[N|S]DD[E|W]DDD`.
    #[error("Invalid tile name: {name:?} (expected [N|S]DD[E|W]DDD, e.g. N35E138)")]
    InvalidName { name: String },

    /// The payload length doesn't describe a square grid of 16-bit samples.
    #[error("Invalid file size: {size} bytes (expected 2 * side * side with side >= 2)")]
    InvalidFileSize { size: u64 },

    /// Coordinates map outside the tile's grid.
    #[error("Coordinates out of bounds: lat={lat}, lon={lon}")]
    OutOfBounds { lat: f64, lon: f64 },

    /// Row or column outside the tile's grid.
    #[error("Cell out of bounds: row={row}, col={col} (grid side is {side})")]
    CellOutOfBounds { row: usize, col: usize, side: usize },

    /// An argument was outside its accepted range.
    #[error("Invalid argument: {name}={value}")]
    InvalidArgument { name: &'static str, value: usize },
}

/// Result type alias using [`HgtError`].
pub type Result<T> = std::result::Result<T, HgtError>;
