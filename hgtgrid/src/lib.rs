//! # hgtgrid - HGT Elevation Grid Decoder
//!
//! Decodes SRTM `.hgt` digital elevation tiles and gives random and sequential
//! access to their samples in geographic coordinates.
//!
//! ## Features
//!
//! - **Automatic Detection**: grid size comes from the file size, origin from the file name
//! - **Random Access**: nearest-sample lookup by latitude/longitude
//! - **Lazy Traversal**: row-major iteration over every cell or over rectangular blocks
//! - **Footprints**: the square area each sample (or block) covers, for rasterizers and map tiles
//!
//! ## Quick Start
//!
//! ```ignore
//! use hgtgrid::HgtTile;
//!
//! let tile = HgtTile::open("/data/N35E138.hgt")?;
//! let sample = tile.get_elevation(35.5, 138.7)?;
//! println!("row {} col {}: {}m", sample.row, sample.col, sample.value);
//!
//! for block in tile.samples(50, 50)? {
//!     let block = block?;
//!     println!("{}x{} block at ({}, {})", block.width, block.height, block.row, block.col);
//! }
//! ```
//!
//! ## HGT Data Format
//!
//! HGT files contain elevation data in a simple binary format:
//!
//! - **SRTM1**: 3601×3601 samples, 1 arc-second (~30m) resolution
//! - **SRTM3**: 1201×1201 samples, 3 arc-second (~90m) resolution
//!
//! Each sample is a 16-bit big-endian signed integer representing elevation in meters,
//! stored row by row from the northern edge. The special value -32768 indicates void
//! (no data). Any other square size is accepted as long as the file holds exactly
//! `side × side` samples.

pub mod error;
pub mod filename;
pub mod geometry;
pub mod iter;
pub mod mapper;
pub mod source;
pub mod tile;

#[cfg(feature = "geojson")]
pub mod geojson;

// Re-export main types at crate root for convenience
pub use error::{HgtError, Result};
pub use filename::{parse_tile_name, TileOrigin};
pub use geometry::{GridGeometry, SrtmResolution};
pub use iter::{Block, CellValue, Samples, Values};
pub use mapper::{Coordinate, CoordinateMapper, Footprint};
pub use source::ByteSource;
pub use tile::{ElevationSample, HgtTile, VOID_VALUE};
