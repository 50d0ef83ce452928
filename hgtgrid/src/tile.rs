//! HGT tile handle and elevation lookup.
//!
//! This module provides the [`HgtTile`] struct, which owns an HGT payload for
//! its whole lifetime and answers elevation queries against it.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use tracing::debug;

use crate::error::{HgtError, Result};
use crate::filename::{parse_tile_name, TileOrigin};
use crate::geometry::{GridGeometry, SrtmResolution};
use crate::iter::{Samples, Values};
use crate::mapper::CoordinateMapper;
use crate::source::{ByteSource, SampleReader};

/// Value indicating no data (void) in HGT files
pub const VOID_VALUE: i16 = -32768;

/// Result of an elevation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElevationSample {
    /// Row of the nearest cell (0 = north edge).
    pub row: usize,
    /// Column of the nearest cell (0 = west edge).
    pub col: usize,
    /// Raw sample value, [`VOID_VALUE`] included.
    pub value: i16,
}

impl ElevationSample {
    /// The elevation in meters, or `None` for a void sample.
    pub fn elevation(&self) -> Option<i16> {
        (self.value != VOID_VALUE).then_some(self.value)
    }
}

/// An open HGT tile.
///
/// The tile exclusively owns its payload source. Dropping the tile, or calling
/// [`close`](Self::close), releases it; iterators borrow the tile so they
/// cannot outlive it.
///
/// # Example
///
/// ```ignore
/// use hgtgrid::HgtTile;
///
/// let tile = HgtTile::open("N35E138.hgt")?;
/// let sample = tile.get_elevation(35.5, 138.5)?;
/// println!("row {} col {}: {}m", sample.row, sample.col, sample.value);
/// ```
pub struct HgtTile<S: ByteSource = Mmap> {
    source: S,
    name: String,
    mapper: CoordinateMapper,
}

impl HgtTile<Mmap> {
    /// Open and memory-map an `.hgt` file.
    ///
    /// The origin comes from the file name and the grid size from the file
    /// length.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist
    /// - The file name is not a valid tile name
    /// - The file size doesn't describe a square grid
    /// - The file cannot be opened or memory-mapped
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(HgtError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        // Validate the name before touching the file
        parse_tile_name(&name)?;

        let file = File::open(path)?;

        // SAFETY: Memory mapping is safe as long as the file is not modified
        // while mapped. We open the file read-only and don't expose the mapping.
        let mmap = unsafe { Mmap::map(&file)? };

        Self::from_source(&name, mmap)
    }
}

impl<S: ByteSource> HgtTile<S> {
    /// Wrap an already available payload.
    ///
    /// `name` is the tile name or file name the origin is parsed from.
    ///
    /// # Examples
    ///
    /// ```
    /// use hgtgrid::HgtTile;
    ///
    /// let tile = HgtTile::from_source("N00E010.hgt", vec![0u8; 1201 * 1201 * 2]).unwrap();
    /// assert_eq!(tile.geometry().side(), 1201);
    /// assert_eq!(tile.get_elevation(1.0001, 10.0001).unwrap().row, 0);
    /// ```
    pub fn from_source(name: &str, source: S) -> Result<Self> {
        let origin = parse_tile_name(name)?;
        let geometry = GridGeometry::from_byte_len(source.len())?;
        Ok(Self::build(name.to_string(), origin, geometry, source))
    }

    /// Wrap a payload with explicit origin and geometry.
    ///
    /// The payload may be longer than the geometry requires; trailing bytes
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`HgtError::Io`] with [`std::io::ErrorKind::UnexpectedEof`] if
    /// the payload is shorter than `geometry.byte_len()`.
    pub fn from_source_with_geometry(
        origin: TileOrigin,
        geometry: GridGeometry,
        source: S,
    ) -> Result<Self> {
        if source.len() < geometry.byte_len() {
            return Err(HgtError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!(
                    "payload has {} bytes, grid of side {} needs {}",
                    source.len(),
                    geometry.side(),
                    geometry.byte_len()
                ),
            )));
        }
        Ok(Self::build(origin.to_string(), origin, geometry, source))
    }

    fn build(name: String, origin: TileOrigin, geometry: GridGeometry, source: S) -> Self {
        debug!(
            name = %name,
            origin = %origin,
            side = geometry.side(),
            standard = ?geometry.standard(),
            "opened HGT tile"
        );

        Self {
            source,
            name,
            mapper: CoordinateMapper::new(geometry, origin),
        }
    }

    /// Get the sample nearest to the specified coordinates.
    ///
    /// # Arguments
    ///
    /// * `lat` - Latitude in decimal degrees
    /// * `lon` - Longitude in decimal degrees
    ///
    /// # Errors
    ///
    /// Returns [`HgtError::OutOfBounds`] if the coordinates are outside the
    /// tile, or [`HgtError::Io`] if the sample cannot be read.
    pub fn get_elevation(&self, lat: f64, lon: f64) -> Result<ElevationSample> {
        let (row, col) = self.mapper.to_index(lat, lon)?;
        let value = self.reader().read(row, col)?;
        Ok(ElevationSample { row, col, value })
    }

    /// Read the raw sample at a row/column.
    pub fn value_at(&self, row: usize, col: usize) -> Result<i16> {
        self.reader().read(row, col)
    }

    /// Iterate over every cell in row-major order.
    pub fn values(&self) -> Values<'_, S> {
        Values::new(self)
    }

    /// Iterate over `width × height` blocks in row-major block order.
    ///
    /// # Errors
    ///
    /// Returns [`HgtError::InvalidArgument`] if `width` or `height` is zero.
    pub fn samples(&self, width: usize, height: usize) -> Result<Samples<'_, S>> {
        Samples::new(self, width, height)
    }

    /// Release the payload source.
    ///
    /// Dropping the tile has the same effect; this makes the release explicit
    /// at the call site.
    pub fn close(self) {
        debug!(name = %self.name, "closed HGT tile");
    }

    pub(crate) fn reader(&self) -> SampleReader<'_, S> {
        SampleReader::new(&self.source, self.mapper.geometry())
    }

    /// Returns the name the tile was opened with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the south-west origin parsed from the name.
    pub fn origin(&self) -> TileOrigin {
        self.mapper.origin()
    }

    /// Returns the grid geometry.
    pub fn geometry(&self) -> GridGeometry {
        self.mapper.geometry()
    }

    /// Returns the coordinate mapper for this tile.
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Returns the standard SRTM resolution, if the grid has one.
    pub fn standard(&self) -> Option<SrtmResolution> {
        self.mapper.geometry().standard()
    }
}

impl<S: ByteSource> std::fmt::Debug for HgtTile<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HgtTile")
            .field("name", &self.name)
            .field("mapper", &self.mapper)
            .finish_non_exhaustive()
    }
}
