//! Conversion between geographic coordinates and grid cells.
//!
//! Rows grow southwards from the northern edge of the tile and columns grow
//! eastwards from the western edge:
//!
//! ```text
//!  (origin.lat + 1, origin.lon)          (origin.lat + 1, origin.lon + 1)
//!          row 0, col 0  ----------------  row 0, col side-1
//!               |                                  |
//!          row side-1, col 0  -----------  row side-1, col side-1
//!  (origin.lat, origin.lon)              (origin.lat, origin.lon + 1)
//! ```
//!
//! Each sample stands for the square area around its nominal coordinate, half
//! a sample spacing in every direction; that square is its [`Footprint`].
//! Coordinates are always `(lat, lon)`.

use crate::error::{HgtError, Result};
use crate::filename::TileOrigin;
use crate::geometry::GridGeometry;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// The square area covered by a cell or a block of cells.
///
/// Corners are always listed south-west, north-west, north-east, south-east.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub south_west: Coordinate,
    pub north_west: Coordinate,
    pub north_east: Coordinate,
    pub south_east: Coordinate,
}

impl Footprint {
    fn from_edges(north: f64, south: f64, west: f64, east: f64) -> Self {
        Self {
            south_west: Coordinate::new(south, west),
            north_west: Coordinate::new(north, west),
            north_east: Coordinate::new(north, east),
            south_east: Coordinate::new(south, east),
        }
    }

    /// Corners in south-west, north-west, north-east, south-east order.
    pub fn corners(&self) -> [Coordinate; 4] {
        [
            self.south_west,
            self.north_west,
            self.north_east,
            self.south_east,
        ]
    }

    pub fn north(&self) -> f64 {
        self.north_west.lat
    }

    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    pub fn west(&self) -> f64 {
        self.south_west.lon
    }

    pub fn east(&self) -> f64 {
        self.north_east.lon
    }

    /// Midpoint of the footprint.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.north() + self.south()) / 2.0,
            (self.west() + self.east()) / 2.0,
        )
    }
}

/// Maps between `(lat, lon)` and `(row, col)` for one tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    geometry: GridGeometry,
    origin: TileOrigin,
}

impl CoordinateMapper {
    pub fn new(geometry: GridGeometry, origin: TileOrigin) -> Self {
        Self { geometry, origin }
    }

    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    pub fn origin(&self) -> TileOrigin {
        self.origin
    }

    /// Latitude of the northern sample row.
    fn north_lat(&self) -> f64 {
        f64::from(self.origin.lat) + 1.0
    }

    /// Longitude of the western sample column.
    fn west_lon(&self) -> f64 {
        f64::from(self.origin.lon)
    }

    /// Converts a distance in samples to degrees.
    fn degrees(&self, samples: f64) -> f64 {
        samples / (self.geometry.side() - 1) as f64
    }

    fn check_cell(&self, row: usize, col: usize) -> Result<()> {
        let side = self.geometry.side();
        if row >= side || col >= side {
            return Err(HgtError::CellOutOfBounds { row, col, side });
        }
        Ok(())
    }

    /// Find the cell nearest to a coordinate.
    ///
    /// Rounds half away from zero. Coordinates up to half a sample spacing
    /// outside the tile's nominal 1° square still map to the edge cells.
    ///
    /// # Errors
    ///
    /// Returns [`HgtError::OutOfBounds`] when the nearest cell would fall
    /// outside the grid. The index is never clamped.
    pub fn to_index(&self, lat: f64, lon: f64) -> Result<(usize, usize)> {
        let intervals = (self.geometry.side() - 1) as f64;
        let row = ((self.north_lat() - lat) * intervals).round();
        let col = ((lon - self.west_lon()) * intervals).round();

        // NaN fails the range check too
        let range = 0.0..self.geometry.side() as f64;
        if !range.contains(&row) || !range.contains(&col) {
            return Err(HgtError::OutOfBounds { lat, lon });
        }

        Ok((row as usize, col as usize))
    }

    /// Whether [`to_index`](Self::to_index) would succeed for this coordinate.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.to_index(lat, lon).is_ok()
    }

    /// Nominal coordinate of a cell.
    pub fn to_coordinate(&self, row: usize, col: usize) -> Result<Coordinate> {
        self.check_cell(row, col)?;
        Ok(Coordinate::new(
            self.north_lat() - self.degrees(row as f64),
            self.west_lon() + self.degrees(col as f64),
        ))
    }

    /// Flat sample index of a cell (`row * side + col`).
    pub fn index(&self, row: usize, col: usize) -> Result<usize> {
        self.check_cell(row, col)?;
        Ok(row * self.geometry.side() + col)
    }

    /// The square a single cell covers.
    pub fn footprint(&self, row: usize, col: usize) -> Result<Footprint> {
        self.block_footprint(row, col, 1, 1)
    }

    /// Bounding square of a `width × height` block whose top-left cell is
    /// `(row, col)`, padded by half a sample at the outer edges like a
    /// single-cell footprint.
    ///
    /// # Errors
    ///
    /// Returns [`HgtError::InvalidArgument`] for an empty block and
    /// [`HgtError::CellOutOfBounds`] if the block does not fit in the grid.
    pub fn block_footprint(
        &self,
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    ) -> Result<Footprint> {
        if width == 0 {
            return Err(HgtError::InvalidArgument {
                name: "width",
                value: width,
            });
        }
        if height == 0 {
            return Err(HgtError::InvalidArgument {
                name: "height",
                value: height,
            });
        }
        self.check_cell(row, col)?;
        let side = self.geometry.side();
        if width > side - col || height > side - row {
            return Err(HgtError::CellOutOfBounds {
                row: row.saturating_add(height - 1),
                col: col.saturating_add(width - 1),
                side,
            });
        }

        let north = self.north_lat() - self.degrees(row as f64 - 0.5);
        let south = self.north_lat() - self.degrees((row + height) as f64 - 0.5);
        let west = self.west_lon() + self.degrees(col as f64 - 0.5);
        let east = self.west_lon() + self.degrees((col + width) as f64 - 0.5);

        Ok(Footprint::from_edges(north, south, west, east))
    }

    /// Footprint of the whole grid.
    pub fn bounds(&self) -> Footprint {
        let side = self.geometry.side();
        let north = self.north_lat() + self.degrees(0.5);
        let south = self.north_lat() - self.degrees(side as f64 - 0.5);
        let west = self.west_lon() - self.degrees(0.5);
        let east = self.west_lon() + self.degrees(side as f64 - 0.5);

        Footprint::from_edges(north, south, west, east)
    }
}
