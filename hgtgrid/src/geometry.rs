//! Grid geometry derived from the payload size.
//!
//! An HGT payload is a square grid of `side × side` big-endian `i16` samples
//! spanning exactly one degree edge to edge, so adjacent tiles share their
//! border row/column. Everything else in the crate derives its addressing from
//! the [`GridGeometry`] computed here.

use crate::error::{HgtError, Result};

/// Number of bytes per elevation sample.
pub const BYTES_PER_SAMPLE: usize = 2;

/// Number of samples per row/column for SRTM1
const SRTM1_SAMPLES: usize = 3601;

/// Number of samples per row/column for SRTM3
const SRTM3_SAMPLES: usize = 1201;

/// Standard HGT resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SrtmResolution {
    /// SRTM1: 1 arc-second (~30m) resolution
    Srtm1,
    /// SRTM3: 3 arc-second (~90m) resolution
    Srtm3,
}

impl SrtmResolution {
    /// Returns the number of samples per row/column for this resolution.
    pub fn samples(&self) -> usize {
        match self {
            SrtmResolution::Srtm1 => SRTM1_SAMPLES,
            SrtmResolution::Srtm3 => SRTM3_SAMPLES,
        }
    }

    /// Returns the sample spacing in arc-seconds.
    pub fn arc_seconds(&self) -> u32 {
        match self {
            SrtmResolution::Srtm1 => 1,
            SrtmResolution::Srtm3 => 3,
        }
    }

    /// Returns the approximate resolution in meters.
    pub fn meters(&self) -> f64 {
        match self {
            SrtmResolution::Srtm1 => 30.0,
            SrtmResolution::Srtm3 => 90.0,
        }
    }
}

/// Immutable shape of a square HGT grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    side: usize,
    resolution: f64,
}

impl GridGeometry {
    /// Derive the geometry from the payload length in bytes.
    ///
    /// # Errors
    ///
    /// Returns [`HgtError::InvalidFileSize`] if `len / 2` is not the square of
    /// an integer `side >= 2`, or if `len` is odd.
    ///
    /// # Examples
    ///
    /// ```
    /// use hgtgrid::GridGeometry;
    ///
    /// let geometry = GridGeometry::from_byte_len(1201 * 1201 * 2).unwrap();
    /// assert_eq!(geometry.side(), 1201);
    /// assert!(GridGeometry::from_byte_len(1000).is_err());
    /// ```
    pub fn from_byte_len(len: u64) -> Result<Self> {
        let invalid = HgtError::InvalidFileSize { size: len };

        if len % BYTES_PER_SAMPLE as u64 != 0 {
            return Err(invalid);
        }

        let count = len / BYTES_PER_SAMPLE as u64;
        let side = exact_sqrt(count).ok_or(invalid)?;
        if side < 2 {
            return Err(HgtError::InvalidFileSize { size: len });
        }

        usize::try_from(side)
            .ok()
            .and_then(Self::from_valid_side)
            .ok_or(HgtError::InvalidFileSize { size: len })
    }

    /// Build a geometry with an explicit side length.
    ///
    /// # Errors
    ///
    /// Returns [`HgtError::InvalidArgument`] if `side < 2`, or if the payload
    /// size of a `side × side` grid does not fit in a `usize`.
    pub fn with_side(side: usize) -> Result<Self> {
        let invalid = HgtError::InvalidArgument {
            name: "side",
            value: side,
        };
        if side < 2 {
            return Err(invalid);
        }
        Self::from_valid_side(side).ok_or(invalid)
    }

    /// `None` when `side * side * 2` overflows.
    fn from_valid_side(side: usize) -> Option<Self> {
        side.checked_mul(side)?.checked_mul(BYTES_PER_SAMPLE)?;
        Some(Self {
            side,
            resolution: 1.0 / (side - 1) as f64,
        })
    }

    /// Number of samples per row and per column.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Degrees between two adjacent samples.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Total number of samples in the grid.
    pub fn len(&self) -> usize {
        self.side * self.side
    }

    /// Always false: a valid grid has at least 2×2 samples.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Payload size in bytes required by this geometry.
    pub fn byte_len(&self) -> u64 {
        (self.len() * BYTES_PER_SAMPLE) as u64
    }

    /// The standard SRTM resolution matching this side, if any.
    pub fn standard(&self) -> Option<SrtmResolution> {
        match self.side {
            SRTM1_SAMPLES => Some(SrtmResolution::Srtm1),
            SRTM3_SAMPLES => Some(SrtmResolution::Srtm3),
            _ => None,
        }
    }
}

fn exact_sqrt(n: u64) -> Option<u64> {
    let guess = (n as f64).sqrt().round() as u64;
    // f64 sqrt can be off by one for large n
    (guess.saturating_sub(1)..=guess.saturating_add(1))
        .find(|&s| s.checked_mul(s) == Some(n))
}
