//! HGT tile name parsing.
//!
//! # Name Format
//!
//! HGT files follow the naming convention: `{N|S}{lat}{E|W}{lon}.hgt`
//!
//! - Latitude: 2 digits with N/S prefix (e.g., N35, S12)
//! - Longitude: 3 digits with E/W prefix (e.g., E138, W077)
//!
//! The name represents the **southwest corner** of the 1° × 1° tile.

use std::fmt;

use crate::error::{HgtError, Result};

/// South-west corner of a tile, in whole degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileOrigin {
    /// Latitude of the southern edge (negative in the southern hemisphere).
    pub lat: i32,
    /// Longitude of the western edge (negative in the western hemisphere).
    pub lon: i32,
}

impl TileOrigin {
    pub fn new(lat: i32, lon: i32) -> Self {
        Self { lat, lon }
    }

    /// Origin of the tile containing the given coordinate.
    ///
    /// # Examples
    ///
    /// ```
    /// use hgtgrid::filename::TileOrigin;
    ///
    /// assert_eq!(TileOrigin::containing(35.5, 138.7).to_string(), "N35E138");
    /// assert_eq!(TileOrigin::containing(-12.3, -77.1).to_string(), "S13W078");
    /// ```
    pub fn containing(lat: f64, lon: f64) -> Self {
        Self {
            lat: lat.floor() as i32,
            lon: lon.floor() as i32,
        }
    }
}

impl fmt::Display for TileOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat_prefix = if self.lat >= 0 { 'N' } else { 'S' };
        let lon_prefix = if self.lon >= 0 { 'E' } else { 'W' };

        write!(
            f,
            "{}{:02}{}{:03}",
            lat_prefix,
            self.lat.unsigned_abs(),
            lon_prefix,
            self.lon.unsigned_abs()
        )
    }
}

/// Parse a tile name into its south-west origin.
///
/// Accepts a bare name, a file name or a full path. Directory components are
/// stripped, as is everything from the first `.` on, so `N00E010.hgt` and
/// `N00E010.SRTMGL1.hgt` both parse. Hemisphere letters are case insensitive.
///
/// # Errors
///
/// Returns [`HgtError::InvalidName`] unless the stem is exactly
/// `[N|S]DD[E|W]DDD`.
///
/// # Examples
///
/// ```
/// use hgtgrid::filename::{parse_tile_name, TileOrigin};
///
/// assert_eq!(parse_tile_name("N00E010").unwrap(), TileOrigin::new(0, 10));
/// assert_eq!(parse_tile_name("/data/S05W120.hgt").unwrap(), TileOrigin::new(-5, -120));
/// assert!(parse_tile_name("N0E010").is_err());
/// ```
pub fn parse_tile_name(name: &str) -> Result<TileOrigin> {
    let invalid = || HgtError::InvalidName {
        name: name.to_string(),
    };

    // Extract just the file name if a path is given
    let file_name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let stem = file_name.split('.').next().unwrap_or(file_name);

    let bytes = stem.as_bytes();
    if bytes.len() != 7 {
        return Err(invalid());
    }

    let lat_sign = match bytes[0] {
        b'N' | b'n' => 1,
        b'S' | b's' => -1,
        _ => return Err(invalid()),
    };
    let lon_sign = match bytes[3] {
        b'E' | b'e' => 1,
        b'W' | b'w' => -1,
        _ => return Err(invalid()),
    };

    let lat = parse_digits(&bytes[1..3]).ok_or_else(invalid)?;
    let lon = parse_digits(&bytes[4..7]).ok_or_else(invalid)?;

    Ok(TileOrigin::new(lat * lat_sign, lon * lon_sign))
}

fn parse_digits(digits: &[u8]) -> Option<i32> {
    digits.iter().try_fold(0i32, |acc, &b| {
        b.is_ascii_digit().then(|| acc * 10 + i32::from(b - b'0'))
    })
}
