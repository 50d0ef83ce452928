use anyhow::{bail, Context, Result};
use hgtgrid::TileOrigin;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub mod blocks;
pub mod cells;
pub mod info;
pub mod query;

/// Resolve a tile argument to a file path.
///
/// Anything that looks like a path (has a `.hgt` extension or a directory
/// component) is used as is; a bare name like `N35E138` is looked up in the
/// data directory.
pub fn resolve_tile_path(data_dir: Option<&Path>, tile: &str) -> Result<PathBuf> {
    let path = PathBuf::from(tile);
    if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("hgt"))
        || path.components().count() > 1
    {
        return Ok(path);
    }

    match data_dir {
        Some(dir) => Ok(dir.join(format!("{}.hgt", tile))),
        None => bail!(
            "Cannot resolve tile {}: use --data-dir or set HGT_DATA_DIR",
            tile
        ),
    }
}

/// Path of the tile containing a coordinate, in the data directory.
pub fn tile_path_for(data_dir: Option<&Path>, lat: f64, lon: f64) -> Result<PathBuf> {
    resolve_tile_path(data_dir, &TileOrigin::containing(lat, lon).to_string())
}

/// Buffered writer to a file, or to stdout.
pub fn output_writer(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_tile_path() {
        let dir = Path::new("/data/srtm");
        assert_eq!(
            resolve_tile_path(Some(dir), "N35E138").unwrap(),
            PathBuf::from("/data/srtm/N35E138.hgt")
        );
        assert_eq!(
            resolve_tile_path(None, "tiles/N35E138.hgt").unwrap(),
            PathBuf::from("tiles/N35E138.hgt")
        );
        assert_eq!(
            resolve_tile_path(Some(dir), "N35E138.HGT").unwrap(),
            PathBuf::from("N35E138.HGT")
        );
        assert!(resolve_tile_path(None, "N35E138").is_err());
    }

    #[test]
    fn test_tile_path_for() {
        let dir = Path::new("/data");
        assert_eq!(
            tile_path_for(Some(dir), -12.3, -77.1).unwrap(),
            PathBuf::from("/data/S13W078.hgt")
        );
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(1201 * 1201 * 2), "2.75 MB");
    }
}
