use anyhow::{Context, Result};
use hgtgrid::HgtTile;
use std::path::Path;

use super::{format_size, resolve_tile_path, tile_path_for};

pub fn run(data_dir: Option<&Path>, tile: Option<String>, coord: Option<(f64, f64)>) -> Result<()> {
    let tile_path = match (coord, tile) {
        (Some((lat, lon)), _) => tile_path_for(data_dir, lat, lon)?,
        (None, Some(tile)) => resolve_tile_path(data_dir, &tile)?,
        (None, None) => anyhow::bail!("Specify a tile or --lat/--lon"),
    };

    let tile = HgtTile::open(&tile_path)
        .with_context(|| format!("Failed to load tile {}", tile_path.display()))?;
    let file_size = std::fs::metadata(&tile_path)?.len();

    let geometry = tile.geometry();
    let origin = tile.origin();

    // Min/max over every non-void sample
    let (mut min_elev, mut max_elev) = (i16::MAX, i16::MIN);
    let mut void_count = 0u64;
    for cell in tile.values() {
        match cell?.elevation() {
            Some(elev) => {
                min_elev = min_elev.min(elev);
                max_elev = max_elev.max(elev);
            }
            None => void_count += 1,
        }
    }

    let resolution_str = match tile.standard() {
        Some(standard) => format!(
            "SRTM{} (~{}m)",
            standard.arc_seconds(),
            standard.meters()
        ),
        None => "non-standard".to_string(),
    };
    let bounds = tile.mapper().bounds();

    println!("Tile: {}", tile.name());
    println!("Path: {}", tile_path.display());
    println!();
    println!(
        "Resolution: {} ({}x{} samples, {:.6}° spacing)",
        resolution_str,
        geometry.side(),
        geometry.side(),
        geometry.resolution()
    );
    println!(
        "Coverage: lat {} to {}, lon {} to {}",
        origin.lat,
        origin.lat + 1,
        origin.lon,
        origin.lon + 1
    );
    println!(
        "Footprint: lat {:.6} to {:.6}, lon {:.6} to {:.6}",
        bounds.south(),
        bounds.north(),
        bounds.west(),
        bounds.east()
    );
    println!("File size: {}", format_size(file_size));
    println!();

    if min_elev <= max_elev {
        println!("Min elevation: {}m", min_elev);
        println!("Max elevation: {}m", max_elev);
    }

    if void_count > 0 {
        let void_pct = (void_count as f64 / geometry.len() as f64) * 100.0;
        println!("Void samples: {} ({:.1}%)", void_count, void_pct);
    }

    tile.close();
    Ok(())
}
