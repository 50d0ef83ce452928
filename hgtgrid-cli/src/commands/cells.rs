use anyhow::{Context, Result};
use hgtgrid::HgtTile;
use std::path::Path;
use tracing::debug;

use super::{output_writer, resolve_tile_path};

pub fn run(
    data_dir: Option<&Path>,
    tile: &str,
    limit: Option<usize>,
    output: Option<&Path>,
) -> Result<()> {
    let tile_path = resolve_tile_path(data_dir, tile)?;
    let tile = HgtTile::open(&tile_path)
        .with_context(|| format!("Failed to load tile {}", tile_path.display()))?;

    let mut writer = csv::Writer::from_writer(output_writer(output)?);
    writer.write_record([
        "row",
        "col",
        "index",
        "sw_lat",
        "sw_lon",
        "ne_lat",
        "ne_lon",
        "elevation",
    ])?;

    let cells = tile.values().take(limit.unwrap_or(usize::MAX));
    for cell in cells {
        let cell = cell?;
        let footprint = cell.footprint;
        let elevation = cell
            .elevation()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "void".to_string());

        writer.write_record(&[
            cell.row.to_string(),
            cell.col.to_string(),
            cell.index.to_string(),
            footprint.south_west.lat.to_string(),
            footprint.south_west.lon.to_string(),
            footprint.north_east.lat.to_string(),
            footprint.north_east.lon.to_string(),
            elevation,
        ])?;
    }

    writer.flush()?;
    debug!(tile = %tile.name(), "wrote cells");
    Ok(())
}
