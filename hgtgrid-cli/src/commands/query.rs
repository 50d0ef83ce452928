use anyhow::{Context, Result};
use hgtgrid::HgtTile;
use serde::Serialize;
use std::path::Path;

use super::{resolve_tile_path, tile_path_for};

#[derive(Serialize)]
struct ElevationResponse {
    tile: String,
    lat: f64,
    lon: f64,
    row: usize,
    col: usize,
    elevation: Option<i16>,
}

pub fn run(
    data_dir: Option<&Path>,
    tile: Option<String>,
    lat: f64,
    lon: f64,
    json: bool,
) -> Result<()> {
    let tile_path = match tile {
        Some(tile) => resolve_tile_path(data_dir, &tile)?,
        None => tile_path_for(data_dir, lat, lon)?,
    };

    let tile = HgtTile::open(&tile_path)
        .with_context(|| format!("Failed to load tile {}", tile_path.display()))?;
    let sample = tile
        .get_elevation(lat, lon)
        .context("Failed to get elevation")?;

    if json {
        let response = ElevationResponse {
            tile: tile.origin().to_string(),
            lat,
            lon,
            row: sample.row,
            col: sample.col,
            elevation: sample.elevation(),
        };
        println!("{}", serde_json::to_string(&response)?);
    } else {
        match sample.elevation() {
            Some(elev) => println!("{} {} {}", sample.row, sample.col, elev),
            None => println!("{} {} void", sample.row, sample.col),
        }
    }

    Ok(())
}
