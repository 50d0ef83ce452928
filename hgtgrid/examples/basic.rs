//! Basic example demonstrating hgtgrid library usage.
//!
//! Run with: cargo run --example basic -- /path/to/N35E138.hgt

use hgtgrid::{HgtError, HgtTile};
use std::env;

fn main() -> Result<(), HgtError> {
    // Get tile path from command line
    let path = env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --example basic -- /path/to/N35E138.hgt");
        std::process::exit(1);
    });

    let tile = HgtTile::open(&path)?;
    let origin = tile.origin();
    println!(
        "{}: {}x{} samples, {:?}",
        tile.name(),
        tile.geometry().side(),
        tile.geometry().side(),
        tile.standard()
    );

    // Query the center and the four corners of the tile
    let lat = f64::from(origin.lat);
    let lon = f64::from(origin.lon);
    let locations = [
        ("center", lat + 0.5, lon + 0.5),
        ("north-west", lat + 1.0, lon),
        ("north-east", lat + 1.0, lon + 1.0),
        ("south-west", lat, lon),
        ("south-east", lat, lon + 1.0),
    ];

    for (name, lat, lon) in &locations {
        let sample = tile.get_elevation(*lat, *lon)?;
        match sample.elevation() {
            Some(elevation) => println!(
                "{name}: row {} col {} -> {elevation}m",
                sample.row, sample.col
            ),
            None => println!("{name}: row {} col {} -> void", sample.row, sample.col),
        }
    }

    // Summarize the tile in 100x100 blocks
    let mut highest: Option<(i16, usize, usize)> = None;
    for block in tile.samples(100, 100)? {
        let block = block?;
        if let Some((_, max)) = block.elevation_range() {
            if highest.map_or(true, |(h, _, _)| max > h) {
                highest = Some((max, block.row, block.col));
            }
        }
    }
    if let Some((max, row, col)) = highest {
        println!("Highest block starts at row {row} col {col}: {max}m");
    }

    tile.close();
    Ok(())
}
