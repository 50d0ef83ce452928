use anyhow::{Context, Result};
use geojson::{FeatureCollection, GeoJson};
use hgtgrid::{geojson::block_feature, HgtTile};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::Path;
use tracing::debug;

use super::{output_writer, resolve_tile_path};

pub fn run(
    data_dir: Option<&Path>,
    tile: &str,
    width: usize,
    height: usize,
    geojson: bool,
    output: Option<&Path>,
) -> Result<()> {
    let tile_path = resolve_tile_path(data_dir, tile)?;
    let tile = HgtTile::open(&tile_path)
        .with_context(|| format!("Failed to load tile {}", tile_path.display()))?;

    let samples = tile
        .samples(width, height)
        .context("Invalid block size")?;
    debug!(
        tile = %tile.name(),
        width,
        height,
        blocks = samples.block_count(),
        "iterating blocks"
    );

    let pb = progress_bar(samples.block_count() as u64, output)?;

    let mut writer = output_writer(output)?;

    if geojson {
        let mut features = Vec::with_capacity(samples.block_count());
        for block in samples {
            features.push(block_feature(&block?));
            pb.inc(1);
        }
        let collection = GeoJson::FeatureCollection(FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        });
        serde_json::to_writer_pretty(&mut writer, &collection)?;
        writeln!(writer)?;
    } else {
        writeln!(writer, "row\tcol\twidth\theight\tmin\tmax")?;
        for block in samples {
            let block = block?;
            let (min, max) = match block.elevation_range() {
                Some((min, max)) => (min.to_string(), max.to_string()),
                None => ("void".to_string(), "void".to_string()),
            };
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}",
                block.row, block.col, block.width, block.height, min, max
            )?;
            pb.inc(1);
        }
    }

    pb.finish_with_message("done");
    writer.flush()?;

    if let Some(path) = output {
        println!("Output written to: {}", path.display());
    }
    Ok(())
}

/// Progress is drawn on stderr, and only when the blocks go to a file so
/// it never interleaves with rows printed on the terminal.
fn progress_bar(len: u64, output: Option<&Path>) -> Result<ProgressBar> {
    let pb = match output {
        Some(_) => ProgressBar::new(len),
        None => ProgressBar::hidden(),
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )?
            .progress_chars("#>-"),
    );
    Ok(pb)
}
