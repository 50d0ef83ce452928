//! GeoJSON export of cell and block footprints.
//!
//! Enable the `geojson` feature to use this module. Polygons use GeoJSON's
//! `[longitude, latitude]` order; rings run south-west, north-west,
//! north-east, south-east and close back on the south-west corner.
//!
//! # Example
//!
//! ```ignore
//! use hgtgrid::HgtTile;
//! use hgtgrid::geojson::block_feature;
//!
//! let tile = HgtTile::open("N35E138.hgt")?;
//! let features = tile
//!     .samples(100, 100)?
//!     .map(|block| block.map(|b| block_feature(&b)))
//!     .collect::<hgtgrid::Result<Vec<_>>>()?;
//! ```

use geojson::{Feature, Geometry, JsonValue, Value as GeoJsonValue};

use crate::iter::{Block, CellValue};
use crate::mapper::Footprint;

/// Closed polygon ring around a footprint.
pub fn footprint_polygon(footprint: &Footprint) -> Geometry {
    let mut ring: Vec<Vec<f64>> = footprint
        .corners()
        .iter()
        .map(|corner| vec![corner.lon, corner.lat])
        .collect();
    ring.push(ring[0].clone());

    Geometry::new(GeoJsonValue::Polygon(vec![ring]))
}

fn footprint_feature(footprint: &Footprint) -> Feature {
    let mut feature = Feature::from(footprint_polygon(footprint));
    feature.bbox = Some(vec![
        footprint.west(),
        footprint.south(),
        footprint.east(),
        footprint.north(),
    ]);
    feature
}

/// Polygon feature for one cell.
///
/// Properties: `row`, `col`, `index` and `elevation` (`null` for void).
pub fn cell_feature(cell: &CellValue) -> Feature {
    let mut feature = footprint_feature(&cell.footprint);
    feature.set_property("row", cell.row);
    feature.set_property("col", cell.col);
    feature.set_property("index", cell.index);
    feature.set_property(
        "elevation",
        cell.elevation().map_or(JsonValue::Null, JsonValue::from),
    );
    feature
}

/// Polygon feature for one block.
///
/// Properties: `row`, `col`, `index`, `width`, `height` and the `min` / `max`
/// non-void elevations (`null` when the whole block is void).
pub fn block_feature(block: &Block) -> Feature {
    let mut feature = footprint_feature(&block.footprint);
    feature.set_property("row", block.row);
    feature.set_property("col", block.col);
    feature.set_property("index", block.index);
    feature.set_property("width", block.width);
    feature.set_property("height", block.height);

    let (min, max) = match block.elevation_range() {
        Some((min, max)) => (JsonValue::from(min), JsonValue::from(max)),
        None => (JsonValue::Null, JsonValue::Null),
    };
    feature.set_property("min", min);
    feature.set_property("max", max);
    feature
}
