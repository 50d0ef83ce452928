use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

/// HGT elevation tile inspection tool
#[derive(Parser)]
#[command(name = "hgtgrid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing .hgt files, used to resolve bare tile names
    #[arg(short, long, env = "HGT_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display information about a tile
    Info {
        /// Path to .hgt file, or tile name (e.g., N35E138)
        #[arg(required_unless_present_all = ["lat", "lon"])]
        tile: Option<String>,

        /// Select the tile containing this latitude instead
        #[arg(long, requires = "lon", conflicts_with = "tile")]
        lat: Option<f64>,

        /// Select the tile containing this longitude instead
        #[arg(long, requires = "lat", conflicts_with = "tile")]
        lon: Option<f64>,
    },

    /// Query the sample nearest to a coordinate
    Query {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Tile to read (defaults to the tile containing the coordinate)
        #[arg(short, long)]
        tile: Option<String>,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Dump every cell of a tile as CSV, in row-major order
    Cells {
        /// Path to .hgt file, or tile name
        tile: String,

        /// Stop after this many cells
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarize a tile in rectangular blocks
    Blocks {
        /// Path to .hgt file, or tile name
        tile: String,

        /// Block width in samples
        #[arg(long, default_value = "50")]
        width: usize,

        /// Block height in samples
        #[arg(long, default_value = "50")]
        height: usize,

        /// Emit a GeoJSON FeatureCollection of block footprints
        #[arg(short, long)]
        geojson: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hgtgrid=info,hgtgrid_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { tile, lat, lon } => {
            commands::info::run(cli.data_dir.as_deref(), tile, lat.zip(lon))
        }
        Commands::Query {
            lat,
            lon,
            tile,
            json,
        } => commands::query::run(cli.data_dir.as_deref(), tile, lat, lon, json),
        Commands::Cells {
            tile,
            limit,
            output,
        } => commands::cells::run(cli.data_dir.as_deref(), &tile, limit, output.as_deref()),
        Commands::Blocks {
            tile,
            width,
            height,
            geojson,
            output,
        } => commands::blocks::run(
            cli.data_dir.as_deref(),
            &tile,
            width,
            height,
            geojson,
            output.as_deref(),
        ),
    }
}
