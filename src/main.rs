//! # Burrow Preview
//!
//! Generates a dungeon and prints it as text.

use burrow::{
    project, utils, AsciiSink, BurrowResult, DungeonGenerator, GenerationConfig, Generator,
    TileKeyLookup,
};
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;
use std::process::ExitCode;

/// Command line arguments for the dungeon preview.
#[derive(Parser, Debug)]
#[command(name = "burrow")]
#[command(about = "Generate a tile-grid dungeon and print it")]
#[command(version)]
struct Args {
    /// JSON generation config; overrides the size and room flags
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON object mapping cell labels to tile keys
    #[arg(short, long)]
    tiles: Option<PathBuf>,

    /// Grid side length
    #[arg(long, default_value_t = burrow::config::DEFAULT_GRID_SIZE)]
    size: u32,

    /// Number of rooms
    #[arg(long, default_value_t = burrow::config::DEFAULT_ROOMS)]
    rooms: usize,

    /// Smallest room size (inclusive)
    #[arg(long, default_value_t = burrow::config::DEFAULT_MIN_ROOM_SIZE)]
    min_room_size: u32,

    /// Largest room size (exclusive)
    #[arg(long, default_value_t = burrow::config::DEFAULT_MAX_ROOM_SIZE)]
    max_room_size: u32,

    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Check separation against unplaced room slots too
    #[arg(long)]
    all_slots: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initializes env_logger, letting `RUST_LOG` win over the flag.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::new()
        .parse_filters(log_level)
        .parse_default_env()
        .format_target(false)
        .init();
}

fn run(args: &Args) -> BurrowResult<()> {
    let mut config = match &args.config {
        Some(path) => GenerationConfig::from_path(path)?,
        None => GenerationConfig::new(
            args.size,
            args.rooms,
            args.min_room_size,
            args.max_room_size,
        ),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let lookup = match &args.tiles {
        Some(path) => TileKeyLookup::from_path(path)?,
        None => TileKeyLookup::identity(),
    };

    let generator = if args.all_slots {
        DungeonGenerator::with_all_slot_separation()
    } else {
        DungeonGenerator::new()
    };

    info!("Starting Burrow v{}", burrow::VERSION);
    let mut rng = utils::create_rng(&config);
    let dungeon = generator.generate(&config, &mut rng)?;

    let mut sink = AsciiSink::new(config.size);
    let report = project(&dungeon.grid, &lookup, &mut sink)?;
    if !report.is_complete() {
        warn!("{} cells had no tile key", report.skipped.len());
    }

    println!("{}", sink.render());
    for (index, anchor) in dungeon.anchors.iter().enumerate() {
        info!(
            "Room {} at ({}, {}) size {} -> room {}",
            index,
            anchor.x,
            anchor.y,
            dungeon.room_sizes[index],
            dungeon.connections.target(index)
        );
    }
    for (key, count) in sink.placements() {
        info!("{}: {}", key, count);
    }

    Ok(())
}
