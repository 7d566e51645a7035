//! # Burrow
//!
//! Procedural generation of square tile-grid dungeons.
//!
//! ## Architecture Overview
//!
//! A generation run is a single synchronous batch:
//!
//! - **World**: the [`Grid`] of [`Cell`] labels and the region fill primitive
//! - **Generation**: room placement, corridor routing and object population,
//!   driven by a [`DungeonGenerator`] and a seedable random stream
//! - **Rendering**: the projection boundary that hands every non-empty cell to
//!   a host-provided [`TileSink`]
//!
//! ```
//! use burrow::{generate, Cell, GenerationConfig};
//!
//! let config = GenerationConfig::new(64, 4, 2, 4).with_seed(7);
//! let dungeon = generate(&config).unwrap();
//! assert_eq!(dungeon.anchors.len(), 4);
//! assert_eq!(dungeon.grid.count(Cell::Door), 1);
//! ```

pub mod generation;
pub mod rendering;
pub mod world;

pub use generation::*;
pub use rendering::*;
pub use world::*;

/// Core error type for dungeon generation and projection.
#[derive(thiserror::Error, Debug)]
pub enum BurrowError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A configuration value cannot produce a dungeon
    #[error("Invalid configuration `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Rejection sampling gave up on a room
    #[error("Could not place room {room} after {attempts} attempts")]
    PlacementExhausted { room: usize, attempts: u32 },

    /// A region fill would have written outside the grid
    #[error("Region ({x}, {y}) extent {width}x{height} leaves the {size}x{size} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        size: u32,
    },

    /// No external key is registered for a cell label
    #[error("No tile key registered for {0:?}")]
    MissingTileKey(Cell),

    /// A generated dungeon broke one of its invariants
    #[error("Invalid dungeon: {0}")]
    InvalidDungeon(String),
}

/// Result type used throughout the Burrow codebase.
pub type BurrowResult<T> = Result<T, BurrowError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generation defaults.
pub mod config {
    /// Default grid side length in tiles
    pub const DEFAULT_GRID_SIZE: u32 = 96;

    /// Default number of rooms
    pub const DEFAULT_ROOMS: usize = 8;

    /// Default lower bound for room size (inclusive)
    pub const DEFAULT_MIN_ROOM_SIZE: u32 = 3;

    /// Default upper bound for room size (exclusive)
    pub const DEFAULT_MAX_ROOM_SIZE: u32 = 6;

    /// Candidate anchors tried per room before placement gives up
    pub const DEFAULT_MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;
}
