//! # Rendering Module
//!
//! Projection of a finished grid onto a host renderer.
//!
//! Burrow never draws anything itself. The host implements [`TileSink`] and
//! [`project`] calls it once for every non-empty cell, passing the key the
//! [`TileKeyLookup`] registered for that cell's label. [`AsciiSink`] is a text
//! sink used for previews and tests.

pub mod ascii;
pub mod lookup;

pub use ascii::*;
pub use lookup::*;

use crate::{BurrowResult, Cell, Grid, Position};
use log::{debug, warn};

/// Capability implemented by whatever turns cells into scene objects.
pub trait TileSink {
    /// Instantiates the representation registered as `key` for `cell` at `position`.
    fn place(&mut self, key: &str, cell: Cell, position: Position) -> BurrowResult<()>;
}

/// What a projection pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionReport {
    /// Cells handed to the sink
    pub placed: usize,
    /// Cells with no registered key, left out of the scene
    pub skipped: Vec<(Position, Cell)>,
}

impl ProjectionReport {
    /// Whether every non-empty cell reached the sink.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Hands every non-empty cell of `grid` to `sink`, row by row.
///
/// Cells whose label has no key are logged and skipped. An error from the sink
/// stops the pass and is returned.
///
/// # Examples
///
/// ```
/// use burrow::{project, AsciiSink, Cell, Grid, Position, TileKeyLookup};
///
/// let mut grid = Grid::new(3);
/// grid.fill(0, 0, 3, 1, Cell::Wall).unwrap();
/// grid.set(Position::new(1, 1), Cell::Player).unwrap();
///
/// let mut sink = AsciiSink::new(3);
/// let report = project(&grid, &TileKeyLookup::identity(), &mut sink).unwrap();
/// assert_eq!(report.placed, 4);
/// assert_eq!(sink.render(), "###\n.@.\n...");
/// ```
pub fn project<S: TileSink + ?Sized>(
    grid: &Grid,
    lookup: &TileKeyLookup,
    sink: &mut S,
) -> BurrowResult<ProjectionReport> {
    let mut report = ProjectionReport::default();

    for (position, cell) in grid.iter() {
        if cell == Cell::Empty {
            continue;
        }
        match lookup.get(cell) {
            Some(key) => {
                sink.place(key, cell, position)?;
                report.placed += 1;
            }
            None => {
                warn!(
                    "No tile key for {} at ({}, {}), skipping",
                    cell, position.x, position.y
                );
                report.skipped.push((position, cell));
            }
        }
    }

    debug!(
        "Projected {} cells, skipped {}",
        report.placed,
        report.skipped.len()
    );
    Ok(report)
}
