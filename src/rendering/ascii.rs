//! # ASCII Preview
//!
//! A [`TileSink`] that draws cells onto a canvas and prints their glyphs.

use crate::{BurrowResult, Cell, Grid, Position, TileSink};
use std::collections::BTreeMap;

/// Text renderer for quick looks at a dungeon.
///
/// Positions that never receive a cell show the floor glyph.
#[derive(Debug, Clone)]
pub struct AsciiSink {
    canvas: Grid,
    placements: BTreeMap<String, usize>,
}

impl AsciiSink {
    /// Creates a blank `size × size` canvas.
    pub fn new(size: u32) -> Self {
        Self {
            canvas: Grid::new(size),
            placements: BTreeMap::new(),
        }
    }

    /// How many times each key was placed.
    pub fn placements(&self) -> &BTreeMap<String, usize> {
        &self.placements
    }

    /// The canvas as text, one line per row.
    pub fn render(&self) -> String {
        self.canvas
            .rows()
            .map(|row| row.iter().map(|cell| cell.glyph()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TileSink for AsciiSink {
    fn place(&mut self, key: &str, cell: Cell, position: Position) -> BurrowResult<()> {
        self.canvas.set(position, cell)?;
        *self.placements.entry(key.to_string()).or_insert(0) += 1;
        Ok(())
    }
}
