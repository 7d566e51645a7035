//! # Grid
//!
//! Fixed-size square buffer of [`Cell`] labels.
//!
//! All mutation goes through [`Grid::fill`] or [`Grid::set`]. Both refuse to
//! write outside the grid: a rejected fill leaves every cell untouched.

use crate::{BurrowError, BurrowResult, Cell, Position};
use serde::{Deserialize, Serialize};

/// A `size × size` grid of cell labels, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocates a grid with every cell set to [`Cell::Empty`].
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Cell, Grid, Position};
    ///
    /// let grid = Grid::new(8);
    /// assert_eq!(grid.size(), 8);
    /// assert_eq!(grid.get(Position::new(7, 7)), Some(Cell::Empty));
    /// assert_eq!(grid.get(Position::new(8, 0)), None);
    /// ```
    pub fn new(size: u32) -> Self {
        let len = size as usize * size as usize;
        Self {
            size,
            cells: vec![Cell::Empty; len],
        }
    }

    /// Side length in cells.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Checks whether a position lies inside the grid.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.size && (pos.y as u32) < self.size
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.is_valid_position(pos) {
            Some(pos.y as usize * self.size as usize + pos.x as usize)
        } else {
            None
        }
    }

    /// Gets the label at a position, or `None` outside the grid.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Writes a single cell.
    pub fn set(&mut self, pos: Position, cell: Cell) -> BurrowResult<()> {
        self.fill(pos.x, pos.y, 1, 1, cell)
    }

    /// Writes `cell` into the rectangle anchored at `(x, y)`.
    ///
    /// Columns step from `x` toward `x + width` and rows from `y` toward
    /// `y + height`, end exclusive. A negative extent steps the other way, so
    /// the anchor is always covered and a zero extent covers nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Cell, Grid, Position};
    ///
    /// let mut grid = Grid::new(10);
    /// grid.fill(5, 5, -3, 2, Cell::Wall).unwrap();
    /// assert_eq!(grid.get(Position::new(3, 6)), Some(Cell::Wall));
    /// assert_eq!(grid.get(Position::new(6, 5)), Some(Cell::Empty));
    /// assert_eq!(grid.count(Cell::Wall), 6);
    ///
    /// assert!(grid.fill(8, 8, 3, 1, Cell::Door).is_err());
    /// assert_eq!(grid.count(Cell::Door), 0);
    /// ```
    pub fn fill(&mut self, x: i32, y: i32, width: i32, height: i32, cell: Cell) -> BurrowResult<()> {
        let (Some(columns), Some(rows)) = (span(x, width), span(y, height)) else {
            return Ok(());
        };

        let limit = self.size as i64;
        let inside = |(lo, hi): (i64, i64)| lo >= 0 && hi < limit;
        if !inside(columns) || !inside(rows) {
            return Err(BurrowError::OutOfBounds {
                x,
                y,
                width,
                height,
                size: self.size,
            });
        }

        let stride = self.size as usize;
        for row in rows.0..=rows.1 {
            let start = row as usize * stride;
            self.cells[start + columns.0 as usize..=start + columns.1 as usize].fill(cell);
        }

        Ok(())
    }

    /// Number of cells holding `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Every position holding `cell`, in row-major order.
    pub fn positions_of(&self, cell: Cell) -> Vec<Position> {
        self.iter()
            .filter(|&(_, c)| c == cell)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Iterates over every cell with its position, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let size = self.size as usize;
        self.cells.iter().enumerate().map(move |(idx, &cell)| {
            (Position::new((idx % size) as i32, (idx / size) as i32), cell)
        })
    }

    /// Cells row by row, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.size.max(1) as usize)
    }

    /// Positions on the outermost ring of the grid.
    pub fn border_positions(&self) -> Vec<Position> {
        let last = self.size as i32 - 1;
        self.iter()
            .map(|(pos, _)| pos)
            .filter(|pos| pos.x == 0 || pos.y == 0 || pos.x == last || pos.y == last)
            .collect()
    }

    /// Passable neighbours of a position, used for flood fills.
    pub fn passable_neighbours(&self, pos: Position) -> Vec<Position> {
        pos.cardinal_adjacent_positions()
            .into_iter()
            .filter(|&next| self.get(next).is_some_and(Cell::is_passable))
            .collect()
    }
}

/// Inclusive `(low, high)` covered by stepping from `start` toward
/// `start + extent`, or `None` when `extent` is zero.
fn span(start: i32, extent: i32) -> Option<(i64, i64)> {
    let start = start as i64;
    let extent = extent as i64;
    match extent {
        0 => None,
        e if e > 0 => Some((start, start + e - 1)),
        e => Some((start + e + 1, start)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn filled(grid: &Grid, cell: Cell) -> HashSet<(i32, i32)> {
        grid.positions_of(cell)
            .into_iter()
            .map(|pos| (pos.x, pos.y))
            .collect()
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(16);
        assert_eq!(grid.size(), 16);
        assert_eq!(grid.count(Cell::Empty), 256);
        assert_eq!(grid.iter().count(), 256);
    }

    #[test]
    fn test_fill_positive_extent() {
        let mut grid = Grid::new(10);
        grid.fill(2, 3, 3, 2, Cell::Wall).unwrap();

        let expected: HashSet<_> = [(2, 3), (3, 3), (4, 3), (2, 4), (3, 4), (4, 4)]
            .into_iter()
            .collect();
        assert_eq!(filled(&grid, Cell::Wall), expected);
    }

    #[test]
    fn test_fill_negative_width_mirrors_columns() {
        let mut grid = Grid::new(10);
        grid.fill(5, 5, -3, 2, Cell::Key).unwrap();

        let mut expected = HashSet::new();
        for x in [3, 4, 5] {
            for y in [5, 6] {
                expected.insert((x, y));
            }
        }
        assert_eq!(filled(&grid, Cell::Key), expected);
    }

    #[test]
    fn test_fill_negative_height_mirrors_rows() {
        let mut grid = Grid::new(10);
        grid.fill(5, 5, 3, -2, Cell::Key).unwrap();

        let mut expected = HashSet::new();
        for x in [5, 6, 7] {
            for y in [4, 5] {
                expected.insert((x, y));
            }
        }
        assert_eq!(filled(&grid, Cell::Key), expected);
    }

    #[test]
    fn test_fill_both_negative() {
        let mut grid = Grid::new(10);
        grid.fill(4, 4, -2, -2, Cell::Enemy).unwrap();

        let expected: HashSet<_> = [(3, 3), (4, 3), (3, 4), (4, 4)].into_iter().collect();
        assert_eq!(filled(&grid, Cell::Enemy), expected);
    }

    #[test]
    fn test_fill_zero_extent_writes_nothing() {
        let mut grid = Grid::new(10);
        grid.fill(4, 4, 0, 5, Cell::Wall).unwrap();
        grid.fill(4, 4, 5, 0, Cell::Wall).unwrap();
        assert_eq!(grid.count(Cell::Wall), 0);

        // Nothing is written, so nothing can be out of bounds either
        grid.fill(-50, 4, 0, 5, Cell::Wall).unwrap();
    }

    #[test]
    fn test_fill_overwrites() {
        let mut grid = Grid::new(6);
        grid.fill(0, 0, 6, 6, Cell::Wall).unwrap();
        grid.fill(1, 1, 2, 2, Cell::Empty).unwrap();
        grid.set(Position::new(1, 1), Cell::Player).unwrap();

        assert_eq!(grid.count(Cell::Wall), 32);
        assert_eq!(grid.count(Cell::Empty), 3);
        assert_eq!(grid.get(Position::new(1, 1)), Some(Cell::Player));
    }

    #[test]
    fn test_fill_out_of_bounds_is_rejected_untouched() {
        let mut grid = Grid::new(10);

        let result = grid.fill(8, 8, 3, 1, Cell::Wall);
        assert!(matches!(result, Err(BurrowError::OutOfBounds { size: 10, .. })));

        assert!(grid.fill(1, 1, -3, 1, Cell::Wall).is_err());
        assert!(grid.fill(1, 1, 1, -3, Cell::Wall).is_err());
        assert!(grid.set(Position::new(10, 0), Cell::Wall).is_err());
        assert!(grid.set(Position::new(0, -1), Cell::Wall).is_err());

        assert_eq!(grid.count(Cell::Wall), 0);
    }

    #[test]
    fn test_fill_whole_grid() {
        let mut grid = Grid::new(12);
        grid.fill(0, 0, 12, 12, Cell::Wall).unwrap();
        assert_eq!(grid.count(Cell::Wall), 144);

        // Mirrored whole-grid fill from the far corner
        grid.fill(11, 11, -12, -12, Cell::Empty).unwrap();
        assert_eq!(grid.count(Cell::Empty), 144);
    }

    #[test]
    fn test_border_positions() {
        let grid = Grid::new(5);
        let border = grid.border_positions();
        assert_eq!(border.len(), 16);
        assert!(border.contains(&Position::new(0, 2)));
        assert!(border.contains(&Position::new(4, 4)));
        assert!(!border.contains(&Position::new(2, 2)));
    }

    #[test]
    fn test_rows_are_row_major() {
        let mut grid = Grid::new(3);
        grid.set(Position::new(2, 1), Cell::Door).unwrap();

        let rows: Vec<&[Cell]> = grid.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], &[Cell::Empty, Cell::Empty, Cell::Door][..]);
        assert_eq!(Grid::new(0).rows().count(), 0);
    }

    #[test]
    fn test_passable_neighbours() {
        let mut grid = Grid::new(5);
        grid.fill(0, 0, 5, 5, Cell::Wall).unwrap();
        grid.fill(1, 2, 3, 1, Cell::Empty).unwrap();

        let neighbours = grid.passable_neighbours(Position::new(2, 2));
        assert_eq!(neighbours.len(), 2);
        assert!(neighbours.contains(&Position::new(1, 2)));
        assert!(neighbours.contains(&Position::new(3, 2)));

        // Edges of the grid never yield out-of-bounds neighbours
        grid.set(Position::new(0, 0), Cell::Empty).unwrap();
        assert!(grid.passable_neighbours(Position::new(0, 0)).is_empty());
    }
}
