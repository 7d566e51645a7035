//! # Object Population
//!
//! Places the player, key, weapons, enemies and the end goal at or next to
//! room anchors. Placement is fully determined by room index.

use crate::{BurrowResult, Cell, Grid, Position};

/// Offset from a room's anchor at which its enemy stands.
pub const ENEMY_OFFSET: Position = Position { x: 1, y: 1 };

/// Whether room `index` holds a weapon: rooms 2, 5, 8, ...
pub fn has_weapon(index: usize) -> bool {
    index >= 2 && (index - 2) % 3 == 0
}

/// Whether room `index` holds an enemy: rooms 1, 4, 7, ...
pub fn has_enemy(index: usize) -> bool {
    index >= 1 && (index - 1) % 3 == 0
}

/// Writes every gameplay cell.
///
/// Order matters because later writes win: Player, Key, then weapons and
/// enemies room by room, then End. With two rooms the End replaces the Key,
/// and an End room that also qualifies for a weapon keeps only the End.
pub fn populate(grid: &mut Grid, anchors: &[Position]) -> BurrowResult<()> {
    let Some(&last) = anchors.last() else {
        return Ok(());
    };

    grid.set(anchors[0], Cell::Player)?;
    if let Some(&key_room) = anchors.get(1) {
        grid.set(key_room, Cell::Key)?;
    }

    for (index, &anchor) in anchors.iter().enumerate() {
        if has_weapon(index) {
            grid.set(anchor, Cell::Weapon)?;
        }
        if has_enemy(index) {
            grid.set(anchor + ENEMY_OFFSET, Cell::Enemy)?;
        }
    }

    grid.set(last, Cell::End)
}
