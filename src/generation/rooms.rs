//! # Room Placement
//!
//! Rejection sampling of room anchors followed by carving each room.
//!
//! Anchors are treated as points when checking separation: a candidate is
//! rejected while it sits closer than `2 * max_room_size` to another anchor on
//! both axes. The room itself is carved from the anchor toward increasing x
//! and y, so the anchor ends up as the room's near corner.

use crate::{config, BurrowError, BurrowResult, Cell, GenerationConfig, Grid, Position};
use log::debug;
use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};

/// Which anchors a candidate must keep its distance from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SeparationScope {
    /// Only rooms accepted earlier in this run
    #[default]
    PlacedRooms,
    /// Every other slot, including slots not placed yet, which still hold the
    /// origin. Candidates near the origin are rejected as a result.
    AllSlots,
}

/// Output of room placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedRooms {
    /// One anchor per room, in placement order
    pub anchors: Vec<Position>,
    /// Side length each room was carved with
    pub sizes: Vec<u32>,
}

/// Places rooms by rejection sampling.
#[derive(Debug, Clone)]
pub struct RoomPlacer {
    /// Which anchors count for separation
    pub scope: SeparationScope,
    /// Maximum attempts to place a room before giving up
    pub max_placement_attempts: u32,
}

impl RoomPlacer {
    /// Creates a placer with the default scope and attempt budget.
    pub fn new() -> Self {
        Self {
            scope: SeparationScope::PlacedRooms,
            max_placement_attempts: config::DEFAULT_MAX_PLACEMENT_ATTEMPTS,
        }
    }

    /// Places and carves every room in `config`.
    ///
    /// Fails with [`BurrowError::PlacementExhausted`] naming the first room
    /// that could not be placed.
    pub fn place(
        &self,
        grid: &mut Grid,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> BurrowResult<PlacedRooms> {
        let mut anchors = vec![Position::origin(); config.rooms];
        let mut sizes = Vec::with_capacity(config.rooms);

        for index in 0..config.rooms {
            let anchor = self.sample_anchor(index, &anchors, config, rng)?;
            anchors[index] = anchor;

            let room_size = self.sample_room_size(config, rng);
            self.carve_room(grid, anchor, room_size)?;
            sizes.push(room_size);

            debug!(
                "Placed room {} at ({}, {}) with size {}",
                index, anchor.x, anchor.y, room_size
            );
        }

        Ok(PlacedRooms { anchors, sizes })
    }

    /// Draws candidates until one is separated from the anchors in scope.
    fn sample_anchor(
        &self,
        index: usize,
        anchors: &[Position],
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> BurrowResult<Position> {
        let max = config.max_room_size as i32;
        let low = max + 1;
        let high = config.size as i32 - max;

        for attempt in 1..=self.max_placement_attempts {
            let candidate = Position::new(rng.gen_range(low..high), rng.gen_range(low..high));

            if self.is_separated(candidate, index, anchors, 2 * max) {
                if attempt > 1 {
                    debug!("Room {} accepted after {} attempts", index, attempt);
                }
                return Ok(candidate);
            }
        }

        Err(BurrowError::PlacementExhausted {
            room: index,
            attempts: self.max_placement_attempts,
        })
    }

    /// Checks a candidate for room `index` against the anchors in scope.
    pub fn is_separated(
        &self,
        candidate: Position,
        index: usize,
        anchors: &[Position],
        reach: i32,
    ) -> bool {
        let clashes = |other: &Position| candidate.within_box(*other, reach);
        match self.scope {
            SeparationScope::PlacedRooms => !anchors[..index].iter().any(clashes),
            SeparationScope::AllSlots => !anchors
                .iter()
                .enumerate()
                .any(|(slot, other)| slot != index && clashes(other)),
        }
    }

    fn sample_room_size(&self, config: &GenerationConfig, rng: &mut StdRng) -> u32 {
        if config.min_room_size < config.max_room_size {
            rng.gen_range(config.min_room_size..config.max_room_size)
        } else {
            config.min_room_size
        }
    }

    /// Carves a room's floor out of the grid.
    fn carve_room(&self, grid: &mut Grid, anchor: Position, room_size: u32) -> BurrowResult<()> {
        let side = room_size as i32;
        grid.fill(anchor.x, anchor.y, side, side, Cell::Empty)
    }
}

impl Default for RoomPlacer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils;

    fn walled_grid(config: &GenerationConfig) -> Grid {
        let mut grid = Grid::new(config.size);
        let side = config.size as i32;
        grid.fill(0, 0, side, side, Cell::Wall).unwrap();
        grid
    }

    #[test]
    fn test_room_placer_creation() {
        let placer = RoomPlacer::new();
        assert_eq!(placer.scope, SeparationScope::PlacedRooms);
        assert_eq!(
            placer.max_placement_attempts,
            config::DEFAULT_MAX_PLACEMENT_ATTEMPTS
        );
    }

    #[test]
    fn test_placed_rooms_are_separated_and_in_range() {
        let config = GenerationConfig::new(96, 8, 2, 5).with_seed(77);
        let mut rng = utils::create_rng(&config);
        let mut grid = walled_grid(&config);

        let placed = RoomPlacer::new().place(&mut grid, &config, &mut rng).unwrap();
        assert_eq!(placed.anchors.len(), 8);
        assert_eq!(placed.sizes.len(), 8);

        let max = config.max_room_size as i32;
        for (i, a) in placed.anchors.iter().enumerate() {
            assert!(a.x > max && a.x < config.size as i32 - max);
            assert!(a.y > max && a.y < config.size as i32 - max);
            for b in &placed.anchors[i + 1..] {
                assert!(!a.within_box(*b, 2 * max), "{:?} and {:?} overlap", a, b);
            }
        }
    }

    #[test]
    fn test_rooms_are_carved_from_anchor() {
        let config = GenerationConfig::new(64, 3, 2, 5).with_seed(5);
        let mut rng = utils::create_rng(&config);
        let mut grid = walled_grid(&config);

        let placed = RoomPlacer::new().place(&mut grid, &config, &mut rng).unwrap();

        let mut carved = 0;
        for (anchor, &size) in placed.anchors.iter().zip(&placed.sizes) {
            assert!(size >= config.min_room_size && size < config.max_room_size);
            let side = size as i32;
            for dy in 0..side {
                for dx in 0..side {
                    let pos = *anchor + Position::new(dx, dy);
                    assert_eq!(grid.get(pos), Some(Cell::Empty));
                }
            }
            // The cell just before the anchor is outside the room
            let before = *anchor - Position::new(1, 0);
            assert_eq!(grid.get(before), Some(Cell::Wall));
            carved += (size * size) as usize;
        }
        assert_eq!(grid.count(Cell::Empty), carved);
    }

    #[test]
    fn test_equal_room_size_bounds() {
        let config = GenerationConfig::new(64, 4, 3, 3).with_seed(11);
        let mut rng = utils::create_rng(&config);
        let mut grid = walled_grid(&config);

        let placed = RoomPlacer::new().place(&mut grid, &config, &mut rng).unwrap();
        assert!(placed.sizes.iter().all(|&size| size == 3));
    }

    #[test]
    fn test_placement_exhaustion_names_room() {
        // Exactly one anchor position exists, so the second room can never fit
        let config = GenerationConfig::new(10, 2, 2, 4).with_seed(1);
        let mut rng = utils::create_rng(&config);
        let mut grid = walled_grid(&config);

        let placer = RoomPlacer {
            max_placement_attempts: 25,
            ..RoomPlacer::new()
        };
        match placer.place(&mut grid, &config, &mut rng) {
            Err(BurrowError::PlacementExhausted { room, attempts }) => {
                assert_eq!(room, 1);
                assert_eq!(attempts, 25);
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[test]
    fn test_separation_scope() {
        let anchors = vec![
            Position::new(20, 20),
            Position::origin(),
            Position::origin(),
        ];
        let near_origin = Position::new(5, 5);

        let placed_only = RoomPlacer::new();
        assert!(placed_only.is_separated(near_origin, 1, &anchors, 8));
        assert!(!placed_only.is_separated(Position::new(25, 14), 1, &anchors, 8));

        let all_slots = RoomPlacer {
            scope: SeparationScope::AllSlots,
            ..RoomPlacer::new()
        };
        // Slot 2 still holds the origin
        assert!(!all_slots.is_separated(near_origin, 1, &anchors, 8));
        assert!(all_slots.is_separated(Position::new(40, 40), 1, &anchors, 8));
        // A slot never clashes with itself
        assert!(all_slots.is_separated(Position::new(40, 40), 0, &anchors, 8));
    }

    #[test]
    fn test_all_slots_scope_avoids_origin_box() {
        let config = GenerationConfig::new(64, 6, 2, 4).with_seed(2024);
        let mut rng = utils::create_rng(&config);
        let mut grid = walled_grid(&config);

        let placer = RoomPlacer {
            scope: SeparationScope::AllSlots,
            ..RoomPlacer::new()
        };
        let placed = placer.place(&mut grid, &config, &mut rng).unwrap();

        // Every room except the last had unplaced origin slots after it
        for anchor in &placed.anchors[..placed.anchors.len() - 1] {
            assert!(!anchor.within_box(Position::origin(), 8));
        }
    }
}
