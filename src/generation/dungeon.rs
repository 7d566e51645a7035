//! # Dungeon Generation
//!
//! Drives the generation stages over one grid and checks the result.
//!
//! A run:
//! 1. Allocates the grid and fills it with walls
//! 2. Places and carves rooms
//! 3. Routes corridors and places the exit door
//! 4. Populates gameplay cells
//! 5. Validates the result and optionally reports rooms that cannot be
//!    reached from the start

use crate::{
    config, populate, route_paths, BurrowError, BurrowResult, Cell, Connections,
    GenerationConfig, Generator, Grid, Position, RoomPlacer, SeparationScope,
};
use log::{info, warn};
use pathfinding::prelude::bfs_reach;
use rand::rngs::StdRng;
use std::collections::HashSet;

/// A finished dungeon, ready to be projected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dungeon {
    /// Every cell of the layout
    pub grid: Grid,
    /// Room anchors in generation order; first is the start room, last the end room
    pub anchors: Vec<Position>,
    /// Side length each room was carved with
    pub room_sizes: Vec<u32>,
    /// Corridor target of each room
    pub connections: Connections,
    /// The single exit door
    pub door: Position,
}

impl Dungeon {
    /// Anchor of the start room, where the player stands.
    pub fn player_start(&self) -> Position {
        self.anchors[0]
    }

    /// Anchor of the end room.
    pub fn end(&self) -> Position {
        self.anchors[self.anchors.len() - 1]
    }

    /// Every position reachable from `start` through passable cells.
    ///
    /// Empty when `start` itself is a wall or off the grid.
    pub fn reachable_from(&self, start: Position) -> HashSet<Position> {
        if !self.grid.get(start).is_some_and(Cell::is_passable) {
            return HashSet::new();
        }
        bfs_reach(start, |&pos| self.grid.passable_neighbours(pos)).collect()
    }

    /// Whether `to` can be reached from `from` without crossing walls.
    pub fn is_connected(&self, from: Position, to: Position) -> bool {
        self.reachable_from(from).contains(&to)
    }

    /// Rooms whose anchor cannot be reached from the start room.
    pub fn unreachable_rooms(&self) -> Vec<usize> {
        let reachable = self.reachable_from(self.player_start());
        self.anchors
            .iter()
            .enumerate()
            .filter(|(_, anchor)| !reachable.contains(anchor))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Primary dungeon generator.
#[derive(Debug, Clone)]
pub struct DungeonGenerator {
    /// Which anchors room placement keeps its distance from
    pub separation_scope: SeparationScope,
    /// Maximum attempts to place a room before giving up
    pub max_placement_attempts: u32,
    /// Whether to warn about rooms unreachable from the start
    pub log_connectivity: bool,
}

impl DungeonGenerator {
    /// Creates a dungeon generator with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{DungeonGenerator, GenerationConfig, Generator};
    /// use burrow::utils::create_rng;
    ///
    /// let config = GenerationConfig::for_testing(1);
    /// let generator = DungeonGenerator::new();
    /// let dungeon = generator.generate(&config, &mut create_rng(&config)).unwrap();
    /// assert!(generator.validate(&dungeon, &config).is_ok());
    /// ```
    pub fn new() -> Self {
        Self {
            separation_scope: SeparationScope::PlacedRooms,
            max_placement_attempts: config::DEFAULT_MAX_PLACEMENT_ATTEMPTS,
            log_connectivity: true,
        }
    }

    /// Creates a generator whose separation check also covers unplaced
    /// room slots, reproducing the classic anchor distribution.
    pub fn with_all_slot_separation() -> Self {
        Self {
            separation_scope: SeparationScope::AllSlots,
            ..Self::new()
        }
    }

    fn room_placer(&self) -> RoomPlacer {
        RoomPlacer {
            scope: self.separation_scope,
            max_placement_attempts: self.max_placement_attempts,
        }
    }

    /// Allocates the grid and fills every cell with wall.
    pub fn initialize_grid(&self, config: &GenerationConfig) -> BurrowResult<Grid> {
        let mut grid = Grid::new(config.size);
        let side = config.size as i32;
        grid.fill(0, 0, side, side, Cell::Wall)?;
        Ok(grid)
    }

    /// Checks a freshly built dungeon and reports on it.
    ///
    /// Fails with [`BurrowError::InvalidDungeon`] when an invariant does not
    /// hold.
    pub fn finish(&self, dungeon: Dungeon, config: &GenerationConfig) -> BurrowResult<Dungeon> {
        self.validate(&dungeon, config)?;

        if self.log_connectivity {
            let unreachable = dungeon.unreachable_rooms();
            if !unreachable.is_empty() {
                warn!("Rooms {:?} cannot be reached from the start room", unreachable);
            }
        }

        info!(
            "Generated {}x{} dungeon with {} rooms (seed {:?})",
            config.size, config.size, config.rooms, config.seed
        );

        Ok(dungeon)
    }

    fn invalid(reason: String) -> BurrowResult<()> {
        Err(BurrowError::InvalidDungeon(reason))
    }

    /// Checks that exactly one `cell` exists and that it sits at `expected`.
    fn check_single(grid: &Grid, cell: Cell, expected: Position) -> BurrowResult<()> {
        let found = grid.positions_of(cell);
        if found != [expected] {
            return Self::invalid(format!(
                "expected one {} at ({}, {}), found {:?}",
                cell, expected.x, expected.y, found
            ));
        }
        Ok(())
    }
}

impl Generator<Dungeon> for DungeonGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> BurrowResult<Dungeon> {
        config.validate()?;

        let mut grid = self.initialize_grid(config)?;
        let placed = self.room_placer().place(&mut grid, config, rng)?;
        let routing = route_paths(&mut grid, &placed.anchors, config)?;
        populate(&mut grid, &placed.anchors)?;

        let dungeon = Dungeon {
            grid,
            anchors: placed.anchors,
            room_sizes: placed.sizes,
            connections: routing.connections,
            door: routing.door,
        };

        self.finish(dungeon, config)
    }

    fn validate(&self, dungeon: &Dungeon, config: &GenerationConfig) -> BurrowResult<()> {
        let grid = &dungeon.grid;

        if grid.size() != config.size {
            return Self::invalid(format!(
                "grid is {} wide, configured for {}",
                grid.size(),
                config.size
            ));
        }
        if dungeon.anchors.len() != config.rooms || dungeon.connections.len() != config.rooms {
            return Self::invalid(format!(
                "{} anchors and {} connections for {} rooms",
                dungeon.anchors.len(),
                dungeon.connections.len(),
                config.rooms
            ));
        }

        let reach = 2 * config.max_room_size as i32;
        for (i, a) in dungeon.anchors.iter().enumerate() {
            for (j, b) in dungeon.anchors.iter().enumerate().skip(i + 1) {
                if a.within_box(*b, reach) {
                    return Self::invalid(format!("rooms {} and {} are too close", i, j));
                }
            }
        }

        Self::check_single(grid, Cell::Door, dungeon.door)?;
        Self::check_single(grid, Cell::Player, dungeon.player_start())?;
        Self::check_single(grid, Cell::End, dungeon.end())?;

        if let Some(pos) = grid
            .border_positions()
            .into_iter()
            .find(|&pos| grid.get(pos) != Some(Cell::Wall))
        {
            return Self::invalid(format!("border opened at ({}, {})", pos.x, pos.y));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "DungeonGenerator"
    }
}

impl Default for DungeonGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils;

    fn generate_with(generator: &DungeonGenerator, config: &GenerationConfig) -> Dungeon {
        let mut rng = utils::create_rng(config);
        generator.generate(config, &mut rng).unwrap()
    }

    #[test]
    fn test_dungeon_generator_creation() {
        let generator = DungeonGenerator::new();
        assert_eq!(generator.separation_scope, SeparationScope::PlacedRooms);
        assert!(generator.log_connectivity);
        assert_eq!(generator.generator_type(), "DungeonGenerator");

        let classic = DungeonGenerator::with_all_slot_separation();
        assert_eq!(classic.separation_scope, SeparationScope::AllSlots);
    }

    #[test]
    fn test_initialized_grid_is_all_wall() {
        let config = GenerationConfig::for_testing(1);
        let grid = DungeonGenerator::new().initialize_grid(&config).unwrap();
        assert_eq!(grid.count(Cell::Wall), 64 * 64);
        assert!(grid
            .border_positions()
            .iter()
            .all(|&pos| grid.get(pos) == Some(Cell::Wall)));
    }

    #[test]
    fn test_generation_rejects_invalid_config() {
        let config = GenerationConfig::new(64, 1, 2, 4).with_seed(1);
        let mut rng = utils::create_rng(&config);
        let result = DungeonGenerator::new().generate(&config, &mut rng);
        assert!(matches!(
            result,
            Err(BurrowError::InvalidConfig { field: "rooms", .. })
        ));
    }

    #[test]
    fn test_generation_produces_valid_dungeon() {
        let generator = DungeonGenerator::new();
        for seed in 0..20 {
            let config = GenerationConfig::new(80, 6, 2, 5).with_seed(seed);
            let dungeon = generate_with(&generator, &config);
            assert!(generator.validate(&dungeon, &config).is_ok(), "seed {}", seed);
        }
    }

    #[test]
    fn test_all_slot_generation_is_valid() {
        let generator = DungeonGenerator::with_all_slot_separation();
        for seed in 0..10 {
            let config = GenerationConfig::new(96, 8, 3, 6).with_seed(seed);
            let dungeon = generate_with(&generator, &config);
            assert!(generator.validate(&dungeon, &config).is_ok(), "seed {}", seed);
        }
    }

    #[test]
    fn test_small_rooms_still_validate() {
        // max_room_size 2 only ever carves 1x1 rooms, so enemies stand in rock
        let generator = DungeonGenerator::new();
        let config = GenerationConfig::new(64, 5, 1, 2).with_seed(8);
        let dungeon = generate_with(&generator, &config);
        assert!(dungeon.room_sizes.iter().all(|&size| size == 1));
        assert!(generator.validate(&dungeon, &config).is_ok());
    }

    #[test]
    fn test_validate_catches_tampering() {
        let generator = DungeonGenerator::new();
        let config = GenerationConfig::for_testing(3);
        let dungeon = generate_with(&generator, &config);

        let mut extra_door = dungeon.clone();
        extra_door.grid.set(Position::new(1, 1), Cell::Door).unwrap();
        assert!(generator.validate(&extra_door, &config).is_err());

        let mut open_border = dungeon.clone();
        open_border.grid.set(Position::new(0, 5), Cell::Empty).unwrap();
        assert!(generator.validate(&open_border, &config).is_err());

        let mut moved_player = dungeon.clone();
        moved_player.anchors[0] = Position::new(2, 2);
        assert!(generator.validate(&moved_player, &config).is_err());

        let other = GenerationConfig::new(80, 4, 2, 4);
        assert!(generator.validate(&dungeon, &other).is_err());
    }

    #[test]
    fn test_finish_rejects_broken_dungeon() {
        let generator = DungeonGenerator::new();
        let config = GenerationConfig::for_testing(4);
        let dungeon = generate_with(&generator, &config);
        assert_eq!(generator.finish(dungeon.clone(), &config).unwrap(), dungeon);

        // An enemy written over the exit leaves the dungeon without a door
        let mut doorless = dungeon;
        doorless.grid.set(doorless.door, Cell::Enemy).unwrap();
        assert!(matches!(
            generator.finish(doorless, &config),
            Err(BurrowError::InvalidDungeon(_))
        ));
    }

    #[test]
    fn test_reachability() {
        let config = GenerationConfig::for_testing(21);
        let dungeon = generate_with(&DungeonGenerator::new(), &config);

        let reachable = dungeon.reachable_from(dungeon.player_start());
        assert!(reachable.contains(&dungeon.player_start()));
        assert!(reachable.iter().all(|&pos| dungeon.grid.get(pos) != Some(Cell::Wall)));

        assert!(dungeon.reachable_from(Position::new(0, 0)).is_empty());
        assert!(dungeon.reachable_from(Position::new(-3, 4)).is_empty());
    }

    #[test]
    fn test_four_room_dungeons_are_connected() {
        // With four rooms every room either takes room 1 or 2 or falls back
        // to room 0, which always links everything up
        for seed in 0..25 {
            let config = GenerationConfig::for_testing(seed);
            let dungeon = generate_with(&DungeonGenerator::new(), &config);
            assert!(dungeon.unreachable_rooms().is_empty(), "seed {}", seed);
            assert!(dungeon.is_connected(dungeon.player_start(), dungeon.end()));
        }
    }
}
