//! # Path Routing
//!
//! Links every room to its nearest available room with an L-shaped corridor
//! and puts the exit door on the last room's corridor.
//!
//! Target selection is greedy and order dependent:
//! - rooms are processed by index
//! - the last room is never a target, so it ends with exactly one corridor
//! - a room already taken as a target cannot be taken again
//! - room 0 counts as taken from the start, so a room left without free
//!   candidates routes back to room 0
//!
//! The result is not a spanning tree and is not guaranteed to be connected.

use crate::{BurrowError, BurrowResult, Cell, GenerationConfig, Grid, Position};
use log::debug;
use serde::{Deserialize, Serialize};

/// Which room each room routes its corridor to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connections {
    targets: Vec<usize>,
}

impl Connections {
    /// Picks a target for every room.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Connections, Position};
    ///
    /// let anchors = [
    ///     Position::new(10, 10),
    ///     Position::new(30, 10),
    ///     Position::new(10, 30),
    ///     Position::new(50, 50),
    /// ];
    /// let connections = Connections::select(&anchors);
    /// assert_eq!(connections.target(0), 1);
    /// // Room 1's only free candidate is room 2
    /// assert_eq!(connections.target(1), 2);
    /// // Nothing left for the others, so they fall back to the start room
    /// assert_eq!(connections.target(2), 0);
    /// assert_eq!(connections.target(3), 0);
    /// ```
    pub fn select(anchors: &[Position]) -> Self {
        let rooms = anchors.len();
        let mut targets = vec![0; rooms];
        let mut taken = vec![false; rooms];
        if let Some(first) = taken.first_mut() {
            *first = true;
        }

        for room in 0..rooms {
            let mut nearest = f64::INFINITY;
            for candidate in 0..rooms.saturating_sub(1) {
                if candidate == room || taken[candidate] {
                    continue;
                }
                let distance = anchors[room].euclidean_distance(anchors[candidate]);
                if distance < nearest {
                    nearest = distance;
                    targets[room] = candidate;
                }
            }
            taken[targets[room]] = true;
        }

        Self { targets }
    }

    /// Room that `room` routes to.
    pub fn target(&self, room: usize) -> usize {
        self.targets[room]
    }

    /// Number of rooms covered.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether there are no rooms at all.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// `(room, target)` pairs in room order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.targets.iter().copied().enumerate()
    }

    /// How many rooms route to `room`.
    pub fn incoming(&self, room: usize) -> usize {
        self.targets.iter().filter(|&&target| target == room).count()
    }
}

/// Output of path routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routing {
    pub connections: Connections,
    /// Where the exit door was placed
    pub door: Position,
}

/// Selects targets, carves every corridor and places the door.
pub fn route_paths(
    grid: &mut Grid,
    anchors: &[Position],
    config: &GenerationConfig,
) -> BurrowResult<Routing> {
    if anchors.len() < 2 {
        return Err(BurrowError::InvalidConfig {
            field: "rooms",
            reason: format!("need at least 2 rooms to route a path, got {}", anchors.len()),
        });
    }

    let connections = Connections::select(anchors);
    for (room, target) in connections.iter() {
        let start = anchors[room];
        let offset = anchors[target] - start;
        debug!(
            "Room {} routes to room {} via ({}, {})",
            room, target, offset.x, offset.y
        );
        carve_l_corridor(grid, start, offset)?;
    }

    // The last room is routed last, so nothing carves over the door
    let last = anchors.len() - 1;
    let start = anchors[last];
    let offset = anchors[connections.target(last)] - start;
    let door = door_position(start, offset, config.max_room_size as i32);
    grid.set(door, Cell::Door)?;
    debug!("Door placed at ({}, {})", door.x, door.y);

    Ok(Routing { connections, door })
}

/// Carves the vertical leg at the start anchor, then the horizontal leg at the
/// target's row.
fn carve_l_corridor(grid: &mut Grid, start: Position, offset: Position) -> BurrowResult<()> {
    grid.fill(start.x, start.y, 1, offset.y, Cell::Empty)?;
    grid.fill(start.x, start.y + offset.y, offset.x, 1, Cell::Empty)
}

/// Door sits `max_room_size` along the longer leg, measured from the leg's
/// start.
fn door_position(start: Position, offset: Position, max_room_size: i32) -> Position {
    if offset.y.abs() > max_room_size {
        Position::new(start.x, start.y + offset.y.signum() * max_room_size)
    } else {
        Position::new(start.x + offset.x.signum() * max_room_size, start.y + offset.y)
    }
}
