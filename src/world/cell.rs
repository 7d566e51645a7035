//! # Cell Labels
//!
//! The label stored at every grid position.

use serde::{Deserialize, Serialize};

/// What occupies a single grid position.
///
/// Exactly one label lives at each position; writing a new label replaces the
/// old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    /// Open floor, also what room and corridor carving writes
    #[default]
    Empty,
    /// Player start
    Player,
    Enemy,
    /// Solid rock
    Wall,
    /// The exit door on the last room's corridor
    Door,
    Key,
    Weapon,
    /// Goal in the last room
    End,
}

impl Cell {
    /// Every label, in declaration order.
    pub const ALL: [Cell; 8] = [
        Cell::Empty,
        Cell::Player,
        Cell::Enemy,
        Cell::Wall,
        Cell::Door,
        Cell::Key,
        Cell::Weapon,
        Cell::End,
    ];

    /// Stable identifier for this label.
    ///
    /// Matches the serialized name, so tile key files can be keyed by it.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::Cell;
    ///
    /// assert_eq!(Cell::Door.key(), "door");
    /// assert_eq!(Cell::from_key("weapon"), Some(Cell::Weapon));
    /// ```
    pub fn key(self) -> &'static str {
        match self {
            Cell::Empty => "empty",
            Cell::Player => "player",
            Cell::Enemy => "enemy",
            Cell::Wall => "wall",
            Cell::Door => "door",
            Cell::Key => "key",
            Cell::Weapon => "weapon",
            Cell::End => "end",
        }
    }

    /// Looks up a label by its identifier.
    pub fn from_key(key: &str) -> Option<Cell> {
        Cell::ALL.iter().copied().find(|cell| cell.key() == key)
    }

    /// Single character used by text previews.
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Player => '@',
            Cell::Enemy => 'e',
            Cell::Wall => '#',
            Cell::Door => '+',
            Cell::Key => 'k',
            Cell::Weapon => ')',
            Cell::End => '>',
        }
    }

    /// Whether something can walk through this cell.
    pub fn is_passable(self) -> bool {
        self != Cell::Wall
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
