//! # Tile Key Lookup
//!
//! Maps cell labels to the keys a host renderer uses to find its assets.
//!
//! Lookups are usually loaded from JSON objects keyed by [`Cell::key`]:
//!
//! ```json
//! { "wall": "prefabs/stone_wall", "door": "prefabs/oak_door" }
//! ```

use crate::{BurrowError, BurrowResult, Cell};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Cell label to external asset key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileKeyLookup {
    keys: HashMap<Cell, String>,
}

impl TileKeyLookup {
    /// Creates an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps every non-empty label to its own identifier.
    pub fn identity() -> Self {
        Cell::ALL
            .iter()
            .filter(|&&cell| cell != Cell::Empty)
            .fold(Self::new(), |lookup, &cell| lookup.with(cell, cell.key()))
    }

    /// Returns the lookup with one more entry.
    pub fn with(mut self, cell: Cell, key: impl Into<String>) -> Self {
        self.insert(cell, key);
        self
    }

    /// Registers `key` for `cell`, returning the key it replaces.
    pub fn insert(&mut self, cell: Cell, key: impl Into<String>) -> Option<String> {
        self.keys.insert(cell, key.into())
    }

    /// Key registered for `cell`.
    pub fn get(&self, cell: Cell) -> Option<&str> {
        self.keys.get(&cell).map(String::as_str)
    }

    /// Number of labels with a key.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no label has a key yet.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Labels among `cells` with no registered key, each reported once, in
    /// first-seen order.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Cell, TileKeyLookup};
    ///
    /// let lookup = TileKeyLookup::new().with(Cell::Wall, "rock");
    /// let missing = lookup.missing_for([Cell::Wall, Cell::Door, Cell::Empty, Cell::Door]);
    /// assert_eq!(missing, vec![Cell::Door]);
    /// ```
    pub fn missing_for(&self, cells: impl IntoIterator<Item = Cell>) -> Vec<Cell> {
        let mut missing = Vec::new();
        for cell in cells {
            if cell != Cell::Empty && !self.keys.contains_key(&cell) && !missing.contains(&cell) {
                missing.push(cell);
            }
        }
        missing
    }

    /// Reads a lookup from a JSON object of label identifiers to keys.
    pub fn from_json_str(json: &str) -> BurrowResult<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(json)?;
        let mut lookup = Self::new();
        for (label, key) in raw {
            let cell = Cell::from_key(&label).ok_or_else(|| BurrowError::InvalidConfig {
                field: "tile_keys",
                reason: format!("unknown cell label `{}`", label),
            })?;
            lookup.insert(cell, key);
        }
        Ok(lookup)
    }

    /// Reads a lookup from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> BurrowResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Writes the lookup as pretty JSON with sorted labels.
    pub fn to_json_string(&self) -> BurrowResult<String> {
        let sorted: BTreeMap<&str, &str> = self
            .keys
            .iter()
            .map(|(cell, key)| (cell.key(), key.as_str()))
            .collect();
        Ok(serde_json::to_string_pretty(&sorted)?)
    }
}
