//! Placed-tile state: one tile per cell, mutated only by toggle and reset.
//!
//! [`PlacementState`] is a value type whose transitions return a new state;
//! [`PlacementStore`] is the Bevy resource holding the current one. The store
//! is radius-agnostic: coordinates are opaque keys.

use std::fmt;
use std::str::FromStr;

use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use hexx::Hex;

use crate::error::EditorError;

/// Identifier of a tile kind, e.g. `"forest"`.
///
/// Guaranteed non-empty; membership in any catalog is not checked here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Reflect)]
pub struct TileType(String);

impl TileType {
    /// Wraps `id`, rejecting the empty string.
    pub fn new(id: impl Into<String>) -> Result<Self, EditorError> {
        let id = id.into();
        if id.is_empty() {
            return Err(EditorError::EmptyTileType);
        }
        Ok(Self(id))
    }

    /// The tile kinds shipped with the editor.
    pub fn builtin_catalog() -> Vec<Self> {
        ["forest", "rock", "sand", "water"]
            .into_iter()
            .map(|id| Self(id.to_owned()))
            .collect()
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TileType {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Rotation about the vertical axis in 60° steps, always in `0..6`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
pub struct Orientation(u8);

impl Orientation {
    /// Number of distinct steps in a full turn.
    pub const STEPS: i32 = 6;

    /// Builds an orientation from any step count, wrapping into `0..6`.
    pub fn new(step: i32) -> Self {
        Self(step.rem_euclid(Self::STEPS) as u8)
    }

    /// The step index in `0..6`.
    pub fn step(self) -> u8 {
        self.0
    }

    /// Adds `steps` (may be negative) using true modulo.
    pub fn rotated(self, steps: i32) -> Self {
        Self::new(i32::from(self.0) + steps.rem_euclid(Self::STEPS))
    }

    /// Rotation angle in radians: `step · π/3`.
    pub fn radians(self) -> f32 {
        f32::from(self.0) * std::f32::consts::FRAC_PI_3
    }

    /// Rotation angle in whole degrees.
    pub fn degrees(self) -> u16 {
        u16::from(self.0) * 60
    }
}

/// A tile frozen at the moment it was placed.
#[derive(Clone, Debug, PartialEq, Eq, Reflect)]
pub struct PlacedTile {
    /// Cell the tile occupies.
    pub hex: Hex,
    /// Kind of tile.
    pub tile_type: TileType,
    /// Orientation captured at placement time.
    pub orientation: Orientation,
}

/// Mapping from cell to the tile placed on it.
///
/// Every entry's `hex` equals its key. Transitions never mutate `self`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementState {
    tiles: HashMap<Hex, PlacedTile>,
}

impl PlacementState {
    /// Inserts a tile at `hex`, or removes the one already there.
    ///
    /// When the cell is filled `tile_type` and `orientation` are ignored: a
    /// filled cell can only be cleared. Returns the new state and whether the
    /// toggle removed a tile.
    pub fn toggle(
        &self,
        hex: Hex,
        tile_type: TileType,
        orientation: Orientation,
    ) -> (Self, bool) {
        let mut tiles = self.tiles.clone();
        let was_removed = tiles.remove(&hex).is_some();
        if !was_removed {
            tiles.insert(
                hex,
                PlacedTile {
                    hex,
                    tile_type,
                    orientation,
                },
            );
        }
        (Self { tiles }, was_removed)
    }

    /// The empty state.
    pub fn reset(&self) -> Self {
        Self::default()
    }

    /// All placed tiles ordered by `(q, r)`.
    pub fn snapshot(&self) -> Vec<PlacedTile> {
        let mut tiles: Vec<PlacedTile> = self.tiles.values().cloned().collect();
        tiles.sort_unstable_by_key(|t| (t.hex.x, t.hex.y));
        tiles
    }

    /// The tile at `hex`, if any.
    pub fn get(&self, hex: Hex) -> Option<&PlacedTile> {
        self.tiles.get(&hex)
    }

    /// Whether a tile occupies `hex`.
    pub fn contains(&self, hex: Hex) -> bool {
        self.tiles.contains_key(&hex)
    }

    /// Number of placed tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// `true` when no tile is placed.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Single-writer holder of the current [`PlacementState`].
#[derive(Resource, Debug, Default)]
pub struct PlacementStore {
    state: PlacementState,
}

impl PlacementStore {
    /// Applies a toggle and returns the new state with the removal flag.
    pub fn toggle(
        &mut self,
        hex: Hex,
        tile_type: TileType,
        orientation: Orientation,
    ) -> (&PlacementState, bool) {
        let (next, was_removed) = self.state.toggle(hex, tile_type, orientation);
        self.state = next;
        (&self.state, was_removed)
    }

    /// Discards every placed tile.
    pub fn reset(&mut self) -> &PlacementState {
        self.state = self.state.reset();
        &self.state
    }

    /// The current state.
    pub fn state(&self) -> &PlacementState {
        &self.state
    }

    /// Ordered view of the current state for renderers.
    pub fn snapshot(&self) -> Vec<PlacedTile> {
        self.state.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest() -> TileType {
        TileType::new("forest").unwrap()
    }

    fn rock() -> TileType {
        TileType::new("rock").unwrap()
    }

    // ── TileType ────────────────────────────────────────────────────

    #[test]
    fn empty_tile_type_is_rejected() {
        assert_eq!(TileType::new(""), Err(EditorError::EmptyTileType));
        assert!("".parse::<TileType>().is_err());
    }

    #[test]
    fn tile_type_parses_and_displays() {
        let t: TileType = "water".parse().unwrap();
        assert_eq!(t.as_str(), "water");
        assert_eq!(t.to_string(), "water");
    }

    #[test]
    fn builtin_catalog_starts_with_forest() {
        let catalog = TileType::builtin_catalog();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog[0], forest());
    }

    // ── Orientation ─────────────────────────────────────────────────

    #[test]
    fn orientation_wraps_forward() {
        assert_eq!(Orientation::new(5).rotated(1), Orientation::new(0));
    }

    #[test]
    fn orientation_wraps_backward() {
        assert_eq!(Orientation::new(0).rotated(-1).step(), 5);
        assert_eq!(Orientation::new(2).rotated(-13).step(), 1);
    }

    #[test]
    fn orientation_rotate_inverse_is_identity() {
        for step in 0..6 {
            let o = Orientation::new(step);
            assert_eq!(o.rotated(-1).rotated(1), o);
        }
    }

    #[test]
    fn orientation_survives_extreme_steps() {
        assert_eq!(Orientation::new(i32::MIN).step(), i32::MIN.rem_euclid(6) as u8);
        assert!(Orientation::new(3).rotated(i32::MAX).step() < 6);
    }

    #[test]
    fn orientation_radians_are_multiples_of_sixty_degrees() {
        let o = Orientation::new(3);
        assert!((o.radians() - std::f32::consts::PI).abs() < 1e-6);
        assert_eq!(o.degrees(), 180);
    }

    // ── PlacementState ──────────────────────────────────────────────

    #[test]
    fn toggle_on_empty_cell_inserts() {
        let (state, removed) =
            PlacementState::default().toggle(Hex::new(1, -1), forest(), Orientation::new(2));
        assert!(!removed);
        let tile = state.get(Hex::new(1, -1)).unwrap();
        assert_eq!(tile.hex, Hex::new(1, -1));
        assert_eq!(tile.tile_type, forest());
        assert_eq!(tile.orientation.step(), 2);
    }

    #[test]
    fn toggle_on_filled_cell_removes_and_ignores_new_type() {
        let hex = Hex::new(0, 2);
        let (placed, _) = PlacementState::default().toggle(hex, forest(), Orientation::new(0));
        let (cleared, removed) = placed.toggle(hex, rock(), Orientation::new(4));
        assert!(removed);
        assert!(!cleared.contains(hex));
        assert!(cleared.is_empty());
    }

    #[test]
    fn double_toggle_restores_original_state() {
        let (start, _) = PlacementState::default().toggle(Hex::new(3, 0), rock(), Orientation::new(1));
        for hex in [Hex::new(3, 0), Hex::new(-2, 1), Hex::ZERO] {
            let (once, _) = start.toggle(hex, forest(), Orientation::new(5));
            let (twice, _) = once.toggle(hex, forest(), Orientation::new(5));
            assert_eq!(twice, start, "double toggle at {hex:?}");
        }
    }

    #[test]
    fn toggle_leaves_previous_state_untouched() {
        let before = PlacementState::default();
        let (after, _) = before.toggle(Hex::ZERO, forest(), Orientation::default());
        assert!(before.is_empty());
        assert_eq!(after.len(), 1);
    }

    #[test]
    fn store_accepts_cells_outside_any_grid() {
        let (state, _) =
            PlacementState::default().toggle(Hex::new(500, -900), forest(), Orientation::default());
        assert!(state.contains(Hex::new(500, -900)));
    }

    #[test]
    fn snapshot_is_sorted_and_stable() {
        let mut state = PlacementState::default();
        for hex in [Hex::new(2, 0), Hex::new(-1, 1), Hex::new(0, -1), Hex::new(-1, 0)] {
            state = state.toggle(hex, forest(), Orientation::default()).0;
        }
        let hexes: Vec<Hex> = state.snapshot().iter().map(|t| t.hex).collect();
        assert_eq!(
            hexes,
            vec![Hex::new(-1, 0), Hex::new(-1, 1), Hex::new(0, -1), Hex::new(2, 0)]
        );
        assert_eq!(state.snapshot(), state.snapshot());
    }

    // ── PlacementStore ──────────────────────────────────────────────

    #[test]
    fn reset_clears_completely() {
        let mut store = PlacementStore::default();
        for q in -2..=2 {
            store.toggle(Hex::new(q, 0), forest(), Orientation::default());
        }
        store.toggle(Hex::new(0, 0), forest(), Orientation::default());
        assert_eq!(store.state().len(), 4);
        assert!(store.reset().is_empty());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn store_toggle_reports_removal() {
        let mut store = PlacementStore::default();
        let (state, removed) = store.toggle(Hex::ZERO, forest(), Orientation::default());
        assert!(!removed);
        assert_eq!(state.len(), 1);
        let (state, removed) = store.toggle(Hex::ZERO, rock(), Orientation::default());
        assert!(removed);
        assert!(state.is_empty());
    }
}
