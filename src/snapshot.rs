//! The boundary between placement state and whatever draws it.
//!
//! Renderers consume [`RenderedTile`]s and reconcile entities from the
//! [`SnapshotDiff`] of two consecutive states. Nothing here feeds back into
//! the store.

use bevy::prelude::*;
use hexx::Hex;

use crate::math;
use crate::placement::{PlacedTile, PlacementState, TileType};

/// A placed tile resolved to a draw position.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedTile {
    /// Cell the tile came from.
    pub hex: Hex,
    /// World position; `y` is the caller's ground offset.
    pub position: Vec3,
    /// Kind of tile, used to resolve the model.
    pub tile_type: TileType,
    /// Rotation about Y in radians.
    pub orientation_radians: f32,
}

impl RenderedTile {
    /// Positions `tile` on a grid with the given spacing.
    pub fn from_placed(tile: &PlacedTile, cell_size: f32, ground_offset: f32) -> Self {
        Self {
            hex: tile.hex,
            position: math::to_world(tile.hex, cell_size, ground_offset),
            tile_type: tile.tile_type.clone(),
            orientation_radians: tile.orientation.radians(),
        }
    }
}

/// Resolves every tile of `state`, in snapshot order.
pub fn render_snapshot(
    state: &PlacementState,
    cell_size: f32,
    ground_offset: f32,
) -> Vec<RenderedTile> {
    state
        .snapshot()
        .iter()
        .map(|tile| RenderedTile::from_placed(tile, cell_size, ground_offset))
        .collect()
}

/// Asset path of the model for `tile_type`: `{models_dir}/{type}.glb`.
pub fn model_path(models_dir: &str, tile_type: &TileType) -> String {
    let dir = models_dir.trim_end_matches('/');
    if dir.is_empty() {
        format!("{tile_type}.glb")
    } else {
        format!("{dir}/{tile_type}.glb")
    }
}

/// Tiles that appeared and cells that were vacated between two states.
///
/// A cell whose tile differs between the two counts as both removed and
/// added, so renderers can replace it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SnapshotDiff {
    /// Tiles present in the newer state only.
    pub added: Vec<PlacedTile>,
    /// Cells whose tile from the older state is gone.
    pub removed: Vec<Hex>,
}

impl SnapshotDiff {
    /// Compares `prev` against `next`.
    pub fn between(prev: &PlacementState, next: &PlacementState) -> Self {
        let removed = prev
            .snapshot()
            .into_iter()
            .filter(|tile| next.get(tile.hex) != Some(tile))
            .map(|tile| tile.hex)
            .collect();
        let added = next
            .snapshot()
            .into_iter()
            .filter(|tile| prev.get(tile.hex) != Some(tile))
            .collect();
        Self { added, removed }
    }

    /// `true` when the two states render identically.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}
