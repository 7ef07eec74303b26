//! The tile type and rotation applied by the next placement.

use bevy::prelude::*;

use crate::placement::{Orientation, TileType};

/// What the next placement will put down.
///
/// Lives for one editing session. A placed tile copies `pending_orientation`
/// at toggle time, so later rotations never reach it.
#[derive(Resource, Clone, Debug, PartialEq, Eq, Reflect)]
pub struct SelectionState {
    /// Type used by the next placement.
    pub tile_type: TileType,
    /// Orientation used by the next placement.
    pub pending_orientation: Orientation,
}

impl SelectionState {
    /// Starts a session with `tile_type` selected and no rotation.
    pub fn new(tile_type: TileType) -> Self {
        Self {
            tile_type,
            pending_orientation: Orientation::default(),
        }
    }

    /// Replaces the type, keeping the pending orientation.
    pub fn select_type(&self, tile_type: TileType) -> Self {
        Self {
            tile_type,
            pending_orientation: self.pending_orientation,
        }
    }

    /// Rotates the pending orientation by `steps` sixths of a turn.
    pub fn rotate(&self, steps: i32) -> Self {
        Self {
            tile_type: self.tile_type.clone(),
            pending_orientation: self.pending_orientation.rotated(steps),
        }
    }
}
