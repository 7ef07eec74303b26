use bevy::gltf::Gltf;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use hexx::Hex;

use crate::placement::{PlacedTile, PlacementState, TileType};

/// Input to the editor core, processed in arrival order by `apply_commands`.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum EditorCommand {
    /// Toggle the tile at a cell using the current selection.
    PlaceAt(Hex),
    /// Change the type used by the next placement.
    SelectType(TileType),
    /// Rotate the pending orientation by this many 60° steps.
    Rotate(i32),
    /// Remove every placed tile.
    Reset,
    /// Regenerate the clickable grid with a new radius.
    Resize(i32),
}

/// Clickable cell marker.
#[derive(Component, Reflect)]
pub struct HexMarker {
    /// The cell this marker represents.
    pub hex: Hex,
}

/// Root entity of a rendered tile.
#[derive(Component, Reflect)]
pub struct TileView {
    /// The placed tile this entity draws.
    pub tile: PlacedTile,
}

/// Tile whose model file has not settled into a scene or the fallback yet.
#[derive(Component)]
pub struct PendingModel {
    /// Asset path requested for the model.
    pub path: String,
    /// The whole glTF file; failures are reported on this handle.
    pub gltf: Handle<Gltf>,
}

/// Entry/exit tween of a tile root.
#[derive(Component, Reflect, Clone, Debug)]
pub enum TileTransition {
    /// Dropping into `rest` while scaling up.
    Entering {
        /// Seconds since the tween started.
        elapsed: f32,
        /// Final translation.
        rest: Vec3,
    },
    /// Shrinking away; the entity despawns at the end.
    Exiting {
        /// Seconds since the tween started.
        elapsed: f32,
    },
}

/// Maps cells to their spawned [`HexMarker`] entity IDs.
#[derive(Resource, Default)]
pub struct MarkerEntities {
    /// Lookup from hex to entity.
    pub map: HashMap<Hex, Entity>,
}

/// Bookkeeping for tile reconciliation.
#[derive(Resource, Default)]
pub struct RenderedTiles {
    /// Live (non-exiting) tile roots by cell.
    pub entities: HashMap<Hex, Entity>,
    /// The placement state the live entities were built from.
    pub last: PlacementState,
}

/// Shared mesh and material handles.
#[derive(Resource)]
pub struct EditorAssets {
    /// Unit-circumradius flat hexagon, scaled per marker.
    pub marker_mesh: Handle<Mesh>,
    /// Marker material for empty cells.
    pub empty_material: Handle<StandardMaterial>,
    /// Marker material for occupied cells.
    pub occupied_material: Handle<StandardMaterial>,
    /// Stand-in prism for tiles whose model failed to load.
    pub fallback_mesh: Handle<Mesh>,
    /// Loud material for the stand-in prism.
    pub fallback_material: Handle<StandardMaterial>,
}

impl EditorAssets {
    /// Marker material for a cell with or without a tile.
    pub fn marker_material(&self, occupied: bool) -> Handle<StandardMaterial> {
        if occupied {
            self.occupied_material.clone()
        } else {
            self.empty_material.clone()
        }
    }
}

/// Marker component for the editor camera.
#[derive(Component)]
pub struct EditorCamera;
