//! Bevy front end: grid markers, tile models, input and the selection panel.
//!
//! Every input source writes [`EditorCommand`] messages; `apply_commands` is
//! the only system that mutates the placement store, the selection and the
//! grid. Tile entities are reconciled from store snapshots afterwards.

mod entities;
mod startup_systems;
mod systems;

pub use entities::{EditorCommand, HexMarker, TileView};

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::EditorState;
use crate::grid::GridCells;
use crate::placement::{PlacementStore, TileType};
use crate::selection::SelectionState;

/// Nested configuration for the editor.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct EditorConfig {
    /// Selectable cell grid settings.
    pub grid: GridSettings,
    /// Placed tile settings.
    pub tiles: TileSettings,
    /// Where the static camera sits; it always looks at the origin.
    pub camera_position: Vec3,
    /// Vertical field of view of the camera.
    pub camera_fov_degrees: f32,
    /// Background clear color.
    pub clear_color: Color,
}

/// Grid extent and marker appearance.
#[derive(Clone, Debug, Reflect)]
pub struct GridSettings {
    /// Number of hex rings around the origin.
    pub radius: i32,
    /// Cell size used to position markers; independent of tile spacing.
    pub marker_spacing: f32,
    /// Circumradius of a marker hexagon.
    pub marker_radius: f32,
    /// Height of the markers above the ground plane.
    pub marker_height: f32,
    /// Marker opacity.
    pub marker_alpha: f32,
}

/// Tile catalog, model lookup and placement animation.
#[derive(Clone, Debug, Reflect)]
pub struct TileSettings {
    /// Types offered by the panel and the number keys, in order.
    pub catalog: Vec<TileType>,
    /// Type selected when the session starts.
    pub default_type: TileType,
    /// Asset directory holding one `{type}.glb` per tile type.
    pub models_dir: String,
    /// Cell size used to position tiles.
    pub spacing: f32,
    /// Height of the tile origin above the ground plane.
    pub ground_offset: f32,
    /// Seconds a new tile takes to drop into place.
    pub enter_duration: f32,
    /// Seconds a removed tile takes to shrink away.
    pub exit_duration: f32,
    /// Height a new tile drops from.
    pub drop_height: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid: GridSettings {
                radius: 4,
                marker_spacing: 1.1,
                marker_radius: 0.95,
                marker_height: 0.01,
                marker_alpha: 0.25,
            },
            tiles: TileSettings {
                catalog: TileType::builtin_catalog(),
                default_type: TileType::builtin_catalog().swap_remove(0),
                models_dir: "models".to_owned(),
                spacing: 1.0,
                ground_offset: 0.0,
                enter_duration: 0.25,
                exit_duration: 0.2,
                drop_height: 0.6,
            },
            camera_position: Vec3::new(0.0, 8.0, 12.0),
            camera_fov_degrees: 50.0,
            clear_color: Color::srgb(0.08, 0.09, 0.11),
        }
    }
}

/// Editor plugin: grid and scene at startup, command handling and tile
/// reconciliation every frame.
///
/// Expects `EguiPlugin`, `MeshPickingPlugin` and the [`EditorState`] state to
/// be set up by the app.
pub struct EditorPlugin(pub EditorConfig);

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<EditorConfig>()
            .register_type::<HexMarker>()
            .register_type::<TileView>()
            .register_type::<entities::TileTransition>()
            .register_type::<SelectionState>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .insert_resource(SelectionState::new(self.0.tiles.default_type.clone()))
            .init_resource::<PlacementStore>()
            .init_resource::<entities::MarkerEntities>()
            .init_resource::<entities::RenderedTiles>()
            .add_message::<EditorCommand>()
            .add_systems(
                Startup,
                (startup_systems::setup_scene, startup_systems::generate_grid),
            )
            .add_systems(
                Update,
                systems::keyboard_commands
                    .before(systems::apply_commands)
                    .run_if(in_state(EditorState::Editing)),
            )
            .add_systems(
                Update,
                (
                    systems::apply_commands.run_if(in_state(EditorState::Editing)),
                    systems::sync_grid_markers.run_if(resource_changed::<GridCells>),
                    systems::color_markers.run_if(resource_changed::<PlacementStore>),
                    systems::reconcile_tiles.run_if(resource_changed::<PlacementStore>),
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    systems::animate_transitions.after(systems::reconcile_tiles),
                    systems::resolve_tile_models,
                ),
            )
            .add_systems(
                EguiPrimaryContextPass,
                systems::selection_panel.run_if(in_state(EditorState::Editing)),
            );
    }
}
