#![warn(missing_docs)]
//! Hex tile editor binary.
//!
//! Opens a window with a hexagonal grid; pick a tile type in the panel (or
//! with 1–9), rotate with Q/E, click cells to place or clear tiles.

use bevy::app::AppExit;
use bevy::log::LogPlugin;
use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;
use bevy_inspector_egui::quick::WorldInspectorPlugin;
#[cfg(feature = "native")]
use clap::Parser;

use hex_tile_editor::EditorState;
use hex_tile_editor::editor::{EditorConfig, EditorPlugin};
#[cfg(feature = "native")]
use hex_tile_editor::placement::TileType;

const DEFAULT_LOG_FILTER: &str = "wgpu=error,naga=warn,hex_tile_editor=debug";

/// Command-line overrides for [`EditorConfig`].
#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(name = "hex-tile-editor", version, about = "Interactive hexagonal tile editor")]
struct Cli {
    /// Number of hex rings around the origin.
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..))]
    radius: Option<i32>,
    /// Distance scale used to position placed tiles.
    #[arg(long)]
    tile_spacing: Option<f32>,
    /// Distance scale used to position the clickable cell markers.
    #[arg(long)]
    marker_spacing: Option<f32>,
    /// Asset directory holding one `{type}.glb` per tile type.
    #[arg(long)]
    models_dir: Option<String>,
    /// Tile type selected at startup; added to the catalog if missing.
    #[arg(long)]
    default_type: Option<TileType>,
    /// Log filter in `tracing` env-filter syntax.
    #[arg(long, default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,
}

#[cfg(feature = "native")]
impl Cli {
    /// Applies the overrides on top of the defaults; returns the log filter too.
    fn into_config(self) -> (EditorConfig, String) {
        let mut cfg = EditorConfig::default();
        if let Some(radius) = self.radius {
            cfg.grid.radius = radius;
        }
        if let Some(spacing) = self.tile_spacing {
            cfg.tiles.spacing = spacing;
        }
        if let Some(spacing) = self.marker_spacing {
            cfg.grid.marker_spacing = spacing;
        }
        if let Some(dir) = self.models_dir {
            cfg.tiles.models_dir = dir;
        }
        if let Some(tile_type) = self.default_type {
            if !cfg.tiles.catalog.contains(&tile_type) {
                cfg.tiles.catalog.push(tile_type.clone());
            }
            cfg.tiles.default_type = tile_type;
        }
        (cfg, self.log_filter)
    }
}

#[cfg(feature = "native")]
fn editor_config() -> (EditorConfig, String) {
    Cli::parse().into_config()
}

#[cfg(not(feature = "native"))]
fn editor_config() -> (EditorConfig, String) {
    (EditorConfig::default(), DEFAULT_LOG_FILTER.to_owned())
}

fn main() {
    let (config, log_filter) = editor_config();
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Hex Tile Editor".into(),
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                filter: log_filter,
                ..default()
            }),
    )
    .register_type::<EditorState>()
    .init_state::<EditorState>()
    .add_plugins(MeshPickingPlugin)
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(EditorPlugin(config))
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(EditorState::Inspecting)));

    app.run();
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<EditorState>>,
    mut next: ResMut<NextState<EditorState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        let new_state = match state.get() {
            EditorState::Editing => EditorState::Inspecting,
            EditorState::Inspecting => EditorState::Editing,
        };
        info!("switching to {new_state:?}");
        next.set(new_state);
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}

#[cfg(all(test, feature = "native"))]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_keeps_defaults() {
        let (cfg, filter) = Cli::try_parse_from(["hex-tile-editor"])
            .unwrap()
            .into_config();
        assert_eq!(cfg.grid.radius, 4);
        assert_eq!(cfg.tiles.default_type.as_str(), "forest");
        assert_eq!(filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn spacings_are_independent() {
        let (cfg, _) = Cli::try_parse_from([
            "hex-tile-editor",
            "--tile-spacing",
            "2.0",
            "--marker-spacing",
            "2.5",
        ])
        .unwrap()
        .into_config();
        assert_eq!(cfg.tiles.spacing, 2.0);
        assert_eq!(cfg.grid.marker_spacing, 2.5);
    }

    #[test]
    fn negative_radius_is_rejected_at_parse_time() {
        assert!(Cli::try_parse_from(["hex-tile-editor", "--radius=-1"]).is_err());
    }

    #[test]
    fn empty_default_type_is_rejected() {
        assert!(Cli::try_parse_from(["hex-tile-editor", "--default-type", ""]).is_err());
    }

    #[test]
    fn unknown_default_type_joins_the_catalog() {
        let (cfg, _) = Cli::try_parse_from(["hex-tile-editor", "--default-type", "lava"])
            .unwrap()
            .into_config();
        assert_eq!(cfg.tiles.default_type.as_str(), "lava");
        assert_eq!(cfg.tiles.catalog.last(), Some(&cfg.tiles.default_type));
    }
}
