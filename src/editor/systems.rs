use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::picking::pointer::PointerButton;
use bevy::prelude::*;
use bevy_egui::{EguiContext, egui};

use super::EditorConfig;
use super::entities::{
    EditorAssets, EditorCommand, HexMarker, MarkerEntities, PendingModel, RenderedTiles,
    TileTransition, TileView,
};
use crate::grid::GridCells;
use crate::math;
use crate::placement::PlacementStore;
use crate::selection::SelectionState;
use crate::snapshot::{RenderedTile, SnapshotDiff, model_path};

/// Smallest scale a tweened tile is drawn at; avoids a degenerate transform.
const MIN_TILE_SCALE: f32 = 0.001;

/// Largest radius offered by the panel slider.
const MAX_PANEL_RADIUS: i32 = 12;

const DIGIT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

// ── Update: input → commands ───────────────────────────────────────

/// Q/E rotate, 1–9 pick a catalog type, Backspace resets.
pub fn keyboard_commands(
    keys: Res<ButtonInput<KeyCode>>,
    cfg: Res<EditorConfig>,
    mut out: MessageWriter<EditorCommand>,
) {
    if keys.just_pressed(KeyCode::KeyQ) {
        out.write(EditorCommand::Rotate(-1));
    }
    if keys.just_pressed(KeyCode::KeyE) {
        out.write(EditorCommand::Rotate(1));
    }
    for (key, tile_type) in DIGIT_KEYS.iter().zip(&cfg.tiles.catalog) {
        if keys.just_pressed(*key) {
            out.write(EditorCommand::SelectType(tile_type.clone()));
        }
    }
    if keys.just_pressed(KeyCode::Backspace) {
        out.write(EditorCommand::Reset);
    }
}

/// Applies queued commands to the store, the selection and the grid.
///
/// The single writer of all three resources.
pub fn apply_commands(
    mut commands_in: MessageReader<EditorCommand>,
    mut store: ResMut<PlacementStore>,
    mut selection: ResMut<SelectionState>,
    mut grid: ResMut<GridCells>,
) {
    for command in commands_in.read() {
        match command {
            EditorCommand::PlaceAt(hex) => {
                // Clearing works anywhere; new tiles need a grid cell
                if !grid.contains(*hex) && !store.state().contains(*hex) {
                    warn!("ignoring placement at ({},{}): outside the grid", hex.x, hex.y);
                    continue;
                }
                let tile_type = selection.tile_type.clone();
                let orientation = selection.pending_orientation;
                let (state, was_removed) = store.toggle(*hex, tile_type, orientation);
                if was_removed {
                    debug!("cleared ({},{}), {} tiles placed", hex.x, hex.y, state.len());
                } else {
                    debug!(
                        "placed {} at ({},{}) rotated {}°, {} tiles placed",
                        selection.tile_type,
                        hex.x,
                        hex.y,
                        orientation.degrees(),
                        state.len()
                    );
                }
            }
            EditorCommand::SelectType(tile_type) => {
                let next = selection.select_type(tile_type.clone());
                if selection.set_if_neq(next) {
                    debug!("selected tile type {tile_type}");
                }
            }
            EditorCommand::Rotate(steps) => {
                let next = selection.rotate(*steps);
                if selection.set_if_neq(next) {
                    debug!(
                        "pending rotation {}°",
                        selection.pending_orientation.degrees()
                    );
                }
            }
            EditorCommand::Reset => {
                let cleared = store.state().len();
                store.reset();
                info!("reset: removed {cleared} tiles");
            }
            EditorCommand::Resize(radius) => match GridCells::new(*radius) {
                Ok(cells) => {
                    if grid.set_if_neq(cells) {
                        info!(
                            "regenerated grid: radius {}, {} cells",
                            grid.radius(),
                            grid.cells().len()
                        );
                    }
                }
                Err(err) => warn!("ignoring resize: {err}"),
            },
        }
    }
}

// ── Update: grid markers ───────────────────────────────────────────

/// Rebuilds the marker entities after [`GridCells`] changes.
pub fn sync_grid_markers(
    mut commands: Commands,
    cells: Res<GridCells>,
    store: Res<PlacementStore>,
    assets: Res<EditorAssets>,
    cfg: Res<EditorConfig>,
    mut markers: ResMut<MarkerEntities>,
) {
    for (_, entity) in markers.map.drain() {
        commands.entity(entity).despawn();
    }

    let g = &cfg.grid;
    for &hex in cells.cells() {
        let entity = commands
            .spawn((
                HexMarker { hex },
                Name::new(format!("HexMarker({},{})", hex.x, hex.y)),
                Mesh3d(assets.marker_mesh.clone()),
                MeshMaterial3d(assets.marker_material(store.state().contains(hex))),
                Transform::from_translation(math::to_world(hex, g.marker_spacing, g.marker_height))
                    .with_scale(Vec3::new(g.marker_radius, 1.0, g.marker_radius)),
            ))
            .observe(
                move |click: On<Pointer<Click>>, mut out: MessageWriter<EditorCommand>| {
                    if click.button == PointerButton::Primary {
                        out.write(EditorCommand::PlaceAt(hex));
                    }
                },
            )
            .id();
        markers.map.insert(hex, entity);
    }
}

/// Tints markers orange where a tile is placed, gray elsewhere.
pub fn color_markers(
    store: Res<PlacementStore>,
    assets: Res<EditorAssets>,
    mut markers: Query<(&HexMarker, &mut MeshMaterial3d<StandardMaterial>)>,
) {
    for (marker, mut material) in &mut markers {
        let wanted = assets.marker_material(store.state().contains(marker.hex));
        if material.0 != wanted {
            material.0 = wanted;
        }
    }
}

// ── Update: tile reconciliation ────────────────────────────────────

/// Spawns and retires tile entities from the diff against the last snapshot.
///
/// Removed tiles start an exit tween instead of despawning right away.
pub fn reconcile_tiles(
    mut commands: Commands,
    store: Res<PlacementStore>,
    mut rendered: ResMut<RenderedTiles>,
    asset_server: Res<AssetServer>,
    cfg: Res<EditorConfig>,
) {
    let diff = SnapshotDiff::between(&rendered.last, store.state());
    if diff.is_empty() {
        return;
    }

    for hex in &diff.removed {
        if let Some(entity) = rendered.entities.remove(hex) {
            commands
                .entity(entity)
                .insert(TileTransition::Exiting { elapsed: 0.0 });
        }
    }

    let t = &cfg.tiles;
    for tile in diff.added {
        let view = RenderedTile::from_placed(&tile, t.spacing, t.ground_offset);
        let path = model_path(&t.models_dir, &tile.tile_type);
        let gltf = asset_server.load::<Gltf>(path.clone());
        let hex = tile.hex;
        let placed = tile.clone();

        let entity = commands
            .spawn((
                Name::new(format!("Tile({},{}:{})", hex.x, hex.y, tile.tile_type)),
                PendingModel { path, gltf },
                Transform::from_translation(view.position + Vec3::Y * t.drop_height)
                    .with_rotation(Quat::from_rotation_y(view.orientation_radians))
                    .with_scale(Vec3::splat(MIN_TILE_SCALE)),
                TileTransition::Entering {
                    elapsed: 0.0,
                    rest: view.position,
                },
                TileView { tile },
            ))
            .observe(
                move |click: On<Pointer<Click>>,
                      store: Res<PlacementStore>,
                      mut out: MessageWriter<EditorCommand>| {
                    // Exiting copies no longer match the store
                    if click.button == PointerButton::Primary
                        && store.state().get(hex) == Some(&placed)
                    {
                        out.write(EditorCommand::PlaceAt(hex));
                    }
                },
            )
            .id();
        rendered.entities.insert(hex, entity);
    }

    rendered.last = store.state().clone();
}

/// Advances entry/exit tweens; exited tiles are despawned.
pub fn animate_transitions(
    mut commands: Commands,
    time: Res<Time>,
    cfg: Res<EditorConfig>,
    mut tiles: Query<(Entity, &mut Transform, &mut TileTransition)>,
) {
    let dt = time.delta_secs();
    for (entity, mut transform, mut transition) in &mut tiles {
        match &mut *transition {
            TileTransition::Entering { elapsed, rest } => {
                *elapsed += dt;
                let t = math::tween_progress(*elapsed, cfg.tiles.enter_duration);
                let eased = math::ease_out_cubic(t);
                transform.translation = *rest + Vec3::Y * cfg.tiles.drop_height * (1.0 - eased);
                transform.scale = Vec3::splat(eased.max(MIN_TILE_SCALE));
                if t >= 1.0 {
                    commands.entity(entity).remove::<TileTransition>();
                }
            }
            TileTransition::Exiting { elapsed } => {
                *elapsed += dt;
                let t = math::tween_progress(*elapsed, cfg.tiles.exit_duration);
                let shrink = 1.0 - math::ease_out_cubic(t);
                // An interrupted entry shrinks from wherever it got to
                let scale = transform.scale.x.min(shrink).max(MIN_TILE_SCALE);
                transform.scale = Vec3::splat(scale);
                if t >= 1.0 {
                    commands.entity(entity).despawn();
                }
            }
        }
    }
}

/// Where a tile's model file stands.
#[derive(Debug, PartialEq)]
pub enum ModelStatus {
    /// Still loading.
    Pending,
    /// Loaded; the first scene of the file.
    Ready(Handle<Scene>),
    /// Cannot be drawn; the reason is logged.
    Unresolved(String),
}

/// Classifies the load state of a glTF file and its first scene.
pub fn model_status(state: &LoadState, first_scene: Option<Handle<Scene>>) -> ModelStatus {
    match state {
        LoadState::NotLoaded | LoadState::Loading => ModelStatus::Pending,
        LoadState::Failed(err) => ModelStatus::Unresolved(err.to_string()),
        LoadState::Loaded => match first_scene {
            Some(scene) => ModelStatus::Ready(scene),
            None => ModelStatus::Unresolved("the file contains no scene".to_owned()),
        },
    }
}

/// Settles pending tile models; unresolved ones get the fallback prism.
///
/// The tile stays placed either way.
pub fn resolve_tile_models(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    assets: Res<EditorAssets>,
    pending: Query<(Entity, &PendingModel, &TileView)>,
) {
    for (entity, model, view) in &pending {
        let first_scene = gltfs
            .get(&model.gltf)
            .and_then(|gltf| gltf.scenes.first().cloned());
        match model_status(&asset_server.load_state(&model.gltf), first_scene) {
            ModelStatus::Pending => {}
            ModelStatus::Ready(scene) => {
                commands
                    .entity(entity)
                    .try_remove::<PendingModel>()
                    .try_insert(SceneRoot(scene));
            }
            ModelStatus::Unresolved(reason) => {
                warn!(
                    "no model for tile type '{}' at {}: {reason}; drawing fallback",
                    view.tile.tile_type, model.path
                );
                commands
                    .entity(entity)
                    .try_remove::<PendingModel>()
                    .try_insert((
                        Mesh3d(assets.fallback_mesh.clone()),
                        MeshMaterial3d(assets.fallback_material.clone()),
                    ));
            }
        }
    }
}

// ── Egui: selection panel ──────────────────────────────────────────

/// Slider bounds that always include the current radius.
fn slider_range(radius: i32) -> std::ops::RangeInclusive<i32> {
    0..=MAX_PANEL_RADIUS.max(radius)
}

/// Type buttons, rotation, reset and grid radius.
pub fn selection_panel(
    mut egui_ctx: Query<&mut EguiContext>,
    cfg: Res<EditorConfig>,
    selection: Res<SelectionState>,
    store: Res<PlacementStore>,
    grid: Res<GridCells>,
    mut out: MessageWriter<EditorCommand>,
) {
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };

    egui::Window::new("Tiles")
        .anchor(egui::Align2::LEFT_TOP, [16.0, 16.0])
        .resizable(false)
        .collapsible(false)
        .show(ctx.get_mut(), |ui| {
            ui.horizontal(|ui| {
                for tile_type in &cfg.tiles.catalog {
                    let selected = *tile_type == selection.tile_type;
                    if ui.selectable_label(selected, tile_type.as_str()).clicked() {
                        out.write(EditorCommand::SelectType(tile_type.clone()));
                    }
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Rotate -60° (Q)").clicked() {
                    out.write(EditorCommand::Rotate(-1));
                }
                if ui.button("Rotate +60° (E)").clicked() {
                    out.write(EditorCommand::Rotate(1));
                }
                if ui.button("Reset").clicked() {
                    out.write(EditorCommand::Reset);
                }
            });
            let mut radius = grid.radius() as i32;
            let range = slider_range(radius);
            if ui
                .add(egui::Slider::new(&mut radius, range).text("radius"))
                .changed()
            {
                out.write(EditorCommand::Resize(radius));
            }
            ui.separator();
            ui.label(format!(
                "Selected: {} · {}° · {} placed",
                selection.tile_type,
                selection.pending_orientation.degrees(),
                store.state().len()
            ));
        });
}
