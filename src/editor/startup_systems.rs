use bevy::asset::RenderAssetUsages;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use hexx::{HexLayout, HexOrientation, PlaneMeshBuilder};

use super::EditorConfig;
use super::entities::{EditorAssets, EditorCamera};
use crate::grid::GridCells;

// ── Startup ─────────────────────────────────────────────────────────

/// Spawns the camera and light, and inserts [`EditorAssets`].
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<EditorConfig>,
) {
    commands.spawn((
        Name::new("Camera"),
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: cfg.camera_fov_degrees.to_radians(),
            ..default()
        }),
        Transform::from_translation(cfg.camera_position).looking_at(Vec3::ZERO, Vec3::Y),
        EditorCamera,
    ));

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 7.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Flat hexagon of circumradius 1, scaled per marker
    let unit_layout = HexLayout {
        orientation: HexOrientation::Pointy,
        scale: Vec2::splat(1.0),
        ..default()
    };
    let hex_mesh_info = PlaneMeshBuilder::new(&unit_layout).build();
    // Picking raycasts against main-world vertex data
    let marker_mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, hex_mesh_info.vertices)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, hex_mesh_info.normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, hex_mesh_info.uvs)
        .with_inserted_indices(Indices::U16(hex_mesh_info.indices));

    let alpha = cfg.grid.marker_alpha;
    let empty_material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.5, 0.5, 0.5, alpha),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    let occupied_material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 0.65, 0.0, alpha),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    let fallback_material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.0, 1.0),
        emissive: LinearRgba::rgb(0.6, 0.0, 0.6),
        ..default()
    });

    commands.insert_resource(EditorAssets {
        marker_mesh: meshes.add(marker_mesh),
        empty_material,
        occupied_material,
        fallback_mesh: meshes.add(Cylinder::new(0.9, 0.2)),
        fallback_material,
    });
}

/// Inserts the initial [`GridCells`] for the configured radius.
///
/// A rejected radius leaves an empty grid and logs the error.
pub fn generate_grid(mut commands: Commands, cfg: Res<EditorConfig>) {
    let cells = match GridCells::new(cfg.grid.radius) {
        Ok(cells) => {
            info!(
                "generated {} cells for grid radius {}",
                cells.cells().len(),
                cells.radius()
            );
            cells
        }
        Err(err) => {
            error!("cannot build the editor grid: {err}");
            GridCells::default()
        }
    };
    commands.insert_resource(cells);
}
