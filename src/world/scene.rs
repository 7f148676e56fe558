//! Scene spawning: camera, lights, floor, backboards and rims

use bevy::prelude::*;

use super::Court;
use crate::constants::*;

/// Marker for static court geometry
#[derive(Component)]
pub struct CourtPiece;

/// Spawn camera, lights and the static court pieces
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    court: Res<Court>,
) {
    // Camera - behind the sideline, high enough to see both rims
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 11.0, 21.0).looking_at(Vec3::new(0.0, 2.0, 0.0), Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 9000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(6.0, 18.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Fill light over center court
    commands.spawn((
        PointLight {
            intensity: 2_000_000.0,
            range: 40.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, 10.0, 0.0),
    ));

    // Floor slab, top face at FLOOR_SURFACE_Y
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(
            court.half_length * 2.0,
            FLOOR_THICKNESS,
            court.half_width * 2.0,
        ))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: COURT_COLOR,
            perceptual_roughness: 0.8,
            ..default()
        })),
        Transform::IDENTITY,
        CourtPiece,
    ));

    let board_material = materials.add(StandardMaterial {
        base_color: BACKBOARD_COLOR,
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    let rim_material = materials.add(StandardMaterial {
        base_color: RIM_COLOR,
        metallic: 0.6,
        perceptual_roughness: 0.4,
        ..default()
    });

    for hoop in &court.hoops {
        let board = &hoop.backboard;
        // Slab spans from the face back by its thickness
        let center_x = board.face_x - board.facing * BACKBOARD_THICKNESS / 2.0;
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(
                BACKBOARD_THICKNESS,
                board.y_max - board.y_min,
                board.z_max - board.z_min,
            ))),
            MeshMaterial3d(board_material.clone()),
            Transform::from_xyz(center_x, (board.y_min + board.y_max) / 2.0, 0.0),
            hoop.side,
            CourtPiece,
        ));

        commands.spawn((
            Mesh3d(meshes.add(Torus {
                minor_radius: hoop.rim_tube_radius,
                major_radius: hoop.rim_radius,
            })),
            MeshMaterial3d(rim_material.clone()),
            Transform::from_translation(hoop.rim_center),
            hoop.side,
            CourtPiece,
        ));
    }

    info!(
        "Court spawned: {:.0}x{:.0}, rims at x = {:.2}",
        court.half_length * 2.0,
        court.half_width * 2.0,
        court.hoops[1].rim_center.x
    );
}
