//! Ball and trail meshes, synced from the simulation each frame

use bevy::prelude::*;

use super::components::Ball;
use crate::constants::*;
use crate::simulation::GameSim;

/// One trail sphere; index 0 is the newest sample
#[derive(Component)]
pub struct TrailDot(pub usize);

pub fn spawn_ball_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim: Res<GameSim>,
) {
    let snapshot = sim.ball.snapshot();
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(sim.ball.radius))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: BALL_COLOR,
            perceptual_roughness: 0.6,
            ..default()
        })),
        Transform::from_translation(snapshot.position),
        Ball,
    ));

    let trail_material = materials.add(StandardMaterial {
        base_color: TRAIL_COLOR,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    for i in 0..TRAIL_CAPACITY {
        // Older samples shrink
        let scale = 1.0 - i as f32 / TRAIL_CAPACITY as f32;
        commands.spawn((
            Mesh3d(meshes.add(Sphere::new(sim.ball.radius * 0.35 * scale.max(0.2)))),
            MeshMaterial3d(trail_material.clone()),
            Transform::default(),
            Visibility::Hidden,
            TrailDot(i),
        ));
    }
}

/// Copy the latest whole-tick ball state onto the ball mesh
pub fn sync_ball_visual(sim: Res<GameSim>, mut balls: Query<&mut Transform, With<Ball>>) {
    let snapshot = sim.ball.snapshot();
    for mut transform in &mut balls {
        transform.translation = snapshot.position;
        if snapshot.airborne {
            transform.rotation = snapshot.heading();
        }
    }
}

pub fn sync_trail(
    sim: Res<GameSim>,
    mut dots: Query<(&TrailDot, &mut Transform, &mut Visibility), Without<Ball>>,
) {
    for (dot, mut transform, mut visibility) in &mut dots {
        match sim.trail.recent(dot.0) {
            Some(point) => {
                transform.translation = point;
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}
