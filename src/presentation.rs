//! Rendering for the windowed build: meshes, lights, the view camera and
//! probe gizmos.
//!
//! `PresentationPlugin` is a passive observer. It decorates entities spawned
//! by the simulation with visuals and never writes simulation state.

use bevy::color::palettes::css::{BLUE, DARK_SLATE_GRAY, ORANGE_RED, SLATE_GRAY};
use bevy::prelude::*;

use crate::camera::FollowCamera;
use crate::collision::Collider;
use crate::skateboard::{Skateboard, SkateboardProbes};

/// Size of the rendered patch standing in for an infinite plane collider.
const PLANE_HALF_SIZE: f32 = 5000.0;

/// Turns the follow camera into the view camera.
fn attach_view_camera(mut commands: Commands, cameras: Query<Entity, Added<FollowCamera>>) {
    for entity in &cameras {
        commands.entity(entity).insert(Camera3d::default());
    }
}

fn collider_mesh(collider: &Collider) -> Mesh {
    match *collider {
        Collider::Cuboid { half_extents } => Cuboid::from_size(half_extents * 2.0).into(),
        Collider::Plane { normal } => Plane3d::new(normal, Vec2::splat(PLANE_HALF_SIZE)).into(),
        Collider::Sphere { radius } => Sphere::new(radius).into(),
        Collider::Capsule {
            radius,
            half_height,
        } => Capsule3d::new(radius, 2.0 * (half_height - radius).max(0.0)).into(),
    }
}

/// Gives every new collider a mesh matching its shape.
fn attach_collider_meshes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    colliders: Query<(Entity, &Collider), Added<Collider>>,
) {
    for (entity, collider) in &colliders {
        let colour = match collider {
            Collider::Plane { .. } => DARK_SLATE_GRAY,
            _ => SLATE_GRAY,
        };
        commands.entity(entity).insert((
            Mesh3d(meshes.add(collider_mesh(collider))),
            MeshMaterial3d(materials.add(StandardMaterial::from(Color::from(colour)))),
        ));
    }
}

/// Gives every new board a deck mesh spanning its sockets.
fn attach_board_meshes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    boards: Query<Entity, Added<Skateboard>>,
) {
    for entity in &boards {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cuboid::new(20.0, 3.0, 80.0))),
            MeshMaterial3d(materials.add(StandardMaterial::from(Color::from(ORANGE_RED)))),
        ));
    }
}

/// Draws this frame's ground probes: nose in white, tail in blue.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn draw_probe_gizmos(mut gizmos: Gizmos, probes: Query<&SkateboardProbes>) {
    for board in &probes {
        if let Some(probe) = board.forward {
            gizmos.line(probe.start, probe.end, Color::WHITE);
        }
        if let Some(probe) = board.backward {
            gizmos.line(probe.start, probe.end, BLUE);
        }
    }
}

/// Spawns the demo level: a floor, a kicker ramp and a couple of boxes.
pub fn spawn_demo_level(mut commands: Commands) {
    commands.spawn((
        Name::new("Floor"),
        Collider::Plane { normal: Vec3::Y },
        Transform::IDENTITY,
    ));
    commands.spawn((
        Name::new("Kicker"),
        Collider::Plane { normal: Vec3::Y },
        Transform::from_xyz(0.0, 0.0, -1200.0)
            .with_rotation(Quat::from_rotation_x(0.25)),
    ));
    for (index, x) in [-300.0, 300.0].into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("Crate{index}")),
            Collider::Cuboid {
                half_extents: Vec3::splat(50.0),
            },
            Transform::from_xyz(x, 50.0, -500.0),
        ));
    }
    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(400.0, 1000.0, 300.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Plugin adding visuals on top of the simulation.
#[derive(Debug, Default)]
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_demo_level);
        app.add_systems(
            PostUpdate,
            (attach_view_camera, attach_collider_meshes, attach_board_meshes),
        );
        app.add_systems(PostUpdate, draw_probe_gizmos);
    }
}
