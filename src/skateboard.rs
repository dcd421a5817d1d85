//! Per-frame alignment of the skateboard with the ground under it.
//!
//! Each frame the board casts one vertical probe through its nose socket and
//! one through its tail socket. Where a probe finds ground the contact point
//! is used; where it finds nothing the raised probe start stands in, so a
//! board over a gap simply keeps its own socket layout. The board is then
//! turned to look from the tail contact to the nose contact. Nothing here
//! fails: missing ground is a visual fallback, not an error.

use bevy::prelude::*;

use crate::character::Skater;
use crate::collision::{collect_scene, Collider, LineTrace, TraceIgnore};
use crate::sockets::{
    skateboard_backward_socket_name, skateboard_forward_socket_name, SkateboardSockets,
};
use crate::vector_math::look_at_rotation;

/// Link from a character to the board it rides.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkateboardLink(pub Entity);

/// A board attached to a rider.
///
/// The board keeps its rotation relative to the rider between frames, the
/// way an attached component would, so turning the rider turns the board
/// before the probes run.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Skateboard {
    /// Character riding this board.
    pub rider: Entity,
    /// Board origin in the rider's local frame.
    pub mount_offset: Vec3,
    /// Board rotation in the rider's local frame.
    pub relative_rotation: Quat,
}

impl Skateboard {
    /// A board mounted on `rider` at `mount_offset`, aligned with the rider.
    #[must_use]
    pub const fn new(rider: Entity, mount_offset: Vec3) -> Self {
        Self {
            rider,
            mount_offset,
            relative_rotation: Quat::IDENTITY,
        }
    }

    /// World transform of the board for a rider at `rider`.
    #[must_use]
    pub fn world_pose(&self, rider: &Transform) -> Transform {
        Transform::from_translation(rider.transform_point(self.mount_offset))
            .with_rotation(rider.rotation * self.relative_rotation)
    }
}

/// Result of one vertical ground probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundProbe {
    /// Raised end of the probe.
    pub start: Vec3,
    /// Lowered end of the probe.
    pub end: Vec3,
    /// Contact point, or `start` when nothing was hit.
    pub ground: Vec3,
    /// Whether the probe found ground.
    pub hit: bool,
}

/// The two probes from the most recent orientation update, kept for debug
/// drawing.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct SkateboardProbes {
    /// Probe through the nose socket.
    pub forward: Option<GroundProbe>,
    /// Probe through the tail socket.
    pub backward: Option<GroundProbe>,
}

/// Outcome of aligning a board with the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardAlignment {
    /// New world rotation of the board.
    pub rotation: Quat,
    /// Probe through the nose socket.
    pub forward: GroundProbe,
    /// Probe through the tail socket.
    pub backward: GroundProbe,
}

/// Vertical segment from `offset` above `socket` to `offset` below it.
#[must_use]
pub fn probe_segment(socket: Vec3, offset: f32) -> (Vec3, Vec3) {
    (socket + Vec3::Y * offset, socket - Vec3::Y * offset)
}

/// Casts one ground probe through `socket`.
pub fn probe_ground(
    tracer: &impl LineTrace,
    socket: Vec3,
    offset: f32,
    ignore: &TraceIgnore,
) -> GroundProbe {
    let (start, end) = probe_segment(socket, offset);
    match tracer.line_trace(start, end, ignore) {
        Some(hit) => GroundProbe {
            start,
            end,
            ground: hit.point,
            hit: true,
        },
        None => GroundProbe {
            start,
            end,
            ground: start,
            hit: false,
        },
    }
}

/// Aligns a board at `board` with the ground beneath its sockets.
pub fn align_board(
    tracer: &impl LineTrace,
    board: &Transform,
    sockets: &SkateboardSockets,
    offset: f32,
    ignore: &TraceIgnore,
) -> BoardAlignment {
    let nose = sockets.world_position(board, skateboard_forward_socket_name());
    let forward = probe_ground(tracer, nose, offset, ignore);

    let tail = sockets.world_position(board, skateboard_backward_socket_name());
    let backward = probe_ground(tracer, tail, offset, ignore);

    BoardAlignment {
        rotation: look_at_rotation(backward.ground, forward.ground),
        forward,
        backward,
    }
}

/// Re-aligns every ridden board with the ground.
///
/// Probes ignore the rider, which also carries the capsule collider, and the
/// board itself.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn orient_skateboard_system(
    colliders: Query<(Entity, &Collider, &Transform), Without<Skateboard>>,
    riders: Query<(&Transform, &Skater), Without<Skateboard>>,
    mut boards: Query<(
        Entity,
        &mut Skateboard,
        &SkateboardSockets,
        &mut Transform,
        &mut SkateboardProbes,
    )>,
) {
    let scene = collect_scene(&colliders);

    for (entity, mut board, sockets, mut transform, mut probes) in &mut boards {
        let Ok((rider, skater)) = riders.get(board.rider) else {
            continue;
        };

        let pose = board.world_pose(rider);
        let ignore = TraceIgnore::new([board.rider, entity]);
        let alignment = align_board(&scene, &pose, sockets, skater.trace_offset, &ignore);

        board.relative_rotation = rider.rotation.inverse() * alignment.rotation;
        *transform = pose.with_rotation(alignment.rotation);
        *probes = SkateboardProbes {
            forward: Some(alignment.forward),
            backward: Some(alignment.backward),
        };

        log::trace!(
            "board {entity}: nose probe {:?} -> {:?} (hit: {}), tail probe {:?} -> {:?} (hit: {})",
            alignment.forward.start,
            alignment.forward.end,
            alignment.forward.hit,
            alignment.backward.start,
            alignment.backward.end,
            alignment.backward.hit,
        );
    }
}

/// Despawns boards whose rider no longer exists.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn despawn_orphaned_skateboards(
    mut commands: Commands,
    boards: Query<(Entity, &Skateboard)>,
    riders: Query<(), With<Skater>>,
) {
    for (entity, board) in &boards {
        if riders.get(board.rider).is_err() {
            log::debug!("despawning board {entity}: rider {} is gone", board.rider);
            commands.entity(entity).despawn();
        }
    }
}
