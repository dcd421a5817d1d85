//! Third-person camera rig.
//!
//! The boom hangs off the character and follows the controller's control
//! rotation. When something sits between the character and the camera the
//! boom shortens so the camera stays in front of it.

use bevy::prelude::*;

use crate::character::Controller;
use crate::collision::{collect_scene, Collider, LineTrace, TraceIgnore};
use crate::constants::CAMERA_BOOM_LENGTH;
use crate::skateboard::SkateboardLink;
use crate::vector_math::forward_axis;

/// Spring-arm style boom positioning the follow camera behind a character.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CameraBoom {
    /// Arm length when nothing is in the way.
    pub target_arm_length: f32,
    /// Rotate the arm with the controller's control rotation.
    pub use_pawn_control_rotation: bool,
}

impl Default for CameraBoom {
    fn default() -> Self {
        Self {
            target_arm_length: CAMERA_BOOM_LENGTH,
            use_pawn_control_rotation: true,
        }
    }
}

/// Camera following the boom of `target`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowCamera {
    /// Character whose boom this camera sits on.
    pub target: Entity,
}

/// Where the camera ends up for a boom rooted at `pivot`.
pub fn boom_camera_position(
    tracer: &impl LineTrace,
    pivot: Vec3,
    arm_rotation: Quat,
    arm_length: f32,
    ignore: &TraceIgnore,
) -> Vec3 {
    let desired = pivot - forward_axis(arm_rotation) * arm_length;
    tracer
        .line_trace(pivot, desired, ignore)
        .map_or(desired, |hit| hit.point)
}

/// Places every follow camera at the end of its target's boom, looking at
/// the target.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn camera_boom_system(
    colliders: Query<(Entity, &Collider, &Transform), Without<FollowCamera>>,
    targets: Query<
        (&Transform, &CameraBoom, Option<&Controller>, Option<&SkateboardLink>),
        Without<FollowCamera>,
    >,
    mut cameras: Query<(&FollowCamera, &mut Transform)>,
) {
    let scene = collect_scene(&colliders);

    for (follow, mut camera) in &mut cameras {
        let Ok((pivot, boom, controller, board)) = targets.get(follow.target) else {
            continue;
        };

        let arm_rotation = match controller {
            Some(controller) if boom.use_pawn_control_rotation => controller.rotation(),
            _ => pivot.rotation,
        };
        let mut ignore = TraceIgnore::new([follow.target]);
        if let Some(SkateboardLink(board)) = board {
            ignore = ignore.with(*board);
        }

        let position = boom_camera_position(
            &scene,
            pivot.translation,
            arm_rotation,
            boom.target_arm_length,
            &ignore,
        );
        *camera = Transform::from_translation(position).with_rotation(arm_rotation);
    }
}
