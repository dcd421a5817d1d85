//! The skating character: tunables, controller and input handling.
//!
//! A character only reacts to movement and look input while a [`Controller`]
//! is attached to it. Movement input never drives the character directly; it
//! accumulates world-space intent in [`PendingMovement`], which the movement
//! integrator consumes once per frame.

use bevy::prelude::*;

use crate::camera::{CameraBoom, FollowCamera};
use crate::collision::Collider;
use crate::constants::{
    CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS, CONTROLLER_PITCH_LIMIT, FORWARD_ACCELERATION_SMOOTHING,
};
use crate::movement::{CharacterMovement, MovementState};
use crate::settings::SkaterSettings;
use crate::skateboard::{Skateboard, SkateboardLink, SkateboardProbes};
use crate::sockets::SkateboardSockets;
use crate::vector_math::{forward_axis, lerp, right_axis, wrap_degrees};

/// Per-character skating state.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Skater {
    /// Smoothed forward drive, updated on every accepted movement input.
    pub forward_acceleration: f32,
    /// Scale applied to lateral input.
    pub turn_right_velocity: f32,
    /// Half-length of the ground probes cast from the board sockets.
    pub trace_offset: f32,
}

impl Default for Skater {
    fn default() -> Self {
        Self::from_settings(&SkaterSettings::default())
    }
}

/// World-space movement intent produced by one movement input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementIntent {
    /// Intent along the board's forward axis.
    pub forward: Vec3,
    /// Intent along the board's right axis.
    pub lateral: Vec3,
}

/// Moves the forward acceleration a fixed fraction towards `target`.
///
/// # Examples
/// ```
/// use tomhawk::character::smooth_forward_acceleration;
/// assert!((smooth_forward_acceleration(0.0, 1.0) - 0.01).abs() < f32::EPSILON);
/// ```
#[must_use]
pub fn smooth_forward_acceleration(current: f32, target: f32) -> f32 {
    lerp(current, target, FORWARD_ACCELERATION_SMOOTHING)
}

impl Skater {
    /// Builds a skater from loaded settings.
    #[must_use]
    pub const fn from_settings(settings: &SkaterSettings) -> Self {
        Self {
            forward_acceleration: settings.forward_acceleration,
            turn_right_velocity: settings.turn_right_velocity,
            trace_offset: settings.skateboard_trace_offset,
        }
    }

    /// Handles one movement input event.
    ///
    /// Backward input (`axis.y < 0`) is ignored: the board has no reverse.
    /// Without a controller nothing changes either. Otherwise the forward
    /// acceleration is smoothed towards `axis.y` and the returned intent
    /// pushes along the board's forward axis by that acceleration and along
    /// its right axis by `axis.x` scaled by the turn velocity.
    pub fn apply_move(
        &mut self,
        axis: Vec2,
        controller_attached: bool,
        board_rotation: Quat,
    ) -> Option<MovementIntent> {
        if !controller_attached || axis.y.is_nan() || axis.y < 0.0 {
            return None;
        }

        self.forward_acceleration = smooth_forward_acceleration(self.forward_acceleration, axis.y);
        Some(MovementIntent {
            forward: forward_axis(board_rotation) * self.forward_acceleration,
            lateral: right_axis(board_rotation) * (axis.x * self.turn_right_velocity),
        })
    }
}

/// Control rotation of whatever possesses the pawn, in degrees.
///
/// Its presence on a pawn means a controller is attached.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Controller {
    /// Heading around `+Y`, wrapped into `(-180, 180]`.
    pub yaw: f32,
    /// Elevation, limited to the controller's pitch range.
    pub pitch: f32,
}

impl Controller {
    /// Adds a yaw delta. Non-finite deltas are dropped.
    pub fn add_yaw_input(&mut self, delta: f32) {
        if delta.is_finite() {
            self.yaw = wrap_degrees(self.yaw + delta);
        }
    }

    /// Adds a pitch delta, keeping the result inside the pitch limit.
    /// Non-finite deltas are dropped.
    pub fn add_pitch_input(&mut self, delta: f32) {
        if delta.is_finite() {
            self.pitch =
                (self.pitch + delta).clamp(-CONTROLLER_PITCH_LIMIT, CONTROLLER_PITCH_LIMIT);
        }
    }

    /// Control rotation as a quaternion.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            0.0,
        )
    }
}

/// Applies look input to an attached controller. Returns whether anything
/// was applied.
pub fn apply_look(controller: Option<&mut Controller>, axis: Vec2) -> bool {
    let Some(controller) = controller else {
        return false;
    };
    controller.add_yaw_input(axis.x);
    controller.add_pitch_input(axis.y);
    true
}

/// World-space movement intent accumulated since the last movement step.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PendingMovement(Vec3);

impl PendingMovement {
    /// Adds intent along `direction`, which carries its own scale.
    pub fn add(&mut self, direction: Vec3) {
        if direction.is_finite() {
            self.0 += direction;
        }
    }

    /// Accumulated intent without consuming it.
    #[must_use]
    pub const fn peek(&self) -> Vec3 {
        self.0
    }

    /// Returns the accumulated intent and clears it.
    pub fn consume(&mut self) -> Vec3 {
        std::mem::take(&mut self.0)
    }
}

/// Whether the jump action is currently held.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumpRequest {
    /// `true` between jump start and jump completion.
    pub pressed: bool,
}

/// Marker for the pawn driven by the local player.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Player;

/// Offset of the board from the character origin: at the capsule's feet.
#[must_use]
pub const fn board_mount_offset() -> Vec3 {
    Vec3::new(0.0, -CAPSULE_HALF_HEIGHT, 0.0)
}

/// Spawns a skater with its board and follow camera, returning the character.
pub fn spawn_skater(commands: &mut Commands, settings: &SkaterSettings, at: Transform) -> Entity {
    let character = commands
        .spawn((
            Name::new("SkaterCharacter"),
            Skater::from_settings(settings),
            at,
            Collider::Capsule {
                radius: CAPSULE_RADIUS,
                half_height: CAPSULE_HALF_HEIGHT,
            },
            CharacterMovement::default(),
            MovementState::default(),
            PendingMovement::default(),
            JumpRequest::default(),
            CameraBoom::default(),
        ))
        .id();

    let board = commands
        .spawn((
            Name::new("SkateStaticMesh"),
            Skateboard::new(character, board_mount_offset()),
            SkateboardSockets::default(),
            SkateboardProbes::default(),
            Transform::from_translation(at.transform_point(board_mount_offset()))
                .with_rotation(at.rotation),
        ))
        .id();

    commands.spawn((
        Name::new("FollowCamera"),
        FollowCamera { target: character },
        Transform::from_translation(at.translation),
    ));

    commands.entity(character).insert(SkateboardLink(board));
    log::debug!("spawned skater {character} riding board {board}");
    character
}
