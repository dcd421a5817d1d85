//! Kinematic movement for characters.
//!
//! Input handlers only record intent. Once per frame this module turns the
//! accumulated intent into velocity and displacement: acceleration and
//! braking on the ground, reduced control in the air, gravity, jumping and
//! landing. Speed is capped by how hard the stick is pushed, never below the
//! minimum analog walk speed, which is what makes the smoothed skate drive
//! feel weighty at low values.

use bevy::prelude::*;

use crate::character::{JumpRequest, PendingMovement};
use crate::collision::{collect_scene, Collider, LineTrace, TraceIgnore};
use crate::constants::{
    AIR_CONTROL, BRAKING_DECELERATION_FALLING, BRAKING_DECELERATION_WALKING, CAPSULE_HALF_HEIGHT,
    FLOOR_PROBE_SLACK, GRAVITY, JUMP_Z_VELOCITY, MAX_ACCELERATION, MAX_WALK_SPEED,
    MIN_ANALOG_WALK_SPEED, ROTATION_RATE_YAW,
};
use crate::skateboard::SkateboardLink;
use crate::vector_math::{heading_yaw_degrees, turn_towards_degrees};

/// Movement tuning for a character.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CharacterMovement {
    /// Upward speed on takeoff.
    pub jump_z_velocity: f32,
    /// Fraction of ground acceleration available while airborne.
    pub air_control: f32,
    /// Horizontal speed cap at full input.
    pub max_walk_speed: f32,
    /// Lowest speed cap, used for the faintest analog input.
    pub min_analog_walk_speed: f32,
    /// Horizontal acceleration at full input.
    pub max_acceleration: f32,
    /// Braking applied on the ground when there is no input.
    pub braking_deceleration_walking: f32,
    /// Braking applied in the air when there is no input.
    pub braking_deceleration_falling: f32,
    /// Maximum yaw change in degrees per second.
    pub rotation_rate_yaw: f32,
    /// Turn the character to face its horizontal velocity.
    pub orient_rotation_to_movement: bool,
    /// Downward acceleration while airborne.
    pub gravity: f32,
    /// Distance from the character origin down to its feet.
    pub half_height: f32,
}

impl Default for CharacterMovement {
    fn default() -> Self {
        Self {
            jump_z_velocity: JUMP_Z_VELOCITY,
            air_control: AIR_CONTROL,
            max_walk_speed: MAX_WALK_SPEED,
            min_analog_walk_speed: MIN_ANALOG_WALK_SPEED,
            max_acceleration: MAX_ACCELERATION,
            braking_deceleration_walking: BRAKING_DECELERATION_WALKING,
            braking_deceleration_falling: BRAKING_DECELERATION_FALLING,
            rotation_rate_yaw: ROTATION_RATE_YAW,
            orient_rotation_to_movement: true,
            gravity: GRAVITY,
            half_height: CAPSULE_HALF_HEIGHT,
        }
    }
}

/// Velocity and floor contact carried between frames.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementState {
    /// World-space velocity.
    pub velocity: Vec3,
    /// Whether the character stood on the floor at the end of the last step.
    pub grounded: bool,
    /// The current jump press has already been seen. A press counts for
    /// one frame only, so holding jump never re-launches on landing.
    pub jump_latched: bool,
}

/// Everything one movement step needs besides the character itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInput {
    /// World-space movement intent consumed this frame.
    pub intent: Vec3,
    /// Whether the jump action is held. Only the first frame of a press
    /// can launch the character.
    pub jump: bool,
    /// Floor contact below the character, if any.
    pub floor: Option<Vec3>,
    /// Frame duration in seconds.
    pub dt: f32,
}

impl CharacterMovement {
    /// Largest horizontal speed allowed for an input of magnitude `analog`.
    #[must_use]
    pub fn max_speed_for(&self, analog: f32) -> f32 {
        if analog <= 0.0 {
            return self.max_walk_speed;
        }
        (self.max_walk_speed * analog.min(1.0)).max(self.min_analog_walk_speed)
    }

    /// Advances `state` and `transform` by one frame.
    pub fn step(&self, state: &mut MovementState, transform: &mut Transform, input: StepInput) {
        let StepInput {
            intent,
            jump,
            floor,
            dt,
        } = input;
        if dt <= 0.0 {
            return;
        }

        let fresh_jump = jump && !state.jump_latched;
        state.jump_latched = jump;

        let planar = Vec3::new(intent.x, 0.0, intent.z).clamp_length_max(1.0);
        let mut grounded = floor.is_some() && state.velocity.y <= 0.0;
        let horizontal = self.horizontal_velocity(state.velocity, planar, grounded, dt);

        let vertical = if grounded && fresh_jump {
            grounded = false;
            self.jump_z_velocity
        } else if grounded {
            0.0
        } else {
            state.velocity.y - self.gravity * dt
        };

        state.velocity = Vec3::new(horizontal.x, vertical, horizontal.z);
        transform.translation += state.velocity * dt;

        if let Some(floor) = floor {
            let feet = transform.translation.y - self.half_height;
            let landed = !grounded && state.velocity.y <= 0.0 && feet <= floor.y;
            if grounded || landed {
                transform.translation.y = floor.y + self.half_height;
                state.velocity.y = 0.0;
                grounded = true;
            }
        }
        state.grounded = grounded;

        if self.orient_rotation_to_movement {
            self.turn_to_velocity(transform, horizontal, dt);
        }
    }

    fn horizontal_velocity(&self, velocity: Vec3, intent: Vec3, grounded: bool, dt: f32) -> Vec3 {
        let horizontal = Vec3::new(velocity.x, 0.0, velocity.z);
        let analog = intent.length();

        if analog > 0.0 {
            let control = if grounded { 1.0 } else { self.air_control };
            let accelerated = horizontal + intent * self.max_acceleration * control * dt;
            return accelerated.clamp_length_max(self.max_speed_for(analog));
        }

        let braking = if grounded {
            self.braking_deceleration_walking
        } else {
            self.braking_deceleration_falling
        };
        let speed = (horizontal.length() - braking * dt).max(0.0);
        horizontal.normalize_or_zero() * speed
    }

    fn turn_to_velocity(&self, transform: &mut Transform, horizontal: Vec3, dt: f32) {
        let Some(target) = heading_yaw_degrees(horizontal) else {
            return;
        };
        let (yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);
        let turned = turn_towards_degrees(yaw.to_degrees(), target, self.rotation_rate_yaw * dt);
        transform.rotation = Quat::from_rotation_y(turned.to_radians());
    }
}

/// Looks for the floor directly below a character at `origin`.
pub fn find_floor(
    tracer: &impl LineTrace,
    origin: Vec3,
    half_height: f32,
    ignore: &TraceIgnore,
) -> Option<Vec3> {
    let end = origin - Vec3::Y * (half_height + FLOOR_PROBE_SLACK);
    tracer.line_trace(origin, end, ignore).map(|hit| hit.point)
}

/// Consumes pending intent and moves every character one frame.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn character_movement_system(
    time: Res<Time>,
    colliders: Query<(Entity, &Collider, &Transform), Without<CharacterMovement>>,
    mut characters: Query<(
        Entity,
        &CharacterMovement,
        &mut MovementState,
        &mut PendingMovement,
        Option<&JumpRequest>,
        Option<&SkateboardLink>,
        &mut Transform,
    )>,
) {
    let dt = time.delta_secs();
    let scene = collect_scene(&colliders);

    for (entity, movement, mut state, mut pending, jump, board, mut transform) in &mut characters {
        let mut ignore = TraceIgnore::new([entity]);
        if let Some(SkateboardLink(board)) = board {
            ignore = ignore.with(*board);
        }
        let floor = find_floor(&scene, transform.translation, movement.half_height, &ignore);
        let was_grounded = state.grounded;

        movement.step(
            &mut state,
            &mut transform,
            StepInput {
                intent: pending.consume(),
                jump: jump.is_some_and(|j| j.pressed),
                floor,
                dt,
            },
        );

        if was_grounded != state.grounded {
            log::debug!(
                "character {entity} {}",
                if state.grounded { "landed" } else { "left the ground" }
            );
        }
    }
}
