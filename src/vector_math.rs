//! Vector helpers for orienting the board and steering the character.
//!
//! All helpers follow Bevy's frame: `+Y` is up, an object's forward axis is
//! `-Z` and its right axis is `+X`.
use glam::{EulerRot, Quat, Vec3};

/// Squared length under which a direction is treated as degenerate.
const DEGENERATE_LENGTH_SQUARED: f32 = 1e-8;

/// Returns the rotation that points an object's forward axis from `from`
/// towards `to`, with no roll.
///
/// Coincident points have no direction, so the identity rotation is
/// returned for them.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use tomhawk::vector_math::{forward_axis, look_at_rotation};
///
/// let rotation = look_at_rotation(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));
/// assert!(forward_axis(rotation).abs_diff_eq(Vec3::X, 1e-6));
/// ```
#[must_use]
pub fn look_at_rotation(from: Vec3, to: Vec3) -> Quat {
    let direction = to - from;
    if !direction.is_finite() || direction.length_squared() < DEGENERATE_LENGTH_SQUARED {
        return Quat::IDENTITY;
    }

    let yaw = (-direction.x).atan2(-direction.z);
    let horizontal = Vec3::new(direction.x, 0.0, direction.z).length();
    let pitch = direction.y.atan2(horizontal);
    Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0)
}

/// World-space forward axis of `rotation`.
#[must_use]
pub fn forward_axis(rotation: Quat) -> Vec3 {
    rotation * Vec3::NEG_Z
}

/// World-space right axis of `rotation`.
#[must_use]
pub fn right_axis(rotation: Quat) -> Vec3 {
    rotation * Vec3::X
}

/// Moves `current` towards `target` by `alpha` of the remaining distance.
#[must_use]
pub fn lerp(current: f32, target: f32, alpha: f32) -> f32 {
    current + alpha * (target - current)
}

/// Wraps an angle in degrees into the half-open range `(-180, 180]`.
#[must_use]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Rotates `current` towards `target` (both degrees) by at most `max_delta`,
/// taking the short way round.
#[must_use]
pub fn turn_towards_degrees(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = wrap_degrees(target - current);
    if delta.abs() <= max_delta {
        return wrap_degrees(target);
    }
    wrap_degrees(current + max_delta.copysign(delta))
}

/// Yaw in degrees of a horizontal heading, measured from `-Z` towards `-X`.
///
/// Returns `None` for vectors without a horizontal component.
#[must_use]
pub fn heading_yaw_degrees(direction: Vec3) -> Option<f32> {
    let horizontal = Vec3::new(direction.x, 0.0, direction.z);
    if horizontal.length_squared() < DEGENERATE_LENGTH_SQUARED {
        return None;
    }
    Some((-horizontal.x).atan2(-horizontal.z).to_degrees())
}
