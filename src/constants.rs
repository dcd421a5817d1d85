//! Tuning constants shared across the character, board and movement systems.
//!
//! Distances are in world units (centimetre scale), angles in degrees unless
//! the name says otherwise.

/// Default forward acceleration scalar a freshly spawned skater starts with.
pub const DEFAULT_FORWARD_ACCELERATION: f32 = 0.01;
/// Default scale applied to the lateral input when turning.
pub const DEFAULT_TURN_RIGHT_VELOCITY: f32 = 0.01;
/// Fraction of the remaining distance the forward acceleration closes per
/// movement input event.
pub const FORWARD_ACCELERATION_SMOOTHING: f32 = 0.01;
/// Vertical distance above and below a board socket covered by a ground probe.
pub const SKATEBOARD_TRACE_OFFSET: f32 = 30.0;

/// Radius of the character's collision capsule.
pub const CAPSULE_RADIUS: f32 = 42.0;
/// Half the height of the character's collision capsule, caps included.
pub const CAPSULE_HALF_HEIGHT: f32 = 96.0;

/// Upward speed given to the character on takeoff.
pub const JUMP_Z_VELOCITY: f32 = 700.0;
/// Fraction of ground acceleration available while airborne.
pub const AIR_CONTROL: f32 = 0.35;
/// Top horizontal speed at full input.
pub const MAX_WALK_SPEED: f32 = 500.0;
/// Speed cap applied to the smallest analog input.
pub const MIN_ANALOG_WALK_SPEED: f32 = 20.0;
/// Horizontal acceleration at full input, per second.
pub const MAX_ACCELERATION: f32 = 2048.0;
/// Deceleration on the ground with no input, per second.
pub const BRAKING_DECELERATION_WALKING: f32 = 2000.0;
/// Horizontal deceleration in the air with no input, per second.
pub const BRAKING_DECELERATION_FALLING: f32 = 1500.0;
/// Yaw rotation rate in degrees per second used when orienting to movement.
pub const ROTATION_RATE_YAW: f32 = 500.0;
/// Downward gravity acceleration magnitude.
pub const GRAVITY: f32 = 980.0;
/// Extra distance below the capsule probed when looking for the floor.
pub const FLOOR_PROBE_SLACK: f32 = 2.0;

/// Distance the follow camera trails behind the character.
pub const CAMERA_BOOM_LENGTH: f32 = 400.0;
/// Pitch limit the controller applies to its control rotation.
pub const CONTROLLER_PITCH_LIMIT: f32 = 89.0;

/// Asset path of the character class spawned for the player by default.
pub const DEFAULT_PAWN_CLASS_PATH: &str = "/Game/ThirdPerson/Blueprints/BP_ThirdPersonCharacter";
