//! Collision scene answering segment line-traces.
//!
//! Ground probes, the floor check and the camera boom all ask the same
//! question: "what is the first thing between these two points?". Colliders
//! live on entities as [`Collider`] components; each frame a system snapshots
//! them into a [`CollisionScene`] and queries it through [`LineTrace`].
//!
//! Box colliders are axis-aligned and ignore the entity's rotation. Planes
//! rotate their normal with the entity so ramps can be authored with an
//! ordinary `Transform`. Capsules are always upright.

use bevy::prelude::*;

/// Smallest segment length a trace will consider.
const MIN_TRACE_LENGTH: f32 = 1e-4;
/// Denominator threshold below which a ray is treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Collision shape carried by an entity, positioned by its `Transform`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    /// Axis-aligned box centred on the entity.
    Cuboid {
        /// Half the box size along each axis.
        half_extents: Vec3,
    },
    /// Infinite plane through the entity origin.
    Plane {
        /// Plane normal in the entity's local frame.
        normal: Vec3,
    },
    /// Sphere centred on the entity.
    Sphere {
        /// Sphere radius.
        radius: f32,
    },
    /// Upright capsule centred on the entity.
    Capsule {
        /// Radius of the capsule.
        radius: f32,
        /// Half the total height, caps included.
        half_height: f32,
    },
}

/// First blocking contact found along a trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceHit {
    /// World-space contact point.
    pub point: Vec3,
    /// Surface normal at the contact, facing the trace origin.
    pub normal: Vec3,
    /// Distance from the trace start to the contact.
    pub distance: f32,
    /// Entity owning the collider that was hit.
    pub entity: Entity,
}

/// Entities a trace should pass straight through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceIgnore {
    entities: Vec<Entity>,
}

impl TraceIgnore {
    /// Builds an ignore list from the given entities.
    pub fn new(entities: impl IntoIterator<Item = Entity>) -> Self {
        Self {
            entities: entities.into_iter().collect(),
        }
    }

    /// Adds an entity to the list.
    #[must_use]
    pub fn with(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    /// Returns `true` when traces should skip `entity`.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }
}

/// Capability to cast a line segment against world collision.
#[cfg_attr(test, mockall::automock)]
pub trait LineTrace {
    /// Returns the nearest blocking hit on the segment `start..=end`.
    fn line_trace(&self, start: Vec3, end: Vec3, ignore: &TraceIgnore) -> Option<TraceHit>;
}

/// Snapshot of every collider in the world for one frame.
#[derive(Debug, Clone, Default)]
pub struct CollisionScene {
    colliders: Vec<(Entity, Collider, Transform)>,
}

impl CollisionScene {
    /// Creates an empty scene.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            colliders: Vec::new(),
        }
    }

    /// Adds a collider owned by `entity`.
    pub fn insert(&mut self, entity: Entity, collider: Collider, transform: Transform) {
        self.colliders.push((entity, collider, transform));
    }

    /// Number of colliders in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Returns `true` when the scene holds no colliders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl<'a> FromIterator<(Entity, &'a Collider, &'a Transform)> for CollisionScene {
    fn from_iter<I: IntoIterator<Item = (Entity, &'a Collider, &'a Transform)>>(iter: I) -> Self {
        Self {
            colliders: iter
                .into_iter()
                .map(|(entity, collider, transform)| (entity, *collider, *transform))
                .collect(),
        }
    }
}

impl LineTrace for CollisionScene {
    fn line_trace(&self, start: Vec3, end: Vec3, ignore: &TraceIgnore) -> Option<TraceHit> {
        let segment = end - start;
        let length = segment.length();
        if !length.is_finite() || length < MIN_TRACE_LENGTH {
            return None;
        }
        let direction = segment / length;

        self.colliders
            .iter()
            .filter(|(entity, _, _)| !ignore.contains(*entity))
            .filter_map(|(entity, collider, transform)| {
                collider
                    .ray_hit(transform, start, direction, length)
                    .map(|(distance, normal)| TraceHit {
                        point: start + direction * distance,
                        normal,
                        distance,
                        entity: *entity,
                    })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

impl Collider {
    /// Distance along a unit ray to the first contact within `max_distance`,
    /// together with the contact normal.
    fn ray_hit(
        &self,
        transform: &Transform,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<(f32, Vec3)> {
        let centre = transform.translation;
        let hit = match *self {
            Self::Cuboid { half_extents } => ray_cuboid(
                origin,
                direction,
                centre - half_extents,
                centre + half_extents,
            ),
            Self::Plane { normal } => {
                ray_plane(origin, direction, centre, transform.rotation * normal)
            }
            Self::Sphere { radius } => ray_sphere(origin, direction, centre, radius),
            Self::Capsule {
                radius,
                half_height,
            } => ray_capsule(origin, direction, centre, radius, half_height),
        };
        hit.filter(|(distance, _)| *distance <= max_distance)
    }
}

/// Slab test against an axis-aligned box. Rays starting inside report a hit
/// at distance zero.
fn ray_cuboid(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<(f32, Vec3)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut entry_normal = -direction;

    let slabs = origin
        .to_array()
        .into_iter()
        .zip(direction.to_array())
        .zip(min.to_array().into_iter().zip(max.to_array()));
    for (axis, ((o, d), (lo, hi))) in slabs.enumerate() {
        if d.abs() < PARALLEL_EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let t1 = (lo - o) / d;
        let t2 = (hi - o) / d;
        let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        if near > t_enter {
            t_enter = near;
            entry_normal = axis_normal(axis, -d.signum());
        }
        t_exit = t_exit.min(far);
        if t_enter > t_exit {
            return None;
        }
    }

    if t_exit < 0.0 {
        return None;
    }
    if t_enter < 0.0 {
        return Some((0.0, -direction));
    }
    Some((t_enter, entry_normal))
}

const fn axis_normal(axis: usize, sign: f32) -> Vec3 {
    match axis {
        0 => Vec3::new(sign, 0.0, 0.0),
        1 => Vec3::new(0.0, sign, 0.0),
        _ => Vec3::new(0.0, 0.0, sign),
    }
}

fn ray_plane(origin: Vec3, direction: Vec3, point: Vec3, normal: Vec3) -> Option<(f32, Vec3)> {
    let unit = normal.try_normalize()?;
    let denom = unit.dot(direction);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = unit.dot(point - origin) / denom;
    if t < 0.0 {
        return None;
    }
    let facing = if denom < 0.0 { unit } else { -unit };
    Some((t, facing))
}

fn ray_sphere(origin: Vec3, direction: Vec3, centre: Vec3, radius: f32) -> Option<(f32, Vec3)> {
    let offset = origin - centre;
    let c = offset.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some((0.0, -direction));
    }
    let b = offset.dot(direction);
    let discriminant = b * b - c;
    if b > 0.0 || discriminant < 0.0 {
        return None;
    }
    let t = -b - discriminant.sqrt();
    let normal = (origin + direction * t - centre).normalize_or_zero();
    Some((t, normal))
}

fn ray_capsule(
    origin: Vec3,
    direction: Vec3,
    centre: Vec3,
    radius: f32,
    half_height: f32,
) -> Option<(f32, Vec3)> {
    let cylinder_half = (half_height - radius).max(0.0);
    let bottom = centre - Vec3::Y * cylinder_half;
    let top = centre + Vec3::Y * cylinder_half;

    let mut best = [bottom, top]
        .into_iter()
        .filter_map(|cap| ray_sphere(origin, direction, cap, radius))
        .min_by(|a, b| a.0.total_cmp(&b.0));

    // Side wall of the upright cylinder between the caps.
    let offset = origin - centre;
    let a = direction.x * direction.x + direction.z * direction.z;
    if a > PARALLEL_EPSILON {
        let b = offset.x * direction.x + offset.z * direction.z;
        let c = offset.x * offset.x + offset.z * offset.z - radius * radius;
        let discriminant = b * b - a * c;
        if discriminant >= 0.0 {
            let t = ((-b - discriminant.sqrt()) / a).max(0.0);
            let y = offset.y + direction.y * t;
            if y.abs() <= cylinder_half && (c > 0.0 || t == 0.0) {
                let point = offset + direction * t;
                let normal = Vec3::new(point.x, 0.0, point.z).normalize_or_zero();
                let side = if c <= 0.0 { (0.0, -direction) } else { (t, normal) };
                if best.is_none_or(|(current, _)| side.0 < current) {
                    best = Some(side);
                }
            }
        }
    }
    best
}

/// Snapshots every collider into a scene, skipping entities matched by the
/// query filter `F`.
pub fn collect_scene<F: bevy::ecs::query::QueryFilter>(
    colliders: &Query<(Entity, &Collider, &Transform), F>,
) -> CollisionScene {
    colliders.iter().collect()
}
