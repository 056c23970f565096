//! # Drop Physics
//!
//! Single-body kinematics for the falling-object demo: semi-implicit Euler
//! integration, a fall-speed clamp, and ground-plane collision with a
//! restitution bounce.
//!
//! The stepper is a pure in-memory state transition: it runs once per frame
//! on the caller's thread, does O(1) work, and has no fallible operations.
//! Inputs are assumed finite with `delta_time >= 0`; NaN or infinite values
//! propagate into the motion undetected and are the caller's responsibility
//! to avoid.

use cgmath::Vector3;

/// Time damping applied to every step. Slow-motion presentation choice,
/// not a physically derived constant.
pub const SLOW_MOTION_FACTOR: f32 = 0.5;

/// Magnitude cap for downward Y velocity. X/Z and upward motion are
/// unbounded.
pub const MAX_FALL_SPEED: f32 = 5.0;

/// Below this post-bounce speed the body is considered at rest, which stops
/// infinite micro-bouncing.
pub const REST_VELOCITY_THRESHOLD: f32 = 0.1;

/// Kinematic state of a single point mass.
///
/// `acceleration` is constant gravity; there is no force accumulator.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsProperties {
    pub position: Vector3<f32>,
    pub velocity: Vector3<f32>,
    pub acceleration: Vector3<f32>,
    pub mass: f32,
    /// Fraction of vertical speed preserved (and inverted) by a bounce,
    /// in [0, 1].
    pub restitution: f32,
    /// Static bodies are skipped by [`step`] entirely.
    pub is_static: bool,
}

impl Default for PhysicsProperties {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            velocity: Vector3::new(0.0, 0.0, 0.0),
            // Reduced gravity for a readable drop; tune as needed.
            acceleration: Vector3::new(0.0, -2.5, 0.0),
            mass: 1.0,
            restitution: 0.8,
            is_static: false,
        }
    }
}

/// A dynamic body with an axis-aligned bounding box derived from its
/// position and scale.
///
/// `position` is the render-synced copy of `physics.position`; callers must
/// invoke [`PhysicsObject::update_bounds`] after mutating the kinematic
/// position so the box is never stale. [`step`] does this itself.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsObject {
    pub position: Vector3<f32>,
    pub scale: Vector3<f32>,
    pub min_bounds: Vector3<f32>,
    pub max_bounds: Vector3<f32>,
    pub physics: PhysicsProperties,
}

impl PhysicsObject {
    /// Creates a dynamic body centered at `position` with the given box
    /// extents.
    pub fn new(position: Vector3<f32>, scale: Vector3<f32>) -> Self {
        let physics = PhysicsProperties {
            position,
            ..PhysicsProperties::default()
        };
        Self {
            position,
            scale,
            min_bounds: position - scale * 0.5,
            max_bounds: position + scale * 0.5,
            physics,
        }
    }

    /// Recomputes the bounding box from the kinematic position.
    ///
    /// Invariant: `min_bounds = position - scale / 2` and
    /// `max_bounds = position + scale / 2` after every call.
    pub fn update_bounds(&mut self) {
        self.position = self.physics.position;
        self.min_bounds = self.position - self.scale * 0.5;
        self.max_bounds = self.position + self.scale * 0.5;
    }
}

/// Static collision plane at `position.y`.
///
/// The horizontal extent in `scale` is visual only: collision treats the
/// ground as an infinite half-space below `position.y`, regardless of where
/// the body is in X/Z.
#[derive(Debug, Clone, Copy)]
pub struct Ground {
    pub position: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Ground {
    pub fn new(position: Vector3<f32>, scale: Vector3<f32>) -> Self {
        Self { position, scale }
    }
}

impl Default for Ground {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, -2.0, 0.0),
            scale: Vector3::new(20.0, 1.0, 20.0),
        }
    }
}

/// Advances the body by one frame.
///
/// Velocity is integrated before position (semi-implicit Euler), the fall
/// speed is clamped, and ground penetration is resolved with a restitution
/// bounce. Call once per frame with `delta_time` in seconds.
pub fn step(body: &mut PhysicsObject, delta_time: f32, ground: &Ground) {
    if body.physics.is_static {
        return;
    }

    let dt = delta_time * SLOW_MOTION_FACTOR;

    body.physics.velocity += body.physics.acceleration * dt;
    if body.physics.velocity.y < -MAX_FALL_SPEED {
        body.physics.velocity.y = -MAX_FALL_SPEED;
    }

    body.physics.position += body.physics.velocity * dt;
    body.update_bounds();

    if touches_ground(body, ground) {
        resolve_ground_collision(body, ground);
    }
}

fn touches_ground(body: &PhysicsObject, ground: &Ground) -> bool {
    body.min_bounds.y <= ground.position.y
}

/// Pushes the body out of the ground and reflects its vertical velocity.
///
/// After resolution the bottom of the bounding box sits exactly on the
/// plane. A post-bounce speed below [`REST_VELOCITY_THRESHOLD`] snaps to
/// zero.
fn resolve_ground_collision(body: &mut PhysicsObject, ground: &Ground) {
    let penetration = ground.position.y - body.min_bounds.y;
    body.physics.position.y += penetration;

    body.physics.velocity.y = -body.physics.velocity.y * body.physics.restitution;
    if body.physics.velocity.y.abs() < REST_VELOCITY_THRESHOLD {
        body.physics.velocity.y = 0.0;
    }

    body.update_bounds();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drop_body(height: f32) -> PhysicsObject {
        PhysicsObject::new(
            Vector3::new(0.0, height, 0.0),
            Vector3::new(0.5, 0.5, 0.5),
        )
    }

    fn far_ground() -> Ground {
        Ground::new(
            Vector3::new(0.0, -1000.0, 0.0),
            Vector3::new(20.0, 1.0, 20.0),
        )
    }

    #[test]
    fn free_fall_integrates_velocity_before_position() {
        let mut body = drop_body(10.0);
        let ground = far_ground();

        // One step at dt = 1.0 is internally damped to 0.5:
        // v = -2.5 * 0.5 = -1.25, y = 10 + (-1.25 * 0.5) = 9.375.
        step(&mut body, 1.0, &ground);

        assert_eq!(body.physics.velocity.y, -1.25);
        assert_eq!(body.physics.position.y, 9.375);
        assert_eq!(body.position.y, 9.375);
    }

    #[test]
    fn bounds_follow_the_kinematic_position() {
        let mut body = drop_body(10.0);
        let ground = far_ground();

        step(&mut body, 1.0, &ground);

        assert_eq!(body.min_bounds.y, body.position.y - 0.25);
        assert_eq!(body.max_bounds.y, body.position.y + 0.25);
        assert_eq!(body.min_bounds.x, body.position.x - 0.25);
    }

    #[test]
    fn fall_speed_never_exceeds_the_clamp() {
        let mut body = drop_body(1.0e6);
        let ground = far_ground();

        for _ in 0..500 {
            step(&mut body, 0.7, &ground);
            assert!(body.physics.velocity.y >= -MAX_FALL_SPEED);
        }
        // After this many steps the clamp is active and exact.
        assert_eq!(body.physics.velocity.y, -MAX_FALL_SPEED);
    }

    #[test]
    fn horizontal_velocity_is_not_clamped() {
        let mut body = drop_body(1.0e6);
        body.physics.velocity.x = 100.0;
        let ground = far_ground();

        for _ in 0..100 {
            step(&mut body, 0.7, &ground);
        }
        assert_eq!(body.physics.velocity.x, 100.0);
    }

    #[test]
    fn ground_bounce_reflects_and_damps_vertical_velocity() {
        let ground = Ground::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(20.0, 1.0, 20.0));
        let mut body = drop_body(0.125);
        body.physics.velocity.y = -4.0;
        body.update_bounds();
        assert!(body.min_bounds.y <= ground.position.y);

        resolve_ground_collision(&mut body, &ground);

        assert_eq!(body.physics.velocity.y, -(-4.0) * 0.8);
        assert_eq!(body.min_bounds.y, ground.position.y);
    }

    #[test]
    fn slow_impacts_snap_to_rest() {
        let ground = Ground::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(20.0, 1.0, 20.0));
        let mut body = drop_body(0.125);
        body.physics.velocity.y = -0.05;
        body.update_bounds();

        resolve_ground_collision(&mut body, &ground);

        assert_eq!(body.physics.velocity.y, 0.0);
        assert_eq!(body.min_bounds.y, ground.position.y);
    }

    #[test]
    fn step_resolves_penetration_through_the_plane() {
        let ground = Ground::default();
        // Start just above the plane so one step carries the box through it.
        let mut body = drop_body(ground.position.y + 0.25 + 0.001);
        body.physics.velocity.y = -2.0;

        step(&mut body, 0.1, &ground);

        // The intermediate positions are not binary-exact, so allow for
        // a rounding ulp on the resolved contact.
        assert!((body.min_bounds.y - ground.position.y).abs() < 1e-5);
        assert!(body.physics.velocity.y >= 0.0);
    }

    #[test]
    fn static_bodies_are_left_untouched() {
        let mut body = drop_body(10.0);
        body.physics.is_static = true;
        body.physics.velocity = Vector3::new(1.0, -3.0, 2.0);
        let before = body;

        step(&mut body, 123.0, &far_ground());

        assert_eq!(body.physics.position, before.physics.position);
        assert_eq!(body.physics.velocity, before.physics.velocity);
        assert_eq!(body.min_bounds, before.min_bounds);
    }

    #[test]
    fn collision_ignores_horizontal_extent() {
        // The plane is infinite in X/Z: a body far outside the ground's
        // visual footprint still collides.
        let ground = Ground::default();
        let mut body = PhysicsObject::new(
            Vector3::new(500.0, ground.position.y + 0.2, -500.0),
            Vector3::new(0.5, 0.5, 0.5),
        );
        body.physics.velocity.y = -1.0;

        step(&mut body, 1.0, &ground);

        assert!((body.min_bounds.y - ground.position.y).abs() < 1e-5);
    }
}
