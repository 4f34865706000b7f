use glam::Vec2;

use crate::core::aabb::Aabb;
use crate::core::physics::PhysicsWorld;

/// Vertical speed below which a blocked move counts as a stop.
const BLOCK_EPSILON: f32 = 1e-3;

/// A side-view body moved by gravity and its own velocity.
/// Velocities are in world units per fixed step, y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformerBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub half_extents: Vec2,
    /// Set by the last [`PlatformerPhysics::step`]: the body is standing on something.
    pub grounded: bool,
}

impl PlatformerBody {
    pub fn new(pos: Vec2, half_extents: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            half_extents,
            grounded: false,
        }
    }

    /// Hit box in world space.
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.half_extents)
    }
}

/// Gravity + kinematic sweep against fixed colliders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformerPhysics {
    /// Subtracted from `vel.y` every step.
    pub gravity: f32,
}

impl PlatformerPhysics {
    pub fn new(gravity: f32) -> Self {
        Self { gravity }
    }

    /// Advance `body` by one fixed step. Only colliders in `solid_groups` block it.
    ///
    /// A body buried in solid geometry, e.g. after a group became solid
    /// around it, is first put on top of it.
    pub fn step(&self, world: &PhysicsWorld, body: &mut PlatformerBody, solid_groups: u32) {
        if let Some(pos) = world.lift_out(body.half_extents, body.pos, solid_groups) {
            log::debug!("body buried at {:?}, lifted to {:?}", body.pos, pos);
            body.pos = pos;
            body.vel.y = body.vel.y.max(0.0);
        }
        body.vel.y -= self.gravity;

        let mv = world.move_character(body.half_extents, body.pos, body.vel, solid_groups);
        body.pos += mv.translation;

        let landed = body.vel.y < 0.0 && mv.translation.y > body.vel.y + BLOCK_EPSILON;
        let bumped = body.vel.y > 0.0 && mv.translation.y < body.vel.y - BLOCK_EPSILON;
        if landed || bumped || (mv.grounded && body.vel.y <= 0.0) {
            body.vel.y = 0.0;
        }
        // Horizontal velocity is intent and survives hitting a wall.
        body.grounded = mv.grounded || landed;
    }

    /// Jumps are only allowed from the ground.
    pub fn can_jump(&self, body: &PlatformerBody) -> bool {
        body.grounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLS: u32 = 1;

    fn floor_world() -> PhysicsWorld {
        let mut world = PhysicsWorld::new();
        world.set_dt(1.0 / 60.0);
        world.add_fixed_box(Vec2::new(0.0, -16.0), Vec2::new(1000.0, 16.0), WALLS);
        world.add_fixed_box(Vec2::new(0.0, 216.0), Vec2::new(1000.0, 16.0), WALLS);
        world.refresh();
        world
    }

    #[test]
    fn falls_and_lands() {
        let world = floor_world();
        let physics = PlatformerPhysics::new(1.0);
        let mut body = PlatformerBody::new(Vec2::new(0.0, 100.0), Vec2::new(14.0, 19.0));
        for _ in 0..60 {
            physics.step(&world, &mut body, WALLS);
        }
        assert!(body.grounded);
        assert_eq!(body.vel.y, 0.0);
        assert!((body.bounds().min().y).abs() < 1.0);
        assert!(physics.can_jump(&body));
    }

    #[test]
    fn airborne_body_cannot_jump() {
        let world = floor_world();
        let physics = PlatformerPhysics::new(1.0);
        let mut body = PlatformerBody::new(Vec2::new(0.0, 100.0), Vec2::new(14.0, 19.0));
        physics.step(&world, &mut body, WALLS);
        assert!(!body.grounded);
        assert!(!physics.can_jump(&body));
        assert_eq!(body.vel.y, -1.0);
    }

    #[test]
    fn ceiling_stops_upward_motion() {
        let world = floor_world();
        let physics = PlatformerPhysics::new(1.0);
        let mut body = PlatformerBody::new(Vec2::new(0.0, 170.0), Vec2::new(14.0, 19.0));
        body.vel.y = 15.0;
        physics.step(&world, &mut body, WALLS);
        assert_eq!(body.vel.y, 0.0);
        assert!(body.bounds().max().y <= 200.0 + 1e-3);
    }

    #[test]
    fn body_inside_a_solid_is_put_on_top_and_can_walk() {
        let world = floor_world();
        let physics = PlatformerPhysics::new(1.0);
        let mut body = PlatformerBody::new(Vec2::new(0.0, 5.0), Vec2::new(14.0, 19.0));
        physics.step(&world, &mut body, WALLS);
        assert!(body.grounded);
        assert!(body.bounds().min().y >= 0.0);

        body.vel.x = 5.0;
        for _ in 0..10 {
            physics.step(&world, &mut body, WALLS);
        }
        assert!((body.pos.x - 50.0).abs() < 0.5, "walked to x={}", body.pos.x);
        assert!(body.grounded);
    }

    #[test]
    fn empty_mask_falls_through_everything() {
        let world = floor_world();
        let physics = PlatformerPhysics::new(1.0);
        let mut body = PlatformerBody::new(Vec2::new(0.0, 100.0), Vec2::new(14.0, 19.0));
        for _ in 0..30 {
            physics.step(&world, &mut body, 0);
        }
        assert!(body.pos.y < 0.0);
        assert!(!body.grounded);
    }
}
