use glam::Vec2;
use rapier2d::control::{CharacterLength, KinematicCharacterController};
use rapier2d::na;
use rapier2d::prelude::*;

// ---------------------------------------------------------------------------
// glam <-> nalgebra
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> na::Vector2<f32> {
    na::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &na::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn groups_from_bits(bits: u32) -> Group {
    Group::from_bits_truncate(bits)
}

/// Gap the character controller keeps between the character and obstacles.
const CHARACTER_SKIN: f32 = 0.1;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Result of sweeping a character shape through the level geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterMove {
    /// Translation actually applied after collisions.
    pub translation: Vec2,
    /// Whether the shape ended up resting on something below it.
    pub grounded: bool,
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps the Rapier2D boilerplate for a level made of fixed boxes and a
/// kinematic character.
///
/// Level geometry is inserted as parentless fixed colliders tagged with
/// collision-group bits. The character is never inserted: it is swept through
/// the world with [`KinematicCharacterController`], and the caller picks which
/// groups count as solid on every move.
pub struct PhysicsWorld {
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    controller: KinematicCharacterController,
    dirty: bool,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        let controller = KinematicCharacterController {
            offset: CharacterLength::Absolute(CHARACTER_SKIN),
            autostep: None,
            snap_to_ground: None,
            ..KinematicCharacterController::default()
        };

        Self {
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            controller,
            dirty: false,
        }
    }

    /// Seconds per step; rapier uses it for its integration parameters.
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    pub fn dt(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Insert a fixed axis-aligned box belonging to the collision groups in `groups`.
    pub fn add_fixed_box(&mut self, center: Vec2, half_extents: Vec2, groups: u32) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            .translation(vec2_to_na(center))
            .collision_groups(InteractionGroups::new(groups_from_bits(groups), Group::ALL))
            .build();
        self.dirty = true;
        self.colliders.insert(collider)
    }

    /// Number of colliders in the world.
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Rebuild broad phase and scene-query structures after colliders changed.
    /// Cheap no-op when nothing was added since the last refresh.
    pub fn refresh(&mut self) {
        if !self.dirty {
            return;
        }
        self.physics_pipeline.step(
            &vector![0.0, 0.0],
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
        self.dirty = false;
    }

    /// Sweep a box-shaped character from `position` by `desired`.
    ///
    /// Only colliders whose group bits intersect `solid_groups` block the
    /// move. Call [`PhysicsWorld::refresh`] after adding colliders, otherwise
    /// the new geometry is invisible to this query.
    pub fn move_character(
        &self,
        half_extents: Vec2,
        position: Vec2,
        desired: Vec2,
        solid_groups: u32,
    ) -> CharacterMove {
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y);
        let pose = na::Isometry2::new(vec2_to_na(position), 0.0);
        let filter = QueryFilter::new()
            .groups(InteractionGroups::new(Group::ALL, groups_from_bits(solid_groups)));

        let movement = self.controller.move_shape(
            self.integration_parameters.dt,
            &self.bodies,
            &self.colliders,
            &self.query_pipeline,
            &*shape,
            &pose,
            vec2_to_na(desired),
            filter,
            |_| {},
        );

        CharacterMove {
            translation: na_to_vec2(&movement.translation),
            grounded: movement.grounded,
        }
    }

    /// Where a box at `position` must go to stand on whatever it is buried in.
    ///
    /// Considers colliders in `solid_groups` that overlap the box by more than
    /// the controller's skin on both axes, and returns a position resting on
    /// the highest top among them. `None` when the box is free. The sweep in
    /// [`PhysicsWorld::move_character`] cannot leave a collider it starts in.
    pub fn lift_out(&self, half_extents: Vec2, position: Vec2, solid_groups: u32) -> Option<Vec2> {
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y);
        let pose = na::Isometry2::new(vec2_to_na(position), 0.0);
        let filter = QueryFilter::new()
            .groups(InteractionGroups::new(Group::ALL, groups_from_bits(solid_groups)));
        let (min, max) = (position - half_extents, position + half_extents);

        let mut top: Option<f32> = None;
        self.query_pipeline.intersections_with_shape(
            &self.bodies,
            &self.colliders,
            &pose,
            &*shape,
            filter,
            |handle| {
                if let Some(collider) = self.colliders.get(handle) {
                    let aabb = collider.compute_aabb();
                    let overlap_x = max.x.min(aabb.maxs.x) - min.x.max(aabb.mins.x);
                    let overlap_y = max.y.min(aabb.maxs.y) - min.y.max(aabb.mins.y);
                    if overlap_x > CHARACTER_SKIN && overlap_y > CHARACTER_SKIN {
                        top = Some(top.map_or(aabb.maxs.y, |t| t.max(aabb.maxs.y)));
                    }
                }
                true
            },
        );

        top.map(|top| Vec2::new(position.x, top + half_extents.y + CHARACTER_SKIN))
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
