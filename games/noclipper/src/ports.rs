//! The narrow slices of the engine that game rules depend on.

use hv_engine::{Aabb, EntityId, LevelError, PhysicsWorld, PlatformerBody, PlatformerPhysics, Scene, TileMap};

use crate::level::{LayerKind, SurfaceMode};

/// Overlap queries against tile layers, plus removal of picked-up tiles.
pub trait CollisionQuery {
    fn overlapping(&self, layer: LayerKind, bounds: &Aabb) -> Vec<EntityId>;
    fn remove(&mut self, id: EntityId);
}

/// Advances the player body by one fixed step against the current solid set.
pub trait PhysicsStep {
    fn step(&self, body: &mut PlatformerBody, mode: SurfaceMode);
}

/// Source of level maps by number.
pub trait TilemapLoad {
    fn load(&self, level: u32) -> Result<TileMap, LevelError>;
}

impl CollisionQuery for Scene {
    fn overlapping(&self, layer: LayerKind, bounds: &Aabb) -> Vec<EntityId> {
        Scene::overlapping(self, layer.name(), bounds)
    }

    fn remove(&mut self, id: EntityId) {
        self.despawn(id);
    }
}

/// [`PhysicsStep`] backed by the engine's rapier world.
pub struct WorldStep<'a> {
    pub world: &'a PhysicsWorld,
    pub physics: PlatformerPhysics,
}

impl PhysicsStep for WorldStep<'_> {
    fn step(&self, body: &mut PlatformerBody, mode: SurfaceMode) {
        self.physics.step(self.world, body, mode.solid_groups());
    }
}

/// Levels compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedLevels;

impl EmbeddedLevels {
    fn source(level: u32) -> Option<&'static str> {
        match level {
            1 => Some(include_str!("../levels/world1.tmj")),
            2 => Some(include_str!("../levels/world2.tmj")),
            3 => Some(include_str!("../levels/world3.tmj")),
            _ => None,
        }
    }
}

impl TilemapLoad for EmbeddedLevels {
    fn load(&self, level: u32) -> Result<TileMap, LevelError> {
        let json = Self::source(level).ok_or(LevelError::UnknownLevel(level))?;
        TileMap::from_json(json)
    }
}
