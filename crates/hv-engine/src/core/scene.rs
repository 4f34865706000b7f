use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::aabb::Aabb;

/// Every entity of the current screen, in spawn order.
/// Lookups are linear; a level holds a few thousand tiles at most.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(256),
        }
    }

    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Add a batch of entities (a tile layer, a line of text).
    pub fn spawn_all(&mut self, entities: impl IntoIterator<Item = Entity>) {
        self.entities.extend(entities);
    }

    /// Remove and return the entity with `id`.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.swap_remove(idx))
    }

    /// Remove every entity carrying `tag`. Returns how many were removed.
    pub fn despawn_tagged(&mut self, tag: &str) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| e.tag != tag);
        before - self.entities.len()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Iterate over entities with the given tag.
    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities.iter().filter(move |e| e.tag == tag)
    }

    /// Iterate mutably over entities with the given tag.
    pub fn tagged_mut<'a>(&'a mut self, tag: &'a str) -> impl Iterator<Item = &'a mut Entity> + 'a {
        self.entities.iter_mut().filter(move |e| e.tag == tag)
    }

    /// IDs of every `tag` entity whose bounds strictly overlap `bounds`.
    /// Hidden entities still collide; visibility only affects rendering.
    pub fn overlapping(&self, tag: &str, bounds: &Aabb) -> Vec<EntityId> {
        self.tagged(tag)
            .filter(|e| e.bounds().overlaps(bounds))
            .map(|e| e.id)
            .collect()
    }

    /// Number of entities with the given tag.
    pub fn count_tagged(&self, tag: &str) -> usize {
        self.tagged(tag).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
