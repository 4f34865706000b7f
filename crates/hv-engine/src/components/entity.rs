use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::layer::RenderLayer;
use crate::components::sprite::SpriteComponent;
use crate::core::aabb::Aabb;

/// Fat Entity: one struct with optional components.
/// Tiles, the player and HUD glyphs all live in the same flat scene.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name (tile layer name, "player", "hud").
    pub tag: String,
    /// Hidden entities are not drawn but still take part in overlap queries.
    pub visible: bool,
    /// Center position. World space, or screen space on the UI layer.
    pub pos: Vec2,
    /// Rendered size in world units. Also the extent used by [`Entity::bounds`].
    pub scale: Vec2,
    /// Draw order bucket.
    pub layer: RenderLayer,
    /// Sprite component (entities without sprites are never drawn).
    pub sprite: Option<SpriteComponent>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            visible: true,
            pos: Vec2::ZERO,
            scale: Vec2::ONE,
            layer: RenderLayer::default(),
            sprite: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Axis-aligned box covering the entity's rendered area.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_size(self.pos, self.scale)
    }
}
