//! Text drawn one glyph entity at a time from a bitmap font atlas.
//!
//! Glyphs go on the UI layer, so positions are screen coordinates with the
//! origin at the bottom-left. The atlas holds printable ASCII in code order,
//! left to right and top to bottom.

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::layer::RenderLayer;
use crate::components::sprite::{AtlasId, SpriteComponent};
use glam::Vec2;

#[derive(Debug, Clone)]
pub struct FontConfig {
    pub atlas: AtlasId,
    /// Glyph grid of the atlas.
    pub cols: u32,
    pub rows: u32,
    /// Character in the top-left cell.
    pub start_char: u8,
    /// Advance per glyph, as a fraction of the glyph size.
    pub spacing: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            atlas: AtlasId(1),
            cols: 16,
            rows: 6,
            start_char: b' ',
            spacing: 0.55,
        }
    }
}

impl FontConfig {
    pub fn new(atlas: AtlasId) -> Self {
        Self {
            atlas,
            ..Default::default()
        }
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Advance of `text` at glyph size `size`.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * self.spacing
    }
}

/// Atlas cell of `c`, or `None` when the font has no glyph for it.
pub fn char_to_grid(c: char, font: &FontConfig) -> Option<(u32, u32)> {
    let index = (c as u32).checked_sub(font.start_char as u32)?;
    (index < font.cols * font.rows).then(|| (index % font.cols, index / font.cols))
}

/// One entity per glyph of `text`, all tagged `tag`.
///
/// `pos` is the bottom-left corner of the first glyph. Characters the font
/// lacks leave a gap.
pub fn build_text_entities<F>(
    text: &str,
    pos: Vec2,
    size: f32,
    font: &FontConfig,
    tag: &str,
    id_gen: &mut F,
) -> Vec<Entity>
where
    F: FnMut() -> EntityId,
{
    let mut entities = Vec::new();
    let mut cursor_x = pos.x;

    for c in text.chars() {
        if let Some((col, row)) = char_to_grid(c, font) {
            entities.push(
                Entity::new(id_gen())
                    .with_tag(tag)
                    .with_pos(Vec2::new(cursor_x + size / 2.0, pos.y + size / 2.0))
                    .with_scale(Vec2::splat(size))
                    .with_layer(RenderLayer::UI)
                    .with_sprite(SpriteComponent::cell(font.atlas, col, row)),
            );
        }
        cursor_x += size * font.spacing;
    }

    entities
}

/// Like [`build_text_entities`], but horizontally centered on `center_x`.
pub fn build_centered_text<F>(
    text: &str,
    center_x: f32,
    y: f32,
    size: f32,
    font: &FontConfig,
    tag: &str,
    id_gen: &mut F,
) -> Vec<Entity>
where
    F: FnMut() -> EntityId,
{
    let x = center_x - font.text_width(text, size) / 2.0;
    build_text_entities(text, Vec2::new(x, y), size, font, tag, id_gen)
}
