use crate::components::entity::Entity;
use crate::components::sprite::SpriteComponent;
use crate::renderer::camera::Camera2D;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from a set of entities.
///
/// Hidden and sprite-less entities are skipped. World-space entities outside
/// the camera are culled. UI-layer entities are placed in screen space and
/// shifted by the camera origin so the front-end can draw every instance with
/// the same view. Output is ordered by layer, then atlas; equal keys keep
/// scene order.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    camera: &Camera2D,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();

    let origin = camera.screen_origin();
    let mut drawn: Vec<(&Entity, &SpriteComponent)> = entities
        .filter(|e| e.visible)
        .filter_map(|e| e.sprite.as_ref().map(|s| (e, s)))
        .filter(|(e, _)| e.layer.is_screen_space() || camera.is_rect_visible(e.pos, e.scale / 2.0))
        .collect();

    drawn.sort_by_key(|(e, s)| (e.layer, s.atlas));

    for (entity, sprite) in drawn {
        let pos = if entity.layer.is_screen_space() {
            entity.pos + origin
        } else {
            entity.pos
        };
        let instance = RenderInstance {
            x: pos.x,
            y: pos.y,
            rotation: 0.0,
            scale: entity.scale.x.max(entity.scale.y),
            sprite_col: sprite.col,
            alpha: sprite.alpha,
            cell_span: sprite.cell_span,
            atlas_row: sprite.row,
        };
        buffer.push(entity.layer, sprite.atlas, instance);
    }
}
