//! On-screen text and pictures: the counters during play, the instruction
//! screen, and the end art. Everything here lives on the UI layer.

use glam::Vec2;
use hv_engine::systems::text::{build_centered_text, build_text_entities};
use hv_engine::{AtlasId, EngineContext, Entity, FontConfig, RenderLayer, SpriteComponent};

use crate::session::SessionState;

pub const HUD_TAG: &str = "hud";
pub const SCREEN_TAG: &str = "screen";

const HUD_FONT_SIZE: f32 = 50.0;
const TITLE_FONT_SIZE: f32 = 50.0;
const HELP_FONT_SIZE: f32 = 10.0;
const PROMPT_FONT_SIZE: f32 = 20.0;

/// The end picture is cut into this many cells in its atlas.
const END_ART_COLS: u32 = 16;
const END_ART_ROWS: u32 = 9;

/// The three counter lines and where they sit, in screen coordinates.
pub fn hud_lines(session: &SessionState) -> Vec<(String, Vec2)> {
    let key_line = if session.has_key() {
        (format!("Key: {}", session.key), Vec2::new(50.0, 550.0))
    } else {
        ("You need a key to open the door".to_string(), Vec2::new(50.0, 500.0))
    };
    vec![
        (format!("Loot: {}", session.loot), Vec2::new(50.0, 650.0)),
        (format!("Deaths: {}", session.deaths), Vec2::new(50.0, 600.0)),
        key_line,
    ]
}

/// Replace the counter text with the current values.
pub fn refresh(ctx: &mut EngineContext, session: &SessionState, font: &FontConfig) {
    ctx.scene.despawn_tagged(HUD_TAG);
    let mut id_gen = || ctx.next_id();
    let mut glyphs = Vec::new();
    for (text, pos) in hud_lines(session) {
        glyphs.extend(build_text_entities(&text, pos, HUD_FONT_SIZE, font, HUD_TAG, &mut id_gen));
    }
    ctx.scene.spawn_all(glyphs);
}

/// Title, help and prompt, centered on a window of `size`.
pub fn show_instructions(ctx: &mut EngineContext, font: &FontConfig, size: Vec2) {
    let center = size / 2.0;
    let lines = [
        ("Hypervision . Noclipper", center.y, TITLE_FONT_SIZE),
        ("WASD to move, Q to quit, E to see, X to retry", center.y - 25.0, HELP_FONT_SIZE),
        ("the coins you picked up will be your score.", center.y - 40.0, HELP_FONT_SIZE),
        ("Click to continue", center.y - 75.0, PROMPT_FONT_SIZE),
    ];

    let mut id_gen = || ctx.next_id();
    let mut glyphs = Vec::new();
    for (text, y, font_size) in lines {
        glyphs.extend(build_centered_text(text, center.x, y, font_size, font, SCREEN_TAG, &mut id_gen));
    }
    ctx.scene.spawn_all(glyphs);
}

/// Fill the window with the end picture from `atlas`.
pub fn show_end_art(ctx: &mut EngineContext, atlas: AtlasId, size: Vec2) {
    let cell = Vec2::new(size.x / END_ART_COLS as f32, size.y / END_ART_ROWS as f32);
    let mut cells = Vec::with_capacity((END_ART_COLS * END_ART_ROWS) as usize);
    for row in 0..END_ART_ROWS {
        for col in 0..END_ART_COLS {
            // Atlas row 0 is the top of the picture.
            let pos = Vec2::new(
                (col as f32 + 0.5) * cell.x,
                (END_ART_ROWS as f32 - row as f32 - 0.5) * cell.y,
            );
            cells.push(
                Entity::new(ctx.next_id())
                    .with_tag(SCREEN_TAG)
                    .with_pos(pos)
                    .with_scale(cell)
                    .with_layer(RenderLayer::UI)
                    .with_sprite(SpriteComponent::cell(atlas, col, row)),
            );
        }
    }
    ctx.scene.spawn_all(cells);
}
