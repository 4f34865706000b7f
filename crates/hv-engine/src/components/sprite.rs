/// Position of a texture atlas in the asset manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AtlasId(pub u32);

/// The atlas cell an entity draws. `col`/`row` count from the atlas's top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteComponent {
    pub atlas: AtlasId,
    pub col: f32,
    pub row: f32,
    /// Cells covered along each axis.
    pub cell_span: f32,
    pub alpha: f32,
}

impl SpriteComponent {
    pub fn cell(atlas: AtlasId, col: u32, row: u32) -> Self {
        Self {
            atlas,
            col: col as f32,
            row: row as f32,
            cell_span: 1.0,
            alpha: 1.0,
        }
    }
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self::cell(AtlasId::default(), 0, 0)
    }
}
