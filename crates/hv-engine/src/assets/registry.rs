use std::collections::HashMap;

use crate::assets::manifest::{AssetManifest, SpriteEntry};
use crate::components::sprite::{AtlasId, SpriteComponent};

impl From<&SpriteEntry> for SpriteComponent {
    fn from(entry: &SpriteEntry) -> Self {
        Self {
            cell_span: entry.span as f32,
            ..SpriteComponent::cell(AtlasId(entry.atlas), entry.col, entry.row)
        }
    }
}

/// Sprites by manifest name. Games fall back to their own layout for any
/// name missing here.
#[derive(Debug, Clone, Default)]
pub struct SpriteRegistry {
    by_name: HashMap<String, SpriteComponent>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        Self {
            by_name: manifest
                .sprites
                .iter()
                .map(|(name, entry)| (name.clone(), SpriteComponent::from(entry)))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SpriteComponent> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
