use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("asset manifest is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("sprite `{sprite}` names atlas {atlas}, but only {available} are listed")]
    UnknownAtlas {
        sprite: String,
        atlas: u32,
        available: usize,
    },
}

/// Texture atlases and named cells, as sent by the front-end.
///
/// Atlas ids are positions in `atlases`. Both sections may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub atlases: Vec<AtlasEntry>,
    #[serde(default)]
    pub sprites: HashMap<String, SpriteEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasEntry {
    /// Lookup key, e.g. "tiles" or "font".
    pub name: String,
    pub cols: u32,
    pub rows: u32,
    /// Image path relative to the front-end's asset root.
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteEntry {
    pub atlas: u32,
    pub col: u32,
    pub row: u32,
    /// Cells covered along each axis.
    #[serde(default = "one_cell")]
    pub span: u32,
}

fn one_cell() -> u32 {
    1
}

impl AssetManifest {
    /// Parse `json` and check that every sprite points at a listed atlas.
    /// A manifest without atlases is taken as sprites-only and not checked.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let manifest: Self = serde_json::from_str(json)?;
        if !manifest.atlases.is_empty() {
            manifest.check_atlas_refs()?;
        }
        Ok(manifest)
    }

    fn check_atlas_refs(&self) -> Result<(), ManifestError> {
        let available = self.atlases.len();
        match self.sprites.iter().find(|(_, s)| s.atlas as usize >= available) {
            Some((name, sprite)) => Err(ManifestError::UnknownAtlas {
                sprite: name.clone(),
                atlas: sprite.atlas,
                available,
            }),
            None => Ok(()),
        }
    }

    /// Atlas id of the atlas called `name`.
    pub fn atlas_index(&self, name: &str) -> Option<u32> {
        self.atlases.iter().position(|a| a.name == name).map(|i| i as u32)
    }
}
