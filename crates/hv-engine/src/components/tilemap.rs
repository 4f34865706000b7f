//! Tiled JSON maps turned into grids of tile layers.
//!
//! Only the parts of the `.tmj` format a side-view level needs are read: map
//! size, tile size, tilesets (`firstgid`/`columns`) and tile layers stored as
//! plain arrays. Tiled counts rows from the top; world positions produced
//! here are y-up with the map's bottom-left corner at the origin.

use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::layer::RenderLayer;
use crate::components::sprite::{AtlasId, SpriteComponent};

/// Upper three bits of a gid carry Tiled's flip flags.
const GID_MASK: u32 = 0x1FFF_FFFF;
/// Columns assumed for a tileset that does not declare them.
const DEFAULT_TILESET_COLUMNS: u32 = 8;

/// Failures while loading level data.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level data is not valid Tiled JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level {level} has no `{layer}` tile layer")]
    MissingLayer { level: u32, layer: String },
    #[error("layer `{layer}` holds {actual} cells, expected {expected}")]
    LayerSize {
        layer: String,
        expected: usize,
        actual: usize,
    },
    #[error("no data for level {0}")]
    UnknownLevel(u32),
}

// -- Raw Tiled format --

#[derive(Deserialize)]
struct RawMap {
    width: u32,
    height: u32,
    tilewidth: u32,
    tileheight: u32,
    #[serde(default)]
    layers: Vec<RawLayer>,
    #[serde(default)]
    tilesets: Vec<RawTileset>,
}

#[derive(Deserialize)]
struct RawLayer {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    data: Vec<u32>,
}

#[derive(Deserialize)]
struct RawTileset {
    firstgid: u32,
    #[serde(default)]
    columns: u32,
}

// -- Public types --

/// A tileset reference: gids from `first_gid` onward map into its atlas grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tileset {
    pub first_gid: u32,
    pub columns: u32,
}

/// Where a gid lives: which tileset, and which cell of that tileset's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCell {
    pub tileset: u32,
    pub col: u32,
    pub row: u32,
}

/// One named grid of gids. Row 0 is the top row, as in Tiled.
///
/// Tiles are stored in row-major order: index = y * width + x
#[derive(Debug, Clone)]
pub struct TileLayer {
    pub name: String,
    pub width: u32,
    pub height: u32,
    gids: Vec<u32>,
}

impl TileLayer {
    /// Iterate over non-empty cells as `(x, y, gid)`.
    pub fn tiles(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        let width = self.width.max(1);
        self.gids.iter().enumerate().filter_map(move |(i, raw)| {
            let gid = raw & GID_MASK;
            (gid != 0).then(|| (i as u32 % width, i as u32 / width, gid))
        })
    }

    /// Count of non-empty tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }
}

/// A parsed Tiled map.
#[derive(Debug, Clone)]
pub struct TileMap {
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    /// Tile size in map pixels, before scaling.
    pub tile_width: u32,
    pub tile_height: u32,
    pub tilesets: Vec<Tileset>,
    layers: Vec<TileLayer>,
}

impl TileMap {
    /// Parse a `.tmj` document. Non-tile layers (object groups, images) are skipped.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let raw: RawMap = serde_json::from_str(json)?;

        let mut layers = Vec::new();
        for layer in raw.layers.into_iter().filter(|l| l.kind == "tilelayer") {
            let width = if layer.width == 0 { raw.width } else { layer.width };
            let height = if layer.height == 0 { raw.height } else { layer.height };
            let expected = (width as usize).checked_mul(height as usize);
            if expected != Some(layer.data.len()) {
                return Err(LevelError::LayerSize {
                    layer: layer.name,
                    expected: expected.unwrap_or(usize::MAX),
                    actual: layer.data.len(),
                });
            }
            layers.push(TileLayer {
                name: layer.name,
                width,
                height,
                gids: layer.data,
            });
        }

        let mut tilesets: Vec<Tileset> = raw
            .tilesets
            .into_iter()
            .map(|t| Tileset {
                first_gid: t.firstgid.max(1),
                columns: if t.columns == 0 { DEFAULT_TILESET_COLUMNS } else { t.columns },
            })
            .collect();
        tilesets.sort_by_key(|t| t.first_gid);
        log::debug!(
            "parsed {}x{} map: {} tile layers, {} tilesets",
            raw.width,
            raw.height,
            layers.len(),
            tilesets.len()
        );

        Ok(Self {
            width: raw.width,
            height: raw.height,
            tile_width: raw.tilewidth,
            tile_height: raw.tileheight,
            tilesets,
            layers,
        })
    }

    /// Look up a tile layer by name.
    pub fn layer(&self, name: &str) -> Option<&TileLayer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Like [`TileMap::layer`], but a missing layer is an error for `level`.
    pub fn require_layer(&self, name: &str, level: u32) -> Result<&TileLayer, LevelError> {
        self.layer(name).ok_or_else(|| LevelError::MissingLayer {
            level,
            layer: name.to_string(),
        })
    }

    /// Size of one cell in world units.
    pub fn cell_size(&self, scaling: f32) -> Vec2 {
        Vec2::new(self.tile_width as f32, self.tile_height as f32) * scaling
    }

    /// Center of cell (x, y) in y-up world space.
    pub fn tile_to_world(&self, x: u32, y: u32, scaling: f32) -> Vec2 {
        let cell = self.cell_size(scaling);
        Vec2::new(
            (x as f32 + 0.5) * cell.x,
            (self.height as f32 - y as f32 - 0.5) * cell.y,
        )
    }

    /// Resolve a gid to its tileset cell. Maps without tilesets treat gid 1 as cell 0.
    pub fn atlas_cell(&self, gid: u32) -> Option<TileCell> {
        let gid = gid & GID_MASK;
        if gid == 0 {
            return None;
        }
        let (index, tileset) = self
            .tilesets
            .iter()
            .enumerate()
            .rev()
            .find(|(_, t)| t.first_gid <= gid)
            .map(|(i, t)| (i as u32, *t))
            .unwrap_or((
                0,
                Tileset {
                    first_gid: 1,
                    columns: DEFAULT_TILESET_COLUMNS,
                },
            ));
        let local = gid - tileset.first_gid;
        Some(TileCell {
            tileset: index,
            col: local % tileset.columns,
            row: local / tileset.columns,
        })
    }

    /// One entity per non-empty cell of `layer`, tagged with the layer's name.
    /// Tileset `n` draws from atlas `atlas_base + n`.
    pub fn build_entities(
        &self,
        layer: &TileLayer,
        scaling: f32,
        atlas_base: AtlasId,
        render_layer: RenderLayer,
        mut next_id: impl FnMut() -> EntityId,
    ) -> Vec<Entity> {
        let cell = self.cell_size(scaling);
        layer
            .tiles()
            .filter_map(|(x, y, gid)| {
                let tile = self.atlas_cell(gid)?;
                let sprite =
                    SpriteComponent::cell(AtlasId(atlas_base.0 + tile.tileset), tile.col, tile.row);
                Some(
                    Entity::new(next_id())
                        .with_tag(layer.name.as_str())
                        .with_pos(self.tile_to_world(x, y, scaling))
                        .with_scale(cell)
                        .with_layer(render_layer)
                        .with_sprite(sprite),
                )
            })
            .collect()
    }
}
