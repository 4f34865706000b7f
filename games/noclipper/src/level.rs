//! Tile layers of a level, the hidden underlayer, and how both become
//! scene entities and colliders.

use hv_engine::{AtlasId, EngineContext, LevelError, RenderLayer, Scene, TileMap};

/// Collision group of always-solid geometry.
pub const WALLS: u32 = 0b01;
/// Collision group of the underlayer, solid only while it is visible.
pub const SURFACES: u32 = 0b10;

/// The tile layers a level map may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Platforms,
    Underlayer,
    Spike,
    Gold,
    Key,
    Exit,
}

impl LayerKind {
    pub const ALL: [LayerKind; 6] = [
        LayerKind::Platforms,
        LayerKind::Underlayer,
        LayerKind::Spike,
        LayerKind::Gold,
        LayerKind::Key,
        LayerKind::Exit,
    ];

    /// Layer name in the map file, also used as the entity tag.
    pub fn name(self) -> &'static str {
        match self {
            LayerKind::Platforms => "platforms",
            LayerKind::Underlayer => "underlayer",
            LayerKind::Spike => "spike",
            LayerKind::Gold => "gold",
            LayerKind::Key => "key",
            LayerKind::Exit => "exit",
        }
    }

    /// A map without this layer cannot be played.
    pub fn is_required(self) -> bool {
        matches!(self, LayerKind::Platforms | LayerKind::Exit)
    }

    /// Collision group of this layer's colliders, if it has any.
    pub fn collision_group(self) -> Option<u32> {
        match self {
            LayerKind::Platforms => Some(WALLS),
            LayerKind::Underlayer => Some(SURFACES),
            _ => None,
        }
    }

    pub fn render_layer(self) -> RenderLayer {
        match self {
            LayerKind::Platforms | LayerKind::Underlayer => RenderLayer::Terrain,
            _ => RenderLayer::Objects,
        }
    }
}

/// Whether the underlayer is shown. Hidden at game start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerVisibility {
    #[default]
    Hidden,
    Visible,
}

impl LayerVisibility {
    pub fn toggled(self) -> Self {
        match self {
            LayerVisibility::Hidden => LayerVisibility::Visible,
            LayerVisibility::Visible => LayerVisibility::Hidden,
        }
    }

    pub fn is_visible(self) -> bool {
        self == LayerVisibility::Visible
    }
}

/// Which collision groups stop the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceMode {
    WallsOnly,
    WallsAndSurfaces,
}

impl SurfaceMode {
    pub fn solid_groups(self) -> u32 {
        match self {
            SurfaceMode::WallsOnly => WALLS,
            SurfaceMode::WallsAndSurfaces => WALLS | SURFACES,
        }
    }
}

impl From<LayerVisibility> for SurfaceMode {
    fn from(visibility: LayerVisibility) -> Self {
        match visibility {
            LayerVisibility::Hidden => SurfaceMode::WallsOnly,
            LayerVisibility::Visible => SurfaceMode::WallsAndSurfaces,
        }
    }
}

/// Show or hide every underlayer sprite.
pub fn apply_visibility(scene: &mut Scene, visibility: LayerVisibility) {
    for tile in scene.tagged_mut(LayerKind::Underlayer.name()) {
        tile.visible = visibility.is_visible();
    }
}

/// Flip the underlayer and return the new state.
pub fn toggle(scene: &mut Scene, visibility: &mut LayerVisibility) -> LayerVisibility {
    *visibility = visibility.toggled();
    apply_visibility(scene, *visibility);
    *visibility
}

/// Fail early if `map` lacks a layer no level can do without.
pub fn validate(map: &TileMap, level: u32) -> Result<(), LevelError> {
    for kind in LayerKind::ALL.into_iter().filter(|k| k.is_required()) {
        map.require_layer(kind.name(), level)?;
    }
    Ok(())
}

/// Spawn every tile layer of `map` into the scene and add colliders for the
/// solid ones. Absent layers are treated as empty; run [`validate`] first.
/// Returns the number of tiles spawned.
pub fn spawn(
    map: &TileMap,
    level: u32,
    ctx: &mut EngineContext,
    scaling: f32,
    visibility: LayerVisibility,
) -> usize {
    let half = map.cell_size(scaling) / 2.0;
    let mut spawned = 0;
    for kind in LayerKind::ALL {
        let Some(layer) = map.layer(kind.name()) else {
            log::debug!("world{level}: no {} layer", kind.name());
            continue;
        };
        let tiles = map.build_entities(layer, scaling, AtlasId(0), kind.render_layer(), || ctx.next_id());
        if let Some(group) = kind.collision_group() {
            for tile in &tiles {
                ctx.physics.add_fixed_box(tile.pos, half, group);
            }
        }
        spawned += tiles.len();
        ctx.scene.spawn_all(tiles);
    }

    apply_visibility(&mut ctx.scene, visibility);
    ctx.physics.refresh();
    spawned
}
