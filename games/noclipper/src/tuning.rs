use glam::Vec2;
use serde::Deserialize;

/// Gameplay constants, loaded from `assets/tuning.json`.
/// Speeds are world units per fixed step; y is up.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub window_width: f32,
    pub window_height: f32,
    /// Map pixels → world units for tiles.
    pub tile_scaling: f32,
    /// Texture pixels → world units for the character.
    pub character_scaling: f32,
    /// Character texture size before scaling.
    pub character_width: f32,
    pub character_height: f32,
    pub movement_speed: f32,
    pub jump_speed: f32,
    pub gravity: f32,
    /// Fixed steps each walk frame stays on screen.
    pub updates_per_frame: u32,
    pub first_level: u32,
    /// First level number that is not a map: reaching it shows the end screen.
    pub end_level: u32,
    /// Walking out of the last map replays it instead of ending the game.
    pub hold_final_level: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            window_width: 1280.0,
            window_height: 720.0,
            tile_scaling: 1.5,
            character_scaling: 0.3,
            character_width: 96.0,
            character_height: 128.0,
            movement_speed: 5.0,
            jump_speed: 15.0,
            gravity: 1.0,
            updates_per_frame: 5,
            first_level: 1,
            end_level: 4,
            hold_final_level: true,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse `json`, falling back to defaults when it is malformed.
    pub fn load_or_default(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| {
            log::warn!("tuning: {e}; using defaults");
            Self::default()
        })
    }

    /// The tuning shipped with the game.
    pub fn embedded() -> Self {
        Self::load_or_default(include_str!("../assets/tuning.json"))
    }

    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(self.window_width / 7.0, self.window_height / 3.0)
    }

    /// Half extents of the character's hit box.
    pub fn character_half_extents(&self) -> Vec2 {
        Vec2::new(self.character_width, self.character_height) * self.character_scaling / 2.0
    }

    pub fn window_size(&self) -> Vec2 {
        Vec2::new(self.window_width, self.window_height)
    }
}
