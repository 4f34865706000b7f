pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent};
pub use components::animation::FrameCycle;
pub use components::entity::Entity;
pub use components::layer::RenderLayer;
pub use components::sprite::{SpriteComponent, AtlasId};
pub use components::tilemap::{LevelError, TileLayer, TileMap, TileCell, Tileset};
pub use core::aabb::Aabb;
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use renderer::instance::{AtlasBatch, RenderInstance, RenderBuffer};
pub use renderer::camera::Camera2D;
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::{AssetManifest, ManifestError};
pub use assets::registry::SpriteRegistry;
pub use bridge::protocol::ProtocolLayout;
pub use systems::text::FontConfig;

#[cfg(feature = "physics")]
pub use core::physics::{CharacterMove, PhysicsWorld};
#[cfg(feature = "physics")]
pub use core::platformer::{PlatformerBody, PlatformerPhysics};
