use crate::api::types::{EntityId, GameEvent};
use crate::assets::manifest::AssetManifest;
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera2D;
#[cfg(feature = "physics")]
use crate::core::physics::PhysicsWorld;

/// Engine settings a game asks for before it starts.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Seconds per simulation step.
    pub fixed_dt: f32,
    /// Visible width of the game area in world units.
    pub world_width: f32,
    /// Visible height of the game area in world units.
    pub world_height: f32,
    /// Maximum number of render instances (default: 2048).
    pub max_instances: usize,
    /// Maximum number of atlas batches per frame (default: 32).
    pub max_batches: usize,
    /// Game events kept per frame; extras are dropped.
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            max_instances: 2048,
            max_batches: 32,
            max_events: 32,
        }
    }
}

/// What the runner needs from a game.
pub trait Game {
    /// Read once, before `init`.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Build the opening screen.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The game loop tick. Read input, step the world, resolve game rules.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Called when the front-end pushes an asset manifest.
    fn load_manifest(&mut self, _manifest: &AssetManifest) {}
}

/// Engine state a game may read and change while it runs.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: Camera2D,
    pub events: Vec<GameEvent>,
    next_id: u32,
    #[cfg(feature = "physics")]
    pub physics: PhysicsWorld,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    /// Create a context whose camera covers the configured game area.
    pub fn from_config(config: &GameConfig) -> Self {
        #[cfg(feature = "physics")]
        let mut physics = PhysicsWorld::new();
        #[cfg(feature = "physics")]
        physics.set_dt(config.fixed_dt);

        Self {
            scene: Scene::new(),
            camera: Camera2D::new(config.world_width, config.world_height),
            events: Vec::new(),
            next_id: 1,
            #[cfg(feature = "physics")]
            physics,
        }
    }

    /// A fresh id, never handed out before in this context.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the front-end.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Drop every entity and, with physics enabled, every collider.
    /// The physics timestep survives the reset.
    pub fn reset_world(&mut self) {
        self.scene.clear();
        #[cfg(feature = "physics")]
        {
            let dt = self.physics.dt();
            self.physics = PhysicsWorld::new();
            self.physics.set_dt(dt);
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
