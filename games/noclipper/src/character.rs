//! The player character: its body, which way it faces, and which sprite it shows.

use glam::Vec2;
use hv_engine::{AtlasId, FrameCycle, PlatformerBody, SpriteComponent, SpriteRegistry};

/// Frames in the walk cycle.
pub const WALK_FRAMES: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    fn index(self) -> usize {
        match self {
            Facing::Right => 0,
            Facing::Left => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Idle,
    /// Walk frame in `0..WALK_FRAMES`.
    Walk(u32),
    Jump,
    Fall,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: PlatformerBody,
    pub facing: Facing,
    pub pose: Pose,
    walk: FrameCycle,
}

impl Player {
    pub fn new(spawn: Vec2, half_extents: Vec2, updates_per_frame: u32) -> Self {
        Self {
            body: PlatformerBody::new(spawn, half_extents),
            facing: Facing::Right,
            pose: Pose::Idle,
            walk: FrameCycle::new(WALK_FRAMES, updates_per_frame),
        }
    }

    /// Pick facing and pose from the current velocity. Call once per step,
    /// after physics. Vertical motion wins over walking; a stopped character
    /// keeps the direction it last moved in.
    pub fn update_animation(&mut self) -> Pose {
        let Vec2 { x: dx, y: dy } = self.body.vel;

        if dx < 0.0 {
            self.facing = Facing::Left;
        } else if dx > 0.0 {
            self.facing = Facing::Right;
        }

        self.pose = if dy > 0.0 {
            Pose::Jump
        } else if dy < 0.0 {
            Pose::Fall
        } else if dx == 0.0 {
            Pose::Idle
        } else {
            Pose::Walk(self.walk.advance())
        };
        self.pose
    }

    /// Raw walk counter, in steps.
    pub fn walk_counter(&self) -> u32 {
        self.walk.counter()
    }
}

/// Atlas cells for every pose in both facings.
///
/// The default layout is one atlas with right-facing cells on row 0 and
/// left-facing cells on row 1, columns: idle, walk 0..8, jump, fall.
#[derive(Debug, Clone)]
pub struct CharacterAtlas {
    idle: [SpriteComponent; 2],
    walk: Vec<[SpriteComponent; 2]>,
    jump: [SpriteComponent; 2],
    fall: [SpriteComponent; 2],
}

impl CharacterAtlas {
    pub fn new(atlas: AtlasId) -> Self {
        let pair = |col: u32| [SpriteComponent::cell(atlas, col, 0), SpriteComponent::cell(atlas, col, 1)];
        Self {
            idle: pair(0),
            walk: (0..WALK_FRAMES).map(|i| pair(1 + i)).collect(),
            jump: pair(1 + WALK_FRAMES),
            fall: pair(2 + WALK_FRAMES),
        }
    }

    /// Override cells with any `player_*` sprites the registry names.
    /// Left-facing cells use a `_left` suffix.
    pub fn with_registry(mut self, registry: &SpriteRegistry) -> Self {
        fn apply(pair: &mut [SpriteComponent; 2], registry: &SpriteRegistry, name: &str) {
            if let Some(sprite) = registry.get(name) {
                pair[0] = sprite.clone();
            }
            if let Some(sprite) = registry.get(&format!("{name}_left")) {
                pair[1] = sprite.clone();
            }
        }

        apply(&mut self.idle, registry, "player_idle");
        for (i, pair) in self.walk.iter_mut().enumerate() {
            apply(pair, registry, &format!("player_walk{i}"));
        }
        apply(&mut self.jump, registry, "player_jump");
        apply(&mut self.fall, registry, "player_fall");
        self
    }

    pub fn sprite(&self, pose: Pose, facing: Facing) -> &SpriteComponent {
        let pair = match pose {
            Pose::Idle => &self.idle,
            Pose::Walk(frame) => &self.walk[(frame as usize).min(self.walk.len() - 1)],
            Pose::Jump => &self.jump,
            Pose::Fall => &self.fall,
        };
        &pair[facing.index()]
    }
}
