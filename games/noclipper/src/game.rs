use glam::Vec2;
use hv_engine::api::game::GameConfig;
use hv_engine::{
    AssetManifest, AtlasId, EngineContext, Entity, EntityId, FontConfig, Game, GameEvent,
    InputEvent, InputQueue, LevelError, PlatformerPhysics, RenderLayer, SpriteRegistry,
};

use crate::character::{CharacterAtlas, Player};
use crate::controls::{self, Action};
use crate::hud;
use crate::level::{self, LayerVisibility, SurfaceMode};
use crate::ports::{EmbeddedLevels, PhysicsStep, TilemapLoad, WorldStep};
use crate::resolver::{self, ExitRules};
use crate::screen::Screen;
use crate::session::{ReloadPolicy, SessionState};
use crate::tuning::Tuning;

/// Game event kinds sent to the front-end.
pub const EVENT_HUD: f32 = 1.0;
pub const EVENT_LEVEL: f32 = 2.0;
pub const EVENT_SCREEN: f32 = 3.0;
pub const EVENT_QUIT: f32 = 4.0;

/// Atlas slots the front-end's manifest is expected to provide.
pub const TILES_ATLAS: AtlasId = AtlasId(0);
pub const PLAYER_ATLAS: AtlasId = AtlasId(1);
pub const FONT_ATLAS: AtlasId = AtlasId(2);
pub const END_ATLAS: AtlasId = AtlasId(3);

const PLAYER_TAG: &str = "player";

/// Counter snapshot for the front-end: loot, deaths, key.
pub fn hud_event(session: &SessionState) -> GameEvent {
    GameEvent::new(EVENT_HUD, session.loot as f32, session.deaths as f32, session.key as f32)
}

/// Result of a successful [`Noclipper::setup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    Loaded,
    /// The level was past the last map; the end screen is showing.
    Ended,
}

/// Hypervision . Noclipper: collect loot, grab the key, reach the door.
/// Press E to reveal the underlayer and make it solid.
pub struct Noclipper<L: TilemapLoad = EmbeddedLevels> {
    tuning: Tuning,
    levels: L,
    screen: Screen,
    session: SessionState,
    visibility: LayerVisibility,
    player: Option<Player>,
    player_entity: Option<EntityId>,
    character: CharacterAtlas,
    font: FontConfig,
    physics: PlatformerPhysics,
}

impl Noclipper {
    pub fn new() -> Self {
        Self::with_levels(EmbeddedLevels, Tuning::embedded())
    }
}

impl Default for Noclipper {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: TilemapLoad> Noclipper<L> {
    pub fn with_levels(levels: L, tuning: Tuning) -> Self {
        Self {
            session: SessionState::new(tuning.first_level),
            physics: PlatformerPhysics::new(tuning.gravity),
            tuning,
            levels,
            screen: Screen::Instruction,
            visibility: LayerVisibility::Hidden,
            player: None,
            player_entity: None,
            character: CharacterAtlas::new(PLAYER_ATLAS),
            font: FontConfig::new(FONT_ATLAS),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn visibility(&self) -> LayerVisibility {
        self.visibility
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    /// Discard the current level and load `level`, applying `policy` to the
    /// counters. A level at or past the end shows the end screen instead.
    pub fn setup(
        &mut self,
        ctx: &mut EngineContext,
        level: u32,
        policy: ReloadPolicy,
    ) -> Result<SetupOutcome, LevelError> {
        if level >= self.tuning.end_level {
            self.show_end(ctx);
            return Ok(SetupOutcome::Ended);
        }

        let map = self.levels.load(level)?;
        level::validate(&map, level)?;

        ctx.reset_world();
        self.player = None;
        self.player_entity = None;
        let tiles = level::spawn(&map, level, ctx, self.tuning.tile_scaling, self.visibility);

        let player = Player::new(
            self.tuning.spawn_point(),
            self.tuning.character_half_extents(),
            self.tuning.updates_per_frame,
        );
        let id = ctx.next_id();
        let size = self.tuning.character_half_extents() * 2.0;
        ctx.scene.spawn(
            Entity::new(id)
                .with_tag(PLAYER_TAG)
                .with_pos(player.body.pos)
                .with_scale(Vec2::splat(size.x.max(size.y)))
                .with_layer(RenderLayer::Foreground)
                .with_sprite(self.character.sprite(player.pose, player.facing).clone()),
        );
        ctx.camera.look_at(player.body.pos);
        self.player = Some(player);
        self.player_entity = Some(id);

        self.session.level = level;
        self.session.apply(policy);
        hud::refresh(ctx, &self.session, &self.font);
        ctx.emit_event(hud_event(&self.session));
        ctx.emit_event(GameEvent::new(EVENT_LEVEL, level as f32, 0.0, 0.0));

        log::info!(
            "world{level} loaded: {tiles} tiles, loot {} deaths {} key {}",
            self.session.loot,
            self.session.deaths,
            self.session.key
        );
        Ok(SetupOutcome::Loaded)
    }

    /// [`Noclipper::setup`], treating a load failure as fatal.
    fn load(&mut self, ctx: &mut EngineContext, level: u32, policy: ReloadPolicy) {
        if let Err(e) = self.setup(ctx, level, policy) {
            log::error!("cannot load world{level}: {e}");
            self.close(ctx);
        }
    }

    fn enter(&mut self, ctx: &mut EngineContext, screen: Screen) {
        log::info!("screen: {:?} -> {:?}", self.screen, screen);
        self.screen = screen;
        ctx.emit_event(GameEvent::new(EVENT_SCREEN, screen.id() as f32, 0.0, 0.0));
    }

    fn show_instructions(&mut self, ctx: &mut EngineContext) {
        ctx.reset_world();
        ctx.camera.look_at(self.tuning.window_size() / 2.0);
        hud::show_instructions(ctx, &self.font, self.tuning.window_size());
    }

    fn show_end(&mut self, ctx: &mut EngineContext) {
        ctx.reset_world();
        self.player = None;
        self.player_entity = None;
        ctx.camera.look_at(self.tuning.window_size() / 2.0);
        hud::show_end_art(ctx, END_ATLAS, self.tuning.window_size());
        if let Some(next) = self.screen.on_level_complete() {
            self.enter(ctx, next);
        }
    }

    fn close(&mut self, ctx: &mut EngineContext) {
        if self.screen != Screen::Closed {
            self.enter(ctx, Screen::Closed);
        }
        self.player = None;
        ctx.emit_event(GameEvent::new(EVENT_QUIT, 0.0, 0.0, 0.0));
    }

    fn on_pointer_down(&mut self, ctx: &mut EngineContext) {
        match self.screen.on_click() {
            Some(Screen::Game) => {
                self.session = SessionState::new(self.tuning.first_level);
                self.enter(ctx, Screen::Game);
                self.load(ctx, self.tuning.first_level, ReloadPolicy::NEW_GAME);
            }
            Some(Screen::Closed) => self.close(ctx),
            _ => {}
        }
    }

    fn on_action(&mut self, ctx: &mut EngineContext, action: Action) {
        if self.screen != Screen::Game {
            return;
        }
        match action {
            Action::Quit => {
                if self.screen.on_quit() == Some(Screen::Closed) {
                    self.close(ctx);
                }
            }
            Action::Retry => self.load(ctx, self.session.level, ReloadPolicy::CONTINUE),
            Action::ToggleLayer => {
                let now = level::toggle(&mut ctx.scene, &mut self.visibility);
                log::debug!("underlayer {:?}", now);
            }
            Action::Jump => {
                if let Some(player) = self.player.as_mut() {
                    if self.physics.can_jump(&player.body) {
                        player.body.vel.y = self.tuning.jump_speed;
                    }
                }
            }
            Action::MoveLeft => self.set_walk(-self.tuning.movement_speed),
            Action::MoveRight => self.set_walk(self.tuning.movement_speed),
        }
    }

    fn set_walk(&mut self, speed: f32) {
        if let Some(player) = self.player.as_mut() {
            player.body.vel.x = speed;
        }
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { .. } => self.on_pointer_down(ctx),
            InputEvent::KeyDown { key_code } => {
                if let Some(action) = controls::action_for_key(key_code) {
                    self.on_action(ctx, action);
                }
            }
            InputEvent::KeyUp { key_code } => {
                if self.screen == Screen::Game && controls::stops_horizontal(key_code) {
                    self.set_walk(0.0);
                }
            }
        }
    }

    /// One gameplay step: physics, rules, animation, camera.
    fn step(&mut self, ctx: &mut EngineContext) {
        let Some(player) = self.player.as_mut() else {
            return;
        };

        let mode = SurfaceMode::from(self.visibility);
        WorldStep {
            world: &ctx.physics,
            physics: self.physics,
        }
        .step(&mut player.body, mode);

        let rules = ExitRules {
            end_level: self.tuning.end_level,
            hold_final_level: self.tuning.hold_final_level,
        };
        let bounds = player.body.bounds();
        let outcome = resolver::resolve(&mut ctx.scene, &bounds, &mut self.session, rules);

        if let Some(reload) = outcome.reload {
            if outcome.died {
                log::info!("died on world{} ({} deaths)", reload.level, self.session.deaths);
            }
            self.load(ctx, reload.level, reload.policy);
            return;
        }
        if outcome.counters_changed() {
            hud::refresh(ctx, &self.session, &self.font);
            ctx.emit_event(hud_event(&self.session));
        }

        player.update_animation();
        ctx.camera.look_at(player.body.pos);

        if let Some(entity) = self.player_entity.and_then(|id| ctx.scene.get_mut(id)) {
            entity.pos = player.body.pos;
            entity.sprite = Some(self.character.sprite(player.pose, player.facing).clone());
        }
    }
}

impl<L: TilemapLoad> Game for Noclipper<L> {
    fn config(&self) -> GameConfig {
        GameConfig {
            world_width: self.tuning.window_width,
            world_height: self.tuning.window_height,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.show_instructions(ctx);
        ctx.emit_event(GameEvent::new(EVENT_SCREEN, self.screen.id() as f32, 0.0, 0.0));
        log::info!("noclipper ready: {} maps", self.tuning.end_level - self.tuning.first_level);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        if !self.screen.accepts_input() {
            return;
        }
        for event in input.iter() {
            self.handle_input(ctx, event);
            if !self.screen.accepts_input() {
                return;
            }
        }
        if self.screen == Screen::Game {
            self.step(ctx);
        }
    }

    fn load_manifest(&mut self, manifest: &AssetManifest) {
        let registry = SpriteRegistry::from_manifest(manifest);
        self.character = CharacterAtlas::new(PLAYER_ATLAS).with_registry(&registry);
        if let Some(index) = manifest.atlas_index("font") {
            self.font = FontConfig::new(AtlasId(index));
        }
        log::info!(
            "manifest: {} atlases, {} named sprites",
            manifest.atlases.len(),
            registry.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use hv_engine::TileMap;

    use super::*;
    use crate::controls::{KEY_D, KEY_E, KEY_Q, KEY_W, KEY_X};
    use crate::level::LayerKind;

    const W: u32 = 8;
    const H: u32 = 6;
    /// The cell the player spawns in at 1.5 tile scaling.
    const AT_SPAWN: (u32, u32) = (3, 1);

    /// An 8x6 map with a solid floor plus the given cells.
    fn map_json(cells: &[(LayerKind, (u32, u32))]) -> String {
        let layers: Vec<_> = LayerKind::ALL
            .iter()
            .map(|&kind| {
                let mut data = vec![0u32; (W * H) as usize];
                if kind == LayerKind::Platforms {
                    for x in 0..W {
                        data[((H - 1) * W + x) as usize] = 1;
                    }
                }
                for &(k, (x, y)) in cells {
                    if k == kind {
                        data[(y * W + x) as usize] = 1;
                    }
                }
                serde_json::json!({ "name": kind.name(), "type": "tilelayer", "data": data })
            })
            .collect();
        serde_json::json!({
            "width": W, "height": H, "tilewidth": 32, "tileheight": 32,
            "tilesets": [{ "firstgid": 1, "columns": 8 }],
            "layers": layers,
        })
        .to_string()
    }

    struct FakeLevels(HashMap<u32, String>);

    impl FakeLevels {
        fn all(cells: &[(LayerKind, (u32, u32))]) -> Self {
            Self((1..=3).map(|level| (level, map_json(cells))).collect())
        }
    }

    impl TilemapLoad for FakeLevels {
        fn load(&self, level: u32) -> Result<TileMap, LevelError> {
            let json = self.0.get(&level).ok_or(LevelError::UnknownLevel(level))?;
            TileMap::from_json(json)
        }
    }

    fn game_with(levels: FakeLevels, tuning: Tuning) -> (Noclipper<FakeLevels>, EngineContext) {
        let mut game = Noclipper::with_levels(levels, tuning);
        let mut ctx = EngineContext::from_config(&game.config());
        game.init(&mut ctx);
        (game, ctx)
    }

    /// Mid-game on `level` holding `key`, with the event list cleared.
    fn playing(levels: FakeLevels, tuning: Tuning, level: u32, key: u32) -> (Noclipper<FakeLevels>, EngineContext) {
        let (mut game, mut ctx) = game_with(levels, tuning);
        game.screen = Screen::Game;
        game.setup(&mut ctx, level, ReloadPolicy::NEW_GAME).unwrap();
        game.session.key = key;
        ctx.clear_frame_data();
        (game, ctx)
    }

    fn send(game: &mut Noclipper<FakeLevels>, ctx: &mut EngineContext, event: InputEvent) {
        let input: InputQueue = [event].into_iter().collect();
        game.update(ctx, &input);
    }

    fn tick(game: &mut Noclipper<FakeLevels>, ctx: &mut EngineContext) {
        game.update(ctx, &InputQueue::new());
    }

    fn click() -> InputEvent {
        InputEvent::PointerDown { x: 640.0, y: 360.0 }
    }

    fn events_of(ctx: &EngineContext, kind: f32) -> Vec<GameEvent> {
        ctx.events.iter().copied().filter(|e| e.kind == kind).collect()
    }

    #[test]
    fn starts_on_instructions_and_click_starts_level_one() {
        let (mut game, mut ctx) = game_with(FakeLevels::all(&[(LayerKind::Exit, (7, 4))]), Tuning::default());
        assert_eq!(game.screen(), Screen::Instruction);
        assert!(ctx.scene.count_tagged(hud::SCREEN_TAG) > 0);
        assert_eq!(events_of(&ctx, EVENT_SCREEN)[0].a, 0.0);

        send(&mut game, &mut ctx, click());
        assert_eq!(game.screen(), Screen::Game);
        assert_eq!(game.session().level, 1);
        assert_eq!(ctx.scene.count_tagged(hud::SCREEN_TAG), 0);
        assert!(ctx.scene.count_tagged(hud::HUD_TAG) > 0);
        assert_eq!(ctx.scene.count_tagged(PLAYER_TAG), 1);
        assert_eq!(events_of(&ctx, EVENT_LEVEL).last().map(|e| e.a), Some(1.0));
    }

    #[test]
    fn keys_are_ignored_before_the_game_starts() {
        let (mut game, mut ctx) = game_with(FakeLevels::all(&[(LayerKind::Exit, (7, 4))]), Tuning::default());
        send(&mut game, &mut ctx, InputEvent::KeyDown { key_code: KEY_Q });
        assert_eq!(game.screen(), Screen::Instruction);
        assert!(game.player().is_none());
    }

    #[test]
    fn exit_without_key_restarts_same_level() {
        let tuning = Tuning::default();
        let (mut game, mut ctx) = playing(FakeLevels::all(&[(LayerKind::Exit, AT_SPAWN)]), tuning.clone(), 1, 0);
        tick(&mut game, &mut ctx);

        assert_eq!(game.session().level, 1);
        assert_eq!(game.session().key, 0);
        assert_eq!(game.screen(), Screen::Game);
        assert_eq!(game.player().map(|p| p.body.pos), Some(tuning.spawn_point()));
        assert_eq!(events_of(&ctx, EVENT_LEVEL).last().map(|e| e.a), Some(1.0));
    }

    #[test]
    fn exit_with_key_advances_and_spends_key() {
        let (mut game, mut ctx) = playing(FakeLevels::all(&[(LayerKind::Exit, AT_SPAWN)]), Tuning::default(), 1, 1);
        game.session.loot = 3;
        tick(&mut game, &mut ctx);

        assert_eq!(game.session().level, 2);
        assert_eq!(game.session().key, 0);
        assert_eq!(game.session().loot, 3);
        assert_eq!(events_of(&ctx, EVENT_LEVEL).last().map(|e| e.a), Some(2.0));
        assert_eq!(events_of(&ctx, EVENT_HUD).last().map(|e| (e.a, e.c)), Some((3.0, 0.0)));
    }

    #[test]
    fn exit_on_last_map_holds_without_end_screen() {
        let (mut game, mut ctx) = playing(FakeLevels::all(&[(LayerKind::Exit, AT_SPAWN)]), Tuning::default(), 3, 1);
        tick(&mut game, &mut ctx);

        assert_eq!(game.session().level, 3);
        assert_eq!(game.session().key, 0);
        assert_eq!(game.screen(), Screen::Game);
        assert!(events_of(&ctx, EVENT_SCREEN).is_empty());
    }

    #[test]
    fn hazard_resets_loot_and_counts_death() {
        let cells = [(LayerKind::Gold, AT_SPAWN), (LayerKind::Spike, (4, 1))];
        let (mut game, mut ctx) = playing(FakeLevels::all(&cells), Tuning::default(), 2, 1);
        game.session.loot = 4;
        tick(&mut game, &mut ctx);

        assert_eq!(game.session().deaths, 1);
        assert_eq!(game.session().loot, 0);
        assert_eq!(game.session().key, 0);
        assert_eq!(game.session().level, 2);
        // The reload brings the gold back.
        assert_eq!(ctx.scene.count_tagged("gold"), 1);
    }

    #[test]
    fn deaths_survive_a_new_level() {
        let cells = [(LayerKind::Exit, AT_SPAWN)];
        let (mut game, mut ctx) = playing(FakeLevels::all(&cells), Tuning::default(), 1, 1);
        game.session.deaths = 2;
        tick(&mut game, &mut ctx);
        assert_eq!(game.session().level, 2);
        assert_eq!(game.session().deaths, 2);
    }

    #[test]
    fn leaving_the_last_map_shows_end_then_click_closes() {
        let tuning = Tuning {
            hold_final_level: false,
            ..Tuning::default()
        };
        let (mut game, mut ctx) = playing(FakeLevels::all(&[(LayerKind::Exit, AT_SPAWN)]), tuning, 3, 1);
        tick(&mut game, &mut ctx);

        assert_eq!(game.screen(), Screen::End);
        assert!(game.player().is_none());
        assert_eq!(ctx.scene.count_tagged(hud::SCREEN_TAG), 144);
        assert_eq!(events_of(&ctx, EVENT_SCREEN).last().map(|e| e.a), Some(2.0));

        send(&mut game, &mut ctx, click());
        assert_eq!(game.screen(), Screen::Closed);
        assert_eq!(events_of(&ctx, EVENT_QUIT).len(), 1);
    }

    #[test]
    fn missing_level_closes_the_game() {
        let (mut game, mut ctx) = game_with(FakeLevels(HashMap::new()), Tuning::default());
        send(&mut game, &mut ctx, click());
        assert_eq!(game.screen(), Screen::Closed);
        assert_eq!(events_of(&ctx, EVENT_QUIT).len(), 1);
    }

    #[test]
    fn level_without_exit_layer_closes_the_game() {
        let json = r#"{ "width": 1, "height": 1, "tilewidth": 32, "tileheight": 32,
            "layers": [{ "name": "platforms", "type": "tilelayer", "data": [1] }] }"#;
        let levels = FakeLevels(HashMap::from([(1, json.to_string())]));
        let (mut game, mut ctx) = game_with(levels, Tuning::default());
        send(&mut game, &mut ctx, click());
        assert_eq!(game.screen(), Screen::Closed);
        assert!(game.player().is_none());
        assert_eq!(events_of(&ctx, EVENT_QUIT).len(), 1);
    }

    #[test]
    fn quit_closes_and_later_input_is_ignored() {
        let (mut game, mut ctx) = playing(FakeLevels::all(&[(LayerKind::Exit, (7, 4))]), Tuning::default(), 1, 0);
        send(&mut game, &mut ctx, InputEvent::KeyDown { key_code: KEY_Q });
        assert_eq!(game.screen(), Screen::Closed);

        ctx.clear_frame_data();
        send(&mut game, &mut ctx, click());
        assert_eq!(game.screen(), Screen::Closed);
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn visibility_survives_retry() {
        let cells = [(LayerKind::Exit, (7, 4)), (LayerKind::Underlayer, (0, 2))];
        let (mut game, mut ctx) = playing(FakeLevels::all(&cells), Tuning::default(), 1, 0);
        assert!(ctx.scene.tagged("underlayer").all(|e| !e.visible));

        send(&mut game, &mut ctx, InputEvent::KeyDown { key_code: KEY_E });
        assert_eq!(game.visibility(), LayerVisibility::Visible);
        assert!(ctx.scene.tagged("underlayer").all(|e| e.visible));

        send(&mut game, &mut ctx, InputEvent::KeyDown { key_code: KEY_X });
        assert_eq!(game.visibility(), LayerVisibility::Visible);
        assert_eq!(ctx.scene.count_tagged("underlayer"), 1);
        assert!(ctx.scene.tagged("underlayer").all(|e| e.visible));
    }

    #[test]
    fn retry_keeps_loot_and_drops_key() {
        let (mut game, mut ctx) = playing(FakeLevels::all(&[(LayerKind::Exit, (7, 4))]), Tuning::default(), 2, 1);
        game.session.loot = 3;
        game.session.deaths = 1;
        send(&mut game, &mut ctx, InputEvent::KeyDown { key_code: KEY_X });

        assert_eq!(game.screen(), Screen::Game);
        assert_eq!(game.session().level, 2);
        assert_eq!(game.session().loot, 3);
        assert_eq!(game.session().key, 0);
        assert_eq!(game.session().deaths, 1);
        assert_eq!(events_of(&ctx, EVENT_LEVEL).last().map(|e| e.a), Some(2.0));
        assert_eq!(events_of(&ctx, EVENT_HUD).last().map(|e| (e.a, e.b, e.c)), Some((3.0, 1.0, 0.0)));
    }

    #[test]
    fn revealing_the_underlayer_around_the_player_lifts_them_out() {
        let cells = [(LayerKind::Exit, (7, 4)), (LayerKind::Underlayer, AT_SPAWN)];
        let (mut game, mut ctx) = playing(FakeLevels::all(&cells), Tuning::default(), 1, 0);
        let start = game.player().unwrap().body.pos;

        send(&mut game, &mut ctx, InputEvent::KeyDown { key_code: KEY_E });
        for _ in 0..60 {
            tick(&mut game, &mut ctx);
        }
        // The spawn cell's top edge is at y = 240.
        let player = game.player().unwrap();
        assert!(player.body.grounded);
        assert!((player.body.bounds().min().y - 240.0).abs() < 0.5, "stands at y={}", player.body.pos.y);

        send(&mut game, &mut ctx, InputEvent::KeyDown { key_code: KEY_D });
        for _ in 0..14 {
            tick(&mut game, &mut ctx);
        }
        let player = game.player().unwrap();
        assert!(player.body.pos.x > start.x + 50.0, "walked to x={}", player.body.pos.x);
        assert!(player.body.pos.y < 240.0, "fell off the ledge to y={}", player.body.pos.y);
    }

    #[test]
    fn walking_moves_and_key_release_stops() {
        let (mut game, mut ctx) = playing(FakeLevels::all(&[(LayerKind::Exit, (7, 4))]), Tuning::default(), 1, 0);
        let start = game.player().map(|p| p.body.pos.x).unwrap();

        send(&mut game, &mut ctx, InputEvent::KeyDown { key_code: KEY_D });
        tick(&mut game, &mut ctx);
        let player = game.player().unwrap();
        assert!(player.body.pos.x > start);
        assert_eq!(player.body.vel.x, 5.0);

        send(&mut game, &mut ctx, InputEvent::KeyUp { key_code: KEY_D });
        assert_eq!(game.player().unwrap().body.vel.x, 0.0);
    }

    #[test]
    fn jump_only_from_the_ground() {
        let (mut game, mut ctx) = playing(FakeLevels::all(&[(LayerKind::Exit, (7, 4))]), Tuning::default(), 1, 0);

        send(&mut game, &mut ctx, InputEvent::KeyDown { key_code: KEY_W });
        assert!(game.player().unwrap().body.vel.y <= 0.0);

        for _ in 0..40 {
            tick(&mut game, &mut ctx);
        }
        assert!(game.player().unwrap().body.grounded);

        send(&mut game, &mut ctx, InputEvent::KeyDown { key_code: KEY_W });
        let player = game.player().unwrap();
        assert!(player.body.vel.y > 0.0);
        assert_eq!(player.pose, crate::character::Pose::Jump);
    }

    #[test]
    fn player_entity_follows_body() {
        let (mut game, mut ctx) = playing(FakeLevels::all(&[(LayerKind::Exit, (7, 4))]), Tuning::default(), 1, 0);
        for _ in 0..5 {
            tick(&mut game, &mut ctx);
        }
        let body = game.player().unwrap().body.pos;
        let entity = ctx.scene.tagged(PLAYER_TAG).next().unwrap();
        assert_eq!(entity.pos, body);
        assert_eq!(entity.layer, RenderLayer::Foreground);
        assert_eq!(ctx.camera.center, body);
    }
}
