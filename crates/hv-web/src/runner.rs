use hv_engine::bridge::protocol::{
    HEADER_BATCH_COUNT, HEADER_CAMERA_X, HEADER_CAMERA_Y, HEADER_EVENT_COUNT,
    HEADER_FRAME_COUNTER, HEADER_INSTANCE_COUNT, HEADER_MAX_BATCHES, HEADER_MAX_EVENTS,
    HEADER_MAX_INSTANCES, HEADER_PROTOCOL_VERSION, HEADER_WORLD_HEIGHT, HEADER_WORLD_WIDTH,
    PROTOCOL_VERSION,
};
use hv_engine::systems::render::build_render_buffer;
use hv_engine::{
    AssetManifest, EngineContext, FixedTimestep, Game, GameConfig, InputEvent, InputQueue,
    ProtocolLayout, RenderBuffer,
};

/// Owns one game and its engine state, and steps both from the browser's frame callback.
///
/// Each concrete game creates a `thread_local!` GameRunner through
/// [`export_game!`](crate::export_game) and exports free functions via
/// `#[wasm_bindgen]`, because wasm-bindgen cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    /// Handed to every fixed step after the first one in a frame.
    no_input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    /// Flat copy of the frame in the layout described by [`ProtocolLayout`].
    frame: Vec<f32>,
    frame_counter: u32,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);

        Self {
            ctx: EngineContext::from_config(&config),
            timestep: FixedTimestep::new(config.fixed_dt),
            frame: vec![0.0; layout.buffer_total_floats],
            game,
            input: InputQueue::new(),
            no_input: InputQueue::new(),
            render_buffer: RenderBuffer::new(),
            layout,
            config,
            frame_counter: 0,
            initialized: false,
        }
    }

    /// Show the game's first screen and publish the first frame.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.publish();
    }

    /// Queue input for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Parse and forward an asset manifest. A manifest that fails to parse or
    /// validate is logged and ignored.
    pub fn load_manifest(&mut self, json: &str) {
        match AssetManifest::from_json(json) {
            Ok(manifest) => self.game.load_manifest(&manifest),
            Err(e) => log::warn!("ignoring asset manifest: {e}"),
        }
    }

    /// Run one frame tick: update game, build render buffer, pack the frame.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        // Queued input reaches the first fixed step only, so one key press
        // is one action however many steps this frame runs.
        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            let input = if step == 0 { &self.input } else { &self.no_input };
            self.game.update(&mut self.ctx, input);
        }
        if steps > 0 {
            self.input.clear();
        }

        build_render_buffer(self.ctx.scene.iter(), &self.ctx.camera, &mut self.render_buffer);
        self.publish();
    }

    /// Write header, instances, batches and events into the flat frame buffer.
    fn publish(&mut self) {
        let layout = &self.layout;
        self.frame_counter = self.frame_counter.wrapping_add(1);

        let instances = &self.render_buffer.instances;
        let instance_count = instances.len().min(layout.max_instances);
        if instance_count < instances.len() {
            log::warn!(
                "render buffer overflow: {} instances, capacity {}",
                instances.len(),
                layout.max_instances
            );
        }
        let instance_floats: &[f32] = bytemuck::cast_slice(&instances[..instance_count]);
        let start = layout.instance_data_offset;
        self.frame[start..start + instance_floats.len()].copy_from_slice(instance_floats);

        let mut batch_count = 0;
        for batch in &self.render_buffer.batches {
            if batch_count == layout.max_batches || batch.start as usize >= instance_count {
                break;
            }
            let count = (batch.count as usize).min(instance_count - batch.start as usize);
            let at = layout.batch_data_offset + batch_count * 4;
            self.frame[at..at + 4].copy_from_slice(&[
                batch.atlas as f32,
                batch.layer as f32,
                batch.start as f32,
                count as f32,
            ]);
            batch_count += 1;
        }

        let event_count = self.ctx.events.len().min(layout.max_events);
        let event_floats: &[f32] = bytemuck::cast_slice(&self.ctx.events[..event_count]);
        let start = layout.event_data_offset;
        self.frame[start..start + event_floats.len()].copy_from_slice(event_floats);

        let origin = self.ctx.camera.screen_origin();
        let header = &mut self.frame[..hv_engine::bridge::protocol::HEADER_FLOATS];
        header[HEADER_FRAME_COUNTER] = self.frame_counter as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
        header[HEADER_INSTANCE_COUNT] = instance_count as f32;
        header[HEADER_MAX_BATCHES] = layout.max_batches as f32;
        header[HEADER_BATCH_COUNT] = batch_count as f32;
        header[HEADER_MAX_EVENTS] = layout.max_events as f32;
        header[HEADER_EVENT_COUNT] = event_count as f32;
        header[HEADER_WORLD_WIDTH] = self.config.world_width;
        header[HEADER_WORLD_HEIGHT] = self.config.world_height;
        header[HEADER_CAMERA_X] = origin.x;
        header[HEADER_CAMERA_Y] = origin.y;
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for zero-copy reads from JS ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn frame(&self) -> &[f32] {
        &self.frame
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn batches_ptr(&self) -> *const u32 {
        self.render_buffer.batches_ptr()
    }

    pub fn batch_count(&self) -> u32 {
        self.render_buffer.batch_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    /// World x of the viewport's bottom-left corner.
    pub fn camera_x(&self) -> f32 {
        self.ctx.camera.screen_origin().x
    }

    pub fn camera_y(&self) -> f32 {
        self.ctx.camera.screen_origin().y
    }

    // Capacities, fixed at construction.

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_batches(&self) -> u32 {
        self.layout.max_batches as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
