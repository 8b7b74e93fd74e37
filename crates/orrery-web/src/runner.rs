use orrery_engine::{
    SceneApp, EngineConfig, EngineContext, FrameTime,
    InputEvent, InputQueue, NodeBuffer,
    FrameClock, ProtocolLayout,
};
use orrery_engine::bridge::protocol::*;
use orrery_engine::systems::render::build_node_buffer;

/// Generic scene runner that wires up the engine loop.
///
/// Each concrete scene (e.g., `solar-system`) creates a `thread_local!` SceneRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct SceneRunner<A: SceneApp> {
    app: A,
    ctx: EngineContext,
    input: InputQueue,
    nodes: NodeBuffer,
    clock: FrameClock,
    config: EngineConfig,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    frame: u32,
    initialized: bool,
}

impl<A: SceneApp> SceneRunner<A> {
    pub fn new(app: A) -> Self {
        let config = app.config();
        let layout = ProtocolLayout::from_config(&config);
        let mut header = [0.0; HEADER_FLOATS];
        layout.write_capacities(&mut header);

        Self {
            ctx: EngineContext::with_config(&config),
            nodes: NodeBuffer::with_capacity(config.max_nodes),
            input: InputQueue::new(),
            clock: FrameClock::new(),
            app,
            config,
            layout,
            header,
            frame: 0,
            initialized: false,
        }
    }

    /// Initialize the scene. Call once after construction.
    pub fn init(&mut self) {
        self.app.init(&mut self.ctx);
        self.ctx.sync_transforms();
        build_node_buffer(self.ctx.scene.iter(), &mut self.nodes);
        self.write_header();
        self.initialized = true;
    }

    /// Apply a JSON config document. Returns false (and keeps the previous
    /// settings) when the document does not parse.
    pub fn load_config(&mut self, json: &str) -> bool {
        match self.app.configure(&mut self.ctx, json) {
            Ok(()) => {
                log::info!("config loaded ({} bytes)", json.len());
                if self.initialized {
                    self.ctx.sync_transforms();
                    build_node_buffer(self.ctx.scene.iter(), &mut self.nodes);
                    self.write_header();
                }
                true
            }
            Err(e) => {
                log::warn!("config rejected: {e}");
                false
            }
        }
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick: update the scene, propagate transforms, rebuild buffers.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let delta = self.clock.tick(dt);
        let time = FrameTime { elapsed: self.clock.elapsed(), delta };
        self.app.update(&mut self.ctx, &self.input, time);

        // Drain input after update
        self.input.drain();

        self.ctx.sync_transforms();
        build_node_buffer(self.ctx.scene.iter(), &mut self.nodes);

        self.frame = self.frame.wrapping_add(1);
        self.write_header();
    }

    /// JSON description of the parameter panel.
    pub fn panel_json(&self) -> String {
        match self.app.describe_panel() {
            Ok(json) => json,
            Err(e) => {
                log::error!("panel description failed: {e}");
                "[]".to_string()
            }
        }
    }

    fn write_header(&mut self) {
        let h = &mut self.header;
        h[HEADER_LOCK] = 0.0;
        h[HEADER_FRAME_COUNTER] = self.frame as f32;
        h[HEADER_NODE_COUNT] = self.nodes.instance_count() as f32;
        h[HEADER_LIGHT_COUNT] = self.ctx.lights.count().min(self.layout.max_lights) as f32;
        h[HEADER_EVENT_COUNT] = self.ctx.events.len() as f32;
        h[HEADER_STAR_COUNT] = self.ctx.starfield.star_count() as f32;
        h[HEADER_STAR_GENERATION] = self.ctx.starfield.generation() as f32;
        h[HEADER_STAR_SIZE] = self.ctx.starfield.point_size();
        let [r, g, b] = self.ctx.lights.ambient().radiance();
        h[HEADER_AMBIENT_R] = r;
        h[HEADER_AMBIENT_G] = g;
        h[HEADER_AMBIENT_B] = b;
        h[HEADER_ELAPSED] = self.clock.elapsed() as f32;
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for host memory reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn nodes_ptr(&self) -> *const f32 {
        self.nodes.instances_ptr()
    }

    pub fn node_count(&self) -> u32 {
        self.nodes.instance_count()
    }

    pub fn star_positions_ptr(&self) -> *const f32 {
        self.ctx.starfield.positions_ptr()
    }

    pub fn star_colors_ptr(&self) -> *const f32 {
        self.ctx.starfield.colors_ptr()
    }

    pub fn star_count(&self) -> u32 {
        self.ctx.starfield.star_count() as u32
    }

    pub fn star_generation(&self) -> u32 {
        self.ctx.starfield.generation()
    }

    pub fn star_size(&self) -> f32 {
        self.ctx.starfield.point_size()
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.ctx.lights.count().min(self.layout.max_lights) as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ctx.lights.ambient().radiance()
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_nodes(&self) -> u32 {
        self.layout.max_nodes as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
