use crate::api::types::{NodeId, SceneEvent};
use crate::components::node::Node;
use crate::core::scene::Scene;
use crate::extensions::transform::{LocalTransform, TransformGraph};
use crate::input::queue::InputQueue;
use crate::systems::lighting::LightState;
use crate::systems::starfield::Starfield;

/// Engine capacities and seeds, provided by the app.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum number of drawn nodes (default: 64).
    pub max_nodes: usize,
    /// Maximum number of point lights (default: 8).
    pub max_lights: usize,
    /// Maximum number of scene events per frame (default: 32).
    pub max_events: usize,
    /// Seed for the starfield's random stream (default: 42).
    pub star_seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_nodes: 64,
            max_lights: 8,
            max_events: 32,
            star_seed: 42,
        }
    }
}

/// Time of the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since init.
    pub elapsed: f64,
    /// Seconds since the previous frame.
    pub delta: f32,
}

/// The contract every scene must fulfill.
pub trait SceneApp {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> EngineConfig {
        EngineConfig::default()
    }

    /// Build the scene graph, lights and initial starfield.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Per-frame update: consume input, move nodes, rebuild resources.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, time: FrameTime);

    /// Apply a JSON configuration document. Called before or after init.
    fn configure(&mut self, _ctx: &mut EngineContext, _json: &str) -> Result<(), serde_json::Error> {
        Ok(())
    }

    /// JSON description of the parameter panel controls.
    fn describe_panel(&self) -> Result<String, serde_json::Error> {
        Ok("[]".to_string())
    }
}

/// Mutable access to engine state, passed to `SceneApp::init` and `SceneApp::update`.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub lights: LightState,
    pub starfield: Starfield,
    pub events: Vec<SceneEvent>,
    max_events: usize,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            scene: Scene::with_capacity(config.max_nodes),
            graph: TransformGraph::new(),
            lights: LightState::with_capacity(config.max_lights),
            starfield: Starfield::new(config.star_seed),
            events: Vec::with_capacity(config.max_events),
            max_events: config.max_events,
            next_id: 1,
        }
    }

    /// Generate the next unique node ID.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn `node` and register it in the hierarchy, under `parent` if given.
    pub fn spawn_child(&mut self, node: Node, parent: Option<NodeId>, local: LocalTransform) -> NodeId {
        let id = node.id;
        self.scene.spawn(node);
        match parent {
            Some(p) => self.graph.attach(id, p, local),
            None => self.graph.register_with(id, local),
        }
        id
    }

    /// Emit a scene event to be forwarded to the host. Events past capacity are dropped.
    pub fn emit_event(&mut self, event: SceneEvent) {
        if self.events.len() >= self.max_events {
            log::warn!("event buffer full ({}), dropping kind {}", self.max_events, event.kind);
            return;
        }
        self.events.push(event);
    }

    /// Propagate the hierarchy into world matrices and move anchored lights.
    pub fn sync_transforms(&mut self) {
        self.graph.propagate(&mut self.scene);
        self.lights.sync_anchors(&self.scene);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::color::Color;
    use crate::systems::lighting::PointLight;
    use glam::Vec3;

    #[test]
    fn ids_are_unique() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn spawn_child_links_hierarchy_and_syncs_lights() {
        let mut ctx = EngineContext::new();
        let root_id = ctx.next_id();
        let root = ctx.spawn_child(Node::new(root_id), None, LocalTransform::new().with_offset(Vec3::Y));
        let light_id = ctx.next_id();
        let light = ctx.spawn_child(
            Node::new(light_id),
            Some(root),
            LocalTransform::new().with_offset(Vec3::X),
        );
        ctx.lights.add_anchored(PointLight::new(Color::WHITE, 1.0, 0.0), light);

        ctx.sync_transforms();

        assert_eq!(ctx.graph.get_parent(light), Some(root));
        let pos = ctx.lights.iter().next().unwrap().pos();
        assert!((pos - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn events_respect_capacity() {
        let config = EngineConfig { max_events: 2, ..EngineConfig::default() };
        let mut ctx = EngineContext::with_config(&config);
        for i in 0..3 {
            ctx.emit_event(SceneEvent::new(i as f32, 0.0, 0.0, 0.0));
        }
        assert_eq!(ctx.events.len(), 2);
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }
}
