//! Solar system scene: sun, earth and moon on tunable orbits inside a
//! procedural spiral-galaxy starfield.
//!
//! Hierarchy:
//! solar_orbit ⊃ { sun, sun_light, stars, earth_orbit ⊃ { earth_group ⊃ { earth, person }, moon } }

use orrery_engine::*;

use crate::bodies;
use crate::orbit::OrbitState;
use crate::params::{self, PanelAction, SceneConfig};

// ── Custom event kinds from the host ─────────────────────────────────

const CUSTOM_TOGGLE_PAUSE: u32 = 1;
const CUSTOM_REGENERATE: u32 = 2;

// ── Scene event kinds to the host ────────────────────────────────────

/// `a` = star count, `b` = generation.
pub const EVENT_STARFIELD_REBUILT: f32 = 1.0;
/// `a` = error code.
pub const EVENT_STARFIELD_REJECTED: f32 = 2.0;

/// Node ids of everything the orbit moves.
#[derive(Debug, Clone, Copy)]
struct Bodies {
    solar_orbit: NodeId,
    stars: NodeId,
    earth_orbit: NodeId,
    earth_group: NodeId,
    earth: NodeId,
    person: NodeId,
    moon: NodeId,
}

pub struct SolarScene {
    config: SceneConfig,
    panel: ParamPanel<PanelAction>,
    /// Orbit angles and simulation time; frozen while paused.
    orbit: OrbitState,
    paused: bool,
    bodies: Option<Bodies>,
}

impl Default for SolarScene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl SolarScene {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            panel: params::build_panel(),
            orbit: OrbitState::new(),
            paused: false,
            bodies: None,
        }
    }

    pub fn scene_config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn orbit(&self) -> &OrbitState {
        &self.orbit
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Replace the starfield with one built from the current parameters.
    /// On rejection the previous cloud stays attached.
    fn rebuild_stars(&mut self, ctx: &mut EngineContext) {
        let result = ctx.starfield.regenerate(&self.config.stars).map(|cloud| cloud.len());
        match result {
            Ok(count) => {
                let generation = ctx.starfield.generation();
                // an empty cloud hides the points node
                if let Some(ids) = self.bodies {
                    if let Some(node) = ctx.scene.get_mut(ids.stars) {
                        node.visible = count > 0;
                    }
                }
                log::debug!("starfield rebuilt: {count} stars, generation {generation}");
                ctx.emit_event(SceneEvent::new(EVENT_STARFIELD_REBUILT, count as f32, generation as f32, 0.0));
            }
            Err(e) => {
                log::warn!("starfield rejected: {e}");
                ctx.emit_event(SceneEvent::new(EVENT_STARFIELD_REJECTED, e.code(), 0.0, 0.0));
            }
        }
    }

    /// Push the current orbit state into the transform graph.
    fn apply_orbit(&self, ctx: &mut EngineContext) {
        let Some(ids) = self.bodies else {
            return;
        };
        let t = self.orbit.transforms(&self.config.orbit);
        ctx.graph.set_local(ids.solar_orbit, t.solar_orbit);
        ctx.graph.set_local(ids.earth_orbit, t.earth_orbit);
        ctx.graph.set_local(ids.earth_group, t.earth_group);
        ctx.graph.set_local(ids.earth, t.earth);
        ctx.graph.set_local(ids.person, t.person);
        ctx.graph.set_local(ids.moon, t.moon);
    }

    fn spawn(ctx: &mut EngineContext, tag: &str, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = ctx.next_id();
        ctx.spawn_child(Node::new(id).with_tag(tag).with_kind(kind), parent, LocalTransform::new())
    }

    fn spawn_mesh(ctx: &mut EngineContext, tag: &str, mesh: MeshComponent, parent: NodeId) -> NodeId {
        let id = ctx.next_id();
        ctx.spawn_child(Node::new(id).with_tag(tag).with_mesh(mesh), Some(parent), LocalTransform::new())
    }
}

impl SceneApp for SolarScene {
    fn config(&self) -> EngineConfig {
        EngineConfig {
            max_nodes: 16,
            max_lights: 2,
            max_events: 16,
            ..EngineConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        ctx.lights.set_ambient(AmbientLight::new(Color::WHITE, bodies::AMBIENT_INTENSITY));

        // ── Solar group: sun, its light, the galaxy ─────────────────
        let solar_orbit = Self::spawn(ctx, "solar_orbit", NodeKind::Group, None);
        Self::spawn_mesh(ctx, "sun", bodies::sun_mesh(), solar_orbit);

        let sun_light = Self::spawn(ctx, "sun_light", NodeKind::Light, Some(solar_orbit));
        ctx.lights.add_anchored(
            PointLight::new(Color::WHITE, bodies::SUN_LIGHT_INTENSITY, bodies::SUN_LIGHT_DISTANCE)
                .with_cast_shadow(true),
            sun_light,
        );

        let stars = Self::spawn(ctx, "stars", NodeKind::Points, Some(solar_orbit));

        // ── Earth and moon ──────────────────────────────────────────
        let earth_orbit = Self::spawn(ctx, "earth_orbit", NodeKind::Group, Some(solar_orbit));
        let earth_group = Self::spawn(ctx, "earth_group", NodeKind::Group, Some(earth_orbit));
        let earth = Self::spawn_mesh(ctx, "earth", bodies::earth_mesh(), earth_group);
        let person = Self::spawn_mesh(ctx, "person", bodies::person_mesh(), earth_group);
        let moon = Self::spawn_mesh(ctx, "moon", bodies::moon_mesh(), earth_orbit);

        self.bodies = Some(Bodies { solar_orbit, stars, earth_orbit, earth_group, earth, person, moon });

        self.rebuild_stars(ctx);
        self.apply_orbit(ctx);
        log::info!("solar scene: {} nodes, {} stars", ctx.scene.len(), ctx.starfield.star_count());
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, time: FrameTime) {
        let mut rebuild = false;

        for event in input.iter() {
            match event {
                InputEvent::Param(edit) => {
                    for update in self.panel.dispatch(edit) {
                        self.config.set(update.kind, update.values);
                        if update.action == PanelAction::RebuildStars {
                            rebuild = true;
                        }
                    }
                }
                InputEvent::Custom { kind: CUSTOM_TOGGLE_PAUSE, .. } => {
                    self.paused = !self.paused;
                    log::info!("orbit {}", if self.paused { "paused" } else { "resumed" });
                }
                InputEvent::Custom { kind: CUSTOM_REGENERATE, .. } => rebuild = true,
                InputEvent::Custom { .. } => {}
            }
        }

        // One rebuild per frame no matter how many controls finished together.
        if rebuild {
            self.rebuild_stars(ctx);
        }

        if !self.paused {
            self.orbit = self.orbit.advance(&self.config.orbit, time.delta);
        }
        self.apply_orbit(ctx);
    }

    fn configure(&mut self, ctx: &mut EngineContext, json: &str) -> Result<(), serde_json::Error> {
        let mut config = SceneConfig::from_json(json)?;
        config.clamp_to(&self.panel);
        let stars_changed = config.stars != self.config.stars;
        self.config = config;
        if stars_changed && self.bodies.is_some() {
            self.rebuild_stars(ctx);
        }
        self.apply_orbit(ctx);
        Ok(())
    }

    fn describe_panel(&self) -> Result<String, serde_json::Error> {
        self.panel.describe()
    }
}
