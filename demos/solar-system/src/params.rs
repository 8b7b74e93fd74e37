//! Tunable scene parameters and the panel that edits them.
//!
//! Every control carries a stable numeric `kind` that the host sends back with
//! each edit. Orbit sliders take effect immediately; starfield controls only
//! rebuild the galaxy once the user lets go.

use orrery_engine::{Color, ParamControl, ParamPanel, SliderSpec, StarfieldParams};
use serde::{Deserialize, Serialize};

// ── Control kinds ────────────────────────────────────────────────────

pub const KIND_EARTH_DISTANCE: u32 = 1;
pub const KIND_EARTH_SIZE: u32 = 2;
pub const KIND_EARTH_REVOLUTION_SPEED: u32 = 3;
pub const KIND_EARTH_ROTATION_SPEED: u32 = 4;
pub const KIND_MOON_DISTANCE: u32 = 5;
pub const KIND_MOON_SIZE: u32 = 6;
pub const KIND_MOON_REVOLUTION: u32 = 7;

pub const KIND_STAR_COUNT: u32 = 10;
pub const KIND_STAR_SIZE: u32 = 11;
pub const KIND_STAR_BRANCHES: u32 = 12;
pub const KIND_STAR_RADIUS: u32 = 13;
pub const KIND_STAR_SPIN: u32 = 14;
pub const KIND_STAR_RANDOMNESS: u32 = 15;
pub const KIND_STAR_RANDOMNESS_POWER: u32 = 16;
pub const KIND_STAR_COLOR_NEAR: u32 = 17;
pub const KIND_STAR_COLOR_FAR: u32 = 18;

const ORBIT_SLIDERS: [(u32, &str, &str, SliderSpec); 7] = [
    (KIND_EARTH_DISTANCE, "earthDistance", "Earth distance", SliderSpec::new(5.0, 20.0, 0.01)),
    (KIND_EARTH_SIZE, "earthSize", "Earth size", SliderSpec::new(0.1, 10.0, 0.01)),
    (KIND_EARTH_REVOLUTION_SPEED, "earthRevolutionSpeed", "Earth revolution", SliderSpec::new(0.0, 1.0, 0.01)),
    (KIND_EARTH_ROTATION_SPEED, "earthRotationSpeed", "Earth rotation", SliderSpec::new(0.0, 1.0, 0.01)),
    (KIND_MOON_DISTANCE, "moonDistance", "Moon distance", SliderSpec::new(0.0, 10.0, 0.01)),
    (KIND_MOON_SIZE, "moonSize", "Moon size", SliderSpec::new(0.1, 10.0, 0.01)),
    (KIND_MOON_REVOLUTION, "moonRevolution", "Moon revolution", SliderSpec::new(0.0, 10.0, 0.01)),
];

const STAR_SLIDERS: [(u32, &str, &str, SliderSpec); 7] = [
    (KIND_STAR_COUNT, "count", "Count", SliderSpec::new(100.0, 100_000.0, 100.0)),
    (KIND_STAR_SIZE, "size", "Size", SliderSpec::new(0.001, 0.1, 0.001)),
    (KIND_STAR_BRANCHES, "branches", "Branches", SliderSpec::new(2.0, 20.0, 1.0)),
    (KIND_STAR_RADIUS, "radius", "Radius", SliderSpec::new(1.0, 20.0, 0.01)),
    (KIND_STAR_SPIN, "spin", "Spin", SliderSpec::new(-5.0, 5.0, 0.001)),
    (KIND_STAR_RANDOMNESS, "randomness", "Randomness", SliderSpec::new(0.0, 2.0, 0.001)),
    (KIND_STAR_RANDOMNESS_POWER, "randomnessPower", "Randomness power", SliderSpec::new(1.0, 10.0, 0.001)),
];

const STARS_FOLDER: &str = "Stars";

/// What the scene does with a sanitized panel edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    /// Store the value; the orbit picks it up next frame.
    Store,
    /// Store the value and rebuild the starfield.
    RebuildStars,
}

/// Sun / earth / moon motion parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrbitParams {
    /// Sun-to-earth distance.
    pub earth_distance: f32,
    /// Uniform earth scale; the person stands at this radius.
    pub earth_size: f32,
    /// Solar orbit angular speed (rad/s).
    pub earth_revolution_speed: f32,
    /// Earth spin (rad/s).
    pub earth_rotation_speed: f32,
    /// Earth-to-moon distance.
    pub moon_distance: f32,
    /// Uniform moon scale.
    pub moon_size: f32,
    /// Moon orbit angular speed (rad/s).
    pub moon_revolution: f32,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            earth_distance: 6.0,
            earth_size: 1.0,
            earth_revolution_speed: 0.1,
            earth_rotation_speed: 0.2,
            moon_distance: 2.0,
            moon_size: 0.2,
            moon_revolution: 1.0,
        }
    }
}

/// Full scene configuration, loadable from JSON.
///
/// ```json
/// { "stars": { "count": 20000, "colorNear": "#ff6030" }, "orbit": { "earthDistance": 8 } }
/// ```
/// Missing fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub stars: StarfieldParams,
    pub orbit: OrbitParams,
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Current value of the field behind `kind`, in panel units.
    pub fn get(&self, kind: u32) -> Option<[f32; 3]> {
        let (orbit, stars) = (&self.orbit, &self.stars);
        let v = match kind {
            KIND_EARTH_DISTANCE => orbit.earth_distance,
            KIND_EARTH_SIZE => orbit.earth_size,
            KIND_EARTH_REVOLUTION_SPEED => orbit.earth_revolution_speed,
            KIND_EARTH_ROTATION_SPEED => orbit.earth_rotation_speed,
            KIND_MOON_DISTANCE => orbit.moon_distance,
            KIND_MOON_SIZE => orbit.moon_size,
            KIND_MOON_REVOLUTION => orbit.moon_revolution,
            KIND_STAR_COUNT => stars.count as f32,
            KIND_STAR_SIZE => stars.size,
            KIND_STAR_BRANCHES => stars.branches as f32,
            KIND_STAR_RADIUS => stars.radius,
            KIND_STAR_SPIN => stars.spin,
            KIND_STAR_RANDOMNESS => stars.randomness,
            KIND_STAR_RANDOMNESS_POWER => stars.randomness_power,
            KIND_STAR_COLOR_NEAR => return Some(stars.color_near.to_array()),
            KIND_STAR_COLOR_FAR => return Some(stars.color_far.to_array()),
            _ => return None,
        };
        Some([v, 0.0, 0.0])
    }

    /// Pull every field the panel controls back inside that control's range.
    /// A loaded document gets the same bounds as a slider drag.
    pub fn clamp_to<A: Copy>(&mut self, panel: &ParamPanel<A>) {
        for control in panel.controls() {
            if let Some(values) = self.get(control.kind) {
                self.set(control.kind, control.clamp(values));
            }
        }
    }

    /// Write a sanitized panel value into the matching field.
    /// Returns false for kinds this config does not own.
    pub fn set(&mut self, kind: u32, values: [f32; 3]) -> bool {
        let v = values[0];
        let (orbit, stars) = (&mut self.orbit, &mut self.stars);
        match kind {
            KIND_EARTH_DISTANCE => orbit.earth_distance = v,
            KIND_EARTH_SIZE => orbit.earth_size = v,
            KIND_EARTH_REVOLUTION_SPEED => orbit.earth_revolution_speed = v,
            KIND_EARTH_ROTATION_SPEED => orbit.earth_rotation_speed = v,
            KIND_MOON_DISTANCE => orbit.moon_distance = v,
            KIND_MOON_SIZE => orbit.moon_size = v,
            KIND_MOON_REVOLUTION => orbit.moon_revolution = v,
            KIND_STAR_COUNT => stars.count = v.max(0.0).round() as usize,
            KIND_STAR_SIZE => stars.size = v,
            KIND_STAR_BRANCHES => stars.branches = v.max(0.0).round() as u32,
            KIND_STAR_RADIUS => stars.radius = v,
            KIND_STAR_SPIN => stars.spin = v,
            KIND_STAR_RANDOMNESS => stars.randomness = v,
            KIND_STAR_RANDOMNESS_POWER => stars.randomness_power = v,
            KIND_STAR_COLOR_NEAR => stars.color_near = Color::new(values[0], values[1], values[2]),
            KIND_STAR_COLOR_FAR => stars.color_far = Color::new(values[0], values[1], values[2]),
            _ => return false,
        }
        true
    }
}

/// Declare every control with its bounds and wire the listeners.
pub fn build_panel() -> ParamPanel<PanelAction> {
    let mut panel = ParamPanel::new();

    for (kind, name, label, spec) in ORBIT_SLIDERS {
        panel.add(ParamControl::slider(kind, name, label, spec));
        panel.on_change(kind, PanelAction::Store);
        panel.on_finish_change(kind, PanelAction::Store);
    }

    for (kind, name, label, spec) in STAR_SLIDERS {
        panel.add(ParamControl::slider(kind, name, label, spec).in_folder(STARS_FOLDER));
        panel.on_finish_change(kind, PanelAction::RebuildStars);
    }

    for (kind, name, label) in [
        (KIND_STAR_COLOR_NEAR, "colorNear", "Inner color"),
        (KIND_STAR_COLOR_FAR, "colorFar", "Outer color"),
    ] {
        panel.add(ParamControl::color(kind, name, label).in_folder(STARS_FOLDER));
        panel.on_finish_change(kind, PanelAction::RebuildStars);
    }

    panel
}
