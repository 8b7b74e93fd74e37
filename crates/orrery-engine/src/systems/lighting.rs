//! Point and ambient lights for the host renderer.
//!
//! Lights are persistent — they stay until explicitly removed.
//! A light may be anchored to a scene node; its position then follows the node's
//! world transform each time `sync_anchors` runs.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::api::types::NodeId;
use crate::core::scene::Scene;
use crate::systems::color::Color;

/// A 3D point light.
///
/// Wire format (12 floats / 48 bytes):
/// `[x, y, z, intensity, r, g, b, distance, flags, pad×3]`
/// where flags bit 0 = casts shadows. `distance` 0 means no falloff cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub intensity: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub distance: f32,
    pub flags: f32,
    pub _pad: [f32; 3],
}

impl PointLight {
    pub const FLOATS: usize = 12;

    pub fn new(color: Color, intensity: f32, distance: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            intensity,
            r: color.r,
            g: color.g,
            b: color.b,
            distance,
            flags: 0.0,
            _pad: [0.0; 3],
        }
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.set_pos(pos);
        self
    }

    pub fn with_cast_shadow(mut self, cast: bool) -> Self {
        self.flags = if cast { 1.0 } else { 0.0 };
        self
    }

    pub fn set_pos(&mut self, pos: Vec3) {
        self.x = pos.x;
        self.y = pos.y;
        self.z = pos.z;
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn casts_shadow(&self) -> bool {
        self.flags as u32 & 1 == 1
    }
}

/// Uniform light applied to every lit surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl AmbientLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self { color, intensity }
    }

    /// Color premultiplied by intensity, as the host shader consumes it.
    pub fn radiance(&self) -> [f32; 3] {
        [
            self.color.r * self.intensity,
            self.color.g * self.intensity,
            self.color.b * self.intensity,
        ]
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::new(Color::WHITE, 1.0)
    }
}

/// Manages active point lights and the ambient term.
pub struct LightState {
    lights: Vec<PointLight>,
    /// Node each light follows, parallel to `lights`.
    anchors: Vec<Option<NodeId>>,
    ambient: AmbientLight,
}

impl LightState {
    pub fn new() -> Self {
        Self::with_capacity(4)
    }

    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            anchors: Vec::with_capacity(max_lights),
            ambient: AmbientLight::default(),
        }
    }

    /// Add a free-standing light.
    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
        self.anchors.push(None);
    }

    /// Add a light whose position tracks `node`.
    pub fn add_anchored(&mut self, light: PointLight, node: NodeId) {
        self.lights.push(light);
        self.anchors.push(Some(node));
    }

    /// Copy anchor node world positions into their lights.
    pub fn sync_anchors(&mut self, scene: &Scene) {
        for (light, anchor) in self.lights.iter_mut().zip(&self.anchors) {
            if let Some(node) = anchor.and_then(|id| scene.get(id)) {
                light.set_pos(node.world_position());
            }
        }
    }

    pub fn clear(&mut self) {
        self.lights.clear();
        self.anchors.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn set_ambient(&mut self, ambient: AmbientLight) {
        self.ambient = ambient;
    }

    pub fn ambient(&self) -> AmbientLight {
        self.ambient
    }

    /// Pointer to the lights data for host reads.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
