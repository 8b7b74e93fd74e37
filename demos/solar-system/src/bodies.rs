//! Visual properties of the sun, earth, moon and the little person standing on the earth.

use orrery_engine::{Color, Material, MeshComponent};

// ── Shared geometry ──────────────────────────────────────────────────

/// Every body shares one unit sphere; size comes from the node scale.
pub const SPHERE_RADIUS: f32 = 1.0;
pub const SPHERE_SEGMENTS: u32 = 16;

// ── Colors ───────────────────────────────────────────────────────────

pub const SUN_COLOR: u32 = 0xffff00;
pub const EARTH_COLOR: u32 = 0x0000ff;
pub const MOON_COLOR: u32 = 0x808080;
pub const PERSON_COLOR: u32 = 0xff0000;

// ── Person marker ────────────────────────────────────────────────────

pub const PERSON_BOX: (f32, f32, f32) = (3.0, 1.0, 1.0);
pub const PERSON_SCALE: f32 = 0.1;

// ── Lights ───────────────────────────────────────────────────────────

pub const AMBIENT_INTENSITY: f32 = 2.0;
pub const SUN_LIGHT_INTENSITY: f32 = 230.0;
/// Range beyond which the sun light contributes nothing.
pub const SUN_LIGHT_DISTANCE: f32 = 20.0;

pub fn sun_mesh() -> MeshComponent {
    MeshComponent::sphere(SPHERE_RADIUS, SPHERE_SEGMENTS, Material::standard(Color::from_rgb_u32(SUN_COLOR)))
}

pub fn earth_mesh() -> MeshComponent {
    MeshComponent::sphere(SPHERE_RADIUS, SPHERE_SEGMENTS, Material::standard(Color::from_rgb_u32(EARTH_COLOR)))
        .with_shadows(true, true)
}

pub fn moon_mesh() -> MeshComponent {
    MeshComponent::sphere(SPHERE_RADIUS, SPHERE_SEGMENTS, Material::standard(Color::from_rgb_u32(MOON_COLOR)))
        .with_shadows(true, true)
}

/// Unlit red box, so it stays visible on the earth's night side.
pub fn person_mesh() -> MeshComponent {
    let (w, h, d) = PERSON_BOX;
    MeshComponent::cuboid(w, h, d, Material::basic(Color::from_rgb_u32(PERSON_COLOR)))
}
