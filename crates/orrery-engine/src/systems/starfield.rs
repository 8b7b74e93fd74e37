//! Spiral-galaxy starfield: a static point cloud laid out along logarithmic-looking
//! arms, colored by distance from the center.
//!
//! The cloud is rebuilt from scratch whenever a parameter is finalized. `Starfield`
//! owns the live cloud and drops it before attaching the replacement, so the host
//! only ever reads one complete set of buffers.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::color::Color;
use super::rng::Rng;

/// Floats per star in the position and color arrays.
pub const STAR_FLOATS: usize = 3;

/// Upper bound on stars in one cloud.
pub const MAX_STARS: usize = 1_000_000;

/// Reasons a parameter set cannot produce a starfield.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StarfieldError {
    #[error("starfield needs at least one branch")]
    ZeroBranches,
    #[error("starfield radius must be finite and positive, got {0}")]
    InvalidRadius(f32),
    #[error("star size must be finite and non-negative, got {0}")]
    InvalidSize(f32),
    #[error("star count {0} exceeds the per-cloud limit")]
    TooManyStars(usize),
    #[error("starfield spin must be finite, got {0}")]
    InvalidSpin(f32),
    #[error("starfield randomness must be finite, got {0}")]
    InvalidRandomness(f32),
    #[error("randomness power must be finite and positive, got {0}")]
    InvalidRandomnessPower(f32),
}

impl StarfieldError {
    /// Stable numeric code forwarded to the host in scene events.
    pub fn code(&self) -> f32 {
        match self {
            StarfieldError::ZeroBranches => 1.0,
            StarfieldError::InvalidRadius(_) => 2.0,
            StarfieldError::InvalidSize(_) => 3.0,
            StarfieldError::TooManyStars(_) => 4.0,
            StarfieldError::InvalidSpin(_) => 5.0,
            StarfieldError::InvalidRandomness(_) => 6.0,
            StarfieldError::InvalidRandomnessPower(_) => 7.0,
        }
    }
}

/// Galaxy generation knobs. Field names follow the panel's camelCase keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StarfieldParams {
    /// Number of stars.
    pub count: usize,
    /// Point size in world units.
    pub size: f32,
    /// Number of spiral arms.
    pub branches: u32,
    /// Outer radius of the galaxy.
    pub radius: f32,
    /// Extra rotation per unit of distance from the center (radians).
    pub spin: f32,
    /// Jitter amplitude as a fraction of each star's radius.
    pub randomness: f32,
    /// Exponent that concentrates jitter near the arm (higher = tighter arms).
    pub randomness_power: f32,
    /// Color at the center.
    pub color_near: Color,
    /// Color at the rim.
    pub color_far: Color,
}

impl Default for StarfieldParams {
    fn default() -> Self {
        Self {
            count: 5000,
            size: 0.01,
            branches: 3,
            radius: 5.0,
            spin: 0.1,
            randomness: 0.5,
            randomness_power: 4.0,
            color_near: Color::from_rgb_u32(0xff6030),
            color_far: Color::from_rgb_u32(0x1b3984),
        }
    }
}

impl StarfieldParams {
    /// Reject values that would divide by zero, exhaust memory, or place stars
    /// at non-finite or runaway coordinates.
    pub fn validate(&self) -> Result<(), StarfieldError> {
        if self.count > MAX_STARS {
            return Err(StarfieldError::TooManyStars(self.count));
        }
        if self.branches == 0 {
            return Err(StarfieldError::ZeroBranches);
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(StarfieldError::InvalidRadius(self.radius));
        }
        if !self.size.is_finite() || self.size < 0.0 {
            return Err(StarfieldError::InvalidSize(self.size));
        }
        if !self.spin.is_finite() {
            return Err(StarfieldError::InvalidSpin(self.spin));
        }
        if !self.randomness.is_finite() {
            return Err(StarfieldError::InvalidRandomness(self.randomness));
        }
        // U^p with p <= 0 blows up for U near zero
        if !self.randomness_power.is_finite() || self.randomness_power <= 0.0 {
            return Err(StarfieldError::InvalidRandomnessPower(self.randomness_power));
        }
        Ok(())
    }
}

/// How the host blends overlapping points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Blending {
    Normal,
    Additive,
}

/// Point material handed to the host alongside the buffers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsMaterial {
    pub size: f32,
    pub size_attenuation: bool,
    pub depth_write: bool,
    pub vertex_colors: bool,
    pub blending: Blending,
}

impl PointsMaterial {
    /// Glowing star material: attenuated, per-vertex colors, additive, no depth writes.
    pub fn stars(size: f32) -> Self {
        Self {
            size,
            size_attenuation: true,
            depth_write: false,
            vertex_colors: true,
            blending: Blending::Additive,
        }
    }
}

/// A generated point cloud: parallel flat xyz / rgb arrays plus the material.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub material: PointsMaterial,
}

impl PointCloud {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.positions.len() / STAR_FLOATS
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of point `i`.
    pub fn position(&self, i: usize) -> Option<[f32; 3]> {
        let p = self.positions.get(i * STAR_FLOATS..i * STAR_FLOATS + STAR_FLOATS)?;
        Some([p[0], p[1], p[2]])
    }

    /// Color of point `i`.
    pub fn color(&self, i: usize) -> Option<[f32; 3]> {
        let c = self.colors.get(i * STAR_FLOATS..i * STAR_FLOATS + STAR_FLOATS)?;
        Some([c[0], c[1], c[2]])
    }
}

/// Generate a galaxy point cloud from `params`, drawing all randomness from `rng`.
///
/// For each star: pick its arm (`i mod branches`), a radius in `[0, radius)`, twist the arm
/// angle by `radius * spin`, then push the star off the arm by a per-axis jitter whose
/// magnitude is `U^randomness_power * randomness * r`. The color fades from `color_near`
/// to `color_far` with `r / radius`.
pub fn generate(params: &StarfieldParams, rng: &mut Rng) -> Result<PointCloud, StarfieldError> {
    params.validate()?;

    let count = params.count;
    let mut positions = Vec::with_capacity(count * STAR_FLOATS);
    let mut colors = Vec::with_capacity(count * STAR_FLOATS);
    let branches = params.branches as f32;

    for i in 0..count {
        let branch = (i % params.branches as usize) as f32;
        let branch_angle = branch / branches * TAU;
        let r = params.radius * rng.next_f32();
        let spin_angle = r * params.spin;

        let jx = jitter(rng, params, r);
        let jy = jitter(rng, params, r);
        let jz = jitter(rng, params, r);

        let angle = branch_angle + spin_angle;
        positions.extend_from_slice(&[angle.cos() * r + jx, jy, angle.sin() * r + jz]);

        let mixed = params.color_near.lerp(&params.color_far, r / params.radius);
        colors.extend_from_slice(&mixed.to_array());
    }

    Ok(PointCloud {
        positions,
        colors,
        material: PointsMaterial::stars(params.size),
    })
}

fn jitter(rng: &mut Rng, params: &StarfieldParams, r: f32) -> f32 {
    let magnitude = rng.next_f32().powf(params.randomness_power);
    magnitude * params.randomness * rng.next_sign() * r
}

/// Owner of the live starfield resource.
///
/// `generation` increases every time the attached cloud changes (rebuilt or released),
/// so the host knows when to dispose its GPU copy and upload the new buffers.
pub struct Starfield {
    cloud: Option<PointCloud>,
    rng: Rng,
    generation: u32,
}

impl Starfield {
    /// Create an empty starfield whose randomness stream starts from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            cloud: None,
            // Spread small seeds so the first xorshift outputs are not near zero.
            rng: Rng::new(seed ^ 0x9E37_79B9_7F4A_7C15),
            generation: 0,
        }
    }

    /// Rebuild the cloud from `params`.
    ///
    /// Parameters are validated first; on error the current cloud stays attached.
    /// On success the old cloud is dropped before the new one is built.
    pub fn regenerate(&mut self, params: &StarfieldParams) -> Result<&PointCloud, StarfieldError> {
        params.validate()?;

        if let Some(old) = self.cloud.take() {
            log::debug!("starfield: disposing {} stars (generation {})", old.len(), self.generation);
            drop(old);
        }

        let cloud = generate(params, &mut self.rng)?;
        self.generation = self.generation.wrapping_add(1);
        log::debug!(
            "starfield: built {} stars, {} branches (generation {})",
            cloud.len(),
            params.branches,
            self.generation
        );
        let cloud = self.cloud.insert(cloud);
        Ok(&*cloud)
    }

    /// Drop the current cloud, if any.
    pub fn release(&mut self) {
        if self.cloud.take().is_some() {
            self.generation = self.generation.wrapping_add(1);
        }
    }

    pub fn cloud(&self) -> Option<&PointCloud> {
        self.cloud.as_ref()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Number of stars currently attached.
    pub fn star_count(&self) -> usize {
        self.cloud.as_ref().map_or(0, PointCloud::len)
    }

    /// Point size of the attached material (0 when nothing is attached).
    pub fn point_size(&self) -> f32 {
        self.cloud.as_ref().map_or(0.0, |c| c.material.size)
    }

    pub fn positions_ptr(&self) -> *const f32 {
        self.cloud.as_ref().map_or(std::ptr::null(), |c| c.positions.as_ptr())
    }

    pub fn colors_ptr(&self) -> *const f32 {
        self.cloud.as_ref().map_or(std::ptr::null(), |c| c.colors.as_ptr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planar_radius(p: [f32; 3]) -> f32 {
        (p[0] * p[0] + p[2] * p[2]).sqrt()
    }

    #[test]
    fn produces_exactly_count_points() {
        let params = StarfieldParams { count: 1234, ..Default::default() };
        let cloud = generate(&params, &mut Rng::new(1)).unwrap();
        assert_eq!(cloud.len(), 1234);
        assert_eq!(cloud.positions.len(), 3 * 1234);
        assert_eq!(cloud.colors.len(), 3 * 1234);
    }

    #[test]
    fn zero_count_is_valid_and_empty() {
        let params = StarfieldParams { count: 0, ..Default::default() };
        let cloud = generate(&params, &mut Rng::new(1)).unwrap();
        assert!(cloud.is_empty());
        assert!(cloud.colors.is_empty());
        assert_eq!(cloud.material.size, params.size);
    }

    #[test]
    fn rejects_degenerate_params() {
        let mut rng = Rng::new(1);
        let zero_branches = StarfieldParams { branches: 0, ..Default::default() };
        assert_eq!(generate(&zero_branches, &mut rng), Err(StarfieldError::ZeroBranches));

        let zero_radius = StarfieldParams { radius: 0.0, ..Default::default() };
        assert_eq!(generate(&zero_radius, &mut rng), Err(StarfieldError::InvalidRadius(0.0)));

        let negative_size = StarfieldParams { size: -0.5, ..Default::default() };
        assert_eq!(generate(&negative_size, &mut rng), Err(StarfieldError::InvalidSize(-0.5)));
    }

    #[test]
    fn rejects_oversized_count_before_allocating() {
        let mut rng = Rng::new(1);
        let huge = StarfieldParams { count: usize::MAX, ..Default::default() };
        assert_eq!(generate(&huge, &mut rng), Err(StarfieldError::TooManyStars(usize::MAX)));

        let over = StarfieldParams { count: MAX_STARS + 1, ..Default::default() };
        assert_eq!(over.validate(), Err(StarfieldError::TooManyStars(MAX_STARS + 1)));
        assert!(StarfieldParams { count: MAX_STARS, ..Default::default() }.validate().is_ok());
    }

    #[test]
    fn rejects_non_finite_shape_params() {
        let spin = StarfieldParams { spin: f32::INFINITY, ..Default::default() };
        assert_eq!(spin.validate(), Err(StarfieldError::InvalidSpin(f32::INFINITY)));

        let randomness = StarfieldParams { randomness: f32::NEG_INFINITY, ..Default::default() };
        assert_eq!(randomness.validate(), Err(StarfieldError::InvalidRandomness(f32::NEG_INFINITY)));

        let nan = StarfieldParams { randomness: f32::NAN, ..Default::default() };
        assert!(matches!(nan.validate(), Err(StarfieldError::InvalidRandomness(v)) if v.is_nan()));
    }

    #[test]
    fn rejects_non_positive_randomness_power() {
        for power in [-2.0, 0.0, f32::INFINITY] {
            let params = StarfieldParams { randomness_power: power, ..Default::default() };
            assert_eq!(params.validate(), Err(StarfieldError::InvalidRandomnessPower(power)));
        }
        let nan = StarfieldParams { randomness_power: f32::NAN, ..Default::default() };
        assert!(matches!(nan.validate(), Err(StarfieldError::InvalidRandomnessPower(_))));
    }

    #[test]
    fn error_codes_are_distinct() {
        let errors = [
            StarfieldError::ZeroBranches,
            StarfieldError::InvalidRadius(0.0),
            StarfieldError::InvalidSize(-1.0),
            StarfieldError::TooManyStars(0),
            StarfieldError::InvalidSpin(0.0),
            StarfieldError::InvalidRandomness(0.0),
            StarfieldError::InvalidRandomnessPower(0.0),
        ];
        let codes: Vec<f32> = errors.iter().map(StarfieldError::code).collect();
        assert_eq!(codes, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn same_seed_same_cloud() {
        let params = StarfieldParams::default();
        let a = generate(&params, &mut Rng::new(2024)).unwrap();
        let b = generate(&params, &mut Rng::new(2024)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn without_jitter_stars_sit_on_their_arm_within_radius() {
        let params = StarfieldParams {
            count: 600,
            branches: 3,
            radius: 5.0,
            spin: 0.1,
            randomness: 0.0,
            ..Default::default()
        };
        let cloud = generate(&params, &mut Rng::new(5)).unwrap();
        for i in 0..cloud.len() {
            let p = cloud.position(i).unwrap();
            let r = planar_radius(p);
            assert!(r <= params.radius + 1e-4, "star {i} outside radius: {r}");
            assert_eq!(p[1], 0.0);
            if r > 1e-3 {
                let expected = (i % 3) as f32 / 3.0 * TAU + r * params.spin;
                let actual = p[2].atan2(p[0]);
                let diff = (actual - expected).rem_euclid(TAU);
                assert!(diff < 1e-3 || diff > TAU - 1e-3, "star {i} off its arm by {diff}");
            }
        }
    }

    #[test]
    fn jitter_is_bounded_by_randomness_times_radius() {
        let params = StarfieldParams {
            count: 3000,
            randomness: 0.5,
            randomness_power: 1.0,
            ..Default::default()
        };
        let cloud = generate(&params, &mut Rng::new(11)).unwrap();
        let bound = params.randomness * params.radius;
        for i in 0..cloud.len() {
            let p = cloud.position(i).unwrap();
            assert!(p[1].abs() <= bound + 1e-4, "y jitter too large: {}", p[1]);
            assert!(planar_radius(p) <= params.radius + bound * 2f32.sqrt() + 1e-4);
        }
    }

    #[test]
    fn color_fades_from_near_to_far() {
        let params = StarfieldParams { randomness: 0.0, count: 2000, ..Default::default() };
        let cloud = generate(&params, &mut Rng::new(3)).unwrap();
        let near = params.color_near.to_array();
        let far = params.color_far.to_array();
        for i in 0..cloud.len() {
            let t = planar_radius(cloud.position(i).unwrap()) / params.radius;
            let c = cloud.color(i).unwrap();
            for ch in 0..3 {
                let expected = near[ch] + (far[ch] - near[ch]) * t;
                assert!((c[ch] - expected).abs() < 1e-3, "star {i} channel {ch}");
            }
        }
    }

    #[test]
    fn three_branches_make_three_arms() {
        // radius 5, 3 branches, spin 0.1: undo the spin and bucket angles into 12 sectors.
        let params = StarfieldParams {
            count: 3000,
            branches: 3,
            radius: 5.0,
            spin: 0.1,
            ..Default::default()
        };
        let cloud = generate(&params, &mut Rng::new(77)).unwrap();
        let mut sectors = [0usize; 12];
        for i in 0..cloud.len() {
            let p = cloud.position(i).unwrap();
            let r = planar_radius(p);
            if r < 0.5 {
                continue;
            }
            let unspun = (p[2].atan2(p[0]) - r * params.spin).rem_euclid(TAU);
            // Center the arm at the middle of its sector.
            let sector = ((unspun + TAU / 24.0) / (TAU / 12.0)) as usize % 12;
            sectors[sector] += 1;
        }
        let on_arms: usize = [0, 4, 8].iter().map(|&s| sectors[s]).sum();
        let total: usize = sectors.iter().sum();
        assert!(on_arms * 3 > total * 2, "arms hold {on_arms} of {total}: {sectors:?}");
        for arm in [0, 4, 8] {
            assert!(sectors[arm] * 4 > on_arms, "arm {arm} underpopulated: {sectors:?}");
        }
    }

    #[test]
    fn regenerate_replaces_cloud_and_bumps_generation() {
        let mut field = Starfield::new(9);
        assert_eq!(field.generation(), 0);
        assert_eq!(field.star_count(), 0);
        assert!(field.positions_ptr().is_null());

        field.regenerate(&StarfieldParams { count: 100, ..Default::default() }).unwrap();
        assert_eq!(field.generation(), 1);
        assert_eq!(field.star_count(), 100);

        field.regenerate(&StarfieldParams { count: 40, size: 0.05, ..Default::default() }).unwrap();
        assert_eq!(field.generation(), 2);
        assert_eq!(field.star_count(), 40);
        assert_eq!(field.point_size(), 0.05);
    }

    #[test]
    fn regenerate_to_zero_stars_attaches_empty_cloud() {
        let mut field = Starfield::new(9);
        field.regenerate(&StarfieldParams { count: 10, ..Default::default() }).unwrap();
        let cloud = field.regenerate(&StarfieldParams { count: 0, ..Default::default() }).unwrap();
        assert!(cloud.is_empty());
        assert_eq!(field.generation(), 2);
        assert_eq!(field.star_count(), 0);
        assert!(field.cloud().is_some());
    }

    #[test]
    fn failed_regenerate_keeps_previous_cloud() {
        let mut field = Starfield::new(9);
        field.regenerate(&StarfieldParams { count: 10, ..Default::default() }).unwrap();
        let err = field
            .regenerate(&StarfieldParams { branches: 0, ..Default::default() })
            .unwrap_err();
        assert_eq!(err, StarfieldError::ZeroBranches);
        assert_eq!(field.generation(), 1);
        assert_eq!(field.star_count(), 10);
    }

    #[test]
    fn consecutive_regenerations_draw_fresh_randomness() {
        let mut field = Starfield::new(9);
        let params = StarfieldParams { count: 50, ..Default::default() };
        let first = field.regenerate(&params).unwrap().clone();
        let second = field.regenerate(&params).unwrap();
        assert_eq!(first.len(), second.len());
        assert_ne!(&first, second);
    }

    #[test]
    fn release_detaches_cloud() {
        let mut field = Starfield::new(1);
        field.regenerate(&StarfieldParams { count: 5, ..Default::default() }).unwrap();
        field.release();
        assert!(field.cloud().is_none());
        assert_eq!(field.generation(), 2);
        field.release();
        assert_eq!(field.generation(), 2);
    }

    #[test]
    fn params_deserialize_with_panel_keys() {
        let json = r##"{ "count": 200, "randomnessPower": 2.5, "colorNear": "#ffffff" }"##;
        let params: StarfieldParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.count, 200);
        assert_eq!(params.randomness_power, 2.5);
        assert_eq!(params.color_near, Color::WHITE);
        assert_eq!(params.branches, 3);
    }
}
