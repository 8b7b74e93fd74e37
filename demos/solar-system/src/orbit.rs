//! Orbit kinematics as pure functions of time and parameters.
//!
//! Three angles accumulate at their own speeds: the whole solar group turns
//! (earth revolution), the earth group spins (earth rotation) and the earth
//! orbit group turns (moon revolution). Reading the speeds every step means a
//! slider change bends the motion from that moment on without a jump.
//!
//! Angles are kept in `[0, TAU)` and time in `f64`, so a scene left running for
//! weeks still moves by the full frame delta.

use std::f32::consts::TAU;

use glam::Vec3;
use orrery_engine::LocalTransform;

use crate::bodies::PERSON_SCALE;
use crate::params::OrbitParams;

/// Accumulated orbit angles (radians) after `elapsed` seconds of simulation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitState {
    pub solar_angle: f32,
    pub earth_spin: f32,
    pub moon_angle: f32,
    pub elapsed: f64,
}

/// Local transforms for every moving node of the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneTransforms {
    pub solar_orbit: LocalTransform,
    pub earth_orbit: LocalTransform,
    pub earth_group: LocalTransform,
    pub earth: LocalTransform,
    pub person: LocalTransform,
    pub moon: LocalTransform,
}

impl OrbitState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `elapsed`. Time never runs backwards: an earlier timestamp
    /// leaves the angles where they are.
    pub fn step(&self, params: &OrbitParams, elapsed: f64) -> OrbitState {
        let dt = (elapsed - self.elapsed).max(0.0);
        OrbitState {
            elapsed: self.elapsed.max(elapsed),
            ..self.turn(params, dt as f32)
        }
    }

    /// Advance by one frame of `dt` seconds. Negative deltas are ignored.
    pub fn advance(&self, params: &OrbitParams, dt: f32) -> OrbitState {
        let dt = dt.max(0.0);
        OrbitState {
            elapsed: self.elapsed + f64::from(dt),
            ..self.turn(params, dt)
        }
    }

    fn turn(&self, params: &OrbitParams, dt: f32) -> OrbitState {
        OrbitState {
            solar_angle: wrap(self.solar_angle + dt * params.earth_revolution_speed),
            earth_spin: wrap(self.earth_spin + dt * params.earth_rotation_speed),
            moon_angle: wrap(self.moon_angle + dt * params.moon_revolution),
            elapsed: self.elapsed,
        }
    }

    pub fn transforms(&self, params: &OrbitParams) -> SceneTransforms {
        SceneTransforms {
            solar_orbit: LocalTransform::new().with_rotation_y(self.solar_angle),
            earth_orbit: LocalTransform::new()
                .with_offset(Vec3::new(params.earth_distance, 0.0, 0.0))
                .with_rotation_y(self.moon_angle),
            earth_group: LocalTransform::new().with_rotation_y(self.earth_spin),
            earth: LocalTransform::new().with_uniform_scale(params.earth_size),
            // stands on the surface of the scaled unit sphere
            person: LocalTransform::new()
                .with_offset(Vec3::new(params.earth_size, 0.0, 0.0))
                .with_uniform_scale(PERSON_SCALE),
            moon: LocalTransform::new()
                .with_offset(Vec3::new(params.moon_distance, 0.0, 0.0))
                .with_uniform_scale(params.moon_size),
        }
    }
}

fn wrap(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn angles_advance_by_speed_times_delta() {
        let params = OrbitParams::default();
        let state = OrbitState::new().step(&params, 2.0);
        assert!(close(state.solar_angle, 0.2));
        assert!(close(state.earth_spin, 0.4));
        assert!(close(state.moon_angle, 2.0));
        assert_eq!(state.elapsed, 2.0);
    }

    #[test]
    fn step_is_pure() {
        let params = OrbitParams::default();
        let start = OrbitState::new();
        assert_eq!(start.step(&params, 1.0), start.step(&params, 1.0));
        assert_eq!(start, OrbitState::new());
    }

    #[test]
    fn speed_change_applies_from_now_on() {
        let mut params = OrbitParams::default();
        let a = OrbitState::new().step(&params, 1.0);
        params.moon_revolution = 0.0;
        let b = a.step(&params, 5.0);
        assert!(close(b.moon_angle, a.moon_angle));
        assert!(close(b.solar_angle, 0.5));
    }

    #[test]
    fn advance_matches_step() {
        let params = OrbitParams::default();
        let stepped = OrbitState::new().step(&params, 0.5);
        let advanced = OrbitState::new().advance(&params, 0.5);
        assert_eq!(stepped, advanced);
        assert_eq!(OrbitState::new().advance(&params, -1.0), OrbitState::new());
    }

    #[test]
    fn angles_stay_wrapped() {
        let params = OrbitParams { moon_revolution: 10.0, ..OrbitParams::default() };
        let state = OrbitState::new().step(&params, 100.0);
        assert!((0.0..TAU).contains(&state.moon_angle));
        assert!(close(state.moon_angle, 1000f32.rem_euclid(TAU)));
    }

    #[test]
    fn frames_still_turn_after_a_week() {
        let params = OrbitParams::default();
        let mut state = OrbitState { moon_angle: 3.0, elapsed: 604_800.0, ..OrbitState::new() };
        for _ in 0..600 {
            state = state.advance(&params, 1.0 / 60.0);
        }
        // ten seconds at 1 rad/s
        assert!((state.moon_angle - 13f32.rem_euclid(TAU)).abs() < 1e-3, "{}", state.moon_angle);
        assert!((state.elapsed - 604_810.0).abs() < 1e-3);

        let stepped = OrbitState { elapsed: 604_800.0, ..OrbitState::new() }.step(&params, 604_801.0);
        assert!(close(stepped.moon_angle, 1.0));
    }

    #[test]
    fn earlier_timestamp_does_not_rewind() {
        let params = OrbitParams::default();
        let a = OrbitState::new().step(&params, 3.0);
        let b = a.step(&params, 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_speeds_freeze_motion() {
        let params = OrbitParams {
            earth_revolution_speed: 0.0,
            earth_rotation_speed: 0.0,
            moon_revolution: 0.0,
            ..OrbitParams::default()
        };
        let state = OrbitState::new().step(&params, 100.0);
        assert_eq!(state.solar_angle, 0.0);
        assert_eq!(state.earth_spin, 0.0);
        assert_eq!(state.moon_angle, 0.0);
    }

    #[test]
    fn transforms_place_bodies() {
        let params = OrbitParams { earth_size: 2.0, ..OrbitParams::default() };
        let t = OrbitState::new().transforms(&params);
        assert_eq!(t.earth_orbit.offset, Vec3::new(6.0, 0.0, 0.0));
        assert_eq!(t.earth.scale, Vec3::splat(2.0));
        assert_eq!(t.person.offset, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(t.person.scale, Vec3::splat(0.1));
        assert_eq!(t.moon.offset, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(t.moon.scale, Vec3::splat(0.2));
    }

    #[test]
    fn earth_orbits_sun_after_quarter_turn() {
        let params = OrbitParams {
            earth_revolution_speed: 1.0,
            ..OrbitParams::default()
        };
        let state = OrbitState::new().step(&params, std::f64::consts::FRAC_PI_2);
        let t = state.transforms(&params);
        let earth_center = t.solar_orbit.matrix() * t.earth_orbit.matrix();
        let pos = earth_center.w_axis.truncate();
        // rotating +X by +90° about Y lands on -Z
        assert!(close(pos.x, 0.0));
        assert!(close(pos.z, -6.0));
    }
}
