//! Seeded random placement and velocity generation.

use crate::config::Bounds;
use crate::math::Vec2;

/// Deterministic random source. The same seed always yields the same session.
#[derive(Clone, Debug)]
pub struct Randomizer {
    rng: fastrand::Rng,
}

impl Randomizer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Uniform whole-pixel point in `[0, width) x [0, height)`.
    pub fn random_position(&mut self, bounds: Bounds) -> Vec2 {
        Vec2::new(
            self.rng.u32(0..bounds.width) as f32,
            self.rng.u32(0..bounds.height) as f32,
        )
    }

    /// Velocity with a whole-number speed in `[min_speed, max_speed]` and a
    /// whole-degree heading in `[0, 360)`.
    pub fn random_velocity(&mut self, min_speed: u32, max_speed: u32) -> Vec2 {
        let speed = self.rng.u32(min_speed..=max_speed);
        let heading = self.rng.u32(0..360);
        Vec2::new(speed as f32, 0.0).rotated(heading as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_stay_inside_bounds() {
        let mut random = Randomizer::new(7);
        let bounds = Bounds::new(800, 600);
        for _ in 0..1_000 {
            let p = random.random_position(bounds);
            assert!(bounds.contains(p), "{p:?} escaped the play-field");
            assert_eq!(p.x.fract(), 0.0);
            assert_eq!(p.y.fract(), 0.0);
        }
    }

    #[test]
    fn velocity_speed_is_a_whole_number_in_range() {
        let mut random = Randomizer::new(11);
        let mut seen = [false; 4];
        for _ in 0..1_000 {
            let speed = random.random_velocity(1, 3).length();
            let rounded = speed.round();
            assert!((speed - rounded).abs() < 1e-4);
            assert!((1.0..=3.0).contains(&rounded));
            seen[rounded as usize] = true;
        }
        assert_eq!(seen, [false, true, true, true]);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Randomizer::new(42);
        let mut b = Randomizer::new(42);
        let bounds = Bounds::default();
        for _ in 0..16 {
            assert_eq!(a.random_position(bounds), b.random_position(bounds));
            assert_eq!(a.random_velocity(1, 3), b.random_velocity(1, 3));
        }
    }
}
