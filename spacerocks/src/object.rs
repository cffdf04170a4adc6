//! The common entity record shared by every simulated object.
//!
//! Variant-specific data and behavior hang off [`ObjectKind`]; there is no
//! per-type trait object. The world dispatches on the tag.

use serde::{Deserialize, Serialize};

use crate::config::Bounds;
use crate::math::{Vec2, UP};
use crate::random::Randomizer;
use crate::ship::ShipControls;

/// Variant tag plus the data only that variant carries.
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectKind {
    Spaceship(ShipControls),
    Asteroid,
    Bullet,
}

/// Data-free discriminant of [`ObjectKind`], handed to renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KindTag {
    Spaceship,
    Asteroid,
    Bullet,
}

/// A simulated body: centre, per-tick displacement, collision radius and facing.
#[derive(Clone, Debug, PartialEq)]
pub struct GameObject {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// Unit facing. Only the spaceship's affects physics; the rest is for drawing.
    pub direction: Vec2,
    pub kind: ObjectKind,
}

impl GameObject {
    fn new(position: Vec2, velocity: Vec2, radius: f32, kind: ObjectKind) -> Self {
        debug_assert!(radius >= 0.0, "negative radius {radius}");
        debug_assert!(
            position.x.is_finite() && position.y.is_finite(),
            "non-finite position {position:?}"
        );
        Self {
            position,
            velocity,
            radius,
            direction: UP,
            kind,
        }
    }

    /// A stationary ship facing up.
    pub fn spaceship(position: Vec2, radius: f32, controls: ShipControls) -> Self {
        Self::new(position, Vec2::ZERO, radius, ObjectKind::Spaceship(controls))
    }

    pub fn asteroid(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self::new(position, velocity, radius, ObjectKind::Asteroid)
    }

    /// An asteroid drifting at a random whole-number speed in
    /// `[min_speed, max_speed]` and a random whole-degree heading.
    pub fn drifting_asteroid(
        position: Vec2,
        radius: f32,
        random: &mut Randomizer,
        min_speed: u32,
        max_speed: u32,
    ) -> Self {
        let velocity = random.random_velocity(min_speed, max_speed);
        Self::asteroid(position, velocity, radius)
    }

    pub fn bullet(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self::new(position, velocity, radius, ObjectKind::Bullet)
    }

    pub fn tag(&self) -> KindTag {
        match self.kind {
            ObjectKind::Spaceship(_) => KindTag::Spaceship,
            ObjectKind::Asteroid => KindTag::Asteroid,
            ObjectKind::Bullet => KindTag::Bullet,
        }
    }

    pub fn is_spaceship(&self) -> bool {
        matches!(self.kind, ObjectKind::Spaceship(_))
    }

    /// Bullets fly straight off the field; everything else lives on a torus.
    pub fn wraps(&self) -> bool {
        !matches!(self.kind, ObjectKind::Bullet)
    }

    /// Advance one tick: integrate velocity, then wrap if this kind wraps.
    pub fn move_within(&mut self, bounds: Bounds) {
        let next = self.position + self.velocity;
        self.position = if self.wraps() {
            next.wrapped(bounds.width_f32(), bounds.height_f32())
        } else {
            next
        };
        debug_assert!(
            self.position.x.is_finite() && self.position.y.is_finite(),
            "non-finite position {:?}",
            self.position
        );
    }

    /// Strict overlap: touching circles do not collide.
    pub fn collides_with(&self, other: &GameObject) -> bool {
        self.position.distance(other.position) < self.radius + other.radius
    }

    pub fn is_within(&self, bounds: Bounds) -> bool {
        bounds.contains(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn rock(x: f32, y: f32, radius: f32) -> GameObject {
        GameObject::asteroid(Vec2::new(x, y), Vec2::ZERO, radius)
    }

    #[test]
    fn move_wraps_negative_coordinates() {
        let bounds = Bounds::new(800, 600);
        let mut asteroid = GameObject::asteroid(Vec2::new(1.0, 2.0), Vec2::new(-3.0, -5.0), 10.0);
        asteroid.move_within(bounds);
        assert_abs_diff_eq!(asteroid.position.x, 798.0, epsilon = 1e-4);
        assert_abs_diff_eq!(asteroid.position.y, 597.0, epsilon = 1e-4);
    }

    #[test]
    fn move_wrap_invariant_holds_for_many_inputs() {
        let bounds = Bounds::new(800, 600);
        let samples = [-2500.0_f32, -800.0, -0.5, 0.0, 0.25, 399.0, 799.99, 800.0, 1601.0];
        for &px in &samples {
            for &vx in &samples {
                let mut ship = GameObject::spaceship(
                    Vec2::new(px, px * 0.5),
                    24.0,
                    ShipControls::default(),
                );
                ship.velocity = Vec2::new(vx, -vx);
                ship.move_within(bounds);
                assert!(
                    bounds.contains(ship.position),
                    "{px}/{vx} produced {:?}",
                    ship.position
                );
            }
        }
    }

    #[test]
    fn bullets_do_not_wrap() {
        let bounds = Bounds::new(800, 600);
        let mut bullet = GameObject::bullet(Vec2::new(799.0, 10.0), Vec2::new(3.0, 0.0), 4.0);
        bullet.move_within(bounds);
        assert_abs_diff_eq!(bullet.position.x, 802.0);
        assert!(!bullet.is_within(bounds));
    }

    #[test]
    fn collision_is_strict() {
        let a = rock(0.0, 0.0, 10.0);
        let touching = rock(30.0, 0.0, 20.0);
        let overlapping = rock(29.9, 0.0, 20.0);
        assert!(!a.collides_with(&touching));
        assert!(a.collides_with(&overlapping));
    }

    #[test]
    fn collision_is_symmetric() {
        let objects = [
            rock(0.0, 0.0, 10.0),
            rock(12.0, 5.0, 3.0),
            GameObject::bullet(Vec2::new(5.0, 5.0), Vec2::ZERO, 4.0),
            GameObject::spaceship(Vec2::new(100.0, 0.0), 24.0, ShipControls::default()),
        ];
        for a in &objects {
            for b in &objects {
                assert_eq!(a.collides_with(b), b.collides_with(a));
            }
        }
    }

    #[test]
    fn drifting_asteroids_keep_their_position() {
        let mut random = Randomizer::new(3);
        let asteroid = GameObject::drifting_asteroid(Vec2::new(10.0, 20.0), 48.0, &mut random, 1, 3);
        assert_eq!(asteroid.position, Vec2::new(10.0, 20.0));
        let speed = asteroid.velocity.length();
        assert!(speed > 0.999 && speed < 3.001, "speed {speed}");
    }

    #[test]
    fn new_objects_face_up() {
        assert_eq!(rock(1.0, 1.0, 1.0).direction, UP);
        assert_eq!(rock(1.0, 1.0, 1.0).tag(), KindTag::Asteroid);
    }
}
