//! Spaceship behaviour: turning, thrust and firing.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::math::Vec2;
use crate::object::{GameObject, ObjectKind};

/// Handling constants carried by a spaceship.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipControls {
    /// Degrees turned per tick while a turn control is held.
    pub rotation_step: f32,
    /// Speed gained per tick of thrust. There is no top speed.
    pub acceleration: f32,
    pub bullet_speed: f32,
}

impl Default for ShipControls {
    fn default() -> Self {
        Self {
            rotation_step: 30.0,
            acceleration: 0.25,
            bullet_speed: 3.0,
        }
    }
}

impl ShipControls {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("ship.rotation_step", self.rotation_step),
            ("ship.acceleration", self.acceleration),
            ("ship.bullet_speed", self.bullet_speed),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, format!("{value} is not finite")));
            }
        }
        Ok(())
    }
}

/// An entity the world should create on behalf of another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpawnRequest {
    Bullet { position: Vec2, velocity: Vec2 },
}

impl GameObject {
    pub fn ship_controls(&self) -> Option<&ShipControls> {
        match &self.kind {
            ObjectKind::Spaceship(controls) => Some(controls),
            _ => None,
        }
    }

    /// Turn one step. No-op for anything that is not a spaceship.
    pub fn rotate(&mut self, clockwise: bool) {
        let Some(&controls) = self.ship_controls() else {
            return;
        };
        let angle = if clockwise {
            controls.rotation_step
        } else {
            -controls.rotation_step
        };
        self.direction.rotate_ip(angle);
    }

    /// Add one tick of thrust along the facing. No-op for non-ships.
    pub fn accelerate(&mut self) {
        let Some(&controls) = self.ship_controls() else {
            return;
        };
        self.velocity += self.direction * controls.acceleration;
    }

    /// Fire from the ship's current position. The bullet inherits the ship's velocity.
    pub fn shoot(&self) -> Option<SpawnRequest> {
        let controls = self.ship_controls()?;
        Some(SpawnRequest::Bullet {
            position: self.position,
            velocity: self.direction * controls.bullet_speed + self.velocity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::UP;
    use approx::assert_abs_diff_eq;

    fn ship() -> GameObject {
        GameObject::spaceship(Vec2::new(400.0, 300.0), 24.0, ShipControls::default())
    }

    #[test]
    fn shooting_from_rest_fires_straight_up() {
        let Some(SpawnRequest::Bullet { position, velocity }) = ship().shoot() else {
            panic!("a spaceship always fires");
        };
        assert_eq!(position, Vec2::new(400.0, 300.0));
        assert_abs_diff_eq!(velocity.x, 0.0);
        assert_abs_diff_eq!(velocity.y, -3.0);
    }

    #[test]
    fn bullets_inherit_ship_velocity() {
        let mut ship = ship();
        ship.velocity = Vec2::new(1.0, -2.0);
        let Some(SpawnRequest::Bullet { velocity, .. }) = ship.shoot() else {
            panic!("a spaceship always fires");
        };
        assert_abs_diff_eq!(velocity.x, 1.0);
        assert_abs_diff_eq!(velocity.y, -5.0);
    }

    #[test]
    fn rotation_steps_both_ways() {
        let mut ship = ship();
        ship.rotate(true);
        assert_abs_diff_eq!(ship.direction.x, 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(ship.direction.y, -(3.0_f32.sqrt()) / 2.0, epsilon = 1e-5);

        ship.rotate(false);
        ship.rotate(false);
        assert_abs_diff_eq!(ship.direction.x, -0.5, epsilon = 1e-5);
    }

    #[test]
    fn acceleration_is_uncapped() {
        let mut ship = ship();
        for _ in 0..1_000 {
            ship.accelerate();
        }
        assert_abs_diff_eq!(ship.velocity.y, -250.0, epsilon = 1e-2);
        assert_abs_diff_eq!(ship.velocity.x, 0.0);
    }

    #[test]
    fn non_ships_ignore_ship_controls() {
        let mut rock = GameObject::asteroid(Vec2::ZERO, Vec2::new(1.0, 0.0), 10.0);
        rock.rotate(true);
        rock.accelerate();
        assert_eq!(rock.direction, UP);
        assert_eq!(rock.velocity, Vec2::new(1.0, 0.0));
        assert!(rock.shoot().is_none());
    }
}
