//! Boundary between the simulation and whatever draws it.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::Bounds;
use crate::math::{Vec2, UP};
use crate::object::KindTag;
use crate::world::{Entity, EntityId};

/// Read-only snapshot of one live entity, enough to draw it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: KindTag,
    pub position: Vec2,
    pub radius: f32,
    pub direction: Vec2,
}

impl EntityView {
    /// Counter-clockwise sprite rotation, in degrees, that turns an upward-facing
    /// sprite to this entity's facing.
    pub fn rotation_degrees(&self) -> f32 {
        self.direction.angle_to(UP)
    }

    /// Top-left corner for blitting a sprite of `sprite_size` centred on the entity.
    pub fn blit_origin(&self, sprite_size: Vec2) -> Vec2 {
        self.position - sprite_size * 0.5
    }
}

impl From<&Entity> for EntityView {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            kind: entity.object.tag(),
            position: entity.object.position,
            radius: entity.object.radius,
            direction: entity.object.direction,
        }
    }
}

/// Everything handed to a renderer for one tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub bounds: Bounds,
    /// Asteroids first, then bullets, then the ship if it is still alive.
    pub entities: Vec<EntityView>,
}

impl Frame {
    pub fn count(&self, kind: KindTag) -> usize {
        self.entities.iter().filter(|view| view.kind == kind).count()
    }

    pub fn ship(&self) -> Option<&EntityView> {
        self.entities
            .iter()
            .find(|view| view.kind == KindTag::Spaceship)
    }
}

/// Presentation layer. Called once per tick after the world has advanced.
pub trait Renderer {
    fn draw(&mut self, frame: &Frame) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn view(direction: Vec2) -> EntityView {
        EntityView {
            id: EntityId::from_u32(1),
            kind: KindTag::Spaceship,
            position: Vec2::new(400.0, 300.0),
            radius: 24.0,
            direction,
        }
    }

    #[test]
    fn upward_facing_needs_no_rotation() {
        assert_abs_diff_eq!(view(UP).rotation_degrees(), 0.0);
    }

    #[test]
    fn clockwise_turn_is_drawn_as_negative_rotation() {
        let turned = view(UP.rotated(30.0));
        assert_abs_diff_eq!(turned.rotation_degrees(), -30.0, epsilon = 1e-4);
    }

    #[test]
    fn blit_origin_centres_the_sprite() {
        assert_eq!(
            view(UP).blit_origin(Vec2::new(48.0, 48.0)),
            Vec2::new(376.0, 276.0)
        );
    }
}
