use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::config::{Bounds, GameConfig, SpriteSizes};
use crate::error::ConfigError;
use crate::input::{TickInput, Turn};
use crate::math::Vec2;
use crate::object::GameObject;
use crate::random::Randomizer;
use crate::render::{EntityView, Frame};
use crate::ship::{ShipControls, SpawnRequest};

/// Unique identifier for an entity in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Get the underlying integer ID (useful for debugging or serialization).
    pub fn to_u32(self) -> u32 {
        self.0
    }

    pub(crate) fn from_u32(raw: u32) -> Self {
        Self(raw)
    }
}

/// A live object together with its identity.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub object: GameObject,
}

/// Whether the player still has a ship. There is no win/lose state beyond this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Session {
    Running,
    ShipDestroyed,
}

/// What happened during one call to [`World::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub bullets_fired: usize,
    pub ship_destroyed: bool,
    pub asteroids_destroyed: usize,
    /// Bullets removed for leaving the play-field.
    pub bullets_expired: usize,
}

/// Owns every entity and advances the simulation one tick at a time.
///
/// A tick runs in a fixed order:
/// 1. fire, turn and thrust the ship, then spawn whatever it asked for
/// 2. move everything
/// 3. ship against asteroids, then bullets against asteroids
/// 4. drop bullets that left the play-field
///
/// The result is exposed through [`World::frame`] for rendering.
pub struct World {
    bounds: Bounds,
    sprites: SpriteSizes,
    ship_controls: ShipControls,
    next_id: u32,
    tick: u64,
    ship: Option<Entity>,
    asteroids: Vec<Entity>,
    bullets: Vec<Entity>,
    pending_spawns: Vec<SpawnRequest>,
}

impl World {
    /// Create an empty world with the play-field and sprite sizes from `config`.
    pub fn empty(config: &GameConfig) -> Self {
        debug_assert!(
            config.bounds.width > 0 && config.bounds.height > 0,
            "play-field must have an area"
        );
        Self {
            bounds: config.bounds,
            sprites: config.sprites,
            ship_controls: config.ship,
            next_id: 1,
            tick: 0,
            ship: None,
            asteroids: Vec::new(),
            bullets: Vec::new(),
            pending_spawns: Vec::new(),
        }
    }

    /// Set up a fresh session: the ship in the middle and asteroids scattered
    /// at least `spawn_clearance` away from it.
    pub fn new(config: &GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut random = Randomizer::new(seed);
        let mut world = Self::empty(config);
        let ship_position = config.bounds.center();
        world.spawn_ship(ship_position);

        for _ in 0..config.asteroid_count {
            let mut rejected = 0u32;
            let position = loop {
                let candidate = random.random_position(config.bounds);
                if candidate.distance(ship_position) > config.spawn_clearance {
                    break candidate;
                }
                rejected += 1;
            };
            trace!("placed asteroid at {position:?} after {rejected} rejections");
            let asteroid = GameObject::drifting_asteroid(
                position,
                world.sprites.asteroid_radius(),
                &mut random,
                config.asteroid_min_speed,
                config.asteroid_max_speed,
            );
            world.insert_asteroid(asteroid);
        }

        info!(
            "session started with seed {seed}: {} asteroids on a {}x{} field",
            world.asteroids.len(),
            config.bounds.width,
            config.bounds.height
        );
        Ok(world)
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    /// Place the ship, replacing any existing one.
    pub fn spawn_ship(&mut self, position: Vec2) -> EntityId {
        let id = self.allocate_id();
        let object =
            GameObject::spaceship(position, self.sprites.spaceship_radius(), self.ship_controls);
        self.ship = Some(Entity { id, object });
        id
    }

    pub fn spawn_asteroid(&mut self, position: Vec2, velocity: Vec2) -> EntityId {
        let radius = self.sprites.asteroid_radius();
        self.insert_asteroid(GameObject::asteroid(position, velocity, radius))
    }

    /// Add an asteroid built elsewhere, e.g. with a custom radius.
    pub fn insert_asteroid(&mut self, object: GameObject) -> EntityId {
        let id = self.allocate_id();
        self.asteroids.push(Entity { id, object });
        id
    }

    pub fn spawn_bullet(&mut self, position: Vec2, velocity: Vec2) -> EntityId {
        let id = self.allocate_id();
        let object = GameObject::bullet(position, velocity, self.sprites.bullet_radius());
        self.bullets.push(Entity { id, object });
        id
    }

    fn drain_spawns(&mut self) -> usize {
        let requests = std::mem::take(&mut self.pending_spawns);
        let count = requests.len();
        for request in requests {
            match request {
                SpawnRequest::Bullet { position, velocity } => {
                    let id = self.spawn_bullet(position, velocity);
                    debug!("bullet {} fired from {position:?}", id.to_u32());
                }
            }
        }
        count
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self, input: &TickInput) -> TickReport {
        self.tick += 1;
        let mut report = TickReport {
            tick: self.tick,
            ..TickReport::default()
        };

        self.apply_input(input);
        report.bullets_fired = self.drain_spawns();

        let bounds = self.bounds;
        for entity in self
            .ship
            .iter_mut()
            .chain(self.asteroids.iter_mut())
            .chain(self.bullets.iter_mut())
        {
            entity.object.move_within(bounds);
        }

        report.ship_destroyed = self.resolve_ship_collisions();
        report.asteroids_destroyed = self.resolve_bullet_collisions();

        let before = self.bullets.len();
        self.bullets.retain(|bullet| bullet.object.is_within(bounds));
        report.bullets_expired = before - self.bullets.len();

        trace!("{report:?}");
        report
    }

    // Firing reads the ship before this tick's turn and thrust are applied.
    fn apply_input(&mut self, input: &TickInput) {
        let Some(ship) = self.ship.as_mut() else {
            return;
        };
        if input.fire {
            if let Some(request) = ship.object.shoot() {
                self.pending_spawns.push(request);
            }
        }
        match input.rotate {
            Some(Turn::Clockwise) => ship.object.rotate(true),
            Some(Turn::CounterClockwise) => ship.object.rotate(false),
            None => {}
        }
        if input.thrust {
            ship.object.accelerate();
        }
    }

    fn resolve_ship_collisions(&mut self) -> bool {
        let hit = self.ship.as_ref().and_then(|ship| {
            self.asteroids
                .iter()
                .find(|asteroid| asteroid.object.collides_with(&ship.object))
                .map(|asteroid| (ship.id, asteroid.id))
        });
        match hit {
            Some((ship_id, asteroid_id)) => {
                info!(
                    "ship {} destroyed by asteroid {} on tick {}",
                    ship_id.to_u32(),
                    asteroid_id.to_u32(),
                    self.tick
                );
                self.ship = None;
                true
            }
            None => false,
        }
    }

    // Each bullet takes out at most one asteroid, and an asteroid can only be
    // destroyed once. Removal happens after the scan.
    fn resolve_bullet_collisions(&mut self) -> usize {
        let mut asteroid_alive = vec![true; self.asteroids.len()];
        let mut bullet_alive = vec![true; self.bullets.len()];

        for (bullet_idx, bullet) in self.bullets.iter().enumerate() {
            let hit = self.asteroids.iter().enumerate().find(|(asteroid_idx, asteroid)| {
                asteroid_alive[*asteroid_idx] && asteroid.object.collides_with(&bullet.object)
            });
            if let Some((asteroid_idx, asteroid)) = hit {
                debug!(
                    "bullet {} destroyed asteroid {}",
                    bullet.id.to_u32(),
                    asteroid.id.to_u32()
                );
                asteroid_alive[asteroid_idx] = false;
                bullet_alive[bullet_idx] = false;
            }
        }

        let destroyed = asteroid_alive.iter().filter(|alive| !**alive).count();
        let mut asteroid_flags = asteroid_alive.into_iter();
        self.asteroids
            .retain(|_| asteroid_flags.next().unwrap_or(true));
        let mut bullet_flags = bullet_alive.into_iter();
        self.bullets.retain(|_| bullet_flags.next().unwrap_or(true));
        destroyed
    }

    pub fn session(&self) -> Session {
        if self.ship.is_some() {
            Session::Running
        } else {
            Session::ShipDestroyed
        }
    }

    pub fn ship(&self) -> Option<&Entity> {
        self.ship.as_ref()
    }

    pub fn ship_mut(&mut self) -> Option<&mut Entity> {
        self.ship.as_mut()
    }

    pub fn asteroids(&self) -> &[Entity] {
        &self.asteroids
    }

    pub fn bullets(&self) -> &[Entity] {
        &self.bullets
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of ticks advanced so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.asteroids.len() + self.bullets.len() + usize::from(self.ship.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live entities in draw order: asteroids, bullets, then the ship.
    pub fn entities(&self) -> Vec<EntityView> {
        self.asteroids
            .iter()
            .chain(self.bullets.iter())
            .chain(self.ship.iter())
            .map(EntityView::from)
            .collect()
    }

    pub fn frame(&self) -> Frame {
        Frame {
            tick: self.tick,
            bounds: self.bounds,
            entities: self.entities(),
        }
    }
}
