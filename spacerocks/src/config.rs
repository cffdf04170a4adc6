use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input::{Control, KeyBindings};
use crate::math::Vec2;
use crate::ship::ShipControls;

/// Fixed-size play-field. Everything simulated lives in `[0, width) x [0, height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width_f32() * 0.5, self.height_f32() * 0.5)
    }

    /// Half-open containment test.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.width_f32()
            && point.y < self.height_f32()
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Square sprite footprints in pixels. Collision radii are half the width.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSizes {
    pub spaceship: f32,
    pub asteroid: f32,
    pub bullet: f32,
}

impl SpriteSizes {
    pub fn spaceship_radius(&self) -> f32 {
        self.spaceship / 2.0
    }

    pub fn asteroid_radius(&self) -> f32 {
        self.asteroid / 2.0
    }

    pub fn bullet_radius(&self) -> f32 {
        self.bullet / 2.0
    }
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            spaceship: 48.0,
            asteroid: 96.0,
            bullet: 8.0,
        }
    }
}

/// Everything a session needs to know up front.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub bounds: Bounds,
    /// Target ticks per second for the frame driver. The world itself ignores time.
    pub tick_rate: u32,
    pub asteroid_count: usize,
    /// Asteroids never start this close (or closer) to the ship.
    pub spawn_clearance: f32,
    pub asteroid_min_speed: u32,
    pub asteroid_max_speed: u32,
    pub ship: ShipControls,
    pub sprites: SpriteSizes,
    pub bindings: KeyBindings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Spaceoids".into(),
            bounds: Bounds::default(),
            tick_rate: 60,
            asteroid_count: 6,
            spawn_clearance: 250.0,
            asteroid_min_speed: 1,
            asteroid_max_speed: 3,
            ship: ShipControls::default(),
            sprites: SpriteSizes::default(),
            bindings: KeyBindings::default(),
        }
    }
}

impl GameConfig {
    /// Override the title reported to the presentation layer.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Override the play-field size.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.bounds = Bounds::new(width, height);
        self
    }

    #[must_use]
    pub fn with_tick_rate(mut self, tick_rate: u32) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    #[must_use]
    pub fn with_asteroid_count(mut self, count: usize) -> Self {
        self.asteroid_count = count;
        self
    }

    #[must_use]
    pub fn with_sprites(mut self, sprites: SpriteSizes) -> Self {
        self.sprites = sprites;
        self
    }

    /// Check that a world can actually be built from this config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bounds.width == 0 || self.bounds.height == 0 {
            return Err(ConfigError::invalid(
                "bounds",
                format!("{}x{} has no area", self.bounds.width, self.bounds.height),
            ));
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::invalid("tick_rate", "must be at least 1"));
        }
        if self.asteroid_min_speed > self.asteroid_max_speed {
            return Err(ConfigError::invalid(
                "asteroid_min_speed",
                format!(
                    "{} is above asteroid_max_speed {}",
                    self.asteroid_min_speed, self.asteroid_max_speed
                ),
            ));
        }
        for (field, size) in [
            ("sprites.spaceship", self.sprites.spaceship),
            ("sprites.asteroid", self.sprites.asteroid),
            ("sprites.bullet", self.sprites.bullet),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(ConfigError::invalid(field, format!("{size} is not a positive size")));
            }
        }
        if !self.spawn_clearance.is_finite() || self.spawn_clearance < 0.0 {
            return Err(ConfigError::invalid(
                "spawn_clearance",
                format!("{} is not a non-negative distance", self.spawn_clearance),
            ));
        }
        // The (0, 0) corner is the farthest spawnable point from the centre.
        let reach = self.bounds.center().length();
        if self.asteroid_count > 0 && self.spawn_clearance >= reach {
            return Err(ConfigError::invalid(
                "spawn_clearance",
                format!(
                    "{} leaves no room for asteroids (farthest point is {reach})",
                    self.spawn_clearance
                ),
            ));
        }
        self.ship.validate()?;

        if self.asteroid_count > 0 && self.spawn_clearance > reach * 0.9 {
            warn!(
                "spawn_clearance {} is close to the field's reach {reach}; placement may take many draws",
                self.spawn_clearance
            );
        }
        if self.bindings.keys_for(Control::Quit).is_empty() {
            warn!("no key is bound to quit");
        }
        Ok(())
    }

    /// Serialize this config to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }
}
