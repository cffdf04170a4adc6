//! Spacerocks - simulation core for a small wraparound asteroids game.
//!
//! The crate owns motion, wrapping, collisions and the entity lifecycle.
//! Windowing, sprites and drawing live behind the [`Renderer`] and
//! [`InputSource`] traits.

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod math;
pub mod object;
pub mod random;
pub mod render;
pub mod ship;
pub mod world;

pub use crate::config::{Bounds, GameConfig, SpriteSizes};
pub use crate::engine::{Engine, FrameClock, RunSummary};
pub use crate::error::ConfigError;
pub use crate::input::{Control, InputSource, InputState, KeyBindings, KeyEvent, TickInput, Turn};
pub use crate::math::{Vec2, UP};
pub use crate::object::{GameObject, KindTag, ObjectKind};
pub use crate::random::Randomizer;
pub use crate::render::{EntityView, Frame, Renderer};
pub use crate::ship::{ShipControls, SpawnRequest};
pub use crate::world::{Entity, EntityId, Session, TickReport, World};
