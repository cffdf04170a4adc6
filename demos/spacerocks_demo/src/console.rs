use anyhow::Result;
use log::info;
use spacerocks::{Frame, KindTag, Renderer};

/// Stands in for a window: reports the scene through the logger.
pub struct ConsoleRenderer {
    every: u64,
    ship_seen: bool,
}

impl ConsoleRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            ship_seen: true,
        }
    }
}

impl Renderer for ConsoleRenderer {
    fn draw(&mut self, frame: &Frame) -> Result<()> {
        let ship = frame.ship();
        if self.ship_seen && ship.is_none() {
            info!("tick {}: the ship is gone", frame.tick);
        }
        self.ship_seen = ship.is_some();

        if frame.tick % self.every == 0 {
            let heading = ship
                .map(|view| format!("{:.0} deg", -view.rotation_degrees()))
                .unwrap_or_else(|| "-".into());
            info!(
                "tick {:>5} | asteroids {} | bullets {} | heading {}",
                frame.tick,
                frame.count(KindTag::Asteroid),
                frame.count(KindTag::Bullet),
                heading
            );
        }
        Ok(())
    }
}
