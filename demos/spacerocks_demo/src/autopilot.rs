use spacerocks::{InputSource, KeyEvent};

/// Plays the game with a fixed rhythm: turn right in short bursts, tap fire,
/// and give the occasional shove of thrust. Deterministic for a given tick.
pub struct Autopilot {
    fire_every: u64,
    turn_every: u64,
    thrust_every: u64,
}

impl Autopilot {
    pub fn new() -> Self {
        Self {
            fire_every: 20,
            turn_every: 40,
            thrust_every: 120,
        }
    }
}

fn tap(events: &mut Vec<KeyEvent>, key: &str, phase: u64, held_for: u64) {
    if phase == 0 {
        events.push(KeyEvent::Pressed(key.into()));
    } else if phase == held_for {
        events.push(KeyEvent::Released(key.into()));
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, tick: u64) -> Vec<KeyEvent> {
        let mut events = Vec::new();
        tap(&mut events, "Space", tick % self.fire_every, 1);
        tap(&mut events, "ArrowRight", tick % self.turn_every, 3);
        tap(&mut events, "ArrowUp", (tick + 10) % self.thrust_every, 4);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taps_fire_then_lets_go() {
        let mut pilot = Autopilot::new();
        assert!(pilot.poll(0).contains(&KeyEvent::Pressed("Space".into())));
        assert!(pilot.poll(1).contains(&KeyEvent::Released("Space".into())));
        assert!(!pilot.poll(2).iter().any(|e| matches!(e, KeyEvent::Pressed(k) if k == "Space")));
    }
}
