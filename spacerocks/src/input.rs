use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// A logical game control, independent of whatever device produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Control {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
    Quit,
}

/// A key transition reported by an input device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
    /// Window close or similar; always means quit regardless of bindings.
    CloseRequested,
}

/// Tracks control state across ticks.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    controls_down: HashSet<Control>,
    controls_pressed: HashSet<Control>,
    controls_released: HashSet<Control>,
    quit_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-tick pressed/released flags.
    pub fn begin_frame(&mut self) {
        self.controls_pressed.clear();
        self.controls_released.clear();
    }

    pub fn press(&mut self, control: Control) {
        if !self.controls_down.contains(&control) {
            self.controls_pressed.insert(control);
        }
        self.controls_down.insert(control);
        if control == Control::Quit {
            self.quit_requested = true;
        }
    }

    pub fn release(&mut self, control: Control) {
        self.controls_down.remove(&control);
        self.controls_released.insert(control);
    }

    /// Feed a device event through `bindings`. Unbound keys are ignored.
    pub fn handle_event(&mut self, bindings: &KeyBindings, event: &KeyEvent) {
        match event {
            KeyEvent::Pressed(key) => {
                if let Some(control) = bindings.control_for(key) {
                    self.press(control);
                }
            }
            KeyEvent::Released(key) => {
                if let Some(control) = bindings.control_for(key) {
                    self.release(control);
                }
            }
            KeyEvent::CloseRequested => self.quit_requested = true,
        }
    }

    /// Returns true if the control is currently held.
    pub fn is_down(&self, control: Control) -> bool {
        self.controls_down.contains(&control)
    }

    /// Returns true if the control went down this tick.
    pub fn is_pressed(&self, control: Control) -> bool {
        self.controls_pressed.contains(&control)
    }

    /// Returns true if the control went up this tick.
    pub fn is_released(&self, control: Control) -> bool {
        self.controls_released.contains(&control)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Collapse the current state into the commands the world applies this tick.
    ///
    /// Turning and thrust repeat while held; firing happens once per press.
    pub fn tick_input(&self) -> TickInput {
        let rotate = if self.is_down(Control::RotateRight) {
            Some(Turn::Clockwise)
        } else if self.is_down(Control::RotateLeft) {
            Some(Turn::CounterClockwise)
        } else {
            None
        };
        TickInput {
            rotate,
            thrust: self.is_down(Control::Thrust),
            fire: self.is_pressed(Control::Fire),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
}

/// Commands applied to the spaceship during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub rotate: Option<Turn>,
    pub thrust: bool,
    pub fire: bool,
}

impl TickInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn fire() -> Self {
        Self {
            fire: true,
            ..Self::default()
        }
    }
}

/// Maps device key names to controls.
///
/// Key names are whatever the input device reports (`"ArrowLeft"`, `"Space"`,
/// ...). Several keys may map to the same control.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    keys: BTreeMap<String, Control>,
}

impl KeyBindings {
    /// Create an empty binding table.
    pub fn empty() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    /// Bind a key to a control, replacing any previous binding for that key.
    pub fn bind(&mut self, key: impl Into<String>, control: Control) {
        self.keys.insert(key.into(), control);
    }

    #[must_use]
    pub fn with_binding(mut self, key: impl Into<String>, control: Control) -> Self {
        self.bind(key, control);
        self
    }

    pub fn control_for(&self, key: &str) -> Option<Control> {
        self.keys.get(key).copied()
    }

    /// All keys bound to `control`, in name order.
    pub fn keys_for(&self, control: Control) -> Vec<&str> {
        self.keys
            .iter()
            .filter(|(_, bound)| **bound == control)
            .map(|(key, _)| key.as_str())
            .collect()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::empty()
            .with_binding("ArrowLeft", Control::RotateLeft)
            .with_binding("ArrowRight", Control::RotateRight)
            .with_binding("ArrowUp", Control::Thrust)
            .with_binding("Space", Control::Fire)
            .with_binding("Escape", Control::Quit)
    }
}

/// Something the frame driver can poll for device events once per tick.
pub trait InputSource {
    fn poll(&mut self, tick: u64) -> Vec<KeyEvent>;
}
