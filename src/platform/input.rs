//! Keyboard state to per-tick input
//!
//! Held keys (movement, fire, afterburner) are sampled every tick. Weapon
//! switching, pause and restart are presses: they latch until the tick that
//! consumes them, and key repeat never re-triggers them.

use winit::keyboard::KeyCode;

use crate::sim::TickInput;

/// Game actions bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Fire,
    Afterburner,
    PrevWeapon,
    NextWeapon,
    Pause,
    Restart,
    Quit,
}

/// Fixed key bindings
pub fn action_for(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::ArrowLeft | KeyCode::KeyA => Some(Action::Left),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(Action::Right),
        KeyCode::Space => Some(Action::Fire),
        KeyCode::ControlLeft | KeyCode::ControlRight => Some(Action::Afterburner),
        KeyCode::KeyQ => Some(Action::PrevWeapon),
        KeyCode::KeyE => Some(Action::NextWeapon),
        KeyCode::KeyP => Some(Action::Pause),
        KeyCode::KeyR | KeyCode::Enter | KeyCode::NumpadEnter => Some(Action::Restart),
        KeyCode::Escape => Some(Action::Quit),
        _ => None,
    }
}

/// Current keyboard state
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    fire: bool,
    afterburner: bool,
    // Latched presses, cleared once a tick has seen them
    switch_weapon: i32,
    pause: bool,
    restart: bool,
}

impl InputState {
    /// Apply a key press or release
    pub fn handle(&mut self, action: Action, pressed: bool, repeat: bool) {
        match action {
            Action::Left => self.left = pressed,
            Action::Right => self.right = pressed,
            Action::Fire => self.fire = pressed,
            Action::Afterburner => self.afterburner = pressed,
            Action::PrevWeapon if pressed && !repeat => self.switch_weapon = -1,
            Action::NextWeapon if pressed && !repeat => self.switch_weapon = 1,
            Action::Pause if pressed && !repeat => self.pause = !self.pause,
            Action::Restart if pressed && !repeat => self.restart = true,
            _ => {}
        }
    }

    /// Snapshot for the next simulation tick
    pub fn tick_input(&self) -> TickInput {
        let move_x = match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        TickInput {
            move_x,
            fire: self.fire,
            afterburner: self.afterburner,
            switch_weapon: self.switch_weapon,
            pause: self.pause,
            restart: self.restart,
        }
    }

    /// Forget presses a tick has already consumed
    pub fn clear_edges(&mut self) {
        self.switch_weapon = 0;
        self.pause = false;
        self.restart = false;
    }

    /// Drop everything, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}
