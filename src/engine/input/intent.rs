// Character intents and the per-frame input snapshot

use winit::keyboard::KeyCode;

/// Something the player wants the character to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    // Movement
    Forward,
    Backward,
    Left,
    Right,

    // Modifiers and actions
    Sprint,
    Attack,
}

impl Intent {
    pub const ALL: [Intent; 6] = [
        Intent::Forward,
        Intent::Backward,
        Intent::Left,
        Intent::Right,
        Intent::Sprint,
        Intent::Attack,
    ];
}

/// Boolean intents read once per frame and passed by value into the state machine
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputSnapshot {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    pub attack: bool,
}

impl InputSnapshot {
    /// Build a snapshot with the given intents held
    pub fn from_intents(intents: impl IntoIterator<Item = Intent>) -> Self {
        let mut snapshot = Self::default();
        for intent in intents {
            snapshot.set(intent, true);
        }
        snapshot
    }

    pub fn set(&mut self, intent: Intent, held: bool) {
        match intent {
            Intent::Forward => self.forward = held,
            Intent::Backward => self.backward = held,
            Intent::Left => self.left = held,
            Intent::Right => self.right = held,
            Intent::Sprint => self.sprint = held,
            Intent::Attack => self.attack = held,
        }
    }

    pub fn is_held(&self, intent: Intent) -> bool {
        match intent {
            Intent::Forward => self.forward,
            Intent::Backward => self.backward,
            Intent::Left => self.left,
            Intent::Right => self.right,
            Intent::Sprint => self.sprint,
            Intent::Attack => self.attack,
        }
    }

    /// Forward or backward is held
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward
    }
}

/// Default keyboard bindings (WASD to move, Space to attack, Shift to sprint)
pub fn default_bindings() -> Vec<(KeyCode, Intent)> {
    vec![
        (KeyCode::KeyW, Intent::Forward),
        (KeyCode::KeyS, Intent::Backward),
        (KeyCode::KeyA, Intent::Left),
        (KeyCode::KeyD, Intent::Right),
        (KeyCode::Space, Intent::Attack),
        (KeyCode::ShiftLeft, Intent::Sprint),
        (KeyCode::ShiftRight, Intent::Sprint),
    ]
}
