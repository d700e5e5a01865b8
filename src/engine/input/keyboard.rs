// Held-key tracking that produces one InputSnapshot per frame

use super::config::InputConfig;
use super::intent::InputSnapshot;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keyboard state for the local player
#[derive(Debug, Default)]
pub struct KeyboardInput {
    config: InputConfig,

    /// Bound keys currently held down
    held: HashSet<KeyCode>,
}

impl KeyboardInput {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            held: HashSet::new(),
        }
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Mutable access for remapping; held keys that lose their binding stop contributing
    pub fn config_mut(&mut self) -> &mut InputConfig {
        &mut self.config
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key) = event.physical_key {
            match event.state {
                ElementState::Pressed if !event.repeat => self.press(key),
                ElementState::Pressed => {}
                ElementState::Released => self.release(key),
            }
        }
    }

    /// Register a key press; unbound keys are ignored
    pub fn press(&mut self, key: KeyCode) {
        if self.config.is_bound(key) && self.held.insert(key) {
            log::trace!("Key pressed: {:?}", key);
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        if self.held.remove(&key) {
            log::trace!("Key released: {:?}", key);
        }
    }

    /// Release every key, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Intents implied by the keys held right now
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot::from_intents(
            self.held
                .iter()
                .filter_map(|&key| self.config.intent_for(key)),
        )
    }
}
