// Key binding configuration and remapping

use super::intent::{default_bindings, Intent};
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Maps physical keys to character intents
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Mapping from keys to intents
    bindings: HashMap<KeyCode, Intent>,

    /// Reverse mapping for quick lookups (intent -> all keys)
    intent_to_keys: HashMap<Intent, Vec<KeyCode>>,
}

impl InputConfig {
    /// Create a configuration with no bindings
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
            intent_to_keys: HashMap::new(),
        }
    }

    /// Create a configuration from a list of bindings
    pub fn from_bindings(bindings: Vec<(KeyCode, Intent)>) -> Self {
        let mut config = Self::empty();
        for (key, intent) in bindings {
            config.bind(key, intent);
        }
        config
    }

    /// Bind a key to an intent
    pub fn bind(&mut self, key: KeyCode, intent: Intent) {
        // A key drives at most one intent
        self.unbind_key(key);

        self.bindings.insert(key, intent);
        self.intent_to_keys.entry(intent).or_default().push(key);
    }

    /// Unbind a key
    pub fn unbind_key(&mut self, key: KeyCode) {
        if let Some(intent) = self.bindings.remove(&key) {
            if let Some(keys) = self.intent_to_keys.get_mut(&intent) {
                keys.retain(|k| *k != key);
                if keys.is_empty() {
                    self.intent_to_keys.remove(&intent);
                }
            }
        }
    }

    /// Unbind all keys for an intent
    pub fn unbind_intent(&mut self, intent: Intent) {
        if let Some(keys) = self.intent_to_keys.remove(&intent) {
            for key in keys {
                self.bindings.remove(&key);
            }
        }
    }

    /// Get the intent bound to a key
    pub fn intent_for(&self, key: KeyCode) -> Option<Intent> {
        self.bindings.get(&key).copied()
    }

    /// Get all keys bound to an intent
    pub fn keys_for(&self, intent: Intent) -> Vec<KeyCode> {
        self.intent_to_keys
            .get(&intent)
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_bound(&self, key: KeyCode) -> bool {
        self.bindings.contains_key(&key)
    }

    pub fn has_binding(&self, intent: Intent) -> bool {
        self.intent_to_keys.contains_key(&intent)
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
        self.intent_to_keys.clear();
    }

    /// Restore the default WASD / Space / Shift layout
    pub fn reset_to_defaults(&mut self) {
        self.clear();
        for (key, intent) in default_bindings() {
            self.bind(key, intent);
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}
