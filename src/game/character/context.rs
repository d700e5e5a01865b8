// Animation context shared by the character states

use crate::engine::animation::{AnimationClip, AnimationMixer, AnimationPlayer, AnimationRegistry};
use std::fmt;
use std::sync::Arc;

/// Loaded clips plus the player that animates them
///
/// Owned by the character controller and lent to the state machine on every
/// call. States read the registry and drive the player.
pub struct AnimationContext {
    pub registry: AnimationRegistry,
    pub player: Box<dyn AnimationPlayer>,
}

impl AnimationContext {
    pub fn new(player: Box<dyn AnimationPlayer>) -> Self {
        Self {
            registry: AnimationRegistry::new(),
            player,
        }
    }

    /// Register a freshly loaded clip and make it playable
    pub fn add_clip(&mut self, clip: AnimationClip) -> Arc<AnimationClip> {
        let clip = self.registry.insert(clip);
        self.player.load_clip(Arc::clone(&clip));
        clip
    }
}

impl Default for AnimationContext {
    fn default() -> Self {
        Self::new(Box::new(AnimationMixer::new()))
    }
}

impl fmt::Debug for AnimationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationContext")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
