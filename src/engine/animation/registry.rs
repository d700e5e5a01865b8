// Name -> clip registry

use super::{AnimationClip, AnimationError};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of loaded animation clips, keyed by name
///
/// Filled in as clip assets finish loading. The state machine only reads it.
#[derive(Debug, Default, Clone)]
pub struct AnimationRegistry {
    clips: HashMap<String, Arc<AnimationClip>>,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a clip under its own name, replacing any earlier clip with that name
    pub fn insert(&mut self, clip: AnimationClip) -> Arc<AnimationClip> {
        let clip = Arc::new(clip);
        if self
            .clips
            .insert(clip.name.clone(), Arc::clone(&clip))
            .is_some()
        {
            log::warn!("Replacing already registered clip '{}'", clip.name);
        }
        clip
    }

    /// Look up a clip that must already be loaded
    pub fn require(&self, name: &str) -> Result<&Arc<AnimationClip>, AnimationError> {
        self.clips
            .get(name)
            .ok_or_else(|| AnimationError::MissingClip(name.to_string()))
    }

    /// Duration of a loaded clip
    pub fn duration(&self, name: &str) -> Result<f32, AnimationError> {
        self.require(name).map(|clip| clip.duration)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(name: &str, duration: f32) -> AnimationClip {
        AnimationClip::new(name, duration).unwrap()
    }

    #[test]
    fn test_empty_registry() {
        let registry = AnimationRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.require("idle").is_err());
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut registry = AnimationRegistry::new();
        registry.insert(clip("idle", 2.0));

        assert!(registry.contains("idle"));
        assert_eq!(registry.duration("idle"), Ok(2.0));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_require_missing_clip() {
        let registry = AnimationRegistry::new();
        assert_eq!(
            registry.require("attack").unwrap_err(),
            AnimationError::MissingClip("attack".to_string())
        );
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut registry = AnimationRegistry::new();
        registry.insert(clip("walk", 1.0));
        registry.insert(clip("walk", 1.5));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.duration("walk"), Ok(1.5));
    }
}
