// Animation playback system
//
// Clips are registered by name as they finish loading. Playback goes through
// the `AnimationPlayer` capability set so the state machine never depends on a
// concrete mixer.
//
// ## Architecture
//
// - `clip`: Named, fixed-duration clip descriptions
// - `registry`: Name -> clip lookup populated as clips arrive
// - `player`: The `AnimationPlayer` trait plus loop modes and finished events
// - `mixer`: Reference `AnimationPlayer` with weight fades and warped cross-fades

mod clip;
mod mixer;
mod player;
mod registry;

pub use clip::AnimationClip;
pub use mixer::{AnimationAction, AnimationMixer};
pub use player::{AnimationPlayer, FinishedEvent, ListenerId, LoopMode};
pub use registry::AnimationRegistry;

/// Animation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnimationError {
    #[error("Animation clip not found: {0}")]
    MissingClip(String),

    #[error("Invalid clip duration for {name}: {duration}")]
    InvalidDuration { name: String, duration: f32 },
}
