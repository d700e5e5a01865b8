// Animation player capability set

use super::{AnimationClip, AnimationError};
use std::sync::Arc;

/// How a clip behaves when playback reaches its end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Play through once, then finish
    Once,
    /// Wrap back to the start forever
    #[default]
    Repeat,
}

/// Token identifying one registered "clip finished" listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Notification that a one-shot clip reached its end
///
/// One event is produced per listener registered on the clip at the time it
/// finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedEvent {
    pub clip: String,
    pub listener: ListenerId,
}

/// Playback operations the character state machine needs from an animation backend
///
/// Every clip-addressed call fails with [`AnimationError::MissingClip`] when the
/// clip has not been loaded yet.
pub trait AnimationPlayer {
    /// Make a freshly loaded clip playable; loading a known clip again keeps its playback state
    fn load_clip(&mut self, clip: Arc<AnimationClip>);

    /// Start (or keep) the clip running
    fn play(&mut self, clip: &str) -> Result<(), AnimationError>;

    /// Rewind the clip to time 0 at full weight and speed, clearing any pending fades
    fn reset(&mut self, clip: &str) -> Result<(), AnimationError>;

    /// Fade `clip` in while fading `from` out over `duration` seconds
    ///
    /// With `with_warping`, the playback speed of both clips is blended so their
    /// cycles line up over the fade.
    fn cross_fade_from(
        &mut self,
        clip: &str,
        from: &str,
        duration: f32,
        with_warping: bool,
    ) -> Result<(), AnimationError>;

    fn set_loop(&mut self, clip: &str, mode: LoopMode) -> Result<(), AnimationError>;

    /// Keep the last pose (instead of disabling the clip) when a `Once` clip ends
    fn set_clamp_when_finished(&mut self, clip: &str, clamp: bool) -> Result<(), AnimationError>;

    fn set_time(&mut self, clip: &str, seconds: f32) -> Result<(), AnimationError>;

    fn time(&self, clip: &str) -> Result<f32, AnimationError>;

    fn duration(&self, clip: &str) -> Result<f32, AnimationError>;

    fn set_time_scale(&mut self, clip: &str, scale: f32) -> Result<(), AnimationError>;

    fn set_weight(&mut self, clip: &str, weight: f32) -> Result<(), AnimationError>;

    fn weight(&self, clip: &str) -> Result<f32, AnimationError>;

    /// Whether the clip is enabled and advancing
    fn is_running(&self, clip: &str) -> Result<bool, AnimationError>;

    /// Register a listener notified when `clip` finishes a `Once` playback
    fn add_finished_listener(&mut self, clip: &str) -> Result<ListenerId, AnimationError>;

    /// Unregister a listener; removing an unknown listener is a no-op
    fn remove_finished_listener(&mut self, clip: &str, listener: ListenerId);

    /// Advance every clip by `dt` seconds, returning the finished notifications
    ///
    /// Events are ordered by clip name, then by listener registration order.
    fn update(&mut self, dt: f32) -> Vec<FinishedEvent>;
}
