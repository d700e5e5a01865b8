// Animation clip descriptions

use super::AnimationError;

/// A named, fixed-duration animation clip
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    /// Name the clip is registered under (e.g., "idle", "walk", "attack")
    pub name: String,
    /// Length of one playback cycle in seconds
    pub duration: f32,
}

impl AnimationClip {
    /// Create a new clip, rejecting non-positive or non-finite durations
    pub fn new(name: &str, duration: f32) -> Result<Self, AnimationError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(AnimationError::InvalidDuration {
                name: name.to_string(),
                duration,
            });
        }

        Ok(Self {
            name: name.to_string(),
            duration,
        })
    }

    /// Create a clip from a frame count and sample rate
    pub fn from_frames(name: &str, frame_count: usize, fps: f32) -> Result<Self, AnimationError> {
        Self::new(name, frame_count as f32 / fps)
    }
}
