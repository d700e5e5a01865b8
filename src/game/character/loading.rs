// Clip loading progress
//
// The character is only started once every clip it animates has arrived.

use super::states::{ATTACK, IDLE, RUN, WALK};
use crate::engine::animation::{AnimationClip, AnimationError};
use std::collections::HashSet;

/// Clips the character needs, with their cycle lengths in seconds
pub const CHARACTER_CLIPS: [(&str, f32); 4] = [
    (IDLE, 2.5),
    (WALK, 1.1),
    (RUN, 0.7),
    (ATTACK, 1.6),
];

/// Build the built-in clip set
pub fn standard_clips() -> Result<Vec<AnimationClip>, AnimationError> {
    CHARACTER_CLIPS
        .iter()
        .map(|&(name, duration)| AnimationClip::new(name, duration))
        .collect()
}

/// Tracks which expected clips are still outstanding
#[derive(Debug, Clone)]
pub struct ClipLoadTracker {
    pending: HashSet<String>,
    expected: usize,
    completed: bool,
}

impl Default for ClipLoadTracker {
    fn default() -> Self {
        Self::new(CHARACTER_CLIPS.iter().map(|&(name, _)| name))
    }
}

impl ClipLoadTracker {
    pub fn new<'a>(expected: impl IntoIterator<Item = &'a str>) -> Self {
        let pending: HashSet<String> = expected.into_iter().map(str::to_string).collect();
        Self {
            expected: pending.len(),
            pending,
            completed: false,
        }
    }

    /// Record a loaded clip
    ///
    /// Returns true exactly once: on the call that completes the set.
    /// Unexpected and repeated names are ignored.
    pub fn mark_loaded(&mut self, name: &str) -> bool {
        if !self.pending.remove(name) {
            log::debug!("Clip '{}' was not pending", name);
            return false;
        }

        if self.pending.is_empty() && !self.completed {
            self.completed = true;
            return true;
        }
        false
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    /// Names still outstanding, sorted
    pub fn pending(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.pending.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Fraction of expected clips loaded, in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.expected == 0 {
            return 1.0;
        }
        (self.expected - self.pending.len()) as f32 / self.expected as f32
    }
}
