// Character controller
//
// Owns the animation context, the state machine and the character's motion,
// and drives them in a fixed order every step.

use super::context::AnimationContext;
use super::fsm::CharacterFsm;
use super::loading::ClipLoadTracker;
use super::movement::{CharacterMotion, MovementStats};
use crate::engine::animation::{AnimationClip, AnimationPlayer};
use crate::engine::input::InputSnapshot;
use crate::engine::state_machine::StateMachineError;

/// A player-controlled animated character
#[derive(Debug)]
pub struct CharacterController {
    animations: AnimationContext,
    fsm: CharacterFsm,
    motion: CharacterMotion,
    loader: ClipLoadTracker,
}

impl CharacterController {
    pub fn new(player: Box<dyn AnimationPlayer>) -> Self {
        Self::with_stats(player, MovementStats::default())
    }

    pub fn with_stats(player: Box<dyn AnimationPlayer>, stats: MovementStats) -> Self {
        Self {
            animations: AnimationContext::new(player),
            fsm: CharacterFsm::new(),
            motion: CharacterMotion::new(stats),
            loader: ClipLoadTracker::default(),
        }
    }

    /// Register a loaded clip; the last expected clip starts the character in Idle
    pub fn clip_loaded(&mut self, clip: AnimationClip) -> Result<(), StateMachineError> {
        let name = clip.name.clone();
        if self.animations.registry.contains(&name) {
            log::debug!("Reloading clip '{}'", name);
        }
        self.animations.add_clip(clip);
        let completed = self.loader.mark_loaded(&name);

        log::debug!(
            "Loaded clip '{}' ({} registered, {:.0}%)",
            name,
            self.animations.registry.len(),
            self.loader.progress() * 100.0
        );

        if completed {
            log::info!("All character clips loaded, entering idle");
            self.fsm.start(&mut self.animations)?;
        }
        Ok(())
    }

    /// Whether the state machine is running
    pub fn is_ready(&self) -> bool {
        self.fsm.is_started()
    }

    /// Advance one step: pick the state, move, then play the animations
    ///
    /// Does nothing until every clip has loaded.
    pub fn update(&mut self, dt: f32, input: &InputSnapshot) -> Result<(), StateMachineError> {
        if !self.fsm.is_started() {
            return Ok(());
        }

        self.fsm.update(dt, input, &mut self.animations)?;
        self.motion.update(dt, input, self.fsm.is_attacking());

        for event in self.animations.player.update(dt) {
            log::trace!("Clip '{}' finished", event.clip);
            self.fsm.handle_finished(&event, &mut self.animations)?;
        }
        Ok(())
    }

    /// Name of the current state, if started
    pub fn state(&self) -> Option<&'static str> {
        self.fsm.current_name()
    }

    pub fn fsm(&self) -> &CharacterFsm {
        &self.fsm
    }

    pub fn motion(&self) -> &CharacterMotion {
        &self.motion
    }

    pub fn animations(&self) -> &AnimationContext {
        &self.animations
    }

    pub fn loading_progress(&self) -> f32 {
        self.loader.progress()
    }

    /// Short status for display: the current state, or load progress before start
    pub fn status(&self) -> String {
        match self.state() {
            Some(name) => name.to_string(),
            None => format!("loading {:.0}%", self.loading_progress() * 100.0),
        }
    }
}

impl Default for CharacterController {
    fn default() -> Self {
        Self::new(Box::new(crate::engine::animation::AnimationMixer::new()))
    }
}
