// Reference animation mixer
//
// One action per clip. Each action owns its playback clock, weight and speed;
// fades and warps are linear ramps advanced once per `update`.

use super::player::{AnimationPlayer, FinishedEvent, ListenerId, LoopMode};
use super::{AnimationClip, AnimationError};
use crate::core::math::{lerp, progress, wrap_time};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Linear ramp of a value over a fixed duration
#[derive(Debug, Clone, Copy, PartialEq)]
struct Ramp {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

impl Ramp {
    fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            duration,
        }
    }

    /// Advance the ramp, returning the current value and whether it has completed
    fn advance(&mut self, dt: f32) -> (f32, bool) {
        self.elapsed += dt;
        let t = progress(self.elapsed, self.duration);
        (lerp(self.from, self.to, t), t >= 1.0)
    }
}

/// Playback state of a single clip inside the mixer
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    pub time: f32,
    pub time_scale: f32,
    pub weight: f32,
    pub loop_mode: LoopMode,
    pub clamp_when_finished: bool,
    pub enabled: bool,
    pub paused: bool,

    /// Set by `play`, cleared when the action stops
    scheduled: bool,
    weight_ramp: Option<Ramp>,
    time_scale_ramp: Option<Ramp>,
}

impl AnimationAction {
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            weight: 1.0,
            loop_mode: LoopMode::Repeat,
            clamp_when_finished: false,
            enabled: true,
            paused: false,
            scheduled: false,
            weight_ramp: None,
            time_scale_ramp: None,
        }
    }

    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    pub fn is_running(&self) -> bool {
        self.enabled && self.scheduled && !self.paused
    }

    pub fn is_fading(&self) -> bool {
        self.weight_ramp.is_some()
    }

    fn play(&mut self) {
        self.enabled = true;
        self.scheduled = true;
    }

    fn stop(&mut self) {
        self.enabled = false;
        self.scheduled = false;
        self.weight_ramp = None;
        self.time_scale_ramp = None;
    }

    fn reset(&mut self) {
        self.time = 0.0;
        self.time_scale = 1.0;
        self.weight = 1.0;
        self.enabled = true;
        self.paused = false;
        self.weight_ramp = None;
        self.time_scale_ramp = None;
    }

    fn fade_in(&mut self, duration: f32) {
        self.enabled = true;
        self.weight = 0.0;
        self.weight_ramp = Some(Ramp::new(0.0, 1.0, duration));
    }

    fn fade_out(&mut self, duration: f32) {
        self.weight_ramp = Some(Ramp::new(self.weight, 0.0, duration));
    }

    fn warp(&mut self, from_scale: f32, to_scale: f32, duration: f32) {
        self.time_scale = from_scale;
        self.time_scale_ramp = Some(Ramp::new(from_scale, to_scale, duration));
    }

    /// Advance the action, returning true if a `Once` playback just finished
    fn update(&mut self, dt: f32) -> bool {
        if !self.enabled || !self.scheduled {
            return false;
        }

        if let Some(ramp) = self.weight_ramp.as_mut() {
            let (weight, done) = ramp.advance(dt);
            self.weight = weight;
            if done {
                self.weight_ramp = None;
                if weight <= 0.0 {
                    // Faded out completely
                    self.stop();
                    return false;
                }
            }
        }

        if let Some(ramp) = self.time_scale_ramp.as_mut() {
            let (scale, done) = ramp.advance(dt);
            self.time_scale = scale;
            if done {
                self.time_scale_ramp = None;
            }
        }

        if self.paused {
            return false;
        }

        let duration = self.clip.duration;
        self.time += dt * self.time_scale;

        match self.loop_mode {
            LoopMode::Repeat => {
                self.time = wrap_time(self.time, duration);
                false
            }
            LoopMode::Once => {
                if self.time < duration {
                    return false;
                }
                self.time = duration;
                if self.clamp_when_finished {
                    self.paused = true;
                } else {
                    self.enabled = false;
                    self.scheduled = false;
                }
                true
            }
        }
    }
}

/// Mixer owning one action per registered clip
#[derive(Debug, Default)]
pub struct AnimationMixer {
    /// Keyed by clip name; sorted so finished events come out in a stable order
    actions: BTreeMap<String, AnimationAction>,
    listeners: HashMap<String, Vec<ListenerId>>,
    next_listener: u64,
}

impl AnimationMixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the action for a clip
    pub fn add_clip(&mut self, clip: Arc<AnimationClip>) -> &mut AnimationAction {
        self.actions
            .entry(clip.name.clone())
            .or_insert_with(|| AnimationAction::new(clip))
    }

    pub fn action(&self, clip: &str) -> Option<&AnimationAction> {
        self.actions.get(clip)
    }

    /// Number of listeners currently registered for a clip
    pub fn listener_count(&self, clip: &str) -> usize {
        self.listeners.get(clip).map_or(0, Vec::len)
    }

    fn action_ref(&self, clip: &str) -> Result<&AnimationAction, AnimationError> {
        self.actions
            .get(clip)
            .ok_or_else(|| AnimationError::MissingClip(clip.to_string()))
    }

    fn action_mut(&mut self, clip: &str) -> Result<&mut AnimationAction, AnimationError> {
        self.actions
            .get_mut(clip)
            .ok_or_else(|| AnimationError::MissingClip(clip.to_string()))
    }
}

impl AnimationPlayer for AnimationMixer {
    fn load_clip(&mut self, clip: Arc<AnimationClip>) {
        self.add_clip(clip);
    }

    fn play(&mut self, clip: &str) -> Result<(), AnimationError> {
        self.action_mut(clip)?.play();
        Ok(())
    }

    fn reset(&mut self, clip: &str) -> Result<(), AnimationError> {
        self.action_mut(clip)?.reset();
        Ok(())
    }

    fn cross_fade_from(
        &mut self,
        clip: &str,
        from: &str,
        duration: f32,
        with_warping: bool,
    ) -> Result<(), AnimationError> {
        let fade_in_duration = self.action_ref(clip)?.clip.duration;
        let fade_out_duration = self.action_ref(from)?.clip.duration;

        let outgoing = self.action_mut(from)?;
        outgoing.fade_out(duration);
        if with_warping {
            outgoing.warp(1.0, fade_out_duration / fade_in_duration, duration);
        }

        let incoming = self.action_mut(clip)?;
        incoming.fade_in(duration);
        if with_warping {
            incoming.warp(fade_in_duration / fade_out_duration, 1.0, duration);
        }

        log::trace!("Cross-fading '{}' -> '{}' over {}s", from, clip, duration);
        Ok(())
    }

    fn set_loop(&mut self, clip: &str, mode: LoopMode) -> Result<(), AnimationError> {
        self.action_mut(clip)?.loop_mode = mode;
        Ok(())
    }

    fn set_clamp_when_finished(&mut self, clip: &str, clamp: bool) -> Result<(), AnimationError> {
        self.action_mut(clip)?.clamp_when_finished = clamp;
        Ok(())
    }

    fn set_time(&mut self, clip: &str, seconds: f32) -> Result<(), AnimationError> {
        self.action_mut(clip)?.time = seconds;
        Ok(())
    }

    fn time(&self, clip: &str) -> Result<f32, AnimationError> {
        Ok(self.action_ref(clip)?.time)
    }

    fn duration(&self, clip: &str) -> Result<f32, AnimationError> {
        Ok(self.action_ref(clip)?.clip.duration)
    }

    fn set_time_scale(&mut self, clip: &str, scale: f32) -> Result<(), AnimationError> {
        let action = self.action_mut(clip)?;
        action.time_scale = scale;
        action.time_scale_ramp = None;
        Ok(())
    }

    fn set_weight(&mut self, clip: &str, weight: f32) -> Result<(), AnimationError> {
        let action = self.action_mut(clip)?;
        action.weight = weight;
        action.weight_ramp = None;
        Ok(())
    }

    fn weight(&self, clip: &str) -> Result<f32, AnimationError> {
        Ok(self.action_ref(clip)?.weight)
    }

    fn is_running(&self, clip: &str) -> Result<bool, AnimationError> {
        Ok(self.action_ref(clip)?.is_running())
    }

    fn add_finished_listener(&mut self, clip: &str) -> Result<ListenerId, AnimationError> {
        self.action_ref(clip)?;

        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.entry(clip.to_string()).or_default().push(id);
        Ok(id)
    }

    fn remove_finished_listener(&mut self, clip: &str, listener: ListenerId) {
        if let Some(ids) = self.listeners.get_mut(clip) {
            ids.retain(|id| *id != listener);
            if ids.is_empty() {
                self.listeners.remove(clip);
            }
        }
    }

    fn update(&mut self, dt: f32) -> Vec<FinishedEvent> {
        let mut events = Vec::new();

        for (name, action) in &mut self.actions {
            if action.update(dt) {
                if let Some(ids) = self.listeners.get(name) {
                    events.extend(ids.iter().map(|&listener| FinishedEvent {
                        clip: name.clone(),
                        listener,
                    }));
                }
            }
        }

        events
    }
}
