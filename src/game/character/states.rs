// Character animation states
//
// Each state plays the clip registered under its own name, so the previous
// state's name is also the clip to fade out of.

use super::context::AnimationContext;
use crate::engine::animation::{FinishedEvent, ListenerId, LoopMode};
use crate::engine::input::InputSnapshot;
use crate::engine::state_machine::{State, StateMachineError};

pub const IDLE: &str = "idle";
pub const WALK: &str = "walk";
pub const RUN: &str = "run";
pub const ATTACK: &str = "attack";

/// Cross-fade between locomotion clips (seconds)
pub const LOCOMOTION_FADE: f32 = 0.5;
/// Cross-fade into the attack clip (seconds); leaving it uses the locomotion fade
pub const ATTACK_FADE: f32 = 0.2;

type Previous<'a> = Option<&'a dyn State<AnimationContext>>;

/// Fade length for a transition into `to`, whatever it leaves
///
/// Only the attack snaps in quickly; recovering from it into idle blends as
/// slowly as any locomotion change.
pub fn fade_duration(to: &str) -> f32 {
    if to == ATTACK {
        ATTACK_FADE
    } else {
        LOCOMOTION_FADE
    }
}

/// Start a looping clip, fading out of the previous state's clip
///
/// When the previous clip is `phase_source`, the new clip picks up at the same
/// relative point of its cycle instead of restarting.
fn enter_looping(
    clip: &str,
    phase_source: Option<&str>,
    previous: Previous<'_>,
    ctx: &mut AnimationContext,
) -> Result<(), StateMachineError> {
    let registry = &ctx.registry;
    let player = ctx.player.as_mut();

    player.set_loop(clip, LoopMode::Repeat)?;

    if let Some(previous) = previous {
        let from = previous.name();

        if phase_source == Some(from) {
            let ratio = registry.duration(clip)? / registry.duration(from)?;
            let time = player.time(from)? * ratio;
            player.set_time(clip, time)?;
        } else {
            player.set_time(clip, 0.0)?;
            player.set_time_scale(clip, 1.0)?;
            player.set_weight(clip, 1.0)?;
        }

        player.cross_fade_from(clip, from, fade_duration(clip), true)?;
    }

    player.play(clip)?;
    Ok(())
}

/// Standing still
#[derive(Debug, Default)]
pub struct IdleState;

impl State<AnimationContext> for IdleState {
    fn name(&self) -> &'static str {
        IDLE
    }

    fn enter(
        &mut self,
        previous: Previous<'_>,
        ctx: &mut AnimationContext,
    ) -> Result<(), StateMachineError> {
        enter_looping(IDLE, None, previous, ctx)
    }

    fn update(
        &mut self,
        _dt: f32,
        input: &InputSnapshot,
        _ctx: &mut AnimationContext,
    ) -> Option<&'static str> {
        // Movement is checked first, so forward + attack walks
        if input.is_moving() {
            Some(WALK)
        } else if input.attack {
            Some(ATTACK)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct WalkState;

impl State<AnimationContext> for WalkState {
    fn name(&self) -> &'static str {
        WALK
    }

    fn enter(
        &mut self,
        previous: Previous<'_>,
        ctx: &mut AnimationContext,
    ) -> Result<(), StateMachineError> {
        enter_looping(WALK, Some(RUN), previous, ctx)
    }

    fn update(
        &mut self,
        _dt: f32,
        input: &InputSnapshot,
        _ctx: &mut AnimationContext,
    ) -> Option<&'static str> {
        if !input.is_moving() {
            Some(IDLE)
        } else if input.sprint {
            Some(RUN)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct RunState;

impl State<AnimationContext> for RunState {
    fn name(&self) -> &'static str {
        RUN
    }

    fn enter(
        &mut self,
        previous: Previous<'_>,
        ctx: &mut AnimationContext,
    ) -> Result<(), StateMachineError> {
        enter_looping(RUN, Some(WALK), previous, ctx)
    }

    fn update(
        &mut self,
        _dt: f32,
        input: &InputSnapshot,
        _ctx: &mut AnimationContext,
    ) -> Option<&'static str> {
        if !input.is_moving() {
            Some(IDLE)
        } else if !input.sprint {
            Some(WALK)
        } else {
            None
        }
    }
}

/// One-shot attack; returns to idle when its clip finishes
///
/// Input is ignored while attacking. The finished listener is held only while
/// the state is current.
#[derive(Debug, Default)]
pub struct AttackState {
    listener: Option<ListenerId>,
}

impl AttackState {
    fn release_listener(&mut self, ctx: &mut AnimationContext) {
        if let Some(listener) = self.listener.take() {
            ctx.player.remove_finished_listener(ATTACK, listener);
        }
    }
}

impl State<AnimationContext> for AttackState {
    fn name(&self) -> &'static str {
        ATTACK
    }

    fn enter(
        &mut self,
        previous: Previous<'_>,
        ctx: &mut AnimationContext,
    ) -> Result<(), StateMachineError> {
        let player = ctx.player.as_mut();

        self.listener = Some(player.add_finished_listener(ATTACK)?);

        player.reset(ATTACK)?;
        player.set_loop(ATTACK, LoopMode::Once)?;
        player.set_clamp_when_finished(ATTACK, true)?;
        if let Some(previous) = previous {
            let from = previous.name();
            player.cross_fade_from(ATTACK, from, fade_duration(ATTACK), true)?;
        }
        player.play(ATTACK)?;
        Ok(())
    }

    fn exit(&mut self, ctx: &mut AnimationContext) {
        self.release_listener(ctx);
    }

    fn on_finished(
        &mut self,
        event: &FinishedEvent,
        ctx: &mut AnimationContext,
    ) -> Option<&'static str> {
        if self.listener != Some(event.listener) {
            log::warn!("Ignoring stale finished event for '{}'", event.clip);
            return None;
        }

        self.release_listener(ctx);
        Some(IDLE)
    }
}
