// Character animation state machine

use super::context::AnimationContext;
use super::states::{AttackState, IdleState, RunState, WalkState, ATTACK, IDLE, RUN, WALK};
use crate::engine::animation::FinishedEvent;
use crate::engine::input::InputSnapshot;
use crate::engine::state_machine::{StateMachine, StateMachineError};

/// State machine selecting the character's clip from input and playback events
///
/// Registers Idle, Walk, Run and Attack up front but stays inert until
/// [`CharacterFsm::start`] is called, which the controller does once every clip
/// has loaded.
#[derive(Debug)]
pub struct CharacterFsm {
    machine: StateMachine<AnimationContext>,
}

impl Default for CharacterFsm {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterFsm {
    pub fn new() -> Self {
        let mut machine = StateMachine::new();
        machine.register_state(IDLE, || Box::new(IdleState));
        machine.register_state(WALK, || Box::new(WalkState));
        machine.register_state(RUN, || Box::new(RunState));
        machine.register_state(ATTACK, || Box::new(AttackState::default()));
        Self { machine }
    }

    /// Enter Idle
    pub fn start(&mut self, ctx: &mut AnimationContext) -> Result<(), StateMachineError> {
        self.set_state(IDLE, ctx)
    }

    pub fn set_state(
        &mut self,
        name: &str,
        ctx: &mut AnimationContext,
    ) -> Result<(), StateMachineError> {
        self.machine.set_state(name, ctx)
    }

    pub fn update(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        ctx: &mut AnimationContext,
    ) -> Result<(), StateMachineError> {
        self.machine.update(dt, input, ctx)
    }

    pub fn handle_finished(
        &mut self,
        event: &FinishedEvent,
        ctx: &mut AnimationContext,
    ) -> Result<(), StateMachineError> {
        self.machine.handle_finished(event, ctx)
    }

    pub fn is_started(&self) -> bool {
        self.machine.current_name().is_some()
    }

    pub fn current_name(&self) -> Option<&'static str> {
        self.machine.current_name()
    }

    pub fn is_attacking(&self) -> bool {
        self.current_name() == Some(ATTACK)
    }

    pub fn transition_count(&self) -> u64 {
        self.machine.transition_count()
    }

    pub fn machine(&self) -> &StateMachine<AnimationContext> {
        &self.machine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animation::{AnimationClip, AnimationError, ListenerId};
    use crate::engine::input::Intent;
    use approx::assert_relative_eq;

    const WALK_DURATION: f32 = 1.0;
    const RUN_DURATION: f32 = 0.6;
    const ATTACK_DURATION: f32 = 1.2;

    fn context() -> AnimationContext {
        let mut ctx = AnimationContext::default();
        for (name, duration) in [
            (IDLE, 2.0),
            (WALK, WALK_DURATION),
            (RUN, RUN_DURATION),
            (ATTACK, ATTACK_DURATION),
        ] {
            ctx.add_clip(AnimationClip::new(name, duration).unwrap());
        }
        ctx
    }

    fn started() -> (CharacterFsm, AnimationContext) {
        let mut fsm = CharacterFsm::new();
        let mut ctx = context();
        fsm.start(&mut ctx).unwrap();
        (fsm, ctx)
    }

    fn input(intents: &[Intent]) -> InputSnapshot {
        InputSnapshot::from_intents(intents.iter().copied())
    }

    /// Advance the player and feed its notifications back, as the controller does
    fn advance(fsm: &mut CharacterFsm, ctx: &mut AnimationContext, dt: f32) {
        for event in ctx.player.update(dt) {
            fsm.handle_finished(&event, ctx).unwrap();
        }
    }

    #[test]
    fn test_registers_four_states() {
        let fsm = CharacterFsm::new();
        for name in [IDLE, WALK, RUN, ATTACK] {
            assert!(fsm.machine().is_registered(name));
        }
        assert!(!fsm.machine().is_registered("jump"));
    }

    #[test]
    fn test_inert_until_started() {
        let mut fsm = CharacterFsm::new();
        let mut ctx = context();

        fsm.update(0.1, &input(&[Intent::Forward]), &mut ctx)
            .unwrap();
        assert!(!fsm.is_started());
        assert_eq!(ctx.player.is_running(IDLE), Ok(false));

        fsm.start(&mut ctx).unwrap();
        assert_eq!(fsm.current_name(), Some(IDLE));
        assert_eq!(ctx.player.is_running(IDLE), Ok(true));
    }

    #[test]
    fn test_start_without_clips_fails() {
        let mut fsm = CharacterFsm::new();
        let mut ctx = AnimationContext::default();

        assert_eq!(
            fsm.start(&mut ctx),
            Err(StateMachineError::Animation(AnimationError::MissingClip(
                IDLE.to_string()
            )))
        );
    }

    #[test]
    fn test_walk_run_idle_scenario() {
        let (mut fsm, mut ctx) = started();

        fsm.update(0.016, &input(&[Intent::Forward]), &mut ctx)
            .unwrap();
        assert_eq!(fsm.current_name(), Some(WALK));

        fsm.update(0.016, &input(&[Intent::Forward, Intent::Sprint]), &mut ctx)
            .unwrap();
        assert_eq!(fsm.current_name(), Some(RUN));

        fsm.update(0.016, &input(&[]), &mut ctx).unwrap();
        assert_eq!(fsm.current_name(), Some(IDLE));
        assert_eq!(fsm.transition_count(), 4);
    }

    #[test]
    fn test_repeated_input_does_not_restart() {
        let (mut fsm, mut ctx) = started();
        let forward = input(&[Intent::Forward]);

        fsm.update(0.016, &forward, &mut ctx).unwrap();
        advance(&mut fsm, &mut ctx, 0.25);
        let walk_time = ctx.player.time(WALK).unwrap();

        fsm.update(0.016, &forward, &mut ctx).unwrap();
        fsm.set_state(WALK, &mut ctx).unwrap();
        assert_eq!(fsm.transition_count(), 2);
        assert_eq!(ctx.player.time(WALK), Ok(walk_time));
    }

    #[test]
    fn test_forward_and_attack_walks() {
        let (mut fsm, mut ctx) = started();

        fsm.update(0.016, &input(&[Intent::Forward, Intent::Attack]), &mut ctx)
            .unwrap();
        assert_eq!(fsm.current_name(), Some(WALK));
    }

    #[test]
    fn test_run_to_walk_preserves_phase() {
        let (mut fsm, mut ctx) = started();
        fsm.set_state(WALK, &mut ctx).unwrap();
        fsm.set_state(RUN, &mut ctx).unwrap();

        ctx.player.set_time(RUN, 0.3).unwrap();
        fsm.update(0.016, &input(&[Intent::Forward]), &mut ctx)
            .unwrap();

        assert_eq!(fsm.current_name(), Some(WALK));
        assert_relative_eq!(ctx.player.time(WALK).unwrap(), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_walk_to_run_preserves_phase() {
        let (mut fsm, mut ctx) = started();
        fsm.set_state(WALK, &mut ctx).unwrap();

        ctx.player.set_time(WALK, 0.5).unwrap();
        fsm.update(0.016, &input(&[Intent::Forward, Intent::Sprint]), &mut ctx)
            .unwrap();

        assert_eq!(fsm.current_name(), Some(RUN));
        assert_relative_eq!(ctx.player.time(RUN).unwrap(), 0.3, epsilon = 1e-6);
    }

    #[test]
    fn test_idle_restarts_from_zero() {
        let (mut fsm, mut ctx) = started();
        advance(&mut fsm, &mut ctx, 0.7);
        fsm.set_state(WALK, &mut ctx).unwrap();
        advance(&mut fsm, &mut ctx, 0.2);

        fsm.set_state(IDLE, &mut ctx).unwrap();
        assert_eq!(ctx.player.time(IDLE), Ok(0.0));
    }

    #[test]
    fn test_idle_to_walk_cross_fades() {
        let (mut fsm, mut ctx) = started();
        fsm.set_state(WALK, &mut ctx).unwrap();
        assert_eq!(ctx.player.weight(WALK), Ok(0.0));

        advance(&mut fsm, &mut ctx, 0.25);
        assert_relative_eq!(ctx.player.weight(WALK).unwrap(), 0.5, epsilon = 1e-6);

        advance(&mut fsm, &mut ctx, 0.25);
        assert_relative_eq!(ctx.player.weight(WALK).unwrap(), 1.0, epsilon = 1e-6);
        assert_eq!(ctx.player.is_running(IDLE), Ok(false));
    }

    #[test]
    fn test_attack_fades_in_faster() {
        let (mut fsm, mut ctx) = started();
        fsm.update(0.016, &input(&[Intent::Attack]), &mut ctx)
            .unwrap();
        assert_eq!(fsm.current_name(), Some(ATTACK));

        advance(&mut fsm, &mut ctx, 0.2);
        assert_relative_eq!(ctx.player.weight(ATTACK).unwrap(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_idle_after_attack_fades_in_slowly() {
        let (mut fsm, mut ctx) = started();
        fsm.set_state(ATTACK, &mut ctx).unwrap();
        fsm.set_state(IDLE, &mut ctx).unwrap();

        advance(&mut fsm, &mut ctx, 0.2);
        assert_relative_eq!(ctx.player.weight(IDLE).unwrap(), 0.4, epsilon = 1e-6);

        advance(&mut fsm, &mut ctx, 0.3);
        assert_relative_eq!(ctx.player.weight(IDLE).unwrap(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_attack_returns_to_idle_when_finished() {
        let (mut fsm, mut ctx) = started();
        fsm.update(0.016, &input(&[Intent::Attack]), &mut ctx)
            .unwrap();

        // Movement is ignored mid-attack
        fsm.update(0.016, &input(&[Intent::Forward]), &mut ctx)
            .unwrap();
        assert!(fsm.is_attacking());

        advance(&mut fsm, &mut ctx, 0.5);
        assert!(fsm.is_attacking());

        advance(&mut fsm, &mut ctx, 1.0);
        assert_eq!(fsm.current_name(), Some(IDLE));
    }

    #[test]
    fn test_attack_finished_fires_once() {
        let (mut fsm, mut ctx) = started();
        fsm.set_state(ATTACK, &mut ctx).unwrap();

        // Drive the clip to its end and capture the notification
        let events = ctx.player.update(ATTACK_DURATION * 2.0);
        assert_eq!(events.len(), 1);
        let event = &events[0];

        fsm.handle_finished(event, &mut ctx).unwrap();
        assert_eq!(fsm.current_name(), Some(IDLE));
        let transitions = fsm.transition_count();

        // A duplicate delivery is ignored
        fsm.handle_finished(event, &mut ctx).unwrap();
        assert_eq!(fsm.current_name(), Some(IDLE));
        assert_eq!(fsm.transition_count(), transitions);
    }

    #[test]
    fn test_stale_finished_event_after_leaving_attack() {
        let (mut fsm, mut ctx) = started();
        fsm.set_state(ATTACK, &mut ctx).unwrap();
        let stale = FinishedEvent {
            clip: ATTACK.to_string(),
            listener: ListenerId(0),
        };

        // Leave attack through another path, then re-enter it
        fsm.set_state(WALK, &mut ctx).unwrap();
        fsm.set_state(ATTACK, &mut ctx).unwrap();

        fsm.handle_finished(&stale, &mut ctx).unwrap();
        assert!(fsm.is_attacking());
    }

    #[test]
    fn test_attack_exit_releases_listener() {
        let mut fsm = CharacterFsm::new();
        let mut ctx = context();
        fsm.start(&mut ctx).unwrap();
        fsm.set_state(ATTACK, &mut ctx).unwrap();
        fsm.set_state(IDLE, &mut ctx).unwrap();

        // Nothing is registered any more, so finishing the clip notifies no one
        ctx.player.reset(ATTACK).unwrap();
        ctx.player.play(ATTACK).unwrap();
        assert!(ctx.player.update(ATTACK_DURATION * 2.0).is_empty());
    }

    #[test]
    fn test_attack_can_repeat() {
        let (mut fsm, mut ctx) = started();
        let attack = input(&[Intent::Attack]);

        fsm.update(0.016, &attack, &mut ctx).unwrap();
        advance(&mut fsm, &mut ctx, ATTACK_DURATION * 2.0);
        assert_eq!(fsm.current_name(), Some(IDLE));

        fsm.update(0.016, &attack, &mut ctx).unwrap();
        assert!(fsm.is_attacking());
        assert_eq!(ctx.player.time(ATTACK), Ok(0.0));
    }
}
