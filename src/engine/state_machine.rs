/// Generic finite state machine
///
/// States are registered by name together with a factory. Every transition
/// builds a fresh state from its factory and drops the outgoing one, so no
/// per-state data survives a transition. States never hold a reference back
/// to the machine: they request transitions by returning the next state's
/// name from `update` or `on_finished`, and the machine applies it.
///
/// `C` is the context handed to every state hook (for the character this is
/// the animation registry plus player).
use super::animation::{AnimationError, FinishedEvent};
use super::input::InputSnapshot;
use std::collections::HashMap;
use std::fmt;

/// State machine errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StateMachineError {
    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error(transparent)]
    Animation(#[from] AnimationError),
}

/// A single state of a [`StateMachine`]
pub trait State<C> {
    /// Name the state is registered under
    fn name(&self) -> &'static str;

    /// Called once after the state becomes current
    ///
    /// `previous` is the state being replaced; it has already exited and is
    /// dropped as soon as this returns.
    fn enter(&mut self, previous: Option<&dyn State<C>>, ctx: &mut C)
        -> Result<(), StateMachineError>;

    /// Called once before the state is replaced
    fn exit(&mut self, _ctx: &mut C) {}

    /// Per-frame update, returning the name of a state to transition to
    fn update(&mut self, _dt: f32, _input: &InputSnapshot, _ctx: &mut C) -> Option<&'static str> {
        None
    }

    /// Clip-finished notification, returning the name of a state to transition to
    fn on_finished(&mut self, _event: &FinishedEvent, _ctx: &mut C) -> Option<&'static str> {
        None
    }
}

/// Constructor for a registered state
pub type StateFactory<C> = Box<dyn Fn() -> Box<dyn State<C>>>;

pub struct StateMachine<C> {
    factories: HashMap<&'static str, StateFactory<C>>,
    current: Option<Box<dyn State<C>>>,
    transition_count: u64,
}

impl<C> Default for StateMachine<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for StateMachine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut registered: Vec<_> = self.factories.keys().collect();
        registered.sort();
        f.debug_struct("StateMachine")
            .field("registered", &registered)
            .field("current", &self.current_name())
            .field("transition_count", &self.transition_count)
            .finish()
    }
}

impl<C> StateMachine<C> {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            current: None,
            transition_count: 0,
        }
    }

    /// Associate a state name with its factory, replacing any earlier registration
    pub fn register_state<F>(&mut self, name: &'static str, factory: F)
    where
        F: Fn() -> Box<dyn State<C>> + 'static,
    {
        self.factories.insert(name, Box::new(factory));
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Name of the current state, or `None` before the first transition
    pub fn current_name(&self) -> Option<&'static str> {
        self.current.as_ref().map(|state| state.name())
    }

    /// Number of transitions performed so far (same-name requests excluded)
    pub fn transition_count(&self) -> u64 {
        self.transition_count
    }

    /// Transition to the state registered under `name`
    ///
    /// Requesting the current state's name is a no-op. An unregistered name
    /// fails before the current state is exited.
    pub fn set_state(&mut self, name: &str, ctx: &mut C) -> Result<(), StateMachineError> {
        if self.current_name() == Some(name) {
            return Ok(());
        }

        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| StateMachineError::UnknownState(name.to_string()))?;

        let mut previous = self.current.take();
        if let Some(state) = previous.as_mut() {
            state.exit(ctx);
        }

        let state = self.current.insert(factory());
        self.transition_count += 1;
        log::debug!(
            "State transition: {} -> {}",
            previous.as_ref().map_or("<none>", |s| s.name()),
            state.name()
        );

        state.enter(previous.as_deref(), ctx)
    }

    /// Forward a frame update to the current state and apply any requested transition
    pub fn update(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        ctx: &mut C,
    ) -> Result<(), StateMachineError> {
        let Some(state) = self.current.as_mut() else {
            return Ok(());
        };

        match state.update(dt, input, ctx) {
            Some(next) => self.set_state(next, ctx),
            None => Ok(()),
        }
    }

    /// Forward a clip-finished notification to the current state
    pub fn handle_finished(
        &mut self,
        event: &FinishedEvent,
        ctx: &mut C,
    ) -> Result<(), StateMachineError> {
        let Some(state) = self.current.as_mut() else {
            return Ok(());
        };

        match state.on_finished(event, ctx) {
            Some(next) => self.set_state(next, ctx),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animation::ListenerId;

    /// Records every hook call as "hook:state" strings
    type Journal = Vec<String>;

    /// Moves to `next` whenever attack is pressed, and on any finished event
    struct Probe {
        name: &'static str,
        next: &'static str,
    }

    impl State<Journal> for Probe {
        fn name(&self) -> &'static str {
            self.name
        }

        fn enter(
            &mut self,
            previous: Option<&dyn State<Journal>>,
            journal: &mut Journal,
        ) -> Result<(), StateMachineError> {
            let from = previous.map_or("none", |s| s.name());
            journal.push(format!("enter:{}<-{}", self.name, from));
            Ok(())
        }

        fn exit(&mut self, journal: &mut Journal) {
            journal.push(format!("exit:{}", self.name));
        }

        fn update(
            &mut self,
            _dt: f32,
            input: &InputSnapshot,
            journal: &mut Journal,
        ) -> Option<&'static str> {
            journal.push(format!("update:{}", self.name));
            input.attack.then_some(self.next)
        }

        fn on_finished(
            &mut self,
            _event: &FinishedEvent,
            _journal: &mut Journal,
        ) -> Option<&'static str> {
            Some(self.next)
        }
    }

    fn machine() -> StateMachine<Journal> {
        let mut sm = StateMachine::new();
        sm.register_state("a", || Box::new(Probe { name: "a", next: "b" }));
        sm.register_state("b", || Box::new(Probe { name: "b", next: "a" }));
        sm
    }

    fn finished() -> FinishedEvent {
        FinishedEvent {
            clip: "clip".to_string(),
            listener: ListenerId(0),
        }
    }

    #[test]
    fn test_initially_inert() {
        let mut sm = machine();
        let mut journal = Journal::new();

        assert_eq!(sm.current_name(), None);
        sm.update(0.1, &InputSnapshot::default(), &mut journal)
            .unwrap();
        sm.handle_finished(&finished(), &mut journal).unwrap();
        assert!(journal.is_empty());
    }

    #[test]
    fn test_first_transition_has_no_previous() {
        let mut sm = machine();
        let mut journal = Journal::new();

        sm.set_state("a", &mut journal).unwrap();
        assert_eq!(sm.current_name(), Some("a"));
        assert_eq!(journal, vec!["enter:a<-none"]);
    }

    #[test]
    fn test_exit_runs_before_enter() {
        let mut sm = machine();
        let mut journal = Journal::new();

        sm.set_state("a", &mut journal).unwrap();
        sm.set_state("b", &mut journal).unwrap();
        assert_eq!(journal, vec!["enter:a<-none", "exit:a", "enter:b<-a"]);
        assert_eq!(sm.transition_count(), 2);
    }

    #[test]
    fn test_same_state_is_noop() {
        let mut sm = machine();
        let mut journal = Journal::new();

        sm.set_state("a", &mut journal).unwrap();
        sm.set_state("a", &mut journal).unwrap();
        sm.set_state("a", &mut journal).unwrap();
        assert_eq!(journal, vec!["enter:a<-none"]);
        assert_eq!(sm.transition_count(), 1);
    }

    #[test]
    fn test_unknown_state_leaves_current_untouched() {
        let mut sm = machine();
        let mut journal = Journal::new();
        sm.set_state("a", &mut journal).unwrap();

        let err = sm.set_state("missing", &mut journal).unwrap_err();
        assert_eq!(err, StateMachineError::UnknownState("missing".to_string()));
        assert_eq!(sm.current_name(), Some("a"));
        assert_eq!(journal, vec!["enter:a<-none"]);
    }

    #[test]
    fn test_update_applies_requested_transition() {
        let mut sm = machine();
        let mut journal = Journal::new();
        sm.set_state("a", &mut journal).unwrap();

        sm.update(0.1, &InputSnapshot::default(), &mut journal)
            .unwrap();
        assert_eq!(sm.current_name(), Some("a"));

        let attack = InputSnapshot {
            attack: true,
            ..Default::default()
        };
        sm.update(0.1, &attack, &mut journal).unwrap();
        assert_eq!(sm.current_name(), Some("b"));
        assert_eq!(
            journal,
            vec![
                "enter:a<-none",
                "update:a",
                "update:a",
                "exit:a",
                "enter:b<-a"
            ]
        );
    }

    #[test]
    fn test_finished_applies_requested_transition() {
        let mut sm = machine();
        let mut journal = Journal::new();
        sm.set_state("b", &mut journal).unwrap();

        sm.handle_finished(&finished(), &mut journal).unwrap();
        assert_eq!(sm.current_name(), Some("a"));
    }

    #[test]
    fn test_debug_lists_states() {
        let mut sm = machine();
        let mut journal = Journal::new();
        sm.set_state("a", &mut journal).unwrap();

        let debug = format!("{:?}", sm);
        assert!(debug.contains("registered: [\"a\", \"b\"]"));
        assert!(debug.contains("current: Some(\"a\")"));
    }
}
