// Player character
//
// Animation states, the state machine that switches between them, clip
// loading and locomotion, tied together by the controller.

mod context;
mod controller;
mod fsm;
mod loading;
mod movement;
mod states;

pub use context::AnimationContext;
pub use controller::CharacterController;
pub use fsm::CharacterFsm;
pub use loading::{standard_clips, ClipLoadTracker, CHARACTER_CLIPS};
pub use movement::{CharacterMotion, MovementStats, BASE_MOVEMENT};
pub use states::{
    fade_duration, AttackState, IdleState, RunState, WalkState, ATTACK, ATTACK_FADE, IDLE,
    LOCOMOTION_FADE, RUN, WALK,
};
