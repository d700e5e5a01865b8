// Engine modules: animation playback, state machine, input, frame timing

pub mod animation;
pub mod game_loop;
pub mod input;
pub mod state_machine;
