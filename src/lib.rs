// Stride: animation-driven character state machine
//
// `engine` holds the reusable pieces (animation playback, a generic state
// machine, keyboard input, the fixed-step loop). `game` builds the character
// on top of them.

pub mod core;
pub mod engine;
pub mod game;
