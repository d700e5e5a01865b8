// Input handling system
//
// Keyboard events update a set of held keys; once per frame the game reads an
// `InputSnapshot` of boolean intents from it and passes that value into the
// character state machine. Nothing else reads keyboard state.
//
// ## Architecture
//
// - `intent`: Character intents, the per-frame snapshot and default key bindings
// - `config`: Key binding configuration and remapping
// - `keyboard`: Held-key tracking fed by winit events
//
// ## Usage Example
//
// ```rust
// use stride::engine::input::KeyboardInput;
//
// let mut keyboard = KeyboardInput::default();
//
// // In your event loop, process keyboard events
// keyboard.process_keyboard_event(&key_event);
//
// // Once per frame, hand the intents to the character
// controller.update(dt, &keyboard.snapshot())?;
// ```

pub mod config;
pub mod intent;
pub mod keyboard;

// Re-export commonly used types
pub use config::InputConfig;
pub use intent::{default_bindings, InputSnapshot, Intent};
pub use keyboard::KeyboardInput;
