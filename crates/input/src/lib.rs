//! Terminal input module.
//!
//! Maps `crossterm` key events to [`types::GameAction`]s. Keys act on press;
//! there is no auto-repeat beyond what the terminal itself sends.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
