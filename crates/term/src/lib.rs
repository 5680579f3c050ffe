//! Terminal frontend for the game.
//!
//! Renders [`core::GameSnapshot`]s into a framebuffer that is diffed and
//! flushed to the terminal, and rings the terminal bell for line clears.
//! All game rules stay in `core`; nothing here mutates a session.

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod sound;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
pub use game_view::{color_to_rgb, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use sound::BellSink;
