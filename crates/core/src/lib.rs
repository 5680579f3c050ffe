//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds all the game rules: the playfield, the pieces, scoring and
//! the session state machine. It has no dependencies on terminals, clocks or
//! audio, which makes it:
//!
//! - **Deterministic**: the same seed (or piece sequence) replays the same game
//! - **Testable**: every rule runs headless with recording collaborators
//! - **Portable**: any frontend can drive it
//!
//! # Module Structure
//!
//! - [`board`]: the playfield grid, placement legality, movement and row clears
//! - [`pieces`]: the seven tetrominoes, their rotation states and colors
//! - [`rng`]: the current/next piece buffer
//! - [`scoring`]: line scores, drop bonus and level progression
//! - [`game_state`]: the [`Session`] tying it all together
//! - [`timer`]: tick scheduling commands and an elapsed-time scheduler
//! - [`config`]: board sizes and the drop speed table
//! - [`snapshot`]: plain copies of the state for views
//!
//! # Game Rules
//!
//! - **Spawn**: new pieces appear at the top, centered; a blocked spawn ends
//!   the game
//! - **Rotation**: clockwise only, in place, no wall kicks
//! - **Lock**: a piece locks on the first tick it cannot move down
//! - **Scoring**: `[0, 40, 100, 300, 1200][lines] * level + 4` per lock, plus
//!   a flat 4 per hard drop
//! - **Levels**: one level per 10 lines, starting at 1
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, Session, TimerCommand};
//! use blockfall_core::types::GameAction;
//!
//! let mut game = Session::new(GameConfig::default(), 12345).unwrap();
//! let TimerCommand::Arm(period) = game.start() else { unreachable!() };
//! assert_eq!(period.as_millis(), 800);
//!
//! game.handle_input(GameAction::MoveLeft);
//! game.handle_input(GameAction::HardDrop);
//! assert_eq!(game.score(), 4);
//!
//! // The piece locks on the next tick.
//! game.tick();
//! assert_eq!(game.score(), 8);
//! ```

pub mod board;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod timer;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{ActivePiece, Board, Position};
pub use config::{ConfigError, GameConfig};
pub use game_state::{GameOverNotifier, Phase, Session, SoundSink};
pub use pieces::{get_shape, rotation_states, PieceShape, ShapeMatrix, Tetromino};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{calculate_level, calculate_lock_score};
pub use snapshot::{BoardSnapshot, GameSnapshot};
pub use timer::{IntervalTimer, Scheduler, TimerCommand};
