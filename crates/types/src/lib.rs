//! Shared data types and rule constants.
//!
//! Everything here is plain data with no dependencies, so the same definitions
//! can flow through the rules engine, the input mapper and the terminal view.
//!
//! # Board Dimensions
//!
//! - **Main field**: 22 rows x 10 columns
//! - **Preview field**: 6 rows x 6 columns
//! - **Spawn column**: `(width - 4) / 2`, spawn row 0
//!
//! Coordinates are `(row, col)` with row 0 at the top.
//!
//! # Timing
//!
//! Gravity is expressed in frames at 60 frames per second. The tick period for
//! level `n` is `1000 * DROP_FRAMES[n - 1] / 60` milliseconds:
//!
//! | Level | Frames | Interval |
//! |-------|--------|----------|
//! | 1 | 48 | 800ms |
//! | 2 | 43 | ~717ms |
//! | 5 | 28 | ~467ms |
//! | 10 | 6 | 100ms |
//! | 20+ | 2 | ~33ms |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Cell, Color, PieceKind, Rotation, SoundCue};
//!
//! assert_eq!(PieceKind::T.color(), Color::Purple);
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! assert_eq!(SoundCue::for_lines(4), Some(SoundCue::TripleLineClear));
//! assert!(Cell::Filled(Color::Red).is_filled());
//! ```

/// Main field height in rows
pub const BOARD_HEIGHT: usize = 22;

/// Main field width in columns
pub const BOARD_WIDTH: usize = 10;

/// Preview field height in rows
pub const PREVIEW_HEIGHT: usize = 6;

/// Preview field width in columns
pub const PREVIEW_WIDTH: usize = 6;

/// Side length of the box every rotation state is drawn in
pub const SHAPE_SIZE: usize = 4;

/// Frame rate the drop table is expressed in
pub const FRAMES_PER_SECOND: u32 = 60;

/// Frames per gravity step, indexed by `level - 1`.
///
/// Levels past the end of the table reuse the last entry.
pub const DROP_FRAMES: [u32; 20] = [
    48, 43, 38, 33, 28, 23, 18, 13, 8, 6, 5, 5, 5, 4, 4, 4, 3, 3, 3, 2,
];

/// Base points for clearing N lines in one lock (0..=4), multiplied by the level.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Flat bonus added on every lock, whether or not lines were cleared
pub const LOCK_BONUS: u32 = 4;

/// Flat bonus for a hard drop, independent of the distance fallen
pub const HARD_DROP_BONUS: u32 = 4;

/// Cleared lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Block colors.
///
/// Each piece kind has exactly one color; see [`PieceKind::color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

/// A single board cell.
///
/// Every cell is always in one of these two states; boards never hold
/// uninitialized cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        !self.is_empty()
    }
}

/// The seven tetromino kinds
///
/// - **I**: Cyan, straight bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Block color for this kind
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::T => Color::Purple,
            PieceKind::S => Color::Green,
            PieceKind::Z => Color::Red,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
        }
    }
}

/// Rotation states, in clockwise order
///
/// The cycle goes North → East → South → West → North. Pieces only rotate
/// clockwise; there is no wall kick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotation index in `0..4`
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation for an index; wraps modulo 4
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }
}

/// Player commands accepted by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    Pause,
    Restart,
}

/// Sound cues emitted by the session
///
/// Clearing three or four lines shares the `TripleLineClear` cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Move,
    Rotate,
    HardDrop,
    SingleLineClear,
    DoubleLineClear,
    TripleLineClear,
}

impl SoundCue {
    /// Cue for a lock that cleared `lines` rows, if any
    pub fn for_lines(lines: usize) -> Option<Self> {
        match lines {
            0 => None,
            1 => Some(SoundCue::SingleLineClear),
            2 => Some(SoundCue::DoubleLineClear),
            _ => Some(SoundCue::TripleLineClear),
        }
    }
}
