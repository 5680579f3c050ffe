//! Pieces module - tetromino shapes, colors and the active piece handle
//!
//! Every rotation state lives in a 4x4 box. Offsets are `(row, col)` relative
//! to the box's top-left corner, which is the piece's anchor on the board.
//! Rotation is clockwise only and never kicks.

use crate::types::{Color, PieceKind, Rotation, SHAPE_SIZE};

/// Offset of a single mino relative to the piece anchor, `(row, col)`
pub type MinoOffset = (i32, i32);

/// Shape of a piece - 4 mino offsets inside the 4x4 box
pub type PieceShape = [MinoOffset; 4];

/// A rotation state as a 4x4 occupancy matrix, `[row][col]`
pub type ShapeMatrix = [[bool; SHAPE_SIZE]; SHAPE_SIZE];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => get_i_shape(rotation),
        PieceKind::O => get_o_shape(rotation),
        PieceKind::T => get_t_shape(rotation),
        PieceKind::S => get_s_shape(rotation),
        PieceKind::Z => get_z_shape(rotation),
        PieceKind::J => get_j_shape(rotation),
        PieceKind::L => get_l_shape(rotation),
    }
}

/// I piece shapes
fn get_i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        // N: horizontal on row 1
        Rotation::North => [(1, 0), (1, 1), (1, 2), (1, 3)],
        // E: vertical on column 2
        Rotation::East => [(0, 2), (1, 2), (2, 2), (3, 2)],
        // S: horizontal on row 2
        Rotation::South => [(2, 0), (2, 1), (2, 2), (2, 3)],
        // W: vertical on column 1
        Rotation::West => [(0, 1), (1, 1), (2, 1), (3, 1)],
    }
}

/// O piece shapes (same for all rotations)
fn get_o_shape(_rotation: Rotation) -> PieceShape {
    [(0, 1), (0, 2), (1, 1), (1, 2)]
}

fn get_t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 1), (1, 0), (1, 1), (1, 2)],
        Rotation::East => [(0, 1), (1, 1), (1, 2), (2, 1)],
        Rotation::South => [(1, 0), (1, 1), (1, 2), (2, 1)],
        Rotation::West => [(0, 1), (1, 0), (1, 1), (2, 1)],
    }
}

fn get_s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 1), (0, 2), (1, 0), (1, 1)],
        Rotation::East => [(0, 1), (1, 1), (1, 2), (2, 2)],
        Rotation::South => [(1, 1), (1, 2), (2, 0), (2, 1)],
        Rotation::West => [(0, 0), (1, 0), (1, 1), (2, 1)],
    }
}

fn get_z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (0, 1), (1, 1), (1, 2)],
        Rotation::East => [(0, 2), (1, 1), (1, 2), (2, 1)],
        Rotation::South => [(1, 0), (1, 1), (2, 1), (2, 2)],
        Rotation::West => [(0, 1), (1, 0), (1, 1), (2, 0)],
    }
}

fn get_j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (1, 0), (1, 1), (1, 2)],
        Rotation::East => [(0, 1), (0, 2), (1, 1), (2, 1)],
        Rotation::South => [(1, 0), (1, 1), (1, 2), (2, 2)],
        Rotation::West => [(0, 1), (1, 1), (2, 0), (2, 1)],
    }
}

fn get_l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 2), (1, 0), (1, 1), (1, 2)],
        Rotation::East => [(0, 1), (1, 1), (2, 1), (2, 2)],
        Rotation::South => [(1, 0), (1, 1), (1, 2), (2, 0)],
        Rotation::West => [(0, 0), (0, 1), (1, 1), (2, 1)],
    }
}

/// Expand a shape into its 4x4 occupancy matrix
pub fn shape_matrix(shape: &PieceShape) -> ShapeMatrix {
    let mut matrix = [[false; SHAPE_SIZE]; SHAPE_SIZE];
    for &(row, col) in shape {
        matrix[row as usize][col as usize] = true;
    }
    matrix
}

/// All four rotation states of a kind, clockwise from spawn
pub fn rotation_states(kind: PieceKind) -> [ShapeMatrix; 4] {
    Rotation::ALL.map(|rotation| shape_matrix(&get_shape(kind, rotation)))
}

/// Block color of a kind
pub fn color(kind: PieceKind) -> Color {
    kind.color()
}

/// A piece's kind and current rotation.
///
/// This is the mutable handle the board moves around; where it sits is the
/// board's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
}

impl Tetromino {
    /// A piece in its spawn rotation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
        }
    }

    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Shape after one clockwise rotation, without rotating
    pub fn next_shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation.rotate_cw())
    }

    /// Advance to the next rotation state (wraps West → North)
    pub fn rotate(&mut self) {
        self.rotation = self.rotation.rotate_cw();
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }
}

impl From<PieceKind> for Tetromino {
    fn from(kind: PieceKind) -> Self {
        Self::new(kind)
    }
}
