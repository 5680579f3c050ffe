//! Board module - the playfield grid and everything that moves on it
//!
//! The board is a `height x width` grid of [`Cell`]s in a flat row-major
//! array. At most one active piece exists at a time, and its minos are drawn
//! into the grid like any other block. Every move erases the piece, checks
//! the candidate placement with [`Board::fits`], then redraws it at either the
//! new or the old anchor. Illegal actions are `false` no-ops.
//!
//! Coordinates: `(row, col)`, row 0 at the top. The anchor of a piece is the
//! top-left corner of its 4x4 box and may sit partly outside the board, as
//! long as every mino is inside.

use crate::config::{check_board_size, ConfigError};
use crate::pieces::{PieceShape, Tetromino};
use crate::types::{Cell, SHAPE_SIZE};

/// A board coordinate (or piece anchor), `(row, col)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// This position moved by `(d_row, d_col)`
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

/// The falling piece and where its box sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub piece: Tetromino,
    pub pos: Position,
}

impl ActivePiece {
    /// Absolute board positions of the four minos
    pub fn cells(&self) -> [Position; 4] {
        self.piece
            .shape()
            .map(|(r, c)| self.pos.offset(r, c))
    }
}

/// The playfield grid
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
    active: Option<ActivePiece>,
}

impl Board {
    /// Create an empty board. Both dimensions must be at least 4.
    pub fn new(height: usize, width: usize) -> Result<Self, ConfigError> {
        check_board_size("board", height, width)?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
            active: None,
        })
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at `(row, col)`; `None` if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set the cell at `(row, col)`; `false` if out of bounds.
    ///
    /// Meant for building positions; it does not know about the active piece.
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_free(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(Cell::Empty))
    }

    /// In bounds and filled
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(Cell::Filled(_)))
    }

    fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        row < self.height && self.row(row).iter().all(Cell::is_filled)
    }

    pub fn is_row_empty(&self, row: usize) -> bool {
        row < self.height && self.row(row).iter().all(Cell::is_empty)
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width)
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Empty every cell and forget the active piece
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
        self.active = None;
    }

    /// Legality check: every mino of `shape` anchored at `pos` lands on an
    /// in-bounds, empty cell.
    ///
    /// The active piece's own minos count as occupied, so callers erase it
    /// before testing a candidate placement for it.
    pub fn fits(&self, pos: Position, shape: &PieceShape) -> bool {
        shape
            .iter()
            .all(|&(r, c)| self.is_free(pos.row + r, pos.col + c))
    }

    /// Anchor used for every new piece: top row, box centered horizontally
    pub fn spawn_position(&self) -> Position {
        Position::new(0, ((self.width - SHAPE_SIZE) / 2) as i32)
    }

    /// Place a new piece at the spawn position.
    ///
    /// Returns `false` and leaves every cell untouched when the spawn position
    /// is blocked; this is the end-of-game signal. The previous active piece,
    /// if any, stays where it is as part of the stack.
    pub fn insert(&mut self, piece: Tetromino) -> bool {
        let pos = self.spawn_position();
        if !self.fits(pos, &piece.shape()) {
            self.active = None;
            return false;
        }
        self.active = Some(ActivePiece { piece, pos });
        self.draw();
        true
    }

    /// Translate the active piece by `(d_row, d_col)` if the target fits
    pub fn move_by(&mut self, d_row: i32, d_col: i32) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        self.erase();
        let target = active.pos.offset(d_row, d_col);
        let moved = self.fits(target, &active.piece.shape());
        if moved {
            self.active = Some(ActivePiece {
                pos: target,
                ..active
            });
        }
        self.draw();
        moved
    }

    pub fn move_down(&mut self) -> bool {
        self.move_by(1, 0)
    }

    pub fn move_left(&mut self) -> bool {
        self.move_by(0, -1)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_by(0, 1)
    }

    /// Rotate the active piece clockwise in place.
    ///
    /// The next rotation state is tried at the same anchor only; if it does
    /// not fit the piece and the board are left unchanged.
    pub fn rotate(&mut self) -> bool {
        let Some(mut active) = self.active else {
            return false;
        };

        self.erase();
        let rotated = self.fits(active.pos, &active.piece.next_shape());
        if rotated {
            active.piece.rotate();
            self.active = Some(active);
        }
        self.draw();
        rotated
    }

    /// Move the active piece down until it rests; returns rows fallen
    pub fn drop_to_bottom(&mut self) -> u32 {
        let mut distance = 0;
        while self.move_down() {
            distance += 1;
        }
        distance
    }

    /// Turn the active piece into stack. Its cells are already drawn, so this
    /// only forgets the handle.
    pub fn lock(&mut self) -> Option<ActivePiece> {
        self.active.take()
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Rows are scanned bottom to top and the scan stops at the first empty
    /// row. That relies on the stack never having a block above an empty row,
    /// which holds because blocks only leave the board through full-row
    /// clears and pieces always come to rest on the stack or the floor.
    ///
    /// A full row is removed by copying each row above it down by one, until
    /// an empty row has been copied; the same index is then examined again.
    /// The active piece is locked first.
    pub fn clear_full_rows(&mut self) -> usize {
        self.lock();

        let mut cleared = 0;
        let mut row = self.height;
        while row > 0 {
            let y = row - 1;
            if self.is_row_empty(y) {
                break;
            }
            if self.is_row_full(y) {
                self.remove_row(y);
                cleared += 1;
            } else {
                row -= 1;
            }
        }
        cleared
    }

    /// Shift rows `0..del` down by one, overwriting `del`
    fn remove_row(&mut self, del: usize) {
        let width = self.width;
        for row in (1..=del).rev() {
            let src = (row - 1) * width;
            self.cells.copy_within(src..src + width, row * width);
            if self.is_row_empty(row) {
                return;
            }
        }
        // Shift reached the top without meeting an empty row.
        self.cells[..width].fill(Cell::Empty);
    }

    fn draw(&mut self) {
        self.paint(|piece| Cell::Filled(piece.color()));
    }

    fn erase(&mut self) {
        self.paint(|_| Cell::Empty);
    }

    fn paint(&mut self, cell: impl Fn(&Tetromino) -> Cell) {
        let Some(active) = self.active else {
            return;
        };
        let value = cell(&active.piece);
        for pos in active.cells() {
            self.set(pos.row, pos.col, value);
        }
    }

    /// Build a board from text rows for tests: `.` is empty, anything else
    /// is a filled (red) block.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        use crate::types::Color;

        let height = rows.len();
        let width = rows[0].len();
        let mut board = Self::new(height, width).expect("test board dimensions");
        for (r, line) in rows.iter().enumerate() {
            assert_eq!(line.len(), width);
            for (c, ch) in line.chars().enumerate() {
                if ch != '.' {
                    board.set(r as i32, c as i32, Cell::Filled(Color::Red));
                }
            }
        }
        board
    }

    #[cfg(test)]
    pub(crate) fn to_rows(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|cell| if cell.is_filled() { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}
