use std::time::Duration;

use crate::board::Board;
use crate::game_state::Phase;
use crate::types::{Cell, PieceKind};

/// Copy of a board's cells, falling piece included
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major
    pub cells: Vec<Cell>,
}

impl BoardSnapshot {
    /// Overwrite with `board`, reusing the allocation
    pub fn copy_from(&mut self, board: &Board) {
        self.width = board.width();
        self.height = board.height();
        self.cells.clear();
        self.cells.extend_from_slice(board.cells());
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cells.get(row * self.width + col).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width.max(1))
    }
}

/// Everything a view needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: BoardSnapshot,
    pub preview: BoardSnapshot,
    pub next: PieceKind,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub phase: Phase,
    pub interval: Duration,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: BoardSnapshot::default(),
            preview: BoardSnapshot::default(),
            next: PieceKind::I,
            score: 0,
            lines: 0,
            level: 1,
            phase: Phase::Idle,
            interval: Duration::ZERO,
        }
    }
}

impl GameSnapshot {
    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}
