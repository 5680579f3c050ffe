//! Game configuration and construction-time validation
//!
//! Gameplay never fails; only a malformed configuration does, and it does so
//! before a board or session exists.

use std::time::Duration;

use thiserror::Error;

use crate::types::{
    BOARD_HEIGHT, BOARD_WIDTH, DROP_FRAMES, FRAMES_PER_SECOND, PREVIEW_HEIGHT, PREVIEW_WIDTH,
    SHAPE_SIZE,
};

/// Configuration mistakes detected at construction time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{field} board is {height}x{width}, must be at least {min}x{min} to hold a piece")]
    BoardTooSmall {
        field: &'static str,
        height: usize,
        width: usize,
        min: usize,
    },
    #[error("drop speed table is empty")]
    EmptyDropTable,
    #[error("drop speed table entry for level {level} is zero frames")]
    ZeroDropFrames { level: usize },
}

/// Board dimensions and the gravity schedule for one game instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub board_height: usize,
    pub board_width: usize,
    pub preview_height: usize,
    pub preview_width: usize,
    /// Frames per gravity step, indexed by `level - 1`
    pub drop_frames: Vec<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_height: BOARD_HEIGHT,
            board_width: BOARD_WIDTH,
            preview_height: PREVIEW_HEIGHT,
            preview_width: PREVIEW_WIDTH,
            drop_frames: DROP_FRAMES.to_vec(),
        }
    }
}

impl GameConfig {
    pub fn with_board(mut self, height: usize, width: usize) -> Self {
        self.board_height = height;
        self.board_width = width;
        self
    }

    pub fn with_preview(mut self, height: usize, width: usize) -> Self {
        self.preview_height = height;
        self.preview_width = width;
        self
    }

    pub fn with_drop_frames(mut self, drop_frames: Vec<u32>) -> Self {
        self.drop_frames = drop_frames;
        self
    }

    /// Check every field, reporting the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_board_size("main", self.board_height, self.board_width)?;
        check_board_size("preview", self.preview_height, self.preview_width)?;

        if self.drop_frames.is_empty() {
            return Err(ConfigError::EmptyDropTable);
        }
        if let Some(i) = self.drop_frames.iter().position(|&frames| frames == 0) {
            return Err(ConfigError::ZeroDropFrames { level: i + 1 });
        }
        Ok(())
    }

    /// Tick period for a level (1-based).
    ///
    /// Levels past the end of the table reuse the last entry. Level 0 is
    /// treated as level 1.
    pub fn drop_interval(&self, level: u32) -> Duration {
        drop_interval(&self.drop_frames, level)
    }
}

/// `1000 * frames / 60` milliseconds for the table entry of `level`
pub fn drop_interval(drop_frames: &[u32], level: u32) -> Duration {
    let last = drop_frames.len().saturating_sub(1);
    let idx = (level.max(1) as usize - 1).min(last);
    let frames = drop_frames.get(idx).copied().unwrap_or(0) as u64;
    Duration::from_nanos(frames * 1_000_000_000 / FRAMES_PER_SECOND as u64)
}

pub(crate) fn check_board_size(
    field: &'static str,
    height: usize,
    width: usize,
) -> Result<(), ConfigError> {
    if height < SHAPE_SIZE || width < SHAPE_SIZE {
        return Err(ConfigError::BoardTooSmall {
            field,
            height,
            width,
            min: SHAPE_SIZE,
        });
    }
    Ok(())
}
