//! Scoring module - classic line scores and level progression
//!
//! Every lock scores `LINE_SCORES[lines] * level + 4`, using the level reached
//! after the clear is counted. Hard drops add a flat 4 on top of that, applied
//! the moment the drop happens.

use crate::types::{HARD_DROP_BONUS, LINES_PER_LEVEL, LINE_SCORES, LOCK_BONUS};

/// Base points for clearing `lines` rows at `level`, without the lock bonus.
///
/// Clears of more than four rows (only possible on hand-built boards) score
/// as four.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    let base = LINE_SCORES[lines.min(LINE_SCORES.len() - 1)];
    base.saturating_mul(level)
}

/// Points awarded for one lock: line score plus the flat lock bonus
pub fn calculate_lock_score(lines: usize, level: u32) -> u32 {
    calculate_line_score(lines, level).saturating_add(LOCK_BONUS)
}

/// Points awarded for a hard drop; the distance fallen does not matter
pub fn calculate_hard_drop_score(_distance: u32) -> u32 {
    HARD_DROP_BONUS
}

/// Level for a total line count. Starts at 1 and rises every 10 lines.
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_score_table() {
        assert_eq!(calculate_lock_score(0, 1), 4);
        assert_eq!(calculate_lock_score(1, 1), 44);
        assert_eq!(calculate_lock_score(2, 1), 104);
        assert_eq!(calculate_lock_score(3, 1), 304);
        assert_eq!(calculate_lock_score(4, 1), 1204);
    }

    #[test]
    fn test_lock_score_scales_with_level() {
        for level in 1..=25 {
            for lines in 0..=4 {
                assert_eq!(
                    calculate_lock_score(lines, level),
                    LINE_SCORES[lines] * level + 4
                );
            }
        }
    }

    #[test]
    fn test_oversized_clear_scores_as_four() {
        assert_eq!(calculate_line_score(6, 2), 2400);
    }

    #[test]
    fn test_hard_drop_is_flat() {
        assert_eq!(calculate_hard_drop_score(0), 4);
        assert_eq!(calculate_hard_drop_score(1), 4);
        assert_eq!(calculate_hard_drop_score(20), 4);
    }

    #[test]
    fn test_level_progression() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(19), 2);
        assert_eq!(calculate_level(20), 3);
        assert_eq!(calculate_level(250), 26);
    }
}
