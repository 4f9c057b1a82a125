//! Scoring module - line clear points, combo chain, level and fall speed
//!
//! Rules:
//! - Base points 40/100/300/1200 for 1-4 lines, times the level.
//! - Each consecutive clearing lock extends the combo; the bonus is
//!   `combo * 50 * level`, so the first clear of a chain gets none.
//! - A lock that clears nothing ends the chain.
//! - Level is `1 + lines / 10`; the fall interval shrinks 50ms per level
//!   down to 100ms.

use crate::types::{
    BASE_DROP_MS, COMBO_BASE, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
    NO_COMBO,
};

/// Base points for clearing `lines` rows in one lock, before the level multiplier.
///
/// A single piece spans at most 4 rows, so more than 4 never happens in play;
/// such counts score like 4.
pub fn line_base_points(lines: usize) -> u32 {
    match lines {
        0 => 0,
        1..=4 => LINE_SCORES[lines],
        _ => LINE_SCORES[4],
    }
}

/// Combo bonus for the given chain index.
///
/// `NO_COMBO` and the first clear of a chain (index 0) earn nothing.
pub fn combo_bonus(combo: i32, level: u32) -> u32 {
    if combo <= 0 {
        return 0;
    }
    (combo as u32)
        .saturating_mul(COMBO_BASE)
        .saturating_mul(level)
}

/// Level for a running line total (starts at 1)
pub fn calculate_level(total_lines: u32) -> u32 {
    1 + total_lines / LINES_PER_LEVEL
}

/// Automatic fall interval for a level, floored at `DROP_INTERVAL_MIN_MS`
pub fn drop_interval_ms(level: u32) -> u32 {
    let step = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(step)
        .max(DROP_INTERVAL_MIN_MS)
}

/// Running score, level and combo state of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreState {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// `NO_COMBO` when no chain is active, else the chain index (0-based)
    pub combo: i32,
    pub drop_interval_ms: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
            combo: NO_COMBO,
            drop_interval_ms: BASE_DROP_MS,
        }
    }

    /// Account for one lock that cleared `lines` rows.
    ///
    /// Returns the points awarded. The current level multiplies the award;
    /// level and fall interval are recomputed afterwards.
    pub fn apply_lock(&mut self, lines: usize) -> u32 {
        if lines == 0 {
            self.combo = NO_COMBO;
            return 0;
        }

        self.combo += 1;
        let points = line_base_points(lines)
            .saturating_mul(self.level)
            .saturating_add(combo_bonus(self.combo, self.level));

        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines as u32);
        self.level = calculate_level(self.lines);
        self.drop_interval_ms = drop_interval_ms(self.level);
        points
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_base_points() {
        assert_eq!(line_base_points(0), 0);
        assert_eq!(line_base_points(1), 40);
        assert_eq!(line_base_points(2), 100);
        assert_eq!(line_base_points(3), 300);
        assert_eq!(line_base_points(4), 1200);
        assert_eq!(line_base_points(5), 1200);
    }

    #[test]
    fn test_combo_bonus() {
        assert_eq!(combo_bonus(NO_COMBO, 1), 0);
        assert_eq!(combo_bonus(0, 3), 0);
        assert_eq!(combo_bonus(1, 1), 50);
        assert_eq!(combo_bonus(3, 2), 300);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(29), 3);
        assert_eq!(calculate_level(100), 11);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(drop_interval_ms(1), 500);
        assert_eq!(drop_interval_ms(2), 450);
        assert_eq!(drop_interval_ms(9), 100);
        assert_eq!(drop_interval_ms(11), 100);
        assert_eq!(drop_interval_ms(1000), 100);
    }

    #[test]
    fn test_combo_chain_scoring() {
        let mut s = ScoreState::new();

        assert_eq!(s.apply_lock(1), 40);
        assert_eq!(s.combo, 0);

        assert_eq!(s.apply_lock(2), 150);
        assert_eq!(s.combo, 1);
        assert_eq!(s.score, 190);

        assert_eq!(s.apply_lock(0), 0);
        assert_eq!(s.combo, NO_COMBO);
        assert_eq!(s.score, 190);
        assert_eq!(s.lines, 3);
    }

    #[test]
    fn test_level_multiplier_uses_level_before_clear() {
        let mut s = ScoreState::new();
        s.lines = 9;

        // Reaching 10 lines happens on this clear; the award is still level 1.
        assert_eq!(s.apply_lock(1), 40);
        assert_eq!(s.level, 2);
        assert_eq!(s.drop_interval_ms, 450);

        // Next clear (combo 1) at level 2: 40*2 + 1*50*2
        assert_eq!(s.apply_lock(1), 180);
    }
}
