use crate::config::GameConfig;

/// Score, level and gravity speed. Mutated by the game state only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    points: u32,
    level: u32,
    // Rows cleared since the last level-up.
    level_rows: u32,
    total_rows: u32,
    speed_ms: u32,
    level_up: bool,
}

impl Score {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            points: 0,
            level: 1,
            level_rows: 0,
            total_rows: 0,
            speed_ms: config.speed_for_level(1),
            level_up: false,
        }
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn level_rows(&self) -> u32 {
        self.level_rows
    }

    pub fn total_rows(&self) -> u32 {
        self.total_rows
    }

    /// Current gravity interval in milliseconds.
    pub fn speed_ms(&self) -> u32 {
        self.speed_ms
    }

    pub fn reward_soft_drop(&mut self, config: &GameConfig) {
        self.points = self.points.saturating_add(config.soft_drop_score);
    }

    pub fn reward_hard_drop(&mut self, rows: u32, config: &GameConfig) {
        self.points = self
            .points
            .saturating_add(config.hard_drop_factor.saturating_mul(rows));
    }

    /// Scores `rows` rows cleared in one update and advances the level.
    /// Returns `true` when the level went up.
    pub fn register_rows(&mut self, rows: usize, config: &GameConfig) -> bool {
        if rows == 0 {
            return false;
        }
        let bonus = config.line_score(rows).saturating_mul(self.level);
        self.points = self.points.saturating_add(bonus);
        self.total_rows += rows as u32;
        self.level_rows += rows as u32;

        if self.level_rows >= config.rows_per_level {
            self.level += 1;
            self.level_rows -= config.rows_per_level;
            self.speed_ms = config.speed_for_level(self.level);
            self.level_up = true;
            return true;
        }
        false
    }

    /// One-shot level-up notification.
    pub fn take_level_up(&mut self) -> bool {
        core::mem::take(&mut self.level_up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_bonus_scales_with_level() {
        let config = GameConfig::default();
        for (rows, factor) in [(0, 0), (1, 100), (2, 300), (3, 500), (4, 800)] {
            for level in [1, 3] {
                let mut score = Score::new(&config);
                score.level = level;
                score.register_rows(rows, &config);
                assert_eq!(score.points(), factor * level, "{rows} rows at level {level}");
            }
        }
    }

    #[test]
    fn level_up_after_ten_rows_keeps_remainder() {
        let config = GameConfig::default();
        let mut score = Score::new(&config);
        for rows in [4, 4] {
            assert!(!score.register_rows(rows, &config));
        }
        assert_eq!(score.level(), 1);
        assert!(score.register_rows(3, &config));
        assert_eq!(score.level(), 2);
        assert_eq!(score.level_rows(), 1);
        assert_eq!(score.total_rows(), 11);
        assert_eq!(score.speed_ms(), 505);
        assert!(score.take_level_up());
        assert!(!score.take_level_up());
    }

    #[test]
    fn exactly_ten_single_rows_level_up_once() {
        let config = GameConfig::default();
        let mut score = Score::new(&config);
        let level_ups = (0..10).filter(|_| score.register_rows(1, &config)).count();
        assert_eq!(level_ups, 1);
        assert_eq!(score.level(), 2);
        assert_eq!(score.level_rows(), 0);
        // First nine singles at level 1, the tenth also scored before the level changed.
        assert_eq!(score.points(), 10 * 100);
    }

    #[test]
    fn drop_rewards_ignore_level() {
        let config = GameConfig::default();
        let mut score = Score::new(&config);
        score.level = 5;
        score.reward_soft_drop(&config);
        score.reward_hard_drop(7, &config);
        assert_eq!(score.points(), 1 + 14);
    }
}
