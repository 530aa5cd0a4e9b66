/// Tunable game rules. `Default` gives the classic values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Gravity interval at level 1, in milliseconds.
    pub initial_speed_ms: u32,
    /// Gravity interval the speed curve approaches as the level grows.
    pub speed_floor_ms: u32,
    /// Delay between detecting full rows and compacting the board.
    pub clear_delay_ms: u32,
    /// Points for clearing 1, 2, 3 and 4 rows at once, multiplied by the level.
    pub line_scores: [u32; 4],
    pub soft_drop_score: u32,
    /// Points per row travelled by a hard drop.
    pub hard_drop_factor: u32,
    pub rows_per_level: u32,
    /// Sleep between iterations of the driver loop.
    pub poll_interval_ms: u64,
}

impl GameConfig {
    /// Gravity interval for `level`; 1000, 505, 340, ... with the default rules.
    pub fn speed_for_level(&self, level: u32) -> u32 {
        let span = self.initial_speed_ms.saturating_sub(self.speed_floor_ms);
        self.speed_floor_ms + span / level.max(1)
    }

    /// Base points for clearing `rows` rows in one update, before the level multiplier.
    pub fn line_score(&self, rows: usize) -> u32 {
        match rows {
            1..=4 => self.line_scores[rows - 1],
            _ => 0,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_speed_ms: 1000,
            speed_floor_ms: 10,
            clear_delay_ms: 100,
            line_scores: [100, 300, 500, 800],
            soft_drop_score: 1,
            hard_drop_factor: 2,
            rows_per_level: 10,
            poll_interval_ms: 1,
        }
    }
}
