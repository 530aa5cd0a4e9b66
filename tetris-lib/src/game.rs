use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::bag::Bag;
use crate::board::{Board, RowSet};
use crate::config::GameConfig;
use crate::log::{debug, info, trace};
use crate::piece::{ActivePiece, Kind};
use crate::score::Score;
use crate::stats::Statistics;

/// Everything a single game owns: board, falling piece, bag, counters and flags.
///
/// Controller calls (`move_by`, `rotate`, drops) come from the driver on input;
/// `update` and `clear_rows` come from the driver's two timers. The ghost position is
/// kept current after every mutation.
#[derive(Clone, Debug)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    bag: Bag<ChaCha8Rng>,
    piece: ActivePiece,
    cleared: RowSet,
    score: Score,
    stats: Statistics,
    paused: bool,
    game_over: bool,
}

impl GameState {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn with_rng(config: GameConfig, rng: ChaCha8Rng) -> Self {
        let bag = Bag::new(rng);
        let mut game = Self {
            config,
            board: Board::new(),
            piece: ActivePiece::spawn(bag.preview()),
            bag,
            cleared: RowSet::new(),
            score: Score::new(&config),
            stats: Statistics::new(),
            paused: false,
            game_over: false,
        };
        game.spawn();
        info!("new game, first piece {}", game.piece.kind.name());
        game
    }

    /// Starts a new game in place, keeping the random generator running.
    pub fn reset(&mut self) {
        self.board.clear();
        self.bag.reset();
        self.cleared.clear();
        self.score = Score::new(&self.config);
        self.stats = Statistics::new();
        self.paused = false;
        self.game_over = false;
        self.spawn();
        info!("new game, first piece {}", self.piece.kind.name());
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self) -> &ActivePiece {
        &self.piece
    }

    pub fn preview(&self) -> Kind {
        self.bag.preview()
    }

    pub fn bag(&self) -> &Bag<ChaCha8Rng> {
        &self.bag
    }

    /// Rows found full by the last update and not yet compacted.
    pub fn cleared_rows(&self) -> &RowSet {
        &self.cleared
    }

    /// True while `row` waits for compaction. Rows pending when the game ended
    /// stay on the final board and no longer count as clearing.
    pub fn is_row_flashing(&self, row: usize) -> bool {
        !self.game_over && self.cleared.contains(row)
    }

    pub fn has_pending_clear(&self) -> bool {
        !self.cleared.is_empty()
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Flips the pause flag and returns the new value. Ignored after game over.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.game_over {
            self.paused = !self.paused;
        }
        self.paused
    }

    pub fn take_level_up(&mut self) -> bool {
        self.score.take_level_up()
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, kind: Kind, rotation: crate::piece::Rotation, x: i8, y: i8) {
        self.piece = ActivePiece {
            kind,
            rotation,
            x,
            y,
            ghost_y: y,
        };
        self.recompute_ghost();
    }

    /// Replaces the falling piece with the preview at the spawn position.
    pub fn spawn(&mut self) {
        let kind = self.bag.deal();
        self.piece = ActivePiece::spawn(kind);
        self.stats.record(kind);
        self.recompute_ghost();
        trace!("spawned {}, next {}", kind.name(), self.bag.preview().name());
    }

    fn collides_at(&self, x: i8, y: i8) -> bool {
        self.board
            .collides(self.piece.kind, self.piece.rotation, x, y)
    }

    /// Translates the piece if the target placement is free.
    pub fn move_by(&mut self, dx: i8, dy: i8) -> bool {
        if self.game_over {
            return false;
        }
        let (Some(x), Some(y)) = (self.piece.x.checked_add(dx), self.piece.y.checked_add(dy))
        else {
            return false;
        };
        if self.collides_at(x, y) {
            return false;
        }
        self.piece.x = x;
        self.piece.y = y;
        self.recompute_ghost();
        true
    }

    /// Rotates clockwise in place. There are no wall kicks.
    pub fn rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let rotation = self.piece.rotation.next();
        if self
            .board
            .collides(self.piece.kind, rotation, self.piece.x, self.piece.y)
        {
            return false;
        }
        self.piece.rotation = rotation;
        self.recompute_ghost();
        true
    }

    pub fn soft_drop(&mut self) -> bool {
        let moved = self.move_by(0, 1);
        if moved {
            self.score.reward_soft_drop(&self.config);
        }
        moved
    }

    /// Drops the piece onto its ghost and runs an update right away so it locks now.
    pub fn hard_drop(&mut self) {
        if self.game_over {
            return;
        }
        self.recompute_ghost();
        let rows = (self.piece.ghost_y - self.piece.y).max(0) as u32;
        self.score.reward_hard_drop(rows, &self.config);
        self.piece.y = self.piece.ghost_y;
        self.update();
    }

    /// Lowest free placement straight below the piece.
    pub fn recompute_ghost(&mut self) {
        let mut y = self.piece.y;
        while !self.collides_at(self.piece.x, y + 1) {
            y += 1;
        }
        self.piece.ghost_y = y;
    }

    fn lock_piece(&mut self) {
        let ActivePiece {
            kind,
            rotation,
            x,
            y,
            ..
        } = self.piece;
        self.board.lock(kind, rotation, x, y);
        debug!("locked {} at {},{}", kind.name(), x, y);
    }

    /// One gravity step: fall, or lock and spawn, then detect full rows and score them.
    pub fn update(&mut self) {
        if self.game_over {
            return;
        }

        if !self.move_by(0, 1) {
            if self.piece.y == ActivePiece::SPAWN_Y {
                self.game_over = true;
                info!(
                    "game over, score {} level {}",
                    self.score.points(),
                    self.score.level()
                );
                return;
            }
            self.lock_piece();
            self.spawn();
        }

        // A clear that is still waiting for its delay keeps its rows; they are
        // scanned again once compacted.
        if !self.cleared.is_empty() {
            return;
        }
        self.cleared = self.board.full_rows();
        let rows = self.cleared.len();
        if rows > 0 {
            debug!("{} full rows", rows);
        }
        if self.score.register_rows(rows, &self.config) {
            info!(
                "level {}, gravity every {} ms",
                self.score.level(),
                self.score.speed_ms()
            );
        }
    }

    /// Compacts the board over the rows recorded by the last update.
    pub fn clear_rows(&mut self) {
        for row in self.cleared.iter() {
            self.board.collapse_row(row);
        }
        if !self.cleared.is_empty() {
            debug!("cleared {} rows", self.cleared.len());
        }
        self.cleared.clear();
        self.recompute_ghost();
    }
}
