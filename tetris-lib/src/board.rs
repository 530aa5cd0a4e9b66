use crate::palette::BLACK_IDX;
use crate::piece::{Kind, Rotation};

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 22;
pub const BOARD_SIZE: usize = BOARD_WIDTH * BOARD_HEIGHT;
/// Rows at the top that belong to the playfield but are not drawn.
pub const HIDDEN_ROWS: usize = 2;
/// Most rows a single piece can complete at once.
pub const MAX_CLEARED_ROWS: usize = 4;

pub const EMPTY: u8 = BLACK_IDX;

/// Locked cells of the well. Each cell holds a color index, [`EMPTY`] when free.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    content: [u8; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            content: [EMPTY; BOARD_SIZE],
        }
    }

    pub fn clear(&mut self) {
        self.content.fill(EMPTY);
    }

    // The only place board coordinates turn into storage offsets.
    fn offset(x: i8, y: i8) -> Option<usize> {
        if x >= 0 && (x as usize) < BOARD_WIDTH && y >= 0 && (y as usize) < BOARD_HEIGHT {
            Some(y as usize * BOARD_WIDTH + x as usize)
        } else {
            None
        }
    }

    /// Color at `(x, y)`, `None` outside the well.
    pub fn get(&self, x: i8, y: i8) -> Option<u8> {
        Self::offset(x, y).map(|idx| self.content[idx])
    }

    /// Writes a cell, returning `false` when `(x, y)` is outside the well.
    pub fn set(&mut self, x: i8, y: i8, color: u8) -> bool {
        match Self::offset(x, y) {
            Some(idx) => {
                self.content[idx] = color;
                true
            }
            None => false,
        }
    }

    /// Cells of `row`, left to right, `None` below the well.
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row >= BOARD_HEIGHT {
            return None;
        }
        Some(&self.content[row * BOARD_WIDTH..(row + 1) * BOARD_WIDTH])
    }

    /// True if any filled cell of `kind` in `rotation`, placed with its frame at
    /// `(x, y)`, lands outside the well or on a locked cell.
    pub fn collides(&self, kind: Kind, rotation: Rotation, x: i8, y: i8) -> bool {
        kind.shape(rotation).cells().any(|(col, row)| {
            let (Some(cx), Some(cy)) = (x.checked_add(col as i8), y.checked_add(row as i8))
            else {
                return true;
            };
            self.get(cx, cy).map_or(true, |color| color != EMPTY)
        })
    }

    /// Copies the filled cells of the piece into the well.
    pub fn lock(&mut self, kind: Kind, rotation: Rotation, x: i8, y: i8) {
        let color = kind.color();
        for (col, row) in kind.shape(rotation).cells() {
            self.set(x + col as i8, y + row as i8, color);
        }
    }

    pub fn row_is_full(&self, row: usize) -> bool {
        self.row(row)
            .is_some_and(|cells| cells.iter().all(|&cell| cell != EMPTY))
    }

    pub fn row_is_empty(&self, row: usize) -> bool {
        self.row(row)
            .is_some_and(|cells| cells.iter().all(|&cell| cell == EMPTY))
    }

    /// Full rows, top to bottom, at most [`MAX_CLEARED_ROWS`] of them.
    pub fn full_rows(&self) -> RowSet {
        let mut rows = RowSet::new();
        for row in 0..BOARD_HEIGHT {
            if self.row_is_full(row) && !rows.push(row) {
                break;
            }
        }
        rows
    }

    /// Removes `cleared_row` by moving every row above it down by one. Row 0 is left empty.
    pub fn collapse_row(&mut self, cleared_row: usize) {
        if cleared_row >= BOARD_HEIGHT {
            return;
        }
        let end = (cleared_row + 1) * BOARD_WIDTH;
        self.content.copy_within(0..end - BOARD_WIDTH, BOARD_WIDTH);
        self.content[..BOARD_WIDTH].fill(EMPTY);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Row indices waiting to be compacted, in the order they were found.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct RowSet {
    rows: [u8; MAX_CLEARED_ROWS],
    len: u8,
}

impl RowSet {
    pub const fn new() -> Self {
        Self {
            rows: [0; MAX_CLEARED_ROWS],
            len: 0,
        }
    }

    /// Records a row, returning `false` once the set is full.
    pub fn push(&mut self, row: usize) -> bool {
        if self.len as usize == MAX_CLEARED_ROWS || row >= BOARD_HEIGHT {
            return false;
        }
        self.rows[self.len as usize] = row as u8;
        self.len += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, row: usize) -> bool {
        self.iter().any(|r| r == row)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows[..self.len()].iter().map(|&row| row as usize)
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }
}
