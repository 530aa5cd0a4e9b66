#![cfg_attr(not(test), allow(dead_code))]

use no_std_strings::str32;

/// Side of the square frame every piece rotation is drawn in.
pub const FRAME: u8 = 4;

/// A 4x4 cell mask. Bit `row * 4 + col` is set when the cell is filled.
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
pub struct Shape {
    pub bits: u16,
}

impl Shape {
    /// Parses up to four lines of up to four characters, `#` marking a filled cell.
    pub fn from_str(shape: &str) -> Self {
        let mut bits = 0;
        for (row, line) in shape.lines().take(FRAME as usize).enumerate() {
            for (col, ch) in line.chars().take(FRAME as usize).enumerate() {
                if ch == '#' {
                    bits |= 1 << (row * FRAME as usize + col);
                }
            }
        }
        Self { bits }
    }

    pub fn is_filled(&self, col: u8, row: u8) -> bool {
        if col >= FRAME || row >= FRAME {
            return false;
        }
        self.bits & (1 << (row * FRAME + col)) != 0
    }

    pub fn len(&self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Filled cells as `(col, row)` offsets inside the frame, row by row.
    pub fn cells(self) -> impl Iterator<Item = (u8, u8)> {
        (0..FRAME * FRAME)
            .filter(move |idx| self.bits & (1 << idx) != 0)
            .map(|idx| (idx % FRAME, idx / FRAME))
    }

    pub fn str(&self) -> str32 {
        let mut repr = str32::new();
        for row in 0..FRAME {
            for col in 0..FRAME {
                let ch = if self.is_filled(col, row) { "#" } else { "." };
                repr.push(ch);
            }
            repr.push("\n");
        }
        repr
    }
}
