use smart_leds::RGB8;

pub const BLACK: RGB8 = RGB8::new(0, 0, 0);
pub const BRICK: RGB8 = RGB8::new(12, 6, 0);
pub const RED: RGB8 = RGB8::new(12, 0, 0);
pub const GREEN: RGB8 = RGB8::new(0, 12, 0);
pub const BLUE: RGB8 = RGB8::new(0, 0, 12);
pub const LIGHT_BLUE: RGB8 = RGB8::new(0, 12, 12);
pub const PINK: RGB8 = RGB8::new(9, 0, 9);
pub const YELLOW: RGB8 = RGB8::new(12, 12, 0);
pub const GRAY: RGB8 = RGB8::new(6, 6, 6);
pub const WHITE: RGB8 = RGB8::new(12, 12, 12);

// Color indices. Board cells store these, 0 meaning empty.
pub const BLACK_IDX: u8 = 0;
pub const BRICK_IDX: u8 = 1;
pub const RED_IDX: u8 = 2;
pub const GREEN_IDX: u8 = 3;
pub const BLUE_IDX: u8 = 4;
pub const LIGHT_BLUE_IDX: u8 = 5;
pub const PINK_IDX: u8 = 6;
pub const YELLOW_IDX: u8 = 7;
pub const GRAY_IDX: u8 = 8;
pub const WHITE_IDX: u8 = 9;

pub type ColorsType = [RGB8; 10];
pub const COLORS: ColorsType = [
    BLACK, BRICK, RED, GREEN, BLUE, LIGHT_BLUE, PINK, YELLOW, GRAY, WHITE,
];

/// Looks up a color index, wrapping indices past the end of the palette.
pub fn color(idx: u8) -> RGB8 {
    COLORS[idx as usize % COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_table() {
        assert_eq!(color(BLACK_IDX), BLACK);
        assert_eq!(color(WHITE_IDX), WHITE);
        assert_eq!(color(PINK_IDX), PINK);
        assert_eq!(color(WHITE_IDX + 1), BLACK);
    }
}
