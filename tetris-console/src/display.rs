use smart_leds::RGB8;
use std::fmt::Write as _;
use std::io::{self, Write};
use tetris_lib::board::{BOARD_HEIGHT, BOARD_WIDTH, HIDDEN_ROWS};
use tetris_lib::driver::{Frame, Overlay};
use tetris_lib::fmt::format_number;
use tetris_lib::palette::{
    self, BLACK, BLUE, BRICK, GRAY, GREEN, LIGHT_BLUE, PINK, RED, WHITE,
};
use tetris_lib::piece::{Kind, Rotation};
use tetris_lib::platform::{Command, Renderer};

pub const COLS: usize = 80;
pub const ROWS: usize = 25;

const WELL_X: usize = COLS / 2 - BOARD_WIDTH;
const PREVIEW_X: usize = COLS * 3 / 4 + 1;
const PREVIEW_Y: usize = 2;
const STATUS_X: usize = COLS * 3 / 4;
const STATUS_Y: usize = ROWS / 2 - 4;
const SCORE_Y: usize = ROWS / 2 - 1;
const LEVEL_Y: usize = SCORE_Y + 4;
const TITLE_X: usize = COLS / 2 - 9;
const TITLE_Y: usize = ROWS / 2 - 1;

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Cell {
    pub ch: char,
    pub fg: RGB8,
    pub bg: RGB8,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: GRAY,
            bg: BLACK,
        }
    }
}

/// An 80x25 character grid, drawn in one write.
pub struct Canvas {
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::default(); COLS * ROWS],
        }
    }

    /// Writes `text` from `(x, y)` to the right, clipping at the edge.
    pub fn put(&mut self, x: usize, y: usize, fg: RGB8, bg: RGB8, text: &str) {
        if y >= ROWS {
            return;
        }
        for (offset, ch) in text.chars().enumerate() {
            let col = x + offset;
            if col >= COLS {
                break;
            }
            self.cells[y * COLS + col] = Cell { ch, fg, bg };
        }
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y.min(ROWS - 1) * COLS + x.min(COLS - 1)]
    }

    pub fn row_text(&self, y: usize) -> String {
        let y = y.min(ROWS - 1);
        self.cells[y * COLS..(y + 1) * COLS]
            .iter()
            .map(|cell| cell.ch)
            .collect()
    }

    pub fn to_ansi(&self) -> String {
        let mut out = String::with_capacity(COLS * ROWS * 24);
        out.push_str("\x1b[H");
        for (y, row) in self.cells.chunks(COLS).enumerate() {
            let mut current: Option<(RGB8, RGB8)> = None;
            for cell in row {
                if current != Some((cell.fg, cell.bg)) {
                    let (fg, bg) = (scale(cell.fg), scale(cell.bg));
                    let _ = write!(
                        out,
                        "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m",
                        fg.r, fg.g, fg.b, bg.r, bg.g, bg.b
                    );
                    current = Some((cell.fg, cell.bg));
                }
                out.push(cell.ch);
            }
            out.push_str("\x1b[0m");
            if y + 1 < ROWS {
                out.push_str("\r\n");
            }
        }
        out
    }
}

// Palette entries are dim LED levels; stretch them to terminal range.
fn scale(color: RGB8) -> RGB8 {
    let up = |c: u8| (c as u16 * 20).min(255) as u8;
    RGB8::new(up(color.r), up(color.g), up(color.b))
}

fn kind_color(kind: Kind) -> RGB8 {
    palette::color(kind.color())
}

fn draw_about(canvas: &mut Canvas) {
    let letters = ["T", "E", "T", "R", "I", "S"];
    let colors = [RED, PINK, BLUE, GREEN, BRICK, LIGHT_BLUE];
    for (idx, (letter, bg)) in letters.iter().zip(colors).enumerate() {
        let x = TITLE_X + idx * 3;
        canvas.put(x, TITLE_Y, BLACK, bg, "   ");
        canvas.put(x, TITLE_Y + 1, WHITE, bg, &format!(" {letter} "));
        canvas.put(x, TITLE_Y + 2, BLACK, bg, "   ");
    }
    canvas.put(0, ROWS - 1, GRAY, BLACK, "TETRIS for the terminal");
}

fn draw_well(canvas: &mut Canvas, frame: &Frame<'_>) {
    let game = frame.game;
    let board = game.board();

    for y in HIDDEN_ROWS..BOARD_HEIGHT {
        canvas.put(WELL_X - 1, y, BLACK, GRAY, " ");
        canvas.put(WELL_X + BOARD_WIDTH * 2, y, BLACK, GRAY, " ");
    }
    canvas.put(
        WELL_X - 1,
        BOARD_HEIGHT,
        BLACK,
        GRAY,
        &" ".repeat(BOARD_WIDTH * 2 + 2),
    );

    for y in HIDDEN_ROWS..BOARD_HEIGHT {
        let flashing = game.is_row_flashing(y);
        for (x, &cell) in board.row(y).unwrap_or_default().iter().enumerate() {
            let bg = match cell {
                0 => BLACK,
                _ if flashing => WHITE,
                color => palette::color(color),
            };
            canvas.put(WELL_X + x * 2, y, BLACK, bg, "  ");
        }
    }

    let piece = game.piece();
    let color = kind_color(piece.kind);
    if !game.is_game_over() {
        for (x, y) in piece.ghost_cells() {
            if x >= 0 && y >= 0 {
                canvas.put(WELL_X + x as usize * 2, y as usize, color, BLACK, "::");
            }
        }
    }
    // The piece shows above the border while it is still in the hidden rows.
    for (x, y) in piece.cells() {
        if x >= 0 && y >= 0 {
            canvas.put(WELL_X + x as usize * 2, y as usize, BLACK, color, "  ");
        }
    }

    let preview = game.preview();
    let shape = preview.shape(Rotation::R0);
    for row in 0..4u8 {
        for col in 0..4u8 {
            let bg = if shape.is_filled(col, row) {
                kind_color(preview)
            } else {
                BLACK
            };
            canvas.put(
                PREVIEW_X + col as usize * 2,
                PREVIEW_Y + row as usize,
                BLACK,
                bg,
                "  ",
            );
        }
    }
}

fn draw_status(canvas: &mut Canvas, frame: &Frame<'_>) {
    let game = frame.game;
    if game.is_paused() {
        canvas.put(STATUS_X + 2, STATUS_Y, WHITE, BLACK, "PAUSED");
    }
    if game.is_game_over() {
        canvas.put(STATUS_X, STATUS_Y, WHITE, BLACK, "GAME OVER");
    }

    let score = format_number(game.score().points(), 10, 10);
    canvas.put(STATUS_X + 2, SCORE_Y, GREEN, BLACK, "SCORE");
    canvas.put(STATUS_X, SCORE_Y + 2, WHITE, BLACK, score.as_str());

    let level = format_number(game.score().level(), 10, 10);
    canvas.put(STATUS_X + 2, LEVEL_Y, GREEN, BLACK, "LEVEL");
    canvas.put(STATUS_X, LEVEL_Y + 2, WHITE, BLACK, level.as_str());
}

const HELP: [(&str, &str); 11] = [
    ("LEFT", "- Move left"),
    ("RIGHT", "- Move right"),
    ("UP", "- Rotate clockwise"),
    ("DOWN", "- Soft drop"),
    ("ENTER", "- Hard drop"),
    ("P", "- Pause"),
    ("R", "- Restart"),
    ("ESC/Q", "- Exit"),
    ("S", "- Toggle statistics"),
    ("D", "- Toggle debug info"),
    ("H", "- Toggle help"),
];

fn draw_help(canvas: &mut Canvas) {
    for (idx, (key, action)) in HELP.iter().enumerate() {
        canvas.put(1, 12 + idx, GRAY, BLACK, key);
        canvas.put(7, 12 + idx, BLUE, BLACK, action);
    }
}

fn draw_statistics(canvas: &mut Canvas, frame: &Frame<'_>) {
    for (idx, (kind, count)) in frame.game.statistics().iter().enumerate() {
        let shape = kind.shape(Rotation::R0);
        for (col, row) in shape.cells() {
            canvas.put(
                5 + col as usize * 2,
                1 + idx * 3 + row as usize,
                BLACK,
                kind_color(kind),
                "  ",
            );
        }
        let count = format_number(count, 10, 10);
        canvas.put(14, 2 + idx * 3, BLUE, BLACK, count.as_str());
    }
}

fn command_name(command: Option<Command>) -> String {
    command.map_or_else(|| "-".to_string(), |c| format!("{c:?}"))
}

fn draw_debug(canvas: &mut Canvas, frame: &Frame<'_>) {
    let game = frame.game;
    let piece = game.piece();
    let bag = game.bag();
    let bag_text: String = bag.slots().iter().map(|k| k.name()).collect::<Vec<_>>().join(" ");
    let mark = |m: Option<u64>| m.map_or_else(|| "-".to_string(), |m| m.to_string());

    let lines = [
        ("now:", frame.now.to_string()),
        ("key:", command_name(frame.last_command)),
        (
            "i,r,p:",
            format!(
                "{},{},{}",
                piece.kind.index(),
                piece.rotation.index(),
                bag.cursor()
            ),
        ),
        ("x,y,g:", format!("{},{},{}", piece.x, piece.y, piece.ghost_y)),
        ("bag:", bag_text),
        ("speed:", game.score().speed_ms().to_string()),
        ("gravity:", mark(frame.gravity_mark)),
        ("clear:", mark(frame.clear_mark)),
        ("rows:", game.score().total_rows().to_string()),
    ];
    for (idx, (label, value)) in lines.iter().enumerate() {
        canvas.put(0, idx, GRAY, BLACK, label);
        canvas.put(10, idx, GREEN, BLACK, value);
    }
}

/// Lays out one frame: well, preview and status, plus the selected side panel.
pub fn draw(frame: &Frame<'_>) -> Canvas {
    let mut canvas = Canvas::new();
    if frame.game.is_paused() {
        draw_about(&mut canvas);
    } else {
        draw_well(&mut canvas, frame);
    }
    draw_status(&mut canvas, frame);
    match frame.overlay {
        Overlay::Help => draw_help(&mut canvas),
        Overlay::Debug => draw_debug(&mut canvas, frame),
        Overlay::Statistics => draw_statistics(&mut canvas, frame),
    }
    canvas
}

pub struct ConsoleDisplay;

impl ConsoleDisplay {
    /// Clears the screen and hides the cursor.
    pub fn prepare(&mut self) -> io::Result<()> {
        let mut out = io::stdout();
        out.write_all(b"\x1b[2J\x1b[?25l")?;
        out.flush()
    }

    /// Restores the cursor below the playfield.
    pub fn finish(&mut self) -> io::Result<()> {
        let mut out = io::stdout();
        write!(out, "\x1b[0m\x1b[?25h\x1b[{};1H\r\n", ROWS)?;
        out.flush()
    }

    fn present(&mut self, canvas: &Canvas) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(canvas.to_ansi().as_bytes())?;
        out.flush()
    }
}

impl Renderer for ConsoleDisplay {
    async fn render(&mut self, frame: &Frame<'_>) {
        let canvas = draw(frame);
        if let Err(err) = self.present(&canvas) {
            log::warn!("dropping frame: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetris_lib::config::GameConfig;
    use tetris_lib::driver::Session;

    fn frame_of(session: &Session) -> Canvas {
        draw(&session.frame(0))
    }

    #[test]
    fn status_panel_shows_score_and_level() {
        let session = Session::new(GameConfig::default(), 3, 0);
        let canvas = frame_of(&session);
        assert!(canvas.row_text(SCORE_Y).contains("SCORE"));
        assert!(canvas.row_text(SCORE_Y + 2).contains("0000000000"));
        assert!(canvas.row_text(LEVEL_Y + 2).contains("0000000001"));
        assert!(canvas.row_text(12).contains("Move left"));
        assert!(canvas.row_text(22).contains("H     - Toggle help"));
    }

    #[test]
    fn spawned_piece_is_drawn_in_its_color() {
        let session = Session::new(GameConfig::default(), 3, 0);
        let canvas = frame_of(&session);
        let piece = session.game().piece();
        let color = kind_color(piece.kind);
        for (x, y) in piece.cells() {
            let cell = canvas.cell(WELL_X + x as usize * 2, y as usize);
            assert_eq!(cell.bg, color);
        }
    }

    #[test]
    fn pause_hides_the_well() {
        let mut session = Session::new(GameConfig::default(), 3, 0);
        session.tick(1, Some(Command::Pause));
        let canvas = frame_of(&session);
        assert!(canvas.row_text(STATUS_Y).contains("PAUSED"));
        assert!(canvas.row_text(TITLE_Y + 1).contains(" T  E  T  R  I  S "));
        assert!(canvas.row_text(ROWS - 1).starts_with("TETRIS for the terminal"));
    }

    #[test]
    fn statistics_panel_counts_spawns() {
        let mut session = Session::new(GameConfig::default(), 3, 0);
        session.tick(1, Some(Command::ToggleStatistics));
        let canvas = frame_of(&session);
        let kind = session.game().piece().kind;
        let row = canvas.row_text(2 + kind.index() * 3);
        assert!(row.contains("0000000001"), "{row}");
    }

    #[test]
    fn ansi_output_has_one_line_per_row() {
        let canvas = Canvas::new();
        let text = canvas.to_ansi();
        assert!(text.starts_with("\x1b[H"));
        assert_eq!(text.matches("\r\n").count(), ROWS - 1);
    }

    #[test]
    fn put_clips_at_the_edge() {
        let mut canvas = Canvas::new();
        canvas.put(COLS - 2, 0, WHITE, BLACK, "abcd");
        assert_eq!(canvas.cell(COLS - 1, 0).ch, 'b');
        canvas.put(0, ROWS, WHITE, BLACK, "ignored");
        assert_eq!(canvas.row_text(ROWS - 1).trim(), "");
    }
}
