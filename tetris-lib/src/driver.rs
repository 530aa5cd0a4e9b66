use crate::config::GameConfig;
use crate::game::GameState;
use crate::log::{debug, info};
use crate::platform::{Clock, Command, InputSource, Renderer, Speaker, Timer};
use crate::sound::{self, Cue};
use crate::timer::IntervalTimer;

/// Side panel shown next to the well. Purely a presentation choice.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Overlay {
    #[default]
    Help,
    Debug,
    Statistics,
}

impl Overlay {
    // Debug and statistics toggle against help; help always wins.
    fn toggle(self, target: Overlay) -> Overlay {
        if self == target {
            Overlay::Help
        } else {
            target
        }
    }
}

/// Read-only snapshot handed to the renderer.
pub struct Frame<'a> {
    pub game: &'a GameState,
    pub overlay: Overlay,
    pub last_command: Option<Command>,
    pub now: u64,
    pub gravity_mark: Option<u64>,
    pub clear_mark: Option<u64>,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Exit {
    Quit,
}

/// What one loop iteration asks the driver to do.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Tick {
    pub redraw: bool,
    pub cue: Option<Cue>,
    pub exit: Option<Exit>,
}

/// The game plus the two timers that pace it.
pub struct Session {
    game: GameState,
    gravity: IntervalTimer,
    clear: IntervalTimer,
    overlay: Overlay,
    last_command: Option<Command>,
    game_over_announced: bool,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64, now: u64) -> Self {
        let mut session = Self {
            game: GameState::new(config, seed),
            gravity: IntervalTimer::new(),
            clear: IntervalTimer::new(),
            overlay: Overlay::default(),
            last_command: None,
            game_over_announced: false,
        };
        session.rearm(now);
        session
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    /// Restarts both timers from `now`. Used after a pause, a new game or a blocking cue
    /// so the time spent there does not count towards gravity.
    pub fn rearm(&mut self, now: u64) {
        self.gravity.arm(now);
        self.clear.disarm();
    }

    pub fn frame(&self, now: u64) -> Frame<'_> {
        Frame {
            game: &self.game,
            overlay: self.overlay,
            last_command: self.last_command,
            now,
            gravity_mark: self.gravity.mark(),
            clear_mark: self.clear.mark(),
        }
    }

    fn apply(&mut self, now: u64, command: Command, tick: &mut Tick) {
        match command {
            Command::MoveLeft => {
                self.game.move_by(-1, 0);
            }
            Command::MoveRight => {
                self.game.move_by(1, 0);
            }
            Command::Rotate => {
                self.game.rotate();
            }
            Command::SoftDrop => {
                self.game.soft_drop();
            }
            Command::HardDrop => self.game.hard_drop(),
            Command::Pause => {
                let paused = self.game.toggle_pause();
                debug!("paused: {}", paused);
                if !paused {
                    self.rearm(now);
                }
            }
            Command::Restart => {
                self.game.reset();
                self.game_over_announced = false;
                self.rearm(now);
            }
            Command::Quit => tick.exit = Some(Exit::Quit),
            Command::ToggleDebug => self.overlay = self.overlay.toggle(Overlay::Debug),
            Command::ToggleStatistics => {
                self.overlay = self.overlay.toggle(Overlay::Statistics)
            }
            Command::ToggleHelp => self.overlay = Overlay::Help,
        }
    }

    /// Runs one iteration of the game loop at time `now`.
    pub fn tick(&mut self, now: u64, command: Option<Command>) -> Tick {
        let mut tick = Tick::default();

        if let Some(command) = command {
            self.last_command = Some(command);
            self.apply(now, command, &mut tick);
            tick.redraw = true;
            if tick.exit.is_some() {
                return tick;
            }
        }

        if !self.game.is_paused() && !self.game.is_game_over() {
            let speed = self.game.score().speed_ms() as u64;
            if self.gravity.interval(now, speed) {
                self.game.update();
                tick.redraw = true;
            }

            let delay = self.game.config().clear_delay_ms as u64;
            if self.game.has_pending_clear() && self.clear.wait(now, delay) {
                self.game.clear_rows();
                tick.redraw = true;
            }
        }

        if self.game.take_level_up() {
            tick.cue = Some(Cue::LevelUp);
        }
        if self.game.is_game_over() && !self.game_over_announced {
            self.game_over_announced = true;
            tick.cue = Some(Cue::GameOver);
            tick.redraw = true;
        }
        tick
    }
}

/// Cooperative game loop: poll input and clock, advance the game, draw, play cues.
///
/// Returns when the player quits. Restarts happen inside the loop.
pub async fn run_game<I, R, S, C, T>(
    input: &mut I,
    renderer: &mut R,
    speaker: &mut S,
    clock: &C,
    timer: &T,
    config: GameConfig,
    seed: u64,
) -> Exit
where
    I: InputSource,
    R: Renderer,
    S: Speaker,
    C: Clock,
    T: Timer,
{
    info!("starting game, seed {}", seed);
    sound::play(speaker, Cue::Startup).await;

    let mut session = Session::new(config, seed, clock.now_millis());
    renderer.render(&session.frame(clock.now_millis())).await;

    loop {
        let command = input.poll().await;
        let now = clock.now_millis();
        let tick = session.tick(now, command);

        if tick.redraw {
            renderer.render(&session.frame(now)).await;
        }
        if let Some(cue) = tick.cue {
            sound::play(speaker, cue).await;
            session.rearm(clock.now_millis());
        }
        if let Some(exit) = tick.exit {
            info!("leaving game loop");
            return exit;
        }

        timer.sleep_millis(config.poll_interval_ms).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BOARD_WIDTH, EMPTY};
    use crate::palette::GRAY_IDX;
    use crate::piece::{Kind, Rotation};
    use std::cell::Cell;
    use std::collections::VecDeque;

    fn session() -> Session {
        Session::new(GameConfig::default(), 11, 0)
    }

    #[test]
    fn gravity_follows_the_level_speed() {
        let mut session = session();
        let y = session.game().piece().y;
        assert!(!session.tick(999, None).redraw);
        assert_eq!(session.game().piece().y, y);
        assert!(session.tick(1000, None).redraw);
        assert_eq!(session.game().piece().y, y + 1);
        assert!(!session.tick(1500, None).redraw);
        session.tick(2000, None);
        assert_eq!(session.game().piece().y, y + 2);
    }

    #[test]
    fn commands_move_the_piece_and_redraw() {
        let mut session = session();
        let x = session.game().piece().x;
        let tick = session.tick(10, Some(Command::MoveLeft));
        assert!(tick.redraw);
        assert_eq!(session.game().piece().x, x - 1);
        session.tick(20, Some(Command::MoveRight));
        session.tick(30, Some(Command::MoveRight));
        assert_eq!(session.game().piece().x, x + 1);
        assert_eq!(session.frame(30).last_command, Some(Command::MoveRight));
    }

    #[test]
    fn pause_freezes_gravity_and_resume_rearms() {
        let mut session = session();
        let y = session.game().piece().y;
        session.tick(100, Some(Command::Pause));
        assert!(session.game().is_paused());
        session.tick(5000, None);
        assert_eq!(session.game().piece().y, y);

        session.tick(6000, Some(Command::Pause));
        assert!(!session.game().is_paused());
        // A long pause does not trigger an immediate gravity step.
        assert_eq!(session.game().piece().y, y);
        session.tick(6999, None);
        assert_eq!(session.game().piece().y, y);
        session.tick(7000, None);
        assert_eq!(session.game().piece().y, y + 1);
    }

    // Row 21 full except under an O resting on the floor; the next gravity step locks it.
    fn session_about_to_complete_a_row() -> Session {
        let mut session = session();
        for x in (0..BOARD_WIDTH as i8).filter(|x| !matches!(x, 4 | 5)) {
            session.game.board_mut().set(x, 21, GRAY_IDX);
        }
        session.game.place(Kind::O, Rotation::R0, 3, 19);
        session
    }

    #[test]
    fn full_rows_wait_for_the_clear_delay() {
        let mut session = session_about_to_complete_a_row();
        session.tick(1000, None);
        assert!(session.game().has_pending_clear());
        assert!(session.game().board().row_is_full(21));

        let x = session.game().piece().x;
        session.tick(1050, Some(Command::MoveLeft));
        assert_eq!(session.game().piece().x, x - 1);
        assert!(session.game().has_pending_clear());
        assert_eq!(session.frame(1050).clear_mark, Some(1000));

        assert!(!session.tick(1099, None).redraw);
        assert!(session.game().has_pending_clear());

        assert!(session.tick(1100, None).redraw);
        assert!(!session.game().has_pending_clear());
        assert_eq!(session.frame(1100).clear_mark, None);
        let board = session.game().board();
        assert_eq!(board.get(4, 21), Some(Kind::O.color()));
        assert_eq!(board.get(5, 21), Some(Kind::O.color()));
        assert_eq!(board.get(0, 21), Some(EMPTY));
        assert!(board.row_is_empty(20));
        assert_eq!(session.game().score().points(), 100);
    }

    #[test]
    fn pause_holds_a_pending_clear() {
        let mut session = session_about_to_complete_a_row();
        session.tick(1000, None);
        session.tick(1050, Some(Command::Pause));
        session.tick(5000, None);
        assert!(session.game().has_pending_clear());

        // Resuming restarts the delay from the resume time.
        session.tick(6000, Some(Command::Pause));
        assert!(!session.game().is_paused());
        session.tick(6099, None);
        assert!(session.game().has_pending_clear());
        session.tick(6100, None);
        assert!(!session.game().has_pending_clear());
        assert!(session.game().board().row_is_empty(20));
    }

    #[test]
    fn hard_drops_eventually_end_the_game() {
        let mut session = session();
        let mut cue = None;
        for i in 0..200 {
            let tick = session.tick(i, Some(Command::HardDrop));
            if tick.cue == Some(Cue::GameOver) {
                cue = tick.cue;
                break;
            }
        }
        assert_eq!(cue, Some(Cue::GameOver));
        assert!(session.game().is_game_over());
        // Announced only once.
        assert_eq!(session.tick(500, None).cue, None);

        session.tick(600, Some(Command::Restart));
        assert!(!session.game().is_game_over());
        assert_eq!(session.game().statistics().total(), 1);
    }

    #[test]
    fn overlay_toggles() {
        let mut session = session();
        assert_eq!(session.overlay(), Overlay::Help);
        session.tick(1, Some(Command::ToggleDebug));
        assert_eq!(session.overlay(), Overlay::Debug);
        session.tick(2, Some(Command::ToggleStatistics));
        assert_eq!(session.overlay(), Overlay::Statistics);
        session.tick(3, Some(Command::ToggleStatistics));
        assert_eq!(session.overlay(), Overlay::Help);
        session.tick(4, Some(Command::ToggleDebug));
        session.tick(5, Some(Command::ToggleHelp));
        assert_eq!(session.overlay(), Overlay::Help);
    }

    struct Script(VecDeque<Option<Command>>);

    impl InputSource for Script {
        async fn poll(&mut self) -> Option<Command> {
            self.0.pop_front().unwrap_or(Some(Command::Quit))
        }
    }

    #[derive(Default)]
    struct Screen {
        frames: usize,
        last_y: i8,
    }

    impl Renderer for Screen {
        async fn render(&mut self, frame: &Frame<'_>) {
            self.frames += 1;
            self.last_y = frame.game.piece().y;
        }
    }

    #[derive(Default)]
    struct Silent {
        notes: usize,
    }

    impl Speaker for Silent {
        async fn tone(&mut self, _hz: u32, _millis: u64) {
            self.notes += 1;
        }
    }

    // Every sleep advances the fake clock.
    struct FakeTime(Cell<u64>);

    impl Clock for FakeTime {
        fn now_millis(&self) -> u64 {
            self.0.get()
        }
    }

    impl Timer for FakeTime {
        async fn sleep_millis(&self, millis: u64) {
            self.0.set(self.0.get() + millis.max(1) * 250);
        }
    }

    #[test]
    fn loop_runs_until_quit() {
        let mut input = Script(VecDeque::from(vec![
            None,
            Some(Command::MoveLeft),
            None,
            None,
            None,
            None,
            None,
        ]));
        let mut screen = Screen::default();
        let mut speaker = Silent::default();
        let time = FakeTime(Cell::new(0));

        let exit = pollster::block_on(run_game(
            &mut input,
            &mut screen,
            &mut speaker,
            &time,
            &time,
            GameConfig::default(),
            5,
        ));

        assert_eq!(exit, Exit::Quit);
        assert_eq!(speaker.notes, Cue::Startup.notes().len());
        // Initial frame, the move, then gravity at 1000 ms, and the quit.
        assert!(screen.frames >= 4, "{}", screen.frames);
        assert_eq!(screen.last_y, 1);
    }
}
