use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tetris_lib::config::GameConfig;
use tetris_lib::driver::run_game;
use tetris_lib::platform::{Clock, Speaker, Timer};

mod control;
mod display;

use control::{enable_raw_mode, restore_terminal, ConsoleController};
use display::ConsoleDisplay;

pub struct ConsoleTimer;

impl Timer for ConsoleTimer {
    async fn sleep_millis(&self, millis: u64) {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}

pub struct ConsoleClock {
    start: Instant,
}

impl Clock for ConsoleClock {
    fn now_millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

// Terminals have no tone generator; cues keep their timing and show up in the log.
pub struct TerminalSpeaker;

impl Speaker for TerminalSpeaker {
    async fn tone(&mut self, hz: u32, millis: u64) {
        log::debug!("tone {hz} Hz for {millis} ms");
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    enable_raw_mode()?;

    ctrlc::set_handler(move || {
        restore_terminal();
        println!("\r\nTerminal restored. Goodbye!");
        std::process::exit(0);
    })?;

    let mut display = ConsoleDisplay;
    display.prepare()?;
    let mut controller = ConsoleController::new();
    let mut speaker = TerminalSpeaker;
    let clock = ConsoleClock {
        start: Instant::now(),
    };
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;

    let exit = run_game(
        &mut controller,
        &mut display,
        &mut speaker,
        &clock,
        &ConsoleTimer,
        GameConfig::default(),
        seed,
    )
    .await;
    log::info!("game loop finished: {exit:?}");

    display.finish()?;
    restore_terminal();
    println!("Goodbye!");
    Ok(())
}
