use crate::platform::Speaker;

pub const MIN_HZ: u32 = 20;
pub const MAX_HZ: u32 = 20_000;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Note {
    pub hz: u32,
    pub millis: u64,
}

const fn note(hz: u32, millis: u64) -> Note {
    Note { hz, millis }
}

// Mushroom power-up jingle.
const STARTUP: [Note; 25] = [
    note(523, 35),
    note(392, 35),
    note(523, 35),
    note(659, 35),
    note(784, 35),
    note(1047, 35),
    note(784, 35),
    note(415, 35),
    note(523, 35),
    note(622, 35),
    note(831, 35),
    note(622, 35),
    note(831, 35),
    note(1046, 35),
    note(1244, 35),
    note(1661, 35),
    note(1244, 35),
    note(466, 35),
    note(587, 35),
    note(698, 35),
    note(932, 35),
    note(1195, 35),
    note(1397, 35),
    note(1865, 35),
    note(1397, 35),
];

const LEVEL_UP: [Note; 4] = [note(400, 120), note(500, 120), note(600, 120), note(800, 120)];

// "U Can't Touch This" bass line.
const GAME_OVER: [Note; 13] = [
    note(147, 400),
    note(130, 200),
    note(123, 200),
    note(110, 200),
    note(440, 200),
    note(440, 200),
    note(82, 200),
    note(98, 200),
    note(392, 200),
    note(392, 200),
    note(123, 200),
    note(110, 200),
    note(440, 200),
];

/// One-shot audio notifications raised by the game loop.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum Cue {
    Startup,
    LevelUp,
    GameOver,
}

impl Cue {
    pub fn notes(self) -> &'static [Note] {
        match self {
            Cue::Startup => &STARTUP,
            Cue::LevelUp => &LEVEL_UP,
            Cue::GameOver => &GAME_OVER,
        }
    }

    pub fn duration_millis(self) -> u64 {
        self.notes().iter().map(|n| n.millis).sum()
    }
}

pub fn clamp_hz(hz: u32) -> u32 {
    hz.clamp(MIN_HZ, MAX_HZ)
}

/// Plays every note of `cue`, waiting for each one.
pub async fn play<S: Speaker>(speaker: &mut S, cue: Cue) {
    for note in cue.notes() {
        speaker.tone(clamp_hz(note.hz), note.millis).await;
    }
}
