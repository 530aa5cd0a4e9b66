use crate::board::BOARD_WIDTH;
use crate::palette::{
    BLUE_IDX, BRICK_IDX, GREEN_IDX, LIGHT_BLUE_IDX, PINK_IDX, RED_IDX, YELLOW_IDX,
};
use crate::shape::Shape;

pub const KIND_COUNT: usize = 7;
pub const ROTATIONS: usize = 4;

// Generated by build.rs from the ASCII catalog.
include!(concat!(env!("OUT_DIR"), "/catalog.rs"));

/// The seven tetrominoes, in catalog order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
#[repr(u8)]
pub enum Kind {
    I = 0,
    J = 1,
    L = 2,
    O = 3,
    S = 4,
    T = 5,
    Z = 6,
}

impl Kind {
    pub const ALL: [Kind; KIND_COUNT] = [
        Kind::I,
        Kind::J,
        Kind::L,
        Kind::O,
        Kind::S,
        Kind::T,
        Kind::Z,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Kind> {
        Self::ALL.get(idx).copied()
    }

    pub fn shape(self, rotation: Rotation) -> Shape {
        SHAPES[self.index()][rotation.index()]
    }

    /// Color tag written into the board when a piece of this kind locks. Never zero.
    pub fn color(self) -> u8 {
        match self {
            Kind::I => LIGHT_BLUE_IDX,
            Kind::J => BLUE_IDX,
            Kind::L => BRICK_IDX,
            Kind::O => YELLOW_IDX,
            Kind::S => GREEN_IDX,
            Kind::T => PINK_IDX,
            Kind::Z => RED_IDX,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::I => "I",
            Kind::J => "J",
            Kind::L => "L",
            Kind::O => "O",
            Kind::S => "S",
            Kind::T => "T",
            Kind::Z => "Z",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
#[repr(u8)]
pub enum Rotation {
    #[default]
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
}

impl Rotation {
    pub const ALL: [Rotation; ROTATIONS] = [Rotation::R0, Rotation::R1, Rotation::R2, Rotation::R3];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Clockwise successor.
    pub fn next(self) -> Rotation {
        Self::ALL[(self.index() + 1) % ROTATIONS]
    }
}

/// The falling piece. `x`/`y` locate the top-left corner of its 4x4 frame on the board.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ActivePiece {
    pub kind: Kind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub ghost_y: i8,
}

impl ActivePiece {
    pub const SPAWN_X: i8 = BOARD_WIDTH as i8 / 2 - 2;
    pub const SPAWN_Y: i8 = 0;

    pub fn spawn(kind: Kind) -> Self {
        Self {
            kind,
            rotation: Rotation::R0,
            x: Self::SPAWN_X,
            y: Self::SPAWN_Y,
            ghost_y: Self::SPAWN_Y,
        }
    }

    pub fn shape(&self) -> Shape {
        self.kind.shape(self.rotation)
    }

    /// Board coordinates of the filled cells at the current position.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.shape()
            .cells()
            .map(move |(col, row)| (x + col as i8, y + row as i8))
    }

    /// Board coordinates of the filled cells at the ghost position.
    pub fn ghost_cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.ghost_y);
        self.shape()
            .cells()
            .map(move |(col, row)| (x + col as i8, y + row as i8))
    }
}
