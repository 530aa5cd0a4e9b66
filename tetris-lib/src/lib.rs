//! Falling-block puzzle engine for firmware and hosted frontends.
//!
//! [`game::GameState`] holds a whole game; [`driver::run_game`] paces it against the
//! platform traits in [`platform`].

#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

mod log;

pub mod bag;
pub mod board;
pub mod config;
pub mod driver;
pub mod fmt;
pub mod game;
pub mod palette;
pub mod piece;
pub mod platform;
pub mod score;
pub mod shape;
pub mod sound;
pub mod stats;
pub mod timer;
