#![cfg_attr(not(feature = "std"), no_std)]

//! Broadside: a 10×10 naval combat engine with a three-tier computer
//! opponent. The crate owns board state, placement validation, turn
//! sequencing, attack resolution, win detection, and opponent targeting;
//! presentation layers consume the read-only views it exposes.

mod board;
mod common;
mod config;
mod game;
#[cfg(feature = "std")]
mod logging;
mod mask;
#[cfg(feature = "std")]
mod session;
mod ship;
mod strategy;

pub use board::{Board, TargetView};
pub use common::{AttackOutcome, CellState, EngineError, TargetCell};
pub use config::*;
pub use game::{Game, GameMode, Phase, PlayerId};
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use mask::{CellMask, Cells, MaskError};
#[cfg(feature = "std")]
pub use session::VsComputerSession;
pub use ship::{Orientation, ShipClass};
pub use strategy::{plan_attack, Difficulty};
