//! Shared engine types: cell states, attack outcomes, and the error taxonomy.

use core::fmt;

use crate::mask::MaskError;

/// State of one cell on a player's own board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    /// Untouched water.
    Empty,
    /// Ship segment, not yet attacked.
    Ship,
    /// Ship segment that has been attacked.
    Hit,
    /// Attacked cell that held no ship.
    Miss,
}

/// State of one cell as the attacking side sees it. Ship cells are never
/// exposed through this projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetCell {
    Unknown,
    Hit,
    Miss,
}

/// Result of an attack on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// A ship segment was struck.
    Hit,
    /// Open water.
    Miss,
    /// The cell was already resolved; nothing changed and the turn does
    /// not pass.
    Repeat,
}

/// Errors returned by engine operations. Every rejection leaves state
/// untouched.
#[derive(Debug, PartialEq, Eq)]
pub enum EngineError {
    /// Underlying mask error (out-of-bounds coordinate).
    Mask(MaskError),
    /// Placement would leave the grid or overlap another ship.
    PlacementInvalid,
    /// All ships in the catalog are already placed for this player.
    FleetComplete,
    /// The operation is not valid in the current phase.
    WrongPhase,
    /// The addressed player is not the defender this turn.
    WrongTurn,
    /// Randomized placement exhausted its retry bound.
    PlacementExhausted,
}

impl From<MaskError> for EngineError {
    fn from(err: MaskError) -> Self {
        EngineError::Mask(err)
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Mask(e) => write!(f, "mask error: {}", e),
            EngineError::PlacementInvalid => {
                write!(f, "placement is out of bounds or overlaps another ship")
            }
            EngineError::FleetComplete => write!(f, "all ships are already placed"),
            EngineError::WrongPhase => write!(f, "operation not valid in the current phase"),
            EngineError::WrongTurn => write!(f, "that player is not the defender this turn"),
            EngineError::PlacementExhausted => {
                write!(f, "randomized placement exhausted its retry bound")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}
