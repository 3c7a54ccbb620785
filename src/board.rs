//! Per-player board state and the redacted view handed to the attacker.

use core::fmt;

use rand::Rng;

use crate::common::{AttackOutcome, CellState, EngineError, TargetCell};
use crate::config::{BOARD_SIZE, FLEET, PLACEMENT_RETRY_LIMIT};
use crate::mask::CellMask;
use crate::ship::{Orientation, ShipClass};

type BB = CellMask<u128, BOARD_SIZE>;

/// One player's board: ship layout plus every attack received against it.
///
/// The board is the single source of truth for its side. Cell states are
/// derived from three masks; a cell never reverts once marked.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    ship_map: BB,
    hits: BB,
    misses: BB,
}

impl Board {
    /// Empty board, no ships placed.
    pub fn new() -> Self {
        Board {
            ship_map: BB::new(),
            hits: BB::new(),
            misses: BB::new(),
        }
    }

    /// State of the cell at (`row`, `col`).
    pub fn cell(&self, row: usize, col: usize) -> Result<CellState, EngineError> {
        if self.hits.contains(row, col)? {
            Ok(CellState::Hit)
        } else if self.misses.contains(row, col)? {
            Ok(CellState::Miss)
        } else if self.ship_map.contains(row, col)? {
            Ok(CellState::Ship)
        } else {
            Ok(CellState::Empty)
        }
    }

    /// Place one ship. Every footprint cell must be in bounds and empty;
    /// otherwise the placement is rejected and the board is unchanged.
    pub fn place(
        &mut self,
        class: ShipClass,
        orientation: Orientation,
        row: usize,
        col: usize,
    ) -> Result<(), EngineError> {
        let footprint: BB = class.footprint(orientation, row, col)?;
        if !(self.ship_map & footprint).is_empty() {
            return Err(EngineError::PlacementInvalid);
        }
        self.ship_map |= footprint;
        Ok(())
    }

    /// Place the entire fleet catalog at random. Each ship samples anchors
    /// and orientations until a legal spot turns up, bounded by
    /// [`PLACEMENT_RETRY_LIMIT`]; exhausting the bound is an internal fault.
    pub fn place_fleet_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), EngineError> {
        for class in FLEET {
            let (orientation, row, col) = self.random_spot(rng, class)?;
            self.place(class, orientation, row, col)?;
        }
        Ok(())
    }

    fn random_spot<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        class: ShipClass,
    ) -> Result<(Orientation, usize, usize), EngineError> {
        for _ in 0..PLACEMENT_RETRY_LIMIT {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_row, max_col) = match orientation {
                Orientation::Horizontal => (BOARD_SIZE - 1, BOARD_SIZE - class.length()),
                Orientation::Vertical => (BOARD_SIZE - class.length(), BOARD_SIZE - 1),
            };
            let row = rng.random_range(0..=max_row);
            let col = rng.random_range(0..=max_col);
            let footprint: BB = class.footprint(orientation, row, col)?;
            if (self.ship_map & footprint).is_empty() {
                return Ok((orientation, row, col));
            }
        }
        Err(EngineError::PlacementExhausted)
    }

    /// Resolve an attack at (`row`, `col`). Attacks on already-resolved
    /// cells are no-ops reported as [`AttackOutcome::Repeat`].
    pub fn attack(&mut self, row: usize, col: usize) -> Result<AttackOutcome, EngineError> {
        if self.hits.contains(row, col)? || self.misses.contains(row, col)? {
            return Ok(AttackOutcome::Repeat);
        }
        if self.ship_map.contains(row, col)? {
            self.hits.insert(row, col)?;
            Ok(AttackOutcome::Hit)
        } else {
            self.misses.insert(row, col)?;
            Ok(AttackOutcome::Miss)
        }
    }

    /// Ship segments placed so far.
    pub fn ship_cells(&self) -> usize {
        self.ship_map.count()
    }

    /// Ship segments not yet hit.
    pub fn surviving_cells(&self) -> usize {
        (self.ship_map & !self.hits).count()
    }

    /// True once every ship segment has been hit.
    pub fn is_defeated(&self) -> bool {
        !self.ship_map.is_empty() && self.surviving_cells() == 0
    }

    /// Ship occupancy mask.
    pub fn ship_map(&self) -> BB {
        self.ship_map
    }

    /// Cells struck on this board.
    pub fn hits(&self) -> BB {
        self.hits
    }

    /// Cells attacked without effect.
    pub fn misses(&self) -> BB {
        self.misses
    }

    /// Redacted projection for the attacking side: hits, misses, unknowns.
    /// Ship locations never cross this boundary.
    pub fn target_view(&self) -> TargetView {
        TargetView {
            hits: self.hits,
            misses: self.misses,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Board {{\n  ship_map:\n{}\n  hits:\n{}\n  misses:\n{}\n}}",
            self.ship_map, self.hits, self.misses
        )
    }
}

/// What the attacker knows about a defender's board. This is the only state
/// the computer-opponent strategies may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetView {
    hits: BB,
    misses: BB,
}

impl TargetView {
    /// What is known about the cell at (`row`, `col`).
    pub fn cell(&self, row: usize, col: usize) -> Result<TargetCell, EngineError> {
        if self.hits.contains(row, col)? {
            Ok(TargetCell::Hit)
        } else if self.misses.contains(row, col)? {
            Ok(TargetCell::Miss)
        } else {
            Ok(TargetCell::Unknown)
        }
    }

    /// True when the in-bounds cell has not been attacked yet. Out-of-bounds
    /// coordinates count as not unknown, which lets neighbor scans skip edge
    /// checks.
    pub fn is_unknown(&self, row: usize, col: usize) -> bool {
        matches!(
            (self.hits.contains(row, col), self.misses.contains(row, col)),
            (Ok(false), Ok(false))
        )
    }

    /// Mask of unattacked cells.
    pub fn unknown_mask(&self) -> BB {
        !(self.hits | self.misses)
    }

    /// Number of unattacked cells.
    pub fn unknown_count(&self) -> usize {
        self.unknown_mask().count()
    }

    /// Mask of struck cells.
    pub fn hit_mask(&self) -> BB {
        self.hits
    }

    /// Build a view directly from hit and miss masks.
    pub fn from_masks(hits: BB, misses: BB) -> Self {
        TargetView { hits, misses }
    }
}
