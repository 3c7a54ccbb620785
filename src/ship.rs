//! Ship catalog entries and footprint computation.

use num_traits::{PrimInt, Unsigned, Zero};

use crate::common::EngineError;
use crate::mask::CellMask;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The other orientation. Placement UIs flip between the two.
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// A class of ship in the fixed fleet catalog: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipClass {
    name: &'static str,
    length: usize,
}

impl ShipClass {
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Cells the ship would occupy when anchored at (`row`, `col`) running
    /// rightward (horizontal) or downward (vertical). Rejects runs that do
    /// not fit on the grid; no partial footprint is ever produced.
    pub fn footprint<T, const N: usize>(
        &self,
        orientation: Orientation,
        row: usize,
        col: usize,
    ) -> Result<CellMask<T, N>, EngineError>
    where
        T: PrimInt + Unsigned + Zero,
    {
        if row >= N || col >= N {
            return Err(EngineError::PlacementInvalid);
        }
        let fits = match orientation {
            Orientation::Horizontal => col + self.length <= N,
            Orientation::Vertical => row + self.length <= N,
        };
        if !fits {
            return Err(EngineError::PlacementInvalid);
        }
        let cells = (0..self.length).map(|i| match orientation {
            Orientation::Horizontal => (row, col + i),
            Orientation::Vertical => (row + i, col),
        });
        CellMask::from_cells(cells).map_err(EngineError::from)
    }
}
