use core::time::Duration;

use crate::ship::ShipClass;
use crate::strategy::Difficulty;

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;

/// Fleet catalog, placed in this order for both players.
pub const FLEET: [ShipClass; NUM_SHIPS] = [
    ShipClass::new("Carrier", 5),
    ShipClass::new("Battleship", 4),
    ShipClass::new("Cruiser", 3),
    ShipClass::new("Submarine", 3),
    ShipClass::new("Destroyer", 2),
];

/// Total ship segments across the catalog.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Attempts per ship before randomized placement gives up. 17 occupied cells
/// on a 100-cell grid leaves this bound practically unreachable; hitting it
/// is an internal fault, not a recoverable branch.
pub const PLACEMENT_RETRY_LIMIT: usize = 150;

/// Artificial pause before a scheduled computer move fires.
pub fn think_delay(difficulty: Difficulty) -> Duration {
    match difficulty {
        Difficulty::Easy => Duration::from_millis(500),
        Difficulty::Medium => Duration::from_millis(800),
        Difficulty::Hard => Duration::from_millis(1200),
    }
}
