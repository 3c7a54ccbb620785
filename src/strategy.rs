//! Computer-opponent targeting over a redacted [`TargetView`].
//!
//! The selector never sees ship locations, only hits, misses, and unknowns.
//! Three tiers share two ideas: the *adjacent-unknown* neighbors of a cell,
//! and *incomplete hits*, struck cells whose surrounding ship extent is not
//! yet walled off by misses or edges.

use rand::Rng;

use crate::board::TargetView;

/// Opponent difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Lenient parse for raw user input; anything unrecognized is `Medium`.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("easy") {
            Difficulty::Easy
        } else if name.eq_ignore_ascii_case("hard") {
            Difficulty::Hard
        } else {
            Difficulty::Medium
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Pick the next cell to attack, or `None` when every cell is resolved.
pub fn plan_attack<R: Rng + ?Sized>(
    view: &TargetView,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<(usize, usize)> {
    if view.unknown_count() == 0 {
        return None;
    }
    let pick = match difficulty {
        Difficulty::Easy => pick_uniform(view, rng),
        Difficulty::Medium => pick_hunting(view, rng),
        Difficulty::Hard => pick_focused(view, rng),
    };
    // Unknown cells exist, so the tiers cannot all come up empty; uniform
    // selection is the terminal fallback either way.
    pick.or_else(|| pick_uniform(view, rng))
}

/// Easy: uniform over every unknown cell, no memory of past hits.
fn pick_uniform<R: Rng + ?Sized>(view: &TargetView, rng: &mut R) -> Option<(usize, usize)> {
    let unknown = view.unknown_mask();
    let n = unknown.count();
    if n == 0 {
        return None;
    }
    unknown.nth_cell(rng.random_range(0..n))
}

/// Medium: finish off the first incomplete hit in row-major order, firing at
/// a uniformly random adjacent-unknown cell; otherwise search like Easy.
fn pick_hunting<R: Rng + ?Sized>(view: &TargetView, rng: &mut R) -> Option<(usize, usize)> {
    let (row, col) = view
        .hit_mask()
        .cells()
        .find(|&(r, c)| unknown_neighbors(view, r, c).1 > 0)?;
    let (neighbors, n) = unknown_neighbors(view, row, col);
    Some(neighbors[rng.random_range(0..n)])
}

/// Hard: infer the run direction from two incomplete hits, otherwise rank
/// the neighbors of the most recent incomplete hit, otherwise open on the
/// even-parity checkerboard no length-2 ship can escape.
fn pick_focused<R: Rng + ?Sized>(view: &TargetView, rng: &mut R) -> Option<(usize, usize)> {
    let mut first = None;
    let mut second = None;
    let mut last = None;
    for (r, c) in view.hit_mask().cells() {
        if unknown_neighbors(view, r, c).1 == 0 {
            continue;
        }
        if first.is_none() {
            first = Some((r, c));
        } else if second.is_none() {
            second = Some((r, c));
        }
        last = Some((r, c));
    }

    if let (Some((ar, ac)), Some((br, bc))) = (first, second) {
        // Matching rows read as a horizontal run, matching columns as a
        // vertical one; a diagonal pair yields no inference and selection
        // drops to the single-hit branch.
        let axis_neighbors = if ar == br {
            Some([(ar, ac.wrapping_sub(1)), (ar, ac + 1)])
        } else if ac == bc {
            Some([(ar.wrapping_sub(1), ac), (ar + 1, ac)])
        } else {
            None
        };
        if let Some(pair) = axis_neighbors {
            if let Some(&cell) = pair.iter().find(|&&(r, c)| view.is_unknown(r, c)) {
                return Some(cell);
            }
        }
    }

    if let Some((row, col)) = last {
        let (neighbors, n) = unknown_neighbors(view, row, col);
        // Prefer the neighbor that itself borders the most unexplored
        // cells; scan order wins ties.
        let mut best = neighbors[0];
        let mut best_extent = unknown_neighbors(view, best.0, best.1).1;
        for &candidate in &neighbors[1..n] {
            let extent = unknown_neighbors(view, candidate.0, candidate.1).1;
            if extent > best_extent {
                best = candidate;
                best_extent = extent;
            }
        }
        return Some(best);
    }

    // Fresh search. A ship of length 2 always touches a cell with even
    // row+col parity, so exhaust those before the complement.
    let unknown = view.unknown_mask();
    let even = unknown.cells().filter(|&(r, c)| (r + c) % 2 == 0).count();
    if even > 0 {
        let k = rng.random_range(0..even);
        return unknown.cells().filter(|&(r, c)| (r + c) % 2 == 0).nth(k);
    }
    pick_uniform(view, rng)
}

/// In-bounds orthogonal neighbors of (`row`, `col`) that are still unknown,
/// up to four, in up/down/left/right order.
fn unknown_neighbors(
    view: &TargetView,
    row: usize,
    col: usize,
) -> ([(usize, usize); 4], usize) {
    let candidates = [
        (row.wrapping_sub(1), col),
        (row + 1, col),
        (row, col.wrapping_sub(1)),
        (row, col + 1),
    ];
    let mut out = [(0, 0); 4];
    let mut n = 0;
    for (r, c) in candidates {
        if view.is_unknown(r, c) {
            out[n] = (r, c);
            n += 1;
        }
    }
    (out, n)
}
