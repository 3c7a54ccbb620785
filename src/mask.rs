//! Fixed-size cell masks backed by a single unsigned integer.
//!
//! An N×N grid fits in `T` as long as `N * N <= T::BITS`. The engine layers
//! three masks per board (ships, hits, misses) and derives every cell state
//! from them, so the mask type stays `no_std`-clean and allocation free.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};
use core::{any, fmt};
use num_traits::{PrimInt, Unsigned, Zero};

/// Errors returned by mask operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// Row or column index outside `[0, N)`.
    OutOfBounds { row: usize, col: usize },
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskError::OutOfBounds { row, col } => {
                write!(f, "cell ({}, {}) is outside the grid", row, col)
            }
        }
    }
}

/// An N×N set of cells packed into the unsigned integer `T`, row-major.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CellMask<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const N: usize> CellMask<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    const CELLS: usize = N * N;

    #[inline]
    fn live_bits() -> T {
        if Self::CELLS == core::mem::size_of::<T>() * 8 {
            !T::zero()
        } else {
            (T::one() << Self::CELLS) - T::one()
        }
    }

    /// Empty mask, no cells set.
    #[inline]
    pub fn new() -> Self {
        CellMask { bits: T::zero() }
    }

    #[inline]
    fn check(row: usize, col: usize) -> Result<usize, MaskError> {
        if row >= N || col >= N {
            Err(MaskError::OutOfBounds { row, col })
        } else {
            Ok(row * N + col)
        }
    }

    /// Whether the cell at (`row`, `col`) is set.
    pub fn contains(&self, row: usize, col: usize) -> Result<bool, MaskError> {
        let idx = Self::check(row, col)?;
        Ok((self.bits >> idx) & T::one() != T::zero())
    }

    /// Set the cell at (`row`, `col`).
    pub fn insert(&mut self, row: usize, col: usize) -> Result<(), MaskError> {
        let idx = Self::check(row, col)?;
        self.bits = self.bits | (T::one() << idx);
        Ok(())
    }

    /// Clear the cell at (`row`, `col`).
    pub fn remove(&mut self, row: usize, col: usize) -> Result<(), MaskError> {
        let idx = Self::check(row, col)?;
        self.bits = self.bits & !(T::one() << idx);
        Ok(())
    }

    /// Number of set cells.
    pub fn count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// True when no cell is set.
    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// The raw packed integer.
    #[inline]
    pub fn into_raw(self) -> T {
        self.bits
    }

    /// Build from a raw integer, discarding bits beyond the grid.
    #[inline]
    pub fn from_raw(raw: T) -> Self {
        CellMask {
            bits: raw & Self::live_bits(),
        }
    }

    /// Build from `(row, col)` pairs.
    pub fn from_cells<I>(cells: I) -> Result<Self, MaskError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut mask = Self::new();
        for (r, c) in cells {
            mask.insert(r, c)?;
        }
        Ok(mask)
    }

    /// Row-major iterator over set cells.
    #[inline]
    pub fn cells(&self) -> Cells<'_, T, N> {
        Cells { mask: self, idx: 0 }
    }

    /// The k-th set cell in row-major order, if it exists.
    pub fn nth_cell(&self, k: usize) -> Option<(usize, usize)> {
        self.cells().nth(k)
    }
}

impl<T, const N: usize> Default for CellMask<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Row-major iterator over the set cells of a mask.
#[derive(Clone, Copy)]
pub struct Cells<'a, T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    mask: &'a CellMask<T, N>,
    idx: usize,
}

impl<'a, T, const N: usize> Iterator for Cells<'a, T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = (usize, usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < N * N {
            let idx = self.idx;
            self.idx += 1;
            if (self.mask.bits >> idx) & T::one() != T::zero() {
                return Some((idx / N, idx % N));
            }
        }
        None
    }
}

impl<T, const N: usize> BitAnd for CellMask<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        CellMask::from_raw(self.bits & rhs.bits)
    }
}

impl<T, const N: usize> BitOr for CellMask<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        CellMask::from_raw(self.bits | rhs.bits)
    }
}

impl<T, const N: usize> Not for CellMask<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        Self::from_raw(!self.bits)
    }
}

impl<T, const N: usize> BitAndAssign for CellMask<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.bits = self.bits & rhs.bits;
    }
}

impl<T, const N: usize> BitOrAssign for CellMask<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits = self.bits | rhs.bits;
    }
}

impl<T, const N: usize> fmt::Debug for CellMask<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CellMask<{}, {}>:", any::type_name::<T>(), N)?;
        fmt::Display::fmt(self, f)
    }
}

impl<T, const N: usize> fmt::Display for CellMask<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..N {
            for c in 0..N {
                let glyph = if (self.bits >> (r * N + c)) & T::one() != T::zero() {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", glyph)?;
            }
            if r + 1 < N {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
