//! Ship classes and placed ships.

use core::fmt;
use num_traits::{PrimInt, Unsigned, Zero};

use crate::common::BoardError;
use crate::grid::Grid;

/// Orientation of a ship on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A class of ship: display name and hull length.
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
}

/// A ship placed on an `N×N` grid, with hits tracked per segment.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    class: ShipClass,
    orientation: Orientation,
    row: usize,
    col: usize,
    mask: Grid<T, N>,
    hits: Grid<T, N>,
}

impl<T, const N: usize> Ship<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    /// Place a ship with its bow at (`row`, `col`), extending right or
    /// down by `orientation`. Fails if any segment falls off the grid.
    pub fn new(
        class: ShipClass,
        orientation: Orientation,
        row: usize,
        col: usize,
    ) -> Result<Self, BoardError> {
        let len = class.length();
        match orientation {
            Orientation::Horizontal if col + len > N => return Err(BoardError::ShipOutOfBounds),
            Orientation::Vertical if row + len > N => return Err(BoardError::ShipOutOfBounds),
            _ => {}
        }

        let mut mask = Grid::<T, N>::new();
        for i in 0..len {
            let (r, c) = match orientation {
                Orientation::Horizontal => (row, col + i),
                Orientation::Vertical => (row + i, col),
            };
            mask.set(r, c)?;
        }

        Ok(Ship {
            class,
            orientation,
            row,
            col,
            mask,
            hits: Grid::new(),
        })
    }

    /// Whether the ship occupies (`row`, `col`).
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.mask.get(row, col).unwrap_or(false)
    }

    /// Record a hit at (`row`, `col`). Returns `true` when the cell
    /// belongs to this ship; re-hitting a cell is idempotent.
    pub fn register_hit(&mut self, row: usize, col: usize) -> bool {
        if self.contains(row, col) {
            let _ = self.hits.set(row, col);
            true
        } else {
            false
        }
    }

    /// All segments hit.
    pub fn is_sunk(&self) -> bool {
        self.hits.count() == self.class.length()
    }

    pub fn class(&self) -> ShipClass {
        self.class
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Bow position (row, col).
    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Occupancy mask of the ship on the grid.
    pub fn mask(&self) -> Grid<T, N> {
        self.mask
    }

    /// Iterator over occupied cells in ascending `(row, col)` order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.mask.cells()
    }
}

impl<T, const N: usize> fmt::Debug for Ship<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ class: \"{}\", origin: ({}, {}), orientation: {:?}, hits: {} }}",
            self.class.name(),
            self.row,
            self.col,
            self.orientation,
            self.hits.count(),
        )
    }
}
