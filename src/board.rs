//! Board state for one side of a session.
//!
//! Four cell-flag grids back everything the protocol needs to know:
//! our ship occupancy, the cells the peer has bombed, and the derived
//! view of the peer's board (cells we bombed, cells confirmed as ship).
//! The peer's real board is never observed directly; `remote_ships` only
//! ever grows one confirmed hit at a time.

use rand::Rng;

use crate::common::{BoardError, Coord, ShotOutcome};
use crate::config::{FLEET, FLEET_SIZE, GRID_SIZE};
use crate::grid::Grid;
use crate::ship::{Orientation, Ship, ShipClass};

type CellGrid = Grid<u128, GRID_SIZE>;

pub struct Board {
    ships: [Option<Ship<u128, GRID_SIZE>>; FLEET_SIZE],
    sunk_reported: [bool; FLEET_SIZE],
    ship_map: CellGrid,
    bombed: CellGrid,
    remote_ships: CellGrid,
    remote_bombed: CellGrid,
}

impl Board {
    /// Empty board, no ships placed.
    pub fn new() -> Self {
        Board {
            ships: [None; FLEET_SIZE],
            sunk_reported: [false; FLEET_SIZE],
            ship_map: CellGrid::new(),
            bombed: CellGrid::new(),
            remote_ships: CellGrid::new(),
            remote_bombed: CellGrid::new(),
        }
    }

    /// Place fleet ship `ship_index` with its bow at (row, col).
    ///
    /// Overlap and bounds are enforced here, independent of whatever
    /// placement UI sits in front of this call.
    pub fn place(
        &mut self,
        ship_index: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        if ship_index >= FLEET_SIZE {
            return Err(BoardError::InvalidIndex);
        }
        if self.ships[ship_index].is_some() {
            return Err(BoardError::ShipAlreadyPlaced);
        }
        let ship = Ship::new(FLEET[ship_index], orientation, row, col)?;
        if self.ship_map.intersects(&ship.mask()) {
            return Err(BoardError::ShipOverlaps);
        }
        self.ship_map |= ship.mask();
        self.ships[ship_index] = Some(ship);
        Ok(())
    }

    /// Find a random non-overlapping (row, col, orientation) for fleet
    /// ship `ship_index`.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        ship_index: usize,
    ) -> Result<(usize, usize, Orientation), BoardError> {
        if ship_index >= FLEET_SIZE {
            return Err(BoardError::InvalidIndex);
        }
        let len = FLEET[ship_index].length();
        for _ in 0..100 {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orientation {
                Orientation::Horizontal => (GRID_SIZE - 1, GRID_SIZE - len),
                Orientation::Vertical => (GRID_SIZE - len, GRID_SIZE - 1),
            };
            let row = rng.random_range(0..=max_r);
            let col = rng.random_range(0..=max_c);
            let ship = Ship::<u128, GRID_SIZE>::new(FLEET[ship_index], orientation, row, col)?;
            if !self.ship_map.intersects(&ship.mask()) {
                return Ok((row, col, orientation));
            }
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// All fleet ships placed.
    pub fn fleet_complete(&self) -> bool {
        self.ships.iter().all(|s| s.is_some())
    }

    /// Whether a cell is occupied by one of our ships.
    pub fn is_occupied(&self, target: Coord) -> bool {
        self.ship_map
            .get(target.row() as usize, target.col() as usize)
            .unwrap_or(false)
    }

    /// Apply a peer bomb to our board.
    ///
    /// The cell is marked bombed regardless of outcome. A cell bombed
    /// twice is answered honestly again, but a ship is only ever
    /// reported sunk once.
    pub fn receive_bomb(&mut self, target: Coord) -> Result<ShotOutcome, BoardError> {
        let (row, col) = (target.row() as usize, target.col() as usize);
        self.bombed.set(row, col)?;
        if !self.ship_map.get(row, col)? {
            return Ok(ShotOutcome::Miss);
        }
        for (i, slot) in self.ships.iter_mut().enumerate() {
            if let Some(ship) = slot {
                if ship.register_hit(row, col) {
                    if ship.is_sunk() && !self.sunk_reported[i] {
                        self.sunk_reported[i] = true;
                        return Ok(ShotOutcome::Sunk(ship.class().name()));
                    }
                    return Ok(ShotOutcome::Hit);
                }
            }
        }
        // ship_map says occupied, so some ship must claim the cell
        Err(BoardError::InvalidIndex)
    }

    /// Record the STAT reply for a bomb we sent at `target`. A hit is
    /// the only way a peer ship cell is ever learned.
    pub fn record_shot(&mut self, target: Coord, hit: bool) -> Result<(), BoardError> {
        let (row, col) = (target.row() as usize, target.col() as usize);
        self.remote_bombed.set(row, col)?;
        if hit {
            self.remote_ships.set(row, col)?;
        }
        Ok(())
    }

    /// True once every placed ship is fully destroyed.
    pub fn all_sunk(&self) -> bool {
        self.fleet_complete() && self.ships.iter().flatten().all(|s| s.is_sunk())
    }

    /// Per-ship (class, sunk) summary for display.
    pub fn fleet_status(&self) -> [(ShipClass, bool); FLEET_SIZE] {
        core::array::from_fn(|i| {
            let sunk = self.ships[i].map(|s| s.is_sunk()).unwrap_or(false);
            (FLEET[i], sunk)
        })
    }

    /// Fleet-placement commitment exchanged in READY.
    ///
    /// Occupied cells are folded in ascending `(row, col)` order (the
    /// grid iterates row-major, which is exactly that order), so the
    /// order ships were placed in can never leak into the digest:
    /// `val = val * 100 + row * 10 + col (mod 2^16)` over 0-based
    /// indices.
    pub fn commitment(&self) -> u16 {
        let mut val: u16 = 0;
        for (row, col) in self.ship_map.cells() {
            val = val
                .wrapping_mul(100)
                .wrapping_add((row * 10 + col) as u16);
        }
        val
    }

    /// Our ship occupancy.
    pub fn ship_map(&self) -> CellGrid {
        self.ship_map
    }

    /// Cells the peer has bombed on our board.
    pub fn bombed(&self) -> CellGrid {
        self.bombed
    }

    /// Peer ship cells confirmed by STAT hits.
    pub fn remote_ships(&self) -> CellGrid {
        self.remote_ships
    }

    /// Cells we have bombed on the peer's board.
    pub fn remote_bombed(&self) -> CellGrid {
        self.remote_bombed
    }
}

impl core::fmt::Debug for Board {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Board {{ ships: {:?}, bombed: {}, remote_bombed: {} }}",
            self.ships,
            self.bombed.count(),
            self.remote_bombed.count(),
        )
    }
}
