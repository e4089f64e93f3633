use rand::rngs::SmallRng;
use rand::Rng;

use crate::board::Board;
use crate::common::{BoardError, Coord};
use crate::config::{FLEET_SIZE, GRID_SIZE};
use crate::player::Player;

/// Unattended player: random placement, random untried targeting.
/// Drives the simulation binary and the integration tests.
pub struct AutoPlayer;

impl AutoPlayer {
    pub fn new() -> Self {
        Self
    }
}

fn untried(board: &Board, row: usize, col: usize) -> Option<Coord> {
    if board.remote_bombed().get(row, col).unwrap_or(true) {
        None
    } else {
        Coord::new(row as u8, col as u8)
    }
}

impl Player for AutoPlayer {
    fn place_ships(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError> {
        for i in 0..FLEET_SIZE {
            let (row, col, orientation) = board.random_placement(rng, i)?;
            board.place(i, row, col, orientation)?;
        }
        Ok(())
    }

    fn select_target(&mut self, rng: &mut SmallRng, board: &Board) -> Coord {
        for _ in 0..200 {
            let row = rng.random_range(0..GRID_SIZE);
            let col = rng.random_range(0..GRID_SIZE);
            if let Some(target) = untried(board, row, col) {
                return target;
            }
        }
        // dense endgame: take the first untried cell instead
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                if let Some(target) = untried(board, row, col) {
                    return target;
                }
            }
        }
        // whole grid tried; a live game never gets here
        Coord::default()
    }
}
