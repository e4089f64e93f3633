use rand::rngs::SmallRng;

use crate::board::Board;
use crate::common::{BoardError, Coord, ShotOutcome};

/// Interface implemented by the different player front ends.
///
/// The session owns the board and drives the protocol; a player only
/// commits placements, picks targets, and observes results.
pub trait Player {
    /// Place the whole fleet onto the provided board.
    fn place_ships(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError>;

    /// Choose the next cell to bomb, given what the board knows about
    /// the peer (`remote_bombed`, `remote_ships`).
    fn select_target(&mut self, rng: &mut SmallRng, board: &Board) -> Coord;

    /// The STAT reply for our last bomb arrived.
    fn shot_resolved(&mut self, _target: Coord, _hit: bool) {}

    /// The peer bombed `target` on our board.
    fn incoming_bomb(&mut self, _target: Coord, _outcome: ShotOutcome) {}
}
