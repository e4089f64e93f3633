use crate::ship::ShipClass;

/// Rows and columns of the square playing grid.
pub const GRID_SIZE: usize = 10;

/// Number of ships in a fleet.
pub const FLEET_SIZE: usize = 5;

/// The fleet every player places, largest first.
pub const FLEET: [ShipClass; FLEET_SIZE] = [
    ShipClass::new("Battlecruiser", 5),
    ShipClass::new("Battleship", 4),
    ShipClass::new("Cruiser", 3),
    ShipClass::new("Submarine", 3),
    ShipClass::new("Destroyer", 2),
];

/// Total occupied cells of a full fleet.
pub const FLEET_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Port used when none is given on the command line.
pub const DEFAULT_PORT: u16 = 6986;

/// Upper bound on a single encoded message, tag included.
pub const MAX_MESSAGE_LEN: usize = 128;

/// Maximum free-text payload of a STAT or SUNK message, the largest
/// value the fixed two-digit length field can carry.
pub const MAX_TEXT_LEN: usize = 99;

/// The text length field is always exactly this many ASCII digits.
pub const TEXT_LEN_DIGITS: usize = 2;
