//! Interactive line-oriented player.
//!
//! Coordinates are typed the way they travel on the wire: row letter
//! then 1-based column, `A1` through `J10`.

use std::io::{self, Write};

use rand::rngs::SmallRng;

use crate::board::Board;
use crate::common::{BoardError, Coord, ShotOutcome};
use crate::config::{FLEET, FLEET_SIZE, GRID_SIZE};
use crate::player::Player;
use crate::ship::Orientation;

pub struct CliPlayer;

impl CliPlayer {
    pub fn new() -> Self {
        Self
    }
}

fn parse_coord(input: &str) -> Option<Coord> {
    let mut chars = input.trim().chars();
    let row_ch = chars.next()?.to_ascii_uppercase();
    let last_row = (b'A' + GRID_SIZE as u8 - 1) as char;
    if !('A'..=last_row).contains(&row_ch) {
        return None;
    }
    let col_str: String = chars.collect();
    let col: usize = col_str.parse().ok()?;
    if !(1..=GRID_SIZE).contains(&col) {
        return None;
    }
    Coord::new(row_ch as u8 - b'A', (col - 1) as u8)
}

fn read_line() -> String {
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_string()
}

fn prompt(text: &str) -> String {
    print!("{}", text);
    let _ = io::stdout().flush();
    read_line()
}

fn print_header() {
    print!("   ");
    for c in 1..=GRID_SIZE {
        print!("{:>3}", c);
    }
    println!();
}

/// Our own grid: ships, and where the peer has bombed.
fn print_own_board(board: &Board) {
    print_header();
    for r in 0..GRID_SIZE {
        print!("{}  ", (b'A' + r as u8) as char);
        for c in 0..GRID_SIZE {
            let ship = board.ship_map().get(r, c).unwrap_or(false);
            let bombed = board.bombed().get(r, c).unwrap_or(false);
            let mark = match (ship, bombed) {
                (true, true) => 'X',
                (true, false) => 'S',
                (false, true) => 'o',
                (false, false) => '.',
            };
            print!("{:>3}", mark);
        }
        println!();
    }
}

/// What we have learned about the peer: bombs sent and confirmed hits.
fn print_tracking_board(board: &Board) {
    print_header();
    for r in 0..GRID_SIZE {
        print!("{}  ", (b'A' + r as u8) as char);
        for c in 0..GRID_SIZE {
            let mark = if board.remote_ships().get(r, c).unwrap_or(false) {
                'X'
            } else if board.remote_bombed().get(r, c).unwrap_or(false) {
                'o'
            } else {
                '.'
            };
            print!("{:>3}", mark);
        }
        println!();
    }
}

/// Both grids: the enemy view on top, our fleet below.
pub fn print_player_view(board: &Board) {
    println!("Enemy waters:");
    print_tracking_board(board);
    println!("\nYour fleet:");
    print_own_board(board);
}

impl Player for CliPlayer {
    fn place_ships(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError> {
        println!("Place your ships, e.g. `A1 h` or `C4 v`. Empty line = random placement.");
        for i in 0..FLEET_SIZE {
            let class = FLEET[i];
            loop {
                print_own_board(board);
                let line = prompt(&format!("Place {} (length {}): ", class.name(), class.length()));
                if line.is_empty() {
                    let (r, c, o) = board.random_placement(rng, i)?;
                    board.place(i, r, c, o)?;
                    break;
                }
                let mut parts = line.split_whitespace();
                let coord = parts.next().and_then(parse_coord);
                let orientation = match parts.next().map(str::to_ascii_lowercase).as_deref() {
                    Some("v") => Some(Orientation::Vertical),
                    Some("h") | None => Some(Orientation::Horizontal),
                    _ => None,
                };
                match (coord, orientation) {
                    (Some(at), Some(o)) => {
                        match board.place(i, at.row() as usize, at.col() as usize, o) {
                            Ok(()) => break,
                            Err(e) => println!("Cannot place there: {}", e),
                        }
                    }
                    _ => println!("Could not read that, try `A1 h`."),
                }
            }
        }
        Ok(())
    }

    fn select_target(&mut self, _rng: &mut SmallRng, board: &Board) -> Coord {
        print_player_view(board);
        loop {
            let line = prompt("Your shot (e.g. B7): ");
            match parse_coord(&line) {
                Some(target) => {
                    let already = board
                        .remote_bombed()
                        .get(target.row() as usize, target.col() as usize)
                        .unwrap_or(false);
                    if already {
                        println!("You already bombed {}.", target);
                        continue;
                    }
                    return target;
                }
                None => println!("Coordinates run A1 through J10."),
            }
        }
    }

    fn shot_resolved(&mut self, target: Coord, hit: bool) {
        println!("{} -> {}", target, if hit { "HIT" } else { "miss" });
    }

    fn incoming_bomb(&mut self, target: Coord, outcome: ShotOutcome) {
        match outcome {
            ShotOutcome::Miss => println!("Enemy bombed {} and missed.", target),
            ShotOutcome::Hit => println!("Enemy bombed {} and hit!", target),
            ShotOutcome::Sunk(name) => println!("Enemy bombed {} and sank your {}!", target, name),
        }
    }
}
