#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod board;
mod common;
mod config;
mod grid;
mod player;
mod player_auto;
mod ship;
pub mod wire;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
mod player_cli;
#[cfg(feature = "std")]
pub mod session;
#[cfg(feature = "std")]
pub mod transport;

pub use board::*;
pub use common::*;
pub use config::*;
pub use grid::{Cells, Grid, GridError};
pub use player::*;
pub use player_auto::*;
pub use ship::*;
pub use wire::{Message, MessageKind, WireError};
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use player_cli::*;
#[cfg(feature = "std")]
pub use session::*;
#[cfg(feature = "std")]
pub use transport::tcp::TcpTransport;
