//! Rules engine for Connect Four.
//!
//! [`GameEngine`] owns the board and whose turn it is. A presentation layer
//! feeds it column indexes through [`GameEngine::drop_piece`] and renders the
//! [`Outcome`] it gets back.

mod board;
mod engine;
mod error;
mod player;
pub mod win;

pub use board::{Board, Dimensions, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use engine::{GameEngine, GameStatus, Outcome};
pub use error::Error;
pub use player::{Player, Seat};
