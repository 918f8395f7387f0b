pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardParseError {
    #[display("board must have 9 cells, got {_0}")]
    WrongLength(#[error(not(source))] usize),
    #[display("invalid cell symbol {symbol:?} at index {index}")]
    InvalidSymbol { index: usize, symbol: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    #[display("cell index {_0} is out of range")]
    OutOfRange(#[error(not(source))] usize),
    #[display("cell {_0} is already occupied")]
    Occupied(#[error(not(source))] Move),
    #[display("game is already over")]
    GameOver,
}
