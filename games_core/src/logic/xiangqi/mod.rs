//! Chinese chess. Stalemate is scored as a draw.

pub mod board;
pub mod position;
pub mod rules;

pub use board::{Board, Color, Piece, PieceType, START_FEN};
pub use position::{MoveRecord, XiangqiPosition};

use crate::logic::error::FenError;
use crate::logic::game::GameState;

pub type XiangqiGame = GameState<XiangqiPosition>;

impl GameState<XiangqiPosition> {
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        XiangqiPosition::from_fen(fen).map(Self::from_position)
    }

    pub fn to_fen(&self) -> String {
        self.position().to_fen()
    }
}
