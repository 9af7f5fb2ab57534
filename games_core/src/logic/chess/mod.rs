//! Standard chess: castling, en passant, and promotion (always to a queen).

pub mod board;
pub mod position;
pub mod rules;

pub use board::{square, Board, Color, Piece, PieceKind};
pub use position::{CastlingRights, ChessPosition, LastMove, MoveRecord};

use crate::logic::error::FenError;
use crate::logic::game::GameState;

pub type ChessGame = GameState<ChessPosition>;

impl GameState<ChessPosition> {
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        ChessPosition::from_fen(fen).map(Self::from_position)
    }

    pub fn to_fen(&self) -> String {
        self.position().to_fen()
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.position().castling_rights()
    }
}
