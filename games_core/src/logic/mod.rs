use crate::engine::SearchGame;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub mod board;
pub mod chess;
pub mod error;
pub mod game;
pub mod tictactoe;
pub mod xiangqi;

pub use board::{BoardCoordinate, Grid};
pub use error::{FenError, MoveError};
pub use game::{GameState, Position};

/// One of the two players of a game.
///
/// `FIRST` moves first and is the maximizing side for evaluation.
pub trait Side: Copy + Eq + Debug + Send + Sync + 'static {
    const FIRST: Self;

    #[must_use]
    fn opposite(self) -> Self;
}

/// A piece that knows its owner and material worth.
pub trait PieceLike: Copy + Eq + Debug {
    type Side: Side;

    fn owner(self) -> Self::Side;
    fn value(self) -> i32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus<S> {
    Playing,
    Won(S),
    /// Stalemate in the chess variants, a full board in tic-tac-toe.
    Draw,
}

impl<S: Copy> GameStatus<S> {
    #[must_use]
    pub const fn is_over(&self) -> bool {
        !matches!(self, Self::Playing)
    }

    #[must_use]
    pub fn winner(&self) -> Option<S> {
        match self {
            Self::Won(side) => Some(*side),
            Self::Playing | Self::Draw => None,
        }
    }
}

/// The surface a host drives: validated moves, undo, and the scalar handed to
/// the score recorder once a game is decided.
pub trait Playable: SearchGame + Send + 'static {
    const GAME_ID: &'static str;

    fn status(&self) -> GameStatus<Self::Side>;
    fn play(&mut self, mv: Self::Move) -> bool;
    fn undo(&mut self) -> bool;
    fn can_undo(&self) -> bool;
    fn reset(&mut self);

    /// `Some(score)` once the game has a winner.
    fn result_score(&self) -> Option<u32>;

    fn is_game_over(&self) -> bool {
        self.status().is_over()
    }
}
