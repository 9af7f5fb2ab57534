//! Rules engines and fixed-depth search for chess, xiangqi and tic-tac-toe.

pub mod engine;
pub mod logic;

pub use engine::config::{Difficulty, EngineConfig};
pub use engine::search::AlphaBetaEngine;
pub use engine::{Move, SearchStats};
pub use logic::chess::ChessGame;
pub use logic::tictactoe::TicTacToe;
pub use logic::xiangqi::XiangqiGame;
pub use logic::{GameStatus, Playable};
