use crate::engine::config::{Difficulty, EngineConfig};
use crate::logic::board::BoardCoordinate;
use crate::logic::{GameStatus, Side};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub mod config;
pub mod eval;
pub mod search;

/// Score of a decided game. Dominates every material/positional score.
pub const WIN_SCORE: i32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: BoardCoordinate,
    pub to: BoardCoordinate,
}

impl Move {
    #[must_use]
    pub const fn new(from: BoardCoordinate, to: BoardCoordinate) -> Self {
        Self { from, to }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u64,
    pub time_ms: u64,
}

/// How the engine should pick a move for a given difficulty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchPlan {
    /// Uniform choice among the legal moves.
    Random,
    /// Fixed-depth alpha-beta. With probability `blunder_rate` a random legal
    /// move is played instead; `shuffle` randomizes candidate order first.
    Search {
        depth: u8,
        blunder_rate: f64,
        shuffle: bool,
    },
}

/// A two-player game the search can walk.
///
/// `play_unchecked`/`unplay` form the fast pair used inside the search: no
/// validation, no terminal-state bookkeeping, no history. Candidates always
/// come from `legal_moves`, so validation would be redundant.
pub trait SearchGame: Clone {
    type Side: Side;
    type Move: Copy + Eq + Debug + Send + 'static;
    type Undo;

    fn side_to_move(&self) -> Self::Side;

    /// Every legal move for the side to move.
    fn legal_moves(&mut self) -> Vec<Self::Move>;

    /// Material value of whatever `mv` captures; 0 for quiet moves.
    fn capture_value(&self, mv: Self::Move) -> i32;

    fn play_unchecked(&mut self, mv: Self::Move) -> Option<Self::Undo>;

    fn unplay(&mut self, undo: Self::Undo);

    /// Terminal status given the legal moves of the side to move, `None` while
    /// the game goes on.
    fn outcome(&self, legal_moves: &[Self::Move]) -> Option<GameStatus<Self::Side>>;

    /// Independent copy for search; undo history is not carried over.
    fn detached(&self) -> Self {
        self.clone()
    }

    fn search_plan(&self, difficulty: Difficulty, config: &EngineConfig) -> SearchPlan {
        match difficulty {
            Difficulty::Easy => SearchPlan::Random,
            Difficulty::Medium => SearchPlan::Search {
                depth: config.medium_depth,
                blunder_rate: 0.0,
                shuffle: false,
            },
            Difficulty::Hard => SearchPlan::Search {
                depth: config.hard_depth,
                blunder_rate: 0.0,
                shuffle: false,
            },
        }
    }
}

/// Static score of a position from the first player's point of view.
pub trait Evaluator<G> {
    fn evaluate(&self, game: &G) -> i32;
}

pub trait Searcher<G: SearchGame> {
    /// Best move at a fixed depth, `None` when the side to move has no move.
    fn search(&mut self, game: &G, depth: u8) -> Option<(G::Move, SearchStats)>;
}

/// Score of a terminal status from the first player's point of view.
pub fn terminal_score<S: Side>(status: GameStatus<S>) -> i32 {
    match status {
        GameStatus::Won(side) if side == S::FIRST => WIN_SCORE,
        GameStatus::Won(_) => -WIN_SCORE,
        GameStatus::Playing | GameStatus::Draw => 0,
    }
}
