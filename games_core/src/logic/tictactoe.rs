//! Three in a row on a 3×3 grid. Marks are never removed, so every empty cell
//! is a legal move while the game is undecided.

use crate::engine::config::{Difficulty, EngineConfig};
use crate::engine::{SearchGame, SearchPlan};
use crate::logic::board::{BoardCoordinate, Grid};
use crate::logic::error::MoveError;
use crate::logic::{GameStatus, Playable, Side};
use log::{info, trace};
use serde::{Deserialize, Serialize};

pub const SIZE: usize = 3;

/// Score handed to the score recorder for any win.
pub const WIN_RESULT: u32 = 1;

const fn cell(row: usize, col: usize) -> BoardCoordinate {
    BoardCoordinate::new(row, col)
}

pub const WIN_LINES: [[BoardCoordinate; 3]; 8] = [
    [cell(0, 0), cell(0, 1), cell(0, 2)],
    [cell(1, 0), cell(1, 1), cell(1, 2)],
    [cell(2, 0), cell(2, 1), cell(2, 2)],
    [cell(0, 0), cell(1, 0), cell(2, 0)],
    [cell(0, 1), cell(1, 1), cell(2, 1)],
    [cell(0, 2), cell(1, 2), cell(2, 2)],
    [cell(0, 0), cell(1, 1), cell(2, 2)],
    [cell(0, 2), cell(1, 1), cell(2, 0)],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Side for Mark {
    const FIRST: Self = Self::X;

    fn opposite(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }
}

impl Mark {
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::X => 'X',
            Self::O => 'O',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToe {
    board: Grid<Mark>,
    turn: Mark,
    status: GameStatus<Mark>,
    winning_line: Option<[BoardCoordinate; 3]>,
    history: Vec<BoardCoordinate>,
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToe {
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Grid::new(SIZE, SIZE),
            turn: Mark::X,
            status: GameStatus::Playing,
            winning_line: None,
            history: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub const fn board(&self) -> &Grid<Mark> {
        &self.board
    }

    pub fn get_cell(&self, pos: BoardCoordinate) -> Option<Mark> {
        self.board.get(pos)
    }

    pub const fn current_player(&self) -> Mark {
        self.turn
    }

    pub const fn status(&self) -> GameStatus<Mark> {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn get_winner(&self) -> Option<Mark> {
        self.status.winner()
    }

    /// The completed line, once somebody has won.
    pub const fn winning_line(&self) -> Option<[BoardCoordinate; 3]> {
        self.winning_line
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn is_valid_move(&self, pos: BoardCoordinate) -> bool {
        !self.status.is_over() && self.board.contains(pos) && self.board.is_empty_at(pos)
    }

    /// Empty cells while the game is undecided.
    pub fn get_valid_moves(&self) -> Vec<BoardCoordinate> {
        if self.status.is_over() {
            return Vec::new();
        }
        self.empty_cells()
    }

    pub fn try_move(&mut self, pos: BoardCoordinate) -> Result<(), MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        if !self.board.contains(pos) {
            return Err(MoveError::OutOfBounds);
        }
        if !self.board.is_empty_at(pos) {
            trace!("tic_tac_toe: rejected {pos:?}, cell taken");
            return Err(MoveError::CellOccupied);
        }

        self.board.set(pos, Some(self.turn));
        self.history.push(pos);
        self.turn = self.turn.opposite();
        self.check_game_over();
        Ok(())
    }

    pub fn make_move(&mut self, pos: BoardCoordinate) -> bool {
        self.try_move(pos).is_ok()
    }

    pub fn undo(&mut self) -> bool {
        let Some(pos) = self.history.pop() else {
            return false;
        };
        self.board.take(pos);
        self.turn = self.turn.opposite();
        self.status = GameStatus::Playing;
        self.winning_line = None;
        true
    }

    fn check_game_over(&mut self) {
        if let Some((mark, line)) = self.completed_line() {
            self.status = GameStatus::Won(mark);
            self.winning_line = Some(line);
        } else if self.board.occupied().count() == SIZE * SIZE {
            self.status = GameStatus::Draw;
        } else {
            return;
        }
        info!(
            "tic_tac_toe: game over after {} moves: {:?}",
            self.history.len(),
            self.status
        );
    }

    fn completed_line(&self) -> Option<(Mark, [BoardCoordinate; 3])> {
        WIN_LINES.iter().find_map(|&line| {
            let first = self.board.get(line[0])?;
            line[1..]
                .iter()
                .all(|&pos| self.board.get(pos) == Some(first))
                .then_some((first, line))
        })
    }

    /// The mark owning a completed line, if any.
    pub fn line_winner(&self) -> Option<Mark> {
        self.completed_line().map(|(mark, _)| mark)
    }

    fn empty_cells(&self) -> Vec<BoardCoordinate> {
        self.board
            .coords()
            .filter(|&pos| self.board.is_empty_at(pos))
            .collect()
    }
}

impl SearchGame for TicTacToe {
    type Side = Mark;
    type Move = BoardCoordinate;
    type Undo = BoardCoordinate;

    fn side_to_move(&self) -> Mark {
        self.turn
    }

    fn legal_moves(&mut self) -> Vec<BoardCoordinate> {
        if self.completed_line().is_some() {
            return Vec::new();
        }
        self.empty_cells()
    }

    fn capture_value(&self, _mv: BoardCoordinate) -> i32 {
        0
    }

    fn play_unchecked(&mut self, mv: BoardCoordinate) -> Option<BoardCoordinate> {
        if !self.board.contains(mv) || !self.board.is_empty_at(mv) {
            return None;
        }
        self.board.set(mv, Some(self.turn));
        self.turn = self.turn.opposite();
        Some(mv)
    }

    fn unplay(&mut self, undo: BoardCoordinate) {
        self.board.take(undo);
        self.turn = self.turn.opposite();
    }

    fn outcome(&self, legal_moves: &[BoardCoordinate]) -> Option<GameStatus<Mark>> {
        if let Some(mark) = self.line_winner() {
            return Some(GameStatus::Won(mark));
        }
        legal_moves.is_empty().then_some(GameStatus::Draw)
    }

    fn detached(&self) -> Self {
        Self {
            board: self.board.clone(),
            turn: self.turn,
            status: self.status,
            winning_line: self.winning_line,
            history: Vec::new(),
        }
    }

    /// The search runs to the end of the game; candidates are shuffled so
    /// equally good moves vary between games.
    fn search_plan(&self, difficulty: Difficulty, config: &EngineConfig) -> SearchPlan {
        let remaining = SIZE * SIZE - self.board.occupied().count();
        let depth = u8::try_from(remaining).unwrap_or(u8::MAX);
        match difficulty {
            Difficulty::Easy => SearchPlan::Random,
            Difficulty::Medium => SearchPlan::Search {
                depth,
                blunder_rate: config.blunder_rate,
                shuffle: true,
            },
            Difficulty::Hard => SearchPlan::Search {
                depth,
                blunder_rate: 0.0,
                shuffle: true,
            },
        }
    }
}

impl Playable for TicTacToe {
    const GAME_ID: &'static str = "tic_tac_toe";

    fn status(&self) -> GameStatus<Mark> {
        self.status
    }

    fn play(&mut self, mv: BoardCoordinate) -> bool {
        self.make_move(mv)
    }

    fn undo(&mut self) -> bool {
        Self::undo(self)
    }

    fn can_undo(&self) -> bool {
        Self::can_undo(self)
    }

    fn reset(&mut self) {
        Self::reset(self);
    }

    fn result_score(&self) -> Option<u32> {
        self.status.winner().map(|_| WIN_RESULT)
    }
}
