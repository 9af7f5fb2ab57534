use crate::logic::board::BoardCoordinate;
use crate::logic::error::FenError;
use crate::logic::game::Position;
use crate::logic::xiangqi::board::{initial_board, Board, Color, Piece, BOARD_COLS, BOARD_ROWS};
use crate::logic::xiangqi::rules;
use crate::logic::Side;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: BoardCoordinate,
    pub to: BoardCoordinate,
    pub piece: Piece,
    pub captured: Option<Piece>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XiangqiPosition {
    board: Board,
    turn: Color,
    captured_red: Vec<Piece>,
    captured_black: Vec<Piece>,
    move_count: u32,
}

impl Default for XiangqiPosition {
    fn default() -> Self {
        Self {
            board: initial_board(),
            turn: Color::Red,
            captured_red: Vec::new(),
            captured_black: Vec::new(),
            move_count: 0,
        }
    }
}

impl XiangqiPosition {
    /// Placement followed by the side to move (`w`/`r` for Red, `b` for Black).
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or(FenError::Empty)?;
        let board = Board::from_placement(placement, BOARD_ROWS, BOARD_COLS, Piece::from_symbol)?;
        let turn = match fields.next().unwrap_or("w") {
            "w" | "r" => Color::Red,
            "b" => Color::Black,
            other => return Err(FenError::UnknownSide(other.to_string())),
        };
        Ok(Self {
            board,
            turn,
            captured_red: Vec::new(),
            captured_black: Vec::new(),
            move_count: 0,
        })
    }

    #[must_use]
    pub fn to_fen(&self) -> String {
        let side = match self.turn {
            Color::Red => 'w',
            Color::Black => 'b',
        };
        format!("{} {side}", self.board.to_placement(Piece::symbol))
    }

    fn captured_mut(&mut self, color: Color) -> &mut Vec<Piece> {
        match color {
            Color::Red => &mut self.captured_red,
            Color::Black => &mut self.captured_black,
        }
    }
}

impl Position for XiangqiPosition {
    type Side = Color;
    type Piece = Piece;
    type Record = MoveRecord;

    const GAME_ID: &'static str = "chinese_chess";

    fn board(&self) -> &Board {
        &self.board
    }

    fn turn(&self) -> Color {
        self.turn
    }

    fn move_count(&self) -> u32 {
        self.move_count
    }

    fn captured(&self, side: Color) -> &[Piece] {
        match side {
            Color::Red => &self.captured_red,
            Color::Black => &self.captured_black,
        }
    }

    fn pseudo_moves(&self, from: BoardCoordinate, out: &mut Vec<BoardCoordinate>) {
        if let Some(piece) = self.board.get(from) {
            rules::piece_moves(&self.board, from, piece, out);
        }
    }

    fn apply(&mut self, from: BoardCoordinate, to: BoardCoordinate) -> Option<MoveRecord> {
        let piece = self.board.take(from)?;
        let captured = self.board.set(to, Some(piece));
        if let Some(victim) = captured {
            self.captured_mut(victim.color).push(victim);
        }
        self.move_count += 1;
        self.turn = self.turn.opposite();
        Some(MoveRecord {
            from,
            to,
            piece,
            captured,
        })
    }

    fn revert(&mut self, record: &MoveRecord) {
        self.turn = self.turn.opposite();
        self.move_count = self.move_count.saturating_sub(1);
        self.board.set(record.to, record.captured);
        self.board.set(record.from, Some(record.piece));
        if let Some(victim) = record.captured {
            self.captured_mut(victim.color).pop();
        }
    }

    fn is_in_check(&self, side: Color) -> bool {
        rules::is_in_check(&self.board, side)
    }
}
