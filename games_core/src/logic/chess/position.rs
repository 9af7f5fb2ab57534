use crate::logic::board::BoardCoordinate;
use crate::logic::chess::board::{initial_board, Board, Color, Piece, PieceKind, BOARD_SIZE};
use crate::logic::chess::rules::{
    castling_targets, en_passant_target, find_king, is_under_attack, piece_reach, CastleSide, Reach,
};
use crate::logic::error::FenError;
use crate::logic::game::Position;
use crate::logic::Side;
use serde::{Deserialize, Serialize};

/// The most recent move, consulted for en passant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    pub piece: Piece,
    pub from: BoardCoordinate,
    pub to: BoardCoordinate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::ALL
    }
}

impl CastlingRights {
    pub const ALL: Self = Self {
        white_king_side: true,
        white_queen_side: true,
        black_king_side: true,
        black_queen_side: true,
    };

    pub const NONE: Self = Self {
        white_king_side: false,
        white_queen_side: false,
        black_king_side: false,
        black_queen_side: false,
    };

    #[must_use]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::King) => self.white_king_side,
            (Color::White, CastleSide::Queen) => self.white_queen_side,
            (Color::Black, CastleSide::King) => self.black_king_side,
            (Color::Black, CastleSide::Queen) => self.black_queen_side,
        }
    }

    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        let flag = match (color, side) {
            (Color::White, CastleSide::King) => &mut self.white_king_side,
            (Color::White, CastleSide::Queen) => &mut self.white_queen_side,
            (Color::Black, CastleSide::King) => &mut self.black_king_side,
            (Color::Black, CastleSide::Queen) => &mut self.black_queen_side,
        };
        *flag = false;
    }

    pub fn revoke_all(&mut self, color: Color) {
        self.revoke(color, CastleSide::King);
        self.revoke(color, CastleSide::Queen);
    }

    fn to_fen_field(self) -> String {
        let field: String = [
            (self.white_king_side, 'K'),
            (self.white_queen_side, 'Q'),
            (self.black_king_side, 'k'),
            (self.black_queen_side, 'q'),
        ]
        .iter()
        .filter_map(|&(held, letter)| held.then_some(letter))
        .collect();
        if field.is_empty() {
            "-".to_string()
        } else {
            field
        }
    }

    fn from_fen_field(field: &str) -> Result<Self, FenError> {
        let mut rights = Self::NONE;
        if field == "-" {
            return Ok(rights);
        }
        for letter in field.chars() {
            match letter {
                'K' => rights.white_king_side = true,
                'Q' => rights.white_queen_side = true,
                'k' => rights.black_king_side = true,
                'q' => rights.black_queen_side = true,
                _ => return Err(FenError::Castling(field.to_string())),
            }
        }
        Ok(rights)
    }
}

/// Everything one move changed, so `revert` can restore it exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: BoardCoordinate,
    pub to: BoardCoordinate,
    /// The piece as it stood on `from`, before any promotion.
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub prior_last_move: Option<LastMove>,
    pub prior_castling: CastlingRights,
    /// Square of the pawn removed by an en-passant capture.
    pub en_passant: Option<BoardCoordinate>,
    /// Rook relocation performed by a castle.
    pub castle_rook: Option<(BoardCoordinate, BoardCoordinate)>,
    pub promoted_to: Option<Piece>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessPosition {
    board: Board,
    turn: Color,
    castling: CastlingRights,
    last_move: Option<LastMove>,
    captured_white: Vec<Piece>,
    captured_black: Vec<Piece>,
    move_count: u32,
}

impl Default for ChessPosition {
    fn default() -> Self {
        Self {
            board: initial_board(),
            turn: Color::White,
            castling: CastlingRights::ALL,
            last_move: None,
            captured_white: Vec::new(),
            captured_black: Vec::new(),
            move_count: 0,
        }
    }
}

impl ChessPosition {
    #[must_use]
    pub const fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[must_use]
    pub const fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    /// Parses placement, side to move and castling field. The en-passant and
    /// halfmove fields are ignored; the fullmove number seeds the move count.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or(FenError::Empty)?;
        let board = Board::from_placement(placement, BOARD_SIZE, BOARD_SIZE, Piece::from_symbol)?;

        let turn = match fields.next().unwrap_or("w") {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::UnknownSide(other.to_string())),
        };
        let castling = CastlingRights::from_fen_field(fields.next().unwrap_or("-"))?;
        let fullmove = fields
            .nth(2)
            .and_then(|field| field.parse::<u32>().ok())
            .unwrap_or(1)
            .max(1);

        let move_count = (fullmove - 1)
            .checked_mul(2)
            .and_then(|plies| plies.checked_add(u32::from(turn == Color::Black)))
            .ok_or(FenError::MoveNumber(fullmove))?;

        Ok(Self {
            board,
            turn,
            castling,
            last_move: None,
            captured_white: Vec::new(),
            captured_black: Vec::new(),
            move_count,
        })
    }

    #[must_use]
    pub fn to_fen(&self) -> String {
        let side = match self.turn {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!(
            "{} {side} {} - 0 {}",
            self.board.to_placement(Piece::symbol),
            self.castling.to_fen_field(),
            self.move_count / 2 + 1
        )
    }

    fn captured_mut(&mut self, color: Color) -> &mut Vec<Piece> {
        match color {
            Color::White => &mut self.captured_white,
            Color::Black => &mut self.captured_black,
        }
    }
}

impl Position for ChessPosition {
    type Side = Color;
    type Piece = Piece;
    type Record = MoveRecord;

    const GAME_ID: &'static str = "chess";

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
            Color::White => &self.captured_white,
            Color::Black => &self.captured_black,
        }
    }

    fn pseudo_moves(&self, from: BoardCoordinate, out: &mut Vec<BoardCoordinate>) {
        let Some(piece) = self.board.get(from) else {
            return;
        };
        piece_reach(&self.board, from, piece, Reach::Moves, out);
        match piece.kind {
            PieceKind::Pawn => {
                out.extend(en_passant_target(&self.board, from, piece, self.last_move));
            }
            PieceKind::King => castling_targets(&self.board, from, piece.color, self.castling, out),
            _ => {}
        }
    }

    fn apply(&mut self, from: BoardCoordinate, to: BoardCoordinate) -> Option<MoveRecord> {
        let piece = self.board.get(from)?;
        let prior_castling = self.castling;
        let prior_last_move = self.last_move;

        let mut captured = self.board.take(to);
        let mut en_passant = None;
        if piece.kind == PieceKind::Pawn && from.col != to.col && captured.is_none() {
            let victim_square = BoardCoordinate::new(from.row, to.col);
            captured = self.board.take(victim_square);
            en_passant = captured.map(|_| victim_square);
        }

        let mut castle_rook = None;
        if piece.kind == PieceKind::King && from.row == piece.color.back_row() {
            if let Some(side) = CastleSide::from_king_step(from, to) {
                let rook_from = BoardCoordinate::new(from.row, side.rook_col());
                let rook_to = BoardCoordinate::new(from.row, side.rook_target_col());
                if let Some(rook) = self.board.take(rook_from) {
                    self.board.set(rook_to, Some(rook));
                    castle_rook = Some((rook_from, rook_to));
                }
            }
        }

        let promoted_to = (piece.kind == PieceKind::Pawn && to.row == piece.color.promotion_row())
            .then_some(Piece::new(PieceKind::Queen, piece.color));
        self.board.take(from);
        self.board.set(to, Some(promoted_to.unwrap_or(piece)));

        match piece.kind {
            PieceKind::King => self.castling.revoke_all(piece.color),
            PieceKind::Rook => {
                if let Some(side) = CastleSide::of_rook_home(piece.color, from) {
                    self.castling.revoke(piece.color, side);
                }
            }
            _ => {}
        }
        if let Some(victim) = captured {
            if victim.kind == PieceKind::Rook {
                if let Some(side) = CastleSide::of_rook_home(victim.color, to) {
                    self.castling.revoke(victim.color, side);
                }
            }
            self.captured_mut(victim.color).push(victim);
        }

        self.last_move = Some(LastMove { piece, from, to });
        self.move_count += 1;
        self.turn = self.turn.opposite();

        Some(MoveRecord {
            from,
            to,
            piece,
            captured,
            prior_last_move,
            prior_castling,
            en_passant,
            castle_rook,
            promoted_to,
        })
    }

    fn revert(&mut self, record: &MoveRecord) {
        self.turn = self.turn.opposite();
        self.move_count = self.move_count.saturating_sub(1);
        self.last_move = record.prior_last_move;
        self.castling = record.prior_castling;

        self.board.take(record.to);
        self.board.set(record.from, Some(record.piece));
        if let Some((rook_from, rook_to)) = record.castle_rook {
            let rook = self.board.take(rook_to);
            self.board.set(rook_from, rook);
        }

        if let Some(victim) = record.captured {
            self.captured_mut(victim.color).pop();
            self.board.set(record.en_passant.unwrap_or(record.to), Some(victim));
        }
    }

    fn is_in_check(&self, side: Color) -> bool {
        find_king(&self.board, side)
            .is_some_and(|king| is_under_attack(&self.board, king, side.opposite()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::chess::board::square;

    fn sq(name: &str) -> BoardCoordinate {
        square(name).unwrap()
    }

    #[test]
    fn test_start_fen_round_trip() {
        let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let position = ChessPosition::from_fen(start).unwrap();
        assert_eq!(position, ChessPosition::default());
        assert_eq!(position.to_fen(), start);
    }

    #[test]
    fn test_fen_rejects_garbage() {
        assert_eq!(ChessPosition::from_fen(""), Err(FenError::Empty));
        assert_eq!(
            ChessPosition::from_fen("8/8/8/8/8/8/8/8 x"),
            Err(FenError::UnknownSide("x".to_string()))
        );
        assert_eq!(
            ChessPosition::from_fen("8/8/8/8/8/8/8/8 w KZ"),
            Err(FenError::Castling("KZ".to_string()))
        );
    }

    #[test]
    fn test_fen_rejects_huge_move_number() {
        assert_eq!(
            ChessPosition::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 4294967295"),
            Err(FenError::MoveNumber(u32::MAX))
        );
        let last = ChessPosition::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 2147483648").unwrap();
        assert_eq!(last.move_count(), u32::MAX - 1);
    }

    #[test]
    fn test_promotion_and_revert() {
        let mut position = ChessPosition::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let before = position.clone();
        let record = position.apply(sq("a7"), sq("a8")).unwrap();
        assert_eq!(
            position.board().get(sq("a8")),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
        assert_eq!(record.promoted_to, Some(Piece::new(PieceKind::Queen, Color::White)));

        position.revert(&record);
        assert_eq!(position, before);
    }

    #[test]
    fn test_castle_moves_rook_and_reverts() {
        let mut position = ChessPosition::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let before = position.clone();
        let record = position.apply(sq("e1"), sq("g1")).unwrap();
        assert_eq!(record.castle_rook, Some((sq("h1"), sq("f1"))));
        assert_eq!(
            position.board().get(sq("f1")),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert!(!position.castling_rights().white_king_side);
        assert!(!position.castling_rights().white_queen_side);
        assert!(position.castling_rights().black_king_side);

        position.revert(&record);
        assert_eq!(position, before);
    }

    #[test]
    fn test_capturing_home_rook_revokes_its_right() {
        let mut position = ChessPosition::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        position.apply(sq("a1"), sq("a8")).unwrap();
        let rights = position.castling_rights();
        assert!(!rights.white_queen_side);
        assert!(!rights.black_queen_side);
        assert!(rights.white_king_side);
        assert!(rights.black_king_side);
        assert_eq!(position.captured(Color::Black), &[Piece::new(PieceKind::Rook, Color::Black)]);
    }

    #[test]
    fn test_missing_king_is_never_in_check() {
        let position = ChessPosition::from_fen("8/8/8/8/8/8/8/q7 w - - 0 1").unwrap();
        assert!(!position.is_in_check(Color::White));
    }
}
