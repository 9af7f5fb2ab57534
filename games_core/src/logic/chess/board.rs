use crate::logic::board::{BoardCoordinate, Grid};
use crate::logic::{PieceLike, Side};
use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 8;

// Piece values, also used for capture ordering.
pub const VAL_PAWN: i32 = 100;
pub const VAL_KNIGHT: i32 = 320;
pub const VAL_BISHOP: i32 = 330;
pub const VAL_ROOK: i32 = 500;
pub const VAL_QUEEN: i32 = 900;
pub const VAL_KING: i32 = 20_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Side for Color {
    const FIRST: Self = Self::White;

    fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

impl Color {
    /// Row delta of a pawn step.
    #[must_use]
    pub const fn forward(self) -> isize {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    #[must_use]
    pub const fn back_row(self) -> usize {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }

    #[must_use]
    pub const fn pawn_row(self) -> usize {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    /// Row on which this side's pawns promote.
    #[must_use]
    pub const fn promotion_row(self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            Self::King => VAL_KING,
            Self::Queen => VAL_QUEEN,
            Self::Rook => VAL_ROOK,
            Self::Bishop => VAL_BISHOP,
            Self::Knight => VAL_KNIGHT,
            Self::Pawn => VAL_PAWN,
        }
    }

    const fn letter(self) -> char {
        match self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        }
    }

    const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'k' => Some(Self::King),
            'q' => Some(Self::Queen),
            'r' => Some(Self::Rook),
            'b' => Some(Self::Bishop),
            'n' => Some(Self::Knight),
            'p' => Some(Self::Pawn),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// FEN letter: uppercase for White.
    #[must_use]
    pub const fn symbol(self) -> char {
        let letter = self.kind.letter();
        match self.color {
            Color::White => letter.to_ascii_uppercase(),
            Color::Black => letter,
        }
    }

    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        let color = if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        match PieceKind::from_letter(symbol.to_ascii_lowercase()) {
            Some(kind) => Some(Self::new(kind, color)),
            None => None,
        }
    }

    #[must_use]
    pub const fn glyph(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }
}

impl PieceLike for Piece {
    type Side = Color;

    fn owner(self) -> Color {
        self.color
    }

    fn value(self) -> i32 {
        self.kind.value()
    }
}

pub type Board = Grid<Piece>;

#[must_use]
pub fn initial_board() -> Board {
    let mut board = Board::new(BOARD_SIZE, BOARD_SIZE);
    let back_rank = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    for color in [Color::White, Color::Black] {
        for (col, &kind) in back_rank.iter().enumerate() {
            board.set(
                BoardCoordinate::new(color.back_row(), col),
                Some(Piece::new(kind, color)),
            );
            board.set(
                BoardCoordinate::new(color.pawn_row(), col),
                Some(Piece::new(PieceKind::Pawn, color)),
            );
        }
    }
    board
}

/// Algebraic square name ("e4") to a coordinate; rank 8 is row 0.
#[must_use]
pub fn square(name: &str) -> Option<BoardCoordinate> {
    let mut chars = name.chars();
    let file = chars.next()?;
    let rank = chars.next()?.to_digit(10)? as usize;
    if chars.next().is_some() || !('a'..='h').contains(&file) || !(1..=8).contains(&rank) {
        return None;
    }
    let col = (file as usize) - ('a' as usize);
    Some(BoardCoordinate::new(BOARD_SIZE - rank, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_setup() {
        let board = initial_board();
        assert_eq!(
            board.get(square("e1").unwrap()),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            board.get(square("d8").unwrap()),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(board.occupied().count(), 32);
    }

    #[test]
    fn test_square_names() {
        assert_eq!(square("a8"), Some(BoardCoordinate::new(0, 0)));
        assert_eq!(square("h1"), Some(BoardCoordinate::new(7, 7)));
        assert_eq!(square("e4"), Some(BoardCoordinate::new(4, 4)));
        assert_eq!(square("i1"), None);
        assert_eq!(square("a9"), None);
        assert_eq!(square("a10"), None);
    }

    #[test]
    fn test_symbols_and_glyphs() {
        let knight = Piece::new(PieceKind::Knight, Color::White);
        assert_eq!(knight.symbol(), 'N');
        assert_eq!(knight.glyph(), '♘');
        assert_eq!(Piece::from_symbol('q'), Some(Piece::new(PieceKind::Queen, Color::Black)));
        assert_eq!(Piece::from_symbol('x'), None);
    }

    #[test]
    fn test_opposite_is_an_involution() {
        for color in [Color::White, Color::Black] {
            assert_ne!(color, color.opposite());
            assert_eq!(color, color.opposite().opposite());
        }
    }
}
