use crate::logic::board::{BoardCoordinate, Grid};
use crate::logic::{PieceLike, Side};
use serde::{Deserialize, Serialize};

pub const BOARD_ROWS: usize = 10;
pub const BOARD_COLS: usize = 9;

pub const START_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

impl Side for Color {
    const FIRST: Self = Self::Red;

    fn opposite(self) -> Self {
        match self {
            Self::Red => Self::Black,
            Self::Black => Self::Red,
        }
    }
}

impl Color {
    /// Row delta of a forward soldier step. Red starts at the bottom.
    #[must_use]
    pub const fn forward(self) -> isize {
        match self {
            Self::Red => -1,
            Self::Black => 1,
        }
    }

    /// Whether `row` lies on this side of the river.
    #[must_use]
    pub const fn owns_row(self, row: usize) -> bool {
        match self {
            Self::Red => row >= 5,
            Self::Black => row <= 4,
        }
    }

    #[must_use]
    pub const fn in_palace(self, pos: BoardCoordinate) -> bool {
        let rows_ok = match self {
            Self::Red => pos.row >= 7 && pos.row <= 9,
            Self::Black => pos.row <= 2,
        };
        rows_ok && pos.col >= 3 && pos.col <= 5
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
}

impl PieceType {
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            Self::General => 10_000,
            Self::Advisor | Self::Elephant => 20,
            Self::Horse => 40,
            Self::Chariot => 90,
            Self::Cannon => 45,
            Self::Soldier => 10,
        }
    }

    const fn letter(self) -> char {
        match self {
            Self::General => 'k',
            Self::Advisor => 'a',
            Self::Elephant => 'b',
            Self::Horse => 'n',
            Self::Chariot => 'r',
            Self::Cannon => 'c',
            Self::Soldier => 'p',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    #[must_use]
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color }
    }

    /// FEN letter, uppercase for Red.
    #[must_use]
    pub const fn symbol(self) -> char {
        let letter = self.piece_type.letter();
        match self.color {
            Color::Red => letter.to_ascii_uppercase(),
            Color::Black => letter,
        }
    }

    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        let color = if symbol.is_ascii_uppercase() {
            Color::Red
        } else {
            Color::Black
        };
        let piece_type = match symbol.to_ascii_lowercase() {
            'k' => PieceType::General,
            'a' => PieceType::Advisor,
            'b' | 'e' => PieceType::Elephant,
            'n' | 'h' => PieceType::Horse,
            'r' => PieceType::Chariot,
            'c' => PieceType::Cannon,
            'p' => PieceType::Soldier,
            _ => return None,
        };
        Some(Self::new(piece_type, color))
    }

    #[must_use]
    pub const fn glyph(self) -> char {
        match (self.color, self.piece_type) {
            (Color::Red, PieceType::General) => '帥',
            (Color::Red, PieceType::Advisor) => '仕',
            (Color::Red, PieceType::Elephant) => '相',
            (Color::Red, PieceType::Horse) => '傌',
            (Color::Red, PieceType::Chariot) => '俥',
            (Color::Red, PieceType::Cannon) => '炮',
            (Color::Red, PieceType::Soldier) => '兵',
            (Color::Black, PieceType::General) => '將',
            (Color::Black, PieceType::Advisor) => '士',
            (Color::Black, PieceType::Elephant) => '象',
            (Color::Black, PieceType::Horse) => '馬',
            (Color::Black, PieceType::Chariot) => '車',
            (Color::Black, PieceType::Cannon) => '砲',
            (Color::Black, PieceType::Soldier) => '卒',
        }
    }
}

impl PieceLike for Piece {
    type Side = Color;

    fn owner(self) -> Color {
        self.color
    }

    fn value(self) -> i32 {
        self.piece_type.value()
    }
}

pub type Board = Grid<Piece>;

#[must_use]
pub fn initial_board() -> Board {
    let mut board = Board::new(BOARD_ROWS, BOARD_COLS);
    let back_rank = [
        PieceType::Chariot,
        PieceType::Horse,
        PieceType::Elephant,
        PieceType::Advisor,
        PieceType::General,
        PieceType::Advisor,
        PieceType::Elephant,
        PieceType::Horse,
        PieceType::Chariot,
    ];

    for (color, back, cannons, soldiers) in [(Color::Black, 0, 2, 3), (Color::Red, 9, 7, 6)] {
        for (col, &piece_type) in back_rank.iter().enumerate() {
            board.set(BoardCoordinate::new(back, col), Some(Piece::new(piece_type, color)));
        }
        for col in [1, 7] {
            board.set(
                BoardCoordinate::new(cannons, col),
                Some(Piece::new(PieceType::Cannon, color)),
            );
        }
        for col in (0..BOARD_COLS).step_by(2) {
            board.set(
                BoardCoordinate::new(soldiers, col),
                Some(Piece::new(PieceType::Soldier, color)),
            );
        }
    }
    board
}
