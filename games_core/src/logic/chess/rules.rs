use crate::logic::board::BoardCoordinate;
use crate::logic::chess::board::{Board, Color, Piece, PieceKind};
use crate::logic::chess::position::{CastlingRights, LastMove};
use crate::logic::Side;

const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const KNIGHT_JUMPS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const KING_HOME_COL: usize = 4;

/// What a generator call is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    /// Destinations the piece may move to (castling and en passant excluded).
    Moves,
    /// Squares the piece attacks: pawn diagonals only, defended squares included.
    Attacks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    pub const BOTH: [Self; 2] = [Self::King, Self::Queen];

    #[must_use]
    pub const fn rook_col(self) -> usize {
        match self {
            Self::King => 7,
            Self::Queen => 0,
        }
    }

    #[must_use]
    pub const fn king_target_col(self) -> usize {
        match self {
            Self::King => 6,
            Self::Queen => 2,
        }
    }

    #[must_use]
    pub const fn rook_target_col(self) -> usize {
        match self {
            Self::King => 5,
            Self::Queen => 3,
        }
    }

    /// Columns strictly between king and rook.
    const fn between(self) -> &'static [usize] {
        match self {
            Self::King => &[5, 6],
            Self::Queen => &[1, 2, 3],
        }
    }

    /// Columns the king crosses or lands on.
    const fn king_path(self) -> &'static [usize] {
        match self {
            Self::King => &[5, 6],
            Self::Queen => &[3, 2],
        }
    }

    /// The castle a two-column king step from the home square denotes.
    #[must_use]
    pub const fn from_king_step(from: BoardCoordinate, to: BoardCoordinate) -> Option<Self> {
        if from.row != to.row || from.col != KING_HOME_COL {
            return None;
        }
        match to.col {
            6 => Some(Self::King),
            2 => Some(Self::Queen),
            _ => None,
        }
    }

    /// Which right a rook standing on `pos` belongs to, if `pos` is a home corner.
    #[must_use]
    pub const fn of_rook_home(color: Color, pos: BoardCoordinate) -> Option<Self> {
        if pos.row != color.back_row() {
            return None;
        }
        match pos.col {
            7 => Some(Self::King),
            0 => Some(Self::Queen),
            _ => None,
        }
    }
}

/// Single dispatch point for per-kind generation, shared by move generation and
/// attack queries.
pub fn piece_reach(
    board: &Board,
    from: BoardCoordinate,
    piece: Piece,
    reach: Reach,
    out: &mut Vec<BoardCoordinate>,
) {
    match piece.kind {
        PieceKind::Pawn => pawn_reach(board, from, piece.color, reach, out),
        PieceKind::Knight => step_reach(board, from, piece.color, &KNIGHT_JUMPS, reach, out),
        PieceKind::Bishop => slide_reach(board, from, piece.color, &DIAGONAL, reach, out),
        PieceKind::Rook => slide_reach(board, from, piece.color, &ORTHOGONAL, reach, out),
        PieceKind::Queen => {
            slide_reach(board, from, piece.color, &ORTHOGONAL, reach, out);
            slide_reach(board, from, piece.color, &DIAGONAL, reach, out);
        }
        PieceKind::King => {
            step_reach(board, from, piece.color, &ORTHOGONAL, reach, out);
            step_reach(board, from, piece.color, &DIAGONAL, reach, out);
        }
    }
}

fn pawn_reach(
    board: &Board,
    from: BoardCoordinate,
    color: Color,
    reach: Reach,
    out: &mut Vec<BoardCoordinate>,
) {
    let dir = color.forward();

    for dc in [-1, 1] {
        let Some(target) = board.offset(from, dir, dc) else {
            continue;
        };
        match reach {
            Reach::Attacks => out.push(target),
            Reach::Moves => {
                if board.get(target).is_some_and(|p| p.color != color) {
                    out.push(target);
                }
            }
        }
    }

    if reach == Reach::Attacks {
        return;
    }

    let Some(one) = board.offset(from, dir, 0).filter(|&sq| board.is_empty_at(sq)) else {
        return;
    };
    out.push(one);
    if from.row == color.pawn_row() {
        if let Some(two) = board.offset(one, dir, 0).filter(|&sq| board.is_empty_at(sq)) {
            out.push(two);
        }
    }
}

fn step_reach(
    board: &Board,
    from: BoardCoordinate,
    color: Color,
    offsets: &[(isize, isize)],
    reach: Reach,
    out: &mut Vec<BoardCoordinate>,
) {
    for &(dr, dc) in offsets {
        if let Some(target) = board.offset(from, dr, dc) {
            let own = board.get(target).is_some_and(|p| p.color == color);
            if !own || reach == Reach::Attacks {
                out.push(target);
            }
        }
    }
}

fn slide_reach(
    board: &Board,
    from: BoardCoordinate,
    color: Color,
    directions: &[(isize, isize)],
    reach: Reach,
    out: &mut Vec<BoardCoordinate>,
) {
    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(next) = board.offset(current, dr, dc) {
            match board.get(next) {
                None => out.push(next),
                Some(blocker) => {
                    if blocker.color != color || reach == Reach::Attacks {
                        out.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
}

/// Whether any piece of `by` attacks `square`. Pseudo-legal only.
#[must_use]
pub fn is_under_attack(board: &Board, square: BoardCoordinate, by: Color) -> bool {
    let mut targets = Vec::with_capacity(28);
    board
        .occupied()
        .filter(|(_, piece)| piece.color == by)
        .any(|(from, piece)| {
            targets.clear();
            piece_reach(board, from, piece, Reach::Attacks, &mut targets);
            targets.contains(&square)
        })
}

#[must_use]
pub fn find_king(board: &Board, color: Color) -> Option<BoardCoordinate> {
    let king = Piece::new(PieceKind::King, color);
    board
        .occupied()
        .find_map(|(pos, piece)| (piece == king).then_some(pos))
}

/// King destinations for every castle `color` may currently perform from `from`.
pub fn castling_targets(
    board: &Board,
    from: BoardCoordinate,
    color: Color,
    rights: CastlingRights,
    out: &mut Vec<BoardCoordinate>,
) {
    let row = color.back_row();
    if from != BoardCoordinate::new(row, KING_HOME_COL) {
        return;
    }
    let enemy = color.opposite();
    let rook = Piece::new(PieceKind::Rook, color);
    let mut king_safe = None;

    for side in CastleSide::BOTH {
        if !rights.has(color, side)
            || board.get(BoardCoordinate::new(row, side.rook_col())) != Some(rook)
        {
            continue;
        }
        if side
            .between()
            .iter()
            .any(|&col| !board.is_empty_at(BoardCoordinate::new(row, col)))
        {
            continue;
        }
        if !*king_safe.get_or_insert_with(|| !is_under_attack(board, from, enemy)) {
            return;
        }
        if side
            .king_path()
            .iter()
            .any(|&col| is_under_attack(board, BoardCoordinate::new(row, col), enemy))
        {
            continue;
        }
        out.push(BoardCoordinate::new(row, side.king_target_col()));
    }
}

/// The en-passant destination for the pawn on `from`, if the last move was an
/// adjacent enemy pawn's double step.
#[must_use]
pub fn en_passant_target(
    board: &Board,
    from: BoardCoordinate,
    pawn: Piece,
    last_move: Option<LastMove>,
) -> Option<BoardCoordinate> {
    let last = last_move?;
    let double_step = last.piece.kind == PieceKind::Pawn
        && last.piece.color != pawn.color
        && last.from.col == last.to.col
        && last.from.row.abs_diff(last.to.row) == 2;
    if !double_step || last.to.row != from.row || last.to.col.abs_diff(from.col) != 1 {
        return None;
    }
    board
        .offset(last.to, pawn.color.forward(), 0)
        .filter(|&sq| board.is_empty_at(sq))
}
