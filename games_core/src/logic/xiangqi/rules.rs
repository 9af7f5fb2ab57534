use crate::logic::board::BoardCoordinate;
use crate::logic::xiangqi::board::{Board, Color, Piece, PieceType};
use crate::logic::Side;

const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const HORSE_JUMPS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
];

/// Pseudo-legal destinations of `piece` on `from`. Every destination of an
/// enemy piece is also a square it attacks, so the same generator serves
/// check detection.
pub fn piece_moves(board: &Board, from: BoardCoordinate, piece: Piece, out: &mut Vec<BoardCoordinate>) {
    let color = piece.color;
    match piece.piece_type {
        PieceType::General => {
            for &(dr, dc) in &ORTHOGONAL {
                push_step(board, from, dr, dc, color, |to| color.in_palace(to), out);
            }
        }
        PieceType::Advisor => {
            for &(dr, dc) in &DIAGONAL {
                push_step(board, from, dr, dc, color, |to| color.in_palace(to), out);
            }
        }
        PieceType::Elephant => {
            for &(dr, dc) in &DIAGONAL {
                let eye_clear = board
                    .offset(from, dr, dc)
                    .is_some_and(|eye| board.is_empty_at(eye));
                if eye_clear {
                    push_step(board, from, dr * 2, dc * 2, color, |to| color.owns_row(to.row), out);
                }
            }
        }
        PieceType::Horse => {
            for &(dr, dc) in &HORSE_JUMPS {
                let leg_clear = board
                    .offset(from, dr / 2, dc / 2)
                    .is_some_and(|leg| board.is_empty_at(leg));
                if leg_clear {
                    push_step(board, from, dr, dc, color, |_| true, out);
                }
            }
        }
        PieceType::Chariot => chariot_moves(board, from, color, out),
        PieceType::Cannon => cannon_moves(board, from, color, out),
        PieceType::Soldier => {
            push_step(board, from, color.forward(), 0, color, |_| true, out);
            if !color.owns_row(from.row) {
                push_step(board, from, 0, -1, color, |_| true, out);
                push_step(board, from, 0, 1, color, |_| true, out);
            }
        }
    }
}

/// One step to an in-bounds, allowed square that is empty or enemy-held.
fn push_step(
    board: &Board,
    from: BoardCoordinate,
    dr: isize,
    dc: isize,
    color: Color,
    allowed: impl Fn(BoardCoordinate) -> bool,
    out: &mut Vec<BoardCoordinate>,
) {
    if let Some(to) = board.offset(from, dr, dc) {
        if allowed(to) && !board.get(to).is_some_and(|p| p.color == color) {
            out.push(to);
        }
    }
}

fn chariot_moves(board: &Board, from: BoardCoordinate, color: Color, out: &mut Vec<BoardCoordinate>) {
    for &(dr, dc) in &ORTHOGONAL {
        let mut current = from;
        while let Some(next) = board.offset(current, dr, dc) {
            match board.get(next) {
                None => out.push(next),
                Some(blocker) => {
                    if blocker.color != color {
                        out.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
}

fn cannon_moves(board: &Board, from: BoardCoordinate, color: Color, out: &mut Vec<BoardCoordinate>) {
    for &(dr, dc) in &ORTHOGONAL {
        let mut current = from;
        let mut screened = false;
        while let Some(next) = board.offset(current, dr, dc) {
            match (board.get(next), screened) {
                (None, false) => out.push(next),
                (None, true) => {}
                (Some(_), false) => screened = true,
                (Some(target), true) => {
                    if target.color != color {
                        out.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
}

#[must_use]
pub fn find_general(board: &Board, color: Color) -> Option<BoardCoordinate> {
    let general = Piece::new(PieceType::General, color);
    board
        .occupied()
        .find_map(|(pos, piece)| (piece == general).then_some(pos))
}

/// Whether any piece of `by` can move onto `square`.
#[must_use]
pub fn is_under_attack(board: &Board, square: BoardCoordinate, by: Color) -> bool {
    let mut targets = Vec::with_capacity(17);
    board
        .occupied()
        .filter(|(_, piece)| piece.color == by)
        .any(|(from, piece)| {
            targets.clear();
            piece_moves(board, from, piece, &mut targets);
            targets.contains(&square)
        })
}

/// Both generals on one file with nothing between them.
#[must_use]
pub fn generals_face(board: &Board) -> bool {
    let (Some(red), Some(black)) = (find_general(board, Color::Red), find_general(board, Color::Black))
    else {
        return false;
    };
    if red.col != black.col {
        return false;
    }
    let (top, bottom) = if red.row < black.row {
        (red.row, black.row)
    } else {
        (black.row, red.row)
    };
    (top + 1..bottom).all(|row| board.is_empty_at(BoardCoordinate::new(row, red.col)))
}

/// A missing general counts as being in check.
#[must_use]
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let Some(general) = find_general(board, color) else {
        return true;
    };
    is_under_attack(board, general, color.opposite()) || generals_face(board)
}
