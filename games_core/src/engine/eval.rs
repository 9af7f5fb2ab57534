use crate::engine::{terminal_score, Evaluator, WIN_SCORE};
use crate::logic::chess::{self, ChessGame};
use crate::logic::tictactoe::TicTacToe;
use crate::logic::xiangqi::{self, XiangqiGame};
use crate::logic::{PieceLike, Side};

/// Per rank a chess pawn has advanced from its start row.
pub const PAWN_ADVANCE_BONUS: i32 = 10;
/// Flat bonus for a soldier on the far side of the river.
pub const SOLDIER_CROSSED_BONUS: i32 = 20;

/// Material plus small positional terms, from the first player's side.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

fn signed<S: Side>(owner: S, value: i32) -> i32 {
    if owner == S::FIRST {
        value
    } else {
        -value
    }
}

#[must_use]
pub fn chess_score(board: &chess::Board) -> i32 {
    board
        .occupied()
        .map(|(pos, piece)| {
            let mut value = piece.value();
            if piece.kind == chess::PieceKind::Pawn {
                let advanced = piece.color.pawn_row().abs_diff(pos.row);
                value += i32::try_from(advanced).unwrap_or(0) * PAWN_ADVANCE_BONUS;
            }
            signed(piece.color, value)
        })
        .sum()
}

#[must_use]
pub fn xiangqi_score(board: &xiangqi::Board) -> i32 {
    board
        .occupied()
        .map(|(pos, piece)| {
            let mut value = piece.value();
            if piece.piece_type == xiangqi::PieceType::Soldier && !piece.color.owns_row(pos.row) {
                value += SOLDIER_CROSSED_BONUS;
            }
            signed(piece.color, value)
        })
        .sum()
}

impl Evaluator<ChessGame> for MaterialEvaluator {
    fn evaluate(&self, game: &ChessGame) -> i32 {
        if game.is_game_over() {
            return terminal_score(game.status());
        }
        chess_score(game.board())
    }
}

impl Evaluator<XiangqiGame> for MaterialEvaluator {
    fn evaluate(&self, game: &XiangqiGame) -> i32 {
        if game.is_game_over() {
            return terminal_score(game.status());
        }
        xiangqi_score(game.board())
    }
}

impl Evaluator<TicTacToe> for MaterialEvaluator {
    fn evaluate(&self, game: &TicTacToe) -> i32 {
        game.line_winner().map_or(0, |mark| signed(mark, WIN_SCORE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::BoardCoordinate;
    use crate::logic::Grid;

    fn mirrored<P: Copy>(board: &Grid<P>, swap: impl Fn(P) -> P) -> Grid<P> {
        let mut out = Grid::new(board.rows(), board.cols());
        for (pos, piece) in board.occupied() {
            let flipped = BoardCoordinate::new(board.rows() - 1 - pos.row, pos.col);
            out.set(flipped, Some(swap(piece)));
        }
        out
    }

    #[test]
    fn test_start_positions_are_balanced() {
        assert_eq!(MaterialEvaluator.evaluate(&ChessGame::new()), 0);
        assert_eq!(MaterialEvaluator.evaluate(&XiangqiGame::new()), 0);
        assert_eq!(MaterialEvaluator.evaluate(&TicTacToe::new()), 0);
    }

    #[test]
    fn test_chess_score_is_zero_sum() {
        let game = ChessGame::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
        let score = chess_score(game.board());
        let swapped = mirrored(game.board(), |p| {
            chess::Piece::new(p.kind, p.color.opposite())
        });
        assert_ne!(score, 0);
        assert_eq!(chess_score(&swapped), -score);
    }

    #[test]
    fn test_xiangqi_score_is_zero_sum() {
        let game = XiangqiGame::from_fen("3k5/9/p8/4P4/9/9/9/9/9/4K4 w").unwrap();
        let score = xiangqi_score(game.board());
        let swapped = mirrored(game.board(), |p| {
            xiangqi::Piece::new(p.piece_type, p.color.opposite())
        });
        // Only the red soldier has crossed.
        assert_eq!(score, SOLDIER_CROSSED_BONUS);
        assert_eq!(xiangqi_score(&swapped), -score);
    }

    #[test]
    fn test_advanced_pawn_scores_higher() {
        let home = ChessGame::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - -").unwrap();
        let pushed = ChessGame::from_fen("4k3/8/8/4P3/8/8/8/4K3 w - -").unwrap();
        let delta = MaterialEvaluator.evaluate(&pushed) - MaterialEvaluator.evaluate(&home);
        assert_eq!(delta, 3 * PAWN_ADVANCE_BONUS);
    }

    #[test]
    fn test_terminal_state_dominates_material() {
        // Black is mated on the back rank despite the extra queen.
        let game = ChessGame::from_fen("4R1k1/5ppp/8/8/8/8/q7/6K1 b - -").unwrap();
        assert_eq!(game.get_winner(), Some(chess::Color::White));
        assert_eq!(MaterialEvaluator.evaluate(&game), WIN_SCORE);
    }
}
