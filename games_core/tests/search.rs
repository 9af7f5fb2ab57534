use games_core::engine::config::{Difficulty, EngineConfig};
use games_core::engine::eval::{chess_score, xiangqi_score, MaterialEvaluator};
use games_core::engine::search::{minimax, AlphaBetaEngine};
use games_core::engine::{SearchGame, Searcher};
use games_core::logic::tictactoe::TicTacToe;
use games_core::logic::xiangqi::{self, XiangqiGame};
use games_core::logic::{chess, BoardCoordinate, GameStatus, Grid, Side};
use games_core::ChessGame;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;

fn engine() -> AlphaBetaEngine {
    AlphaBetaEngine::new(Arc::new(
        EngineConfig::with_difficulty(Difficulty::Hard).seeded(11),
    ))
}

fn mirrored<P: Copy>(board: &Grid<P>, swap: impl Fn(P) -> P) -> Grid<P> {
    let mut out = Grid::new(board.rows(), board.cols());
    for (pos, piece) in board.occupied() {
        out.set(
            BoardCoordinate::new(board.rows() - 1 - pos.row, pos.col),
            Some(swap(piece)),
        );
    }
    out
}

/// Positions reached by seeded random play, including the start.
fn random_positions<G: SearchGame>(start: G, plies: usize, seed: u64) -> Vec<G> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = start;
    let mut seen = vec![game.clone()];
    for _ in 0..plies {
        let moves = game.legal_moves();
        let Some(&mv) = moves.choose(&mut rng) else {
            break;
        };
        game.play_unchecked(mv).unwrap();
        seen.push(game.clone());
    }
    seen
}

#[test]
fn test_alpha_beta_matches_minimax_chess() {
    let mut engine = engine();
    let start = ChessGame::new();
    let (pruned, _) = engine.search(&start, 3).unwrap();
    let (reference, _) = minimax(&start, &MaterialEvaluator, 3).unwrap();
    assert_eq!(pruned, reference);

    for game in random_positions(ChessGame::new(), 16, 5).into_iter().step_by(4) {
        let pruned = engine.search(&game, 2).map(|(mv, _)| mv);
        let reference = minimax(&game, &MaterialEvaluator, 2).map(|(mv, _)| mv);
        assert_eq!(pruned, reference);
    }
}

#[test]
fn test_alpha_beta_matches_minimax_xiangqi() {
    let mut engine = engine();
    for game in random_positions(XiangqiGame::new(), 12, 9).into_iter().step_by(4) {
        let pruned = engine.search(&game, 2).map(|(mv, _)| mv);
        let reference = minimax(&game, &MaterialEvaluator, 2).map(|(mv, _)| mv);
        assert_eq!(pruned, reference);
    }
}

#[test]
fn test_alpha_beta_matches_minimax_tictactoe() {
    let mut engine = engine();
    for game in random_positions(TicTacToe::new(), 5, 2).into_iter().skip(2) {
        let pruned = engine.search(&game, 9).map(|(mv, _)| mv);
        let reference = minimax(&game, &MaterialEvaluator, 9).map(|(mv, _)| mv);
        assert_eq!(pruned, reference);
    }
}

#[test]
fn test_pruning_visits_fewer_nodes() {
    let mut engine = engine();
    let (_, stats) = engine.search(&ChessGame::new(), 3).unwrap();
    // Unpruned minimax visits 20 + 400 + 8902 nodes below the root.
    assert!(stats.nodes < 20 + 400 + 8902);
    assert_eq!(stats.depth, 3);
}

#[test]
fn test_evaluation_is_zero_sum_chess() {
    for game in random_positions(ChessGame::new(), 30, 21) {
        let board = game.board();
        let swapped = mirrored(board, |p| chess::Piece::new(p.kind, p.color.opposite()));
        assert_eq!(chess_score(&swapped), -chess_score(board));
    }
}

#[test]
fn test_evaluation_is_zero_sum_xiangqi() {
    for game in random_positions(XiangqiGame::new(), 30, 22) {
        let board = game.board();
        let swapped = mirrored(board, |p| {
            xiangqi::Piece::new(p.piece_type, p.color.opposite())
        });
        assert_eq!(xiangqi_score(&swapped), -xiangqi_score(board));
    }
}

#[test]
fn test_xiangqi_mate_in_one() {
    let mut game = XiangqiGame::from_fen("4k4/R8/9/9/9/8R/9/9/9/3K5 w").unwrap();
    // At depth 2 only an immediate mate reaches the win score.
    let (mv, _) = engine().search(&game, 2).unwrap();
    assert!(game.make_move(mv.from, mv.to));
    assert_eq!(game.status(), GameStatus::Won(xiangqi::Color::Red));
}

#[test]
fn test_black_minimizes() {
    // Black to move can win the white queen with the rook.
    let game = ChessGame::from_fen("4k3/8/8/8/r2Q4/8/8/4K3 b - -").unwrap();
    assert_eq!(game.current_player(), chess::Color::FIRST.opposite());
    let mv = engine().get_best_move(&game).unwrap();
    assert_eq!(
        (mv.from, mv.to),
        (chess::square("a4").unwrap(), chess::square("d4").unwrap())
    );
}

#[test]
fn test_seeded_engines_agree() {
    let config = Arc::new(EngineConfig::with_difficulty(Difficulty::Easy).seeded(99));
    let mut first = AlphaBetaEngine::new(Arc::clone(&config));
    let mut second = AlphaBetaEngine::new(config);
    let game = ChessGame::new();
    for _ in 0..5 {
        assert_eq!(first.get_best_move(&game), second.get_best_move(&game));
    }
}
