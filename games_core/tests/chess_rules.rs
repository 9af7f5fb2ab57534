use games_core::engine::SearchGame;
use games_core::logic::chess::{square, ChessGame, Color, Piece, PieceKind};
use games_core::logic::{BoardCoordinate, GameStatus, MoveError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -";

fn sq(name: &str) -> BoardCoordinate {
    square(name).unwrap()
}

fn play(game: &mut ChessGame, moves: &[(&str, &str)]) {
    for &(from, to) in moves {
        assert_eq!(game.try_move(sq(from), sq(to)), Ok(()), "{from}{to}");
    }
}

fn perft<G: SearchGame>(game: &mut G, depth: u8) -> u64 {
    let moves = game.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|mv| {
            let undo = game.play_unchecked(mv).unwrap();
            let nodes = perft(game, depth - 1);
            game.unplay(undo);
            nodes
        })
        .sum()
}

#[test]
fn test_perft_start_position() {
    let mut game = ChessGame::new();
    assert_eq!(perft(&mut game, 1), 20);
    assert_eq!(perft(&mut game, 2), 400);
    assert_eq!(perft(&mut game, 3), 8902);
    assert_eq!(game, ChessGame::new());
}

#[test]
fn test_perft_kiwipete() {
    let mut game = ChessGame::from_fen(KIWIPETE).unwrap();
    assert_eq!(perft(&mut game, 1), 48);
    assert_eq!(perft(&mut game, 2), 2039);
}

#[test]
fn test_en_passant_capture_and_undo() {
    let mut game = ChessGame::new();
    play(
        &mut game,
        &[("a2", "a3"), ("d7", "d5"), ("a3", "a4"), ("d5", "d4"), ("e2", "e4")],
    );
    let before = game.clone();

    assert!(game.get_valid_moves(sq("d4")).contains(&sq("e3")));
    assert!(game.make_move(sq("d4"), sq("e3")));
    assert_eq!(game.get_piece(sq("e4")), None);
    assert_eq!(
        game.get_piece(sq("e3")),
        Some(Piece::new(PieceKind::Pawn, Color::Black))
    );
    assert_eq!(
        game.captured(Color::White),
        &[Piece::new(PieceKind::Pawn, Color::White)]
    );

    assert!(game.undo());
    assert_eq!(game, before);
}

#[test]
fn test_en_passant_expires_after_one_move() {
    let mut game = ChessGame::new();
    play(
        &mut game,
        &[
            ("a2", "a3"),
            ("d7", "d5"),
            ("a3", "a4"),
            ("d5", "d4"),
            ("e2", "e4"),
            ("h7", "h6"),
            ("h2", "h3"),
        ],
    );
    assert!(!game.get_valid_moves(sq("d4")).contains(&sq("e3")));
}

#[test]
fn test_castling_right_lost_after_rook_returns() {
    let mut game = ChessGame::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -").unwrap();
    assert!(game.get_valid_moves(sq("e1")).contains(&sq("g1")));

    play(
        &mut game,
        &[("h1", "h2"), ("a8", "a7"), ("h2", "h1"), ("a7", "a8")],
    );
    let king_moves = game.get_valid_moves(sq("e1"));
    assert!(!king_moves.contains(&sq("g1")));
    assert!(king_moves.contains(&sq("c1")));
    assert!(!game.castling_rights().white_king_side);
    assert!(!game.castling_rights().black_queen_side);

    assert!(game.make_move(sq("e1"), sq("c1")));
    assert_eq!(
        game.get_piece(sq("d1")),
        Some(Piece::new(PieceKind::Rook, Color::White))
    );
    assert!(!game.get_valid_moves(sq("e8")).contains(&sq("c8")));
    assert!(game.get_valid_moves(sq("e8")).contains(&sq("g8")));
}

#[test]
fn test_castling_undo_restores_rights() {
    let mut game = ChessGame::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -").unwrap();
    let before = game.clone();
    assert!(game.make_move(sq("e1"), sq("g1")));
    assert_eq!(
        game.get_piece(sq("f1")),
        Some(Piece::new(PieceKind::Rook, Color::White))
    );
    assert!(game.undo());
    assert_eq!(game, before);
    assert!(game.castling_rights().white_king_side);
}

#[test]
fn test_back_rank_mate() {
    let mut game = ChessGame::from_fen("6k1/5ppp/8/8/8/8/8/4R1K1 w - -").unwrap();
    assert!(game.make_move(sq("e1"), sq("e8")));

    assert!(game.is_game_over());
    assert_eq!(game.get_winner(), Some(Color::White));
    assert!(game.is_in_check(Color::Black));
    let black_pieces: Vec<_> = game
        .board()
        .occupied()
        .filter(|(_, piece)| piece.color == Color::Black)
        .map(|(pos, _)| pos)
        .collect();
    assert_eq!(black_pieces.len(), 4);
    for pos in black_pieces {
        assert!(game.get_valid_moves(pos).is_empty());
    }
    assert_eq!(game.try_move(sq("g8"), sq("h8")), Err(MoveError::GameOver));
}

#[test]
fn test_undo_after_mate_resumes_play() {
    let mut game = ChessGame::from_fen("6k1/5ppp/8/8/8/8/8/4R1K1 w - -").unwrap();
    let before = game.clone();
    assert!(game.make_move(sq("e1"), sq("e8")));
    assert_eq!(game.status(), GameStatus::Won(Color::White));

    assert!(game.undo());
    assert_eq!(game, before);
    assert_eq!(game.status(), GameStatus::Playing);
    assert!(!game.is_game_over());
    assert!(game.make_move(sq("g1"), sq("h1")));
    assert_eq!(game.current_player(), Color::Black);
}

#[test]
fn test_stalemate_is_a_draw() {
    let game = ChessGame::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - -").unwrap();
    assert_eq!(game.status(), GameStatus::Draw);
    assert_eq!(game.get_winner(), None);
    assert!(!game.is_in_check(Color::Black));
}

#[test]
fn test_promotion_is_always_a_queen() {
    let mut game = ChessGame::from_fen("8/P6k/8/8/8/8/8/K7 w - -").unwrap();
    assert!(game.make_move(sq("a7"), sq("a8")));
    assert_eq!(
        game.get_piece(sq("a8")),
        Some(Piece::new(PieceKind::Queen, Color::White))
    );
    assert!(game.undo());
    assert_eq!(
        game.get_piece(sq("a7")),
        Some(Piece::new(PieceKind::Pawn, Color::White))
    );
}

#[test]
fn test_rejected_moves_leave_state_untouched() {
    let mut game = ChessGame::new();
    let before = game.clone();
    assert_eq!(game.try_move(sq("e7"), sq("e5")), Err(MoveError::NotYourTurn));
    assert_eq!(game.try_move(sq("e4"), sq("e5")), Err(MoveError::NoPieceAtSource));
    assert_eq!(game.try_move(sq("e2"), sq("e5")), Err(MoveError::IllegalMove));
    assert_eq!(
        game.try_move(sq("e2"), BoardCoordinate::new(8, 4)),
        Err(MoveError::OutOfBounds)
    );
    assert!(!game.make_move(sq("g1"), sq("g3")));
    assert_eq!(game, before);
    assert!(!game.undo());
}

#[test]
fn test_pinned_piece_cannot_move() {
    let game = ChessGame::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - -").unwrap();
    assert!(game.get_valid_moves(sq("e2")).is_empty());
    assert!(!game.get_valid_moves(sq("e1")).is_empty());
}

#[test]
fn test_fen_round_trip_after_moves() {
    let mut game = ChessGame::new();
    play(&mut game, &[("e2", "e4"), ("c7", "c5"), ("g1", "f3")]);
    assert_eq!(
        game.to_fen(),
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 0 2"
    );
    assert_eq!(game.move_count(), 3);
}

#[test]
fn test_random_walk_properties() {
    for seed in 0..3 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = ChessGame::new();

        for _ in 0..40 {
            let moves = game.get_all_moves();
            // A game is live exactly while the side to move has a legal move.
            assert_eq!(game.is_game_over(), moves.is_empty());
            if moves.is_empty() {
                break;
            }

            let mover = game.current_player();
            for &mv in &moves {
                let before = game.clone();
                assert!(game.make_move(mv.from, mv.to));
                assert!(!game.is_in_check(mover), "{mv:?} leaves {mover:?} in check");
                assert!(game.undo());
                assert_eq!(game, before);
            }

            let mv = *moves.choose(&mut rng).unwrap();
            assert!(game.make_move(mv.from, mv.to));
        }
    }
}
