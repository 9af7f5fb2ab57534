use game_bundle::{AiWorker, GameMode, GameSession, ScoreBoard, SessionError};
use games_core::engine::eval::MaterialEvaluator;
use games_core::engine::Evaluator;
use games_core::logic::Grid;
use games_core::{ChessGame, Difficulty, EngineConfig, Playable, TicTacToe, XiangqiGame};

/// Chess games between engines can shuffle pieces forever.
const MAX_PLIES: usize = 300;

fn render<P: Copy>(grid: &Grid<P>, glyph: impl Fn(P) -> char) -> String {
    let mut out = String::new();
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            out.push(grid.get((row, col).into()).map_or('.', &glyph));
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

/// Lets the engine play both sides and prints the final position.
fn self_play<G>(
    game: G,
    config: EngineConfig,
    show: impl Fn(&G) -> String,
) -> Result<(), SessionError>
where
    G: Playable,
    MaterialEvaluator: Evaluator<G>,
{
    let worker = AiWorker::spawn()?;
    let mut scores = ScoreBoard::new();
    let mut session = GameSession::new(game, GameMode::ComputerVsComputer, config, &mut scores);

    let mut plies = 0;
    while session.awaiting_ai() && plies < MAX_PLIES {
        session.ai_turn(&worker)?;
        plies += 1;
    }

    println!("{}", show(session.game()));
    println!("{}: {:?} after {plies} plies", G::GAME_ID, session.game().status());
    drop(session);
    if let Some(result) = scores.history().last() {
        println!("recorded score {}", result.score);
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let game = args.next().unwrap_or_else(|| "tic_tac_toe".to_owned());
    let difficulty = match args.next().as_deref() {
        Some("easy") => Difficulty::Easy,
        Some("hard") => Difficulty::Hard,
        _ => Difficulty::Medium,
    };
    let config = EngineConfig::with_difficulty(difficulty);

    let result = match game.as_str() {
        "chess" => self_play(ChessGame::new(), config, |g| render(g.board(), |p| p.glyph())),
        "chinese_chess" | "xiangqi" => {
            self_play(XiangqiGame::new(), config, |g| render(g.board(), |p| p.glyph()))
        }
        "tic_tac_toe" | "tictactoe" => {
            self_play(TicTacToe::new(), config, |g| render(g.board(), |m| m.symbol()))
        }
        other => {
            eprintln!("unknown game '{other}', expected chess, chinese_chess or tic_tac_toe");
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
