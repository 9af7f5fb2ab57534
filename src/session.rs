use crate::score::ScoreRecorder;
use crate::worker::{AiWorker, Input, Output, WorkerError};
use games_core::logic::Side;
use games_core::{Difficulty, EngineConfig, Playable, SearchStats};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Both sides are entered by hand.
    #[default]
    HumanVsHuman,
    /// The human plays the side that moves first, the engine the other.
    HumanVsComputer,
    ComputerVsComputer,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("the computer is still thinking")]
    AiThinking,
    #[error("the game is over")]
    GameOver,
    #[error("it is the computer's turn")]
    NotHumanTurn,
    #[error("it is a human player's turn")]
    NotComputerTurn,
    #[error("illegal move")]
    IllegalMove,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("no computer move was requested")]
    NoPendingRequest,
    #[error(transparent)]
    Worker(#[from] WorkerError),
}

/// One game as a host drives it: who may move, whether the engine is busy,
/// and reporting the result once the game is decided.
pub struct GameSession<G: Playable, R: ScoreRecorder> {
    game: G,
    mode: GameMode,
    config: EngineConfig,
    recorder: R,
    ai_thinking: bool,
    /// Replies still in flight for requests made before the last reset.
    stale_replies: usize,
    reported: bool,
}

impl<G: Playable, R: ScoreRecorder> GameSession<G, R> {
    pub fn new(game: G, mode: GameMode, config: EngineConfig, mut recorder: R) -> Self {
        recorder.record_play(G::GAME_ID);
        info!("{}: new session ({mode:?})", G::GAME_ID);
        Self {
            game,
            mode,
            config,
            recorder,
            ai_thinking: false,
            stale_replies: 0,
            reported: false,
        }
    }

    pub const fn game(&self) -> &G {
        &self.game
    }

    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub const fn recorder(&self) -> &R {
        &self.recorder
    }

    pub const fn is_ai_thinking(&self) -> bool {
        self.ai_thinking
    }

    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::HumanVsHuman => true,
            GameMode::HumanVsComputer => self.game.side_to_move() == G::Side::FIRST,
            GameMode::ComputerVsComputer => false,
        }
    }

    /// True when the engine should be asked for the next move.
    pub fn awaiting_ai(&self) -> bool {
        !self.ai_thinking && !self.game.is_game_over() && !self.is_human_turn()
    }

    pub fn can_undo(&self) -> bool {
        !self.ai_thinking && !self.game.is_game_over() && self.game.can_undo()
    }

    /// A human move. Refused while the engine is thinking, after the game has
    /// ended, or on the engine's turn.
    pub fn play(&mut self, mv: G::Move) -> Result<(), SessionError> {
        if self.ai_thinking {
            return Err(SessionError::AiThinking);
        }
        if self.game.is_game_over() {
            return Err(SessionError::GameOver);
        }
        if !self.is_human_turn() {
            return Err(SessionError::NotHumanTurn);
        }
        if !self.game.play(mv) {
            return Err(SessionError::IllegalMove);
        }
        self.after_move();
        Ok(())
    }

    /// Takes back one ply, or two against the computer so the human is on
    /// move again. Returns the number of plies taken back.
    pub fn undo(&mut self) -> Result<usize, SessionError> {
        if self.ai_thinking {
            return Err(SessionError::AiThinking);
        }
        if self.game.is_game_over() {
            return Err(SessionError::GameOver);
        }
        if !self.game.can_undo() {
            return Err(SessionError::NothingToUndo);
        }

        let plies = match self.mode {
            GameMode::HumanVsComputer => 2,
            GameMode::HumanVsHuman | GameMode::ComputerVsComputer => 1,
        };
        let mut undone = 0;
        while undone < plies && self.game.undo() {
            undone += 1;
        }
        debug!("{}: took back {undone} plies", G::GAME_ID);
        Ok(undone)
    }

    /// Starts a new game. A reply to a request made before the reset is
    /// discarded when it arrives.
    pub fn reset(&mut self) {
        if self.ai_thinking {
            self.ai_thinking = false;
            self.stale_replies += 1;
        }
        self.game.reset();
        self.reported = false;
        self.recorder.record_play(G::GAME_ID);
        info!("{}: new game ({:?})", G::GAME_ID, self.mode);
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.reset();
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
        self.reset();
    }

    /// Sends a detached snapshot of the game to the worker.
    pub fn request_ai_move(&mut self, worker: &AiWorker<G>) -> Result<(), SessionError> {
        if self.ai_thinking {
            return Err(SessionError::AiThinking);
        }
        if self.game.is_game_over() {
            return Err(SessionError::GameOver);
        }
        if self.is_human_turn() {
            return Err(SessionError::NotComputerTurn);
        }
        worker.send(Input::ComputeMove(self.game.detached(), self.config.clone()))?;
        self.ai_thinking = true;
        Ok(())
    }

    /// Blocks until the pending request is answered and plays the reply.
    pub fn wait_for_ai(&mut self, worker: &AiWorker<G>) -> Result<SearchStats, SessionError> {
        if !self.ai_thinking {
            return Err(SessionError::NoPendingRequest);
        }
        loop {
            let reply = worker.recv()?;
            if let Some(stats) = self.accept_reply(reply)? {
                return Ok(stats);
            }
        }
    }

    /// Plays the reply if it has arrived, `None` otherwise.
    pub fn poll_ai(&mut self, worker: &AiWorker<G>) -> Result<Option<SearchStats>, SessionError> {
        if !self.ai_thinking {
            return Err(SessionError::NoPendingRequest);
        }
        while let Some(reply) = worker.try_recv()? {
            if let Some(stats) = self.accept_reply(reply)? {
                return Ok(Some(stats));
            }
        }
        Ok(None)
    }

    /// Request and wait in one step.
    pub fn ai_turn(&mut self, worker: &AiWorker<G>) -> Result<SearchStats, SessionError> {
        self.request_ai_move(worker)?;
        self.wait_for_ai(worker)
    }

    /// `None` when the reply belonged to a game that has since been reset.
    fn accept_reply(&mut self, reply: Output<G>) -> Result<Option<SearchStats>, SessionError> {
        if self.stale_replies > 0 {
            self.stale_replies -= 1;
            debug!("{}: dropping reply for an abandoned game", G::GAME_ID);
            return Ok(None);
        }

        self.ai_thinking = false;
        let Output::MoveFound(mv, stats) = reply;
        if let Some(mv) = mv {
            if !self.game.play(mv) {
                warn!("{}: engine proposed illegal move {mv:?}", G::GAME_ID);
                return Err(SessionError::IllegalMove);
            }
            debug!(
                "{}: engine played {mv:?} (depth {}, {} nodes, {}ms)",
                G::GAME_ID,
                stats.depth,
                stats.nodes,
                stats.time_ms
            );
        }
        self.after_move();
        Ok(Some(stats))
    }

    fn after_move(&mut self) {
        if self.reported || !self.game.is_game_over() {
            return;
        }
        self.reported = true;
        info!("{}: game over: {:?}", G::GAME_ID, self.game.status());
        if let Some(score) = self.game.result_score() {
            info!("{}: reporting score {score}", G::GAME_ID);
            self.recorder.record_result(G::GAME_ID, score);
        }
    }
}
