use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use games_core::engine::eval::MaterialEvaluator;
use games_core::engine::{Evaluator, SearchGame};
use games_core::{AlphaBetaEngine, EngineConfig, SearchStats};
use log::{debug, warn};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;

pub enum Input<G: SearchGame> {
    /// Search a detached snapshot of the game with the given configuration.
    ComputeMove(G, EngineConfig),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Output<G: SearchGame> {
    /// `None` when the side to move had no legal move.
    MoveFound(Option<G::Move>, SearchStats),
}

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("failed to spawn the AI thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("the AI worker has stopped")]
    Disconnected,
}

/// A background thread owning one engine. Requests are answered in the order
/// they were sent.
pub struct AiWorker<G: SearchGame> {
    requests: Option<Sender<Input<G>>>,
    replies: Receiver<Output<G>>,
    handle: Option<JoinHandle<()>>,
}

impl<G> AiWorker<G>
where
    G: SearchGame + Send + 'static,
    MaterialEvaluator: Evaluator<G>,
{
    pub fn spawn() -> Result<Self, WorkerError> {
        let (request_tx, request_rx) = unbounded();
        let (reply_tx, reply_rx) = unbounded();
        let handle = thread::Builder::new()
            .name("ai-worker".to_owned())
            .spawn(move || run(&request_rx, &reply_tx))?;

        Ok(Self {
            requests: Some(request_tx),
            replies: reply_rx,
            handle: Some(handle),
        })
    }
}

impl<G: SearchGame> AiWorker<G> {
    pub fn send(&self, input: Input<G>) -> Result<(), WorkerError> {
        let requests = self.requests.as_ref().ok_or(WorkerError::Disconnected)?;
        requests.send(input).map_err(|_| WorkerError::Disconnected)
    }

    /// Blocks until the next reply arrives.
    pub fn recv(&self) -> Result<Output<G>, WorkerError> {
        self.replies.recv().map_err(|_| WorkerError::Disconnected)
    }

    /// The next reply if one is ready.
    pub fn try_recv(&self) -> Result<Option<Output<G>>, WorkerError> {
        match self.replies.try_recv() {
            Ok(output) => Ok(Some(output)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(WorkerError::Disconnected),
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<Output<G>>, WorkerError> {
        match self.replies.recv_timeout(timeout) {
            Ok(output) => Ok(Some(output)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(WorkerError::Disconnected),
        }
    }
}

impl<G: SearchGame> Drop for AiWorker<G> {
    fn drop(&mut self) {
        // Closing the request side ends the thread's receive loop.
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("AI worker thread panicked");
            }
        }
    }
}

fn run<G>(requests: &Receiver<Input<G>>, replies: &Sender<Output<G>>)
where
    G: SearchGame,
    MaterialEvaluator: Evaluator<G>,
{
    let mut engine: Option<AlphaBetaEngine> = None;

    for input in requests {
        let Input::ComputeMove(game, config) = input;
        let config = Arc::new(config);
        let engine = engine.get_or_insert_with(|| AlphaBetaEngine::new(Arc::clone(&config)));
        engine.update_config(config);

        let (mv, stats) = match engine.choose_move(&game) {
            Some((mv, stats)) => (Some(mv), stats),
            None => (None, SearchStats::default()),
        };
        if replies.send(Output::MoveFound(mv, stats)).is_err() {
            warn!("AI worker reply channel closed");
            return;
        }
    }
    debug!("AI worker request channel closed, stopping");
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_core::{ChessGame, Difficulty, TicTacToe};

    #[test]
    fn test_replies_with_a_legal_move() {
        let worker = AiWorker::spawn().unwrap();
        let game = ChessGame::new();
        let config = EngineConfig::with_difficulty(Difficulty::Medium).seeded(1);
        worker.send(Input::ComputeMove(game.clone(), config)).unwrap();

        let Output::MoveFound(mv, stats) = worker.recv().unwrap();
        assert!(game.get_all_moves().contains(&mv.unwrap()));
        assert_eq!(stats.depth, 2);
    }

    #[test]
    fn test_no_move_for_finished_game() {
        let worker = AiWorker::spawn().unwrap();
        let mut game = TicTacToe::new();
        for cell in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            assert!(game.make_move(cell.into()));
        }
        worker
            .send(Input::ComputeMove(game, EngineConfig::default()))
            .unwrap();
        assert_eq!(
            worker.recv().unwrap(),
            Output::MoveFound(None, SearchStats::default())
        );
    }

    #[test]
    fn test_try_recv_is_empty_before_any_request() {
        let worker: AiWorker<TicTacToe> = AiWorker::spawn().unwrap();
        assert_eq!(worker.try_recv().unwrap(), None);
    }
}
