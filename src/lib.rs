//! Host-side pieces around `games_core`: a background engine thread, the
//! session rules a front end enforces, and result keeping.

pub mod score;
pub mod session;
pub mod worker;

pub use score::{GameResult, ScoreBoard, ScoreRecorder};
pub use session::{GameMode, GameSession, SessionError};
pub use worker::{AiWorker, Input, Output, WorkerError};
