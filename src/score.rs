use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// How many results the history keeps.
pub const HISTORY_LIMIT: usize = 100;

/// Where finished games are reported. Persistence lives behind this trait.
pub trait ScoreRecorder {
    /// A decided game. Called at most once per game.
    fn record_result(&mut self, game_id: &str, score: u32);

    /// A new game of `game_id` was started.
    fn record_play(&mut self, _game_id: &str) {}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub game_id: String,
    pub score: u32,
}

/// In-memory score keeping: best score and play count per game, plus the
/// most recent results across all games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    high_scores: BTreeMap<String, u32>,
    play_counts: BTreeMap<String, u32>,
    history: VecDeque<GameResult>,
}

impl ScoreBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 0 until a result has been recorded.
    pub fn high_score(&self, game_id: &str) -> u32 {
        self.high_scores.get(game_id).copied().unwrap_or(0)
    }

    pub fn play_count(&self, game_id: &str) -> u32 {
        self.play_counts.get(game_id).copied().unwrap_or(0)
    }

    /// Most played games first; ties keep name order.
    pub fn frequent_games(&self, limit: usize) -> Vec<(&str, u32)> {
        let mut games: Vec<_> = self
            .play_counts
            .iter()
            .map(|(id, &count)| (id.as_str(), count))
            .collect();
        games.sort_by(|a, b| b.1.cmp(&a.1));
        games.truncate(limit);
        games
    }

    /// Up to `limit` of the latest results for `game_id`, oldest first.
    pub fn recent_scores(&self, game_id: &str, limit: usize) -> Vec<&GameResult> {
        let mut recent: Vec<_> = self
            .history
            .iter()
            .rev()
            .filter(|result| result.game_id == game_id)
            .take(limit)
            .collect();
        recent.reverse();
        recent
    }

    pub fn history(&self) -> impl Iterator<Item = &GameResult> {
        self.history.iter()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl ScoreRecorder for ScoreBoard {
    fn record_result(&mut self, game_id: &str, score: u32) {
        let high = self.high_scores.entry(game_id.to_owned()).or_insert(0);
        if score > *high {
            info!("{game_id}: new high score {score} (was {high})");
            *high = score;
        }

        self.history.push_back(GameResult {
            game_id: game_id.to_owned(),
            score,
        });
        while self.history.len() > HISTORY_LIMIT {
            self.history.pop_front();
        }
    }

    fn record_play(&mut self, game_id: &str) {
        *self.play_counts.entry(game_id.to_owned()).or_insert(0) += 1;
    }
}

impl<R: ScoreRecorder + ?Sized> ScoreRecorder for &mut R {
    fn record_result(&mut self, game_id: &str, score: u32) {
        (**self).record_result(game_id, score);
    }

    fn record_play(&mut self, game_id: &str) {
        (**self).record_play(game_id);
    }
}
