use crate::engine::config::EngineConfig;
use crate::engine::eval::MaterialEvaluator;
use crate::engine::{terminal_score, Evaluator, SearchGame, SearchPlan, SearchStats, Searcher, WIN_SCORE};
use crate::logic::Side;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::cmp::Reverse;
use std::sync::Arc;
use std::time::Instant;

/// Wider than any reachable score.
const INFINITY: i32 = WIN_SCORE * 2;

/// Fixed-depth minimax with alpha-beta pruning over any [`SearchGame`].
pub struct AlphaBetaEngine<E = MaterialEvaluator> {
    config: Arc<EngineConfig>,
    evaluator: E,
    rng: StdRng,
    nodes_searched: u64,
}

fn rng_for(config: &EngineConfig) -> StdRng {
    config
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

/// Most valuable capture first. The sort is stable, so equal candidates keep
/// their generated (or shuffled) order.
fn order_moves<G: SearchGame>(game: &G, moves: &mut [G::Move]) {
    moves.sort_by_key(|&mv| Reverse(game.capture_value(mv)));
}

impl AlphaBetaEngine<MaterialEvaluator> {
    #[must_use]
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self::with_evaluator(config, MaterialEvaluator)
    }
}

impl<E> AlphaBetaEngine<E> {
    pub fn with_evaluator(config: Arc<EngineConfig>, evaluator: E) -> Self {
        Self {
            rng: rng_for(&config),
            config,
            evaluator,
            nodes_searched: 0,
        }
    }

    /// Swaps the configuration; the random stream restarts only when the seed
    /// changes.
    pub fn update_config(&mut self, config: Arc<EngineConfig>) {
        if config.seed != self.config.seed {
            self.rng = rng_for(&config);
        }
        self.config = config;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub const fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// The move the configured difficulty would play, `None` when the side to
    /// move has no legal move.
    pub fn get_best_move<G>(&mut self, game: &G) -> Option<G::Move>
    where
        G: SearchGame,
        E: Evaluator<G>,
    {
        self.choose_move(game).map(|(mv, _)| mv)
    }

    pub fn choose_move<G>(&mut self, game: &G) -> Option<(G::Move, SearchStats)>
    where
        G: SearchGame,
        E: Evaluator<G>,
    {
        let mut scratch = game.detached();
        let mut moves = scratch.legal_moves();
        if moves.is_empty() {
            return None;
        }

        match game.search_plan(self.config.difficulty, &self.config) {
            SearchPlan::Random => self.random_move(&moves),
            SearchPlan::Search {
                depth,
                blunder_rate,
                shuffle,
            } => {
                if blunder_rate > 0.0 && self.rng.gen_bool(blunder_rate.clamp(0.0, 1.0)) {
                    debug!("blundering on purpose ({} candidates)", moves.len());
                    return self.random_move(&moves);
                }
                if shuffle {
                    moves.shuffle(&mut self.rng);
                }
                self.search_root(&mut scratch, moves, depth)
            }
        }
    }

    fn random_move<M: Copy>(&mut self, moves: &[M]) -> Option<(M, SearchStats)> {
        moves
            .choose(&mut self.rng)
            .map(|&mv| (mv, SearchStats::default()))
    }

    /// Root of the search. The window narrows as moves are scored and a later
    /// move replaces the best one only if strictly better, so the choice
    /// matches unpruned minimax over the same ordering.
    fn search_root<G>(
        &mut self,
        game: &mut G,
        mut moves: Vec<G::Move>,
        depth: u8,
    ) -> Option<(G::Move, SearchStats)>
    where
        G: SearchGame,
        E: Evaluator<G>,
    {
        let start = Instant::now();
        let depth = depth.max(1);
        self.nodes_searched = 0;
        if self.config.order_moves {
            order_moves(game, &mut moves);
        }

        let maximizing = game.side_to_move() == G::Side::FIRST;
        let mut alpha = -INFINITY;
        let mut beta = INFINITY;
        let mut best: Option<(G::Move, i32)> = None;

        for mv in moves {
            let Some(undo) = game.play_unchecked(mv) else {
                continue;
            };
            let score = self.alpha_beta(game, depth - 1, alpha, beta);
            game.unplay(undo);

            let improves = best.map_or(true, |(_, best_score)| {
                if maximizing {
                    score > best_score
                } else {
                    score < best_score
                }
            });
            if improves {
                best = Some((mv, score));
            }
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
        }

        let (mv, score) = best?;
        let stats = SearchStats {
            depth,
            nodes: self.nodes_searched,
            time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        debug!(
            "depth {} searched {} nodes in {}ms, best {:?} ({})",
            stats.depth, stats.nodes, stats.time_ms, mv, score
        );
        Some((mv, stats))
    }

    fn alpha_beta<G>(&mut self, game: &mut G, depth: u8, mut alpha: i32, mut beta: i32) -> i32
    where
        G: SearchGame,
        E: Evaluator<G>,
    {
        self.nodes_searched += 1;
        if depth == 0 {
            return self.evaluator.evaluate(game);
        }

        let mut moves = game.legal_moves();
        if let Some(status) = game.outcome(&moves) {
            return terminal_score(status);
        }
        if self.config.order_moves {
            order_moves(game, &mut moves);
        }

        let maximizing = game.side_to_move() == G::Side::FIRST;
        let mut best = if maximizing { -INFINITY } else { INFINITY };
        for mv in moves {
            let Some(undo) = game.play_unchecked(mv) else {
                continue;
            };
            let score = self.alpha_beta(game, depth - 1, alpha, beta);
            game.unplay(undo);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

impl<G, E> Searcher<G> for AlphaBetaEngine<E>
where
    G: SearchGame,
    E: Evaluator<G>,
{
    fn search(&mut self, game: &G, depth: u8) -> Option<(G::Move, SearchStats)> {
        let mut scratch = game.detached();
        let moves = scratch.legal_moves();
        self.search_root(&mut scratch, moves, depth)
    }
}

/// Plain minimax without pruning, with captures ordered first like the
/// engine. Returns the first move reaching the best score.
pub fn minimax<G, E>(game: &G, evaluator: &E, depth: u8) -> Option<(G::Move, i32)>
where
    G: SearchGame,
    E: Evaluator<G>,
{
    fn value<G: SearchGame, E: Evaluator<G>>(game: &mut G, evaluator: &E, depth: u8) -> i32 {
        if depth == 0 {
            return evaluator.evaluate(game);
        }
        let mut moves = game.legal_moves();
        if let Some(status) = game.outcome(&moves) {
            return terminal_score(status);
        }
        order_moves(game, &mut moves);
        let maximizing = game.side_to_move() == G::Side::FIRST;
        let scores = moves.into_iter().filter_map(|mv| {
            let undo = game.play_unchecked(mv)?;
            let score = value(game, evaluator, depth - 1);
            game.unplay(undo);
            Some(score)
        });
        let best = if maximizing { scores.max() } else { scores.min() };
        best.unwrap_or(0)
    }

    let mut scratch = game.detached();
    let mut moves = scratch.legal_moves();
    order_moves(&scratch, &mut moves);
    let maximizing = scratch.side_to_move() == G::Side::FIRST;
    let depth = depth.max(1);

    let mut best: Option<(G::Move, i32)> = None;
    for mv in moves {
        let Some(undo) = scratch.play_unchecked(mv) else {
            continue;
        };
        let score = value(&mut scratch, evaluator, depth - 1);
        scratch.unplay(undo);
        let improves = best.map_or(true, |(_, best_score)| {
            if maximizing {
                score > best_score
            } else {
                score < best_score
            }
        });
        if improves {
            best = Some((mv, score));
        }
    }
    best
}
