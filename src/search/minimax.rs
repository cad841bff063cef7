//! Depth-bounded minimax with optional alpha-beta pruning.
//!
//! White maximises and Black minimises a White-positive score. Leaves are
//! nodes exactly `max_depth` plies below the root; a node with no legal moves
//! above the horizon is scored as mate or stalemate instead. With pruning
//! disabled the per-ply node counts reproduce perft.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::game_state::chess_types::Color;
use crate::game_state::game::Game;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{mate_score, BoardScorer, MaterialScorer};
use crate::search::search_config::{SearchConfig, MAX_SEARCH_DEPTH};
use crate::utils::long_algebraic::move_to_long_algebraic;

/// Nodes visited during one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeCounts {
    /// Horizon leaves under each root move, keyed by long algebraic notation.
    pub by_root_move: BTreeMap<String, u64>,
    /// Nodes visited at each ply, root included at index 0.
    pub by_ply: Vec<u64>,
}

impl NodeCounts {
    /// Nodes reached at the search horizon.
    pub fn leaves(&self) -> u64 {
        self.by_ply.last().copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.by_ply.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub evaluation: i32,
    pub best_move: Option<Move>,
    pub node_counts: NodeCounts,
    pub depth: u8,
    pub elapsed: Duration,
}

impl SearchOutcome {
    /// Engine-style diagnostic lines describing the search.
    pub fn info_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.node_counts.by_root_move.len() + 5);
        let seconds = self.elapsed.as_secs_f64();
        let leaves = self.node_counts.leaves();

        lines.push(format!(
            "info string minimax depth {} elapsed_ms {}",
            self.depth,
            self.elapsed.as_millis()
        ));
        for (root, nodes) in &self.node_counts.by_root_move {
            lines.push(format!("info string minimax root {root} nodes {nodes}"));
        }
        let nps = if seconds > 0.0 {
            (leaves as f64 / seconds) as u64
        } else {
            0
        };
        lines.push(format!("info string minimax nodes {leaves} nps {nps}"));
        lines.push(format!("info string minimax evaluation {}", self.evaluation));
        lines.push(match &self.best_move {
            Some(mv) => format!("info string minimax bestmove {}", move_to_long_algebraic(mv)),
            None => "info string minimax bestmove none".to_owned(),
        });
        lines
    }
}

#[derive(Debug, Clone)]
pub struct MinimaxSearch<S: BoardScorer = MaterialScorer> {
    config: SearchConfig,
    scorer: S,
}

impl MinimaxSearch<MaterialScorer> {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_scorer(config, MaterialScorer)
    }
}

struct Tally {
    by_ply: Vec<u64>,
    root_leaves: Vec<u64>,
}

impl<S: BoardScorer> MinimaxSearch<S> {
    /// Depths above `MAX_SEARCH_DEPTH` are clamped to it.
    pub fn with_scorer(mut config: SearchConfig, scorer: S) -> Self {
        if config.validate().is_err() {
            warn!(
                requested = config.max_depth,
                max = MAX_SEARCH_DEPTH,
                "search depth clamped"
            );
            config.max_depth = MAX_SEARCH_DEPTH;
        }
        Self { config, scorer }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Searches from the side to move. The game is restored on return.
    pub fn search(&self, game: &mut Game) -> SearchOutcome {
        let started = Instant::now();
        let depth = self.config.max_depth;
        let mut tally = Tally {
            by_ply: vec![0; usize::from(depth) + 1],
            root_leaves: Vec::new(),
        };
        tally.by_ply[0] = 1;

        let mut root_moves = Vec::new();
        let (evaluation, best_move) = if depth == 0 {
            (self.scorer.score(game.board()), None)
        } else {
            let side = game.side_to_move();
            root_moves = legal_moves(game, side);
            if root_moves.is_empty() {
                (self.terminal_score(game, side, 0), None)
            } else {
                self.order(game, &mut root_moves);
                tally.root_leaves = vec![0; root_moves.len()];
                self.explore(game, 0, &root_moves, i32::MIN, i32::MAX, None, &mut tally)
            }
        };

        let by_root_move = root_moves
            .iter()
            .zip(&tally.root_leaves)
            .map(|(mv, leaves)| (move_to_long_algebraic(mv), *leaves))
            .collect();
        let outcome = SearchOutcome {
            evaluation,
            best_move,
            node_counts: NodeCounts {
                by_root_move,
                by_ply: tally.by_ply,
            },
            depth,
            elapsed: started.elapsed(),
        };

        let best = outcome
            .best_move
            .as_ref()
            .map_or_else(|| "none".to_owned(), move_to_long_algebraic);
        info!(
            depth,
            leaves = outcome.node_counts.leaves(),
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            evaluation,
            best_move = %best,
            "search complete"
        );
        outcome
    }

    fn minimax(
        &self,
        game: &mut Game,
        ply: u8,
        alpha: i32,
        beta: i32,
        root_slot: usize,
        tally: &mut Tally,
    ) -> i32 {
        tally.by_ply[usize::from(ply)] += 1;
        if ply == self.config.max_depth {
            tally.root_leaves[root_slot] += 1;
            return self.scorer.score(game.board());
        }

        let side = game.side_to_move();
        let mut moves = legal_moves(game, side);
        if moves.is_empty() {
            return self.terminal_score(game, side, ply);
        }
        self.order(game, &mut moves);
        self.explore(game, ply, &moves, alpha, beta, Some(root_slot), tally).0
    }

    /// Scores `moves` from the node at `ply` and keeps the first strictly
    /// best one. `moves` must not be empty.
    #[allow(clippy::too_many_arguments)]
    fn explore(
        &self,
        game: &mut Game,
        ply: u8,
        moves: &[Move],
        mut alpha: i32,
        mut beta: i32,
        root_slot: Option<usize>,
        tally: &mut Tally,
    ) -> (i32, Option<Move>) {
        let maximizing = game.side_to_move() == Color::White;
        let mut best: Option<(i32, Move)> = None;

        for (i, &mv) in moves.iter().enumerate() {
            game.play(mv);
            let score = self.minimax(game, ply + 1, alpha, beta, root_slot.unwrap_or(i), tally);
            game.unmake_move();

            let improves = match best {
                Some((current, _)) if maximizing => score > current,
                Some((current, _)) => score < current,
                None => true,
            };
            if improves {
                best = Some((score, mv));
            }
            let best_score = best.map_or(score, |(current, _)| current);

            if maximizing {
                alpha = alpha.max(best_score);
            } else {
                beta = beta.min(best_score);
            }
            if self.config.alpha_beta_pruning && alpha >= beta {
                break;
            }
        }

        match best {
            Some((score, mv)) => (score, Some(mv)),
            None => (self.scorer.score(game.board()), None),
        }
    }

    /// Mate is scored against the side to move; the fewer plies used, the
    /// larger the magnitude.
    fn terminal_score(&self, game: &Game, side: Color, ply: u8) -> i32 {
        if is_in_check(game.board(), side) {
            -side.sign() * mate_score(self.config.max_depth - ply)
        } else {
            0
        }
    }

    fn order(&self, game: &Game, moves: &mut [Move]) {
        if self.config.captures_first {
            moves.sort_by_key(|mv| game.board().piece_at(mv.to).is_none());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_zero_is_static_evaluation() {
        let mut game = Game::new_game();
        let outcome = MinimaxSearch::new(SearchConfig::with_depth(0)).search(&mut game);
        assert_eq!(outcome.evaluation, 0);
        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.node_counts.by_ply, vec![1]);
        assert!(outcome.node_counts.by_root_move.is_empty());
    }

    #[test]
    fn exhaustive_counts_match_perft() {
        let mut game = Game::new_game();
        let outcome = MinimaxSearch::new(SearchConfig::exhaustive(3)).search(&mut game);
        assert_eq!(outcome.node_counts.by_ply, vec![1, 20, 400, 8_902]);
        assert_eq!(outcome.node_counts.by_root_move.len(), 20);
        assert_eq!(outcome.node_counts.by_root_move.values().sum::<u64>(), 8_902);
        assert_eq!(game, Game::new_game());
    }

    #[test]
    fn excessive_depth_is_clamped() {
        let search = MinimaxSearch::new(SearchConfig::with_depth(40));
        assert_eq!(search.config().max_depth, MAX_SEARCH_DEPTH);

        let search = MinimaxSearch::new(SearchConfig::exhaustive(MAX_SEARCH_DEPTH));
        assert_eq!(search.config().max_depth, MAX_SEARCH_DEPTH);
        assert!(!search.config().alpha_beta_pruning);
    }

    #[test]
    fn info_lines_report_best_move() {
        let mut game = Game::new_game();
        let outcome = MinimaxSearch::new(SearchConfig::exhaustive(1)).search(&mut game);
        let lines = outcome.info_lines();
        assert!(lines.iter().all(|line| line.starts_with("info string minimax")));
        assert!(lines.iter().any(|line| line == "info string minimax root e2e4 nodes 1"));
        assert!(lines.last().is_some_and(|line| line.contains("bestmove")));
    }
}
