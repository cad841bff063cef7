//! Perft: exhaustive legal-move tree counting for move generator
//! verification.
//!
//! Only leaves at the requested depth are counted. Traversal uses make/unmake
//! on the caller's game, which is restored when the call returns.

use std::collections::BTreeMap;

use crate::game_state::game::Game;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{legal_moves, legal_moves_into};
use crate::moves::chess_move::Move;
use crate::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Leaf count of the legal-move tree `depth` plies deep.
pub fn perft(game: &mut Game, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let side = game.side_to_move();
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(game, side, &mut moves);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        game.play(mv);
        nodes += perft(game, depth - 1);
        game.unmake_move();
    }
    nodes
}

/// Per-root-move leaf counts, keyed by long algebraic notation.
pub fn perft_divide(game: &mut Game, depth: u8) -> BTreeMap<String, u64> {
    let mut divide = BTreeMap::new();
    if depth == 0 {
        return divide;
    }
    let side = game.side_to_move();
    for mv in legal_moves(game, side) {
        let key = move_to_long_algebraic(&mv);
        game.play(mv);
        let nodes = perft(game, depth - 1);
        game.unmake_move();
        *divide.entry(key).or_insert(0) += nodes;
    }
    divide
}

/// Leaf count plus a classification of the moves that produced the leaves.
pub fn perft_detailed(game: &mut Game, depth: u8) -> PerftCounts {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return total;
    }
    let side = game.side_to_move();
    for mv in legal_moves(game, side) {
        perft_recurse(game, mv, depth, &mut total);
    }
    total
}

fn perft_recurse(game: &mut Game, mv: Move, depth: u8, total: &mut PerftCounts) {
    let en_passant = mv.is_en_passant(game.en_passant_target());
    game.play(mv);

    if depth == 1 {
        let mut leaf = PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
        leaf.captures = u64::from(mv.is_capture());
        leaf.en_passant = u64::from(en_passant);
        leaf.castles = u64::from(mv.castle.is_some());
        leaf.promotions = u64::from(mv.promotion.is_some());

        let defender = game.side_to_move();
        if is_in_check(game.board(), defender) {
            leaf.checks = 1;
            if legal_moves(game, defender).is_empty() {
                leaf.checkmates = 1;
            }
        }
        total.merge(leaf);
    } else {
        let side = game.side_to_move();
        for child in legal_moves(game, side) {
            perft_recurse(game, child, depth - 1, total);
        }
    }

    game.unmake_move();
}
