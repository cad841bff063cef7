//! Boundary operations for callers that treat games as values.
//!
//! Every function here leaves its input untouched; `apply_move` hands back a
//! new game. Session storage and notation parsing live with the caller.

use crate::errors::ChessResult;
use crate::game_state::chess_types::Color;
use crate::game_state::game::Game;
use crate::game_state::position_record::PositionRecord;
use crate::moves::chess_move::{Move, MoveSpec};
use crate::search::minimax::{MinimaxSearch, SearchOutcome};
use crate::search::search_config::SearchConfig;

pub fn new_game() -> Game {
    Game::new_game()
}

pub fn load_position(record: &PositionRecord) -> ChessResult<Game> {
    Game::from_record(record)
}

/// Plays `spec` for the side to move on a copy of `game`.
pub fn apply_move(game: &Game, spec: &MoveSpec) -> ChessResult<Game> {
    let mut next = game.clone();
    next.apply_move(spec)?;
    Ok(next)
}

pub fn legal_moves(game: &Game, color: Color) -> Vec<Move> {
    game.clone().legal_moves(color)
}

pub fn is_in_check(game: &Game, color: Color) -> bool {
    game.is_in_check(color)
}

/// Searches `max_depth` plies with the default configuration otherwise.
/// Depths above `MAX_SEARCH_DEPTH` are clamped.
pub fn search_best_move(game: &Game, max_depth: u8) -> SearchOutcome {
    search_with_config(game, SearchConfig::with_depth(max_depth))
}

pub fn search_with_config(game: &Game, config: SearchConfig) -> SearchOutcome {
    MinimaxSearch::new(config).search(&mut game.clone())
}

pub fn material_balance(game: &Game) -> i32 {
    game.material_balance()
}
