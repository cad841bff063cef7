//! Crate root module declarations for the Manto chess engine.
//!
//! Exposes the rules core (game state, precomputed move tables, move
//! generation), the minimax search, the value-style boundary API and the
//! notation converters so callers, tests and benches can import stable
//! module paths.

pub mod api;
pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game;
    pub mod position_record;
    pub mod undo_state;
}

pub mod moves {
    pub mod chess_move;
    pub mod pawn_moves;
    pub mod ray_moves;
    pub mod step_moves;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod move_expansion;
    pub mod perft;
    pub mod pseudo_legal;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
    pub mod search_config;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}

pub use errors::{ChessError, ChessResult};
pub use game_state::board::{Board, Piece, PieceId};
pub use game_state::chess_types::{CastleSide, CastlingRights, Color, PieceKind, Square};
pub use game_state::game::{Game, GameStatus};
pub use game_state::position_record::{PlacedPiece, PositionRecord};
pub use move_generation::move_expansion::BlockedMoves;
pub use moves::chess_move::{Move, MoveSpec};
pub use search::minimax::{MinimaxSearch, NodeCounts, SearchOutcome};
pub use search::search_config::SearchConfig;
