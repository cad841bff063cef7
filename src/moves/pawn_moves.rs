//! Per-color pawn push and capture tables.
//!
//! Pushes are split into the single step and the double step (only populated
//! on the pawn's home rank) so the generator can require both squares empty.

use crate::game_state::chess_types::{Color, Square};

pub const PAWN_PUSHES: [[u64; 64]; 2] = [generate_pushes(1), generate_pushes(-1)];
pub const PAWN_DOUBLE_PUSHES: [[u64; 64]; 2] =
    [generate_double_pushes(1, 1), generate_double_pushes(-1, 6)];
pub const PAWN_CAPTURES: [[u64; 64]; 2] = [generate_captures(1), generate_captures(-1)];

#[inline]
pub const fn pawn_push(color: Color, square: Square) -> u64 {
    PAWN_PUSHES[color.index()][square as usize]
}

#[inline]
pub const fn pawn_double_push(color: Color, square: Square) -> u64 {
    PAWN_DOUBLE_PUSHES[color.index()][square as usize]
}

/// Diagonal squares a pawn attacks, independent of what stands there.
#[inline]
pub const fn pawn_captures(color: Color, square: Square) -> u64 {
    PAWN_CAPTURES[color.index()][square as usize]
}

const fn generate_pushes(rank_step: i32) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let rank = (sq / 8) as i32 + rank_step;
        if rank >= 0 && rank < 8 {
            table[sq] = 1u64 << ((rank * 8 + (sq % 8) as i32) as u32);
        }
        sq += 1;
    }

    table
}

const fn generate_double_pushes(rank_step: i32, home_rank: i32) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        if (sq / 8) as i32 == home_rank {
            let rank = home_rank + 2 * rank_step;
            table[sq] = 1u64 << ((rank * 8 + (sq % 8) as i32) as u32);
        }
        sq += 1;
    }

    table
}

const fn generate_captures(rank_step: i32) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32 + rank_step;
        let mut targets = 0u64;

        if rank >= 0 && rank < 8 {
            if file > 0 {
                targets |= 1u64 << ((rank * 8 + file - 1) as u32);
            }
            if file < 7 {
                targets |= 1u64 << ((rank * 8 + file + 1) as u32);
            }
        }

        table[sq] = targets;
        sq += 1;
    }

    table
}
