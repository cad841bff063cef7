//! Fixed-offset target tables for knights and kings.

use crate::game_state::chess_types::Square;

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub const KNIGHT_STEPS: [u64; 64] = generate_step_table(&KNIGHT_OFFSETS);
pub const KING_STEPS: [u64; 64] = generate_step_table(&KING_OFFSETS);

#[inline]
pub const fn knight_steps(square: Square) -> u64 {
    KNIGHT_STEPS[square as usize]
}

#[inline]
pub const fn king_steps(square: Square) -> u64 {
    KING_STEPS[square as usize]
}

const fn generate_step_table(offsets: &[(i32, i32); 8]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut targets = 0u64;
        let mut i = 0usize;

        while i < offsets.len() {
            let (df, dr) = offsets[i];
            let (f, r) = (file + df, rank + dr);
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                targets |= 1u64 << ((r * 8 + f) as u32);
            }
            i += 1;
        }

        table[sq] = targets;
        sq += 1;
    }

    table
}
