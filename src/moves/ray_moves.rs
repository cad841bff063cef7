//! Directional ray tables for sliding pieces.
//!
//! `RAYS[direction][square]` holds every square strictly beyond `square`
//! towards the board edge. Blocker resolution is a single bit-scan: the
//! nearest occupied square along a positive ray is its lowest set bit, along a
//! negative ray its highest, and the squares past the blocker are exactly the
//! blocker's own ray in the same direction.

use crate::game_state::chess_types::{PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
            Direction::NorthEast => 4,
            Direction::NorthWest => 5,
            Direction::SouthEast => 6,
            Direction::SouthWest => 7,
        }
    }

    /// `(file_step, rank_step)`.
    #[inline]
    const fn steps(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
        }
    }

    /// Rays whose square indices grow away from the origin.
    #[inline]
    pub const fn is_positive(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::East | Direction::NorthEast | Direction::NorthWest
        )
    }
}

pub const RAYS: [[u64; 64]; 8] = generate_rays();

#[inline]
pub const fn ray(direction: Direction, square: Square) -> u64 {
    RAYS[direction.index()][square as usize]
}

/// Squares reachable along one ray, up to and including the nearest blocker.
/// Callers strip same-color blockers themselves.
#[inline]
pub fn ray_attacks(direction: Direction, square: Square, occupancy: u64) -> u64 {
    let full = ray(direction, square);
    let blockers = full & occupancy;
    if blockers == 0 {
        return full;
    }

    let nearest = if direction.is_positive() {
        blockers.trailing_zeros()
    } else {
        63 - blockers.leading_zeros()
    };
    full ^ RAYS[direction.index()][nearest as usize]
}

#[inline]
pub fn slider_directions(kind: PieceKind) -> &'static [Direction] {
    match kind {
        PieceKind::Rook => &Direction::ORTHOGONAL,
        PieceKind::Bishop => &Direction::DIAGONAL,
        PieceKind::Queen => &Direction::ALL,
        _ => &[],
    }
}

/// Occupancy-aware attack set of a rook, bishop or queen.
#[inline]
pub fn slider_attacks(kind: PieceKind, square: Square, occupancy: u64) -> u64 {
    slider_directions(kind)
        .iter()
        .fold(0u64, |acc, &dir| acc | ray_attacks(dir, square, occupancy))
}

/// Empty-board reach of a rook, bishop or queen.
#[inline]
pub fn slider_reach(kind: PieceKind, square: Square) -> u64 {
    slider_directions(kind)
        .iter()
        .fold(0u64, |acc, &dir| acc | ray(dir, square))
}

const fn generate_rays() -> [[u64; 64]; 8] {
    let mut table = [[0u64; 64]; 8];
    let mut d = 0usize;

    while d < 8 {
        let (file_step, rank_step) = Direction::ALL[d].steps();
        let mut sq = 0usize;
        while sq < 64 {
            table[d][sq] = trace_ray_const(sq as i32, file_step, rank_step);
            sq += 1;
        }
        d += 1;
    }

    table
}

const fn trace_ray_const(square: i32, file_step: i32, rank_step: i32) -> u64 {
    let mut file = (square % 8) + file_step;
    let mut rank = (square / 8) + rank_step;
    let mut squares = 0u64;

    while file >= 0 && file < 8 && rank >= 0 && rank < 8 {
        squares |= 1u64 << ((rank * 8 + file) as u32);
        file += file_step;
        rank += rank_step;
    }

    squares
}
