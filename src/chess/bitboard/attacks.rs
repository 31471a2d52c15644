//! Provides data and functions used to compute attacks
//
//  Copyright 2021 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use lazy_static::lazy_static;
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// One of the eight directions a sliding piece can move in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

impl Direction {
    /// The number of directions
    pub const COUNT: usize = 8;

    /// The four directions a rook slides in
    pub const ORTHOGONALS: [Direction; 4] = [
        Direction::North, Direction::South, Direction::East, Direction::West,
    ];

    /// The four directions a bishop slides in
    pub const DIAGONALS: [Direction; 4] = [
        Direction::NorthEast, Direction::NorthWest, Direction::SouthEast, Direction::SouthWest,
    ];

    /// The file and rank deltas of one step in this direction
    fn offset(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
        }
    }

    /// The bit distance of one step in this direction; positive means a left shift
    fn step(self) -> i8 {
        let (x, y) = self.offset();
        (y << 3) + x
    }
}

lazy_static! {
    /// King steps from each square, clipped at the board edges
    static ref KING_ATTACKS: [Bitboard; Square::COUNT] = {
        let mut table = [Bitboard::new(); Square::COUNT];

        for (sq, entry) in table.iter_mut().enumerate() {
            let origin = Bitboard::from(1u64 << sq);
            for &(x, y) in &[(1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1), (0, -1), (1, -1)] {
                *entry |= origin.shift_xy(x, y);
            }
        }

        table
    };

    /// Knight jumps from each square, clipped at the board edges
    static ref KNIGHT_ATTACKS: [Bitboard; Square::COUNT] = {
        let mut table = [Bitboard::new(); Square::COUNT];

        for (sq, entry) in table.iter_mut().enumerate() {
            let origin = Bitboard::from(1u64 << sq);
            for &(x, y) in &[(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)] {
                *entry |= origin.shift_xy(x, y);
            }
        }

        table
    };

    /// For each direction and square, every square from the origin to the board edge along
    /// that direction, exclusive of the origin
    static ref RAY_MASKS: [[Bitboard; Square::COUNT]; Direction::COUNT] = {
        let mut table = [[Bitboard::new(); Square::COUNT]; Direction::COUNT];

        for dir in 0..Direction::COUNT {
            let (x, y) = DIRECTIONS[dir].offset();
            for sq in 0..Square::COUNT {
                let mut step = Bitboard::from(1u64 << sq).shift_xy(x, y);
                while !step.is_empty() {
                    table[dir][sq] |= step;
                    step = step.shift_xy(x, y);
                }
            }
        }

        table
    };
}

const DIRECTIONS: [Direction; Direction::COUNT] = [
    Direction::North, Direction::NorthEast, Direction::East, Direction::SouthEast,
    Direction::South, Direction::SouthWest, Direction::West, Direction::NorthWest,
];

/// Computes king-like attacks to or from `sq`
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq as usize]
}

/// Computes knight-like attacks to or from `sq`
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq as usize]
}

/// Computes sliding attacks from `sq` along `dir` based on the occupied squares given by `occ`
///
/// The result contains every empty square along the ray up to, and including, the nearest
/// occupied square. The blockers within the ray are smeared toward the far edge of the board
/// with a handful of shifts, which marks every square strictly beyond the nearest blocker;
/// removing those from the ray leaves the reachable set.
pub fn ray_attacks(sq: Square, dir: Direction, occ: Bitboard) -> Bitboard {
    let ray = RAY_MASKS[dir as usize][sq as usize];
    let blockers = u64::from(ray & occ);

    let step = dir.step();
    let beyond = if step > 0 {
        let s = step as u32;
        (blockers << s) | (blockers << (2 * s)) | (blockers << (3 * s))
            | (blockers << (4 * s)) | (blockers << (5 * s)) | (blockers << (6 * s))
    } else {
        let s = (-step) as u32;
        (blockers >> s) | (blockers >> (2 * s)) | (blockers >> (3 * s))
            | (blockers >> (4 * s)) | (blockers >> (5 * s)) | (blockers >> (6 * s))
    };

    (Bitboard::from(beyond) & ray) ^ ray
}

/// Computes rook-like attacks to or from `sq` based on the occupied squares given by `occ`
///
/// ```rust
/// use scarecrow::chess::Square;
/// use scarecrow::chess::bitboard::{Bitboard, rook_attacks};
///
/// let occ = Bitboard::from(Square::A3) | Square::C1.into();
/// let mut attacks = rook_attacks(Square::A1, occ);
/// assert_eq!(attacks.pop(), Some(Square::B1));
/// assert_eq!(attacks.pop(), Some(Square::C1));
/// assert_eq!(attacks.pop(), Some(Square::A2));
/// assert_eq!(attacks.pop(), Some(Square::A3));
/// assert_eq!(attacks.pop(), None);
/// ```
pub fn rook_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    Direction::ORTHOGONALS.iter()
        .fold(Bitboard::new(), |att, &dir| att | ray_attacks(sq, dir, occ))
}

/// Computes bishop-like attacks to or from `sq` based on the occupied squares given by `occ`
pub fn bishop_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    Direction::DIAGONALS.iter()
        .fold(Bitboard::new(), |att, &dir| att | ray_attacks(sq, dir, occ))
}

/// Computes queen-like attacks to or from `sq` based on the occupied squares given by `occ`
#[inline]
pub fn queen_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    rook_attacks(sq, occ) | bishop_attacks(sq, occ)
}
