//! Contains the structure and key table for Zobrist hashing
//
//  Copyright 2021 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use lazy_static::lazy_static;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use super::{Color, Piece, Square, CastlingRights};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A 64-bit hash key generated from a position
///
/// The key is maintained incrementally: every toggle helper is its own inverse, so making and
/// unmaking a move use the identical operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Zobrist(u64);

impl Zobrist {
    /// Creates a new zobrist key
    pub fn new() -> Zobrist {
        Zobrist(0)
    }

    /// Toggles piece placement
    pub fn toggle_piece_placement(&mut self, c: Color, p: Piece, sq: Square) {
        self.0 ^= KEYS.piece_placement[c as usize][p as usize][sq as usize];
    }

    /// Toggles whose turn it is; the key material belongs to the white side
    pub fn toggle_turn(&mut self) {
        self.0 ^= KEYS.white_to_move;
    }

    /// Toggles a set of castling rights
    pub fn toggle_castling_rights(&mut self, rights: CastlingRights) {
        self.0 ^= KEYS.castling[rights.index()];
    }

    /// Toggles an en passant target square
    pub fn toggle_ep_square(&mut self, sq: Square) {
        self.0 ^= KEYS.en_passant[sq as usize];
    }
}

impl fmt::Display for Zobrist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::UpperHex for Zobrist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::LowerHex for Zobrist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Zobrist> for u64 {
    /// Allows using the key to get a hash table index
    fn from(key: Zobrist) -> Self {
        key.0
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
struct Keys {
    piece_placement: [[[u64; Square::COUNT]; Piece::COUNT]; Color::COUNT],
    white_to_move: u64,
    castling: [u64; CastlingRights::COUNT],
    en_passant: [u64; Square::COUNT],
}

lazy_static! {
    /// Process-lifetime key table, generated once from a fixed seed
    static ref KEYS: Keys = {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        let mut piece_placement = [[[0; Square::COUNT]; Piece::COUNT]; Color::COUNT];
        for color in piece_placement.iter_mut() {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let white_to_move = rng.gen();

        let mut castling = [0; CastlingRights::COUNT];
        for key in castling.iter_mut() {
            *key = rng.gen();
        }

        let mut en_passant = [0; Square::COUNT];
        for key in en_passant.iter_mut() {
            *key = rng.gen();
        }

        Keys { piece_placement, white_to_move, castling, en_passant }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_toggle_is_its_own_inverse() {
        let mut key = Zobrist::new();

        key.toggle_piece_placement(Color::White, Piece::Knight, Square::G1);
        key.toggle_turn();
        key.toggle_castling_rights(CastlingRights::ALL);
        key.toggle_ep_square(Square::E3);
        assert_ne!(key, Zobrist::new());

        key.toggle_ep_square(Square::E3);
        key.toggle_castling_rights(CastlingRights::ALL);
        key.toggle_turn();
        key.toggle_piece_placement(Color::White, Piece::Knight, Square::G1);
        assert_eq!(key, Zobrist::new());
    }

    #[test]
    fn distinct_state_gives_distinct_keys() {
        let mut a = Zobrist::new();
        let mut b = Zobrist::new();

        a.toggle_piece_placement(Color::White, Piece::Pawn, Square::E4);
        b.toggle_piece_placement(Color::Black, Piece::Pawn, Square::E4);
        assert_ne!(a, b);

        let mut c = Zobrist::new();
        c.toggle_ep_square(Square::E4);
        assert_ne!(a, c);
    }

    #[test]
    fn keys_are_stable_within_a_process() {
        let mut a = Zobrist::new();
        let mut b = Zobrist::new();
        a.toggle_piece_placement(Color::White, Piece::King, Square::E1);
        b.toggle_piece_placement(Color::White, Piece::King, Square::E1);
        assert_eq!(a, b);
    }
}
