//! The Transposition Table
//
//  Copyright 2021 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::mem::size_of;
use crate::chess::{Move, Zobrist};
use super::Score;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Indicates the kind of bound a transposition table score carries.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Bound {
    /// The score is at least as high as stored; a beta cutoff happened here
    Lower,
    /// The score is exact
    Exact,
    /// The score is no higher than stored; no move raised alpha here
    Upper,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An entry in the transposition table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HashEntry {
    zobrist: Zobrist,
    best_move: Move,
    score: Score,
    depth: u32,
    bound: Bound,
}

impl HashEntry {
    /// Creates a new entry; `best_move` may be `Move::NONE` for fail-low entries
    pub fn new(zobrist: Zobrist, best_move: Move, score: Score, depth: u32, bound: Bound)
    -> HashEntry {
        HashEntry { zobrist, best_move, score, depth, bound }
    }

    /// The key of the position the entry belongs to
    pub fn zobrist(&self) -> Zobrist {
        self.zobrist
    }

    /// The best move found, or `Move::NONE` if no move raised alpha
    pub fn best_move(&self) -> Move {
        self.best_move
    }

    /// The stored score, mate-adjusted relative to the probing node by `get`
    pub fn score(&self) -> Score {
        self.score
    }

    /// The depth the position was searched to
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// What kind of bound the score is
    pub fn bound(&self) -> Bound {
        self.bound
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A fixed-size transposition table addressed by key modulo capacity.
///
/// Writes always replace whatever occupies the slot. Index collisions between different keys
/// are detected on read by comparing the stored key, and read as "no entry".
///
/// Mate scores are stored relative to the entry's own node and converted back to
/// root-relative on retrieval, so a mate found through one path keeps the right distance when
/// reached through another.
#[derive(Debug)]
pub struct HashTable(Vec<Option<HashEntry>>);

impl HashTable {
    /// Creates a table occupying approximately `size` bytes
    pub fn new(size: usize) -> HashTable {
        let entries = std::cmp::max(1, size / size_of::<Option<HashEntry>>());

        HashTable(vec![None; entries])
    }

    fn index(&self, zobrist: Zobrist) -> usize {
        u64::from(zobrist) as usize % self.0.len()
    }

    /// Returns the entry for `zobrist`, if one is stored, with mate scores adjusted to be
    /// relative to a probing node `cur_ply` from the root
    pub fn get(&self, zobrist: Zobrist, cur_ply: usize) -> Option<HashEntry> {
        match self.0[self.index(zobrist)] {
            Some(mut entry) if entry.zobrist == zobrist => {
                if entry.score.is_mate() {
                    if entry.score > Score::draw() {
                        entry.score = entry.score - cur_ply as i32;
                    } else {
                        entry.score = entry.score + cur_ply as i32;
                    }
                }

                Some(entry)
            },
            _ => None,
        }
    }

    /// Stores `entry`, whose node is `cur_ply` from the root, replacing any previous occupant
    /// of the slot
    pub fn insert(&mut self, mut entry: HashEntry, cur_ply: usize) {
        if entry.score.is_mate() {
            if entry.score > Score::draw() {
                entry.score = entry.score + cur_ply as i32;
            } else {
                entry.score = entry.score - cur_ply as i32;
            }
        }

        let index = self.index(entry.zobrist);
        self.0[index] = Some(entry);
    }

    /// Empties the table; used between games
    pub fn clear(&mut self) {
        let len = self.0.len();
        self.0.clear();
        self.0.resize(len, None);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::chess::{Position, Square};

    #[test]
    fn stored_entries_come_back_for_the_same_key() {
        let mut table = HashTable::new(0x10_0000);
        let pos = Position::new();
        let mv = Move::new(Square::E2, Square::E4, None, None);

        let entry = HashEntry::new(pos.zobrist_key(), mv, Score::from(25), 6, Bound::Exact);
        table.insert(entry, 0);

        let found = table.get(pos.zobrist_key(), 0).unwrap();
        assert_eq!(found.best_move(), mv);
        assert_eq!(found.score(), Score::from(25));
        assert_eq!(found.depth(), 6);
        assert_eq!(found.bound(), Bound::Exact);
    }

    #[test]
    fn a_different_key_reads_as_no_entry() {
        let mut table = HashTable::new(0x1000);
        let mut pos = Position::new();
        let key = pos.zobrist_key();

        table.insert(HashEntry::new(key, Move::NONE, Score::draw(), 1, Bound::Upper), 0);

        let mv = pos.parse_coord_move("e2e4").unwrap();
        pos.make_move(mv);
        // whatever slot this key maps to, the stored key cannot match it
        assert!(table.get(pos.zobrist_key(), 1).is_none());
    }

    #[test]
    fn mate_scores_keep_their_distance_across_plies() {
        let mut table = HashTable::new(0x1000);
        let pos = Position::new();

        // a mate three plies below a node five plies from the root
        let score = Score::mates_in(8);
        table.insert(HashEntry::new(pos.zobrist_key(), Move::NONE, score, 4, Bound::Exact), 5);

        // probing from a node two plies from the root sees mate in five
        let found = table.get(pos.zobrist_key(), 2).unwrap();
        assert_eq!(found.score(), Score::mates_in(5));

        // mated scores adjust the other way
        let score = Score::mated_in(8);
        table.insert(HashEntry::new(pos.zobrist_key(), Move::NONE, score, 4, Bound::Exact), 5);
        let found = table.get(pos.zobrist_key(), 2).unwrap();
        assert_eq!(found.score(), Score::mated_in(5));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut table = HashTable::new(0x1000);
        let pos = Position::new();

        table.insert(
            HashEntry::new(pos.zobrist_key(), Move::NONE, Score::draw(), 1, Bound::Exact), 0);
        assert!(table.get(pos.zobrist_key(), 0).is_some());

        table.clear();
        assert!(table.get(pos.zobrist_key(), 0).is_none());
    }
}
