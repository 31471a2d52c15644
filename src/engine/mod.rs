//! The engine: iterative-deepening alpha-beta search
//
//  Copyright 2021 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::time::{Duration, Instant};
use log::debug;
use crate::chess::{Move, Piece, Position, MAX_PLY, PV_MOVE_SCORE};
use crate::protocol::io::{self, InputStream, Interrupt};

mod eval;
pub use eval::{evaluate, Score};
pub mod hash;
use hash::{Bound, HashEntry, HashTable};

/// How many nodes are searched between checks of the clock and the input stream
const POLL_INTERVAL_MASK: u64 = 8191;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A single search of one position.
///
/// The search owns nothing but its counters; the position (with its killer and history tables)
/// and the transposition table are borrowed from the caller, and the input stream is polled
/// for interrupts between batches of nodes.
#[derive(Debug)]
pub struct Search<'a> {
    pos: &'a mut Position,
    table: &'a mut HashTable,
    input: &'a InputStream,

    start_time: Instant,
    budget: Option<Duration>,
    max_depth: u32,

    nodes: u64,
    stopped: bool,
    quit: bool,
    fail_high: f64,
    fail_high_first: f64,
}

impl<'a> Search<'a> {
    /// Prepares a search of `pos` to at most `max_depth` plies, giving up once `budget`
    /// elapses if one is set
    pub fn new(pos: &'a mut Position, table: &'a mut HashTable, input: &'a InputStream,
        max_depth: u32, budget: Option<Duration>) -> Self {

        Search {
            pos,
            table,
            input,
            start_time: Instant::now(),
            budget,
            max_depth: std::cmp::min(max_depth, MAX_PLY as u32),
            nodes: 0,
            stopped: false,
            quit: false,
            fail_high: 0.0,
            fail_high_first: 0.0,
        }
    }

    /// Returns `true` if a `quit` command arrived while searching
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Runs the search, emitting one UCI `info` line per completed iteration.
    ///
    /// Returns the best move of the last fully completed iteration, along with the reply the
    /// engine expects, if the principal variation is at least two moves deep.
    pub fn run(&mut self) -> (Option<Move>, Option<Move>) {
        self.pos.clear_search_tables();

        let mut best_move = None;
        let mut ponder_move = None;

        for depth in 1..=self.max_depth {
            let score = self.alpha_beta(-Score::infinity(), Score::infinity(), depth, true);

            if self.stopped {
                break;
            }

            let pv = self.principal_variation(depth);
            if let Some(&first) = pv.first() {
                best_move = Some(first);
                ponder_move = pv.get(1).copied();
            }

            let mut info = format!("info score cp {} depth {} nodes {} time {} pv",
                score, depth, self.nodes, self.start_time.elapsed().as_millis());
            for mv in &pv {
                info += &format!(" {}", mv);
            }
            io::respond(&info);

            if self.fail_high > 0.0 {
                debug!("depth {}: ordering {:.1}%",
                    depth, 100.0 * self.fail_high_first / self.fail_high);
            }
        }

        // if not even the first iteration finished, fall back to any legal move
        if best_move.is_none() {
            let list = self.pos.moves();
            for mv in list.iter() {
                if self.pos.make_move(mv) {
                    self.pos.undo_move();
                    best_move = Some(mv);
                    break;
                }
            }
        }

        (best_move, ponder_move)
    }

    /// Checks the clock and the input stream, either of which can stop the search
    fn check_up(&mut self) {
        if let Some(budget) = self.budget {
            if self.start_time.elapsed() >= budget {
                self.stopped = true;
            }
        }

        match self.input.interrupt() {
            Some(Interrupt::Quit) => {
                self.stopped = true;
                self.quit = true;
            },
            Some(Interrupt::Stop) => self.stopped = true,
            None => { },
        }
    }

    /// The alpha-beta search itself
    fn alpha_beta(&mut self, mut alpha: Score, beta: Score, mut depth: u32, allow_null: bool)
    -> Score {
        if depth == 0 {
            return self.quiescence(alpha, beta);
        }

        if self.nodes & POLL_INTERVAL_MASK == 0 {
            self.check_up();
        }
        self.nodes += 1;

        let root = self.pos.ply() == 0;

        if !root && (self.pos.is_repetition() || self.pos.fifty_moves()) {
            return Score::draw();
        }

        if self.pos.ply() >= MAX_PLY - 1 {
            return evaluate(self.pos);
        }

        let in_check = self.pos.in_check();
        if in_check {
            depth += 1;
        }

        let mut pv_move = Move::NONE;
        if let Some(entry) = self.table.get(self.pos.zobrist_key(), self.pos.ply()) {
            pv_move = entry.best_move();

            if entry.depth() >= depth {
                match entry.bound() {
                    Bound::Exact => return entry.score(),
                    Bound::Lower => if entry.score() >= beta { return beta; },
                    Bound::Upper => if entry.score() <= alpha { return alpha; },
                }
            }
        }

        // null move: if passing still fails high, an actual move surely would; skipped without
        // a major piece, where zugzwang is a real possibility
        let majors = self.pos.occupied_by_piece(self.pos.turn(), Piece::Rook)
            | self.pos.occupied_by_piece(self.pos.turn(), Piece::Queen);
        if allow_null && !in_check && depth >= 4 && !root && !majors.is_empty() {
            self.pos.make_null_move();
            let score = -self.alpha_beta(-beta, -beta + 1, depth - 4, false);
            self.pos.undo_null_move();

            if self.stopped {
                return Score::draw();
            }
            if score >= beta && !score.is_mate() {
                return beta;
            }
        }

        let mut list = self.pos.moves();
        if pv_move != Move::NONE {
            list.boost(pv_move, PV_MOVE_SCORE);
        }
        list.sort();

        let old_alpha = alpha;
        let mut best_move = Move::NONE;
        let mut legal = 0;

        for mv in list.iter() {
            if !self.pos.make_move(mv) {
                continue;
            }
            legal += 1;

            let score = -self.alpha_beta(-beta, -alpha, depth - 1, true);
            self.pos.undo_move();

            if self.stopped {
                return Score::draw();
            }

            if score > alpha {
                if score >= beta {
                    if legal == 1 {
                        self.fail_high_first += 1.0;
                    }
                    self.fail_high += 1.0;

                    if !mv.is_capture() {
                        self.pos.store_killer(mv);
                    }

                    self.table.insert(
                        HashEntry::new(self.pos.zobrist_key(), mv, beta, depth, Bound::Lower),
                        self.pos.ply());

                    return beta;
                }

                alpha = score;
                best_move = mv;

                if !mv.is_capture() {
                    self.pos.reward_quiet(mv, depth);
                }
            }
        }

        if legal == 0 {
            return if in_check {
                Score::mated_in(self.pos.ply())
            } else {
                Score::draw()
            };
        }

        if alpha != old_alpha {
            self.table.insert(
                HashEntry::new(self.pos.zobrist_key(), best_move, alpha, depth, Bound::Exact),
                self.pos.ply());
        } else {
            self.table.insert(
                HashEntry::new(self.pos.zobrist_key(), Move::NONE, alpha, depth, Bound::Upper),
                self.pos.ply());
        }

        alpha
    }

    /// Stand-pat search over captures only, to push tactical exchanges past the horizon
    fn quiescence(&mut self, mut alpha: Score, beta: Score) -> Score {
        if self.nodes & POLL_INTERVAL_MASK == 0 {
            self.check_up();
        }
        self.nodes += 1;

        if self.pos.ply() != 0 && (self.pos.is_repetition() || self.pos.fifty_moves()) {
            return Score::draw();
        }

        if self.pos.ply() >= MAX_PLY - 1 {
            return evaluate(self.pos);
        }

        let stand_pat = evaluate(self.pos);
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut list = self.pos.captures();
        list.sort();

        let mut legal = 0;

        for mv in list.iter() {
            if !self.pos.make_move(mv) {
                continue;
            }
            legal += 1;

            let score = -self.quiescence(-beta, -alpha);
            self.pos.undo_move();

            if self.stopped {
                return Score::draw();
            }

            if score > alpha {
                if score >= beta {
                    if legal == 1 {
                        self.fail_high_first += 1.0;
                    }
                    self.fail_high += 1.0;

                    return beta;
                }

                alpha = score;
            }
        }

        alpha
    }

    /// Walks the transposition table from the root to recover the principal variation,
    /// verifying each probed move against the generator before trusting it
    fn principal_variation(&mut self, depth: u32) -> Vec<Move> {
        let mut pv = Vec::new();

        while (pv.len() as u32) < depth {
            let mv = match self.table.get(self.pos.zobrist_key(), self.pos.ply()) {
                Some(entry) => entry.best_move(),
                None => break,
            };

            if mv == Move::NONE || !self.pos.move_exists(mv) {
                break;
            }

            self.pos.make_move(mv);
            pv.push(mv);
        }

        for _ in 0..pv.len() {
            self.pos.undo_move();
        }

        pv
    }
}
