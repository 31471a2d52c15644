//! Implements the engine's side of the Universal Chess Interface.
//
//  Copyright 2021 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::time::Duration;
use log::{debug, info, warn};
use crate::chess::{Color, Position, MAX_PLY};
use crate::engine::Search;
use crate::engine::hash::HashTable;
use super::io::{self, InputStream};

/// Transposition table size, allocated once when the interface starts
const HASH_TABLE_SIZE: usize = 0x1000_0000; // 256 MB

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The UCI command loop.
///
/// Malformed input never brings the loop down: a command that cannot be parsed is logged and
/// ignored, and the engine waits for the next line.
#[derive(Debug)]
pub struct Uci {
    input: InputStream,
    pos: Position,
    table: HashTable,
}

impl Uci {
    /// Creates the interface, opening the input stream and allocating the transposition table
    pub fn new() -> Uci {
        Uci {
            input: InputStream::open(),
            pos: Position::new(),
            table: HashTable::new(HASH_TABLE_SIZE),
        }
    }

    /// Reads and dispatches commands until `quit` or end of input.
    pub fn run(&mut self) {
        while let Some(line) = self.input.next_command() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match line.split_whitespace().next() {
                Some("uci") => {
                    io::respond("id name Scarecrow");
                    io::respond("id author Mike Leany");
                    io::respond("uciok");
                },
                Some("isready") => io::respond("readyok"),
                Some("ucinewgame") => {
                    self.table.clear();
                    self.pos = Position::new();
                },
                Some("position") => self.position(line),
                Some("go") => {
                    if self.go(line) {
                        break;
                    }
                },
                Some("quit") => break,
                _ => warn!("unknown command: {}", line),
            }
        }
    }

    /// Handles the `position` command: `position {startpos | fen <fen>} [moves m1 m2 ...]`
    fn position(&mut self, line: &str) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let moves_at = tokens.iter().position(|&t| t == "moves");

        let parsed = match tokens.get(1) {
            Some(&"startpos") => Ok(Position::new()),
            Some(&"fen") => {
                let end = moves_at.unwrap_or_else(|| tokens.len());
                tokens[2..end].join(" ").parse()
            },
            _ => {
                warn!("cannot parse: {}", line);
                return;
            },
        };

        let mut pos: Position = match parsed {
            Ok(pos) => pos,
            Err(err) => {
                warn!("{}: {}", err, line);
                return;
            },
        };

        if let Some(at) = moves_at {
            for token in &tokens[at + 1..] {
                match pos.parse_coord_move(token) {
                    Ok(mv) => {
                        if !pos.make_move(mv) {
                            warn!("{}: illegal move, dropping the rest", token);
                            break;
                        }
                    },
                    Err(err) => {
                        warn!("{}: {}, dropping the rest", token, err);
                        break;
                    },
                }
            }
        }

        self.pos = pos;
        debug!("position set to {}", self.pos);
    }

    /// Handles the `go` command and runs the search. Returns `true` if `quit` arrived while
    /// searching.
    fn go(&mut self, line: &str) -> bool {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let value_after = |key: &str| -> Option<i64> {
            tokens.iter().position(|&t| t == key)
                .and_then(|at| tokens.get(at + 1))
                .and_then(|value| value.parse().ok())
        };

        let depth = value_after("depth");
        let movetime = value_after("movetime");
        let moves_to_go = value_after("movestogo").unwrap_or(30);
        let (time, inc) = match self.pos.turn() {
            Color::White => (value_after("wtime"), value_after("winc")),
            Color::Black => (value_after("btime"), value_after("binc")),
        };

        let budget = time_budget(movetime, time, inc.unwrap_or(0), moves_to_go);
        let max_depth = depth.map_or(MAX_PLY as u32, |d| d.max(1) as u32);
        info!("go: depth {} budget {:?}", max_depth, budget);

        let mut search = Search::new(&mut self.pos, &mut self.table, &self.input,
            max_depth, budget);
        let (best, ponder) = search.run();
        let quit = search.quit_requested();

        match (best, ponder) {
            (Some(best), Some(ponder)) => {
                io::respond(&format!("bestmove {} ponder {}", best, ponder));
            },
            (Some(best), None) => io::respond(&format!("bestmove {}", best)),
            // no legal moves; the protocol still requires a bestmove line
            (None, _) => io::respond("bestmove 0000"),
        }

        quit
    }
}

impl Default for Uci {
    fn default() -> Self {
        Uci::new()
    }
}

/// Derives the time to spend on one move.
///
/// An explicit `movetime` is used as given. Otherwise the remaining clock is spread over the
/// moves still to go, less a safety margin, plus the increment. With neither, the search is
/// bounded only by depth or interruption.
fn time_budget(movetime: Option<i64>, time: Option<i64>, inc: i64, moves_to_go: i64)
-> Option<Duration> {
    if let Some(movetime) = movetime {
        return Some(Duration::from_millis(movetime.max(1) as u64));
    }

    time.map(|time| {
        let millis = time / moves_to_go.max(1) - 50 + inc;
        Duration::from_millis(millis.max(1) as u64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movetime_is_used_directly() {
        assert_eq!(
            time_budget(Some(2_000), Some(60_000), 1_000, 30),
            Some(Duration::from_millis(2_000))
        );
    }

    #[test]
    fn clock_time_is_divided_among_remaining_moves() {
        // 60s over 30 moves, minus the 50ms margin, plus a 1s increment
        assert_eq!(
            time_budget(None, Some(60_000), 1_000, 30),
            Some(Duration::from_millis(2_950))
        );
    }

    #[test]
    fn no_clock_means_no_budget() {
        assert_eq!(time_budget(None, None, 0, 30), None);
    }

    #[test]
    fn tiny_clocks_never_go_nonpositive() {
        assert_eq!(
            time_budget(None, Some(30), 0, 30),
            Some(Duration::from_millis(1))
        );
    }
}
