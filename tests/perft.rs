//! Validates move generation, make and unmake against known variation counts.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use scarecrow::chess::{variations, Position, STARTING_FEN};

fn perft(fen: &str, depth: usize) -> u64 {
    let mut pos: Position = fen.parse().expect(fen);
    variations::count(&mut pos, depth)
}

#[test]
fn starting_position() {
    assert_eq!(perft(STARTING_FEN, 1), 20);
    assert_eq!(perft(STARTING_FEN, 2), 400);
    assert_eq!(perft(STARTING_FEN, 3), 8_902);
    assert_eq!(perft(STARTING_FEN, 4), 197_281);
}

#[test]
fn starting_position_deep() {
    assert_eq!(perft(STARTING_FEN, 5), 4_865_609);
}

#[test]
fn castling_and_pin_heavy_middlegame() {
    // "kiwipete"; exercises castling, pins, en passant and promotions together
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    assert_eq!(perft(fen, 1), 48);
    assert_eq!(perft(fen, 2), 2_039);
    assert_eq!(perft(fen, 3), 97_862);
}

#[test]
fn en_passant_discovered_check() {
    // the en-passant capture here would expose the king along the fifth rank
    let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    assert_eq!(perft(fen, 1), 14);
    assert_eq!(perft(fen, 2), 191);
    assert_eq!(perft(fen, 3), 2_812);
}

#[test]
fn promotion_tactics() {
    let fen = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    assert_eq!(perft(fen, 1), 6);
    assert_eq!(perft(fen, 2), 264);
    assert_eq!(perft(fen, 3), 9_467);
}
