//! Checks that the evaluator treats the two sides identically by mirroring positions.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use scarecrow::chess::Position;
use scarecrow::engine::evaluate;

/// Flips a FEN vertically: ranks are reversed, the pieces change color, the side to move,
/// castling rights and en-passant square follow along. The resulting position is the same game
/// with the colors exchanged.
fn mirror(fen: &str) -> String {
    let fields: Vec<&str> = fen.split_whitespace().collect();

    let board = fields[0].split('/')
        .rev()
        .map(swap_case)
        .collect::<Vec<_>>()
        .join("/");

    let turn = match fields[1] {
        "w" => "b",
        _ => "w",
    };

    let castling = if fields[2] == "-" {
        "-".to_string()
    } else {
        let swapped = swap_case(fields[2]);
        // restore the conventional KQkq order after the case swap
        "KQkq".chars().filter(|c| swapped.contains(*c)).collect()
    };

    let en_passant = if fields[3] == "-" {
        "-".to_string()
    } else {
        let mut chars = fields[3].chars();
        let file = chars.next().expect("ep file");
        let rank = chars.next().expect("ep rank").to_digit(10).expect("ep rank digit");
        format!("{}{}", file, 9 - rank)
    };

    let halfmove = fields.get(4).copied().unwrap_or("0");
    let fullmove = fields.get(5).copied().unwrap_or("1");

    format!("{} {} {} {} {} {}", board, turn, castling, en_passant, halfmove, fullmove)
}

fn swap_case(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else if c.is_ascii_lowercase() {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

const SUITE: [&str; 12] = [
    // openings and middlegames
    "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
    "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "2rr3k/pp3pp1/1nnqbN1p/3pN3/2pP4/2P3Q1/PPB4P/R4RK1 w - - 0 1",
    "r1bq1rk1/pp2ppbp/2np1np1/8/2PNP3/2N1B3/PP2BPPP/R2QK2R w KQ - 0 9",
    // castled kings with and without their pawn shields
    "r4rk1/ppp2ppp/8/8/8/8/PPP2PPP/R4RK1 w - - 0 1",
    "r4rk1/ppp3pp/5p2/8/8/8/PP4PP/2KR3R b - - 0 1",
    // pawn structure studies
    "4k3/pp4pp/2p5/8/8/2P1P3/PP4PP/4K3 w - - 0 1",
    "4k3/p1p2p1p/8/3pp3/3PP3/8/P1P2P1P/4K3 b - - 0 1",
    "4k3/2p5/8/1p1p4/1P1P4/8/2P5/4K3 w - - 0 1",
    // endgames
    "8/5pk1/6p1/8/6P1/5PK1/8/8 w - - 0 1",
    "4k3/8/3nn3/8/8/3NN3/8/4K3 b - - 0 1",
];

#[test]
fn mirrored_positions_evaluate_identically() {
    for fen in SUITE.iter() {
        let pos: Position = fen.parse().expect(fen);
        let mirrored: Position = mirror(fen).parse().expect(fen);

        assert_eq!(
            evaluate(&pos), evaluate(&mirrored),
            "{} vs {}", fen, mirror(fen)
        );
    }
}

#[test]
fn passing_the_move_negates_the_score() {
    // identical board, opposite side to move; the sign must flip exactly
    for fen in SUITE.iter() {
        let other = if fen.contains(" w ") {
            fen.replace(" w ", " b ")
        } else {
            fen.replace(" b ", " w ")
        };

        let pos: Position = fen.parse().expect(fen);
        let other: Position = other.parse().expect(fen);
        assert_eq!(evaluate(&pos), -evaluate(&other), "{}", fen);
    }
}

#[test]
fn the_mirror_helper_is_an_involution() {
    for fen in SUITE.iter() {
        assert_eq!(&mirror(&mirror(fen)), fen, "{}", fen);
    }
}
