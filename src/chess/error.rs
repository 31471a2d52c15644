//! Error types for parsing and validating chess data
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::error::Error;
use std::fmt;

/// Defines a unit error type with a fixed description
macro_rules! parse_error {
    ($(#[$doc:meta])+ $name:ident, $text:expr) => {
        $(#[$doc])+
        #[derive(Debug, Copy, Clone, PartialEq, Eq)]
        pub struct $name;

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str($text)
            }
        }

        impl Error for $name { }
    };
}

parse_error! {
    /// Returned when a string does not name a side to move
    ParseColorError, "expected `w` or `b`"
}

parse_error! {
    /// Returned when a character is not one of the twelve piece letters
    ParsePieceError, "not a piece letter"
}

parse_error! {
    /// Returned when a character is not a file letter `a` through `h`
    ParseFileError, "not a file letter"
}

parse_error! {
    /// Returned when a character is not a rank digit `1` through `8`
    ParseRankError, "not a rank digit"
}

parse_error! {
    /// Returned when a string is not the coordinate name of a square
    ParseSquareError, "not the name of a square"
}

parse_error! {
    /// Returned when a string is not a castling availability field
    ParseCastlingRightsError, "not a castling availability field"
}

parse_error! {
    /// Returned when an integer has no counterpart in the target type
    TryFromIntError, "integer is out of range for the target type"
}

impl From<ParseFileError> for ParseSquareError {
    fn from(_: ParseFileError) -> Self {
        ParseSquareError
    }
}

impl From<ParseRankError> for ParseSquareError {
    fn from(_: ParseRankError) -> Self {
        ParseSquareError
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An error in parsing a move string
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    /// The string is not a move in coordinate notation
    ParseError,
    /// Move is not legal in the position it was given for
    IllegalMove,
}

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMoveError::ParseError => "not a move in coordinate notation",
            ParseMoveError::IllegalMove => "move is not legal here",
        }.fmt(f)
    }
}

impl Error for ParseMoveError { }

impl From<ParseSquareError> for ParseMoveError {
    fn from(_: ParseSquareError) -> Self {
        ParseMoveError::ParseError
    }
}

impl From<ParsePieceError> for ParseMoveError {
    fn from(_: ParsePieceError) -> Self {
        ParseMoveError::ParseError
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An error that can be returned when parsing a position from a FEN string
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseFenError {
    /// FEN string is empty or has the wrong number of fields
    Fields,
    /// Cannot make sense of the piece placement field
    ParseBoard,
    /// Cannot make sense of the side-to-move field
    ParseTurn,
    /// Cannot make sense of the castling field
    ParseCastling,
    /// Cannot make sense of the en-passant field
    ParseEnPassant,
    /// Cannot make sense of the half-move clock
    ParseHalfMoveClock,
    /// Cannot make sense of the move number
    ParseMoveNumber,
    /// Missing king or multiple kings of the same color
    KingCount,
    /// Pawn on first or last rank
    InvalidPawnRank,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParseFenError::Fields => "wrong number of fields in fen string",
            ParseFenError::ParseBoard => "bad piece placement field",
            ParseFenError::ParseTurn => "bad side-to-move field",
            ParseFenError::ParseCastling => "bad castling field",
            ParseFenError::ParseEnPassant => "bad en-passant field",
            ParseFenError::ParseHalfMoveClock => "bad half-move clock",
            ParseFenError::ParseMoveNumber => "bad move number",
            ParseFenError::KingCount => "each side needs exactly one king",
            ParseFenError::InvalidPawnRank => "pawns cannot stand on the first or eighth rank",
        };

        s.fmt(f)
    }
}

impl Error for ParseFenError { }

impl From<ParsePieceError> for ParseFenError {
    fn from(_: ParsePieceError) -> Self {
        ParseFenError::ParseBoard
    }
}

impl From<ParseColorError> for ParseFenError {
    fn from(_: ParseColorError) -> Self {
        ParseFenError::ParseTurn
    }
}

impl From<ParseCastlingRightsError> for ParseFenError {
    fn from(_: ParseCastlingRightsError) -> Self {
        ParseFenError::ParseCastling
    }
}

impl From<ParseSquareError> for ParseFenError {
    fn from(_: ParseSquareError) -> Self {
        ParseFenError::ParseEnPassant
    }
}
