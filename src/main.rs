//! The scarecrow chess engine.
//
//  Copyright 2021 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]

use std::fs::File;
use std::io::BufReader;
use std::io::prelude::*;
use std::path::PathBuf;
use clap::{App, Arg, SubCommand, crate_version};
use simplelog::{WriteLogger, LevelFilter, Config};
use scarecrow::chess::{variations, Position};
use scarecrow::protocol::Uci;

fn main() -> Result<(), Error> {
    let matches =
        App::new("Scarecrow")
            .version(crate_version!())
            .author("Mike Leany")
            .about("A UCI chess engine")
            .arg(Arg::with_name("log")
                .long("log")
                .short("l")
                .global(true)
                .help("Turns on logging"))
            .arg(Arg::with_name("log-file")
                .long("log-file")
                .global(true)
                .value_name("LOG_FILE")
                .takes_value(true)
                .default_value("scarecrow.log")
                .help("Sets the log file if logging is turned on"))
            .arg(Arg::with_name("log-level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .takes_value(true)
                .default_value("info")
                .help("Sets the log level if logging is turned on"))
            .subcommand(SubCommand::with_name("counts")
                .about("Counts the number of variations from a given starting position \
                        to a specified\ndepth. Defaults to the standard starting position.")
                .arg(Arg::with_name("file")
                    .short("f")
                    .value_name("EPD_FILE")
                    .takes_value(true)
                    .conflicts_with("depth")
                    .conflicts_with("fen")
                    .help("An EPD file of positions to search"))
                .arg(Arg::with_name("depth")
                    .long("depth")
                    .short("d")
                    .value_name("DEPTH")
                    .takes_value(true)
                    .required_unless("file")
                    .help("Depth to search the position"))
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .default_value(scarecrow::chess::STARTING_FEN)
                    .hide_default_value(true)
                    .multiple(true)
                    .help("Position to search in Forsyth-Edwards Notation (FEN)")))
            .get_matches();

    let log_file = PathBuf::from(matches.value_of_os("log-file").expect("INFALLIBLE"));
    let log_level = match matches.value_of("log-level") {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        Some(level) => return Err(Error(format!("{}: invalid log level", level))),
        None => unreachable!(),
    };

    let _logger = if matches.is_present("log") {
        WriteLogger::init(
            log_level,
            Config::default(),
            File::create(&log_file).map_err(|err| {
                Error(format!("{}: {}", log_file.display(), err))
            })?)
    } else {
        WriteLogger::init(LevelFilter::Off, Config::default(), std::io::sink())
    };

    match matches.subcommand() {
        (_, None) => Uci::new().run(),
        ("counts", Some(matches)) => {
            if let Some(file) = matches.value_of("file") {
                verify_epd(file)?;
                return Ok(());
            }

            let depth = matches
                .value_of("depth")
                .expect("INFALLIBLE")
                .parse()
                .map_err(|_| {Error("depth must be numeric".to_owned())})?;

            println!();
            for fen in matches.values_of("fen").expect("INFALLIBLE") {
                let mut pos = fen.parse().map_err(|err| {Error(format!("{}: {}", fen, err))})?;
                println!("{}", fen);
                let count = variations::print(&mut pos, depth);
                println!("Depth {} total:\t{:12}\n", depth, count);
            }
        },
        _ => unreachable!(),
    }

    Ok(())
}

/// Checks the variation counts of every position in an EPD file. Each line holds a FEN
/// followed by any number of `;D<depth> <count>` assertions.
fn verify_epd(path: &str) -> Result<(), Error> {
    let file = File::open(path).map_err(|err| Error(format!("{}: {}", path, err)))?;

    for (num, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|err| Error(format!("{}:{}: {}", path, num + 1, err)))?;
        verify_epd_line(&line).map_err(|msg| Error(format!("{}:{}: {}", path, num + 1, msg)))?;
    }

    Ok(())
}

fn verify_epd_line(line: &str) -> Result<(), String> {
    let mut fields = line.split(';').map(str::trim);

    let fen = fields.next().unwrap_or("");
    if fen.is_empty() {
        return Ok(());
    }

    let mut pos: Position = fen.parse().map_err(|err| format!("{}: {}", fen, err))?;
    println!("\n{}", fen);

    for field in fields {
        let (depth, expected) = parse_count_field(field)
            .ok_or_else(|| format!("malformed count field \"{}\"", field))?;

        let found = variations::count(&mut pos, depth);
        println!("depth {:2}: counted {:>12}, published {:>12}", depth, found, expected);
        if found != expected {
            return Err(format!("perft({}) disagrees with the published count", depth));
        }
    }

    Ok(())
}

/// Parses a single `D<depth> <count>` assertion
fn parse_count_field(field: &str) -> Option<(usize, u64)> {
    let mut parts = field.split_whitespace();

    let depth = parts.next()?.strip_prefix('D')?.parse().ok()?;
    let count = parts.next()?.parse().ok()?;

    match parts.next() {
        None => Some((depth, count)),
        Some(_) => None,
    }
}

struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Error { }
