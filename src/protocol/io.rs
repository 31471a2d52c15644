//! Line-based input and output between the engine and the program driving it
//
//  Copyright 2021 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::io::{stdin, BufRead};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;
use log::{info, warn};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A request that arrived over stdin while a search was running.
///
/// A searching engine cannot act on commands, so whatever comes in is folded down to the only
/// two things it can mean at that point.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Interrupt {
    /// Wind the search up and report the best move found so far
    Stop,
    /// Stop searching and exit the program once `bestmove` has gone out
    Quit,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The engine's end of the conversation with the driving program.
///
/// Reading stdin blocks, which the search can never afford, so a background thread pulls the
/// lines off stdin and hands them over a channel. The command loop waits on
/// [`next_command`](#method.next_command) while idle; the search polls
/// [`interrupt`](#method.interrupt) between batches of nodes, which never blocks.
///
/// Both directions of traffic are logged at info level (assuming a logger is set up).
#[derive(Debug)]
pub struct InputStream {
    lines: Receiver<String>,
}

impl InputStream {
    /// Opens the stream, spawning the thread that reads stdin behind it
    pub fn open() -> InputStream {
        let (sender, lines) = channel();
        thread::spawn(move || read_lines(sender));

        InputStream { lines }
    }

    /// Waits for the next line of input. Returns `None` once stdin is exhausted.
    pub fn next_command(&self) -> Option<String> {
        self.lines.recv().ok()
    }

    /// Checks for input without blocking.
    ///
    /// Every waiting line is consumed: any input at all asks the search to stop, and `quit`
    /// takes precedence over whatever else is queued.
    pub fn interrupt(&self) -> Option<Interrupt> {
        let mut interrupt = None;

        loop {
            match self.lines.try_recv() {
                Ok(line) => {
                    if line == "quit" {
                        return Some(Interrupt::Quit);
                    }
                    interrupt = Some(Interrupt::Stop);
                },
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        interrupt
    }
}

/// Writes one protocol line to stdout, mirroring it to the log
pub fn respond(line: &str) {
    println!("{}", line);
    info!("sent: {}", line);
}

/// Forwards stdin to the channel line by line until end of input
fn read_lines(sender: Sender<String>) {
    let stdin = stdin();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line.trim().to_string(),
            Err(err) => {
                warn!("stdin read failed: {}", err);
                return;
            },
        };

        info!("received: {}", line);
        if sender.send(line).is_err() {
            // nobody is listening anymore
            return;
        }
    }

    info!("end of input");
}
