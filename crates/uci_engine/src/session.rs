//! UCI command handling.
//!
//! Supported commands: `uci`, `isready`, `setoption name Depth value N`,
//! `ucinewgame`, `position (startpos | fen <FEN>) [moves ...]`,
//! `go [depth N]` and `quit`. Everything else is ignored.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chess_core::{move_to_uci, set_position_from_uci, Color, Engine, Position};
use tracing::{debug, info, warn};

use crate::config::{clamp_depth, MAX_DEPTH, MIN_DEPTH};

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Write these lines (possibly none) and keep reading
    Lines(Vec<String>),
    Quit,
}

/// Protocol state: the engine, the current position and the search depth.
pub struct UciSession<E: Engine> {
    engine: E,
    pos: Position,
    depth: u8,
}

impl<E: Engine> UciSession<E> {
    pub fn new(engine: E, depth: u8) -> Self {
        Self {
            engine,
            pos: Position::startpos(),
            depth: clamp_depth(depth),
        }
    }

    /// Handle one input line.
    pub fn handle(&mut self, line: &str) -> Reply {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Reply::Lines(Vec::new());
        };

        let lines = match command {
            "uci" => vec![
                format!("id name {}", self.engine.name()),
                format!("id author {}", self.engine.author()),
                format!(
                    "option name Depth type spin default {} min {} max {}",
                    self.depth, MIN_DEPTH, MAX_DEPTH
                ),
                "uciok".to_string(),
            ],
            "isready" => vec!["readyok".to_string()],
            "setoption" => {
                self.set_option(args);
                Vec::new()
            }
            "ucinewgame" => {
                self.pos = Position::startpos();
                self.engine.new_game();
                Vec::new()
            }
            "position" => {
                if let Err(err) = set_position_from_uci(&mut self.pos, args) {
                    warn!(%err, "rejected position command");
                }
                Vec::new()
            }
            "go" => self.go(args),
            "quit" => return Reply::Quit,
            other => {
                debug!(command = other, "ignoring unknown command");
                Vec::new()
            }
        };
        Reply::Lines(lines)
    }

    fn set_option(&mut self, args: &[&str]) {
        // setoption name <id> value <x>
        let name = args
            .iter()
            .position(|&t| t == "name")
            .and_then(|i| args.get(i + 1));
        let value = args
            .iter()
            .position(|&t| t == "value")
            .and_then(|i| args.get(i + 1));

        match (name, value) {
            (Some(name), Some(value)) if name.eq_ignore_ascii_case("depth") => {
                match value.parse::<u8>() {
                    Ok(d) => {
                        self.depth = clamp_depth(d);
                        info!(depth = self.depth, "search depth set");
                    }
                    Err(_) => warn!(value = *value, "invalid Depth value"),
                }
            }
            _ => debug!(?args, "ignoring setoption"),
        }
    }

    fn go(&mut self, args: &[&str]) -> Vec<String> {
        let depth = match args.iter().position(|&t| t == "depth") {
            Some(i) => match args.get(i + 1).and_then(|v| v.parse::<u8>().ok()) {
                Some(d) => clamp_depth(d),
                None => {
                    warn!(?args, "invalid go depth, using configured depth");
                    self.depth
                }
            },
            None => self.depth,
        };

        let result = self.engine.search(&self.pos, depth);

        // UCI scores are from the mover's point of view
        let mut cp = result.score * 100;
        if self.pos.side_to_move == Color::Black {
            cp = -cp;
        }

        let best = result
            .best_move
            .map(move_to_uci)
            .unwrap_or_else(|| "0000".to_string());
        info!(
            depth,
            score = result.score,
            nodes = result.nodes,
            bestmove = %best,
            "search done"
        );

        let mut lines = vec![format!(
            "info depth {} score cp {cp} nodes {}",
            result.depth, result.nodes
        )];
        let status = self.pos.status();
        if status.is_terminal() {
            let outcome = status.result_string(self.pos.side_to_move);
            info!(?status, result = outcome, "game over");
            lines.push(format!("info string result {outcome}"));
        }
        lines.push(format!("bestmove {best}"));
        lines
    }
}

/// Read commands from `input` until `quit` or end of input.
pub fn run<E, R, W>(session: &mut UciSession<E>, input: R, mut output: W) -> Result<()>
where
    E: Engine,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line.context("failed to read command")?;
        match session.handle(&line) {
            Reply::Lines(lines) => {
                for l in &lines {
                    writeln!(output, "{l}").context("failed to write response")?;
                }
                output.flush().context("failed to flush output")?;
            }
            Reply::Quit => break,
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
