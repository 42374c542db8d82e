//! Command parsing and execution for the book generator's line protocol.

use std::io::{self, Write};
use std::str::FromStr;
use std::time::Duration;

use chess_core::{
    MATE_SCORE, Position, PositionCommandError, RootMove, SearchLimits, move_to_uci,
    parse_position_command, perft_divide,
};
use opening_book::{BookError, BookOptions, BookSession, ExpandMode, OptionError};
use thiserror::Error;
use tracing::info;

/// Depth used when a command bounds the search only by time or nodes.
const MAX_DEPTH: u8 = 64;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("invalid {what} '{value}'")]
    Invalid { what: &'static str, value: String },
    #[error(transparent)]
    Position(#[from] PositionCommandError),
    #[error(transparent)]
    Option(#[from] OptionError),
    #[error(transparent)]
    Book(#[from] BookError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Search bounds given on a command line. Absent bounds fall back to the
/// session's configured depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LimitArgs {
    pub depth: Option<u8>,
    pub nodes: Option<u64>,
    pub movetime: Option<u64>,
}

impl LimitArgs {
    pub fn to_limits(self, default_depth: u8) -> SearchLimits {
        let depth = match self.depth {
            Some(d) => d,
            None if self.nodes.is_some() || self.movetime.is_some() => MAX_DEPTH,
            None => default_depth,
        };
        let mut limits = SearchLimits::depth(depth);
        if let Some(ms) = self.movetime {
            limits = limits.with_move_time(Duration::from_millis(ms));
        }
        if let Some(n) = self.nodes {
            limits = limits.with_nodes(n);
        }
        limits
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Uci,
    IsReady,
    NewGame,
    /// Searches run to completion, so there is nothing to interrupt.
    Stop,
    Quit,
    SetOption { name: String, value: String },
    Position(Position),
    Generate { depth: u8, limits: LimitArgs, perft: bool },
    Filter(LimitArgs),
    Clear,
    Size,
    Print,
    Save,
    Go(LimitArgs),
    Perft(u8),
    Display,
}

/// Whether the loop should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl Command {
    /// Parse one line. Blank lines give `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&head, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let cmd = match head {
            "uci" => Command::Uci,
            "isready" => Command::IsReady,
            "ucinewgame" => Command::NewGame,
            "stop" => Command::Stop,
            "quit" => Command::Quit,
            "setoption" => parse_setoption(args)?,
            "position" => Command::Position(parse_position_command(args)?),
            "generate" => {
                let (&first, rest) = args.split_first().ok_or(CommandError::Missing("depth"))?;
                let depth = number("depth", first)?;
                let perft = rest.contains(&"perft");
                Command::Generate {
                    depth,
                    limits: parse_limits(rest)?,
                    perft,
                }
            }
            "filter" => Command::Filter(parse_limits(args)?),
            "clear" => Command::Clear,
            "size" => Command::Size,
            "print" => Command::Print,
            "save" => Command::Save,
            "go" => Command::Go(parse_limits(args)?),
            "perft" => {
                let depth = args.first().ok_or(CommandError::Missing("depth"))?;
                Command::Perft(number("depth", depth)?)
            }
            "d" => Command::Display,
            _ => return Err(CommandError::Unknown(line.trim().to_string())),
        };
        Ok(Some(cmd))
    }
}

/// `name <words...> value <words...>`; the value may be absent.
fn parse_setoption(args: &[&str]) -> Result<Command, CommandError> {
    let Some((&"name", rest)) = args.split_first() else {
        return Err(CommandError::Missing("option name"));
    };
    let split = rest.iter().position(|&t| t == "value").unwrap_or(rest.len());
    let name = rest[..split].join(" ");
    if name.is_empty() {
        return Err(CommandError::Missing("option name"));
    }
    let value = rest.get(split + 1..).map(|v| v.join(" ")).unwrap_or_default();
    Ok(Command::SetOption { name, value })
}

fn parse_limits(args: &[&str]) -> Result<LimitArgs, CommandError> {
    let mut limits = LimitArgs::default();
    let mut it = args.iter();
    while let Some(&token) = it.next() {
        match token {
            "depth" => limits.depth = Some(number("depth", next(&mut it, "depth")?)?),
            "nodes" => limits.nodes = Some(number("nodes", next(&mut it, "nodes")?)?),
            "movetime" => limits.movetime = Some(number("movetime", next(&mut it, "movetime")?)?),
            _ => {}
        }
    }
    Ok(limits)
}

fn next<'a>(
    it: &mut std::slice::Iter<'_, &'a str>,
    what: &'static str,
) -> Result<&'a str, CommandError> {
    it.next().copied().ok_or(CommandError::Missing(what))
}

fn number<T: FromStr>(what: &'static str, text: &str) -> Result<T, CommandError> {
    text.parse().map_err(|_| CommandError::Invalid {
        what,
        value: text.to_string(),
    })
}

/// Run one command against the session, writing responses to `out`.
pub fn execute<W: Write>(
    session: &mut BookSession,
    cmd: Command,
    out: &mut W,
) -> Result<Flow, CommandError> {
    match cmd {
        Command::Uci => {
            writeln!(out, "id name bookgen {}", env!("CARGO_PKG_VERSION"))?;
            writeln!(out, "id author ML-chess")?;
            for line in BookOptions::uci_declarations() {
                writeln!(out, "{line}")?;
            }
            writeln!(out, "uciok")?;
        }
        Command::IsReady => writeln!(out, "readyok")?,
        Command::NewGame => {
            session.engine_mut().new_game();
            session.set_root(Position::startpos());
        }
        Command::Stop => {}
        Command::Quit => return Ok(Flow::Quit),
        Command::SetOption { name, value } => session.set_option(&name, &value)?,
        Command::Position(pos) => session.set_root(pos),
        Command::Generate {
            depth,
            limits,
            perft,
        } => {
            let mode = if perft {
                ExpandMode::Exhaustive
            } else {
                ExpandMode::Guided
            };
            let limits = limits.to_limits(session.options().depth);
            let report = session.expand(depth, mode, &limits);
            info!(
                depth,
                leaves = report.leaves,
                added = report.inserted,
                size = session.size(),
                "generate"
            );
        }
        Command::Filter(limits) => {
            let limits = limits.to_limits(session.options().depth);
            let report = session.filter(&limits);
            info!(
                kept = report.kept,
                dropped = report.dropped,
                malformed = report.malformed,
                "filter"
            );
        }
        Command::Clear => session.clear(),
        Command::Size => writeln!(out, "{}", session.size())?,
        Command::Print => session.print(out)?,
        Command::Save => {
            session.save()?;
        }
        Command::Go(limits) => {
            let limits = limits.to_limits(session.options().depth);
            let depth = limits.depth;
            let multipv = session.options().multipv;
            let root = session.root().clone();
            let ranked = session.engine_mut().search_multipv(&root, limits, multipv);
            for (i, rm) in ranked.iter().enumerate() {
                writeln!(out, "{}", info_line(depth, i + 1, rm))?;
            }
            match ranked.first() {
                Some(best) => writeln!(out, "bestmove {}", move_to_uci(best.mv))?,
                None => writeln!(out, "bestmove 0000")?,
            }
        }
        Command::Perft(depth) => {
            let mut pos = session.root().clone();
            let mut total = 0;
            for (mv, count) in perft_divide(&mut pos, depth) {
                writeln!(out, "{}: {count}", move_to_uci(mv))?;
                total += count;
            }
            writeln!(out)?;
            writeln!(out, "Nodes searched: {total}")?;
        }
        Command::Display => writeln!(out, "Fen: {}", session.root().to_fen())?,
    }
    Ok(Flow::Continue)
}

fn info_line(depth: u8, multipv: usize, rm: &RootMove) -> String {
    format!(
        "info depth {depth} multipv {multipv} score {} pv {}",
        score_text(rm.score),
        move_to_uci(rm.mv)
    )
}

/// UCI score text: `cp N`, or `mate N` in moves for mate scores.
fn score_text(score: i32) -> String {
    let distance = MATE_SCORE - score.abs();
    if distance < 1000 {
        let moves = (distance + 1) / 2;
        if score > 0 {
            format!("mate {moves}")
        } else {
            format!("mate -{moves}")
        }
    } else {
        format!("cp {score}")
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
