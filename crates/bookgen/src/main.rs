//! Opening book generator.
//!
//! Reads UCI-style commands from stdin, or runs the commands given on the
//! command line (separated by `;`) and exits. Protocol output goes to
//! stdout; logs go to stderr.

mod commands;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use classical_engine::ClassicalEngine;
use opening_book::{BookOptions, BookSession};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use commands::{Command, Flow, execute};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with initial option values (MultiPV, MoveScoreRange, ...)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Commands to run instead of reading stdin, e.g.
    /// `position startpos ; generate 4 perft ; save`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    commands: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .with_context(|| format!("invalid log filter '{}'", args.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let options = match &args.config {
        Some(path) => BookOptions::load(path)?,
        None => BookOptions::default(),
    };
    let mut session = BookSession::new(Box::new(ClassicalEngine::new()), options);
    debug!(engine = session.engine().name(), options = ?session.options(), "starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.commands.is_empty() {
        let script = args.commands.join(" ");
        for line in script.split(';') {
            if run_line(&mut session, line, &mut out)? == Flow::Quit {
                break;
            }
        }
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        if run_line(&mut session, &line, &mut out)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}

/// Parse and run one command. Command failures are reported on `out` and
/// do not end the loop; only a broken `out` does.
fn run_line<W: Write>(session: &mut BookSession, line: &str, out: &mut W) -> io::Result<Flow> {
    let result = Command::parse(line).and_then(|cmd| match cmd {
        Some(cmd) => execute(session, cmd, out),
        None => Ok(Flow::Continue),
    });
    let flow = match result {
        Ok(flow) => flow,
        Err(err) => {
            warn!(command = line.trim(), %err, "command failed");
            writeln!(out, "{err}")?;
            Flow::Continue
        }
    };
    out.flush()?;
    Ok(flow)
}
