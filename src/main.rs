//! Gateboard - logic gate board runner
//!
//! Replays a command script against a fresh board and prints the final
//! board state.
//!
//! # Usage
//!
//! ```bash
//! gateboard half_adder.gb
//! gateboard half_adder.gb --rounds 10 -vv
//! ```

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use gateboard_core::{
    error::{BoardError, Result},
    report::BoardReport,
    script::{self, Runner},
    Session,
};
use tracing::Level;

/// Logic gate board script runner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the command script
    #[arg(value_name = "SCRIPT_FILE")]
    script_file: PathBuf,

    /// Propagation rounds per pass (overrides `.rounds`)
    #[arg(short, long)]
    rounds: Option<usize>,

    /// Propagation passes per edit (overrides `.passes`)
    #[arg(short, long)]
    passes: Option<usize>,

    /// Only run the script, do not print the final board
    #[arg(short, long)]
    quiet: bool,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // Parse the script
    let mut script = script::parse_file(&args.script_file)?;
    if args.rounds.is_some() {
        script.rounds = args.rounds;
    }
    if let Some(passes) = args.passes {
        script.passes = Some(passes.max(1));
    }

    // Run it against a fresh board
    let mut session = Session::new();
    let mut runner = Runner::new(&mut session);
    let log = runner.run(&script)?;
    let aliases = runner.aliases().clone();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let write_err = |e: std::io::Error| BoardError::OutputError {
        message: e.to_string(),
    };

    for report in &log.reports {
        writeln!(out, "{}", report).map_err(write_err)?;
    }
    if !args.quiet {
        let report = BoardReport::new(&session).with_aliases(&aliases);
        write!(out, "{}", report).map_err(write_err)?;
    }

    if log.ignored > 0 {
        tracing::warn!(ignored = log.ignored, "some edits were ignored");
    }

    Ok(())
}
