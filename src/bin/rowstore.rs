//! rowstore REPL
//!
//! Reads statements line by line from stdin against a single database file.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rowstore::execution::meta::{self, MetaCommand};
use rowstore::execution::{execute, ExecuteOutcome, Statement};
use rowstore::{Error, Table};
use tracing_subscriber::{fmt, EnvFilter};

const PROMPT: &str = "db > ";

/// rowstore REPL
#[derive(Parser, Debug)]
#[command(name = "rowstore")]
#[command(about = "Single-table row store with a line-oriented REPL")]
#[command(version)]
struct Args {
    /// Database file (created if missing)
    db_path: PathBuf,

    /// Skip the startup banner
    #[arg(long)]
    no_banner: bool,
}

fn main() -> ExitCode {
    // Logs go to stderr so they never mix with query output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    let args = Args::parse();

    let table = match Table::open(&args.db_path) {
        Ok(table) => table,
        Err(e) => {
            tracing::error!("Failed to open {}: {}", args.db_path.display(), e);
            eprintln!("Unable to open database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if !args.no_banner {
        print_banner();
    }

    match run(table) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Fatal: {}", e);
            eprintln!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_banner() {
    println!("rowstore v{}", env!("CARGO_PKG_VERSION"));
    println!("Type '.help' for options.");
    println!("Type '.exit' to leave.");
}

/// Run the REPL over stdin and stdout.
///
/// The table is closed on every way out of the loop, so inserts already
/// acknowledged with `Executed.` are flushed even when a fatal error ends
/// the session.
fn run(table: Table) -> rowstore::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(table, &mut stdin.lock(), &mut stdout.lock())
}

fn run_session<R: BufRead, W: Write>(
    mut table: Table,
    input: &mut R,
    out: &mut W,
) -> rowstore::Result<()> {
    match repl(&mut table, input, out) {
        Ok(()) => table.close(),
        Err(e) => {
            if let Err(close_err) = table.close() {
                tracing::error!("Failed to close table after fatal error: {}", close_err);
            }
            Err(e)
        }
    }
}

/// Read-eval-print until `.exit` or end of input.
///
/// Only I/O on the streams and non-recoverable table errors end the loop
/// early.
fn repl<R: BufRead, W: Write>(
    table: &mut Table,
    input: &mut R,
    out: &mut W,
) -> rowstore::Result<()> {
    let mut buf = Vec::new();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(_) => {
                let lossy = String::from_utf8_lossy(&buf);
                let lossy = lossy.trim();
                tracing::warn!("input line is not valid UTF-8");
                if lossy.starts_with('.') {
                    writeln!(out, "Unrecognized command '{}'", lossy)?;
                } else {
                    writeln!(out, "Unrecognized keyword at start of '{}'.", lossy)?;
                }
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        if line.starts_with('.') {
            match MetaCommand::parse(line) {
                MetaCommand::Exit => return Ok(()),
                MetaCommand::Help => writeln!(out, "{}", meta::render_help())?,
                MetaCommand::Constants => {
                    writeln!(out, "Constants:")?;
                    writeln!(out, "{}", meta::render_constants())?;
                }
                MetaCommand::BTree => {
                    writeln!(out, "Tree:")?;
                    writeln!(out, "{}", meta::render_btree(table)?)?;
                }
                MetaCommand::Unrecognized(cmd) => {
                    writeln!(out, "Unrecognized command '{}'", cmd)?
                }
            }
            continue;
        }

        let result = Statement::prepare(line).and_then(|stmt| execute(&stmt, table));
        match result {
            Ok(ExecuteOutcome::Inserted) => writeln!(out, "Executed.")?,
            Ok(ExecuteOutcome::Rows(rows)) => {
                for row in rows {
                    writeln!(out, "{}", row)?;
                }
                writeln!(out, "Executed.")?;
            }
            Err(e) if e.is_recoverable() => writeln!(out, "{}", user_message(&e, line))?,
            Err(e) => return Err(e),
        }
    }
}

fn user_message(err: &Error, line: &str) -> String {
    match err {
        Error::TableFull => "Error: Table full.".to_string(),
        Error::DuplicateKey(_) => "Error: Duplicate key.".to_string(),
        Error::StringTooLong { .. } => "String is too long.".to_string(),
        Error::InvalidString { .. } => "String contains a NUL byte.".to_string(),
        Error::NegativeId => "ID must be positive.".to_string(),
        Error::Syntax(_) => "Syntax error. Could not parse statement.".to_string(),
        Error::UnrecognizedStatement(_) => {
            format!("Unrecognized keyword at start of '{}'.", line)
        }
        other => other.to_string(),
    }
}
