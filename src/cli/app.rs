//! Main CLI application structure

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use super::interpreter::Interpreter;
use super::output::{Output, OutputFormat};
use crate::storage::{AuditLog, CommandHistory, Config};

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(author, version, about = "Interactive inventory tracker for products and warehouses")]
pub struct Cli {
    /// Replay commands from a file instead of reading the terminal
    #[arg(long, short = 'r', value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Command history log (truncated at startup)
    #[arg(long, value_name = "PATH", env = "STOCKROOM_LOG")]
    pub log: Option<PathBuf>,

    /// Configuration file (defaults to ./stockroom.toml when present)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<OutputFormat>,

    /// Enable verbose diagnostics on stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(log) = cli.log {
        config.audit.path = log;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    tracing::debug!(?config, "Configuration loaded");

    let audit = AuditLog::create(&config.audit.path, config.audit.batch_size)?;
    let mut output = Output::new(config.format);
    let mut interpreter = Interpreter::new(audit);

    match &cli.replay {
        Some(path) => replay(&mut interpreter, &mut output, path, &config.prompt)?,
        None => interactive(&mut interpreter, &mut output, &config.prompt)?,
    }

    interpreter
        .into_history()
        .flush()
        .context("Failed to flush command history")?;

    tracing::debug!("Input exhausted");
    Ok(())
}

/// Reads commands from stdin until end of input
pub fn interactive<H: CommandHistory>(
    interpreter: &mut Interpreter<H>,
    output: &mut Output,
    prompt: &str,
) -> Result<()> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut buf = Vec::new();

    loop {
        output.prompt(prompt)?;

        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .context("Failed to read from stdin")?;
        if read == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        execute_isolated(interpreter, output, line.trim_end_matches(['\r', '\n']))?;
    }

    Ok(())
}

/// Replays a command file, echoing each line with the prompt before running it
pub fn replay<H: CommandHistory>(
    interpreter: &mut Interpreter<H>,
    output: &mut Output,
    path: &Path,
    prompt: &str,
) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read command file: {}", path.display()))?;

    tracing::debug!(path = %path.display(), "Replaying commands");

    for line in content.lines() {
        let line = line.trim_end();
        output.echo(prompt, line)?;
        execute_isolated(interpreter, output, line)?;
    }

    Ok(())
}

/// Runs one line, reporting any failure instead of ending the session
fn execute_isolated<H: CommandHistory>(
    interpreter: &mut Interpreter<H>,
    output: &mut Output,
    line: &str,
) -> Result<()> {
    if let Err(e) = interpreter.execute(line, output) {
        tracing::warn!(line, "Command failed unexpectedly");
        output.error(&format!("{:#}", e))?;
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Diagnostics go to stderr so they never mix with command output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
