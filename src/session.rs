//! Interactive command loop.
//!
//! The session owns everything the operator sees: it reads one command per
//! line, runs it against the registry, and writes the result. Each command
//! finishes (including all filesystem reads) before the next is read.

use crate::error::TrackError;
use crate::registry::{AddOutcome, FileRegistry};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Prompt printed before each command.
pub const PROMPT: &str =
    "Enter action (commit, info [file], status, add <file>, rm <file>, list, help) or 'exit': ";

const HELP: &str = "\
Commands:
  commit          record the current modification time of every file
  info [file]     show statistics for one file, or all files
  status          list files changed since the last snapshot
  add <file>      start tracking a file in the folder
  rm <file>       stop tracking a file
  list            list tracked files
  help            show this help
  exit            leave the session";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Advance every snapshot
    Commit,
    /// Describe one file, or all files when `None`
    Info(Option<String>),
    /// Report changed files
    Status,
    /// Track a file
    Add(String),
    /// Untrack a file
    Remove(String),
    /// List tracked files
    List,
    /// Show usage
    Help,
    /// Leave the loop
    Exit,
}

/// Why a line could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Blank line
    Empty,
    /// Unknown verb or wrong arguments
    Invalid(String),
}

impl FromStr for SessionCommand {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words = shell_words::split(line).map_err(|e| ParseError::Invalid(e.to_string()))?;
        let Some((verb, args)) = words.split_first() else {
            return Err(ParseError::Empty);
        };

        let one_arg = |args: &[String]| match args {
            [name] => Ok(name.clone()),
            _ => Err(ParseError::Invalid(format!("'{verb}' takes one file name"))),
        };

        match verb.as_str() {
            "commit" if args.is_empty() => Ok(Self::Commit),
            "info" => match args {
                [] => Ok(Self::Info(None)),
                [name] if name == "all" => Ok(Self::Info(None)),
                [name] => Ok(Self::Info(Some(name.clone()))),
                _ => Err(ParseError::Invalid("'info' takes at most one file name".into())),
            },
            "status" if args.is_empty() => Ok(Self::Status),
            "add" => one_arg(args).map(Self::Add),
            "rm" | "remove" => one_arg(args).map(Self::Remove),
            "list" | "ls" if args.is_empty() => Ok(Self::List),
            "help" | "?" => Ok(Self::Help),
            "exit" | "quit" => Ok(Self::Exit),
            _ => Err(ParseError::Invalid(line.trim().to_string())),
        }
    }
}

/// Whether the loop continues after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command
    Continue,
    /// Stop the loop
    Exit,
}

/// Runs one command, writing its output to `out`.
///
/// Failures of the command itself (a vanished file, a failed commit) are
/// reported to `out` and the session continues.
///
/// # Errors
///
/// Only fails if writing to `out` fails.
pub fn dispatch<W: Write>(
    registry: &mut FileRegistry,
    command: &SessionCommand,
    out: &mut W,
) -> Result<Flow> {
    debug!(?command, "Dispatching");
    match command {
        SessionCommand::Commit => match registry.commit_all() {
            Ok(report) => {
                writeln!(out, "Committed {} file(s).", report.committed)?;
                for err in &report.skipped {
                    writeln!(out, "Skipped: {err}")?;
                }
            }
            Err(e) => writeln!(out, "Commit aborted: {e}")?,
        },
        SessionCommand::Info(None) => match registry.describe_all() {
            Ok(lines) if lines.is_empty() => writeln!(out, "No files tracked.")?,
            Ok(lines) => {
                for line in lines {
                    writeln!(out, "{line}")?;
                }
            }
            Err(e) => writeln!(out, "Error: {e}")?,
        },
        SessionCommand::Info(Some(name)) => match registry.describe_one(name) {
            Ok(line) => writeln!(out, "{line}")?,
            Err(e) if !registry.contains(name) && e.is_not_found() => {
                writeln!(out, "File not found.")?;
            }
            Err(e) => writeln!(out, "Error: {e}")?,
        },
        SessionCommand::Status => match registry.changed() {
            Ok(changed) if changed.is_empty() => writeln!(out, "No changes detected.")?,
            Ok(changed) => {
                for path in changed {
                    writeln!(
                        out,
                        "File '{}' has been changed since the last snapshot.",
                        path.display()
                    )?;
                }
            }
            Err(e) => writeln!(out, "Error: {e}")?,
        },
        SessionCommand::Add(name) => match registry.add(name) {
            Ok(AddOutcome::Tracked(kind)) => writeln!(out, "Tracking {name} ({kind}).")?,
            Ok(AddOutcome::Replaced(kind)) => {
                writeln!(out, "Re-tracking {name} ({kind}); history reset.")?;
            }
            Ok(AddOutcome::Unsupported) => writeln!(out, "Unsupported file type: {name}")?,
            Err(TrackError::NotFound { .. }) => writeln!(out, "File not found.")?,
            Err(e) => writeln!(out, "Error: {e}")?,
        },
        SessionCommand::Remove(name) => {
            if registry.remove(name) {
                writeln!(out, "Stopped tracking {name}.")?;
            } else {
                writeln!(out, "File not found.")?;
            }
        }
        SessionCommand::List => {
            if registry.is_empty() {
                writeln!(out, "No files tracked.")?;
            }
            for file in registry.iter() {
                writeln!(out, "{} ({})", file.path().display(), file.kind())?;
            }
        }
        SessionCommand::Help => writeln!(out, "{HELP}")?,
        SessionCommand::Exit => {
            writeln!(out, "Exiting program...")?;
            return Ok(Flow::Exit);
        }
    }
    Ok(Flow::Continue)
}

/// Reads commands from `input` until `exit` or end of input.
///
/// `pause` is waited after every command.
///
/// # Errors
///
/// Fails if reading `input` or writing `out` fails.
pub fn run<R: BufRead, W: Write>(
    registry: &mut FileRegistry,
    input: R,
    out: &mut W,
    pause: Duration,
) -> Result<()> {
    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            return Ok(());
        };
        let line = line.context("Failed to read command")?;

        let flow = match line.parse::<SessionCommand>() {
            Ok(command) => dispatch(registry, &command, out)?,
            Err(ParseError::Empty) => continue,
            Err(ParseError::Invalid(reason)) => {
                debug!(%reason, "Rejected command");
                writeln!(out, "Invalid action.")?;
                Flow::Continue
            }
        };

        if flow == Flow::Exit {
            return Ok(());
        }
        if !pause.is_zero() {
            std::thread::sleep(pause);
        }
    }
}
