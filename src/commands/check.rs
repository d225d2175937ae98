use crate::analyzer::find_analyzer;
use crate::cli::Cli;
use crate::compdb::{CompileCommand, find_entry_for_file, load_compile_commands};
use crate::invocation::build_command;
use crate::{AppError, AppResult};
use anyhow::Context;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// What happened to a single requested file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// No compilation entry could be matched.
    NoEntry,
    /// The matched entry produced no usable command line.
    NoCommand,
    /// The analyzer ran and exited with this status.
    Finished(i32),
}

impl FileOutcome {
    /// Folds this outcome into the run's exit code.
    ///
    /// A later non-zero status overwrites an earlier one, and a success never
    /// resets a previous failure.
    pub fn fold_exit_code(self, acc: i32) -> i32 {
        match self {
            FileOutcome::NoEntry | FileOutcome::NoCommand => 1,
            FileOutcome::Finished(0) => acc,
            FileOutcome::Finished(code) => code,
        }
    }
}

/// Runs the analyzer over every file requested on the command line.
pub fn run_check(args: Cli) -> AppResult<i32> {
    let analyzer = find_analyzer().ok_or(AppError::AnalyzerNotFound)?;
    info!(analyzer = %analyzer.display(), "using analyzer");

    let entries = load_compile_commands(&args.build_dir)?;
    if entries.is_empty() {
        return Err(AppError::NoDatabase(args.build_dir));
    }

    let stdout = io::stdout();
    let stderr = io::stderr();
    check_files(
        &args.files,
        &analyzer,
        &entries,
        &mut stdout.lock(),
        &mut stderr.lock(),
    )
}

/// Analyzes `files` in order and returns the aggregated exit code.
pub fn check_files<O: Write, E: Write>(
    files: &[PathBuf],
    analyzer: &Path,
    entries: &[CompileCommand],
    out: &mut O,
    err: &mut E,
) -> AppResult<i32> {
    files.iter().try_fold(0, |acc, file| -> AppResult<i32> {
        let outcome = check_file(file, analyzer, entries, out, err)?;
        debug!(file = %file.display(), ?outcome, "file done");
        Ok(outcome.fold_exit_code(acc))
    })
}

fn check_file<O: Write, E: Write>(
    file: &Path,
    analyzer: &Path,
    entries: &[CompileCommand],
    out: &mut O,
    err: &mut E,
) -> AppResult<FileOutcome> {
    let Some(entry) = find_entry_for_file(entries, file) else {
        writeln!(err, "No compile command found for {}", file.display())?;
        return Ok(FileOutcome::NoEntry);
    };

    let Some(cmd) = build_command(entry, analyzer, file) else {
        writeln!(err, "Failed to build command for {}", file.display())?;
        return Ok(FileOutcome::NoCommand);
    };

    writeln!(out, "Running: {}", cmd.join(" "))?;
    out.flush()?;

    let output = Command::new(&cmd[0])
        .args(&cmd[1..])
        .output()
        .with_context(|| format!("failed to run {}", cmd[0]))?;

    if !output.stdout.is_empty() {
        out.write_all(&output.stdout)?;
        out.flush()?;
    }
    if !output.stderr.is_empty() {
        err.write_all(&output.stderr)?;
        err.flush()?;
    }

    let code = output.status.code().unwrap_or(1);
    debug!(file = %file.display(), code, "analyzer exited");
    Ok(FileOutcome::Finished(code))
}
