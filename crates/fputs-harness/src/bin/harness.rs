//! CLI entrypoint for the fputs harness.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use fputs_core::log::{self, LogEmitter, validate_log_file};
use fputs_core::{OpenMode, OwnedStream, fputs, write_file};

/// Tooling for the fputs binding.
#[derive(Debug, Parser)]
#[command(name = "fputs-harness")]
#[command(about = "Drive and verify the fputs binding")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open a file and write text through the binding.
    Write {
        /// Text to write.
        #[arg(long)]
        text: String,
        /// Destination file.
        #[arg(long)]
        path: PathBuf,
        /// Append instead of truncating.
        #[arg(long)]
        append: bool,
        /// Structured JSONL log of the native call.
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Open-write-close in one call, enforcing the minimum text length.
    WriteFile {
        /// Text to write (at least FPUTS_MIN_LEN bytes, default 10).
        #[arg(long)]
        text: String,
        /// Destination file (truncated).
        #[arg(long)]
        path: PathBuf,
    },
    /// Run the write-behaviour scenarios and emit a JSON report.
    Verify {
        /// Scratch directory for scenario files.
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Output report path (if omitted, prints to stdout).
        #[arg(long)]
        output: Option<PathBuf>,
        /// Structured JSONL log output path.
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Validate a structured JSONL log file.
    ValidateLog {
        #[arg(long)]
        log: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match command {
        Command::Write {
            text,
            path,
            append,
            log: log_path,
        } => {
            if let Some(log_path) = &log_path {
                log::install(LogEmitter::to_file(log_path, "fputs-harness-write")?);
            }
            let mode = if append {
                OpenMode::Append
            } else {
                OpenMode::Write
            };
            let mut owned = OwnedStream::open(&path, mode)?;
            let result = fputs(&text, &mut owned.as_stream());
            owned.close()?;
            log::uninstall();
            let rc = result?;
            println!("{rc}");
        }
        Command::WriteFile { text, path } => {
            let rc = write_file(&text, &path)?;
            println!("{rc}");
        }
        Command::Verify { dir, output, log } => {
            let dir = dir.unwrap_or_else(std::env::temp_dir);
            let mut emitter = log
                .as_deref()
                .map(|p| LogEmitter::to_file(p, "fputs-harness-verify"))
                .transpose()?;
            let report = fputs_harness::run_all(&dir, emitter.as_mut())?;
            let json = report.to_json()?;
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, json)?;
                    eprintln!(
                        "Wrote report to {} ({}/{} passed)",
                        path.display(),
                        report.passed,
                        report.total
                    );
                }
                None => println!("{json}"),
            }
            if !report.all_passed() {
                for r in &report.results {
                    if let Some(why) = &r.failure {
                        eprintln!("FAIL {}: {why}", r.name);
                    }
                }
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::ValidateLog { log } => match validate_log_file(&log) {
            Ok(count) => println!("{}: {count} valid entries", log.display()),
            Err(errors) => {
                for err in &errors {
                    eprintln!("{err}");
                }
                return Ok(ExitCode::FAILURE);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
