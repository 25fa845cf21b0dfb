//! Write-behaviour scenarios.
//!
//! Each scenario opens a fresh file, pushes its chunks through the binding in
//! order and compares the bytes that land on disk (by SHA-256) with what the
//! scenario expects.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use fputs_core::log::{LogEmitter, LogEntry, LogLevel, Outcome, now_utc};
use fputs_core::{ErrorKind, FputsError, OpenMode, OwnedStream, fputs};

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy)]
pub enum Expectation {
    /// Every call succeeds and the file holds exactly these bytes.
    Content(&'static [u8]),
    /// The stream is read-only; the first call fails and the file keeps `seed`.
    WriteFails { seed: &'static [u8] },
}

#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub chunks: &'static [&'static str],
    pub expect: Expectation,
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "hello_fresh_stream",
        chunks: &["hello"],
        expect: Expectation::Content(b"hello"),
    },
    Scenario {
        name: "empty_string",
        chunks: &[""],
        expect: Expectation::Content(b""),
    },
    Scenario {
        name: "same_string_twice",
        chunks: &["hello", "hello"],
        expect: Expectation::Content(b"hellohello"),
    },
    Scenario {
        name: "multibyte_and_newlines",
        chunks: &["línea 1\n", "línea 2\n"],
        expect: Expectation::Content("línea 1\nlínea 2\n".as_bytes()),
    },
    Scenario {
        name: "read_only_stream_fails",
        chunks: &["hello"],
        expect: Expectation::WriteFails { seed: b"seed" },
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    pub outcome: Outcome,
    /// Native statuses of the calls that succeeded.
    pub statuses: Vec<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errno: Option<i32>,
    pub observed_len: usize,
    pub observed_sha256: String,
    pub expected_sha256: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    pub latency_ns: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub generated_utc: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<ScenarioResult>,
}

impl VerifyReport {
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

fn scenario_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("fputs-scenario-{}-{name}.txt", std::process::id()))
}

struct Observed {
    statuses: Vec<i32>,
    error: Option<FputsError>,
}

fn drive(path: &Path, scenario: &Scenario) -> Result<Observed, HarnessError> {
    let mode = match scenario.expect {
        Expectation::Content(_) => OpenMode::Write,
        Expectation::WriteFails { seed } => {
            std::fs::write(path, seed)?;
            OpenMode::Read
        }
    };
    let mut owned = OwnedStream::open(path, mode).map_err(std::io::Error::from)?;
    let mut observed = Observed {
        statuses: Vec::with_capacity(scenario.chunks.len()),
        error: None,
    };
    for chunk in scenario.chunks {
        match fputs(chunk, &mut owned.as_stream()) {
            Ok(rc) => observed.statuses.push(rc),
            Err(err) => {
                observed.error = Some(err);
                break;
            }
        }
    }
    if let Err(err) = owned.close() {
        observed.error.get_or_insert(err);
    }
    Ok(observed)
}

fn judge(scenario: &Scenario, observed: &Observed, content: &[u8]) -> Option<String> {
    match scenario.expect {
        Expectation::Content(expected) => {
            if let Some(err) = &observed.error {
                return Some(format!("unexpected error: {err}"));
            }
            if let Some(rc) = observed.statuses.iter().find(|rc| **rc < 0) {
                return Some(format!("negative status {rc} returned as success"));
            }
            (content != expected).then(|| {
                format!(
                    "content mismatch: expected {} bytes, observed {}",
                    expected.len(),
                    content.len()
                )
            })
        }
        Expectation::WriteFails { seed } => {
            match &observed.error {
                Some(err) if err.kind() == ErrorKind::WriteFailed => {}
                Some(err) => return Some(format!("wrong error kind: {err}")),
                None => return Some("write on read-only stream reported success".to_string()),
            }
            (content != seed).then(|| "read-only file was modified".to_string())
        }
    }
}

/// Run one scenario in `dir`, removing its file afterwards.
pub fn run_scenario(dir: &Path, scenario: &Scenario) -> Result<ScenarioResult, HarnessError> {
    let path = scenario_path(dir, scenario.name);
    let started = Instant::now();
    let observed = drive(&path, scenario)?;
    let latency_ns = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);
    let content = std::fs::read(&path)?;
    let _ = std::fs::remove_file(&path);

    let expected = match scenario.expect {
        Expectation::Content(bytes) => bytes,
        Expectation::WriteFails { seed } => seed,
    };
    let failure = judge(scenario, &observed, &content);

    Ok(ScenarioResult {
        name: scenario.name.to_string(),
        outcome: if failure.is_none() {
            Outcome::Pass
        } else {
            Outcome::Fail
        },
        statuses: observed.statuses,
        error_kind: observed
            .error
            .as_ref()
            .map(|e| e.kind().as_str().to_string()),
        errno: observed.error.as_ref().and_then(FputsError::errno),
        observed_len: content.len(),
        observed_sha256: sha256_hex(&content),
        expected_sha256: sha256_hex(expected),
        failure,
        latency_ns,
    })
}

/// Run every scenario in `dir`, optionally logging one entry per scenario.
pub fn run_all(dir: &Path, mut log: Option<&mut LogEmitter>) -> Result<VerifyReport, HarnessError> {
    std::fs::create_dir_all(dir)?;
    let mut results = Vec::with_capacity(SCENARIOS.len());
    for scenario in SCENARIOS {
        let result = run_scenario(dir, scenario)?;
        if let Some(emitter) = log.as_deref_mut() {
            let level = match result.outcome {
                Outcome::Pass => LogLevel::Info,
                Outcome::Fail => LogLevel::Error,
            };
            let mut entry = LogEntry::new(String::new(), level, "scenario")
                .with_symbol("fputs")
                .with_outcome(result.outcome)
                .with_details(serde_json::json!({
                    "scenario": result.name,
                    "observed_sha256": result.observed_sha256,
                }));
            entry.latency_ns = Some(result.latency_ns);
            entry.errno = result.errno;
            entry.error_kind = result.error_kind.clone();
            emitter.emit_entry(entry)?;
        }
        results.push(result);
    }
    if let Some(emitter) = log {
        emitter.flush()?;
    }

    let passed = results
        .iter()
        .filter(|r| r.outcome == Outcome::Pass)
        .count();
    Ok(VerifyReport {
        generated_utc: now_utc(),
        total: results.len(),
        passed,
        failed: results.len() - passed,
        results,
    })
}
