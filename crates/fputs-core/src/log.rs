//! Structured JSONL logging.
//!
//! Provides:
//! - [`LogEntry`]: one JSONL record with required + optional fields.
//! - [`LogEmitter`]: writes JSONL lines to a file or any `Write` sink.
//! - [`validate_log_line`] / [`validate_log_file`]: schema checks.
//! - A process-global sink ([`install`]) that the binding reports every write
//!   to. With no sink installed, recording is a single uncontended lock.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::FputsError;

// ---------------------------------------------------------------------------
// Log entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    const NAMES: [&'static str; 5] = ["trace", "debug", "info", "warn", "error"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
}

/// Canonical structured log entry.
///
/// Required fields: `timestamp`, `trace_id`, `level`, `event`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub trace_id: String,
    pub level: LogLevel,
    pub event: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errno: Option<i32>,
    /// Stable error-kind name (`write_failed`, `interior_nul`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    /// Length of the text handed to the native call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ns: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LogEntry {
    #[must_use]
    pub fn new(trace_id: impl Into<String>, level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            timestamp: now_utc(),
            trace_id: trace_id.into(),
            level,
            event: event.into(),
            symbol: None,
            outcome: None,
            errno: None,
            error_kind: None,
            bytes: None,
            latency_ns: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    #[must_use]
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    #[must_use]
    pub fn with_errno(mut self, errno: i32) -> Self {
        self.errno = Some(errno);
        self
    }

    /// Record the kind and errno of a failure.
    #[must_use]
    pub fn with_error(mut self, err: &FputsError) -> Self {
        self.error_kind = Some(err.kind().as_str().to_string());
        self.errno = err.errno();
        self
    }

    #[must_use]
    pub fn with_bytes(mut self, bytes: usize) -> Self {
        self.bytes = Some(bytes as u64);
        self
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency_ns = Some(u64::try_from(latency.as_nanos()).unwrap_or(u64::MAX));
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Serialize to a single JSONL line (no trailing newline).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
// Log emitter
// ---------------------------------------------------------------------------

/// Writes structured JSONL log entries.
pub struct LogEmitter {
    writer: Box<dyn Write + Send>,
    seq: u64,
    run_id: String,
}

impl LogEmitter {
    /// Create an emitter that appends to a file.
    pub fn to_file(path: &Path, run_id: &str) -> std::io::Result<Self> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self::to_writer(std::io::BufWriter::new(file), run_id))
    }

    /// Create an emitter over any writer.
    #[must_use]
    pub fn to_writer(writer: impl Write + Send + 'static, run_id: &str) -> Self {
        Self {
            writer: Box::new(writer),
            seq: 0,
            run_id: run_id.to_string(),
        }
    }

    fn next_trace_id(&mut self) -> String {
        self.seq += 1;
        format!("{}::{:03}", self.run_id, self.seq)
    }

    /// Emit a bare entry with an auto-generated trace id.
    pub fn emit(&mut self, level: LogLevel, event: &str) -> std::io::Result<LogEntry> {
        let trace_id = self.next_trace_id();
        let entry = LogEntry::new(trace_id, level, event);
        let line = entry.to_jsonl().map_err(std::io::Error::other)?;
        writeln!(self.writer, "{line}")?;
        Ok(entry)
    }

    /// Emit a fully-populated entry; an empty trace id is filled in.
    pub fn emit_entry(&mut self, mut entry: LogEntry) -> std::io::Result<()> {
        if entry.trace_id.is_empty() {
            entry.trace_id = self.next_trace_id();
        }
        let line = entry.to_jsonl().map_err(std::io::Error::other)?;
        writeln!(self.writer, "{line}")
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

// ---------------------------------------------------------------------------
// Global sink
// ---------------------------------------------------------------------------

static SINK: Mutex<Option<LogEmitter>> = parking_lot::const_mutex(None);

/// Install the process-wide sink, returning the previous one.
pub fn install(emitter: LogEmitter) -> Option<LogEmitter> {
    SINK.lock().replace(emitter)
}

/// Remove the process-wide sink, flushing it first.
pub fn uninstall() -> Option<LogEmitter> {
    let mut guard = SINK.lock();
    if let Some(emitter) = guard.as_mut() {
        let _ = emitter.flush();
    }
    guard.take()
}

#[must_use]
pub fn is_installed() -> bool {
    SINK.lock().is_some()
}

/// Record one native call. Sink errors are swallowed; logging never fails a write.
pub fn record_call(
    symbol: &str,
    bytes: usize,
    result: &Result<std::ffi::c_int, FputsError>,
    latency: Duration,
) {
    let mut guard = SINK.lock();
    let Some(emitter) = guard.as_mut() else {
        return;
    };
    let entry = LogEntry::new(String::new(), LogLevel::Info, "native_call")
        .with_symbol(symbol)
        .with_bytes(bytes)
        .with_latency(latency);
    let entry = match result {
        Ok(rc) => entry
            .with_outcome(Outcome::Pass)
            .with_details(serde_json::json!({ "status": rc })),
        Err(err) => LogEntry {
            level: LogLevel::Warn,
            ..entry.with_outcome(Outcome::Fail).with_error(err)
        },
    };
    let _ = emitter.emit_entry(entry);
    let _ = emitter.flush();
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct LogValidationError {
    pub line_number: usize,
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for LogValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: field '{}': {}",
            self.line_number, self.field, self.message
        )
    }
}

/// Validate a single JSONL line against the schema.
pub fn validate_log_line(
    line: &str,
    line_number: usize,
) -> Result<LogEntry, Vec<LogValidationError>> {
    let err = |field: &str, message: String| LogValidationError {
        line_number,
        field: field.to_string(),
        message,
    };

    let value: serde_json::Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => return Err(vec![err("<json>", format!("invalid JSON: {e}"))]),
    };
    let Some(obj) = value.as_object() else {
        return Err(vec![err("<root>", "expected JSON object".to_string())]);
    };

    let mut errors = Vec::new();
    for field in ["timestamp", "trace_id", "level", "event"] {
        match obj.get(field) {
            None => errors.push(err(field, "required field missing".to_string())),
            Some(v) if !v.is_string() => errors.push(err(field, "expected string".to_string())),
            Some(_) => {}
        }
    }
    if let Some(level) = obj.get("level").and_then(|v| v.as_str())
        && !LogLevel::NAMES.contains(&level)
    {
        errors.push(err("level", format!("unknown level '{level}'")));
    }
    if obj
        .get("trace_id")
        .and_then(|v| v.as_str())
        .is_some_and(str::is_empty)
    {
        errors.push(err("trace_id", "must not be empty".to_string()));
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    serde_json::from_value(value).map_err(|e| vec![err("<schema>", e.to_string())])
}

/// Validate every non-blank line of a JSONL file.
///
/// Returns the number of valid entries, or every error found.
pub fn validate_log_file(path: &Path) -> Result<usize, Vec<LogValidationError>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        vec![LogValidationError {
            line_number: 0,
            field: "<file>".to_string(),
            message: format!("cannot read {}: {e}", path.display()),
        }]
    })?;

    let mut count = 0usize;
    let mut errors = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match validate_log_line(line, idx + 1) {
            Ok(_) => count += 1,
            Err(mut errs) => errors.append(&mut errs),
        }
    }
    if errors.is_empty() {
        Ok(count)
    } else {
        Err(errors)
    }
}

/// RFC 3339 UTC timestamp with millisecond precision.
#[must_use]
pub fn now_utc() -> String {
    let duration = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    format_utc(duration.as_secs(), duration.subsec_millis())
}

fn format_utc(secs: u64, millis: u32) -> String {
    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;
    let (year, month, day) = civil_from_days(days);
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}.{millis:03}Z",
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60,
    )
}

// Days since 1970-01-01 to proleptic Gregorian (y, m, d).
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
