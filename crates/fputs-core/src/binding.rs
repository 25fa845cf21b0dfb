//! The `fputs` operations.
//!
//! [`fputs`] and friends write to a caller-owned stream and never close it.
//! [`write_file`] opens, writes and closes a path in one call.

use std::ffi::{CStr, c_int};
use std::path::Path;
use std::time::Instant;

use crate::config::{self, Config};
use crate::error::FputsError;
use crate::log;
use crate::status::{check_status, last_errno};
use crate::stream::{OpenMode, OwnedStream, Stream};
use crate::text::{check_min_len, to_c_text};

/// Write `text` to `stream`; returns the non-negative native status.
pub fn fputs(text: &str, stream: &mut Stream<'_>) -> Result<c_int, FputsError> {
    fputs_bytes(text.as_bytes(), stream)
}

/// Byte-oriented [`fputs`]. Text containing NUL is rejected before any I/O.
pub fn fputs_bytes(text: &[u8], stream: &mut Stream<'_>) -> Result<c_int, FputsError> {
    let c_text = to_c_text(text)?;
    fputs_c_str(&c_text, stream)
}

/// [`fputs`] for text that is already NUL-terminated.
pub fn fputs_c_str(text: &CStr, stream: &mut Stream<'_>) -> Result<c_int, FputsError> {
    let started = Instant::now();
    let rc = stream.put_c_str(text);
    let mut result = check_status(rc, last_errno);
    if result.is_ok() && config::get().flush_after_write {
        if let Err(err) = stream.flush() {
            result = Err(err);
        }
    }
    log::record_call("fputs", text.to_bytes().len(), &result, started.elapsed());
    result
}

/// Open `path` for writing (truncating), write `text`, close.
///
/// Text shorter than the configured minimum is rejected before the file is
/// touched. The stream is closed on every path; a failing close is reported
/// even when the write itself succeeded.
pub fn write_file(text: &str, path: &Path) -> Result<c_int, FputsError> {
    write_file_with(text.as_bytes(), path, config::get())
}

/// [`write_file`] with an explicit configuration.
pub fn write_file_with(text: &[u8], path: &Path, config: &Config) -> Result<c_int, FputsError> {
    let started = Instant::now();
    let result = open_put_close(text, path, config.min_text_len);
    log::record_call("write_file", text.len(), &result, started.elapsed());
    result
}

fn open_put_close(text: &[u8], path: &Path, min_len: usize) -> Result<c_int, FputsError> {
    check_min_len(text, min_len)?;
    let c_text = to_c_text(text)?;

    let mut owned = OwnedStream::open(path, OpenMode::Write)?;
    let rc = owned.as_stream().put_c_str(&c_text);
    match check_status(rc, last_errno) {
        Ok(rc) => owned.close().map(|()| rc),
        // Drop closes; the write error wins over any close error.
        Err(err) => Err(err),
    }
}
