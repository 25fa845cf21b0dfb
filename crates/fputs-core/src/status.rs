//! Sentinel checking for native stdio return codes.

use std::ffi::c_int;

use crate::error::FputsError;

/// Value `fputs` returns on failure.
pub const EOF: c_int = libc::EOF;

/// Returns true when `rc` is the failure sentinel (any negative value).
#[inline]
#[must_use]
pub const fn is_failure(rc: c_int) -> bool {
    rc < 0
}

/// Translate a raw `fputs` return code into a `Result`.
///
/// `errno` is only evaluated on failure; callers pass a reader that samples
/// errno before anything else can clobber it.
pub fn check_status(rc: c_int, errno: impl FnOnce() -> i32) -> Result<c_int, FputsError> {
    if is_failure(rc) {
        Err(FputsError::WriteFailed { errno: errno() })
    } else {
        Ok(rc)
    }
}

/// Current thread's errno as seen by the OS error machinery.
#[must_use]
pub fn last_errno() -> i32 {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}
