//! ABI entry points for the binding and its module constants.

use std::ffi::{CStr, c_char, c_int};
use std::path::Path;

use fputs_core::log::{self, LogEmitter};
use fputs_core::{FputsError, Stream, config};
use parking_lot::Once;

use crate::error_abi::{clear_last_error, set_last_error};

#[unsafe(no_mangle)]
pub static FPUTS_FLAG: c_int = fputs_core::FPUTS_FLAG;

#[unsafe(no_mangle)]
pub static FPUTS_MACRO: c_int = fputs_core::FPUTS_MACRO;

// Installs the FPUTS_LOG sink once per process, unless one is already set.
fn ensure_log_sink() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let Some(path) = config::get().log_path.as_deref() else {
            return;
        };
        if log::is_installed() {
            return;
        }
        let run_id = format!("fputs-ext-{}", std::process::id());
        if let Ok(emitter) = LogEmitter::to_file(path, &run_id) {
            log::install(emitter);
        }
    });
}

fn finish(result: Result<c_int, FputsError>) -> c_int {
    match result {
        Ok(rc) => {
            clear_last_error();
            rc
        }
        Err(err) => {
            set_last_error(&err);
            -1
        }
    }
}

/// Write the NUL-terminated `text` to the caller-owned `stream`.
///
/// Returns the non-negative `fputs` status, or `-1` with the last-error slot
/// set. The stream is never closed here.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fputs_ext_write(text: *const c_char, stream: *mut libc::FILE) -> c_int {
    ensure_log_sink();
    if text.is_null() {
        return finish(Err(FputsError::NullArgument { arg: "text" }));
    }
    // SAFETY: the caller hands over an open FILE* for the duration of the call.
    let Some(mut stream) = (unsafe { Stream::from_raw(stream) }) else {
        return finish(Err(FputsError::NullArgument { arg: "stream" }));
    };
    // SAFETY: `text` is non-null and NUL-terminated per the C contract.
    let text = unsafe { CStr::from_ptr(text) };
    finish(fputs_core::fputs_c_str(text, &mut stream))
}

/// Open `path` with mode `"w"`, write `text`, close.
///
/// Text shorter than `FPUTS_MIN_LEN` bytes (default 10) fails with
/// `StringTooShort` before the file is opened. `path` must be UTF-8.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fputs_ext_write_file(text: *const c_char, path: *const c_char) -> c_int {
    ensure_log_sink();
    if text.is_null() {
        return finish(Err(FputsError::NullArgument { arg: "text" }));
    }
    if path.is_null() {
        return finish(Err(FputsError::NullArgument { arg: "path" }));
    }
    // SAFETY: both pointers are non-null and NUL-terminated per the C contract.
    let (text, path) = unsafe { (CStr::from_ptr(text), CStr::from_ptr(path)) };
    let Ok(path) = path.to_str() else {
        return finish(Err(FputsError::InvalidUtf8 { arg: "path" }));
    };
    finish(fputs_core::write_file_with(
        text.to_bytes(),
        Path::new(path),
        config::get(),
    ))
}
