//! Thread-local last-error slot.
//!
//! Plays the role errno plays for libc: set by a failing entry point, cleared
//! by a succeeding one, never shared between threads.

use std::cell::RefCell;
use std::ffi::{CString, c_char, c_int};

use fputs_core::{ErrorKind, FputsError};

struct LastError {
    kind: ErrorKind,
    errno: c_int,
    message: CString,
}

thread_local! {
    static LAST_ERROR: RefCell<Option<LastError>> = const { RefCell::new(None) };
}

pub(crate) fn set_last_error(err: &FputsError) {
    // Only an Open path can smuggle a NUL into the message.
    let message = CString::new(err.to_string()).unwrap_or_else(|_| c"fputs error".to_owned());
    let record = LastError {
        kind: err.kind(),
        errno: err.errno().unwrap_or(0),
        message,
    };
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(record));
}

pub(crate) fn clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

/// `ErrorKind` code of the last failure on this thread (0 when none).
#[unsafe(no_mangle)]
pub extern "C" fn fputs_ext_last_error_kind() -> c_int {
    LAST_ERROR.with(|slot| {
        slot.borrow()
            .as_ref()
            .map_or(ErrorKind::NoError.code(), |e| e.kind.code())
    })
}

/// errno captured with the last failure on this thread (0 when none).
#[unsafe(no_mangle)]
pub extern "C" fn fputs_ext_last_errno() -> c_int {
    LAST_ERROR.with(|slot| slot.borrow().as_ref().map_or(0, |e| e.errno))
}

/// Copy the last error message into `buf` (always NUL-terminated when
/// `len > 0`, truncated if needed). Returns the full message length without
/// the terminator, or 0 when there is no error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fputs_ext_last_error_message(buf: *mut c_char, len: usize) -> usize {
    LAST_ERROR.with(|slot| {
        let slot = slot.borrow();
        let Some(err) = slot.as_ref() else {
            if !buf.is_null() && len > 0 {
                // SAFETY: caller provides `len` writable bytes at `buf`.
                unsafe { *buf = 0 };
            }
            return 0;
        };
        let bytes = err.message.as_bytes();
        if !buf.is_null() && len > 0 {
            let n = bytes.len().min(len - 1);
            // SAFETY: caller provides `len` writable bytes; n + 1 <= len.
            unsafe {
                std::ptr::copy_nonoverlapping(bytes.as_ptr().cast::<c_char>(), buf, n);
                *buf.add(n) = 0;
            }
        }
        bytes.len()
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn fputs_ext_clear_error() {
    clear_last_error();
}
