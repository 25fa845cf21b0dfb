//! Integration test: ABI surface as a foreign loader sees it.
//!
//! Streams are opened with the platform `fopen` so the handles are exactly what
//! a foreign runtime would pass in.
//!
//! Run: cargo test -p fputs-abi --test fputs_abi_contract_test

use std::ffi::{CStr, CString, c_char};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use fputs_abi::{
    fputs_ext_last_errno, fputs_ext_last_error_kind, fputs_ext_last_error_message,
    fputs_ext_write, fputs_ext_write_file,
};
use fputs_core::ErrorKind;

static TEST_SEQ: AtomicU64 = AtomicU64::new(0);

fn temp_path(prefix: &str) -> PathBuf {
    let seq = TEST_SEQ.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "fputs-abi-{prefix}-{}-{seq}.txt",
        std::process::id()
    ))
}

fn c_path(path: &Path) -> CString {
    CString::new(path.to_str().expect("temp paths are UTF-8")).unwrap()
}

fn fopen(path: &Path, mode: &CStr) -> *mut libc::FILE {
    let p = c_path(path);
    // SAFETY: both arguments are NUL-terminated.
    let fp = unsafe { libc::fopen(p.as_ptr(), mode.as_ptr()) };
    assert!(!fp.is_null(), "fopen({}) failed", path.display());
    fp
}

fn fclose(fp: *mut libc::FILE) {
    // SAFETY: `fp` came from fopen in this test and is closed once.
    assert_eq!(unsafe { libc::fclose(fp) }, 0);
}

fn last_message() -> String {
    let mut buf = [0 as c_char; 256];
    // SAFETY: buffer length matches.
    unsafe { fputs_ext_last_error_message(buf.as_mut_ptr(), buf.len()) };
    // SAFETY: the call always NUL-terminates a non-empty buffer.
    unsafe { CStr::from_ptr(buf.as_ptr()) }
        .to_string_lossy()
        .into_owned()
}

#[test]
fn hello_lands_in_caller_stream() {
    let path = temp_path("hello");
    let fp = fopen(&path, c"w");
    // SAFETY: `fp` is open for writing.
    let rc = unsafe { fputs_ext_write(c"hello".as_ptr(), fp) };
    assert!(rc >= 0, "status should be non-negative, got {rc}");
    assert_eq!(fputs_ext_last_error_kind(), 0);
    fclose(fp);
    assert_eq!(std::fs::read(&path).unwrap(), b"hello");
    let _ = std::fs::remove_file(&path);
}

#[test]
fn empty_and_repeated_writes() {
    let path = temp_path("repeat");
    let fp = fopen(&path, c"w");
    // SAFETY: `fp` is open for writing.
    unsafe {
        assert!(fputs_ext_write(c"".as_ptr(), fp) >= 0);
        assert!(fputs_ext_write(c"twice".as_ptr(), fp) >= 0);
        assert!(fputs_ext_write(c"".as_ptr(), fp) >= 0);
        assert!(fputs_ext_write(c"twice".as_ptr(), fp) >= 0);
    }
    fclose(fp);
    assert_eq!(std::fs::read(&path).unwrap(), b"twicetwice");
    let _ = std::fs::remove_file(&path);
}

#[test]
fn stream_stays_open_after_call() {
    let path = temp_path("open");
    let fp = fopen(&path, c"w");
    // SAFETY: `fp` stays open across both calls; the binding must not close it.
    unsafe {
        assert!(fputs_ext_write(c"a".as_ptr(), fp) >= 0);
        assert_eq!(libc::fputc(b'b' as i32, fp), b'b' as i32);
    }
    fclose(fp);
    assert_eq!(std::fs::read(&path).unwrap(), b"ab");
    let _ = std::fs::remove_file(&path);
}

#[test]
fn read_only_stream_reports_write_failure() {
    let path = temp_path("ro");
    std::fs::write(&path, b"keep").unwrap();
    let fp = fopen(&path, c"r");
    // SAFETY: `fp` is open (read only).
    let rc = unsafe { fputs_ext_write(c"hello".as_ptr(), fp) };
    assert_eq!(rc, -1);
    assert_eq!(fputs_ext_last_error_kind(), ErrorKind::WriteFailed.code());
    #[cfg(target_env = "gnu")]
    assert_eq!(fputs_ext_last_errno(), libc::EBADF);
    assert!(last_message().starts_with("fputs failed"));
    fclose(fp);
    assert_eq!(std::fs::read(&path).unwrap(), b"keep");
    let _ = std::fs::remove_file(&path);
}

#[test]
fn success_clears_previous_error() {
    // SAFETY: null text is rejected before any dereference.
    assert_eq!(
        unsafe { fputs_ext_write(std::ptr::null(), std::ptr::null_mut()) },
        -1
    );
    assert_ne!(fputs_ext_last_error_kind(), 0);

    let path = temp_path("clear");
    let fp = fopen(&path, c"w");
    // SAFETY: `fp` is open for writing.
    assert!(unsafe { fputs_ext_write(c"ok".as_ptr(), fp) } >= 0);
    assert_eq!(fputs_ext_last_error_kind(), 0);
    assert_eq!(last_message(), "");
    fclose(fp);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn write_file_round_trip_and_floor() {
    let path = temp_path("file");
    let p = c_path(&path);

    // SAFETY: both arguments are NUL-terminated.
    let rc = unsafe { fputs_ext_write_file(c"short".as_ptr(), p.as_ptr()) };
    assert_eq!(rc, -1);
    assert_eq!(fputs_ext_last_error_kind(), ErrorKind::StringTooShort.code());
    assert!(last_message().starts_with("String length must be greater than 10!"));
    assert!(!path.exists());

    // SAFETY: both arguments are NUL-terminated.
    let rc = unsafe { fputs_ext_write_file(c"Real Python!".as_ptr(), p.as_ptr()) };
    assert!(rc >= 0);
    assert_eq!(std::fs::read(&path).unwrap(), b"Real Python!");
    let _ = std::fs::remove_file(&path);
}

#[test]
fn write_file_open_failure_carries_errno() {
    let path = std::env::temp_dir()
        .join("fputs-abi-missing-dir")
        .join("x.txt");
    let p = c_path(&path);
    // SAFETY: both arguments are NUL-terminated.
    let rc = unsafe { fputs_ext_write_file(c"0123456789".as_ptr(), p.as_ptr()) };
    assert_eq!(rc, -1);
    assert_eq!(fputs_ext_last_error_kind(), ErrorKind::Open.code());
    assert_eq!(fputs_ext_last_errno(), libc::ENOENT);
}
