//! `FILE*` wrappers.
//!
//! [`Stream`] borrows a caller-owned handle for the duration of a call and never
//! closes it. [`OwnedStream`] is the one place a handle is opened here, and it
//! always closes what it opened.

use std::ffi::{CStr, CString, c_int};
use std::marker::PhantomData;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;

use crate::error::FputsError;
use crate::status::last_errno;

/// Borrowed, non-null `FILE*`.
#[derive(Debug)]
pub struct Stream<'a> {
    ptr: NonNull<libc::FILE>,
    _owner: PhantomData<&'a mut libc::FILE>,
}

impl<'a> Stream<'a> {
    /// Wrap a raw handle. Returns `None` for null.
    ///
    /// # Safety
    ///
    /// `ptr` must be an open `FILE*` that stays open for `'a` and is not
    /// closed through any other path while borrowed.
    #[must_use]
    pub unsafe fn from_raw(ptr: *mut libc::FILE) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self {
            ptr,
            _owner: PhantomData,
        })
    }

    #[must_use]
    pub fn as_ptr(&self) -> *mut libc::FILE {
        self.ptr.as_ptr()
    }

    /// Raw `fputs` call. Returns the native code untouched.
    pub fn put_c_str(&mut self, text: &CStr) -> c_int {
        // SAFETY: `text` is NUL-terminated; `self.ptr` is open per `from_raw`.
        unsafe { libc::fputs(text.as_ptr(), self.ptr.as_ptr()) }
    }

    /// `fflush` the stream, surfacing buffered write errors.
    pub fn flush(&mut self) -> Result<(), FputsError> {
        // SAFETY: `self.ptr` is open per `from_raw`.
        let rc = unsafe { libc::fflush(self.ptr.as_ptr()) };
        if rc != 0 {
            return Err(FputsError::Flush { errno: last_errno() });
        }
        Ok(())
    }
}

/// `fopen` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// `"w"`: create or truncate.
    Write,
    /// `"a"`: create or append.
    Append,
    /// `"r"`: read only; writes through it fail.
    Read,
}

impl OpenMode {
    #[must_use]
    pub const fn as_c_str(self) -> &'static CStr {
        match self {
            Self::Write => c"w",
            Self::Append => c"a",
            Self::Read => c"r",
        }
    }
}

/// A stream opened (and closed) by this crate.
#[derive(Debug)]
pub struct OwnedStream {
    handle: FileHandle,
    path: PathBuf,
}

/// Sole owner of an fopen'd handle; closes it on drop.
#[derive(Debug)]
struct FileHandle(NonNull<libc::FILE>);

// SAFETY: the FILE is exclusively owned and stdio streams carry their own lock.
unsafe impl Send for FileHandle {}

impl FileHandle {
    fn close(self) -> c_int {
        let ptr = self.0;
        std::mem::forget(self);
        // SAFETY: `ptr` came from fopen; forgetting `self` skips the Drop close.
        unsafe { libc::fclose(ptr.as_ptr()) }
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        // SAFETY: `self.0` came from fopen and is closed exactly once.
        unsafe { libc::fclose(self.0.as_ptr()) };
    }
}

impl OwnedStream {
    /// `fopen` `path` with `mode`. Fails with `Open` carrying the errno.
    pub fn open(path: &Path, mode: OpenMode) -> Result<Self, FputsError> {
        let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|e| {
            FputsError::InteriorNul {
                position: e.nul_position(),
            }
        })?;
        // SAFETY: both arguments are NUL-terminated.
        let raw = unsafe { libc::fopen(c_path.as_ptr(), mode.as_c_str().as_ptr()) };
        match NonNull::new(raw) {
            Some(ptr) => Ok(Self {
                handle: FileHandle(ptr),
                path: path.to_path_buf(),
            }),
            None => Err(FputsError::Open {
                path: path.to_path_buf(),
                errno: last_errno(),
            }),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Borrow as a [`Stream`]. The borrow keeps the handle from being closed.
    pub fn as_stream(&mut self) -> Stream<'_> {
        Stream {
            ptr: self.handle.0,
            _owner: PhantomData,
        }
    }

    /// Close and report the result, including any deferred write error
    /// surfaced by the final flush.
    pub fn close(self) -> Result<(), FputsError> {
        if self.handle.close() != 0 {
            return Err(FputsError::Close { errno: last_errno() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static SEQ: AtomicU64 = AtomicU64::new(0);

    fn temp_path(prefix: &str) -> PathBuf {
        let seq = SEQ.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "fputs-core-{prefix}-{}-{seq}.txt",
            std::process::id()
        ))
    }

    #[test]
    fn null_handle_is_rejected() {
        // SAFETY: null is never dereferenced.
        assert!(unsafe { Stream::from_raw(std::ptr::null_mut()) }.is_none());
    }

    #[test]
    fn open_write_put_close() {
        let path = temp_path("put");
        let mut owned = OwnedStream::open(&path, OpenMode::Write).unwrap();
        assert_eq!(owned.path(), path.as_path());
        let rc = owned.as_stream().put_c_str(c"abc");
        assert!(rc >= 0);
        owned.as_stream().flush().unwrap();
        owned.close().unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"abc");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn append_mode_keeps_existing_bytes() {
        let path = temp_path("append");
        std::fs::write(&path, b"head:").unwrap();
        let mut owned = OwnedStream::open(&path, OpenMode::Append).unwrap();
        assert!(owned.as_stream().put_c_str(c"tail") >= 0);
        owned.close().unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"head:tail");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn drop_closes_and_flushes() {
        let path = temp_path("drop");
        {
            let mut owned = OwnedStream::open(&path, OpenMode::Write).unwrap();
            assert!(owned.as_stream().put_c_str(c"dropped") >= 0);
        }
        assert_eq!(std::fs::read(&path).unwrap(), b"dropped");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn open_missing_directory_reports_errno() {
        let path = std::env::temp_dir()
            .join("fputs-core-no-such-dir")
            .join("x.txt");
        let err = OwnedStream::open(&path, OpenMode::Write).unwrap_err();
        assert_eq!(
            err,
            FputsError::Open {
                path: path.clone(),
                errno: libc::ENOENT
            }
        );
    }
}
