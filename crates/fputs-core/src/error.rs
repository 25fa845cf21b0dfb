//! Error taxonomy for the binding.
//!
//! [`FputsError::WriteFailed`] is the native failure (the `EOF` sentinel). The
//! remaining variants come from marshaling arguments and from the file-path
//! convenience wrapper.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FputsError {
    /// `fputs` returned `EOF`.
    #[error("fputs failed (errno {errno})")]
    WriteFailed { errno: i32 },
    /// Text cannot be passed as a C string.
    #[error("text contains an interior NUL byte at offset {position}")]
    InteriorNul { position: usize },
    /// A required pointer was null at the ABI.
    #[error("null {arg} pointer")]
    NullArgument { arg: &'static str },
    #[error("{arg} is not valid UTF-8")]
    InvalidUtf8 { arg: &'static str },
    /// Text below the file writer's minimum length.
    #[error("String length must be greater than {min}! (got {len})")]
    StringTooShort { len: usize, min: usize },
    #[error("fopen({}) failed (errno {errno})", path.display())]
    Open { path: PathBuf, errno: i32 },
    /// Flush after a successful write failed (`FPUTS_FLUSH`).
    #[error("fflush failed (errno {errno})")]
    Flush { errno: i32 },
    /// `fclose` failed; this includes a deferred write error from the final flush.
    #[error("fclose failed (errno {errno})")]
    Close { errno: i32 },
}

/// Stable numeric codes for foreign callers.
///
/// Zero is reserved so a cleared last-error slot reads as `NoError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorKind {
    NoError = 0,
    WriteFailed = 1,
    InteriorNul = 2,
    NullArgument = 3,
    InvalidUtf8 = 4,
    StringTooShort = 5,
    Open = 6,
    Flush = 7,
    Close = 8,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::NoError,
            1 => Self::WriteFailed,
            2 => Self::InteriorNul,
            3 => Self::NullArgument,
            4 => Self::InvalidUtf8,
            5 => Self::StringTooShort,
            6 => Self::Open,
            7 => Self::Flush,
            8 => Self::Close,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoError => "none",
            Self::WriteFailed => "write_failed",
            Self::InteriorNul => "interior_nul",
            Self::NullArgument => "null_argument",
            Self::InvalidUtf8 => "invalid_utf8",
            Self::StringTooShort => "string_too_short",
            Self::Open => "open",
            Self::Flush => "flush",
            Self::Close => "close",
        }
    }
}

impl FputsError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::WriteFailed { .. } => ErrorKind::WriteFailed,
            Self::InteriorNul { .. } => ErrorKind::InteriorNul,
            Self::NullArgument { .. } => ErrorKind::NullArgument,
            Self::InvalidUtf8 { .. } => ErrorKind::InvalidUtf8,
            Self::StringTooShort { .. } => ErrorKind::StringTooShort,
            Self::Open { .. } => ErrorKind::Open,
            Self::Flush { .. } => ErrorKind::Flush,
            Self::Close { .. } => ErrorKind::Close,
        }
    }

    /// errno observed right after the failing native call, if one was involved.
    #[must_use]
    pub const fn errno(&self) -> Option<i32> {
        match self {
            Self::WriteFailed { errno }
            | Self::Open { errno, .. }
            | Self::Flush { errno }
            | Self::Close { errno } => Some(*errno),
            _ => None,
        }
    }
}

impl From<FputsError> for std::io::Error {
    fn from(err: FputsError) -> Self {
        match err.errno() {
            Some(errno) if errno != 0 => std::io::Error::from_raw_os_error(errno),
            _ => std::io::Error::new(std::io::ErrorKind::InvalidInput, err),
        }
    }
}
