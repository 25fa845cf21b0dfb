//! # fputs-core
//!
//! Safe Rust surface for the C library `fputs` call.
//!
//! The crate wraps the native call in the usual fallible-call shape: marshal the
//! text into a NUL-terminated string, invoke `libc::fputs` on a borrowed
//! `FILE*`, check the `EOF` sentinel and hand back a `Result`. No `unsafe` code
//! is permitted outside [`stream`], which owns every raw `FILE*` access.
//!
//! ```text
//! &str / &[u8] -> text::to_c_text -> Stream::put_c_str (libc::fputs) -> status::check_status -> Result
//! ```

#![deny(unsafe_code)]

pub mod binding;
pub mod config;
pub mod error;
pub mod log;
pub mod status;
#[allow(unsafe_code)]
pub mod stream;
pub mod text;

pub use binding::{fputs, fputs_bytes, fputs_c_str, write_file, write_file_with};
pub use config::Config;
pub use error::{ErrorKind, FputsError};
pub use stream::{OpenMode, OwnedStream, Stream};

/// Integer flag exported alongside the binding.
pub const FPUTS_FLAG: i32 = 64;

/// Second integer constant exported alongside the binding.
pub const FPUTS_MACRO: i32 = 256;
