// All extern "C" exports take raw pointers from foreign callers; null checks
// happen at runtime, so per-function safety docs would be boilerplate.
#![allow(clippy::missing_safety_doc)]
//! # fputs-abi
//!
//! `extern "C"` boundary that a foreign runtime (ctypes, cffi, a hand-written
//! extension module) loads to reach the fputs binding.
//!
//! ```text
//! foreign caller -> ABI entry (this crate) -> fputs-core -> libc::fputs
//! ```
//!
//! Every entry point returns `-1` on failure and records the failure in a
//! thread-local slot. The foreign glue reads the slot back
//! (`fputs_ext_last_error_kind`, `fputs_ext_last_errno`,
//! `fputs_ext_last_error_message`) and raises its own exception type; success
//! values are the untouched native status.
//!
//! Symbols carry an `fputs_ext_` prefix so loading this library never shadows
//! the platform's own `fputs`.

pub mod error_abi;
pub mod fputs_abi;

pub use error_abi::{
    fputs_ext_clear_error, fputs_ext_last_errno, fputs_ext_last_error_kind,
    fputs_ext_last_error_message,
};
pub use fputs_abi::{FPUTS_FLAG, FPUTS_MACRO, fputs_ext_write, fputs_ext_write_file};
