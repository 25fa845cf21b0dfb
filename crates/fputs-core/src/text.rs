//! Text marshaling for the native call.

use std::ffi::CString;

use crate::error::FputsError;

/// Convert bytes into a NUL-terminated string.
///
/// An interior NUL would silently truncate the write on the C side, so it is
/// rejected with its offset.
pub fn to_c_text(text: &[u8]) -> Result<CString, FputsError> {
    CString::new(text).map_err(|e| FputsError::InteriorNul {
        position: e.nul_position(),
    })
}

/// Reject text shorter than `min` bytes.
pub fn check_min_len(text: &[u8], min: usize) -> Result<(), FputsError> {
    if text.len() < min {
        return Err(FputsError::StringTooShort {
            len: text.len(),
            min,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_converts() {
        let c = to_c_text(b"hello").unwrap();
        assert_eq!(c.as_bytes(), b"hello");
        assert_eq!(c.as_bytes_with_nul(), b"hello\0");
    }

    #[test]
    fn empty_text_converts() {
        assert_eq!(to_c_text(b"").unwrap().as_bytes(), b"");
    }

    #[test]
    fn interior_nul_reports_offset() {
        assert_eq!(
            to_c_text(b"ab\0cd"),
            Err(FputsError::InteriorNul { position: 2 })
        );
    }

    #[test]
    fn min_len_is_inclusive() {
        assert!(check_min_len(b"0123456789", 10).is_ok());
        assert_eq!(
            check_min_len(b"012345678", 10),
            Err(FputsError::StringTooShort { len: 9, min: 10 })
        );
        assert!(check_min_len(b"", 0).is_ok());
    }

    #[test]
    fn min_len_counts_bytes_not_chars() {
        // 5 chars, 10 bytes
        assert!(check_min_len("ééééé".as_bytes(), 10).is_ok());
    }
}
