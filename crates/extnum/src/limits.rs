//! Input limits for decoding untrusted records
//!
//! Exact literals expand into arbitrary-precision rationals, so a short
//! string such as `1e999999999` can demand unbounded memory. The codec checks
//! every input against a [`CodecLimits`] before parsing it.

use serde::Deserialize;

use crate::error::{ExtNumError, Result};

/// Configurable limits for the record codec
///
/// # Example
///
/// ```
/// use nebula_extnum::CodecLimits;
///
/// let limits = CodecLimits::default();
/// assert_eq!(limits.max_input_bytes, 1_000_000);
///
/// let strict = CodecLimits::strict();
/// assert!(strict.check_literal_len(10_000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodecLimits {
    /// Maximum size of an encoded record in bytes
    pub max_input_bytes: usize,

    /// Maximum length of a single numeric literal
    pub max_literal_len: usize,

    /// Maximum magnitude of a decimal exponent in an exact literal
    pub max_decimal_exponent: u32,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_input_bytes: 1_000_000,
            max_literal_len: 100_000,
            max_decimal_exponent: 10_000,
        }
    }
}

impl CodecLimits {
    /// Permissive limits for trusted environments
    pub fn permissive() -> Self {
        Self {
            max_input_bytes: 100_000_000,
            max_literal_len: 10_000_000,
            max_decimal_exponent: 100_000,
        }
    }

    /// Strict limits for untrusted input
    pub fn strict() -> Self {
        Self {
            max_input_bytes: 64_000,
            max_literal_len: 4_096,
            max_decimal_exponent: 1_024,
        }
    }

    /// No limits (use with caution!)
    pub const fn unlimited() -> Self {
        Self {
            max_input_bytes: usize::MAX,
            max_literal_len: usize::MAX,
            max_decimal_exponent: u32::MAX,
        }
    }

    /// Validate the size of a whole record
    #[inline]
    pub fn check_input_bytes(&self, bytes: usize) -> Result<()> {
        if bytes > self.max_input_bytes {
            tracing::debug!(bytes, max = self.max_input_bytes, "record rejected");
            Err(ExtNumError::limit_exceeded(
                "max_input_bytes",
                self.max_input_bytes,
                bytes,
            ))
        } else {
            Ok(())
        }
    }

    /// Validate the length of one literal
    #[inline]
    pub fn check_literal_len(&self, len: usize) -> Result<()> {
        if len > self.max_literal_len {
            tracing::debug!(len, max = self.max_literal_len, "literal rejected");
            Err(ExtNumError::limit_exceeded(
                "max_literal_len",
                self.max_literal_len,
                len,
            ))
        } else {
            Ok(())
        }
    }
}
