//! ExtNum Error Types
//!
//! Expected algebraic indeterminacy (`0/0`, `Ω - Ω` with different
//! directions, ...) is never an error: it is a value, usually ⊥. The variants
//! below are reserved for programming errors and malformed input.

use thiserror::Error;

// ============================================================================
// MAIN ERROR TYPE
// ============================================================================

/// Errors raised by construction, coercion, arithmetic and the codec
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtNumError {
    /// An OMEGA built from a zero (or otherwise invalid) direction
    #[error("Construction error: {reason}")]
    Construction { reason: String },

    /// Operand or exponent of a type the algebra does not accept
    #[error("Type error: cannot {operation} with {operand}")]
    Type { operation: String, operand: String },

    /// Operation undefined for this combination of kinds
    #[error("Domain error: {operation} is undefined for {operands}")]
    Domain { operation: String, operands: String },

    /// Malformed serialized input
    #[error("Parse error: invalid {what}: {input}")]
    Parse { what: String, input: String },

    /// Codec limit exceeded
    #[error("{limit} exceeded: {actual} > {max}")]
    LimitExceeded {
        limit: String,
        max: usize,
        actual: usize,
    },
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ExtNumError {
    /// Create a construction error
    pub fn construction(reason: impl Into<String>) -> Self {
        Self::Construction {
            reason: reason.into(),
        }
    }

    /// Create a type error
    pub fn unsupported_type(operation: impl Into<String>, operand: impl Into<String>) -> Self {
        Self::Type {
            operation: operation.into(),
            operand: operand.into(),
        }
    }

    /// Create a domain error
    pub fn domain(operation: impl Into<String>, operands: impl Into<String>) -> Self {
        Self::Domain {
            operation: operation.into(),
            operands: operands.into(),
        }
    }

    /// Create a parse error
    pub fn parse(what: impl Into<String>, input: impl Into<String>) -> Self {
        Self::Parse {
            what: what.into(),
            input: input.into(),
        }
    }

    /// Create a limit exceeded error
    pub fn limit_exceeded(limit: impl Into<String>, max: usize, actual: usize) -> Self {
        Self::LimitExceeded {
            limit: limit.into(),
            max,
            actual,
        }
    }
}

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

impl ExtNumError {
    /// Get error code for monitoring
    pub fn code(&self) -> &'static str {
        match self {
            Self::Construction { .. } => "EXTNUM_CONSTRUCTION",
            Self::Type { .. } => "EXTNUM_TYPE",
            Self::Domain { .. } => "EXTNUM_DOMAIN",
            Self::Parse { .. } => "EXTNUM_PARSE",
            Self::LimitExceeded { .. } => "EXTNUM_LIMIT_EXCEEDED",
        }
    }

    /// Check if the error was caused by untrusted input rather than by the
    /// calling code
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::LimitExceeded { .. })
    }
}

// ============================================================================
// EXTERNAL ERROR CONVERSIONS
// ============================================================================

/// Malformed JSON or an unknown kind name in a serialized record
impl From<serde_json::Error> for ExtNumError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse("record", error.to_string())
    }
}

/// Result type alias for extended number operations
pub type Result<T> = std::result::Result<T, ExtNumError>;
