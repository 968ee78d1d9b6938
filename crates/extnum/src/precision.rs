//! Precision mode carried by every ExtNum

use serde::{Deserialize, Serialize};

/// Arithmetic precision of a value.
///
/// Fixed at construction. Binary operations take the left operand's mode.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// Arbitrary-precision rationals
    #[default]
    Exact,
    /// IEEE 754 doubles
    Float,
}

impl Precision {
    /// Map the `use_float` wire flag to a mode
    pub const fn from_use_float(use_float: bool) -> Self {
        if use_float { Self::Float } else { Self::Exact }
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float)
    }

    /// The `use_float` wire flag
    pub const fn use_float(&self) -> bool {
        self.is_float()
    }
}

impl From<bool> for Precision {
    fn from(use_float: bool) -> Self {
        Self::from_use_float(use_float)
    }
}
