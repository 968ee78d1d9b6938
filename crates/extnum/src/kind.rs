//! The discriminant of an [`ExtNum`](crate::ExtNum).
//!
//! ```rust
//! use nebula_extnum::Kind;
//!
//! assert_eq!(Kind::Omega.name(), "OMEGA");
//! assert_eq!("complex".parse::<Kind>().unwrap(), Kind::Complex);
//! assert!(Kind::Real.is_finite());
//! ```

use core::fmt::{Display, Formatter};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtNumError;

/// Represents the kind of an ExtNum
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Kind {
    Real,
    Complex,
    Omega,
    Bottom,
}

impl Kind {
    /// Get all available kinds
    pub const fn all() -> [Self; 4] {
        [Self::Real, Self::Complex, Self::Omega, Self::Bottom]
    }

    /// REAL and COMPLEX carry an ordinary finite payload
    pub const fn is_finite(&self) -> bool {
        matches!(self, Self::Real | Self::Complex)
    }

    /// Name used in serialized records
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Real => "REAL",
            Self::Complex => "COMPLEX",
            Self::Omega => "OMEGA",
            Self::Bottom => "BOTTOM",
        }
    }
}

impl FromStr for Kind {
    type Err = ExtNumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ExtNumError::parse("kind", s))
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
