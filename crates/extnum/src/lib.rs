//! # nebula-extnum
//!
//! A closed extended numeric algebra. One value type, [`ExtNum`], covers
//! finite reals, finite complexes, directional infinities `Ω(d)` and the
//! absorbing undefined value ⊥. Division by zero, indeterminate forms and
//! unrepresentable results never raise; they map to Ω or ⊥.
//!
//! Each value is either exact (arbitrary-precision rational) or float
//! (`f64`), chosen per value and inherited from the left operand of every
//! binary operation.
//!
//! ```
//! use nebula_extnum::prelude::*;
//!
//! let a = ExtNum::real(2, Precision::Exact);
//! let w = a.div(0);
//! assert_eq!(w.to_string(), "Ω(2)");
//! assert!(w.sub(&w)?.equals(0));
//!
//! let json = w.encode()?;
//! assert_eq!(ExtNum::decode(&json)?, w);
//! # Ok::<(), ExtNumError>(())
//! ```

pub mod cmp;
pub mod codec;
pub mod coerce;
pub mod error;
pub mod func;
pub mod kind;
pub mod limits;
pub mod ops;
pub mod precision;
pub mod scalar;
pub mod value;

pub use coerce::Operand;
pub use error::{ExtNumError, Result};
pub use kind::Kind;
pub use limits::CodecLimits;
pub use ops::safe_div;
pub use precision::Precision;
pub use scalar::{Real, Scalar};
pub use value::{ExtNum, bottom, omega};

// Payload numeric types, re-exported so callers need not pin the num crates
pub use num_bigint::BigInt;
pub use num_complex::Complex64;
pub use num_rational::BigRational;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        CodecLimits, ExtNum, ExtNumError, Kind, Operand, Precision, Real, Scalar, bottom, omega,
        safe_div,
    };
    pub use crate::{BigInt, BigRational, Complex64};
}
