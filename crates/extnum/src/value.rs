//! The extended number type
//!
//! An [`ExtNum`] is exactly one of four kinds:
//!
//! | Kind      | Payload                                   |
//! |-----------|-------------------------------------------|
//! | `REAL`    | [`Real`]: rational (exact) or double      |
//! | `COMPLEX` | `Complex64`, in both precision modes      |
//! | `OMEGA`   | nonzero [`Scalar`] direction              |
//! | `BOTTOM`  | none                                      |
//!
//! Every value also carries its [`Precision`]. Values are immutable; every
//! operation returns a new one.

use core::fmt;

use num_complex::Complex64;
use num_rational::BigRational;

use crate::error::{ExtNumError, Result};
use crate::kind::Kind;
use crate::precision::Precision;
use crate::scalar::{Real, Scalar, fmt_complex};

/// Closed payload enum; only this crate can build one, so the kind tag and
/// the payload type can never disagree.
#[derive(Debug, Clone)]
pub(crate) enum Repr {
    Real(Real),
    Complex(Complex64),
    Omega(Scalar),
    Bottom,
}

/// Extended number: finite real, finite complex, directional infinity Ω, or ⊥
///
/// # Examples
///
/// ```
/// use nebula_extnum::{ExtNum, Precision};
///
/// let two = ExtNum::real(2, Precision::Exact);
/// let zero = ExtNum::real(0, Precision::Exact);
///
/// let inf = two.div(&zero);
/// assert!(inf.is_infinite());
/// assert_eq!(inf.to_string(), "Ω(2)");
///
/// assert!(zero.div(&zero).is_undefined());
/// ```
#[derive(Debug, Clone)]
pub struct ExtNum {
    pub(crate) repr: Repr,
    pub(crate) precision: Precision,
}

impl ExtNum {
    // ==================== Constructors ====================

    /// REAL value; the payload is converted to the requested mode.
    ///
    /// Exact mode cannot hold a non-finite double: `±inf` becomes `Ω(±1)` and
    /// NaN becomes ⊥.
    pub fn real(x: impl Into<Real>, precision: Precision) -> Self {
        Self::from_real(x.into(), precision)
    }

    /// COMPLEX value. Both parts are doubles regardless of `precision`.
    pub fn complex(re: impl Into<Real>, im: impl Into<Real>, precision: Precision) -> Self {
        Self::from_complex(
            Complex64::new(re.into().to_f64(), im.into().to_f64()),
            precision,
        )
    }

    /// COMPLEX value with a zero imaginary part
    pub fn complex_real(re: impl Into<Real>, precision: Precision) -> Self {
        Self::complex(re, 0, precision)
    }

    /// OMEGA with the given direction.
    ///
    /// Fails for a zero direction (use [`ExtNum::bottom`]) and for directions
    /// that are not numbers at all (NaN, or a non-finite double in exact mode).
    pub fn omega(direction: impl Into<Scalar>, precision: Precision) -> Result<Self> {
        let direction = direction.into();
        if direction.is_zero() {
            return Err(ExtNumError::construction(
                "Ω(0) is undefined; use bottom()",
            ));
        }
        Self::normalize_direction(direction, precision)
            .map(|direction| Self {
                repr: Repr::Omega(direction),
                precision,
            })
            .ok_or_else(|| ExtNumError::construction("Ω direction must be a finite number"))
    }

    /// The undefined value ⊥
    pub const fn bottom() -> Self {
        Self {
            repr: Repr::Bottom,
            precision: Precision::Exact,
        }
    }

    pub fn zero(precision: Precision) -> Self {
        Self::from_real(Real::zero(precision), precision)
    }

    pub fn one(precision: Precision) -> Self {
        Self::from_real(Real::one(precision), precision)
    }

    pub(crate) fn from_complex(value: Complex64, precision: Precision) -> Self {
        Self {
            repr: Repr::Complex(value),
            precision,
        }
    }

    /// REAL in `precision`, mapping what exact mode cannot represent
    pub(crate) fn from_real(value: Real, precision: Precision) -> Self {
        let value = match (value, precision) {
            (exact @ Real::Exact(_), Precision::Float) => Real::Float(exact.to_f64()),
            (Real::Float(f), Precision::Exact) => match BigRational::from_float(f) {
                Some(r) => Real::Exact(r),
                None if f.is_nan() => {
                    tracing::trace!("NaN has no exact value, degrading to ⊥");
                    return Self::bottom();
                }
                None => {
                    tracing::trace!(value = f, "infinite result in exact mode, mapping to Ω");
                    let sign = if f > 0.0 { 1 } else { -1 };
                    return Self {
                        repr: Repr::Omega(Scalar::Real(Real::from_i64(sign, precision))),
                        precision,
                    };
                }
            },
            (value, _) => value,
        };
        Self {
            repr: Repr::Real(value),
            precision,
        }
    }

    pub(crate) fn from_scalar(value: Scalar, precision: Precision) -> Self {
        match value {
            Scalar::Real(r) => Self::from_real(r, precision),
            Scalar::Complex(c) => Self::from_complex(c, precision),
        }
    }

    /// OMEGA from a computed direction; directions that are zero or not
    /// representable collapse to ⊥.
    pub(crate) fn omega_or_bottom(direction: Scalar, precision: Precision) -> Self {
        if direction.is_zero() {
            tracing::trace!("Ω direction vanished, degrading to ⊥");
            return Self::bottom();
        }
        match Self::normalize_direction(direction, precision) {
            Some(direction) => Self {
                repr: Repr::Omega(direction),
                precision,
            },
            None => {
                tracing::trace!("Ω direction is not a number, degrading to ⊥");
                Self::bottom()
            }
        }
    }

    /// Put a real direction into `precision`; `None` if it is not a number
    fn normalize_direction(direction: Scalar, precision: Precision) -> Option<Scalar> {
        if direction.is_nan() {
            return None;
        }
        match direction {
            Scalar::Real(r) => r.with_precision(precision).map(Scalar::Real),
            complex @ Scalar::Complex(_) => Some(complex),
        }
    }

    // ==================== Accessors ====================

    pub fn kind(&self) -> Kind {
        match self.repr {
            Repr::Real(_) => Kind::Real,
            Repr::Complex(_) => Kind::Complex,
            Repr::Omega(_) => Kind::Omega,
            Repr::Bottom => Kind::Bottom,
        }
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn use_float(&self) -> bool {
        self.precision.use_float()
    }

    pub fn as_real(&self) -> Option<&Real> {
        match &self.repr {
            Repr::Real(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<Complex64> {
        match self.repr {
            Repr::Complex(c) => Some(c),
            _ => None,
        }
    }

    /// The direction (subscript) of an OMEGA
    pub fn direction(&self) -> Option<&Scalar> {
        match &self.repr {
            Repr::Omega(d) => Some(d),
            _ => None,
        }
    }

    /// Payload of any kind but ⊥
    pub fn payload(&self) -> Option<Scalar> {
        match &self.repr {
            Repr::Real(r) => Some(Scalar::Real(r.clone())),
            Repr::Complex(c) => Some(Scalar::Complex(*c)),
            Repr::Omega(d) => Some(d.clone()),
            Repr::Bottom => None,
        }
    }

    /// REAL or COMPLEX
    pub fn is_finite(&self) -> bool {
        self.kind().is_finite()
    }

    /// OMEGA
    pub fn is_infinite(&self) -> bool {
        matches!(self.repr, Repr::Omega(_))
    }

    /// BOTTOM
    pub fn is_undefined(&self) -> bool {
        matches!(self.repr, Repr::Bottom)
    }

    /// REAL or COMPLEX with a zero payload
    pub(crate) fn is_finite_zero(&self) -> bool {
        match &self.repr {
            Repr::Real(r) => r.is_zero(),
            Repr::Complex(c) => c.re == 0.0 && c.im == 0.0,
            Repr::Omega(_) | Repr::Bottom => false,
        }
    }

    /// ⊥ is false, Ω is true, finite values are true iff nonzero
    pub fn is_truthy(&self) -> bool {
        match &self.repr {
            Repr::Bottom => false,
            Repr::Omega(_) => true,
            Repr::Real(_) | Repr::Complex(_) => !self.is_finite_zero(),
        }
    }
}

// ==================== Convenience functions ====================

/// `Ω(direction)`, see [`ExtNum::omega`]
pub fn omega(direction: impl Into<Scalar>, precision: Precision) -> Result<ExtNum> {
    ExtNum::omega(direction, precision)
}

/// ⊥
pub const fn bottom() -> ExtNum {
    ExtNum::bottom()
}

impl fmt::Display for ExtNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Real(r) => write!(f, "{r}"),
            Repr::Complex(c) => fmt_complex(*c, f),
            Repr::Omega(d) => write!(f, "Ω({d})"),
            Repr::Bottom => write!(f, "⊥"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(ExtNum::real(3, Precision::Exact).kind(), Kind::Real);
        assert_eq!(ExtNum::complex(1, 2, Precision::Exact).kind(), Kind::Complex);
        assert_eq!(ExtNum::omega(2, Precision::Exact).unwrap().kind(), Kind::Omega);
        assert_eq!(ExtNum::bottom().kind(), Kind::Bottom);
    }

    #[test]
    fn test_complex_real_stays_complex() {
        let c = ExtNum::complex_real(2.5, Precision::Float);
        assert_eq!(c.kind(), Kind::Complex);
        assert_eq!(c, ExtNum::complex(2.5, 0, Precision::Float));
        assert_eq!(c.as_complex(), Some(Complex64::new(2.5, 0.0)));
    }

    #[test]
    fn test_real_follows_precision() {
        let exact = ExtNum::real(1.5, Precision::Exact);
        assert!(matches!(exact.as_real(), Some(Real::Exact(_))));
        assert_eq!(exact.to_string(), "3/2");

        let float = ExtNum::real(3, Precision::Float);
        assert_eq!(float.as_real(), Some(&Real::Float(3.0)));
        assert_eq!(float.to_string(), "3.0");
    }

    #[test]
    fn test_non_finite_in_exact_mode() {
        let inf = ExtNum::real(f64::INFINITY, Precision::Exact);
        assert!(inf.is_infinite());
        assert_eq!(inf.to_string(), "Ω(1)");

        assert!(ExtNum::real(f64::NAN, Precision::Exact).is_undefined());
        assert_eq!(
            ExtNum::real(f64::NEG_INFINITY, Precision::Float).as_real(),
            Some(&Real::Float(f64::NEG_INFINITY))
        );
    }

    #[test]
    fn test_omega_rejects_zero() {
        for precision in [Precision::Exact, Precision::Float] {
            let err = ExtNum::omega(0, precision).unwrap_err();
            assert!(matches!(err, ExtNumError::Construction { .. }));
            assert!(ExtNum::omega(0.0, precision).is_err());
            assert!(ExtNum::omega(Complex64::new(0.0, 0.0), precision).is_err());
        }
        assert!(ExtNum::omega(f64::NAN, Precision::Float).is_err());
        assert!(ExtNum::omega(f64::INFINITY, Precision::Exact).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ExtNum::complex(1, 1, Precision::Exact).to_string(), "1.0+1.0i");
        assert_eq!(ExtNum::complex(2, 0, Precision::Exact).to_string(), "2.0");
        assert_eq!(ExtNum::omega(-2, Precision::Exact).unwrap().to_string(), "Ω(-2)");
        assert_eq!(
            ExtNum::omega(Complex64::new(0.0, 1.0), Precision::Float)
                .unwrap()
                .to_string(),
            "Ω(0.0+1.0i)"
        );
        assert_eq!(ExtNum::bottom().to_string(), "⊥");
    }

    #[test]
    fn test_truthiness() {
        assert!(!ExtNum::bottom().is_truthy());
        assert!(ExtNum::omega(1, Precision::Exact).unwrap().is_truthy());
        assert!(!ExtNum::real(0, Precision::Exact).is_truthy());
        assert!(ExtNum::real(-1, Precision::Float).is_truthy());
        assert!(!ExtNum::complex(0, 0, Precision::Float).is_truthy());
        assert!(ExtNum::complex(0, 1, Precision::Float).is_truthy());
    }

    #[test]
    fn test_predicates() {
        let omega = ExtNum::omega(3, Precision::Exact).unwrap();
        assert!(omega.is_infinite());
        assert!(!omega.is_finite());
        assert_eq!(omega.direction(), Some(&Scalar::from(3)));
        assert_eq!(ExtNum::real(3, Precision::Exact).direction(), None);
        assert!(ExtNum::complex(1, 0, Precision::Exact).is_finite());
        assert!(bottom().is_undefined());
    }
}
