//! Arithmetic over all kind combinations
//!
//! ⊥ absorbs every binary operation. Results take the left operand's
//! precision, except where a float exponent forces floating point.

use core::ops::Neg;

use num_bigint::BigInt;
use num_complex::Complex64;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::coerce::Operand;
use crate::error::{ExtNumError, Result};
use crate::precision::Precision;
use crate::scalar::{Real, Scalar};
use crate::value::{ExtNum, Repr};

#[derive(Clone, Copy, PartialEq, Eq)]
enum AddOp {
    Add,
    Sub,
}

impl ExtNum {
    // ==================== Additive ====================

    /// `self + rhs`
    ///
    /// REAL + COMPLEX has no coercion path and is a domain error.
    pub fn add(&self, rhs: impl Into<Operand>) -> Result<ExtNum> {
        let rhs = self.coerce(rhs);
        self.add_sub(&rhs, AddOp::Add)
    }

    /// `self - rhs`
    pub fn sub(&self, rhs: impl Into<Operand>) -> Result<ExtNum> {
        let rhs = self.coerce(rhs);
        self.add_sub(&rhs, AddOp::Sub)
    }

    /// `lhs + self`, coercing `lhs` with this value's precision
    pub fn radd(&self, lhs: impl Into<Operand>) -> Result<ExtNum> {
        self.coerce(lhs).add(self)
    }

    /// `lhs - self`
    pub fn rsub(&self, lhs: impl Into<Operand>) -> Result<ExtNum> {
        self.coerce(lhs).sub(self)
    }

    fn add_sub(&self, rhs: &ExtNum, op: AddOp) -> Result<ExtNum> {
        let precision = self.precision;
        match (&self.repr, &rhs.repr) {
            (Repr::Bottom, _) | (_, Repr::Bottom) => Ok(ExtNum::bottom()),

            (Repr::Real(a), Repr::Real(b)) => {
                let value = match op {
                    AddOp::Add => a.add(b, precision),
                    AddOp::Sub => a.sub(b, precision),
                };
                Ok(ExtNum::from_real(value, precision))
            }

            (Repr::Complex(a), Repr::Complex(b)) => {
                let value = match op {
                    AddOp::Add => a + b,
                    AddOp::Sub => a - b,
                };
                Ok(ExtNum::from_complex(value, precision))
            }

            (Repr::Omega(a), Repr::Omega(b)) => {
                if op == AddOp::Sub && a.numeric_eq(b) {
                    tracing::trace!(direction = %a, "Ω - Ω cancels");
                    return Ok(ExtNum::zero(precision));
                }
                // Larger magnitude wins; a tie keeps the left direction.
                if a.cmp_magnitude(b).is_ge() {
                    Ok(ExtNum::omega_or_bottom(a.clone(), precision))
                } else {
                    Ok(ExtNum::omega_or_bottom(signed(b, op), precision))
                }
            }

            (Repr::Omega(a), _) => Ok(ExtNum::omega_or_bottom(a.clone(), precision)),

            (_, Repr::Omega(b)) => Ok(ExtNum::omega_or_bottom(signed(b, op), precision)),

            (Repr::Real(_), Repr::Complex(_)) | (Repr::Complex(_), Repr::Real(_)) => {
                Err(ExtNumError::domain(
                    match op {
                        AddOp::Add => "add",
                        AddOp::Sub => "subtract",
                    },
                    format!("{} and {}", self.kind(), rhs.kind()),
                ))
            }
        }
    }

    // ==================== Multiplicative ====================

    /// `self * rhs`
    ///
    /// A finite zero on either side gives REAL zero, even against Ω.
    /// Otherwise Ω on either side gives Ω with the product of both payloads
    /// as its direction.
    pub fn mul(&self, rhs: impl Into<Operand>) -> ExtNum {
        let rhs = self.coerce(rhs);
        let precision = self.precision;
        let (Some(a), Some(b)) = (self.payload(), rhs.payload()) else {
            return ExtNum::bottom();
        };
        if self.is_finite_zero() || rhs.is_finite_zero() {
            if self.is_infinite() || rhs.is_infinite() {
                tracing::trace!("0 × Ω taken as 0");
            }
            return ExtNum::zero(precision);
        }
        let product = a.mul(&b, precision);
        if self.is_infinite() || rhs.is_infinite() {
            ExtNum::omega_or_bottom(product, precision)
        } else {
            ExtNum::from_scalar(product, precision)
        }
    }

    /// `self / rhs`
    ///
    /// `0/0` is ⊥ and `x/0` is `Ω(x)`. With Ω on either side the direction
    /// is the symbolic quotient of the payloads, not a numeric limit.
    pub fn div(&self, rhs: impl Into<Operand>) -> ExtNum {
        let rhs = self.coerce(rhs);
        let precision = self.precision;
        let (Some(a), Some(b)) = (self.payload(), rhs.payload()) else {
            return ExtNum::bottom();
        };
        if rhs.is_finite_zero() {
            if self.is_finite_zero() {
                tracing::trace!("0/0 is ⊥");
                return ExtNum::bottom();
            }
            return ExtNum::omega_or_bottom(a, precision);
        }
        let quotient = a.div(&b, precision);
        if self.is_infinite() || rhs.is_infinite() {
            ExtNum::omega_or_bottom(quotient, precision)
        } else {
            ExtNum::from_scalar(quotient, precision)
        }
    }

    /// `lhs * self`
    pub fn rmul(&self, lhs: impl Into<Operand>) -> ExtNum {
        self.coerce(lhs).mul(self)
    }

    /// `lhs / self`
    pub fn rdiv(&self, lhs: impl Into<Operand>) -> ExtNum {
        self.coerce(lhs).div(self)
    }

    // ==================== Exponentiation ====================

    /// `self ** exponent`
    ///
    /// Integer exponents keep the kind and precision (`x**0` is 1, `0**0` is
    /// ⊥, `x**-n` is `1 / x**n`). A float exponent is only defined for REAL
    /// bases and always yields float precision: COMPLEX on the principal
    /// branch for a negative base, REAL otherwise. Any other exponent type is
    /// a type error.
    pub fn pow(&self, exponent: impl Into<Operand>) -> Result<ExtNum> {
        match exponent.into() {
            Operand::Int(n) => self.pow_int(&n),
            Operand::Float(e) => self.pow_float(e),
            other => Err(ExtNumError::unsupported_type(
                format!("raise {} to a power", self.kind()),
                format!("{} exponent", other.type_name()),
            )),
        }
    }

    fn pow_float(&self, e: f64) -> Result<ExtNum> {
        match &self.repr {
            Repr::Bottom => Ok(ExtNum::bottom()),
            Repr::Real(base) => {
                let base = base.to_f64();
                if base < 0.0 {
                    let value = (Complex64::new(base, 0.0).ln() * e).exp();
                    Ok(ExtNum::from_complex(value, Precision::Float))
                } else {
                    Ok(ExtNum::from_real(Real::Float(base.powf(e)), Precision::Float))
                }
            }
            Repr::Complex(_) | Repr::Omega(_) => Err(ExtNumError::unsupported_type(
                format!("raise {} to a power", self.kind()),
                "float exponent",
            )),
        }
    }

    fn pow_int(&self, n: &BigInt) -> Result<ExtNum> {
        let precision = self.precision;
        let Some(base) = self.payload() else {
            return Ok(ExtNum::bottom());
        };
        if n.is_zero() {
            if self.is_finite_zero() {
                tracing::trace!("0**0 is ⊥");
                return Ok(ExtNum::bottom());
            }
            return Ok(ExtNum::one(precision));
        }
        let magnitude = n.abs().to_i32().ok_or_else(|| {
            ExtNumError::domain("raise to a power", format!("exponent {n} out of range"))
        })?;
        let raised = base.powi(magnitude);
        let result = match self.repr {
            Repr::Omega(_) => ExtNum::omega_or_bottom(raised, precision),
            _ => ExtNum::from_scalar(raised, precision),
        };
        if n.is_negative() {
            Ok(ExtNum::one(precision).div(&result))
        } else {
            Ok(result)
        }
    }
}

/// `b` for addition, `-b` for subtraction
fn signed(b: &Scalar, op: AddOp) -> Scalar {
    match op {
        AddOp::Add => b.clone(),
        AddOp::Sub => -b,
    }
}

impl Neg for &ExtNum {
    type Output = ExtNum;

    fn neg(self) -> ExtNum {
        let repr = match &self.repr {
            Repr::Real(r) => Repr::Real(-r),
            Repr::Complex(c) => Repr::Complex(-c),
            Repr::Omega(d) => Repr::Omega(-d),
            Repr::Bottom => Repr::Bottom,
        };
        ExtNum {
            repr,
            precision: self.precision,
        }
    }
}

impl Neg for ExtNum {
    type Output = ExtNum;

    fn neg(self) -> ExtNum {
        -&self
    }
}

/// `num / den`, with plain numbers taken in `precision`
///
/// ```
/// use nebula_extnum::{Precision, safe_div};
///
/// assert!(safe_div(2, 0, Precision::Exact).is_infinite());
/// assert!(safe_div(0, 0, Precision::Exact).is_undefined());
/// ```
pub fn safe_div(num: impl Into<Operand>, den: impl Into<Operand>, precision: Precision) -> ExtNum {
    num.into().into_ext(precision).div(den.into().into_ext(precision))
}
