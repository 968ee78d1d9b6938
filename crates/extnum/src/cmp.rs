//! Ordering, equality and hashing
//!
//! Only REAL and OMEGA are ordered: every REAL ranks below every OMEGA, and
//! OMEGAs rank by the magnitude of their direction. Ordering COMPLEX or ⊥ is
//! a domain error.
//!
//! Equality is structural over (kind, payload, precision). Float payloads
//! keep IEEE semantics, so a value holding NaN is not equal to itself; this
//! is a known limitation of float mode, not something the hash papers over.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use crate::coerce::Operand;
use crate::error::{ExtNumError, Result};
use crate::scalar::{Real, Scalar};
use crate::value::{ExtNum, Repr};

/// Position of a value on the extended real line
enum Rank {
    Finite(Real),
    Infinite(Real),
}

impl ExtNum {
    fn rank(&self) -> Result<Rank> {
        match &self.repr {
            Repr::Real(r) => Ok(Rank::Finite(r.clone())),
            Repr::Omega(d) => Ok(Rank::Infinite(d.magnitude())),
            Repr::Complex(_) | Repr::Bottom => Err(ExtNumError::domain(
                "order",
                format!("{} values", self.kind()),
            )),
        }
    }

    /// Three-way comparison
    pub fn compare(&self, rhs: impl Into<Operand>) -> Result<Ordering> {
        let rhs = self.coerce(rhs);
        match (self.rank()?, rhs.rank()?) {
            (Rank::Finite(_), Rank::Infinite(_)) => Ok(Ordering::Less),
            (Rank::Infinite(_), Rank::Finite(_)) => Ok(Ordering::Greater),
            (Rank::Finite(a), Rank::Finite(b)) | (Rank::Infinite(a), Rank::Infinite(b)) => a
                .cmp_value(&b)
                .ok_or_else(|| ExtNumError::domain("order", "NaN")),
        }
    }

    /// Less than
    pub fn lt(&self, rhs: impl Into<Operand>) -> Result<bool> {
        self.compare(rhs).map(Ordering::is_lt)
    }

    /// Less than or equal
    pub fn le(&self, rhs: impl Into<Operand>) -> Result<bool> {
        self.compare(rhs).map(Ordering::is_le)
    }

    /// Greater than
    pub fn gt(&self, rhs: impl Into<Operand>) -> Result<bool> {
        self.compare(rhs).map(Ordering::is_gt)
    }

    /// Greater than or equal
    pub fn ge(&self, rhs: impl Into<Operand>) -> Result<bool> {
        self.compare(rhs).map(Ordering::is_ge)
    }

    /// Structural equality against a coerced foreign operand
    pub fn equals(&self, rhs: impl Into<Operand>) -> bool {
        *self == self.coerce(rhs)
    }
}

impl PartialEq for ExtNum {
    fn eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Bottom, Repr::Bottom) => true,
            (Repr::Real(a), Repr::Real(b)) => self.precision == other.precision && a == b,
            (Repr::Complex(a), Repr::Complex(b)) => self.precision == other.precision && a == b,
            (Repr::Omega(a), Repr::Omega(b)) => self.precision == other.precision && a == b,
            _ => false,
        }
    }
}

// Reflexive for everything but NaN payloads, see the module docs.
impl Eq for ExtNum {}

fn hash_f64<H: Hasher>(value: f64, state: &mut H) {
    // +0.0 == -0.0, so both must hash alike
    if value == 0.0 {
        0.0f64.to_bits().hash(state);
    } else {
        value.to_bits().hash(state);
    }
}

fn hash_real<H: Hasher>(value: &Real, state: &mut H) {
    match value {
        Real::Exact(r) => {
            0u8.hash(state);
            r.hash(state);
        }
        Real::Float(f) => {
            1u8.hash(state);
            hash_f64(*f, state);
        }
    }
}

fn hash_scalar<H: Hasher>(value: &Scalar, state: &mut H) {
    match value {
        Scalar::Real(r) => hash_real(r, state),
        Scalar::Complex(c) => {
            2u8.hash(state);
            hash_f64(c.re, state);
            hash_f64(c.im, state);
        }
    }
}

impl Hash for ExtNum {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match &self.repr {
            Repr::Bottom => {}
            Repr::Real(r) => {
                self.precision.hash(state);
                hash_real(r, state);
            }
            Repr::Complex(c) => {
                self.precision.hash(state);
                hash_scalar(&Scalar::Complex(*c), state);
            }
            Repr::Omega(d) => {
                self.precision.hash(state);
                hash_scalar(d, state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precision::Precision;
    use num_complex::Complex64;
    use std::collections::HashSet;

    fn omega(x: i64) -> ExtNum {
        ExtNum::omega(x, Precision::Exact).unwrap()
    }

    #[test]
    fn test_real_below_omega() {
        let one = ExtNum::real(1, Precision::Exact);
        assert!(one.lt(&omega(1)).unwrap());
        assert!(omega(1).lt(&omega(5)).unwrap());
        assert!(ExtNum::real(1_000_000, Precision::Float).lt(&omega(1)).unwrap());
        assert!(omega(1).gt(1_000_000).unwrap());
    }

    #[test]
    fn test_omega_ranks_by_magnitude() {
        assert_eq!(omega(-5).compare(&omega(5)).unwrap(), Ordering::Equal);
        assert!(omega(-5).gt(&omega(2)).unwrap());
        let complex = ExtNum::omega(Complex64::new(3.0, 4.0), Precision::Float).unwrap();
        assert!(complex.ge(&omega(5)).unwrap());
        assert!(complex.le(&omega(5)).unwrap());
    }

    #[test]
    fn test_real_ordering_across_precision() {
        let exact = ExtNum::real(1, Precision::Exact).div(3);
        let float = ExtNum::real(0.3, Precision::Float);
        assert!(float.lt(&exact).unwrap());
        assert!(exact.ge(0.3).unwrap());
    }

    #[test]
    fn test_unordered_kinds() {
        let c = ExtNum::complex(1, 1, Precision::Exact);
        let err = c.lt(&ExtNum::complex(2, 2, Precision::Exact)).unwrap_err();
        assert!(matches!(err, ExtNumError::Domain { .. }));
        assert!(ExtNum::real(1, Precision::Exact).lt(&c).is_err());
        assert!(ExtNum::bottom().le(&ExtNum::bottom()).is_err());
        assert!(ExtNum::real(1, Precision::Exact).gt(&ExtNum::bottom()).is_err());
        assert!(ExtNum::real(f64::NAN, Precision::Float).lt(1).is_err());
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(ExtNum::bottom(), ExtNum::bottom());
        assert_ne!(
            ExtNum::real(3, Precision::Exact),
            ExtNum::real(3, Precision::Float)
        );
        assert_ne!(omega(2), ExtNum::real(2, Precision::Exact));
        assert!(ExtNum::real(3, Precision::Exact).equals(3));
        assert!(!ExtNum::real(f64::NAN, Precision::Float).equals(f64::NAN));
    }

    #[test]
    fn test_hash_consistent_with_eq() {
        let mut set = HashSet::new();
        set.insert(ExtNum::real(0.0, Precision::Float));
        assert!(set.contains(&ExtNum::real(-0.0, Precision::Float)));

        set.insert(ExtNum::real(1, Precision::Exact).div(2));
        assert!(set.contains(&ExtNum::real(0.5, Precision::Exact)));
        assert!(!set.contains(&ExtNum::real(0.5, Precision::Float)));

        set.insert(ExtNum::bottom());
        assert!(set.contains(&ExtNum::real(0, Precision::Exact).div(0)));
    }
}
