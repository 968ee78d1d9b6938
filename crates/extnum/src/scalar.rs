//! Payload numbers carried by an [`ExtNum`](crate::ExtNum)
//!
//! [`Real`] is the REAL payload: an exact rational in exact mode, a double in
//! float mode. [`Scalar`] widens it with a complex double; OMEGA directions
//! and all payload-level arithmetic work with it.
//!
//! Mixed-mode binary arithmetic resolves through the requested precision:
//! in exact mode a finite double is lifted to the rational it denotes, and
//! only when that is impossible (a non-finite double) does the computation
//! fall back to floating point.

use core::cmp::Ordering;
use core::fmt;
use core::ops::Neg;

use num_bigint::BigInt;
use num_complex::Complex64;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::precision::Precision;

// ============================================================================
// REAL
// ============================================================================

/// Real-valued payload
#[derive(Debug, Clone, PartialEq)]
pub enum Real {
    /// Arbitrary-precision rational (exact mode)
    Exact(BigRational),
    /// Double precision (float mode)
    Float(f64),
}

/// Both operands of a binary operation, resolved to one representation
enum Operands {
    Exact(BigRational, BigRational),
    Float(f64, f64),
}

fn resolve(lhs: &Real, rhs: &Real, precision: Precision) -> Operands {
    if precision == Precision::Exact {
        if let (Some(a), Some(b)) = (lhs.to_exact(), rhs.to_exact()) {
            return Operands::Exact(a, b);
        }
    }
    Operands::Float(lhs.to_f64(), rhs.to_f64())
}

fn ratio_to_f64(r: &BigRational) -> f64 {
    r.to_f64().unwrap_or(f64::NAN)
}

impl Real {
    pub fn zero(precision: Precision) -> Self {
        Self::from_i64(0, precision)
    }

    pub fn one(precision: Precision) -> Self {
        Self::from_i64(1, precision)
    }

    pub fn from_i64(value: i64, precision: Precision) -> Self {
        match precision {
            Precision::Exact => Self::Exact(BigRational::from_integer(BigInt::from(value))),
            Precision::Float => Self::Float(value as f64),
        }
    }

    /// The mode this payload's representation belongs to
    pub const fn precision(&self) -> Precision {
        match self {
            Self::Exact(_) => Precision::Exact,
            Self::Float(_) => Precision::Float,
        }
    }

    /// Nearest double; rationals beyond the double range become NaN
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Exact(r) => ratio_to_f64(r),
            Self::Float(f) => *f,
        }
    }

    /// The exact rational value, `None` for NaN and infinities
    pub fn to_exact(&self) -> Option<BigRational> {
        match self {
            Self::Exact(r) => Some(r.clone()),
            Self::Float(f) => BigRational::from_float(*f),
        }
    }

    /// The same number in `precision`; `None` if exact mode cannot hold it
    pub fn with_precision(&self, precision: Precision) -> Option<Self> {
        match precision {
            Precision::Exact => self.to_exact().map(Self::Exact),
            Precision::Float => Some(Self::Float(self.to_f64())),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::Exact(r) => r.is_zero(),
            Self::Float(f) => *f == 0.0,
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Self::Exact(r) => r.is_negative(),
            Self::Float(f) => *f < 0.0,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Self::Float(f) if f.is_nan())
    }

    pub fn abs(&self) -> Self {
        match self {
            Self::Exact(r) => Self::Exact(r.abs()),
            Self::Float(f) => Self::Float(f.abs()),
        }
    }

    /// -1, 0 or 1; `None` for NaN
    pub fn signum(&self) -> Option<i64> {
        if self.is_nan() {
            None
        } else if self.is_zero() {
            Some(0)
        } else if self.is_negative() {
            Some(-1)
        } else {
            Some(1)
        }
    }

    pub(crate) fn add(&self, rhs: &Self, precision: Precision) -> Self {
        match resolve(self, rhs, precision) {
            Operands::Exact(a, b) => Self::Exact(a + b),
            Operands::Float(a, b) => Self::Float(a + b),
        }
    }

    pub(crate) fn sub(&self, rhs: &Self, precision: Precision) -> Self {
        match resolve(self, rhs, precision) {
            Operands::Exact(a, b) => Self::Exact(a - b),
            Operands::Float(a, b) => Self::Float(a - b),
        }
    }

    pub(crate) fn mul(&self, rhs: &Self, precision: Precision) -> Self {
        match resolve(self, rhs, precision) {
            Operands::Exact(a, b) => Self::Exact(a * b),
            Operands::Float(a, b) => Self::Float(a * b),
        }
    }

    /// Callers rule out a zero divisor; an exact zero still falls back to
    /// IEEE division instead of panicking.
    pub(crate) fn div(&self, rhs: &Self, precision: Precision) -> Self {
        match resolve(self, rhs, precision) {
            Operands::Exact(a, b) if !b.is_zero() => Self::Exact(a / b),
            Operands::Exact(a, b) => Self::Float(ratio_to_f64(&a) / ratio_to_f64(&b)),
            Operands::Float(a, b) => Self::Float(a / b),
        }
    }

    pub(crate) fn powi(&self, exp: i32) -> Self {
        match self {
            Self::Exact(r) => Self::Exact(r.pow(exp)),
            Self::Float(f) => Self::Float(f.powi(exp)),
        }
    }

    /// Square root of a non-negative perfect-square rational
    pub(crate) fn exact_sqrt(&self) -> Option<BigRational> {
        let Self::Exact(r) = self else {
            return None;
        };
        if r.is_negative() {
            return None;
        }
        let numer = r.numer().sqrt();
        let denom = r.denom().sqrt();
        (&numer * &numer == *r.numer() && &denom * &denom == *r.denom())
            .then(|| BigRational::new(numer, denom))
    }

    /// Numeric comparison across representations; `None` if NaN is involved
    pub(crate) fn cmp_value(&self, other: &Self) -> Option<Ordering> {
        match resolve(self, other, Precision::Exact) {
            Operands::Exact(a, b) => Some(a.cmp(&b)),
            Operands::Float(a, b) => a.partial_cmp(&b),
        }
    }
}

impl Neg for &Real {
    type Output = Real;

    fn neg(self) -> Real {
        match self {
            Real::Exact(r) => Real::Exact(-r),
            Real::Float(f) => Real::Float(-f),
        }
    }
}

impl Neg for Real {
    type Output = Real;

    fn neg(self) -> Real {
        -&self
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(r) => write!(f, "{r}"),
            Self::Float(x) => write!(f, "{x:?}"),
        }
    }
}

macro_rules! real_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Real {
                fn from(v: $t) -> Self {
                    Self::Exact(BigRational::from_integer(BigInt::from(v)))
                }
            }
        )*
    };
}

real_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<f64> for Real {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for Real {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<BigInt> for Real {
    fn from(v: BigInt) -> Self {
        Self::Exact(BigRational::from_integer(v))
    }
}

impl From<BigRational> for Real {
    fn from(v: BigRational) -> Self {
        Self::Exact(v)
    }
}

// ============================================================================
// SCALAR
// ============================================================================

/// Real or complex payload
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Real(Real),
    Complex(Complex64),
}

impl Scalar {
    pub fn to_complex(&self) -> Complex64 {
        match self {
            Self::Real(r) => Complex64::new(r.to_f64(), 0.0),
            Self::Complex(c) => *c,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::Real(r) => r.is_zero(),
            Self::Complex(c) => c.is_zero(),
        }
    }

    pub fn is_nan(&self) -> bool {
        match self {
            Self::Real(r) => r.is_nan(),
            Self::Complex(c) => c.is_nan(),
        }
    }

    /// |x| as a real; complex magnitudes are always doubles
    pub fn magnitude(&self) -> Real {
        match self {
            Self::Real(r) => r.abs(),
            Self::Complex(c) => Real::Float(c.norm()),
        }
    }

    pub fn real_part(&self) -> Real {
        match self {
            Self::Real(r) => r.clone(),
            Self::Complex(c) => Real::Float(c.re),
        }
    }

    fn binary(
        &self,
        rhs: &Self,
        precision: Precision,
        real: fn(&Real, &Real, Precision) -> Real,
        complex: fn(Complex64, Complex64) -> Complex64,
    ) -> Self {
        match (self, rhs) {
            (Self::Real(a), Self::Real(b)) => Self::Real(real(a, b, precision)),
            _ => Self::Complex(complex(self.to_complex(), rhs.to_complex())),
        }
    }

    pub(crate) fn add(&self, rhs: &Self, precision: Precision) -> Self {
        self.binary(rhs, precision, Real::add, |a, b| a + b)
    }

    pub(crate) fn sub(&self, rhs: &Self, precision: Precision) -> Self {
        self.binary(rhs, precision, Real::sub, |a, b| a - b)
    }

    pub(crate) fn mul(&self, rhs: &Self, precision: Precision) -> Self {
        self.binary(rhs, precision, Real::mul, |a, b| a * b)
    }

    pub(crate) fn div(&self, rhs: &Self, precision: Precision) -> Self {
        self.binary(rhs, precision, Real::div, |a, b| a / b)
    }

    pub(crate) fn powi(&self, exp: i32) -> Self {
        match self {
            Self::Real(r) => Self::Real(r.powi(exp)),
            Self::Complex(c) => Self::Complex(c.powi(exp)),
        }
    }

    /// Order by |x|; incomparable magnitudes (NaN) count as equal
    pub(crate) fn cmp_magnitude(&self, other: &Self) -> Ordering {
        self.magnitude()
            .cmp_value(&other.magnitude())
            .unwrap_or(Ordering::Equal)
    }

    /// Same number, regardless of which representation holds it
    pub(crate) fn numeric_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Real(a), Self::Real(b)) => a.cmp_value(b) == Some(Ordering::Equal),
            _ => self.to_complex() == other.to_complex(),
        }
    }
}

impl Neg for &Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        match self {
            Scalar::Real(r) => Scalar::Real(-r),
            Scalar::Complex(c) => Scalar::Complex(-c),
        }
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        -&self
    }
}

/// `a+bi`, or just `a` when the imaginary part is exactly zero
pub(crate) fn fmt_complex(c: Complex64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if c.im == 0.0 {
        write!(f, "{:?}", c.re)
    } else if c.im.is_sign_negative() && !c.im.is_nan() {
        write!(f, "{:?}-{:?}i", c.re, -c.im)
    } else {
        write!(f, "{:?}+{:?}i", c.re, c.im)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(r) => fmt::Display::fmt(r, f),
            Self::Complex(c) => fmt_complex(*c, f),
        }
    }
}

macro_rules! scalar_from_real {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(v: $t) -> Self {
                    Self::Real(Real::from(v))
                }
            }
        )*
    };
}

scalar_from_real!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, BigInt, BigRational
);

impl From<Real> for Scalar {
    fn from(v: Real) -> Self {
        Self::Real(v)
    }
}

impl From<Complex64> for Scalar {
    fn from(v: Complex64) -> Self {
        Self::Complex(v)
    }
}

// ============================================================================
// EXACT LITERALS
// ============================================================================

/// Parse an exact literal: `n`, `n/d`, or a decimal such as `-3.25e-2`.
///
/// Decimal exponents whose magnitude exceeds `max_exponent` are rejected
/// before the power of ten is expanded.
pub fn parse_exact(literal: &str, max_exponent: u32) -> Option<BigRational> {
    let s = literal.trim();
    if let Some((numer, denom)) = s.split_once('/') {
        let numer: BigInt = numer.trim().parse().ok()?;
        let denom: BigInt = denom.trim().parse().ok()?;
        if denom.is_zero() {
            return None;
        }
        return Some(BigRational::new(numer, denom));
    }

    let (mantissa, exponent) = match s.find(|c: char| c == 'e' || c == 'E') {
        Some(at) => (&s[..at], s[at + 1..].parse::<i64>().ok()?),
        None => (s, 0),
    };
    let (negative, digits) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part
        .bytes()
        .chain(frac_part.bytes())
        .all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let mut numer: BigInt = format!("{int_part}{frac_part}").parse().ok()?;
    if negative {
        numer = -numer;
    }
    let scale = exponent.checked_sub(i64::try_from(frac_part.len()).ok()?)?;
    if scale.unsigned_abs() > u64::from(max_exponent) {
        return None;
    }
    let power = num_traits::pow(BigInt::from(10u8), scale.unsigned_abs() as usize);
    if scale >= 0 {
        Some(BigRational::from_integer(numer * power))
    } else {
        Some(BigRational::new(numer, power))
    }
}
