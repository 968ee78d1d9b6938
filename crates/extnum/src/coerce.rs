//! Coercion of foreign numeric inputs into [`ExtNum`]
//!
//! Binary operations accept anything convertible into an [`Operand`]. A
//! foreign operand is turned into an ExtNum in the *left* operand's
//! precision: integers and rationals become REAL, doubles become REAL,
//! complex doubles become COMPLEX.
//!
//! Operands arriving as JSON are checked at runtime; anything that is not a
//! number (or a `{"re": .., "im": ..}` object) is a type error.

use num_bigint::BigInt;
use num_complex::Complex64;
use num_rational::BigRational;
use serde_json::Value as JsonValue;

use crate::error::{ExtNumError, Result};
use crate::precision::Precision;
use crate::scalar::Real;
use crate::value::ExtNum;

/// Right-hand side of a binary operation, before coercion
#[derive(Debug, Clone)]
pub enum Operand {
    Ext(ExtNum),
    Int(BigInt),
    Rational(BigRational),
    Float(f64),
    Complex(Complex64),
}

impl Operand {
    /// Short name used in error messages
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Ext(_) => "ExtNum",
            Self::Int(_) => "integer",
            Self::Rational(_) => "rational",
            Self::Float(_) => "float",
            Self::Complex(_) => "complex",
        }
    }

    /// Build the ExtNum this operand denotes in `precision`; ExtNum operands
    /// pass through untouched.
    pub fn into_ext(self, precision: Precision) -> ExtNum {
        match self {
            Self::Ext(value) => value,
            Self::Int(i) => ExtNum::real(i, precision),
            Self::Rational(r) => ExtNum::real(r, precision),
            Self::Float(f) => ExtNum::real(f, precision),
            Self::Complex(c) => ExtNum::complex(c.re, c.im, precision),
        }
    }
}

impl ExtNum {
    /// Coerce `operand` using this value's precision
    pub fn coerce(&self, operand: impl Into<Operand>) -> ExtNum {
        operand.into().into_ext(self.precision)
    }
}

macro_rules! operand_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand {
                fn from(v: $t) -> Self {
                    Self::Int(BigInt::from(v))
                }
            }
        )*
    };
}

operand_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<f64> for Operand {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for Operand {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<BigInt> for Operand {
    fn from(v: BigInt) -> Self {
        Self::Int(v)
    }
}

impl From<BigRational> for Operand {
    fn from(v: BigRational) -> Self {
        Self::Rational(v)
    }
}

impl From<Complex64> for Operand {
    fn from(v: Complex64) -> Self {
        Self::Complex(v)
    }
}

impl From<Real> for Operand {
    fn from(v: Real) -> Self {
        match v {
            Real::Exact(r) => Self::Rational(r),
            Real::Float(f) => Self::Float(f),
        }
    }
}

impl From<ExtNum> for Operand {
    fn from(v: ExtNum) -> Self {
        Self::Ext(v)
    }
}

impl From<&ExtNum> for Operand {
    fn from(v: &ExtNum) -> Self {
        Self::Ext(v.clone())
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

impl TryFrom<&JsonValue> for Operand {
    type Error = ExtNumError;

    fn try_from(value: &JsonValue) -> Result<Self> {
        match value {
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Int(BigInt::from(i)))
                } else if let Some(u) = n.as_u64() {
                    Ok(Self::Int(BigInt::from(u)))
                } else if let Some(f) = n.as_f64() {
                    Ok(Self::Float(f))
                } else {
                    Err(ExtNumError::unsupported_type("coerce", "number"))
                }
            }
            JsonValue::Object(map) if map.len() == 2 => {
                let re = map.get("re").and_then(JsonValue::as_f64);
                let im = map.get("im").and_then(JsonValue::as_f64);
                match (re, im) {
                    (Some(re), Some(im)) => Ok(Self::Complex(Complex64::new(re, im))),
                    _ => Err(ExtNumError::unsupported_type("coerce", "object")),
                }
            }
            other => Err(ExtNumError::unsupported_type(
                "coerce",
                json_type_name(other),
            )),
        }
    }
}

impl TryFrom<JsonValue> for Operand {
    type Error = ExtNumError;

    fn try_from(value: JsonValue) -> Result<Self> {
        Self::try_from(&value)
    }
}
