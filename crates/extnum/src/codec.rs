//! JSON record codec
//!
//! ```text
//! {
//!   "kind": "REAL" | "COMPLEX" | "OMEGA" | "BOTTOM",
//!   "use_float": bool,
//!   "val": "<literal>" | {"real": "<literal>", "imag": "<literal>"}
//! }
//! ```
//!
//! `val` is absent for BOTTOM. Exact literals are written as `n` or `n/d`,
//! float literals with the shortest representation that reads back to the
//! same double, so `decode(encode(v)) == v` for every non-NaN value. An OMEGA
//! with a complex direction stores it as a single `a+bi` literal.

use core::result::Result as StdResult;

use num_complex::Complex64;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::Value as JsonValue;

use crate::error::{ExtNumError, Result};
use crate::kind::Kind;
use crate::limits::CodecLimits;
use crate::precision::Precision;
use crate::scalar::{Real, Scalar, parse_exact};
use crate::value::{ExtNum, Repr};

/// Limits for [`ExtNum::decode`] and the serde impls.
///
/// Exact `n/d` literals grow with the value itself, so only the decimal
/// exponent stays bounded; anything `encode` writes decodes again.
const TRUSTED: CodecLimits = CodecLimits {
    max_input_bytes: usize::MAX,
    max_literal_len: usize::MAX,
    max_decimal_exponent: 10_000,
};

#[derive(Debug, Serialize, Deserialize)]
struct Record {
    kind: Kind,
    #[serde(default)]
    use_float: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    val: Option<RecordValue>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RecordValue {
    Literal(String),
    Complex { real: String, imag: String },
}

// ==================== Encoding ====================

fn complex_literal(c: Complex64) -> String {
    if c.im.is_sign_negative() && !c.im.is_nan() {
        format!("{:?}-{:?}i", c.re, -c.im)
    } else {
        format!("{:?}+{:?}i", c.re, c.im)
    }
}

impl ExtNum {
    fn record(&self) -> Record {
        let val = match &self.repr {
            Repr::Real(r) => Some(RecordValue::Literal(r.to_string())),
            Repr::Complex(c) => Some(RecordValue::Complex {
                real: format!("{:?}", c.re),
                imag: format!("{:?}", c.im),
            }),
            Repr::Omega(Scalar::Real(r)) => Some(RecordValue::Literal(r.to_string())),
            Repr::Omega(Scalar::Complex(c)) => Some(RecordValue::Literal(complex_literal(*c))),
            Repr::Bottom => None,
        };
        Record {
            kind: self.kind(),
            use_float: self.use_float(),
            val,
        }
    }

    /// Serialize to a compact JSON record
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(&self.record()).map_err(|e| {
            tracing::debug!(error = %e, "failed to encode ExtNum");
            e.into()
        })
    }

    /// Serialize to an indented JSON record
    pub fn encode_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.record()).map_err(|e| {
            tracing::debug!(error = %e, "failed to encode ExtNum");
            e.into()
        })
    }

    /// The record as a JSON value, for callers embedding it in larger documents
    pub fn to_record(&self) -> Result<JsonValue> {
        serde_json::to_value(self.record()).map_err(Into::into)
    }

    /// Parse a JSON record.
    ///
    /// Accepts every record [`ExtNum::encode`] produces, however long its
    /// literals. Use [`ExtNum::decode_with_limits`] for untrusted input.
    ///
    /// # Examples
    ///
    /// ```
    /// use nebula_extnum::{ExtNum, Precision};
    ///
    /// let half = ExtNum::real(1, Precision::Exact).div(2);
    /// let json = half.encode().unwrap();
    /// assert_eq!(json, r#"{"kind":"REAL","use_float":false,"val":"1/2"}"#);
    /// assert_eq!(ExtNum::decode(&json).unwrap(), half);
    /// ```
    pub fn decode(input: &str) -> Result<ExtNum> {
        Self::decode_with_limits(input, &TRUSTED)
    }

    /// Parse a JSON record, rejecting input that exceeds `limits`
    pub fn decode_with_limits(input: &str, limits: &CodecLimits) -> Result<ExtNum> {
        limits.check_input_bytes(input.len())?;
        let record: Record = serde_json::from_str(input)
            .inspect_err(|e| tracing::debug!(error = %e, "malformed ExtNum record"))?;
        Decoder::new(limits, record.use_float)
            .build(record)
            .inspect_err(|e| tracing::debug!(error = %e, "rejected ExtNum record"))
    }

    /// Build from a record already parsed into a JSON value
    pub fn from_record(value: &JsonValue) -> Result<ExtNum> {
        let record = Record::deserialize(value)?;
        Decoder::new(&TRUSTED, record.use_float).build(record)
    }
}

// ==================== Decoding ====================

struct Decoder<'a> {
    limits: &'a CodecLimits,
    precision: Precision,
}

impl<'a> Decoder<'a> {
    fn new(limits: &'a CodecLimits, use_float: bool) -> Self {
        Self {
            limits,
            precision: Precision::from_use_float(use_float),
        }
    }

    fn build(&self, record: Record) -> Result<ExtNum> {
        let precision = self.precision;
        match (record.kind, record.val) {
            (Kind::Bottom, None) => Ok(ExtNum::bottom()),
            (Kind::Bottom, Some(_)) => Err(ExtNumError::parse("BOTTOM record", "unexpected val")),
            (Kind::Real, Some(RecordValue::Literal(literal))) => {
                Ok(ExtNum::from_real(self.real(&literal)?, precision))
            }
            (Kind::Complex, Some(RecordValue::Complex { real, imag })) => Ok(ExtNum::from_complex(
                Complex64::new(self.float(&real)?, self.float(&imag)?),
                precision,
            )),
            (Kind::Omega, Some(RecordValue::Literal(literal))) => {
                let direction = self.direction(&literal)?;
                ExtNum::omega(direction, precision)
                    .map_err(|_| ExtNumError::parse("OMEGA direction", literal))
            }
            (kind, _) => Err(ExtNumError::parse(
                format!("{kind} record"),
                "missing or malformed val",
            )),
        }
    }

    fn real(&self, literal: &str) -> Result<Real> {
        self.limits.check_literal_len(literal.len())?;
        let value = match self.precision {
            Precision::Exact => {
                parse_exact(literal, self.limits.max_decimal_exponent).map(Real::Exact)
            }
            Precision::Float => self.parse_float(literal).map(Real::Float),
        };
        value.ok_or_else(|| ExtNumError::parse("real literal", literal))
    }

    fn float(&self, literal: &str) -> Result<f64> {
        self.limits.check_literal_len(literal.len())?;
        self.parse_float(literal)
            .ok_or_else(|| ExtNumError::parse("float literal", literal))
    }

    /// Doubles in Rust syntax (`1.5`, `-inf`, `NaN`), or any exact literal
    fn parse_float(&self, literal: &str) -> Option<f64> {
        let literal = literal.trim();
        literal.parse::<f64>().ok().or_else(|| {
            parse_exact(literal, self.limits.max_decimal_exponent)
                .map(|r| Real::Exact(r).to_f64())
        })
    }

    fn direction(&self, literal: &str) -> Result<Scalar> {
        match literal.trim().strip_suffix('i') {
            Some(body) => {
                self.limits.check_literal_len(literal.len())?;
                let (re, im) = split_complex(body)
                    .ok_or_else(|| ExtNumError::parse("complex literal", literal))?;
                Ok(Scalar::Complex(Complex64::new(self.float(re)?, self.float(im)?)))
            }
            None => self.real(literal).map(Scalar::Real),
        }
    }
}

/// Split `a±b` at the sign that starts the imaginary part
fn split_complex(body: &str) -> Option<(&str, &str)> {
    let bytes = body.as_bytes();
    let at = (1..bytes.len())
        .rev()
        .find(|&i| matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E'))?;
    Some((&body[..at], &body[at..]))
}

// ==================== Serde ====================

impl Serialize for ExtNum {
    fn serialize<S>(&self, serializer: S) -> StdResult<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.record().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ExtNum {
    fn deserialize<D>(deserializer: D) -> StdResult<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = Record::deserialize(deserializer)?;
        Decoder::new(&TRUSTED, record.use_float)
            .build(record)
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn omega(x: i64, precision: Precision) -> ExtNum {
        ExtNum::omega(x, precision).unwrap()
    }

    fn assert_round_trip(value: &ExtNum) {
        let json = value.encode().unwrap();
        assert_eq!(&ExtNum::decode(&json).unwrap(), value, "{json}");
    }

    #[test]
    fn test_encode_shapes() {
        let half = ExtNum::real(3, Precision::Exact).div(2);
        assert_eq!(
            half.encode().unwrap(),
            r#"{"kind":"REAL","use_float":false,"val":"3/2"}"#
        );
        assert_eq!(
            ExtNum::real(5, Precision::Float).encode().unwrap(),
            r#"{"kind":"REAL","use_float":true,"val":"5.0"}"#
        );
        assert_eq!(
            ExtNum::bottom().encode().unwrap(),
            r#"{"kind":"BOTTOM","use_float":false}"#
        );
        assert_eq!(
            ExtNum::complex(1, -2, Precision::Float).to_record().unwrap(),
            json!({"kind": "COMPLEX", "use_float": true, "val": {"real": "1.0", "imag": "-2.0"}})
        );
        assert_eq!(
            omega(-4, Precision::Exact).to_record().unwrap(),
            json!({"kind": "OMEGA", "use_float": false, "val": "-4"})
        );
    }

    #[test]
    fn test_round_trip_each_kind() {
        for precision in [Precision::Exact, Precision::Float] {
            assert_round_trip(&ExtNum::real(7, precision).div(3));
            assert_round_trip(&ExtNum::real(-0.1, precision));
            assert_round_trip(&ExtNum::complex(1.5, -2.25, precision));
            assert_round_trip(&omega(-3, precision));
            assert_round_trip(&ExtNum::bottom());
        }
        assert_round_trip(&ExtNum::real(f64::INFINITY, Precision::Float));
    }

    #[test]
    fn test_complex_direction_round_trip() {
        let value = ExtNum::complex(3, 4, Precision::Exact).div(0);
        assert_eq!(
            value.to_record().unwrap()["val"],
            json!("3.0+4.0i")
        );
        assert_round_trip(&value);

        // a zero imaginary part must survive, or the direction turns real
        let flat = ExtNum::complex(3, 0, Precision::Float).div(0);
        assert_eq!(flat.to_record().unwrap()["val"], json!("3.0+0.0i"));
        assert_round_trip(&flat);

        assert_round_trip(&ExtNum::complex(-1e-5, -2e-3, Precision::Float).div(0));
    }

    #[test]
    fn test_decode_lenient_literals() {
        let value = ExtNum::decode(r#"{"kind":"REAL","val":"1.25"}"#).unwrap();
        assert_eq!(value, ExtNum::real(5, Precision::Exact).div(4));

        let value = ExtNum::decode(r#"{"kind":"REAL","use_float":true,"val":"1/4"}"#).unwrap();
        assert_eq!(value, ExtNum::real(0.25, Precision::Float));
    }

    #[test]
    fn test_decode_errors() {
        for input in [
            "not json",
            r#"{"kind":"NOPE","use_float":false}"#,
            r#"{"kind":"REAL","use_float":false}"#,
            r#"{"kind":"REAL","use_float":false,"val":"abc"}"#,
            r#"{"kind":"REAL","use_float":false,"val":3}"#,
            r#"{"kind":"COMPLEX","use_float":true,"val":"1"}"#,
            r#"{"kind":"BOTTOM","use_float":false,"val":"1"}"#,
            r#"{"kind":"OMEGA","use_float":false,"val":"0"}"#,
            r#"{"kind":"OMEGA","use_float":true,"val":"1+i"}"#,
        ] {
            let err = ExtNum::decode(input).unwrap_err();
            assert_eq!(err.code(), "EXTNUM_PARSE", "{input}");
        }
    }

    #[test]
    fn test_decode_limits() {
        let long = format!(r#"{{"kind":"REAL","val":"{}"}}"#, "9".repeat(5_000));
        let err = ExtNum::decode_with_limits(&long, &CodecLimits::strict()).unwrap_err();
        assert!(matches!(err, ExtNumError::LimitExceeded { .. }));
        assert!(ExtNum::decode(&long).is_ok());

        let tiny = CodecLimits {
            max_input_bytes: 10,
            ..CodecLimits::default()
        };
        let err = ExtNum::decode_with_limits(r#"{"kind":"BOTTOM"}"#, &tiny).unwrap_err();
        assert!(err.is_client_error());

        let bomb = ExtNum::decode(r#"{"kind":"REAL","val":"1e999999999"}"#).unwrap_err();
        assert_eq!(bomb.code(), "EXTNUM_PARSE");
    }

    #[test]
    fn test_round_trip_huge_exact_values() {
        let huge = ExtNum::real(10, Precision::Exact).pow(100_001).unwrap();
        let json = huge.encode().unwrap();
        assert!(json.len() > CodecLimits::default().max_literal_len);
        assert_eq!(ExtNum::decode(&json).unwrap(), huge);
        assert_eq!(serde_json::from_str::<ExtNum>(&json).unwrap(), huge);

        let tiny = ExtNum::one(Precision::Exact).div(&huge);
        assert_round_trip(&tiny);
        assert_round_trip(&huge.div(0));

        let err = ExtNum::decode_with_limits(&json, &CodecLimits::default()).unwrap_err();
        assert!(matches!(err, ExtNumError::LimitExceeded { .. }));
    }

    #[test]
    fn test_serde_impls() {
        let value = ExtNum::complex(2, 1, Precision::Exact);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, value.encode().unwrap());
        let back: ExtNum = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);

        let record = json!({"kind": "OMEGA", "use_float": true, "val": "2.5"});
        assert_eq!(
            ExtNum::from_record(&record).unwrap(),
            ExtNum::omega(2.5, Precision::Float).unwrap()
        );
        assert!(serde_json::from_value::<ExtNum>(json!({"kind": "OMEGA", "val": "0"})).is_err());
    }
}
