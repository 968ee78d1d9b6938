//! Unary functions extended to all four kinds
//!
//! REAL and COMPLEX payloads go through the ordinary complex-analytic
//! function; a REAL argument outside the real domain (`log` of a negative,
//! `sqrt` of a negative) promotes to COMPLEX. OMEGA is mapped symbolically,
//! `f(Ω(d)) = Ω(f(d))`, and demotes to ⊥ when the mapped direction vanishes
//! or stops being a number. `log` and `sqrt` of a real direction act on
//! `|d|`. ⊥ is a fixed point of every function.
//!
//! In exact mode a transcendental result is the exact value of the nearest
//! double. Square roots of perfect-square rationals stay exact.

use num_complex::Complex64;

use crate::scalar::{Real, Scalar};
use crate::value::{ExtNum, Repr};

/// A function with a real branch and its complex continuation
struct Analytic {
    real: fn(f64) -> f64,
    complex: fn(Complex64) -> Complex64,
    /// Real arguments outside this domain take the complex branch
    real_domain: fn(f64) -> bool,
    /// Exact shortcut tried before falling back to doubles
    exact: Option<fn(&Real) -> Option<Real>>,
    /// Real Ω directions are replaced by their magnitude first
    omega_magnitude: bool,
}

fn everywhere(_: f64) -> bool {
    true
}

fn non_negative(x: f64) -> bool {
    x.is_nan() || x >= 0.0
}

fn positive(x: f64) -> bool {
    x.is_nan() || x > 0.0
}

fn exact_sqrt(x: &Real) -> Option<Real> {
    x.exact_sqrt().map(Real::Exact)
}

const EXP: Analytic = Analytic {
    real: f64::exp,
    complex: Complex64::exp,
    real_domain: everywhere,
    exact: None,
    omega_magnitude: false,
};

const SIN: Analytic = Analytic {
    real: f64::sin,
    complex: Complex64::sin,
    real_domain: everywhere,
    exact: None,
    omega_magnitude: false,
};

const COS: Analytic = Analytic {
    real: f64::cos,
    complex: Complex64::cos,
    real_domain: everywhere,
    exact: None,
    omega_magnitude: false,
};

const SQRT: Analytic = Analytic {
    real: f64::sqrt,
    complex: Complex64::sqrt,
    real_domain: non_negative,
    exact: Some(exact_sqrt),
    omega_magnitude: true,
};

const LOG: Analytic = Analytic {
    real: f64::ln,
    complex: Complex64::ln,
    real_domain: positive,
    exact: None,
    omega_magnitude: true,
};

impl Analytic {
    fn eval_real(&self, x: &Real) -> Scalar {
        if let Some(value) = self.exact.and_then(|exact| exact(x)) {
            return Scalar::Real(value);
        }
        let x = x.to_f64();
        if (self.real_domain)(x) {
            Scalar::Real(Real::Float((self.real)(x)))
        } else {
            Scalar::Complex((self.complex)(Complex64::new(x, 0.0)))
        }
    }

    fn eval(&self, x: &Scalar) -> Scalar {
        match x {
            Scalar::Real(r) => self.eval_real(r),
            Scalar::Complex(c) => Scalar::Complex((self.complex)(*c)),
        }
    }
}

impl ExtNum {
    fn apply(&self, f: &Analytic) -> ExtNum {
        match &self.repr {
            Repr::Real(r) => ExtNum::from_scalar(f.eval_real(r), self.precision),
            Repr::Complex(c) => ExtNum::from_complex((f.complex)(*c), self.precision),
            Repr::Omega(Scalar::Real(d)) if f.omega_magnitude => {
                ExtNum::omega_or_bottom(f.eval_real(&d.abs()), self.precision)
            }
            Repr::Omega(d) => ExtNum::omega_or_bottom(f.eval(d), self.precision),
            Repr::Bottom => ExtNum::bottom(),
        }
    }

    /// Magnitude: REAL for finite inputs, `Ω(|d|)` for OMEGA
    pub fn abs(&self) -> ExtNum {
        match &self.repr {
            Repr::Real(r) => ExtNum::from_real(r.abs(), self.precision),
            Repr::Complex(c) => ExtNum::from_real(Real::Float(c.norm()), self.precision),
            Repr::Omega(d) => ExtNum::omega_or_bottom(Scalar::Real(d.magnitude()), self.precision),
            Repr::Bottom => ExtNum::bottom(),
        }
    }

    /// `-1`, `0` or `1` as a REAL.
    ///
    /// OMEGA takes the sign of its direction's real component. COMPLEX has no
    /// sign and yields ⊥, as does a NaN payload.
    pub fn sign(&self) -> ExtNum {
        let signum = match &self.repr {
            Repr::Real(r) => r.signum(),
            Repr::Omega(d) => d.real_part().signum(),
            Repr::Complex(_) | Repr::Bottom => None,
        };
        match signum {
            Some(s) => ExtNum::from_real(Real::from_i64(s, self.precision), self.precision),
            None => ExtNum::bottom(),
        }
    }

    /// Natural logarithm; `log(0)` is `Ω(-1)` for REAL and COMPLEX zeros
    pub fn log(&self) -> ExtNum {
        if self.is_finite_zero() {
            tracing::trace!("log(0) maps to Ω(-1)");
            return ExtNum::omega_or_bottom(
                Scalar::Real(Real::from_i64(-1, self.precision)),
                self.precision,
            );
        }
        self.apply(&LOG)
    }

    pub fn exp(&self) -> ExtNum {
        self.apply(&EXP)
    }

    pub fn sin(&self) -> ExtNum {
        self.apply(&SIN)
    }

    pub fn cos(&self) -> ExtNum {
        self.apply(&COS)
    }

    /// Principal square root; negative REALs promote to COMPLEX
    pub fn sqrt(&self) -> ExtNum {
        self.apply(&SQRT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Kind;
    use crate::precision::Precision;
    use core::f64::consts::{E, PI, SQRT_2};

    fn real(x: i64) -> ExtNum {
        ExtNum::real(x, Precision::Exact)
    }

    fn omega(x: i64) -> ExtNum {
        ExtNum::omega(x, Precision::Exact).unwrap()
    }

    fn approx(value: &ExtNum, expected: f64) {
        let actual = value.as_real().map(Real::to_f64).unwrap();
        assert!((actual - expected).abs() < 1e-12, "{actual} != {expected}");
    }

    #[test]
    fn test_abs() {
        assert_eq!(real(-3).abs(), real(3));
        assert_eq!(
            ExtNum::complex(3, 4, Precision::Float).abs(),
            ExtNum::real(5.0, Precision::Float)
        );
        assert_eq!(ExtNum::complex(3, 4, Precision::Exact).abs(), real(5));
        assert_eq!(omega(-2).abs(), omega(2));
        assert!(ExtNum::bottom().abs().is_undefined());
    }

    #[test]
    fn test_sign() {
        assert_eq!(real(-7).sign(), real(-1));
        assert_eq!(real(0).sign(), real(0));
        assert_eq!(ExtNum::real(2.5, Precision::Float).sign(), ExtNum::real(1, Precision::Float));
        assert_eq!(omega(-3).sign(), real(-1));
        assert!(ExtNum::complex(1, 1, Precision::Exact).sign().is_undefined());
        assert!(ExtNum::real(f64::NAN, Precision::Float).sign().is_undefined());

        let imaginary = ExtNum::omega(Complex64::new(0.0, 1.0), Precision::Float).unwrap();
        assert_eq!(imaginary.sign(), ExtNum::real(0, Precision::Float));
    }

    #[test]
    fn test_log() {
        assert_eq!(real(1).log(), real(0));
        assert_eq!(real(0).log(), omega(-1));
        approx(&ExtNum::real(E, Precision::Float).log(), 1.0);

        let negative = ExtNum::real(-1, Precision::Float).log();
        assert_eq!(negative.kind(), Kind::Complex);
        let c = negative.as_complex().unwrap();
        assert!(c.re.abs() < 1e-12);
        assert!((c.im - PI).abs() < 1e-12);
    }

    #[test]
    fn test_log_of_omega() {
        assert!(omega(1).log().is_undefined());
        assert!(omega(-1).log().is_undefined());
        assert_eq!(omega(5).log().precision(), Precision::Exact);

        let log = omega(-5).log();
        assert_eq!(log.kind(), Kind::Omega);
        assert_eq!(log, omega(5).log());

        let complex = ExtNum::omega(Complex64::new(0.0, 2.0), Precision::Float)
            .unwrap()
            .log();
        assert!(matches!(complex.direction(), Some(Scalar::Complex(_))));
    }

    #[test]
    fn test_log_of_complex_zero() {
        for precision in [Precision::Exact, Precision::Float] {
            let log = ExtNum::complex(0, 0, precision).log();
            assert_eq!(log, ExtNum::real(0, precision).log());
            assert_eq!(log.kind(), Kind::Omega);
        }
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(real(4).sqrt(), real(2));
        assert_eq!(real(1).div(4).sqrt().to_string(), "1/2");

        let root2 = real(2).sqrt();
        assert_eq!(root2.precision(), Precision::Exact);
        approx(&root2, SQRT_2);

        let imaginary = ExtNum::real(-4, Precision::Float).sqrt();
        assert_eq!(imaginary.kind(), Kind::Complex);
        let c = imaginary.as_complex().unwrap();
        assert!(c.re.abs() < 1e-12 && (c.im - 2.0).abs() < 1e-12);

        assert_eq!(omega(4).sqrt(), omega(2));
        assert_eq!(omega(-4).sqrt(), omega(2));
    }

    #[test]
    fn test_exp_sin_cos() {
        assert_eq!(real(0).exp(), real(1));
        assert_eq!(real(0).sin(), real(0));
        assert_eq!(real(0).cos(), real(1));
        approx(&ExtNum::one(Precision::Float).exp(), E);

        let e = real(1).exp();
        assert_eq!(e.kind(), Kind::Real);
        assert!(matches!(e.as_real(), Some(Real::Exact(_))));

        let c = ExtNum::complex(0, 1, Precision::Float).exp();
        let c = c.as_complex().unwrap();
        assert!((c.re - 1f64.cos()).abs() < 1e-12 && (c.im - 1f64.sin()).abs() < 1e-12);
    }

    #[test]
    fn test_overflow_in_exact_mode() {
        assert_eq!(real(1000).exp(), omega(1));
        assert!(omega(1000).exp().is_undefined());
    }

    #[test]
    fn test_bottom_is_fixed_point() {
        let b = ExtNum::bottom();
        let functions: [fn(&ExtNum) -> ExtNum; 7] = [
            ExtNum::abs,
            ExtNum::sign,
            ExtNum::log,
            ExtNum::exp,
            ExtNum::sin,
            ExtNum::cos,
            ExtNum::sqrt,
        ];
        for f in functions {
            assert!(f(&b).is_undefined());
        }
    }
}
