//! Walkthrough of the ExtNum algebra
//!
//! Run with: RUST_LOG=nebula_extnum=trace cargo run --example demo

use nebula_extnum::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; degradations to Ω and ⊥ are logged at trace level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Nebula ExtNum ===\n");

    real_arithmetic()?;
    float_exponents()?;
    complex_arithmetic()?;
    omega_and_division()?;
    functions();
    json_round_trip()?;

    Ok(())
}

fn real_arithmetic() -> Result<(), ExtNumError> {
    println!("1. Real arithmetic:");

    let a = ExtNum::real(2, Precision::Exact).add(&ExtNum::real(3, Precision::Exact))?;
    let b = ExtNum::real(2, Precision::Float).add(&ExtNum::real(1.5, Precision::Float))?;
    let third = ExtNum::real(1, Precision::Exact).div(3);

    println!("  2 + 3 = {a}");
    println!("  2.0 + 1.5 = {b}");
    println!("  1 / 3 = {third} (exact)\n");
    Ok(())
}

fn float_exponents() -> Result<(), ExtNumError> {
    println!("2. Float exponents:");

    let res = ExtNum::real(2, Precision::Exact).pow(1.5)?;
    println!("  2 ** 1.5 = {res} (use_float={})", res.use_float());

    let c = ExtNum::real(-2, Precision::Exact).pow(0.5)?;
    println!("  (-2) ** 0.5 = {c} (kind={})\n", c.kind());
    Ok(())
}

fn complex_arithmetic() -> Result<(), ExtNumError> {
    println!("3. Complex arithmetic:");

    let c1 = ExtNum::complex(1, 1, Precision::Exact);
    let c2 = ExtNum::complex(0, 2, Precision::Exact);
    println!("  (1+1i) + (0+2i) = {}", c1.add(&c2)?);

    match ExtNum::real(1, Precision::Exact).add(&c1) {
        Ok(v) => println!("  1 + (1+1i) = {v}"),
        Err(e) => println!("  1 + (1+1i) failed (expected): {e}"),
    }
    println!();
    Ok(())
}

fn omega_and_division() -> Result<(), ExtNumError> {
    println!("4. Ω and safe division:");

    let w = omega(2, Precision::Exact)?;
    let z1 = safe_div(2, 0, Precision::Exact);
    let z2 = safe_div(0, 0, Precision::Exact);

    println!("  2/0 → {z1} (is_infinite={})", z1.is_infinite());
    println!("  0/0 → {z2} (is_undefined={})", z2.is_undefined());
    println!("  {w} - {w} = {}", w.sub(&w)?);
    println!("  {w} + Ω(5) = {}", w.add(&omega(5, Precision::Exact)?)?);
    println!("  0 × {w} = {}", w.mul(0));
    println!("  1 < {w}: {}", ExtNum::real(1, Precision::Exact).lt(&w)?);

    match omega(0, Precision::Exact) {
        Ok(v) => println!("  Ω(0) = {v}"),
        Err(e) => println!("  Ω(0) failed (expected): {e}"),
    }
    println!();
    Ok(())
}

fn functions() {
    println!("5. Functions:");

    let four = ExtNum::real(4, Precision::Exact);
    let minus_one = ExtNum::real(-1, Precision::Float);

    println!("  sqrt(4) = {}", four.sqrt());
    println!("  sqrt(-1.0) = {}", minus_one.sqrt());
    println!("  log(0) = {}", ExtNum::real(0, Precision::Exact).log());
    println!("  log(-1.0) = {}", minus_one.log());
    println!("  exp(0) = {}", ExtNum::real(0, Precision::Float).exp());
    println!("  sign(Ω(-3)) = {}\n", ExtNum::real(-3, Precision::Exact).div(0).sign());
}

fn json_round_trip() -> Result<(), ExtNumError> {
    println!("6. JSON round-trip:");

    let r = ExtNum::real(3, Precision::Exact);
    let s = r.encode()?;
    let r2 = ExtNum::decode(&s)?;

    println!("  value: {r}");
    println!("  json_str: {s}");
    println!("  decoded: {r2} (equal={})", r == r2);

    let strict = CodecLimits::strict();
    let oversized = format!(r#"{{"kind":"REAL","val":"{}"}}"#, "9".repeat(8_192));
    match ExtNum::decode_with_limits(&oversized, &strict) {
        Ok(_) => println!("  oversized literal accepted"),
        Err(e) => println!("  oversized literal rejected (expected): {e}"),
    }
    Ok(())
}
