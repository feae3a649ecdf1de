use num_bigint::BigInt;
use num_rational::BigRational;

/// Multiply `a` with `f` and round the result down to the nearest integer.
/// `None` when `f` is not finite.
pub fn mul_floor(a: u64, f: f64) -> Option<BigInt> {
    let f = BigRational::from_float(f)?;
    Some((f * BigInt::from(a)).floor().to_integer())
}
