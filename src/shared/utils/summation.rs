//! Three ways of computing `1 + 2 + ... + n`.
//!
//! Every variant rejects `n < 1` and reports overflow instead of wrapping.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummationError {
    #[error("Input must be a positive integer.")]
    NotPositive,
    #[error("Input must be a positive integer.")]
    NotInteger,
    #[error("Sum of 1..={0} does not fit in a 64-bit integer")]
    Overflow(i64),
}

pub type SummationResult = Result<i64, SummationError>;

fn validate_input(n: i64) -> Result<(), SummationError> {
    if n < 1 {
        return Err(SummationError::NotPositive);
    }
    Ok(())
}

/// Convert a floating point argument into the integer the summation
/// functions accept. Fractional, non-finite and out-of-range values are rejected.
pub fn integer_input(n: f64) -> Result<i64, SummationError> {
    if !n.is_finite() || n.fract() != 0.0 || n < i64::MIN as f64 || n >= i64::MAX as f64 {
        return Err(SummationError::NotInteger);
    }
    let n = n as i64;
    validate_input(n)?;
    Ok(n)
}

/// Largest `n` whose sum `1..=n` fits in an `i64`.
pub const MAX_INPUT: i64 = 4_294_967_295;

/// Closed form: `n(n+1)/2`.
pub fn sum_to_n_a(n: i64) -> SummationResult {
    validate_input(n)?;
    // Halve whichever factor is even before multiplying.
    let (a, b) = if n % 2 == 0 { (n / 2, n + 1) } else { (n, (n + 1) / 2) };
    a.checked_mul(b).ok_or(SummationError::Overflow(n))
}

/// Iterative accumulation.
pub fn sum_to_n_b(n: i64) -> SummationResult {
    validate_input(n)?;
    if n > MAX_INPUT {
        return Err(SummationError::Overflow(n));
    }
    let mut sum: i64 = 0;
    for i in 1..=n {
        sum = sum.checked_add(i).ok_or(SummationError::Overflow(n))?;
    }
    Ok(sum)
}

/// Build the sequence `1..=n`, then reduce it.
pub fn sum_to_n_c(n: i64) -> SummationResult {
    validate_input(n)?;
    // The sequence is only materialized when its sum fits.
    if n > MAX_INPUT {
        return Err(SummationError::Overflow(n));
    }
    let numbers: Vec<i64> = (1..=n).collect();
    numbers
        .iter()
        .try_fold(0i64, |sum, &current| sum.checked_add(current))
        .ok_or(SummationError::Overflow(n))
}
