use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Converts an already integral `f64` to `i64`.
///
/// Callers truncate or round first; this only checks that the value is finite
/// and inside the `i64` range.
///
/// ## Errors
/// `Overflow` for non-finite or out-of-range values.
///
/// ## Example
/// ```
/// use algorithmique::{error::RuntimeError, util::num::f64_to_i64_checked};
///
/// assert_eq!(f64_to_i64_checked(-7.0, 1).unwrap(), -7);
///
/// let err = f64_to_i64_checked(1e20, 5).unwrap_err();
/// assert!(matches!(err, RuntimeError::Overflow { line: 5 }));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_checked(value: f64, line: usize) -> EvalResult<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    if !value.is_finite() || value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(RuntimeError::Overflow { line });
    }
    Ok(value as i64)
}

/// Converts an exponent to `u32` for integer powers.
///
/// ## Errors
/// `DomainError` for negative values, `Overflow` for values beyond `u32`.
///
/// ## Example
/// ```
/// use algorithmique::{error::RuntimeError, util::num::i64_to_u32_checked};
///
/// assert_eq!(i64_to_u32_checked(45, 5).unwrap(), 45);
///
/// let err = i64_to_u32_checked(-1, 5).unwrap_err();
/// assert!(matches!(err, RuntimeError::DomainError { line: 5, .. }));
/// ```
pub fn i64_to_u32_checked(value: i64, line: usize) -> EvalResult<u32> {
    if value < 0 {
        return Err(RuntimeError::DomainError { details: format!("negative exponent {value} \
                                                                 with an ENTIER base"),
                                               line });
    }
    u32::try_from(value).map_err(|_| RuntimeError::Overflow { line })
}

/// Converts a length or count to `i64`.
///
/// ## Errors
/// `Overflow` if the value does not fit.
pub fn usize_to_i64_checked(value: usize, line: usize) -> EvalResult<i64> {
    i64::try_from(value).map_err(|_| RuntimeError::Overflow { line })
}
