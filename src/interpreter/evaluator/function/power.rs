use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::builtin::expected_number},
        value::core::Value,
    },
    util::num::i64_to_u32_checked,
};

/// Raises a number to an `ENTIER` power.
///
/// - An `ENTIER` base gives an `ENTIER`; the exponent must not be negative
///   and the result must fit in 64 bits.
/// - A `REEL` base gives a `REEL`; raising `0.0` to a negative power is a
///   division by zero.
///
/// # Parameters
/// - `args`: The base and the exponent.
/// - `line`: Line number for error reporting.
///
/// # Example
/// ```
/// use algorithmique::interpreter::{evaluator::function::power::power, value::core::Value};
///
/// let r = power(&[Value::Integer(2), Value::Integer(10)], 1).unwrap();
/// assert_eq!(r, Value::Integer(1024));
///
/// let r = power(&[Value::Real(2.0), Value::Integer(-1)], 1).unwrap();
/// assert_eq!(r, Value::Real(0.5));
///
/// // Negative exponent with an ENTIER base
/// assert!(power(&[Value::Integer(2), Value::Integer(-1)], 1).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn power(args: &[Value], line: usize) -> EvalResult<Value> {
    let [base, exponent] = args else {
        return Err(RuntimeError::ArityError { name: "PUISSANCE".to_string(),
                                              expected: 2,
                                              found: args.len(),
                                              line });
    };

    let Value::Integer(exponent) = exponent else {
        return Err(RuntimeError::TypeMismatch { details: format!("PUISSANCE expects an ENTIER \
                                                                  exponent, found {}",
                                                                 exponent.type_name()),
                                                line });
    };

    match base {
        Value::Integer(base) => {
            let exponent = i64_to_u32_checked(*exponent, line)?;
            base.checked_pow(exponent)
                .map(Value::Integer)
                .ok_or(RuntimeError::Overflow { line })
        },
        Value::Real(base) => {
            if *base == 0.0 && *exponent < 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            let result = base.powf(*exponent as f64);
            if result.is_finite() {
                Ok(Value::Real(result))
            } else {
                Err(RuntimeError::Overflow { line })
            }
        },
        other => Err(expected_number("PUISSANCE", other, line)),
    }
}
