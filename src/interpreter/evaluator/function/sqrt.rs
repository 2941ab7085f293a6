use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::builtin::{expected_number, single_argument},
        },
        value::core::Value,
    },
};

/// Computes the square root of a number.
///
/// Integers are promoted; the result is always a `REEL`. Negative arguments
/// produce a `DomainError`.
///
/// # Parameters
/// - `args`: Slice containing one argument.
/// - `line`: Line number for error reporting.
///
/// # Example
/// ```
/// use algorithmique::interpreter::{evaluator::function::sqrt::sqrt, value::core::Value};
///
/// let r = sqrt(&[Value::Integer(9)], 1).unwrap();
/// assert_eq!(r, Value::Real(3.0));
///
/// assert!(sqrt(&[Value::Real(-1.0)], 1).is_err());
/// ```
pub fn sqrt(args: &[Value], line: usize) -> EvalResult<Value> {
    let value = single_argument("RACINE", args, line)?;
    if !value.is_numeric() {
        return Err(expected_number("RACINE", value, line));
    }

    let x = value.as_real(line)?;
    if x < 0.0 {
        return Err(RuntimeError::DomainError { details: format!("RACINE of a negative number \
                                                                 ({value})"),
                                               line });
    }
    Ok(Value::Real(x.sqrt()))
}
