use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::{f64_to_i64_checked, usize_to_i64_checked},
};

/// Extracts the only argument of a one-argument built-in.
///
/// # Errors
/// `ArityError` when `args` does not hold exactly one value.
pub(crate) fn single_argument<'a>(name: &str, args: &'a [Value], line: usize) -> EvalResult<&'a Value> {
    match args {
        [value] => Ok(value),
        _ => Err(RuntimeError::ArityError { name: name.to_string(),
                                            expected: 1,
                                            found: args.len(),
                                            line }),
    }
}

/// Builds the error reported when a built-in receives a value of the wrong
/// type.
pub(crate) fn expected_number(name: &str, value: &Value, line: usize) -> RuntimeError {
    RuntimeError::TypeMismatch { details: format!("{name} expects an ENTIER or a REEL, found {}",
                                                  value.type_name()),
                                 line }
}

/// Returns the absolute value of a number, keeping its type.
///
/// # Example
/// ```
/// use algorithmique::interpreter::{evaluator::function::builtin::abs, value::core::Value};
///
/// assert_eq!(abs(&[Value::Integer(-4)], 1).unwrap(), Value::Integer(4));
/// assert_eq!(abs(&[Value::Real(-2.5)], 1).unwrap(), Value::Real(2.5));
/// assert!(abs(&[Value::Integer(i64::MIN)], 1).is_err());
/// ```
pub fn abs(args: &[Value], line: usize) -> EvalResult<Value> {
    match single_argument("ABS", args, line)? {
        Value::Integer(n) => n.checked_abs()
                              .map(Value::Integer)
                              .ok_or(RuntimeError::Overflow { line }),
        Value::Real(r) => Ok(Value::Real(r.abs())),
        other => Err(expected_number("ABS", other, line)),
    }
}

/// Multiplies a number by itself, keeping its type.
pub fn square(args: &[Value], line: usize) -> EvalResult<Value> {
    match single_argument("CARRE", args, line)? {
        Value::Integer(n) => n.checked_mul(*n)
                              .map(Value::Integer)
                              .ok_or(RuntimeError::Overflow { line }),
        Value::Real(r) => {
            let squared = r * r;
            if squared.is_finite() {
                Ok(Value::Real(squared))
            } else {
                Err(RuntimeError::Overflow { line })
            }
        },
        other => Err(expected_number("CARRE", other, line)),
    }
}

/// Returns the integer part of a number, truncated towards zero.
///
/// # Example
/// ```
/// use algorithmique::interpreter::{evaluator::function::builtin::trunc, value::core::Value};
///
/// assert_eq!(trunc(&[Value::Real(-3.7)], 1).unwrap(), Value::Integer(-3));
/// assert_eq!(trunc(&[Value::Integer(8)], 1).unwrap(), Value::Integer(8));
/// ```
pub fn trunc(args: &[Value], line: usize) -> EvalResult<Value> {
    match single_argument("ENT", args, line)? {
        Value::Integer(n) => Ok(Value::Integer(*n)),
        Value::Real(r) => Ok(Value::Integer(f64_to_i64_checked(r.trunc(), line)?)),
        other => Err(expected_number("ENT", other, line)),
    }
}

/// Rounds a number to the nearest `ENTIER`, halves away from zero.
///
/// # Example
/// ```
/// use algorithmique::interpreter::{evaluator::function::builtin::round, value::core::Value};
///
/// assert_eq!(round(&[Value::Real(2.5)], 1).unwrap(), Value::Integer(3));
/// assert_eq!(round(&[Value::Real(-2.5)], 1).unwrap(), Value::Integer(-3));
/// assert_eq!(round(&[Value::Real(2.49)], 1).unwrap(), Value::Integer(2));
/// ```
pub fn round(args: &[Value], line: usize) -> EvalResult<Value> {
    match single_argument("ARRONDI", args, line)? {
        Value::Integer(n) => Ok(Value::Integer(*n)),
        Value::Real(r) => Ok(Value::Integer(f64_to_i64_checked(r.round(), line)?)),
        other => Err(expected_number("ARRONDI", other, line)),
    }
}

/// Counts the characters of a `CHAINE`. A `CARACTERE` has length 1.
///
/// Characters are Unicode scalar values, so `"été"` has length 3.
///
/// # Example
/// ```
/// use algorithmique::interpreter::{evaluator::function::builtin::length, value::core::Value};
///
/// let r = length(&[Value::String("été".to_string())], 1).unwrap();
/// assert_eq!(r, Value::Integer(3));
/// ```
pub fn length(args: &[Value], line: usize) -> EvalResult<Value> {
    match single_argument("LONGUEUR", args, line)? {
        Value::String(s) => Ok(Value::Integer(usize_to_i64_checked(s.chars().count(), line)?)),
        Value::Character(_) => Ok(Value::Integer(1)),
        other => Err(RuntimeError::TypeMismatch { details: format!("LONGUEUR expects a CHAINE, \
                                                                    found {}",
                                                                   other.type_name()),
                                                  line }),
    }
}
