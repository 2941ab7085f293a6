use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Floored integer division: the quotient is rounded towards negative
/// infinity.
///
/// # Errors
/// `DivisionByZero` when `b` is zero, `Overflow` for `i64::MIN DIV -1`.
///
/// # Example
/// ```
/// use algorithmique::interpreter::evaluator::binary::arithmetic::floored_div;
///
/// assert_eq!(floored_div(7, 2, 1).unwrap(), 3);
/// assert_eq!(floored_div(-7, 2, 1).unwrap(), -4);
/// assert!(floored_div(1, 0, 1).is_err());
/// ```
pub fn floored_div(a: i64, b: i64, line: usize) -> EvalResult<i64> {
    if b == 0 {
        return Err(RuntimeError::DivisionByZero { line });
    }
    let quotient = a.checked_div(b).ok_or(RuntimeError::Overflow { line })?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        return Ok(quotient - 1);
    }
    Ok(quotient)
}

/// Floored modulo: the result has the sign of the divisor.
///
/// # Errors
/// `DivisionByZero` when `b` is zero.
///
/// # Example
/// ```
/// use algorithmique::interpreter::evaluator::binary::arithmetic::floored_mod;
///
/// assert_eq!(floored_mod(7, 3, 1).unwrap(), 1);
/// assert_eq!(floored_mod(-7, 3, 1).unwrap(), 2);
/// assert_eq!(floored_mod(7, -3, 1).unwrap(), -2);
/// assert_eq!(floored_mod(i64::MIN, -1, 1).unwrap(), 0);
/// ```
pub fn floored_mod(a: i64, b: i64, line: usize) -> EvalResult<i64> {
    if b == 0 {
        return Err(RuntimeError::DivisionByZero { line });
    }
    // Only i64::MIN % -1 overflows, and its remainder is zero.
    let remainder = a.checked_rem(b).unwrap_or(0);
    if remainder != 0 && ((remainder < 0) != (b < 0)) {
        return Ok(remainder + b);
    }
    Ok(remainder)
}

fn checked_real(value: f64, line: usize) -> EvalResult<Value> {
    if value.is_finite() {
        Ok(Value::Real(value))
    } else {
        Err(RuntimeError::Overflow { line })
    }
}

impl Context {
    /// Evaluates an arithmetic operator.
    ///
    /// - Two `ENTIER` operands use checked 64-bit arithmetic, except `/`
    ///   which always yields a `REEL`.
    /// - A `REEL` on either side promotes the other operand.
    /// - `DIV` and `MOD` require two `ENTIER` operands.
    /// - `+` on two text operands concatenates them.
    ///
    /// # Errors
    /// `DivisionByZero`, `Overflow` when a result leaves the `ENTIER` range or
    /// is not a finite `REEL`, and `TypeMismatch` for any other pairing.
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, IntDiv, Mod, Mul, Sub};

        match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => {
                let (a, b) = (*a, *b);
                let result = match op {
                    Add => a.checked_add(b),
                    Sub => a.checked_sub(b),
                    Mul => a.checked_mul(b),
                    IntDiv => return Ok(Value::Integer(floored_div(a, b, line)?)),
                    Mod => return Ok(Value::Integer(floored_mod(a, b, line)?)),
                    _ => return Self::eval_real_arithmetic(op, left, right, line),
                };
                result.map(Value::Integer).ok_or(RuntimeError::Overflow { line })
            },
            (a, b) if a.is_numeric() && b.is_numeric() => {
                if matches!(op, IntDiv | Mod) {
                    return Err(RuntimeError::TypeMismatch { details: format!("{op} needs two \
                                                                              ENTIER operands, \
                                                                              found {} and {}",
                                                                             a.type_name(),
                                                                             b.type_name()),
                                                            line });
                }
                Self::eval_real_arithmetic(op, left, right, line)
            },
            (a, b) if op == Add && a.is_text() && b.is_text() => {
                Ok(Value::String(format!("{a}{b}")))
            },
            (a, b) => Err(RuntimeError::TypeMismatch { details: format!("cannot apply {op} to \
                                                                         {} and {}",
                                                                        a.type_name(),
                                                                        b.type_name()),
                                                       line }),
        }
    }

    fn eval_real_arithmetic(op: BinaryOperator,
                            left: &Value,
                            right: &Value,
                            line: usize)
                            -> EvalResult<Value> {
        let a = left.as_real(line)?;
        let b = right.as_real(line)?;

        let result = match op {
            BinaryOperator::Add => a + b,
            BinaryOperator::Sub => a - b,
            BinaryOperator::Mul => a * b,
            BinaryOperator::Div => {
                if b == 0.0 {
                    return Err(RuntimeError::DivisionByZero { line });
                }
                a / b
            },
            _ => {
                return Err(RuntimeError::TypeMismatch { details: format!("{op} is not an \
                                                                          arithmetic operator"),
                                                        line });
            },
        };

        checked_real(result, line)
    }
}
