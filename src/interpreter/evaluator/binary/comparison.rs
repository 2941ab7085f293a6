use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Maps a comparison operator and the ordering of its operands to the result.
///
/// An unordered pair is only "not equal".
#[must_use]
pub fn ordering_op_result(op: BinaryOperator, ordering: Option<Ordering>) -> bool {
    use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

    let Some(ordering) = ordering else {
        return op == NotEqual;
    };

    match op {
        Equal => ordering == Ordering::Equal,
        NotEqual => ordering != Ordering::Equal,
        Less => ordering == Ordering::Less,
        Greater => ordering == Ordering::Greater,
        LessEqual => ordering != Ordering::Greater,
        GreaterEqual => ordering != Ordering::Less,
        _ => false,
    }
}

impl Context {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// Numbers compare with numbers (an `ENTIER` against a `REEL` is promoted),
    /// text with text (`CHAINE` and `CARACTERE` alike, by code point) and
    /// booleans with booleans (`FAUX < VRAI`). Any other pairing is a
    /// `TypeMismatch`.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    /// - `line`: Current line number used for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    ///
    /// # Example
    /// ```
    /// use algorithmique::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let a = Value::Integer(3);
    /// let b = Value::Real(5.0);
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Less, &a, &b, 1);
    /// assert_eq!(result.unwrap(), Value::Boolean(true));
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Equal,
    ///                                       &Value::Character('a'),
    ///                                       &Value::String("a".to_string()),
    ///                                       1);
    /// assert_eq!(result.unwrap(), Value::Boolean(true));
    ///
    /// assert!(Context::eval_comparison(BinaryOperator::Equal,
    ///                                  &Value::Integer(1),
    ///                                  &Value::String("1".to_string()),
    ///                                  1).is_err());
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        let ordering = match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (a, b) if a.is_numeric() && b.is_numeric() => {
                a.as_real(line)?.partial_cmp(&b.as_real(line)?)
            },
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            (a, b) => match (a.as_text(), b.as_text()) {
                (Some(a), Some(b)) => Some(a.cmp(&b)),
                _ => {
                    return Err(RuntimeError::TypeMismatch { details: format!("cannot compare \
                                                                              {} and {} with \
                                                                              {op}",
                                                                             a.type_name(),
                                                                             b.type_name()),
                                                            line });
                },
            },
        };

        Ok(Value::Boolean(ordering_op_result(op, ordering)))
    }
}
