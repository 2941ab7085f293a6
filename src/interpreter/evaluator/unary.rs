use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates the operand of a unary expression, then applies the
    /// operator.
    pub(crate) fn eval_unary_op(&mut self,
                                op: UnaryOperator,
                                expr: &Expr,
                                line: usize)
                                -> EvalResult<Value> {
        let value = self.eval(expr)?;
        Self::eval_unary(op, &value, line)
    }

    /// Applies `-` or `NON` to an already evaluated operand.
    ///
    /// `-` keeps the type of an `ENTIER` or `REEL` operand and overflows on
    /// the smallest `ENTIER`. `NON` requires a `BOOLEEN`.
    ///
    /// # Example
    /// ```
    /// use algorithmique::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let v = Context::eval_unary(UnaryOperator::Negate, &Value::Integer(5), 1).unwrap();
    /// assert_eq!(v, Value::Integer(-5));
    ///
    /// let v = Context::eval_unary(UnaryOperator::Not, &Value::Boolean(false), 1).unwrap();
    /// assert_eq!(v, Value::Boolean(true));
    ///
    /// assert!(Context::eval_unary(UnaryOperator::Negate, &Value::Integer(i64::MIN), 1).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => match value {
                Value::Integer(n) => n.checked_neg()
                                      .map(Value::Integer)
                                      .ok_or(RuntimeError::Overflow { line }),
                Value::Real(r) => Ok(Value::Real(-r)),
                other => Err(RuntimeError::TypeMismatch { details: format!("cannot negate a {}",
                                                                           other.type_name()),
                                                          line }),
            },
            UnaryOperator::Not => Ok(Value::Boolean(!value.as_bool(line)?)),
        }
    }
}
