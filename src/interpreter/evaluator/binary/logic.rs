use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates `ET` or `OU` with short-circuiting.
    ///
    /// Both operands must be `BOOLEEN`. The right operand is not evaluated
    /// when the left one already decides the result, so
    /// `x <> 0 ET 10 / x > 1` never divides by zero.
    ///
    /// # Parameters
    /// - `op`: `And` or `Or`.
    /// - `left`: Left operand expression.
    /// - `right`: Right operand expression.
    /// - `line`: Line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use algorithmique::{
    ///     ast::{BinaryOperator, Expr},
    ///     execution::Limits,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let mut ctx = Context::new(&[], Limits::default());
    /// let left = Expr::Literal { value: false.into(),
    ///                            line:  1, };
    /// // Never evaluated: `missing` is not declared.
    /// let right = Expr::Variable { name: "missing".to_string(),
    ///                              line: 1, };
    ///
    /// let result = ctx.eval_logic(BinaryOperator::And, &left, &right, 1);
    /// assert_eq!(result.unwrap(), Value::Boolean(false));
    /// ```
    pub fn eval_logic(&mut self,
                      op: BinaryOperator,
                      left: &Expr,
                      right: &Expr,
                      line: usize)
                      -> EvalResult<Value> {
        let left = self.eval(left)?.as_bool(line)?;

        let decided = match op {
            BinaryOperator::And => !left,
            _ => left,
        };
        if decided {
            return Ok(Value::Boolean(left));
        }

        Ok(Value::Boolean(self.eval(right)?.as_bool(line)?))
    }
}
