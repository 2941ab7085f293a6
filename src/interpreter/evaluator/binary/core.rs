use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary expression.
    ///
    /// `ET` and `OU` evaluate their right operand only when needed. Every
    /// other operator evaluates the left operand, then the right one, then
    /// applies [`Context::eval_binary`].
    pub(crate) fn eval_binary_op(&mut self,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr,
                                 line: usize)
                                 -> EvalResult<Value> {
        if matches!(op, BinaryOperator::And | BinaryOperator::Or) {
            return self.eval_logic(op, left, right, line);
        }

        let left = self.eval(left)?;
        let right = self.eval(right)?;
        Self::eval_binary(op, &left, &right, line)
    }

    /// Applies a binary operator to two evaluated operands.
    ///
    /// Arithmetic goes to [`Context::eval_arithmetic`], comparisons to
    /// [`Context::eval_comparison`]. `ET` and `OU` are applied eagerly here;
    /// expressions use the short-circuiting path instead.
    ///
    /// # Example
    /// ```
    /// use algorithmique::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let (three, four) = (Value::Integer(3), Value::Integer(4));
    ///
    /// let sum = Context::eval_binary(BinaryOperator::Add, &three, &four, 1).unwrap();
    /// assert_eq!(sum, Value::Integer(7));
    ///
    /// // `/` always yields a REEL
    /// let quotient = Context::eval_binary(BinaryOperator::Div, &three, &four, 1).unwrap();
    /// assert_eq!(quotient, Value::Real(0.75));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, IntDiv, Less, LessEqual, Mod, Mul,
            NotEqual, Or, Sub,
        };

        match op {
            Add | Sub | Mul | Div | IntDiv | Mod => Self::eval_arithmetic(op, left, right, line),
            Equal | NotEqual | Less | Greater | LessEqual | GreaterEqual => {
                Self::eval_comparison(op, left, right, line)
            },
            And => Ok(Value::Boolean(left.as_bool(line)? && right.as_bool(line)?)),
            Or => Ok(Value::Boolean(left.as_bool(line)? || right.as_bool(line)?)),
        }
    }
}
