use crate::{
    ast::{DataType, Expr, ForLoop, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            statement::Flow,
        },
        value::core::Value,
    },
};

impl Context {
    /// Executes a `POUR` loop.
    ///
    /// The loop variable must be a declared, non-constant `ENTIER`. The start,
    /// end and step expressions are evaluated once, before the first
    /// iteration, and must all be `ENTIER`. The variable takes every value
    /// from `start` towards `end` inclusive, moving by `step`; a negative step
    /// counts down. Assigning the variable inside the body does not change
    /// which values it takes next.
    ///
    /// # Errors
    /// `InvalidLoopStep` for a step of zero, `TypeMismatch` for non-`ENTIER`
    /// bounds or variable, and `InfiniteLoopDetected` once the step budget
    /// runs out.
    ///
    /// # Example
    /// ```
    /// use algorithmique::{
    ///     ast::{DataType, Expr, ForLoop, LiteralValue},
    ///     execution::Limits,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let mut ctx = Context::new(&[], Limits::default());
    /// ctx.globals.declare("i", DataType::Integer, 1).unwrap();
    ///
    /// let literal = |n| Expr::Literal { value: LiteralValue::Integer(n),
    ///                                   line:  1, };
    ///
    /// // POUR i DE 10 A 1 PAS -3 FAIRE FINPOUR
    /// let for_loop = ForLoop { var:   "i".to_string(),
    ///                          start: literal(10),
    ///                          end:   literal(1),
    ///                          step:  Some(literal(-3)),
    ///                          body:  Vec::new(),
    ///                          line:  1, };
    ///
    /// ctx.exec_for(&for_loop).unwrap();
    ///
    /// // 10, 7, 4, 1
    /// assert_eq!(ctx.eval_variable("i", 2).unwrap(), Value::Integer(1));
    /// assert_eq!(ctx.steps, 4);
    /// ```
    pub fn exec_for(&mut self, for_loop: &ForLoop) -> EvalResult<Flow> {
        let line = for_loop.line;
        self.check_loop_variable(&for_loop.var, line)?;

        let start = self.eval(&for_loop.start)?.as_integer(line)?;
        let end = self.eval(&for_loop.end)?.as_integer(line)?;
        let step = match &for_loop.step {
            Some(step) => self.eval(step)?.as_integer(line)?,
            None => 1,
        };
        if step == 0 {
            return Err(RuntimeError::InvalidLoopStep { line });
        }

        let mut counter = start;
        while (step > 0 && counter <= end) || (step < 0 && counter >= end) {
            self.assign(&for_loop.var, Value::Integer(counter), line)?;

            if let Flow::Return(value) = self.exec_block(&for_loop.body)? {
                return Ok(Flow::Return(value));
            }
            self.tick_loop(line)?;

            // Past i64 range means past the bound as well.
            let Some(next) = counter.checked_add(step) else {
                break;
            };
            counter = next;
        }

        Ok(Flow::Normal)
    }

    /// Executes a `TANT QUE` loop.
    ///
    /// The condition must be `BOOLEEN` and is tested before every iteration,
    /// so the body may run zero times.
    pub fn exec_while(&mut self,
                      condition: &Expr,
                      body: &[Statement],
                      line: usize)
                      -> EvalResult<Flow> {
        while self.eval(condition)?.as_bool(line)? {
            if let Flow::Return(value) = self.exec_block(body)? {
                return Ok(Flow::Return(value));
            }
            self.tick_loop(line)?;
        }
        Ok(Flow::Normal)
    }

    /// Executes a `REPETER ... JUSQU'A` loop.
    ///
    /// The body runs at least once; the loop ends as soon as the condition
    /// evaluates to `VRAI`.
    pub fn exec_repeat(&mut self,
                       body: &[Statement],
                       condition: &Expr,
                       line: usize)
                       -> EvalResult<Flow> {
        loop {
            if let Flow::Return(value) = self.exec_block(body)? {
                return Ok(Flow::Return(value));
            }
            if self.eval(condition)?.as_bool(line)? {
                return Ok(Flow::Normal);
            }
            self.tick_loop(line)?;
        }
    }

    fn check_loop_variable(&self, name: &str, line: usize) -> EvalResult<()> {
        let binding = self.resolve(name, line)?;
        if binding.constant {
            return Err(RuntimeError::ConstantAssignment { name: name.to_string(),
                                                          line });
        }
        if binding.data_type != DataType::Integer {
            return Err(RuntimeError::TypeMismatch { details: format!("the POUR variable \
                                                                      '{name}' must be an \
                                                                      ENTIER, not {}",
                                                                     binding.data_type),
                                                    line });
        }
        Ok(())
    }
}
