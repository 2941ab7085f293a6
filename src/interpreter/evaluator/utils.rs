use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{
            coercion::coerce,
            core::Value,
            environment::{Binding, Environment},
        },
    },
};

impl Context {
    /// The scope statements currently run in: the innermost routine call, or
    /// the main program.
    pub(crate) fn scope(&self) -> &Environment {
        self.frames.last().unwrap_or(&self.globals)
    }

    /// Mutable counterpart of [`Context::scope`].
    pub(crate) fn scope_mut(&mut self) -> &mut Environment {
        match self.frames.last_mut() {
            Some(frame) => frame,
            None => &mut self.globals,
        }
    }

    /// Finds the binding a name refers to.
    ///
    /// Inside a routine only its own parameters and locals are visible,
    /// together with the main program's constants. The caller's variables
    /// are not.
    ///
    /// # Errors
    /// `UndeclaredVariable` when nothing visible has that name.
    pub(crate) fn resolve(&self, name: &str, line: usize) -> EvalResult<&Binding> {
        if let Some(binding) = self.scope().get(name) {
            return Ok(binding);
        }
        if !self.frames.is_empty()
           && let Some(binding) = self.globals.get(name)
           && binding.constant
        {
            return Ok(binding);
        }
        Err(RuntimeError::UndeclaredVariable { name: name.to_string(),
                                               line })
    }

    /// Looks up a variable by name.
    ///
    /// # Errors
    /// `UndeclaredVariable` if the name is not visible, and
    /// `UninitializedVariable` if it has not been given a value yet.
    ///
    /// # Example
    /// ```
    /// use algorithmique::{
    ///     ast::DataType,
    ///     error::RuntimeError,
    ///     execution::Limits,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let mut ctx = Context::new(&[], Limits::default());
    /// ctx.globals.declare("x", DataType::Integer, 1).unwrap();
    ///
    /// assert!(matches!(ctx.eval_variable("x", 2),
    ///                  Err(RuntimeError::UninitializedVariable { line: 2, .. })));
    ///
    /// ctx.assign("x", Value::Integer(10), 3).unwrap();
    /// assert_eq!(ctx.eval_variable("x", 4).unwrap(), Value::Integer(10));
    /// ```
    pub fn eval_variable(&self, name: &str, line: usize) -> EvalResult<Value> {
        let binding = self.resolve(name, line)?;
        if binding.value == Value::Uninitialized {
            return Err(RuntimeError::UninitializedVariable { name: name.to_string(),
                                                             line });
        }
        Ok(binding.value.clone())
    }

    /// Stores a value in a declared variable, coercing it to the declared
    /// type.
    ///
    /// # Errors
    /// `UndeclaredVariable`, `ConstantAssignment`, or `TypeMismatch` when the
    /// value cannot be coerced.
    pub fn assign(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        let binding = self.resolve(name, line)?;
        if binding.constant {
            return Err(RuntimeError::ConstantAssignment { name: name.to_string(),
                                                          line });
        }

        let value = coerce(value, binding.data_type, &format!("variable '{name}'"), line)?;
        if let Some(binding) = self.scope_mut().get_mut(name) {
            binding.value = value;
        }
        Ok(())
    }

    /// Charges one loop back-edge to the step budget.
    ///
    /// # Errors
    /// `InfiniteLoopDetected` once the budget is exhausted, `Timeout` once the
    /// watchdog has expired.
    pub(crate) fn tick_loop(&mut self, line: usize) -> EvalResult<()> {
        self.steps = self.steps.saturating_add(1);
        if self.steps > self.limits.max_steps {
            tracing::debug!(limit = self.limits.max_steps, line, "step budget exhausted in a loop");
            return Err(RuntimeError::InfiniteLoopDetected { limit: self.limits.max_steps,
                                                            line });
        }
        self.check_deadline(line)
    }

    /// Charges one routine call to the step budget and checks the call depth.
    ///
    /// # Errors
    /// `UnboundedRecursion` once either budget is exhausted, `Timeout` once
    /// the watchdog has expired.
    pub(crate) fn tick_call(&mut self, name: &str, line: usize) -> EvalResult<()> {
        self.steps = self.steps.saturating_add(1);

        let details = if self.steps > self.limits.max_steps {
            format!("more than {} steps", self.limits.max_steps)
        } else if self.frames.len() >= self.limits.max_call_depth {
            format!("call depth exceeded {}", self.limits.max_call_depth)
        } else {
            return self.check_deadline(line);
        };

        tracing::debug!(routine = name, line, %details, "call budget exhausted");
        Err(RuntimeError::UnboundedRecursion { name: name.to_string(),
                                               details,
                                               line })
    }

    fn check_deadline(&self, line: usize) -> EvalResult<()> {
        if let Some(timeout) = self.limits.timeout
           && self.elapsed() > timeout
        {
            return Err(RuntimeError::Timeout { millis: timeout.as_millis(),
                                               line });
        }
        Ok(())
    }
}
