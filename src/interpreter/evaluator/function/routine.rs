use crate::{
    ast::{Expr, RoutineDef, RoutineKind},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            statement::Flow,
        },
        value::{coercion::coerce, core::Value, environment::Environment},
    },
    util::stack::ensure_sufficient_stack,
};

impl Context {
    /// Executes a user-defined procedure or function.
    ///
    /// Arguments are evaluated left to right in the caller's scope and
    /// coerced to the parameter types. The routine then runs in a fresh scope
    /// holding its parameters and its locals, which start uninitialized. A
    /// function's result is coerced to its declared return type.
    ///
    /// # Errors
    /// - `ArityError` when the argument count differs from the parameter
    ///   count.
    /// - `UnboundedRecursion` once the step or depth budget runs out.
    /// - `MissingReturn` when a function body ends without `RETOURNER`.
    ///
    /// # Returns
    /// The function result, or `None` for a procedure.
    #[tracing::instrument(level = "trace", skip_all, fields(routine = %routine.name))]
    pub(crate) fn call_routine(&mut self,
                               routine: &RoutineDef,
                               arguments: &[Expr],
                               line: usize)
                               -> EvalResult<Option<Value>> {
        if arguments.len() != routine.params.len() {
            return Err(RuntimeError::ArityError { name: routine.name.clone(),
                                                  expected: routine.params.len(),
                                                  found: arguments.len(),
                                                  line });
        }

        let values = self.eval_arguments(arguments)?;
        self.tick_call(&routine.name, line)?;

        let frame = Self::bind_frame(routine, values, line)?;
        self.frames.push(frame);
        tracing::trace!(depth = self.frames.len(), steps = self.steps, "entering routine");

        let flow = ensure_sufficient_stack(|| self.exec_block(&routine.body));
        self.frames.pop();

        match (routine.kind, flow?) {
            (RoutineKind::Procedure, _) => Ok(None),
            (RoutineKind::Function, Flow::Return(Some(value))) => match routine.return_type {
                Some(return_type) => {
                    let destination = format!("the result of '{}'", routine.name);
                    coerce(value, return_type, &destination, line).map(Some)
                },
                None => Ok(Some(value)),
            },
            (RoutineKind::Function, _) => {
                Err(RuntimeError::MissingReturn { name: routine.name.clone(),
                                                  line: routine.line, })
            },
        }
    }

    fn bind_frame(routine: &RoutineDef, values: Vec<Value>, line: usize) -> EvalResult<Environment> {
        let mut frame = Environment::new();

        for (param, value) in routine.params.iter().zip(values) {
            let destination = format!("parameter '{}' of '{}'", param.name, routine.name);
            let value = coerce(value, param.data_type, &destination, line)?;
            frame.define(&param.name, param.data_type, value, false, routine.line)?;
        }
        Self::declare_all(&mut frame, &routine.locals)?;

        Ok(frame)
    }
}
