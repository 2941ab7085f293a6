use std::{
    collections::{HashMap, VecDeque},
    rc::Rc,
    time::Instant,
};

use crate::{
    ast::{ConstDecl, Expr, Program, RoutineDef, VarDecl},
    error::RuntimeError,
    execution::Limits,
    interpreter::value::{
        coercion::coerce,
        core::Value,
        environment::{Environment, name_key},
    },
    util::stack::ensure_sufficient_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state for one execution: the main
/// program's scope, one scope per active routine call, the declared
/// routines, the pending inputs, the output produced so far and the budgets
/// that guarantee termination.
///
/// ## Usage
///
/// A `Context` is created for a single program run and discarded afterwards;
/// nothing is shared between runs.
pub struct Context {
    /// Constants and variables of the main program.
    pub globals:         Environment,
    /// One scope per routine invocation, innermost last.
    pub frames:          Vec<Environment>,
    /// Declared procedures and functions, keyed by [`name_key`].
    pub routines:        HashMap<String, Rc<RoutineDef>>,
    /// Inputs not yet consumed by `LIRE`.
    pub inputs:          VecDeque<String>,
    /// How many inputs were supplied in total.
    pub inputs_supplied: usize,
    /// Everything `ECRIRE` has written so far.
    pub output:          String,
    /// Loop back-edges and routine calls performed so far.
    pub steps:           usize,
    /// Step, depth and time budgets.
    pub limits:          Limits,
    started:             Instant,
}

impl Context {
    /// Creates a fresh context for one run.
    ///
    /// # Parameters
    /// - `inputs`: Values consumed in order by `LIRE`.
    /// - `limits`: Budgets for the run.
    ///
    /// # Example
    /// ```
    /// use algorithmique::{execution::Limits, interpreter::evaluator::core::Context};
    ///
    /// let ctx = Context::new(&["5".to_string()], Limits::default());
    /// assert_eq!(ctx.inputs_supplied, 1);
    /// assert!(ctx.output.is_empty());
    /// ```
    #[must_use]
    pub fn new(inputs: &[String], limits: Limits) -> Self {
        Self { globals: Environment::new(),
               frames: Vec::new(),
               routines: HashMap::new(),
               inputs: inputs.iter().cloned().collect(),
               inputs_supplied: inputs.len(),
               output: String::new(),
               steps: 0,
               limits,
               started: Instant::now() }
    }

    /// Runs a parsed program.
    ///
    /// Routines are registered first, so they may be called from anywhere.
    /// Constants are then evaluated in order, variables declared, and the
    /// main block executed.
    ///
    /// # Errors
    /// The first runtime error raised. Output written and variables assigned
    /// before the error stay in the context.
    #[tracing::instrument(level = "debug", skip_all, fields(program = program.name.as_deref()))]
    pub fn run(&mut self, program: &Program) -> EvalResult<()> {
        self.register_routines(&program.routines)?;
        self.define_constants(&program.constants)?;
        Self::declare_all(&mut self.globals, &program.declarations)?;

        self.exec_block(&program.statements)?;

        tracing::debug!(steps = self.steps, output_len = self.output.len(), "program finished");
        Ok(())
    }

    fn register_routines(&mut self, routines: &[RoutineDef]) -> EvalResult<()> {
        for routine in routines {
            let key = name_key(&routine.name);
            if self.routines.contains_key(&key) {
                return Err(RuntimeError::FunctionAlreadyDefined { name: routine.name.clone(),
                                                                  line: routine.line, });
            }
            self.routines.insert(key, Rc::new(routine.clone()));
        }
        Ok(())
    }

    fn define_constants(&mut self, constants: &[ConstDecl]) -> EvalResult<()> {
        for constant in constants {
            let value = self.eval(&constant.value)?;
            let Some(data_type) = constant.data_type.or_else(|| value.data_type()) else {
                return Err(RuntimeError::UninitializedVariable { name: constant.name.clone(),
                                                                 line: constant.line, });
            };
            let value = coerce(value,
                               data_type,
                               &format!("constant '{}'", constant.name),
                               constant.line)?;
            self.globals
                .define(&constant.name, data_type, value, true, constant.line)?;
        }
        Ok(())
    }

    /// Declares every name of `declarations` in `scope`, uninitialized.
    pub(crate) fn declare_all(scope: &mut Environment, declarations: &[VarDecl]) -> EvalResult<()> {
        for declaration in declarations {
            for name in &declaration.names {
                scope.declare(name, declaration.data_type, declaration.line)?;
            }
        }
        Ok(())
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation.
    /// The evaluator dispatches based on expression variant:
    /// literals, variables, unary and binary operations and calls.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The value of the expression.
    ///
    /// # Example
    /// ```
    /// use algorithmique::{
    ///     ast::{BinaryOperator, Expr, LiteralValue},
    ///     execution::Limits,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let mut ctx = Context::new(&[], Limits::default());
    /// let literal = |n| Box::new(Expr::Literal { value: LiteralValue::Integer(n),
    ///                                             line:  1, });
    /// let expr = Expr::BinaryOp { left:  literal(7),
    ///                             op:    BinaryOperator::Mod,
    ///                             right: literal(-3),
    ///                             line:  1, };
    ///
    /// assert_eq!(ctx.eval(&expr).unwrap(), Value::Integer(-2));
    /// ```
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        ensure_sufficient_stack(|| match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Variable { name, line } => self.eval_variable(name, *line),
            Expr::UnaryOp { op, expr, line } => self.eval_unary_op(*op, expr, *line),
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => self.eval_binary_op(left, *op, right, *line),
            Expr::Call { name,
                         arguments,
                         line, } => self.eval_call_expression(name, arguments, *line),
        })
    }

    /// Time spent since the context was created.
    pub(crate) fn elapsed(&self) -> std::time::Duration {
        self.started.elapsed()
    }
}
