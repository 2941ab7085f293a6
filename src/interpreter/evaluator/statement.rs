use std::fmt::Write as _;

use crate::{
    ast::Statement,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{coercion::parse_input, core::Value},
    },
    util::stack::ensure_sufficient_stack,
};

/// How control leaves a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Continue with the next statement.
    Normal,
    /// A `RETOURNER` was executed; unwind to the enclosing routine call.
    Return(Option<Value>),
}

impl Context {
    /// Executes statements in order until one of them returns.
    ///
    /// # Returns
    /// `Flow::Return` as soon as a `RETOURNER` is reached, `Flow::Normal` when
    /// the block ran to completion.
    pub fn exec_block(&mut self, statements: &[Statement]) -> EvalResult<Flow> {
        for statement in statements {
            if let Flow::Return(value) =
                ensure_sufficient_stack(|| self.exec_statement(statement))?
            {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Executes a single statement.
    ///
    /// Assignments coerce the value to the declared type of the target,
    /// `LIRE` consumes one input per target, `ECRIRE` appends the
    /// concatenation of its formatted arguments followed by a newline, and
    /// loops and conditionals run their bodies in the current scope.
    ///
    /// # Errors
    /// Any runtime error raised while evaluating the statement.
    pub fn exec_statement(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::Assignment { target, value, line } => {
                let value = self.eval(value)?;
                self.assign(target, value, *line)?;
            },
            Statement::Read { targets, line } => {
                for target in targets {
                    self.read_into(target, *line)?;
                }
            },
            Statement::Write { values, .. } => {
                let mut text = String::new();
                for value in values {
                    let value = self.eval(value)?;
                    let _ = write!(text, "{value}");
                }
                self.output.push_str(&text);
                self.output.push('\n');
            },
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            line, } => {
                if self.eval(condition)?.as_bool(*line)? {
                    return self.exec_block(then_branch);
                }
                if let Some(else_branch) = else_branch {
                    return self.exec_block(else_branch);
                }
            },
            Statement::For(for_loop) => return self.exec_for(for_loop),
            Statement::While { condition, body, line } => {
                return self.exec_while(condition, body, *line);
            },
            Statement::Repeat { body, condition, line } => {
                return self.exec_repeat(body, condition, *line);
            },
            Statement::Call { name,
                              arguments,
                              line, } => {
                self.call(name, arguments, *line)?;
            },
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => Some(self.eval(expr)?),
                    None => None,
                };
                return Ok(Flow::Return(value));
            },
        }
        Ok(Flow::Normal)
    }

    /// Consumes the next input and stores it in `target`.
    ///
    /// The target is checked before the input is taken, so a `LIRE` into an
    /// undeclared name or a constant leaves the input queue untouched.
    fn read_into(&mut self, target: &str, line: usize) -> EvalResult<()> {
        let binding = self.resolve(target, line)?;
        if binding.constant {
            return Err(RuntimeError::ConstantAssignment { name: target.to_string(),
                                                          line });
        }
        let data_type = binding.data_type;

        let Some(raw) = self.inputs.pop_front() else {
            return Err(RuntimeError::InputExhausted { name: target.to_string(),
                                                      supplied: self.inputs_supplied,
                                                      line });
        };
        tracing::trace!(variable = target, raw = raw.as_str(), "LIRE");

        let value = parse_input(&raw, data_type, target, line)?;
        self.assign(target, value, line)
    }
}
