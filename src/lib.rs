//! # algorithmique
//!
//! algorithmique is an interpreter for the French algorithmic pseudo-code used
//! to teach programming (`ALGORITHME`, `SI ... ALORS`, `POUR ... FINPOUR`,
//! `TANT QUE`, `LIRE`, `ECRIRE`, ...). It lexes, parses and evaluates a
//! program against a list of inputs and reports the produced output, the
//! final variables and the first error, if any.
//!
//! Every run is bounded: loops and routine calls share a step budget, call
//! nesting is capped, and an optional wall-clock watchdog can be set through
//! [`execution::Limits`].

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::panic::{self, AssertUnwindSafe};

use crate::{
    error::ExecutionError,
    execution::{ExecutionResult, Limits, VariableSnapshot},
    interpreter::{evaluator::core::Context, lexer::tokenize, parser::core::parse},
};

/// Defines the structure of parsed programs.
///
/// This module declares the declarations, statements and expressions a
/// program is made of, as built by the parser and walked by the evaluator.
/// Every node carries the source line it starts on.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// Each phase has its own error enum carrying the source line; the execution
/// driver wraps them in [`error::ExecutionError`], whose `Display` form is the
/// message shown to users.
pub mod error;
/// Inputs and outputs of a run.
///
/// The step, depth and time budgets, the result of a run with its variable
/// snapshot, and the serializable request and response used by the CLI.
pub mod execution;
/// Lexer, parser, values and evaluator.
///
/// # Responsibilities
/// - Converts source text into tokens with line and column.
/// - Builds the syntax tree and reports the first grammar error.
/// - Executes the tree against a fresh context for every run.
pub mod interpreter;
/// The published language reference.
///
/// Generated from the same keyword, type and built-in tables the lexer and
/// evaluator use.
pub mod syntax;
/// General utilities for safe numeric conversion and stack growth.
///
/// # Responsibilities
/// - Convert between `i64`, `u32`, `usize` and `f64` without silent data loss.
/// - Keep deep recursion in user programs from overflowing the native stack.
pub mod util;

/// Runs a program with the default [`Limits`].
///
/// Inputs are consumed in order by `LIRE`. The run never panics and never
/// blocks: every failure, including a fault inside the interpreter, is
/// reported through [`ExecutionResult::error`].
///
/// # Examples
/// ```
/// use algorithmique::{execute, interpreter::value::core::Value};
///
/// let source = "\
/// ALGORITHME Somme
/// VARIABLES
///     a, b : ENTIER
/// DEBUT
///     LIRE(a, b)
///     ECRIRE(\"Somme = \", a + b)
/// FIN";
///
/// let result = execute(source, &["2".to_string(), "3".to_string()]);
///
/// assert!(result.error.is_none());
/// assert_eq!(result.output, "Somme = 5\n");
/// assert_eq!(result.variables.get("b"), Some(&Value::Integer(3)));
///
/// // A runtime error keeps the output produced before it.
/// let result = execute("ECRIRE(\"avant\")\nECRIRE(1 / 0)", &[]);
/// assert_eq!(result.output, "avant\n");
/// assert_eq!(result.error.unwrap().kind(), "DivisionByZero");
/// ```
#[must_use]
pub fn execute(source: &str, inputs: &[String]) -> ExecutionResult {
    execute_with_limits(source, inputs, &Limits::default())
}

/// Runs a program with explicit budgets.
///
/// The pipeline is: lex, parse, then evaluate in a fresh [`Context`]. A
/// lexing or parsing failure yields an empty output and no variables; a
/// runtime failure keeps the output and the variable values as they stood
/// when the failing statement ran.
#[must_use]
#[tracing::instrument(level = "debug", skip_all, fields(source_len = source.len(), inputs = inputs.len()))]
pub fn execute_with_limits(source: &str, inputs: &[String], limits: &Limits) -> ExecutionResult {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| run(source, inputs, limits)));

    let result = outcome.unwrap_or_else(|payload| {
                            let message = payload.downcast_ref::<&str>()
                                                 .map(ToString::to_string)
                                                 .or_else(|| payload.downcast_ref::<String>().cloned())
                                                 .unwrap_or_else(|| "unknown panic".to_string());
                            tracing::error!(%message, "interpreter panicked");
                            ExecutionResult::failed(ExecutionError::Internal { message })
                        });

    match &result.error {
        Some(error) => tracing::debug!(kind = error.kind(), line = error.line(), "run failed"),
        None => tracing::debug!(variables = result.variables.len(), "run succeeded"),
    }
    result
}

fn run(source: &str, inputs: &[String], limits: &Limits) -> ExecutionResult {
    let tokens = match tokenize(source) {
        Ok(tokens) => tokens,
        Err(error) => return ExecutionResult::failed(error.into()),
    };
    tracing::trace!(tokens = tokens.len(), "lexed");

    let program = match parse(&tokens) {
        Ok(program) => program,
        Err(error) => return ExecutionResult::failed(error.into()),
    };

    let mut context = Context::new(inputs, *limits);
    let error = context.run(&program).err().map(ExecutionError::from);

    ExecutionResult { output: context.output,
                      error,
                      variables: VariableSnapshot::capture(&context.globals) }
}
