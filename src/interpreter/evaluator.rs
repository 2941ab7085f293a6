/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions: arithmetic,
/// text concatenation, comparisons and the short-circuiting logical
/// operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical `NON`.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the runtime context, the program entry point and expression
/// dispatch.
pub mod core;

/// Statement execution.
///
/// Assignments, conditionals, `LIRE`, `ECRIRE` and the control-flow signal
/// returned by every statement.
pub mod statement;

/// Evaluation of the `POUR`, `TANT QUE` and `REPETER` loops.
///
/// Every back-edge is charged to the step budget.
pub mod loops;

/// Utility functions for evaluation.
///
/// Scope resolution, assignment and the step, depth and time budgets.
pub mod utils;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value computation.
pub mod function;
