/// Lexical errors.
///
/// Raised by the lexer when it meets a character that starts no token. Carries
/// both the line and the column of the offending character.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the syntax tree:
/// unexpected or missing tokens, misplaced `RETOURNER`, reserved names, and
/// empty programs.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Runtime
/// errors include undeclared variables, type mismatches, division by zero,
/// exhausted input, and the termination guards on loops and calls.
pub mod runtime_error;
/// The error reported by the execution driver.
///
/// Wraps the three phase-specific errors (plus caught internal faults) behind
/// one type with a stable kind name, as shown to students.
pub mod execution_error;

pub use execution_error::ExecutionError;
pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
