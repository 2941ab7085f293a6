/// The evaluator module executes the syntax tree.
///
/// The evaluator runs statements in order, evaluates expressions, manages the
/// main scope and one scope per routine call, and enforces the step, depth
/// and time budgets.
///
/// # Responsibilities
/// - Evaluates expressions with checked arithmetic and type coercion.
/// - Executes assignments, conditionals, loops, `LIRE` and `ECRIRE`.
/// - Calls built-ins and user routines, and reports runtime errors with the
///   line they occurred on.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to a keyword, literal, identifier, operator or separator,
/// with the line and column it starts at. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Recognizes keywords with and without accents, and their aliases.
/// - Handles numeric, string, character and boolean literals.
/// - Skips comments and reports characters that start no token.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// the program: its constants, variables, routines and main block.
///
/// # Responsibilities
/// - Recognizes both full `ALGORITHME ... DEBUT ... FIN` programs and bare
///   statement scripts.
/// - Stops at the first malformed construct, naming what was expected and the
///   offending line.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the values a program manipulates, the conversions
/// applied when they are stored in typed variables, and the scopes that hold
/// them.
///
/// # Responsibilities
/// - Defines the `Value` enum over the five primitive types.
/// - Coerces values on assignment and parses raw `LIRE` inputs.
/// - Formats values for `ECRIRE`.
pub mod value;
