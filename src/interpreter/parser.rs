/// Entry points: the program grammar and expression parsing.
///
/// Holds the `ParseResult` alias, the top-level `parse` function and the
/// program-level production that recognizes both the `ALGORITHME ... DEBUT
/// ... FIN` layout and bare scripts.
pub mod core;

/// Unary operators and primary expressions.
///
/// Handles `NON`, unary minus, literals, variables, calls and parentheses.
pub mod unary;

/// Binary operators, one function per precedence level.
///
/// From loosest to tightest: `OU`, `ET`, comparisons, additive and
/// multiplicative operators.
pub mod binary;

/// Statement sequences.
///
/// Parses statements until one of a set of closing keywords, skipping
/// newlines and `;` separators.
pub mod block;

/// Shared helpers for the parser.
///
/// Token expectations, identifier and type parsing, comma-separated lists and
/// separator skipping.
pub mod utils;

/// Statement parsing.
///
/// Assignments, `LIRE`, `ECRIRE`, the conditional and the three loops,
/// procedure calls and `RETOURNER`.
pub mod statement;

/// Declarations.
///
/// `CONSTANTES` and `VARIABLES` sections, single declaration lines and
/// `FONCTION`/`PROCEDURE` definitions.
pub mod declaration;
