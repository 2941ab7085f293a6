use std::fmt::Write as _;

use crate::{
    ast::DataType,
    execution::{DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_STEPS},
    interpreter::{
        evaluator::function::core::BUILTIN_TABLE,
        lexer::{ALIASES, KEYWORDS, OPERATORS},
    },
};

/// Renders the language reference printed by `--syntax`.
///
/// Keywords, operators and aliases come from the lexer tables, types from
/// [`DataType::ALL`] and built-ins from the evaluator's table, so the
/// reference always matches what programs may use.
///
/// # Example
/// ```
/// let reference = algorithmique::syntax::reference();
///
/// assert!(reference.contains("TANT QUE"));
/// assert!(reference.contains("RACINE(x : ENTIER|REEL) : REEL"));
/// ```
#[must_use]
pub fn reference() -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Keywords");
    for token in KEYWORDS {
        if let Some(spelling) = token.spelling() {
            let _ = writeln!(out, "  {spelling}");
        }
    }

    let _ = writeln!(out, "\nTypes");
    for data_type in DataType::ALL {
        let _ = writeln!(out, "  {data_type}");
    }

    let _ = writeln!(out, "\nOperators");
    let operators = OPERATORS.iter()
                             .filter_map(|token| token.spelling())
                             .collect::<Vec<_>>();
    let _ = writeln!(out, "  {}", operators.join("  "));

    let _ = writeln!(out, "\nAlternative spellings");
    for (alias, token) in ALIASES {
        if let Some(spelling) = token.spelling() {
            let _ = writeln!(out, "  {alias:<14} {spelling}");
        }
    }

    let _ = writeln!(out, "\nBuilt-in functions");
    for builtin in BUILTIN_TABLE {
        let _ = writeln!(out, "  {:<52} {}", builtin.signature, builtin.summary);
    }

    let _ = writeln!(out, "\nLimits");
    let _ = writeln!(out, "  {DEFAULT_MAX_STEPS} loop iterations and routine calls per run");
    let _ = writeln!(out, "  {DEFAULT_MAX_CALL_DEPTH} nested routine calls");

    out
}
