/// Operator dispatch.
///
/// Evaluates the operands of a binary expression and routes the operator to
/// the arithmetic, comparison or logical handlers.
pub mod core;

/// Arithmetic and text concatenation.
///
/// Checked `ENTIER` arithmetic, `REEL` promotion, floored `DIV` and `MOD`.
pub mod arithmetic;

/// Relational and equality operators.
pub mod comparison;

/// Short-circuiting `ET` and `OU`.
pub mod logic;
