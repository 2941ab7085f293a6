/// Built-in function table and call dispatch.
///
/// Declares every built-in with its arity, signature and summary, and routes
/// calls either to a built-in or to a user-defined routine.
pub mod core;
/// Numeric and text built-ins.
///
/// `ABS`, `CARRE`, `ENT`, `ARRONDI` and `LONGUEUR`.
pub mod builtin;
/// The `RACINE` (square root) built-in.
pub mod sqrt;
/// The `PUISSANCE` built-in.
///
/// Raises a number to an `ENTIER` power, keeping the type of the base.
pub mod power;
/// User-defined procedures and functions.
///
/// Binds arguments in a fresh scope, runs the body and checks the result.
pub mod routine;
