/// Runtime values and their formatting.
///
/// Defines the closed `Value` union over the five primitive types plus the
/// uninitialized marker, the numeric accessors used by the evaluator, and the
/// `ECRIRE` formatting rules (`REEL` rounding, `VRAI`/`FAUX`).
pub mod core;
/// Conversions into declared types.
///
/// Implements the coercion table applied on assignment, argument binding and
/// function return, and the parsing of raw `LIRE` inputs.
pub mod coercion;
/// Ordered variable scopes.
///
/// An `Environment` maps declared names to their type, value and constant
/// flag, and iterates in declaration order for the variable snapshot.
pub mod environment;
