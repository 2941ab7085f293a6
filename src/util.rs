/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss. Use these helpers
/// whenever a value crosses between `i64`, `u32`, `usize` and `f64`.
///
/// All functions return a `Result`, which is `Ok` if the conversion is valid,
/// or an error carrying the source line otherwise.
pub mod num;
/// Native stack growth for deeply recursive evaluation.
///
/// User routines may recurse up to the configured call-depth limit; the
/// evaluator wraps each call so that reaching that limit, and not a native
/// stack overflow, is what stops a runaway recursion.
pub mod stack;
