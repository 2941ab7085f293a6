use crate::{
    ast::{Expr, RoutineKind},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::{builtin, power, sqrt},
        },
        value::{core::Value, environment::name_key},
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated argument values and the line number.
type BuiltinFn = fn(&[Value], usize) -> EvalResult<Value>;

/// A built-in function as listed in the syntax reference.
pub struct BuiltinDef {
    /// The name programs call it by.
    pub name:      &'static str,
    /// Exact number of arguments.
    pub arity:     usize,
    /// Argument and result types.
    pub signature: &'static str,
    /// One-line description.
    pub summary:   &'static str,
    func:          BuiltinFn,
}

/// Defines builtin functions by generating a lookup table.
///
/// Each entry provides:
/// - a string name,
/// - the number of arguments,
/// - a function pointer implementing the builtin,
/// - the signature and summary published in the syntax reference.
///
/// The macro produces `BUILTIN_TABLE`, the static table used for lookup and
/// documentation.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr,
                signature: $signature:literal,
                summary: $summary:literal $(,)?
            }
        ),* $(,)?
    ) => {
        /// Every built-in function, in the order the syntax reference lists
        /// them.
        pub static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name,
                             arity: $arity,
                             signature: $signature,
                             summary: $summary,
                             func: $func },
            )*
        ];
    };
}

builtin_functions! {
    "ABS"       => { arity: 1, func: builtin::abs,
                     signature: "ABS(x : ENTIER|REEL) : type of x",
                     summary: "absolute value" },
    "RACINE"    => { arity: 1, func: sqrt::sqrt,
                     signature: "RACINE(x : ENTIER|REEL) : REEL",
                     summary: "square root, x must not be negative" },
    "PUISSANCE" => { arity: 2, func: power::power,
                     signature: "PUISSANCE(x : ENTIER|REEL, n : ENTIER) : type of x",
                     summary: "x raised to the power n" },
    "LONGUEUR"  => { arity: 1, func: builtin::length,
                     signature: "LONGUEUR(s : CHAINE) : ENTIER",
                     summary: "number of characters" },
    "CARRE"     => { arity: 1, func: builtin::square,
                     signature: "CARRE(x : ENTIER|REEL) : type of x",
                     summary: "x multiplied by itself" },
    "ENT"       => { arity: 1, func: builtin::trunc,
                     signature: "ENT(x : ENTIER|REEL) : ENTIER",
                     summary: "integer part, truncated towards zero" },
    "ARRONDI"   => { arity: 1, func: builtin::round,
                     signature: "ARRONDI(x : ENTIER|REEL) : ENTIER",
                     summary: "nearest ENTIER, halves away from zero" },
}

/// Whether `name` is a built-in function, in any letter case.
///
/// # Example
/// ```
/// use algorithmique::interpreter::evaluator::function::core::is_builtin;
///
/// assert!(is_builtin("RACINE"));
/// assert!(is_builtin("Racine"));
/// assert!(!is_builtin("RACINES"));
/// ```
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    find_builtin(name).is_some()
}

fn find_builtin(name: &str) -> Option<&'static BuiltinDef> {
    BUILTIN_TABLE.iter().find(|builtin| builtin.name.eq_ignore_ascii_case(name))
}

impl Context {
    /// Evaluates a call used inside an expression.
    ///
    /// # Errors
    /// `NoReturnValue` when the callee is a procedure, plus every error
    /// [`Context::call`] reports.
    pub(crate) fn eval_call_expression(&mut self,
                                       name: &str,
                                       arguments: &[Expr],
                                       line: usize)
                                       -> EvalResult<Value> {
        if let Some(routine) = self.routines.get(&name_key(name))
           && routine.kind == RoutineKind::Procedure
        {
            return Err(RuntimeError::NoReturnValue { name: name.to_string(),
                                                     line });
        }

        self.call(name, arguments, line)?
            .ok_or_else(|| RuntimeError::NoReturnValue { name: name.to_string(),
                                                         line })
    }

    /// Calls a built-in or a user-defined routine.
    ///
    /// The evaluator first checks whether the name matches a builtin.
    /// If so, it evaluates the arguments, verifies arity and executes the
    /// builtin. Otherwise it delegates to user-defined routine handling.
    ///
    /// # Parameters
    /// - `name`: Callee name.
    /// - `arguments`: Argument expressions, evaluated left to right.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The result of a function or built-in, `None` for a procedure.
    ///
    /// # Errors
    /// `UnknownFunction`, `ArityError`, and any error raised by the callee.
    pub fn call(&mut self, name: &str, arguments: &[Expr], line: usize) -> EvalResult<Option<Value>> {
        if let Some(builtin) = find_builtin(name) {
            let values = self.eval_arguments(arguments)?;
            if values.len() != builtin.arity {
                return Err(RuntimeError::ArityError { name: name.to_string(),
                                                      expected: builtin.arity,
                                                      found: values.len(),
                                                      line });
            }
            return (builtin.func)(&values, line).map(Some);
        }

        let routine = self.routines
                          .get(&name_key(name))
                          .cloned()
                          .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string(),
                                                                         line })?;
        self.call_routine(&routine, arguments, line)
    }

    /// Evaluates call arguments in order in the caller's scope.
    pub(crate) fn eval_arguments(&mut self, arguments: &[Expr]) -> EvalResult<Vec<Value>> {
        arguments.iter().map(|argument| self.eval(argument)).collect()
    }
}
