#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// Tried to use a name that was never declared in the current scope.
    UndeclaredVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to read a declared variable before any value was stored in it.
    UninitializedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Declared the same name twice in one scope.
    AlreadyDeclared {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to assign to or read into a constant.
    ConstantAssignment {
        /// The name of the constant.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value had an unexpected or incompatible type.
    TypeMismatch {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Division, `DIV` or `MOD` by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A built-in received an argument outside its domain.
    DomainError {
        /// Details about the rejected argument.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Integer arithmetic left the 64-bit range, or a real result was not
    /// finite.
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `LIRE` ran out of supplied inputs.
    InputExhausted {
        /// The variable that was waiting for a value.
        name:     String,
        /// How many inputs were supplied in total.
        supplied: usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Called a function or procedure with the wrong number of arguments.
    ArityError {
        /// The name of the callee.
        name:     String,
        /// The number of parameters the callee declares.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Called a routine that is neither built in nor declared.
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Declared two routines with the same name.
    FunctionAlreadyDefined {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A function body finished without reaching `RETOURNER`.
    MissingReturn {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A procedure was used where a value is needed.
    NoReturnValue {
        /// The name of the procedure.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `POUR` loop was given a step of zero.
    InvalidLoopStep {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Loop back-edges exhausted the step budget.
    InfiniteLoopDetected {
        /// The step budget that was exceeded.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Routine calls exhausted the step budget or nested too deeply.
    UnboundedRecursion {
        /// The name of the routine being called.
        name:    String,
        /// Which guard stopped the call.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The wall-clock watchdog expired.
    Timeout {
        /// The configured budget in milliseconds.
        millis: u128,
        /// The source line where the error occurred.
        line:   usize,
    },
}

impl RuntimeError {
    /// Returns the stable name of the error kind, as reported to callers.
    ///
    /// ## Example
    /// ```
    /// use algorithmique::error::RuntimeError;
    ///
    /// let error = RuntimeError::DivisionByZero { line: 3 };
    /// assert_eq!(error.kind(), "DivisionByZero");
    /// ```
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UndeclaredVariable { .. } => "UndeclaredVariable",
            Self::UninitializedVariable { .. } => "UninitializedVariable",
            Self::AlreadyDeclared { .. } => "AlreadyDeclared",
            Self::ConstantAssignment { .. } => "ConstantAssignment",
            Self::TypeMismatch { .. } => "TypeMismatch",
            Self::DivisionByZero { .. } => "DivisionByZero",
            Self::DomainError { .. } => "DomainError",
            Self::Overflow { .. } => "Overflow",
            Self::InputExhausted { .. } => "InputExhausted",
            Self::ArityError { .. } => "ArityError",
            Self::UnknownFunction { .. } => "UnknownFunction",
            Self::FunctionAlreadyDefined { .. } => "FunctionAlreadyDefined",
            Self::MissingReturn { .. } => "MissingReturn",
            Self::NoReturnValue { .. } => "NoReturnValue",
            Self::InvalidLoopStep { .. } => "InvalidLoopStep",
            Self::InfiniteLoopDetected { .. } => "InfiniteLoopDetected",
            Self::UnboundedRecursion { .. } => "UnboundedRecursion",
            Self::Timeout { .. } => "Timeout",
        }
    }

    /// Returns the line the error points at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UndeclaredVariable { line, .. }
            | Self::UninitializedVariable { line, .. }
            | Self::AlreadyDeclared { line, .. }
            | Self::ConstantAssignment { line, .. }
            | Self::TypeMismatch { line, .. }
            | Self::DivisionByZero { line }
            | Self::DomainError { line, .. }
            | Self::Overflow { line }
            | Self::InputExhausted { line, .. }
            | Self::ArityError { line, .. }
            | Self::UnknownFunction { line, .. }
            | Self::FunctionAlreadyDefined { line, .. }
            | Self::MissingReturn { line, .. }
            | Self::NoReturnValue { line, .. }
            | Self::InvalidLoopStep { line }
            | Self::InfiniteLoopDetected { line, .. }
            | Self::UnboundedRecursion { line, .. }
            | Self::Timeout { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndeclaredVariable { name, line } => write!(f,
                                                              "Error on line {line}: Variable '{name}' is not declared."),
            Self::UninitializedVariable { name, line } => write!(f,
                                                                 "Error on line {line}: Variable '{name}' is used before it has a value."),
            Self::AlreadyDeclared { name, line } => {
                write!(f, "Error on line {line}: '{name}' is already declared.")
            },
            Self::ConstantAssignment { name, line } => {
                write!(f, "Error on line {line}: Cannot modify constant '{name}'.")
            },

            Self::TypeMismatch { details, line } => {
                write!(f, "Error on line {line}: Type mismatch: {details}.")
            },
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::DomainError { details, line } => {
                write!(f, "Error on line {line}: Domain error: {details}.")
            },
            Self::Overflow { line } => write!(f,
                                              "Error on line {line}: Numeric overflow while trying to compute result."),

            Self::InputExhausted { name,
                                   supplied,
                                   line, } => write!(f,
                                                     "Error on line {line}: No input left for LIRE({name}); only {supplied} value(s) were supplied."),

            Self::ArityError { name,
                               expected,
                               found,
                               line, } => write!(f,
                                                 "Error on line {line}: '{name}' expects {expected} argument(s) but received {found}."),
            Self::UnknownFunction { name, line } => {
                write!(f, "Error on line {line}: Unknown function or procedure '{name}'.")
            },
            Self::FunctionAlreadyDefined { name, line } => write!(f,
                                                                  "Error on line {line}: Function or procedure '{name}' is already defined."),
            Self::MissingReturn { name, line } => write!(f,
                                                         "Error on line {line}: Function '{name}' ended without RETOURNER."),
            Self::NoReturnValue { name, line } => write!(f,
                                                         "Error on line {line}: Procedure '{name}' does not return a value."),

            Self::InvalidLoopStep { line } => {
                write!(f, "Error on line {line}: POUR loop step cannot be zero.")
            },
            Self::InfiniteLoopDetected { limit, line } => write!(f,
                                                                 "Error on line {line}: Infinite loop detected (more than {limit} steps)."),
            Self::UnboundedRecursion { name,
                                       details,
                                       line, } => write!(f,
                                                         "Error on line {line}: Unbounded recursion in '{name}': {details}."),
            Self::Timeout { millis, line } => write!(f,
                                                     "Error on line {line}: Execution exceeded {millis} ms."),
        }
    }
}

impl std::error::Error for RuntimeError {}
