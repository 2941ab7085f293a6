use crate::error::{LexError, ParseError, RuntimeError};

/// Any failure reported by [`crate::execute`].
///
/// The `Display` form is the single user-facing string shown to students:
/// the error kind followed by the location and message of the underlying
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The source contains a character that starts no token.
    Lex(LexError),
    /// The token stream does not follow the grammar.
    Parse(ParseError),
    /// Evaluation failed.
    Runtime(RuntimeError),
    /// The interpreter itself faulted; the panic was caught at the driver.
    Internal {
        /// The panic payload, when it was a string.
        message: String,
    },
}

impl ExecutionError {
    /// Returns the stable name of the error kind.
    ///
    /// Lexing and parsing failures report `LexError` and `ParseError`; runtime
    /// failures report their own variant name, such as `DivisionByZero`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Lex(_) => "LexError",
            Self::Parse(_) => "ParseError",
            Self::Runtime(error) => error.kind(),
            Self::Internal { .. } => "InternalError",
        }
    }

    /// Returns the source line the error points at, when known.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Lex(error) => Some(error.line),
            Self::Parse(error) => error.line(),
            Self::Runtime(error) => Some(error.line()),
            Self::Internal { .. } => None,
        }
    }

    /// Returns the source column, which only lexical errors carry.
    #[must_use]
    pub const fn column(&self) -> Option<usize> {
        match self {
            Self::Lex(error) => Some(error.column),
            _ => None,
        }
    }
}

impl From<LexError> for ExecutionError {
    fn from(error: LexError) -> Self {
        Self::Lex(error)
    }
}

impl From<ParseError> for ExecutionError {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<RuntimeError> for ExecutionError {
    fn from(error: RuntimeError) -> Self {
        Self::Runtime(error)
    }
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex(error) => write!(f, "{}: {error}", self.kind()),
            Self::Parse(error) => write!(f, "{}: {error}", self.kind()),
            Self::Runtime(error) => write!(f, "{}: {error}", self.kind()),
            Self::Internal { message } => {
                write!(f, "{}: The interpreter failed unexpectedly: {message}", self.kind())
            },
        }
    }
}

impl std::error::Error for ExecutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lex(error) => Some(error),
            Self::Parse(error) => Some(error),
            Self::Runtime(error) => Some(error),
            Self::Internal { .. } => None,
        }
    }
}
