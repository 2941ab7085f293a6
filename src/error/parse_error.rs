#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during parsing.
pub enum ParseError {
    /// Found a token other than the one the grammar requires here.
    UnexpectedToken {
        /// The token or construct the parser was looking for.
        expected: String,
        /// The token encountered.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Reached the end of input while a construct was still open.
    UnexpectedEndOfInput {
        /// The token or construct the parser was looking for.
        expected: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Found extra tokens after the closing `FIN` of the program.
    UnexpectedTrailingTokens {
        /// The extra/unexpected token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// `RETOURNER` used where it is not allowed: outside any routine, without
    /// a value inside a function, or with a value inside a procedure.
    InvalidReturn {
        /// Details about why the return is misplaced.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Tried to use a built-in function name for a variable or routine.
    IdentifierReserved {
        /// The reserved identifier name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A declaration follows the first statement of a script.
    LateDeclaration {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Parentheses, blocks or prefix operators nest deeper than the parser
    /// allows.
    NestingTooDeep {
        /// The deepest nesting allowed.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A single line holds more operators than the parser allows.
    TooManyOperators {
        /// The number of operators allowed on one line.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The source contains no program at all.
    EmptyProgram,
}

impl ParseError {
    /// Returns the line the error points at, if any.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line, .. }
            | Self::UnexpectedTrailingTokens { line, .. }
            | Self::InvalidReturn { line, .. }
            | Self::IdentifierReserved { line, .. }
            | Self::LateDeclaration { line }
            | Self::NestingTooDeep { line, .. }
            | Self::TooManyOperators { line, .. } => Some(*line),
            Self::EmptyProgram => None,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { expected,
                                    found,
                                    line, } => {
                write!(f, "Error on line {line}: Expected {expected}, found {found}.")
            },

            Self::UnexpectedEndOfInput { expected, line } => write!(f,
                                                                    "Error on line {line}: Expected {expected}, found end of input."),

            Self::UnexpectedTrailingTokens { token, line } => write!(f,
                                                                     "Error on line {line}: Unexpected {token} after the end of the program."),

            Self::InvalidReturn { details, line } => {
                write!(f, "Error on line {line}: {details}.")
            },

            Self::IdentifierReserved { name, line } => write!(f,
                                                              "Error on line {line}: Identifier {name} is reserved for a built-in function."),

            Self::LateDeclaration { line } => write!(f,
                                                     "Error on line {line}: Declarations must come before the first statement."),

            Self::NestingTooDeep { limit, line } => {
                write!(f, "Error on line {line}: Nesting is deeper than {limit} levels.")
            },

            Self::TooManyOperators { limit, line } => {
                write!(f, "Error on line {line}: More than {limit} operators on one line.")
            },

            Self::EmptyProgram => write!(f, "The program is empty."),
        }
    }
}

impl std::error::Error for ParseError {}
