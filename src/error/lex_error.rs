/// An unrecognized or malformed character sequence in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// What went wrong.
    pub message: String,
    /// The 1-based source line of the offending character.
    pub line:    usize,
    /// The 1-based column of the offending character.
    pub column:  usize,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,
               "Error on line {}, column {}: {}.",
               self.line, self.column, self.message)
    }
}

impl std::error::Error for LexError {}
