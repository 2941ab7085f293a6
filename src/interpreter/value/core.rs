use crate::{
    ast::{DataType, LiteralValue},
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
};

/// Number of decimal places a `REEL` is rounded to when formatted.
pub const REAL_DISPLAY_PRECISION: usize = 10;

/// Represents a runtime value in the interpreter.
///
/// This enum models every value a variable, constant, parameter or
/// expression can hold. Evaluation sites match all variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An `ENTIER` (64 bit integer).
    Integer(i64),
    /// A `REEL` (double precision floating-point).
    Real(f64),
    /// A `CHAINE`.
    String(String),
    /// A `BOOLEEN`, printed `VRAI` or `FAUX`.
    Boolean(bool),
    /// A `CARACTERE`.
    Character(char),
    /// The content of a declared variable before its first assignment.
    Uninitialized,
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Self::Character(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Integer(n) => Self::Integer(*n),
            LiteralValue::Real(r) => Self::Real(*r),
            LiteralValue::String(s) => Self::String(s.clone()),
            LiteralValue::Character(c) => Self::Character(*c),
            LiteralValue::Boolean(b) => Self::Boolean(*b),
        }
    }
}

impl Value {
    /// Returns the type keyword of the value, used in error messages.
    ///
    /// # Example
    /// ```
    /// use algorithmique::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Real(1.5).type_name(), "REEL");
    /// assert_eq!(Value::Uninitialized.type_name(), "uninitialized");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => DataType::Integer.keyword(),
            Self::Real(_) => DataType::Real.keyword(),
            Self::String(_) => DataType::String.keyword(),
            Self::Boolean(_) => DataType::Boolean.keyword(),
            Self::Character(_) => DataType::Character.keyword(),
            Self::Uninitialized => "uninitialized",
        }
    }

    /// Returns the declared type matching the value, or `None` for
    /// `Value::Uninitialized`.
    #[must_use]
    pub const fn data_type(&self) -> Option<DataType> {
        match self {
            Self::Integer(_) => Some(DataType::Integer),
            Self::Real(_) => Some(DataType::Real),
            Self::String(_) => Some(DataType::String),
            Self::Boolean(_) => Some(DataType::Boolean),
            Self::Character(_) => Some(DataType::Character),
            Self::Uninitialized => None,
        }
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// Accepts `Value::Real` and `Value::Integer`; integers are promoted.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use algorithmique::interpreter::value::core::Value;
    ///
    /// let x = Value::Integer(10);
    /// let real = x.as_real(42).unwrap();
    ///
    /// assert_eq!(real, 10.0);
    /// assert!(Value::Boolean(true).as_real(42).is_err());
    /// ```
    #[allow(clippy::cast_precision_loss)]
    pub fn as_real(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(*r),
            Self::Integer(n) => Ok(*n as f64),
            other => Err(RuntimeError::TypeMismatch { details: format!("expected a number, \
                                                                        found {}",
                                                                       other.type_name()),
                                                      line }),
        }
    }

    /// Converts the value to `i64`, or returns an error if not an `ENTIER`.
    pub fn as_integer(&self, line: usize) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            other => Err(RuntimeError::TypeMismatch { details: format!("expected an ENTIER, \
                                                                        found {}",
                                                                       other.type_name()),
                                                      line }),
        }
    }

    /// Converts the value to `bool`, or returns an error if not `BOOLEEN`.
    ///
    /// Used for conditions of `SI`, `TANT QUE` and `REPETER` and for logical
    /// operators.
    pub fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Boolean(b) => Ok(*b),
            other => Err(RuntimeError::TypeMismatch { details: format!("expected a BOOLEEN, \
                                                                        found {}",
                                                                       other.type_name()),
                                                      line }),
        }
    }

    /// Returns the text of a `CHAINE` or `CARACTERE`, or `None` otherwise.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Character(c) => Some(c.to_string()),
            _ => None,
        }
    }

    /// Whether the value is an `ENTIER` or a `REEL`.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Real(_))
    }

    /// Whether the value is a `CHAINE` or a `CARACTERE`.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::String(_) | Self::Character(_))
    }
}

/// Formats a `REEL` the way `ECRIRE` prints it.
///
/// The value is rounded to [`REAL_DISPLAY_PRECISION`] decimal places, trailing
/// zeros are trimmed, and at least one fractional digit is kept.
///
/// # Example
/// ```
/// use algorithmique::interpreter::value::core::format_real;
///
/// assert_eq!(format_real(3.50), "3.5");
/// assert_eq!(format_real(5.0), "5.0");
/// assert_eq!(format_real(0.1 + 0.2), "0.3");
/// assert_eq!(format_real(-0.0), "0.0");
/// ```
#[must_use]
pub fn format_real(value: f64) -> String {
    let rounded = format!("{value:.precision$}", precision = REAL_DISPLAY_PRECISION);
    let Some((whole, fraction)) = rounded.split_once('.') else {
        return rounded;
    };

    let fraction = fraction.trim_end_matches('0');
    let fraction = if fraction.is_empty() { "0" } else { fraction };

    if fraction == "0" && whole == "-0" {
        return "0.0".to_string();
    }

    format!("{whole}.{fraction}")
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{}", format_real(*r)),
            Self::String(s) => write!(f, "{s}"),
            Self::Boolean(true) => write!(f, "VRAI"),
            Self::Boolean(false) => write!(f, "FAUX"),
            Self::Character(c) => write!(f, "{c}"),
            Self::Uninitialized => write!(f, "?"),
        }
    }
}
