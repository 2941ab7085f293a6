use crate::{
    ast::DataType,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Converts `value` to the declared type `target`.
///
/// This is the coercion table applied on assignment, `LIRE`, argument
/// binding and function return:
///
/// | target      | accepts                                      |
/// |-------------|----------------------------------------------|
/// | `ENTIER`    | `ENTIER`                                     |
/// | `REEL`      | `ENTIER` (promoted), `REEL`                  |
/// | `CHAINE`    | `CHAINE`, `CARACTERE`                        |
/// | `CARACTERE` | `CARACTERE`, `CHAINE` of exactly one char    |
/// | `BOOLEEN`   | `BOOLEEN`                                    |
///
/// # Parameters
/// - `value`: The value to convert.
/// - `target`: The declared type.
/// - `destination`: Describes where the value goes, for the error message,
///   such as `variable 'x'`.
/// - `line`: Source code line number for error reporting.
///
/// # Errors
/// `TypeMismatch` for any pair outside the table.
///
/// # Example
/// ```
/// use algorithmique::{
///     ast::DataType,
///     interpreter::value::{coercion::coerce, core::Value},
/// };
///
/// let promoted = coerce(Value::Integer(3), DataType::Real, "variable 'x'", 1).unwrap();
/// assert_eq!(promoted, Value::Real(3.0));
///
/// assert!(coerce(Value::Real(3.5), DataType::Integer, "variable 'n'", 1).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn coerce(value: Value, target: DataType, destination: &str, line: usize) -> EvalResult<Value> {
    let coerced = match (target, value) {
        (DataType::Integer, value @ Value::Integer(_))
        | (DataType::Real, value @ Value::Real(_))
        | (DataType::String, value @ Value::String(_))
        | (DataType::Boolean, value @ Value::Boolean(_))
        | (DataType::Character, value @ Value::Character(_)) => value,

        (DataType::Real, Value::Integer(n)) => Value::Real(n as f64),
        (DataType::String, Value::Character(c)) => Value::String(c.to_string()),

        (target, value) => {
            if target == DataType::Character
               && let Value::String(text) = &value
               && let Some(c) = single_char(text)
            {
                return Ok(Value::Character(c));
            }
            return Err(RuntimeError::TypeMismatch { details: format!("cannot store {} {value} in \
                                                                      {destination} of type \
                                                                      {target}",
                                                                     value.type_name()),
                                                    line });
        },
    };

    Ok(coerced)
}

/// Parses a raw `LIRE` input into a value of the declared type.
///
/// - `ENTIER`: optional sign and digits, surrounding whitespace ignored.
/// - `REEL`: optional sign, digits, and an optional `.` or `,` decimal
///   separator.
/// - `CHAINE`: the raw text, unchanged.
/// - `CARACTERE`: exactly one character.
/// - `BOOLEEN`: `VRAI`/`FAUX`, `true`/`false`, `oui`/`non` or `1`/`0`, in any
///   case.
///
/// # Errors
/// `TypeMismatch` naming the raw input and the target type.
///
/// # Example
/// ```
/// use algorithmique::{
///     ast::DataType,
///     interpreter::value::{coercion::parse_input, core::Value},
/// };
///
/// assert_eq!(parse_input("3,50", DataType::Real, "x", 1).unwrap(), Value::Real(3.5));
/// assert_eq!(parse_input(" -12 ", DataType::Integer, "n", 1).unwrap(), Value::Integer(-12));
/// assert_eq!(parse_input("oui", DataType::Boolean, "b", 1).unwrap(), Value::Boolean(true));
/// assert!(parse_input("abc", DataType::Integer, "n", 1).is_err());
/// ```
pub fn parse_input(raw: &str, target: DataType, name: &str, line: usize) -> EvalResult<Value> {
    let mismatch = || RuntimeError::TypeMismatch { details: format!("input \"{raw}\" is not a \
                                                                     valid {target} for '{name}'"),
                                                   line };

    let trimmed = raw.trim();

    match target {
        DataType::Integer => trimmed.parse::<i64>().map(Value::Integer).map_err(|_| mismatch()),
        DataType::Real => {
            if !is_decimal(trimmed) {
                return Err(mismatch());
            }
            trimmed.replace(',', ".")
                   .parse::<f64>()
                   .map(Value::Real)
                   .map_err(|_| mismatch())
        },
        DataType::String => Ok(Value::String(raw.to_string())),
        DataType::Character => {
            single_char(raw).map(Value::Character).ok_or_else(mismatch)
        },
        DataType::Boolean => match trimmed.to_lowercase().as_str() {
            "vrai" | "true" | "oui" | "1" => Ok(Value::Boolean(true)),
            "faux" | "false" | "non" | "0" => Ok(Value::Boolean(false)),
            _ => Err(mismatch()),
        },
    }
}

/// Returns the only character of `text`, if it has exactly one.
fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Whether `text` is an optional sign followed by digits with at most one
/// `.` or `,` separator, and at least one digit.
fn is_decimal(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);

    let mut separators = 0;
    let mut has_digit = false;
    for c in digits.chars() {
        match c {
            '0'..='9' => has_digit = true,
            '.' | ',' => separators += 1,
            _ => return false,
        }
    }

    has_digit && separators <= 1
}
