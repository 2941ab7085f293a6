use std::time::Duration;

use serde::{Deserialize, Serialize, ser::SerializeMap};

use crate::{
    ast::DataType,
    error::ExecutionError,
    interpreter::value::{
        core::Value,
        environment::{Environment, name_key},
    },
};

/// Default cap on loop back-edges plus routine calls in one run.
pub const DEFAULT_MAX_STEPS: usize = 100_000;
/// Default cap on nested routine calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1_000;

/// Budgets that guarantee every run terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Loop back-edges and routine calls allowed in one run.
    pub max_steps:      usize,
    /// Routine calls that may be active at once.
    pub max_call_depth: usize,
    /// Optional wall-clock budget, checked at every back-edge and call.
    pub timeout:        Option<Duration>,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_steps:      DEFAULT_MAX_STEPS,
               max_call_depth: DEFAULT_MAX_CALL_DEPTH,
               timeout:        None, }
    }
}

/// A top-level constant or variable as it stood when the run ended.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// The declared name.
    pub name:      String,
    /// The declared type.
    pub data_type: DataType,
    /// The last stored value, `Value::Uninitialized` if none.
    pub value:     Value,
}

/// Every top-level constant and variable, in declaration order.
///
/// Serializes as a JSON object keyed by name, each entry holding the type
/// keyword and the formatted value (`null` when uninitialized).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariableSnapshot(Vec<Variable>);

impl VariableSnapshot {
    /// Captures the bindings of a scope.
    #[must_use]
    pub fn capture(scope: &Environment) -> Self {
        Self(scope.iter()
                  .map(|binding| Variable { name:      binding.name.clone(),
                                            data_type: binding.data_type,
                                            value:     binding.value.clone(), })
                  .collect())
    }

    /// Returns the value of `name`, if it was declared. Letter case is
    /// ignored, as it is in programs.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        let key = name_key(name);
        self.0
            .iter()
            .find(|variable| name_key(&variable.name) == key)
            .map(|variable| &variable.value)
    }

    /// Iterates over the variables in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.0.iter()
    }

    /// Number of captured variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was captured, as after a lexing or parsing failure.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Serialize)]
struct VariableEntry {
    #[serde(rename = "type")]
    data_type: &'static str,
    value:     Option<String>,
}

impl Serialize for VariableSnapshot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for variable in &self.0 {
            let value = match variable.value {
                Value::Uninitialized => None,
                ref value => Some(value.to_string()),
            };
            map.serialize_entry(&variable.name,
                                &VariableEntry { data_type: variable.data_type.keyword(),
                                                 value })?;
        }
        map.end()
    }
}

/// Everything one run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    /// Text written by `ECRIRE`, one line per call. On a runtime error, the
    /// output up to the failing statement.
    pub output:    String,
    /// The failure, or `None` when the program ran to completion.
    pub error:     Option<ExecutionError>,
    /// The top-level constants and variables; empty after a lexing or parsing
    /// failure.
    pub variables: VariableSnapshot,
}

impl ExecutionResult {
    /// Builds the result of a run that failed before evaluation started.
    #[must_use]
    pub fn failed(error: ExecutionError) -> Self {
        Self { output:    String::new(),
               error:     Some(error),
               variables: VariableSnapshot::default(), }
    }

    /// Whether the program ran to completion.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Converts the result into its serializable form.
    ///
    /// # Example
    /// ```
    /// let result = algorithmique::execute("VARIABLES x : ENTIER\nDEBUT\nx <- 2\nFIN", &[]);
    /// let json = serde_json::to_string(&result.to_response()).unwrap();
    ///
    /// assert_eq!(json,
    ///            r#"{"output":"","error":null,"variables":{"x":{"type":"ENTIER","value":"2"}}}"#);
    /// ```
    #[must_use]
    pub fn to_response(&self) -> Response {
        Response { output:    self.output.clone(),
                   error:     self.error.as_ref().map(ToString::to_string),
                   variables: self.variables.clone(), }
    }
}

/// A program and its inputs, as received by the CLI in `--request` and
/// `--batch` modes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Request {
    /// The program text.
    pub source: String,
    /// Values consumed in order by `LIRE`.
    #[serde(default)]
    pub inputs: Vec<String>,
}

/// The serializable form of an [`ExecutionResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// Text written by `ECRIRE`.
    pub output:    String,
    /// The user-facing error message, or `null`.
    pub error:     Option<String>,
    /// Top-level constants and variables in declaration order.
    pub variables: VariableSnapshot,
}
