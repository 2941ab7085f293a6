use std::collections::HashMap;

use crate::{
    ast::DataType,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// A declared name with its type, current value and constant flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// The declared name.
    pub name:      String,
    /// The declared type; every stored value is coerced to it.
    pub data_type: DataType,
    /// The current value, `Value::Uninitialized` until first assigned.
    pub value:     Value,
    /// Whether the binding comes from `CONSTANTES`.
    pub constant:  bool,
}

/// The key a name is looked up by. Names ignore letter case, so `Total` and
/// `total` are the same variable.
#[must_use]
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// One scope: the main program's, or a single routine invocation's.
///
/// Bindings keep their declaration order and their declared spelling, which
/// is what the variable snapshot shows. Lookups go through [`name_key`].
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: Vec<Binding>,
    index:    HashMap<String, usize>,
}

impl Environment {
    /// Creates an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a variable with no value yet.
    ///
    /// # Errors
    /// `AlreadyDeclared` if the name is already bound in this scope.
    ///
    /// # Example
    /// ```
    /// use algorithmique::{
    ///     ast::DataType,
    ///     interpreter::value::{core::Value, environment::Environment},
    /// };
    ///
    /// let mut env = Environment::new();
    /// env.declare("x", DataType::Integer, 1).unwrap();
    ///
    /// assert_eq!(env.get("x").unwrap().value, Value::Uninitialized);
    /// assert!(env.declare("X", DataType::Real, 2).is_err());
    /// ```
    pub fn declare(&mut self, name: &str, data_type: DataType, line: usize) -> EvalResult<()> {
        self.insert(Binding { name: name.to_string(),
                              data_type,
                              value: Value::Uninitialized,
                              constant: false },
                    line)
    }

    /// Binds an already evaluated and coerced value, as a parameter or as a
    /// constant.
    ///
    /// # Errors
    /// `AlreadyDeclared` if the name is already bound in this scope.
    pub fn define(&mut self,
                  name: &str,
                  data_type: DataType,
                  value: Value,
                  constant: bool,
                  line: usize)
                  -> EvalResult<()> {
        self.insert(Binding { name: name.to_string(),
                              data_type,
                              value,
                              constant },
                    line)
    }

    fn insert(&mut self, binding: Binding, line: usize) -> EvalResult<()> {
        let key = name_key(&binding.name);
        if self.index.contains_key(&key) {
            return Err(RuntimeError::AlreadyDeclared { name: binding.name,
                                                       line });
        }
        self.index.insert(key, self.bindings.len());
        self.bindings.push(binding);
        Ok(())
    }

    /// Looks a name up in this scope only.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.index.get(&name_key(name)).map(|&slot| &self.bindings[slot])
    }

    /// Mutable counterpart of [`Environment::get`].
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Binding> {
        self.index.get(&name_key(name)).map(|&slot| &mut self.bindings[slot])
    }

    /// Iterates over the bindings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }
}
