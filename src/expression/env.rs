use std::collections::HashMap;

/// Golden ratio, with the precision the classic constant table uses.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_74;

/// Constants bound in every new expression environment.
pub const DEFAULT_CONSTANTS: &[(&str, f64)] = &[("pi", std::f64::consts::PI),
                                                ("π", std::f64::consts::PI),
                                                ("φ", GOLDEN_RATIO),
                                                ("e", std::f64::consts::E)];

/// Tests whether `name` is one of the reserved constant names.
#[must_use]
pub fn is_constant(name: &str) -> bool {
    DEFAULT_CONSTANTS.iter().any(|(constant, _)| *constant == name)
}

/// Variable bindings of a single expression.
///
/// The environment is owned by its expression. Cloning it copies every
/// binding, so a clone can be modified without affecting the original.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    bindings: HashMap<String, f64>,
}

impl Environment {
    /// Creates an environment seeded with the given bindings.
    ///
    /// # Example
    /// ```
    /// use rpnexpr::expression::env::Environment;
    ///
    /// let env = Environment::new(&[("x", 2.0)]);
    /// assert_eq!(env.get("x"), Some(2.0));
    /// assert_eq!(env.get("pi"), None);
    /// ```
    #[must_use]
    pub fn new(seed: &[(&str, f64)]) -> Self {
        let bindings = seed.iter()
                           .map(|(name, value)| ((*name).to_string(), *value))
                           .collect();
        Self { bindings }
    }

    /// Creates an environment holding only the [`DEFAULT_CONSTANTS`].
    #[must_use]
    pub fn with_constants() -> Self {
        Self::new(DEFAULT_CONSTANTS)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.bindings.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Binds `name` to `value`, replacing any previous binding.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.bindings.insert(name.into(), value);
    }

    /// Iterates over every binding in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::with_constants()
    }
}
