//! Named symbols whose values are supplied by a [`Bindings`] context at evaluation time.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::binding::Bindings;
use crate::error::{AlgebraError, Result};

/// A validated variable name such as `x`, `x1` or `ab12`.
///
/// The value is never stored on the variable itself. Two variables are equal
/// exactly when their names are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Variable {
    name: Cow<'static, str>,
}

impl Variable {
    pub const A: Variable = Variable::predefined("a");
    pub const B: Variable = Variable::predefined("b");
    pub const C: Variable = Variable::predefined("c");
    pub const D: Variable = Variable::predefined("d");
    pub const W: Variable = Variable::predefined("w");
    pub const X: Variable = Variable::predefined("x");
    pub const Y: Variable = Variable::predefined("y");
    pub const Z: Variable = Variable::predefined("z");

    const fn predefined(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
        }
    }

    /// Creates a variable after checking the name against `[A-Za-z]+[0-9]*`.
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        let name = name.into();
        if !Self::is_valid_name(&name) {
            return Err(AlgebraError::invalid_name(&name));
        }
        Ok(Self {
            name: Cow::Owned(name),
        })
    }

    /// Returns `true` for a non-empty run of ASCII letters optionally followed
    /// by a single trailing run of ASCII digits.
    pub fn is_valid_name(name: &str) -> bool {
        let letters = name
            .bytes()
            .take_while(|b| b.is_ascii_alphabetic())
            .count();
        letters > 0 && name.bytes().skip(letters).all(|b| b.is_ascii_digit())
    }

    /// Returns the variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves the variable in `bindings`.
    ///
    /// `None` fails with [`AlgebraError::NoActiveContext`]; a context that lacks
    /// the name fails with [`AlgebraError::UnboundVariable`].
    pub fn value(&self, bindings: Option<&Bindings>) -> Result<f64> {
        let bindings = bindings.ok_or_else(|| AlgebraError::no_context(&self.name))?;
        bindings
            .get(&self.name)
            .ok_or_else(|| AlgebraError::unbound(&self.name))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl TryFrom<String> for Variable {
    type Error = AlgebraError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Variable {
    type Error = AlgebraError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Variable> for String {
    fn from(value: Variable) -> Self {
        value.name.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_letters_with_trailing_digits() {
        for name in ["x", "a1", "AB12", "ab12", "Zz"] {
            assert!(Variable::is_valid_name(name), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_names() {
        for name in ["", "1a", "a1b", "12", "x_1", "é"] {
            assert!(!Variable::is_valid_name(name), "{name} should be invalid");
        }
        assert!(matches!(
            Variable::new("a1b"),
            Err(AlgebraError::InvalidVariableName { .. })
        ));
    }

    #[test]
    fn equality_ignores_bound_values() {
        let owned = Variable::new("x").unwrap();
        assert_eq!(owned, Variable::X);
        assert_ne!(Variable::X, Variable::Y);
    }

    #[test]
    fn lookup_distinguishes_missing_context_from_missing_name() {
        assert_eq!(
            Variable::Y.value(None),
            Err(AlgebraError::no_context("y"))
        );
        let bindings = Bindings::new().with("x", 1.0);
        assert_eq!(
            Variable::Y.value(Some(&bindings)),
            Err(AlgebraError::unbound("y"))
        );
        assert_eq!(Variable::X.value(Some(&bindings)), Ok(1.0));
    }

    #[test]
    fn deserialization_revalidates_names() {
        let parsed: Variable = serde_json::from_str("\"ab12\"").unwrap();
        assert_eq!(parsed.name(), "ab12");
        assert!(serde_json::from_str::<Variable>("\"1x\"").is_err());
    }
}
