use thiserror::Error;

/// Unified error type for `symalg` operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlgebraError {
    /// Raised when a variable must be resolved but no bindings were supplied.
    #[error("variable `{name}` evaluated outside of any binding context")]
    NoActiveContext {
        /// Name of the variable that triggered the lookup.
        name: String,
    },

    /// Raised when bindings were supplied but do not contain the variable.
    #[error("variable `{name}` is not bound in the active context")]
    UnboundVariable { name: String },

    /// Raised when an operand token is neither a numeric literal nor a name.
    #[error("unsupported operand `{token}`: expected a number or a variable name")]
    UnsupportedOperand { token: String },

    /// Raised when a variable name does not match `[A-Za-z]+[0-9]*`.
    #[error("invalid variable name `{name}`")]
    InvalidVariableName { name: String },

    /// Raised when rounding a NaN, an infinity or a value outside the `i64` range.
    #[error("value {value} cannot be represented as a 64-bit integer")]
    UnrepresentableInteger { value: f64 },
}

impl AlgebraError {
    /// Helper for the missing-context failure of a variable lookup.
    pub fn no_context(name: &str) -> Self {
        Self::NoActiveContext {
            name: name.to_owned(),
        }
    }

    /// Helper for a lookup that reached the bindings but found nothing.
    pub fn unbound(name: &str) -> Self {
        Self::UnboundVariable {
            name: name.to_owned(),
        }
    }

    /// Helper to reject a malformed variable name.
    pub fn invalid_name(name: &str) -> Self {
        Self::InvalidVariableName {
            name: name.to_owned(),
        }
    }

    /// Helper for integer conversions of non-finite or out-of-range values.
    pub fn unrepresentable(value: f64) -> Self {
        Self::UnrepresentableInteger { value }
    }

    /// Helper to reject an operand token that cannot be coerced.
    pub fn unsupported(token: &str) -> Self {
        Self::UnsupportedOperand {
            token: token.to_owned(),
        }
    }
}

/// Type alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, AlgebraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_variable() {
        let err = AlgebraError::unbound("y");
        assert_eq!(err.to_string(), "variable `y` is not bound in the active context");
        let err = AlgebraError::no_context("x");
        assert!(err.to_string().contains("outside of any binding context"));
    }
}
