//! The four arithmetic operations
//!
//! Operations use plain IEEE-754 double arithmetic. Overflowing results are
//! allowed through as `±Infinity`; the only guarded case is a zero divisor.

use serde::Serialize;

use crate::core::{CalcError, CalcResult};

/// Arithmetic operation applied as `result <op> operand`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operation {
    /// Addition (+)
    #[serde(rename = "+")]
    Add,
    /// Subtraction (-)
    #[serde(rename = "-")]
    Subtract,
    /// Multiplication (*)
    #[serde(rename = "*")]
    Multiply,
    /// Division (/)
    #[serde(rename = "/")]
    Divide,
}

impl Operation {
    /// Returns the operator symbol recorded in history
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    /// Applies the operation to `lhs` and `rhs`
    pub fn apply(self, lhs: f64, rhs: f64) -> CalcResult<f64> {
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Subtract => Ok(lhs - rhs),
            Self::Multiply => Ok(lhs * rhs),
            Self::Divide => {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(lhs / rhs)
            }
        }
    }

    /// Returns true if `operand` is acceptable as the right-hand side
    #[must_use]
    pub fn accepts(self, operand: f64) -> bool {
        !(self == Self::Divide && operand == 0.0)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // --- Operation enum tests ---

    #[test]
    fn test_operation_symbols() {
        assert_eq!(Operation::Add.symbol(), "+");
        assert_eq!(Operation::Subtract.symbol(), "-");
        assert_eq!(Operation::Multiply.symbol(), "*");
        assert_eq!(Operation::Divide.symbol(), "/");
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Divide.to_string(), "/");
    }

    #[test]
    fn test_operation_serializes_as_symbol() {
        assert_eq!(serde_json::to_string(&Operation::Multiply).unwrap(), "\"*\"");
        assert_eq!(serde_json::to_string(&Operation::Subtract).unwrap(), "\"-\"");
    }

    // --- Arithmetic tests ---

    #[test]
    fn test_add() {
        assert_eq!(Operation::Add.apply(0.0, 5.0), Ok(5.0));
        assert_eq!(Operation::Add.apply(-2.0, 5.0), Ok(3.0));
    }

    #[test]
    fn test_subtract() {
        assert_eq!(Operation::Subtract.apply(3.0, 5.0), Ok(-2.0));
    }

    #[test]
    fn test_multiply() {
        assert_eq!(Operation::Multiply.apply(5.0, 2.5), Ok(12.5));
        assert_eq!(Operation::Multiply.apply(5.0, 0.0), Ok(0.0));
    }

    #[test]
    fn test_divide() {
        assert_eq!(Operation::Divide.apply(12.5, 2.5), Ok(5.0));
        assert_eq!(Operation::Divide.apply(0.0, 5.0), Ok(0.0));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            Operation::Divide.apply(5.0, 0.0),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(
            Operation::Divide.apply(5.0, -0.0),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_overflow_is_not_rejected() {
        let result = Operation::Multiply.apply(1e308, 10.0).unwrap();
        assert!(result.is_infinite());
    }

    #[test]
    fn test_accepts() {
        assert!(Operation::Add.accepts(0.0));
        assert!(Operation::Multiply.accepts(0.0));
        assert!(!Operation::Divide.accepts(0.0));
        assert!(Operation::Divide.accepts(2.0));
    }

    proptest! {
        #[test]
        fn prop_add_commutative(a in -1e10f64..1e10f64, b in -1e10f64..1e10f64) {
            prop_assert_eq!(Operation::Add.apply(a, b), Operation::Add.apply(b, a));
        }

        #[test]
        fn prop_add_identity(a in -1e10f64..1e10f64) {
            prop_assert_eq!(Operation::Add.apply(a, 0.0), Ok(a));
        }

        #[test]
        fn prop_multiply_identity(a in -1e10f64..1e10f64) {
            prop_assert_eq!(Operation::Multiply.apply(a, 1.0), Ok(a));
        }

        #[test]
        fn prop_divide_by_self(a in -1e10f64..1e10f64) {
            prop_assume!(a != 0.0);
            let result = Operation::Divide.apply(a, a).unwrap();
            prop_assert!((result - 1.0).abs() < 1e-10);
        }
    }
}
