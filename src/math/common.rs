//! Shared scalers, the math error and the checked arithmetic traits used by
//! [`Rate`](crate::math::Rate).

use core::fmt;

/// Scale of precision
pub const SCALE: usize = 18;
/// Identity
pub const WAD: u64 = 1_000_000_000_000_000_000;
/// Scale for percentages
pub const PERCENT_SCALER: u64 = 10_000_000_000_000_000;

/// Failure of a checked fixed-point operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MathError {
    /// Result does not fit into 256 bits.
    Overflow,
    /// Division by zero.
    DivideByZero,
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::Overflow => f.write_str("Math operation overflow"),
            MathError::DivideByZero => f.write_str("Division by zero"),
        }
    }
}

/// Try to add, return an error on overflow
pub trait TryAdd: Sized {
    /// Add
    fn try_add(self, rhs: Self) -> Result<Self, MathError>;
}

/// Try to divide, return an error on overflow or divide by zero
pub trait TryDiv<RHS>: Sized {
    /// Divide
    fn try_div(self, rhs: RHS) -> Result<Self, MathError>;
}

/// Try to multiply, return an error on overflow
pub trait TryMul<RHS>: Sized {
    /// Multiply
    fn try_mul(self, rhs: RHS) -> Result<Self, MathError>;
}
