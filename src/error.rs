//! Error types

use crate::math::MathError;
use core::fmt;
use odra::prelude::*;

/// Errors the yield farm reverts with.
#[odra::odra_error]
#[derive(Debug)]
pub enum FarmError {
    /// Deposit or withdraw of zero tokens
    InvalidAmount = 1,
    /// Withdraw exceeds the reconciled balance
    InsufficientBalance = 2,
    /// The token ledger would reject the pull or push
    TransferFailed = 3,
    /// Caller is not the owner
    Unauthorized = 4,
    /// Block clock went backwards past a checkpoint
    ClockRegression = 5,
    /// Fixed-point arithmetic overflowed
    MathOverflow = 6,
    /// Construction parameters are invalid
    InvalidConfig = 7,
}

impl FarmError {
    /// Human readable description
    pub fn message(&self) -> &str {
        match self {
            FarmError::InvalidAmount => "Amount must be greater than 0",
            FarmError::InsufficientBalance => "Insufficient balance",
            FarmError::TransferFailed => "Token transfer failed",
            FarmError::Unauthorized => "Caller is not the owner",
            FarmError::ClockRegression => "Block clock is not monotonic",
            FarmError::MathOverflow => "Math operation overflow",
            FarmError::InvalidConfig => "Blocks per year must be greater than 0",
        }
    }
}

impl fmt::Display for FarmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<MathError> for FarmError {
    fn from(_: MathError) -> Self {
        FarmError::MathOverflow
    }
}

/// Errors the mock token reverts with.
#[odra::odra_error]
#[derive(Debug)]
pub enum TokenError {
    /// Zero-amount faucet request
    InvalidAmount = 100,
    /// Sender balance too low
    InsufficientBalance = 101,
    /// Spender allowance too low
    InsufficientAllowance = 102,
    /// Attached value does not match the faucet price
    IncorrectPayment = 103,
}

impl TokenError {
    /// Human readable description
    pub fn message(&self) -> &str {
        match self {
            TokenError::InvalidAmount => "Amount must be greater than 0",
            TokenError::InsufficientBalance => "Insufficient balance",
            TokenError::InsufficientAllowance => "Insufficient allowance",
            TokenError::IncorrectPayment => "Incorrect payment for faucet",
        }
    }
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
