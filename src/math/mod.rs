//! Fixed-point math for interest compounding.

pub mod common;
pub mod rate;

pub use common::{MathError, TryAdd, TryDiv, TryMul};
pub use rate::Rate;
