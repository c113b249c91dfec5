#![allow(clippy::arithmetic_side_effects)]
#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]

//! A single-asset yield farm for the casper blockchain.

pub mod error;
pub mod farm;
pub mod math;
pub mod state;
pub mod token;

pub use error::{FarmError, TokenError};
pub use farm::YieldFarm;
pub use state::Deposit;
pub use token::MockDai;

extern crate alloc;
