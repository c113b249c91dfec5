//! Mock DAI token with a paid faucet, and the interface the farm uses to move
//! tokens in and out of custody.

use crate::error::TokenError;
use odra::casper_types::{U256, U512};
use odra::prelude::*;

/// Decimal places of the token
pub const DECIMALS: u8 = 18;
/// Smallest units per whole token
pub const UNITS_PER_TOKEN: u64 = 1_000_000_000_000_000_000;

/// Calls the farm makes against the token ledger.
#[odra::external_contract]
pub trait TokenLedger {
    /// Move `amount` from the caller to `recipient`
    fn transfer(&mut self, recipient: &Address, amount: &U256);
    /// Move `amount` from `owner` to `recipient` against the caller's allowance
    fn transfer_from(&mut self, owner: &Address, recipient: &Address, amount: &U256);
    /// Balance of `address`
    fn balance_of(&self, address: &Address) -> U256;
    /// Amount `spender` may still pull from `owner`
    fn allowance(&self, owner: &Address, spender: &Address) -> U256;
}

pub mod events {
    use odra::casper_types::{U256, U512};
    use odra::prelude::*;

    #[odra::event]
    pub struct Transfer {
        pub from: Address,
        pub to: Address,
        pub amount: U256,
    }

    #[odra::event]
    pub struct Approval {
        pub owner: Address,
        pub spender: Address,
        pub amount: U256,
    }

    #[odra::event]
    pub struct FaucetMinted {
        pub recipient: Address,
        pub amount: U256,
        pub paid: U512,
    }
}

/// Fungible test token. Anyone can mint through `faucet` by attaching
/// `price_per_token` motes per whole token.
#[odra::module(
    events = [events::Transfer, events::Approval, events::FaucetMinted],
    errors = TokenError
)]
pub struct MockDai {
    price_per_token: Var<U512>,
    total_supply: Var<U256>,
    balances: Mapping<Address, U256>,
    allowances: Mapping<(Address, Address), U256>,
}

#[odra::module]
impl MockDai {
    /// Initialize the token with its faucet price in motes per whole token
    pub fn init(&mut self, price_per_token: U512) {
        self.price_per_token.set(price_per_token);
        self.total_supply.set(U256::zero());
    }

    /// Mint `units` (smallest token units, 18 decimals) to the caller.
    ///
    /// The attached value must equal [`faucet_cost`](Self::faucet_cost)
    /// exactly. The runtime passes the attached motes as `amount`, so that
    /// name stays off this entry point.
    #[odra(payable)]
    pub fn faucet(&mut self, units: U256) {
        if units.is_zero() {
            self.env().revert(TokenError::InvalidAmount);
        }

        let cost = self.faucet_cost(units);
        let paid = self.env().attached_value();
        if paid != cost {
            self.env().revert(TokenError::IncorrectPayment);
        }

        let recipient = self.env().caller();
        let balance = self.balances.get_or_default(&recipient);
        self.balances.set(&recipient, balance + units);
        let supply = self.total_supply.get_or_default();
        self.total_supply.set(supply + units);

        self.env().emit_event(events::FaucetMinted {
            recipient,
            amount: units,
            paid,
        });
    }

    /// Motes the faucet charges for `units`: `price_per_token` per whole
    /// token (10^18 units), rounded up to the next mote.
    pub fn faucet_cost(&self, units: U256) -> U512 {
        let unit = U512::from(UNITS_PER_TOKEN);
        to_motes(units)
            .checked_mul(self.price_per_token.get_or_default())
            .and_then(|value| value.checked_add(unit - U512::one()))
            .map(|value| value / unit)
            .unwrap_or_else(|| self.env().revert(TokenError::InvalidAmount))
    }

    /// Move `amount` from the caller to `recipient`
    pub fn transfer(&mut self, recipient: &Address, amount: &U256) {
        let sender = self.env().caller();
        self.raw_transfer(sender, *recipient, *amount);
    }

    /// Allow `spender` to pull up to `amount` from the caller
    pub fn approve(&mut self, spender: &Address, amount: &U256) {
        let owner = self.env().caller();
        self.allowances.set(&(owner, *spender), *amount);
        self.env().emit_event(events::Approval {
            owner,
            spender: *spender,
            amount: *amount,
        });
    }

    /// Move `amount` from `owner` to `recipient` against the caller's allowance
    pub fn transfer_from(&mut self, owner: &Address, recipient: &Address, amount: &U256) {
        let spender = self.env().caller();
        let allowance = self.allowances.get_or_default(&(*owner, spender));
        if allowance < *amount {
            self.env().revert(TokenError::InsufficientAllowance);
        }
        self.allowances.set(&(*owner, spender), allowance - *amount);
        self.raw_transfer(*owner, *recipient, *amount);
    }

    pub fn balance_of(&self, address: &Address) -> U256 {
        self.balances.get_or_default(address)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.allowances.get_or_default(&(*owner, *spender))
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    pub fn price_per_token(&self) -> U512 {
        self.price_per_token.get_or_default()
    }

    pub fn name(&self) -> String {
        String::from("Mock DAI")
    }

    pub fn symbol(&self) -> String {
        String::from("mDAI")
    }

    pub fn decimals(&self) -> u8 {
        DECIMALS
    }
}

impl MockDai {
    fn raw_transfer(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balances.get_or_default(&from);
        if from_balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }
        self.balances.set(&from, from_balance - amount);
        let to_balance = self.balances.get_or_default(&to);
        self.balances.set(&to, to_balance + amount);

        self.env().emit_event(events::Transfer { from, to, amount });
    }
}

fn to_motes(value: U256) -> U512 {
    let mut bytes = [0u8; 32];
    value.to_little_endian(&mut bytes);
    U512::from_little_endian(&bytes)
}
