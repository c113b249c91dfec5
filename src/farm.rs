//! Yield farm contract
//!
//! Users park tokens with the farm and earn compound interest per block at an
//! owner-set APY. Interest is never written per block: a position stores its
//! principal and the block it was last reconciled at, and every read or write
//! compounds it forward from there.

use odra::casper_types::U256;
use odra::prelude::*;
use odra::ContractRef;

use crate::error::FarmError;
use crate::math::Rate;
use crate::state::{block_at, Deposit};
use crate::token::TokenLedgerContractRef;

pub mod events {
    use odra::casper_types::U256;
    use odra::prelude::*;

    #[odra::event]
    pub struct Deposited {
        pub account: Address,
        pub amount: U256,
        pub balance: U256,
        pub block: u64,
    }

    #[odra::event]
    pub struct Withdrawn {
        pub account: Address,
        pub amount: U256,
        pub balance: U256,
        pub block: u64,
    }

    #[odra::event]
    pub struct ApyChanged {
        pub old_apy: u32,
        pub new_apy: u32,
    }

    #[odra::event]
    pub struct RewardsFunded {
        pub funder: Address,
        pub amount: U256,
    }

    #[odra::event]
    pub struct OwnershipTransferred {
        pub previous_owner: Address,
        pub new_owner: Address,
    }
}

#[odra::module(
    events = [
        events::Deposited,
        events::Withdrawn,
        events::ApyChanged,
        events::RewardsFunded,
        events::OwnershipTransferred
    ],
    errors = FarmError
)]
pub struct YieldFarm {
    token: Var<Address>,
    owner: Var<Address>,

    // Rate parameters
    apy: Var<u32>,
    blocks_per_year: Var<u64>,

    deposits: Mapping<Address, Deposit>,
}

#[odra::module]
impl YieldFarm {
    // ===========================================================================
    // CONSTRUCTOR
    // ===========================================================================
    pub fn init(&mut self, token: Address, apy: u32, blocks_per_year: u64) {
        if blocks_per_year == 0 {
            self.env().revert(FarmError::InvalidConfig);
        }

        self.token.set(token);
        self.apy.set(apy);
        self.blocks_per_year.set(blocks_per_year);
        self.owner.set(self.env().caller());
    }

    // ===========================================================================
    // DEPOSIT AND WITHDRAW
    // ===========================================================================

    /// Pull `amount` tokens from the caller into custody and add them to the
    /// caller's position. The farm must be approved for `amount` first.
    pub fn deposit(&mut self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(FarmError::InvalidAmount);
        }

        let caller = self.env().caller();
        let block = self.current_block();

        self.pull(caller, amount);

        let mut position = self.reconciled(caller, block);
        position
            .credit(amount, block)
            .unwrap_or_else(|err| self.env().revert(err));
        let balance = position.amount;
        self.deposits.set(&caller, position);

        self.env().emit_event(events::Deposited {
            account: caller,
            amount,
            balance,
            block,
        });
    }

    /// Take `amount` out of the caller's compounded balance and send it back.
    pub fn withdraw(&mut self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(FarmError::InvalidAmount);
        }
        self.withdraw_from_position(amount);
    }

    /// Withdraw the caller's entire compounded balance, closing the position.
    /// Returns the amount paid out.
    pub fn withdraw_all(&mut self) -> U256 {
        let caller = self.env().caller();
        let amount = self.reconciled(caller, self.current_block()).amount;
        if amount.is_zero() {
            self.env().revert(FarmError::InsufficientBalance);
        }
        self.withdraw_from_position(amount);
        amount
    }

    /// Add tokens to custody without opening a position, backing the yield
    /// depositors accrue.
    pub fn fund_rewards(&mut self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(FarmError::InvalidAmount);
        }

        let funder = self.env().caller();
        self.pull(funder, amount);

        self.env()
            .emit_event(events::RewardsFunded { funder, amount });
    }

    // ===========================================================================
    // OWNER OPERATIONS
    // ===========================================================================

    /// Replace the APY. Applies to every reconciliation from now on.
    pub fn set_apy(&mut self, new_apy: u32) {
        self.require_owner();

        let old_apy = self.apy.get_or_default();
        self.apy.set(new_apy);

        self.env().emit_event(events::ApyChanged { old_apy, new_apy });
    }

    pub fn transfer_ownership(&mut self, new_owner: Address) {
        self.require_owner();

        let previous_owner = self.env().caller();
        self.owner.set(new_owner);

        self.env().emit_event(events::OwnershipTransferred {
            previous_owner,
            new_owner,
        });
    }

    // ===========================================================================
    // VIEWS
    // ===========================================================================

    /// Compounded balance of `account` as of the current block. Nothing is
    /// written.
    pub fn get_balance(&self, account: Address) -> U256 {
        self.reconciled(account, self.current_block()).amount
    }

    /// Stored position of `account`, as of its last checkpoint
    pub fn deposits(&self, account: Address) -> Deposit {
        self.deposits.get_or_default(&account)
    }

    pub fn apy(&self) -> u32 {
        self.apy.get_or_default()
    }

    pub fn blocks_per_year(&self) -> u64 {
        self.blocks_per_year.get_or_default()
    }

    /// Per-block rate, 18-decimal fixed point
    pub fn rate_per_block(&self) -> U256 {
        Rate::per_block(self.apy(), self.blocks_per_year())
            .unwrap_or_else(|err| self.env().revert(FarmError::from(err)))
            .to_scaled_val()
    }

    pub fn current_block(&self) -> u64 {
        block_at(self.env().get_block_time())
    }

    pub fn owner(&self) -> Option<Address> {
        self.owner.get()
    }

    pub fn token(&self) -> Option<Address> {
        self.token.get()
    }

    /// Tokens the farm holds for depositors and rewards
    pub fn custody_balance(&self) -> U256 {
        let custody = self.env().self_address();
        self.token_ledger().balance_of(&custody)
    }
}

impl YieldFarm {
    fn require_owner(&self) {
        if self.owner.get() != Some(self.env().caller()) {
            self.env().revert(FarmError::Unauthorized);
        }
    }

    /// The stored position of `account` compounded forward to `block`
    fn reconciled(&self, account: Address, block: u64) -> Deposit {
        self.deposits
            .get_or_default(&account)
            .accrued(block, self.apy(), self.blocks_per_year())
            .unwrap_or_else(|err| self.env().revert(err))
    }

    fn withdraw_from_position(&mut self, amount: U256) {
        let caller = self.env().caller();
        let block = self.current_block();

        let mut position = self.reconciled(caller, block);
        position
            .debit(amount, block)
            .unwrap_or_else(|err| self.env().revert(err));
        let balance = position.amount;
        self.deposits.set(&caller, position);

        self.push(caller, amount);

        self.env().emit_event(events::Withdrawn {
            account: caller,
            amount,
            balance,
            block,
        });
    }

    fn token_ledger(&self) -> TokenLedgerContractRef {
        let token = self
            .token
            .get()
            .unwrap_or_else(|| self.env().revert(FarmError::InvalidConfig));
        TokenLedgerContractRef::new(self.env().clone(), token)
    }

    /// Move `amount` from `from` into custody
    fn pull(&self, from: Address, amount: U256) {
        let custody = self.env().self_address();
        let mut token = self.token_ledger();

        if token.balance_of(&from) < amount || token.allowance(&from, &custody) < amount {
            self.env().revert(FarmError::TransferFailed);
        }
        token.transfer_from(&from, &custody, &amount);
    }

    /// Move `amount` from custody to `to`
    fn push(&self, to: Address, amount: U256) {
        let custody = self.env().self_address();
        let mut token = self.token_ledger();

        if token.balance_of(&custody) < amount {
            self.env().revert(FarmError::TransferFailed);
        }
        token.transfer(&to, &amount);
    }
}
