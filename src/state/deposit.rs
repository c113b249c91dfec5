use crate::error::FarmError;
use crate::math::Rate;
use odra::casper_types::U256;

/// One account's position in the farm.
#[odra::odra_type]
#[derive(Default)]
pub struct Deposit {
    /// Principal including all interest compounded up to `last_block`
    pub amount: U256,
    /// Block at which `amount` was last reconciled
    pub last_block: u64,
}

impl Deposit {
    /// Create a deposit checkpointed at `block`
    pub fn new(amount: U256, block: u64) -> Self {
        Self {
            amount,
            last_block: block,
        }
    }

    /// True while some principal is held
    pub fn is_open(&self) -> bool {
        !self.amount.is_zero()
    }

    /// Return blocks elapsed since the checkpoint
    pub fn blocks_elapsed(&self, block: u64) -> Result<u64, FarmError> {
        block
            .checked_sub(self.last_block)
            .ok_or(FarmError::ClockRegression)
    }

    /// The position as it stands at `block`: principal compounded once per
    /// elapsed block at `apy / 100 / blocks_per_year`, truncated to whole
    /// token units and checkpointed at `block`. A closed position is returned
    /// as is.
    pub fn accrued(&self, block: u64, apy: u32, blocks_per_year: u64) -> Result<Self, FarmError> {
        if !self.is_open() {
            return Ok(Self::new(self.amount, self.last_block));
        }

        let elapsed = self.blocks_elapsed(block)?;
        let factor = Rate::per_block(apy, blocks_per_year)?
            .growth_factor()?
            .try_pow(elapsed)?;

        Ok(Self::new(factor.try_apply(self.amount)?, block))
    }

    /// Add `amount` to the principal and checkpoint at `block`
    pub fn credit(&mut self, amount: U256, block: u64) -> Result<(), FarmError> {
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(FarmError::MathOverflow)?;
        self.last_block = block;
        Ok(())
    }

    /// Remove `amount` from the principal and checkpoint at `block`
    pub fn debit(&mut self, amount: U256, block: u64) -> Result<(), FarmError> {
        if amount > self.amount {
            return Err(FarmError::InsufficientBalance);
        }
        self.amount -= amount;
        self.last_block = block;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const TOKEN: u128 = 1_000_000_000_000_000_000;

    fn tokens(n: u128) -> U256 {
        U256::from(n * TOKEN)
    }

    fn reference(principal: f64, apy: f64, blocks_per_year: f64, elapsed: i32) -> f64 {
        principal * (1.0 + apy / 100.0 / blocks_per_year).powi(elapsed)
    }

    #[test]
    fn closed_position_is_untouched() {
        let deposit = Deposit::new(U256::zero(), 7);
        let accrued = deposit.accrued(100, 10, 1000).unwrap();
        assert!(!accrued.is_open());
        assert_eq!(accrued.last_block, 7);
    }

    #[test]
    fn same_block_accrues_nothing() {
        let deposit = Deposit::new(tokens(1000), 42);
        let accrued = deposit.accrued(42, 10, 1000).unwrap();
        assert_eq!(accrued.amount, tokens(1000));
        assert_eq!(accrued.last_block, 42);
    }

    #[test]
    fn compounds_like_the_reference_formula() {
        for elapsed in [5u64, 10] {
            let deposit = Deposit::new(tokens(1000), 0);
            let accrued = deposit.accrued(elapsed, 10, 1000).unwrap();
            let on_chain = accrued.amount.as_u128() as f64;
            let expected = reference(1000.0 * TOKEN as f64, 10.0, 1000.0, elapsed as i32);
            assert!((on_chain - expected).abs() < 0.000001 * expected);
            assert_eq!(accrued.last_block, elapsed);
        }
    }

    #[test]
    fn rounds_down_to_whole_units() {
        // 1000 * 1.0001^5 = 1000.50010001000050001, cut at the 18th decimal
        let deposit = Deposit::new(tokens(1000), 0);
        let accrued = deposit.accrued(5, 10, 1000).unwrap();
        assert_eq!(accrued.amount, U256::from(1_000_500_100_010_000_500_000u128));
    }

    #[test]
    fn balance_never_decreases_with_time() {
        let deposit = Deposit::new(tokens(1000), 0);
        let mut previous = deposit.amount;
        for block in 0..50 {
            let amount = deposit.accrued(block * 37, 10, 1000).unwrap().amount;
            assert!(amount >= previous);
            previous = amount;
        }
    }

    #[test]
    fn zero_apy_keeps_principal() {
        let deposit = Deposit::new(tokens(5), 0);
        let accrued = deposit.accrued(1_000_000, 0, 1000).unwrap();
        assert_eq!(accrued.amount, tokens(5));
    }

    #[test]
    fn truncates_sub_unit_interest() {
        // 1000 units at 0.01% per block earn 0.1 units, which is dropped
        let deposit = Deposit::new(U256::from(1000), 0);
        let accrued = deposit.accrued(1, 10, 1000).unwrap();
        assert_eq!(accrued.amount, U256::from(1000));
    }

    #[test]
    fn clock_regression_is_rejected() {
        let deposit = Deposit::new(tokens(1), 10);
        assert!(matches!(
            deposit.accrued(9, 10, 1000),
            Err(FarmError::ClockRegression)
        ));
        assert!(matches!(
            deposit.blocks_elapsed(9),
            Err(FarmError::ClockRegression)
        ));
    }

    #[test]
    fn huge_elapsed_overflows_instead_of_wrapping() {
        let deposit = Deposit::new(tokens(1), 0);
        assert!(matches!(
            deposit.accrued(u64::MAX, 100, 1),
            Err(FarmError::MathOverflow)
        ));
    }

    #[test]
    fn credit_and_debit() {
        let mut deposit = Deposit::default();
        assert!(deposit.credit(tokens(3), 4).is_ok());
        assert_eq!(deposit.amount, tokens(3));
        assert_eq!(deposit.last_block, 4);

        assert!(matches!(
            deposit.debit(tokens(4), 5),
            Err(FarmError::InsufficientBalance)
        ));
        assert_eq!(deposit.amount, tokens(3));
        assert_eq!(deposit.last_block, 4);

        assert!(deposit.debit(tokens(3), 6).is_ok());
        assert!(!deposit.is_open());
        assert_eq!(deposit.last_block, 6);
    }
}
