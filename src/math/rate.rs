//! Rate type for interest rate calculations using U256

use {
    crate::math::common::*,
    alloc::{format, string::ToString},
    core::fmt,
    odra::casper_types::U256,
};

/// Interest rate as an 18-decimal fixed-point value. Every operation rounds
/// down, so compounding never produces value that is not there.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Eq, Ord)]
pub struct Rate(pub U256);

impl Rate {
    /// One (100%)
    pub fn one() -> Self {
        Self(Self::wad())
    }

    /// Zero (0%)
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    fn wad() -> U256 {
        U256::from(WAD)
    }

    /// Create rate from percent value
    pub fn from_percent(percent: u32) -> Self {
        Self(U256::from(percent) * U256::from(PERCENT_SCALER))
    }

    /// Per-block rate for an annual percentage yield spread over
    /// `blocks_per_year` compounding periods.
    pub fn per_block(apy: u32, blocks_per_year: u64) -> Result<Self, MathError> {
        Self::from_percent(apy).try_div(blocks_per_year)
    }

    /// Return raw scaled value
    pub fn to_scaled_val(&self) -> U256 {
        self.0
    }

    /// Create rate from scaled value
    pub fn from_scaled_val(scaled_val: U256) -> Self {
        Self(scaled_val)
    }

    /// `1 + self`, the factor a balance grows by over one period.
    pub fn growth_factor(&self) -> Result<Self, MathError> {
        Self::one().try_add(*self)
    }

    /// Calculate power (for compound interest) by repeated squaring.
    pub fn try_pow(&self, exponent: u64) -> Result<Self, MathError> {
        let mut result = Self::one();
        let mut base = *self;
        let mut exp = exponent;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result.try_mul(base)?;
            }
            exp >>= 1;
            if exp > 0 {
                base = base.try_mul(base)?;
            }
        }

        Ok(result)
    }

    /// Scale a token amount by this rate, truncating the fractional unit.
    pub fn try_apply(&self, amount: U256) -> Result<U256, MathError> {
        amount
            .checked_mul(self.0)
            .ok_or(MathError::Overflow)?
            .checked_div(Self::wad())
            .ok_or(MathError::DivideByZero)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut scaled_val = self.0.to_string();
        if scaled_val.len() <= SCALE {
            let padding = "0".repeat(SCALE - scaled_val.len());
            scaled_val = format!("0.{}{}", padding, scaled_val);
        } else {
            scaled_val.insert(scaled_val.len() - SCALE, '.');
        }
        f.write_str(&scaled_val)
    }
}

impl From<u64> for Rate {
    fn from(val: u64) -> Self {
        Self(Self::wad() * U256::from(val))
    }
}

impl TryAdd for Rate {
    fn try_add(self, rhs: Self) -> Result<Self, MathError> {
        Ok(Self(self.0.checked_add(rhs.0).ok_or(MathError::Overflow)?))
    }
}

impl TryDiv<u64> for Rate {
    fn try_div(self, rhs: u64) -> Result<Self, MathError> {
        Ok(Self(
            self.0
                .checked_div(U256::from(rhs))
                .ok_or(MathError::DivideByZero)?,
        ))
    }
}

impl TryMul<Rate> for Rate {
    fn try_mul(self, rhs: Self) -> Result<Self, MathError> {
        Ok(Self(
            self.0
                .checked_mul(rhs.0)
                .ok_or(MathError::Overflow)?
                .checked_div(Self::wad())
                .ok_or(MathError::DivideByZero)?,
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rate_percent() {
        let rate = Rate::from_percent(5);
        assert_eq!(rate.to_scaled_val(), U256::from(50_000_000_000_000_000u64));
    }

    #[test]
    fn test_rate_per_block() {
        let rate = Rate::per_block(10, 1000).unwrap();
        assert_eq!(rate.to_scaled_val(), U256::from(100_000_000_000_000u64));
        assert_eq!(Rate::per_block(0, 1000).unwrap(), Rate::zero());
        assert_eq!(Rate::per_block(10, 0), Err(MathError::DivideByZero));
    }

    #[test]
    fn test_rate_per_block_rounds_down() {
        // 10% over 3 periods is 0.0333.., truncated at the 18th decimal
        let rate = Rate::per_block(10, 3).unwrap();
        assert_eq!(rate.to_scaled_val(), U256::from(33_333_333_333_333_333u64));
    }

    #[test]
    fn test_rate_pow() {
        let rate = Rate::from_percent(10);
        let squared = rate.try_pow(2).unwrap();
        assert_eq!(squared, Rate::from_percent(1));
        assert_eq!(rate.try_pow(0).unwrap(), Rate::one());
        assert_eq!(rate.try_pow(1).unwrap(), rate);
    }

    #[test]
    fn test_rate_pow_matches_repeated_multiplication() {
        let growth = Rate::per_block(10, 1000).unwrap().growth_factor().unwrap();
        let mut expected = Rate::one();
        for _ in 0..4 {
            expected = expected.try_mul(growth).unwrap();
        }
        // 1.0001^4 is exact at 18 decimals, so both paths agree
        assert_eq!(growth.try_pow(4).unwrap(), expected);
    }

    #[test]
    fn test_rate_pow_overflow() {
        let rate = Rate::from(1_000_000_000u64);
        assert_eq!(rate.try_pow(10), Err(MathError::Overflow));
    }

    #[test]
    fn test_rate_pow_large_exponent_is_bounded() {
        // a zero rate stays at one no matter how many periods pass
        let growth = Rate::zero().growth_factor().unwrap();
        assert_eq!(growth.try_pow(u64::MAX).unwrap(), Rate::one());
    }

    #[test]
    fn test_rate_apply_truncates() {
        let rate = Rate::from_scaled_val(U256::from(1_500_000_000_000_000_000u64));
        assert_eq!(rate.try_apply(U256::from(3)).unwrap(), U256::from(4));
    }

    #[test]
    fn test_rate_display() {
        assert_eq!(Rate::from_percent(10).to_string(), "0.100000000000000000");
        assert_eq!(Rate::from(2).to_string(), "2.000000000000000000");
    }
}
