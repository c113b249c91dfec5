//! Per-account positions and the block clock they are checkpointed against.

pub mod deposit;

pub use deposit::*;

/// Milliseconds between Casper blocks. Contracts only see block time, so the
/// block index is derived from it.
pub const BLOCK_INTERVAL_MS: u64 = 8_192;

/// Blocks in a year at [`BLOCK_INTERVAL_MS`]
pub const BLOCKS_PER_YEAR: u64 = 365 * 24 * 60 * 60 * 1000 / BLOCK_INTERVAL_MS;

/// Block index for a block time in milliseconds
pub fn block_at(block_time_ms: u64) -> u64 {
    block_time_ms / BLOCK_INTERVAL_MS
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn block_index_steps_every_interval() {
        assert_eq!(block_at(0), 0);
        assert_eq!(block_at(BLOCK_INTERVAL_MS - 1), 0);
        assert_eq!(block_at(BLOCK_INTERVAL_MS), 1);
        assert_eq!(block_at(10 * BLOCK_INTERVAL_MS + 5), 10);
    }

    #[test]
    fn blocks_per_year_sanity() {
        assert_eq!(BLOCKS_PER_YEAR, 3_849_609);
    }
}
