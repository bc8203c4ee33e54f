//! AuRa gas-limit override constants.

use alloy_primitives::BlockNumber;

/// Number of recent block hashes for which a gas limit override is memoized.
pub const GAS_LIMIT_OVERRIDE_CACHE_CAPACITY: u32 = 10;

/// Transition point whose block gas limit contract is consulted.
pub const BLOCK_GAS_LIMIT_CONTRACT_TRANSITION: BlockNumber = 0;
