//! ABI bindings for the AuRa system contracts queried by the consensus engine.
use alloy_primitives::Bytes;
use alloy_sol_macro::sol;
use alloy_sol_types::SolCall;

sol!(
    /// On-chain contract that pins the block gas limit for the current chain segment.
    interface IBlockGasLimit {
        function blockGasLimit() external view returns (uint256);
    }
);

pub use IBlockGasLimit::blockGasLimitCall;

/// Calldata for `blockGasLimit()`.
pub fn block_gas_limit_input() -> Bytes {
    Bytes::from(blockGasLimitCall {}.abi_encode())
}
