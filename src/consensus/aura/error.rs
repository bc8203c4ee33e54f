use alloy_primitives::{Address, BlockNumber, Bytes, B256};

/// Failure of a system call executed against chain state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SystemCallError {
    /// The parent header the call must be bound to is unknown.
    #[error("parent header {0} not found")]
    MissingParentHeader(B256),
    /// The contract reverted.
    #[error("execution reverted: {0}")]
    Reverted(Bytes),
    /// Reading state failed.
    #[error("state access failed: {0}")]
    State(String),
}

/// Errors raised while resolving or enforcing the AuRa block gas limit override.
#[derive(Debug, thiserror::Error)]
pub enum AuraGasLimitError {
    /// The `blockGasLimit()` call could not be executed.
    #[error("unable to resolve block gas limit from contract {contract}: {source}")]
    SystemCall {
        /// Gas limit contract address.
        contract: Address,
        /// Underlying call failure.
        #[source]
        source: SystemCallError,
    },
    /// The contract returned data that is not a `uint256`.
    #[error("unable to decode block gas limit returned by contract {contract}: {source}")]
    Decode {
        /// Gas limit contract address.
        contract: Address,
        /// Underlying ABI error.
        #[source]
        source: alloy_sol_types::Error,
    },
    /// The header's gas limit disagrees with the non-zero contract value.
    #[error("block {number} gas limit {got} doesn't match BlockGasLimitContract value {expected}")]
    GasLimitMismatch {
        /// Number of the offending block.
        number: BlockNumber,
        /// Gas limit returned by the contract.
        expected: u64,
        /// Gas limit declared in the header.
        got: u64,
    },
}

impl AuraGasLimitError {
    /// Returns `true` if the header breaks a consensus rule and its branch must be rejected.
    ///
    /// Every other variant means the override could not be determined.
    pub const fn is_consensus_violation(&self) -> bool {
        matches!(self, Self::GasLimitMismatch { .. })
    }
}
