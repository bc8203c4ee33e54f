//! Enforcement of the block gas limit contract during header validation.

use super::{
    aura::Aura,
    contract::call_block_gas_limit,
    error::AuraGasLimitError,
    provider::HeaderProvider,
    system_call::{ParentStateCall, StateSystemCall},
    util::is_pos_header,
};
use alloy_consensus::Header;

impl Aura {
    /// Verifies that `header` carries the gas limit pinned by the block gas limit contract.
    ///
    /// The contract is queried read-only against `state`, in the context of the header's
    /// parent. A zero answer means the contract does not override this block. A non-zero answer
    /// must equal `header.gas_limit`, otherwise [`AuraGasLimitError::GasLimitMismatch`] is
    /// returned and the block must be rejected.
    ///
    /// Failing to obtain the answer is an error as well; it is never read as "no override".
    pub fn verify_gas_limit_override<S, P, C>(
        &self,
        headers: &P,
        header: &Header,
        state: &S,
        syscall: &C,
    ) -> Result<(), AuraGasLimitError>
    where
        P: HeaderProvider,
        C: StateSystemCall<S>,
    {
        // post-merge headers still reach AuRa initialization
        if !self.has_gas_limit_contract() || is_pos_header(header) {
            tracing::trace!(number = header.number, "Skipping block gas limit contract check");
            return Ok(());
        }

        let syscall = ParentStateCall::new(state, headers, header.parent_hash, syscall);

        let Some(contract) = self.block_gas_limit_contract() else {
            tracing::trace!(number = header.number, "No block gas limit contract at genesis transition");
            return Ok(());
        };

        let gas_limit = call_block_gas_limit(contract, &syscall).inspect_err(|err| {
            tracing::warn!(number = header.number, %contract, %err, "Failed to query block gas limit contract");
        })?;

        if gas_limit == 0 {
            return Ok(());
        }

        if header.gas_limit != gas_limit {
            tracing::warn!(
                number = header.number,
                expected = gas_limit,
                got = header.gas_limit,
                "Block gas limit doesn't match BlockGasLimitContract"
            );
            return Err(AuraGasLimitError::GasLimitMismatch {
                number: header.number,
                expected: gas_limit,
                got: header.gas_limit,
            });
        }

        tracing::debug!(number = header.number, gas_limit, "Block gas limit matches contract");
        Ok(())
    }
}
