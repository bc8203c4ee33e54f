//! Resolution of the block gas limit contract and the `blockGasLimit()` query.

use super::{
    constants::BLOCK_GAS_LIMIT_CONTRACT_TRANSITION, error::AuraGasLimitError,
    system_call::SystemCall,
};
use crate::{
    chainspec::AuraConfig,
    system_contracts::{block_gas_limit_input, blockGasLimitCall},
};
use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;

/// Returns `true` if the chain schedules any block gas limit contract.
pub fn has_gas_limit_contract(config: &AuraConfig) -> bool {
    !config.block_gas_limit_contract_transitions.is_empty()
}

/// Returns the active block gas limit contract.
///
/// Only the contract registered at the genesis transition is consulted; later transitions are
/// not searched.
pub fn block_gas_limit_contract(config: &AuraConfig) -> Option<Address> {
    config.block_gas_limit_contract_at(BLOCK_GAS_LIMIT_CONTRACT_TRANSITION)
}

/// Calls `blockGasLimit()` on `contract` and returns the full 256-bit answer.
pub fn query_block_gas_limit<C>(contract: Address, syscall: &C) -> Result<U256, AuraGasLimitError>
where
    C: SystemCall + ?Sized,
{
    let output = syscall
        .system_call(contract, block_gas_limit_input())
        .map_err(|source| AuraGasLimitError::SystemCall { contract, source })?;

    blockGasLimitCall::abi_decode_returns(&output)
        .map_err(|source| AuraGasLimitError::Decode { contract, source })
}

/// Calls `blockGasLimit()` on `contract`, keeping the low 64 bits of the answer.
pub fn call_block_gas_limit<C>(contract: Address, syscall: &C) -> Result<u64, AuraGasLimitError>
where
    C: SystemCall + ?Sized,
{
    let gas_limit = query_block_gas_limit(contract, syscall)?;
    if gas_limit > U256::from(u64::MAX) {
        tracing::warn!(%contract, %gas_limit, "Block gas limit contract value exceeds 64 bits");
    }
    Ok(gas_limit.wrapping_to::<u64>())
}
