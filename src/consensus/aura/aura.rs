use super::{
    contract::{block_gas_limit_contract, call_block_gas_limit, has_gas_limit_contract, query_block_gas_limit},
    error::AuraGasLimitError,
    gas_limit_override::GasLimitOverride,
    system_call::SystemCall,
};
use crate::chainspec::AuraChainSpec;
use alloy_primitives::{Address, B256};
use std::sync::Arc;

/// AuRa consensus engine state relevant to the block gas limit contract.
#[derive(Debug)]
pub struct Aura {
    chain_spec: Arc<AuraChainSpec>,
    gas_limit_override: GasLimitOverride,
}

impl Aura {
    /// Creates an engine with an empty override cache of the default capacity.
    pub fn new(chain_spec: Arc<AuraChainSpec>) -> Self {
        Self::with_override_cache(chain_spec, GasLimitOverride::new())
    }

    /// Creates an engine using the given override cache.
    pub fn with_override_cache(chain_spec: Arc<AuraChainSpec>, gas_limit_override: GasLimitOverride) -> Self {
        Self { chain_spec, gas_limit_override }
    }

    /// The chain spec the engine was created with.
    pub fn chain_spec(&self) -> &Arc<AuraChainSpec> {
        &self.chain_spec
    }

    /// Memoized overrides shared by block assembly and import.
    pub fn gas_limit_override(&self) -> &GasLimitOverride {
        &self.gas_limit_override
    }

    /// Returns `true` if the chain schedules a block gas limit contract.
    pub fn has_gas_limit_contract(&self) -> bool {
        has_gas_limit_contract(&self.chain_spec.aura)
    }

    /// Address of the block gas limit contract in effect.
    pub fn block_gas_limit_contract(&self) -> Option<Address> {
        block_gas_limit_contract(&self.chain_spec.aura)
    }

    /// Asks the block gas limit contract for its gas limit through `syscall`.
    ///
    /// Returns `0` when no contract is registered, which callers treat as "no override".
    pub fn get_block_gas_limit_from_contract<C>(&self, syscall: &C) -> Result<u64, AuraGasLimitError>
    where
        C: SystemCall + ?Sized,
    {
        let Some(contract) = self.block_gas_limit_contract() else {
            return Ok(0);
        };
        call_block_gas_limit(contract, syscall)
    }

    /// Queries the contract against the state of `block_hash` and memoizes a non-zero answer.
    ///
    /// `syscall` must be bound to the post-state of `block_hash`. A zero answer is not an
    /// override and is not memoized.
    pub fn prefetch_gas_limit_override<C>(&self, block_hash: B256, syscall: &C) -> Result<(), AuraGasLimitError>
    where
        C: SystemCall + ?Sized,
    {
        let Some(contract) = self.block_gas_limit_contract() else {
            return Ok(());
        };
        let gas_limit = query_block_gas_limit(contract, syscall)?;
        if gas_limit.is_zero() {
            return Ok(());
        }
        self.gas_limit_override.add(block_hash, Some(gas_limit));
        Ok(())
    }

    /// Gas limit for a block built on top of `parent_hash`.
    ///
    /// Uses the override memoized for `parent_hash` if there is one, otherwise queries the
    /// contract. A zero answer falls back to `fallback`.
    pub fn block_gas_limit_for_child<C>(
        &self,
        parent_hash: B256,
        syscall: &C,
        fallback: u64,
    ) -> Result<u64, AuraGasLimitError>
    where
        C: SystemCall + ?Sized,
    {
        let gas_limit = match self.gas_limit_override.pop(&parent_hash) {
            Some(gas_limit) => gas_limit.wrapping_to::<u64>(),
            None => self.get_block_gas_limit_from_contract(syscall)?,
        };

        if gas_limit == 0 {
            return Ok(fallback);
        }
        tracing::debug!(%parent_hash, gas_limit, "Using block gas limit from contract");
        Ok(gas_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::aura::error::SystemCallError;
    use alloy_primitives::{address, Bytes, U256};
    use std::{cell::Cell, collections::BTreeMap};

    const CONTRACT: Address = address!("4000000000000000000000000000000000000005");

    fn aura(transitions: &[(u64, Address)]) -> Aura {
        let transitions: BTreeMap<_, _> = transitions.iter().copied().collect();
        Aura::new(Arc::new(AuraChainSpec::new(77, transitions)))
    }

    struct CountingCall {
        value: U256,
        calls: Cell<usize>,
    }

    impl CountingCall {
        fn new(value: u64) -> Self {
            Self { value: U256::from(value), calls: Cell::new(0) }
        }
    }

    impl SystemCall for CountingCall {
        fn system_call(&self, _: Address, _: Bytes) -> Result<Bytes, SystemCallError> {
            self.calls.set(self.calls.get() + 1);
            Ok(Bytes::from(self.value.to_be_bytes::<32>()))
        }
    }

    #[test]
    fn no_contract_yields_zero_without_calling() {
        let aura = aura(&[]);
        let call = CountingCall::new(9);

        assert!(!aura.has_gas_limit_contract());
        assert_eq!(aura.get_block_gas_limit_from_contract(&call).unwrap(), 0);
        assert_eq!(call.calls.get(), 0);
    }

    #[test]
    fn reads_gas_limit_from_contract() {
        let aura = aura(&[(0, CONTRACT)]);
        let call = CountingCall::new(20_000_000);

        assert_eq!(aura.block_gas_limit_contract(), Some(CONTRACT));
        assert_eq!(aura.get_block_gas_limit_from_contract(&call).unwrap(), 20_000_000);
        assert_eq!(call.calls.get(), 1);
    }

    #[test]
    fn child_gas_limit_uses_prefetched_override_once() {
        let aura = aura(&[(0, CONTRACT)]);
        let parent = B256::repeat_byte(3);
        let call = CountingCall::new(12_000_000);

        aura.prefetch_gas_limit_override(parent, &call).unwrap();
        assert_eq!(call.calls.get(), 1);

        assert_eq!(aura.block_gas_limit_for_child(parent, &call, 30_000_000).unwrap(), 12_000_000);
        assert_eq!(call.calls.get(), 1);

        // the memoized value is gone, so the contract is asked again
        assert_eq!(aura.block_gas_limit_for_child(parent, &call, 30_000_000).unwrap(), 12_000_000);
        assert_eq!(call.calls.get(), 2);
    }

    #[test]
    fn zero_override_falls_back() {
        let aura = aura(&[(0, CONTRACT)]);
        let call = CountingCall::new(0);

        assert_eq!(aura.block_gas_limit_for_child(B256::ZERO, &call, 30_000_000).unwrap(), 30_000_000);
    }

    #[test]
    fn zero_prefetch_memoizes_nothing() {
        let aura = aura(&[(0, CONTRACT)]);
        let parent = B256::repeat_byte(4);
        let call = CountingCall::new(0);

        aura.prefetch_gas_limit_override(parent, &call).unwrap();
        assert!(aura.gas_limit_override().is_empty());
        assert_eq!(call.calls.get(), 1);

        // nothing memoized, so building the child asks the contract again
        assert_eq!(aura.block_gas_limit_for_child(parent, &call, 30_000_000).unwrap(), 30_000_000);
        assert_eq!(call.calls.get(), 2);
    }

    #[test]
    fn prefetch_without_contract_memoizes_nothing() {
        let aura = aura(&[]);
        let call = CountingCall::new(5);

        aura.prefetch_gas_limit_override(B256::ZERO, &call).unwrap();
        assert!(aura.gas_limit_override().is_empty());
        assert_eq!(call.calls.get(), 0);
    }
}
