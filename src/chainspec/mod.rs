//! Chain specification for AuRa chains.
//!
//! Only the parts of the genesis `config` section the gas-limit override needs are modelled
//! here. Everything else in the document is ignored.
use alloy_primitives::{Address, BlockNumber};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// AuRa engine parameters from the genesis `config.aura` section.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuraConfig {
    /// Block gas limit contracts keyed by the block number they become active at.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub block_gas_limit_contract_transitions: BTreeMap<BlockNumber, Address>,
}

impl AuraConfig {
    /// Returns the contract registered at `transition`, if any.
    pub fn block_gas_limit_contract_at(&self, transition: BlockNumber) -> Option<Address> {
        self.block_gas_limit_contract_transitions.get(&transition).copied()
    }
}

/// AuRa chain spec type.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuraChainSpec {
    /// The chain id.
    #[serde(default)]
    pub chain_id: u64,
    /// AuRa engine parameters.
    #[serde(default)]
    pub aura: AuraConfig,
}

/// Errors raised while loading an [`AuraChainSpec`].
#[derive(Debug, thiserror::Error)]
pub enum ChainSpecError {
    /// The document is not valid JSON or does not match the expected shape.
    #[error("invalid chain spec: {0}")]
    Json(#[from] serde_json::Error),
    /// The genesis document has no `config` section.
    #[error("genesis document has no `config` section")]
    MissingConfig,
}

#[derive(Deserialize)]
struct GenesisDocument {
    config: Option<AuraChainSpec>,
}

impl AuraChainSpec {
    /// Creates a chain spec with the given gas limit contract schedule.
    pub fn new(chain_id: u64, transitions: BTreeMap<BlockNumber, Address>) -> Self {
        Self { chain_id, aura: AuraConfig { block_gas_limit_contract_transitions: transitions } }
    }

    /// Parses the `config` section of a genesis JSON document.
    pub fn from_genesis_json(json: &str) -> Result<Self, ChainSpecError> {
        let genesis: GenesisDocument = serde_json::from_str(json)?;
        let spec = genesis.config.ok_or(ChainSpecError::MissingConfig)?;
        tracing::debug!(
            chain_id = spec.chain_id,
            transitions = spec.aura.block_gas_limit_contract_transitions.len(),
            "Loaded AuRa chain spec"
        );
        Ok(spec)
    }
}
