pub mod chainspec;
pub mod consensus;
pub mod system_contracts;

pub use chainspec::{AuraChainSpec, AuraConfig};
pub use consensus::aura::{Aura, AuraGasLimitError, GasLimitOverride};
