pub mod aura;
pub mod constants;
pub mod contract;
pub mod error;
pub mod gas_limit_override;
pub mod provider;
pub mod system_call;
pub mod util;
mod validation;

pub use aura::Aura;
pub use constants::*;
pub use error::{AuraGasLimitError, SystemCallError};
pub use gas_limit_override::GasLimitOverride;
pub use provider::HeaderProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use provider::InMemoryHeaderProvider;
pub use system_call::{ParentStateCall, StateSystemCall, SystemCall};
pub use util::is_pos_header;
