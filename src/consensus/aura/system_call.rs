//! System calls executed by the AuRa engine against chain state.
//!
//! A system call runs a contract as the protocol itself rather than as a user transaction.
//! The engine never owns an EVM; callers hand it a capability instead.

use super::{error::SystemCallError, provider::HeaderProvider};
use alloy_consensus::Header;
use alloy_primitives::{Address, Bytes, B256};

/// A system call already bound to a state snapshot and header context.
pub trait SystemCall {
    /// Calls `contract` with `input` and returns the raw return data.
    fn system_call(&self, contract: Address, input: Bytes) -> Result<Bytes, SystemCallError>;
}

impl<F> SystemCall for F
where
    F: Fn(Address, Bytes) -> Result<Bytes, SystemCallError>,
{
    fn system_call(&self, contract: Address, input: Bytes) -> Result<Bytes, SystemCallError> {
        self(contract, input)
    }
}

/// A system call that is told which state and parent header to execute against.
///
/// `read_only` marks a query whose state changes must be discarded.
pub trait StateSystemCall<S> {
    /// Calls `contract` with `input` on top of `state`, in the context of `parent`.
    fn system_call_at(
        &self,
        contract: Address,
        input: Bytes,
        state: &S,
        parent: &Header,
        read_only: bool,
    ) -> Result<Bytes, SystemCallError>;
}

impl<S, F> StateSystemCall<S> for F
where
    F: Fn(Address, Bytes, &S, &Header, bool) -> Result<Bytes, SystemCallError>,
{
    fn system_call_at(
        &self,
        contract: Address,
        input: Bytes,
        state: &S,
        parent: &Header,
        read_only: bool,
    ) -> Result<Bytes, SystemCallError> {
        self(contract, input, state, parent, read_only)
    }
}

/// Read-only system call bound to the parent of the header under validation.
///
/// The parent header is looked up when the call fires.
#[derive(Debug)]
pub struct ParentStateCall<'a, S, P, C> {
    state: &'a S,
    headers: &'a P,
    parent_hash: B256,
    caller: &'a C,
}

impl<'a, S, P, C> ParentStateCall<'a, S, P, C> {
    /// Binds `caller` to `state` and the header with hash `parent_hash`.
    pub const fn new(state: &'a S, headers: &'a P, parent_hash: B256, caller: &'a C) -> Self {
        Self { state, headers, parent_hash, caller }
    }
}

impl<S, P, C> SystemCall for ParentStateCall<'_, S, P, C>
where
    P: HeaderProvider,
    C: StateSystemCall<S>,
{
    fn system_call(&self, contract: Address, input: Bytes) -> Result<Bytes, SystemCallError> {
        let parent = self
            .headers
            .header_by_hash(&self.parent_hash)
            .ok_or(SystemCallError::MissingParentHeader(self.parent_hash))?;
        self.caller.system_call_at(contract, input, self.state, &parent, true)
    }
}
