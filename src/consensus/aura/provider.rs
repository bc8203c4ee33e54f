use alloy_consensus::Header;
use alloy_primitives::B256;
#[cfg(any(test, feature = "test-utils"))]
use parking_lot::RwLock;
#[cfg(any(test, feature = "test-utils"))]
use std::collections::HashMap;

/// Read access to headers of the local chain, keyed by hash.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait HeaderProvider: Send + Sync {
    /// Returns the header with the given hash.
    fn header_by_hash(&self, hash: &B256) -> Option<Header>;
}

/// Hash-indexed header store kept entirely in memory.
///
/// Stand-in header service for tests; headers are never pruned.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct InMemoryHeaderProvider {
    headers: RwLock<HashMap<B256, Header>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl InMemoryHeaderProvider {
    /// Stores `header` and returns its hash.
    pub fn insert(&self, header: Header) -> B256 {
        let hash = header.hash_slow();
        self.headers.write().insert(hash, header);
        hash
    }

    /// Number of stored headers.
    pub fn len(&self) -> usize {
        self.headers.read().len()
    }

    /// Returns `true` if no header is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl HeaderProvider for InMemoryHeaderProvider {
    fn header_by_hash(&self, hash: &B256) -> Option<Header> {
        self.headers.read().get(hash).cloned()
    }
}
