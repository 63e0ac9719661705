use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use counter_logging::counter_debug;

use crate::{LoadError, ModelId, TokenEncoder, TokenizerSource};

/// Shared handle to a constructed tokenizer. Cloning is cheap.
#[derive(Clone)]
pub struct TokenizerHandle {
    model: ModelId,
    encoder: Arc<dyn TokenEncoder>,
}

impl TokenizerHandle {
    pub fn new(model: ModelId, encoder: Arc<dyn TokenEncoder>) -> Self {
        Self { model, encoder }
    }

    /// Identifier the tokenizer was actually built from.
    pub fn model(&self) -> &ModelId {
        &self.model
    }

    pub fn encoder(&self) -> &dyn TokenEncoder {
        self.encoder.as_ref()
    }

    /// True when both handles point at the same constructed tokenizer.
    pub fn same_as(&self, other: &TokenizerHandle) -> bool {
        Arc::ptr_eq(&self.encoder, &other.encoder)
    }
}

impl fmt::Debug for TokenizerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenizerHandle")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Process-wide memo of identifier -> tokenizer handle.
///
/// Each identifier maps to at most one handle, and entries are never evicted.
/// Loads run outside the lock; when two first requests race, the first insert
/// wins and the other construction is dropped.
#[derive(Default)]
pub struct TokenizerCache {
    entries: Mutex<HashMap<ModelId, TokenizerHandle>>,
}

impl TokenizerCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<ModelId, TokenizerHandle>> {
        // The map is only ever inserted into, so a poisoned guard is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, model: &ModelId) -> Option<TokenizerHandle> {
        self.entries().get(model).cloned()
    }

    pub fn contains(&self, model: &ModelId) -> bool {
        self.entries().contains_key(model)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Stores `handle` under `model` unless an entry exists; returns the stored handle.
    pub fn insert(&self, model: ModelId, handle: TokenizerHandle) -> TokenizerHandle {
        self.entries().entry(model).or_insert(handle).clone()
    }

    /// Returns the cached handle, or loads it through `source` and caches it.
    /// Failures are returned, not cached.
    pub fn get_or_load(
        &self,
        model: &ModelId,
        source: &dyn TokenizerSource,
    ) -> Result<TokenizerHandle, LoadError> {
        if let Some(handle) = self.get(model) {
            counter_debug!("Tokenizer cache hit for {}", model);
            return Ok(handle);
        }

        counter_debug!("Tokenizer cache miss for {}", model);
        let encoder = source.load(model)?;
        let handle = TokenizerHandle::new(model.clone(), encoder);
        Ok(self.insert(model.clone(), handle))
    }
}
