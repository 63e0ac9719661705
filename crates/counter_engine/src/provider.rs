use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use counter_logging::{counter_error, counter_info, counter_warn};

use crate::{
    LoadError, ModelId, TokenizerCache, TokenizerHandle, TokenizerSource, WhitespaceTokenCounter,
};

/// Tokenizer substituted when the requested one cannot be loaded.
pub const DEFAULT_FALLBACK_MODEL: &str = "gpt2";

/// Label of the handle returned when even the fallback cannot be loaded.
pub const LAST_RESORT_MODEL: &str = "whitespace";

#[derive(Debug, Clone)]
pub struct ResolvedTokenizer {
    pub requested: ModelId,
    pub handle: TokenizerHandle,
    /// Set when `handle` is a substitute for `requested`.
    pub fallback: Option<LoadError>,
}

impl ResolvedTokenizer {
    pub fn fell_back(&self) -> bool {
        self.fallback.is_some()
    }

    /// Identifier the handle was actually built from.
    pub fn resolved(&self) -> &ModelId {
        self.handle.model()
    }
}

/// Hands out a usable tokenizer for any identifier, substituting the fallback
/// tokenizer on load failure. Never returns an error.
pub struct TokenizerProvider {
    source: Arc<dyn TokenizerSource>,
    cache: TokenizerCache,
    fallback: ModelId,
    /// Permanent failures whose identifier is aliased to the fallback handle.
    failures: Mutex<HashMap<ModelId, LoadError>>,
}

impl TokenizerProvider {
    pub fn new(source: Arc<dyn TokenizerSource>, fallback: ModelId) -> Self {
        Self {
            source,
            cache: TokenizerCache::new(),
            fallback,
            failures: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_default_fallback(source: Arc<dyn TokenizerSource>) -> Self {
        Self::new(source, ModelId::from_static(DEFAULT_FALLBACK_MODEL))
    }

    pub fn fallback_model(&self) -> &ModelId {
        &self.fallback
    }

    pub fn cache(&self) -> &TokenizerCache {
        &self.cache
    }

    pub fn resolve(&self, requested: &ModelId) -> ResolvedTokenizer {
        let err = match self.cache.get_or_load(requested, self.source.as_ref()) {
            Ok(handle) => {
                let fallback = if handle.model() == requested {
                    None
                } else {
                    self.recorded_failure(requested)
                };
                return ResolvedTokenizer {
                    requested: requested.clone(),
                    handle,
                    fallback,
                };
            }
            Err(err) => err,
        };

        counter_warn!(
            "Cannot load tokenizer for {}; substituting {}: {}",
            requested,
            self.fallback,
            err
        );

        let Some(handle) = self.load_fallback(requested) else {
            return self.last_resort(requested, err);
        };

        // Permanent failures are memoized under the requested id so repeated
        // requests skip the load. Transient ones are retried next time.
        let handle = if err.is_transient() {
            handle
        } else {
            self.failures
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(requested.clone())
                .or_insert_with(|| err.clone());
            self.cache.insert(requested.clone(), handle)
        };

        ResolvedTokenizer {
            requested: requested.clone(),
            handle,
            fallback: Some(err),
        }
    }

    fn recorded_failure(&self, requested: &ModelId) -> Option<LoadError> {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(requested)
            .cloned()
    }

    fn load_fallback(&self, requested: &ModelId) -> Option<TokenizerHandle> {
        if requested == &self.fallback {
            return None;
        }
        match self.cache.get_or_load(&self.fallback, self.source.as_ref()) {
            Ok(handle) => Some(handle),
            Err(err) => {
                counter_error!("Fallback tokenizer {} failed to load: {}", self.fallback, err);
                None
            }
        }
    }

    fn last_resort(&self, requested: &ModelId, err: LoadError) -> ResolvedTokenizer {
        counter_info!("Counting {} with the whitespace word counter", requested);
        ResolvedTokenizer {
            requested: requested.clone(),
            handle: TokenizerHandle::new(
                ModelId::from_static(LAST_RESORT_MODEL),
                Arc::new(WhitespaceTokenCounter),
            ),
            fallback: Some(err),
        }
    }
}
