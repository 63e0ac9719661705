use std::sync::Arc;

use counter_logging::counter_info;

use crate::count::count_text;
use crate::{
    CountError, CountResult, HubSettings, HubTokenizerSource, ModelId, ResolvedTokenizer,
    TokenizerProvider, TokenizerSource, DEFAULT_FALLBACK_MODEL,
};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub fallback_model: ModelId,
    pub hub: HubSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fallback_model: ModelId::from_static(DEFAULT_FALLBACK_MODEL),
            hub: HubSettings::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Counted {
    pub tokenizer: ResolvedTokenizer,
    pub result: CountResult,
}

/// Synchronous front door used by the platform: resolve a tokenizer, count text.
pub struct CounterEngine {
    provider: TokenizerProvider,
}

impl CounterEngine {
    pub fn new(config: EngineConfig) -> Self {
        let source = Arc::new(HubTokenizerSource::new(config.hub));
        Self::with_source(source, config.fallback_model)
    }

    pub fn with_source(source: Arc<dyn TokenizerSource>, fallback_model: ModelId) -> Self {
        Self {
            provider: TokenizerProvider::new(source, fallback_model),
        }
    }

    pub fn provider(&self) -> &TokenizerProvider {
        &self.provider
    }

    /// Loads (or fetches from cache) the tokenizer for `model`.
    pub fn prepare(&self, model: &ModelId) -> ResolvedTokenizer {
        self.provider.resolve(model)
    }

    pub fn count(&self, model: &ModelId, text: &str) -> Result<Counted, CountError> {
        let tokenizer = self.prepare(model);
        let result = count_text(&tokenizer.handle, text)?;
        counter_info!(
            "Counted {} chars / {} tokens with {} (requested {})",
            result.chars,
            result.tokens,
            tokenizer.resolved(),
            model
        );
        Ok(Counted { tokenizer, result })
    }
}
