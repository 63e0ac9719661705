//! Counter engine: model list loading, tokenizer construction and caching, counting.
mod cache;
mod count;
mod engine;
mod model_list;
mod provider;
mod source;
mod token;
mod types;

pub use cache::{TokenizerCache, TokenizerHandle};
pub use count::{char_count, count_text};
pub use engine::{Counted, CounterEngine, EngineConfig};
pub use model_list::{load_model_list, parse_model_list, DEFAULT_MODEL_LIST};
pub use provider::{
    ResolvedTokenizer, TokenizerProvider, DEFAULT_FALLBACK_MODEL, LAST_RESORT_MODEL,
};
pub use source::{HubSettings, HubTokenizerSource, TokenizerSource};
pub use token::{TokenEncoder, WhitespaceTokenCounter};
pub use types::{CountError, CountResult, EncodeError, LoadError, ModelId, ModelListError};
