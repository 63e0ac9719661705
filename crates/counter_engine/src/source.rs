use std::path::{Path, PathBuf};
use std::sync::Arc;

use counter_logging::{counter_debug, counter_info};
use hf_hub::api::sync::{Api, ApiBuilder, ApiError};
use tokenizers::Tokenizer;

use crate::{LoadError, ModelId, TokenEncoder};

const TOKENIZER_FILE: &str = "tokenizer.json";

/// Hub answers meaning the repository will not become available by retrying.
const MISSING_REPO_STATUSES: [u16; 3] = [401, 403, 404];

/// Constructs tokenizers for model identifiers.
pub trait TokenizerSource: Send + Sync {
    fn load(&self, model: &ModelId) -> Result<Arc<dyn TokenEncoder>, LoadError>;
}

#[derive(Debug, Clone, Default)]
pub struct HubSettings {
    /// Overrides the Hugging Face cache directory.
    pub cache_dir: Option<PathBuf>,
    /// Shows hf-hub download progress bars.
    pub progress: bool,
}

/// Loads `tokenizer.json` from a local path, or from the Hugging Face Hub
/// through hf-hub's blocking client (which reuses its on-disk cache).
/// `HF_HOME`, `HF_ENDPOINT` and the stored token are read from the environment.
#[derive(Debug, Clone, Default)]
pub struct HubTokenizerSource {
    settings: HubSettings,
}

impl HubTokenizerSource {
    pub fn new(settings: HubSettings) -> Self {
        Self { settings }
    }

    fn build_api(&self, model: &ModelId) -> Result<Api, LoadError> {
        let mut builder = ApiBuilder::from_env().with_progress(self.settings.progress);
        if let Some(dir) = &self.settings.cache_dir {
            builder = builder.with_cache_dir(dir.clone());
        }
        builder.build().map_err(|err| LoadError::Unavailable {
            id: model.to_string(),
            message: err.to_string(),
        })
    }

    fn fetch_from_hub(&self, model: &ModelId) -> Result<PathBuf, LoadError> {
        validate_repo_id(model)?;
        let api = self.build_api(model)?;
        counter_debug!("Fetching {} for {} from the hub", TOKENIZER_FILE, model);
        api.model(model.to_string())
            .get(TOKENIZER_FILE)
            .map_err(|err| hub_error(model, err))
    }
}

impl TokenizerSource for HubTokenizerSource {
    fn load(&self, model: &ModelId) -> Result<Arc<dyn TokenEncoder>, LoadError> {
        let path = match local_tokenizer_file(Path::new(model.as_str())) {
            Some(path) => path,
            None => self.fetch_from_hub(model)?,
        };
        let tokenizer = Tokenizer::from_file(&path).map_err(|err| LoadError::Malformed {
            id: model.to_string(),
            message: err.to_string(),
        })?;
        counter_info!("Constructed tokenizer for {} from {:?}", model, path);
        Ok(Arc::new(tokenizer))
    }
}

fn hub_error(model: &ModelId, err: ApiError) -> LoadError {
    match response_status(&err) {
        Some(status) if MISSING_REPO_STATUSES.contains(&status) => LoadError::NotFound {
            id: model.to_string(),
            status,
        },
        _ => LoadError::Unavailable {
            id: model.to_string(),
            message: err.to_string(),
        },
    }
}

/// HTTP status of a hub reply, when the request got that far.
fn response_status(err: &ApiError) -> Option<u16> {
    match err {
        ApiError::RequestError(inner) => match &**inner {
            ureq::Error::Status(status, _) => Some(*status),
            _ => None,
        },
        ApiError::TooManyRetries(inner) => response_status(inner),
        _ => None,
    }
}

/// A directory holding `tokenizer.json`, or a `.json` file given directly.
fn local_tokenizer_file(candidate: &Path) -> Option<PathBuf> {
    if candidate.is_dir() {
        let file = candidate.join(TOKENIZER_FILE);
        return file.is_file().then_some(file);
    }
    let is_json = candidate
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    (is_json && candidate.is_file()).then(|| candidate.to_path_buf())
}

/// Rejects identifiers the hub could never resolve, before any network call.
fn validate_repo_id(model: &ModelId) -> Result<(), LoadError> {
    let id = model.as_str();
    let invalid = |reason| LoadError::InvalidIdentifier {
        id: id.to_owned(),
        reason,
    };
    if id.matches('/').count() > 1 {
        return Err(invalid("expected `name` or `namespace/name`"));
    }
    if id.starts_with('/') || id.ends_with('/') {
        return Err(invalid("empty namespace or name"));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/'))
    {
        return Err(invalid("only ASCII letters, digits, '-', '_', '.' are allowed"));
    }
    Ok(())
}
