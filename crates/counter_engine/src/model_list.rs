use std::fs;
use std::io;
use std::path::Path;

use counter_logging::{counter_info, counter_warn};

use crate::{ModelId, ModelListError};

/// Default location of the model list written by the fetch step.
pub const DEFAULT_MODEL_LIST: &str = "models.txt";

/// Non-empty trimmed lines, in file order.
pub fn parse_model_list(text: &str) -> Vec<ModelId> {
    text.lines().filter_map(ModelId::new).collect()
}

/// Reads and parses the model list at `path`. No retries, no alternate paths.
pub fn load_model_list(path: &Path) -> Result<Vec<ModelId>, ModelListError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            counter_warn!("Model list {:?} not found", path);
            return Err(ModelListError::Missing {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            counter_warn!("Failed to read model list {:?}: {}", path, source);
            return Err(ModelListError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let models = parse_model_list(&content);
    counter_info!("Loaded {} model identifiers from {:?}", models.len(), path);
    Ok(models)
}
