use crate::{CountError, CountResult, TokenizerHandle};

/// Number of Unicode scalar values in `text`.
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Counts characters and tokens of `text` with the given tokenizer.
pub fn count_text(handle: &TokenizerHandle, text: &str) -> Result<CountResult, CountError> {
    if text.is_empty() {
        return Err(CountError::EmptyInput);
    }
    let ids = handle.encoder().encode_ids(text)?;
    Ok(CountResult {
        chars: char_count(text),
        tokens: ids.len(),
    })
}
