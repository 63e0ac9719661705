use crate::EncodeError;

/// Turns text into token ids. Implemented by every tokenizer the cache hands out.
pub trait TokenEncoder: Send + Sync {
    fn encode_ids(&self, text: &str) -> Result<Vec<u32>, EncodeError>;
}

impl TokenEncoder for tokenizers::Tokenizer {
    fn encode_ids(&self, text: &str) -> Result<Vec<u32>, EncodeError> {
        // Special tokens are added, matching a default Hugging Face tokenizer call.
        // Only the ids are read; attention mask and offsets are ignored.
        let encoding = self
            .encode(text, true)
            .map_err(|err| EncodeError::new(err.to_string()))?;
        Ok(encoding.get_ids().to_vec())
    }
}

/// Simple, deterministic whitespace tokenizer used as the last resort when no
/// real tokenizer can be loaded. Ids are word ordinals.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceTokenCounter;

impl TokenEncoder for WhitespaceTokenCounter {
    fn encode_ids(&self, text: &str) -> Result<Vec<u32>, EncodeError> {
        Ok((0u32..).zip(text.split_whitespace()).map(|(id, _)| id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_counter_counts_words() {
        let ids = WhitespaceTokenCounter.encode_ids("  hello   big\nworld ").unwrap();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(WhitespaceTokenCounter.encode_ids("   ").unwrap().is_empty());
    }
}
