#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Load (or reuse) the tokenizer for `model`; answered with `Msg::TokenizerReady`.
    PrepareTokenizer { model: String },
    /// Count `text` with the tokenizer for `model`; answered with
    /// `Msg::CountFinished` or `Msg::CountFailed`.
    CountText { model: String, text: String },
}
