#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Result of reading the model list at startup.
    ModelListLoaded(Result<Vec<String>, crate::ModelListFailure>),
    /// User typed into the model search box.
    FilterChanged(String),
    /// User chose a model by identifier.
    ModelChosen(String),
    /// User picked a row of the option list; row 0 is the empty placeholder.
    OptionPicked(usize),
    /// User reset the selection to the placeholder.
    SelectionCleared,
    /// Platform finished resolving the tokenizer for a model.
    TokenizerReady {
        requested: String,
        resolved: String,
        fell_back: bool,
    },
    /// User replaced the whole input text.
    InputChanged(String),
    /// User entered one more line of input text.
    InputAppended(String),
    /// User emptied the input text.
    InputCleared,
    /// User clicked Count.
    CountClicked,
    /// Platform finished counting.
    CountFinished {
        model: String,
        chars: usize,
        tokens: usize,
    },
    /// Platform could not count the text.
    CountFailed { model: String, reason: String },
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Why the model list could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelListFailure {
    Missing { path: String },
    Unreadable { path: String, message: String },
}
