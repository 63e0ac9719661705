use crate::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A single inline message shown next to the controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerView {
    pub resolved: String,
    pub fell_back: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountView {
    pub chars: usize,
    pub tokens: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    /// Placeholder row first, then the filtered model identifiers.
    pub options: Vec<String>,
    pub selected: Option<String>,
    /// Row of `selected` in `options`, if it is visible under the filter.
    pub selected_index: Option<usize>,
    pub filter: String,
    pub model_count: usize,
    pub tokenizer: Option<TokenizerView>,
    pub input_chars: usize,
    pub input_lines: usize,
    pub counts: Option<CountView>,
    pub notice: Option<Notice>,
    pub dirty: bool,
}
