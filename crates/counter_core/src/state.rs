use crate::view_model::{AppViewModel, CountView, Notice, TokenizerView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Waiting for the model list.
    #[default]
    Loading,
    /// Models are available; the user can select and count.
    Ready,
    /// No usable model list; nothing else is accepted.
    Halted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerStatus {
    pub requested: String,
    pub resolved: String,
    pub fell_back: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub chars: usize,
    pub tokens: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session: SessionState,
    models: Vec<String>,
    filter: String,
    selected: Option<String>,
    tokenizer: Option<TokenizerStatus>,
    input: String,
    counts: Option<Counts>,
    notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Selectable rows: the empty placeholder followed by every model matching the filter.
    pub fn options(&self) -> Vec<String> {
        std::iter::once(String::new())
            .chain(
                self.models
                    .iter()
                    .filter(|model| matches_filter(model, &self.filter))
                    .cloned(),
            )
            .collect()
    }

    pub fn view(&self) -> AppViewModel {
        let options = self.options();
        let selected_index = self
            .selected
            .as_ref()
            .and_then(|selected| options.iter().position(|option| option == selected));
        AppViewModel {
            session: self.session,
            options,
            selected: self.selected.clone(),
            selected_index,
            filter: self.filter.clone(),
            model_count: self.models.len(),
            tokenizer: self.tokenizer.as_ref().map(|status| TokenizerView {
                resolved: status.resolved.clone(),
                fell_back: status.fell_back,
            }),
            input_chars: self.input.chars().count(),
            input_lines: self.input.lines().count(),
            counts: self.counts.map(|counts| CountView {
                chars: counts.chars,
                tokens: counts.tokens,
            }),
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_session(&mut self, session: SessionState) {
        self.session = session;
    }

    pub(crate) fn set_models(&mut self, models: Vec<String>) {
        self.models = models;
    }

    pub(crate) fn set_filter(&mut self, filter: String) {
        self.filter = filter;
    }

    pub(crate) fn set_notice(&mut self, notice: Option<Notice>) {
        self.notice = notice;
    }

    pub(crate) fn select(&mut self, model: Option<String>) {
        self.selected = model;
        self.tokenizer = None;
        self.counts = None;
    }

    pub(crate) fn set_tokenizer(&mut self, status: TokenizerStatus) {
        self.tokenizer = Some(status);
    }

    pub(crate) fn set_input(&mut self, input: String) {
        self.input = input;
        self.counts = None;
    }

    pub(crate) fn append_input(&mut self, line: &str) {
        if !self.input.is_empty() {
            self.input.push('\n');
        }
        self.input.push_str(line);
        self.counts = None;
    }

    pub(crate) fn set_counts(&mut self, counts: Option<Counts>) {
        self.counts = counts;
    }
}

/// Case-insensitive substring match; an empty or blank filter matches everything.
pub fn matches_filter(model: &str, filter: &str) -> bool {
    let needle = filter.trim();
    needle.is_empty() || model.to_lowercase().contains(&needle.to_lowercase())
}
