use crate::state::{Counts, TokenizerStatus};
use crate::{AppState, Effect, ModelListFailure, Msg, Notice, SessionState};

pub const SELECT_MODEL_PROMPT: &str = "Start typing to search and select a model.";
pub const EMPTY_INPUT_WARNING: &str = "Please enter some text to count.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let msg = match msg {
        Msg::ModelListLoaded(result) => {
            apply_model_list(&mut state, result);
            return (state, Vec::new());
        }
        other => other,
    };
    // A session without models accepts nothing else.
    if state.session() != SessionState::Ready {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::ModelListLoaded(_) | Msg::NoOp => Vec::new(),
        Msg::FilterChanged(filter) => {
            state.set_filter(filter);
            state.mark_dirty();
            Vec::new()
        }
        Msg::OptionPicked(0) | Msg::SelectionCleared => {
            state.select(None);
            state.set_notice(Some(Notice::info(SELECT_MODEL_PROMPT)));
            state.mark_dirty();
            Vec::new()
        }
        Msg::OptionPicked(index) => match state.options().get(index).cloned() {
            Some(model) => choose_model(&mut state, model),
            None => {
                state.set_notice(Some(Notice::warning(format!(
                    "There is no option #{index}."
                ))));
                state.mark_dirty();
                Vec::new()
            }
        },
        Msg::ModelChosen(raw) => {
            let model = raw.trim().to_string();
            if state.models().iter().any(|known| *known == model) {
                choose_model(&mut state, model)
            } else {
                state.set_notice(Some(Notice::warning(format!(
                    "'{model}' is not in the model list."
                ))));
                state.mark_dirty();
                Vec::new()
            }
        }
        Msg::TokenizerReady {
            requested,
            resolved,
            fell_back,
        } => {
            // Ignore answers for a model that is no longer selected.
            if state.selected() == Some(requested.as_str()) {
                if state.notice() == Some(&loading_notice(&requested)) {
                    state.set_notice(None);
                }
                state.set_tokenizer(TokenizerStatus {
                    requested,
                    resolved,
                    fell_back,
                });
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::InputChanged(text) => {
            state.set_input(text);
            state.mark_dirty();
            Vec::new()
        }
        Msg::InputAppended(line) => {
            state.append_input(&line);
            state.mark_dirty();
            Vec::new()
        }
        Msg::InputCleared => {
            state.set_input(String::new());
            state.mark_dirty();
            Vec::new()
        }
        Msg::CountClicked => count_clicked(&mut state),
        Msg::CountFinished {
            model,
            chars,
            tokens,
        } => {
            if state.selected() == Some(model.as_str()) {
                state.set_counts(Some(Counts { chars, tokens }));
                state.set_notice(None);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CountFailed { model, reason } => {
            if state.selected() == Some(model.as_str()) {
                state.set_counts(None);
                state.set_notice(Some(Notice::error(format!(
                    "Counting with {model} failed: {reason}"
                ))));
                state.mark_dirty();
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn apply_model_list(state: &mut AppState, result: Result<Vec<String>, ModelListFailure>) {
    match result {
        Ok(models) if !models.is_empty() => {
            state.set_models(models);
            state.set_session(SessionState::Ready);
            state.set_notice(Some(Notice::info(SELECT_MODEL_PROMPT)));
        }
        Ok(_) => {
            state.set_models(Vec::new());
            state.set_session(SessionState::Halted);
            state.set_notice(Some(Notice::warning(
                "The model list is empty. Run the model fetch step to populate it.",
            )));
        }
        Err(ModelListFailure::Missing { path }) => {
            state.set_models(Vec::new());
            state.set_session(SessionState::Halted);
            state.set_notice(Some(Notice::error(format!(
                "Model list file '{path}' not found. Run the model fetch step first to generate it."
            ))));
        }
        Err(ModelListFailure::Unreadable { path, message }) => {
            state.set_models(Vec::new());
            state.set_session(SessionState::Halted);
            state.set_notice(Some(Notice::error(format!(
                "Model list file '{path}' could not be read: {message}"
            ))));
        }
    }
    state.mark_dirty();
}

fn choose_model(state: &mut AppState, model: String) -> Vec<Effect> {
    if state.selected() == Some(model.as_str()) {
        return Vec::new();
    }
    state.select(Some(model.clone()));
    state.set_notice(Some(loading_notice(&model)));
    state.mark_dirty();
    vec![Effect::PrepareTokenizer { model }]
}

fn loading_notice(model: &str) -> Notice {
    Notice::info(format!("Loading tokenizer for {model}..."))
}

fn count_clicked(state: &mut AppState) -> Vec<Effect> {
    let Some(model) = state.selected().map(str::to_owned) else {
        state.set_notice(Some(Notice::info(SELECT_MODEL_PROMPT)));
        state.mark_dirty();
        return Vec::new();
    };
    if state.input().is_empty() {
        state.set_counts(None);
        state.set_notice(Some(Notice::warning(EMPTY_INPUT_WARNING)));
        state.mark_dirty();
        return Vec::new();
    }
    vec![Effect::CountText {
        model,
        text: state.input().to_owned(),
    }]
}
