//! Counter core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{ModelListFailure, Msg};
pub use state::{matches_filter, AppState, SessionState};
pub use update::{update, EMPTY_INPUT_WARNING, SELECT_MODEL_PROMPT};
pub use view_model::{AppViewModel, CountView, Notice, Severity, TokenizerView};
