pub const TITLE: &str = "LLM Token & Character Counter";
pub const PLACEHOLDER_LABEL: &str = "(none)";
pub const LABEL_CHARS: &str = "Character count";
pub const LABEL_TOKENS: &str = "Token count";
/// Option rows printed before the list is cut short.
pub const MAX_VISIBLE_OPTIONS: usize = 20;

pub const HELP: &[(&str, &str)] = &[
    ("/search <text>", "filter the model list (no text shows all)"),
    ("/select <n|model>", "choose a model by row number or identifier"),
    ("/select", "reset the selection"),
    ("/list", "show the current options"),
    ("/count", "count the entered text"),
    ("/clear", "discard the entered text"),
    ("/help", "show this help"),
    ("/quit", "leave"),
];
