use counter_core::Msg;

/// What one line typed at the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Dispatch(Msg),
    ShowOptions,
    Help,
    Quit,
    Unknown(String),
}

/// Lines starting with `/` are commands; `//` escapes a literal slash.
/// Every other line, blank ones included, is appended to the input text.
pub fn parse_line(line: &str) -> UiCommand {
    let line = line.trim_end_matches(['\r', '\n']);
    if let Some(escaped) = line.strip_prefix("//") {
        return UiCommand::Dispatch(Msg::InputAppended(format!("/{escaped}")));
    }
    let Some(command) = line.strip_prefix('/') else {
        return UiCommand::Dispatch(Msg::InputAppended(line.to_string()));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command.trim(), ""),
    };

    match name {
        "search" | "s" => UiCommand::Dispatch(Msg::FilterChanged(arg.to_string())),
        "select" | "m" if arg.is_empty() => UiCommand::Dispatch(Msg::SelectionCleared),
        "select" | "m" => match arg.parse::<usize>() {
            Ok(row) => UiCommand::Dispatch(Msg::OptionPicked(row)),
            Err(_) => UiCommand::Dispatch(Msg::ModelChosen(arg.to_string())),
        },
        "list" | "l" => UiCommand::ShowOptions,
        "count" | "c" => UiCommand::Dispatch(Msg::CountClicked),
        "clear" => UiCommand::Dispatch(Msg::InputCleared),
        "help" | "h" | "?" => UiCommand::Help,
        "quit" | "q" | "exit" => UiCommand::Quit,
        other => UiCommand::Unknown(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatched(line: &str) -> Msg {
        match parse_line(line) {
            UiCommand::Dispatch(msg) => msg,
            other => panic!("{line:?} parsed as {other:?}"),
        }
    }

    #[test]
    fn plain_lines_are_input() {
        assert_eq!(dispatched("hello world\n"), Msg::InputAppended("hello world".into()));
        assert_eq!(dispatched(""), Msg::InputAppended(String::new()));
        assert_eq!(dispatched("  indented"), Msg::InputAppended("  indented".into()));
    }

    #[test]
    fn double_slash_escapes_input() {
        assert_eq!(dispatched("//count"), Msg::InputAppended("/count".into()));
    }

    #[test]
    fn select_by_row_or_identifier() {
        assert_eq!(dispatched("/select 3"), Msg::OptionPicked(3));
        assert_eq!(dispatched("/m 0"), Msg::OptionPicked(0));
        assert_eq!(
            dispatched("/select google/gemma-2b "),
            Msg::ModelChosen("google/gemma-2b".into())
        );
        assert_eq!(dispatched("/select"), Msg::SelectionCleared);
    }

    #[test]
    fn search_count_and_clear() {
        assert_eq!(dispatched("/search  llama "), Msg::FilterChanged("llama".into()));
        assert_eq!(dispatched("/search"), Msg::FilterChanged(String::new()));
        assert_eq!(dispatched("/count"), Msg::CountClicked);
        assert_eq!(dispatched("/c"), Msg::CountClicked);
        assert_eq!(dispatched("/clear"), Msg::InputCleared);
    }

    #[test]
    fn ui_only_commands() {
        assert_eq!(parse_line("/list"), UiCommand::ShowOptions);
        assert_eq!(parse_line("/help"), UiCommand::Help);
        assert_eq!(parse_line("/q"), UiCommand::Quit);
        assert_eq!(parse_line("/frobnicate x"), UiCommand::Unknown("frobnicate".into()));
    }
}
