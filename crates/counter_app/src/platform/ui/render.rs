use console::style;
use counter_core::{AppViewModel, SessionState, Severity};

use super::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Title,
    Plain,
    Dim,
    Highlight,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub tone: Tone,
    pub text: String,
}

impl Line {
    fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }
}

/// Full screen: header, options, selection, input summary, counts, notice.
pub fn render(view: &AppViewModel) -> Vec<Line> {
    let mut lines = vec![Line::new(Tone::Title, TITLE)];

    if view.session == SessionState::Ready {
        lines.push(Line::new(Tone::Dim, models_summary(view)));
        lines.extend(render_options(view));
        lines.push(Line::new(Tone::Plain, selection_text(view)));
        lines.push(Line::new(
            Tone::Dim,
            format!(
                "Input: {} line(s), {} character(s)",
                view.input_lines, view.input_chars
            ),
        ));
        if let Some(counts) = view.counts {
            lines.push(Line::new(
                Tone::Highlight,
                format!("{LABEL_CHARS}: {}", counts.chars),
            ));
            lines.push(Line::new(
                Tone::Highlight,
                format!("{LABEL_TOKENS}: {}", counts.tokens),
            ));
        }
    }

    lines.extend(render_notice(view));
    lines
}

/// Only the option list, for `/list` and after filtering.
pub fn render_options(view: &AppViewModel) -> Vec<Line> {
    let mut lines: Vec<Line> = view
        .options
        .iter()
        .take(MAX_VISIBLE_OPTIONS + 1)
        .enumerate()
        .map(|(row, option)| {
            let label = if option.is_empty() {
                PLACEHOLDER_LABEL
            } else {
                option.as_str()
            };
            let selected = view.selected_index == Some(row)
                || (row == 0 && view.selected.is_none());
            let marker = if selected { '>' } else { ' ' };
            let tone = if selected { Tone::Highlight } else { Tone::Plain };
            Line::new(tone, format!("{marker} [{row}] {label}"))
        })
        .collect();

    let hidden = view.options.len().saturating_sub(MAX_VISIBLE_OPTIONS + 1);
    if hidden > 0 {
        lines.push(Line::new(
            Tone::Dim,
            format!("  ... and {hidden} more; narrow with /search"),
        ));
    }
    lines
}

pub fn render_notice(view: &AppViewModel) -> Option<Line> {
    view.notice.as_ref().map(|notice| {
        let tone = match notice.severity {
            Severity::Info => Tone::Info,
            Severity::Warning => Tone::Warning,
            Severity::Error => Tone::Error,
        };
        Line::new(tone, notice.text.clone())
    })
}

pub fn render_help() -> Vec<Line> {
    let mut lines = vec![Line::new(
        Tone::Dim,
        "Type text to add it to the input; lines starting with / are commands.",
    )];
    lines.extend(
        HELP.iter()
            .map(|(command, meaning)| Line::new(Tone::Plain, format!("  {command:<20} {meaning}"))),
    );
    lines
}

/// Applies terminal styling to a rendered line.
pub fn paint(line: &Line) -> String {
    let text = line.text.as_str();
    match line.tone {
        Tone::Title => style(text).bold().underlined().to_string(),
        Tone::Plain => text.to_string(),
        Tone::Dim => style(text).dim().to_string(),
        Tone::Highlight => style(text).green().bold().to_string(),
        Tone::Info => style(format!("i {text}")).cyan().to_string(),
        Tone::Warning => style(format!("! {text}")).yellow().to_string(),
        Tone::Error => style(format!("x {text}")).red().bold().to_string(),
    }
}

fn models_summary(view: &AppViewModel) -> String {
    let shown = view.options.len().saturating_sub(1);
    if view.filter.trim().is_empty() {
        format!("{} model(s) available", view.model_count)
    } else {
        format!(
            "{shown} of {} model(s) match \"{}\"",
            view.model_count,
            view.filter.trim()
        )
    }
}

fn selection_text(view: &AppViewModel) -> String {
    match (&view.selected, &view.tokenizer) {
        (None, _) => "Model: (none)".to_string(),
        (Some(model), None) => format!("Model: {model}"),
        (Some(model), Some(tokenizer)) if tokenizer.fell_back => format!(
            "Model: {model} (tokenizer unavailable, counting with {})",
            tokenizer.resolved
        ),
        (Some(model), Some(_)) => format!("Model: {model} (tokenizer ready)"),
    }
}

#[cfg(test)]
mod tests {
    use counter_core::{CountView, Notice, TokenizerView};

    use super::*;

    fn texts(lines: &[Line]) -> Vec<&str> {
        lines.iter().map(|line| line.text.as_str()).collect()
    }

    fn ready_view() -> AppViewModel {
        AppViewModel {
            session: SessionState::Ready,
            options: vec!["".into(), "gpt2".into(), "bert".into()],
            selected: Some("gpt2".into()),
            selected_index: Some(1),
            model_count: 2,
            tokenizer: Some(TokenizerView {
                resolved: "gpt2".into(),
                fell_back: false,
            }),
            input_chars: 11,
            input_lines: 1,
            counts: Some(CountView {
                chars: 11,
                tokens: 2,
            }),
            ..AppViewModel::default()
        }
    }

    #[test]
    fn ready_screen_shows_options_and_counts() {
        let lines = render(&ready_view());
        assert_eq!(
            texts(&lines),
            vec![
                TITLE,
                "2 model(s) available",
                "  [0] (none)",
                "> [1] gpt2",
                "  [2] bert",
                "Model: gpt2 (tokenizer ready)",
                "Input: 1 line(s), 11 character(s)",
                "Character count: 11",
                "Token count: 2",
            ]
        );
    }

    #[test]
    fn fallback_is_visible() {
        let view = AppViewModel {
            tokenizer: Some(TokenizerView {
                resolved: "gpt2".into(),
                fell_back: true,
            }),
            selected: Some("google/gemma-2b".into()),
            selected_index: None,
            ..ready_view()
        };
        let lines = render(&view);
        assert!(texts(&lines)
            .contains(&"Model: google/gemma-2b (tokenizer unavailable, counting with gpt2)"));
    }

    #[test]
    fn halted_screen_only_shows_the_error() {
        let view = AppViewModel {
            session: SessionState::Halted,
            notice: Some(Notice::error("Model list file 'models.txt' not found.")),
            ..AppViewModel::default()
        };
        let lines = render(&view);
        assert_eq!(
            texts(&lines),
            vec![TITLE, "Model list file 'models.txt' not found."]
        );
        assert_eq!(lines[1].tone, Tone::Error);
    }

    #[test]
    fn long_option_lists_are_cut() {
        let mut options = vec![String::new()];
        options.extend((0..30).map(|i| format!("model-{i}")));
        let view = AppViewModel {
            session: SessionState::Ready,
            options,
            ..AppViewModel::default()
        };
        let lines = render_options(&view);
        assert_eq!(lines.len(), MAX_VISIBLE_OPTIONS + 2);
        assert_eq!(lines[0].text, "> [0] (none)");
        assert_eq!(
            lines.last().unwrap().text,
            "  ... and 10 more; narrow with /search"
        );
    }

    #[test]
    fn filtered_summary_mentions_the_query() {
        let view = AppViewModel {
            filter: " gpt ".into(),
            ..ready_view()
        };
        assert_eq!(models_summary(&view), "2 of 2 model(s) match \"gpt\"");
    }
}
