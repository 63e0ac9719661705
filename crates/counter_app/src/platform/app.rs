use std::collections::VecDeque;
use std::fs;
use std::io::{self, BufRead, Read};

use anyhow::{bail, Context};
use console::Term;
use counter_core::{
    matches_filter, update, AppState, Msg, SessionState, EMPTY_INPUT_WARNING,
};
use counter_engine::{load_model_list, CounterEngine, ModelId};
use counter_logging::{counter_debug, counter_info};
use serde::Serialize;

use super::effects::{model_list_msg, EffectRunner};
use super::settings::Settings;
use super::ui::command::{parse_line, UiCommand};
use super::ui::render::{self, Line};
use crate::cli::CountArgs;

/// Interactive session: core state plus the runner that performs its effects.
struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
        }
    }

    /// Applies `msg` and every reply its effects produce, in order.
    fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            counter_debug!("dispatch {:?}", msg);
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            inbox.extend(self.runner.run(effects));
        }
    }
}

pub fn run_interactive(settings: &Settings) -> anyhow::Result<()> {
    let engine = CounterEngine::new(settings.engine_config()?);
    let mut app = App::new(EffectRunner::new(engine));
    let term = Term::stdout();

    app.dispatch(model_list_msg(&settings.model_list));
    app.state.consume_dirty();
    write_lines(&term, &render::render(&app.state.view()))?;
    if app.state.session() == SessionState::Halted {
        return Ok(());
    }
    write_lines(&term, &render::render_help())?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        match parse_line(&line) {
            UiCommand::Quit => break,
            UiCommand::Help => write_lines(&term, &render::render_help())?,
            UiCommand::ShowOptions => {
                write_lines(&term, &render::render_options(&app.state.view()))?
            }
            UiCommand::Unknown(name) => {
                term.write_line(&format!("Unknown command /{name}; try /help"))?
            }
            UiCommand::Dispatch(msg) => {
                // Text lines only grow the buffer; the screen is redrawn on actions.
                let quiet = matches!(msg, Msg::InputAppended(_));
                app.dispatch(msg);
                if app.state.consume_dirty() && !quiet {
                    term.write_line("")?;
                    write_lines(&term, &render::render(&app.state.view()))?;
                }
            }
        }
    }

    counter_info!("Interactive session ended");
    Ok(())
}

#[derive(Debug, Serialize)]
struct CountReport<'a> {
    model: &'a str,
    tokenizer: &'a str,
    fallback: bool,
    characters: usize,
    tokens: usize,
}

pub fn run_count(settings: &Settings, args: &CountArgs) -> anyhow::Result<()> {
    let Some(model) = ModelId::new(&args.model) else {
        bail!("model identifier must not be blank");
    };
    let text = read_count_input(args)?;
    if text.is_empty() {
        bail!(EMPTY_INPUT_WARNING);
    }

    let engine = CounterEngine::new(settings.engine_config()?);
    let counted = engine.count(&model, &text)?;
    let report = CountReport {
        model: model.as_str(),
        tokenizer: counted.tokenizer.resolved().as_str(),
        fallback: counted.tokenizer.fell_back(),
        characters: counted.result.chars,
        tokens: counted.result.tokens,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if report.fallback {
            eprintln!(
                "Tokenizer for {} unavailable; counted with {}",
                report.model, report.tokenizer
            );
        }
        println!("Character count: {}", report.characters);
        println!("Token count: {}", report.tokens);
    }
    Ok(())
}

fn read_count_input(args: &CountArgs) -> anyhow::Result<String> {
    if let Some(path) = &args.file {
        return fs::read_to_string(path).with_context(|| format!("failed to read {path:?}"));
    }
    if !args.text.is_empty() {
        return Ok(args.text.join(" "));
    }
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("failed to read text from stdin")?;
    Ok(strip_line_ending(text))
}

/// Drops the single line ending a pipe such as `echo` appends.
fn strip_line_ending(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

pub fn run_models(settings: &Settings, filter: Option<&str>) -> anyhow::Result<()> {
    let models = load_model_list(&settings.model_list)
        .context("run the model fetch step first to generate the model list")?;
    let filter = filter.unwrap_or_default();
    for model in models.iter().filter(|m| matches_filter(m.as_str(), filter)) {
        println!("{model}");
    }
    Ok(())
}

fn write_lines(term: &Term, lines: &[Line]) -> io::Result<()> {
    for line in lines {
        term.write_line(&render::paint(line))?;
    }
    Ok(())
}
