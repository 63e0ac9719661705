use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::platform::logging::LogDestination;

/// LLM token & character counter.
///
/// Pick a model from the model list, enter text, and see how many characters
/// and tokens it has for that model's tokenizer.
#[derive(Debug, Parser)]
#[command(name = "token_counter", version, about)]
pub struct Cli {
    /// Model list file, one identifier per line.
    #[arg(long, global = true, value_name = "PATH")]
    pub models: Option<PathBuf>,

    /// Settings file (RON). Defaults to ./token_counter.ron when present.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Tokenizer used when the selected one cannot be loaded.
    #[arg(long, global = true, value_name = "MODEL")]
    pub fallback: Option<String>,

    /// Where log output goes.
    #[arg(long, global = true, value_enum)]
    pub log: Option<LogDestination>,

    /// Hugging Face cache directory for downloaded tokenizers.
    #[arg(long, global = true, value_name = "DIR")]
    pub hub_cache: Option<PathBuf>,

    /// Log debug messages.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive counter (default).
    Interactive,
    /// Count one text and exit.
    Count(CountArgs),
    /// Print the model list.
    Models {
        /// Only show identifiers containing this text (case-insensitive).
        #[arg(long)]
        filter: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CountArgs {
    /// Model identifier: a Hub repo id or a local tokenizer path.
    #[arg(short, long)]
    pub model: String,

    /// Read the text from a file instead of the arguments or stdin.
    #[arg(short, long, value_name = "PATH", conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Text to count; joined with spaces. Read from stdin when absent, minus
    /// one trailing line ending.
    pub text: Vec<String>,
}
