//! pseudoc
//!
//! A heuristic source-to-pseudocode transcompiler.

mod frontend;
mod middle;
mod backend;
mod commands;
mod utils;

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process;

use anyhow::Context;

use backend::transcompile;
use commands::{Command, Envelope};
use frontend::Strategy;
use utils::Error;

/// pseudoc - source to pseudocode
#[derive(Parser, Debug)]
#[command(name = "pseudoc")]
#[command(author = "Z1529")]
#[command(version = "0.1.0")]
#[command(about = "Heuristic source-to-pseudocode transcompiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log classifier decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a source file as pseudocode
    Pseudo {
        #[command(flatten)]
        input: InputArgs,

        /// Classification strategy
        #[arg(long, value_enum, default_value = "auto")]
        strategy: StrategyArg,

        /// Emit classified lines as JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Explain the structure of a source file
    Explain {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Summarize a source file
    Summarize {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Count total, code, comment and blank lines
    Count {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Case-insensitive search
    Search {
        /// Term to look for
        term: String,

        #[command(flatten)]
        input: InputArgs,
    },
    /// Process a JSON request envelope
    Run {
        /// Envelope file (reads stdin when absent)
        #[arg(long, value_name = "FILE")]
        input_file: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// Source file (reads stdin when absent)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Path used for language detection instead of FILE
    #[arg(long, value_name = "PATH")]
    path_hint: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    Auto,
    Indentation,
    Generic,
}

impl StrategyArg {
    fn forced(self) -> Option<Strategy> {
        match self {
            StrategyArg::Auto => None,
            StrategyArg::Indentation => Some(Strategy::Indentation),
            StrategyArg::Generic => Some(Strategy::Generic),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    match run(cli.command) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let code = e.downcast_ref::<Error>().map_or(1, Error::exit_code);
            process::exit(code);
        }
    }
}

fn run(command: Commands) -> anyhow::Result<String> {
    let output = match command {
        Commands::Pseudo { input, strategy, json } => {
            let (source, hint) = read_input(&input)?;
            if json {
                let rendering = transcompile(&source, hint.as_deref(), strategy.forced());
                serde_json::to_string_pretty(&rendering).context("Could not encode rendering")?
            } else {
                commands::execute(&Command::PseudoCode, &source, hint.as_deref(), strategy.forced())
            }
        }
        Commands::Explain { input } => run_on_input(&Command::Explain, &input)?,
        Commands::Summarize { input } => run_on_input(&Command::Summarize, &input)?,
        Commands::Count { input } => run_on_input(&Command::CountLines, &input)?,
        Commands::Search { term, input } => run_on_input(&Command::Search(term), &input)?,
        Commands::Run { input_file } => {
            let raw = match input_file {
                Some(path) => fs::read_to_string(&path).map_err(|e| Error::io(path, e))?,
                None => read_stdin()?,
            };
            let envelope = Envelope::from_json(&raw)?;
            commands::run_envelope(&envelope)
        }
    };
    Ok(output)
}

fn run_on_input(command: &Command, input: &InputArgs) -> anyhow::Result<String> {
    let (source, hint) = read_input(input)?;
    Ok(commands::execute(command, &source, hint.as_deref(), None))
}

/// Source text plus the path hint to detect its language by
fn read_input(input: &InputArgs) -> utils::Result<(String, Option<String>)> {
    let hint = input
        .path_hint
        .clone()
        .or_else(|| input.file.as_ref().map(|p| p.to_string_lossy().into_owned()));

    let source = match &input.file {
        Some(path) => {
            log::debug!("reading {}", path.display());
            fs::read_to_string(path).map_err(|e| Error::io(path, e))?
        }
        None => read_stdin()?,
    };
    Ok((source, hint))
}

fn read_stdin() -> utils::Result<String> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf).map_err(Error::Stdin)?;
    if buf.is_empty() {
        return Err(Error::MissingInput);
    }
    Ok(buf)
}
