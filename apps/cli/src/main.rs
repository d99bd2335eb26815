//! Learner CLI
//!
//! Loads a term set from a flat text file and drills it on the terminal.

mod commands;
mod config;
mod console;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use learner_core::{LearnEnd, StdRandom, TestBlock};
use tracing_subscriber::EnvFilter;

use crate::config::SourceArgs;
use crate::console::Console;

/// Term/definition drilling on the command line
#[derive(Parser, Debug)]
#[command(name = "learner")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the settings file (default: learner.json in current directory)
    #[arg(short, long, global = true, value_name = "FILE", env = "LEARNER_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Seed for reproducible question order
    #[arg(long, global = true, value_name = "SEED")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drill in rounds until every term is mastered
    Learn {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        /// Questions per round
        #[arg(long)]
        round_length: Option<usize>,

        /// Ask for the year of dated terms instead of showing it
        #[arg(long)]
        ask_years: bool,
    },

    /// Run a scored test made of exercise blocks
    Test {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        /// Exercise block as kind=count, repeatable (default: from settings)
        #[arg(long = "block", value_name = "KIND=COUNT", value_parser = config::parse_block)]
        blocks: Vec<TestBlock>,

        /// Write the JSON test report to this file
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Browse the cards one at a time
    Flashcards {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Combine several set files into one
    Merge {
        #[arg(value_name = "FILE", required = true, num_args = 2..)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,

        /// Where to save the merged set
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli
        .config
        .unwrap_or_else(|| Path::new(config::CONFIG_FILE_NAME).to_path_buf());
    let mut settings = config::load_from_file(&config_path)?;

    let mut rng = match cli.seed {
        Some(seed) => StdRandom::seeded(seed),
        None => StdRandom::from_entropy(),
    };
    let mut console = Console::stdio();

    match cli.command {
        Command::Learn {
            file,
            source,
            round_length,
            ask_years,
        } => {
            source.apply(&mut settings);
            if let Some(round_length) = round_length {
                settings.round_length = round_length;
            }
            settings.ask_years |= ask_years;
            settings.validate()?;

            let summary = commands::learn_command(
                &file,
                source.name.as_deref(),
                &settings,
                &mut rng,
                &mut console,
            )?;
            if summary.end == LearnEnd::Declined {
                tracing::info!(
                    total = summary.total,
                    ceiling = summary.ceiling,
                    "stopped before mastering every term"
                );
            }
        }
        Command::Test {
            file,
            source,
            blocks,
            report,
        } => {
            source.apply(&mut settings);
            settings.validate()?;

            commands::test_command(
                &file,
                source.name.as_deref(),
                &settings,
                &blocks,
                report.as_deref(),
                &mut rng,
                &mut console,
            )?;
        }
        Command::Flashcards { file, source } => {
            source.apply(&mut settings);
            settings.validate()?;

            commands::flashcards_command(&file, source.name.as_deref(), &settings, &mut console)?;
        }
        Command::Merge {
            files,
            source,
            output,
        } => {
            source.apply(&mut settings);
            settings.validate()?;

            let merged = commands::merge_command(&files, &settings, &output)?;
            println!(
                "Saved {} terms from {} files to {}",
                merged.len(),
                files.len(),
                output.display()
            );
        }
    }

    Ok(())
}
