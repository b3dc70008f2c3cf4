//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::debug;

use crate::commands;
use tokenkit::config::Config;
use tokenkit::output::OutputMode;

/// tokenkit - Tokenize text with built-in grammars
#[derive(Parser, Debug)]
#[command(
    name = "tokenkit",
    version,
    about = "Tokenize text with built-in grammars",
    long_about = "Split text into typed tokens.\n\n\
                  Grammars are picked by name, by file name, or by scoring\n\
                  every candidate grammar against the text."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (default: <config dir>/tokenkit/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Tokenize a file, or standard input
    Scan {
        /// File to scan; standard input when absent or `-`
        file: Option<PathBuf>,

        /// Grammar name; detected from the file name or the text when absent
        #[arg(short, long)]
        grammar: Option<String>,

        /// Stop scanning at this marker (repeatable)
        #[arg(short, long = "stop", value_name = "MARKER")]
        stop: Vec<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Score every candidate grammar against a text and pick the best
    Detect {
        /// File to read; standard input when absent or `-`
        file: Option<PathBuf>,

        /// Candidate grammar names, in preference order (default: from config, else all)
        #[arg(short, long = "candidate", value_name = "NAME", value_delimiter = ',')]
        candidates: Vec<String>,
    },

    /// List the registered grammars
    Grammars,

    /// Show the token type hierarchy
    Types,

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let config = Config::load(cli.config.as_deref())?;
    debug!("config: {config:?}");

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        config.output.format
    };

    match cli.command {
        Some(Command::Scan {
            file,
            grammar,
            stop,
            no_color,
        }) => commands::scan(
            &commands::ScanArgs {
                file: file.as_deref(),
                grammar: grammar.as_deref(),
                stop_markers: &stop,
                color: config.output.color && !no_color,
            },
            &config,
            output_mode,
        ),
        Some(Command::Detect { file, candidates }) => {
            commands::detect(file.as_deref(), &candidates, &config, output_mode)
        },
        Some(Command::Grammars) => commands::grammars(output_mode),
        Some(Command::Types) => commands::types(output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": tokenkit::VERSION
                    })
                );
            } else {
                println!("tokenkit v{}", tokenkit::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": tokenkit::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("tokenkit v{}", tokenkit::VERSION);
                println!("\nRun 'tokenkit --help' for usage");
                println!("Run 'tokenkit scan <file>' to tokenize a file");
            }
            Ok(())
        },
    }
}
