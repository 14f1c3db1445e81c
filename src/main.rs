use clap::{Parser, Subcommand};
use eyre::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use todostore::{Config, Shell};
use tracing::debug;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "todostore")]
#[command(about = "TodoStore CLI - In-memory todo list for the terminal")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to a YAML config file (default: <config dir>/todostore/todostore.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session on stdin/stdout (default)
    Shell,

    /// Run commands from a file, then print the final list
    Replay {
        /// File with one command per line
        file: PathBuf,

        /// Print the final tasks as JSON instead of the rendered list
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.no_color {
        config.color = false;
    }

    // Setup tracing on stderr so it never mixes with the rendered list
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(log_level(cli.verbose, &config))
        .init();
    debug!(?config, "Configuration loaded");

    let mut shell = Shell::new(&config);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            shell.run(stdin.lock(), &mut io::stdout(), interactive)?;
        }
        Commands::Replay { file, json } => {
            let reader = File::open(&file).with_context(|| format!("Failed to open {}", file.display()))?;
            let mut sink = io::sink();
            shell.run(BufReader::new(reader), &mut sink, false)?;

            if json {
                println!("{}", serde_json::to_string_pretty(shell.store().tasks())?);
            } else {
                print!("{}", shell.render());
            }
        }
    }

    Ok(())
}

fn log_level(verbose: u8, config: &Config) -> LevelFilter {
    match verbose {
        0 => config.log_filter(),
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
