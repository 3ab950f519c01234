//! examhall CLI — run exam simulations against the session registry.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod sample;

#[derive(Parser)]
#[command(name = "examhall", version, about = "Concurrent questionnaire session registry")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate students taking the sample questionnaire concurrently
    Simulate {
        /// Number of students (overrides config)
        #[arg(long)]
        students: Option<usize>,

        /// Max students working at once (overrides config)
        #[arg(long)]
        parallelism: Option<usize>,

        /// Pause before each answer in milliseconds (overrides config)
        #[arg(long)]
        think_time_ms: Option<u64>,

        /// Answer strategy: alternating, all_correct, all_wrong
        #[arg(long)]
        strategy: Option<String>,

        /// Write the JSON report to this path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter examhall.toml
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("examhall=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            students,
            parallelism,
            think_time_ms,
            strategy,
            output,
            config,
        } => {
            commands::simulate::execute(commands::simulate::SimulateArgs {
                students,
                parallelism,
                think_time_ms,
                strategy,
                output,
                config,
            })
            .await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
