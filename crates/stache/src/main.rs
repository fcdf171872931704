//! stache CLI - Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "stache")]
#[command(version)]
#[command(about = "Render stache tag templates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template tree against a data file
    Render {
        /// Template tree in JSON form
        #[arg(short, long)]
        template: PathBuf,

        /// JSON data the template is rendered against
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// TOML file with render options
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Treat soft failures as errors
        #[arg(long)]
        strict: bool,

        /// Write output to FILE instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the built-in tags and their parameters
    Tags,
}

fn main() -> Result<()> {
    // Logs go to stderr so rendered output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            template,
            data,
            config,
            strict,
            output,
        } => commands::render::execute(commands::render::RenderArgs {
            template,
            data,
            config,
            strict,
            output,
        }),
        Commands::Tags => commands::tags::execute(),
    }
}
