use std::path::PathBuf;

use clap::{Parser, Subcommand};
use drawsheet_core::OutputFormat;

mod commands;

#[derive(Parser)]
#[command(name = "drawsheet", about = "Pull draw results out of extracted results-sheet tables")]
struct Cli {
    /// TOML config file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read page tables and write one results file per session
    Extract {
        /// Page table files (.csv/.tsv) or directories of them, in page order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Output directory (overrides config)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Output format: csv or json (overrides config)
        #[arg(short, long)]
        format: Option<OutputFormat>,
        /// Process pages in parallel
        #[arg(long)]
        parallel: bool,
        /// Treat the first row of each table as a regular row
        #[arg(long)]
        no_header: bool,
    },
    /// Parse raw text from stdin and print both sessions as JSON
    Parse,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Extract { inputs, out_dir, format, parallel, no_header } => {
            let overrides = commands::Overrides { out_dir, format, parallel };
            let config = commands::apply_overrides(config, overrides);
            commands::extract(inputs, !no_header, &config)
        }
        Commands::Parse => commands::parse_stdin(&config),
    }
}
