//! jobsniper CLI - upload checks, config status and analysis history.

use clap::{Parser, Subcommand};
use jobsniper::cli;
use jobsniper::config::load_config;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jobsniper")]
#[command(author, version, about = "JobSniper AI resume checks and history", long_about = None)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a resume file before analysis.
    Validate {
        /// Path to the uploaded file.
        path: PathBuf,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show which AI providers and features are usable.
    Status {
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Create the history database tables.
    Init,

    /// Append an analysis report (JSON file) to the history.
    Record {
        /// Path to the analysis report.
        report: PathBuf,

        /// Name of the analyzed resume file.
        #[arg(short, long)]
        file: Option<String>,
    },

    /// List recent analyses.
    History {
        /// Maximum number of analyses to show. Defaults to 10.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one analysis as JSON.
    Show {
        /// Analysis id.
        id: i64,
    },

    /// List recent agent interactions.
    Interactions {
        /// Maximum number of interactions to show. Defaults to 10.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Strip script markup from text, or unsafe characters from a filename.
    Sanitize {
        /// Text to sanitize.
        input: String,

        /// Treat the input as a filename.
        #[arg(long)]
        filename: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("jobsniper={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("jobsniper: error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Validate { path, json } => cli::validate::run(&config, &path, json),
        Commands::Status { json } => cli::status::run(&config, json),
        Commands::Init => cli::init::run(&config),
        Commands::Record { report, file } => cli::record::run(&config, &report, file.as_deref()),
        Commands::History { limit } => cli::history::run(&config, limit),
        Commands::Show { id } => cli::show::run(&config, id),
        Commands::Interactions { limit } => cli::interactions::run(&config, limit),
        Commands::Sanitize { input, filename } => cli::sanitize::run(&config, &input, filename),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("jobsniper: error: {e}");
            ExitCode::FAILURE
        }
    }
}
