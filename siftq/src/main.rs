//! siftq: Sift Query - CLI for translating filter tokens into predicates.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "siftq")]
#[command(about = "Sift Query - translate filter tokens into SQL and document predicates")]
#[command(version)]
struct Cli {
    /// Config file (default: $SIFT_CONFIG, then the user config dir)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Reject dates that are not RFC 3339 instead of passing them through
    #[arg(long = "strict-timestamps", global = true)]
    strict_timestamps: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate tokens into a predicate for the field's backend
    #[command(visible_alias = "t")]
    Translate {
        /// Field name (e.g., age, profile, createdAt)
        field: String,

        /// Declared type: numeric, date, string, object, array
        declared_type: String,

        /// Raw tokens (e.g., ">=18", "-null", "*foo*", "=>=<1 10")
        #[arg(allow_hyphen_values = true)]
        values: Vec<String>,

        /// Output format: json, sql
        #[arg(short = 'f', long = "format", default_value = "json")]
        format: String,
    },

    /// Show the backend-neutral intents for the tokens
    #[command(visible_alias = "i")]
    Intent {
        /// Field name
        field: String,

        /// Declared type: numeric, date, string, object, array
        declared_type: String,

        /// Raw tokens
        #[arg(allow_hyphen_values = true)]
        values: Vec<String>,
    },
}

fn init_logging() {
    let filter = std::env::var("SIFT_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .with_env_filter(filter)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let opts = commands::GlobalOptions {
        config: cli.config,
        strict_timestamps: cli.strict_timestamps,
    };

    let result = match cli.command {
        Commands::Translate { field, declared_type, values, format } => {
            commands::translate(&opts, &field, &declared_type, values, &format)
        }
        Commands::Intent { field, declared_type, values } => {
            commands::intent(&opts, &field, &declared_type, values)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
