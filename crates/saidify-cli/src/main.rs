//! saidify CLI - compute, embed and verify self-addressing identifiers.

use clap::{Parser, Subcommand};
use saidify_canonical::{DerivationCode, Saider};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod naming;
mod output;
mod select;

use commands::{canonicalize, compute, rewrite, verify};
use config::SaidifyConfig;

/// Some documents failed, or verification found stale identifiers.
const EXIT_PARTIAL: u8 = 1;
/// Configuration or capability error; no document was processed.
const EXIT_FATAL: u8 = 2;

#[derive(Parser)]
#[command(name = "saidify")]
#[command(about = "Compute and embed self-addressing identifiers (SAIDs) in JSON documents")]
struct Cli {
    /// Configuration file (default: ./saidify.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Identifier field name (default: $id)
    #[arg(long, global = true)]
    field: Option<String>,
    /// Derivation code prefix, e.g. E (Blake3-256) or I (SHA-256)
    #[arg(long, global = true)]
    code: Option<DerivationCode>,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute SAIDs and write them into the documents
    Rewrite {
        /// Document files to process
        files: Vec<PathBuf>,
        /// Process every <prefix>*.json file in the configured directory
        #[arg(long)]
        all: bool,
        /// Directory scanned by --all
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Process documents in parallel
        #[arg(long)]
        parallel: bool,
    },
    /// Check stored SAIDs without writing
    Verify {
        /// Document files to check
        files: Vec<PathBuf>,
        /// Check every <prefix>*.json file in the configured directory
        #[arg(long)]
        all: bool,
        /// Directory scanned by --all
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the SAID of a document without modifying it
    Compute {
        /// Input JSON file (or stdin if not provided)
        input: Option<PathBuf>,
    },
    /// Show the canonical bytes hashed for a document
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<PathBuf>,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match SaidifyConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Fatal: invalid configuration: {}", e);
            return ExitCode::from(EXIT_FATAL);
        }
    };
    if let Some(field) = cli.field {
        config.field = field;
    }
    if let Some(code) = cli.code {
        config.code = code;
    }
    match &cli.command {
        Commands::Rewrite { dir: Some(dir), .. } | Commands::Verify { dir: Some(dir), .. } => {
            config.dir = dir.clone();
        }
        _ => {}
    }

    // Capability check before any document is touched.
    let saider = match Saider::new(config.field.clone(), config.code) {
        Ok(saider) => saider,
        Err(e) => {
            eprintln!("Fatal: derivation code '{}' is unusable: {}", config.code, e);
            return ExitCode::from(EXIT_FATAL);
        }
    };
    tracing::debug!(field = %config.field, code = %config.code, "configuration loaded");

    let result = match cli.command {
        Commands::Rewrite {
            files,
            all,
            json,
            parallel,
            ..
        } => rewrite::run(saider, &config, files, all, json, parallel),
        Commands::Verify {
            files, all, json, ..
        } => verify::run(saider, &config, files, all, json),
        Commands::Compute { input } => compute::run(&saider, input).map(|()| true),
        Commands::Canonicalize { input } => canonicalize::run(&saider, input).map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_PARTIAL),
        Err(e) => {
            eprintln!("Error: {}", e);
            let fatal = e
                .downcast_ref::<saidify_store::StoreError>()
                .is_some_and(|e| e.is_fatal());
            ExitCode::from(if fatal { EXIT_FATAL } else { EXIT_PARTIAL })
        }
    }
}
