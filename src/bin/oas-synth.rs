//! oas-synth CLI
//!
//! Command-line interface for assembling API documents from endpoint registries.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use oas_synth::{
    assemble, assemble_operation, encode, load_keys, load_registry, AnnotationKeys, Api, Format,
};
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oas-synth")]
#[command(about = "Synthesize OpenAPI documents from model type descriptors")]
#[command(version)]
struct Cli {
    /// Log synthesis progress to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the full document for a registry
    Generate {
        /// Registry file (.json, otherwise YAML)
        registry: PathBuf,

        /// Annotation key overrides (.json, otherwise YAML)
        #[arg(long)]
        keys: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the operation assembled for one endpoint as JSON
    Operation {
        /// Registry file (.json, otherwise YAML)
        registry: PathBuf,

        /// HTTP method of the endpoint (any case)
        #[arg(long, short)]
        method: String,

        /// URL of the endpoint
        #[arg(long, short)]
        url: String,

        /// Annotation key overrides (.json, otherwise YAML)
        #[arg(long)]
        keys: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            registry,
            keys,
            format,
            pretty,
            output,
        } => run_generate(&registry, keys.as_deref(), format, pretty, output),

        Commands::Operation {
            registry,
            method,
            url,
            keys,
        } => run_operation(&registry, keys.as_deref(), &method, &url),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "oas_synth=debug" } else { "warn" }));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn load_inputs(registry: &Path, keys: Option<&Path>) -> Result<(Api, AnnotationKeys), u8> {
    let api = load_registry(registry).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let keys = match keys {
        Some(path) => load_keys(path).map_err(|e| {
            eprintln!("Error loading keys: {}", e);
            e.exit_code() as u8
        })?,
        None => AnnotationKeys::default(),
    };

    debug!(endpoints = api.endpoints.len(), "loaded registry");
    Ok((api, keys))
}

fn run_generate(
    registry: &Path,
    keys: Option<&Path>,
    format: OutputFormat,
    pretty: bool,
    output: Option<PathBuf>,
) -> Result<(), u8> {
    let (api, keys) = load_inputs(registry, keys)?;

    let document = assemble(&api, &keys).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let format = match (format, pretty) {
        (OutputFormat::Yaml, _) => Format::Yaml,
        (OutputFormat::Json, false) => Format::Json,
        (OutputFormat::Json, true) => Format::JsonPretty,
    };
    let text = encode(&document, format).map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &text).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
        }
    }

    Ok(())
}

fn run_operation(registry: &Path, keys: Option<&Path>, method: &str, url: &str) -> Result<(), u8> {
    let (api, keys) = load_inputs(registry, keys)?;

    // The last registration wins, as in the assembled document.
    let Some(endpoint) = api
        .endpoints
        .iter()
        .rev()
        .find(|e| e.url == url && e.method.eq_ignore_ascii_case(method))
    else {
        eprintln!("Error: no endpoint {} {}", method.to_uppercase(), url);
        return Err(1);
    };

    let operation = assemble_operation(endpoint, &keys).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let json = serde_json::to_string_pretty(&operation).map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;
    println!("{}", json);

    Ok(())
}
