use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use union_schema_core::{
    DecodeOptions, TypedInstance, UnionRegistry, UnknownFields, UntypedRecord, ValidationError,
    record_to_json,
};
use union_schema_loader::{RegistryDocument, ValidatorConfig, load_registry, read_records};

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "union-schema", version)]
#[command(about = "Check tagged-union registries and validate records against them")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check one or more registry documents for definition problems.
    Check(CheckArgs),
    /// Decode records and print typed instances or validation errors.
    Decode(DecodeArgs),
    /// Decode records and re-encode them in canonical field order.
    Normalize(NormalizeArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Registry documents (.json, .yaml, .yml).
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct SourceArgs {
    /// Registry document to decode against.
    #[arg(long, required_unless_present = "config", conflicts_with = "config")]
    registry: Option<PathBuf>,
    /// Validator configuration file naming the registry and decode policy.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Ignore fields the variant does not declare instead of rejecting them.
    #[arg(long)]
    permissive: bool,
    /// Record file (JSON array or JSON lines); reads stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct DecodeArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct NormalizeArgs {
    #[command(flatten)]
    source: SourceArgs,
}

/// Per-record decode result as printed by `decode`.
#[derive(Debug, Serialize)]
struct DecodeOutcome<'a> {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    ok: Option<&'a TypedInstance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [ValidationError]>,
}

type DecodeResult = Result<TypedInstance, Vec<ValidationError>>;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Check(args) => run_check(args),
        Command::Decode(args) => run_decode(args),
        Command::Normalize(args) => run_normalize(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let mut failed = 0usize;

    for path in &args.files {
        let document = match RegistryDocument::load(path) {
            Ok(document) => document,
            Err(err) => {
                eprintln!("{}: {err}", path.display());
                failed += 1;
                continue;
            }
        };

        let problems = document.check();
        if !problems.is_empty() {
            for problem in &problems {
                eprintln!("{}: {problem}", path.display());
            }
            failed += 1;
            continue;
        }

        let fingerprint = document
            .fingerprint()
            .map_err(|err| format!("Failed to fingerprint '{}': {err}", path.display()))?;
        println!(
            "ok {} ({} variants, fingerprint {fingerprint})",
            path.display(),
            document.variants.len()
        );
    }

    if failed > 0 {
        return Err(format!(
            "{failed} of {} registry file(s) failed checks",
            args.files.len()
        ));
    }
    Ok(())
}

fn run_decode(args: DecodeArgs) -> Result<(), String> {
    let (registry, options) = load_source(&args.source)?;
    let records = load_records(&args.source)?;
    let results = decode_all(&registry, &options, &records);

    let outcomes: Vec<DecodeOutcome<'_>> = results
        .iter()
        .enumerate()
        .map(|(i, result)| DecodeOutcome {
            index: i + 1,
            ok: result.as_ref().ok(),
            errors: result.as_ref().err().map(Vec::as_slice),
        })
        .collect();

    match args.format {
        CliOutputFormat::Json => {
            for outcome in &outcomes {
                let line = serde_json::to_string(outcome)
                    .map_err(|err| format!("Failed to serialize result: {err}"))?;
                println!("{line}");
            }
        }
        CliOutputFormat::Yaml => {
            let text = serde_yaml::to_string(&outcomes)
                .map_err(|err| format!("Failed to serialize results: {err}"))?;
            print!("{text}");
        }
    }

    check_failures(&results)
}

fn run_normalize(args: NormalizeArgs) -> Result<(), String> {
    let (registry, options) = load_source(&args.source)?;
    let records = load_records(&args.source)?;
    let results = decode_all(&registry, &options, &records);

    for (i, result) in results.iter().enumerate() {
        match result {
            Ok(instance) => {
                let record = registry
                    .encode(instance)
                    .map_err(|err| format!("record {}: {err}", i + 1))?;
                println!("{}", record_to_json(&record));
            }
            Err(errors) => {
                for error in errors {
                    eprintln!("record {}: {error}", i + 1);
                }
            }
        }
    }

    check_failures(&results)
}

/// Decodes records in parallel against one shared registry, keeping input order.
fn decode_all(
    registry: &UnionRegistry,
    options: &DecodeOptions,
    records: &[UntypedRecord],
) -> Vec<DecodeResult> {
    records
        .par_iter()
        .map(|record| registry.decode_with(record, options))
        .collect()
}

fn check_failures(results: &[DecodeResult]) -> Result<(), String> {
    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(total = results.len(), failed, "Decoded records");
    if failed > 0 {
        return Err(format!(
            "{failed} of {} records failed validation",
            results.len()
        ));
    }
    Ok(())
}

fn load_source(args: &SourceArgs) -> Result<(UnionRegistry, DecodeOptions), String> {
    let (registry, mut options) = if let Some(config_path) = &args.config {
        let config = ValidatorConfig::load(config_path).map_err(|err| {
            format!("Failed to load config '{}': {err}", config_path.display())
        })?;
        let registry = config.load_registry().map_err(|err| {
            format!(
                "Failed to load registry '{}': {err}",
                config.registry.display()
            )
        })?;
        (registry, config.decode_options())
    } else if let Some(path) = &args.registry {
        let registry = load_registry(path)
            .map_err(|err| format!("Failed to load registry '{}': {err}", path.display()))?;
        (registry, DecodeOptions::strict())
    } else {
        return Err("Specify a registry source: --registry or --config".to_string());
    };

    if args.permissive {
        options.unknown_fields = UnknownFields::Ignore;
    }
    debug!(?options, tag_field = registry.tag_field(), "Decoder ready");
    Ok((registry, options))
}

fn load_records(args: &SourceArgs) -> Result<Vec<UntypedRecord>, String> {
    match &args.input {
        Some(path) => {
            let file = fs::File::open(path)
                .map_err(|err| format!("Failed to open input '{}': {err}", path.display()))?;
            read_records(file)
                .map_err(|err| format!("Failed to read input '{}': {err}", path.display()))
        }
        None => read_records(std::io::stdin().lock())
            .map_err(|err| format!("Failed to read stdin: {err}")),
    }
}
