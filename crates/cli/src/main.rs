//! CLI for the abi-bindgen library
//!
//! Generates typed Rust contract bindings from Ethereum ABI files.

use abi_bindgen::{
    generate, ident, save_bindings,
    writer::{module_file_stem, MANIFEST_SUFFIX},
    BindgenConfig, BindgenConfigBuilder, BindgenError, CollectingReporter, Reporter,
    TracingReporter,
};
use clap::{Parser, Subcommand};
use eyre::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::Level;
use walkdir::WalkDir;

const ABI_EXTENSIONS: [&str; 2] = ["abi", "json"];

/// Typed Rust bindings generator for contract ABIs
#[derive(Parser, Debug)]
#[command(name = "abi-bindgen")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all logging except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Common generation settings
#[derive(Parser, Debug, Clone, Default)]
struct GenerateSettings {
    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Expose wire types instead of native types
    #[arg(long)]
    wire_types: bool,

    /// Do not generate event wrappers
    #[arg(long)]
    no_events: bool,

    /// Rust path of the runtime crate used by generated code
    #[arg(long)]
    runtime: Option<String>,

    /// Run rustfmt on generated files
    #[arg(long)]
    rustfmt: bool,

    /// Output JSON to stdout
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate bindings for one ABI file
    Generate {
        /// ABI JSON file (bare array or compiler artifact)
        abi_file: PathBuf,

        /// Name of the generated contract type (defaults to the file name)
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        settings: GenerateSettings,
    },

    /// Generate bindings for every ABI file under a directory
    Batch {
        /// Directory to search for *.abi and *.json files
        dir: PathBuf,

        #[command(flatten)]
        settings: GenerateSettings,
    },
}

impl Commands {
    fn json(&self) -> bool {
        match self {
            Commands::Generate { settings, .. } | Commands::Batch { settings, .. } => settings.json,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status")]
enum Output {
    #[serde(rename = "success")]
    Success {
        #[serde(flatten)]
        data: SuccessData,
    },

    #[serde(rename = "error")]
    Error { error_type: String, message: String },
}

#[derive(Debug, Serialize)]
#[serde(tag = "command")]
enum SuccessData {
    #[serde(rename = "generate")]
    Generate(GeneratedFile),

    #[serde(rename = "batch")]
    Batch { generated: Vec<GeneratedFile> },
}

#[derive(Debug, Serialize)]
struct GeneratedFile {
    contract_name: String,
    abi_file: String,
    source_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    manifest_path: Option<String>,
    functions: usize,
    events: usize,
    warnings: Vec<String>,
}

/// Logs warnings and keeps them for the summary
#[derive(Default)]
struct CliReporter {
    collected: CollectingReporter,
}

impl Reporter for CliReporter {
    fn report(&self, message: &str) {
        TracingReporter.report(message);
        self.collected.report(message);
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let json = cli.command.json();
    let result = match cli.command {
        Commands::Generate { abi_file, name, settings } => run_generate(abi_file, name, settings),
        Commands::Batch { dir, settings } => run_batch(dir, settings),
    };

    if let Err(e) = result {
        output_error(e, json);
        std::process::exit(1);
    }
}

fn run_generate(abi_file: PathBuf, name: Option<String>, settings: GenerateSettings) -> Result<()> {
    let base = load_config(&settings)?;
    let name = name.or_else(|| settings.config.is_some().then(|| base.contract_name.clone()));
    let config = build_config(base, &settings, name.unwrap_or_else(|| file_contract_name(&abi_file)))?;

    let generated = generate_file(&abi_file, &config, settings.rustfmt)?;

    if settings.json {
        let output = Output::Success {
            data: SuccessData::Generate(generated),
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        print_generated(&generated);
    }

    Ok(())
}

fn run_batch(dir: PathBuf, settings: GenerateSettings) -> Result<()> {
    let generated = generate_batch(&dir, &settings)?;

    if settings.json {
        let output = Output::Success {
            data: SuccessData::Batch { generated },
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        for file in &generated {
            print_generated(file);
        }
        println!("✅ Generated {} modules", generated.len());
    }

    Ok(())
}

/// Generates one module per ABI file under `dir`
///
/// Files inside the output directory are not inputs. Two inputs that would
/// write the same module are rejected before anything is written.
fn generate_batch(dir: &Path, settings: &GenerateSettings) -> Result<Vec<GeneratedFile>> {
    let base = load_config(settings)?;
    let output_dir = settings.output_dir.as_deref().unwrap_or(&base.output.output_dir);
    let abi_files = find_abi_files(dir, Some(output_dir))?;
    if abi_files.is_empty() {
        tracing::warn!("No ABI files found in {}", dir.display());
    }

    let mut modules: HashMap<String, &Path> = HashMap::new();
    for abi_file in &abi_files {
        let stem = module_file_stem(&ident::type_name(&file_contract_name(abi_file)));
        if let Some(previous) = modules.insert(stem.clone(), abi_file) {
            return Err(eyre::eyre!(
                "{} and {} both generate module {stem}",
                previous.display(),
                abi_file.display()
            ));
        }
    }

    let mut generated = Vec::with_capacity(abi_files.len());
    for abi_file in &abi_files {
        let config = build_config(base.clone(), settings, file_contract_name(abi_file))?;
        generated.push(generate_file(abi_file, &config, settings.rustfmt)?);
    }

    Ok(generated)
}

fn load_config(settings: &GenerateSettings) -> Result<BindgenConfig> {
    match &settings.config {
        Some(path) => BindgenConfig::from_toml_file(path),
        None => Ok(BindgenConfig::default()),
    }
}

/// Applies command-line overrides on top of the loaded configuration
fn build_config(base: BindgenConfig, settings: &GenerateSettings, name: String) -> Result<BindgenConfig> {
    let mut builder = BindgenConfigBuilder::from_config(base).contract_name(name);

    if let Some(output_dir) = &settings.output_dir {
        builder = builder.output_dir(output_dir.clone());
    }
    if let Some(runtime) = &settings.runtime {
        builder = builder.runtime_path(runtime.clone());
    }
    if settings.wire_types {
        builder = builder.native_types(false);
    }
    if settings.no_events {
        builder = builder.generate_events(false);
    }

    builder.build().context("Invalid configuration")
}

fn generate_file(abi_file: &Path, config: &BindgenConfig, rustfmt: bool) -> Result<GeneratedFile> {
    let abi_json = std::fs::read_to_string(abi_file)
        .with_context(|| format!("Failed to read ABI file: {}", abi_file.display()))?;

    let reporter = CliReporter::default();
    let generated = generate(&abi_json, config, &reporter)
        .with_context(|| format!("Generation failed for {}", abi_file.display()))?;
    let saved = save_bindings(&generated, &config.output)?;

    if rustfmt {
        run_rustfmt(&saved.source_path)?;
    }

    Ok(GeneratedFile {
        contract_name: generated.bindings.contract_name.clone(),
        abi_file: abi_file.display().to_string(),
        source_path: saved.source_path.display().to_string(),
        manifest_path: saved.manifest_path.map(|p| p.display().to_string()),
        functions: generated.bindings.functions.len(),
        events: generated.bindings.events.len(),
        warnings: reporter.collected.messages(),
    })
}

fn run_rustfmt(path: &Path) -> Result<()> {
    let status = Command::new("rustfmt")
        .args(["--edition", "2021"])
        .arg(path)
        .status()
        .context("Failed to run rustfmt")?;

    if !status.success() {
        tracing::warn!("rustfmt exited with {} for {}", status, path.display());
    }

    Ok(())
}

/// ABI files under `dir`, in file name order, leaving out `skip_dir`
fn find_abi_files(dir: &Path, skip_dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(eyre::eyre!("Not a directory: {}", dir.display()));
    }
    let skip_dir = skip_dir.and_then(|path| path.canonicalize().ok());

    let files = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !entry.file_type().is_dir()
                || skip_dir.is_none()
                || entry.path().canonicalize().ok() != skip_dir
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_abi_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    Ok(files)
}

fn is_abi_file(path: &Path) -> bool {
    let is_manifest = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(MANIFEST_SUFFIX));

    !is_manifest
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ABI_EXTENSIONS.contains(&ext))
}

/// Contract name derived from a file name, `MyToken.abi` -> `MyToken`
fn file_contract_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.split('.').next().unwrap_or(stem).to_string())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| BindgenConfig::default().contract_name)
}

fn print_generated(file: &GeneratedFile) {
    println!("✅ Generated bindings for {}", file.contract_name);
    println!("📄 Created files:");
    println!("   - {}", file.source_path);
    if let Some(manifest_path) = &file.manifest_path {
        println!("   - {}", manifest_path);
    }
    println!("   - {} functions, {} events", file.functions, file.events);
    for warning in &file.warnings {
        println!("⚠️  {}", warning);
    }
}

fn classify(error: &BindgenError) -> &'static str {
    match error {
        BindgenError::InvalidTypeGrammar { .. } => "invalid_type",
        BindgenError::UnsupportedWireType(_) => "unsupported_type",
        BindgenError::InvalidAbi(_) | BindgenError::Json(_) => "invalid_abi",
        BindgenError::InvalidRuntimePath(_) => "invalid_config",
        BindgenError::Render(_) => "render_failed",
        BindgenError::Entry { source, .. } => classify(source),
    }
}

fn output_error(error: eyre::Report, json: bool) {
    if !json {
        eprintln!("❌ {:?}", error);
        return;
    }

    let error_type = if let Some(e) = error.chain().find_map(|e| e.downcast_ref::<BindgenError>()) {
        classify(e)
    } else if error.chain().any(|e| e.is::<std::io::Error>()) {
        "io_error"
    } else if error.to_string().contains("Invalid configuration") {
        "invalid_config"
    } else {
        "unknown_error"
    };

    let output = Output::Error {
        error_type: error_type.to_string(),
        message: format!("{:#}", error),
    };

    match serde_json::to_string(&output) {
        Ok(json) => eprintln!("{}", json),
        Err(_) => eprintln!("{:?}", error),
    }
}
