//! Generation entry point and writing of bindings to disk

use crate::{
    abi,
    codegen,
    compiler::{self, ContractBindings},
    config::{BindgenConfig, OutputConfig},
    error::Result,
    reporter::Reporter,
    utils,
};
use convert_case::{Case, Casing};
use eyre::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Selectors and topics of a generated module
///
/// Lets consumers check which ABI a module was generated from without
/// parsing the Rust source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingsManifest {
    pub contract: String,
    /// `sha256:<hex>` of the ABI document
    pub abi_hash: String,
    /// Canonical signature to selector
    pub function_selectors: BTreeMap<String, String>,
    /// Canonical signature to topic
    pub event_topics: BTreeMap<String, String>,
}

impl BindingsManifest {
    pub fn new(bindings: &ContractBindings, abi_json: &str) -> Self {
        Self {
            contract: bindings.contract_name.clone(),
            abi_hash: format!("sha256:{}", utils::hash_bytes(abi_json.as_bytes())),
            function_selectors: bindings
                .functions
                .iter()
                .map(|f| (f.signature.clone(), f.selector_hex()))
                .collect(),
            event_topics: bindings
                .events
                .iter()
                .map(|e| (e.signature.clone(), e.topic_hex()))
                .collect(),
        }
    }
}

/// Result of generating bindings for one ABI
#[derive(Debug, Clone)]
pub struct GeneratedBindings {
    pub bindings: ContractBindings,
    /// Complete Rust module, header included
    pub source: String,
    pub manifest: BindingsManifest,
}

/// Parses, compiles and renders an ABI document
pub fn generate(
    abi_json: &str,
    config: &BindgenConfig,
    reporter: &dyn Reporter,
) -> Result<GeneratedBindings> {
    let entries = abi::parse_abi(abi_json)?;
    let bindings = compiler::compile(&entries, config, reporter)?;
    let manifest = BindingsManifest::new(&bindings, abi_json);

    let body = codegen::render_source(&bindings, config)?;
    let source = format!(
        "// Generated by abi-bindgen. Do not edit.\n// ABI {}\n\n{}\n",
        manifest.abi_hash, body
    );

    Ok(GeneratedBindings { bindings, source, manifest })
}

/// Paths of written files
#[derive(Debug, Clone)]
pub struct SavedBindings {
    pub source_path: PathBuf,
    /// Path to the manifest (if saved)
    pub manifest_path: Option<PathBuf>,
}

/// File name suffix of saved manifests
pub const MANIFEST_SUFFIX: &str = ".manifest.json";

/// File stem of a contract's module, e.g. `token_vault` for `TokenVault`
pub fn module_file_stem(contract_name: &str) -> String {
    contract_name.to_case(Case::Snake)
}

/// Saves generated bindings to disk
///
/// Creates:
/// ```ignore
/// out/
///   token_vault.rs
///   token_vault.manifest.json
/// ```
pub fn save_bindings(generated: &GeneratedBindings, options: &OutputConfig) -> eyre::Result<SavedBindings> {
    std::fs::create_dir_all(&options.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            options.output_dir.display()
        )
    })?;

    let stem = module_file_stem(&generated.bindings.contract_name);
    let source_path = options.output_dir.join(format!("{stem}.rs"));
    std::fs::write(&source_path, &generated.source)
        .with_context(|| format!("Failed to write bindings: {}", source_path.display()))?;
    info!("Saved bindings to: {}", source_path.display());

    let mut saved = SavedBindings { source_path, manifest_path: None };

    if options.write_manifest {
        let manifest_path = options.output_dir.join(format!("{stem}{MANIFEST_SUFFIX}"));
        save_manifest(&generated.manifest, &manifest_path, options.pretty_json)?;
        info!("Saved manifest to: {}", manifest_path.display());
        saved.manifest_path = Some(manifest_path);
    }

    Ok(saved)
}

/// Helper to save just the manifest file
pub fn save_manifest(manifest: &BindingsManifest, output_path: &Path, pretty: bool) -> eyre::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(manifest)?
    } else {
        serde_json::to_string(manifest)?
    };

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write manifest: {}", output_path.display()))?;

    Ok(())
}
