//! Configuration types for binding generation and output

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for binding generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BindgenConfig {
    /// Name of the generated contract type
    pub contract_name: String,

    /// Rust path of the runtime crate that generated code calls into
    pub runtime_path: String,

    /// Expose native types (String, BigInt, ...) instead of wire types
    ///
    /// Read-only functions with a single array output return a raw list of
    /// untyped values in either mode.
    pub native_types: bool,

    /// Whether to generate event descriptors, decoders and streams
    pub generate_events: bool,

    /// Whether to attach signature/selector docs to generated items
    pub emit_docs: bool,

    /// Output settings
    pub output: OutputConfig,
}

/// Configuration for writing generated files
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory generated modules are written to
    pub output_dir: PathBuf,

    /// Whether to write a JSON manifest with selectors and topics
    pub write_manifest: bool,

    /// Whether to pretty-print the manifest
    pub pretty_json: bool,
}

impl Default for BindgenConfig {
    fn default() -> Self {
        Self {
            contract_name: "Contract".to_string(),
            runtime_path: "::contract_runtime".to_string(),
            native_types: true,
            generate_events: true,
            emit_docs: true,
            output: OutputConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("out"),
            write_manifest: true,
            pretty_json: true,
        }
    }
}

impl BindgenConfig {
    /// Validates the entire configuration
    pub fn validate(&self) -> Result<()> {
        if self.contract_name.trim().is_empty() {
            return Err(eyre::eyre!("Contract name must not be empty"));
        }

        syn::parse_str::<syn::Path>(&self.runtime_path)
            .map_err(|e| eyre::eyre!("Invalid runtime path `{}`: {}", self.runtime_path, e))?;

        Ok(())
    }

    /// Loads a configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: Self =
            toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Create a new builder for BindgenConfig
    pub fn builder() -> BindgenConfigBuilder {
        BindgenConfigBuilder::default()
    }
}

/// Builder for creating BindgenConfig with a fluent API
#[derive(Default)]
pub struct BindgenConfigBuilder {
    config: BindgenConfig,
}

impl BindgenConfigBuilder {
    /// Start from an existing configuration, e.g. one loaded from disk
    pub fn from_config(config: BindgenConfig) -> Self {
        Self { config }
    }

    pub fn contract_name(mut self, name: impl Into<String>) -> Self {
        self.config.contract_name = name.into();
        self
    }

    pub fn runtime_path(mut self, path: impl Into<String>) -> Self {
        self.config.runtime_path = path.into();
        self
    }

    pub fn native_types(mut self, native: bool) -> Self {
        self.config.native_types = native;
        self
    }

    pub fn generate_events(mut self, generate: bool) -> Self {
        self.config.generate_events = generate;
        self
    }

    pub fn emit_docs(mut self, emit: bool) -> Self {
        self.config.emit_docs = emit;
        self
    }

    pub fn output_dir(mut self, path: PathBuf) -> Self {
        self.config.output.output_dir = path;
        self
    }

    /// Configure output settings
    pub fn output(mut self, configure: impl FnOnce(&mut OutputConfig)) -> Self {
        configure(&mut self.config.output);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<BindgenConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
