//! Contract ABI input model
//!
//! Entries are parsed from the standard JSON ABI array, or from a compiler
//! artifact that carries the array under an `"abi"` key.

use crate::error::{BindgenError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single named, typed parameter of a function or event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParameter {
    #[serde(default)]
    pub name: String,

    /// Declared type grammar string, e.g. `uint256[10][]`
    #[serde(rename = "type")]
    pub declared_type: String,

    #[serde(default)]
    pub indexed: bool,
}

impl AbiParameter {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            indexed: false,
        }
    }

    pub fn indexed(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            indexed: true,
            ..Self::new(name, declared_type)
        }
    }
}

/// Kind of an ABI entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Function,
    Event,
    Constructor,
    Fallback,
    Receive,
    Error,
}

/// Declared state mutability of a function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateMutability {
    Pure,
    View,
    Payable,
    /// State-mutating, does not accept value (`nonpayable`)
    Normal,
}

impl StateMutability {
    /// Whether the function only reads state
    pub fn is_read_only(self) -> bool {
        matches!(self, StateMutability::Pure | StateMutability::View)
    }

    fn parse(value: &str) -> Result<Self> {
        match value {
            "pure" => Ok(StateMutability::Pure),
            "view" => Ok(StateMutability::View),
            "payable" => Ok(StateMutability::Payable),
            "nonpayable" => Ok(StateMutability::Normal),
            other => Err(BindgenError::InvalidAbi(format!(
                "unknown stateMutability `{other}`"
            ))),
        }
    }
}

/// One element of the ABI array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiEntry {
    pub kind: EntryKind,
    pub name: String,
    pub inputs: Vec<AbiParameter>,
    pub outputs: Vec<AbiParameter>,
    pub state_mutability: StateMutability,
}

impl AbiEntry {
    pub fn function(
        name: impl Into<String>,
        inputs: Vec<AbiParameter>,
        outputs: Vec<AbiParameter>,
        state_mutability: StateMutability,
    ) -> Self {
        Self {
            kind: EntryKind::Function,
            name: name.into(),
            inputs,
            outputs,
            state_mutability,
        }
    }

    pub fn event(name: impl Into<String>, inputs: Vec<AbiParameter>) -> Self {
        Self {
            kind: EntryKind::Event,
            name: name.into(),
            inputs,
            outputs: Vec::new(),
            state_mutability: StateMutability::Normal,
        }
    }
}

/// Raw JSON shape of an ABI entry, including legacy mutability flags
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    #[serde(rename = "type", default = "default_kind")]
    kind: EntryKind,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<AbiParameter>,
    #[serde(default)]
    outputs: Vec<AbiParameter>,
    state_mutability: Option<String>,
    constant: Option<bool>,
    payable: Option<bool>,
}

fn default_kind() -> EntryKind {
    EntryKind::Function
}

impl TryFrom<RawEntry> for AbiEntry {
    type Error = BindgenError;

    fn try_from(raw: RawEntry) -> Result<Self> {
        let state_mutability = match (raw.state_mutability.as_deref(), raw.constant, raw.payable) {
            (Some(value), _, _) => StateMutability::parse(value)?,
            (None, Some(true), _) => StateMutability::View,
            (None, _, Some(true)) => StateMutability::Payable,
            _ => StateMutability::Normal,
        };

        Ok(AbiEntry {
            kind: raw.kind,
            name: raw.name,
            inputs: raw.inputs,
            outputs: raw.outputs,
            state_mutability,
        })
    }
}

/// Parses an ABI JSON document into entries
pub fn parse_abi(json: &str) -> Result<Vec<AbiEntry>> {
    let document: Value = serde_json::from_str(json)?;
    from_value(document)
}

/// Converts an already-parsed JSON document into entries
pub fn from_value(document: Value) -> Result<Vec<AbiEntry>> {
    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(mut artifact) => match artifact.remove("abi") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(BindgenError::InvalidAbi(
                    "expected a JSON array or an artifact with an `abi` array".to_string(),
                ))
            }
        },
        _ => {
            return Err(BindgenError::InvalidAbi(
                "expected a JSON array or an artifact with an `abi` array".to_string(),
            ))
        }
    };

    entries
        .into_iter()
        .map(|entry| {
            let raw: RawEntry = serde_json::from_value(entry)?;
            AbiEntry::try_from(raw)
        })
        .collect()
}
