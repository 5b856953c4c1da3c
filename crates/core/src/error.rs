//! Error types for ABI binding generation

/// Result alias used throughout the generator
pub type Result<T, E = BindgenError> = std::result::Result<T, E>;

/// Error type for binding generation failures
#[derive(Debug, thiserror::Error)]
pub enum BindgenError {
    #[error("Invalid ABI type `{declared}`: {reason}")]
    InvalidTypeGrammar { declared: String, reason: String },

    #[error("No native mapping for wire type `{0}`")]
    UnsupportedWireType(String),

    #[error("Invalid ABI: {0}")]
    InvalidAbi(String),

    #[error("Invalid runtime path `{0}`")]
    InvalidRuntimePath(String),

    #[error("Failed to render bindings: {0}")]
    Render(String),

    #[error("Failed to translate ABI entry `{entry}`: {source}")]
    Entry {
        entry: String,
        #[source]
        source: Box<BindgenError>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BindgenError {
    pub(crate) fn grammar(declared: &str, reason: impl Into<String>) -> Self {
        BindgenError::InvalidTypeGrammar {
            declared: declared.to_string(),
            reason: reason.into(),
        }
    }

    /// Attaches the ABI entry name to a per-entry failure
    pub fn in_entry(self, entry: &str) -> Self {
        BindgenError::Entry {
            entry: entry.to_string(),
            source: Box::new(self),
        }
    }
}
