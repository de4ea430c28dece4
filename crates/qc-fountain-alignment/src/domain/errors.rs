//! Error types for Fountain Alignment

use thiserror::Error;

/// All errors that can occur while aligning or restoring a block
#[derive(Debug, Error)]
pub enum AlignmentError {
    /// Source-symbol count must be positive
    #[error("Invalid num_source_symbols: {value} (must be greater than zero)")]
    InvalidSymbolCount { value: usize },

    /// The record was already aligned once
    #[error("Block already carries {padding_len} padding elements; align exactly once")]
    AlreadyPadded { padding_len: usize },

    /// Serializing the record failed
    #[error("Failed to serialize {field}: {source}")]
    Serialization {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Parsing a record or aligned buffer failed
    #[error("Failed to deserialize block: {0}")]
    Deserialization(#[source] serde_json::Error),
}

impl AlignmentError {
    pub(crate) fn serialization(field: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| Self::Serialization { field, source }
    }
}
