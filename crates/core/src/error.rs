//! Error types for schema parsing and value decoding
//!
//! This module defines the failures the core can report while turning
//! server-supplied documents into schema and value types.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Decoding a wire value never fails: an unrecognized wire shape decodes to
//! "no value" (`None`) instead, so only document *structure* errors surface here.

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the schema and value model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed schema, table or column-type document
    #[error("Bad schema: {detail}")]
    SchemaFormat {
        /// What was wrong with the document
        detail: String,
    },

    /// Type keyword outside the recognized set
    #[error("Unknown base type: {keyword:?}")]
    UnknownBaseType {
        /// The keyword that was not recognized
        keyword: String,
    },

    /// Row-content or update document with the wrong structure
    #[error("Malformed document: {detail}")]
    MalformedDocument {
        /// What was wrong with the document
        detail: String,
    },

    /// Version string that is not a dotted `major.minor.patch` triple
    #[error("Invalid version string: {input:?}")]
    InvalidVersion {
        /// The rejected input
        input: String,
    },
}

impl Error {
    /// Build a [`Error::SchemaFormat`] from anything printable
    pub fn schema_format(detail: impl Into<String>) -> Self {
        Error::SchemaFormat {
            detail: detail.into(),
        }
    }

    /// Build a [`Error::UnknownBaseType`]
    pub fn unknown_base_type(keyword: impl Into<String>) -> Self {
        Error::UnknownBaseType {
            keyword: keyword.into(),
        }
    }

    /// Build a [`Error::MalformedDocument`]
    pub fn malformed_document(detail: impl Into<String>) -> Self {
        Error::MalformedDocument {
            detail: detail.into(),
        }
    }

    /// Build a [`Error::InvalidVersion`]
    pub fn invalid_version(input: impl Into<String>) -> Self {
        Error::InvalidVersion {
            input: input.into(),
        }
    }
}
