//! Error types shared by graph building, novelty classification, transcript
//! assignment and read partitioning.
//!
//! Only [`SjError::RecordDecode`] is ever recovered locally (by the read
//! partitioner, under its skip policy). Every other kind aborts the enclosing
//! operation and is returned to the caller with the chromosome, coordinate
//! or identifier that triggered it.

use std::fmt;

use thiserror::Error;

/// Coarse classification of an [`SjError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed annotation input.
    Validation,
    /// Edge mode outside of `exon`/`intron`.
    InvalidMode,
    /// Alignment record that could not be decoded.
    RecordDecode,
    /// Duplicate vertex, edge or transcript identifier.
    IdentifierCollision,
    /// Failure against the persisted annotation store.
    Storage,
    /// I/O failure on an external source.
    Io,
    /// Failure writing a tabular report.
    Csv,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::InvalidMode => "invalid_mode",
            ErrorKind::RecordDecode => "record_decode",
            ErrorKind::IdentifierCollision => "identifier_collision",
            ErrorKind::Storage => "storage",
            ErrorKind::Io => "io",
            ErrorKind::Csv => "csv",
        }
    }

    /// Whether an error of this kind may be skipped and counted instead of
    /// aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ErrorKind::RecordDecode)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum SjError {
    #[error("[validation] {0}")]
    Validation(String),

    #[error("[invalid_mode] mode must be 'exon' or 'intron', got '{0}'")]
    InvalidMode(String),

    #[error("[record_decode] {source_label}: record {record}: {message}")]
    RecordDecode {
        source_label: String,
        record:       String,
        message:      String,
    },

    #[error("[identifier_collision] {0}")]
    IdentifierCollision(String),

    #[error("[storage] {message}")]
    Storage {
        message: String,
        #[source]
        source:  Option<rusqlite::Error>,
    },

    #[error("[io] {0}")]
    Io(#[from] std::io::Error),

    #[error("[csv] {0}")]
    Csv(#[from] csv::Error),
}

impl SjError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SjError::Validation(_) => ErrorKind::Validation,
            SjError::InvalidMode(_) => ErrorKind::InvalidMode,
            SjError::RecordDecode { .. } => ErrorKind::RecordDecode,
            SjError::IdentifierCollision(_) => ErrorKind::IdentifierCollision,
            SjError::Storage { .. } => ErrorKind::Storage,
            SjError::Io(_) => ErrorKind::Io,
            SjError::Csv(_) => ErrorKind::Csv,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        SjError::Validation(message.into())
    }

    pub fn collision(message: impl Into<String>) -> Self {
        SjError::IdentifierCollision(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        SjError::Storage {
            message: message.into(),
            source:  None,
        }
    }

    pub fn record_decode(
        source_label: impl Into<String>,
        record: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        SjError::RecordDecode {
            source_label: source_label.into(),
            record:       record.into(),
            message:      message.into(),
        }
    }
}

impl From<rusqlite::Error> for SjError {
    fn from(err: rusqlite::Error) -> Self {
        SjError::Storage {
            message: format!("SQLite error: {}", err),
            source:  Some(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, SjError>;
