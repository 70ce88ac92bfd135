//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Punch taxonomy
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown tag '{0}': no active worker is bound to it")]
    UnknownTag(String),

    #[error("Unknown reader '{0}': provision it with `reader add`")]
    UnknownReader(String),

    #[error("Transient conflict while toggling the session; retry the punch")]
    TransientConflict,

    // ---------------------------
    // Admin errors
    // ---------------------------
    #[error("Worker {0} not found")]
    WorkerNotFound(i64),

    #[error("Reader {0} not found")]
    ReaderNotFound(i64),

    #[error("Tag '{0}' is already assigned to another worker")]
    TagAlreadyAssigned(String),

    #[error("Reader code '{0}' already exists")]
    ReaderCodeExists(String),

    #[error("Worker {0} has session history and cannot be deleted")]
    WorkerHasHistory(i64),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
