//! Unified application error type.
//! All modules (db, core, cli, export) return AppError so the report boundary
//! can collapse any failure into a single error payload.

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

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Record store boundary
    // ---------------------------
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Record store query failed: {0}")]
    StoreQueryFailed(String),

    #[error("{0} not found")]
    NotFound(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid round number: {0} (expected 1..=35)")]
    InvalidRound(u32),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Report errors
    // ---------------------------
    #[error("Report generation failed: {0}")]
    ReportGeneration(#[source] Box<AppError>),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] serde_yaml::Error),

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Wrap a fetch failure so the reconciler reports one error for the whole request.
    pub fn report_generation(cause: AppError) -> Self {
        AppError::ReportGeneration(Box::new(cause))
    }
}

pub type AppResult<T> = Result<T, AppError>;
